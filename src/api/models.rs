use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::blockchain::{Block, Blockchain};
use crate::network::PeerSet;
use crate::transaction::Transaction;

/// Shared application state: the ledger and the peer set, each behind its
/// own mutex. Admission, mining, sync adoption and balance reads all
/// serialize on the ledger lock.
pub struct AppState {
    pub ledger: Mutex<Blockchain>,
    pub peers: Mutex<PeerSet>,
    /// Default recipient for mining rewards when the caller names none.
    pub node_identifier: String,
}

impl AppState {
    pub fn new(ledger: Blockchain) -> Self {
        Self {
            ledger: Mutex::new(ledger),
            peers: Mutex::new(PeerSet::new()),
            node_identifier: Uuid::new_v4().simple().to_string(),
        }
    }
}

/* ---------- Chain API models ---------- */

/// Also the wire format peers consume during sync.
#[derive(Serialize)]
pub struct ChainResponse<'a> {
    pub length: usize,
    pub chain: &'a [Block],
}

#[derive(Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
    pub length: usize,
}

/* ---------- Mining API models ---------- */

#[derive(Deserialize)]
pub struct MineRequest {
    pub miner_address: Option<String>,
}

#[derive(Serialize)]
pub struct MineResponse {
    pub message: String,
    pub block: Block,
}

/* ---------- TX API models ---------- */

#[derive(Deserialize)]
pub struct NewTxRequest {
    pub sender: String,
    pub recipient: String,
    pub amount: f64,
    pub signature: String,
    #[serde(default)]
    pub fee: f64,
    pub nonce: Option<u64>,
}

#[derive(Serialize)]
pub struct NewTxResponse {
    pub message: String,
    pub block_index: u64,
}

#[derive(Serialize)]
pub struct PendingResponse {
    pub size: usize,
    pub transactions: Vec<Transaction>,
}

/* ---------- Balance / history API models ---------- */

#[derive(Serialize)]
pub struct BalanceResponse {
    pub address: String,
    pub balance: f64,
    pub currency: &'static str,
}

/// POST body because addresses are full public keys, too long for a URL.
#[derive(Deserialize)]
pub struct HistoryRequest {
    pub address: String,
}

#[derive(Serialize)]
pub struct HistoryEntry {
    #[serde(flatten)]
    pub transaction: Transaction,
    /// Index and timestamp of the containing block; `None` while pending.
    pub block_index: Option<u64>,
    pub block_timestamp: Option<i64>,
    pub status: &'static str,
}

#[derive(Serialize)]
pub struct HistoryResponse {
    pub address: String,
    pub transactions: Vec<HistoryEntry>,
}

/* ---------- Node / sync API models ---------- */

#[derive(Deserialize)]
pub struct RegisterNodesRequest {
    pub nodes: Vec<String>,
}

#[derive(Serialize)]
pub struct NodesResponse {
    pub message: Option<String>,
    pub nodes: Vec<String>,
}

#[derive(Serialize)]
pub struct SyncResponse {
    pub message: &'static str,
    pub updated: bool,
    pub length: usize,
}

/* ---------- Stats API models ---------- */

#[derive(Serialize)]
pub struct StatsResponse {
    pub height: usize,
    pub difficulty_target: String,
    pub pending: usize,
    pub peers: usize,
    pub target_block_time_secs: i64,
    pub adjustment_interval: usize,
}

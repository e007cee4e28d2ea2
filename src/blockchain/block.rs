use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::transaction::Transaction;

/// A single block: a batch of transactions plus linkage and proof metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub index: u64,
    pub timestamp: i64, // Unix timestamp (UTC)
    pub transactions: Vec<Transaction>,
    pub nonce: u64, // Proof-of-Work nonce
    pub hash_of_previous_block: String,
    pub merkle_root: String,
    /// Difficulty target in effect when this block was mined; chain
    /// validation re-checks the proof against this recorded value.
    pub difficulty: String,
}

impl Block {
    /// SHA-256 of this block's canonical serialization; the next block's
    /// `hash_of_previous_block` must equal it.
    pub fn hash(&self) -> String {
        sha256_hex(&canonical_json(self))
    }
}

/// Canonical JSON used for all hashing: object keys sorted, no insignificant
/// whitespace. Routing through `serde_json::Value` gives the sorted key
/// order (its object map is a BTreeMap), so the same data always serializes
/// to the same bytes regardless of struct field order.
pub fn canonical_json<T: Serialize>(value: &T) -> String {
    serde_json::to_value(value)
        .expect("serialize for hashing")
        .to_string()
}

/// Hex SHA-256 of a text payload.
pub fn sha256_hex(data: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data.as_bytes());
    hex::encode(hasher.finalize())
}

/// Digest of the fixed sentinel the genesis block links back to. Index 0 has
/// no predecessor, so its `hash_of_previous_block` is this constant value.
pub fn genesis_prev_hash() -> String {
    sha256_hex(&canonical_json(&"genesis_block"))
}

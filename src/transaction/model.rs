use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Sentinel sender for coinbase (reward) transactions.
pub const COINBASE_SENDER: &str = "0";

/// Currency tag stamped onto every transaction.
pub const CURRENCY: &str = "DNR";

/// A value transfer between two addresses.
///
/// Addresses are the hex-encoded compressed public keys themselves; there is
/// no separate account-id layer, so the identity used for balance and history
/// lookups is the same string the signature verifies against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub sender: String,
    pub recipient: String,
    pub amount: f64,
    pub fee: f64,
    /// Per-sender strictly increasing counter; `None` only on coinbase
    /// transactions, which carry no replay protection.
    pub nonce: Option<u64>,
    pub currency: String,
    pub timestamp: i64,
}

impl Transaction {
    /// Build a transaction stamped with the current time.
    pub fn new(sender: &str, recipient: &str, amount: f64, fee: f64, nonce: Option<u64>) -> Self {
        Self {
            sender: sender.to_string(),
            recipient: recipient.to_string(),
            amount,
            fee,
            nonce,
            currency: CURRENCY.to_string(),
            timestamp: Utc::now().timestamp(),
        }
    }

    pub fn is_coinbase(&self) -> bool {
        self.sender == COINBASE_SENDER
    }

    /// Whether `address` appears on either side of the transfer.
    pub fn involves(&self, address: &str) -> bool {
        self.sender == address || self.recipient == address
    }
}

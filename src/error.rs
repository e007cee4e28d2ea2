use thiserror::Error;

/// Failure taxonomy for the ledger core.
///
/// Admission failures (`InvalidSignature`, `ReplayedNonce`,
/// `InsufficientBalance`) are reported synchronously to the submitter.
/// Sync-side failures (`PeerUnreachable`, `MalformedPeerChain`) are per-peer
/// and non-fatal: the offending peer is skipped and the scan continues.
/// Store failures are fatal only when the chain is loaded at startup; after
/// a mutating operation they are logged and the in-memory chain stays
/// authoritative.
#[derive(Debug, Error)]
pub enum ChainError {
    #[error("signature missing or invalid")]
    InvalidSignature,

    #[error("nonce replayed: expected > {expected_gt}, got {got}")]
    ReplayedNonce { expected_gt: i64, got: u64 },

    #[error("insufficient balance: need {needed}, have {available}")]
    InsufficientBalance { needed: f64, available: f64 },

    #[error("peer chain failed structural or proof-of-work validation")]
    MalformedPeerChain,

    #[error("peer {peer} unreachable: {reason}")]
    PeerUnreachable { peer: String, reason: String },

    #[error("mining abandoned before a valid nonce was found")]
    MiningAborted,

    #[error("chain store I/O failure: {0}")]
    Store(#[from] std::io::Error),

    #[error("chain store contains malformed data: {0}")]
    StoreFormat(#[from] serde_json::Error),
}

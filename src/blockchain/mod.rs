pub mod block;
pub mod difficulty;
pub mod merkle;
pub mod model;
pub mod pow;
pub mod storage;

pub use block::Block;
pub use model::Blockchain;
pub use pow::CancelToken;
pub use storage::ChainStore;

/// Base reward the coinbase pays the miner, before pending fees.
pub const BLOCK_REWARD: f64 = 1.0;

/// Default path of the persisted chain; override with the `CHAIN_FILE`
/// environment variable.
pub const DEFAULT_CHAIN_FILE: &str = "chain_data.json";

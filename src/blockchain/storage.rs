use std::fs;
use std::path::PathBuf;

use log::debug;

use crate::error::ChainError;

use super::Block;

/// Whole-file JSON persistence for the chain.
///
/// Every save rewrites the complete block sequence; there is no incremental
/// append and the rewrite is not crash-atomic, so a crash mid-write can
/// corrupt the stored chain. Load failures are fatal at startup; save
/// failures after a mutation are logged by the caller and the in-memory
/// chain stays authoritative.
#[derive(Debug, Clone)]
pub struct ChainStore {
    path: PathBuf,
}

impl ChainStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read and deserialize the full persisted chain.
    pub fn load(&self) -> Result<Vec<Block>, ChainError> {
        let raw = fs::read_to_string(&self.path)?;
        let chain = serde_json::from_str(&raw)?;
        Ok(chain)
    }

    /// Rewrite the chain file with the given block sequence.
    pub fn save(&self, chain: &[Block]) -> Result<(), ChainError> {
        let raw = serde_json::to_string_pretty(chain)?;
        fs::write(&self.path, raw)?;
        debug!("persisted {} blocks to {}", chain.len(), self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::merkle;
    use crate::transaction::Transaction;

    fn block(index: u64) -> Block {
        let transactions = vec![Transaction::new("alice", "bob", 1.0, 0.0, Some(index))];
        Block {
            index,
            timestamp: 1_700_000_000 + index as i64,
            merkle_root: merkle::merkle_root(&transactions),
            transactions,
            nonce: index * 7,
            hash_of_previous_block: format!("prev-{index}"),
            difficulty: "0000".into(),
        }
    }

    #[test]
    fn save_then_load_roundtrips_the_chain() {
        let dir = tempfile::tempdir().unwrap();
        let store = ChainStore::new(dir.path().join("chain_data.json"));
        assert!(!store.exists());

        let chain = vec![block(0), block(1), block(2)];
        store.save(&chain).unwrap();
        assert!(store.exists());

        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 3);
        assert_eq!(loaded[1].index, 1);
        assert_eq!(loaded[1].transactions, chain[1].transactions);
        assert_eq!(loaded[2].hash(), chain[2].hash());
    }

    #[test]
    fn load_of_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = ChainStore::new(dir.path().join("absent.json"));
        assert!(matches!(store.load(), Err(ChainError::Store(_))));
    }

    #[test]
    fn load_of_garbage_reports_malformed_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chain_data.json");
        std::fs::write(&path, "not json at all").unwrap();

        let store = ChainStore::new(path);
        assert!(matches!(store.load(), Err(ChainError::StoreFormat(_))));
    }
}

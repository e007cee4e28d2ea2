use std::collections::HashMap;

use crate::error::ChainError;

use super::Transaction;

/// Admission-side state: the pending pool (admitted but unmined
/// transactions, insertion order preserved) and the per-sender nonce table.
///
/// The nonce table lives only as long as the process; it is rebuilt empty on
/// restart rather than persisted with the chain.
#[derive(Debug, Default)]
pub struct Admission {
    pool: Vec<Transaction>,
    nonces: HashMap<String, i64>,
}

impl Admission {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enforce the strictly-increasing nonce rule and record the new value.
    ///
    /// The nonce is consumed here, before the caller runs its signature and
    /// balance checks, and is not rolled back if those later fail: a
    /// transaction rejected for balance still burns its nonce. Retries after
    /// a rejection must use a fresh nonce.
    pub fn consume_nonce(&mut self, sender: &str, nonce: u64) -> Result<(), ChainError> {
        let last = self.nonces.get(sender).copied().unwrap_or(-1);
        if (nonce as i64) <= last {
            return Err(ChainError::ReplayedNonce {
                expected_gt: last,
                got: nonce,
            });
        }
        self.nonces.insert(sender.to_string(), nonce as i64);
        Ok(())
    }

    /// Stage a fully validated transaction for the next mined block.
    pub fn push(&mut self, tx: Transaction) {
        self.pool.push(tx);
    }

    pub fn pending(&self) -> &[Transaction] {
        &self.pool
    }

    /// Sum of fees across the pending pool; the coinbase pays this out to
    /// the miner on top of the base reward.
    pub fn pending_fees(&self) -> f64 {
        self.pool.iter().map(|tx| tx.fee).sum()
    }

    /// Atomically take the whole pool, leaving it empty.
    pub fn drain(&mut self) -> Vec<Transaction> {
        std::mem::take(&mut self.pool)
    }

    pub fn len(&self) -> usize {
        self.pool.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_nonce_for_unseen_sender_must_exceed_minus_one() {
        let mut adm = Admission::new();
        assert!(adm.consume_nonce("alice", 0).is_ok());
    }

    #[test]
    fn replayed_or_stale_nonce_is_rejected() {
        let mut adm = Admission::new();
        adm.consume_nonce("alice", 3).unwrap();

        match adm.consume_nonce("alice", 3) {
            Err(ChainError::ReplayedNonce { expected_gt, got }) => {
                assert_eq!(expected_gt, 3);
                assert_eq!(got, 3);
            }
            other => panic!("expected ReplayedNonce, got {other:?}"),
        }
        assert!(matches!(
            adm.consume_nonce("alice", 1),
            Err(ChainError::ReplayedNonce { .. })
        ));

        // Gaps are allowed, only strict increase is enforced.
        assert!(adm.consume_nonce("alice", 10).is_ok());
    }

    #[test]
    fn nonces_are_tracked_per_sender() {
        let mut adm = Admission::new();
        adm.consume_nonce("alice", 0).unwrap();
        assert!(adm.consume_nonce("bob", 0).is_ok());
    }

    #[test]
    fn drain_empties_the_pool_and_preserves_order() {
        let mut adm = Admission::new();
        adm.push(Transaction::new("a", "b", 1.0, 0.1, Some(0)));
        adm.push(Transaction::new("b", "c", 2.0, 0.2, Some(0)));
        assert_eq!(adm.len(), 2);
        assert!((adm.pending_fees() - 0.3).abs() < 1e-9);

        let drained = adm.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].sender, "a");
        assert_eq!(drained[1].sender, "b");
        assert!(adm.is_empty());
    }
}

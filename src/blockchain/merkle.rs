//! Merkle commitment over an ordered transaction list.
//!
//! Leaves are the hex SHA-256 digests of each transaction's canonical JSON.
//! Levels pair leaves left to right, concatenating the two hex digests as
//! text and re-hashing; an odd trailing digest is paired with itself. A
//! single-transaction list's root is that leaf unchanged.

use crate::transaction::Transaction;

use super::block::{canonical_json, sha256_hex};

/// Root committed by blocks with no transactions. A fixed sentinel digest,
/// deliberately distinct from an all-zero value and from any real leaf.
pub fn empty_root() -> String {
    sha256_hex(&canonical_json(&"empty"))
}

/// Compute the Merkle root of `transactions`. Deterministic: the same list
/// always yields the same root.
pub fn merkle_root(transactions: &[Transaction]) -> String {
    if transactions.is_empty() {
        return empty_root();
    }

    let mut level: Vec<String> = transactions
        .iter()
        .map(|tx| sha256_hex(&canonical_json(tx)))
        .collect();

    while level.len() > 1 {
        let mut next = Vec::with_capacity(level.len().div_ceil(2));
        for pair in level.chunks(2) {
            let combined = if pair.len() == 2 {
                format!("{}{}", pair[0], pair[1])
            } else {
                // Odd leaf: duplicate rather than promote unpaired.
                format!("{}{}", pair[0], pair[0])
            };
            next.push(sha256_hex(&combined));
        }
        level = next;
    }

    level.remove(0)
}

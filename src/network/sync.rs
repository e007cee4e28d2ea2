//! Longest-valid-chain synchronization against registered peers.
//!
//! Each sync pass fetches every peer's full chain snapshot, discards
//! unreachable peers and candidates that fail validation, and adopts the
//! longest surviving candidate only if it is strictly longer than the local
//! chain. Adoption is all-or-nothing: either the whole local chain is
//! replaced and persisted, or local state is left untouched.

use std::sync::Mutex;
use std::time::Duration;

use log::{info, warn};
use serde::Deserialize;

use crate::blockchain::{Block, Blockchain};
use crate::error::ChainError;

/// Per-peer request deadline; a slow peer must not stall the whole scan.
const PEER_TIMEOUT: Duration = Duration::from_secs(5);

/// Wire shape of a peer's `GET /api/v1/chain/` response.
#[derive(Debug, Deserialize)]
pub struct PeerChain {
    pub length: usize,
    pub chain: Vec<Block>,
}

/// Fetch one peer's chain snapshot. Network failures map to
/// [`ChainError::PeerUnreachable`], undecodable bodies to
/// [`ChainError::MalformedPeerChain`]; both are handled by skipping the peer.
async fn fetch_peer_chain(client: &reqwest::Client, peer: &str) -> Result<PeerChain, ChainError> {
    let url = format!("{peer}/api/v1/chain/");
    let response = client
        .get(&url)
        .timeout(PEER_TIMEOUT)
        .send()
        .await
        .map_err(|e| ChainError::PeerUnreachable {
            peer: peer.to_string(),
            reason: e.to_string(),
        })?;

    if !response.status().is_success() {
        return Err(ChainError::PeerUnreachable {
            peer: peer.to_string(),
            reason: format!("status {}", response.status()),
        });
    }

    response
        .json::<PeerChain>()
        .await
        .map_err(|_| ChainError::MalformedPeerChain)
}

/// Longest-valid-wins selection over fetched candidates. Strict `>` against
/// the best length so far, so the first-seen candidate keeps ties. The
/// reported length is advisory only; the blocks themselves are counted, and
/// a candidate whose count disagrees with its report is discarded as
/// malformed.
pub fn select_best_candidate(local_len: usize, candidates: Vec<PeerChain>) -> Option<Vec<Block>> {
    let mut best: Option<Vec<Block>> = None;
    let mut max_length = local_len;

    for candidate in candidates {
        if candidate.chain.len() != candidate.length {
            warn!(
                "sync: candidate reports length {} but carries {} blocks, discarding",
                candidate.length,
                candidate.chain.len()
            );
            continue;
        }
        if candidate.chain.len() > max_length && Blockchain::valid_chain(&candidate.chain) {
            max_length = candidate.chain.len();
            best = Some(candidate.chain);
        }
    }

    best
}

/// One full sync pass over `peers`. Fetches happen before the ledger lock is
/// taken, so in-flight requests never block admission or mining. Returns
/// whether the local chain was replaced.
pub async fn sync_with_peers(peers: &[String], ledger: &Mutex<Blockchain>) -> bool {
    let client = reqwest::Client::new();

    let mut candidates = Vec::new();
    for peer in peers {
        match fetch_peer_chain(&client, peer).await {
            Ok(candidate) => candidates.push(candidate),
            Err(e) => warn!("sync: skipping peer: {e}"),
        }
    }

    let mut ledger = ledger.lock().expect("mutex poisoned");
    match select_best_candidate(ledger.len(), candidates) {
        Some(chain) => {
            info!(
                "sync: adopting peer chain of {} blocks (local was {})",
                chain.len(),
                ledger.len()
            );
            ledger.replace_chain(chain);
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::{CancelToken, ChainStore};

    /// Independently grown valid chain of `blocks` mined blocks (length is
    /// `blocks + 1` counting genesis).
    fn grow_chain(blocks: usize) -> Vec<Block> {
        let dir = tempfile::tempdir().unwrap();
        let store = ChainStore::new(dir.path().join("chain_data.json"));
        let mut bc = Blockchain::open(store).unwrap();
        for _ in 0..blocks {
            bc.mine("peer-miner", &CancelToken::new()).unwrap();
        }
        bc.chain
    }

    fn peer_chain(chain: Vec<Block>) -> PeerChain {
        PeerChain {
            length: chain.len(),
            chain,
        }
    }

    #[test]
    fn longer_valid_candidate_wins() {
        let longer = grow_chain(4); // length 5
        let adopted = select_best_candidate(3, vec![peer_chain(longer.clone())]).unwrap();
        assert_eq!(adopted.len(), 5);
        assert_eq!(adopted.last().unwrap().hash(), longer.last().unwrap().hash());
    }

    #[test]
    fn shorter_or_equal_candidates_are_ignored() {
        let shorter = grow_chain(1); // length 2
        assert!(select_best_candidate(3, vec![peer_chain(shorter)]).is_none());

        let equal = grow_chain(2); // length 3
        assert!(select_best_candidate(3, vec![peer_chain(equal)]).is_none());
    }

    #[test]
    fn tampered_candidate_is_rejected_even_when_longer() {
        let mut tampered = grow_chain(4);
        tampered[2].transactions[0].amount = 99.0;
        assert!(select_best_candidate(1, vec![peer_chain(tampered)]).is_none());
    }

    #[test]
    fn length_report_must_match_the_block_count() {
        let chain = grow_chain(4);
        let lying = PeerChain {
            length: 50,
            chain,
        };
        assert!(select_best_candidate(1, vec![lying]).is_none());
    }

    #[test]
    fn first_seen_longest_wins_among_peers() {
        let first = grow_chain(4);
        let first_tip = first.last().unwrap().hash();
        let second = grow_chain(4); // same length, different history

        let adopted =
            select_best_candidate(1, vec![peer_chain(first), peer_chain(second)]).unwrap();
        assert_eq!(adopted.last().unwrap().hash(), first_tip);
    }

    #[test]
    fn longest_of_several_valid_candidates_is_adopted() {
        let short = grow_chain(2);
        let long = grow_chain(4);
        let long_tip = long.last().unwrap().hash();

        let adopted = select_best_candidate(1, vec![peer_chain(short), peer_chain(long)]).unwrap();
        assert_eq!(adopted.len(), 5);
        assert_eq!(adopted.last().unwrap().hash(), long_tip);
    }
}

pub mod sync;

pub use sync::sync_with_peers;

/// Manually registered peer base URLs. Peers are never discovered or
/// inferred; they enter only through explicit registration.
#[derive(Debug, Default)]
pub struct PeerSet {
    peers: Vec<String>,
}

impl PeerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize and insert a peer address: an address without a scheme
    /// defaults to `http://`, trailing slashes are trimmed, duplicates are
    /// ignored. Returns the normalized form, or `None` for a blank address.
    pub fn register(&mut self, address: &str) -> Option<String> {
        let trimmed = address.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return None;
        }

        let normalized = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            trimmed.to_string()
        } else {
            format!("http://{trimmed}")
        };

        if !self.peers.contains(&normalized) {
            self.peers.push(normalized.clone());
        }
        Some(normalized)
    }

    /// Snapshot of all registered peers, in registration order.
    pub fn all(&self) -> Vec<String> {
        self.peers.clone()
    }

    pub fn len(&self) -> usize {
        self.peers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_addresses_get_an_http_scheme() {
        let mut peers = PeerSet::new();
        assert_eq!(
            peers.register("127.0.0.1:5001").as_deref(),
            Some("http://127.0.0.1:5001")
        );
    }

    #[test]
    fn explicit_schemes_and_trailing_slashes_are_normalized() {
        let mut peers = PeerSet::new();
        assert_eq!(
            peers.register("https://node.example/").as_deref(),
            Some("https://node.example")
        );
        assert_eq!(
            peers.register("http://10.0.0.2:8080").as_deref(),
            Some("http://10.0.0.2:8080")
        );
    }

    #[test]
    fn duplicates_and_blanks_are_ignored() {
        let mut peers = PeerSet::new();
        peers.register("127.0.0.1:5001");
        peers.register("http://127.0.0.1:5001/");
        assert_eq!(peers.len(), 1);

        assert_eq!(peers.register("   "), None);
        assert!(peers.register("").is_none());
        assert_eq!(peers.len(), 1);
    }
}

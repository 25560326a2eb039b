//! Shared Application State
//!
//! Read-only proof index shared by every request handler.

use proof_table::ProofIndex;
use std::sync::Arc;
use std::time::Instant;

/// Shared application state
#[derive(Debug, Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

#[derive(Debug)]
struct AppStateInner {
    /// Proof table loaded at startup, never mutated
    index: ProofIndex,
    /// Service start time
    start_time: Instant,
}

impl AppState {
    /// Create new application state
    #[must_use]
    pub fn new(index: ProofIndex) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                index,
                start_time: Instant::now(),
            }),
        }
    }

    /// Get the proof index
    #[must_use]
    pub fn index(&self) -> &ProofIndex {
        &self.inner.index
    }

    /// Get uptime in seconds
    #[must_use]
    pub fn uptime_secs(&self) -> u64 {
        self.inner.start_time.elapsed().as_secs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proof_table::{ProofTable, WalletEntry};

    #[test]
    fn test_app_state_shares_index() {
        let table = ProofTable {
            root_hash: "0xroot".to_string(),
            wallets: vec![WalletEntry {
                address: "0x1".to_string(),
                proof: vec!["h1".to_string()],
            }],
        };

        let state = AppState::new(ProofIndex::new(table));
        let cloned = state.clone();

        assert!(std::ptr::eq(state.index(), cloned.index()));
        assert_eq!(cloned.index().root_hash(), "0xroot");
        assert!(cloned.index().lookup("0X1").is_some());
    }
}

// Path: crates/monitor/src/heartbeat/searcher.rs
use super::matcher::HeartbeatMatcher;
use super::scanner::BlockScanner;
use tokio_util::sync::CancellationToken;
use vigil_types::app::SearchOutcome;
use vigil_types::error::CheckError;

/// Searches the first `try_cnt` heights of a window for a heartbeat.
///
/// Heartbeats rarely land on the boundary block itself, so the search walks
/// forward one height at a time and stops at the first hit. A failed fetch
/// ends the search with the error; it is not a miss. Heights above the tip,
/// when one is set, are never fetched.
#[derive(Debug)]
pub struct WindowSearcher<'a> {
    scanner: &'a BlockScanner,
    matcher: &'a HeartbeatMatcher,
    try_cnt: u32,
    tip: Option<u64>,
}

impl<'a> WindowSearcher<'a> {
    pub fn new(scanner: &'a BlockScanner, matcher: &'a HeartbeatMatcher, try_cnt: u32) -> Self {
        Self {
            scanner,
            matcher,
            try_cnt,
            tip: None,
        }
    }

    /// Bounds the search to heights at or below `tip`.
    pub fn with_tip(mut self, tip: u64) -> Self {
        self.tip = Some(tip);
        self
    }

    pub async fn search(
        &self,
        start_height: u64,
        cancel: &CancellationToken,
    ) -> Result<SearchOutcome, CheckError> {
        for attempt in 0..self.try_cnt {
            let height = start_height.saturating_add(u64::from(attempt));
            if self.tip.is_some_and(|tip| height > tip) {
                tracing::debug!(target: "heartbeat", start_height, height, "search reached the chain tip");
                return Ok(SearchOutcome::pending(attempt));
            }
            let envelopes = self.scanner.scan(height, cancel).await?;
            for envelope in &envelopes {
                if self.matcher.matches(envelope)? {
                    tracing::debug!(target: "heartbeat", start_height, height, "heartbeat found");
                    return Ok(SearchOutcome::found_at(height, attempt + 1));
                }
            }
        }
        tracing::debug!(
            target: "heartbeat",
            start_height,
            try_cnt = self.try_cnt,
            "no heartbeat in window"
        );
        Ok(SearchOutcome::not_found(self.try_cnt))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use vigil_test_utils::fixtures::{address, heartbeat_envelope, unrelated_envelope};
    use vigil_test_utils::MockChain;

    fn matcher() -> HeartbeatMatcher {
        HeartbeatMatcher::new(address(1), vec![])
    }

    #[tokio::test]
    async fn test_hit_on_boundary_block() {
        let chain = Arc::new(MockChain::new(200).with_block(100, vec![heartbeat_envelope(&address(1))]));
        let scanner = BlockScanner::new(chain.clone());
        let m = matcher();
        let out = WindowSearcher::new(&scanner, &m, 5)
            .search(100, &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(out, SearchOutcome::found_at(100, 1));
        assert_eq!(chain.fetches(), vec![100]);
    }

    #[tokio::test]
    async fn test_hit_beyond_budget_is_not_seen() {
        let chain = Arc::new(
            MockChain::new(200)
                .with_block(101, vec![unrelated_envelope()])
                .with_block(103, vec![heartbeat_envelope(&address(1))]),
        );
        let scanner = BlockScanner::new(chain.clone());
        let m = matcher();
        let out = WindowSearcher::new(&scanner, &m, 3)
            .search(100, &CancellationToken::new())
            .await
            .unwrap();
        assert!(!out.found);
        assert_eq!(out.heights_scanned, 3);
        assert_eq!(chain.fetches(), vec![100, 101, 102]);
    }

    #[tokio::test]
    async fn test_transport_error_aborts_search() {
        let chain = Arc::new(
            MockChain::new(200)
                .with_transport_error(101)
                .with_block(102, vec![heartbeat_envelope(&address(1))]),
        );
        let scanner = BlockScanner::new(chain.clone());
        let m = matcher();
        let err = WindowSearcher::new(&scanner, &m, 5)
            .search(100, &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(err.is_transport());
        assert_eq!(chain.fetches(), vec![100, 101]);
    }

    #[tokio::test]
    async fn test_zero_budget_scans_nothing() {
        let chain = Arc::new(MockChain::new(200));
        let scanner = BlockScanner::new(chain.clone());
        let m = matcher();
        let out = WindowSearcher::new(&scanner, &m, 0)
            .search(100, &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(out, SearchOutcome::not_found(0));
        assert!(chain.fetches().is_empty());
    }

    #[tokio::test]
    async fn test_search_stops_at_tip() {
        let chain = Arc::new(MockChain::new(1_001));
        let scanner = BlockScanner::new(chain.clone());
        let m = matcher();
        let out = WindowSearcher::new(&scanner, &m, 5)
            .with_tip(1_001)
            .search(1_000, &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(out, SearchOutcome::pending(2));
        assert_eq!(chain.fetches(), vec![1_000, 1_001]);
    }

    #[tokio::test]
    async fn test_hit_at_tip_is_found() {
        let chain = Arc::new(MockChain::new(1_001).with_block(1_001, vec![heartbeat_envelope(&address(1))]));
        let scanner = BlockScanner::new(chain.clone());
        let m = matcher();
        let out = WindowSearcher::new(&scanner, &m, 5)
            .with_tip(1_001)
            .search(1_000, &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(out, SearchOutcome::found_at(1_001, 2));
    }
}

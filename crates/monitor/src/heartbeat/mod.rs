// Path: crates/monitor/src/heartbeat/mod.rs
//! Heartbeat liveness.
//!
//! Two interchangeable strategies implement [`LivenessCheck`]:
//! [`ChainScanLiveness`] searches recent windows on chain for the nested
//! heartbeat message, and [`IndexerLiveness`] checks the age of heartbeats
//! reported by an indexer. `[heartbeat].source` picks one.

mod aggregator;
pub mod indexer;
pub mod matcher;
mod scanner;
mod searcher;
mod window;

pub use aggregator::{ChainScanLiveness, LivenessAggregator};
pub use indexer::IndexerLiveness;
pub use matcher::{HeartbeatMatcher, MessageMatch};
pub use scanner::BlockScanner;
pub use searcher::WindowSearcher;
pub use window::preceding_window;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use vigil_types::app::LivenessVerdict;
use vigil_types::config::{HeartbeatConfig, HeartbeatSource};
use vigil_types::error::CheckError;

/// One way of deciding whether the broadcaster is alive.
#[async_trait]
pub trait LivenessCheck: Send + Sync + std::fmt::Debug {
    /// The evidence source this strategy reads.
    fn source(&self) -> HeartbeatSource;

    /// Computes a fresh verdict. Nothing is cached between calls.
    async fn check(&self, cancel: &CancellationToken) -> Result<LivenessVerdict, CheckError>;
}

/// The numeric knobs of the chain-scan strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LivenessParams {
    pub check_n: u32,
    pub window_length: u64,
    pub try_cnt: u32,
    pub miss_threshold: u32,
}

impl LivenessParams {
    pub fn from_config(cfg: &HeartbeatConfig) -> Self {
        Self {
            check_n: cfg.check_n,
            window_length: cfg.window_length,
            try_cnt: cfg.try_cnt,
            miss_threshold: cfg.miss_threshold,
        }
    }
}

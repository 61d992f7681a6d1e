// Path: crates/api/src/indexer/mod.rs
//! Defines the indexer-backed heartbeat source.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use vigil_types::error::CheckError;

/// One heartbeat as reported by an indexer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeartbeatRecord {
    /// Block height of the heartbeat transaction.
    pub height: u64,
    /// Hash of the heartbeat transaction.
    pub tx_hash: String,
    /// RFC 3339 timestamp as returned by the indexer; parsed by the caller.
    pub timestamp: String,
}

/// An off-chain index of heartbeat transactions.
#[async_trait]
pub trait HeartbeatIndexer: Send + Sync {
    /// Up to `limit` most recent heartbeats submitted by `address` (bech32).
    async fn recent_heartbeats(
        &self,
        address: &str,
        limit: u32,
    ) -> Result<Vec<HeartbeatRecord>, CheckError>;
}

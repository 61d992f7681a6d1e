// Path: crates/monitor/src/heartbeat/indexer.rs
//! Liveness from an off-chain heartbeat index.
//!
//! Cheaper than scanning blocks but only as trustworthy as the indexer: a
//! record counts as a heartbeat when its timestamp parses and is recent.

use super::LivenessCheck;
use async_trait::async_trait;
use std::sync::Arc;
use time::format_description::well_known::Rfc3339;
use time::{Duration, OffsetDateTime};
use tokio_util::sync::CancellationToken;
use vigil_api::{cancellable, HeartbeatIndexer, HeartbeatRecord};
use vigil_types::app::LivenessVerdict;
use vigil_types::config::{HeartbeatConfig, HeartbeatSource};
use vigil_types::error::CheckError;

fn is_fresh(record: &HeartbeatRecord, now: OffsetDateTime, max_age: Duration) -> bool {
    match OffsetDateTime::parse(&record.timestamp, &Rfc3339) {
        Ok(ts) => now - ts <= max_age,
        Err(e) => {
            tracing::debug!(
                target: "heartbeat",
                height = record.height,
                timestamp = %record.timestamp,
                error = %e,
                "unparsable heartbeat timestamp"
            );
            false
        }
    }
}

/// Scores indexer records against `now`. Every record is one checked slot.
pub fn evaluate(
    records: &[HeartbeatRecord],
    now: OffsetDateTime,
    max_age: Duration,
    miss_threshold: u32,
) -> LivenessVerdict {
    let missed = records
        .iter()
        .filter(|r| !is_fresh(r, now, max_age))
        .count();
    let checked = u32::try_from(records.len()).unwrap_or(u32::MAX);
    LivenessVerdict::new(
        checked,
        u32::try_from(missed).unwrap_or(u32::MAX),
        miss_threshold,
    )
}

pub struct IndexerLiveness {
    indexer: Arc<dyn HeartbeatIndexer>,
    address: String,
    limit: u32,
    max_age: Duration,
    miss_threshold: u32,
}

impl IndexerLiveness {
    /// `address` is the broadcaster in the indexer's bech32 form.
    pub fn new(indexer: Arc<dyn HeartbeatIndexer>, address: String, cfg: &HeartbeatConfig) -> Self {
        Self {
            indexer,
            address,
            limit: cfg.check_n,
            max_age: Duration::seconds(i64::try_from(cfg.max_age_secs).unwrap_or(i64::MAX)),
            miss_threshold: cfg.miss_threshold,
        }
    }
}

impl std::fmt::Debug for IndexerLiveness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexerLiveness")
            .field("address", &self.address)
            .field("limit", &self.limit)
            .field("max_age", &self.max_age)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl LivenessCheck for IndexerLiveness {
    fn source(&self) -> HeartbeatSource {
        HeartbeatSource::Indexer
    }

    async fn check(&self, cancel: &CancellationToken) -> Result<LivenessVerdict, CheckError> {
        let records = cancellable(
            cancel,
            self.indexer.recent_heartbeats(&self.address, self.limit),
        )
        .await?;
        let verdict = evaluate(
            &records,
            OffsetDateTime::now_utc(),
            self.max_age,
            self.miss_threshold,
        );
        tracing::info!(
            target: "heartbeat",
            missed = verdict.missed,
            checked = verdict.windows_checked,
            status = verdict.status,
            "indexer liveness evaluated"
        );
        Ok(verdict)
    }
}

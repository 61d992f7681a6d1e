// Path: crates/test_utils/src/mocks/mod.rs
//! Scriptable in-memory implementations of the collaborator traits.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use vigil_api::{
    Alert, AlertSink, ChainSource, HeartbeatIndexer, HeartbeatRecord, MaintainerSource,
};
use vigil_telemetry::sinks::MonitorMetricsSink;
use vigil_types::app::{AccountAddress, ChainName, Envelope};
use vigil_types::error::CheckError;

#[derive(Debug, Clone)]
enum ScriptedBlock {
    Txs(Vec<Envelope>),
    TransportError(String),
    DecodeError(String),
}

/// A chain with a fixed latest height and scripted block contents.
///
/// Heights without a script are empty blocks. Every `transactions` call is
/// recorded so tests can assert how far a search went.
#[derive(Debug, Default)]
pub struct MockChain {
    latest: Option<u64>,
    blocks: HashMap<u64, ScriptedBlock>,
    fetches: Mutex<Vec<u64>>,
}

impl MockChain {
    pub fn new(latest: u64) -> Self {
        Self {
            latest: Some(latest),
            ..Default::default()
        }
    }

    /// A chain whose height lookup always fails.
    pub fn unreachable() -> Self {
        Self::default()
    }

    pub fn with_block(mut self, height: u64, txs: Vec<Envelope>) -> Self {
        self.blocks.insert(height, ScriptedBlock::Txs(txs));
        self
    }

    pub fn with_transport_error(mut self, height: u64) -> Self {
        self.blocks.insert(
            height,
            ScriptedBlock::TransportError(format!("connection reset fetching block {height}")),
        );
        self
    }

    pub fn with_decode_error(mut self, height: u64) -> Self {
        self.blocks.insert(
            height,
            ScriptedBlock::DecodeError(format!("corrupt payload at {height}")),
        );
        self
    }

    /// Heights fetched so far, in call order.
    pub fn fetches(&self) -> Vec<u64> {
        self.fetches.lock().clone()
    }
}

#[async_trait]
impl ChainSource for MockChain {
    async fn latest_height(&self) -> Result<u64, CheckError> {
        self.latest
            .ok_or_else(|| CheckError::Transport("rpc unreachable".into()))
    }

    async fn transactions(&self, height: u64) -> Result<Vec<Envelope>, CheckError> {
        self.fetches.lock().push(height);
        match self.blocks.get(&height) {
            Some(ScriptedBlock::Txs(txs)) => Ok(txs.clone()),
            Some(ScriptedBlock::TransportError(msg)) => Err(CheckError::Transport(msg.clone())),
            Some(ScriptedBlock::DecodeError(msg)) => Err(CheckError::Decode(msg.clone())),
            None => Ok(Vec::new()),
        }
    }
}

/// A chain registry with scripted chains and maintainer sets.
#[derive(Debug, Default)]
pub struct MockMaintainers {
    chains: Option<Vec<ChainName>>,
    maintainers: HashMap<String, Vec<AccountAddress>>,
    failing: Vec<String>,
    queries: Mutex<Vec<String>>,
}

impl MockMaintainers {
    pub fn new(chains: &[&str]) -> Self {
        Self {
            chains: Some(chains.iter().map(|c| c.to_string()).collect()),
            ..Default::default()
        }
    }

    /// A registry whose chain list lookup fails.
    pub fn unreachable() -> Self {
        Self::default()
    }

    pub fn with_maintainers(mut self, chain: &str, maintainers: Vec<AccountAddress>) -> Self {
        self.maintainers.insert(chain.to_string(), maintainers);
        self
    }

    pub fn with_failing_chain(mut self, chain: &str) -> Self {
        self.failing.push(chain.to_string());
        self
    }

    /// Chains whose maintainer set was queried, in call order.
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().clone()
    }
}

#[async_trait]
impl MaintainerSource for MockMaintainers {
    async fn chains(&self) -> Result<Vec<ChainName>, CheckError> {
        self.chains
            .clone()
            .ok_or_else(|| CheckError::Transport("registry unreachable".into()))
    }

    async fn chain_maintainers(&self, chain: &str) -> Result<Vec<AccountAddress>, CheckError> {
        self.queries.lock().push(chain.to_string());
        if self.failing.iter().any(|c| c == chain) {
            return Err(CheckError::Transport(format!("maintainers of {chain} unavailable")));
        }
        Ok(self.maintainers.get(chain).cloned().unwrap_or_default())
    }
}

/// An indexer returning a fixed record list, or failing.
#[derive(Debug, Default)]
pub struct MockIndexer {
    records: Option<Vec<HeartbeatRecord>>,
    requests: Mutex<Vec<(String, u32)>>,
}

impl MockIndexer {
    pub fn new(records: Vec<HeartbeatRecord>) -> Self {
        Self {
            records: Some(records),
            ..Default::default()
        }
    }

    pub fn unreachable() -> Self {
        Self::default()
    }

    /// `(address, limit)` of every request.
    pub fn requests(&self) -> Vec<(String, u32)> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl HeartbeatIndexer for MockIndexer {
    async fn recent_heartbeats(
        &self,
        address: &str,
        limit: u32,
    ) -> Result<Vec<HeartbeatRecord>, CheckError> {
        self.requests.lock().push((address.to_string(), limit));
        let records = self
            .records
            .clone()
            .ok_or_else(|| CheckError::Transport("indexer unreachable".into()))?;
        Ok(records.into_iter().take(limit as usize).collect())
    }
}

/// Collects every alert sent to it.
#[derive(Debug, Default)]
pub struct RecordingAlertSink {
    alerts: Mutex<Vec<Alert>>,
}

impl RecordingAlertSink {
    pub fn alerts(&self) -> Vec<Alert> {
        self.alerts.lock().clone()
    }
}

#[async_trait]
impl AlertSink for RecordingAlertSink {
    async fn send(&self, alert: &Alert) -> anyhow::Result<()> {
        self.alerts.lock().push(alert.clone());
        Ok(())
    }
}

/// Records every heartbeat, membership and check-status update.
#[derive(Debug, Default)]
pub struct RecordingMetricsSink {
    heartbeats: Mutex<(u64, u64)>,
    memberships: Mutex<Vec<(String, bool)>>,
    check_statuses: Mutex<Vec<(String, bool)>>,
}

impl RecordingMetricsSink {
    /// `(missed, success)` totals.
    pub fn heartbeats(&self) -> (u64, u64) {
        *self.heartbeats.lock()
    }

    /// Membership gauge updates, in call order.
    pub fn memberships(&self) -> Vec<(String, bool)> {
        self.memberships.lock().clone()
    }

    /// Check status gauge updates, in call order.
    pub fn check_statuses(&self) -> Vec<(String, bool)> {
        self.check_statuses.lock().clone()
    }
}

impl MonitorMetricsSink for RecordingMetricsSink {
    fn inc_heartbeats_missed(&self, count: u64) {
        self.heartbeats.lock().0 += count;
    }
    fn inc_heartbeats_success(&self, count: u64) {
        self.heartbeats.lock().1 += count;
    }
    fn set_maintainer_in_network(&self, chain: &str, maintained: bool) {
        self.memberships.lock().push((chain.to_string(), maintained));
    }
    fn set_check_status(&self, check: &str, healthy: bool) {
        self.check_statuses.lock().push((check.to_string(), healthy));
    }
    fn observe_check_duration(&self, _check: &str, _duration_secs: f64) {}
}

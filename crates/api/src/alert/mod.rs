// Path: crates/api/src/alert/mod.rs
//! Alert payloads and the delivery trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A human-readable notification about one check outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    /// The check that produced the alert (`heartbeat`, `maintainers`).
    pub check: String,
    /// One-line summary.
    pub summary: String,
    /// Supporting lines, e.g. per-chain results.
    #[serde(default)]
    pub details: Vec<String>,
    /// The computed boolean status; false for failures and errors.
    pub healthy: bool,
    /// True when the check could not produce a verdict at all.
    #[serde(default)]
    pub is_error: bool,
}

impl Alert {
    /// An alert carrying a computed verdict.
    pub fn verdict(check: &str, summary: impl Into<String>, details: Vec<String>, healthy: bool) -> Self {
        Self {
            check: check.to_string(),
            summary: summary.into(),
            details,
            healthy,
            is_error: false,
        }
    }

    /// An alert for a check that surfaced an error instead of a verdict.
    pub fn error(check: &str, summary: impl Into<String>) -> Self {
        Self {
            check: check.to_string(),
            summary: summary.into(),
            details: Vec::new(),
            healthy: false,
            is_error: true,
        }
    }
}

/// A channel alerts are delivered to.
#[async_trait]
pub trait AlertSink: Send + Sync {
    /// Delivers one alert. Delivery failures never affect the verdict.
    async fn send(&self, alert: &Alert) -> anyhow::Result<()>;
}

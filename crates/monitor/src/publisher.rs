// Path: crates/monitor/src/publisher.rs
//! Hands verdicts to the outside world: the shared status document, the
//! Prometheus collectors and the alert sinks.
//!
//! The publisher is the only writer of [`SharedStatus`]. Each publish call
//! replaces one slot, so a cycle writes each verdict exactly once.

use std::sync::Arc;
use vigil_api::{Alert, AlertSink};
use vigil_telemetry::sinks::MonitorMetricsSink;
use vigil_telemetry::{error_metrics, monitor_metrics, SharedStatus};
use vigil_types::app::{LivenessVerdict, MaintainerVerdict};
use vigil_types::error::{CheckError, ErrorCode};

pub const HEARTBEAT_CHECK: &str = "heartbeat";
pub const MAINTAINERS_CHECK: &str = "maintainers";

pub struct ResultPublisher {
    status: SharedStatus,
    alerts: Vec<Arc<dyn AlertSink>>,
    notify_healthy: bool,
    metrics: &'static dyn MonitorMetricsSink,
}

impl ResultPublisher {
    /// Records into the globally installed metrics sink, so build it after `install()`.
    pub fn new(status: SharedStatus, alerts: Vec<Arc<dyn AlertSink>>, notify_healthy: bool) -> Self {
        Self {
            status,
            alerts,
            notify_healthy,
            metrics: monitor_metrics(),
        }
    }

    pub fn with_metrics(mut self, metrics: &'static dyn MonitorMetricsSink) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn status(&self) -> &SharedStatus {
        &self.status
    }

    pub async fn publish_liveness(&self, result: &Result<LivenessVerdict, CheckError>) {
        match result {
            Ok(v) => {
                let metrics = self.metrics;
                metrics.inc_heartbeats_missed(u64::from(v.missed));
                metrics.inc_heartbeats_success(u64::from(v.succeeded()));
                metrics.set_check_status(HEARTBEAT_CHECK, v.status);
                {
                    let mut status = self.status.write();
                    status.heartbeat = Some(v.clone());
                    status.last_errors.remove(HEARTBEAT_CHECK);
                }
                let summary = if v.status {
                    format!("Heartbeats healthy, missed {}", v.summary())
                } else {
                    format!("Heartbeats failing, missed {}", v.summary())
                };
                let details = vec![format!("miss threshold: {}", v.miss_threshold)];
                self.deliver(Alert::verdict(HEARTBEAT_CHECK, summary, details, v.status))
                    .await;
            }
            Err(e) => self.publish_error(HEARTBEAT_CHECK, e).await,
        }
    }

    pub async fn publish_maintainers(&self, result: &Result<MaintainerVerdict, CheckError>) {
        match result {
            Ok(v) => {
                let metrics = self.metrics;
                for (chain, maintained) in v.audited() {
                    metrics.set_maintainer_in_network(chain, maintained);
                }
                metrics.set_check_status(MAINTAINERS_CHECK, v.status);
                {
                    let mut status = self.status.write();
                    status.maintainers = Some(v.clone());
                    status.last_errors.remove(MAINTAINERS_CHECK);
                }
                let missing: Vec<&str> = v.missing_chains().collect();
                let summary = if missing.is_empty() {
                    "Validator maintains every chain".to_string()
                } else {
                    format!("Validator missing from: {}", missing.join(", "))
                };
                let details = v
                    .per_chain
                    .iter()
                    .map(|(chain, ok)| format!("{chain}: {ok}"))
                    .collect();
                self.deliver(Alert::verdict(MAINTAINERS_CHECK, summary, details, v.status))
                    .await;
            }
            Err(e) => self.publish_error(MAINTAINERS_CHECK, e).await,
        }
    }

    /// Marks the end of a cycle in the status document.
    pub fn finish_cycle(&self) {
        self.status.write().cycles += 1;
    }

    // The previous verdict stays in place; only the error slot changes.
    async fn publish_error(&self, check: &'static str, err: &CheckError) {
        error_metrics().inc_error(check, err.code());
        self.metrics.set_check_status(check, false);
        self.status
            .write()
            .last_errors
            .insert(check.to_string(), err.to_string());
        tracing::error!(target: "publisher", check, error = %err, code = err.code(), "check failed");
        self.deliver(Alert::error(check, format!("{check} check failed: {err}")))
            .await;
    }

    async fn deliver(&self, alert: Alert) {
        tracing::info!(
            target: "publisher",
            check = %alert.check,
            healthy = alert.healthy,
            summary = %alert.summary,
            "check outcome"
        );
        if alert.healthy && !self.notify_healthy {
            return;
        }
        for sink in &self.alerts {
            if let Err(e) = sink.send(&alert).await {
                tracing::warn!(target: "publisher", check = %alert.check, error = %e, "alert delivery failed");
            }
        }
    }
}

impl std::fmt::Debug for ResultPublisher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResultPublisher")
            .field("sinks", &self.alerts.len())
            .field("notify_healthy", &self.notify_healthy)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use vigil_telemetry::new_shared_status;
    use vigil_test_utils::{RecordingAlertSink, RecordingMetricsSink};

    fn publisher(notify_healthy: bool) -> (Arc<RecordingAlertSink>, ResultPublisher) {
        let sink = Arc::new(RecordingAlertSink::default());
        let p = ResultPublisher::new(new_shared_status(), vec![sink.clone()], notify_healthy);
        (sink, p)
    }

    #[tokio::test]
    async fn test_liveness_verdict_is_stored_and_alerted() {
        let (sink, p) = publisher(true);
        p.publish_liveness(&Ok(LivenessVerdict::new(5, 3, 3))).await;
        let status = p.status().read().clone();
        assert_eq!(status.heartbeat, Some(LivenessVerdict::new(5, 3, 3)));
        let alerts = sink.alerts();
        assert_eq!(alerts.len(), 1);
        assert!(!alerts[0].healthy);
        assert!(alerts[0].summary.contains("3 / 5"));
    }

    #[tokio::test]
    async fn test_healthy_alert_can_be_suppressed() {
        let (sink, p) = publisher(false);
        p.publish_liveness(&Ok(LivenessVerdict::new(5, 0, 3))).await;
        assert!(sink.alerts().is_empty());
        assert!(p.status().read().heartbeat.is_some());
    }

    #[tokio::test]
    async fn test_error_keeps_previous_verdict() {
        let (sink, p) = publisher(true);
        let mut per_chain = BTreeMap::new();
        per_chain.insert("Ethereum".to_string(), true);
        let first = MaintainerVerdict::from_results(per_chain);
        p.publish_maintainers(&Ok(first.clone())).await;
        p.publish_maintainers(&Err(CheckError::Transport("lcd down".into())))
            .await;

        let status = p.status().read().clone();
        assert_eq!(status.maintainers, Some(first));
        assert!(status.last_errors[MAINTAINERS_CHECK].contains("lcd down"));

        let alerts = sink.alerts();
        assert_eq!(alerts.len(), 2);
        assert!(alerts[1].is_error);
        assert!(!alerts[1].healthy);
    }

    #[tokio::test]
    async fn test_success_clears_last_error() {
        let (_, p) = publisher(true);
        p.publish_liveness(&Err(CheckError::Cancelled)).await;
        assert!(p.status().read().last_errors.contains_key(HEARTBEAT_CHECK));
        p.publish_liveness(&Ok(LivenessVerdict::new(1, 0, 1))).await;
        assert!(p.status().read().last_errors.is_empty());
        p.finish_cycle();
        assert_eq!(p.status().read().cycles, 1);
    }

    #[tokio::test]
    async fn test_maintainer_alert_names_missing_chains() {
        let (sink, p) = publisher(true);
        let mut per_chain = BTreeMap::new();
        per_chain.insert("A".to_string(), true);
        per_chain.insert("B".to_string(), false);
        p.publish_maintainers(&Ok(MaintainerVerdict::from_results(per_chain)))
            .await;
        let alert = &sink.alerts()[0];
        assert_eq!(alert.summary, "Validator missing from: B");
        assert_eq!(alert.details, vec!["A: true".to_string(), "B: false".to_string()]);
    }

    #[tokio::test]
    async fn test_membership_gauge_skips_excepted_chains() {
        let metrics: &'static RecordingMetricsSink = Box::leak(Box::default());
        let (_, p) = publisher(true);
        let p = p.with_metrics(metrics);
        let mut per_chain = BTreeMap::new();
        per_chain.insert("Axelarnet".to_string(), true);
        per_chain.insert("Ethereum".to_string(), false);
        let v = MaintainerVerdict::from_results(per_chain)
            .with_excepted(["Axelarnet".to_string()].into_iter().collect());
        p.publish_maintainers(&Ok(v)).await;

        assert_eq!(metrics.memberships(), vec![("Ethereum".to_string(), false)]);
        assert_eq!(metrics.check_statuses(), vec![(MAINTAINERS_CHECK.to_string(), false)]);
    }

    #[tokio::test]
    async fn test_heartbeat_counters_follow_verdict() {
        let metrics: &'static RecordingMetricsSink = Box::leak(Box::default());
        let (_, p) = publisher(true);
        let p = p.with_metrics(metrics);
        p.publish_liveness(&Ok(LivenessVerdict::new(5, 2, 3))).await;
        assert_eq!(metrics.heartbeats(), (2, 3));
    }
}

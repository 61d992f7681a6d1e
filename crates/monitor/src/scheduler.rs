// Path: crates/monitor/src/scheduler.rs
use crate::heartbeat::LivenessCheck;
use crate::maintainers::MaintainerAuditor;
use crate::publisher::{ResultPublisher, HEARTBEAT_CHECK, MAINTAINERS_CHECK};
use std::collections::BTreeMap;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use vigil_telemetry::monitor_metrics;
use vigil_telemetry::time::CheckTimer;
use vigil_types::app::{LivenessVerdict, MaintainerVerdict};
use vigil_types::config::GeneralConfig;

/// A child token that cancels itself once `after` has elapsed.
struct Deadline {
    token: CancellationToken,
    timer: JoinHandle<()>,
}

impl Deadline {
    fn new(parent: &CancellationToken, check: &'static str, after: Duration) -> Self {
        let token = parent.child_token();
        let child = token.clone();
        let timer = tokio::spawn(async move {
            tokio::select! {
                _ = child.cancelled() => {}
                _ = tokio::time::sleep(after) => {
                    tracing::warn!(target: "scheduler", check, timeout = ?after, "check deadline exceeded");
                    child.cancel();
                }
            }
        });
        Self { token, timer }
    }

    fn token(&self) -> &CancellationToken {
        &self.token
    }
}

impl Drop for Deadline {
    fn drop(&mut self) {
        self.timer.abort();
    }
}

/// What one cycle produced.
#[derive(Debug, Default, Clone)]
pub struct CycleReport {
    pub heartbeat: Option<LivenessVerdict>,
    pub maintainers: Option<MaintainerVerdict>,
    /// Error text per check that failed to produce a verdict.
    pub errors: BTreeMap<&'static str, String>,
    /// Set when shutdown interrupted the cycle; nothing was published after that point.
    pub interrupted: bool,
}

impl CycleReport {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Runs the enabled checks one after another and publishes their verdicts.
///
/// Checks never overlap: `run` awaits each cycle before waiting for the next
/// tick, which keeps the publisher the single writer of the status document.
pub struct Monitor {
    liveness: Option<Box<dyn LivenessCheck>>,
    auditor: Option<MaintainerAuditor>,
    publisher: ResultPublisher,
    interval: Duration,
    check_timeout: Duration,
}

impl Monitor {
    pub fn new(general: &GeneralConfig, publisher: ResultPublisher) -> Self {
        Self {
            liveness: None,
            auditor: None,
            publisher,
            interval: Duration::from_secs(general.interval_secs.max(1)),
            check_timeout: Duration::from_secs(general.check_timeout_secs.max(1)),
        }
    }

    pub fn with_liveness(mut self, check: Box<dyn LivenessCheck>) -> Self {
        self.liveness = Some(check);
        self
    }

    pub fn with_auditor(mut self, auditor: MaintainerAuditor) -> Self {
        self.auditor = Some(auditor);
        self
    }

    pub fn with_check_timeout(mut self, timeout: Duration) -> Self {
        self.check_timeout = timeout;
        self
    }

    pub fn publisher(&self) -> &ResultPublisher {
        &self.publisher
    }

    /// Runs every enabled check once.
    pub async fn run_once(&self, cancel: &CancellationToken) -> CycleReport {
        let mut report = CycleReport::default();

        if let Some(check) = &self.liveness {
            let result = {
                let _timer = CheckTimer::new(monitor_metrics(), HEARTBEAT_CHECK);
                let deadline = Deadline::new(cancel, HEARTBEAT_CHECK, self.check_timeout);
                check.check(deadline.token()).await
            };
            if cancel.is_cancelled() {
                report.interrupted = true;
                return report;
            }
            self.publisher.publish_liveness(&result).await;
            match result {
                Ok(v) => report.heartbeat = Some(v),
                Err(e) => {
                    report.errors.insert(HEARTBEAT_CHECK, e.to_string());
                }
            }
        }

        if let Some(auditor) = &self.auditor {
            let result = {
                let _timer = CheckTimer::new(monitor_metrics(), MAINTAINERS_CHECK);
                let deadline = Deadline::new(cancel, MAINTAINERS_CHECK, self.check_timeout);
                auditor.audit(deadline.token()).await
            };
            if cancel.is_cancelled() {
                report.interrupted = true;
                return report;
            }
            self.publisher.publish_maintainers(&result).await;
            match result {
                Ok(v) => report.maintainers = Some(v),
                Err(e) => {
                    report.errors.insert(MAINTAINERS_CHECK, e.to_string());
                }
            }
        }

        self.publisher.finish_cycle();
        tracing::info!(
            target: "scheduler",
            errors = report.errors.len(),
            "cycle complete"
        );
        report
    }

    /// Runs a cycle every `interval` until `cancel` fires.
    pub async fn run(&self, cancel: CancellationToken) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tracing::info!(target: "scheduler", interval = ?self.interval, "monitor started");
        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {}
            }
            if self.run_once(&cancel).await.interrupted {
                break;
            }
        }
        tracing::info!(target: "scheduler", "monitor stopped");
    }
}

impl std::fmt::Debug for Monitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Monitor")
            .field("liveness", &self.liveness)
            .field("auditor", &self.auditor)
            .field("interval", &self.interval)
            .field("check_timeout", &self.check_timeout)
            .finish_non_exhaustive()
    }
}

// Path: crates/telemetry/src/sinks.rs
//! Defines abstract traits for metrics reporting, decoupling the check engine from the backend.

use once_cell::sync::OnceCell;

// --- Static Sink Access ---

/// A no-op sink for use in tests or when telemetry is disabled.
#[derive(Debug, Clone, Copy)]
pub struct NopSink;

static MONITOR_SINK: OnceCell<&'static dyn MonitorMetricsSink> = OnceCell::new();
static ERROR_SINK: OnceCell<&'static dyn ErrorMetricsSink> = OnceCell::new();
static NOP_SINK: NopSink = NopSink;

/// Makes `sink` the global backend for every metrics domain.
/// Returns false if a backend was already registered.
pub fn register<S: MetricsSink + 'static>(sink: &'static S) -> bool {
    let monitor = MONITOR_SINK.set(sink).is_ok();
    let errors = ERROR_SINK.set(sink).is_ok();
    monitor && errors
}

/// Returns a static reference to the configured monitor metrics sink.
/// If no sink has been initialized, it returns a no-op sink.
pub fn monitor_metrics() -> &'static dyn MonitorMetricsSink {
    MONITOR_SINK.get().copied().unwrap_or(&NOP_SINK)
}

/// Returns a static reference to the configured error metrics sink.
/// If no sink has been initialized, it returns a no-op sink.
pub fn error_metrics() -> &'static dyn ErrorMetricsSink {
    ERROR_SINK.get().copied().unwrap_or(&NOP_SINK)
}

// --- Trait Definitions ---

/// A sink for the verdicts produced by the heartbeat and maintainer checks.
pub trait MonitorMetricsSink: Send + Sync + std::fmt::Debug {
    /// Adds to the heartbeat counter labeled `missed`.
    fn inc_heartbeats_missed(&self, count: u64);
    /// Adds to the heartbeat counter labeled `success`.
    fn inc_heartbeats_success(&self, count: u64);
    /// Sets the membership gauge for one chain (1 if maintained, 0 otherwise).
    fn set_maintainer_in_network(&self, chain: &str, maintained: bool);
    /// Sets the last verdict of a check (1 healthy, 0 failing).
    fn set_check_status(&self, check: &str, healthy: bool);
    /// Observes the wall-clock duration of one check invocation.
    fn observe_check_duration(&self, check: &str, duration_secs: f64);
}
impl MonitorMetricsSink for NopSink {
    fn inc_heartbeats_missed(&self, _count: u64) {}
    fn inc_heartbeats_success(&self, _count: u64) {}
    fn set_maintainer_in_network(&self, _chain: &str, _maintained: bool) {}
    fn set_check_status(&self, _check: &str, _healthy: bool) {}
    fn observe_check_duration(&self, _check: &str, _duration_secs: f64) {}
}

/// A sink for recording structured error metrics.
pub trait ErrorMetricsSink: Send + Sync + std::fmt::Debug {
    /// Increments a counter for a specific error, categorized by its kind and variant.
    fn inc_error(&self, kind: &'static str, variant: &'static str);
}
impl ErrorMetricsSink for NopSink {
    fn inc_error(&self, _kind: &'static str, _variant: &'static str) {}
}

/// A unified sink that implements all domain-specific traits, providing a single
/// point of implementation for metrics backends like Prometheus.
pub trait MetricsSink: MonitorMetricsSink + ErrorMetricsSink {}

impl<T> MetricsSink for T where T: MonitorMetricsSink + ErrorMetricsSink {}

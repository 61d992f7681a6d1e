// Path: crates/telemetry/src/prometheus.rs
//! A concrete implementation of the metrics sinks using the Prometheus crate.

use crate::sinks::*;
use once_cell::sync::OnceCell;
use prometheus::{
    exponential_buckets, register_gauge_vec, register_histogram_vec, register_int_counter_vec,
    GaugeVec, HistogramVec, IntCounterVec,
};

// --- Metric Statics ---
// Collectors are initialized exactly once by `install`.

static HEARTBEATS_TOTAL: OnceCell<IntCounterVec> = OnceCell::new();
static MAINTAINER_IN_NETWORK: OnceCell<GaugeVec> = OnceCell::new();
static CHECK_STATUS: OnceCell<GaugeVec> = OnceCell::new();
static CHECK_DURATION_SECONDS: OnceCell<HistogramVec> = OnceCell::new();
static ERRORS_TOTAL: OnceCell<IntCounterVec> = OnceCell::new();

#[derive(Debug, Clone, Copy)]
pub struct PrometheusSink;

/// Looks up an installed collector, skipping the update when `install` never ran.
macro_rules! with_metric {
    ($metric:ident, |$m:ident| $body:expr) => {
        if let Some($m) = $metric.get() {
            $body;
        }
    };
}

fn flag(v: bool) -> f64 {
    if v {
        1.0
    } else {
        0.0
    }
}

impl MonitorMetricsSink for PrometheusSink {
    fn inc_heartbeats_missed(&self, count: u64) {
        with_metric!(HEARTBEATS_TOTAL, |m| m.with_label_values(&["missed"]).inc_by(count));
    }
    fn inc_heartbeats_success(&self, count: u64) {
        with_metric!(HEARTBEATS_TOTAL, |m| m.with_label_values(&["success"]).inc_by(count));
    }
    fn set_maintainer_in_network(&self, chain: &str, maintained: bool) {
        with_metric!(MAINTAINER_IN_NETWORK, |m| m
            .with_label_values(&[chain])
            .set(flag(maintained)));
    }
    fn set_check_status(&self, check: &str, healthy: bool) {
        with_metric!(CHECK_STATUS, |m| m.with_label_values(&[check]).set(flag(healthy)));
    }
    fn observe_check_duration(&self, check: &str, duration_secs: f64) {
        with_metric!(CHECK_DURATION_SECONDS, |m| m
            .with_label_values(&[check])
            .observe(duration_secs));
    }
}

impl ErrorMetricsSink for PrometheusSink {
    fn inc_error(&self, kind: &'static str, variant: &'static str) {
        with_metric!(ERRORS_TOTAL, |m| m.with_label_values(&[kind, variant]).inc());
    }
}

/// Registers all Prometheus collectors and makes the Prometheus sink the global backend.
/// Calling it a second time is an error.
pub fn install() -> Result<&'static PrometheusSink, prometheus::Error> {
    let already = || prometheus::Error::Msg("prometheus sink already installed".into());

    HEARTBEATS_TOTAL
        .set(register_int_counter_vec!(
            "vigil_heartbeats_total",
            "Heartbeat windows evaluated, by outcome.",
            &["status"]
        )?)
        .map_err(|_| already())?;
    MAINTAINER_IN_NETWORK
        .set(register_gauge_vec!(
            "vigil_maintainer_in_network",
            "Whether the validator is in the maintainer set of a chain (1) or not (0).",
            &["network_name"]
        )?)
        .map_err(|_| already())?;
    CHECK_STATUS
        .set(register_gauge_vec!(
            "vigil_check_status",
            "Last published verdict of a check (1 healthy, 0 failing).",
            &["check"]
        )?)
        .map_err(|_| already())?;
    CHECK_DURATION_SECONDS
        .set(register_histogram_vec!(
            "vigil_check_duration_seconds",
            "Wall-clock duration of one check invocation.",
            &["check"],
            exponential_buckets(0.01, 2.0, 14)?
        )?)
        .map_err(|_| already())?;
    ERRORS_TOTAL
        .set(register_int_counter_vec!(
            "vigil_errors_total",
            "Total number of errors, categorized by type and variant.",
            &["kind", "variant"]
        )?)
        .map_err(|_| already())?;

    static SINK: PrometheusSink = PrometheusSink;
    if !register(&SINK) {
        return Err(already());
    }
    Ok(&SINK)
}

// Path: crates/telemetry/src/lib.rs
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::unimplemented,
        clippy::todo,
        clippy::indexing_slicing
    )
)]

//! # Vigil Telemetry
//!
//! This crate provides the observability infrastructure for the monitor:
//! structured logging initialization, the Prometheus collectors behind the
//! heartbeat and maintainer metrics, and the HTTP surface exposing
//! `/metrics`, the health endpoints and the shared status document.

/// A lightweight HTTP server for `/metrics`, `/healthz`, `/readyz` and `/status`.
pub mod http;
/// The initialization routine for global structured logging.
pub mod init;
/// The concrete implementation of metrics sinks using the `prometheus` crate.
pub mod prometheus;
/// Abstract traits (`*MetricsSink`) that define the contract for metrics reporting.
pub mod sinks;
/// A simple RAII timer for measuring the duration of a check.
pub mod time;

pub use http::{new_shared_status, SharedStatus};
pub use sinks::{error_metrics, monitor_metrics};

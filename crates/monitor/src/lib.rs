// Path: crates/monitor/src/lib.rs
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

//! # Vigil Monitor
//!
//! The check engine. It answers two questions every cycle:
//!
//! 1. Did the broadcaster submit a heartbeat in each of the last `check_n`
//!    heartbeat windows? (`heartbeat`)
//! 2. Is the validator in the maintainer set of every chain it is expected to
//!    service? (`maintainers`)
//!
//! Both checks are computed fresh per invocation, handed to the
//! [`publisher::ResultPublisher`], and driven by the [`scheduler::Monitor`].

/// Re-exports of the configuration structures consumed by the engine.
pub mod config;
/// Heartbeat liveness: window calculation, block scanning, matching and aggregation.
pub mod heartbeat;
/// Maintainer-set membership auditing.
pub mod maintainers;
/// Verdict publication to the status surface, metrics and alert sinks.
pub mod publisher;
/// The periodic, single-writer check loop.
pub mod scheduler;

pub use heartbeat::{ChainScanLiveness, IndexerLiveness, LivenessCheck, LivenessParams};
pub use maintainers::MaintainerAuditor;
pub use publisher::ResultPublisher;
pub use scheduler::{CycleReport, Monitor};

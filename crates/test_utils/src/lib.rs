// Path: crates/test_utils/src/lib.rs
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::unimplemented,
        clippy::todo,
        clippy::indexing_slicing
    )
)]

//! # Vigil Test Utilities
//!
//! In-memory collaborators, envelope fixtures and assertion macros for
//! testing the check engine without a chain.

pub mod assertions;
pub mod fixtures;
pub mod mocks;

pub use mocks::{
    MockChain, MockIndexer, MockMaintainers, RecordingAlertSink, RecordingMetricsSink,
};

// Path: crates/types/src/lib.rs
#![forbid(unsafe_code)]
#![deny(missing_docs)]

//! # Vigil Types
//!
//! This crate is the foundational library for the Vigil liveness monitor,
//! containing the data model shared by every other crate: block windows,
//! transaction envelopes and the nested heartbeat wire messages, verdicts,
//! error enums and configuration objects.
//!
//! ## Architectural Role
//!
//! As the base crate, `vigil-types` has minimal dependencies and is itself a
//! dependency for almost every other crate in the workspace. Keeping the
//! canonical definitions here prevents circular dependencies between the
//! transport clients, the telemetry surface and the check engine.

/// A top-level, crate-wide `Result` type alias with a default error type.
pub type Result<T, E = crate::error::CheckError> = std::result::Result<T, E>;

/// Chain-facing data structures: addresses, windows, envelopes and verdicts.
pub mod app;
/// Configuration structures loaded from `vigil.toml`.
pub mod config;
/// A unified set of all error types used across the workspace.
pub mod error;

// Path: crates/types/src/app/mod.rs
//! Chain-facing data structures used by the check engine.

/// Canonical account addresses and their bech32 rendering.
pub mod address;
/// Transaction envelopes and the nested heartbeat wire messages.
pub mod envelope;
/// Per-invocation verdicts and the shared status surface.
pub mod verdict;
/// Height-aligned heartbeat windows.
pub mod window;

pub use address::*;
pub use envelope::*;
pub use verdict::*;
pub use window::*;

/// The name of an external chain serviced by the validator, as reported by the chain.
pub type ChainName = String;

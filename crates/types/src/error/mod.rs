// Path: crates/types/src/error/mod.rs
//! Core error types for the Vigil monitor.

use thiserror::Error;

/// A trait for assigning a stable, machine-readable string code to an error.
pub trait ErrorCode {
    /// Returns the unique, stable string identifier for this error variant.
    fn code(&self) -> &'static str;
}

/// Errors raised while parsing or rendering a bech32 account address.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    /// The string is not valid bech32.
    #[error("Invalid bech32 encoding for '{address}': {reason}")]
    Bech32 {
        /// The offending input.
        address: String,
        /// The underlying codec message.
        reason: String,
    },
    /// The decoded payload is empty.
    #[error("Address '{0}' decodes to an empty payload")]
    Empty(String),
    /// The human-readable part could not be used for encoding.
    #[error("Invalid human-readable part: {0}")]
    InvalidHrp(String),
}

impl ErrorCode for AddressError {
    fn code(&self) -> &'static str {
        match self {
            Self::Bech32 { .. } => "ADDRESS_BECH32_INVALID",
            Self::Empty(_) => "ADDRESS_EMPTY",
            Self::InvalidHrp(_) => "ADDRESS_INVALID_HRP",
        }
    }
}

/// Errors surfaced by a single check invocation.
///
/// The three kinds that matter for propagation are `Transport`, `Decode` and
/// `Cancelled`. A transport failure means the scan could not complete; it is
/// never the same thing as "no heartbeat found".
#[derive(Error, Debug)]
pub enum CheckError {
    /// A network or RPC failure while reaching the chain or the indexer.
    #[error("Transport error: {0}")]
    Transport(String),
    /// A payload that matched the expected envelope type could not be decoded.
    #[error("Decode error: {0}")]
    Decode(String),
    /// The check was aborted by its cancellation token or deadline.
    #[error("Check cancelled before completion")]
    Cancelled,
    /// The configuration is not usable.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    /// An address could not be parsed.
    #[error("Invalid address: {0}")]
    InvalidAddress(#[from] AddressError),
    /// The chain has not yet produced a complete window.
    #[error("Chain height {latest} is too low for a window length of {length}")]
    InsufficientHeight {
        /// The latest height reported by the chain.
        latest: u64,
        /// The configured window length.
        length: u64,
    },
}

impl CheckError {
    /// Returns true for failures that mean a fetch could not complete.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Returns true if the check was aborted by cancellation.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

impl ErrorCode for CheckError {
    fn code(&self) -> &'static str {
        match self {
            Self::Transport(_) => "CHECK_TRANSPORT",
            Self::Decode(_) => "CHECK_DECODE",
            Self::Cancelled => "CHECK_CANCELLED",
            Self::InvalidConfig(_) => "CHECK_INVALID_CONFIG",
            Self::InvalidAddress(_) => "CHECK_INVALID_ADDRESS",
            Self::InsufficientHeight { .. } => "CHECK_INSUFFICIENT_HEIGHT",
        }
    }
}

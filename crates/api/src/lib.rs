// Path: crates/api/src/lib.rs
#![forbid(unsafe_code)]
#![deny(missing_docs)]

//! # Vigil API
//!
//! The trait seams between the check engine and the outside world. Every
//! network-facing collaborator the engine consumes (chain heights, block
//! transactions, chain and maintainer lists, the heartbeat indexer) and the
//! alert channel it produces to is described here as an `async_trait`, so the
//! engine can be driven by real clients in production and by in-memory mocks
//! in tests.

/// Alert payloads and the sink trait that delivers them.
pub mod alert;
/// Chain data sources: heights, block transactions, chains and maintainers.
pub mod chain;
/// The alternative heartbeat indexer source.
pub mod indexer;

mod cancel;

pub use alert::{Alert, AlertSink};
pub use cancel::cancellable;
pub use chain::{ChainSource, MaintainerSource};
pub use indexer::{HeartbeatIndexer, HeartbeatRecord};

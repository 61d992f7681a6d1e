// Path: crates/api/src/chain/mod.rs
//! Defines the chain data sources the check engine reads from.

use async_trait::async_trait;
use vigil_types::app::{AccountAddress, ChainName, Envelope};
use vigil_types::error::CheckError;

/// Read access to the validator's own chain: heights and block contents.
///
/// Implementations report every failure to reach the chain as
/// `CheckError::Transport`. Results for a finalized height are deterministic.
#[async_trait]
pub trait ChainSource: Send + Sync {
    /// The latest block height known to the node.
    async fn latest_height(&self) -> Result<u64, CheckError>;

    /// Every transaction in the block at `height`, decoded to envelopes.
    async fn transactions(&self, height: u64) -> Result<Vec<Envelope>, CheckError>;
}

/// Read access to the cross-chain registry: supported chains and who maintains them.
#[async_trait]
pub trait MaintainerSource: Send + Sync {
    /// Every chain currently registered.
    async fn chains(&self) -> Result<Vec<ChainName>, CheckError>;

    /// The maintainer set of `chain`.
    async fn chain_maintainers(&self, chain: &str) -> Result<Vec<AccountAddress>, CheckError>;
}

// Path: crates/monitor/src/heartbeat/scanner.rs
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use vigil_api::{cancellable, ChainSource};
use vigil_types::app::Envelope;
use vigil_types::error::CheckError;

/// Fetches the transaction envelopes of one height, honouring cancellation.
#[derive(Clone)]
pub struct BlockScanner {
    chain: Arc<dyn ChainSource>,
}

impl BlockScanner {
    pub fn new(chain: Arc<dyn ChainSource>) -> Self {
        Self { chain }
    }

    pub fn chain(&self) -> &dyn ChainSource {
        self.chain.as_ref()
    }

    pub async fn scan(
        &self,
        height: u64,
        cancel: &CancellationToken,
    ) -> Result<Vec<Envelope>, CheckError> {
        let txs = cancellable(cancel, self.chain.transactions(height)).await?;
        tracing::trace!(target: "heartbeat", height, txs = txs.len(), "scanned block");
        Ok(txs)
    }
}

impl std::fmt::Debug for BlockScanner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockScanner").finish_non_exhaustive()
    }
}

// Path: crates/monitor/src/heartbeat/window.rs
use tokio_util::sync::CancellationToken;
use vigil_api::{cancellable, ChainSource};
use vigil_types::app::HeartbeatWindow;
use vigil_types::error::CheckError;

/// Looks up the latest height and returns it with the last complete window before it.
///
/// A failed height lookup is fatal to the cycle: without it no window can be placed.
pub async fn preceding_window(
    chain: &dyn ChainSource,
    length: u64,
    cancel: &CancellationToken,
) -> Result<(u64, HeartbeatWindow), CheckError> {
    let latest = cancellable(cancel, chain.latest_height()).await?;
    let window = HeartbeatWindow::preceding(latest, length)?;
    tracing::debug!(
        target: "heartbeat",
        latest,
        start = window.start_height,
        length,
        "placed preceding window"
    );
    Ok((latest, window))
}

#[cfg(test)]
mod tests {
    use super::*;
    use vigil_test_utils::MockChain;

    #[tokio::test]
    async fn test_window_from_latest_height() {
        let chain = MockChain::new(1_234);
        let (latest, w) = preceding_window(&chain, 50, &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(latest, 1_234);
        assert_eq!(w.start_height, 1_200);
    }

    #[tokio::test]
    async fn test_height_lookup_failure_is_transport() {
        let chain = MockChain::unreachable();
        let err = preceding_window(&chain, 50, &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(err.is_transport());
    }

    #[tokio::test]
    async fn test_cancelled_before_lookup() {
        let token = CancellationToken::new();
        token.cancel();
        let err = preceding_window(&MockChain::new(100), 50, &token)
            .await
            .unwrap_err();
        assert!(err.is_cancelled());
    }
}

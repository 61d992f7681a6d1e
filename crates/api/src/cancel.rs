// Path: crates/api/src/cancel.rs
use std::future::Future;
use tokio_util::sync::CancellationToken;
use vigil_types::error::CheckError;

/// Runs a collaborator call unless `cancel` fires first.
///
/// Cancellation is checked before the call is polled, so an already-cancelled
/// token never issues a request.
pub async fn cancellable<T, F>(cancel: &CancellationToken, fut: F) -> Result<T, CheckError>
where
    F: Future<Output = Result<T, CheckError>>,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(CheckError::Cancelled),
        res = fut => res,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_passes_through_result() {
        let token = CancellationToken::new();
        let v = cancellable(&token, async { Ok::<_, CheckError>(7u64) })
            .await
            .unwrap();
        assert_eq!(v, 7);
    }

    #[tokio::test]
    async fn test_cancelled_token_short_circuits() {
        let token = CancellationToken::new();
        token.cancel();
        let res = cancellable(&token, async { Ok::<_, CheckError>(1u8) }).await;
        assert!(matches!(res, Err(CheckError::Cancelled)));
    }

    #[tokio::test]
    async fn test_cancel_interrupts_pending_call() {
        let token = CancellationToken::new();
        let child = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            child.cancel();
        });
        let res = cancellable(&token, async {
            std::future::pending::<()>().await;
            Ok::<_, CheckError>(())
        })
        .await;
        assert!(matches!(res, Err(CheckError::Cancelled)));
    }
}

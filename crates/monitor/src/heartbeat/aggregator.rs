// Path: crates/monitor/src/heartbeat/aggregator.rs
use super::matcher::HeartbeatMatcher;
use super::scanner::BlockScanner;
use super::searcher::WindowSearcher;
use super::window::preceding_window;
use super::{LivenessCheck, LivenessParams};
use async_trait::async_trait;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use vigil_api::ChainSource;
use vigil_telemetry::error_metrics;
use vigil_types::app::{HeartbeatWindow, LivenessVerdict};
use vigil_types::config::HeartbeatSource;
use vigil_types::error::{CheckError, ErrorCode};

/// Walks `check_n` windows backwards from a starting window and counts misses.
///
/// A transport failure inside one window counts that window as missed and
/// moves on to the next; decode errors and cancellation end the run. A window
/// whose search reaches `latest` without a hit is not judged yet and is
/// skipped in favour of an older one.
#[derive(Debug)]
pub struct LivenessAggregator {
    scanner: BlockScanner,
    matcher: HeartbeatMatcher,
    params: LivenessParams,
}

impl LivenessAggregator {
    pub fn new(scanner: BlockScanner, matcher: HeartbeatMatcher, params: LivenessParams) -> Self {
        Self {
            scanner,
            matcher,
            params,
        }
    }

    pub fn params(&self) -> &LivenessParams {
        &self.params
    }

    pub async fn aggregate(
        &self,
        first: HeartbeatWindow,
        latest: u64,
        cancel: &CancellationToken,
    ) -> Result<LivenessVerdict, CheckError> {
        let searcher = WindowSearcher::new(&self.scanner, &self.matcher, self.params.try_cnt)
            .with_tip(latest);
        let mut window = Some(first);
        let mut checked = 0u32;
        let mut missed = 0u32;

        while checked < self.params.check_n {
            let Some(current) = window else {
                tracing::info!(
                    target: "heartbeat",
                    checked,
                    requested = self.params.check_n,
                    "reached genesis before checking every window"
                );
                break;
            };
            match searcher.search(current.start_height, cancel).await {
                Ok(outcome) if outcome.found => {}
                Ok(outcome) if outcome.reached_tip => {
                    tracing::debug!(
                        target: "heartbeat",
                        start = current.start_height,
                        latest,
                        "window still open at the tip; skipping"
                    );
                    window = current.previous();
                    continue;
                }
                Ok(_) => {
                    tracing::info!(target: "heartbeat", start = current.start_height, "window missed");
                    missed += 1;
                }
                Err(e) if e.is_transport() => {
                    error_metrics().inc_error("check", e.code());
                    tracing::warn!(
                        target: "heartbeat",
                        start = current.start_height,
                        error = %e,
                        "window scan failed; counting as missed"
                    );
                    missed += 1;
                }
                Err(e) => return Err(e),
            }
            checked += 1;
            window = current.previous();
        }

        let verdict = LivenessVerdict::new(checked, missed, self.params.miss_threshold);
        tracing::info!(
            target: "heartbeat",
            missed = verdict.missed,
            checked = verdict.windows_checked,
            status = verdict.status,
            "liveness aggregated"
        );
        Ok(verdict)
    }
}

/// Liveness from on-chain evidence: place the preceding window, then aggregate.
#[derive(Debug)]
pub struct ChainScanLiveness {
    aggregator: LivenessAggregator,
}

impl ChainScanLiveness {
    pub fn new(
        chain: Arc<dyn ChainSource>,
        matcher: HeartbeatMatcher,
        params: LivenessParams,
    ) -> Self {
        Self {
            aggregator: LivenessAggregator::new(BlockScanner::new(chain), matcher, params),
        }
    }
}

#[async_trait]
impl LivenessCheck for ChainScanLiveness {
    fn source(&self) -> HeartbeatSource {
        HeartbeatSource::Chain
    }

    async fn check(&self, cancel: &CancellationToken) -> Result<LivenessVerdict, CheckError> {
        let length = self.aggregator.params().window_length;
        let (latest, first) =
            preceding_window(self.aggregator.scanner.chain(), length, cancel).await?;
        self.aggregator.aggregate(first, latest, cancel).await
    }
}

// Path: crates/monitor/tests/heartbeat_liveness.rs
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use vigil_api::ChainSource;
use vigil_monitor::heartbeat::{BlockScanner, HeartbeatMatcher, WindowSearcher};
use vigil_monitor::{ChainScanLiveness, LivenessCheck, LivenessParams};
use vigil_test_utils::fixtures::{
    address, heartbeat_envelope, malformed_refund_message, refund_envelope_with_inner,
    unrelated_envelope,
};
use vigil_test_utils::{assert_err, assert_ok, assert_verdict, MockChain};
use vigil_types::app::{Envelope, HeartbeatWindow};
use vigil_types::error::CheckError;

const LENGTH: u64 = 50;
const TRY_CNT: u32 = 5;

fn broadcaster() -> vigil_types::app::AccountAddress {
    address(0x11)
}

fn relayer() -> vigil_types::app::AccountAddress {
    address(0x22)
}

fn matcher() -> HeartbeatMatcher {
    HeartbeatMatcher::new(broadcaster(), vec![relayer()])
}

fn params(miss_threshold: u32) -> LivenessParams {
    LivenessParams {
        check_n: 5,
        window_length: LENGTH,
        try_cnt: TRY_CNT,
        miss_threshold,
    }
}

#[test]
fn window_is_aligned_and_strictly_in_the_past() {
    for length in [1u64, 2, 3, 10, 50, 97] {
        for latest in 1u64..=(length * 6) {
            let w = assert_ok!(HeartbeatWindow::preceding(latest, length));
            assert_eq!(w.start_height % length, 0);
            assert!(w.start_height < latest);
            assert!(latest - w.start_height <= length);
        }
    }
}

#[tokio::test]
async fn search_finds_heartbeat_at_any_position_and_stops_there() {
    for pos in 0..TRY_CNT {
        let hit = 1_000 + u64::from(pos);
        let chain = Arc::new(
            MockChain::new(2_000)
                .with_block(1_000, vec![unrelated_envelope()])
                .with_block(hit, vec![unrelated_envelope(), heartbeat_envelope(&broadcaster())])
                .with_block(hit + 1, vec![heartbeat_envelope(&broadcaster())]),
        );
        let scanner = BlockScanner::new(chain.clone());
        let m = matcher();
        let out = assert_ok!(
            WindowSearcher::new(&scanner, &m, TRY_CNT)
                .search(1_000, &CancellationToken::new())
                .await
        );
        assert!(out.found, "position {pos}");
        assert_eq!(out.matched_height, Some(hit));
        assert_eq!(out.heights_scanned, pos + 1);
        assert_eq!(chain.fetches(), (1_000..=hit).collect::<Vec<_>>());
    }
}

#[tokio::test]
async fn search_without_match_fetches_exactly_try_cnt_heights() {
    let chain = Arc::new(
        MockChain::new(2_000)
            .with_block(1_001, vec![unrelated_envelope()])
            .with_block(1_003, vec![heartbeat_envelope(&address(0x33))])
            .with_block(1_005, vec![heartbeat_envelope(&broadcaster())]),
    );
    let scanner = BlockScanner::new(chain.clone());
    let m = matcher();
    let out = assert_ok!(
        WindowSearcher::new(&scanner, &m, TRY_CNT)
            .search(1_000, &CancellationToken::new())
            .await
    );
    assert!(!out.found);
    assert_eq!(chain.fetches().len(), TRY_CNT as usize);
}

#[test]
fn matcher_rejects_wrapper_with_foreign_inner_tag() {
    let env = refund_envelope_with_inner(&broadcaster(), "/axelar.tss.v1beta1.ProcessKeygenTrafficRequest");
    assert!(!assert_ok!(matcher().matches(&env)));
}

#[test]
fn matcher_accepts_allow_listed_fallback_sender() {
    assert_ne!(relayer(), broadcaster());
    assert!(assert_ok!(matcher().matches(&heartbeat_envelope(&relayer()))));
    let strict = HeartbeatMatcher::new(broadcaster(), vec![]);
    assert!(!assert_ok!(strict.matches(&heartbeat_envelope(&relayer()))));
}

/// latest 1_010 places windows at 1000, 950, 900, 850, 800.
fn chain_with_two_missed_windows() -> MockChain {
    let hb = || vec![heartbeat_envelope(&broadcaster())];
    MockChain::new(1_010)
        .with_block(1_000, hb())
        .with_block(952, hb())
        .with_block(854, hb())
}

#[tokio::test]
async fn two_misses_pass_threshold_three_and_fail_threshold_two() {
    let check = ChainScanLiveness::new(Arc::new(chain_with_two_missed_windows()), matcher(), params(3));
    let v = assert_ok!(check.check(&CancellationToken::new()).await);
    assert_verdict!(v, checked = 5, missed = 2, status = true);

    let check = ChainScanLiveness::new(Arc::new(chain_with_two_missed_windows()), matcher(), params(2));
    let v = assert_ok!(check.check(&CancellationToken::new()).await);
    assert_verdict!(v, checked = 5, missed = 2, status = false);
}

#[tokio::test]
async fn transport_error_in_one_window_does_not_abort_the_rest() {
    let hb = || vec![heartbeat_envelope(&broadcaster())];
    let chain = Arc::new(
        MockChain::new(1_010)
            .with_block(1_000, hb())
            .with_transport_error(951)
            .with_block(952, hb())
            .with_block(900, hb())
            .with_block(850, hb())
            .with_block(800, hb()),
    );
    let check = ChainScanLiveness::new(chain.clone(), matcher(), params(3));
    let v = assert_ok!(check.check(&CancellationToken::new()).await);
    assert_verdict!(v, checked = 5, missed = 1, status = true);

    let fetched = chain.fetches();
    assert!(!fetched.contains(&952), "search continued past the failed fetch");
    for start in [900, 850, 800] {
        assert!(fetched.contains(&start), "window {start} was skipped");
    }
}

#[tokio::test]
async fn decode_error_is_fatal() {
    let chain = Arc::new(MockChain::new(1_010).with_decode_error(1_002));
    let check = ChainScanLiveness::new(chain, matcher(), params(3));
    let err = assert_err!(check.check(&CancellationToken::new()).await);
    assert!(matches!(err, CheckError::Decode(_)));
}

#[tokio::test]
async fn malformed_refund_payload_in_a_block_is_fatal() {
    let chain = Arc::new(
        MockChain::new(1_010)
            .with_block(1_000, vec![unrelated_envelope()])
            .with_block(
                1_001,
                vec![Envelope {
                    messages: vec![malformed_refund_message()],
                }],
            )
            .with_block(1_002, vec![heartbeat_envelope(&broadcaster())]),
    );
    let check = ChainScanLiveness::new(chain.clone(), matcher(), params(3));
    let err = assert_err!(check.check(&CancellationToken::new()).await);
    assert!(matches!(err, CheckError::Decode(_)), "got {err:?}");
    assert_eq!(chain.fetches(), vec![1_000, 1_001]);
}

#[tokio::test]
async fn search_never_fetches_above_the_chain_tip() {
    let chain = Arc::new(MockChain::new(1_001));
    let check = ChainScanLiveness::new(
        chain.clone(),
        matcher(),
        LivenessParams {
            check_n: 1,
            ..params(3)
        },
    );
    let v = assert_ok!(check.check(&CancellationToken::new()).await);
    assert_verdict!(v, checked = 1, missed = 1, status = true);

    let fetched = chain.fetches();
    assert!(fetched.iter().all(|h| *h <= 1_001), "fetched past the tip: {fetched:?}");
    assert_eq!(fetched, vec![1_000, 1_001, 950, 951, 952, 953, 954]);
}

#[tokio::test]
async fn cancellation_is_not_a_miss() {
    let chain: Arc<dyn ChainSource> = Arc::new(MockChain::new(1_010));
    let check = ChainScanLiveness::new(chain, matcher(), params(3));
    let token = CancellationToken::new();
    token.cancel();
    let err = assert_err!(check.check(&token).await);
    assert!(err.is_cancelled());
}

// Path: crates/monitor/tests/maintainer_audit.rs
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use vigil_monitor::MaintainerAuditor;
use vigil_test_utils::fixtures::address;
use vigil_test_utils::{assert_err, assert_ok, MockMaintainers};

#[tokio::test]
async fn excepted_chain_counts_as_maintained_but_status_is_conjunction() {
    let validator = address(0x42);
    let source = Arc::new(
        MockMaintainers::new(&["A", "B", "C"])
            .with_maintainers("A", vec![address(1), validator.clone()])
            .with_maintainers("B", vec![address(1), address(2)]),
    );
    let auditor = MaintainerAuditor::new(source.clone(), validator, ["C"]);
    let v = assert_ok!(auditor.audit(&CancellationToken::new()).await);

    assert_eq!(v.per_chain.get("A"), Some(&true));
    assert_eq!(v.per_chain.get("B"), Some(&false));
    assert_eq!(v.per_chain.get("C"), Some(&true));
    assert!(!v.status);
    assert_eq!(source.queries(), vec!["A".to_string(), "B".to_string()]);
}

#[tokio::test]
async fn any_transport_error_aborts_the_audit() {
    let source = Arc::new(
        MockMaintainers::new(&["A", "B"])
            .with_failing_chain("A")
            .with_maintainers("B", vec![address(0x42)]),
    );
    let auditor = MaintainerAuditor::new(source.clone(), address(0x42), Vec::<String>::new());
    let err = assert_err!(auditor.audit(&CancellationToken::new()).await);
    assert!(err.is_transport());
    assert_eq!(source.queries(), vec!["A".to_string()]);
}

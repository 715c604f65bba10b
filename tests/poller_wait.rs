// tests/poller_wait.rs

use std::time::Duration;

use kubewait::errors::KubewaitError;
use kubewait::exec::StderrMode;
use kubewait::kube::{POLL_INTERVAL, PollRequest};
use kubewait_test_utils::{ScriptedExecutor, fake_kubectl, init_tracing};

const CRD: &str = "crd";
const DEPLOY: &str = "deployments";

#[test]
fn negative_budget_is_rejected_before_polling() {
    for secs in [-1, -7, i64::MIN] {
        let err = PollRequest::new(secs, [CRD]).unwrap_err();
        assert!(
            matches!(err, KubewaitError::Validation(ref msg) if msg.contains("non negative")),
            "unexpected error: {err:?}"
        );
    }
}

#[tokio::test]
async fn negative_budget_spawns_no_probe() {
    init_tracing();
    let (kubectl, executor, sleeper) = fake_kubectl(ScriptedExecutor::new());

    let err = kubectl
        .wait_for_resource_types(-3, &[CRD, DEPLOY])
        .await
        .unwrap_err();

    assert!(matches!(err, KubewaitError::Validation(_)));
    assert!(executor.invocations().is_empty());
    assert_eq!(sleeper.count(), 0);
}

#[tokio::test]
async fn zero_budget_times_out_without_probing() {
    init_tracing();
    let (kubectl, executor, sleeper) = fake_kubectl(ScriptedExecutor::new());

    let err = kubectl
        .wait_for_resource_types(0, &[CRD, DEPLOY])
        .await
        .unwrap_err();

    match err {
        KubewaitError::ReadinessTimeout { seconds, pending } => {
            assert_eq!(seconds, 0);
            assert_eq!(pending, vec![CRD.to_string(), DEPLOY.to_string()]);
        }
        other => panic!("expected ReadinessTimeout, got {other:?}"),
    }
    assert!(executor.invocations().is_empty());
    assert_eq!(sleeper.count(), 0);
}

#[tokio::test]
async fn ready_on_first_iteration_probes_each_type_once() {
    init_tracing();
    let (kubectl, executor, sleeper) = fake_kubectl(ScriptedExecutor::new());

    let report = kubectl
        .wait_for_resource_types(10, &[CRD, DEPLOY])
        .await
        .unwrap();

    assert_eq!(report.iterations, 1);
    assert_eq!(
        executor.command_lines(),
        vec!["kubectl get crd", "kubectl get deployments"]
    );
    assert_eq!(sleeper.pauses(), vec![POLL_INTERVAL]);
    assert_eq!(POLL_INTERVAL, Duration::from_secs(1));
}

#[tokio::test]
async fn probes_discard_stderr() {
    let (kubectl, executor, _) = fake_kubectl(ScriptedExecutor::new());

    kubectl.wait_for_resource_types(1, &[CRD]).await.unwrap();

    let invocations = executor.invocations();
    assert_eq!(invocations.len(), 1);
    assert_eq!(invocations[0].stderr, StderrMode::Discard);
    assert!(invocations[0].stdin.is_none());
}

#[tokio::test]
async fn late_type_is_retried_without_short_circuit() {
    init_tracing();
    // CRD fails the first 3 rounds; DEPLOY is ready from the start.
    let k = 3;
    let (kubectl, executor, sleeper) =
        fake_kubectl(ScriptedExecutor::new().fail_times(CRD, k));

    let report = kubectl
        .wait_for_resource_types(10, &[CRD, DEPLOY])
        .await
        .unwrap();

    assert_eq!(report.iterations, (k + 1) as u64);
    assert_eq!(executor.calls_for(CRD), k + 1);
    assert_eq!(executor.calls_for(DEPLOY), k + 1);
    assert_eq!(sleeper.count(), k + 1);
}

#[tokio::test]
async fn failing_first_type_does_not_skip_later_types() {
    let (kubectl, executor, _) = fake_kubectl(ScriptedExecutor::new().fail_times(CRD, 1));

    kubectl
        .wait_for_resource_types(5, &[CRD, DEPLOY])
        .await
        .unwrap();

    assert_eq!(
        executor.command_lines(),
        vec![
            "kubectl get crd",
            "kubectl get deployments",
            "kubectl get crd",
            "kubectl get deployments",
        ]
    );
}

#[tokio::test]
async fn every_type_must_pass_in_the_same_iteration() {
    // CRD passes only in round 1, DEPLOY only from round 2 on: no single
    // round has both, until CRD recovers in round 3.
    let executor = ScriptedExecutor::new()
        .sequence(CRD, [true, false], true)
        .fail_times(DEPLOY, 1);
    let (kubectl, _, _) = fake_kubectl(executor);

    let report = kubectl
        .wait_for_resource_types(5, &[CRD, DEPLOY])
        .await
        .unwrap();

    assert_eq!(report.iterations, 3);
}

#[tokio::test]
async fn budget_exhaustion_runs_exactly_max_iterations() {
    init_tracing();
    let max = 4;
    let (kubectl, executor, sleeper) =
        fake_kubectl(ScriptedExecutor::new().always_fail(DEPLOY));

    let err = kubectl
        .wait_for_resource_types(max, &[CRD, DEPLOY])
        .await
        .unwrap_err();

    match err {
        KubewaitError::ReadinessTimeout { seconds, pending } => {
            assert_eq!(seconds, max as u64);
            assert_eq!(pending, vec![DEPLOY.to_string()]);
        }
        other => panic!("expected ReadinessTimeout, got {other:?}"),
    }
    assert_eq!(executor.calls_for(CRD), max as usize);
    assert_eq!(executor.calls_for(DEPLOY), max as usize);
    assert_eq!(sleeper.count(), max as usize);
}

#[tokio::test]
async fn success_on_last_allowed_iteration() {
    let (kubectl, _, sleeper) = fake_kubectl(ScriptedExecutor::new().fail_times(CRD, 2));

    let report = kubectl.wait_for_resource_types(3, &[CRD]).await.unwrap();

    assert_eq!(report.iterations, 3);
    assert_eq!(sleeper.count(), 3);
}

#[tokio::test]
async fn failures_at_budget_boundary_time_out() {
    let (kubectl, executor, _) = fake_kubectl(ScriptedExecutor::new().fail_times(CRD, 3));

    let err = kubectl.wait_for_resource_types(3, &[CRD]).await.unwrap_err();

    assert!(matches!(err, KubewaitError::ReadinessTimeout { .. }));
    assert_eq!(executor.calls_for(CRD), 3);
}

#[tokio::test]
async fn empty_type_set_is_ready_after_one_pause() {
    let (kubectl, executor, sleeper) = fake_kubectl(ScriptedExecutor::new());

    let report = kubectl
        .wait_for_resource_types::<&str>(5, &[])
        .await
        .unwrap();

    assert_eq!(report.iterations, 1);
    assert!(executor.invocations().is_empty());
    assert_eq!(sleeper.count(), 1);
}

#[tokio::test]
async fn duplicate_types_are_probed_each_time_listed() {
    let (kubectl, executor, _) = fake_kubectl(ScriptedExecutor::new());

    kubectl
        .wait_for_resource_types(2, &[CRD, CRD])
        .await
        .unwrap();

    assert_eq!(executor.calls_for(CRD), 2);
}

#[tokio::test]
async fn custom_program_is_used_for_probes() {
    let (kubectl, executor, _) = fake_kubectl(ScriptedExecutor::new());
    let kubectl = kubectl.program("oc");

    kubectl.wait_for_resource_types(1, &[CRD]).await.unwrap();

    assert_eq!(executor.command_lines(), vec!["oc get crd"]);
}

#[test]
fn timeout_error_message_lists_pending_types() {
    let err = KubewaitError::ReadinessTimeout {
        seconds: 5,
        pending: vec![CRD.to_string(), DEPLOY.to_string()],
    };
    assert_eq!(
        err.to_string(),
        "kubernetes resources not ready after 5s (still pending: crd, deployments)"
    );
}

// tests/workflow_up.rs

use kubewait::cli::Command;
use kubewait::errors::KubewaitError;
use kubewait::exec::StderrMode;
use kubewait::workflow::{plan, up, wait_target};
use kubewait_test_utils::builders::ConfigFileBuilder;
use kubewait_test_utils::{ScriptedExecutor, fake_kubectl, init_tracing};

#[tokio::test]
async fn up_applies_then_waits() {
    init_tracing();
    let cfg = ConfigFileBuilder::new()
        .apply_file("operator.yaml")
        .apply_file("controller.yaml")
        .resource_type("crd")
        .timeout_secs(5)
        .build();
    let (kubectl, executor, sleeper) = fake_kubectl(ScriptedExecutor::new().fail_times("crd", 1));

    let report = up(&kubectl, &cfg).await.unwrap();

    assert_eq!(report.map(|r| r.iterations), Some(2));
    assert_eq!(
        executor.command_lines(),
        vec![
            "kubectl apply -f operator.yaml -f controller.yaml",
            "kubectl get crd",
            "kubectl get crd",
        ]
    );
    let invocations = executor.invocations();
    assert_eq!(invocations[0].stderr, StderrMode::Tee);
    assert_eq!(invocations[1].stderr, StderrMode::Discard);
    assert_eq!(sleeper.count(), 2);
}

#[tokio::test]
async fn up_stops_when_apply_fails() {
    let cfg = ConfigFileBuilder::new()
        .apply_file("broken.yaml")
        .resource_type("crd")
        .build();
    let (kubectl, executor, _) = fake_kubectl(ScriptedExecutor::new().always_fail("broken.yaml"));

    let err = up(&kubectl, &cfg).await.unwrap_err();

    assert!(err.is_execution_failure());
    assert_eq!(executor.invocations().len(), 1);
}

#[tokio::test]
async fn up_without_resource_types_only_applies() {
    let cfg = ConfigFileBuilder::new().apply_file("a.yaml").build();
    let (kubectl, executor, sleeper) = fake_kubectl(ScriptedExecutor::new());

    let report = up(&kubectl, &cfg).await.unwrap();

    assert!(report.is_none());
    assert_eq!(executor.invocations().len(), 1);
    assert_eq!(sleeper.count(), 0);
}

#[tokio::test]
async fn up_with_zero_timeout_fails_without_probing() {
    let cfg = ConfigFileBuilder::new()
        .resource_type("crd")
        .timeout_secs(0)
        .build();
    let (kubectl, executor, _) = fake_kubectl(ScriptedExecutor::new());

    let err = up(&kubectl, &cfg).await.unwrap_err();

    assert!(matches!(err, KubewaitError::ReadinessTimeout { seconds: 0, .. }));
    assert!(executor.invocations().is_empty());
}

#[test]
fn wait_target_prefers_cli_values() {
    let cfg = ConfigFileBuilder::new()
        .resource_type("from-config")
        .timeout_secs(30)
        .build();
    let cli_types = vec!["from-cli".to_string()];

    assert_eq!(wait_target(Some(5), &cli_types, &cfg), (5, cli_types.as_slice()));
    assert_eq!(
        wait_target(None, &[], &cfg),
        (30, cfg.wait.resource_types.as_slice())
    );
}

#[test]
fn plan_lists_commands_without_running_them() {
    let cfg = ConfigFileBuilder::new()
        .apply_file("a.yaml")
        .resource_type("crd")
        .resource_type("pods")
        .build();
    let (kubectl, executor, _) = fake_kubectl(ScriptedExecutor::new());

    let steps = plan(&kubectl, &Command::Up, &cfg);
    let lines: Vec<String> = steps.iter().map(|s| s.spec.to_string()).collect();

    assert_eq!(
        lines,
        vec!["kubectl apply -f a.yaml", "kubectl get crd", "kubectl get pods"]
    );
    assert!(steps[1].note.as_deref().unwrap().contains("60 rounds"));
    assert!(executor.invocations().is_empty());

    let stdin_steps = plan(
        &kubectl,
        &Command::Apply {
            files: vec![],
            stdin: true,
        },
        &cfg,
    );
    assert_eq!(stdin_steps[0].spec.to_string(), "kubectl apply -f -");
}

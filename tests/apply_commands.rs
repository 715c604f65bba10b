// tests/apply_commands.rs

use kubewait::errors::KubewaitError;
use kubewait::exec::{ExecutionOutcome, StderrMode, StdoutMode};
use kubewait::kube::apply_files_args;
use kubewait_test_utils::{ScriptedExecutor, fake_kubectl, init_tracing};

#[test]
fn apply_args_pair_each_file_with_flag_in_order() {
    assert_eq!(
        apply_files_args(&["a.yaml", "b.yaml"]),
        vec!["apply", "-f", "a.yaml", "-f", "b.yaml"]
    );
}

#[test]
fn apply_args_with_no_files_is_just_the_verb() {
    assert_eq!(apply_files_args::<&str>(&[]), vec!["apply"]);
}

#[tokio::test]
async fn apply_from_files_runs_once_with_errors_relayed() {
    init_tracing();
    let (kubectl, executor, _) = fake_kubectl(ScriptedExecutor::new());

    kubectl
        .apply_from_files(&["a.yaml", "b.yaml"])
        .await
        .unwrap();

    let invocations = executor.invocations();
    assert_eq!(invocations.len(), 1);
    let inv = &invocations[0];
    assert_eq!(inv.spec.program(), "kubectl");
    assert_eq!(inv.spec.arguments(), ["apply", "-f", "a.yaml", "-f", "b.yaml"]);
    assert_eq!(inv.stderr, StderrMode::Tee);
    assert_eq!(inv.stdout, StdoutMode::Tee);
    assert!(inv.stdin.is_none());
}

#[tokio::test]
async fn apply_from_files_fails_exactly_when_kubectl_fails() {
    // Keyed on the last argument, which is the last file.
    let executor = ScriptedExecutor::new().respond(
        "broken.yaml",
        ExecutionOutcome::failed("", Some(1)).with_stderr("error: invalid manifest"),
    );
    let (kubectl, _, _) = fake_kubectl(executor);

    let err = kubectl
        .apply_from_files(&["ok.yaml", "broken.yaml"])
        .await
        .unwrap_err();

    match err {
        KubewaitError::Execution { command, code } => {
            assert_eq!(command, "kubectl apply -f ok.yaml -f broken.yaml");
            assert_eq!(code, Some(1));
        }
        other => panic!("expected Execution error, got {other:?}"),
    }
}

#[tokio::test]
async fn apply_from_stdin_passes_payload_verbatim() {
    let (kubectl, executor, _) = fake_kubectl(ScriptedExecutor::new());
    let payload = "apiVersion: v1\nkind: Namespace\nmetadata:\n  name: demo\n";

    kubectl.apply_from_stdin(payload).await.unwrap();

    let invocations = executor.invocations();
    assert_eq!(invocations.len(), 1);
    let inv = &invocations[0];
    assert_eq!(inv.spec.to_string(), "kubectl apply -f -");
    assert_eq!(inv.stdin.as_deref(), Some(payload.as_bytes()));
    assert_eq!(inv.stderr, StderrMode::Tee);
}

#[tokio::test]
async fn apply_from_stdin_surfaces_launch_failures() {
    let executor = ScriptedExecutor::new().respond(
        "-",
        ExecutionOutcome::launch_failed("", "writing stdin: Broken pipe"),
    );
    let (kubectl, _, _) = fake_kubectl(executor);

    let err = kubectl.apply_from_stdin("kind: Pod").await.unwrap_err();

    assert!(err.is_launch_failure(), "unexpected error: {err:?}");
    assert!(err.to_string().contains("Broken pipe"));
}

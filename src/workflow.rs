// src/workflow.rs

//! Subcommand dispatch shared by the binary and the tests.

use tracing::info;

use crate::cli::Command;
use crate::config::ConfigFile;
use crate::errors::Result;
use crate::exec::{CommandSpec, ProcessExecutor};
use crate::kube::{Kubectl, PollReport, Sleeper};

/// Resource types and budget for `wait`, after falling back to config.
pub fn wait_target<'a>(
    timeout: Option<i64>,
    types: &'a [String],
    cfg: &'a ConfigFile,
) -> (i64, &'a [String]) {
    let timeout = timeout.unwrap_or(cfg.wait.timeout_secs);
    let types = if types.is_empty() {
        cfg.wait.resource_types.as_slice()
    } else {
        types
    };
    (timeout, types)
}

/// The setup workflow: apply the configured manifests (if any), then wait
/// for the configured resource types.
///
/// Returns `None` when there was nothing to wait for.
pub async fn up<E: ProcessExecutor, S: Sleeper>(
    kubectl: &Kubectl<E, S>,
    cfg: &ConfigFile,
) -> Result<Option<PollReport>> {
    if cfg.apply.files.is_empty() {
        info!("no [apply].files configured; skipping apply");
    } else {
        kubectl.apply_from_files(&cfg.apply.files).await?;
    }

    if cfg.wait.resource_types.is_empty() {
        info!("no [wait].resource_types configured; nothing to wait for");
        return Ok(None);
    }

    let report = kubectl
        .wait_for_resource_types(cfg.wait.timeout_secs, &cfg.wait.resource_types)
        .await?;
    Ok(Some(report))
}

/// One line of dry-run output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedStep {
    pub spec: CommandSpec,
    pub note: Option<String>,
}

impl PlannedStep {
    fn once(spec: CommandSpec) -> Self {
        Self { spec, note: None }
    }

    fn noted(spec: CommandSpec, note: impl Into<String>) -> Self {
        Self {
            spec,
            note: Some(note.into()),
        }
    }
}

/// The commands a subcommand would run, in order.
pub fn plan<E: ProcessExecutor, S: Sleeper>(
    kubectl: &Kubectl<E, S>,
    command: &Command,
    cfg: &ConfigFile,
) -> Vec<PlannedStep> {
    match command {
        Command::Wait { timeout, types } => {
            let (timeout, types) = wait_target(*timeout, types, cfg);
            plan_wait(kubectl, timeout, types)
        }
        Command::Apply { files, stdin } => {
            if *stdin {
                vec![PlannedStep::noted(
                    kubectl.apply_stdin_spec(),
                    "payload read from stdin",
                )]
            } else {
                vec![PlannedStep::once(kubectl.apply_files_spec(files))]
            }
        }
        Command::Get { resource_type } => {
            vec![PlannedStep::noted(
                kubectl.get_spec(resource_type),
                "output captured",
            )]
        }
        Command::Up => {
            let mut steps = Vec::new();
            if !cfg.apply.files.is_empty() {
                steps.push(PlannedStep::once(kubectl.apply_files_spec(&cfg.apply.files)));
            }
            steps.extend(plan_wait(
                kubectl,
                cfg.wait.timeout_secs,
                &cfg.wait.resource_types,
            ));
            steps
        }
    }
}

fn plan_wait<E: ProcessExecutor, S: Sleeper>(
    kubectl: &Kubectl<E, S>,
    timeout: i64,
    types: &[String],
) -> Vec<PlannedStep> {
    types
        .iter()
        .map(|t| {
            PlannedStep::noted(
                kubectl.get_spec(t),
                format!("probe, up to {timeout} rounds, stderr discarded"),
            )
        })
        .collect()
}

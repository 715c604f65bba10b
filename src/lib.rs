// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod kube;
pub mod logging;
pub mod workflow;

use std::path::PathBuf;

use anyhow::{Context, Result};
use tokio::io::AsyncReadExt;
use tracing::{debug, info};

use crate::cli::{CliArgs, Command};
use crate::config::{ConfigFile, default_config_path, load_and_validate, load_or_default};
use crate::exec::RealExecutor;
use crate::kube::Kubectl;
use crate::workflow::{plan, up, wait_target};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading
/// - the real process executor and the kubectl client
/// - subcommand dispatch (or dry-run printing)
pub async fn run(args: CliArgs) -> Result<()> {
    let cfg = resolve_config(args.config.as_deref())?;

    let program = args
        .kubectl
        .clone()
        .unwrap_or_else(|| cfg.kubectl.program.clone());
    let kubectl = Kubectl::new(RealExecutor::new()).program(program);

    if args.dry_run {
        print_dry_run(&kubectl, &args.command, &cfg);
        return Ok(());
    }

    match &args.command {
        Command::Wait { timeout, types } => {
            let (timeout, types) = wait_target(*timeout, types, &cfg);
            let report = kubectl.wait_for_resource_types(timeout, types).await?;
            info!(iterations = report.iterations, "wait finished");
        }
        Command::Apply { files, stdin } => {
            if *stdin {
                let mut payload = Vec::new();
                tokio::io::stdin()
                    .read_to_end(&mut payload)
                    .await
                    .context("reading manifest payload from stdin")?;
                kubectl.apply_from_stdin(payload).await?;
            } else {
                kubectl.apply_from_files(files).await?;
            }
        }
        Command::Get { resource_type } => {
            let captured = kubectl.get(resource_type).await;
            print!("{}", captured.output);
            captured.result?;
        }
        Command::Up => {
            if let Some(report) = up(&kubectl, &cfg).await? {
                info!(iterations = report.iterations, "setup finished");
            }
        }
    }

    Ok(())
}

/// Load the explicit config path strictly, or the default path leniently.
fn resolve_config(explicit: Option<&str>) -> Result<ConfigFile> {
    match explicit {
        Some(path) => load_and_validate(PathBuf::from(path))
            .with_context(|| format!("loading config from {path}")),
        None => {
            let path = default_config_path();
            load_or_default(&path).with_context(|| format!("loading config from {}", path.display()))
        }
    }
}

/// Print the planned kubectl calls without running anything.
fn print_dry_run<E, S>(kubectl: &Kubectl<E, S>, command: &Command, cfg: &ConfigFile)
where
    E: exec::ProcessExecutor,
    S: kube::Sleeper,
{
    println!("kubewait dry-run");
    println!("  kubectl.program = {}", kubectl.program_name());
    println!("  wait.timeout_secs = {}", cfg.wait.timeout_secs);
    println!();

    let steps = plan(kubectl, command, cfg);
    println!("commands ({}):", steps.len());
    for step in steps {
        match step.note {
            Some(note) => println!("  - {}    # {note}", step.spec),
            None => println!("  - {}", step.spec),
        }
    }

    debug!("dry-run complete (no execution)");
}

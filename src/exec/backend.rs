// src/exec/backend.rs

//! Pluggable process executor.
//!
//! Everything that spawns a child goes through [`ProcessExecutor::execute`].
//! The kubectl layer only ever sees this trait, so tests can swap in a
//! scripted executor that never touches the OS.
//!
//! - [`RealExecutor`] spawns with `tokio::process` and tees output into the
//!   configured [`OutputSinks`].
//! - `run`, `run_with_stdin` and `capture` are provided on top of `execute`
//!   and behave the same for every implementation.

use std::future::Future;
use std::pin::Pin;
use std::process::Stdio;

use tokio::io::AsyncWriteExt;
use tokio::process::{Child, Command};
use tracing::{debug, info, warn};

use crate::errors::Result;

use super::command::CommandSpec;
use super::outcome::{ExecutionOutcome, ExitState};
use super::sink::OutputSinks;
use super::tee::{join_tee, spawn_tee};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// What happens to the child's stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StdoutMode {
    /// Relay to the stdout sink and buffer.
    Tee,
    /// Buffer only.
    Capture,
}

/// What happens to the child's stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StderrMode {
    /// Relay to the stderr sink and buffer.
    Tee,
    /// Connect to the null device; nothing is relayed or buffered.
    Discard,
}

/// One request to run a command.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub spec: CommandSpec,
    /// Bytes written to the child's stdin before waiting on it. `None`
    /// leaves stdin on the null device.
    pub stdin: Option<Vec<u8>>,
    pub stdout: StdoutMode,
    pub stderr: StderrMode,
}

impl Invocation {
    pub fn run(spec: CommandSpec, relay_errors: bool) -> Self {
        Self {
            spec,
            stdin: None,
            stdout: StdoutMode::Tee,
            stderr: if relay_errors {
                StderrMode::Tee
            } else {
                StderrMode::Discard
            },
        }
    }

    pub fn with_stdin(input: impl Into<Vec<u8>>, spec: CommandSpec) -> Self {
        Self {
            stdin: Some(input.into()),
            ..Self::run(spec, true)
        }
    }

    pub fn capture(spec: CommandSpec) -> Self {
        Self {
            spec,
            stdin: None,
            stdout: StdoutMode::Capture,
            stderr: StderrMode::Tee,
        }
    }

    /// Probes run with stderr discarded; their failures are routine.
    pub fn is_quiet(&self) -> bool {
        self.stderr == StderrMode::Discard
    }
}

/// Output of [`ProcessExecutor::capture`].
///
/// `output` is filled even when `result` is an error, since whatever the
/// command printed before failing is often the useful part.
#[derive(Debug)]
pub struct Captured {
    pub output: String,
    pub result: Result<()>,
}

/// Trait abstracting how commands are executed.
pub trait ProcessExecutor: Send + Sync {
    /// Run the invocation to completion and report what happened.
    fn execute(&self, invocation: Invocation) -> BoxFuture<'_, ExecutionOutcome>;

    /// Run `spec`, teeing stdout and, if `relay_errors` is set, stderr.
    fn run(&self, spec: CommandSpec, relay_errors: bool) -> BoxFuture<'_, Result<()>> {
        let invocation = Invocation::run(spec, relay_errors);
        Box::pin(async move { self.execute(invocation).await.into_result() })
    }

    /// Like `run` with errors relayed, but feeds `input` to the child's stdin
    /// and closes it before waiting.
    fn run_with_stdin(&self, input: Vec<u8>, spec: CommandSpec) -> BoxFuture<'_, Result<()>> {
        let invocation = Invocation::with_stdin(input, spec);
        Box::pin(async move { self.execute(invocation).await.into_result() })
    }

    /// Run `spec` and hand back its stdout instead of relaying it. Stderr is
    /// still teed.
    fn capture(&self, spec: CommandSpec) -> BoxFuture<'_, Captured> {
        let invocation = Invocation::capture(spec);
        Box::pin(async move {
            let outcome = self.execute(invocation).await;
            Captured {
                output: outcome.stdout_lossy(),
                result: outcome.into_result(),
            }
        })
    }
}

impl<E: ProcessExecutor + ?Sized> ProcessExecutor for &E {
    fn execute(&self, invocation: Invocation) -> BoxFuture<'_, ExecutionOutcome> {
        (**self).execute(invocation)
    }
}

/// Real executor used in production.
#[derive(Debug, Clone)]
pub struct RealExecutor {
    sinks: OutputSinks,
}

impl RealExecutor {
    /// Relay to this process's own stdout/stderr.
    pub fn new() -> Self {
        Self::with_sinks(OutputSinks::inherit())
    }

    pub fn with_sinks(sinks: OutputSinks) -> Self {
        Self { sinks }
    }

    async fn execute_inner(&self, invocation: Invocation) -> ExecutionOutcome {
        let quiet = invocation.is_quiet();
        let Invocation {
            spec,
            stdin,
            stdout,
            stderr,
        } = invocation;
        let command = spec.to_string();

        debug!(cmd = %command, ?stdout, ?stderr, stdin = stdin.is_some(), "starting child process");

        let mut cmd = Command::new(spec.program());
        cmd.args(spec.arguments())
            .stdin(if stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(match stderr {
                StderrMode::Tee => Stdio::piped(),
                StderrMode::Discard => Stdio::null(),
            })
            .kill_on_drop(true);

        let mut child = match cmd.spawn() {
            Ok(child) => child,
            Err(err) => {
                if quiet {
                    debug!(cmd = %command, error = %err, "failed to spawn child process");
                } else {
                    warn!(cmd = %command, error = %err, "failed to spawn child process");
                }
                return ExecutionOutcome::launch_failed(command, err.to_string());
            }
        };

        let stdout_sink = match stdout {
            StdoutMode::Tee => Some(self.sinks.stdout.clone()),
            StdoutMode::Capture => None,
        };
        let stderr_sink = match stderr {
            StderrMode::Tee => Some(self.sinks.stderr.clone()),
            StderrMode::Discard => None,
        };
        let stdout_task = spawn_tee(child.stdout.take(), stdout_sink, "stdout");
        let stderr_task = spawn_tee(child.stderr.take(), stderr_sink, "stderr");

        if let Some(input) = stdin {
            if let Err(reason) = feed_stdin(&mut child, &input).await {
                warn!(cmd = %command, %reason, "failed to feed child stdin; abandoning process");
                // Dropping `child` kills it; it is never waited on.
                return ExecutionOutcome::launch_failed(command, reason);
            }
        }

        let status = match child.wait().await {
            Ok(status) => status,
            Err(err) => {
                warn!(cmd = %command, error = %err, "failed waiting for child process");
                return ExecutionOutcome::launch_failed(command, format!("waiting for child: {err}"));
            }
        };

        let stdout_bytes = join_tee(stdout_task).await;
        let stderr_bytes = join_tee(stderr_task).await;
        let (stdout_bytes, stderr_bytes) = match (stdout_bytes, stderr_bytes) {
            (Ok(out), Ok(err)) => (out, err),
            (Err(err), _) | (_, Err(err)) => {
                warn!(cmd = %command, error = %err, "failed reading child output");
                return ExecutionOutcome::launch_failed(command, format!("reading child output: {err}"));
            }
        };

        let state = if status.success() {
            ExitState::Success
        } else {
            ExitState::Failed {
                code: status.code(),
            }
        };

        let code = status.code().unwrap_or(-1);
        if status.success() || quiet {
            debug!(cmd = %command, exit_code = code, success = status.success(), "child process exited");
        } else {
            info!(cmd = %command, exit_code = code, "child process exited with failure");
        }

        ExecutionOutcome {
            command,
            stdout: stdout_bytes,
            stderr: stderr_bytes,
            state,
        }
    }
}

impl Default for RealExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessExecutor for RealExecutor {
    fn execute(&self, invocation: Invocation) -> BoxFuture<'_, ExecutionOutcome> {
        Box::pin(self.execute_inner(invocation))
    }
}

/// Write `input` in full to the child's stdin, then close the pipe.
async fn feed_stdin(child: &mut Child, input: &[u8]) -> std::result::Result<(), String> {
    let mut pipe = child
        .stdin
        .take()
        .ok_or_else(|| "stdin pipe was not opened".to_string())?;

    pipe.write_all(input)
        .await
        .map_err(|e| format!("writing stdin: {e}"))?;
    pipe.shutdown()
        .await
        .map_err(|e| format!("closing stdin: {e}"))?;

    drop(pipe);
    Ok(())
}

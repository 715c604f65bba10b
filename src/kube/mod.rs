// src/kube/mod.rs

//! kubectl-facing operations built on top of [`crate::exec`].
//!
//! - [`poll`] waits until a set of resource types can be fetched.
//! - [`apply`] applies manifests from files or from a stdin payload.
//! - [`clock`] abstracts the pause between poll iterations.

pub mod apply;
pub mod clock;
pub mod poll;

pub use apply::apply_files_args;
pub use clock::{Sleeper, TokioSleeper};
pub use poll::{POLL_INTERVAL, PollReport, PollRequest};

use crate::exec::{Captured, CommandSpec, ProcessExecutor};

/// Default kubectl executable.
pub const KUBECTL: &str = "kubectl";
/// Read-only verb used by readiness probes.
pub const K8S_GET: &str = "get";
/// Idempotent reconcile verb.
pub const K8S_APPLY: &str = "apply";
/// Flag preceding each manifest path.
pub const FILE_FLAG: &str = "-f";
/// Manifest path meaning "read from standard input".
pub const STDIN_SENTINEL: &str = "-";

/// A kubectl client driving an executor.
///
/// Holds no state beyond the program name and its collaborators; every call
/// builds fresh `CommandSpec`s.
#[derive(Debug, Clone)]
pub struct Kubectl<E, S = TokioSleeper> {
    executor: E,
    sleeper: S,
    program: String,
}

impl<E: ProcessExecutor> Kubectl<E, TokioSleeper> {
    pub fn new(executor: E) -> Self {
        Self::with_sleeper(executor, TokioSleeper)
    }
}

impl<E: ProcessExecutor, S: Sleeper> Kubectl<E, S> {
    pub fn with_sleeper(executor: E, sleeper: S) -> Self {
        Self {
            executor,
            sleeper,
            program: KUBECTL.to_string(),
        }
    }

    /// Use another kubectl binary (e.g. an absolute path or `oc`).
    pub fn program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn program_name(&self) -> &str {
        &self.program
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// `<kubectl> get <resource_type>`
    pub fn get_spec(&self, resource_type: &str) -> CommandSpec {
        CommandSpec::new(&self.program).arg(K8S_GET).arg(resource_type)
    }

    /// `<kubectl> apply -f <p1> -f <p2> ...`
    pub fn apply_files_spec<P: AsRef<str>>(&self, paths: &[P]) -> CommandSpec {
        CommandSpec::new(&self.program).args(apply_files_args(paths))
    }

    /// `<kubectl> apply -f -`
    pub fn apply_stdin_spec(&self) -> CommandSpec {
        CommandSpec::new(&self.program)
            .arg(K8S_APPLY)
            .arg(FILE_FLAG)
            .arg(STDIN_SENTINEL)
    }

    /// Fetch `resource_type` and return what kubectl printed.
    pub async fn get(&self, resource_type: &str) -> Captured {
        self.executor.capture(self.get_spec(resource_type)).await
    }
}

// src/exec/outcome.rs

use crate::errors::{KubewaitError, Result};

/// How a child process ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExitState {
    /// Exit status 0.
    Success,
    /// The child ran and exited non-zero (`code` is `None` if killed by a
    /// signal).
    Failed { code: Option<i32> },
    /// The child could not be started or fed its stdin.
    LaunchFailed { reason: String },
}

/// Everything one execution produced.
///
/// Owned by whoever asked for the execution. `stderr` stays empty when the
/// invocation discarded the error stream.
#[derive(Debug, Clone)]
pub struct ExecutionOutcome {
    /// The rendered command line, kept for error messages.
    pub command: String,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    pub state: ExitState,
}

impl ExecutionOutcome {
    pub fn success(command: impl Into<String>) -> Self {
        Self::with_state(command, ExitState::Success)
    }

    pub fn failed(command: impl Into<String>, code: Option<i32>) -> Self {
        Self::with_state(command, ExitState::Failed { code })
    }

    pub fn launch_failed(command: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::with_state(
            command,
            ExitState::LaunchFailed {
                reason: reason.into(),
            },
        )
    }

    fn with_state(command: impl Into<String>, state: ExitState) -> Self {
        Self {
            command: command.into(),
            stdout: Vec::new(),
            stderr: Vec::new(),
            state,
        }
    }

    pub fn with_stdout(mut self, bytes: impl Into<Vec<u8>>) -> Self {
        self.stdout = bytes.into();
        self
    }

    pub fn with_stderr(mut self, bytes: impl Into<Vec<u8>>) -> Self {
        self.stderr = bytes.into();
        self
    }

    pub fn is_success(&self) -> bool {
        self.state == ExitState::Success
    }

    /// Stdout decoded as UTF-8, replacing invalid sequences.
    pub fn stdout_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    /// The terminal status as a `Result`, dropping the buffers.
    pub fn into_result(self) -> Result<()> {
        self.to_result()
    }

    pub fn to_result(&self) -> Result<()> {
        match &self.state {
            ExitState::Success => Ok(()),
            ExitState::Failed { code } => Err(KubewaitError::Execution {
                command: self.command.clone(),
                code: *code,
            }),
            ExitState::LaunchFailed { reason } => Err(KubewaitError::Launch {
                command: self.command.clone(),
                reason: reason.clone(),
            }),
        }
    }
}

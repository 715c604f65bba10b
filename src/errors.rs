// src/errors.rs

//! Crate-wide error type and result alias.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum KubewaitError {
    /// Rejected input, raised before any process is spawned.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The child could not be started, or its stdin pipe could not be
    /// opened, written or closed.
    #[error("Failed to launch `{command}`: {reason}")]
    Launch { command: String, reason: String },

    /// The child ran but did not exit with status 0.
    #[error("`{command}` exited with {}", describe_code(.code))]
    Execution { command: String, code: Option<i32> },

    /// The iteration budget ran out while at least one probe kept failing.
    #[error("kubernetes resources not ready after {seconds}s (still pending: {})", .pending.join(", "))]
    ReadinessTimeout { seconds: u64, pending: Vec<String> },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("exit status {c}"),
        None => "no exit status (terminated by signal)".to_string(),
    }
}

impl KubewaitError {
    /// True for failures of a child that actually ran.
    pub fn is_execution_failure(&self) -> bool {
        matches!(self, KubewaitError::Execution { .. })
    }

    /// True when the child never got to run to completion under our control.
    pub fn is_launch_failure(&self) -> bool {
        matches!(self, KubewaitError::Launch { .. })
    }
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, KubewaitError>;

// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, Subcommand, ValueEnum};

/// Command-line arguments for `kubewait`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "kubewait",
    version,
    about = "Apply Kubernetes manifests and wait for resource types to become available.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `$KUBEWAIT_CONFIG`, else `Kubewait.toml` in the current
    /// working directory. A missing default file is fine; a missing explicit
    /// one is an error.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<String>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `KUBEWAIT_LOG` or a default level will be used.
    #[arg(long, global = true, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// kubectl executable to invoke; overrides `[kubectl].program`.
    #[arg(long, global = true, value_name = "PROGRAM")]
    pub kubectl: Option<String>,

    /// Print the kubectl commands that would run, but don't run them.
    #[arg(long, global = true)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Poll `kubectl get <TYPE>` once a second until every type succeeds in
    /// the same round.
    Wait {
        /// Time budget in seconds; falls back to `[wait].timeout_secs`.
        #[arg(long, value_name = "SECS", allow_negative_numbers = true)]
        timeout: Option<i64>,

        /// Resource types; falls back to `[wait].resource_types`.
        #[arg(value_name = "TYPE")]
        types: Vec<String>,
    },

    /// Apply manifests from files, or from this process's stdin.
    Apply {
        /// Manifest file, URL or directory. Repeatable; order is kept.
        #[arg(
            short = 'f',
            long = "filename",
            value_name = "FILE",
            required_unless_present = "stdin",
            conflicts_with = "stdin"
        )]
        files: Vec<String>,

        /// Read the manifest payload from stdin.
        #[arg(long)]
        stdin: bool,
    },

    /// Run `kubectl get <TYPE>` and print its output.
    Get {
        #[arg(value_name = "TYPE")]
        resource_type: String,
    },

    /// Apply `[apply].files`, then wait for `[wait].resource_types`.
    Up,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}

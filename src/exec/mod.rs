// src/exec/mod.rs

//! Process execution layer.
//!
//! This module runs external commands with `tokio::process::Command` and
//! relays their output while also keeping it.
//!
//! - [`command`] holds the immutable `CommandSpec`.
//! - [`outcome`] describes how an execution ended.
//! - [`sink`] holds the explicit writer handles output is relayed to.
//! - [`tee`] drains a child stream into a sink and a buffer.
//! - [`backend`] provides the `ProcessExecutor` trait and the concrete
//!   `RealExecutor`, which tests replace with a scripted implementation.

pub mod backend;
pub mod command;
pub mod outcome;
pub mod sink;
pub mod tee;

pub use backend::{
    BoxFuture, Captured, Invocation, ProcessExecutor, RealExecutor, StderrMode, StdoutMode,
};
pub use command::CommandSpec;
pub use outcome::{ExecutionOutcome, ExitState};
pub use sink::{OutputSinks, SharedBuffer};

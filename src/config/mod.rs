// src/config/mod.rs

//! `Kubewait.toml` handling.
//!
//! - [`model`] holds the serde types.
//! - [`loader`] reads a file and runs validation.
//! - [`validate`] turns a `RawConfigFile` into a checked `ConfigFile`.

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_config_path, load_and_validate, load_from_path, load_or_default};
pub use model::{ApplySection, ConfigFile, KubectlSection, RawConfigFile, WaitSection};

// src/config/validate.rs

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{KubewaitError, Result};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::KubewaitError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_kubectl(cfg)?;
    validate_wait(cfg)?;
    validate_apply(cfg)?;
    Ok(())
}

fn validate_kubectl(cfg: &RawConfigFile) -> Result<()> {
    if cfg.kubectl.program.trim().is_empty() {
        return Err(KubewaitError::ConfigError(
            "[kubectl].program must not be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_wait(cfg: &RawConfigFile) -> Result<()> {
    if cfg.wait.timeout_secs < 0 {
        return Err(KubewaitError::ConfigError(format!(
            "[wait].timeout_secs must be >= 0 (got {})",
            cfg.wait.timeout_secs
        )));
    }

    if let Some(idx) = cfg.wait.resource_types.iter().position(|t| t.trim().is_empty()) {
        return Err(KubewaitError::ConfigError(format!(
            "[wait].resource_types[{idx}] must not be blank"
        )));
    }

    Ok(())
}

fn validate_apply(cfg: &RawConfigFile) -> Result<()> {
    if let Some(idx) = cfg.apply.files.iter().position(|f| f.trim().is_empty()) {
        return Err(KubewaitError::ConfigError(format!(
            "[apply].files[{idx}] must not be blank"
        )));
    }
    Ok(())
}

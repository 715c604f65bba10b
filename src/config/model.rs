// src/config/model.rs

use serde::Deserialize;

use crate::kube::KUBECTL;

/// Configuration as read from a TOML file, before validation.
///
/// ```toml
/// [kubectl]
/// program = "kubectl"
///
/// [wait]
/// timeout_secs = 60
/// resource_types = ["crd/apis.dp.wso2.com", "deployments"]
///
/// [apply]
/// files = ["operator.yaml", "controller.yaml"]
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    #[serde(default)]
    pub kubectl: KubectlSection,

    #[serde(default)]
    pub wait: WaitSection,

    #[serde(default)]
    pub apply: ApplySection,
}

/// `[kubectl]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KubectlSection {
    /// Executable used for every get/apply call.
    #[serde(default = "default_program")]
    pub program: String,
}

fn default_program() -> String {
    KUBECTL.to_string()
}

impl Default for KubectlSection {
    fn default() -> Self {
        Self {
            program: default_program(),
        }
    }
}

/// `[wait]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WaitSection {
    /// Budget in seconds. Signed so a negative value is reported as a
    /// validation error rather than a parse error.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: i64,

    /// Resource types probed with `kubectl get`.
    #[serde(default)]
    pub resource_types: Vec<String>,
}

fn default_timeout_secs() -> i64 {
    60
}

impl Default for WaitSection {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            resource_types: Vec::new(),
        }
    }
}

/// `[apply]` section.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ApplySection {
    /// Manifest files, URLs or directories, applied in this order.
    #[serde(default)]
    pub files: Vec<String>,
}

/// Validated configuration.
///
/// Only obtainable through `TryFrom<RawConfigFile>` (or `Default`), so holders
/// can rely on the checks in [`crate::config::validate`].
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub kubectl: KubectlSection,
    pub wait: WaitSection,
    pub apply: ApplySection,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(raw: RawConfigFile) -> Self {
        Self {
            kubectl: raw.kubectl,
            wait: raw.wait,
            apply: raw.apply,
        }
    }
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self::new_unchecked(RawConfigFile::default())
    }
}

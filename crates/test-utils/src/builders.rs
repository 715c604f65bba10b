#![allow(dead_code)]

use kubewait::config::{ApplySection, ConfigFile, KubectlSection, RawConfigFile, WaitSection};

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile {
                kubectl: KubectlSection::default(),
                wait: WaitSection::default(),
                apply: ApplySection::default(),
            },
        }
    }

    pub fn program(mut self, program: &str) -> Self {
        self.config.kubectl.program = program.to_string();
        self
    }

    pub fn timeout_secs(mut self, secs: i64) -> Self {
        self.config.wait.timeout_secs = secs;
        self
    }

    pub fn resource_type(mut self, resource_type: &str) -> Self {
        self.config.wait.resource_types.push(resource_type.to_string());
        self
    }

    pub fn apply_file(mut self, file: &str) -> Self {
        self.config.apply.files.push(file.to_string());
        self
    }

    pub fn raw(self) -> RawConfigFile {
        self.config
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

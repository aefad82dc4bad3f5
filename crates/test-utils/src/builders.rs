#![allow(dead_code)]

use std::collections::BTreeMap;
use topobatch::config::{ConfigFile, ConfigSection, ProcessConfig, RawConfigFile, ResourceConfig};
use topobatch::types::EquivalenceMode;

/// Builder for `ConfigFile` to simplify test setup.
pub struct PlanConfigBuilder {
    config: RawConfigFile,
}

impl PlanConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile {
                config: ConfigSection::default(),
                resource: BTreeMap::new(),
                process: BTreeMap::new(),
            },
        }
    }

    pub fn with_process(mut self, name: &str, process: ProcessConfig) -> Self {
        self.config.process.insert(name.to_string(), process);
        self
    }

    pub fn with_resource(mut self, name: &str) -> Self {
        self.config
            .resource
            .insert(name.to_string(), ResourceConfig::default());
        self
    }

    pub fn with_equivalence(mut self, mode: EquivalenceMode) -> Self {
        self.config.config.equivalence = mode;
        self
    }

    /// The unvalidated config, for tests that exercise validation itself.
    pub fn build_raw(self) -> RawConfigFile {
        self.config
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for PlanConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `ProcessConfig`.
pub struct ProcessConfigBuilder {
    process: ProcessConfig,
}

impl ProcessConfigBuilder {
    pub fn new() -> Self {
        Self {
            process: ProcessConfig::default(),
        }
    }

    pub fn cmd(mut self, cmd: &str) -> Self {
        self.process.cmd = Some(cmd.to_string());
        self
    }

    pub fn label(mut self, label: &str) -> Self {
        self.process.label = Some(label.to_string());
        self
    }

    pub fn after(mut self, dep: &str) -> Self {
        self.process.after.push(dep.to_string());
        self
    }

    pub fn before(mut self, follower: &str) -> Self {
        self.process.before.push(follower.to_string());
        self
    }

    pub fn requires(mut self, resource: &str) -> Self {
        self.process.requires.push(resource.to_string());
        self
    }

    pub fn build(self) -> ProcessConfig {
        self.process
    }
}

impl Default for ProcessConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

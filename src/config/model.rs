// src/config/model.rs

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::types::EquivalenceMode;

/// Plan file exactly as read from TOML, before validation.
///
/// ```toml
/// [config]
/// equivalence = "identity"
///
/// [resource.database]
/// description = "primary postgres"
///
/// [process.build]
/// cmd = "cargo build"
///
/// [process.migrate]
/// cmd = "sqlx migrate run"
/// after = ["build"]
/// requires = ["database"]
/// ```
///
/// All sections are optional for deserialization; validation requires at
/// least one process.
#[derive(Debug, Clone, Deserialize)]
pub struct RawConfigFile {
    /// Global behaviour from `[config]`.
    #[serde(default)]
    pub config: ConfigSection,

    /// Resources from `[resource.<name>]`.
    #[serde(default)]
    pub resource: BTreeMap<String, ResourceConfig>,

    /// Processes from `[process.<name>]`.
    ///
    /// Keys are the process names referenced by `after` / `before`.
    #[serde(default)]
    pub process: BTreeMap<String, ProcessConfig>,
}

/// A plan file that passed validation: every reference resolves and the
/// precedence graph is acyclic.
///
/// Only obtainable through `TryFrom<RawConfigFile>`.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    config: ConfigSection,
    resource: BTreeMap<String, ResourceConfig>,
    process: BTreeMap<String, ProcessConfig>,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(
        config: ConfigSection,
        resource: BTreeMap<String, ResourceConfig>,
        process: BTreeMap<String, ProcessConfig>,
    ) -> Self {
        Self {
            config,
            resource,
            process,
        }
    }

    pub fn config(&self) -> &ConfigSection {
        &self.config
    }

    pub fn resources(&self) -> &BTreeMap<String, ResourceConfig> {
        &self.resource
    }

    pub fn processes(&self) -> &BTreeMap<String, ProcessConfig> {
        &self.process
    }
}

/// `[config]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigSection {
    /// `"identity"` (default) or `"label"`.
    #[serde(default)]
    pub equivalence: EquivalenceMode,
}

/// `[resource.<name>]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResourceConfig {
    #[serde(default)]
    pub description: Option<String>,
}

/// `[process.<name>]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProcessConfig {
    /// Command shown in the plan output. Never executed.
    #[serde(default)]
    pub cmd: Option<String>,

    /// Label used by `equivalence = "label"`.
    #[serde(default)]
    pub label: Option<String>,

    /// This process is placed after every process listed here.
    #[serde(default)]
    pub after: Vec<String>,

    /// This process is placed before every process listed here.
    #[serde(default)]
    pub before: Vec<String>,

    /// Resources this process needs exclusively.
    #[serde(default)]
    pub requires: Vec<String>,
}

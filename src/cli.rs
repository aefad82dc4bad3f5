// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::default_config_path;
use crate::types::EquivalenceMode;

/// Command-line arguments for `topobatch`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "topobatch",
    version,
    about = "Compute a batched execution order from process dependencies and shared resources.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to a plan file (TOML). Repeat to chain several plans; their
    /// batches are appended in the order given.
    ///
    /// Default: `Plan.toml` in the current working directory.
    #[arg(long = "config", value_name = "PATH")]
    pub configs: Vec<PathBuf>,

    /// Override the `equivalence` mode of every plan file
    /// (`identity` or `label`).
    #[arg(long, value_name = "MODE")]
    pub equivalence: Option<EquivalenceMode>,

    /// Print one process per line instead of batches.
    #[arg(long)]
    pub flat: bool,

    /// Parse + validate only, print a summary, don't compute the order.
    #[arg(long)]
    pub check: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// Overrides `TOPOBATCH_LOG`. If neither is set, `info` is used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

impl CliArgs {
    /// Plan files to load, falling back to the default path.
    pub fn config_paths(&self) -> Vec<PathBuf> {
        if self.configs.is_empty() {
            vec![default_config_path()]
        } else {
            self.configs.clone()
        }
    }
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

// src/logging.rs

//! `tracing` subscriber for the `topobatch` binary.
//!
//! The filter comes from, in order:
//! 1. `--log-level`, applied as a single global level;
//! 2. `TOPOBATCH_LOG`, parsed as `EnvFilter` directives, so
//!    `TOPOBATCH_LOG=topobatch::graph::sort=trace` shows every placement;
//! 3. `info`.
//!
//! Output goes to stderr. Stdout carries only the computed plan.

use anyhow::Result;
use tracing_subscriber::{fmt, EnvFilter};

use crate::cli::LogLevel;

/// Environment variable holding filter directives.
pub const LOG_ENV: &str = "TOPOBATCH_LOG";

const DEFAULT_DIRECTIVE: &str = "info";

/// Install the global subscriber. Call once at startup.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let env = std::env::var(LOG_ENV).ok();
    let filter = build_filter(cli_level, env.as_deref());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!("installing log subscriber: {err}"))?;

    Ok(())
}

/// Resolve the filter from the CLI flag and the raw `TOPOBATCH_LOG` value.
///
/// Directives that fail to parse fall back to `info` rather than aborting.
pub fn build_filter(cli_level: Option<LogLevel>, env: Option<&str>) -> EnvFilter {
    if let Some(level) = cli_level {
        return EnvFilter::new(directive(level));
    }

    env.map(str::trim)
        .filter(|raw| !raw.is_empty())
        .and_then(|raw| EnvFilter::try_new(raw).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVE))
}

fn directive(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    }
}

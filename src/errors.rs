// src/errors.rs

//! Crate-wide error types.
//!
//! - [`OrderError`] is what the ordering core in [`crate::graph`] can fail
//!   with. It never carries I/O or config concerns.
//! - [`TopobatchError`] is the application-level error used by the config
//!   loader, the plan builder and the CLI.

use thiserror::Error;

use crate::graph::Handle;

/// Failures raised by the ordering core.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    /// A constraint was declared between entities of two different graphs.
    #[error("{left} is not associated with the same graph as {right}")]
    GraphMismatch { left: Handle, right: Handle },

    /// No further level could be extracted: the precedence constraints
    /// contain a cycle.
    #[error("Cannot order this set of processes ({remaining} unplaced, dependency cycle)")]
    CyclicDependency { remaining: usize },
}

impl OrderError {
    pub(crate) fn mismatch(left: impl Into<Handle>, right: impl Into<Handle>) -> Self {
        Self::GraphMismatch {
            left: left.into(),
            right: right.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum TopobatchError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Cycle detected in plan: {0}")]
    PlanCycle(String),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Order(#[from] OrderError),
}

pub type Result<T> = std::result::Result<T, TopobatchError>;

// src/types.rs

use std::str::FromStr;

use serde::Deserialize;

/// How a plan file decides that two processes are interchangeable during
/// level extraction.
///
/// - `Identity`: every process is its own node (default).
/// - `Label`: processes carrying the same `label` are treated as the same
///   node, so a follower waits until every process with its predecessor's
///   label has been placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EquivalenceMode {
    #[default]
    Identity,
    Label,
}

impl FromStr for EquivalenceMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "identity" => Ok(EquivalenceMode::Identity),
            "label" => Ok(EquivalenceMode::Label),
            other => Err(format!(
                "invalid equivalence: {other} (expected \"identity\" or \"label\")"
            )),
        }
    }
}

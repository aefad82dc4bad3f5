// src/config/validate.rs

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{Result, TopobatchError};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = TopobatchError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.config, raw.resource, raw.process))
    }
}

/// Run semantic validation against a loaded plan file.
///
/// This checks:
/// - there is at least one process
/// - all `after` / `before` entries name other existing processes
/// - all `requires` entries name declared resources
/// - the precedence graph has no cycles
pub fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    ensure_has_processes(cfg)?;
    validate_process_references(cfg)?;
    validate_resource_references(cfg)?;
    validate_plan(cfg)?;
    Ok(())
}

fn ensure_has_processes(cfg: &RawConfigFile) -> Result<()> {
    if cfg.process.is_empty() {
        return Err(TopobatchError::ConfigError(
            "plan must contain at least one [process.<name>] section".to_string(),
        ));
    }
    Ok(())
}

fn validate_process_references(cfg: &RawConfigFile) -> Result<()> {
    for (name, process) in cfg.process.iter() {
        let refs = process
            .after
            .iter()
            .map(|r| ("after", r))
            .chain(process.before.iter().map(|r| ("before", r)));

        for (field, other) in refs {
            if !cfg.process.contains_key(other) {
                return Err(TopobatchError::ConfigError(format!(
                    "process '{}' has unknown process '{}' in `{}`",
                    name, other, field
                )));
            }
            if other == name {
                return Err(TopobatchError::ConfigError(format!(
                    "process '{}' cannot reference itself in `{}`",
                    name, field
                )));
            }
        }
    }
    Ok(())
}

fn validate_resource_references(cfg: &RawConfigFile) -> Result<()> {
    for (name, process) in cfg.process.iter() {
        for resource in process.requires.iter() {
            if !cfg.resource.contains_key(resource) {
                return Err(TopobatchError::ConfigError(format!(
                    "process '{}' requires undeclared resource '{}'",
                    name, resource
                )));
            }
        }
    }
    Ok(())
}

/// Rejects plans whose declared edges form a cycle, as `PlanCycle`.
///
/// Only declared edges are checked. A cycle created by `equivalence =
/// "label"` passes here and is reported when the plan is ordered, as
/// `TopobatchError::Order(OrderError::CyclicDependency)`.
fn validate_plan(cfg: &RawConfigFile) -> Result<()> {
    // Edge direction: predecessor -> follower.
    //   [process.B]
    //   after = ["A"]    adds A -> B
    //   before = ["C"]   adds B -> C
    let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();

    for name in cfg.process.keys() {
        graph.add_node(name.as_str());
    }

    for (name, process) in cfg.process.iter() {
        for dep in process.after.iter() {
            graph.add_edge(dep.as_str(), name.as_str(), ());
        }
        for follower in process.before.iter() {
            graph.add_edge(name.as_str(), follower.as_str(), ());
        }
    }

    match toposort(&graph, None) {
        Ok(_order) => Ok(()),
        Err(cycle) => {
            let node = cycle.node_id();
            Err(TopobatchError::PlanCycle(format!(
                "cycle detected in plan involving process '{}'",
                node
            )))
        }
    }
}

// src/plan.rs

//! Turning validated plan files into dependency graphs, and rendering the
//! resulting order.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use tracing::{debug, info};

use crate::config::model::ConfigFile;
use crate::errors::{OrderError, Result, TopobatchError};
use crate::graph::{ByFn, DependencyGraph, ProcessId, ResourceId, SortResult};
use crate::types::EquivalenceMode;

/// Payload of one process in a plan graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanStep {
    pub name: String,
    pub cmd: Option<String>,
    pub label: Option<String>,
}

/// One plan file, materialised as a dependency graph.
#[derive(Debug, Clone)]
pub struct Plan {
    source: String,
    graph: DependencyGraph<PlanStep>,
    equivalence: EquivalenceMode,
}

impl Plan {
    /// Build the graph for a validated plan file.
    ///
    /// Processes and resources are created in name order, which makes the
    /// computed batches reproducible across runs.
    pub fn from_config(source: impl Into<String>, cfg: &ConfigFile) -> Result<Self> {
        let mut graph = DependencyGraph::new();

        let mut resources: BTreeMap<&str, ResourceId> = BTreeMap::new();
        for name in cfg.resources().keys() {
            resources.insert(name.as_str(), graph.add_resource(name.clone()));
        }

        let mut processes: BTreeMap<&str, ProcessId> = BTreeMap::new();
        for (name, process) in cfg.processes().iter() {
            let id = graph.add_process(PlanStep {
                name: name.clone(),
                cmd: process.cmd.clone(),
                label: process.label.clone(),
            });
            processes.insert(name.as_str(), id);
        }

        for (name, process) in cfg.processes().iter() {
            let Some(&id) = processes.get(name.as_str()) else {
                continue;
            };
            graph.after_all(id, lookup(&processes, &process.after, name)?)?;
            graph.before_all(id, lookup(&processes, &process.before, name)?)?;
            for resource in process.requires.iter() {
                let resource_id = resources.get(resource.as_str()).copied().ok_or_else(|| {
                    TopobatchError::ConfigError(format!(
                        "process '{}' requires undeclared resource '{}'",
                        name, resource
                    ))
                })?;
                graph.requires(id, resource_id)?;
            }
        }

        let source = source.into();
        debug!(
            source = %source,
            processes = graph.process_count(),
            resources = graph.resource_count(),
            "plan graph built"
        );

        Ok(Self {
            source,
            graph,
            equivalence: cfg.config().equivalence,
        })
    }

    /// Replace the equivalence mode read from the plan file.
    pub fn with_equivalence(mut self, mode: EquivalenceMode) -> Self {
        self.equivalence = mode;
        self
    }

    /// Where this plan came from (usually the file path).
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn graph(&self) -> &DependencyGraph<PlanStep> {
        &self.graph
    }

    pub fn equivalence(&self) -> EquivalenceMode {
        self.equivalence
    }

    /// Append this plan's batches to `existing`, honouring the plan's
    /// equivalence mode.
    pub fn sort_into(&self, existing: SortResult) -> std::result::Result<SortResult, OrderError> {
        match self.equivalence {
            EquivalenceMode::Identity => self.graph.calculate_sort_into(existing),
            EquivalenceMode::Label => self
                .graph
                .calculate_sort_with(existing, &ByFn(same_label)),
        }
    }

    /// Look up the step for a process of this plan.
    pub fn step(&self, process: ProcessId) -> Option<&PlanStep> {
        self.graph.payload(process)
    }
}

fn same_label(a: &PlanStep, b: &PlanStep) -> bool {
    a.label.is_some() && a.label == b.label
}

fn lookup(processes: &BTreeMap<&str, ProcessId>, names: &[String], owner: &str) -> Result<Vec<ProcessId>> {
    names
        .iter()
        .map(|name| {
            processes.get(name.as_str()).copied().ok_or_else(|| {
                TopobatchError::ConfigError(format!(
                    "process '{}' references unknown process '{}'",
                    owner, name
                ))
            })
        })
        .collect()
}

/// Sort every plan in order, chaining their batches into one result.
pub fn schedule(plans: &[Plan]) -> Result<SortResult> {
    let mut result = SortResult::new();
    for plan in plans {
        let before = result.batch_count();
        result = plan.sort_into(result)?;
        info!(
            source = %plan.source(),
            batches = result.batch_count() - before,
            "plan ordered"
        );
    }
    Ok(result)
}

/// Render a chained result.
///
/// Batches are printed as `batch N: a, b, c`, grouped under the source of
/// the plan they came from. With `flat`, one process name per line.
pub fn render(plans: &[Plan], result: &SortResult, flat: bool) -> String {
    let mut out = String::new();

    if flat {
        for process in result.processes() {
            if let Some(step) = find_step(plans, process) {
                let _ = writeln!(out, "{}", step.name);
            }
        }
        return out;
    }

    let mut current_source: Option<&str> = None;
    for (index, batch) in result.iter().enumerate() {
        let Some(plan) = batch
            .iter()
            .next()
            .and_then(|&first| plans.iter().find(|p| p.graph().contains(first)))
        else {
            continue;
        };

        if current_source != Some(plan.source()) {
            let _ = writeln!(out, "# {}", plan.source());
            current_source = Some(plan.source());
        }

        let names: Vec<String> = batch
            .iter()
            .filter_map(|&process| plan.step(process))
            .map(|step| match &step.cmd {
                Some(cmd) => format!("{} ({})", step.name, cmd),
                None => step.name.clone(),
            })
            .collect();
        let _ = writeln!(out, "batch {}: {}", index, names.join(", "));
    }

    out
}

fn find_step(plans: &[Plan], process: ProcessId) -> Option<&PlanStep> {
    plans.iter().find_map(|plan| plan.step(process))
}

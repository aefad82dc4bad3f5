// src/depends_on.rs

//! Ordering values by declared kind-level dependencies.
//!
//! A value announces its own kind and the kinds it depends on. Every value
//! becomes one process; for each declared dependency, every process of the
//! depended-upon kind precedes every process of the dependent kind.
//!
//! When several values of the same kind disagree about their dependencies,
//! only the dependencies common to all of them are kept.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use tracing::debug;

use crate::errors::OrderError;
use crate::graph::{ByIdentity, DependencyGraph, Equivalence, ProcessId, SortResult};

/// Kind-level dependency metadata for a value.
pub trait DependsOn {
    type Kind: Eq + Hash + Clone;

    fn kind(&self) -> Self::Kind;

    /// Kinds that must be ordered before this value's kind.
    fn depends_on(&self) -> Vec<Self::Kind>;
}

/// Fold one declaration into the recorded dependency sets.
///
/// The first sighting of `kind` records `deps` as-is; later sightings narrow
/// the record to its intersection with `deps`.
pub fn merge_declaration<K>(declared: &mut HashMap<K, HashSet<K>>, kind: K, deps: HashSet<K>)
where
    K: Eq + Hash,
{
    declared
        .entry(kind)
        .and_modify(|known| known.retain(|dep| deps.contains(dep)))
        .or_insert(deps);
}

/// Order `values` so that every value comes after the values its kind
/// depends on.
///
/// Values of unrelated kinds keep their input order within a batch.
pub fn topo_sort<T, I>(values: I) -> Result<Vec<T>, OrderError>
where
    T: DependsOn,
    I: IntoIterator<Item = T>,
{
    topo_sort_with(values, &ByIdentity)
}

/// [`topo_sort`] with an equivalence policy over the values.
pub fn topo_sort_with<T, I, E>(values: I, equivalence: &E) -> Result<Vec<T>, OrderError>
where
    T: DependsOn,
    I: IntoIterator<Item = T>,
    E: Equivalence<T> + ?Sized,
{
    let mut graph = DependencyGraph::new();
    let mut by_kind: HashMap<T::Kind, Vec<ProcessId>> = HashMap::new();
    let mut declared: HashMap<T::Kind, HashSet<T::Kind>> = HashMap::new();

    for value in values {
        let kind = value.kind();
        let deps: HashSet<T::Kind> = value.depends_on().into_iter().collect();
        merge_declaration(&mut declared, kind.clone(), deps);

        let process = graph.add_process(value);
        by_kind.entry(kind).or_default().push(process);
    }

    for (kind, deps) in &declared {
        let Some(dependents) = by_kind.get(kind) else {
            continue;
        };
        for dep in deps {
            if let Some(providers) = by_kind.get(dep) {
                graph.group_before(providers.iter().copied(), dependents.iter().copied())?;
            }
        }
    }

    debug!(
        values = graph.process_count(),
        kinds = by_kind.len(),
        "kind dependencies wired"
    );

    let order = graph.calculate_sort_with(SortResult::new(), equivalence)?;

    let mut slots: Vec<Option<T>> = graph.into_payloads().into_iter().map(Some).collect();
    Ok(order
        .processes()
        .filter_map(|process| slots[process.index()].take())
        .collect())
}

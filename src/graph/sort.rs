// src/graph/sort.rs

//! The ordering engine.
//!
//! Two nested stages, repeated until every process is placed:
//!
//! 1. **Level extraction** (Kahn's algorithm): the unplaced processes with
//!    no unplaced predecessor form the next level. An empty level while
//!    processes remain means the constraints contain a cycle.
//! 2. **Resource partition**: a level whose members contend for a resource
//!    is split into conflict-free batches with a greedy first-fit into the
//!    smallest eligible batch. The split is valid but not guaranteed to use
//!    the fewest possible batches.
//!
//! Level members are visited in process creation order, so a given graph
//! always yields the same result.

use std::collections::BTreeSet;

use tracing::{debug, trace};

use crate::errors::OrderError;
use crate::graph::DependencyGraph;
use crate::graph::equivalence::{ByIdentity, Equivalence};
use crate::graph::result::{Batch, SortResult};

impl<T> DependencyGraph<T> {
    /// Compute the batched order of this graph.
    ///
    /// Fails with [`OrderError::CyclicDependency`] if the precedence
    /// constraints cannot be satisfied.
    pub fn calculate_sort(&self) -> Result<SortResult, OrderError> {
        self.calculate_sort_into(SortResult::new())
    }

    /// Compute the batched order of this graph and append it after the
    /// batches already in `existing`.
    ///
    /// This is how independently built graphs are chained into one plan. On
    /// failure `existing` is dropped; no partial result is handed back.
    pub fn calculate_sort_into(&self, existing: SortResult) -> Result<SortResult, OrderError> {
        self.calculate_sort_with(existing, &ByIdentity)
    }

    /// Like [`calculate_sort_into`](Self::calculate_sort_into), with a
    /// caller-supplied equivalence policy for predecessor membership tests.
    pub fn calculate_sort_with<E>(&self, mut existing: SortResult, equivalence: &E) -> Result<SortResult, OrderError>
    where
        E: Equivalence<T> + ?Sized,
    {
        let levels = if equivalence.is_identity() {
            self.kahn_levels()?
        } else {
            self.equivalence_levels(equivalence)?
        };

        let mut batches = Vec::new();
        for (depth, level) in levels.into_iter().enumerate() {
            let parts = self.partition(level);
            debug!(
                graph = %self.id,
                level = depth,
                batches = parts.len(),
                "level partitioned"
            );
            for part in parts {
                let members = part
                    .into_iter()
                    .map(|index| self.process_handle(index))
                    .collect();
                batches.push(Batch::new(members));
            }
        }

        debug!(
            graph = %self.id,
            processes = self.process_count(),
            batches = batches.len(),
            "sort computed"
        );
        existing.append(batches);
        Ok(existing)
    }

    /// Level extraction by in-degree counting: every edge is visited once.
    fn kahn_levels(&self) -> Result<Vec<Vec<usize>>, OrderError> {
        let total = self.payloads.len();
        let mut pending: Vec<usize> = self.predecessors.iter().map(BTreeSet::len).collect();
        let mut frontier: Vec<usize> = (0..total).filter(|&p| pending[p] == 0).collect();

        let mut levels = Vec::new();
        let mut placed = 0;

        while placed < total {
            if frontier.is_empty() {
                return Err(self.cycle(total - placed));
            }
            frontier.sort_unstable();

            let mut next = Vec::new();
            for &process in &frontier {
                for &follower in &self.followers[process] {
                    pending[follower] -= 1;
                    if pending[follower] == 0 {
                        next.push(follower);
                    }
                }
            }

            placed += frontier.len();
            debug!(graph = %self.id, level = levels.len(), size = frontier.len(), "level extracted");
            levels.push(std::mem::replace(&mut frontier, next));
        }

        Ok(levels)
    }

    /// Level extraction where a predecessor counts as unplaced while any
    /// process equivalent to it is unplaced.
    fn equivalence_levels<E>(&self, equivalence: &E) -> Result<Vec<Vec<usize>>, OrderError>
    where
        E: Equivalence<T> + ?Sized,
    {
        let mut unplaced: BTreeSet<usize> = (0..self.payloads.len()).collect();
        let mut levels = Vec::new();

        while !unplaced.is_empty() {
            let level: Vec<usize> = unplaced
                .iter()
                .copied()
                .filter(|&process| {
                    !self.predecessors[process]
                        .iter()
                        .any(|&pred| self.is_unplaced(pred, &unplaced, equivalence))
                })
                .collect();

            if level.is_empty() {
                return Err(self.cycle(unplaced.len()));
            }

            for process in &level {
                unplaced.remove(process);
            }
            debug!(graph = %self.id, level = levels.len(), size = level.len(), "level extracted");
            levels.push(level);
        }

        Ok(levels)
    }

    fn is_unplaced<E>(&self, process: usize, unplaced: &BTreeSet<usize>, equivalence: &E) -> bool
    where
        E: Equivalence<T> + ?Sized,
    {
        unplaced.contains(&process)
            || unplaced
                .iter()
                .any(|&other| equivalence.equivalent(&self.payloads[process], &self.payloads[other]))
    }

    /// Split one level into batches that share no resource.
    fn partition(&self, level: Vec<usize>) -> Vec<Vec<usize>> {
        let uses_resources = level.iter().any(|&p| !self.requirements[p].is_empty());
        if self.resource_names.is_empty() || !uses_resources {
            return vec![level];
        }

        let mut batches: Vec<Vec<usize>> = Vec::new();
        // Union of the requirements of each batch's members.
        let mut held: Vec<BTreeSet<usize>> = Vec::new();

        for process in level {
            let needs = &self.requirements[process];

            // min_by_key keeps the first of equal minima: earliest batch wins.
            let target = (0..batches.len())
                .filter(|&b| held[b].is_disjoint(needs))
                .min_by_key(|&b| batches[b].len());

            match target {
                Some(b) => {
                    batches[b].push(process);
                    held[b].extend(needs.iter().copied());
                    trace!(graph = %self.id, process, batch = b, "process placed in existing batch");
                }
                None => {
                    trace!(graph = %self.id, process, batch = batches.len(), "process opens new batch");
                    batches.push(vec![process]);
                    held.push(needs.clone());
                }
            }
        }

        batches
    }

    fn cycle(&self, remaining: usize) -> OrderError {
        debug!(graph = %self.id, remaining, "cannot order this set of processes");
        OrderError::CyclicDependency { remaining }
    }
}

// src/graph/process.rs

//! Precedence and requirement operations on processes.
//!
//! Edges are always stored as `predecessor -> follower` in both the
//! predecessor's follower set and the follower's predecessor set. The
//! `after` family swaps operands and goes through the same `link`.

use std::collections::BTreeSet;

use tracing::trace;

use crate::errors::OrderError;
use crate::graph::DependencyGraph;
use crate::graph::handle::{ProcessId, ResourceId};

impl<T> DependencyGraph<T> {
    /// Declare that `process` must be placed before `follower`.
    ///
    /// Re-declaring an existing edge is a no-op. Returns `follower` so calls
    /// can be chained: `g.before(a, b)` then `g.before(b, c)`.
    pub fn before(&mut self, process: ProcessId, follower: ProcessId) -> Result<ProcessId, OrderError> {
        self.check_processes(process, follower)?;
        self.link(process.index(), follower.index());
        Ok(follower)
    }

    /// Declare that `process` must be placed before each of `followers`.
    ///
    /// Every follower is checked before any edge is added, so a mismatch
    /// leaves the graph untouched. Returns the followers.
    pub fn before_all<I>(&mut self, process: ProcessId, followers: I) -> Result<Vec<ProcessId>, OrderError>
    where
        I: IntoIterator<Item = ProcessId>,
    {
        let followers: Vec<ProcessId> = followers.into_iter().collect();
        for &follower in &followers {
            self.check_processes(process, follower)?;
        }
        for &follower in &followers {
            self.link(process.index(), follower.index());
        }
        Ok(followers)
    }

    /// Declare that `process` must be placed after `predecessor`.
    ///
    /// Returns `predecessor`.
    pub fn after(&mut self, process: ProcessId, predecessor: ProcessId) -> Result<ProcessId, OrderError> {
        self.before(predecessor, process)?;
        Ok(predecessor)
    }

    /// Declare that `process` must be placed after each of `predecessors`.
    ///
    /// Returns the predecessors.
    pub fn after_all<I>(&mut self, process: ProcessId, predecessors: I) -> Result<Vec<ProcessId>, OrderError>
    where
        I: IntoIterator<Item = ProcessId>,
    {
        let predecessors: Vec<ProcessId> = predecessors.into_iter().collect();
        for &predecessor in &predecessors {
            self.check_processes(process, predecessor)?;
        }
        for &predecessor in &predecessors {
            self.link(predecessor.index(), process.index());
        }
        Ok(predecessors)
    }

    /// Declare that `process` needs exclusive use of `resource`.
    pub fn requires(&mut self, process: ProcessId, resource: ResourceId) -> Result<(), OrderError> {
        self.check_usage(resource, process)?;
        self.attach(resource.index(), process.index());
        Ok(())
    }

    /// Direct predecessors of `process`, in creation order.
    pub fn predecessors(&self, process: ProcessId) -> impl Iterator<Item = ProcessId> + '_ {
        self.relation(&self.predecessors, process)
            .map(move |index| self.process_handle(index))
    }

    /// Direct followers of `process`, in creation order.
    pub fn followers(&self, process: ProcessId) -> impl Iterator<Item = ProcessId> + '_ {
        self.relation(&self.followers, process)
            .map(move |index| self.process_handle(index))
    }

    /// Resources required by `process`.
    pub fn requirements(&self, process: ProcessId) -> impl Iterator<Item = ResourceId> + '_ {
        self.relation(&self.requirements, process)
            .map(move |index| self.resource_handle(index))
    }

    fn relation<'a>(
        &'a self,
        sets: &'a [BTreeSet<usize>],
        process: ProcessId,
    ) -> impl Iterator<Item = usize> + 'a {
        let set = if self.contains(process) {
            sets.get(process.index())
        } else {
            None
        };
        set.into_iter().flat_map(|s| s.iter().copied())
    }

    fn link(&mut self, predecessor: usize, follower: usize) {
        if self.followers[predecessor].insert(follower) {
            self.predecessors[follower].insert(predecessor);
            trace!(graph = %self.id, predecessor, follower, "edge added");
        }
    }

    /// Record mutual usage between a resource and a process.
    pub(crate) fn attach(&mut self, resource: usize, process: usize) {
        if self.requirements[process].insert(resource) {
            self.users[resource].insert(process);
            trace!(graph = %self.id, resource, process, "requirement added");
        }
    }
}

// src/graph/combinators.rs

//! Group ordering operations.
//!
//! "Everything in this group precedes everything in that group", built on
//! the pairwise edge primitive. Each call returns the other side unchanged
//! so chains read left to right:
//!
//! ```
//! use topobatch::graph::DependencyGraph;
//!
//! let mut g = DependencyGraph::new();
//! let a = g.add_process("A");
//! let b1 = g.add_process("B1");
//! let b2 = g.add_process("B2");
//! let c = g.add_process("C");
//!
//! g.chain([a]).then([b1, b2])?.then([c])?;
//!
//! let sort = g.calculate_sort()?;
//! assert_eq!(sort.batch_count(), 3);
//! # Ok::<(), topobatch::errors::OrderError>(())
//! ```

use crate::errors::OrderError;
use crate::graph::DependencyGraph;
use crate::graph::handle::ProcessId;

impl<T> DependencyGraph<T> {
    /// Every process in `predecessors` must be placed before every process
    /// in `followers`. Returns `followers`.
    ///
    /// All pairs are checked before any edge is added.
    pub fn group_before<P, F>(&mut self, predecessors: P, followers: F) -> Result<Vec<ProcessId>, OrderError>
    where
        P: IntoIterator<Item = ProcessId>,
        F: IntoIterator<Item = ProcessId>,
    {
        let predecessors: Vec<ProcessId> = predecessors.into_iter().collect();
        let followers: Vec<ProcessId> = followers.into_iter().collect();

        for &predecessor in &predecessors {
            for &follower in &followers {
                self.check_processes(predecessor, follower)?;
            }
        }
        for &follower in &followers {
            self.after_all(follower, predecessors.iter().copied())?;
        }
        Ok(followers)
    }

    /// Every process in `followers` must be placed after every process in
    /// `predecessors`. Returns `predecessors`.
    pub fn group_after<F, P>(&mut self, followers: F, predecessors: P) -> Result<Vec<ProcessId>, OrderError>
    where
        F: IntoIterator<Item = ProcessId>,
        P: IntoIterator<Item = ProcessId>,
    {
        let followers: Vec<ProcessId> = followers.into_iter().collect();
        let predecessors: Vec<ProcessId> = predecessors.into_iter().collect();
        self.group_before(predecessors.iter().copied(), followers)?;
        Ok(predecessors)
    }

    /// Start a fluent precedence chain at `head`.
    pub fn chain<I>(&mut self, head: I) -> Chain<'_, T>
    where
        I: IntoIterator<Item = ProcessId>,
    {
        Chain {
            graph: self,
            tail: head.into_iter().collect(),
        }
    }
}

/// A precedence chain under construction.
///
/// Each [`then`](Chain::then) makes the current tail precede the next group,
/// which becomes the new tail.
#[derive(Debug)]
pub struct Chain<'g, T> {
    graph: &'g mut DependencyGraph<T>,
    tail: Vec<ProcessId>,
}

impl<'g, T> Chain<'g, T> {
    pub fn then<I>(self, next: I) -> Result<Self, OrderError>
    where
        I: IntoIterator<Item = ProcessId>,
    {
        let Chain { graph, tail } = self;
        let tail = graph.group_before(tail, next)?;
        Ok(Chain { graph, tail })
    }

    /// The group the next `then` will attach to.
    pub fn tail(&self) -> &[ProcessId] {
        &self.tail
    }

    pub fn finish(self) -> Vec<ProcessId> {
        self.tail
    }
}

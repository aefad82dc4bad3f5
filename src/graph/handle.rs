// src/graph/handle.rs

//! Stable handles into a [`DependencyGraph`](super::DependencyGraph) arena.
//!
//! A handle is a plain `Copy` value: the id of the graph it was created by
//! plus an index into that graph's storage. Handles never own data, so both
//! sides of a relationship can be updated through the graph without any
//! cross-owned mutation.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_GRAPH_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of one dependency graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GraphId(u64);

impl GraphId {
    pub(crate) fn fresh() -> Self {
        Self(NEXT_GRAPH_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for GraphId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "graph {}", self.0)
    }
}

/// Handle to a process registered in a graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProcessId {
    graph: GraphId,
    index: usize,
}

impl ProcessId {
    pub(crate) fn new(graph: GraphId, index: usize) -> Self {
        Self { graph, index }
    }

    /// The graph this process belongs to.
    pub fn graph(&self) -> GraphId {
        self.graph
    }

    /// Position of the process in its graph's creation order.
    pub fn index(&self) -> usize {
        self.index
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "process #{} ({})", self.index, self.graph)
    }
}

/// Handle to a resource registered in a graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceId {
    graph: GraphId,
    index: usize,
}

impl ResourceId {
    pub(crate) fn new(graph: GraphId, index: usize) -> Self {
        Self { graph, index }
    }

    pub fn graph(&self) -> GraphId {
        self.graph
    }

    pub fn index(&self) -> usize {
        self.index
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "resource #{} ({})", self.index, self.graph)
    }
}

/// Any entity that can appear in a constraint, used for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handle {
    Graph(GraphId),
    Process(ProcessId),
    Resource(ResourceId),
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Handle::Graph(id) => fmt::Display::fmt(id, f),
            Handle::Process(id) => fmt::Display::fmt(id, f),
            Handle::Resource(id) => fmt::Display::fmt(id, f),
        }
    }
}

impl From<GraphId> for Handle {
    fn from(id: GraphId) -> Self {
        Handle::Graph(id)
    }
}

impl From<ProcessId> for Handle {
    fn from(id: ProcessId) -> Self {
        Handle::Process(id)
    }
}

impl From<ResourceId> for Handle {
    fn from(id: ResourceId) -> Self {
        Handle::Resource(id)
    }
}

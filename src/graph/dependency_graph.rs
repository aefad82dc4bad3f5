// src/graph/dependency_graph.rs

use std::collections::BTreeSet;

use tracing::trace;

use crate::errors::OrderError;
use crate::graph::handle::{GraphId, ProcessId, ResourceId};

/// A graph of processes and resources from which a batched order can be
/// computed.
///
/// Storage is an arena: payloads and resource names live in vectors
/// addressed by handle index, and every relation (predecessors, followers,
/// requirements, users) is an index set owned by the graph. Adding an edge
/// therefore updates both endpoints in one place.
///
/// Constraint operations live next to the entity they describe:
/// precedence in [`process`](super::process), resource usage in
/// [`resource`](super::resource), group operations in
/// [`combinators`](super::combinators) and the ordering algorithm in
/// [`sort`](super::sort).
#[derive(Debug)]
pub struct DependencyGraph<T> {
    pub(crate) id: GraphId,

    /// Process payloads, indexed by `ProcessId::index`.
    pub(crate) payloads: Vec<T>,
    /// For each process: processes that must be placed before it.
    pub(crate) predecessors: Vec<BTreeSet<usize>>,
    /// For each process: processes that must be placed after it.
    pub(crate) followers: Vec<BTreeSet<usize>>,
    /// For each process: resources it requires.
    pub(crate) requirements: Vec<BTreeSet<usize>>,

    /// Resource display names, indexed by `ResourceId::index`.
    pub(crate) resource_names: Vec<String>,
    /// For each resource: processes that use it.
    pub(crate) users: Vec<BTreeSet<usize>>,
}

impl<T> DependencyGraph<T> {
    /// Create an empty graph with a fresh identity.
    pub fn new() -> Self {
        Self {
            id: GraphId::fresh(),
            payloads: Vec::new(),
            predecessors: Vec::new(),
            followers: Vec::new(),
            requirements: Vec::new(),
            resource_names: Vec::new(),
            users: Vec::new(),
        }
    }

    pub fn id(&self) -> GraphId {
        self.id
    }

    /// Register a new process carrying `payload`.
    ///
    /// This is the only way to obtain a [`ProcessId`]; the process is a
    /// member of this graph from the moment it is created.
    pub fn add_process(&mut self, payload: T) -> ProcessId {
        let index = self.payloads.len();
        self.payloads.push(payload);
        self.predecessors.push(BTreeSet::new());
        self.followers.push(BTreeSet::new());
        self.requirements.push(BTreeSet::new());

        trace!(graph = %self.id, index, "process registered");
        ProcessId::new(self.id, index)
    }

    /// Register a new mutual-exclusion resource.
    pub fn add_resource(&mut self, name: impl Into<String>) -> ResourceId {
        let index = self.resource_names.len();
        let name = name.into();
        trace!(graph = %self.id, index, name = %name, "resource registered");

        self.resource_names.push(name);
        self.users.push(BTreeSet::new());
        ResourceId::new(self.id, index)
    }

    pub fn process_count(&self) -> usize {
        self.payloads.len()
    }

    pub fn resource_count(&self) -> usize {
        self.resource_names.len()
    }

    /// All processes in creation order.
    pub fn processes(&self) -> impl Iterator<Item = ProcessId> + '_ {
        (0..self.payloads.len()).map(|index| ProcessId::new(self.id, index))
    }

    /// All resources in creation order.
    pub fn resources(&self) -> impl Iterator<Item = ResourceId> + '_ {
        (0..self.resource_names.len()).map(|index| ResourceId::new(self.id, index))
    }

    /// Whether `process` was created by this graph.
    pub fn contains(&self, process: ProcessId) -> bool {
        process.graph() == self.id && process.index() < self.payloads.len()
    }

    /// Payload of a process, or `None` for a handle from another graph.
    pub fn payload(&self, process: ProcessId) -> Option<&T> {
        if process.graph() != self.id {
            return None;
        }
        self.payloads.get(process.index())
    }

    /// Mutable access to a payload. Edges are unaffected.
    pub fn payload_mut(&mut self, process: ProcessId) -> Option<&mut T> {
        if process.graph() != self.id {
            return None;
        }
        self.payloads.get_mut(process.index())
    }

    /// Display name of a resource, or `None` for a foreign handle.
    pub fn resource_name(&self, resource: ResourceId) -> Option<&str> {
        if resource.graph() != self.id {
            return None;
        }
        self.resource_names.get(resource.index()).map(String::as_str)
    }

    /// Consume the graph and return every payload in creation order.
    pub fn into_payloads(self) -> Vec<T> {
        self.payloads
    }

    pub(crate) fn process_handle(&self, index: usize) -> ProcessId {
        ProcessId::new(self.id, index)
    }

    pub(crate) fn resource_handle(&self, index: usize) -> ResourceId {
        ResourceId::new(self.id, index)
    }

    /// Both processes must belong to this graph.
    pub(crate) fn check_processes(&self, a: ProcessId, b: ProcessId) -> Result<(), OrderError> {
        if !self.contains(a) {
            return Err(OrderError::mismatch(a, self.id));
        }
        if !self.contains(b) {
            return Err(OrderError::mismatch(b, a));
        }
        Ok(())
    }

    /// The resource and the process must belong to this graph.
    pub(crate) fn check_usage(&self, resource: ResourceId, process: ProcessId) -> Result<(), OrderError> {
        if resource.graph() != self.id || resource.index() >= self.resource_names.len() {
            return Err(OrderError::mismatch(resource, self.id));
        }
        if !self.contains(process) {
            return Err(OrderError::mismatch(process, resource));
        }
        Ok(())
    }
}

/// A clone is a separate graph with its own identity. Handles from the
/// original are foreign to it, and the reverse.
impl<T: Clone> Clone for DependencyGraph<T> {
    fn clone(&self) -> Self {
        Self {
            id: GraphId::fresh(),
            payloads: self.payloads.clone(),
            predecessors: self.predecessors.clone(),
            followers: self.followers.clone(),
            requirements: self.requirements.clone(),
            resource_names: self.resource_names.clone(),
            users: self.users.clone(),
        }
    }
}

impl<T> Default for DependencyGraph<T> {
    fn default() -> Self {
        Self::new()
    }
}

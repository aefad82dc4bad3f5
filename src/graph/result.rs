// src/graph/result.rs

use std::slice;

use crate::errors::OrderError;
use crate::graph::DependencyGraph;
use crate::graph::handle::ProcessId;

/// A set of processes that may run in any order relative to each other and
/// share no resource.
///
/// Member order is the order the partition step produced; it is stable for
/// one computation but carries no meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Batch {
    members: Vec<ProcessId>,
}

impl Batch {
    pub(crate) fn new(members: Vec<ProcessId>) -> Self {
        Self { members }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, process: ProcessId) -> bool {
        self.members.contains(&process)
    }

    pub fn iter(&self) -> slice::Iter<'_, ProcessId> {
        self.members.iter()
    }

    pub fn as_slice(&self) -> &[ProcessId] {
        &self.members
    }
}

impl<'a> IntoIterator for &'a Batch {
    type Item = &'a ProcessId;
    type IntoIter = slice::Iter<'a, ProcessId>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

/// Ordered sequence of batches produced by one or more graph computations.
///
/// The only mutation is appending the batches of a whole computation, see
/// [`DependencyGraph::calculate_sort_into`]. Iterating the flattened
/// [`processes`](SortResult::processes) yields one total order consistent
/// with every constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortResult {
    batches: Vec<Batch>,
}

impl SortResult {
    /// An empty result, ready to receive the batches of a first graph.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn batches(&self) -> &[Batch] {
        &self.batches
    }

    /// Batches in append order.
    pub fn iter(&self) -> slice::Iter<'_, Batch> {
        self.batches.iter()
    }

    /// Every process, batch by batch.
    pub fn processes(&self) -> impl Iterator<Item = ProcessId> + '_ {
        self.batches.iter().flat_map(|batch| batch.iter().copied())
    }

    /// Payloads of the processes that belong to `graph`, in flattened order.
    ///
    /// Processes appended from other graphs are skipped.
    pub fn payloads<'g, T>(&self, graph: &'g DependencyGraph<T>) -> impl Iterator<Item = &'g T> {
        self.processes()
            .filter_map(move |process| graph.payload(process))
    }

    pub fn batch_count(&self) -> usize {
        self.batches.len()
    }

    pub fn process_count(&self) -> usize {
        self.batches.iter().map(Batch::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }

    /// Index of the batch holding `process`, if it was placed.
    pub fn batch_index_of(&self, process: ProcessId) -> Option<usize> {
        self.batches.iter().position(|batch| batch.contains(process))
    }

    pub fn into_processes(self) -> Vec<ProcessId> {
        self.batches
            .into_iter()
            .flat_map(|batch| batch.members)
            .collect()
    }

    pub(crate) fn append(&mut self, batches: Vec<Batch>) {
        self.batches.extend(batches);
    }
}

impl<'a> IntoIterator for &'a SortResult {
    type Item = &'a Batch;
    type IntoIter = slice::Iter<'a, Batch>;

    fn into_iter(self) -> Self::IntoIter {
        self.batches.iter()
    }
}

impl<T> TryFrom<&DependencyGraph<T>> for SortResult {
    type Error = OrderError;

    fn try_from(graph: &DependencyGraph<T>) -> Result<Self, Self::Error> {
        graph.calculate_sort()
    }
}

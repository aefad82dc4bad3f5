// src/graph/mod.rs

//! Dependency graph and ordering engine.
//!
//! - [`dependency_graph`] owns the arena of processes and resources.
//! - [`process`] and [`resource`] declare precedence and resource usage.
//! - [`combinators`] offers group operations and fluent chains.
//! - [`sort`] computes the batched order.
//! - [`result`] holds the ordered batches.
//! - [`equivalence`] lets callers treat equal payloads as the same node.

pub mod combinators;
pub mod dependency_graph;
pub mod equivalence;
pub mod handle;
pub mod process;
pub mod resource;
pub mod result;
pub mod sort;

pub use combinators::Chain;
pub use dependency_graph::DependencyGraph;
pub use equivalence::{ByFn, ByIdentity, ByKey, ByValue, Equivalence};
pub use handle::{GraphId, Handle, ProcessId, ResourceId};
pub use result::{Batch, SortResult};

// src/graph/resource.rs

use crate::errors::OrderError;
use crate::graph::DependencyGraph;
use crate::graph::handle::{ProcessId, ResourceId};

impl<T> DependencyGraph<T> {
    /// Declare that `resource` is used by `process`.
    ///
    /// Same relation as [`DependencyGraph::requires`], seen from the
    /// resource side.
    pub fn used_by(&mut self, resource: ResourceId, process: ProcessId) -> Result<(), OrderError> {
        self.requires(process, resource)
    }

    /// Declare that `resource` is used by every process in `processes`.
    ///
    /// All operands are checked first; on mismatch nothing is recorded.
    pub fn used_by_all<I>(&mut self, resource: ResourceId, processes: I) -> Result<(), OrderError>
    where
        I: IntoIterator<Item = ProcessId>,
    {
        let processes: Vec<ProcessId> = processes.into_iter().collect();
        for &process in &processes {
            self.check_usage(resource, process)?;
        }
        for process in processes {
            self.attach(resource.index(), process.index());
        }
        Ok(())
    }

    /// Processes that use `resource`, in creation order.
    pub fn users(&self, resource: ResourceId) -> impl Iterator<Item = ProcessId> + '_ {
        let set = if self.resource_name(resource).is_some() {
            self.users.get(resource.index())
        } else {
            None
        };
        set.into_iter()
            .flat_map(|s| s.iter().copied())
            .map(move |index| self.process_handle(index))
    }
}

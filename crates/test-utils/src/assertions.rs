//! Soundness checks shared by the ordering tests.

use std::collections::HashSet;

use topobatch::graph::{DependencyGraph, SortResult};

/// Every edge `p -> q` puts `p` in a strictly earlier batch than `q`.
pub fn assert_precedence<T>(graph: &DependencyGraph<T>, sort: &SortResult) {
    for process in graph.processes() {
        let own = sort
            .batch_index_of(process)
            .unwrap_or_else(|| panic!("{process} was not placed"));
        for follower in graph.followers(process) {
            let theirs = sort
                .batch_index_of(follower)
                .unwrap_or_else(|| panic!("{follower} was not placed"));
            assert!(
                own < theirs,
                "{process} (batch {own}) must precede {follower} (batch {theirs})"
            );
        }
    }
}

/// No batch holds two processes that share a resource.
pub fn assert_resource_sound<T>(graph: &DependencyGraph<T>, sort: &SortResult) {
    for (index, batch) in sort.iter().enumerate() {
        let mut held = HashSet::new();
        for &process in batch {
            for resource in graph.requirements(process) {
                assert!(
                    held.insert(resource),
                    "batch {index} uses {resource} more than once"
                );
            }
        }
    }
}

/// Every process of `graph` appears exactly once.
pub fn assert_total<T>(graph: &DependencyGraph<T>, sort: &SortResult) {
    let placed: Vec<_> = sort.processes().collect();
    let unique: HashSet<_> = placed.iter().copied().collect();
    assert_eq!(placed.len(), unique.len(), "a process was placed twice");
    assert_eq!(placed.len(), graph.process_count(), "not every process was placed");
    for process in graph.processes() {
        assert!(unique.contains(&process), "{process} missing from result");
    }
}

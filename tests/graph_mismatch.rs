use topobatch::errors::OrderError;
use topobatch::graph::{DependencyGraph, Handle};

#[test]
fn before_across_graphs_fails_without_side_effects() {
    let mut g1 = DependencyGraph::new();
    let mut g2 = DependencyGraph::new();
    let a = g1.add_process("A");
    let b = g2.add_process("B");

    let err = g1.before(a, b).unwrap_err();
    assert_eq!(
        err,
        OrderError::GraphMismatch {
            left: Handle::Process(b),
            right: Handle::Process(a),
        }
    );
    assert!(err.to_string().contains("is not associated with the same graph"));

    assert_eq!(g1.followers(a).count(), 0);
    assert_eq!(g2.predecessors(b).count(), 0);
}

#[test]
fn operating_on_a_foreign_graph_fails() {
    let mut g1 = DependencyGraph::new();
    let mut g2 = DependencyGraph::new();
    let a = g1.add_process("A");
    let b = g1.add_process("B");
    g2.add_process("X");

    let err = g2.before(a, b).unwrap_err();
    assert!(matches!(
        err,
        OrderError::GraphMismatch { left: Handle::Process(p), right: Handle::Graph(id) }
            if p == a && id == g2.id()
    ));
}

#[test]
fn after_across_graphs_fails() {
    let mut g1 = DependencyGraph::new();
    let mut g2 = DependencyGraph::new();
    let a = g1.add_process(1);
    let b = g2.add_process(2);

    assert!(matches!(g1.after(a, b), Err(OrderError::GraphMismatch { .. })));
}

#[test]
fn group_declaration_is_all_or_nothing() {
    let mut g1 = DependencyGraph::new();
    let mut g2 = DependencyGraph::new();
    let a = g1.add_process("A");
    let b = g1.add_process("B");
    let foreign = g2.add_process("X");

    assert!(g1.before_all(a, [b, foreign]).is_err());
    assert_eq!(g1.followers(a).count(), 0);
    assert_eq!(g1.predecessors(b).count(), 0);

    assert!(g1.group_before([a], [b, foreign]).is_err());
    assert_eq!(g1.followers(a).count(), 0);

    assert!(g1.chain([a]).then([b, foreign]).is_err());
    assert_eq!(g1.followers(a).count(), 0);
}

#[test]
fn requirements_across_graphs_fail() {
    let mut g1 = DependencyGraph::new();
    let mut g2: DependencyGraph<&str> = DependencyGraph::new();
    let a = g1.add_process("A");
    let b = g1.add_process("B");
    let res = g2.add_resource("R");

    assert!(matches!(
        g1.requires(a, res),
        Err(OrderError::GraphMismatch { left: Handle::Resource(r), .. }) if r == res
    ));
    assert!(g2.used_by(res, a).is_err());
    assert!(g2.used_by_all(res, [a, b]).is_err());

    assert_eq!(g2.users(res).count(), 0);
    assert_eq!(g1.requirements(a).count(), 0);
}

#[test]
fn used_by_all_checks_every_process_first() {
    let mut g1 = DependencyGraph::new();
    let mut g2 = DependencyGraph::new();
    let res = g1.add_resource("R");
    let a = g1.add_process("A");
    let foreign = g2.add_process("X");

    assert!(g1.used_by_all(res, [a, foreign]).is_err());
    assert_eq!(g1.users(res).count(), 0);
    assert_eq!(g1.requirements(a).count(), 0);
}

#[test]
fn foreign_handles_have_no_payload() {
    let mut g1 = DependencyGraph::new();
    let mut g2 = DependencyGraph::new();
    let a = g1.add_process("A");
    g2.add_process("X");

    assert_eq!(g1.payload(a), Some(&"A"));
    assert_eq!(g2.payload(a), None);
    assert!(!g2.contains(a));
    assert_ne!(g1.id(), g2.id());
}

#[test]
fn cloned_graph_is_a_different_graph() {
    let mut g = DependencyGraph::new();
    let a = g.add_process("A");

    let mut copy = g.clone();
    let in_copy = copy.add_process("only-in-copy");
    let in_original = g.add_process("only-in-original");

    assert_ne!(copy.id(), g.id());
    assert_ne!(in_copy, in_original);
    assert_eq!(in_copy.index(), in_original.index());

    // Handles from the original are foreign to the clone, and the reverse.
    assert!(matches!(g.before(a, in_copy), Err(OrderError::GraphMismatch { .. })));
    assert!(matches!(copy.before(a, in_copy), Err(OrderError::GraphMismatch { .. })));
    assert_eq!(g.followers(a).count(), 0);
    assert_eq!(copy.payload(a), None);

    // The clone still carries the original's content under its own id.
    let copied_a = copy.processes().next().unwrap();
    assert_eq!(copy.payload(copied_a), Some(&"A"));
    copy.before(copied_a, in_copy).unwrap();
    assert_eq!(copy.calculate_sort().unwrap().batch_count(), 2);
    assert_eq!(g.calculate_sort().unwrap().batch_count(), 1);
}

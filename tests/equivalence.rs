use topobatch::errors::OrderError;
use topobatch::graph::{ByFn, ByIdentity, ByKey, ByValue, DependencyGraph, Equivalence, SortResult};
use topobatch_test_utils::assertions::{assert_precedence, assert_total};

/// a("k") -> b and z -> c("k"). Under identity b can run alongside c; when
/// equal payloads are interchangeable, b must also wait for c.
fn twin_graph() -> (DependencyGraph<&'static str>, [topobatch::graph::ProcessId; 4]) {
    let mut g = DependencyGraph::new();
    let a = g.add_process("k");
    let b = g.add_process("b");
    let z = g.add_process("z");
    let c = g.add_process("k");
    g.before(a, b).unwrap();
    g.before(z, c).unwrap();
    (g, [a, b, z, c])
}

#[test]
fn identity_ignores_equal_payloads() {
    let (g, [a, b, z, c]) = twin_graph();

    let sort = g.calculate_sort_with(SortResult::new(), &ByIdentity).unwrap();

    assert_eq!(sort.batch_count(), 2);
    assert_eq!(sort.batches()[0].as_slice(), &[a, z]);
    assert_eq!(sort.batches()[1].as_slice(), &[b, c]);
    assert_eq!(sort, g.calculate_sort().unwrap());
}

#[test]
fn value_equivalence_makes_twins_block_followers() {
    let (g, [a, b, z, c]) = twin_graph();

    let sort = g.calculate_sort_with(SortResult::new(), &ByValue).unwrap();

    assert_eq!(sort.batch_count(), 3);
    assert_eq!(sort.batches()[0].as_slice(), &[a, z]);
    assert_eq!(sort.batches()[1].as_slice(), &[c]);
    assert_eq!(sort.batches()[2].as_slice(), &[b]);
    assert_precedence(&g, &sort);
    assert_total(&g, &sort);
}

#[test]
fn equivalence_can_turn_a_chain_into_a_cycle() {
    // a -> b -> a2 with a == a2: b waits for a2, a2 waits for b.
    let mut g = DependencyGraph::new();
    let a = g.add_process("a");
    let b = g.add_process("b");
    let a2 = g.add_process("a");
    g.chain([a]).then([b]).unwrap().then([a2]).unwrap();

    assert!(g.calculate_sort().is_ok());
    assert_eq!(
        g.calculate_sort_with(SortResult::new(), &ByValue),
        Err(OrderError::CyclicDependency { remaining: 2 })
    );
}

#[test]
fn key_and_predicate_policies() {
    let (g, _) = twin_graph();

    let by_key = g
        .calculate_sort_with(SortResult::new(), &ByKey(|s: &&str| s.to_uppercase()))
        .unwrap();
    let by_value = g.calculate_sort_with(SortResult::new(), &ByValue).unwrap();
    assert_eq!(by_key, by_value);

    let never = g
        .calculate_sort_with(SortResult::new(), &ByFn(|_: &&str, _: &&str| false))
        .unwrap();
    assert_eq!(never, g.calculate_sort().unwrap());
}

#[test]
fn policies_report_identity() {
    assert!(Equivalence::<str>::is_identity(&ByIdentity));
    assert!(!Equivalence::<str>::is_identity(&ByValue));
    assert!(ByValue.equivalent("x", "x"));
    assert!(!ByIdentity.equivalent("x", "x"));
}

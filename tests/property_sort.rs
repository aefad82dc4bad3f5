use proptest::prelude::*;
use topobatch::errors::OrderError;
use topobatch::graph::{DependencyGraph, ProcessId};
use topobatch_test_utils::assertions::{assert_precedence, assert_resource_sound, assert_total};

/// Raw material for a random acyclic graph: for each process, candidate
/// predecessors and candidate resources.
#[derive(Debug, Clone)]
struct Shape {
    deps: Vec<Vec<usize>>,
    uses: Vec<Vec<usize>>,
    resources: usize,
}

// Acyclicity comes from only letting process N depend on processes 0..N-1.
fn shape_strategy(max_processes: usize, max_resources: usize) -> impl Strategy<Value = Shape> {
    (1..=max_processes, 0..=max_resources).prop_flat_map(|(processes, resources)| {
        let deps = proptest::collection::vec(
            proptest::collection::vec(any::<usize>(), 0..4),
            processes,
        );
        let uses = proptest::collection::vec(
            proptest::collection::vec(any::<usize>(), 0..3),
            processes,
        );
        (deps, uses).prop_map(move |(deps, uses)| Shape {
            deps,
            uses,
            resources,
        })
    })
}

fn build(shape: &Shape) -> (DependencyGraph<usize>, Vec<ProcessId>) {
    let mut g = DependencyGraph::new();
    let resources: Vec<_> = (0..shape.resources)
        .map(|r| g.add_resource(format!("r{r}")))
        .collect();
    let processes: Vec<_> = (0..shape.deps.len()).map(|i| g.add_process(i)).collect();

    for (i, deps) in shape.deps.iter().enumerate() {
        if i == 0 {
            continue;
        }
        for &d in deps {
            g.after(processes[i], processes[d % i]).unwrap();
        }
    }
    if !resources.is_empty() {
        for (i, uses) in shape.uses.iter().enumerate() {
            for &u in uses {
                g.requires(processes[i], resources[u % resources.len()]).unwrap();
            }
        }
    }
    (g, processes)
}

proptest! {
    #[test]
    fn random_dags_are_ordered_soundly(shape in shape_strategy(24, 4)) {
        let (g, _) = build(&shape);

        let sort = g.calculate_sort().unwrap();

        assert_total(&g, &sort);
        assert_precedence(&g, &sort);
        assert_resource_sound(&g, &sort);
        prop_assert!(sort.iter().all(|batch| !batch.is_empty()));
    }

    #[test]
    fn without_resources_each_level_is_one_batch(shape in shape_strategy(24, 0)) {
        let (g, processes) = build(&shape);

        let sort = g.calculate_sort().unwrap();

        // Batch index equals the longest predecessor path ending at the process.
        let mut depth = vec![0usize; processes.len()];
        for (i, &p) in processes.iter().enumerate() {
            let d = g
                .predecessors(p)
                .map(|pred| depth[pred.index()] + 1)
                .max()
                .unwrap_or(0);
            depth[i] = d;
            prop_assert_eq!(sort.batch_index_of(p), Some(depth[i]));
        }
    }

    #[test]
    fn redeclaring_edges_changes_nothing(shape in shape_strategy(16, 3)) {
        let (mut g, processes) = build(&shape);
        let first = g.calculate_sort().unwrap();

        for &p in &processes {
            let followers: Vec<_> = g.followers(p).collect();
            g.before_all(p, followers).unwrap();
            let needs: Vec<_> = g.requirements(p).collect();
            for r in needs {
                g.used_by(r, p).unwrap();
            }
        }

        prop_assert_eq!(g.calculate_sort().unwrap(), first);
    }

    #[test]
    fn back_edge_on_a_path_is_a_cycle(shape in shape_strategy(16, 2)) {
        let (mut g, processes) = build(&shape);
        let last = *processes.last().unwrap();
        let Some(pred) = g.predecessors(last).next() else {
            return Ok(());
        };

        g.before(last, pred).unwrap();

        let is_cycle = matches!(g.calculate_sort(), Err(OrderError::CyclicDependency { remaining }) if remaining >= 2);
        prop_assert!(is_cycle);
    }
}

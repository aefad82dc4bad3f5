// src/lib.rs

//! Batched execution ordering for interdependent processes.
//!
//! Build a [`graph::DependencyGraph`], declare which processes precede
//! which and which resources they need exclusively, then call
//! [`graph::DependencyGraph::calculate_sort`]. The result is a sequence of
//! batches: every precedence constraint points from an earlier batch to a
//! later one, and no batch holds two processes sharing a resource.
//!
//! ```
//! use topobatch::graph::DependencyGraph;
//!
//! let mut g = DependencyGraph::new();
//! let db = g.add_resource("database");
//! let build = g.add_process("build");
//! let migrate = g.add_process("migrate");
//! let seed = g.add_process("seed");
//!
//! g.before_all(build, [migrate, seed])?;
//! g.used_by_all(db, [migrate, seed])?;
//!
//! let sort = g.calculate_sort()?;
//! assert_eq!(sort.batch_count(), 3);
//! # Ok::<(), topobatch::errors::OrderError>(())
//! ```

pub mod cli;
pub mod config;
pub mod depends_on;
pub mod errors;
pub mod graph;
pub mod logging;
pub mod plan;
pub mod types;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::load_and_validate;
use crate::plan::Plan;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - plan file loading + validation (one graph per file)
/// - ordering, chaining every file's batches in command-line order
/// - printing the result to stdout
pub fn run(args: CliArgs) -> Result<()> {
    let paths = args.config_paths();
    let mut plans = Vec::with_capacity(paths.len());
    for path in &paths {
        let cfg = load_and_validate(path).with_context(|| format!("loading plan {:?}", path))?;
        let mut plan = Plan::from_config(path.display().to_string(), &cfg)?;
        if let Some(mode) = args.equivalence {
            debug!(source = %plan.source(), ?mode, "equivalence overridden from command line");
            plan = plan.with_equivalence(mode);
        }
        plans.push(plan);
    }

    if args.check {
        print_check(&plans);
        return Ok(());
    }

    let result = plan::schedule(&plans)?;
    info!(
        plans = plans.len(),
        batches = result.batch_count(),
        processes = result.process_count(),
        "order computed"
    );

    print!("{}", plan::render(&plans, &result, args.flat));
    Ok(())
}

/// Validation-only output: processes, resources and edges per plan.
fn print_check(plans: &[Plan]) {
    println!("topobatch check");
    for plan in plans {
        let graph = plan.graph();
        println!();
        println!("{} ({:?} equivalence)", plan.source(), plan.equivalence());
        println!(
            "  processes: {}, resources: {}",
            graph.process_count(),
            graph.resource_count()
        );
        for process in graph.processes() {
            let Some(step) = plan.step(process) else {
                continue;
            };
            println!("  - {}", step.name);
            let after: Vec<&str> = graph
                .predecessors(process)
                .filter_map(|p| plan.step(p))
                .map(|s| s.name.as_str())
                .collect();
            if !after.is_empty() {
                println!("      after: {:?}", after);
            }
            let requires: Vec<&str> = graph
                .requirements(process)
                .filter_map(|r| graph.resource_name(r))
                .collect();
            if !requires.is_empty() {
                println!("      requires: {:?}", requires);
            }
        }
    }

    debug!("check complete (no ordering computed)");
}

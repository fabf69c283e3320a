//! Determinism under input reordering and across execution strategies.

use proptest::test_runner::{TestCaseError, TestCaseResult};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::{ExecutionStrategy, Graph, History, PropagatorBuilder};

use super::strategies::shuffle;
use super::structural::{build_graph, run_default};
use super::types::GraphFixture;

/// Per-round labels keyed by node, independent of declaration order.
fn labels_by_node(history: &History<usize>, node_count: usize) -> Vec<Vec<Option<usize>>> {
    history
        .iter()
        .map(|snapshot| {
            (0..node_count)
                .map(|node| snapshot.label_of(&node).copied())
                .collect()
        })
        .collect()
}

/// Shuffles the edge list, then the node declaration order, and checks the
/// history is unchanged.
pub(super) fn run_order_independence_property(fixture: &GraphFixture) -> TestCaseResult {
    let graph = build_graph(fixture)?;
    let reference = run_default(fixture, &graph)?;

    let seed = ((fixture.node_count as u64) << 32) | fixture.edges.len() as u64;
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut edges = fixture.edges.clone();
    shuffle(&mut edges, &mut rng);
    let reordered_edges = GraphFixture {
        edges,
        ..fixture.clone()
    };
    let same_nodes = build_graph(&reordered_edges)?;
    let history = run_default(&reordered_edges, &same_nodes)?;
    if history != reference {
        return Err(TestCaseError::fail(format!(
            "edge order changed the history (topology={:?}, nodes={})",
            fixture.topology, fixture.node_count,
        )));
    }

    let mut nodes: Vec<usize> = (0..fixture.node_count).collect();
    shuffle(&mut nodes, &mut rng);
    let shuffled = Graph::build(nodes, reordered_edges.edges.iter().copied())
        .map_err(|err| TestCaseError::fail(format!("graph build failed: {err}")))?;
    let history = run_default(fixture, &shuffled)?;
    if history.changes() != reference.changes()
        || labels_by_node(&history, fixture.node_count)
            != labels_by_node(&reference, fixture.node_count)
    {
        return Err(TestCaseError::fail(format!(
            "node order changed the history (topology={:?}, nodes={})",
            fixture.topology, fixture.node_count,
        )));
    }

    Ok(())
}

/// Runs every available strategy with a threshold of one node and checks
/// the histories match.
pub(super) fn run_strategy_equivalence_property(fixture: &GraphFixture) -> TestCaseResult {
    let graph = build_graph(fixture)?;
    let reference = run_default(fixture, &graph)?;

    let mut strategies = vec![ExecutionStrategy::Sequential, ExecutionStrategy::Auto];
    if cfg!(feature = "parallel") {
        strategies.push(ExecutionStrategy::Parallel);
    }

    for strategy in strategies {
        let propagator = PropagatorBuilder::new()
            .with_execution_strategy(strategy)
            .with_parallel_threshold(1)
            .build()
            .map_err(|err| TestCaseError::fail(format!("{strategy:?} unavailable: {err}")))?;
        let history = propagator
            .run(&graph)
            .map_err(|err| TestCaseError::fail(format!("{strategy:?} run failed: {err}")))?;
        if history != reference {
            return Err(TestCaseError::fail(format!(
                "{strategy:?} diverged from the default run (topology={:?}, nodes={})",
                fixture.topology, fixture.node_count,
            )));
        }
    }

    Ok(())
}

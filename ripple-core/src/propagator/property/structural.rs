//! Structural properties of a propagation history.
//!
//! The final labelling must name exactly the connected components, each by
//! its smallest node. Every intermediate snapshot must match the
//! breadth-first prediction: after `r` rounds a node holds the smallest
//! identifier within `r` hops.

use proptest::test_runner::{TestCaseError, TestCaseResult};

use crate::{Graph, History, Propagator};

use super::oracle::DistanceOracle;
use super::types::GraphFixture;

pub(super) fn build_graph(fixture: &GraphFixture) -> Result<Graph<usize>, TestCaseError> {
    Graph::build(0..fixture.node_count, fixture.edges.iter().copied()).map_err(|err| {
        TestCaseError::fail(format!(
            "graph build failed: {err} (topology={:?}, nodes={}, edges={})",
            fixture.topology,
            fixture.node_count,
            fixture.edges.len(),
        ))
    })
}

pub(super) fn run_default(
    fixture: &GraphFixture,
    graph: &Graph<usize>,
) -> Result<History<usize>, TestCaseError> {
    Propagator::default().run(graph).map_err(|err| {
        TestCaseError::fail(format!(
            "propagation failed: {err} (topology={:?}, nodes={})",
            fixture.topology, fixture.node_count,
        ))
    })
}

/// Checks that the converged labels identify connected components by their
/// minimum node.
pub(super) fn run_final_labelling_property(fixture: &GraphFixture) -> TestCaseResult {
    let graph = build_graph(fixture)?;
    let history = run_default(fixture, &graph)?;
    let oracle = DistanceOracle::new(fixture.node_count, &fixture.edges);
    let last = history.last();

    if !history.converged() {
        return Err(TestCaseError::fail("uncancelled run must converge"));
    }

    let labels: Vec<usize> = (0..fixture.node_count)
        .map(|node| last.label_of(&node).copied())
        .collect::<Option<_>>()
        .ok_or_else(|| TestCaseError::fail("every node must carry a label"))?;

    for (node, &label) in labels.iter().enumerate() {
        let expected = oracle.component_minimum(node);
        if label != expected {
            return Err(TestCaseError::fail(format!(
                "node {node} labelled {label}, component minimum is {expected} (topology={:?})",
                fixture.topology,
            )));
        }
    }

    for left in 0..fixture.node_count {
        for right in (left + 1)..fixture.node_count {
            let same_label = labels[left] == labels[right];
            if same_label != oracle.connected(left, right) {
                return Err(TestCaseError::fail(format!(
                    "nodes {left} and {right}: same_label={same_label}, connected={} \
                     (topology={:?})",
                    oracle.connected(left, right),
                    fixture.topology,
                )));
            }
        }
    }

    let components = last.components();
    if components.len() != oracle.component_count() {
        return Err(TestCaseError::fail(format!(
            "component count mismatch: history={}, oracle={} (topology={:?})",
            components.len(),
            oracle.component_count(),
            fixture.topology,
        )));
    }

    Ok(())
}

/// Checks every snapshot against the breadth-first prediction, plus the
/// monotonicity, fixed-point, and round-count guarantees.
pub(super) fn run_trajectory_property(fixture: &GraphFixture) -> TestCaseResult {
    let graph = build_graph(fixture)?;
    let history = run_default(fixture, &graph)?;
    let oracle = DistanceOracle::new(fixture.node_count, &fixture.edges);

    for (round, snapshot) in history.iter().enumerate() {
        for node in 0..fixture.node_count {
            let expected = oracle.ball_minimum(node, round);
            let actual = snapshot.label_of(&node).copied();
            if actual != Some(expected) {
                return Err(TestCaseError::fail(format!(
                    "round {round}, node {node}: label {actual:?}, expected {expected} \
                     (topology={:?})",
                    fixture.topology,
                )));
            }
        }
    }

    validate_monotonic(&history)?;
    validate_termination(fixture, &history, &oracle)?;
    validate_fixed_point(fixture, &graph, &history)
}

fn validate_monotonic(history: &History<usize>) -> TestCaseResult {
    for (earlier, later) in history.iter().zip(history.iter().skip(1)) {
        let mut changed = 0;
        for ((node, before), (_, after)) in earlier.iter().zip(later.iter()) {
            if after > before {
                return Err(TestCaseError::fail(format!(
                    "node {node} label rose from {before} to {after} in round {}",
                    later.round(),
                )));
            }
            if after != before {
                changed += 1;
            }
        }
        if changed != later.changed() {
            return Err(TestCaseError::fail(format!(
                "round {} reports {} changes, observed {changed}",
                later.round(),
                later.changed(),
            )));
        }
    }
    Ok(())
}

fn validate_termination(
    fixture: &GraphFixture,
    history: &History<usize>,
    oracle: &DistanceOracle,
) -> TestCaseResult {
    let expected_rounds = if oracle.has_neighbour_relations() {
        oracle.rounds_to_settle() + 1
    } else {
        0
    };
    if history.rounds() != expected_rounds {
        return Err(TestCaseError::fail(format!(
            "rounds={}, expected {expected_rounds} (topology={:?}, nodes={})",
            history.rounds(),
            fixture.topology,
            fixture.node_count,
        )));
    }
    if history.rounds() > oracle.max_component_diameter() + 1 {
        return Err(TestCaseError::fail(format!(
            "rounds={} exceed diameter bound {}",
            history.rounds(),
            oracle.max_component_diameter() + 1,
        )));
    }
    if history.rounds() > 0 {
        let penultimate = history.at(history.len() - 2);
        if penultimate != Some(history.last()) {
            return Err(TestCaseError::fail(
                "last two snapshots of a converged history must match",
            ));
        }
    }
    Ok(())
}

fn validate_fixed_point(
    fixture: &GraphFixture,
    graph: &Graph<usize>,
    history: &History<usize>,
) -> TestCaseResult {
    let again = Propagator::default()
        .run_from(graph, history.last())
        .map_err(|err| TestCaseError::fail(format!("re-seeding failed: {err}")))?;
    if again.changes().iter().any(|&changed| changed != 0) || again.last() != history.last() {
        return Err(TestCaseError::fail(format!(
            "re-running from the final snapshot changed labels: {:?} (topology={:?})",
            again.changes(),
            fixture.topology,
        )));
    }
    Ok(())
}

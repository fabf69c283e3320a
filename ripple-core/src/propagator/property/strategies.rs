//! Strategy builders for propagation property tests.
//!
//! Fixtures are generated from a seeded [`SmallRng`] so that rstest cases
//! and proptest runs share one set of generators. Generated edge lists
//! deliberately carry self-loops, duplicates, and reversed pairs, which the
//! graph builder must normalise away.

use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::types::{GraphFixture, GraphTopology};

/// Minimum node count for generated graphs.
const MIN_NODES: usize = 1;
/// Maximum node count for generated graphs.
const MAX_NODES: usize = 48;
/// Maximum node count for dense graphs.
const DENSE_MAX_NODES: usize = 24;

/// Generates fixtures across all topologies.
pub(super) fn graph_fixture_strategy() -> impl Strategy<Value = GraphFixture> {
    (any::<GraphTopology>(), any::<u64>()).prop_map(|(topology, seed)| {
        let mut rng = SmallRng::seed_from_u64(seed);
        generate_fixture(topology, &mut rng)
    })
}

/// Generates a fixture for a specific topology.
pub(super) fn generate_fixture(topology: GraphTopology, rng: &mut SmallRng) -> GraphFixture {
    let (node_count, mut edges) = match topology {
        GraphTopology::Random => {
            let node_count = rng.gen_range(MIN_NODES..=MAX_NODES);
            let probability = rng.gen_range(0.02..=0.15);
            (node_count, random_edges(0, node_count, probability, rng))
        }
        GraphTopology::Path => path(rng),
        GraphTopology::Star => star(rng),
        GraphTopology::Dense => {
            let node_count = rng.gen_range(MIN_NODES..=DENSE_MAX_NODES);
            let probability = rng.gen_range(0.7..=0.95);
            (node_count, random_edges(0, node_count, probability, rng))
        }
        GraphTopology::Forest => forest(rng),
        GraphTopology::Degenerate => degenerate(rng),
    };
    add_noise(node_count, &mut edges, rng);

    GraphFixture {
        node_count,
        edges,
        topology,
    }
}

/// Joins each pair in `offset..offset + size` with `probability`.
fn random_edges(
    offset: usize,
    size: usize,
    probability: f64,
    rng: &mut SmallRng,
) -> Vec<(usize, usize)> {
    let mut edges = Vec::new();
    for left in 0..size {
        for right in (left + 1)..size {
            if rng.gen_bool(probability) {
                edges.push((offset + left, offset + right));
            }
        }
    }
    edges
}

/// Builds a path through a random permutation, so the minimum usually sits
/// somewhere in the middle.
fn path(rng: &mut SmallRng) -> (usize, Vec<(usize, usize)>) {
    let node_count = rng.gen_range(2..=MAX_NODES);
    let mut order: Vec<usize> = (0..node_count).collect();
    shuffle(&mut order, rng);
    let edges = order.windows(2).map(|pair| (pair[0], pair[1])).collect();
    (node_count, edges)
}

fn star(rng: &mut SmallRng) -> (usize, Vec<(usize, usize)>) {
    let node_count = rng.gen_range(2..=MAX_NODES);
    let hub = rng.gen_range(0..node_count);
    let edges = (0..node_count)
        .filter(|&node| node != hub)
        .map(|node| (node, hub))
        .collect();
    (node_count, edges)
}

/// Splits the nodes into two to five blocks of random structure with no
/// cross-block edges, then relabels nodes so blocks interleave.
fn forest(rng: &mut SmallRng) -> (usize, Vec<(usize, usize)>) {
    let block_count = rng.gen_range(2..=5);
    let sizes: Vec<usize> = (0..block_count).map(|_| rng.gen_range(1..=10)).collect();
    let node_count: usize = sizes.iter().sum();

    let mut edges = Vec::new();
    let mut offset = 0;
    for &size in &sizes {
        let probability = rng.gen_range(0.2..=0.6);
        edges.extend(random_edges(offset, size, probability, rng));
        offset += size;
    }

    let mut relabel: Vec<usize> = (0..node_count).collect();
    shuffle(&mut relabel, rng);
    let edges = edges
        .into_iter()
        .map(|(left, right)| (relabel[left], relabel[right]))
        .collect();
    (node_count, edges)
}

fn degenerate(rng: &mut SmallRng) -> (usize, Vec<(usize, usize)>) {
    let node_count = rng.gen_range(MIN_NODES..=MAX_NODES);
    let loops = rng.gen_range(0..=node_count);
    let edges = (0..loops)
        .map(|_| {
            let node = rng.gen_range(0..node_count);
            (node, node)
        })
        .collect();
    (node_count, edges)
}

/// Appends self-loops and reversed duplicates of existing edges.
fn add_noise(node_count: usize, edges: &mut Vec<(usize, usize)>, rng: &mut SmallRng) {
    if !edges.is_empty() {
        for _ in 0..rng.gen_range(0..=3) {
            let (left, right) = edges[rng.gen_range(0..edges.len())];
            edges.push((right, left));
        }
    }
    if node_count > 0 && rng.gen_bool(0.5) {
        let node = rng.gen_range(0..node_count);
        edges.push((node, node));
    }
    shuffle(edges, rng);
}

/// Fisher-Yates shuffle using the provided RNG.
pub(super) fn shuffle<T>(slice: &mut [T], rng: &mut SmallRng) {
    for i in (1..slice.len()).rev() {
        let j = rng.gen_range(0..=i);
        slice.swap(i, j);
    }
}

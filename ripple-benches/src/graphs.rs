//! Seeded graph families for propagation benchmarks.
//!
//! Each family stresses a different part of the round loop: paths maximise
//! the number of rounds, grids give a moderate diameter with uniform degree,
//! and sparse random graphs settle in a handful of rounds over many nodes.

use std::fmt;

use rand::{Rng, SeedableRng, rngs::SmallRng};
use ripple_core::Graph;

use crate::error::BenchSetupError;

/// Random edges drawn per node for [`GraphFamily::SparseRandom`].
pub const SPARSE_EDGES_PER_NODE: usize = 2;

/// Shape of a benchmark graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GraphFamily {
    /// A single path `0 - 1 - ... - n-1`; needs `n` rounds to settle.
    Path,
    /// A square lattice with four-neighbour connectivity.
    Grid,
    /// Uniformly drawn endpoints, [`SPARSE_EDGES_PER_NODE`] per node.
    SparseRandom,
}

impl GraphFamily {
    const fn label(self) -> &'static str {
        match self {
            Self::Path => "path",
            Self::Grid => "grid",
            Self::SparseRandom => "sparse",
        }
    }
}

/// Describes one benchmark graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GraphSpec {
    /// Graph shape.
    pub family: GraphFamily,
    /// Requested node count. Grids round down to the nearest square.
    pub node_count: usize,
    /// Seed for families that draw random edges.
    pub seed: u64,
}

impl fmt::Display for GraphSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},n={}", self.family.label(), self.node_count)
    }
}

impl GraphSpec {
    /// Builds the described graph.
    ///
    /// # Errors
    /// Returns [`BenchSetupError::ZeroValue`] when `node_count` is zero, or a
    /// propagation error if graph construction fails.
    pub fn build(&self) -> Result<Graph<usize>, BenchSetupError> {
        if self.node_count == 0 {
            return Err(BenchSetupError::ZeroValue {
                context: "graph node_count",
            });
        }
        let (node_count, edges) = match self.family {
            GraphFamily::Path => (self.node_count, path_edges(self.node_count)),
            GraphFamily::Grid => {
                let side = self.node_count.isqrt();
                (side.saturating_mul(side), grid_edges(side))
            }
            GraphFamily::SparseRandom => (
                self.node_count,
                sparse_random_edges(self.node_count, self.seed),
            ),
        };
        Ok(Graph::build(0..node_count, edges)?)
    }
}

fn path_edges(node_count: usize) -> Vec<(usize, usize)> {
    (1..node_count).map(|node| (node - 1, node)).collect()
}

fn grid_edges(side: usize) -> Vec<(usize, usize)> {
    let mut edges = Vec::with_capacity(side.saturating_mul(side).saturating_mul(2));
    for row in 0..side {
        let row_start = row * side;
        for col in 0..side {
            let node = row_start + col;
            if col + 1 < side {
                edges.push((node, node + 1));
            }
            if row + 1 < side {
                edges.push((node, node + side));
            }
        }
    }
    edges
}

fn sparse_random_edges(node_count: usize, seed: u64) -> Vec<(usize, usize)> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let edge_count = node_count.saturating_mul(SPARSE_EDGES_PER_NODE);
    (0..edge_count)
        .map(|_| (rng.gen_range(0..node_count), rng.gen_range(0..node_count)))
        .collect()
}

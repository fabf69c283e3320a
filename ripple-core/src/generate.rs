//! Random graph generation for demos, tests, and benchmarks.
//!
//! Produces Erdős–Rényi graphs: each unordered pair of nodes is joined
//! independently with the configured probability. Every edge endpoint is a
//! declared node, so the output always builds.

use rand::{Rng, SeedableRng, rngs::SmallRng};
use tracing::{debug, instrument};

use crate::{Result, error::GenerateError, graph::Graph};

/// Parameters for [`RandomGraphConfig::generate`].
///
/// # Examples
/// ```
/// use ripple_core::generate::RandomGraphConfig;
///
/// let generated = RandomGraphConfig::new(16, 0.2).with_seed(7).generate()?;
/// assert_eq!(generated.nodes.len(), 16);
/// assert!(generated.edges.iter().all(|(a, b)| a < b && *b < 16));
/// # Ok::<(), ripple_core::GenerateError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct RandomGraphConfig {
    node_count: usize,
    edge_probability: f64,
    seed: Option<u64>,
}

/// Nodes and edges produced by [`RandomGraphConfig::generate`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedGraph {
    /// Node identifiers `0..node_count`.
    pub nodes: Vec<usize>,
    /// Edges `(a, b)` with `a < b`, in lexicographic order.
    pub edges: Vec<(usize, usize)>,
}

impl RandomGraphConfig {
    /// Creates a configuration without a fixed seed.
    #[must_use]
    pub fn new(node_count: usize, edge_probability: f64) -> Self {
        Self {
            node_count,
            edge_probability,
            seed: None,
        }
    }

    /// Fixes the RNG seed so generation is reproducible.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Returns the configured node count.
    #[must_use]
    #[rustfmt::skip]
    pub fn node_count(&self) -> usize { self.node_count }

    /// Returns the configured edge probability.
    #[must_use]
    #[rustfmt::skip]
    pub fn edge_probability(&self) -> f64 { self.edge_probability }

    /// Checks the configuration without generating anything.
    ///
    /// # Errors
    /// Returns [`GenerateError::ZeroNodes`] when `node_count` is zero and
    /// [`GenerateError::InvalidProbability`] when the probability is not a
    /// finite value in `[0, 1]`.
    pub fn validate(&self) -> core::result::Result<(), GenerateError> {
        if self.node_count == 0 {
            return Err(GenerateError::ZeroNodes);
        }
        if !(0.0..=1.0).contains(&self.edge_probability) {
            return Err(GenerateError::InvalidProbability {
                got: self.edge_probability,
            });
        }
        Ok(())
    }

    /// Generates a graph.
    ///
    /// # Errors
    /// Returns the errors of [`Self::validate`].
    #[instrument(
        name = "core.generate",
        err,
        skip(self),
        fields(nodes = self.node_count, probability = self.edge_probability, seed = ?self.seed)
    )]
    pub fn generate(&self) -> core::result::Result<GeneratedGraph, GenerateError> {
        self.validate()?;
        let mut rng = match self.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };

        let mut edges = Vec::new();
        for left in 0..self.node_count {
            for right in left.saturating_add(1)..self.node_count {
                if rng.gen_bool(self.edge_probability) {
                    edges.push((left, right));
                }
            }
        }
        debug!(edges = edges.len(), "random graph generated");

        Ok(GeneratedGraph {
            nodes: (0..self.node_count).collect(),
            edges,
        })
    }
}

impl GeneratedGraph {
    /// Builds a [`Graph`] from the generated nodes and edges.
    ///
    /// # Errors
    /// Never fails for generator output; the signature matches
    /// [`Graph::build`].
    pub fn to_graph(&self) -> Result<Graph<usize>> {
        Graph::build(self.nodes.iter().copied(), self.edges.iter().copied())
    }
}

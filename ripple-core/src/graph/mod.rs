//! Immutable undirected graphs with index-keyed adjacency.
//!
//! [`Graph::build`] resolves identifiers to dense indices once and stores the
//! neighbour relation as compressed sparse rows. Self-loops contribute no
//! neighbour and duplicate edges collapse, so propagation only ever sees the
//! distinct neighbour sets.

use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::{
    Result,
    error::PropagationError,
    node::{NodeId, NodeTable},
};


/// An undirected graph over identifiers of type `N`.
///
/// # Examples
/// ```
/// use ripple_core::Graph;
///
/// let graph = Graph::build(["A", "B", "C"], [("A", "B"), ("B", "B"), ("B", "A")])?;
/// assert_eq!(graph.node_count(), 3);
/// assert_eq!(graph.edge_count(), 1);
/// assert_eq!(graph.neighbours(&"B"), Some(vec![&"A"]));
/// assert_eq!(graph.neighbours(&"C"), Some(vec![]));
/// # Ok::<(), ripple_core::PropagationError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Graph<N> {
    table: Arc<NodeTable<N>>,
    edges: Vec<(N, N)>,
    adjacency: Adjacency,
}

/// Compressed sparse row adjacency keyed by node index.
#[derive(Debug, Clone, Default)]
pub(crate) struct Adjacency {
    offsets: Vec<usize>,
    targets: Vec<usize>,
}

impl Adjacency {
    fn from_pairs(node_count: usize, mut pairs: Vec<(usize, usize)>) -> Self {
        pairs.sort_unstable();
        pairs.dedup();

        let mut degrees = vec![0_usize; node_count];
        for &(source, _) in &pairs {
            degrees[source] += 1;
        }
        let mut offsets = Vec::with_capacity(node_count.saturating_add(1));
        let mut running = 0_usize;
        offsets.push(running);
        for degree in degrees {
            running += degree;
            offsets.push(running);
        }
        let targets = pairs.into_iter().map(|(_, target)| target).collect();

        Self { offsets, targets }
    }

    /// Returns the sorted neighbour indices of `node`.
    pub(crate) fn neighbours(&self, node: usize) -> &[usize] {
        match (self.offsets.get(node), self.offsets.get(node.saturating_add(1))) {
            (Some(&start), Some(&end)) => self.targets.get(start..end).unwrap_or(&[]),
            _ => &[],
        }
    }

    /// Number of directed neighbour entries (twice the undirected edge count).
    pub(crate) fn entry_count(&self) -> usize {
        self.targets.len()
    }
}

impl<N: NodeId> Graph<N> {
    /// Builds a graph from a node set and an ordered edge list.
    ///
    /// Duplicate node identifiers collapse; the first occurrence fixes the
    /// node's position in every snapshot. Self-loops and repeated edges are
    /// accepted and normalised away.
    ///
    /// # Errors
    /// Returns [`PropagationError::InvalidEdge`] naming the first endpoint
    /// that is absent from `nodes`. Endpoints are checked in edge order, left
    /// before right.
    ///
    /// # Examples
    /// ```
    /// use ripple_core::{Graph, PropagationError};
    ///
    /// let err = Graph::build(["A", "B"], [("A", "B"), ("Z", "A")])
    ///     .expect_err("Z is not a node");
    /// assert!(matches!(
    ///     err,
    ///     PropagationError::InvalidEdge { ref node, edge_index: 1 } if &**node == "Z"
    /// ));
    /// ```
    #[instrument(name = "core.graph.build", err, skip(nodes, edges))]
    pub fn build(
        nodes: impl IntoIterator<Item = N>,
        edges: impl IntoIterator<Item = (N, N)>,
    ) -> Result<Self> {
        let table = NodeTable::from_ids(nodes);
        let edges: Vec<(N, N)> = edges.into_iter().collect();

        let mut pairs = Vec::with_capacity(edges.len().saturating_mul(2));
        let mut self_loops = 0_usize;
        for (edge_index, (left, right)) in edges.iter().enumerate() {
            let source = resolve(&table, left, edge_index)?;
            let target = resolve(&table, right, edge_index)?;
            if source == target {
                self_loops += 1;
                continue;
            }
            pairs.push((source, target));
            pairs.push((target, source));
        }

        let adjacency = Adjacency::from_pairs(table.len(), pairs);
        debug!(
            nodes = table.len(),
            edges = edges.len(),
            distinct_edges = adjacency.entry_count() / 2,
            self_loops,
            "graph built"
        );

        Ok(Self {
            table: Arc::new(table),
            edges,
            adjacency,
        })
    }

    /// Returns the number of distinct nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.table.len()
    }

    /// Returns the number of distinct undirected edges, excluding self-loops.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.adjacency.entry_count() / 2
    }

    /// Returns the node identifiers in their stable snapshot order.
    #[must_use]
    pub fn nodes(&self) -> &[N] {
        self.table.ids()
    }

    /// Returns the edge list exactly as supplied, including self-loops and
    /// duplicates.
    #[must_use]
    pub fn edges(&self) -> &[(N, N)] {
        &self.edges
    }

    /// Returns `true` when `id` is a node of this graph.
    #[must_use]
    pub fn contains(&self, id: &N) -> bool {
        self.table.index_of(id).is_some()
    }

    /// Returns the position of `id` in the stable node order.
    #[must_use]
    pub fn index_of(&self, id: &N) -> Option<usize> {
        self.table.index_of(id)
    }

    /// Returns the distinct neighbours of `id` ordered by node position, or
    /// `None` when `id` is not a node.
    #[must_use]
    pub fn neighbours(&self, id: &N) -> Option<Vec<&N>> {
        let index = self.table.index_of(id)?;
        Some(
            self.adjacency
                .neighbours(index)
                .iter()
                .filter_map(|&neighbour| self.table.id(neighbour))
                .collect(),
        )
    }

    pub(crate) fn table(&self) -> &Arc<NodeTable<N>> {
        &self.table
    }

    pub(crate) fn adjacency(&self) -> &Adjacency {
        &self.adjacency
    }
}

fn resolve<N: NodeId>(table: &NodeTable<N>, id: &N, edge_index: usize) -> Result<usize> {
    table.index_of(id).ok_or_else(|| {
        warn!(node = %id, edge_index, "edge references unknown node");
        PropagationError::InvalidEdge {
            node: Arc::from(id.to_string()),
            edge_index,
        }
    })
}

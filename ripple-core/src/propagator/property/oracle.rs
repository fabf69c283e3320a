//! Breadth-first reference for propagation property verification.
//!
//! Works on plain adjacency lists built straight from the edge list, so it
//! shares nothing with the CSR adjacency under test.

use std::collections::VecDeque;

/// All-pairs hop distances of a small undirected graph.
pub(super) struct DistanceOracle {
    node_count: usize,
    /// `distances[source][target]`, `None` when unreachable.
    distances: Vec<Vec<Option<usize>>>,
}

impl DistanceOracle {
    pub(super) fn new(node_count: usize, edges: &[(usize, usize)]) -> Self {
        let mut neighbours = vec![Vec::new(); node_count];
        for &(left, right) in edges {
            if left != right {
                neighbours[left].push(right);
                neighbours[right].push(left);
            }
        }
        let distances = (0..node_count)
            .map(|source| bfs(&neighbours, source))
            .collect();
        Self {
            node_count,
            distances,
        }
    }

    /// Returns `true` when a path joins `left` and `right`.
    pub(super) fn connected(&self, left: usize, right: usize) -> bool {
        self.distances[left][right].is_some()
    }

    /// Smallest node within `radius` hops of `node`, itself included.
    ///
    /// After `r` synchronous rounds a node's label is exactly this value
    /// with `radius = r`.
    pub(super) fn ball_minimum(&self, node: usize, radius: usize) -> usize {
        self.distances[node]
            .iter()
            .enumerate()
            .filter(|(_, distance)| distance.is_some_and(|hops| hops <= radius))
            .map(|(target, _)| target)
            .min()
            .unwrap_or(node)
    }

    /// Smallest node in the component of `node`.
    pub(super) fn component_minimum(&self, node: usize) -> usize {
        self.ball_minimum(node, usize::MAX)
    }

    /// Rounds needed until every node holds its component minimum.
    pub(super) fn rounds_to_settle(&self) -> usize {
        (0..self.node_count)
            .filter_map(|node| self.distances[node][self.component_minimum(node)])
            .max()
            .unwrap_or(0)
    }

    /// Largest shortest-path length inside any component.
    pub(super) fn max_component_diameter(&self) -> usize {
        self.distances
            .iter()
            .flat_map(|row| row.iter().flatten())
            .copied()
            .max()
            .unwrap_or(0)
    }

    /// Returns `true` when at least one node has a neighbour.
    pub(super) fn has_neighbour_relations(&self) -> bool {
        self.max_component_diameter() > 0
    }

    /// Number of connected components.
    pub(super) fn component_count(&self) -> usize {
        (0..self.node_count)
            .filter(|&node| self.component_minimum(node) == node)
            .count()
    }
}

fn bfs(neighbours: &[Vec<usize>], source: usize) -> Vec<Option<usize>> {
    let mut distances = vec![None; neighbours.len()];
    let mut queue = VecDeque::from([source]);
    distances[source] = Some(0);
    while let Some(node) = queue.pop_front() {
        let next = distances[node].map_or(0, |hops| hops + 1);
        for &neighbour in &neighbours[node] {
            if distances[neighbour].is_none() {
                distances[neighbour] = Some(next);
                queue.push_back(neighbour);
            }
        }
    }
    distances
}

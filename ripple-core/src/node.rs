//! Node identifiers and the shared node table.
//!
//! Identifiers are resolved to dense indices once, when a [`crate::Graph`] is
//! built. The table also records each node's rank in identifier order so the
//! propagation loop can compare plain integers instead of identifiers.

use std::{collections::HashMap, fmt::Display, hash::Hash};

/// Requirements for a node identifier.
///
/// Identifiers must be totally ordered because propagation takes minimums
/// over them. [`Display`] is only used to name identifiers in errors and log
/// fields.
///
/// # Examples
/// ```
/// fn accepts<N: ripple_core::NodeId>(_: N) {}
///
/// accepts("A");
/// accepts(String::from("B"));
/// accepts(7_u32);
/// ```
pub trait NodeId: Ord + Hash + Clone + Display {}

impl<T> NodeId for T where T: Ord + Hash + Clone + Display {}

/// Deduplicated node identifiers in first-supplied order.
#[derive(Debug)]
pub(crate) struct NodeTable<N> {
    ids: Vec<N>,
    lookup: HashMap<N, usize>,
    /// `rank[index]` is the position of `ids[index]` in identifier order.
    rank: Vec<usize>,
    /// `by_rank[rank]` is the index holding that rank.
    by_rank: Vec<usize>,
}

impl<N: NodeId> NodeTable<N> {
    pub(crate) fn from_ids(nodes: impl IntoIterator<Item = N>) -> Self {
        let mut ids = Vec::new();
        let mut lookup = HashMap::new();
        for id in nodes {
            if lookup.contains_key(&id) {
                continue;
            }
            lookup.insert(id.clone(), ids.len());
            ids.push(id);
        }

        let mut by_rank: Vec<usize> = (0..ids.len()).collect();
        by_rank.sort_unstable_by(|&left, &right| ids[left].cmp(&ids[right]));
        let mut rank = vec![0; ids.len()];
        for (position, &index) in by_rank.iter().enumerate() {
            rank[index] = position;
        }

        Self {
            ids,
            lookup,
            rank,
            by_rank,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.ids.len()
    }

    pub(crate) fn ids(&self) -> &[N] {
        &self.ids
    }

    pub(crate) fn index_of(&self, id: &N) -> Option<usize> {
        self.lookup.get(id).copied()
    }

    pub(crate) fn id(&self, index: usize) -> Option<&N> {
        self.ids.get(index)
    }

    pub(crate) fn ranks(&self) -> &[usize] {
        &self.rank
    }

    /// Resolves a rank back to the identifier that holds it.
    pub(crate) fn id_for_rank(&self, rank: usize) -> Option<&N> {
        self.by_rank.get(rank).and_then(|&index| self.ids.get(index))
    }
}

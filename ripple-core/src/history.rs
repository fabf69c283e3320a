//! Label snapshots and the round-by-round propagation history.
//!
//! Every [`Snapshot`] shares the node table of the graph that produced it, so
//! positions line up across the whole [`History`] and a history stays valid
//! after its graph is dropped.

use std::{fmt, sync::Arc};

use crate::node::{NodeId, NodeTable};

/// The complete label assignment at one round boundary.
///
/// Nodes appear in the graph's stable order, so consumers can index
/// position-for-position across snapshots. Two snapshots compare equal when
/// they assign the same labels to the same nodes, whatever their round.
///
/// # Examples
/// ```
/// use ripple_core::Graph;
///
/// let graph = Graph::build(["B", "A"], [("A", "B")])?;
/// let history = ripple_core::run(&graph)?;
/// let last = history.last();
/// assert_eq!(last.label_of(&"B"), Some(&"A"));
/// assert_eq!(last.to_pairs(), vec![("B", "A"), ("A", "A")]);
/// # Ok::<(), ripple_core::PropagationError>(())
/// ```
pub struct Snapshot<N> {
    table: Arc<NodeTable<N>>,
    /// Label of each node position, stored as the rank of the label's node.
    labels: Arc<[usize]>,
    round: usize,
    changed: usize,
}

impl<N> Clone for Snapshot<N> {
    fn clone(&self) -> Self {
        Self {
            table: Arc::clone(&self.table),
            labels: Arc::clone(&self.labels),
            round: self.round,
            changed: self.changed,
        }
    }
}

impl<N: NodeId> Snapshot<N> {
    pub(crate) fn new(
        table: Arc<NodeTable<N>>,
        labels: Arc<[usize]>,
        round: usize,
        changed: usize,
    ) -> Self {
        Self {
            table,
            labels,
            round,
            changed,
        }
    }

    /// Returns the round after which this snapshot was taken (`0` is the
    /// initial assignment). Histories resumed with
    /// [`crate::Propagator::run_from`] keep counting from their seed.
    #[must_use]
    pub fn round(&self) -> usize {
        self.round
    }

    /// Returns how many labels changed in the round that produced this
    /// snapshot. Always `0` for the first snapshot of a history.
    #[must_use]
    pub fn changed(&self) -> usize {
        self.changed
    }

    /// Returns the number of nodes covered by the snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns `true` when the snapshot covers no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Returns the node at `position` in the stable order.
    #[must_use]
    pub fn node_at(&self, position: usize) -> Option<&N> {
        self.table.id(position)
    }

    /// Returns the label of the node at `position`.
    #[must_use]
    pub fn label_at(&self, position: usize) -> Option<&N> {
        let rank = *self.labels.get(position)?;
        self.table.id_for_rank(rank)
    }

    /// Returns the label of the node `id`, or `None` when `id` is not a node.
    #[must_use]
    pub fn label_of(&self, id: &N) -> Option<&N> {
        self.label_at(self.table.index_of(id)?)
    }

    /// Iterates `(node, label)` pairs in the stable node order.
    pub fn iter(&self) -> impl Iterator<Item = (&N, &N)> + '_ {
        self.table
            .ids()
            .iter()
            .zip(self.labels.iter())
            .filter_map(|(id, &rank)| Some((id, self.table.id_for_rank(rank)?)))
    }

    /// Copies the snapshot into owned `(node, label)` pairs.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(N, N)> {
        self.iter()
            .map(|(id, label)| (id.clone(), label.clone()))
            .collect()
    }

    /// Counts the distinct labels in the snapshot.
    #[must_use]
    pub fn component_count(&self) -> usize {
        let mut seen = vec![false; self.labels.len()];
        let mut count = 0;
        for &rank in self.labels.iter() {
            if let Some(slot) = seen.get_mut(rank) {
                if !*slot {
                    *slot = true;
                    count += 1;
                }
            }
        }
        count
    }

    /// Groups nodes by label, ordered by label and then by node identifier.
    ///
    /// On a converged snapshot each group is one connected component whose
    /// label is its smallest identifier.
    ///
    /// # Examples
    /// ```
    /// use ripple_core::Graph;
    ///
    /// let graph = Graph::build(["E", "D", "B", "A"], [("D", "E"), ("A", "B")])?;
    /// let history = ripple_core::run(&graph)?;
    /// let groups = history.last().components();
    /// assert_eq!(groups.len(), 2);
    /// assert_eq!(groups[0].label(), &"A");
    /// assert_eq!(groups[0].members(), [&"A", &"B"]);
    /// assert_eq!(groups[1].members(), [&"D", &"E"]);
    /// # Ok::<(), ripple_core::PropagationError>(())
    /// ```
    #[must_use]
    pub fn components(&self) -> Vec<Component<'_, N>> {
        let mut buckets: Vec<Vec<usize>> = vec![Vec::new(); self.labels.len()];
        for (position, &rank) in self.labels.iter().enumerate() {
            if let Some(bucket) = buckets.get_mut(rank) {
                bucket.push(position);
            }
        }

        buckets
            .into_iter()
            .enumerate()
            .filter(|(_, positions)| !positions.is_empty())
            .filter_map(|(rank, positions)| {
                let label = self.table.id_for_rank(rank)?;
                let mut members: Vec<&N> = positions
                    .into_iter()
                    .filter_map(|position| self.table.id(position))
                    .collect();
                members.sort_unstable();
                Some(Component { label, members })
            })
            .collect()
    }

    pub(crate) fn table(&self) -> &Arc<NodeTable<N>> {
        &self.table
    }

    pub(crate) fn ranks(&self) -> &[usize] {
        &self.labels
    }
}

impl<N: NodeId> PartialEq for Snapshot<N> {
    fn eq(&self, other: &Self) -> bool {
        self.table.ids() == other.table.ids()
            && self.iter().zip(other.iter()).all(|(left, right)| left == right)
    }
}

impl<N: NodeId> Eq for Snapshot<N> {}

impl<N: NodeId + fmt::Debug> fmt::Debug for Snapshot<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Snapshot")
            .field("round", &self.round)
            .field("changed", &self.changed)
            .field("labels", &self.iter().collect::<Vec<_>>())
            .finish()
    }
}

/// Nodes sharing one label in a [`Snapshot`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component<'a, N> {
    label: &'a N,
    members: Vec<&'a N>,
}

impl<'a, N> Component<'a, N> {
    /// Returns the shared label.
    #[must_use]
    #[rustfmt::skip]
    pub fn label(&self) -> &'a N { self.label }

    /// Returns the members in identifier order.
    #[must_use]
    #[rustfmt::skip]
    pub fn members(&self) -> &[&'a N] { &self.members }

    /// Returns the number of members.
    #[must_use]
    #[rustfmt::skip]
    pub fn len(&self) -> usize { self.members.len() }

    /// Returns `true` when the group has no members.
    #[must_use]
    #[rustfmt::skip]
    pub fn is_empty(&self) -> bool { self.members.is_empty() }
}

/// Every snapshot of one propagation run, from the initial assignment to the
/// last round executed.
///
/// A converged history with at least one round ends with two identical
/// snapshots: the final round changed nothing. A graph without neighbour
/// relations is a fixed point before any round and yields a single snapshot.
///
/// # Examples
/// ```
/// use ripple_core::Graph;
///
/// let graph = Graph::build(["A", "B", "C"], [("A", "B"), ("B", "C")])?;
/// let history = ripple_core::run(&graph)?;
/// assert!(history.converged());
/// assert_eq!(history.len(), history.rounds() + 1);
/// assert_eq!(history.at(history.len() - 1), history.at(history.len() - 2));
/// assert_eq!(history.at_clamped(usize::MAX), history.last());
/// # Ok::<(), ripple_core::PropagationError>(())
/// ```
pub struct History<N> {
    snapshots: Vec<Snapshot<N>>,
    converged: bool,
}

impl<N> Clone for History<N> {
    fn clone(&self) -> Self {
        Self {
            snapshots: self.snapshots.clone(),
            converged: self.converged,
        }
    }
}

impl<N: NodeId> History<N> {
    pub(crate) fn new(initial: Snapshot<N>) -> Self {
        Self {
            snapshots: vec![initial],
            converged: false,
        }
    }

    pub(crate) fn push(&mut self, snapshot: Snapshot<N>) {
        self.snapshots.push(snapshot);
    }

    pub(crate) fn mark_converged(&mut self) {
        self.converged = true;
    }

    /// Returns the snapshot at `index`, counted from the first snapshot of
    /// this history, or `None` past the end.
    #[must_use]
    pub fn at(&self, index: usize) -> Option<&Snapshot<N>> {
        self.snapshots.get(index)
    }

    /// Returns the snapshot at `round` clamped to `[0, len - 1]`.
    #[must_use]
    pub fn at_clamped(&self, round: usize) -> &Snapshot<N> {
        let index = round.min(self.snapshots.len().saturating_sub(1));
        &self.snapshots[index]
    }

    /// Returns the number of snapshots (rounds executed plus one).
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Always `false`: a history holds at least the initial snapshot.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Returns the number of rounds executed.
    #[must_use]
    pub fn rounds(&self) -> usize {
        self.snapshots.len().saturating_sub(1)
    }

    /// Returns the initial assignment.
    #[must_use]
    pub fn first(&self) -> &Snapshot<N> {
        self.at_clamped(0)
    }

    /// Returns the latest snapshot.
    #[must_use]
    pub fn last(&self) -> &Snapshot<N> {
        self.at_clamped(usize::MAX)
    }

    /// Returns `true` when propagation reached its fixed point, `false` when
    /// it was cancelled between rounds.
    #[must_use]
    pub fn converged(&self) -> bool {
        self.converged
    }

    /// Iterates snapshots from the initial assignment onwards.
    pub fn iter(&self) -> std::slice::Iter<'_, Snapshot<N>> {
        self.snapshots.iter()
    }

    /// Returns the number of labels changed by each executed round.
    #[must_use]
    pub fn changes(&self) -> Vec<usize> {
        self.snapshots.iter().skip(1).map(Snapshot::changed).collect()
    }
}

impl<'a, N: NodeId> IntoIterator for &'a History<N> {
    type Item = &'a Snapshot<N>;
    type IntoIter = std::slice::Iter<'a, Snapshot<N>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<N: NodeId> PartialEq for History<N> {
    fn eq(&self, other: &Self) -> bool {
        self.converged == other.converged && self.snapshots == other.snapshots
    }
}

impl<N: NodeId> Eq for History<N> {}

impl<N: NodeId + fmt::Debug> fmt::Debug for History<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("History")
            .field("converged", &self.converged)
            .field("snapshots", &self.snapshots)
            .finish()
    }
}

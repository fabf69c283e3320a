//! Fixture and topology types for propagation property tests.

use test_strategy::Arbitrary;

/// Shape of a generated graph.
///
/// Each topology stresses a different part of the termination argument:
/// long paths maximise the round count, stars and dense graphs converge in
/// one or two rounds, and forests exercise several minima at once.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Arbitrary)]
pub(super) enum GraphTopology {
    /// Erdos-Renyi random graph with a moderate edge probability.
    #[weight(3)]
    Random,
    /// A single path visiting every node in a shuffled order.
    #[weight(2)]
    Path,
    /// One hub joined to every other node.
    #[weight(1)]
    Star,
    /// Near-complete graph.
    #[weight(1)]
    Dense,
    /// Several disjoint random components.
    #[weight(3)]
    Forest,
    /// Isolated nodes, self-loops, and duplicate edges only.
    #[weight(1)]
    Degenerate,
}

/// Generated input for one property case.
#[derive(Clone, Debug)]
pub(super) struct GraphFixture {
    /// Nodes are identified by `0..node_count`.
    pub node_count: usize,
    /// Edge list as supplied to the graph builder, noise included.
    pub edges: Vec<(usize, usize)>,
    /// Topology used during generation.
    pub topology: GraphTopology,
}

//! Synchronous min-label propagation.
//!
//! Every node starts labelled with itself. Each round replaces every label
//! with the minimum over the node and its neighbours, computed from the
//! previous round's labels only, until a round changes nothing. The smallest
//! identifier of a component advances one hop per round, so the round count
//! is bounded by the component diameter plus the confirming round.
//!
//! Labels are handled as node ranks (positions in identifier order), which
//! turns every comparison into an integer `min`.

mod relax;

#[cfg(test)]
mod property;

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::{
    Result,
    builder::{CancellationToken, DEFAULT_PARALLEL_THRESHOLD, ExecutionStrategy},
    error::PropagationError,
    graph::Graph,
    history::{History, Snapshot},
    node::NodeId,
};

/// Runs label propagation over a [`Graph`] and records every round.
///
/// # Examples
/// ```
/// use ripple_core::{Graph, PropagatorBuilder};
///
/// let graph = Graph::build(["A", "B", "C", "D", "E"], [("A", "B"), ("C", "B"), ("D", "E")])?;
/// let propagator = PropagatorBuilder::new().build()?;
/// let history = propagator.run(&graph)?;
/// let last = history.last();
/// assert_eq!(last.label_of(&"C"), Some(&"A"));
/// assert_eq!(last.label_of(&"E"), Some(&"D"));
/// assert_eq!(last.component_count(), 2);
/// # Ok::<(), ripple_core::PropagationError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Propagator {
    execution_strategy: ExecutionStrategy,
    parallel_threshold: usize,
    cancellation: Option<CancellationToken>,
}

impl Default for Propagator {
    fn default() -> Self {
        Self::new(ExecutionStrategy::Auto, DEFAULT_PARALLEL_THRESHOLD, None)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Backend {
    Sequential,
    #[cfg(feature = "parallel")]
    Parallel,
}

impl Propagator {
    pub(crate) fn new(
        execution_strategy: ExecutionStrategy,
        parallel_threshold: usize,
        cancellation: Option<CancellationToken>,
    ) -> Self {
        Self {
            execution_strategy,
            parallel_threshold,
            cancellation,
        }
    }

    /// Returns the execution strategy used when running.
    #[must_use]
    pub fn execution_strategy(&self) -> ExecutionStrategy {
        self.execution_strategy
    }

    /// Returns the node count from which `Auto` runs in parallel.
    #[must_use]
    pub fn parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }

    /// Returns `true` when the attached cancellation token has fired.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancellation
            .as_ref()
            .is_some_and(CancellationToken::is_cancelled)
    }

    /// Propagates labels from the identity assignment until a fixed point.
    ///
    /// The returned [`History`] starts with the identity snapshot. When the
    /// attached [`CancellationToken`] fires, propagation stops at the next
    /// round boundary and the partial history is returned with
    /// [`History::converged`] set to `false`.
    ///
    /// # Errors
    /// Returns [`PropagationError::InternalInvariant`] if labels still change
    /// after `node_count + 1` rounds, which valid graphs never reach, and
    /// [`PropagationError::BackendUnavailable`] when the configured strategy
    /// is not compiled into this build.
    #[instrument(
        name = "core.run",
        err,
        skip(self, graph),
        fields(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            strategy = ?self.execution_strategy
        ),
    )]
    pub fn run<N: NodeId>(&self, graph: &Graph<N>) -> Result<History<N>> {
        let seed = graph.table().ranks().to_vec();
        self.propagate(graph, seed, 0, round_limit(graph))
    }

    /// Propagates labels starting from an existing assignment.
    ///
    /// Use this to resume a cancelled run from its last snapshot, or to
    /// confirm that a converged snapshot is a fixed point. The snapshot must
    /// cover the same nodes, in the same order, as `graph`.
    ///
    /// Round numbers continue from `snapshot.round()`, so a resumed history
    /// lines up with the run it continues: its first snapshot carries the
    /// seed's round and each later snapshot one more. Positions within the
    /// returned [`History`] still start at `0`, and the round cap applies to
    /// the rounds executed by this call.
    ///
    /// # Errors
    /// Returns [`PropagationError::SnapshotMismatch`] when `snapshot` belongs
    /// to a graph with a different node table, plus the errors of
    /// [`Self::run`].
    ///
    /// # Examples
    /// ```
    /// use ripple_core::{Graph, Propagator};
    ///
    /// let graph = Graph::build([1_u32, 2, 3], [(1, 2), (2, 3)])?;
    /// let propagator = Propagator::default();
    /// let history = propagator.run(&graph)?;
    /// let again = propagator.run_from(&graph, history.last())?;
    /// assert_eq!(again.changes(), vec![0]);
    /// assert_eq!(again.last(), history.last());
    /// assert_eq!(again.last().round(), history.rounds() + 1);
    /// # Ok::<(), ripple_core::PropagationError>(())
    /// ```
    #[instrument(
        name = "core.run_from",
        err,
        skip(self, graph, snapshot),
        fields(nodes = graph.node_count(), seed_round = snapshot.round()),
    )]
    pub fn run_from<N: NodeId>(
        &self,
        graph: &Graph<N>,
        snapshot: &Snapshot<N>,
    ) -> Result<History<N>> {
        let same_table = Arc::ptr_eq(graph.table(), snapshot.table())
            || graph.table().ids() == snapshot.table().ids();
        if !same_table {
            return Err(PropagationError::SnapshotMismatch {
                expected: graph.node_count(),
                got: snapshot.len(),
            });
        }
        self.propagate(
            graph,
            snapshot.ranks().to_vec(),
            snapshot.round(),
            round_limit(graph),
        )
    }

    fn propagate<N: NodeId>(
        &self,
        graph: &Graph<N>,
        seed: Vec<usize>,
        first_round: usize,
        limit: usize,
    ) -> Result<History<N>> {
        let backend = self.backend_for(graph.node_count())?;
        let table = Arc::clone(graph.table());
        let adjacency = graph.adjacency();
        record_run();

        let mut current = seed;
        let mut history = History::new(Snapshot::new(
            Arc::clone(&table),
            Arc::from(current.as_slice()),
            first_round,
            0,
        ));

        if adjacency.entry_count() == 0 {
            history.mark_converged();
            info!(rounds = 0, components = graph.node_count(), "no edges; initial labels are final");
            return Ok(history);
        }

        let mut next = vec![0; current.len()];
        let mut round = 0_usize;
        loop {
            if self.is_cancelled() {
                warn!(rounds = round, "propagation cancelled at round boundary");
                return Ok(history);
            }
            if round >= limit {
                return Err(PropagationError::InternalInvariant {
                    rounds: round,
                    limit,
                });
            }

            round += 1;
            let changed = match backend {
                Backend::Sequential => relax::relax_sequential(adjacency, &current, &mut next),
                #[cfg(feature = "parallel")]
                Backend::Parallel => relax::relax_parallel(adjacency, &current, &mut next),
            };
            std::mem::swap(&mut current, &mut next);
            record_round(changed);
            let numbered = first_round.saturating_add(round);
            debug!(round = numbered, changed, "round completed");

            let snapshot = Snapshot::new(
                Arc::clone(&table),
                Arc::from(current.as_slice()),
                numbered,
                changed,
            );
            history.push(snapshot);

            if changed == 0 {
                history.mark_converged();
                info!(
                    rounds = round,
                    components = history.last().component_count(),
                    "propagation converged"
                );
                return Ok(history);
            }
        }
    }

    fn backend_for(&self, nodes: usize) -> Result<Backend> {
        match self.execution_strategy {
            ExecutionStrategy::Sequential => Ok(Backend::Sequential),
            #[cfg(feature = "parallel")]
            ExecutionStrategy::Parallel => Ok(Backend::Parallel),
            #[cfg(not(feature = "parallel"))]
            ExecutionStrategy::Parallel => Err(PropagationError::BackendUnavailable {
                requested: ExecutionStrategy::Parallel,
            }),
            ExecutionStrategy::Auto => Ok(self.auto_backend(nodes)),
        }
    }

    #[cfg(feature = "parallel")]
    fn auto_backend(&self, nodes: usize) -> Backend {
        if nodes >= self.parallel_threshold {
            Backend::Parallel
        } else {
            Backend::Sequential
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn auto_backend(&self, _nodes: usize) -> Backend {
        Backend::Sequential
    }
}

/// Maximum rounds for `graph`: the minimum identifier crosses a component
/// in at most `node_count - 1` hops, plus the confirming round, plus one.
fn round_limit<N: NodeId>(graph: &Graph<N>) -> usize {
    graph.node_count().saturating_add(1)
}

#[cfg(feature = "metrics")]
fn record_run() {
    metrics::counter!("propagation_runs_total").increment(1);
}

#[cfg(not(feature = "metrics"))]
fn record_run() {}

#[cfg(feature = "metrics")]
fn record_round(changed: usize) {
    metrics::counter!("propagation_rounds_total").increment(1);
    metrics::histogram!("propagation_label_changes").record(changed as f64);
}

#[cfg(not(feature = "metrics"))]
fn record_round(_changed: usize) {}

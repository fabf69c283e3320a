//! Ripple core library.
//!
//! Discovers the connected components of an undirected graph by synchronous
//! min-label propagation and records one label [`Snapshot`] per round, so a
//! caller can step forward and backward through the computation.
//!
//! # Metrics
//!
//! When the `metrics` feature is enabled the propagator emits:
//!
//! - `propagation_runs_total` (counter)
//! - `propagation_rounds_total` (counter)
//! - `propagation_label_changes` (histogram, labels changed per round)
//!
//! # Examples
//! ```
//! use ripple_core::Graph;
//!
//! let graph = Graph::build(["A", "B", "C", "X"], [("C", "B"), ("B", "A")])?;
//! let history = ripple_core::run(&graph)?;
//! assert!(history.converged());
//! assert_eq!(history.first().label_of(&"C"), Some(&"C"));
//! assert_eq!(history.last().label_of(&"C"), Some(&"A"));
//! assert_eq!(history.last().label_of(&"X"), Some(&"X"));
//! # Ok::<(), ripple_core::PropagationError>(())
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
mod error;
#[cfg(feature = "generate")]
#[cfg_attr(docsrs, doc(cfg(feature = "generate")))]
pub mod generate;
mod graph;
mod history;
mod node;
mod propagator;
#[cfg(test)]
mod test_utils;

#[cfg(feature = "generate")]
pub use crate::error::{GenerateError, GenerateErrorCode};
pub use crate::{
    builder::{CancellationToken, DEFAULT_PARALLEL_THRESHOLD, ExecutionStrategy, PropagatorBuilder},
    error::{PropagationError, PropagationErrorCode, Result},
    graph::Graph,
    history::{Component, History, Snapshot},
    node::NodeId,
    propagator::Propagator,
};

/// Runs propagation over `graph` with the default [`Propagator`].
///
/// # Errors
/// See [`Propagator::run`].
pub fn run<N: NodeId>(graph: &Graph<N>) -> Result<History<N>> {
    Propagator::default().run(graph)
}

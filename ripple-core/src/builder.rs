//! Builder utilities for configuring label propagation.
//!
//! Exposes the execution strategy selection surface, the round-boundary
//! cancellation token, and builder validation used before constructing
//! [`Propagator`] instances.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use crate::{Result, error::PropagationError, propagator::Propagator};

/// Default node count from which [`ExecutionStrategy::Auto`] relaxes rounds
/// in parallel.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 4096;

/// Indicates how [`Propagator`] relaxes the nodes of a round.
///
/// `Auto` resolves deterministically: it uses the Rayon backend when the
/// `parallel` feature is compiled in and the graph has at least the
/// configured parallel threshold of nodes, and the sequential loop
/// otherwise. Every strategy produces the same history.
///
/// # Examples
/// ```
/// use ripple_core::ExecutionStrategy;
///
/// let strategy = ExecutionStrategy::default();
/// assert_eq!(strategy, ExecutionStrategy::Auto);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExecutionStrategy {
    /// Allow the library to select a backend from the graph size.
    #[default]
    Auto,
    /// Relax every node on the calling thread.
    Sequential,
    /// Relax nodes across the Rayon thread pool.
    Parallel,
}

/// Cooperative cancellation flag checked at every round boundary.
///
/// Clones share the same flag, so one clone can be handed to another thread
/// while the propagator holds the other.
///
/// # Examples
/// ```
/// use ripple_core::CancellationToken;
///
/// let token = CancellationToken::new();
/// let remote = token.clone();
/// remote.cancel();
/// assert!(token.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    /// Creates a token that has not been cancelled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation. Propagation stops before its next round.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Returns `true` once [`Self::cancel`] has been called on any clone.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Configures and constructs [`Propagator`] instances.
///
/// # Examples
/// ```
/// use ripple_core::{ExecutionStrategy, PropagatorBuilder};
///
/// let propagator = PropagatorBuilder::new()
///     .with_execution_strategy(ExecutionStrategy::Sequential)
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(propagator.execution_strategy(), ExecutionStrategy::Sequential);
/// ```
#[derive(Debug, Clone)]
pub struct PropagatorBuilder {
    execution_strategy: ExecutionStrategy,
    parallel_threshold: usize,
    cancellation: Option<CancellationToken>,
}

impl Default for PropagatorBuilder {
    fn default() -> Self {
        Self {
            execution_strategy: ExecutionStrategy::Auto,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            cancellation: None,
        }
    }
}

impl PropagatorBuilder {
    /// Creates a builder populated with default parameters.
    ///
    /// # Examples
    /// ```
    /// use ripple_core::{ExecutionStrategy, PropagatorBuilder, DEFAULT_PARALLEL_THRESHOLD};
    ///
    /// let builder = PropagatorBuilder::new();
    /// assert_eq!(builder.execution_strategy(), ExecutionStrategy::Auto);
    /// assert_eq!(builder.parallel_threshold(), DEFAULT_PARALLEL_THRESHOLD);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the execution strategy to use when running propagation.
    #[must_use]
    pub fn with_execution_strategy(mut self, strategy: ExecutionStrategy) -> Self {
        self.execution_strategy = strategy;
        self
    }

    /// Returns the currently configured execution strategy.
    #[must_use]
    pub fn execution_strategy(&self) -> ExecutionStrategy {
        self.execution_strategy
    }

    /// Overrides the node count from which [`ExecutionStrategy::Auto`] goes
    /// parallel.
    ///
    /// # Examples
    /// ```
    /// use ripple_core::PropagatorBuilder;
    ///
    /// let builder = PropagatorBuilder::new().with_parallel_threshold(64);
    /// assert_eq!(builder.parallel_threshold(), 64);
    /// ```
    #[must_use]
    pub fn with_parallel_threshold(mut self, nodes: usize) -> Self {
        self.parallel_threshold = nodes;
        self
    }

    /// Returns the configured parallel threshold.
    #[must_use]
    pub fn parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }

    /// Attaches a cancellation token observed between rounds.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Validates the configuration and constructs a [`Propagator`].
    ///
    /// # Errors
    /// Returns [`PropagationError::InvalidParallelThreshold`] when the
    /// threshold is zero and [`PropagationError::BackendUnavailable`] when
    /// [`ExecutionStrategy::Parallel`] is requested without the `parallel`
    /// feature.
    ///
    /// # Examples
    /// ```
    /// use ripple_core::{PropagationError, PropagatorBuilder};
    ///
    /// let err = PropagatorBuilder::new()
    ///     .with_parallel_threshold(0)
    ///     .build()
    ///     .expect_err("zero threshold is rejected");
    /// assert!(matches!(err, PropagationError::InvalidParallelThreshold { got: 0 }));
    /// ```
    pub fn build(self) -> Result<Propagator> {
        if self.parallel_threshold == 0 {
            return Err(PropagationError::InvalidParallelThreshold {
                got: self.parallel_threshold,
            });
        }

        #[cfg(not(feature = "parallel"))]
        if self.execution_strategy == ExecutionStrategy::Parallel {
            return Err(PropagationError::BackendUnavailable {
                requested: ExecutionStrategy::Parallel,
            });
        }

        Ok(Propagator::new(
            self.execution_strategy,
            self.parallel_threshold,
            self.cancellation,
        ))
    }
}

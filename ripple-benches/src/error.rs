//! Benchmark setup error type.
//!
//! Lets setup functions propagate failures with `?` instead of using
//! `.expect()`.

use ripple_core::PropagationError;

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Graph construction or propagator configuration failed.
    #[error("propagation setup failed: {0}")]
    Propagation(#[from] PropagationError),
    /// A zero value was passed where a non-zero integer was required.
    #[error("expected a non-zero value for {context}")]
    ZeroValue {
        /// A description of the parameter that was unexpectedly zero.
        context: &'static str,
    },
}

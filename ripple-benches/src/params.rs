//! Benchmark parameter types.

use std::fmt;

use ripple_core::ExecutionStrategy;

use crate::graphs::GraphSpec;

/// Parameters for one propagation benchmark run.
#[derive(Clone, Debug)]
pub struct PropagationBenchParams {
    /// Graph to propagate over.
    pub graph: GraphSpec,
    /// How each round is relaxed.
    pub strategy: ExecutionStrategy,
}

impl fmt::Display for PropagationBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let strategy = match self.strategy {
            ExecutionStrategy::Sequential => "seq",
            ExecutionStrategy::Parallel => "par",
            ExecutionStrategy::Auto => "auto",
        };
        write!(f, "{},{strategy}", self.graph)
    }
}

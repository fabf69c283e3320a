//! Error types for the ripple core library.
//!
//! Defines the error enums exposed by the public API, their stable
//! machine-readable codes, and a convenient result alias.

use std::{fmt, sync::Arc};

use thiserror::Error;

use crate::builder::ExecutionStrategy;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Error type produced when building graphs or running propagation.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum PropagationError {
    /// An edge referenced a node identifier absent from the node set.
    #[error("edge {edge_index} references unknown node `{node}`")]
    InvalidEdge {
        /// Display form of the dangling identifier.
        node: Arc<str>,
        /// Position of the offending edge in the supplied edge list.
        edge_index: usize,
    },
    /// Propagation kept changing labels past the theoretical round bound.
    #[error("propagation exceeded {limit} rounds (reached {rounds}); adjacency is inconsistent")]
    InternalInvariant {
        /// Rounds executed when the guard tripped.
        rounds: usize,
        /// Maximum number of rounds permitted for the graph.
        limit: usize,
    },
    /// The requested execution strategy is unavailable in the current build.
    #[error("the requested execution strategy {requested:?} is not available in this build")]
    BackendUnavailable {
        /// Strategy that could not be satisfied by the current build.
        requested: ExecutionStrategy,
    },
    /// The parallel threshold must be greater than zero.
    #[error("parallel_threshold must be at least 1 (got {got})")]
    InvalidParallelThreshold {
        /// The invalid threshold supplied by the caller.
        got: usize,
    },
    /// A snapshot used to seed propagation belongs to a different graph.
    #[error("snapshot covers {got} nodes from another graph; expected this graph's {expected} nodes")]
    SnapshotMismatch {
        /// Number of nodes in the target graph.
        expected: usize,
        /// Number of nodes in the supplied snapshot.
        got: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`PropagationError`] variants.
    enum PropagationErrorCode for PropagationError {
        /// An edge referenced a node identifier absent from the node set.
        InvalidEdge => InvalidEdge { .. } => "RIPPLE_INVALID_EDGE",
        /// Propagation exceeded the theoretical round bound.
        InternalInvariant => InternalInvariant { .. } => "RIPPLE_INTERNAL_INVARIANT",
        /// The requested execution strategy is unavailable in the current build.
        BackendUnavailable => BackendUnavailable { .. } => "RIPPLE_BACKEND_UNAVAILABLE",
        /// The parallel threshold must be greater than zero.
        InvalidParallelThreshold => InvalidParallelThreshold { .. } => "RIPPLE_INVALID_PARALLEL_THRESHOLD",
        /// A seeding snapshot belongs to a different graph.
        SnapshotMismatch => SnapshotMismatch { .. } => "RIPPLE_SNAPSHOT_MISMATCH",
    }
}

/// Errors raised when a random graph configuration is invalid.
#[cfg(feature = "generate")]
#[cfg_attr(docsrs, doc(cfg(feature = "generate")))]
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum GenerateError {
    /// A generated graph needs at least one node.
    #[error("node_count must be at least 1")]
    ZeroNodes,
    /// Edge probability must be a finite value within `[0, 1]`.
    #[error("edge probability must lie within [0, 1] (got {got})")]
    InvalidProbability {
        /// The rejected probability.
        got: f64,
    },
}

#[cfg(feature = "generate")]
define_error_codes! {
    /// Stable codes describing [`GenerateError`] variants.
    enum GenerateErrorCode for GenerateError {
        /// A generated graph needs at least one node.
        ZeroNodes => ZeroNodes => "RIPPLE_GENERATE_ZERO_NODES",
        /// Edge probability must be a finite value within `[0, 1]`.
        InvalidProbability => InvalidProbability { .. } => "RIPPLE_GENERATE_INVALID_PROBABILITY",
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, PropagationError>;

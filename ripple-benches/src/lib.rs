//! Benchmark support crate for ripple.
//!
//! Provides seeded graph families and parameter types used by the Criterion
//! propagation benchmarks.

pub mod error;
pub mod graphs;
pub mod params;

//! Property-based tests for synchronous label propagation.
//!
//! Checks every snapshot against a breadth-first reference, validates the
//! final labelling against independently computed components, and checks
//! that node order, edge order, and execution strategy never change the
//! history.

mod equivalence;
mod oracle;
mod strategies;
mod structural;
mod types;

//! Command-line interface orchestration for ripple.
//!
//! `run` loads a graph from an edge list or a node-link JSON document,
//! propagates labels, and reports every round. Identifiers are integers or
//! text per file, so numeric graphs order numerically. `generate` prints a
//! random graph in the edge-list format `run` reads.

mod commands;
mod ids;
mod input;
mod render;

pub use commands::{
    Cli, CliError, Command, CommandOutput, GenerateCommand, InputFormat, OutputFormat,
    PropagationSummary, RunCommand, StrategyArg, run_cli,
};
pub use ids::{IdKind, NodeKey};
pub use render::render_output;

#[cfg(test)]
mod test_helpers;

//! Command implementations and argument parsing for the ripple CLI.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use ripple_core::{
    ExecutionStrategy, GenerateError, Graph, History, PropagationError, PropagatorBuilder,
    generate::{GeneratedGraph, RandomGraphConfig},
};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

use super::ids::{GraphInput, IdKind, NodeKey};
use super::input;

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "ripple",
    about = "Find connected components by label propagation and replay every round."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Propagate labels over a graph file and report every round.
    Run(RunCommand),
    /// Print a random graph as an edge list.
    Generate(GenerateCommand),
}

/// Options accepted by the `run` command.
#[derive(Debug, Args, Clone)]
pub struct RunCommand {
    /// Graph file to read.
    pub path: PathBuf,

    /// Format of the graph file.
    #[arg(long, value_enum, default_value_t = InputFormat::EdgeList)]
    pub input: InputFormat,

    /// Format of the report written to stdout.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,

    /// How node identifiers are read and ordered.
    #[arg(long, value_enum, default_value_t = IdKind::Auto)]
    pub ids: IdKind,

    /// How each round is relaxed.
    #[arg(long, value_enum, default_value_t = StrategyArg::Auto)]
    pub strategy: StrategyArg,
}

/// Options accepted by the `generate` command.
#[derive(Debug, Args, Clone)]
pub struct GenerateCommand {
    /// Number of nodes, identified `0..nodes`.
    #[arg(long, value_parser = clap::value_parser!(usize))]
    pub nodes: usize,

    /// Probability that any pair of nodes is joined.
    #[arg(long = "edge-probability")]
    pub edge_probability: f64,

    /// Seed for reproducible output.
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Graph file formats accepted by `run`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    /// One node or one whitespace-separated edge per line; `#` starts a
    /// comment.
    #[value(name = "edgelist")]
    EdgeList,
    /// A `{"nodes": [{"id"}], "links": [{"source", "target"}]}` document.
    Json,
}

/// Report formats written by `run`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Summary header, per-round change counts, and final labels.
    Text,
    /// Links plus the labels of every round, for replay in a renderer.
    Json,
}

/// Execution strategies selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    /// Choose by graph size.
    Auto,
    /// Relax on the calling thread.
    Sequential,
    /// Relax across the Rayon pool.
    Parallel,
}

impl From<StrategyArg> for ExecutionStrategy {
    fn from(value: StrategyArg) -> Self {
        match value {
            StrategyArg::Auto => Self::Auto,
            StrategyArg::Sequential => Self::Sequential,
            StrategyArg::Parallel => Self::Parallel,
        }
    }
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// File I/O failed while loading the graph.
    #[error("failed to read `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// An edge-list line could not be understood.
    #[error("line {line}: {reason}")]
    Parse {
        /// One-based line number.
        line: usize,
        /// What was wrong with the line.
        reason: String,
    },
    /// A JSON graph document was malformed.
    #[error("invalid JSON graph in `{path}`: {source}")]
    Json {
        /// Path of the document.
        path: PathBuf,
        /// Underlying decoding error.
        #[source]
        source: serde_json::Error,
    },
    /// Node identifiers could not be read as one kind.
    #[error("invalid node identifiers in `{path}`: {reason}")]
    Ids {
        /// Path of the graph file.
        path: PathBuf,
        /// Which identifier was rejected and why.
        reason: String,
    },
    /// Graph construction or propagation failed.
    #[error(transparent)]
    Core(#[from] PropagationError),
    /// Random graph parameters were rejected.
    #[error(transparent)]
    Generate(#[from] GenerateError),
}

impl CliError {
    /// Returns the stable code of the underlying library error, if any.
    #[must_use]
    pub fn code(&self) -> Option<&'static str> {
        match self {
            Self::Core(err) => Some(err.code().as_str()),
            Self::Generate(err) => Some(err.code().as_str()),
            Self::Io { .. } | Self::Parse { .. } | Self::Json { .. } | Self::Ids { .. } => None,
        }
    }
}

/// Everything `run` needs to render its report.
#[derive(Debug, Clone)]
pub struct PropagationSummary {
    /// Name derived from the input file stem.
    pub source: String,
    /// Requested report format.
    pub output: OutputFormat,
    /// Edges exactly as read from the input.
    pub edges: Vec<(NodeKey, NodeKey)>,
    /// Distinct undirected edges after normalisation.
    pub distinct_edges: usize,
    /// Round-by-round labels.
    pub history: History<NodeKey>,
}

/// Result of a CLI command, ready for rendering.
#[derive(Debug, Clone)]
pub enum CommandOutput {
    /// Report of a `run` command.
    Propagation(PropagationSummary),
    /// Graph produced by `generate`.
    Generated(GeneratedGraph),
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when reading input, building the graph, or running
/// propagation fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use ripple_cli::cli::{
/// #     Cli, Command, CommandOutput, IdKind, InputFormat, OutputFormat, RunCommand, StrategyArg,
/// #     run_cli,
/// # };
/// # use tempfile::NamedTempFile;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let file = NamedTempFile::new()?;
/// std::fs::write(file.path(), "A B\nB C\nD\n")?;
/// let cli = Cli {
///     command: Command::Run(RunCommand {
///         path: file.path().to_path_buf(),
///         input: InputFormat::EdgeList,
///         output: OutputFormat::Text,
///         ids: IdKind::Auto,
///         strategy: StrategyArg::Sequential,
///     }),
/// };
/// let CommandOutput::Propagation(summary) = run_cli(cli)? else {
///     unreachable!("run produces a propagation summary");
/// };
/// assert_eq!(summary.history.last().component_count(), 2);
/// # Ok(())
/// # }
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli),
    fields(command = field::Empty),
)]
pub fn run_cli(cli: Cli) -> Result<CommandOutput, CliError> {
    match cli.command {
        Command::Run(run) => {
            Span::current().record("command", field::display("run"));
            run_command(run).map(CommandOutput::Propagation)
        }
        Command::Generate(generate) => {
            Span::current().record("command", field::display("generate"));
            generate_command(&generate).map(CommandOutput::Generated)
        }
    }
}

#[instrument(
    name = "cli.execute",
    err,
    skip(command),
    fields(
        input = field::Empty,
        ids = field::Empty,
        strategy = field::Empty,
        rounds = field::Empty,
    ),
)]
pub(super) fn run_command(command: RunCommand) -> Result<PropagationSummary, CliError> {
    let RunCommand {
        path,
        input,
        output,
        ids,
        strategy,
    } = command;
    let span = Span::current();
    span.record("input", field::debug(input));
    span.record("ids", field::debug(ids));
    span.record("strategy", field::debug(strategy));

    let propagator = PropagatorBuilder::new()
        .with_execution_strategy(strategy.into())
        .build()?;
    let GraphInput { nodes, edges } = load_graph(&path, input, ids)?;
    let graph = Graph::build(nodes, edges)?;
    let history = propagator.run(&graph)?;
    span.record("rounds", history.rounds());

    let source = derive_source_name(&path);
    info!(
        source = source.as_str(),
        nodes = graph.node_count(),
        rounds = history.rounds(),
        components = history.last().component_count(),
        "command completed"
    );
    Ok(PropagationSummary {
        source,
        output,
        edges: graph.edges().to_vec(),
        distinct_edges: graph.edge_count(),
        history,
    })
}

#[instrument(
    name = "cli.generate",
    err,
    skip(command),
    fields(nodes = command.nodes, seed = ?command.seed),
)]
pub(super) fn generate_command(command: &GenerateCommand) -> Result<GeneratedGraph, CliError> {
    let mut config = RandomGraphConfig::new(command.nodes, command.edge_probability);
    if let Some(seed) = command.seed {
        config = config.with_seed(seed);
    }
    Ok(config.generate()?)
}

#[instrument(
    name = "cli.load_graph",
    err,
    fields(path = %path.display(), format = ?format, ids = ?ids),
)]
pub(super) fn load_graph(
    path: &Path,
    format: InputFormat,
    ids: IdKind,
) -> Result<GraphInput, CliError> {
    let file = File::open(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    let raw = match format {
        InputFormat::EdgeList => input::parse_edge_list(reader, path)?,
        InputFormat::Json => input::parse_json_graph(reader, path)?,
    };
    raw.resolve(ids, path)
}

pub(super) fn derive_source_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|value| value.to_str())
        .map_or_else(|| "graph".to_owned(), ToOwned::to_owned)
}

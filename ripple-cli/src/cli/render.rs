//! Report rendering for CLI command output.

use std::collections::BTreeSet;
use std::io::{self, Write};

use ripple_core::{Snapshot, generate::GeneratedGraph};
use serde::Serialize;

use super::commands::{CommandOutput, OutputFormat, PropagationSummary};
use super::ids::NodeKey;

/// Renders `output` to `writer` in the format the command asked for.
///
/// # Errors
/// Returns [`io::Error`] if writing or JSON encoding fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use ripple_cli::cli::{CommandOutput, render_output};
/// # use ripple_core::generate::RandomGraphConfig;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let graph = RandomGraphConfig::new(3, 0.0).with_seed(1).generate()?;
/// let mut buffer = Vec::new();
/// render_output(&CommandOutput::Generated(graph), &mut buffer)?;
/// assert_eq!(String::from_utf8(buffer)?, "# nodes=3 edges=0\n0\n1\n2\n");
/// # Ok(())
/// # }
/// ```
pub fn render_output(output: &CommandOutput, writer: impl Write) -> io::Result<()> {
    match output {
        CommandOutput::Propagation(summary) => match summary.output {
            OutputFormat::Text => render_text(summary, writer),
            OutputFormat::Json => render_json(summary, writer),
        },
        CommandOutput::Generated(graph) => render_edge_list(graph, writer),
    }
}

fn render_text(summary: &PropagationSummary, mut writer: impl Write) -> io::Result<()> {
    let history = &summary.history;
    let last = history.last();
    writeln!(writer, "source: {}", summary.source)?;
    writeln!(writer, "nodes: {}", last.len())?;
    writeln!(writer, "edges: {}", summary.distinct_edges)?;
    writeln!(writer, "rounds: {}", history.rounds())?;
    writeln!(writer, "converged: {}", history.converged())?;
    writeln!(writer, "components: {}", last.component_count())?;
    for snapshot in history.iter().skip(1) {
        writeln!(writer, "round {}\t{}", snapshot.round(), snapshot.changed())?;
    }
    for component in last.components() {
        for member in component.members() {
            writeln!(writer, "{member}\t{}", component.label())?;
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct JsonReport<'a> {
    links: Vec<JsonLink<'a>>,
    nodes_at_iterations: Vec<Vec<JsonNode<'a>>>,
}

#[derive(Serialize)]
struct JsonLink<'a> {
    source: &'a NodeKey,
    target: &'a NodeKey,
}

#[derive(Serialize)]
struct JsonNode<'a> {
    id: &'a NodeKey,
    cluster: &'a NodeKey,
}

/// Integer identifiers serialise as JSON numbers, text as strings.
fn json_nodes(snapshot: &Snapshot<NodeKey>) -> Vec<JsonNode<'_>> {
    snapshot
        .iter()
        .map(|(id, label)| JsonNode { id, cluster: label })
        .collect()
}

fn render_json(summary: &PropagationSummary, mut writer: impl Write) -> io::Result<()> {
    let report = JsonReport {
        links: summary
            .edges
            .iter()
            .map(|(source, target)| JsonLink { source, target })
            .collect(),
        nodes_at_iterations: summary.history.iter().map(json_nodes).collect(),
    };
    serde_json::to_writer_pretty(&mut writer, &report)?;
    writeln!(writer)
}

/// Writes a header comment, then one line per edge, then isolated nodes on
/// their own, so the output reads back through the edge-list parser.
fn render_edge_list(graph: &GeneratedGraph, mut writer: impl Write) -> io::Result<()> {
    writeln!(
        writer,
        "# nodes={} edges={}",
        graph.nodes.len(),
        graph.edges.len()
    )?;
    let mut linked = BTreeSet::new();
    for &(source, target) in &graph.edges {
        writeln!(writer, "{source} {target}")?;
        linked.insert(source);
        linked.insert(target);
    }
    for node in graph.nodes.iter().filter(|node| !linked.contains(*node)) {
        writeln!(writer, "{node}")?;
    }
    Ok(())
}

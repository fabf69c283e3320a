//! Graph file parsing for the `run` command.

use std::io::BufRead;
use std::path::Path;

use serde::Deserialize;

use super::commands::CliError;
use super::ids::{RawGraph, RawId};

fn declare(graph: &mut RawGraph, token: &str) -> RawId {
    let id = RawId::Token(token.to_owned());
    graph.nodes.push(id.clone());
    id
}

/// Parses a whitespace-separated edge list.
///
/// A line holding one token declares a node; two tokens declare an edge and
/// both of its endpoints. Text after `#` is ignored, as are blank lines.
pub(crate) fn parse_edge_list(reader: impl BufRead, path: &Path) -> Result<RawGraph, CliError> {
    let mut graph = RawGraph::default();
    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| CliError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let content = line.split('#').next().unwrap_or_default();
        let tokens: Vec<&str> = content.split_whitespace().collect();
        match tokens.as_slice() {
            [] => {}
            [node] => {
                declare(&mut graph, node);
            }
            [source, target] => {
                let source = declare(&mut graph, source);
                let target = declare(&mut graph, target);
                graph.edges.push((source, target));
            }
            _ => {
                return Err(CliError::Parse {
                    line: index + 1,
                    reason: format!("expected one node or two endpoints, found {} tokens", tokens.len()),
                });
            }
        }
    }
    Ok(graph)
}

#[derive(Deserialize)]
struct JsonGraph {
    nodes: Vec<JsonNode>,
    #[serde(default)]
    links: Vec<JsonLink>,
}

#[derive(Deserialize)]
struct JsonNode {
    id: JsonId,
}

#[derive(Deserialize)]
struct JsonLink {
    source: JsonId,
    target: JsonId,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonId {
    Text(String),
    Number(serde_json::Number),
}

impl From<JsonId> for RawId {
    fn from(value: JsonId) -> Self {
        match value {
            JsonId::Text(text) => Self::Text(text),
            JsonId::Number(number) => Self::Number(number),
        }
    }
}

/// Parses a node-link JSON document.
///
/// Identifiers keep their JSON kind until [`RawGraph::resolve`] settles
/// them. Links are taken as written: a link naming an undeclared node is
/// left for [`ripple_core::Graph::build`] to reject.
pub(crate) fn parse_json_graph(reader: impl BufRead, path: &Path) -> Result<RawGraph, CliError> {
    let document: JsonGraph = serde_json::from_reader(reader).map_err(|source| CliError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(RawGraph {
        nodes: document.nodes.into_iter().map(|node| node.id.into()).collect(),
        edges: document
            .links
            .into_iter()
            .map(|link| (link.source.into(), link.target.into()))
            .collect(),
    })
}

//! Node identifiers read from graph files.
//!
//! A graph file uses one identifier kind throughout. Integer identifiers
//! order numerically and render back as JSON numbers; text identifiers order
//! lexicographically.

use std::fmt;
use std::path::Path;

use clap::ValueEnum;
use serde::Serialize;

use super::commands::CliError;

/// A node identifier as read from a graph file.
///
/// # Examples
/// ```
/// use ripple_cli::cli::NodeKey;
///
/// assert!(NodeKey::from(9) < NodeKey::from(10));
/// assert!(NodeKey::from("10") < NodeKey::from("9"));
/// assert_eq!(NodeKey::from(7).to_string(), "7");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(untagged)]
pub enum NodeKey {
    /// An integer identifier.
    Numeric(i64),
    /// A text identifier.
    Text(String),
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

impl From<i64> for NodeKey {
    fn from(value: i64) -> Self {
        Self::Numeric(value)
    }
}

impl From<&str> for NodeKey {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

/// How identifiers in a graph file are interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum IdKind {
    /// Integers when every identifier is one, text otherwise. JSON documents
    /// must not mix numbers and strings.
    #[default]
    Auto,
    /// Every identifier is text, ordered lexicographically.
    Text,
    /// Every identifier must be an integer, ordered numerically.
    Numeric,
}

/// An identifier before its kind is settled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum RawId {
    /// A bare edge-list token, which may hold either kind.
    Token(String),
    /// A JSON string.
    Text(String),
    /// A JSON number.
    Number(serde_json::Number),
}

impl RawId {
    fn as_text(&self) -> String {
        match self {
            Self::Token(text) | Self::Text(text) => text.clone(),
            Self::Number(number) => number.to_string(),
        }
    }

    fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Token(text) | Self::Text(text) => text.parse().ok(),
            Self::Number(number) => number.as_i64(),
        }
    }
}

/// Nodes and edges with settled identifiers, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct GraphInput {
    pub(crate) nodes: Vec<NodeKey>,
    pub(crate) edges: Vec<(NodeKey, NodeKey)>,
}

/// Nodes and edges as written in the file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct RawGraph {
    pub(crate) nodes: Vec<RawId>,
    pub(crate) edges: Vec<(RawId, RawId)>,
}

impl RawGraph {
    fn ids(&self) -> impl Iterator<Item = &RawId> {
        self.nodes
            .iter()
            .chain(self.edges.iter().flat_map(|(source, target)| [source, target]))
    }

    /// Settles every identifier to one kind.
    ///
    /// `Auto` picks integers for edge lists whose tokens all parse as `i64`
    /// and for JSON documents whose identifiers are numbers; a fractional
    /// JSON number is then rejected rather than read as text.
    pub(crate) fn resolve(self, kind: IdKind, path: &Path) -> Result<GraphInput, CliError> {
        let numeric = match kind {
            IdKind::Text => false,
            IdKind::Numeric => true,
            IdKind::Auto => self.infer_numeric(path)?,
        };
        if !numeric {
            return Ok(self.map(|id| Some(NodeKey::Text(id.as_text()))).unwrap_or_default());
        }
        if let Some(bad) = self.ids().find(|id| id.as_integer().is_none()) {
            return Err(CliError::Ids {
                path: path.to_path_buf(),
                reason: format!("`{}` is not an integer identifier", bad.as_text()),
            });
        }
        Ok(self
            .map(|id| id.as_integer().map(NodeKey::Numeric))
            .unwrap_or_default())
    }

    fn infer_numeric(&self, path: &Path) -> Result<bool, CliError> {
        let mut numbers = 0_usize;
        let mut strings = 0_usize;
        let mut all_integers = true;
        for id in self.ids() {
            match id {
                RawId::Number(_) => numbers += 1,
                RawId::Text(_) => strings += 1,
                RawId::Token(_) => {}
            }
            all_integers &= id.as_integer().is_some();
        }
        if numbers > 0 && strings > 0 {
            return Err(CliError::Ids {
                path: path.to_path_buf(),
                reason: format!(
                    "identifiers mix {numbers} numbers and {strings} strings; use one kind"
                ),
            });
        }
        Ok(strings == 0 && (numbers > 0 || all_integers))
    }

    fn map(&self, convert: impl Fn(&RawId) -> Option<NodeKey>) -> Option<GraphInput> {
        let nodes = self.nodes.iter().map(&convert).collect::<Option<Vec<_>>>()?;
        let edges = self
            .edges
            .iter()
            .map(|(source, target)| Some((convert(source)?, convert(target)?)))
            .collect::<Option<Vec<_>>>()?;
        Some(GraphInput { nodes, edges })
    }
}

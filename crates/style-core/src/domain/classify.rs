//! Node classification for generic editors.
//!
//! A UI that renders an arbitrary style tree needs to know, for each node,
//! which widget to draw: a text box, a checkbox plus text box, a dropdown, a
//! list editor or a nested group.  [`classify`] answers that question and
//! [`enum_values`] supplies the dropdown choices.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::navigate::{resolve, PathResolutionError};
use crate::domain::node::StyleNode;
use crate::domain::path::StylePath;

/// The five shapes a node can have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    Scalar,
    OptionalScalar,
    Enum,
    List,
    Struct,
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Shape::Scalar => "a scalar",
            Shape::OptionalScalar => "an optional scalar",
            Shape::Enum => "an enum",
            Shape::List => "a list",
            Shape::Struct => "a struct",
        };
        f.write_str(label)
    }
}

/// Returns the shape of `node`.
///
/// An optional leaf is [`Shape::OptionalScalar`] whether or not its value is
/// currently present.
pub fn classify(node: &StyleNode) -> Shape {
    match node {
        StyleNode::Scalar(_) => Shape::Scalar,
        StyleNode::Optional { .. } => Shape::OptionalScalar,
        StyleNode::Enum(_) => Shape::Enum,
        StyleNode::List(_) => Shape::List,
        StyleNode::Struct(_) => Shape::Struct,
    }
}

/// Resolves `path` under `root` and classifies the target.
pub fn classify_at(root: &StyleNode, path: &StylePath) -> Result<Shape, PathResolutionError> {
    resolve(root, path).map(classify)
}

/// Returns the legal member names for an enum node, in declaration order.
///
/// Returns `None` for any other shape.
pub fn enum_values(node: &StyleNode) -> Option<&'static [&'static str]> {
    node.as_enum().map(|v| v.enum_type().members)
}

/// One visited node produced by [`walk`].
#[derive(Debug, Clone)]
pub struct NodeEntry<'a> {
    pub path: StylePath,
    pub depth: usize,
    pub node: &'a StyleNode,
}

/// Visits every node in pre-order, root first, struct fields in declaration
/// order and list items in index order.
pub fn walk(root: &StyleNode) -> Vec<NodeEntry<'_>> {
    let mut out = Vec::new();
    visit(root, StylePath::root(), 0, &mut out);
    out
}

fn visit<'a>(node: &'a StyleNode, path: StylePath, depth: usize, out: &mut Vec<NodeEntry<'a>>) {
    out.push(NodeEntry {
        path: path.clone(),
        depth,
        node,
    });
    match node {
        StyleNode::Struct(s) => {
            for (name, child) in s.fields() {
                visit(child, path.field(name), depth + 1, out);
            }
        }
        StyleNode::List(l) => {
            for (i, child) in l.items().iter().enumerate() {
                visit(child, path.index(i), depth + 1, out);
            }
        }
        _ => {}
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

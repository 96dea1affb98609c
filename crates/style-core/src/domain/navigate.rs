//! Read-only path resolution.
//!
//! [`resolve_chain`] walks a [`StylePath`] from the root and returns every node
//! visited, root first and target last.  The mutator uses the same per-step
//! function ([`child`]) so reads and writes agree on what a path means.

use thiserror::Error;

use crate::domain::classify::{classify, Shape};
use crate::domain::node::StyleNode;
use crate::domain::path::{PathSegment, StylePath};

/// Errors produced when a path does not match the tree it is applied to.
///
/// `at` is the textual path of the container the failing segment was
/// applied to (`<root>` for the root).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathResolutionError {
    #[error("`{at}` is {shape}, cannot select field `{field}`")]
    NotAStruct {
        at: String,
        shape: Shape,
        field: String,
    },

    #[error("`{at}` is {shape}, cannot select index {index}")]
    NotAList {
        at: String,
        shape: Shape,
        index: usize,
    },

    #[error("`{at}` has no field `{field}`")]
    UnknownField { at: String, field: String },

    #[error("index {index} is out of bounds for `{at}` (length {len})")]
    IndexOutOfBounds { at: String, index: usize, len: usize },
}

/// Applies one segment to `container`.
///
/// `at` is the path of `container` and only feeds error messages.
pub fn child<'a>(
    container: &'a StyleNode,
    segment: &PathSegment,
    at: &StylePath,
) -> Result<&'a StyleNode, PathResolutionError> {
    match (container, segment) {
        (StyleNode::Struct(s), PathSegment::Field(name)) => {
            s.get(name).ok_or_else(|| PathResolutionError::UnknownField {
                at: at.describe(),
                field: name.clone(),
            })
        }
        (StyleNode::List(l), PathSegment::Index(index)) => {
            l.get(*index).ok_or_else(|| PathResolutionError::IndexOutOfBounds {
                at: at.describe(),
                index: *index,
                len: l.len(),
            })
        }
        (other, PathSegment::Field(name)) => Err(PathResolutionError::NotAStruct {
            at: at.describe(),
            shape: classify(other),
            field: name.clone(),
        }),
        (other, PathSegment::Index(index)) => Err(PathResolutionError::NotAList {
            at: at.describe(),
            shape: classify(other),
            index: *index,
        }),
    }
}

/// Resolves `path` and returns the chain of visited nodes.
///
/// The result has `path.len() + 1` entries: the root first, the target last.
pub fn resolve_chain<'a>(
    root: &'a StyleNode,
    path: &StylePath,
) -> Result<Vec<&'a StyleNode>, PathResolutionError> {
    let mut chain = Vec::with_capacity(path.len() + 1);
    let mut current = root;
    chain.push(current);
    for (depth, segment) in path.segments().iter().enumerate() {
        current = child(current, segment, &path.prefix(depth))?;
        chain.push(current);
    }
    Ok(chain)
}

/// Resolves `path` and returns only the target node.
pub fn resolve<'a>(root: &'a StyleNode, path: &StylePath) -> Result<&'a StyleNode, PathResolutionError> {
    let mut current = root;
    for (depth, segment) in path.segments().iter().enumerate() {
        current = child(current, segment, &path.prefix(depth))?;
    }
    Ok(current)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

//! # style-core
//!
//! Shared library for the web demangler's style editor.  It holds the
//! path-addressed style tree, the clang-format style schema and presets, and
//! the text codec used to persist a working style.
//!
//! This crate has zero dependencies on storage, async runtimes or UI code.
//!
//! # Architecture overview (for beginners)
//!
//! The formatter accepts a *style*: a nested configuration object with a few
//! dozen options, some of them structs (`BraceWrapping`), some lists
//! (`IncludeCategories`), some enums (`PointerAlignment`).  A generic editor
//! wants to show and change any of these options without hard-coding each one.
//!
//! - **`domain`** – The tree every style is built from.  A [`StyleNode`] is one
//!   of five shapes (scalar, optional scalar, enum, list, struct).  A
//!   [`StylePath`] addresses any node, the navigator resolves paths, the
//!   classifier tells the UI what it is looking at, and the [`TreeMutator`]
//!   rewrites a leaf and writes the change back up to the root.
//!
//! - **`style`** – The concrete clang-format schema (field names, enum types,
//!   list element templates) and the nine named presets.
//!
//! - **`persist`** – Converts a style to YAML text and back, the same dump
//!   format `clang-format --dump-config` produces.

pub mod domain;
pub mod persist;
pub mod style;

// Re-export the most-used types at the crate root so callers can write
// `style_core::StyleNode` instead of `style_core::domain::node::StyleNode`.
pub use domain::classify::{classify, classify_at, enum_values, walk, NodeEntry, Shape};
pub use domain::edit::{Edit, EditError};
pub use domain::enums::{EnumType, EnumValue};
pub use domain::mutate::{ContainerAccess, TreeMutator, ValueAccess};
pub use domain::navigate::{resolve, resolve_chain, PathResolutionError};
pub use domain::node::{ListNode, ScalarKind, ScalarValue, StructNode, StyleNode};
pub use domain::path::{PathParseError, PathSegment, StylePath};
pub use persist::codec::{deserialize_style, serialize_style, SerializationFormatError};
pub use style::presets::{Preset, UnknownPresetError};

//! Collaborator ports.
//!
//! The editor talks to three things it does not own: the demangling engine,
//! the formatting engine and a durable key/value store.  Each is a trait here
//! so the application layer can be tested with mocks and the infrastructure
//! can swap implementations freely.

use std::path::PathBuf;

use style_core::{Preset, SerializationFormatError, StyleNode};
use thiserror::Error;

/// Storage key holding the serialized working style.
pub const FORMAT_STYLE_KEY: &str = "formatStyle";
/// Storage key holding the "format output" flag as `"true"`/`"false"`.
pub const ENABLE_FORMAT_KEY: &str = "enableClangFormat";
/// Storage key holding the "expert style editing" flag as `"true"`/`"false"`.
pub const ENABLE_EXPERT_KEY: &str = "enableClangFormatExpert";

/// Turns mangled symbol names into readable ones.
///
/// Implementations are total: input that is not a recognised mangled name is
/// returned unchanged.
#[cfg_attr(test, mockall::automock)]
pub trait DemanglingEngine: Send + Sync {
    fn demangle_one(&self, text: &str) -> String;
}

/// Formats one line of code according to a style, and owns the style text
/// format.
#[cfg_attr(test, mockall::automock)]
pub trait FormattingEngine: Send + Sync {
    /// Builds a fresh style for a named preset.
    fn get_style(&self, preset: Preset) -> StyleNode;

    /// Formats `text` with `style`.
    fn format_one(&self, text: &str, style: &StyleNode) -> String;

    /// Converts a style to its persisted text form.
    fn serialize_to_text(&self, style: &StyleNode) -> Result<String, SerializationFormatError>;

    /// Parses a persisted text form back into a style.
    fn deserialize_from_text(&self, text: &str) -> Result<StyleNode, SerializationFormatError>;
}

/// Error type for state store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A file system I/O error occurred.
    #[error("I/O error accessing state at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The stored content could not be read or written in the store's format.
    #[error("state store format error: {0}")]
    Format(String),
}

/// Durable string key/value storage, the browser `localStorage` equivalent.
#[cfg_attr(test, mockall::automock)]
pub trait StateStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Reads a boolean flag stored as `"true"`/`"false"`.
///
/// A missing key, any other value or a store failure reads as `false`.
pub fn read_flag(store: &dyn StateStore, key: &str) -> bool {
    matches!(store.get(key), Ok(Some(v)) if v == "true")
}

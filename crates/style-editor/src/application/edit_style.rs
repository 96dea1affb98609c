//! Use case: edit the working format style.
//!
//! # Overview (for beginners)
//!
//! A [`StyleSession`] owns the one style the user is editing.  Every change
//! goes through the tree mutator in `style-core`, so an edit either applies
//! completely or leaves the style exactly as it was.  After each successful
//! change the session serializes the style and writes it to the state store
//! under [`FORMAT_STYLE_KEY`], so the next start picks up where the user left
//! off.
//!
//! Persistence is best effort: a store failure is logged and the in-memory
//! style stays authoritative.  Nothing in this module ever fails because the
//! disk is unhappy.
//!
//! # Restoring at startup
//!
//! | Stored text          | Result                                          |
//! |----------------------|-------------------------------------------------|
//! | none                 | the first-run preset (normally Mozilla)         |
//! | parses cleanly       | the stored style                                |
//! | fails to parse       | the `None` preset; the bad entry is removed     |

use std::sync::Arc;

use style_core::{
    classify_at, enum_values, resolve, walk, Edit, EditError, NodeEntry, PathResolutionError, Preset,
    SerializationFormatError, Shape, StyleNode, StylePath, TreeMutator,
};
use tracing::{debug, error, info, warn};

use super::ports::{FormattingEngine, StateStore, FORMAT_STYLE_KEY};

/// Where the session's initial style came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleOrigin {
    /// A stored style was deserialized.
    Restored,
    /// Nothing was stored; the first-run preset was used.
    FirstRun,
    /// The stored style was unreadable and has been discarded.
    Recovered,
}

/// The editing session around the working style.
pub struct StyleSession {
    style: StyleNode,
    origin: StyleOrigin,
    engine: Arc<dyn FormattingEngine>,
    store: Arc<dyn StateStore>,
    mutator: TreeMutator,
}

impl StyleSession {
    /// Creates a session from whatever the store holds.
    ///
    /// Never fails: every failure path lands on a usable style.
    pub fn restore(engine: Arc<dyn FormattingEngine>, store: Arc<dyn StateStore>, first_run: Preset) -> Self {
        let (style, origin) = match store.get(FORMAT_STYLE_KEY) {
            Ok(Some(text)) if !text.trim().is_empty() => match engine.deserialize_from_text(&text) {
                Ok(style) => {
                    debug!("restored stored format style");
                    (style, StyleOrigin::Restored)
                }
                Err(e) => {
                    error!("stored format style is unreadable, falling back to None: {e}");
                    if let Err(e) = store.remove(FORMAT_STYLE_KEY) {
                        warn!("could not discard unreadable format style: {e}");
                    }
                    (engine.get_style(Preset::None), StyleOrigin::Recovered)
                }
            },
            Ok(_) => {
                info!(preset = %first_run, "no stored format style, using first-run preset");
                (engine.get_style(first_run), StyleOrigin::FirstRun)
            }
            Err(e) => {
                warn!("could not read stored format style: {e}");
                (engine.get_style(first_run), StyleOrigin::FirstRun)
            }
        };

        Self {
            style,
            origin,
            engine,
            store,
            mutator: TreeMutator::new(),
        }
    }

    pub fn style(&self) -> &StyleNode {
        &self.style
    }

    pub fn origin(&self) -> StyleOrigin {
        self.origin
    }

    /// Replaces the whole style with a fresh copy of `preset`.
    pub fn load_preset(&mut self, preset: Preset) {
        self.style = self.engine.get_style(preset);
        info!(preset = %preset, "loaded preset");
        self.persist();
    }

    /// Applies `edit` at `path`; on error the style is untouched and nothing
    /// is persisted.
    pub fn apply(&mut self, path: &StylePath, edit: &Edit) -> Result<(), EditError> {
        self.mutator.apply(&mut self.style, path, edit)?;
        debug!(path = %path.describe(), ?edit, "applied style edit");
        self.persist();
        Ok(())
    }

    /// Interprets a raw UI string for the node at `path` and applies it.
    ///
    /// Scalars are parsed in their own kind, optionals are enabled with the
    /// parsed value and enums are renamed.
    pub fn apply_text(&mut self, path: &StylePath, raw: &str) -> Result<(), EditError> {
        let edit = Edit::from_text(resolve(&self.style, path)?, raw)?;
        self.apply(path, &edit)
    }

    /// Replaces the style with one parsed from `text`.
    ///
    /// The style is replaced wholesale only when parsing succeeds.
    pub fn import(&mut self, text: &str) -> Result<(), SerializationFormatError> {
        self.style = self.engine.deserialize_from_text(text)?;
        info!("imported format style");
        self.persist();
        Ok(())
    }

    /// The persisted text form of the current style.
    pub fn export(&self) -> Result<String, SerializationFormatError> {
        self.engine.serialize_to_text(&self.style)
    }

    pub fn node_at(&self, path: &StylePath) -> Result<&StyleNode, PathResolutionError> {
        resolve(&self.style, path)
    }

    pub fn classify_at(&self, path: &StylePath) -> Result<Shape, PathResolutionError> {
        classify_at(&self.style, path)
    }

    /// Allowed member names when the node at `path` is an enum.
    pub fn enum_values_at(&self, path: &StylePath) -> Result<Option<&'static [&'static str]>, PathResolutionError> {
        resolve(&self.style, path).map(enum_values)
    }

    /// Every node with its path, in schema order, root first.
    pub fn entries(&self) -> Vec<NodeEntry<'_>> {
        walk(&self.style)
    }

    /// Formats one line with the current style.
    pub fn format_line(&self, line: &str) -> String {
        self.engine.format_one(line, &self.style)
    }

    /// Writes the current style to the store, logging instead of failing.
    pub fn persist(&self) {
        match self.engine.serialize_to_text(&self.style) {
            Ok(text) => match self.store.set(FORMAT_STYLE_KEY, &text) {
                Ok(()) => debug!(bytes = text.len(), "persisted format style"),
                Err(e) => warn!("could not persist format style: {e}"),
            },
            Err(e) => warn!("could not serialize format style: {e}"),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

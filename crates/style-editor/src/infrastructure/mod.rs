//! Infrastructure layer for the style editor.
//!
//! Contains the concrete adapters: the built-in demangling and formatting
//! engines, file-system storage, and the UI command bridge.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `style_core`, but MUST NOT be imported by the `application` layer.

pub mod engines;
pub mod storage;
pub mod ui_bridge;

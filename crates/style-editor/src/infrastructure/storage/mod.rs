//! Storage infrastructure: settings file and state stores.
//!
//! - `config` reads and writes the TOML settings file from the platform
//!   config directory, with defaults on first run.
//! - `local_store` is the durable [`StateStore`] the editor uses between
//!   runs: a flat TOML table of string keys and values.
//! - `memory` is a volatile [`StateStore`] for tests and one-off sessions.
//!
//! [`StateStore`]: crate::application::ports::StateStore

pub mod config;
pub mod local_store;
pub mod memory;

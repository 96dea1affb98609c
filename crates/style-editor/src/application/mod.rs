//! Application layer use cases for the style editor.
//!
//! # What is the "application" layer? (for beginners)
//!
//! In Clean Architecture the *application* layer sits between the domain
//! (the pure style tree in `style-core`) and the infrastructure (engines,
//! files, the UI bridge).
//!
//! Use cases in this layer:
//!
//! - **Orchestrate** domain objects to fulfil a user goal (e.g., "change
//!   `IndentWidth` and show the reformatted output").
//! - **Depend on abstractions** (the traits in [`ports`]) rather than concrete
//!   engines or storage, so tests can inject mocks.
//! - **Contain no file system access and no engine internals**.
//!
//! # Sub-modules
//!
//! - **`ports`** – Traits for the two opaque engines and the key/value state
//!   store, plus the well-known storage keys.
//!
//! - **`edit_style`** – The editing session: owns the working style, applies
//!   path edits and preset loads, and persists after every change.
//!
//! - **`render_output`** – The output pipeline: demangle each input line,
//!   then format it when formatting is enabled.
//!
//! - **`module_lifecycle`** – Single-flight async acquisition of the engine
//!   modules with a sticky failure state.

pub mod edit_style;
pub mod module_lifecycle;
pub mod ports;
pub mod render_output;

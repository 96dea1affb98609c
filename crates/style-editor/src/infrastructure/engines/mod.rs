//! Built-in engines and their module loaders.
//!
//! - `demangler` – Itanium C++ ABI subset behind [`DemanglingEngine`].
//! - `formatter` – whitespace/layout formatter behind [`FormattingEngine`].
//! - `loader` – [`ModuleLoader`] implementations the module slots use to
//!   bring the engines up.
//!
//! [`DemanglingEngine`]: crate::application::ports::DemanglingEngine
//! [`FormattingEngine`]: crate::application::ports::FormattingEngine
//! [`ModuleLoader`]: crate::application::module_lifecycle::ModuleLoader

pub mod demangler;
pub mod formatter;
pub mod loader;

pub use demangler::ItaniumDemangler;
pub use formatter::ReferenceFormatter;
pub use loader::{BuiltinDemanglerLoader, BuiltinFormatterLoader};

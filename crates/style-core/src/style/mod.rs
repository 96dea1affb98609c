//! The concrete clang-format style: schema and named presets.

pub mod presets;
pub mod schema;

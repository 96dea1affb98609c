//! Persistence of style trees as text.

pub mod codec;

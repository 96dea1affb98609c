//! Domain entities for the style tree.
//!
//! This module contains pure logic with no infrastructure dependencies.
//!
//! # Layout
//!
//! - [`node`] – the five node shapes and their containers.
//! - [`enums`] – enum type identity: each enum node points at a static table
//!   of its legal member names.
//! - [`path`] – field-name and index segments, and their textual form.
//! - [`navigate`] – read-only path resolution.
//! - [`classify`] – shape classification and tree walking for generic UIs.
//! - [`edit`] – the closed set of leaf transforms a UI can request.
//! - [`mutate`] – read-modify-write along a path with chain write-back.

pub mod classify;
pub mod edit;
pub mod enums;
pub mod mutate;
pub mod navigate;
pub mod node;
pub mod path;

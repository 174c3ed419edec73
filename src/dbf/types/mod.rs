//! Foundational data structures, error types, and cell values.

pub mod error;
pub mod models;
pub mod primitive;

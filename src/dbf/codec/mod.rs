//! Pure data transformations: code page decoding and field value decoding.

pub mod field;
pub mod iran_system;
pub mod text;

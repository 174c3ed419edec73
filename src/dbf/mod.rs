//! Core DBF reader module.
//!
//! Layers, leaves first:
//! - [`cursor`]: positioned byte reads with one byte of look-ahead
//! - [`codec`]: Iran System transcoding and per-type field decoding
//! - [`format`]: header, descriptor and record region parsers
//! - [`reader`]: orchestration into a [`Table`](types::models::Table)
//! - [`csv`]: comma-joined export

pub mod codec;
pub mod csv;
pub mod cursor;
pub mod format;
pub mod reader;
pub mod types;

pub use codec::text::TextEncoding;
pub use reader::{ReadOptions, read_file, read_table, read_table_with};
pub use types::error::{DbfError, Result};

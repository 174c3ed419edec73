//! File format parsing layer for DBF tables.
//!
//! This module provides the mid-level parsing layer that bridges between
//! the byte cursor and the high-level [`read_table`](crate::read_table).
//!
//! # Module Organization
//!
//! - [`header`]: Parses the fixed 32-byte file header
//! - [`descriptors`]: Parses the field descriptor array up to its terminator
//! - [`records`]: Slices the fixed-stride record region into typed values
//!
//! # Architecture
//!
//! ```text
//! File Structure:
//! ┌─────────────────────┐
//! │  Header (32 bytes)  │ ← header::parse()
//! ├─────────────────────┤
//! │  Descriptors        │ ← descriptors::parse()
//! │  (32 bytes each)    │
//! │  0x0D terminator    │
//! ├─────────────────────┤
//! │  Records            │ ← records::parse()
//! │  (flag + fields)    │
//! └─────────────────────┘
//! ```

pub mod descriptors;
pub mod header;
pub mod records;

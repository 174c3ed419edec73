//! # dbf-reader
//!
//! A reader for dBASE-family table files (.dbf) that decodes the header,
//! field descriptors and fixed-width records into an in-memory [`Table`].
//! Character fields default to the Iran System Persian code page; any
//! `encoding_rs` code page can be selected instead.
//!
//! Memo payloads (`.dbt`/`.fpt`), index files and writing are not supported.
//!
//! ```no_run
//! use dbf_reader::{CsvOptions, ReadOptions, read_file, to_csv};
//!
//! let table = read_file("people.dbf", &ReadOptions::default())?;
//! println!("{}", to_csv(&table, &CsvOptions::default()));
//! # Ok::<(), dbf_reader::DbfError>(())
//! ```
pub mod dbf;

// Re-export the main types for convenience
pub use dbf::{
    DbfError, ReadOptions, Result, TextEncoding,
    csv::{CsvOptions, to_csv, write_csv},
    read_file, read_table, read_table_with,
    types::{
        models::{FieldDescriptor, FieldType, Header, Record, Table},
        primitive::Primitive,
    },
};

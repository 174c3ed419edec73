//! Core data structures for DBF format components.
//!
//! This module defines the fundamental types used throughout the library:
//! - The decoded file header
//! - Field descriptors and their type tags
//! - Positional records and the assembled table

use std::fmt;

use super::error::{DbfError, Result};
use super::primitive::Primitive;

/// Size in bytes of the fixed file header and of every field descriptor.
pub const HEADER_SIZE: usize = 32;
pub const DESCRIPTOR_SIZE: usize = 32;

/// Byte that ends the field descriptor array.
pub const DESCRIPTOR_TERMINATOR: u8 = 0x0D;

/// Deletion flag values found in the first byte of every record.
pub const RECORD_LIVE: u8 = 0x20;
pub const RECORD_DELETED: u8 = 0x2A;

/// The decoded 32-byte DBF file header.
///
/// Flags are surfaced verbatim; rejecting encrypted or half-written tables is
/// left to [`ReadOptions::strict`](crate::ReadOptions).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub dbase_version: i8,
    /// Packed `10000 * YY + 100 * MM + DD`.
    pub last_update_date: i32,
    pub number_of_records: u32,
    pub header_byte_count: u16,
    pub record_byte_count: u16,
    pub incomplete_transaction: bool,
    pub encryption_flag: bool,
    pub production_mdx_flag: bool,
    pub language_driver_id: i8,
}

impl Header {
    /// Number of field descriptors implied by `header_byte_count`.
    ///
    /// The trailing terminator byte is absorbed by the integer division.
    pub fn expected_descriptor_count(&self) -> usize {
        (self.header_byte_count as usize).saturating_sub(HEADER_SIZE) / DESCRIPTOR_SIZE
    }

    /// Returns the raw `(YY, MM, DD)` triple of the last update date.
    pub fn last_update(&self) -> (u8, u8, u8) {
        let packed = self.last_update_date;
        (
            (packed / 10000) as u8,
            (packed / 100 % 100) as u8,
            (packed % 100) as u8,
        )
    }
}

/// Supported field type tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Character,
    Decimal,
    Float,
    Logical,
    Memo,
    Numeric,
}

impl FieldType {
    /// The single-letter tag used in the descriptor.
    pub fn tag(&self) -> char {
        match self {
            FieldType::Character => 'C',
            FieldType::Decimal => 'D',
            FieldType::Float => 'F',
            FieldType::Logical => 'L',
            FieldType::Memo => 'M',
            FieldType::Numeric => 'N',
        }
    }
}

impl TryFrom<u8> for FieldType {
    type Error = DbfError;
    fn try_from(tag: u8) -> Result<Self> {
        match tag {
            b'C' => Ok(Self::Character),
            b'D' => Ok(Self::Decimal),
            b'F' => Ok(Self::Float),
            b'L' => Ok(Self::Logical),
            b'M' => Ok(Self::Memo),
            b'N' => Ok(Self::Numeric),
            _ => Err(DbfError::UnknownFieldType { tag: tag as char }),
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// One 32-byte column descriptor.
///
/// The type tag is kept raw so that an unsupported tag only fails once a
/// record actually needs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub field_name: String,
    pub field_type: u8,
    pub field_length: u8,
    pub field_decimal_count: u8,
    pub work_area_id: u16,
    pub example: u8,
    pub production_mdx_field_flag: bool,
}

impl FieldDescriptor {
    /// Resolves the raw tag into a [`FieldType`].
    pub fn kind(&self) -> Result<FieldType> {
        FieldType::try_from(self.field_type)
    }
}

/// A single decoded row.
///
/// Values are aligned with the table's descriptor order.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub deleted: bool,
    pub values: Vec<Primitive>,
}

impl Record {
    /// Value of the column at `index`, in descriptor order.
    pub fn get(&self, index: usize) -> Option<&Primitive> {
        self.values.get(index)
    }
}

/// The fully decoded table. Built once by the reader and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub header: Header,
    pub descriptors: Vec<FieldDescriptor>,
    pub records: Vec<Record>,
}

impl Table {
    /// Position of the first column named `name`.
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.descriptors.iter().position(|d| d.field_name == name)
    }

    /// Looks up a value by column name.
    pub fn value<'a>(&self, record: &'a Record, name: &str) -> Option<&'a Primitive> {
        self.field_index(name).and_then(|index| record.get(index))
    }

    /// Field names in descriptor order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.descriptors.iter().map(|d| d.field_name.as_str())
    }

    /// Records whose deletion flag is not set.
    pub fn live_records(&self) -> impl Iterator<Item = &Record> {
        self.records.iter().filter(|r| !r.deleted)
    }
}

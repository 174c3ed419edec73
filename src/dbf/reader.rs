use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use log::{info, warn};

use super::codec::text::TextEncoding;
use super::cursor::ByteCursor;
use super::format::{descriptors, header, records};
use super::types::error::{DbfError, Result};
use super::types::models::{FieldDescriptor, Header, Table};

/// Options controlling how a table is decoded.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReadOptions {
    /// Code page for Character fields. Defaults to Iran System.
    pub encoding: TextEncoding,
    /// Reject structural inconsistencies instead of logging them.
    ///
    /// In strict mode the reader fails on: encryption or incomplete
    /// transaction flags, a record size that disagrees with the descriptors,
    /// duplicate field names, and unsupported type tags (even when the table
    /// has no records).
    pub strict: bool,
}

impl ReadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn encoding(mut self, encoding: TextEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

/// Opens and decodes the DBF file at `path`.
///
/// The file handle is closed on every exit path, success or failure.
///
/// # Errors
/// Returns an error if:
/// - The file cannot be opened or read
/// - The header or descriptor array is truncated
/// - The descriptor count disagrees with the header
/// - Any field fails to decode
pub fn read_file(path: impl AsRef<Path>, options: &ReadOptions) -> Result<Table> {
    let path = path.as_ref();
    info!("Opening DBF file: {}", path.display());
    let file = File::open(path)?;
    read_table_with(BufReader::new(file), options)
}

/// Decodes a table from any byte source using default options.
pub fn read_table<R: Read>(source: R) -> Result<Table> {
    read_table_with(source, &ReadOptions::default())
}

/// Decodes a table from any byte source.
///
/// Runs header, descriptors and records strictly in that order; the first
/// error aborts and no partial table is returned.
pub fn read_table_with<R: Read>(source: R, options: &ReadOptions) -> Result<Table> {
    let mut cursor = ByteCursor::new(source);

    // Step 1: Fixed header
    let header = header::parse(&mut cursor)?;
    check_flags(&header, options)?;

    // Step 2: Descriptor array up to the terminator
    let descriptors = descriptors::parse(&mut cursor)?;
    let expected = header.expected_descriptor_count();
    if descriptors.len() != expected {
        return Err(DbfError::DescriptorCountMismatch {
            expected,
            got: descriptors.len(),
        });
    }
    check_descriptors(&header, &descriptors, options)?;

    // Step 3: Record region
    let records = records::parse(&mut cursor, &header, &descriptors, options.encoding)?;

    info!(
        "DBF table decoded: {} fields, {} records ({} deleted), encoding={}",
        descriptors.len(),
        records.len(),
        records.iter().filter(|r| r.deleted).count(),
        options.encoding
    );

    Ok(Table {
        header,
        descriptors,
        records,
    })
}

fn check_flags(header: &Header, options: &ReadOptions) -> Result<()> {
    if header.encryption_flag {
        if options.strict {
            return Err(DbfError::EncryptedTable);
        }
        warn!("Header encryption flag is set; decoding as plain data");
    }
    if header.incomplete_transaction {
        if options.strict {
            return Err(DbfError::IncompleteTransaction);
        }
        warn!("Header incomplete-transaction flag is set; decoding anyway");
    }
    Ok(())
}

fn check_descriptors(
    header: &Header,
    descriptors: &[FieldDescriptor],
    options: &ReadOptions,
) -> Result<()> {
    let actual = records::stride(descriptors);
    let expected = header.record_byte_count as usize;
    if actual != expected {
        if options.strict {
            return Err(DbfError::RecordLengthMismatch { expected, actual });
        }
        warn!(
            "Header record size is {} bytes but descriptors add up to {}; using descriptors",
            expected, actual
        );
    }

    let mut seen = HashSet::new();
    for descriptor in descriptors {
        if !seen.insert(descriptor.field_name.as_str()) {
            if options.strict {
                return Err(DbfError::DuplicateFieldName(descriptor.field_name.clone()));
            }
            warn!(
                "Duplicate field name '{}'; lookups by name resolve to the first column",
                descriptor.field_name
            );
        }
        if options.strict {
            descriptor.kind()?;
        }
    }
    Ok(())
}

//! Custom error types for the dbf-reader crate.

use thiserror::Error;

/// The primary error type for all operations in this crate.
#[derive(Debug, Error)]
pub enum DbfError {
    /// An error originating from I/O operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The byte source ended before a read could be satisfied.
    #[error("Unexpected end of input at offset {offset}: wanted {wanted} more bytes")]
    UnexpectedEof { offset: u64, wanted: usize },

    /// The file ended inside the fixed 32-byte header.
    #[error("Header too short: expected 32 bytes, but only {read} were available")]
    HeaderTooShort { read: usize },

    /// The file ended in the middle of a field descriptor.
    #[error("Field descriptor #{index} at offset {offset} is truncated")]
    DescriptorTruncated { index: usize, offset: u64 },

    /// The number of descriptors read disagrees with the header byte count.
    #[error("Field descriptor count mismatch: expected {expected}, but found {got}")]
    DescriptorCountMismatch { expected: usize, got: usize },

    /// A byte has no entry in the Iran System code page table.
    #[error("Unmapped Iran System byte {byte:#04x} at position {position}")]
    Transcode { byte: u8, position: usize },

    /// A Numeric, Decimal or Float field could not be parsed.
    #[error("Failed to parse {field_type} field from bytes [{}]: {reason}", hex::encode(.raw))]
    FieldParse {
        field_type: char,
        raw: Vec<u8>,
        reason: String,
    },

    /// A descriptor carries a type tag outside the supported set.
    #[error("Unknown field type '{tag}'")]
    UnknownFieldType { tag: char },

    /// A failure while decoding one record, annotated with where it happened.
    #[error("Record #{index}{} at offset {offset}: {source}", field_suffix(.field))]
    Record {
        index: usize,
        field: Option<String>,
        offset: u64,
        #[source]
        source: Box<DbfError>,
    },

    /// Strict mode: `1 + sum(field_length)` disagrees with the header record size.
    #[error("Record length mismatch: header declares {expected} bytes, descriptors add up to {actual}")]
    RecordLengthMismatch { expected: usize, actual: usize },

    /// Strict mode: two descriptors share a trimmed name.
    #[error("Duplicate field name: {0}")]
    DuplicateFieldName(String),

    /// Strict mode: the header encryption flag is set.
    #[error("Table is flagged as encrypted")]
    EncryptedTable,

    /// Strict mode: the header incomplete-transaction flag is set.
    #[error("Table is flagged with an incomplete transaction")]
    IncompleteTransaction,

    /// The requested text encoding label is not recognised.
    #[error("Unknown text encoding: {0}")]
    UnknownEncoding(String),
}

fn field_suffix(field: &Option<String>) -> String {
    field
        .as_ref()
        .map(|name| format!(" field '{}'", name))
        .unwrap_or_default()
}

impl DbfError {
    /// Returns the innermost error, looking through record context wrappers.
    pub fn root(&self) -> &DbfError {
        match self {
            DbfError::Record { source, .. } => source.root(),
            other => other,
        }
    }
}

/// A convenience `Result` type alias using the crate's `DbfError` type.
pub type Result<T> = std::result::Result<T, DbfError>;

//! Fixed-stride record region parsing.

use std::io::Read;

use log::{debug, trace};

use crate::dbf::codec::field;
use crate::dbf::codec::text::TextEncoding;
use crate::dbf::cursor::ByteCursor;
use crate::dbf::types::error::{DbfError, Result};
use crate::dbf::types::models::{FieldDescriptor, Header, RECORD_DELETED, RECORD_LIVE, Record};

/// Upper bound on up-front allocation; the header count is untrusted.
const PREALLOCATE_LIMIT: usize = 1 << 16;

/// Bytes one record occupies: the deletion flag plus every field.
pub fn stride(descriptors: &[FieldDescriptor]) -> usize {
    1 + descriptors
        .iter()
        .map(|d| d.field_length as usize)
        .sum::<usize>()
}

/// Reads `header.number_of_records` records laid out by `descriptors`.
///
/// Each record is a deletion flag byte followed by the fields in descriptor
/// order. Bytes inside the record region are never interpreted as
/// terminators. Errors are wrapped in [`DbfError::Record`] with the record
/// index, field name, and absolute offset.
pub fn parse<R: Read>(
    cursor: &mut ByteCursor<R>,
    header: &Header,
    descriptors: &[FieldDescriptor],
    encoding: TextEncoding,
) -> Result<Vec<Record>> {
    let count = header.number_of_records as usize;
    let stride = stride(descriptors);
    debug!("Reading {} records of {} bytes starting at offset {}", count, stride, cursor.offset());

    let mut records = Vec::with_capacity(count.min(PREALLOCATE_LIMIT));
    let mut buf = vec![0u8; stride];

    for index in 0..count {
        let offset = cursor.offset();
        cursor
            .read_into(&mut buf)
            .map_err(|e| in_record(index, None, offset, e))?;

        let flag = buf[0];
        if flag != RECORD_LIVE && flag != RECORD_DELETED {
            trace!("Record #{} has unusual deletion flag {:#04x}", index, flag);
        }

        let mut values = Vec::with_capacity(descriptors.len());
        let mut position = 1;
        for descriptor in descriptors {
            let end = position + descriptor.field_length as usize;
            let value = field::decode(descriptor.field_type, &buf[position..end], encoding)
                .map_err(|e| {
                    in_record(
                        index,
                        Some(descriptor.field_name.clone()),
                        offset + position as u64,
                        e,
                    )
                })?;
            values.push(value);
            position = end;
        }

        records.push(Record {
            deleted: flag == RECORD_DELETED,
            values,
        });
    }

    Ok(records)
}

fn in_record(index: usize, field: Option<String>, offset: u64, source: DbfError) -> DbfError {
    DbfError::Record {
        index,
        field,
        offset,
        source: Box::new(source),
    }
}

//! Field descriptor array parsing.

use std::io::Read;

use byteorder::{ByteOrder, LittleEndian};
use log::{debug, trace};

use crate::dbf::codec::field::trim_padding;
use crate::dbf::cursor::ByteCursor;
use crate::dbf::types::error::{DbfError, Result};
use crate::dbf::types::models::{DESCRIPTOR_SIZE, DESCRIPTOR_TERMINATOR, FieldDescriptor};

/// Reads 32-byte descriptors until the `0x0D` terminator.
///
/// The terminator is consumed, so on return the cursor sits on the first
/// byte of the record region. Running out of input exactly at a descriptor
/// boundary also ends the array; the caller's count check decides whether
/// that is acceptable. Running out inside a descriptor is
/// [`DbfError::DescriptorTruncated`].
pub fn parse<R: Read>(cursor: &mut ByteCursor<R>) -> Result<Vec<FieldDescriptor>> {
    let mut descriptors = Vec::new();

    loop {
        let offset = cursor.offset();
        match cursor.try_peek_byte()? {
            Some(DESCRIPTOR_TERMINATOR) => {
                cursor.read_byte()?;
                trace!("Descriptor terminator at offset {}", offset);
                break;
            }
            Some(_) => {}
            None => {
                debug!("Input ended at offset {} without a descriptor terminator", offset);
                break;
            }
        }

        let mut raw = [0u8; DESCRIPTOR_SIZE];
        cursor.read_into(&mut raw).map_err(|e| match e {
            DbfError::UnexpectedEof { .. } => DbfError::DescriptorTruncated {
                index: descriptors.len(),
                offset,
            },
            other => other,
        })?;

        let descriptor = decode(&raw);
        trace!(
            "Descriptor #{} at offset {}: name='{}', type='{}', length={}, decimals={}",
            descriptors.len(),
            offset,
            descriptor.field_name,
            descriptor.field_type as char,
            descriptor.field_length,
            descriptor.field_decimal_count
        );
        descriptors.push(descriptor);
    }

    debug!("Parsed {} field descriptors", descriptors.len());
    Ok(descriptors)
}

/// Decodes one descriptor block.
///
/// ```text
/// [0..11]  field name, NUL/space padded
/// [11]     type tag
/// [12..16] reserved
/// [16]     field length
/// [17]     decimal count
/// [18..20] work area id (u16 LE)
/// [20]     example
/// [21..31] reserved
/// [31]     production MDX field flag
/// ```
pub fn decode(raw: &[u8; DESCRIPTOR_SIZE]) -> FieldDescriptor {
    let name = String::from_utf8_lossy(&raw[0..11]);
    FieldDescriptor {
        field_name: trim_padding(&name).to_owned(),
        field_type: raw[11],
        field_length: raw[16],
        field_decimal_count: raw[17],
        work_area_id: LittleEndian::read_u16(&raw[18..20]),
        example: raw[20],
        production_mdx_field_flag: raw[31] != 0,
    }
}

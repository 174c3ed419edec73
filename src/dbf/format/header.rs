//! DBF file header parsing.

use std::io::Read;

use byteorder::{ByteOrder, LittleEndian};
use log::{debug, trace};

use crate::dbf::cursor::ByteCursor;
use crate::dbf::types::error::{DbfError, Result};
use crate::dbf::types::models::{HEADER_SIZE, Header};

/// Parses the fixed 32-byte header from the start of the file.
///
/// # Header Structure
/// ```text
/// [0]      dBASE version tag (i8)
/// [1..4]   last update date, YY MM DD
/// [4..8]   number of records (u32 LE)
/// [8..10]  header size in bytes (u16 LE)
/// [10..12] record size in bytes (u16 LE)
/// [12..14] reserved
/// [14]     incomplete transaction flag
/// [15]     encryption flag
/// [16..28] reserved
/// [28]     production MDX flag
/// [29]     language driver id (i8)
/// [30..32] reserved
/// ```
///
/// Fails with [`DbfError::HeaderTooShort`] if the input ends early. No
/// semantic validation is done here.
pub fn parse<R: Read>(cursor: &mut ByteCursor<R>) -> Result<Header> {
    let mut raw = [0u8; HEADER_SIZE];
    let read = cursor.read_available(&mut raw)?;
    if read < HEADER_SIZE {
        return Err(DbfError::HeaderTooShort { read });
    }
    trace!("Header bytes: {}", hex::encode(raw));

    let header = decode(&raw);
    debug!(
        "Header parsed: version={:#04x}, records={}, header_bytes={}, record_bytes={}, updated={}",
        header.dbase_version as u8,
        header.number_of_records,
        header.header_byte_count,
        header.record_byte_count,
        header.last_update_date
    );
    Ok(header)
}

/// Decodes a complete header block.
pub fn decode(raw: &[u8; HEADER_SIZE]) -> Header {
    let (yy, mm, dd) = (raw[1] as i32, raw[2] as i32, raw[3] as i32);
    Header {
        dbase_version: raw[0] as i8,
        last_update_date: 10000 * yy + 100 * mm + dd,
        number_of_records: LittleEndian::read_u32(&raw[4..8]),
        header_byte_count: LittleEndian::read_u16(&raw[8..10]),
        record_byte_count: LittleEndian::read_u16(&raw[10..12]),
        incomplete_transaction: raw[14] != 0,
        encryption_flag: raw[15] != 0,
        production_mdx_flag: raw[28] != 0,
        language_driver_id: raw[29] as i8,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn sample() -> [u8; HEADER_SIZE] {
        let mut raw = [0u8; HEADER_SIZE];
        raw[0] = 0x03;
        raw[1..4].copy_from_slice(&[99, 12, 31]);
        raw[4..8].copy_from_slice(&70_000u32.to_le_bytes());
        raw[8..10].copy_from_slice(&97u16.to_le_bytes());
        raw[10..12].copy_from_slice(&15u16.to_le_bytes());
        raw[12..14].copy_from_slice(&[0xEE, 0xEE]);
        raw[15] = 1;
        raw[28] = 1;
        raw[29] = 0x57;
        raw
    }

    #[test]
    fn decodes_all_fields() {
        let header = decode(&sample());
        assert_eq!(header.dbase_version, 3);
        assert_eq!(header.last_update_date, 991231);
        assert_eq!(header.last_update(), (99, 12, 31));
        assert_eq!(header.number_of_records, 70_000);
        assert_eq!(header.header_byte_count, 97);
        assert_eq!(header.record_byte_count, 15);
        assert!(!header.incomplete_transaction);
        assert!(header.encryption_flag);
        assert!(header.production_mdx_flag);
        assert_eq!(header.language_driver_id, 0x57);
        assert_eq!(header.expected_descriptor_count(), 2);
    }

    #[test]
    fn short_input_is_rejected() {
        let mut cursor = ByteCursor::new(Cursor::new(sample()[..20].to_vec()));
        assert!(matches!(parse(&mut cursor), Err(DbfError::HeaderTooShort { read: 20 })));
    }

    #[test]
    fn parse_consumes_exactly_32_bytes() {
        let mut bytes = sample().to_vec();
        bytes.push(0x0D);
        let mut cursor = ByteCursor::new(Cursor::new(bytes));
        parse(&mut cursor).unwrap();
        assert_eq!(cursor.offset(), 32);
        assert_eq!(cursor.peek_byte().unwrap(), 0x0D);
    }
}

//! Per-type decoding of raw field bytes into [`Primitive`] values.
//!
//! DBF pads every field to its declared width with NUL or space, so all
//! decoders cut at the first NUL before interpreting the bytes. Numeric
//! tolerates surrounding whitespace, Decimal does not.

use std::str::FromStr;
use std::sync::OnceLock;

use bigdecimal::BigDecimal;
use regex::Regex;

use super::text::TextEncoding;
use crate::dbf::types::error::{DbfError, Result};
use crate::dbf::types::models::FieldType;
use crate::dbf::types::primitive::Primitive;

/// Plain or scientific decimal notation: `-12.50`, `.5`, `1.5e3`.
///
/// Digit separators and surrounding whitespace are not part of the grammar.
static DECIMAL_PATTERN: OnceLock<Regex> = OnceLock::new();

fn decimal_regex() -> &'static Regex {
    DECIMAL_PATTERN.get_or_init(|| {
        Regex::new(r"^[+-]?([0-9]+(\.[0-9]*)?|\.[0-9]+)([eE][+-]?[0-9]+)?$")
            .expect("Invalid decimal regex pattern")
    })
}

/// Truncates at the first `0x00` byte.
pub fn trim_c_string(bytes: &[u8]) -> &[u8] {
    match bytes.iter().position(|&b| b == 0) {
        Some(end) => &bytes[..end],
        None => bytes,
    }
}

/// Strips leading and trailing NUL and space characters.
pub fn trim_padding(s: &str) -> &str {
    s.trim_matches(['\0', ' '])
}

/// Decodes one field given its raw descriptor tag.
///
/// Unknown tags fail with [`DbfError::UnknownFieldType`].
pub fn decode(tag: u8, bytes: &[u8], encoding: TextEncoding) -> Result<Primitive> {
    decode_typed(FieldType::try_from(tag)?, bytes, encoding)
}

/// Decodes one field of a known type.
pub fn decode_typed(field_type: FieldType, bytes: &[u8], encoding: TextEncoding) -> Result<Primitive> {
    match field_type {
        FieldType::Character => {
            let text = encoding.decode(trim_c_string(bytes))?;
            Ok(Primitive::Character(trim_padding(&text).to_owned()))
        }
        FieldType::Numeric => {
            let text = field_text(field_type, bytes)?;
            parse_decimal(field_type, bytes, text.trim()).map(Primitive::Numeric)
        }
        FieldType::Decimal => {
            let text = field_text(field_type, bytes)?;
            parse_decimal(field_type, bytes, text).map(Primitive::Decimal)
        }
        FieldType::Float => {
            let text = field_text(field_type, bytes)?;
            text.trim()
                .parse::<f64>()
                .map(Primitive::Float)
                .map_err(|e| parse_error(field_type, bytes, e.to_string()))
        }
        FieldType::Logical => {
            let truthy = matches!(trim_c_string(bytes), b"T" | b"t" | b"Y" | b"y");
            Ok(Primitive::Logical(truthy))
        }
        FieldType::Memo => Ok(Primitive::Memo),
    }
}

/// NUL-truncated field bytes as ASCII-compatible text.
fn field_text(field_type: FieldType, bytes: &[u8]) -> Result<&str> {
    std::str::from_utf8(trim_c_string(bytes))
        .map_err(|e| parse_error(field_type, bytes, format!("not valid text: {}", e)))
}

/// Parses plain (`-12.50`) or scientific (`1.5e3`) notation exactly.
///
/// The scale of the stored text is kept, so `12.50` stringifies as `12.50`.
fn parse_decimal(field_type: FieldType, raw: &[u8], text: &str) -> Result<BigDecimal> {
    if !decimal_regex().is_match(text) {
        return Err(parse_error(field_type, raw, format!("invalid decimal literal {:?}", text)));
    }
    BigDecimal::from_str(text).map_err(|e| parse_error(field_type, raw, e.to_string()))
}

fn parse_error(field_type: FieldType, raw: &[u8], reason: String) -> DbfError {
    DbfError::FieldParse {
        field_type: field_type.tag(),
        raw: raw.to_vec(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    fn iran(tag: u8, bytes: &[u8]) -> Result<Primitive> {
        decode(tag, bytes, TextEncoding::IranSystem)
    }

    #[test]
    fn character_is_trimmed_and_cut_at_nul() {
        assert_eq!(iran(b'C', b"ALICE\0\0\0\0\0").unwrap(), Primitive::Character("ALICE".into()));
        assert_eq!(iran(b'C', b"  BOB     ").unwrap(), Primitive::Character("BOB".into()));
        assert_eq!(iran(b'C', b"AB\0CD").unwrap(), Primitive::Character("AB".into()));
        assert_eq!(iran(b'C', &[0u8; 6]).unwrap(), Primitive::Character(String::new()));
    }

    #[test]
    fn character_trim_is_idempotent() {
        let once = trim_padding(" \0 x y \0 ");
        assert_eq!(once, "x y");
        assert_eq!(trim_padding(once), once);
    }

    #[test]
    fn numeric_allows_padding() {
        assert_eq!(iran(b'N', b"  42").unwrap(), Primitive::Numeric(dec("42")));
        assert_eq!(iran(b'N', b"-3.25 \0").unwrap(), Primitive::Numeric(dec("-3.25")));
        assert_eq!(iran(b'N', b"  42").unwrap().to_string(), "42");
        assert_eq!(iran(b'N', b"12.50").unwrap().to_string(), "12.50");
    }

    #[test]
    fn numeric_all_nul_fails() {
        match iran(b'N', &[0u8; 4]) {
            Err(DbfError::FieldParse { field_type, raw, .. }) => {
                assert_eq!(field_type, 'N');
                assert_eq!(raw, vec![0u8; 4]);
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn decimal_rejects_whitespace() {
        assert_eq!(iran(b'D', b"7.5\0\0").unwrap(), Primitive::Decimal(dec("7.5")));
        assert!(matches!(iran(b'D', b"  42"), Err(DbfError::FieldParse { field_type: 'D', .. })));
    }

    #[test]
    fn scientific_notation_is_accepted() {
        assert_eq!(iran(b'N', b"1.5e3").unwrap(), Primitive::Numeric(dec("1500")));
    }

    #[test]
    fn numeric_keeps_every_digit() {
        let wide = iran(b'N', b"123456789012345678901234567890").unwrap();
        assert_eq!(wide.to_string(), "123456789012345678901234567890");

        let long_fraction = iran(b'N', b"0.123456789012345678901234567890123").unwrap();
        assert_eq!(long_fraction.to_string(), "0.123456789012345678901234567890123");

        let tiny = iran(b'D', b"0.000000001").unwrap();
        assert_eq!(tiny.to_string(), "0.000000001");
    }

    #[test]
    fn malformed_numbers_are_rejected() {
        for text in [&b"4_2"[..], b"1,5", b"--1", b".", b"1e", b"0x1F", b"4 2", b"+"] {
            assert!(
                matches!(iran(b'N', text), Err(DbfError::FieldParse { field_type: 'N', .. })),
                "text {:?}",
                String::from_utf8_lossy(text)
            );
        }
        assert!(matches!(iran(b'D', b"1_000"), Err(DbfError::FieldParse { field_type: 'D', .. })));
        assert_eq!(iran(b'N', b"+.5").unwrap().to_string(), "0.5");
        assert_eq!(iran(b'N', b"7.").unwrap(), Primitive::Numeric(dec("7")));
    }

    #[test]
    fn float_parses() {
        assert_eq!(iran(b'F', b" 2.5\0\0").unwrap(), Primitive::Float(2.5));
        assert_eq!(iran(b'F', b"  -inf").unwrap().to_string(), "-Inf");
        assert!(matches!(iran(b'F', b"abc"), Err(DbfError::FieldParse { field_type: 'F', .. })));
    }

    #[test]
    fn logical_truth_table() {
        let cases: [(&[u8], bool); 8] = [
            (b"T", true),
            (b"t", true),
            (b"Y", true),
            (b"y", true),
            (b"F", false),
            (b"?", false),
            (b" ", false),
            (b"T\0", true),
        ];
        for (bytes, expected) in cases {
            let value = iran(b'L', bytes).unwrap();
            assert_eq!(value, Primitive::Logical(expected), "bytes {:?}", bytes);
            assert!(matches!(value.to_string().as_str(), "true" | "false"));
        }
    }

    #[test]
    fn memo_discards_bytes() {
        let value = iran(b'M', b"0000000012").unwrap();
        assert_eq!(value, Primitive::Memo);
        assert_eq!(value.to_string(), "MEMO FIELD (NOT SUPPORTED)");
    }

    #[test]
    fn unknown_tag_is_rejected() {
        assert!(matches!(iran(b'X', b"1"), Err(DbfError::UnknownFieldType { tag: 'X' })));
    }
}

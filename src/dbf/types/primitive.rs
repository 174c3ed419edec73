//! Typed cell values produced by the field decoder.

use std::fmt;

use bigdecimal::BigDecimal;

/// Placeholder text emitted for memo columns.
pub const MEMO_PLACEHOLDER: &str = "MEMO FIELD (NOT SUPPORTED)";

/// A decoded field value.
///
/// `Display` is the canonical stringification used by the CSV emitter.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Character(String),
    Numeric(BigDecimal),
    Decimal(BigDecimal),
    Float(f64),
    Logical(bool),
    /// Memo payloads live in an external file; the bytes are discarded.
    Memo,
}

impl Primitive {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Primitive::Character(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_decimal(&self) -> Option<&BigDecimal> {
        match self {
            Primitive::Numeric(d) | Primitive::Decimal(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Primitive::Logical(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Primitive::Character(s) => f.write_str(s),
            // Never exponent form, whatever the magnitude
            Primitive::Numeric(d) | Primitive::Decimal(d) => f.write_str(&d.to_plain_string()),
            Primitive::Float(v) if v.is_infinite() => {
                f.write_str(if v.is_sign_positive() { "+Inf" } else { "-Inf" })
            }
            Primitive::Float(v) => write!(f, "{}", v),
            Primitive::Logical(b) => write!(f, "{}", b),
            Primitive::Memo => f.write_str(MEMO_PLACEHOLDER),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn stringify_variants() {
        assert_eq!(Primitive::Character("abc".into()).to_string(), "abc");
        assert_eq!(Primitive::Numeric(BigDecimal::from_str("42").unwrap()).to_string(), "42");
        assert_eq!(Primitive::Decimal(BigDecimal::from_str("-3.50").unwrap()).to_string(), "-3.50");
        assert_eq!(Primitive::Numeric(BigDecimal::from_str("2.5e3").unwrap()).to_string(), "2500");
        assert_eq!(Primitive::Float(2.5).to_string(), "2.5");
        assert_eq!(Primitive::Float(100.0).to_string(), "100");
        assert_eq!(Primitive::Float(f64::INFINITY).to_string(), "+Inf");
        assert_eq!(Primitive::Float(f64::NEG_INFINITY).to_string(), "-Inf");
        assert_eq!(Primitive::Float(f64::NAN).to_string(), "NaN");
        assert_eq!(Primitive::Logical(true).to_string(), "true");
        assert_eq!(Primitive::Logical(false).to_string(), "false");
        assert_eq!(Primitive::Memo.to_string(), "MEMO FIELD (NOT SUPPORTED)");
    }
}

//! Text encoding selection for Character fields.

use std::fmt;

use encoding_rs::Encoding;
use log::trace;

use super::iran_system;
use crate::dbf::types::error::{DbfError, Result};

/// The code page used to decode Character field bytes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TextEncoding {
    /// The Iran System Persian code page (strict: unmapped bytes are errors).
    #[default]
    IranSystem,
    /// Any WHATWG encoding known to `encoding_rs`, e.g. `windows-1256`.
    /// Malformed input is replaced rather than rejected.
    Other(&'static Encoding),
}

impl TextEncoding {
    /// Resolves a user-supplied label.
    ///
    /// `iran-system` (also `iransystem`, `iran_system`, any case) selects the
    /// built-in table; every other label goes through
    /// [`Encoding::for_label`].
    pub fn from_label(label: &str) -> Result<Self> {
        let normalized = label.trim().to_ascii_lowercase().replace('_', "-");
        if normalized == "iran-system" || normalized == "iransystem" {
            return Ok(Self::IranSystem);
        }
        Encoding::for_label(normalized.as_bytes())
            .map(Self::Other)
            .ok_or_else(|| DbfError::UnknownEncoding(label.to_string()))
    }

    pub fn name(&self) -> &'static str {
        match self {
            TextEncoding::IranSystem => "iran-system",
            TextEncoding::Other(encoding) => encoding.name(),
        }
    }

    /// Decodes already NUL-truncated bytes.
    pub fn decode(&self, bytes: &[u8]) -> Result<String> {
        match self {
            TextEncoding::IranSystem => iran_system::decode(bytes),
            TextEncoding::Other(encoding) => {
                let (text, had_errors) = encoding.decode_without_bom_handling(bytes);
                if had_errors {
                    trace!("Malformed {} sequence replaced in {:02x?}", encoding.name(), bytes);
                }
                Ok(text.into_owned())
            }
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_resolve() {
        assert_eq!(TextEncoding::from_label("Iran_System").unwrap(), TextEncoding::IranSystem);
        assert_eq!(TextEncoding::from_label("iransystem").unwrap(), TextEncoding::IranSystem);
        assert_eq!(
            TextEncoding::from_label("cp1256").unwrap(),
            TextEncoding::Other(encoding_rs::WINDOWS_1256)
        );
        assert!(matches!(
            TextEncoding::from_label("klingon"),
            Err(DbfError::UnknownEncoding(label)) if label == "klingon"
        ));
    }

    #[test]
    fn windows_1256_decodes_arabic_letters() {
        let encoding = TextEncoding::from_label("windows-1256").unwrap();
        // 0xC8 is BEH in windows-1256
        assert_eq!(encoding.decode(&[0xC8]).unwrap(), "\u{0628}");
        assert_eq!(encoding.name(), "windows-1256");
    }
}

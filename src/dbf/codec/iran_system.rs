//! Iran System code page decoding.
//!
//! Iran System is a DOS-era single-byte Persian code page. The low half is
//! plain ASCII. The high half holds Persian digits, punctuation and letter
//! glyphs, several of them in distinct contextual shapes (isolated, initial,
//! medial, final). Every shape decodes to its base Persian letter, so the
//! output is ordinary Unicode text rather than presentation forms.
//!
//! `0xB0..=0xDF` carry DOS box-drawing glyphs in the original charset and are
//! deliberately left unmapped: hitting one inside table data is reported as a
//! [`DbfError::Transcode`] instead of being passed through.

use crate::dbf::types::error::{DbfError, Result};

const ALEF_MADDA: &str = "\u{0622}";
const YEH_HAMZA: &str = "\u{0626}";
const HAMZA: &str = "\u{0621}";
const ALEF: &str = "\u{0627}";
const BEH: &str = "\u{0628}";
const PEH: &str = "\u{067E}";
const TEH: &str = "\u{062A}";
const THEH: &str = "\u{062B}";
const JEEM: &str = "\u{062C}";
const TCHEH: &str = "\u{0686}";
const HAH: &str = "\u{062D}";
const KHAH: &str = "\u{062E}";
const DAL: &str = "\u{062F}";
const THAL: &str = "\u{0630}";
const REH: &str = "\u{0631}";
const ZAIN: &str = "\u{0632}";
const JEH: &str = "\u{0698}";
const SEEN: &str = "\u{0633}";
const SHEEN: &str = "\u{0634}";
const SAD: &str = "\u{0635}";
const DAD: &str = "\u{0636}";
const TAH: &str = "\u{0637}";
const ZAH: &str = "\u{0638}";
const AIN: &str = "\u{0639}";
const GHAIN: &str = "\u{063A}";
const FEH: &str = "\u{0641}";
const QAF: &str = "\u{0642}";
const KEHEH: &str = "\u{06A9}";
const GAF: &str = "\u{06AF}";
const LAM: &str = "\u{0644}";
const LAM_ALEF: &str = "\u{0644}\u{0627}";
const MEEM: &str = "\u{0645}";
const NOON: &str = "\u{0646}";
const WAW: &str = "\u{0648}";
const HEH: &str = "\u{0647}";
const FARSI_YEH: &str = "\u{06CC}";

/// Decoded text for bytes `0x80..=0xFF`, indexed by `byte - 0x80`.
static HIGH_HALF: [Option<&str>; 128] = {
    let mut t: [Option<&str>; 128] = [None; 128];
    // 0x80..=0x89: Persian digits
    t[0x00] = Some("\u{06F0}");
    t[0x01] = Some("\u{06F1}");
    t[0x02] = Some("\u{06F2}");
    t[0x03] = Some("\u{06F3}");
    t[0x04] = Some("\u{06F4}");
    t[0x05] = Some("\u{06F5}");
    t[0x06] = Some("\u{06F6}");
    t[0x07] = Some("\u{06F7}");
    t[0x08] = Some("\u{06F8}");
    t[0x09] = Some("\u{06F9}");
    // 0x8A..=0x8C: comma, tatweel, question mark
    t[0x0A] = Some("\u{060C}");
    t[0x0B] = Some("\u{0640}");
    t[0x0C] = Some("\u{061F}");
    t[0x0D] = Some(ALEF_MADDA);
    t[0x0E] = Some(YEH_HAMZA);
    t[0x0F] = Some(HAMZA);
    t[0x10] = Some(ALEF); // isolated
    t[0x11] = Some(ALEF); // final
    t[0x12] = Some(BEH);
    t[0x13] = Some(BEH);
    t[0x14] = Some(PEH);
    t[0x15] = Some(PEH);
    t[0x16] = Some(TEH);
    t[0x17] = Some(TEH);
    t[0x18] = Some(THEH);
    t[0x19] = Some(THEH);
    t[0x1A] = Some(JEEM);
    t[0x1B] = Some(JEEM);
    t[0x1C] = Some(TCHEH);
    t[0x1D] = Some(TCHEH);
    t[0x1E] = Some(HAH);
    t[0x1F] = Some(HAH);
    t[0x20] = Some(KHAH);
    t[0x21] = Some(KHAH);
    t[0x22] = Some(DAL);
    t[0x23] = Some(THAL);
    t[0x24] = Some(REH);
    t[0x25] = Some(ZAIN);
    t[0x26] = Some(JEH);
    t[0x27] = Some(SEEN);
    t[0x28] = Some(SEEN);
    t[0x29] = Some(SHEEN);
    t[0x2A] = Some(SHEEN);
    t[0x2B] = Some(SAD);
    t[0x2C] = Some(SAD);
    t[0x2D] = Some(DAD);
    t[0x2E] = Some(DAD);
    t[0x2F] = Some(TAH);
    // 0xB0..=0xDF: box drawing, unmapped
    t[0x60] = Some(ZAH);
    t[0x61] = Some(AIN); // isolated
    t[0x62] = Some(AIN); // final
    t[0x63] = Some(AIN); // medial
    t[0x64] = Some(AIN); // initial
    t[0x65] = Some(GHAIN);
    t[0x66] = Some(GHAIN);
    t[0x67] = Some(GHAIN);
    t[0x68] = Some(GHAIN);
    t[0x69] = Some(FEH);
    t[0x6A] = Some(FEH);
    t[0x6B] = Some(QAF);
    t[0x6C] = Some(QAF);
    t[0x6D] = Some(KEHEH);
    t[0x6E] = Some(KEHEH);
    t[0x6F] = Some(GAF);
    t[0x70] = Some(GAF);
    t[0x71] = Some(LAM);
    t[0x72] = Some(LAM_ALEF);
    t[0x73] = Some(LAM);
    t[0x74] = Some(MEEM);
    t[0x75] = Some(MEEM);
    t[0x76] = Some(NOON);
    t[0x77] = Some(NOON);
    t[0x78] = Some(WAW);
    t[0x79] = Some(HEH); // isolated / final
    t[0x7A] = Some(HEH); // medial
    t[0x7B] = Some(HEH); // initial
    t[0x7C] = Some(FARSI_YEH); // final
    t[0x7D] = Some(FARSI_YEH); // isolated
    t[0x7E] = Some(FARSI_YEH); // initial
    t[0x7F] = Some("\u{00A0}");
    t
};

/// Two-byte glyph sequences decoded as a unit.
///
/// Writers that lack the `0xF2` ligature glyph compose lam-alef from an
/// initial lam followed by a final alef. Pairs are matched before the
/// per-byte table is consulted.
static CONTEXTUAL_PAIRS: &[([u8; 2], &str)] = &[([0xF3, 0x91], LAM_ALEF)];

/// Looks up a high-half byte (`0x80..=0xFF`) in the code page table.
///
/// Returns `None` for ASCII bytes, which [`decode`] passes through without
/// a lookup, and for high-half bytes the table leaves unmapped.
pub fn lookup(byte: u8) -> Option<&'static str> {
    if byte.is_ascii() {
        return None;
    }
    HIGH_HALF[(byte - 0x80) as usize]
}

/// Decodes Iran System bytes into a UTF-8 string.
///
/// ASCII passes through unchanged, including `0x00`; callers that treat NUL as
/// end of string truncate before calling.
pub fn decode(bytes: &[u8]) -> Result<String> {
    let mut out = String::with_capacity(bytes.len() * 2);
    let mut position = 0;
    while position < bytes.len() {
        let byte = bytes[position];
        if byte.is_ascii() {
            out.push(byte as char);
            position += 1;
            continue;
        }

        if let Some(pair) = bytes.get(position..position + 2)
            && let Some((_, text)) = CONTEXTUAL_PAIRS.iter().find(|(seq, _)| seq == pair)
        {
            out.push_str(text);
            position += 2;
            continue;
        }

        let text = lookup(byte).ok_or(DbfError::Transcode { byte, position })?;
        out.push_str(text);
        position += 1;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_is_identity() {
        let bytes: Vec<u8> = (0x01..=0x7F).collect();
        let decoded = decode(&bytes).unwrap();
        assert_eq!(decoded.as_bytes(), bytes.as_slice());
    }

    #[test]
    fn lookup_covers_high_half_only() {
        assert_eq!(lookup(b'A'), None);
        assert_eq!(lookup(0x00), None);
        assert_eq!(lookup(0x80), Some("\u{06F0}"));
        assert_eq!(lookup(0xB3), None);
        assert_eq!(decode(b"A").unwrap(), "A");
    }

    #[test]
    fn contextual_shapes_share_base_letter() {
        // ain: isolated, final, medial, initial
        assert_eq!(decode(&[0xE1, 0xE2, 0xE3, 0xE4]).unwrap(), "\u{0639}".repeat(4));
        // farsi yeh forms
        assert_eq!(decode(&[0xFC, 0xFD, 0xFE]).unwrap(), "\u{06CC}".repeat(3));
    }

    #[test]
    fn persian_word_and_digits() {
        // سلام (seen-initial, lam-initial, alef-final, meem)
        let word = decode(&[0xA8, 0xF3, 0x90, 0xF4]).unwrap();
        assert_eq!(word, "\u{0633}\u{0644}\u{0627}\u{0645}");
        assert_eq!(decode(&[0x81, 0x84, 0x80]).unwrap(), "\u{06F1}\u{06F4}\u{06F0}");
    }

    #[test]
    fn ligatures_expand_to_two_letters() {
        assert_eq!(decode(&[0xF2]).unwrap(), "\u{0644}\u{0627}");
        assert_eq!(decode(&[0xF3, 0x91]).unwrap(), "\u{0644}\u{0627}");
    }

    #[test]
    fn box_drawing_is_rejected() {
        match decode(b"ab\xB3") {
            Err(DbfError::Transcode { byte, position }) => {
                assert_eq!(byte, 0xB3);
                assert_eq!(position, 2);
            }
            other => panic!("expected transcode error, got {:?}", other),
        }
    }

    #[test]
    fn output_is_valid_utf8_for_every_mapped_byte() {
        for byte in 0x80u8..=0xFF {
            if let Some(text) = lookup(byte) {
                assert!(!text.is_empty());
                assert_eq!(decode(&[byte]).unwrap(), text);
            }
        }
    }
}

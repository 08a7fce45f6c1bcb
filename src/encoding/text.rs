//! Turning text into the byte sequence that gets hashed.
//!
//! Signing peers in the wild encode each UTF-16 code unit independently, so a
//! character outside the Basic Multilingual Plane becomes two 3-byte surrogate
//! sequences instead of one 4-byte UTF-8 sequence. [`TextEncoding::Utf16Capped`]
//! reproduces that. For BMP-only text it is byte-for-byte UTF-8.

use std::borrow::Cow;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextEncoding {
    /// Per UTF-16 code unit: 1, 2 or 3 bytes, never 4.
    #[default]
    Utf16Capped,
    /// Standard UTF-8, the bytes of the `str` as-is.
    Utf8,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Newlines {
    #[default]
    Preserve,
    /// Rewrite every `"\r\n"` to `"\n"` before encoding.
    NormalizeCrlf,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrepareOptions {
    pub encoding: TextEncoding,
    pub newlines: Newlines,
}

/// Encode `input` for hashing. Borrows the string's own bytes whenever the
/// options would leave them unchanged.
pub fn prepare<'a>(input: &'a str, options: &PrepareOptions) -> Cow<'a, [u8]> {
    let text: Cow<'a, str> = match options.newlines {
        Newlines::NormalizeCrlf if input.contains("\r\n") => Cow::Owned(input.replace("\r\n", "\n")),
        _ => Cow::Borrowed(input),
    };

    // only 4-byte sequences differ between the two encodings
    let needs_expansion =
        options.encoding == TextEncoding::Utf16Capped && text.chars().any(|c| c.len_utf8() == 4);

    match (text, needs_expansion) {
        (text, true) => Cow::Owned(encode_utf16_capped(&text)),
        (Cow::Borrowed(s), false) => Cow::Borrowed(s.as_bytes()),
        (Cow::Owned(s), false) => Cow::Owned(s.into_bytes()),
    }
}

/// Number of bytes [`TextEncoding::Utf16Capped`] produces for one code unit.
#[inline(always)]
fn capped_len(unit: u16) -> usize {
    match unit {
        0x0000..=0x007F => 1,
        0x0080..=0x07FF => 2,
        _ => 3,
    }
}

fn encode_utf16_capped(input: &str) -> Vec<u8> {
    let mut output = Vec::with_capacity(input.encode_utf16().map(capped_len).sum());
    for unit in input.encode_utf16() {
        match capped_len(unit) {
            1 => output.push(unit as u8),
            2 => output.extend_from_slice(&[
                0xC0 | (unit >> 6) as u8,
                0x80 | (unit & 0x3F) as u8,
            ]),
            _ => output.extend_from_slice(&[
                0xE0 | (unit >> 12) as u8,
                0x80 | ((unit >> 6) & 0x3F) as u8,
                0x80 | (unit & 0x3F) as u8,
            ]),
        }
    }
    output
}

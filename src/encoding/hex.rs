use crate::error::{Error, Result};

static LUT_LOWER: [u8; 16] = *b"0123456789abcdef";

#[inline(always)]
fn encode_byte(byte: u8) -> [u8; 2] {
    [LUT_LOWER[(byte >> 4) as usize], LUT_LOWER[(byte & 0x0F) as usize]]
}

#[inline(always)]
fn decode_nibble(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

/// Encode input bytes as lowercase hex into the output slice.
/// Returns the number of bytes written, which is always `2 * input.len()`.
pub fn encode_lower_slice(input: &[u8], output: &mut [u8]) -> Result<usize> {
    let required = input.len() * 2;
    if output.len() < required {
        return Err(Error::OutputTooSmall {
            required,
            available: output.len(),
        });
    }

    for (pair, &byte) in output.chunks_exact_mut(2).zip(input) {
        pair.copy_from_slice(&encode_byte(byte));
    }
    Ok(required)
}

pub fn encode_lower(input: &[u8]) -> String {
    let mut output = String::with_capacity(input.len() * 2);
    for &byte in input {
        let [hi, lo] = encode_byte(byte);
        output.push(hi as char);
        output.push(lo as char);
    }
    output
}

/// Parse exactly `2 * N` hex characters (either case) into `N` bytes.
pub fn decode_array<const N: usize>(input: &str) -> Result<[u8; N]> {
    let bytes = input.as_bytes();
    if bytes.len() != N * 2 {
        return Err(Error::InvalidDigestLength {
            expected: N * 2,
            len: input.chars().count(),
        });
    }

    let mut output = [0u8; N];
    for (i, (out, pair)) in output.iter_mut().zip(bytes.chunks_exact(2)).enumerate() {
        let hi = decode_nibble(pair[0]).ok_or_else(|| invalid_digit(input, i * 2))?;
        let lo = decode_nibble(pair[1]).ok_or_else(|| invalid_digit(input, i * 2 + 1))?;
        *out = (hi << 4) | lo;
    }
    Ok(output)
}

fn invalid_digit(input: &str, index: usize) -> Error {
    // a multi-byte char starts at or before `index`, report it whole
    let found = input
        .char_indices()
        .take_while(|&(at, _)| at <= index)
        .last()
        .map_or('\u{FFFD}', |(_, c)| c);
    Error::InvalidHexDigit { index, found }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_lower() {
        assert_eq!(encode_lower(b""), "");
        assert_eq!(encode_lower(&[0x00, 0x0f, 0xa0, 0xff]), "000fa0ff");
        assert_eq!(
            encode_lower(&[0xd4, 0x1d, 0x8c, 0xd9, 0x8f, 0x00, 0xb2, 0x04]),
            "d41d8cd98f00b204"
        );
    }

    #[test]
    fn test_encode_lower_slice() {
        let mut out = [0u8; 8];
        assert_eq!(encode_lower_slice(&[0xde, 0xad], &mut out).unwrap(), 4);
        assert_eq!(&out[..4], b"dead");

        let mut small = [0u8; 3];
        assert!(matches!(
            encode_lower_slice(&[0xde, 0xad], &mut small),
            Err(Error::OutputTooSmall { required: 4, available: 3 })
        ));
    }

    #[test]
    fn test_decode_array() {
        assert_eq!(decode_array::<2>("beef").unwrap(), [0xbe, 0xef]);
        assert_eq!(decode_array::<2>("BEEF").unwrap(), [0xbe, 0xef]);
        assert!(matches!(
            decode_array::<2>("bee"),
            Err(Error::InvalidDigestLength { expected: 4, len: 3 })
        ));
        assert!(matches!(
            decode_array::<2>("be!f"),
            Err(Error::InvalidHexDigit { index: 2, found: '!' })
        ));
    }

    #[test]
    fn test_decode_reports_multibyte_char() {
        // "é" is two bytes, so the byte length matches N * 2
        match decode_array::<2>("béf") {
            Err(Error::InvalidHexDigit { index: 1, found: 'é' }) => {}
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_random_bytes_survive_hex() {
        let data: [u8; 16] = rand::random();
        let encoded = encode_lower(&data);
        assert_eq!(encoded.len(), 32);
        assert!(encoded.bytes().all(|c| c.is_ascii_digit() || (b'a'..=b'f').contains(&c)));
        assert_eq!(decode_array::<16>(&encoded).unwrap(), data);
    }
}

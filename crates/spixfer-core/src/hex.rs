//! Hex payload codec and MOSI/MISO dump format
//!
//! Payload tokens are decoded two characters per byte, high nibble first.
//! In the default lenient mode every byte position is scanned the way
//! `sscanf("%2hhx")` scans it: leading whitespace is skipped, an optional
//! sign is honoured, up to two hex digits are consumed, and a position that
//! holds no hex digit at all decodes to `0x00`. Strict mode rejects any
//! character that is not a hex digit.

use crate::bus::{Payload, MAX_TRANSFER_SIZE};
use crate::error::{Error, Result};
use crate::speed::is_c_space;

/// Longest accepted payload token in characters
pub const MAX_PAYLOAD_HEX_LEN: usize = MAX_TRANSFER_SIZE * 2;

/// Decode a payload token into transmit bytes
///
/// ```
/// use spixfer_core::hex::decode_payload;
///
/// let payload = decode_payload("0A1bFF", true)?;
/// assert_eq!(payload.as_slice(), &[0x0A, 0x1B, 0xFF]);
/// # Ok::<(), spixfer_core::Error>(())
/// ```
pub fn decode_payload(token: &str, strict: bool) -> Result<Payload> {
    let len = token.len();
    if len > MAX_PAYLOAD_HEX_LEN {
        return Err(Error::PayloadTooLarge { len });
    }
    if len % 2 != 0 {
        return Err(Error::OddPayloadLength { len });
    }

    if let Some((position, found)) = first_non_hex(token) {
        if strict {
            return Err(Error::InvalidHexDigit { position, found });
        }
        log::warn!(
            "Payload {:?}: non-hex character {:?} at position {}, bytes may decode as 00",
            token,
            found,
            position
        );
    }

    let bytes = token.as_bytes();
    let mut payload = Payload::new();
    for offset in (0..len).step_by(2) {
        payload
            .push(scan_byte(&bytes[offset..]))
            .map_err(|_| Error::PayloadTooLarge { len })?;
    }
    Ok(payload)
}

/// Position and value of the first character that is not a hex digit
fn first_non_hex(token: &str) -> Option<(usize, char)> {
    token.char_indices().find(|(_, c)| !c.is_ascii_hexdigit())
}

/// Scan one byte from the start of `rest`, `%2hhx` style
fn scan_byte(rest: &[u8]) -> u8 {
    let mut pos = rest.iter().take_while(|&&b| is_c_space(b)).count();
    let mut width = 2;
    let mut negative = false;
    if let Some(&sign @ (b'+' | b'-')) = rest.get(pos) {
        negative = sign == b'-';
        pos += 1;
        width -= 1;
    }

    let mut value: u8 = 0;
    for &b in rest[pos..].iter().take(width) {
        match (b as char).to_digit(16) {
            Some(d) => value = value.wrapping_mul(16).wrapping_add(d as u8),
            None => break,
        }
    }

    if negative {
        value.wrapping_neg()
    } else {
        value
    }
}

/// Encode bytes as contiguous uppercase hex, e.g. `0A1B`
pub fn encode_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02X}", b)).collect()
}

/// Format bytes for the transfer dump: each byte as `XX` followed by a space
pub fn format_dump(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02X} ", b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_basic() {
        let payload = decode_payload("0A0B", false).unwrap();
        assert_eq!(payload.as_slice(), &[0x0A, 0x0B]);

        let payload = decode_payload("deadBEEF", false).unwrap();
        assert_eq!(payload.as_slice(), &[0xDE, 0xAD, 0xBE, 0xEF]);
    }

    #[test]
    fn test_decode_empty() {
        let payload = decode_payload("", false).unwrap();
        assert!(payload.is_empty());
    }

    #[test]
    fn test_round_trip() {
        let bytes: Vec<u8> = (0..=255).collect();
        let encoded = encode_hex(&bytes);
        assert_eq!(encoded.len(), MAX_PAYLOAD_HEX_LEN);
        let decoded = decode_payload(&encoded, true).unwrap();
        assert_eq!(decoded.as_slice(), bytes.as_slice());
    }

    #[test]
    fn test_size_boundary() {
        let max = "A5".repeat(MAX_TRANSFER_SIZE);
        let payload = decode_payload(&max, false).unwrap();
        assert_eq!(payload.len(), MAX_TRANSFER_SIZE);
        assert!(payload.iter().all(|&b| b == 0xA5));

        let over = "A5".repeat(MAX_TRANSFER_SIZE + 1);
        assert!(matches!(
            decode_payload(&over, false),
            Err(Error::PayloadTooLarge { len: 514 })
        ));
    }

    #[test]
    fn test_odd_length_rejected() {
        assert!(matches!(
            decode_payload("ABC", false),
            Err(Error::OddPayloadLength { len: 3 })
        ));
        assert!(matches!(
            decode_payload("ABC", true),
            Err(Error::OddPayloadLength { len: 3 })
        ));
    }

    #[test]
    fn test_lenient_scanning() {
        // Second character not hex: only the first digit is used
        assert_eq!(decode_payload("AZ", false).unwrap().as_slice(), &[0x0A]);
        // No hex digit at the byte position
        assert_eq!(decode_payload("ZZ01", false).unwrap().as_slice(), &[0x00, 0x01]);
        // Leading whitespace is skipped and the scan runs past the pair
        assert_eq!(decode_payload(" AB1", false).unwrap().as_slice(), &[0xAB, 0xB1]);
        // Sign takes one character of the field width
        assert_eq!(decode_payload("-1", false).unwrap().as_slice(), &[0xFF]);
    }

    #[test]
    fn test_first_non_hex() {
        assert_eq!(first_non_hex("0A1bFF"), None);
        assert_eq!(first_non_hex(""), None);
        assert_eq!(first_non_hex("0A G"), Some((2, ' ')));
        assert_eq!(first_non_hex("\u{e9}0"), Some((0, '\u{e9}')));
    }

    #[test]
    fn test_lenient_tolerates_what_strict_rejects() {
        for token in ["AZ", "ZZ01", " AB1", "-1"] {
            assert!(decode_payload(token, false).is_ok());
            assert!(matches!(
                decode_payload(token, true),
                Err(Error::InvalidHexDigit { .. })
            ));
        }
    }

    #[test]
    fn test_strict_rejects_non_hex() {
        match decode_payload("0AxB", true) {
            Err(Error::InvalidHexDigit { position, found }) => {
                assert_eq!(position, 2);
                assert_eq!(found, 'x');
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(decode_payload(" A", true).is_err());
    }

    #[test]
    fn test_format_dump() {
        assert_eq!(format_dump(&[0x0A, 0x0B]), "0A 0B ");
        assert_eq!(format_dump(&[0xFF]), "FF ");
        assert_eq!(format_dump(&[]), "");
    }

    #[test]
    fn test_encode_hex() {
        assert_eq!(encode_hex(&[0x00, 0x7F, 0xAB]), "007FAB");
    }
}

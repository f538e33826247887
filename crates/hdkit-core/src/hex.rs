//! Hex string conversions.
//!
//! Accepts an optional `0x` prefix and odd-length input (a leading `0` nibble
//! is implied), so `"0xf"`, `"0f"` and `"f"` all decode to `[0x0f]`.

#![forbid(unsafe_code)]

use crate::{Error, Result};

/// Decode a hex string into bytes.
pub fn decode(input: &str) -> Result<Vec<u8>> {
    let digits = strip_prefix(input);
    let decoded = if digits.len() % 2 == 1 {
        hex::decode(format!("0{digits}"))
    } else {
        hex::decode(digits)
    };
    decoded.map_err(|e| Error::InvalidHex(format!("{input:?}: {e}")))
}

/// Decode a hex string that must hold exactly `N` bytes.
pub fn decode_array<const N: usize>(input: &str) -> Result<[u8; N]> {
    let bytes = decode(input)?;
    bytes
        .as_slice()
        .try_into()
        .map_err(|_| Error::InvalidHex(format!("expected {N} bytes, got {}", bytes.len())))
}

/// Lower-case hex without prefix.
pub fn encode(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Lower-case hex with a `0x` prefix.
pub fn encode_prefixed(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

fn strip_prefix(input: &str) -> &str {
    input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
        .unwrap_or(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_and_odd_length() {
        assert_eq!(decode("0xf").unwrap(), vec![0x0f]);
        assert_eq!(decode("0f").unwrap(), vec![0x0f]);
        assert_eq!(decode("aaef").unwrap(), vec![0xaa, 0xef]);
        assert_eq!(decode("0XAAEF").unwrap(), vec![0xaa, 0xef]);
        assert_eq!(decode("").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_invalid() {
        let err = decode("0xzz").unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::MalformedInput);
    }

    #[test]
    fn test_decode_array() {
        let arr: [u8; 2] = decode_array("0x0102").unwrap();
        assert_eq!(arr, [1, 2]);
        assert!(decode_array::<3>("0x0102").is_err());
    }

    #[test]
    fn test_encode() {
        assert_eq!(encode(&[0xab, 0x2e]), "ab2e");
        assert_eq!(encode_prefixed(&[0xab, 0x2e]), "0xab2e");
    }
}

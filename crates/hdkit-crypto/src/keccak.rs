//! Keccak-256 (the pre-standard SHA-3 padding used by Ethereum).

#![forbid(unsafe_code)]

use sha3::{Digest, Keccak256};

/// Compute Keccak-256.
pub fn digest(data: &[u8]) -> [u8; 32] {
    Keccak256::digest(data).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_hex(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{:02x}", b)).collect()
    }

    #[test]
    fn test_empty() {
        assert_eq!(
            to_hex(&digest(b"")),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn test_differs_from_sha3() {
        // NIST SHA3-256("") is a7ffc6f8...; Keccak-256 must not match it
        assert_ne!(
            to_hex(&digest(b"")),
            "a7ffc6f8bf1ed76651c14756a061d662f580ff4de43b49fa82d80a4b80f8434a"
        );
    }
}

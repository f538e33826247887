//! SHA-256 (FIPS 180-4).
//! Used for BIP39 checksums, Base58Check framing and HASH160.

#![forbid(unsafe_code)]

use sha2::{Digest, Sha256};

/// Compute SHA-256.
pub fn digest(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

/// Compute SHA-256(SHA-256(data)).
pub fn double(data: &[u8]) -> [u8; 32] {
    digest(&digest(data))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_hex(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{:02x}", b)).collect()
    }

    #[test]
    fn test_empty() {
        // FIPS 180-4 example: SHA-256("")
        assert_eq!(
            to_hex(&digest(b"")),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_abc() {
        // FIPS 180-4 example: SHA-256("abc")
        assert_eq!(
            to_hex(&digest(b"abc")),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_double() {
        // SHA-256(SHA-256("hello"))
        assert_eq!(
            to_hex(&double(b"hello")),
            "9595c9df90075148eb06860365df33584b75bff782a510c6cd4883a419833d50"
        );
    }
}

//! PBKDF2-HMAC-SHA512 (RFC 8018).
//! This is the dominant cost in BIP39 seed derivation (2048 iterations).

#![forbid(unsafe_code)]

use sha2::Sha512;

/// Derive key using PBKDF2-HMAC-SHA512, filling `output`.
pub fn derive(password: &[u8], salt: &[u8], iterations: u32, output: &mut [u8]) {
    pbkdf2::pbkdf2_hmac::<Sha512>(password, salt, iterations, output);
}

//! RIPEMD-160 and HASH160 (RIPEMD-160 over SHA-256).

#![forbid(unsafe_code)]

use ripemd::{Digest, Ripemd160};

use crate::sha256;

/// Compute RIPEMD-160.
pub fn digest(data: &[u8]) -> [u8; 20] {
    Ripemd160::digest(data).into()
}

/// Compute RIPEMD-160(SHA-256(data)).
///
/// Key identifiers, fingerprints and pay-to-pubkey-hash payloads all use this.
pub fn hash160(data: &[u8]) -> [u8; 20] {
    digest(&sha256::digest(data))
}

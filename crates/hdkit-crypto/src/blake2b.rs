//! BLAKE2b-256 (RFC 7693, 32-byte output, unkeyed).
//!
//! Used for the legacy native address hash.

#![forbid(unsafe_code)]

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};

type Blake2b256 = Blake2b<U32>;

/// Compute BLAKE2b-256.
pub fn digest(data: &[u8]) -> [u8; 32] {
    Blake2b256::digest(data).into()
}

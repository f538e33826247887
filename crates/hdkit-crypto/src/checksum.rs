//! Four-byte double-SHA256 checksums used by Base58Check payloads.

#![forbid(unsafe_code)]

use hdkit_core::{Error, Result};

use crate::sha256;

/// Checksum length in bytes.
pub const CHECKSUM_LEN: usize = 4;

/// Return `data || SHA256(SHA256(data))[0..4]`.
pub fn checksum(data: &[u8]) -> Vec<u8> {
    let digest = sha256::double(data);
    let mut out = Vec::with_capacity(data.len() + CHECKSUM_LEN);
    out.extend_from_slice(data);
    out.extend_from_slice(&digest[..CHECKSUM_LEN]);
    out
}

/// Verify a trailing checksum and return the payload without it.
pub fn validate_checksum(data: &[u8]) -> Result<Vec<u8>> {
    if data.len() < CHECKSUM_LEN {
        return Err(Error::ChecksumMismatch);
    }
    let (payload, check) = data.split_at(data.len() - CHECKSUM_LEN);
    if sha256::double(payload)[..CHECKSUM_LEN] != *check {
        return Err(Error::ChecksumMismatch);
    }
    Ok(payload.to_vec())
}

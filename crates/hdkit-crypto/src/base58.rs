//! Base58 (Bitcoin alphabet) and Base58Check.

#![forbid(unsafe_code)]

use hdkit_core::{Error, Result};

use crate::checksum;

/// Encode bytes to Base58 string. Each leading zero byte becomes a `1`.
pub fn encode(data: &[u8]) -> String {
    bs58::encode(data).into_string()
}

/// Decode Base58 string to bytes.
pub fn decode(s: &str) -> Result<Vec<u8>> {
    bs58::decode(s)
        .into_vec()
        .map_err(|e| Error::InvalidBase58(e.to_string()))
}

/// Append a checksum and encode.
pub fn encode_check(payload: &[u8]) -> String {
    encode(&checksum::checksum(payload))
}

/// Decode, verify the trailing checksum, and return the payload.
pub fn decode_check(s: &str) -> Result<Vec<u8>> {
    checksum::validate_checksum(&decode(s)?)
}

//! EIP-712 typed structured data hashing.
//!
//! [`TypedData`] holds the JSON payload; the encoder methods compute
//! `encodeType`, `hashStruct`, the domain separator and the final sign hash.
//! Member types cover `address`, `bool`, `string`, `bytes`, `bytesN`,
//! `uintN`, `intN` and nested structs. Array members are rejected with
//! [`hdkit_core::Error::UnsupportedType`].

#![forbid(unsafe_code)]

pub mod abi;
pub mod encoder;
pub mod typed_data;

pub use abi::AbiType;
pub use typed_data::{Member, TypedData, DOMAIN_TYPE};

use hdkit_core::Result;
use hdkit_crypto::{DefaultGateway, HashGateway};

/// Sign hash of a JSON typed-data payload.
pub fn encode_typed_data(json: &str) -> Result<[u8; 32]> {
    encode_typed_data_with(json, &DefaultGateway)
}

pub fn encode_typed_data_with<G: HashGateway>(json: &str, gateway: &G) -> Result<[u8; 32]> {
    TypedData::from_json(json)?.sign_hash(gateway)
}

//! Multi-chain address encoding.
//!
//! Every encoder is a pure function of key material and chain parameters;
//! hashing goes through an injected [`hdkit_crypto::HashGateway`].

#![forbid(unsafe_code)]

pub mod bech32;
pub mod ethereum;
pub mod native;
pub mod network;
pub mod p2pkh;

pub use hdkit_crypto::checksum::{checksum, validate_checksum, CHECKSUM_LEN};
pub use native::NativeKeyPair;
pub use network::{ChainSpec, PRESET_NAMES};

//! Cryptographic primitives for hdkit.
//!
//! Thin, typed wrappers over the RustCrypto hashes and `k256`, the
//! byte-string arithmetic used for BIP32 child keys, and Base58Check.
//! Higher layers reach these through [`HashGateway`].

#![forbid(unsafe_code)]

pub mod base58;
pub mod bigint;
pub mod blake2b;
pub mod checksum;
pub mod gateway;
pub mod hmac;
pub mod keccak;
pub mod pbkdf2;
pub mod ripemd160;
pub mod secp256k1;
pub mod sha256;

pub use gateway::{DefaultGateway, HashGateway};

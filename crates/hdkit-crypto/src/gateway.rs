//! Pluggable hashing and curve backend.
//!
//! Every digest, MAC and point operation the derivation engine and the
//! encoders need goes through [`HashGateway`], so a caller can substitute a
//! hardware or audited backend without touching the algorithms above it.
//! Implementations must be safe to share between threads.

#![forbid(unsafe_code)]

use hdkit_core::Result;

use crate::{blake2b, hmac, keccak, ripemd160, secp256k1, sha256};

/// Hash, MAC and secp256k1 primitives.
pub trait HashGateway: Send + Sync {
    fn sha256(&self, data: &[u8]) -> [u8; 32];

    /// Pre-standard Keccak-256 (not FIPS SHA3-256).
    fn keccak256(&self, data: &[u8]) -> [u8; 32];

    fn blake2b256(&self, data: &[u8]) -> [u8; 32];

    fn ripemd160(&self, data: &[u8]) -> [u8; 20];

    fn hmac_sha512(&self, key: &[u8], data: &[u8]) -> Result<[u8; 64]>;

    /// SEC1 public key for a big-endian private scalar.
    fn public_key(&self, private_key: &[u8], compressed: bool) -> Result<Vec<u8>>;

    fn compress_public_key(&self, public_key: &[u8]) -> Result<[u8; 33]>;

    fn decompress_public_key(&self, public_key: &[u8]) -> Result<[u8; 65]>;

    /// `tweak·G + P`, compressed.
    fn public_key_tweak_add(&self, public_key: &[u8], tweak: &[u8; 32]) -> Result<[u8; 33]>;

    fn double_sha256(&self, data: &[u8]) -> [u8; 32] {
        self.sha256(&self.sha256(data))
    }

    /// RIPEMD160(SHA256(data)).
    fn hash160(&self, data: &[u8]) -> [u8; 20] {
        self.ripemd160(&self.sha256(data))
    }
}

/// Gateway backed by the RustCrypto hashes and `k256`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DefaultGateway;

impl HashGateway for DefaultGateway {
    fn sha256(&self, data: &[u8]) -> [u8; 32] {
        sha256::digest(data)
    }

    fn keccak256(&self, data: &[u8]) -> [u8; 32] {
        keccak::digest(data)
    }

    fn blake2b256(&self, data: &[u8]) -> [u8; 32] {
        blake2b::digest(data)
    }

    fn ripemd160(&self, data: &[u8]) -> [u8; 20] {
        ripemd160::digest(data)
    }

    fn hmac_sha512(&self, key: &[u8], data: &[u8]) -> Result<[u8; 64]> {
        hmac::hmac_sha512(key, data)
    }

    fn public_key(&self, private_key: &[u8], compressed: bool) -> Result<Vec<u8>> {
        secp256k1::public_key(private_key, compressed)
    }

    fn compress_public_key(&self, public_key: &[u8]) -> Result<[u8; 33]> {
        secp256k1::compress(public_key)
    }

    fn decompress_public_key(&self, public_key: &[u8]) -> Result<[u8; 65]> {
        secp256k1::decompress(public_key)
    }

    fn public_key_tweak_add(&self, public_key: &[u8], tweak: &[u8; 32]) -> Result<[u8; 33]> {
        secp256k1::tweak_add(public_key, tweak)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_hex(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{:02x}", b)).collect()
    }

    #[test]
    fn test_provided_methods() {
        let g = DefaultGateway;
        assert_eq!(g.double_sha256(b"hello"), sha256::double(b"hello"));
        assert_eq!(g.hash160(&[]), ripemd160::hash160(&[]));
    }

    #[test]
    fn test_hash160_of_generator() {
        let g = DefaultGateway;
        let pk = g.public_key(&[1], true).unwrap();
        assert_eq!(
            to_hex(&g.hash160(&pk)),
            "751e76e8199196d454941c45d1b3a323f1433bd6"
        );
    }

    #[test]
    fn test_usable_as_trait_object() {
        let g: &dyn HashGateway = &DefaultGateway;
        assert_eq!(
            to_hex(&g.keccak256(&[])),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }
}

//! Legacy checksummed native addresses (Waves-style) and their Curve25519
//! key pairs.
//!
//! Address format (26 bytes before Base58):
//! - Version byte: 0x01
//! - Chain id byte (`'W'` mainnet, `'T'` testnet)
//! - Public key hash: secure_hash(pubkey)[0:20]
//! - Checksum: secure_hash(version || chain_id || hash)[0:4]
//!
//! `secure_hash(x) = Keccak256(BLAKE2b-256(x))`.

#![forbid(unsafe_code)]

use std::fmt;

use hdkit_core::{Error, Result};
use hdkit_crypto::{base58, HashGateway};
use x25519_dalek::{PublicKey, StaticSecret};

/// Address version byte.
pub const ADDRESS_VERSION: u8 = 0x01;
/// Decoded address length.
pub const ADDRESS_LEN: usize = 26;
/// Public key hash length.
pub const HASH_LEN: usize = 20;
/// Checksum length in bytes.
pub const CHECKSUM_LEN: usize = 4;

/// Mainnet chain id.
pub const MAINNET: u8 = b'W';
/// Testnet chain id.
pub const TESTNET: u8 = b'T';

/// Keccak256(BLAKE2b-256(data)).
pub fn secure_hash<G: HashGateway>(data: &[u8], gateway: &G) -> [u8; 32] {
    gateway.keccak256(&gateway.blake2b256(data))
}

/// Raw 26-byte address of `public_key` on chain `chain_id`.
pub fn address_bytes<G: HashGateway>(public_key: &[u8], chain_id: u8, gateway: &G) -> [u8; ADDRESS_LEN] {
    let hash = secure_hash(public_key, gateway);

    let mut out = [0u8; ADDRESS_LEN];
    out[0] = ADDRESS_VERSION;
    out[1] = chain_id;
    out[2..2 + HASH_LEN].copy_from_slice(&hash[..HASH_LEN]);

    let checksum = secure_hash(&out[..ADDRESS_LEN - CHECKSUM_LEN], gateway);
    out[ADDRESS_LEN - CHECKSUM_LEN..].copy_from_slice(&checksum[..CHECKSUM_LEN]);
    out
}

/// Base58 address of `public_key` on chain `chain_id`.
pub fn address<G: HashGateway>(public_key: &[u8], chain_id: u8, gateway: &G) -> String {
    base58::encode(&address_bytes(public_key, chain_id, gateway))
}

/// Check length, version, chain id and checksum of a Base58 address.
pub fn verify_address<G: HashGateway>(address: &str, chain_id: u8, gateway: &G) -> Result<()> {
    let raw = base58::decode(address)?;
    if raw.len() != ADDRESS_LEN {
        return Err(Error::InvalidAddress(format!(
            "expected {ADDRESS_LEN} bytes, got {}",
            raw.len()
        )));
    }
    if raw[0] != ADDRESS_VERSION {
        return Err(Error::InvalidAddress(format!(
            "unknown address version {:#04x}",
            raw[0]
        )));
    }
    if raw[1] != chain_id {
        return Err(Error::ChainIdMismatch {
            expected: chain_id,
            found: raw[1],
        });
    }
    let (payload, checksum) = raw.split_at(ADDRESS_LEN - CHECKSUM_LEN);
    if secure_hash(payload, gateway)[..CHECKSUM_LEN] != *checksum {
        return Err(Error::ChecksumMismatch);
    }
    Ok(())
}

/// Curve25519 key pair derived from a seed phrase.
#[derive(Clone, PartialEq, Eq)]
pub struct NativeKeyPair {
    private_key: [u8; 32],
    public_key: [u8; 32],
}

impl NativeKeyPair {
    pub fn private_key(&self) -> &[u8; 32] {
        &self.private_key
    }

    pub fn public_key(&self) -> &[u8; 32] {
        &self.public_key
    }

    pub fn private_key_base58(&self) -> String {
        base58::encode(&self.private_key)
    }

    pub fn public_key_base58(&self) -> String {
        base58::encode(&self.public_key)
    }

    pub fn address<G: HashGateway>(&self, chain_id: u8, gateway: &G) -> String {
        address(&self.public_key, chain_id, gateway)
    }
}

impl fmt::Debug for NativeKeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeKeyPair")
            .field("private_key", &"<redacted>")
            .field("public_key", &self.public_key_base58())
            .finish()
    }
}

/// Derive the key pair of a seed phrase.
///
/// `seed_hash = SHA256(secure_hash(0x00000000 || phrase))`, clamped per
/// RFC 7748, is the private scalar; the public key is its X25519 multiple of
/// the base point. The phrase is hashed as UTF-8 without normalization.
pub fn key_pair<G: HashGateway>(phrase: &str, gateway: &G) -> NativeKeyPair {
    let mut input = Vec::with_capacity(4 + phrase.len());
    input.extend_from_slice(&[0u8; 4]);
    input.extend_from_slice(phrase.as_bytes());

    let mut private_key = gateway.sha256(&secure_hash(&input, gateway));
    private_key[0] &= 248;
    private_key[31] &= 127;
    private_key[31] |= 64;

    let secret = StaticSecret::from(private_key);
    let public_key = PublicKey::from(&secret).to_bytes();
    NativeKeyPair {
        private_key,
        public_key,
    }
}

//! Base58Check pay-to-pubkey-hash and P2SH-wrapped P2WPKH addresses.
//!
//! P2PKH: `Base58Check(version || HASH160(pubkey))`
//! P2SH-P2WPKH: `Base58Check(script_version || HASH160(0x00 0x14 || HASH160(pubkey)))`

#![forbid(unsafe_code)]

use hdkit_core::{Error, Result};
use hdkit_crypto::{base58, HashGateway};

/// Bitcoin mainnet P2PKH version byte.
pub const BITCOIN_P2PKH: u8 = 0x00;
/// Bitcoin testnet P2PKH version byte.
pub const BITCOIN_TESTNET_P2PKH: u8 = 0x6f;
/// Bitcoin mainnet P2SH version byte.
pub const BITCOIN_P2SH: u8 = 0x05;
/// Bitcoin testnet P2SH version byte.
pub const BITCOIN_TESTNET_P2SH: u8 = 0xc4;

/// Decoded payload length: version byte + 20-byte hash.
pub const PAYLOAD_LEN: usize = 21;

/// P2PKH address of `public_key`, hashed in the encoding it is given in.
///
/// The key must be a valid compressed or uncompressed SEC1 point.
pub fn p2pkh_address<G: HashGateway>(public_key: &[u8], version: u8, gateway: &G) -> Result<String> {
    gateway.compress_public_key(public_key)?;
    Ok(encode_hash(version, &gateway.hash160(public_key)))
}

/// `0x00 0x14 || HASH160(compressed pubkey)`
pub fn p2wpkh_redeem_script<G: HashGateway>(public_key: &[u8], gateway: &G) -> Result<[u8; 22]> {
    let compressed = gateway.compress_public_key(public_key)?;
    let mut script = [0u8; 22];
    script[0] = 0x00;
    script[1] = 0x14;
    script[2..].copy_from_slice(&gateway.hash160(&compressed));
    Ok(script)
}

/// P2SH-P2WPKH address. Segwit programs always commit to the compressed key.
pub fn p2sh_p2wpkh_address<G: HashGateway>(
    public_key: &[u8],
    script_version: u8,
    gateway: &G,
) -> Result<String> {
    let script = p2wpkh_redeem_script(public_key, gateway)?;
    Ok(encode_hash(script_version, &gateway.hash160(&script)))
}

fn encode_hash(version: u8, hash: &[u8; 20]) -> String {
    let mut payload = [0u8; PAYLOAD_LEN];
    payload[0] = version;
    payload[1..].copy_from_slice(hash);
    base58::encode_check(&payload)
}

/// Split a Base58Check address into its version byte and 20-byte hash.
pub fn decode(address: &str) -> Result<(u8, [u8; 20])> {
    let payload = base58::decode_check(address)?;
    if payload.len() != PAYLOAD_LEN {
        return Err(Error::InvalidAddress(format!(
            "expected {PAYLOAD_LEN} byte payload, got {}",
            payload.len()
        )));
    }
    let mut hash = [0u8; 20];
    hash.copy_from_slice(&payload[1..]);
    Ok((payload[0], hash))
}

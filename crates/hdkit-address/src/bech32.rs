//! Bech32 hash160 addresses and BIP173 segwit v0 addresses.
//!
//! The versionless form (Avalanche X/P-chain style) encodes
//! `HASH160(compressed pubkey)` under a human-readable part and nothing
//! else; the hrp is the only chain discriminator. The segwit form prepends
//! witness version 0.

#![forbid(unsafe_code)]

use ::bech32::{segwit, Bech32, Hrp};
use hdkit_core::{Error, Result};
use hdkit_crypto::HashGateway;

/// Avalanche mainnet hrp.
pub const AVALANCHE_HRP: &str = "avax";
/// Bitcoin mainnet segwit hrp.
pub const BITCOIN_HRP: &str = "bc";
/// Bitcoin testnet segwit hrp.
pub const BITCOIN_TESTNET_HRP: &str = "tb";

fn parse_hrp(hrp: &str) -> Result<Hrp> {
    Hrp::parse(hrp).map_err(|e| Error::InvalidBech32(format!("hrp {hrp:?}: {e}")))
}

/// Bech32-encode raw bytes under `hrp`.
pub fn encode(hrp: &str, data: &[u8]) -> Result<String> {
    ::bech32::encode::<Bech32>(parse_hrp(hrp)?, data)
        .map_err(|e| Error::InvalidBech32(e.to_string()))
}

/// Decode a Bech32 string to its lower-case hrp and data bytes.
pub fn decode(encoded: &str) -> Result<(String, Vec<u8>)> {
    let (hrp, data) =
        ::bech32::decode(encoded).map_err(|e| Error::InvalidBech32(e.to_string()))?;
    Ok((hrp.to_lowercase(), data))
}

/// Segwit v0 address for a witness program.
pub fn encode_segwit_v0(hrp: &str, program: &[u8]) -> Result<String> {
    segwit::encode_v0(parse_hrp(hrp)?, program).map_err(|e| Error::InvalidBech32(e.to_string()))
}

/// Decode a segwit address to hrp, witness version and program.
pub fn decode_segwit(encoded: &str) -> Result<(String, u8, Vec<u8>)> {
    let (hrp, version, program) =
        segwit::decode(encoded).map_err(|e| Error::InvalidBech32(e.to_string()))?;
    Ok((hrp.to_lowercase(), version.to_u8(), program))
}

/// Versionless Bech32 address of `HASH160(compressed pubkey)`.
pub fn hash160_address<G: HashGateway>(public_key: &[u8], hrp: &str, gateway: &G) -> Result<String> {
    let compressed = gateway.compress_public_key(public_key)?;
    encode(hrp, &gateway.hash160(&compressed))
}

/// BIP173 P2WPKH address.
pub fn segwit_v0_address<G: HashGateway>(public_key: &[u8], hrp: &str, gateway: &G) -> Result<String> {
    let compressed = gateway.compress_public_key(public_key)?;
    encode_segwit_v0(hrp, &gateway.hash160(&compressed))
}

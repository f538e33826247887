//! Chain parameters.
//!
//! A [`ChainSpec`] names an address family plus the one parameter that
//! distinguishes chains within it (version byte, hrp or chain id). Specs are
//! plain data and round-trip through JSON.

#![forbid(unsafe_code)]

use std::fmt;

use hdkit_core::{Error, Result};
use hdkit_crypto::HashGateway;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{bech32, ethereum, native, p2pkh};

/// Address family and chain discriminator.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "snake_case")]
pub enum ChainSpec {
    /// EIP-55 checksummed Keccak address
    Ethereum,
    /// Base58Check pay-to-pubkey-hash
    P2pkh { version: u8 },
    /// Base58Check P2SH wrapping a P2WPKH program
    P2shP2wpkh { script_version: u8 },
    /// Versionless Bech32 of HASH160 (Avalanche style)
    Bech32 { hrp: String },
    /// BIP173 segwit v0 P2WPKH
    SegwitV0 { hrp: String },
    /// Legacy checksummed native address
    Native { chain_id: u8 },
}

/// Names accepted by [`ChainSpec::preset`].
pub const PRESET_NAMES: &[&str] = &[
    "ethereum",
    "bitcoin",
    "bitcoin-testnet",
    "bitcoin-p2sh",
    "bitcoin-p2sh-testnet",
    "bitcoin-segwit",
    "bitcoin-segwit-testnet",
    "avalanche",
    "waves",
    "waves-testnet",
];

impl ChainSpec {
    /// Look up a built-in chain by name.
    pub fn preset(name: &str) -> Option<Self> {
        let spec = match name {
            "ethereum" => Self::Ethereum,
            "bitcoin" => Self::P2pkh {
                version: p2pkh::BITCOIN_P2PKH,
            },
            "bitcoin-testnet" => Self::P2pkh {
                version: p2pkh::BITCOIN_TESTNET_P2PKH,
            },
            "bitcoin-p2sh" => Self::P2shP2wpkh {
                script_version: p2pkh::BITCOIN_P2SH,
            },
            "bitcoin-p2sh-testnet" => Self::P2shP2wpkh {
                script_version: p2pkh::BITCOIN_TESTNET_P2SH,
            },
            "bitcoin-segwit" => Self::SegwitV0 {
                hrp: bech32::BITCOIN_HRP.into(),
            },
            "bitcoin-segwit-testnet" => Self::SegwitV0 {
                hrp: bech32::BITCOIN_TESTNET_HRP.into(),
            },
            "avalanche" => Self::Bech32 {
                hrp: bech32::AVALANCHE_HRP.into(),
            },
            "waves" => Self::Native {
                chain_id: native::MAINNET,
            },
            "waves-testnet" => Self::Native {
                chain_id: native::TESTNET,
            },
            _ => return None,
        };
        Some(spec)
    }

    /// Parse a spec from JSON, e.g. `{"family":"bech32","hrp":"avax"}`.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::InvalidAddress(format!("chain spec: {e}")))
    }

    pub const fn family(&self) -> &'static str {
        match self {
            Self::Ethereum => "ethereum",
            Self::P2pkh { .. } => "p2pkh",
            Self::P2shP2wpkh { .. } => "p2sh_p2wpkh",
            Self::Bech32 { .. } => "bech32",
            Self::SegwitV0 { .. } => "segwit_v0",
            Self::Native { .. } => "native",
        }
    }

    /// Encode the address of a SEC1 public key under this spec.
    pub fn address<G: HashGateway>(&self, public_key: &[u8], gateway: &G) -> Result<String> {
        debug!(chain = %self, "encoding address");
        match self {
            Self::Ethereum => {
                let raw = ethereum::address_bytes(public_key, gateway)?;
                Ok(ethereum::checksum_encode(&raw, gateway))
            }
            Self::P2pkh { version } => p2pkh::p2pkh_address(public_key, *version, gateway),
            Self::P2shP2wpkh { script_version } => {
                p2pkh::p2sh_p2wpkh_address(public_key, *script_version, gateway)
            }
            Self::Bech32 { hrp } => bech32::hash160_address(public_key, hrp, gateway),
            Self::SegwitV0 { hrp } => bech32::segwit_v0_address(public_key, hrp, gateway),
            Self::Native { chain_id } => Ok(native::address(public_key, *chain_id, gateway)),
        }
    }
}

impl fmt::Display for ChainSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ethereum => f.write_str("ethereum"),
            Self::P2pkh { version } => write!(f, "p2pkh({version:#04x})"),
            Self::P2shP2wpkh { script_version } => write!(f, "p2sh_p2wpkh({script_version:#04x})"),
            Self::Bech32 { hrp } => write!(f, "bech32({hrp})"),
            Self::SegwitV0 { hrp } => write!(f, "segwit_v0({hrp})"),
            Self::Native { chain_id } => write!(f, "native({chain_id:#04x})"),
        }
    }
}

//! Extended key records and their Base58Check form.
//!
//! Layout (82 bytes):
//! `version(4) || depth(1) || parent_fingerprint(4) || child_number(4) ||
//! chain_code(32) || key_data(33) || checksum(4)`

#![forbid(unsafe_code)]

use std::fmt;
use std::str::FromStr;

use hdkit_core::{Error, Result};
use hdkit_crypto::{base58, checksum};

use crate::bip32::ExtendedKeyPair;

/// Full record length including the checksum.
pub const SERIALIZED_LEN: usize = 82;
/// Record length covered by the checksum.
pub const PAYLOAD_LEN: usize = 78;

const DEPTH: usize = 4;
const PARENT_FINGERPRINT: usize = 5;
const CHILD_NUMBER: usize = 9;
const CHAIN_CODE: usize = 13;
const KEY_DATA: usize = 45;

/// Extended key version prefixes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Version {
    /// `xprv`
    MainnetPrivate,
    /// `xpub`
    MainnetPublic,
    /// `tprv`
    TestnetPrivate,
    /// `tpub`
    TestnetPublic,
}

impl Version {
    pub const fn bytes(self) -> [u8; 4] {
        match self {
            Self::MainnetPrivate => [0x04, 0x88, 0xad, 0xe4],
            Self::MainnetPublic => [0x04, 0x88, 0xb2, 0x1e],
            Self::TestnetPrivate => [0x04, 0x35, 0x83, 0x94],
            Self::TestnetPublic => [0x04, 0x35, 0x87, 0xcf],
        }
    }

    pub fn from_bytes(bytes: [u8; 4]) -> Option<Self> {
        [
            Self::MainnetPrivate,
            Self::MainnetPublic,
            Self::TestnetPrivate,
            Self::TestnetPublic,
        ]
        .into_iter()
        .find(|v| v.bytes() == bytes)
    }

    pub const fn is_private(self) -> bool {
        matches!(self, Self::MainnetPrivate | Self::TestnetPrivate)
    }

    /// Public counterpart of a private version; public versions map to themselves.
    pub const fn public(self) -> Self {
        match self {
            Self::MainnetPrivate | Self::MainnetPublic => Self::MainnetPublic,
            Self::TestnetPrivate | Self::TestnetPublic => Self::TestnetPublic,
        }
    }

    /// Four-letter prefix the Base58 form starts with.
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::MainnetPrivate => "xprv",
            Self::MainnetPublic => "xpub",
            Self::TestnetPrivate => "tprv",
            Self::TestnetPublic => "tpub",
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

impl FromStr for Version {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "xprv" => Ok(Self::MainnetPrivate),
            "xpub" => Ok(Self::MainnetPublic),
            "tprv" => Ok(Self::TestnetPrivate),
            "tpub" => Ok(Self::TestnetPublic),
            other => Err(Error::InvalidExtendedKey(format!(
                "unknown version {other:?} (expected xprv, xpub, tprv or tpub)"
            ))),
        }
    }
}

/// A key with its position in the tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtendedKey {
    pub depth: u8,
    pub parent_fingerprint: [u8; 4],
    pub child_number: u32,
    pub key: ExtendedKeyPair,
}

impl ExtendedKey {
    /// Depth-0 key with zero fingerprint and child number.
    pub fn root(key: ExtendedKeyPair) -> Self {
        Self {
            depth: 0,
            parent_fingerprint: [0; 4],
            child_number: 0,
            key,
        }
    }
}

/// Checksummed 82-byte extended key record.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct SerializedExtendedKey([u8; SERIALIZED_LEN]);

impl SerializedExtendedKey {
    /// Assemble the record and append its checksum.
    pub fn assemble(
        version: Version,
        depth: u8,
        parent_fingerprint: [u8; 4],
        child_number: u32,
        chain_code: &[u8; 32],
        key_data: &[u8; 33],
    ) -> Self {
        let mut payload = Vec::with_capacity(PAYLOAD_LEN);
        payload.extend_from_slice(&version.bytes());
        payload.push(depth);
        payload.extend_from_slice(&parent_fingerprint);
        payload.extend_from_slice(&child_number.to_be_bytes());
        payload.extend_from_slice(chain_code);
        payload.extend_from_slice(key_data);

        let mut record = [0u8; SERIALIZED_LEN];
        record.copy_from_slice(&checksum::checksum(&payload));
        Self(record)
    }

    /// Validate length and checksum of a raw record.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != SERIALIZED_LEN {
            return Err(Error::InvalidExtendedKey(format!(
                "expected {SERIALIZED_LEN} bytes, got {}",
                bytes.len()
            )));
        }
        checksum::validate_checksum(bytes)?;
        let mut record = [0u8; SERIALIZED_LEN];
        record.copy_from_slice(bytes);
        Ok(Self(record))
    }

    pub fn as_bytes(&self) -> &[u8; SERIALIZED_LEN] {
        &self.0
    }

    pub fn version(&self) -> Result<Version> {
        let bytes = self.field::<4>(0);
        Version::from_bytes(bytes).ok_or_else(|| {
            Error::InvalidExtendedKey(format!("unknown version bytes {:02x?}", bytes))
        })
    }

    pub fn depth(&self) -> u8 {
        self.0[DEPTH]
    }

    pub fn parent_fingerprint(&self) -> [u8; 4] {
        self.field(PARENT_FINGERPRINT)
    }

    pub fn child_number(&self) -> u32 {
        u32::from_be_bytes(self.field(CHILD_NUMBER))
    }

    pub fn chain_code(&self) -> [u8; 32] {
        self.field(CHAIN_CODE)
    }

    /// `0x00 || k` for private records, the compressed public key otherwise.
    pub fn key_data(&self) -> [u8; 33] {
        self.field(KEY_DATA)
    }

    pub fn to_base58(&self) -> String {
        base58::encode(&self.0)
    }

    fn field<const N: usize>(&self, offset: usize) -> [u8; N] {
        let mut out = [0u8; N];
        out.copy_from_slice(&self.0[offset..offset + N]);
        out
    }
}

impl fmt::Display for SerializedExtendedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base58())
    }
}

impl fmt::Debug for SerializedExtendedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SerializedExtendedKey")
            .field("version", &self.version().ok())
            .field("depth", &self.depth())
            .field("child_number", &self.child_number())
            .finish_non_exhaustive()
    }
}

impl FromStr for SerializedExtendedKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_bytes(&base58::decode(s)?)
    }
}

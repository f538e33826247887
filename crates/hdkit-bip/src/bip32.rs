//! BIP32 hierarchical deterministic key derivation.
//!
//! Master key derivation, private-parent (CKDpriv) and public-parent (CKDpub)
//! child derivation, path walks, and the glue to the 82-byte `xprv`/`xpub`
//! record in [`crate::xkey`].
//!
//! Child private keys are computed as `(IL + k) mod n` with the byte-string
//! arithmetic in [`hdkit_crypto::bigint`]. `IL >= n` or a zero child key
//! fails with [`Error::InvalidChildKey`]; the caller picks the next index.

#![forbid(unsafe_code)]

use std::cmp::Ordering;
use std::fmt;

use hdkit_core::{hex, Error, Result};
use hdkit_crypto::bigint::{self, SECP256K1_ORDER};
use hdkit_crypto::{DefaultGateway, HashGateway};
use tracing::{debug, trace};

use crate::path::{ChildIndex, DerivationPath};
use crate::xkey::{ExtendedKey, SerializedExtendedKey, Version};

/// HMAC key for master key derivation.
pub const MASTER_HMAC_KEY: &[u8] = b"Bitcoin seed";

/// A private/extended key, a public-parent derived extended public key,
/// or a bare public key.
///
/// A pair always carries a public key. A pair without a private key has a
/// chain code only when it came from public-parent derivation or an `xpub`.
#[derive(Clone, PartialEq, Eq)]
pub struct ExtendedKeyPair {
    private_key: Option<Vec<u8>>,
    chain_code: Option<[u8; 32]>,
    public_key: Vec<u8>,
}

impl ExtendedKeyPair {
    /// Build from a private key, computing its compressed public key.
    ///
    /// A single leading zero byte is dropped, so the `0x00 || k` key data of
    /// a serialized `xprv` can be passed directly.
    pub fn from_private<G: HashGateway>(
        private_key: &[u8],
        chain_code: Option<[u8; 32]>,
        gateway: &G,
    ) -> Result<Self> {
        let private_key = match private_key.split_first() {
            Some((0, rest)) => rest,
            _ => private_key,
        };
        let public_key = gateway.public_key(private_key, true)?;
        Ok(Self {
            private_key: Some(private_key.to_vec()),
            chain_code,
            public_key,
        })
    }

    /// Build a public-only key without a chain code. The point is validated
    /// and kept in the encoding it was given in.
    pub fn from_public<G: HashGateway>(public_key: &[u8], gateway: &G) -> Result<Self> {
        gateway.compress_public_key(public_key)?;
        Ok(Self {
            private_key: None,
            chain_code: None,
            public_key: public_key.to_vec(),
        })
    }

    /// Public-only key carrying a chain code, as produced by CKDpub.
    pub(crate) fn public_extended(public_key: [u8; 33], chain_code: [u8; 32]) -> Self {
        Self {
            private_key: None,
            chain_code: Some(chain_code),
            public_key: public_key.to_vec(),
        }
    }

    /// Private key as stored, without left padding.
    pub fn private_key(&self) -> Option<&[u8]> {
        self.private_key.as_deref()
    }

    /// Private key left-padded to 32 bytes (`ser256(k)`).
    pub fn private_key_bytes(&self) -> Option<[u8; 32]> {
        self.private_key
            .as_deref()
            .and_then(bigint::to_fixed::<32>)
    }

    pub fn chain_code(&self) -> Option<&[u8; 32]> {
        self.chain_code.as_ref()
    }

    /// SEC1 public key (33 or 65 bytes).
    pub fn public_key(&self) -> &[u8] {
        &self.public_key
    }

    pub fn is_public_only(&self) -> bool {
        self.private_key.is_none()
    }

    pub fn is_extended(&self) -> bool {
        self.chain_code.is_some()
    }

    /// Drop the private key, keeping the public key and chain code.
    pub fn neuter(&self) -> Self {
        Self {
            private_key: None,
            chain_code: self.chain_code,
            public_key: self.public_key.clone(),
        }
    }
}

impl fmt::Debug for ExtendedKeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtendedKeyPair")
            .field(
                "private_key",
                &self.private_key.as_ref().map(|_| "<redacted>"),
            )
            .field("chain_code", &self.chain_code.as_ref().map(|_| "<redacted>"))
            .field("public_key", &hex::encode(&self.public_key))
            .finish()
    }
}

/// BIP32 derivation over an injected [`HashGateway`].
#[derive(Clone, Debug, Default)]
pub struct Bip32Engine<G = DefaultGateway> {
    gateway: G,
}

impl<G: HashGateway> Bip32Engine<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Master key from a binary seed: `HMAC-SHA512("Bitcoin seed", seed)`.
    ///
    /// Seeds of any length are accepted; BIP39 seeds are always 64 bytes.
    pub fn master_key(&self, seed: &[u8]) -> Result<ExtendedKeyPair> {
        let mac = self.gateway.hmac_sha512(MASTER_HMAC_KEY, seed)?;
        let (il, ir) = split_mac(&mac);
        if is_out_of_range(&il) {
            return Err(Error::InvalidChildKey);
        }
        let master = ExtendedKeyPair::from_private(&il, Some(ir), &self.gateway)?;
        let fingerprint = self.fingerprint(&master)?;
        debug!(fingerprint = %hex::encode(&fingerprint), "derived master key");
        Ok(master)
    }

    /// Raw 64-byte master HMAC output (`IL || IR`).
    pub fn master_key_material(&self, seed: &[u8]) -> Result<[u8; 64]> {
        self.gateway.hmac_sha512(MASTER_HMAC_KEY, seed)
    }

    /// CKDpriv: derive a child private key and chain code.
    pub fn ckd_priv(&self, parent: &ExtendedKeyPair, index: ChildIndex) -> Result<ExtendedKeyPair> {
        let key = parent
            .private_key_bytes()
            .ok_or(Error::MissingPrivateKey("private child derivation"))?;
        let chain_code = parent
            .chain_code()
            .ok_or(Error::MissingChainCode("private child derivation"))?;

        let mut data = Vec::with_capacity(37);
        if index.is_hardened() {
            data.push(0x00);
            data.extend_from_slice(&key);
        } else {
            data.extend_from_slice(&self.gateway.compress_public_key(parent.public_key())?);
        }
        data.extend_from_slice(&index.raw().to_be_bytes());

        let mac = self.gateway.hmac_sha512(chain_code, &data)?;
        let (il, ir) = split_mac(&mac);
        if bigint::compare(&il, &SECP256K1_ORDER) != Ordering::Less {
            return Err(Error::InvalidChildKey);
        }

        let child = bigint::modulo(&bigint::add(&il, &key), &SECP256K1_ORDER)?;
        if bigint::is_zero(&child) {
            return Err(Error::InvalidChildKey);
        }
        trace!(index = %index, "CKDpriv");
        ExtendedKeyPair::from_private(&child, Some(ir), &self.gateway)
    }

    /// CKDpub: derive a non-hardened child public key from a public parent.
    pub fn ckd_pub(&self, parent: &ExtendedKeyPair, index: ChildIndex) -> Result<ExtendedKeyPair> {
        if index.is_hardened() {
            return Err(Error::HardenedFromPublic(index.raw()));
        }
        let chain_code = parent
            .chain_code()
            .ok_or(Error::MissingChainCode("public child derivation"))?;
        let public_key = self.gateway.compress_public_key(parent.public_key())?;

        let mut data = Vec::with_capacity(37);
        data.extend_from_slice(&public_key);
        data.extend_from_slice(&index.raw().to_be_bytes());

        let mac = self.gateway.hmac_sha512(chain_code, &data)?;
        let (il, ir) = split_mac(&mac);
        let child = self.gateway.public_key_tweak_add(&public_key, &il)?;
        trace!(index = %index, "CKDpub");
        Ok(ExtendedKeyPair::public_extended(child, ir))
    }

    /// First 4 bytes of HASH160 of the compressed public key.
    pub fn fingerprint(&self, key: &ExtendedKeyPair) -> Result<[u8; 4]> {
        let compressed = self.gateway.compress_public_key(key.public_key())?;
        let id = self.gateway.hash160(&compressed);
        Ok([id[0], id[1], id[2], id[3]])
    }

    /// Derive one level below `parent`, choosing CKDpriv when the parent has
    /// a private key and CKDpub otherwise.
    pub fn derive_child(&self, parent: &ExtendedKey, index: ChildIndex) -> Result<ExtendedKey> {
        let depth = parent.depth.checked_add(1).ok_or_else(|| {
            Error::InvalidDerivationPath("depth exceeds 255".into())
        })?;
        let parent_fingerprint = self.fingerprint(&parent.key)?;
        let key = if parent.key.is_public_only() {
            self.ckd_pub(&parent.key, index)?
        } else {
            self.ckd_priv(&parent.key, index)?
        };
        debug!(
            depth,
            index = %index,
            parent_fingerprint = %hex::encode(&parent_fingerprint),
            public_only = key.is_public_only(),
            "derived child key"
        );
        Ok(ExtendedKey {
            depth,
            parent_fingerprint,
            child_number: index.raw(),
            key,
        })
    }

    /// Walk `path` from a depth-0 key.
    pub fn derive(&self, root: &ExtendedKeyPair, path: &DerivationPath) -> Result<ExtendedKey> {
        path.iter()
            .try_fold(ExtendedKey::root(root.clone()), |current, index| {
                self.derive_child(&current, *index)
            })
    }

    /// Parse `path`, walk it and serialize the result.
    ///
    /// `as_public` selects the `xpub` form; otherwise the key must hold a
    /// private key and is serialized as `xprv`.
    pub fn derive_extended_key(
        &self,
        path: &str,
        root: &ExtendedKeyPair,
        as_public: bool,
    ) -> Result<SerializedExtendedKey> {
        let path: DerivationPath = path.parse()?;
        let derived = self.derive(root, &path)?;
        let version = if as_public {
            Version::MainnetPublic
        } else {
            Version::MainnetPrivate
        };
        self.serialize(&derived, version)
    }

    /// Assemble the 82-byte record for `key` under `version`.
    pub fn serialize(&self, key: &ExtendedKey, version: Version) -> Result<SerializedExtendedKey> {
        let chain_code = key
            .key
            .chain_code()
            .ok_or(Error::MissingChainCode("extended key serialization"))?;
        let mut key_data = [0u8; 33];
        if version.is_private() {
            let private_key = key
                .key
                .private_key_bytes()
                .ok_or(Error::MissingPrivateKey("private extended key serialization"))?;
            key_data[1..].copy_from_slice(&private_key);
        } else {
            key_data = self.gateway.compress_public_key(key.key.public_key())?;
        }
        Ok(SerializedExtendedKey::assemble(
            version,
            key.depth,
            key.parent_fingerprint,
            key.child_number,
            chain_code,
            &key_data,
        ))
    }

    /// Decode an `xprv`/`xpub` string back into a derivable key.
    pub fn parse_extended_key(&self, encoded: &str) -> Result<(Version, ExtendedKey)> {
        let record: SerializedExtendedKey = encoded.parse()?;
        let version = record.version()?;
        let key_data = record.key_data();
        let key = if version.is_private() {
            if key_data[0] != 0x00 {
                return Err(Error::InvalidExtendedKey(
                    "private key data must start with 0x00".into(),
                ));
            }
            ExtendedKeyPair::from_private(&key_data[1..], Some(record.chain_code()), &self.gateway)?
        } else {
            let public_key = self.gateway.compress_public_key(&key_data)?;
            ExtendedKeyPair::public_extended(public_key, record.chain_code())
        };
        Ok((
            version,
            ExtendedKey {
                depth: record.depth(),
                parent_fingerprint: record.parent_fingerprint(),
                child_number: record.child_number(),
                key,
            },
        ))
    }
}

fn split_mac(mac: &[u8; 64]) -> ([u8; 32], [u8; 32]) {
    let mut il = [0u8; 32];
    let mut ir = [0u8; 32];
    il.copy_from_slice(&mac[..32]);
    ir.copy_from_slice(&mac[32..]);
    (il, ir)
}

fn is_out_of_range(scalar: &[u8]) -> bool {
    bigint::is_zero(scalar) || bigint::compare(scalar, &SECP256K1_ORDER) != Ordering::Less
}

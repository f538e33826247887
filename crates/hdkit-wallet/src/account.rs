//! Derived leaf identities.

#![forbid(unsafe_code)]

use std::fmt;

use hdkit_address::ethereum;
use hdkit_bip::ExtendedKeyPair;
use hdkit_core::{hex, Error, Result};
use hdkit_crypto::HashGateway;

/// One Ethereum-family account, every field `0x`-prefixed hex.
#[derive(Clone, PartialEq, Eq)]
pub struct Account {
    /// EIP-55 checksummed address
    pub address: String,
    /// Uncompressed SEC1 public key (65 bytes)
    pub public_key: String,
    /// 32-byte private scalar
    pub private_key: String,
}

impl Account {
    /// Build the account for a derived key that still holds its private key.
    pub fn from_key<G: HashGateway>(key: &ExtendedKeyPair, gateway: &G) -> Result<Self> {
        let private_key = key
            .private_key_bytes()
            .ok_or(Error::MissingPrivateKey("account derivation"))?;
        let public_key = gateway.decompress_public_key(key.public_key())?;
        let address = ethereum::checksum_encode(&ethereum::address_bytes(&public_key, gateway)?, gateway);
        Ok(Self {
            address,
            public_key: hex::encode_prefixed(&public_key),
            private_key: hex::encode_prefixed(&private_key),
        })
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("address", &self.address)
            .field("public_key", &self.public_key)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

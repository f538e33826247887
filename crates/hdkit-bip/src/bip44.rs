//! BIP44/49/84 derivation paths.
//!
//! Path structure: m / purpose' / coin_type' / account' / change / address_index

#![forbid(unsafe_code)]

use std::fmt;

use hdkit_core::Result;

use crate::path::{ChildIndex, DerivationPath};

/// BIP44 purpose (legacy P2PKH).
pub const PURPOSE_BIP44: u32 = 44;
/// BIP49 purpose (P2SH-wrapped P2WPKH).
pub const PURPOSE_BIP49: u32 = 49;
/// BIP84 purpose (native segwit P2WPKH).
pub const PURPOSE_BIP84: u32 = 84;

/// SLIP-0044 coin types.
pub mod coin {
    pub const BITCOIN: u32 = 0;
    pub const TESTNET: u32 = 1;
    pub const ETHEREUM: u32 = 60;
    pub const AVALANCHE: u32 = 9000;
    pub const WAVES: u32 = 5_741_564;
}

/// The five BIP44 levels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Bip44Path {
    pub purpose: u32,
    pub coin_type: u32,
    pub account: u32,
    pub change: u32,
    pub address_index: u32,
}

impl Bip44Path {
    pub const fn new(purpose: u32, coin_type: u32, account: u32, change: u32, address_index: u32) -> Self {
        Self {
            purpose,
            coin_type,
            account,
            change,
            address_index,
        }
    }

    /// `m/44'/60'/account'/0/index`
    pub const fn ethereum(account: u32, address_index: u32) -> Self {
        Self::new(PURPOSE_BIP44, coin::ETHEREUM, account, 0, address_index)
    }

    /// `m/44'/0'/account'/0/index`
    pub const fn bitcoin_legacy(account: u32, address_index: u32) -> Self {
        Self::new(PURPOSE_BIP44, coin::BITCOIN, account, 0, address_index)
    }

    /// `m/49'/0'/account'/0/index`
    pub const fn bitcoin_nested_segwit(account: u32, address_index: u32) -> Self {
        Self::new(PURPOSE_BIP49, coin::BITCOIN, account, 0, address_index)
    }

    /// `m/84'/0'/account'/0/index`
    pub const fn bitcoin_segwit(account: u32, address_index: u32) -> Self {
        Self::new(PURPOSE_BIP84, coin::BITCOIN, account, 0, address_index)
    }

    /// `m/44'/9000'/account'/0/index`
    pub const fn avalanche(account: u32, address_index: u32) -> Self {
        Self::new(PURPOSE_BIP44, coin::AVALANCHE, account, 0, address_index)
    }

    /// Fails if any level is 2^31 or larger.
    pub fn to_derivation_path(&self) -> Result<DerivationPath> {
        Ok(DerivationPath::from(vec![
            ChildIndex::hardened(self.purpose)?,
            ChildIndex::hardened(self.coin_type)?,
            ChildIndex::hardened(self.account)?,
            ChildIndex::normal(self.change)?,
            ChildIndex::normal(self.address_index)?,
        ]))
    }
}

impl fmt::Display for Bip44Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "m/{}'/{}'/{}'/{}/{}",
            self.purpose, self.coin_type, self.account, self.change, self.address_index
        )
    }
}

//! Multi-chain HD wallet: mnemonic phrases to accounts, extended keys,
//! chain addresses and EIP-712 sign hashes.
//!
//! [`Wallet`] ties the component crates together; each remains usable on
//! its own through the re-exports below.

#![forbid(unsafe_code)]

pub mod account;
pub mod wallet;

pub use account::Account;
pub use wallet::Wallet;

pub use hdkit_address::{ChainSpec, NativeKeyPair, PRESET_NAMES};
pub use hdkit_bip::{DerivationPath, Entropy, ExtendedKeyPair, SerializedExtendedKey, Version};
pub use hdkit_core::{Error, ErrorKind, Result};
pub use hdkit_crypto::{DefaultGateway, HashGateway};
pub use hdkit_eip712::TypedData;

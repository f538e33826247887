//! BIP39/BIP32/BIP44 implementation.
//!
//! Mnemonic phrases become seeds ([`bip39`]), seeds become master keys and
//! child keys ([`bip32`]) along parsed paths ([`path`], [`bip44`]), and
//! derived keys serialize to `xprv`/`xpub` records ([`xkey`]).

#![forbid(unsafe_code)]

pub mod bip32;
pub mod bip39;
pub mod bip44;
pub mod path;
pub mod xkey;

pub use bip32::{Bip32Engine, ExtendedKeyPair};
pub use bip39::Entropy;
pub use path::{ChildIndex, DerivationPath};
pub use xkey::{ExtendedKey, SerializedExtendedKey, Version};

//! Wallet facade over the derivation, encoding and hashing crates.
//!
//! Phrase-taking methods derive with an empty BIP39 passphrase unless the
//! method takes one explicitly.

#![forbid(unsafe_code)]

use hdkit_address::{bech32, ethereum, native, ChainSpec, NativeKeyPair};
use hdkit_bip::{
    bip39, Bip32Engine, ChildIndex, DerivationPath, Entropy, ExtendedKey, ExtendedKeyPair,
    SerializedExtendedKey, Version,
};
use hdkit_core::Result;
use hdkit_crypto::{DefaultGateway, HashGateway};
use hdkit_eip712::TypedData;
use rand::{CryptoRng, RngCore};
use tracing::debug;

use crate::account::Account;

/// Entry point for every public wallet operation.
#[derive(Clone, Debug, Default)]
pub struct Wallet<G = DefaultGateway> {
    engine: Bip32Engine<G>,
}

impl<G: HashGateway> Wallet<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            engine: Bip32Engine::new(gateway),
        }
    }

    pub fn engine(&self) -> &Bip32Engine<G> {
        &self.engine
    }

    pub fn gateway(&self) -> &G {
        self.engine.gateway()
    }

    pub fn mnemonic_to_seed(&self, phrase: &str, passphrase: &str) -> [u8; 64] {
        bip39::mnemonic_to_seed(phrase, passphrase)
    }

    pub fn random_mnemonic(&self, entropy: Entropy) -> String {
        bip39::random_mnemonic(entropy)
    }

    pub fn random_mnemonic_with_rng<R: RngCore + CryptoRng>(
        &self,
        rng: &mut R,
        entropy: Entropy,
    ) -> String {
        bip39::random_mnemonic_with_rng(rng, entropy)
    }

    pub fn validate_mnemonic(&self, phrase: &str) -> bool {
        bip39::validate_mnemonic(phrase)
    }

    pub fn derive_master_key(&self, seed: &[u8]) -> Result<ExtendedKeyPair> {
        self.engine.master_key(seed)
    }

    /// Master key of a phrase, without checking the phrase checksum.
    pub fn master_key_from_phrase(&self, phrase: &str, passphrase: &str) -> Result<ExtendedKeyPair> {
        self.derive_master_key(&self.mnemonic_to_seed(phrase, passphrase))
    }

    /// 64-byte `HMAC-SHA512("Bitcoin seed", seed)` of a phrase.
    pub fn root_key_material(&self, phrase: &str, passphrase: &str) -> Result<[u8; 64]> {
        self.engine
            .master_key_material(&self.mnemonic_to_seed(phrase, passphrase))
    }

    /// Depth-0 extended key of a binary seed under `version`.
    pub fn root_key(&self, seed: &[u8], version: Version) -> Result<SerializedExtendedKey> {
        let master = self.derive_master_key(seed)?;
        self.engine.serialize(&ExtendedKey::root(master), version)
    }

    pub fn derive_extended_key(
        &self,
        path: &str,
        key: &ExtendedKeyPair,
        as_public: bool,
    ) -> Result<SerializedExtendedKey> {
        self.engine.derive_extended_key(path, key, as_public)
    }

    /// Derive along `path` and render the leaf public key for `chain`.
    pub fn derive_address(
        &self,
        path: &str,
        key: &ExtendedKeyPair,
        chain: &ChainSpec,
    ) -> Result<String> {
        let path: DerivationPath = path.parse()?;
        let leaf = self.engine.derive(key, &path)?;
        let address = chain.address(leaf.key.public_key(), self.gateway())?;
        debug!(%path, %chain, "derived address");
        Ok(address)
    }

    /// Extended private key string at `path` of a phrase.
    pub fn xprv(&self, phrase: &str, path: &str) -> Result<String> {
        let master = self.master_key_from_phrase(phrase, "")?;
        Ok(self.derive_extended_key(path, &master, false)?.to_base58())
    }

    /// Extended public key string at `path` of a phrase.
    pub fn xpub(&self, phrase: &str, path: &str) -> Result<String> {
        let master = self.master_key_from_phrase(phrase, "")?;
        Ok(self.derive_extended_key(path, &master, true)?.to_base58())
    }

    /// Ethereum address of the non-hardened child `index` of an `xprv` or
    /// `xpub` string.
    pub fn address_from_xprv(&self, extended_key: &str, index: u32) -> Result<String> {
        let (_, parent) = self.engine.parse_extended_key(extended_key)?;
        let child = self.engine.derive_child(&parent, ChildIndex::normal(index)?)?;
        self.ethereum_address(child.key.public_key())
    }

    /// Account at `path` of a phrase. The phrase checksum is verified first.
    pub fn account(&self, phrase: &str, path: &str) -> Result<Account> {
        bip39::mnemonic_to_entropy(phrase)?;
        let master = self.master_key_from_phrase(phrase, "")?;
        let path: DerivationPath = path.parse()?;
        let leaf = self.engine.derive(&master, &path)?;
        Account::from_key(&leaf.key, self.gateway())
    }

    /// EIP-55 Ethereum address at `path` of a phrase.
    pub fn web3_address(&self, phrase: &str, path: &str) -> Result<String> {
        let master = self.master_key_from_phrase(phrase, "")?;
        self.derive_address(path, &master, &ChainSpec::Ethereum)
    }

    pub fn ethereum_address(&self, public_key: &[u8]) -> Result<String> {
        let raw = ethereum::address_bytes(public_key, self.gateway())?;
        Ok(ethereum::checksum_encode(&raw, self.gateway()))
    }

    /// Bech32 address of `hash160(compressed public key)` for a private key.
    pub fn avax_address(&self, private_key: &[u8], hrp: &str) -> Result<String> {
        let public_key = self.gateway().public_key(private_key, true)?;
        bech32::hash160_address(&public_key, hrp, self.gateway())
    }

    /// Bech32 address of an already computed 20-byte `hash160`.
    pub fn avax_address_from_hash(&self, hash160: &[u8; 20], hrp: &str) -> Result<String> {
        bech32::encode(hrp, hash160)
    }

    pub fn native_key_pair(&self, phrase: &str) -> NativeKeyPair {
        native::key_pair(phrase, self.gateway())
    }

    pub fn native_address(&self, phrase: &str, chain_id: u8) -> String {
        self.native_key_pair(phrase).address(chain_id, self.gateway())
    }

    pub fn verify_address(&self, address: &str, chain_id: u8) -> Result<()> {
        native::verify_address(address, chain_id, self.gateway())
    }

    /// EIP-712 sign hash of a JSON payload.
    pub fn encode_typed_data(&self, json: &str) -> Result<[u8; 32]> {
        TypedData::from_json(json)?.sign_hash(self.gateway())
    }
}

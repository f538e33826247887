//! BIP39 mnemonic implementation.
//!
//! Entropy → Mnemonic (with SHA-256 checksum)
//! Mnemonic → Seed (PBKDF2 with NFKD normalization)
//!
//! The English word list comes from the `bip39` crate.

#![forbid(unsafe_code)]

use hdkit_core::{Error, Result};
use hdkit_crypto::{pbkdf2, sha256};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use unicode_normalization::UnicodeNormalization;

/// PBKDF2 iteration count for seed derivation.
pub const SEED_ITERATIONS: u32 = 2048;

const BITS_PER_WORD: usize = 11;

/// Entropy sizes, named by bit count.
///
/// `E128` through `E256` are the BIP39 standard sizes. The shorter ones
/// produce 3, 6 and 9 word phrases.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Entropy {
    E32,
    E64,
    E96,
    /// 12 words, 4-bit checksum
    E128,
    /// 15 words, 5-bit checksum
    E160,
    /// 18 words, 6-bit checksum
    E192,
    /// 21 words, 7-bit checksum
    E224,
    /// 24 words, 8-bit checksum
    E256,
}

impl Entropy {
    pub const ALL: [Entropy; 8] = [
        Self::E32,
        Self::E64,
        Self::E96,
        Self::E128,
        Self::E160,
        Self::E192,
        Self::E224,
        Self::E256,
    ];

    /// Get entropy size in bits.
    pub const fn entropy_bits(&self) -> usize {
        match self {
            Self::E32 => 32,
            Self::E64 => 64,
            Self::E96 => 96,
            Self::E128 => 128,
            Self::E160 => 160,
            Self::E192 => 192,
            Self::E224 => 224,
            Self::E256 => 256,
        }
    }

    /// Get entropy size in bytes.
    pub const fn entropy_bytes(&self) -> usize {
        self.entropy_bits() / 8
    }

    /// Get checksum size in bits (ENT / 32).
    pub const fn checksum_bits(&self) -> usize {
        self.entropy_bits() / 32
    }

    /// Get word count.
    pub const fn word_count(&self) -> usize {
        self.checksum_bits() * 3
    }

    pub fn from_bytes_len(len: usize) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.entropy_bytes() == len)
    }

    pub fn from_word_count(words: usize) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.word_count() == words)
    }

    /// Whether this size is one of the five BIP39 standard sizes.
    pub const fn is_standard(&self) -> bool {
        self.entropy_bits() >= 128
    }
}

fn word_list() -> &'static [&'static str; 2048] {
    ::bip39::Language::English.word_list()
}

/// Generate mnemonic from entropy bytes.
///
/// The entropy length determines the word count (4 bytes per 3 words).
pub fn entropy_to_mnemonic(entropy: &[u8]) -> Result<String> {
    let kind = Entropy::from_bytes_len(entropy.len())
        .ok_or(Error::InvalidEntropyLength { got: entropy.len() })?;
    Ok(encode_words(entropy, kind))
}

fn encode_words(entropy: &[u8], kind: Entropy) -> String {
    let hash = sha256::digest(entropy);

    // Build bit stream: entropy || checksum
    let mut bits = Vec::with_capacity(kind.word_count() * BITS_PER_WORD);
    for &byte in entropy {
        for i in (0..8).rev() {
            bits.push((byte >> i) & 1);
        }
    }
    bits.extend(checksum_bits(&hash, kind.checksum_bits()));

    let words = word_list();
    bits.chunks_exact(BITS_PER_WORD)
        .map(|chunk| {
            let index = chunk
                .iter()
                .fold(0usize, |acc, &bit| (acc << 1) | bit as usize);
            words[index]
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn checksum_bits(hash: &[u8; 32], count: usize) -> impl Iterator<Item = u8> + '_ {
    (0..count).map(move |i| (hash[i / 8] >> (7 - (i % 8))) & 1)
}

/// Recover the entropy bytes of a phrase, verifying word membership,
/// word count and checksum.
pub fn mnemonic_to_entropy(mnemonic: &str) -> Result<Vec<u8>> {
    let normalized: String = mnemonic.nfkd().collect();
    let words: Vec<&str> = normalized.split_whitespace().collect();

    let kind = Entropy::from_word_count(words.len()).ok_or_else(|| {
        Error::InvalidMnemonic(format!("unsupported word count {}", words.len()))
    })?;

    let list = word_list();
    let mut bits = Vec::with_capacity(words.len() * BITS_PER_WORD);
    for word in &words {
        let index = list
            .iter()
            .position(|w| w == word)
            .ok_or_else(|| Error::InvalidWord((*word).to_string()))?;
        for i in (0..BITS_PER_WORD).rev() {
            bits.push(((index >> i) & 1) as u8);
        }
    }

    let (entropy_bits, actual_checksum) = bits.split_at(kind.entropy_bits());
    let entropy: Vec<u8> = entropy_bits
        .chunks_exact(8)
        .map(|byte| byte.iter().fold(0u8, |acc, &bit| (acc << 1) | bit))
        .collect();

    let hash = sha256::digest(&entropy);
    if !checksum_bits(&hash, kind.checksum_bits()).eq(actual_checksum.iter().copied()) {
        return Err(Error::InvalidMnemonicChecksum);
    }
    Ok(entropy)
}

/// Validate mnemonic checksum.
pub fn validate_mnemonic(mnemonic: &str) -> bool {
    mnemonic_to_entropy(mnemonic).is_ok()
}

/// Convert mnemonic to seed using PBKDF2-HMAC-SHA512.
///
/// Both mnemonic and passphrase are NFKD normalized as BIP39 requires.
/// Salt = "mnemonic" + passphrase
/// Iterations = 2048
/// Output = 64 bytes
pub fn mnemonic_to_seed(mnemonic: &str, passphrase: &str) -> [u8; 64] {
    let mnemonic_normalized: String = mnemonic.nfkd().collect();
    let passphrase_normalized: String = passphrase.nfkd().collect();

    let salt = format!("mnemonic{}", passphrase_normalized);

    let mut seed = [0u8; 64];
    pbkdf2::derive(
        mnemonic_normalized.as_bytes(),
        salt.as_bytes(),
        SEED_ITERATIONS,
        &mut seed,
    );

    seed
}

/// Random phrase from the operating system CSPRNG.
pub fn random_mnemonic(entropy: Entropy) -> String {
    random_mnemonic_with_rng(&mut OsRng, entropy)
}

/// Random phrase from a caller-supplied CSPRNG.
pub fn random_mnemonic_with_rng<R: RngCore + CryptoRng>(rng: &mut R, entropy: Entropy) -> String {
    let mut bytes = vec![0u8; entropy.entropy_bytes()];
    rng.fill_bytes(&mut bytes);
    encode_words(&bytes, entropy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::rand_core::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn to_hex(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{:02x}", b)).collect()
    }

    #[test]
    fn test_entropy_to_mnemonic_12_words() {
        // Test vector from BIP39
        let entropy = hex::decode("00000000000000000000000000000000").unwrap();
        let mnemonic = entropy_to_mnemonic(&entropy).unwrap();
        assert_eq!(
            mnemonic,
            "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about"
        );
    }

    #[test]
    fn test_entropy_to_mnemonic_24_words() {
        // BIP39 test vector, 0x7f repeated
        let entropy =
            hex::decode("7f7f7f7f7f7f7f7f7f7f7f7f7f7f7f7f7f7f7f7f7f7f7f7f7f7f7f7f7f7f7f7f")
                .unwrap();
        let mnemonic = entropy_to_mnemonic(&entropy).unwrap();
        assert_eq!(
            mnemonic,
            "legal winner thank year wave sausage worth useful legal winner thank year \
             wave sausage worth useful legal winner thank year wave sausage worth title"
        );
    }

    #[test]
    fn test_entropy_lengths() {
        for kind in Entropy::ALL {
            let entropy = vec![0xa5u8; kind.entropy_bytes()];
            let mnemonic = entropy_to_mnemonic(&entropy).unwrap();
            assert_eq!(mnemonic.split(' ').count(), kind.word_count());
            assert_eq!(mnemonic_to_entropy(&mnemonic).unwrap(), entropy);
        }
        assert_eq!(Entropy::E32.word_count(), 3);
        assert_eq!(Entropy::E256.word_count(), 24);
    }

    #[test]
    fn test_invalid_entropy_length() {
        assert_eq!(
            entropy_to_mnemonic(&[0u8; 17]),
            Err(Error::InvalidEntropyLength { got: 17 })
        );
        assert_eq!(
            entropy_to_mnemonic(&[]),
            Err(Error::InvalidEntropyLength { got: 0 })
        );
    }

    #[test]
    fn test_mnemonic_to_entropy() {
        let entropy = mnemonic_to_entropy(
            "letter advice cage absurd amount doctor acoustic avoid letter advice cage above",
        )
        .unwrap();
        assert_eq!(to_hex(&entropy), "80808080808080808080808080808080");
    }

    #[test]
    fn test_mnemonic_to_seed_no_passphrase() {
        // BIP39 test vector
        let mnemonic = "abandon abandon abandon abandon abandon abandon \
                        abandon abandon abandon abandon abandon about";
        let seed = mnemonic_to_seed(mnemonic, "");
        assert_eq!(
            to_hex(&seed),
            "5eb00bbddcf069084889a8ab9155568165f5c453ccb85e70811aaed6f6da5fc1\
             9a5ac40b389cd370d086206dec8aa6c43daea6690f20ad3d8d48b2d2ce9e38e4"
        );
    }

    #[test]
    fn test_mnemonic_to_seed_with_passphrase() {
        // BIP39 test vector with "TREZOR" passphrase
        let mnemonic = "abandon abandon abandon abandon abandon abandon \
                        abandon abandon abandon abandon abandon about";
        let seed = mnemonic_to_seed(mnemonic, "TREZOR");
        assert_eq!(
            to_hex(&seed),
            "c55257c360c07c72029aebc1b53c05ed0362ada38ead3e3e9efa3708e5349553\
             1f09a6987599d18264c1e1c92f2cf141630c7a3c4ab7c81b2f001698e7463b04"
        );
    }

    #[test]
    fn test_mnemonic_to_seed_reference_phrase() {
        let seed = mnemonic_to_seed(
            "denial adult elevator below success birth sheriff front acid chef debate start",
            "",
        );
        assert!(to_hex(&seed).starts_with("25319dba"));
        assert!(to_hex(&seed).ends_with("e932c8"));
    }

    #[test]
    fn test_validate_mnemonic_valid() {
        let mnemonic = "abandon abandon abandon abandon abandon abandon \
                        abandon abandon abandon abandon abandon about";
        assert!(validate_mnemonic(mnemonic));
    }

    #[test]
    fn test_validate_mnemonic_invalid_checksum() {
        // Changed last word from "about" to "abandon"
        let mnemonic = "abandon abandon abandon abandon abandon abandon \
                        abandon abandon abandon abandon abandon abandon";
        assert!(!validate_mnemonic(mnemonic));
        assert_eq!(
            mnemonic_to_entropy(mnemonic),
            Err(Error::InvalidMnemonicChecksum)
        );
    }

    #[test]
    fn test_validate_mnemonic_invalid_word() {
        let mnemonic = "abandon abandon abandon abandon abandon abandon \
                        abandon abandon abandon abandon abandon notaword";
        assert!(!validate_mnemonic(mnemonic));
        assert_eq!(
            mnemonic_to_entropy(mnemonic),
            Err(Error::InvalidWord("notaword".into()))
        );
    }

    #[test]
    fn test_validate_mnemonic_wrong_count() {
        assert!(!validate_mnemonic("abandon abandon"));
        assert!(matches!(
            mnemonic_to_entropy("abandon abandon abandon abandon"),
            Err(Error::InvalidMnemonic(_))
        ));
    }

    #[test]
    fn test_roundtrip() {
        let entropy = hex::decode("7f7f7f7f7f7f7f7f7f7f7f7f7f7f7f7f").unwrap();
        let mnemonic = entropy_to_mnemonic(&entropy).unwrap();
        assert!(validate_mnemonic(&mnemonic));
    }

    #[test]
    fn test_random_mnemonic_deterministic_rng() {
        let a = random_mnemonic_with_rng(&mut ChaCha20Rng::seed_from_u64(7), Entropy::E128);
        let b = random_mnemonic_with_rng(&mut ChaCha20Rng::seed_from_u64(7), Entropy::E128);
        assert_eq!(a, b);
        assert_eq!(a.split(' ').count(), 12);
        assert!(validate_mnemonic(&a));
    }

    #[test]
    fn test_random_mnemonic_os_rng() {
        let phrase = random_mnemonic(Entropy::E256);
        assert_eq!(phrase.split(' ').count(), 24);
        assert!(validate_mnemonic(&phrase));
        assert_ne!(phrase, random_mnemonic(Entropy::E256));
    }

    #[test]
    fn test_matches_bip39_crate() {
        let entropy = [0x42u8; 20];
        let ours = entropy_to_mnemonic(&entropy).unwrap();
        let theirs = ::bip39::Mnemonic::from_entropy(&entropy).unwrap().to_string();
        assert_eq!(ours, theirs);
    }
}

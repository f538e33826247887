use thiserror::Error;

/// Broad failure category of an [`Error`].
///
/// Every error is local and recoverable; the kind tells the caller which
/// input (or which precondition) has to be corrected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Unparseable path, hex, mnemonic, key, address or JSON document.
    MalformedInput,
    /// Big-integer subtraction below zero, or division by zero.
    ArithmeticUnderflow,
    /// A private key or chain code needed by the derivation mode is missing.
    PreconditionViolation,
    /// Base58Check, legacy-address or mnemonic checksum did not verify.
    ChecksumMismatch,
    /// EIP-712 array types and unknown ABI type strings.
    UnsupportedEncoding,
    /// BIP32 boundary case: `IL >= n` or the derived key is zero.
    KeyOutOfRange,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("invalid entropy length {got}: expected a multiple of 4 between 4 and 32 bytes")]
    InvalidEntropyLength { got: usize },

    #[error("invalid mnemonic: {0}")]
    InvalidMnemonic(String),

    #[error("invalid word in mnemonic: {0}")]
    InvalidWord(String),

    #[error("invalid derivation path: {0}")]
    InvalidDerivationPath(String),

    #[error("invalid hex string: {0}")]
    InvalidHex(String),

    #[error("invalid key: {0}")]
    InvalidKey(String),

    #[error("invalid extended key: {0}")]
    InvalidExtendedKey(String),

    #[error("invalid base58 string: {0}")]
    InvalidBase58(String),

    #[error("invalid bech32 string: {0}")]
    InvalidBech32(String),

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("invalid typed data: {0}")]
    InvalidTypedData(String),

    #[error("arithmetic underflow: minuend is smaller than subtrahend")]
    ArithmeticUnderflow,

    #[error("division by zero")]
    DivisionByZero,

    #[error("private key required for {0}")]
    MissingPrivateKey(&'static str),

    #[error("chain code required for {0}")]
    MissingChainCode(&'static str),

    #[error("cannot derive hardened child {0:#010x} from a public key")]
    HardenedFromPublic(u32),

    #[error("checksum mismatch")]
    ChecksumMismatch,

    #[error("invalid mnemonic checksum")]
    InvalidMnemonicChecksum,

    #[error("chain id mismatch: expected {expected:#04x}, found {found:#04x}")]
    ChainIdMismatch { expected: u8, found: u8 },

    #[error("unsupported type: {0}")]
    UnsupportedType(String),

    #[error("invalid child key (IL >= n or derived key is zero)")]
    InvalidChildKey,
}

impl Error {
    /// Category of this error.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidEntropyLength { .. }
            | Self::InvalidMnemonic(_)
            | Self::InvalidWord(_)
            | Self::InvalidDerivationPath(_)
            | Self::InvalidHex(_)
            | Self::InvalidKey(_)
            | Self::InvalidExtendedKey(_)
            | Self::InvalidBase58(_)
            | Self::InvalidBech32(_)
            | Self::InvalidAddress(_)
            | Self::InvalidTypedData(_) => ErrorKind::MalformedInput,
            Self::ArithmeticUnderflow | Self::DivisionByZero => ErrorKind::ArithmeticUnderflow,
            Self::MissingPrivateKey(_) | Self::MissingChainCode(_) | Self::HardenedFromPublic(_) => {
                ErrorKind::PreconditionViolation
            }
            Self::ChecksumMismatch
            | Self::InvalidMnemonicChecksum
            | Self::ChainIdMismatch { .. } => ErrorKind::ChecksumMismatch,
            Self::UnsupportedType(_) => ErrorKind::UnsupportedEncoding,
            Self::InvalidChildKey => ErrorKind::KeyOutOfRange,
        }
    }
}

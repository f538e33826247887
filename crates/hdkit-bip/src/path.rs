//! Derivation paths of the form `m/44'/60'/0'/0/0`.

#![forbid(unsafe_code)]

use std::fmt;
use std::str::FromStr;

use hdkit_core::{Error, Result};

/// Offset added to an index to mark it hardened (2^31).
pub const HARDENED_OFFSET: u32 = 0x8000_0000;

/// One path segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChildIndex {
    value: u32,
    hardened: bool,
}

impl ChildIndex {
    /// Non-hardened index. `value` must be below 2^31.
    pub fn normal(value: u32) -> Result<Self> {
        Self::new(value, false)
    }

    /// Hardened index `value'`. `value` must be below 2^31.
    pub fn hardened(value: u32) -> Result<Self> {
        Self::new(value, true)
    }

    fn new(value: u32, hardened: bool) -> Result<Self> {
        if value >= HARDENED_OFFSET {
            return Err(Error::InvalidDerivationPath(format!(
                "index {value} must be below 2^31"
            )));
        }
        Ok(Self { value, hardened })
    }

    /// Split a raw 32-bit child number as it appears on the wire.
    pub const fn from_raw(raw: u32) -> Self {
        Self {
            value: raw & !HARDENED_OFFSET,
            hardened: raw & HARDENED_OFFSET != 0,
        }
    }

    /// Declared value, without the hardened offset.
    pub const fn value(&self) -> u32 {
        self.value
    }

    pub const fn is_hardened(&self) -> bool {
        self.hardened
    }

    /// Child number used in the HMAC input and the serialized record.
    pub const fn raw(&self) -> u32 {
        if self.hardened {
            self.value | HARDENED_OFFSET
        } else {
            self.value
        }
    }
}

impl fmt::Display for ChildIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hardened {
            write!(f, "{}'", self.value)
        } else {
            write!(f, "{}", self.value)
        }
    }
}

impl FromStr for ChildIndex {
    type Err = Error;

    fn from_str(segment: &str) -> Result<Self> {
        let (digits, hardened) = match segment.strip_suffix('\'') {
            Some(digits) => (digits, true),
            None => (segment, false),
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidDerivationPath(format!(
                "segment {segment:?} is not a decimal index"
            )));
        }
        let value: u32 = digits.parse().map_err(|_| {
            Error::InvalidDerivationPath(format!("segment {segment:?} overflows 32 bits"))
        })?;
        Self::new(value, hardened)
    }
}

/// Ordered list of child indices below the master key.
///
/// The textual form is `m` followed by at least one `/<digits>[']` segment.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct DerivationPath(Vec<ChildIndex>);

impl DerivationPath {
    pub fn iter(&self) -> impl Iterator<Item = &ChildIndex> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[ChildIndex] {
        &self.0
    }

    /// Return a new path with `index` appended.
    pub fn child(&self, index: ChildIndex) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        Self(indices)
    }
}

impl From<Vec<ChildIndex>> for DerivationPath {
    fn from(indices: Vec<ChildIndex>) -> Self {
        Self(indices)
    }
}

impl FromIterator<ChildIndex> for DerivationPath {
    fn from_iter<I: IntoIterator<Item = ChildIndex>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl FromStr for DerivationPath {
    type Err = Error;

    fn from_str(path: &str) -> Result<Self> {
        let segments = path.strip_prefix("m/").ok_or_else(|| {
            Error::InvalidDerivationPath(format!("{path:?} must start with \"m/\""))
        })?;
        segments
            .split('/')
            .map(ChildIndex::from_str)
            .collect::<Result<Vec<_>>>()
            .map(Self)
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("m")?;
        for index in &self.0 {
            write!(f, "/{index}")?;
        }
        Ok(())
    }
}

//! Fixed-width ABI encoding of EIP-712 atomic and dynamic member values.
//!
//! Every value encodes to one 32-byte word. `string` and `bytes` are
//! replaced by their Keccak-256 hash; integers are big-endian, negative
//! `intN` values in 256-bit two's complement; `bytesN` is right-padded.

#![forbid(unsafe_code)]

use std::fmt;

use hdkit_core::{hex, Error, Result};
use hdkit_crypto::{bigint, HashGateway};
use serde_json::Value;

/// One ABI word.
pub type Word = [u8; 32];

/// Member types that encode to a single word.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AbiType {
    Address,
    Bool,
    String,
    Bytes,
    /// `bytesN`, 1 <= N <= 32
    FixedBytes(usize),
    /// `uintN`, N a multiple of 8 in [8, 256]
    Uint(usize),
    /// `intN`, N a multiple of 8 in [8, 256]
    Int(usize),
}

impl AbiType {
    /// Parse a Solidity type name. Arrays and unknown names are rejected.
    pub fn parse(name: &str) -> Result<Self> {
        let unsupported = || Error::UnsupportedType(name.to_string());
        if name.ends_with(']') {
            return Err(unsupported());
        }
        match name {
            "address" => return Ok(Self::Address),
            "bool" => return Ok(Self::Bool),
            "string" => return Ok(Self::String),
            "bytes" => return Ok(Self::Bytes),
            _ => {}
        }
        if let Some(bits) = name.strip_prefix("uint") {
            return int_width(bits).map(Self::Uint).ok_or_else(unsupported);
        }
        if let Some(bits) = name.strip_prefix("int") {
            return int_width(bits).map(Self::Int).ok_or_else(unsupported);
        }
        if let Some(len) = name.strip_prefix("bytes") {
            return decimal(len)
                .filter(|n| (1..=32).contains(n))
                .map(Self::FixedBytes)
                .ok_or_else(unsupported);
        }
        Err(unsupported())
    }

    /// Encode a JSON value as one ABI word.
    pub fn encode<G: HashGateway>(&self, value: &Value, gateway: &G) -> Result<Word> {
        match *self {
            Self::String => {
                let s = expect_str(value, self)?;
                Ok(gateway.keccak256(s.as_bytes()))
            }
            Self::Bytes => {
                let s = expect_str(value, self)?;
                Ok(gateway.keccak256(&hex::decode(s)?))
            }
            Self::Bool => {
                let flag = match value {
                    Value::Bool(b) => *b,
                    Value::String(s) if s == "true" => true,
                    Value::String(s) if s == "false" => false,
                    _ => return Err(mismatch(value, self)),
                };
                Ok(left_pad(&[u8::from(flag)]))
            }
            Self::Address => {
                let s = expect_str(value, self)?;
                let digits = s
                    .strip_prefix("0x")
                    .or_else(|| s.strip_prefix("0X"))
                    .unwrap_or(s);
                if digits.len() != 40 {
                    return Err(Error::InvalidHex(format!(
                        "address {s:?} must be 40 hex digits, got {}",
                        digits.len()
                    )));
                }
                let raw = hex::decode_array::<20>(digits)?;
                Ok(left_pad(&raw))
            }
            Self::FixedBytes(len) => {
                let s = expect_str(value, self)?;
                let raw = if s.starts_with("0x") || s.starts_with("0X") {
                    hex::decode(s)?
                } else {
                    s.as_bytes().to_vec()
                };
                if raw.len() > len {
                    return Err(Error::InvalidTypedData(format!(
                        "{} bytes do not fit {self}",
                        raw.len()
                    )));
                }
                let mut word = [0u8; 32];
                word[..raw.len()].copy_from_slice(&raw);
                Ok(word)
            }
            Self::Uint(bits) => {
                let (negative, magnitude) = parse_integer(value, self)?;
                if negative && !bigint::is_zero(&magnitude) {
                    return Err(Error::InvalidTypedData(format!(
                        "negative value for {self}"
                    )));
                }
                check_width(&magnitude, bits, self)?;
                Ok(left_pad(&magnitude))
            }
            Self::Int(bits) => {
                let (negative, magnitude) = parse_integer(value, self)?;
                if !negative || bigint::is_zero(&magnitude) {
                    check_width(&magnitude, bits - 1, self)?;
                    return Ok(left_pad(&magnitude));
                }
                // -m fits intN iff m - 1 < 2^(N-1)
                check_width(&bigint::subtract(&magnitude, &[1])?, bits - 1, self)?;
                twos_complement(&magnitude)
            }
        }
    }
}

impl fmt::Display for AbiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Address => f.write_str("address"),
            Self::Bool => f.write_str("bool"),
            Self::String => f.write_str("string"),
            Self::Bytes => f.write_str("bytes"),
            Self::FixedBytes(n) => write!(f, "bytes{n}"),
            Self::Uint(n) => write!(f, "uint{n}"),
            Self::Int(n) => write!(f, "int{n}"),
        }
    }
}

fn decimal(digits: &str) -> Option<usize> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

fn int_width(digits: &str) -> Option<usize> {
    decimal(digits).filter(|n| (8..=256).contains(n) && n % 8 == 0)
}

fn expect_str<'v>(value: &'v Value, kind: &AbiType) -> Result<&'v str> {
    value.as_str().ok_or_else(|| mismatch(value, kind))
}

fn mismatch(value: &Value, kind: &AbiType) -> Error {
    Error::InvalidTypedData(format!("{value} is not a valid {kind}"))
}

/// Sign and big-endian magnitude of a JSON number or a decimal/`0x` string.
fn parse_integer(value: &Value, kind: &AbiType) -> Result<(bool, Vec<u8>)> {
    match value {
        Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                Ok((false, bigint::normalize(&u.to_be_bytes())))
            } else if let Some(i) = n.as_i64() {
                Ok((true, bigint::normalize(&i.unsigned_abs().to_be_bytes())))
            } else {
                Err(Error::InvalidTypedData(format!(
                    "{n} is not an integer; pass large values as strings"
                )))
            }
        }
        Value::String(s) => {
            let (negative, digits) = match s.strip_prefix('-') {
                Some(rest) => (true, rest),
                None => (false, s.as_str()),
            };
            let magnitude = if let Some(hex_digits) = digits
                .strip_prefix("0x")
                .or_else(|| digits.strip_prefix("0X"))
            {
                if hex_digits.is_empty() {
                    return Err(mismatch(value, kind));
                }
                bigint::normalize(&hex::decode(hex_digits)?)
            } else {
                parse_decimal(digits).ok_or_else(|| mismatch(value, kind))?
            };
            Ok((negative, magnitude))
        }
        _ => Err(mismatch(value, kind)),
    }
}

fn parse_decimal(digits: &str) -> Option<Vec<u8>> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(digits.bytes().fold(vec![0u8], |acc, digit| {
        bigint::add(&bigint::multiply(&acc, &[10]), &[digit - b'0'])
    }))
}

fn bit_length(value: &[u8]) -> usize {
    let value = bigint::normalize(value);
    match value.first() {
        Some(&first) if first != 0 => (value.len() - 1) * 8 + (8 - first.leading_zeros() as usize),
        _ => 0,
    }
}

fn check_width(magnitude: &[u8], bits: usize, kind: &AbiType) -> Result<()> {
    if bit_length(magnitude) > bits {
        return Err(Error::InvalidTypedData(format!("value out of range for {kind}")));
    }
    Ok(())
}

fn left_pad(bytes: &[u8]) -> Word {
    let mut word = [0u8; 32];
    let bytes = &bytes[bytes.len().saturating_sub(32)..];
    word[32 - bytes.len()..].copy_from_slice(bytes);
    word
}

/// 2^256 - magnitude, for 0 < magnitude <= 2^255.
fn twos_complement(magnitude: &[u8]) -> Result<Word> {
    let mut modulus = vec![0u8; 33];
    modulus[0] = 1;
    let wrapped = bigint::subtract(&modulus, magnitude)?;
    Ok(left_pad(&wrapped))
}

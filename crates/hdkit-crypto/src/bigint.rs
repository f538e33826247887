//! Unsigned big-integer arithmetic over big-endian byte strings.
//!
//! Operands are most-significant byte first, unsigned and of any width; a
//! shorter operand behaves as if it were left-padded with zero bytes.
//! Every result is normalized: leading zero bytes are stripped and zero is
//! the single byte `[0x00]`.
//!
//! Only key-derivation and checksum arithmetic runs through here (operands of
//! at most a few dozen bytes), so multiplication is repeated addition and
//! division is restoring base-256 long division.

#![forbid(unsafe_code)]

use std::cmp::Ordering;
use std::iter;

use hdkit_core::{Error, Result};

/// secp256k1 group order n, big-endian.
pub const SECP256K1_ORDER: [u8; 32] = [
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xfe,
    0xba, 0xae, 0xdc, 0xe6, 0xaf, 0x48, 0xa0, 0x3b, 0xbf, 0xd2, 0x5e, 0x8c, 0xd0, 0x36, 0x41, 0x41,
];

/// Strip leading zero bytes, keeping `[0x00]` for zero.
pub fn normalize(bytes: &[u8]) -> Vec<u8> {
    let digits = significant(bytes);
    if digits.is_empty() {
        vec![0]
    } else {
        digits.to_vec()
    }
}

/// True if every byte is zero (the empty string counts as zero).
pub fn is_zero(bytes: &[u8]) -> bool {
    bytes.iter().all(|&b| b == 0)
}

/// Numeric comparison, independent of leading zero bytes.
pub fn compare(a: &[u8], b: &[u8]) -> Ordering {
    let a = significant(a);
    let b = significant(b);
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Left-pad a value to exactly `N` bytes.
///
/// Returns `None` if the value does not fit.
pub fn to_fixed<const N: usize>(bytes: &[u8]) -> Option<[u8; N]> {
    let digits = significant(bytes);
    if digits.len() > N {
        return None;
    }
    let mut out = [0u8; N];
    out[N - digits.len()..].copy_from_slice(digits);
    Some(out)
}

/// a + b, carrying from the least-significant byte.
///
/// The result is at most one byte longer than the longer operand.
pub fn add(a: &[u8], b: &[u8]) -> Vec<u8> {
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };

    let mut out = Vec::with_capacity(long.len() + 1);
    let mut carry = 0u16;
    let padded = short.iter().rev().chain(iter::repeat(&0u8));
    for (&x, &y) in long.iter().rev().zip(padded) {
        let sum = x as u16 + y as u16 + carry;
        out.push(sum as u8);
        carry = sum >> 8;
    }
    if carry != 0 {
        out.push(carry as u8);
    }
    out.reverse();

    normalize(&out)
}

/// a - b with borrow.
///
/// Fails with [`Error::ArithmeticUnderflow`] when `a < b`; there is no
/// wraparound.
pub fn subtract(a: &[u8], b: &[u8]) -> Result<Vec<u8>> {
    if compare(a, b) == Ordering::Less {
        return Err(Error::ArithmeticUnderflow);
    }
    let a = significant(a);
    let b = significant(b);

    let mut out = Vec::with_capacity(a.len());
    let mut borrow = 0i16;
    let padded = b.iter().rev().chain(iter::repeat(&0u8));
    for (&x, &y) in a.iter().rev().zip(padded) {
        let mut diff = x as i16 - y as i16 - borrow;
        if diff < 0 {
            diff += 256;
            borrow = 1;
        } else {
            borrow = 0;
        }
        out.push(diff as u8);
    }
    out.reverse();

    Ok(normalize(&out))
}

/// a * b as schoolbook multiplication.
///
/// Each byte of `b` contributes `a` shifted by that byte's weight, added
/// once per unit of the byte's value.
pub fn multiply(a: &[u8], b: &[u8]) -> Vec<u8> {
    let mut result = vec![0u8];
    for (weight, &digit) in b.iter().rev().enumerate() {
        if digit == 0 {
            continue;
        }
        let mut shifted = a.to_vec();
        shifted.extend(iter::repeat(0u8).take(weight));
        for _ in 0..digit {
            result = add(&result, &shifted);
        }
    }
    result
}

/// Integer quotient a / b.
///
/// Returns `None` when `a < b` (quotient zero) or `b` is zero.
pub fn divide(a: &[u8], b: &[u8]) -> Option<Vec<u8>> {
    if is_zero(b) || compare(a, b) == Ordering::Less {
        return None;
    }
    long_division(a, b).ok().map(|(quotient, _)| quotient)
}

/// Remainder a mod b; `[0x00]` when `b` divides `a` exactly.
pub fn modulo(a: &[u8], b: &[u8]) -> Result<Vec<u8>> {
    long_division(a, b).map(|(_, remainder)| remainder)
}

/// Restoring base-256 long division.
///
/// The remainder window is widened by one dividend byte at a time; the
/// number of divisor subtractions that fit is that position's quotient digit.
fn long_division(a: &[u8], b: &[u8]) -> Result<(Vec<u8>, Vec<u8>)> {
    if is_zero(b) {
        return Err(Error::DivisionByZero);
    }

    let dividend = significant(a);
    let mut quotient = Vec::with_capacity(dividend.len());
    let mut remainder = vec![0u8];

    for &byte in dividend {
        remainder.push(byte);
        remainder = normalize(&remainder);

        // remainder < b * 256 here, so the digit fits in a byte
        let mut digit = 0u8;
        while compare(&remainder, b) != Ordering::Less {
            remainder = subtract(&remainder, b)?;
            digit += 1;
        }
        quotient.push(digit);
    }

    Ok((normalize(&quotient), remainder))
}

fn significant(bytes: &[u8]) -> &[u8] {
    let start = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
    &bytes[start..]
}

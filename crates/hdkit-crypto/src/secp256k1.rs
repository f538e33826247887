//! secp256k1 point operations needed by BIP32 and the address encoders.
//!
//! Private keys are big-endian scalars of at most 32 significant bytes;
//! shorter inputs are left-padded. Public keys are SEC1 encoded, either
//! compressed (33 bytes, `02`/`03` prefix) or uncompressed (65 bytes, `04`).

#![forbid(unsafe_code)]

use hdkit_core::{Error, Result};
use k256::elliptic_curve::ff::PrimeField;
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::{AffinePoint, FieldBytes, ProjectivePoint, PublicKey, Scalar, SecretKey};

use crate::bigint;

/// Length of a compressed SEC1 public key.
pub const COMPRESSED_LEN: usize = 33;
/// Length of an uncompressed SEC1 public key.
pub const UNCOMPRESSED_LEN: usize = 65;

/// Derive the public key for `private_key`.
///
/// Fails with `InvalidKey` if the scalar is zero or not below the curve order.
pub fn public_key(private_key: &[u8], compressed: bool) -> Result<Vec<u8>> {
    let secret = secret_key(private_key)?;
    Ok(secret
        .public_key()
        .to_encoded_point(compressed)
        .as_bytes()
        .to_vec())
}

/// Re-encode any valid SEC1 public key in compressed form.
pub fn compress(public_key: &[u8]) -> Result<[u8; COMPRESSED_LEN]> {
    let point = parse_public_key(public_key)?;
    encode_fixed(&point, true)
}

/// Re-encode any valid SEC1 public key in uncompressed form.
pub fn decompress(public_key: &[u8]) -> Result<[u8; UNCOMPRESSED_LEN]> {
    let point = parse_public_key(public_key)?;
    encode_fixed(&point, false)
}

/// Compute `tweak·G + P` and return it compressed.
///
/// A tweak at or above the curve order, or a sum at infinity, yields
/// `InvalidChildKey`. Both are the BIP32 "invalid child" cases.
pub fn tweak_add(public_key: &[u8], tweak: &[u8; 32]) -> Result<[u8; COMPRESSED_LEN]> {
    let parent = parse_public_key(public_key)?;
    let scalar: Option<Scalar> = Scalar::from_repr(FieldBytes::from(*tweak)).into();
    let scalar = scalar.ok_or(Error::InvalidChildKey)?;

    let sum = ProjectivePoint::GENERATOR * scalar + parent.to_projective();
    let child = PublicKey::from_affine(AffinePoint::from(sum)).map_err(|_| Error::InvalidChildKey)?;
    encode_fixed(&child, true)
}

fn secret_key(private_key: &[u8]) -> Result<SecretKey> {
    let bytes = bigint::to_fixed::<32>(private_key).ok_or_else(|| {
        Error::InvalidKey(format!(
            "private key has more than 32 significant bytes ({} given)",
            private_key.len()
        ))
    })?;
    SecretKey::from_slice(&bytes)
        .map_err(|_| Error::InvalidKey("private key is zero or not below the curve order".into()))
}

fn parse_public_key(public_key: &[u8]) -> Result<PublicKey> {
    match (public_key.first(), public_key.len()) {
        (Some(0x02 | 0x03), COMPRESSED_LEN) | (Some(0x04), UNCOMPRESSED_LEN) => {}
        (tag, len) => {
            return Err(Error::InvalidKey(format!(
                "expected a 33-byte 02/03 or 65-byte 04 SEC1 key, got {len} bytes with tag {:#04x}",
                tag.copied().unwrap_or_default()
            )))
        }
    }
    PublicKey::from_sec1_bytes(public_key).map_err(|_| {
        Error::InvalidKey(format!(
            "{}-byte input is not a SEC1 encoded secp256k1 point",
            public_key.len()
        ))
    })
}

fn encode_fixed<const N: usize>(point: &PublicKey, compressed: bool) -> Result<[u8; N]> {
    let encoded = point.to_encoded_point(compressed);
    encoded
        .as_bytes()
        .try_into()
        .map_err(|_| Error::InvalidKey(format!("unexpected SEC1 length {}", encoded.len())))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_hex(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{:02x}", b)).collect()
    }

    const G_COMPRESSED: &str = "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";
    const G_UNCOMPRESSED: &str = "0479be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798\
                                  483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8";

    #[test]
    fn test_generator() {
        let pk = public_key(&[1], true).unwrap();
        assert_eq!(to_hex(&pk), G_COMPRESSED);

        let pk = public_key(&[1], false).unwrap();
        assert_eq!(to_hex(&pk), G_UNCOMPRESSED);
    }

    #[test]
    fn test_left_padding() {
        let mut padded = [0u8; 32];
        padded[31] = 1;
        assert_eq!(
            public_key(&[1], true).unwrap(),
            public_key(&padded, true).unwrap()
        );
        // Leading zeros beyond 32 bytes are not significant
        let mut long = vec![0u8; 33];
        long[32] = 1;
        assert_eq!(public_key(&long, true).unwrap().len(), COMPRESSED_LEN);
    }

    #[test]
    fn test_rejects_zero_and_order() {
        assert!(matches!(public_key(&[0u8; 32], true), Err(Error::InvalidKey(_))));
        assert!(matches!(
            public_key(&bigint::SECP256K1_ORDER, true),
            Err(Error::InvalidKey(_))
        ));
        assert!(matches!(public_key(&[0xffu8; 33], true), Err(Error::InvalidKey(_))));
    }

    #[test]
    fn test_compress_decompress() {
        let full = hex::decode(G_UNCOMPRESSED).unwrap();
        let short = compress(&full).unwrap();
        assert_eq!(to_hex(&short), G_COMPRESSED);
        assert_eq!(decompress(&short).unwrap().to_vec(), full);
        // Compressing an already compressed key is the identity
        assert_eq!(compress(&short).unwrap(), short);
    }

    #[test]
    fn test_rejects_off_curve() {
        let mut bad = hex::decode(G_COMPRESSED).unwrap();
        bad[0] = 0x05;
        assert!(matches!(compress(&bad), Err(Error::InvalidKey(_))));
        assert!(matches!(decompress(&bad), Err(Error::InvalidKey(_))));
        assert!(decompress(&[0x02; 10]).is_err());
        assert!(compress(&[]).is_err());

        // Right tag, wrong length
        let full = hex::decode(G_UNCOMPRESSED).unwrap();
        let mut mixed = full.clone();
        mixed[0] = 0x02;
        assert!(compress(&mixed).is_err());
        assert!(compress(&full[..COMPRESSED_LEN]).is_err());

        // x = 5 has no square root of x^3 + 7 on secp256k1
        let mut off_curve = [0u8; COMPRESSED_LEN];
        off_curve[0] = 0x02;
        off_curve[32] = 0x05;
        assert!(compress(&off_curve).is_err());
    }

    #[test]
    fn test_tweak_add_matches_private_addition() {
        // (1·G) + 2·G == 3·G
        let g = public_key(&[1], true).unwrap();
        let mut tweak = [0u8; 32];
        tweak[31] = 2;
        let sum = tweak_add(&g, &tweak).unwrap();
        assert_eq!(sum.to_vec(), public_key(&[3], true).unwrap());
    }

    #[test]
    fn test_tweak_add_invalid() {
        let g = public_key(&[1], true).unwrap();
        assert_eq!(
            tweak_add(&g, &bigint::SECP256K1_ORDER),
            Err(Error::InvalidChildKey)
        );

        // P = (n-1)·G, tweak 1 sums to the point at infinity
        let mut n_minus_one = bigint::SECP256K1_ORDER;
        n_minus_one[31] -= 1;
        let p = public_key(&n_minus_one, true).unwrap();
        let mut one = [0u8; 32];
        one[31] = 1;
        assert_eq!(tweak_add(&p, &one), Err(Error::InvalidChildKey));
    }
}

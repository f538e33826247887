//! Ethereum addresses: last 20 bytes of Keccak-256 over the uncompressed
//! public key without its `04` prefix.
//!
//! [`address`] renders lower-case hex; [`to_checksum_address`] applies the
//! EIP-55 mixed-case checksum.

#![forbid(unsafe_code)]

use hdkit_core::{hex, Error, Result};
use hdkit_crypto::HashGateway;

/// Raw 20-byte address of a public key in either SEC1 form.
pub fn address_bytes<G: HashGateway>(public_key: &[u8], gateway: &G) -> Result<[u8; 20]> {
    let uncompressed = gateway.decompress_public_key(public_key)?;
    let hash = gateway.keccak256(&uncompressed[1..]);
    let mut out = [0u8; 20];
    out.copy_from_slice(&hash[12..]);
    Ok(out)
}

/// `0x`-prefixed lower-case address.
pub fn address<G: HashGateway>(public_key: &[u8], gateway: &G) -> Result<String> {
    Ok(hex::encode_prefixed(&address_bytes(public_key, gateway)?))
}

/// `0x`-prefixed lower-case address of a private key.
pub fn address_from_private_key<G: HashGateway>(private_key: &[u8], gateway: &G) -> Result<String> {
    let public_key = gateway.public_key(private_key, false)?;
    address(&public_key, gateway)
}

/// EIP-55 rendering of raw address bytes.
pub fn checksum_encode<G: HashGateway>(address: &[u8; 20], gateway: &G) -> String {
    let lower = hex::encode(address);
    let hash = gateway.keccak256(lower.as_bytes());
    let mixed: String = lower
        .chars()
        .enumerate()
        .map(|(i, c)| {
            let nibble = (hash[i / 2] >> if i % 2 == 0 { 4 } else { 0 }) & 0x0f;
            if nibble >= 8 {
                c.to_ascii_uppercase()
            } else {
                c
            }
        })
        .collect();
    format!("0x{mixed}")
}

/// EIP-55 rendering of a hex address in any case, with or without `0x`.
pub fn to_checksum_address<G: HashGateway>(address: &str, gateway: &G) -> Result<String> {
    let digits = address
        .strip_prefix("0x")
        .or_else(|| address.strip_prefix("0X"))
        .unwrap_or(address);
    if digits.len() != 40 {
        return Err(Error::InvalidAddress(format!(
            "expected 40 hex digits, got {}",
            digits.len()
        )));
    }
    let bytes = hex::decode_array::<20>(digits)?;
    Ok(checksum_encode(&bytes, gateway))
}

/// True if `address` is all one case or matches its EIP-55 checksum.
pub fn is_valid_checksum<G: HashGateway>(address: &str, gateway: &G) -> bool {
    let Some(digits) = address.strip_prefix("0x") else {
        return false;
    };
    let has_upper = digits.bytes().any(|b| b.is_ascii_uppercase());
    let has_lower = digits.bytes().any(|b| b.is_ascii_lowercase());
    match to_checksum_address(address, gateway) {
        Ok(expected) => !(has_upper && has_lower) || expected == address,
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hdkit_crypto::DefaultGateway;

    #[test]
    fn test_address_of_private_key_one() {
        let addr = address_from_private_key(&[1], &DefaultGateway).unwrap();
        assert_eq!(addr, "0x7e5f4552091a69125d5dfcb7b8c2659029395bdf");
    }

    #[test]
    fn test_compressed_and_uncompressed_agree() {
        let compressed = DefaultGateway.public_key(&[7], true).unwrap();
        let uncompressed = DefaultGateway.public_key(&[7], false).unwrap();
        assert_eq!(
            address(&compressed, &DefaultGateway).unwrap(),
            address(&uncompressed, &DefaultGateway).unwrap()
        );
    }

    #[test]
    fn test_eip55_vectors() {
        // From EIP-55
        for expected in [
            "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed",
            "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359",
            "0xdbF03B407c01E7cD3CBea99509d93f8DDDC8C6FB",
            "0xD1220A0cf47c7B9Be7A2E6BA89F429762e7b9aDb",
        ] {
            let lower = expected.to_lowercase();
            assert_eq!(to_checksum_address(&lower, &DefaultGateway).unwrap(), expected);
            assert!(is_valid_checksum(expected, &DefaultGateway));
        }
    }

    #[test]
    fn test_bad_checksum_detected() {
        assert!(!is_valid_checksum(
            "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAeD",
            &DefaultGateway
        ));
        // Single-case addresses carry no checksum
        assert!(is_valid_checksum(
            "0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed",
            &DefaultGateway
        ));
    }

    #[test]
    fn test_rejects_malformed() {
        assert!(to_checksum_address("0x1234", &DefaultGateway).is_err());
        assert!(to_checksum_address(
            "0xzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzz",
            &DefaultGateway
        )
        .is_err());
    }
}

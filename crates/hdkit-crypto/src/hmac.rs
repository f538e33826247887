//! HMAC-SHA512 (RFC 2104).

#![forbid(unsafe_code)]

use hdkit_core::{Error, Result};
use hmac::{Hmac, Mac};
use sha2::Sha512;

type HmacSha512 = Hmac<Sha512>;

/// Compute HMAC-SHA512.
///
/// HMAC accepts keys of any length, so the error path is only reachable
/// through a broken MAC backend.
pub fn hmac_sha512(key: &[u8], data: &[u8]) -> Result<[u8; 64]> {
    let mut mac = HmacSha512::new_from_slice(key)
        .map_err(|e| Error::InvalidKey(format!("HMAC-SHA512 key rejected: {e}")))?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_hex(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{:02x}", b)).collect()
    }

    #[test]
    fn test_rfc4231_case1() {
        // RFC 4231 Test Case 1
        let key = [0x0bu8; 20];
        let result = hmac_sha512(&key, b"Hi There").unwrap();
        assert_eq!(
            to_hex(&result),
            "87aa7cdea5ef619d4ff0b4241a1d6cb02379f4e2ce4ec2787ad0b30545e17cde\
             daa833b7d6b8a702038b274eaea3f4e4be9d914eeb61f1702e696c203a126854"
        );
    }

    #[test]
    fn test_rfc4231_case2() {
        // RFC 4231 Test Case 2 ("Jefe" / "what do ya want for nothing?")
        let result = hmac_sha512(b"Jefe", b"what do ya want for nothing?").unwrap();
        assert_eq!(
            to_hex(&result),
            "164b7a7bfcf819e2e395fbe73b56e0a387bd64222e831fd610270cd7ea250554\
             9758bf75c05a994a6d034f65f8f0e6fdcaeab1a34d4a6b4b636e070a38bce737"
        );
    }

    #[test]
    fn test_rfc4231_case6() {
        // RFC 4231 Test Case 6 (key larger than block size: 131 bytes of 0xaa)
        let key = [0xaau8; 131];
        let data = b"Test Using Larger Than Block-Size Key - Hash Key First";
        let result = hmac_sha512(&key, data).unwrap();
        assert_eq!(
            to_hex(&result),
            "80b24263c7c1a3ebb71493c1dd7be8b49b46d1f41b4aeec1121b013783f8f352\
             6b56d037e05f2598bd0fd2215d6a1e5295e64f73f63f0aec8b915a985d786598"
        );
    }

    #[test]
    fn test_bitcoin_seed_key() {
        // BIP32 test vector 1 master key material
        let seed = hex::decode("000102030405060708090a0b0c0d0e0f").unwrap();
        let result = hmac_sha512(b"Bitcoin seed", &seed).unwrap();
        assert_eq!(
            to_hex(&result[..32]),
            "e8f32e723decf4051aefac8e2c93c9c5b214313817cdb01a1494b917c8436b35"
        );
        assert_eq!(
            to_hex(&result[32..]),
            "873dff81c02f525623fd1fe5167eac3a55a049de3d314bb42ee227ffed37d508"
        );
    }
}

//! `encodeType`, `hashStruct` and the final `0x1901` sign hash.

#![forbid(unsafe_code)]

use std::collections::BTreeSet;

use hdkit_core::{Error, Result};
use hdkit_crypto::HashGateway;
use serde_json::Value;
use tracing::debug;

use crate::abi::{AbiType, Word};
use crate::typed_data::{Member, TypedData, DOMAIN_TYPE};

/// Prefix of the signed preimage.
pub const SIGN_PREFIX: [u8; 2] = [0x19, 0x01];

impl TypedData {
    /// Struct types reachable from `primary`, including `primary` itself.
    ///
    /// Array members contribute their element type. Self-referential and
    /// mutually recursive declarations are visited once.
    pub fn find_dependencies(&self, primary: &str) -> BTreeSet<String> {
        let mut found = BTreeSet::new();
        let mut pending = vec![primary.to_string()];
        while let Some(name) = pending.pop() {
            let Some(members) = self.types.get(&name) else {
                continue;
            };
            if !found.insert(name) {
                continue;
            }
            for member in members {
                let base = element_type(&member.kind);
                if self.is_struct(base) && !found.contains(base) {
                    pending.push(base.to_string());
                }
            }
        }
        found
    }

    /// `Primary(type name,...)` followed by its dependencies in name order.
    pub fn encode_type(&self, primary: &str) -> Result<String> {
        let mut encoded = declaration(primary, self.members(primary)?);
        for dep in self.find_dependencies(primary) {
            if dep != primary {
                encoded.push_str(&declaration(&dep, self.members(&dep)?));
            }
        }
        Ok(encoded)
    }

    pub fn type_hash<G: HashGateway>(&self, primary: &str, gateway: &G) -> Result<Word> {
        Ok(gateway.keccak256(self.encode_type(primary)?.as_bytes()))
    }

    /// `typeHash || enc(member_1) || ... || enc(member_n)`.
    pub fn encode_data<G: HashGateway>(
        &self,
        type_name: &str,
        value: &Value,
        gateway: &G,
    ) -> Result<Vec<u8>> {
        let members = self.members(type_name)?;
        let object = value.as_object().ok_or_else(|| {
            Error::InvalidTypedData(format!("{type_name} value must be an object, got {value}"))
        })?;

        let mut encoded = Vec::with_capacity(32 * (members.len() + 1));
        encoded.extend_from_slice(&self.type_hash(type_name, gateway)?);
        for member in members {
            let field = object
                .get(&member.name)
                .filter(|v| !v.is_null())
                .ok_or_else(|| {
                    Error::InvalidTypedData(format!("{type_name}.{} is missing", member.name))
                })?;
            let word = if self.is_struct(&member.kind) {
                self.hash_struct(&member.kind, field, gateway)?
            } else {
                AbiType::parse(&member.kind)?.encode(field, gateway)?
            };
            encoded.extend_from_slice(&word);
        }
        Ok(encoded)
    }

    pub fn hash_struct<G: HashGateway>(
        &self,
        type_name: &str,
        value: &Value,
        gateway: &G,
    ) -> Result<Word> {
        Ok(gateway.keccak256(&self.encode_data(type_name, value, gateway)?))
    }

    pub fn domain_separator<G: HashGateway>(&self, gateway: &G) -> Result<Word> {
        self.hash_struct(DOMAIN_TYPE, &self.domain, gateway)
    }

    /// `keccak256(0x19 0x01 || domainSeparator || hashStruct(message))`.
    pub fn sign_hash<G: HashGateway>(&self, gateway: &G) -> Result<Word> {
        let domain = self.domain_separator(gateway)?;
        let message = self.hash_struct(&self.primary_type, &self.message, gateway)?;
        debug!(
            primary_type = %self.primary_type,
            domain_separator = %hdkit_core::hex::encode(&domain),
            message_hash = %hdkit_core::hex::encode(&message),
            "hashed typed data"
        );

        let mut preimage = Vec::with_capacity(66);
        preimage.extend_from_slice(&SIGN_PREFIX);
        preimage.extend_from_slice(&domain);
        preimage.extend_from_slice(&message);
        Ok(gateway.keccak256(&preimage))
    }
}

fn element_type(kind: &str) -> &str {
    kind.find('[').map_or(kind, |i| &kind[..i])
}

fn declaration(name: &str, members: &[Member]) -> String {
    let fields: Vec<String> = members
        .iter()
        .map(|m| format!("{} {}", m.kind, m.name))
        .collect();
    format!("{name}({})", fields.join(","))
}

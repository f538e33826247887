//! JSON model of an `eth_signTypedData` payload.

#![forbid(unsafe_code)]

use std::collections::BTreeMap;
use std::str::FromStr;

use hdkit_core::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Name of the domain struct every payload declares.
pub const DOMAIN_TYPE: &str = "EIP712Domain";

/// One `{ "name": ..., "type": ... }` entry of a struct declaration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl Member {
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypedData {
    /// Struct declarations, member order preserved.
    pub types: BTreeMap<String, Vec<Member>>,
    pub primary_type: String,
    pub domain: Value,
    pub message: Value,
}

impl TypedData {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::InvalidTypedData(e.to_string()))
    }

    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| Error::InvalidTypedData(e.to_string()))
    }

    /// Members of a declared struct.
    pub fn members(&self, type_name: &str) -> Result<&[Member]> {
        self.types
            .get(type_name)
            .map(Vec::as_slice)
            .ok_or_else(|| Error::InvalidTypedData(format!("type {type_name} is not declared")))
    }

    pub fn is_struct(&self, type_name: &str) -> bool {
        self.types.contains_key(type_name)
    }
}

impl FromStr for TypedData {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_json(s)
    }
}

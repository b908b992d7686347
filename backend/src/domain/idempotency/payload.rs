//! Payload canonicalisation and hashing.

use std::fmt;

use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

/// Failure while hashing a payload.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("failed to serialise canonical JSON payload: {message}")]
pub struct PayloadHashError {
    pub message: String,
}

/// SHA-256 hash of a canonicalised request payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PayloadHash([u8; 32]);

impl PayloadHash {
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Lowercase hexadecimal encoding.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for PayloadHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Canonicalise a JSON value and compute its SHA-256 hash.
///
/// Object keys are sorted recursively and the value is written as compact
/// JSON, so key order and whitespace never change the hash. Array order does.
///
/// # Example
///
/// ```
/// # use place_directory::domain::canonicalize_and_hash;
/// # use serde_json::json;
/// let a = canonicalize_and_hash(&json!({"b": 2, "a": 1})).expect("hash a");
/// let b = canonicalize_and_hash(&json!({"a": 1, "b": 2})).expect("hash b");
/// assert_eq!(a, b);
/// ```
pub fn canonicalize_and_hash(value: &Value) -> Result<PayloadHash, PayloadHashError> {
    let bytes = serde_json::to_vec(&canonicalize(value)).map_err(|err| PayloadHashError {
        message: err.to_string(),
    })?;
    Ok(PayloadHash(Sha256::digest(&bytes).into()))
}

fn canonicalize(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<_> = map.iter().collect();
            entries.sort_by_key(|(key, _)| key.as_str());
            Value::Object(
                entries
                    .into_iter()
                    .map(|(key, inner)| (key.clone(), canonicalize(inner)))
                    .collect::<Map<String, Value>>(),
            )
        }
        Value::Array(items) => Value::Array(items.iter().map(canonicalize).collect()),
        other => other.clone(),
    }
}

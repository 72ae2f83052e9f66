//! State codec.
//!
//! Text fields travel as UTF-8 bytes and are reported by the storage layer as
//! standard base64. Integer arguments are fixed-width 8-byte big-endian.
//! Global-state keys are the base64 of the field name, so lookups encode the
//! requested name before searching.

use crate::constants::{MAX_APP_ARGS, MAX_APP_ARGS_TOTAL_BYTES, MAX_KEY_VALUE_BYTES};
use crate::error::CodecError;
use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Encodes UTF-8 text as base64.
pub fn encode_text(value: &str) -> String {
    general_purpose::STANDARD.encode(value.as_bytes())
}

/// Decodes base64 to raw bytes.
pub fn decode_bytes(value: &str) -> Result<Vec<u8>, CodecError> {
    general_purpose::STANDARD
        .decode(value)
        .map_err(|e| CodecError::InvalidBase64(e.to_string()))
}

/// Decodes base64 to UTF-8 text.
pub fn decode_text(value: &str) -> Result<String, CodecError> {
    String::from_utf8(decode_bytes(value)?).map_err(|_| CodecError::InvalidUtf8)
}

/// Encodes an integer as 8 big-endian bytes.
pub fn encode_uint64(value: u64) -> [u8; 8] {
    value.to_be_bytes()
}

/// Decodes 8 big-endian bytes.
pub fn decode_uint64(bytes: &[u8]) -> Result<u64, CodecError> {
    let array: [u8; 8] = bytes
        .try_into()
        .map_err(|_| CodecError::InvalidUintLength(bytes.len()))?;
    Ok(u64::from_be_bytes(array))
}

/// Fails if `field` with a value of `value_len` bytes would not fit in one
/// global-state entry.
pub fn check_field_size(field: &str, value_len: usize) -> Result<(), CodecError> {
    let len = field.len() + value_len;
    if len > MAX_KEY_VALUE_BYTES {
        return Err(CodecError::FieldTooLarge {
            field: field.to_string(),
            len,
            max: MAX_KEY_VALUE_BYTES,
        });
    }
    Ok(())
}

/// Fails if the argument list exceeds the ledger's count or size limits.
pub fn check_app_args(args: &[Vec<u8>]) -> Result<(), CodecError> {
    if args.len() > MAX_APP_ARGS {
        return Err(CodecError::TooManyArgs {
            count: args.len(),
            max: MAX_APP_ARGS,
        });
    }
    let len: usize = args.iter().map(Vec::len).sum();
    if len > MAX_APP_ARGS_TOTAL_BYTES {
        return Err(CodecError::ArgsTooLarge {
            len,
            max: MAX_APP_ARGS_TOTAL_BYTES,
        });
    }
    Ok(())
}

/// A stored global-state value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StateValue {
    /// Byte string, base64 as reported by the storage layer.
    Bytes(String),
    /// Unsigned integer.
    Uint(u64),
}

impl StateValue {
    /// A byte value holding `text`.
    pub fn text(text: &str) -> Self {
        Self::Bytes(encode_text(text))
    }

    fn type_name(&self) -> &'static str {
        match self {
            Self::Bytes(_) => "bytes",
            Self::Uint(_) => "uint",
        }
    }
}

/// Decoded global state of one application, keyed by base64 field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalState {
    entries: BTreeMap<String, StateValue>,
}

impl GlobalState {
    /// Creates an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a value under an already base64-encoded key.
    pub fn insert_raw(&mut self, encoded_key: impl Into<String>, value: StateValue) {
        self.entries.insert(encoded_key.into(), value);
    }

    /// Inserts a value under a plain field name.
    pub fn insert(&mut self, field: &str, value: StateValue) {
        self.entries.insert(encode_text(field), value);
    }

    /// Looks up a field by plain name.
    pub fn get(&self, field: &str) -> Option<&StateValue> {
        self.entries.get(&encode_text(field))
    }

    /// Reads a text field; absent fields read as the empty string.
    pub fn text(&self, field: &str) -> Result<String, CodecError> {
        match self.get(field) {
            None => Ok(String::new()),
            Some(StateValue::Bytes(encoded)) => {
                decode_text(encoded).map_err(|e| CodecError::Malformed {
                    field: field.to_string(),
                    reason: e.to_string(),
                })
            }
            Some(other) => Err(CodecError::TypeMismatch {
                field: field.to_string(),
                expected: "bytes",
                found: other.type_name(),
            }),
        }
    }

    /// Reads an integer field; absent fields read as zero.
    pub fn uint(&self, field: &str) -> Result<u64, CodecError> {
        match self.get(field) {
            None => Ok(0),
            Some(StateValue::Uint(value)) => Ok(*value),
            Some(other) => Err(CodecError::TypeMismatch {
                field: field.to_string(),
                expected: "uint",
                found: other.type_name(),
            }),
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the state holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries by base64 key.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &StateValue)> {
        self.entries.iter()
    }
}

impl FromIterator<(String, StateValue)> for GlobalState {
    fn from_iter<I: IntoIterator<Item = (String, StateValue)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

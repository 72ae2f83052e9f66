//! Ledger account addresses.
//!
//! An address is an ed25519 public key. Its text form is base58 over the key
//! followed by a 4-byte checksum, the last four bytes of SHA-512/256(key).

use crate::error::CoreError;
use crate::hash::sha512_256;
use crate::io::{BinaryWriter, IoResult, MemoryReader, Serializable};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Public key length in bytes.
pub const PUBLIC_KEY_SIZE: usize = 32;

const CHECKSUM_SIZE: usize = 4;

/// Account address.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address([u8; PUBLIC_KEY_SIZE]);

impl Address {
    /// The all-zero address.
    pub const fn zero() -> Self {
        Self([0u8; PUBLIC_KEY_SIZE])
    }

    /// Wraps a public key.
    pub const fn from_public_key(key: [u8; PUBLIC_KEY_SIZE]) -> Self {
        Self(key)
    }

    /// The underlying public key.
    pub fn public_key(&self) -> &[u8; PUBLIC_KEY_SIZE] {
        &self.0
    }

    fn checksum(key: &[u8; PUBLIC_KEY_SIZE]) -> [u8; CHECKSUM_SIZE] {
        let digest = sha512_256(key);
        let mut out = [0u8; CHECKSUM_SIZE];
        out.copy_from_slice(&digest[digest.len() - CHECKSUM_SIZE..]);
        out
    }

    /// Encodes the address as text.
    pub fn to_text(&self) -> String {
        let mut payload = Vec::with_capacity(PUBLIC_KEY_SIZE + CHECKSUM_SIZE);
        payload.extend_from_slice(&self.0);
        payload.extend_from_slice(&Self::checksum(&self.0));
        bs58::encode(payload).into_string()
    }
}

impl FromStr for Address {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let payload = bs58::decode(s.trim())
            .into_vec()
            .map_err(|e| CoreError::InvalidAddress(format!("{s}: {e}")))?;
        if payload.len() != PUBLIC_KEY_SIZE + CHECKSUM_SIZE {
            return Err(CoreError::InvalidAddress(format!(
                "{s}: expected {} bytes, got {}",
                PUBLIC_KEY_SIZE + CHECKSUM_SIZE,
                payload.len()
            )));
        }
        let mut key = [0u8; PUBLIC_KEY_SIZE];
        key.copy_from_slice(&payload[..PUBLIC_KEY_SIZE]);
        if payload[PUBLIC_KEY_SIZE..] != Self::checksum(&key) {
            return Err(CoreError::InvalidAddress(format!("{s}: checksum mismatch")));
        }
        Ok(Self(key))
    }
}

impl TryFrom<String> for Address {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Address> for String {
    fn from(value: Address) -> Self {
        value.to_text()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_text())
    }
}

impl Serializable for Address {
    fn serialize(&self, writer: &mut BinaryWriter) {
        writer.write_bytes(&self.0);
    }

    fn deserialize(reader: &mut MemoryReader) -> IoResult<Self> {
        reader.read_array().map(Self)
    }
}

//! Numeric ledger identifiers.

use crate::io::{BinaryWriter, IoResult, MemoryReader, Serializable};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Handle of an on-ledger application, assigned by the ledger at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppId(pub u64);

impl AppId {
    /// Raw value.
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl From<u64> for AppId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AppId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

impl Serializable for AppId {
    fn serialize(&self, writer: &mut BinaryWriter) {
        writer.write_u64(self.0);
    }

    fn deserialize(reader: &mut MemoryReader) -> IoResult<Self> {
        reader.read_u64().map(Self)
    }
}

/// Ledger round (block height).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Round(pub u64);

impl Round {
    /// Raw value.
    pub const fn value(self) -> u64 {
        self.0
    }

    /// The round `n` rounds after this one.
    pub const fn saturating_add(self, n: u64) -> Self {
        Self(self.0.saturating_add(n))
    }
}

impl From<u64> for Round {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serializable for Round {
    fn serialize(&self, writer: &mut BinaryWriter) {
        writer.write_u64(self.0);
    }

    fn deserialize(reader: &mut MemoryReader) -> IoResult<Self> {
        reader.read_u64().map(Self)
    }
}

//! Error types for core operations.

use thiserror::Error;

/// Errors raised while encoding or decoding stored fields and arguments.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Text was not valid base64.
    #[error("invalid base64: {0}")]
    InvalidBase64(String),

    /// Decoded bytes were not valid UTF-8.
    #[error("decoded bytes are not valid UTF-8")]
    InvalidUtf8,

    /// An integer argument did not have the fixed 8-byte width.
    #[error("expected 8 bytes for a uint64, got {0}")]
    InvalidUintLength(usize),

    /// A stored field held a value of the other storage type.
    #[error("field {field} holds {found}, expected {expected}")]
    TypeMismatch {
        /// Field name.
        field: String,
        /// Storage type the caller asked for.
        expected: &'static str,
        /// Storage type actually present.
        found: &'static str,
    },

    /// A stored field could not be decoded.
    #[error("field {field} is malformed: {reason}")]
    Malformed {
        /// Field name.
        field: String,
        /// Decoder message.
        reason: String,
    },

    /// The storage layer reported a value type this client does not know.
    #[error("field {field} has unknown storage type {tag}")]
    UnknownType {
        /// Field name, base64 as received.
        field: String,
        /// Storage type tag.
        tag: u8,
    },

    /// A key/value pair exceeds the ledger's per-entry size limit.
    #[error("field {field} needs {len} bytes with its key, limit is {max}")]
    FieldTooLarge {
        /// Field name.
        field: String,
        /// Key plus value length.
        len: usize,
        /// Ledger limit.
        max: usize,
    },

    /// The combined application arguments exceed the ledger's limit.
    #[error("application arguments total {len} bytes, limit is {max}")]
    ArgsTooLarge {
        /// Combined length.
        len: usize,
        /// Ledger limit.
        max: usize,
    },

    /// Too many application arguments.
    #[error("{count} application arguments, limit is {max}")]
    TooManyArgs {
        /// Argument count.
        count: usize,
        /// Ledger limit.
        max: usize,
    },
}

/// Errors for core model types.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Address text could not be parsed.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// A listing field failed validation.
    #[error("invalid listing: {0}")]
    InvalidListing(String),

    /// Amount text could not be parsed.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// An amount computation overflowed.
    #[error("amount overflow: {price} x {count}")]
    AmountOverflow {
        /// Unit price.
        price: u64,
        /// Unit count.
        count: u64,
    },

    /// Codec failure.
    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// Result type for core operations.
pub type CoreResult<T> = std::result::Result<T, CoreError>;

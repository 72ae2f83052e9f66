use bookmarket_core::io::IoError;
use thiserror::Error;

/// Errors raised while grouping, encoding or verifying transactions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransactionError {
    /// A group needs at least one member.
    #[error("transaction group is empty")]
    EmptyGroup,

    /// The ledger caps group size.
    #[error("transaction group has {size} members, limit is {max}")]
    GroupTooLarge {
        /// Member count.
        size: usize,
        /// Ledger limit.
        max: usize,
    },

    /// A member's group id differs from the one computed over the group.
    #[error("transaction {index} does not carry the group id")]
    GroupMismatch {
        /// Position in the group.
        index: usize,
    },

    /// A blob could not be decoded.
    #[error("malformed transaction: {0}")]
    Malformed(#[from] IoError),

    /// A signature did not verify.
    #[error("invalid signature on transaction {0}")]
    InvalidSignature(String),
}

/// Result type for transaction operations.
pub type TransactionResult<T> = std::result::Result<T, TransactionError>;

use bookmarket_core::Address;
use thiserror::Error;

/// Errors reported by a signing agent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WalletError {
    /// The agent (or its user) declined to sign.
    #[error("signing request refused")]
    Refused,

    /// No key is held for the transaction's sender.
    #[error("no key for sender {0}")]
    UnknownSigner(Address),

    /// Key material could not be parsed.
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// A submitted blob was not a valid transaction.
    #[error("malformed transaction: {0}")]
    Malformed(String),
}

impl WalletError {
    /// Whether the failure is a deliberate refusal rather than an error.
    pub fn is_refusal(&self) -> bool {
        matches!(self, WalletError::Refused)
    }
}

/// Result type for wallet operations.
pub type WalletResult<T> = std::result::Result<T, WalletError>;

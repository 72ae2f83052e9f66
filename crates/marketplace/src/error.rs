//! Errors raised by marketplace operations.

use bookmarket_core::{Address, AppId, CodecError, CoreError};
use bookmarket_rpc_client::ClientRpcError;
use bookmarket_transaction::{TransactionError, TxId};
use bookmarket_wallets::WalletError;
use std::fmt;
use thiserror::Error;

/// Coarse classification of a [`MarketplaceError`], for callers that only
/// need to decide what to tell the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Ledger node or indexer unreachable or answering nonsense.
    Connectivity,
    /// The signing agent declined.
    SigningRefused,
    /// Not confirmed within the wait window.
    ConfirmationTimeout,
    /// The ledger rejected the submission.
    Rejected,
    /// A value could not be encoded within the ledger's limits.
    Encoding,
    /// Caller input failed validation.
    InvalidInput,
    /// Caller does not own the listing.
    NotOwner,
    /// The signing agent failed or returned unusable blobs.
    Signing,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Connectivity => "connectivity",
            ErrorKind::SigningRefused => "signing refused",
            ErrorKind::ConfirmationTimeout => "confirmation timeout",
            ErrorKind::Rejected => "rejected",
            ErrorKind::Encoding => "encoding",
            ErrorKind::InvalidInput => "invalid input",
            ErrorKind::NotOwner => "not owner",
            ErrorKind::Signing => "signing",
        };
        f.write_str(name)
    }
}

/// Errors surfaced by marketplace operations.
#[derive(Error, Debug)]
pub enum MarketplaceError {
    /// A ledger node or indexer call failed.
    #[error("ledger access failed: {0}")]
    Connectivity(#[from] ClientRpcError),

    /// The node answered with something the client cannot use.
    #[error("unexpected ledger response: {0}")]
    UnexpectedResponse(String),

    /// The signing agent refused.
    #[error("signing request was refused")]
    SigningRefused,

    /// The signing agent failed.
    #[error("signing failed: {0}")]
    Signing(String),

    /// The group was not confirmed within the wait window.
    #[error("transaction {tx_id} not confirmed after {rounds} rounds")]
    ConfirmationTimeout {
        /// First transaction of the group.
        tx_id: TxId,
        /// Rounds waited.
        rounds: u64,
    },

    /// The ledger refused the group.
    #[error("transaction rejected: {0}")]
    Rejected(String),

    /// A field or argument exceeds the ledger's encoding limits.
    #[error("encoding failed: {0}")]
    Encoding(String),

    /// Caller input failed validation.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Deletion attempted by someone other than the listing's owner.
    #[error("{caller} does not own listing {app_id}")]
    NotOwner {
        /// Listing.
        app_id: AppId,
        /// Account that attempted the operation.
        caller: Address,
    },
}

impl MarketplaceError {
    /// Classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            MarketplaceError::Connectivity(_) | MarketplaceError::UnexpectedResponse(_) => {
                ErrorKind::Connectivity
            }
            MarketplaceError::SigningRefused => ErrorKind::SigningRefused,
            MarketplaceError::Signing(_) => ErrorKind::Signing,
            MarketplaceError::ConfirmationTimeout { .. } => ErrorKind::ConfirmationTimeout,
            MarketplaceError::Rejected(_) => ErrorKind::Rejected,
            MarketplaceError::Encoding(_) => ErrorKind::Encoding,
            MarketplaceError::InvalidInput(_) => ErrorKind::InvalidInput,
            MarketplaceError::NotOwner { .. } => ErrorKind::NotOwner,
        }
    }

    /// Maps a broadcast failure: a 4xx answer means the node looked at the
    /// group and refused it.
    pub(crate) fn from_broadcast(error: ClientRpcError) -> Self {
        if error.is_client_error() {
            MarketplaceError::Rejected(error.message().to_string())
        } else {
            MarketplaceError::Connectivity(error)
        }
    }
}

impl From<WalletError> for MarketplaceError {
    fn from(error: WalletError) -> Self {
        match error {
            WalletError::Refused => MarketplaceError::SigningRefused,
            other => MarketplaceError::Signing(other.to_string()),
        }
    }
}

impl From<CodecError> for MarketplaceError {
    fn from(error: CodecError) -> Self {
        MarketplaceError::Encoding(error.to_string())
    }
}

impl From<CoreError> for MarketplaceError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::Codec(codec) => codec.into(),
            other => MarketplaceError::InvalidInput(other.to_string()),
        }
    }
}

impl From<TransactionError> for MarketplaceError {
    fn from(error: TransactionError) -> Self {
        MarketplaceError::Encoding(error.to_string())
    }
}

/// Result type for marketplace operations.
pub type MarketplaceResult<T> = std::result::Result<T, MarketplaceError>;

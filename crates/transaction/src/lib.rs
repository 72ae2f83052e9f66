//! # Bookmarket Transaction
//!
//! Ledger operations in an SDK-independent form.
//!
//! - [`Transaction`]: a payment or an application call, stamped with the
//!   ledger's [`SuggestedParams`]
//! - [`TxId`]: SHA-512/256 over `"TX"` and the canonical encoding
//! - [`GroupId`]: SHA-512/256 over `"TG"` and the member ids; binds an atomic
//!   group so the ledger accepts or rejects it as a unit
//! - [`SignedTransaction`]: the blob produced by a signing agent

mod error;
mod group;
mod signed;
mod transaction;

pub use error::{TransactionError, TransactionResult};
pub use group::{assign_group_id, compute_group_id, verify_group, GroupId};
pub use signed::SignedTransaction;
pub use transaction::{
    ApplicationCall, OnComplete, StateSchema, SuggestedParams, Transaction, TransactionKind,
    TxId, MAX_PROGRAM_BYTES,
};

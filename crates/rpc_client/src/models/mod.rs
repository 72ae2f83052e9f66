//! JSON models for the ledger node and indexer REST APIs.

mod indexer;
mod ledger;

pub(crate) use ledger::ErrorBody;

pub use indexer::{
    ApplicationParams, ApplicationRecord, ApplicationResponse, IndexedTransaction, TealKeyValue,
    TealValue, TransactionPage, TransactionSearch,
};
pub use ledger::{
    AccountInformation, CompileResponse, NodeStatus, PendingTransaction,
    PostTransactionsResponse, TransactionParams, VALIDITY_WINDOW,
};

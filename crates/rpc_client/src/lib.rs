//! # Bookmarket RPC Client
//!
//! Access to the ledger node and the indexer.
//!
//! The marketplace services only see the [`LedgerApi`] and [`IndexerApi`]
//! traits; [`HttpLedgerClient`] and [`HttpIndexerClient`] implement them over
//! the REST endpoints with `reqwest`. Every call carries the configured API
//! token and request timeout.

mod api;
mod error;
mod indexer_client;
mod ledger_client;
pub mod models;
mod transport;

pub use api::{IndexerApi, LedgerApi};
pub use error::{ClientRpcError, RpcResult};
pub use indexer_client::{HttpIndexerClient, INDEXER_TOKEN_HEADER};
pub use ledger_client::{HttpLedgerClient, NODE_TOKEN_HEADER};

pub use models::{
    ApplicationRecord, NodeStatus, PendingTransaction, TransactionPage, TransactionSearch,
};

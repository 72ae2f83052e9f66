//! Client traits consumed by the marketplace services.

use crate::error::RpcResult;
use crate::models::{ApplicationRecord, NodeStatus, PendingTransaction, TransactionPage, TransactionSearch};
use async_trait::async_trait;
use bookmarket_core::{Address, AppId, Round};
use bookmarket_transaction::{SuggestedParams, TxId};

/// Ledger node operations.
#[async_trait]
pub trait LedgerApi: Send + Sync {
    /// Parameters for new transactions.
    async fn suggested_params(&self) -> RpcResult<SuggestedParams>;

    /// Compiles program source into bytecode.
    async fn compile(&self, source: &str) -> RpcResult<Vec<u8>>;

    /// Broadcasts signed blobs as one submission; returns the first member's id.
    async fn send_raw_transactions(&self, blobs: &[Vec<u8>]) -> RpcResult<TxId>;

    /// Pool or confirmation state of a transaction.
    async fn pending_transaction(&self, tx_id: &TxId) -> RpcResult<PendingTransaction>;

    /// Node status.
    async fn status(&self) -> RpcResult<NodeStatus>;

    /// Waits until the node has seen a round after `round`.
    async fn status_after_round(&self, round: Round) -> RpcResult<NodeStatus>;

    /// Balance of `address` in base units.
    async fn account_balance(&self, address: &Address) -> RpcResult<u64>;
}

/// Indexer operations.
#[async_trait]
pub trait IndexerApi: Send + Sync {
    /// One page of matching transactions.
    async fn search_transactions(&self, search: &TransactionSearch) -> RpcResult<TransactionPage>;

    /// An application record; `None` if the indexer does not know it.
    ///
    /// With `include_all`, deleted applications are returned and flagged.
    async fn lookup_application(
        &self,
        app_id: AppId,
        include_all: bool,
    ) -> RpcResult<Option<ApplicationRecord>>;
}

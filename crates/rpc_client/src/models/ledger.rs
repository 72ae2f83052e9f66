//! Ledger node response models.

use crate::error::{ClientRpcError, RpcResult};
use base64::{engine::general_purpose, Engine as _};
use bookmarket_core::{AppId, Round};
use bookmarket_transaction::SuggestedParams;
use serde::{Deserialize, Serialize};

/// Rounds a new transaction stays valid for.
pub const VALIDITY_WINDOW: u64 = 1000;

/// `GET /v2/transactions/params`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TransactionParams {
    /// Protocol version.
    #[serde(default)]
    pub consensus_version: String,
    /// Suggested fee.
    pub fee: u64,
    /// Genesis hash, base64.
    pub genesis_hash: String,
    /// Network name.
    pub genesis_id: String,
    /// Latest round the node has seen.
    pub last_round: u64,
    /// Minimum fee.
    pub min_fee: u64,
}

impl TransactionParams {
    /// Converts the node's answer into parameters for new transactions.
    pub fn to_suggested_params(&self) -> RpcResult<SuggestedParams> {
        let hash = general_purpose::STANDARD
            .decode(&self.genesis_hash)
            .map_err(|e| ClientRpcError::parse(format!("genesis-hash: {e}")))?;
        let genesis_hash: [u8; 32] = hash
            .try_into()
            .map_err(|_| ClientRpcError::parse("genesis-hash must be 32 bytes"))?;
        Ok(SuggestedParams {
            fee: self.fee,
            min_fee: self.min_fee,
            first_valid: Round(self.last_round),
            last_valid: Round(self.last_round.saturating_add(VALIDITY_WINDOW)),
            genesis_id: self.genesis_id.clone(),
            genesis_hash,
        })
    }
}

/// `POST /v2/teal/compile`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompileResponse {
    /// Program hash.
    pub hash: String,
    /// Compiled program, base64.
    pub result: String,
}

impl CompileResponse {
    /// Compiled program bytes.
    pub fn program(&self) -> RpcResult<Vec<u8>> {
        general_purpose::STANDARD
            .decode(&self.result)
            .map_err(|e| ClientRpcError::parse(format!("compiled program: {e}")))
    }
}

/// `POST /v2/transactions`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostTransactionsResponse {
    /// Id of the first transaction in the submitted group.
    #[serde(rename = "txId")]
    pub tx_id: String,
}

/// `GET /v2/transactions/pending/{txid}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PendingTransaction {
    /// Round the transaction was confirmed in.
    #[serde(default)]
    pub confirmed_round: Option<u64>,
    /// Application created by the transaction.
    #[serde(default)]
    pub application_index: Option<u64>,
    /// Why the pool dropped the transaction; empty while it is still valid.
    #[serde(default)]
    pub pool_error: String,
}

impl PendingTransaction {
    /// Confirmation round, if confirmed.
    pub fn confirmed(&self) -> Option<Round> {
        self.confirmed_round.filter(|round| *round > 0).map(Round)
    }

    /// The pool's rejection reason, if any.
    pub fn rejection(&self) -> Option<&str> {
        (!self.pool_error.is_empty()).then_some(self.pool_error.as_str())
    }

    /// Created application.
    pub fn application_id(&self) -> Option<AppId> {
        self.application_index.filter(|id| *id > 0).map(AppId)
    }
}

/// `GET /v2/status`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct NodeStatus {
    /// Latest round.
    pub last_round: u64,
}

impl NodeStatus {
    /// Latest round.
    pub fn round(&self) -> Round {
        Round(self.last_round)
    }
}

/// `GET /v2/accounts/{address}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct AccountInformation {
    /// Account address.
    pub address: String,
    /// Balance in base units.
    pub amount: u64,
    /// Balance the account must keep.
    #[serde(default)]
    pub min_balance: u64,
}

/// Error body returned by both the node and the indexer.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorBody {
    pub message: String,
}

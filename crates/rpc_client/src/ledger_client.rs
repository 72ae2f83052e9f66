use crate::api::LedgerApi;
use crate::error::{ClientRpcError, RpcResult};
use crate::models::{
    AccountInformation, CompileResponse, NodeStatus, PendingTransaction,
    PostTransactionsResponse, TransactionParams,
};
use crate::transport::HttpTransport;
use async_trait::async_trait;
use bookmarket_config::{ConfigError, NetworkConfig};
use bookmarket_core::{Address, Round};
use bookmarket_transaction::{SuggestedParams, TxId};
use reqwest::Url;
use std::time::Duration;
use tracing::debug;

/// Header carrying the node API token.
pub const NODE_TOKEN_HEADER: &str = "X-Algo-API-Token";

/// Ledger node client over its REST API.
#[derive(Debug, Clone)]
pub struct HttpLedgerClient {
    transport: HttpTransport,
}

impl HttpLedgerClient {
    /// Creates a client for the node at `url`.
    pub fn new(url: Url, token: Option<&str>, timeout: Duration) -> RpcResult<Self> {
        Ok(Self {
            transport: HttpTransport::new(url, NODE_TOKEN_HEADER, token, timeout)?,
        })
    }

    /// Creates a client from the network section of the configuration.
    pub fn from_config(config: &NetworkConfig) -> RpcResult<Self> {
        let url = config.node_url().map_err(config_error)?;
        let client = Self::new(
            url,
            config.node_token.as_deref(),
            Duration::from_millis(config.request_timeout_ms()),
        )?;
        debug!(url = %client.transport.base_address(), "ledger client ready");
        Ok(client)
    }
}

pub(crate) fn config_error(error: ConfigError) -> ClientRpcError {
    ClientRpcError::new(ClientRpcError::INVALID_REQUEST, error.to_string())
}

#[async_trait]
impl LedgerApi for HttpLedgerClient {
    async fn suggested_params(&self) -> RpcResult<SuggestedParams> {
        let params: TransactionParams = self.transport.get("v2/transactions/params", &[]).await?;
        params.to_suggested_params()
    }

    async fn compile(&self, source: &str) -> RpcResult<Vec<u8>> {
        let response: CompileResponse = self
            .transport
            .post("v2/teal/compile", "text/plain", source.as_bytes().to_vec())
            .await?;
        response.program()
    }

    async fn send_raw_transactions(&self, blobs: &[Vec<u8>]) -> RpcResult<TxId> {
        let body = blobs.concat();
        let response: PostTransactionsResponse = self
            .transport
            .post("v2/transactions", "application/x-binary", body)
            .await?;
        response
            .tx_id
            .parse()
            .map_err(ClientRpcError::parse)
    }

    async fn pending_transaction(&self, tx_id: &TxId) -> RpcResult<PendingTransaction> {
        self.transport
            .get(&format!("v2/transactions/pending/{tx_id}"), &[])
            .await
    }

    async fn status(&self) -> RpcResult<NodeStatus> {
        self.transport.get("v2/status", &[]).await
    }

    async fn status_after_round(&self, round: Round) -> RpcResult<NodeStatus> {
        self.transport
            .get(&format!("v2/status/wait-for-block-after/{round}"), &[])
            .await
    }

    async fn account_balance(&self, address: &Address) -> RpcResult<u64> {
        let account: AccountInformation = self
            .transport
            .get(&format!("v2/accounts/{address}"), &[])
            .await?;
        Ok(account.amount)
    }
}

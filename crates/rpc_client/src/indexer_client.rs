use crate::api::IndexerApi;
use crate::error::RpcResult;
use crate::ledger_client::config_error;
use crate::models::{ApplicationRecord, ApplicationResponse, TransactionPage, TransactionSearch};
use crate::transport::HttpTransport;
use async_trait::async_trait;
use bookmarket_config::NetworkConfig;
use bookmarket_core::AppId;
use reqwest::Url;
use std::time::Duration;
use tracing::debug;

/// Header carrying the indexer API token.
pub const INDEXER_TOKEN_HEADER: &str = "X-Indexer-API-Token";

/// Indexer client over its REST API.
#[derive(Debug, Clone)]
pub struct HttpIndexerClient {
    transport: HttpTransport,
}

impl HttpIndexerClient {
    /// Creates a client for the indexer at `url`.
    pub fn new(url: Url, token: Option<&str>, timeout: Duration) -> RpcResult<Self> {
        Ok(Self {
            transport: HttpTransport::new(url, INDEXER_TOKEN_HEADER, token, timeout)?,
        })
    }

    /// Creates a client from the network section of the configuration.
    pub fn from_config(config: &NetworkConfig) -> RpcResult<Self> {
        let url = config.indexer_url().map_err(config_error)?;
        let client = Self::new(
            url,
            config.indexer_token.as_deref(),
            Duration::from_millis(config.request_timeout_ms()),
        )?;
        debug!(url = %client.transport.base_address(), "indexer client ready");
        Ok(client)
    }
}

#[async_trait]
impl IndexerApi for HttpIndexerClient {
    async fn search_transactions(&self, search: &TransactionSearch) -> RpcResult<TransactionPage> {
        self.transport
            .get("v2/transactions", &search.query_pairs())
            .await
    }

    async fn lookup_application(
        &self,
        app_id: AppId,
        include_all: bool,
    ) -> RpcResult<Option<ApplicationRecord>> {
        let query = [("include-all", include_all.to_string())];
        let result: RpcResult<ApplicationResponse> = self
            .transport
            .get(&format!("v2/applications/{app_id}"), &query)
            .await;
        match result {
            Ok(response) => Ok(response.application),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }
}

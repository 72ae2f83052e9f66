use crate::error::{ClientRpcError, RpcResult};
use crate::models::ErrorBody;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};
use tracing::debug;

/// Shared REST plumbing for the node and indexer clients.
#[derive(Debug, Clone)]
pub(crate) struct HttpTransport {
    base_address: Url,
    http_client: Client,
}

impl HttpTransport {
    pub(crate) fn new(
        base_address: Url,
        token_header: &'static str,
        token: Option<&str>,
        timeout: Duration,
    ) -> RpcResult<Self> {
        let mut headers = HeaderMap::new();
        if let Some(token) = token.filter(|t| !t.is_empty()) {
            let value = HeaderValue::from_str(token).map_err(|e| {
                ClientRpcError::new(ClientRpcError::INVALID_REQUEST, format!("api token: {e}"))
            })?;
            headers.insert(token_header, value);
        }
        let http_client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| ClientRpcError::transport(format!("HTTP client: {e}")))?;
        Ok(Self {
            base_address,
            http_client,
        })
    }

    pub(crate) fn base_address(&self) -> &Url {
        &self.base_address
    }

    fn endpoint(&self, path: &str) -> Url {
        let mut url = self.base_address.clone();
        let joined = format!(
            "{}/{}",
            url.path().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        url.set_path(&joined);
        url
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> RpcResult<T> {
        let url = self.endpoint(path);
        self.execute("GET", path, self.http_client.get(url).query(query)).await
    }

    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        content_type: &'static str,
        body: Vec<u8>,
    ) -> RpcResult<T> {
        let url = self.endpoint(path);
        let request = self
            .http_client
            .post(url)
            .header(CONTENT_TYPE, content_type)
            .body(body);
        self.execute("POST", path, request).await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        method: &str,
        path: &str,
        request: RequestBuilder,
    ) -> RpcResult<T> {
        let start = Instant::now();
        let response = request
            .send()
            .await
            .map_err(|e| ClientRpcError::transport(format!("HTTP error: {e}")))?;
        let status = response.status();
        let content = response
            .text()
            .await
            .map_err(|e| ClientRpcError::transport(format!("Failed to read response: {e}")))?;
        debug!(
            method,
            path,
            status = status.as_u16(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "request completed"
        );

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&content)
                .map(|body| body.message)
                .unwrap_or(content);
            return Err(ClientRpcError::new(i32::from(status.as_u16()), message));
        }
        serde_json::from_str(&content)
            .map_err(|e| ClientRpcError::parse(format!("{path}: {e}")))
    }
}

use std::fmt;
use thiserror::Error;

/// Error returned by ledger node and indexer calls.
///
/// `code` is the HTTP status for error responses, or one of the transport
/// codes below when no usable response was received.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub struct ClientRpcError {
    code: i32,
    message: String,
}

impl ClientRpcError {
    /// The request never produced a response.
    pub const TRANSPORT: i32 = -32603;
    /// The response body did not match the expected shape.
    pub const PARSE: i32 = -32700;
    /// The request could not be built.
    pub const INVALID_REQUEST: i32 = -32600;

    const NOT_FOUND: i32 = 404;

    /// Creates an error with an explicit code.
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Transport failure.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(Self::TRANSPORT, message)
    }

    /// Unparsable response.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::new(Self::PARSE, message)
    }

    /// Error code.
    pub fn code(&self) -> i32 {
        self.code
    }

    /// Error message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Whether the endpoint reported the resource as missing.
    pub fn is_not_found(&self) -> bool {
        self.code == Self::NOT_FOUND
    }

    /// Whether the server answered with a client-side (4xx) rejection.
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.code)
    }
}

impl fmt::Display for ClientRpcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code {})", self.message, self.code)
    }
}

/// Result type for client calls.
pub type RpcResult<T> = std::result::Result<T, ClientRpcError>;

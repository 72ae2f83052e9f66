//! Bookmarket Configuration Module
//!
//! Configuration types for the book marketplace client: ledger and indexer
//! endpoints, the marketplace contract's deployment parameters, submission
//! limits and logging. Every section has defaults, so a TOML file only needs
//! the values it overrides.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;
use url::Url;

/// Note prefix written into every listing-creation transaction.
pub const DEFAULT_MARKER: &str = "books:uv30";

/// Rounds to wait for a submitted group to be confirmed.
pub const DEFAULT_WAIT_ROUNDS: u64 = 4;

/// Oldest round scanned for listings.
pub const DEFAULT_MIN_ROUND: u64 = 0;

/// Per-request HTTP timeout.
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;

/// Global integer slots used by the contract (price, sold, likes, dislikes).
pub const DEFAULT_GLOBAL_INTS: u64 = 4;

/// Global byte slots used by the contract (name, image, description, address, owner).
pub const DEFAULT_GLOBAL_BYTES: u64 = 5;

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Reading the configuration file failed.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The file was not valid TOML for this schema.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value failed validation.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Ledger network the client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NetworkType {
    /// Public main network.
    MainNet,
    /// Public test network.
    #[default]
    TestNet,
    /// Local development network.
    LocalNet,
}

impl NetworkType {
    /// Default ledger node endpoint.
    pub fn default_node_url(&self) -> &'static str {
        match self {
            NetworkType::MainNet => "https://mainnet-api.algonode.cloud",
            NetworkType::TestNet => "https://testnet-api.algonode.cloud",
            NetworkType::LocalNet => "http://localhost:4001",
        }
    }

    /// Default indexer endpoint.
    pub fn default_indexer_url(&self) -> &'static str {
        match self {
            NetworkType::MainNet => "https://mainnet-idx.algonode.cloud",
            NetworkType::TestNet => "https://testnet-idx.algonode.cloud",
            NetworkType::LocalNet => "http://localhost:8980",
        }
    }
}

impl fmt::Display for NetworkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkType::MainNet => write!(f, "mainnet"),
            NetworkType::TestNet => write!(f, "testnet"),
            NetworkType::LocalNet => write!(f, "localnet"),
        }
    }
}

impl FromStr for NetworkType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mainnet" | "main" => Ok(NetworkType::MainNet),
            "testnet" | "test" => Ok(NetworkType::TestNet),
            "localnet" | "local" | "private" => Ok(NetworkType::LocalNet),
            _ => Err(format!("Unknown network type: {}", s)),
        }
    }
}

/// Endpoint configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Network; selects default endpoints.
    pub network_type: NetworkType,
    /// Ledger node URL; the network default when unset.
    pub node_url: Option<String>,
    /// API token sent to the ledger node.
    pub node_token: Option<String>,
    /// Indexer URL; the network default when unset.
    pub indexer_url: Option<String>,
    /// API token sent to the indexer.
    pub indexer_token: Option<String>,
    /// Per-request timeout in milliseconds.
    pub request_timeout_ms: Option<u64>,
}

impl NetworkConfig {
    /// Configuration with the defaults of `network_type`.
    pub fn for_network(network_type: NetworkType) -> Self {
        Self {
            network_type,
            ..Self::default()
        }
    }

    /// Effective ledger node URL.
    pub fn node_url(&self) -> ConfigResult<Url> {
        parse_url(
            "node_url",
            self.node_url
                .as_deref()
                .unwrap_or_else(|| self.network_type.default_node_url()),
        )
    }

    /// Effective indexer URL.
    pub fn indexer_url(&self) -> ConfigResult<Url> {
        parse_url(
            "indexer_url",
            self.indexer_url
                .as_deref()
                .unwrap_or_else(|| self.network_type.default_indexer_url()),
        )
    }

    /// Effective request timeout in milliseconds.
    pub fn request_timeout_ms(&self) -> u64 {
        self.request_timeout_ms.unwrap_or(DEFAULT_REQUEST_TIMEOUT_MS)
    }
}

fn parse_url(name: &str, value: &str) -> ConfigResult<Url> {
    Url::parse(value).map_err(|e| ConfigError::Invalid(format!("{name} '{value}': {e}")))
}

/// Storage schema requested for an application.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaConfig {
    /// Integer slots.
    pub num_uints: u64,
    /// Byte-slice slots.
    pub num_byte_slices: u64,
}

/// Marketplace contract configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContractConfig {
    /// Note marker identifying listing-creation transactions.
    pub marker: String,
    /// Oldest round scanned for listings.
    pub min_round: u64,
    /// Global storage of each listing.
    pub global_schema: SchemaConfig,
    /// Per-account storage of each listing.
    pub local_schema: SchemaConfig,
    /// Approval program source.
    pub approval_program: PathBuf,
    /// Clear-state program source.
    pub clear_program: PathBuf,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            marker: DEFAULT_MARKER.to_string(),
            min_round: DEFAULT_MIN_ROUND,
            global_schema: SchemaConfig {
                num_uints: DEFAULT_GLOBAL_INTS,
                num_byte_slices: DEFAULT_GLOBAL_BYTES,
            },
            local_schema: SchemaConfig::default(),
            approval_program: PathBuf::from("contracts/books_approval.teal"),
            clear_program: PathBuf::from("contracts/books_clear.teal"),
        }
    }
}

/// Submission configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmissionConfig {
    /// Rounds to wait for confirmation before giving up.
    pub wait_rounds: u64,
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            wait_rounds: DEFAULT_WAIT_ROUNDS,
        }
    }
}

/// Logger configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive, overridden by `RUST_LOG`.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Main client configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketplaceConfig {
    /// Endpoints.
    pub network: NetworkConfig,
    /// Contract deployment and discovery.
    pub contract: ContractConfig,
    /// Submission limits.
    pub submission: SubmissionConfig,
    /// Logging.
    pub logging: LoggingConfig,
}

impl MarketplaceConfig {
    /// Configuration with the defaults of `network_type`.
    pub fn for_network(network_type: NetworkType) -> Self {
        Self {
            network: NetworkConfig::for_network(network_type),
            ..Self::default()
        }
    }

    /// Parses TOML text and validates it.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a TOML file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading configuration");
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Checks cross-field constraints.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.contract.marker.is_empty() {
            return Err(ConfigError::Invalid("contract.marker must not be empty".into()));
        }
        if self.submission.wait_rounds == 0 {
            return Err(ConfigError::Invalid(
                "submission.wait_rounds must be at least 1".into(),
            ));
        }
        if self.network.request_timeout_ms() == 0 {
            return Err(ConfigError::Invalid(
                "network.request_timeout_ms must be positive".into(),
            ));
        }
        self.network.node_url()?;
        self.network.indexer_url()?;
        Ok(())
    }
}

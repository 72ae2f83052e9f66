//! Indexer request and response models.

use bookmarket_core::{Address, AppId, CodecError, GlobalState, Round, StateValue};
use serde::{Deserialize, Serialize};

const TEAL_BYTES: u8 = 1;
const TEAL_UINT: u8 = 2;

/// Query for `GET /v2/transactions`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionSearch {
    /// Base64 note prefix.
    pub note_prefix: Option<String>,
    /// Transaction type filter, e.g. `appl`.
    pub tx_type: Option<String>,
    /// Oldest round to include.
    pub min_round: Option<Round>,
    /// Only transactions touching this application.
    pub application_id: Option<AppId>,
    /// Continuation token from a previous page.
    pub next: Option<String>,
    /// Page size.
    pub limit: Option<u64>,
}

impl TransactionSearch {
    /// Query parameters in indexer spelling.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(prefix) = &self.note_prefix {
            pairs.push(("note-prefix", prefix.clone()));
        }
        if let Some(tx_type) = &self.tx_type {
            pairs.push(("tx-type", tx_type.clone()));
        }
        if let Some(round) = self.min_round {
            pairs.push(("min-round", round.to_string()));
        }
        if let Some(app_id) = self.application_id {
            pairs.push(("application-id", app_id.value().to_string()));
        }
        if let Some(next) = &self.next {
            pairs.push(("next", next.clone()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        pairs
    }
}

/// One transaction in a search result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct IndexedTransaction {
    /// Transaction id.
    #[serde(default)]
    pub id: String,
    /// Application the transaction created.
    #[serde(default)]
    pub created_application_index: Option<u64>,
    /// Confirmation round.
    #[serde(default)]
    pub confirmed_round: Option<u64>,
    /// Sender address.
    #[serde(default)]
    pub sender: String,
}

impl IndexedTransaction {
    /// Created application, if any.
    pub fn created_application(&self) -> Option<AppId> {
        self.created_application_index
            .filter(|id| *id > 0)
            .map(AppId)
    }
}

/// One page of `GET /v2/transactions`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TransactionPage {
    /// Round the indexer has processed.
    #[serde(default)]
    pub current_round: u64,
    /// Token for the next page; absent on the last one.
    #[serde(default)]
    pub next_token: Option<String>,
    /// Matching transactions.
    #[serde(default)]
    pub transactions: Vec<IndexedTransaction>,
}

/// Typed state value as reported by the storage layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TealValue {
    /// `1` for bytes, `2` for uint.
    #[serde(rename = "type")]
    pub value_type: u8,
    /// Byte value, base64.
    #[serde(default)]
    pub bytes: String,
    /// Integer value.
    #[serde(default)]
    pub uint: u64,
}

/// A global-state entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TealKeyValue {
    /// Key, base64.
    pub key: String,
    /// Value.
    pub value: TealValue,
}

impl TealKeyValue {
    /// Bytes entry.
    pub fn bytes(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: TealValue {
                value_type: TEAL_BYTES,
                bytes: value.into(),
                uint: 0,
            },
        }
    }

    /// Integer entry.
    pub fn uint(key: impl Into<String>, value: u64) -> Self {
        Self {
            key: key.into(),
            value: TealValue {
                value_type: TEAL_UINT,
                bytes: String::new(),
                uint: value,
            },
        }
    }

    fn to_state_value(&self) -> Result<StateValue, CodecError> {
        match self.value.value_type {
            TEAL_BYTES => Ok(StateValue::Bytes(self.value.bytes.clone())),
            TEAL_UINT => Ok(StateValue::Uint(self.value.uint)),
            tag => Err(CodecError::UnknownType {
                field: self.key.clone(),
                tag,
            }),
        }
    }
}

/// Application parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ApplicationParams {
    /// Creator address.
    #[serde(default)]
    pub creator: String,
    /// Global state entries.
    #[serde(default)]
    pub global_state: Vec<TealKeyValue>,
}

/// An application as recorded by the indexer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ApplicationRecord {
    /// Application id.
    pub id: u64,
    /// Whether the application has been deleted.
    #[serde(default)]
    pub deleted: bool,
    /// Creation round.
    #[serde(default)]
    pub created_at_round: Option<u64>,
    /// Parameters and state.
    #[serde(default)]
    pub params: ApplicationParams,
}

impl ApplicationRecord {
    /// Application id.
    pub fn app_id(&self) -> AppId {
        AppId(self.id)
    }

    /// Creator address.
    pub fn creator(&self) -> Result<Address, bookmarket_core::CoreError> {
        self.params.creator.parse()
    }

    /// Global state keyed by base64 field name.
    pub fn global_state(&self) -> Result<GlobalState, CodecError> {
        self.params
            .global_state
            .iter()
            .map(|entry| {
                entry
                    .to_state_value()
                    .map(|value| (entry.key.clone(), value))
            })
            .collect()
    }
}

/// `GET /v2/applications/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ApplicationResponse {
    /// The application.
    pub application: Option<ApplicationRecord>,
    /// Round the indexer has processed.
    #[serde(default)]
    pub current_round: u64,
}

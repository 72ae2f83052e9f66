//! Reconstruction of the active listing set from the indexer.

use crate::error::{MarketplaceError, MarketplaceResult};
use bookmarket_config::ContractConfig;
use bookmarket_core::codec::encode_text;
use bookmarket_core::{AppId, Book, Round};
use bookmarket_rpc_client::{ApplicationRecord, IndexerApi, TransactionSearch};
use futures::stream::{self, StreamExt};
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, warn};

/// Application lookups in flight at once.
const LOOKUP_CONCURRENCY: usize = 8;

const APPLICATION_CALL: &str = "appl";

/// A listing that could not be materialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingFailure {
    /// Listing id.
    pub app_id: AppId,
    /// What went wrong.
    pub error: String,
}

/// Result of a full listing scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListingSync {
    /// Active listings in discovery order.
    pub books: Vec<Book>,
    /// Listings omitted because their record could not be read.
    pub failures: Vec<ListingFailure>,
}

/// Queries the indexer for the marketplace's active listings.
#[derive(Clone)]
pub struct ListingQueryService {
    indexer: Arc<dyn IndexerApi>,
    note_prefix: String,
    min_round: Round,
}

impl ListingQueryService {
    /// Creates a service for the configured marker and round floor.
    pub fn new(indexer: Arc<dyn IndexerApi>, config: &ContractConfig) -> Self {
        Self {
            indexer,
            note_prefix: encode_text(&config.marker),
            min_round: Round(config.min_round),
        }
    }

    /// Scans every creation record and materializes the live listings.
    ///
    /// Only a failing search aborts the scan; a listing whose record cannot be
    /// fetched or decoded is reported in [`ListingSync::failures`] and left
    /// out.
    pub async fn sync(&self) -> MarketplaceResult<ListingSync> {
        let app_ids = self.discover(None).await?;
        let outcomes: Vec<_> = stream::iter(app_ids)
            .map(|app_id| async move { (app_id, self.fetch(app_id).await) })
            .buffered(LOOKUP_CONCURRENCY)
            .collect()
            .await;

        let mut sync = ListingSync::default();
        for (app_id, outcome) in outcomes {
            match outcome {
                Ok(Some(book)) => sync.books.push(book),
                Ok(None) => debug!(%app_id, "listing deleted"),
                Err(error) => {
                    warn!(%app_id, %error, "skipping unreadable listing");
                    sync.failures.push(ListingFailure { app_id, error });
                }
            }
        }
        debug!(
            books = sync.books.len(),
            failures = sync.failures.len(),
            "listing scan complete"
        );
        Ok(sync)
    }

    /// Active listings.
    pub async fn books(&self) -> MarketplaceResult<Vec<Book>> {
        Ok(self.sync().await?.books)
    }

    /// A single listing; `None` if it was deleted, never existed, or was not
    /// created with the marketplace marker.
    pub async fn book(&self, app_id: AppId) -> MarketplaceResult<Option<Book>> {
        if !self.discover(Some(app_id)).await?.contains(&app_id) {
            debug!(%app_id, "no marked creation record");
            return Ok(None);
        }
        match self.indexer.lookup_application(app_id, true).await? {
            Some(record) => {
                materialize(app_id, &record).map_err(MarketplaceError::UnexpectedResponse)
            }
            None => Ok(None),
        }
    }

    /// Ids of all applications created with the marker, in discovery order,
    /// following the indexer's pagination. `only` narrows the search to one
    /// application.
    async fn discover(&self, only: Option<AppId>) -> MarketplaceResult<Vec<AppId>> {
        let mut search = TransactionSearch {
            note_prefix: Some(self.note_prefix.clone()),
            tx_type: Some(APPLICATION_CALL.to_string()),
            min_round: Some(self.min_round),
            application_id: only,
            ..TransactionSearch::default()
        };
        let mut seen = HashSet::new();
        let mut app_ids = Vec::new();
        loop {
            let page = self.indexer.search_transactions(&search).await?;
            let page_len = page.transactions.len();
            for app_id in page
                .transactions
                .iter()
                .filter_map(|tx| tx.created_application())
            {
                if seen.insert(app_id) {
                    app_ids.push(app_id);
                }
            }
            match page.next_token {
                Some(token) if page_len > 0 && search.next.as_ref() != Some(&token) => {
                    search.next = Some(token);
                }
                _ => break,
            }
        }
        debug!(count = app_ids.len(), "discovered listing ids");
        Ok(app_ids)
    }

    async fn fetch(&self, app_id: AppId) -> Result<Option<Book>, String> {
        let record = self
            .indexer
            .lookup_application(app_id, true)
            .await
            .map_err(|e| e.to_string())?;
        match record {
            Some(record) => materialize(app_id, &record),
            None => Err("application record not found".to_string()),
        }
    }
}

/// Book for a live record, `None` for a deleted one.
fn materialize(app_id: AppId, record: &ApplicationRecord) -> Result<Option<Book>, String> {
    if record.deleted {
        return Ok(None);
    }
    let owner = record
        .creator()
        .map_err(|e| format!("creator: {e}"))?;
    let state = record.global_state().map_err(|e| e.to_string())?;
    Book::from_state(app_id, owner, &state)
        .map(Some)
        .map_err(|e| e.to_string())
}

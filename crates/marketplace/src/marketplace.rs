//! Per-action entry points.

use crate::builder::{OperationSet, TransactionBuilder};
use crate::contract::ContractPrograms;
use crate::error::{MarketplaceError, MarketplaceResult};
use crate::query::{ListingQueryService, ListingSync};
use crate::submission::{Confirmation, SubmissionPipeline};
use bookmarket_config::MarketplaceConfig;
use bookmarket_core::{format_units, Address, AppId, Book, NewBook};
use bookmarket_rpc_client::{IndexerApi, LedgerApi};
use bookmarket_wallets::TransactionSigner;
use std::sync::Arc;
use tracing::info;

/// The book marketplace: listing queries plus the five write operations.
///
/// Holds no mutable state; share it freely across tasks.
#[derive(Clone)]
pub struct Marketplace {
    ledger: Arc<dyn LedgerApi>,
    builder: TransactionBuilder,
    pipeline: SubmissionPipeline,
    query: ListingQueryService,
    programs: ContractPrograms,
}

impl Marketplace {
    /// Wires the services together.
    pub fn new(
        config: &MarketplaceConfig,
        ledger: Arc<dyn LedgerApi>,
        indexer: Arc<dyn IndexerApi>,
        signer: Arc<dyn TransactionSigner>,
        programs: ContractPrograms,
    ) -> Self {
        Self {
            builder: TransactionBuilder::new(&config.contract),
            pipeline: SubmissionPipeline::new(ledger.clone(), signer, &config.submission),
            query: ListingQueryService::new(indexer, &config.contract),
            ledger,
            programs,
        }
    }

    /// Listing queries.
    pub fn query(&self) -> &ListingQueryService {
        &self.query
    }

    /// Creates a listing owned by `sender` and returns its id.
    pub async fn create_book(&self, sender: Address, book: NewBook) -> MarketplaceResult<AppId> {
        book.validate()?;
        info!(%sender, name = %book.name, price = %format_units(book.price), "creating listing");
        let programs = self.programs.compile(self.ledger.as_ref()).await?;
        let params = self.ledger.suggested_params().await?;
        let operation = self
            .builder
            .create_listing(sender, &book, &programs, &params)?;
        let confirmation = self.pipeline.submit(operation).await?;
        let app_id = confirmation.application_id.ok_or_else(|| {
            MarketplaceError::UnexpectedResponse(format!(
                "{} confirmed without a created application",
                confirmation.tx_id
            ))
        })?;
        info!(
            %app_id,
            round = %confirmation.confirmed_round,
            "listing created"
        );
        Ok(app_id)
    }

    /// Buys `count` units of `book`.
    pub async fn buy_book(
        &self,
        sender: Address,
        book: &Book,
        count: u64,
    ) -> MarketplaceResult<Confirmation> {
        info!(%sender, app_id = %book.app_id, count, "buying listing");
        let params = self.ledger.suggested_params().await?;
        let operation = self.builder.purchase(sender, book, count, &params)?;
        self.finish(operation).await
    }

    /// Likes `book`.
    pub async fn like_book(&self, sender: Address, book: &Book) -> MarketplaceResult<Confirmation> {
        info!(%sender, app_id = %book.app_id, "liking listing");
        let params = self.ledger.suggested_params().await?;
        let operation = self.builder.like(sender, book, &params)?;
        self.finish(operation).await
    }

    /// Dislikes `book`.
    pub async fn dislike_book(
        &self,
        sender: Address,
        book: &Book,
    ) -> MarketplaceResult<Confirmation> {
        info!(%sender, app_id = %book.app_id, "disliking listing");
        let params = self.ledger.suggested_params().await?;
        let operation = self.builder.dislike(sender, book, &params)?;
        self.finish(operation).await
    }

    /// Deletes `book`; only its owner may.
    pub async fn delete_book(
        &self,
        sender: Address,
        book: &Book,
    ) -> MarketplaceResult<Confirmation> {
        if !book.is_owned_by(&sender) {
            return Err(MarketplaceError::NotOwner {
                app_id: book.app_id,
                caller: sender,
            });
        }
        info!(%sender, app_id = %book.app_id, "deleting listing");
        let params = self.ledger.suggested_params().await?;
        let operation = self.builder.delete_listing(sender, book.app_id, &params)?;
        self.finish(operation).await
    }

    /// Active listings.
    pub async fn get_books(&self) -> MarketplaceResult<Vec<Book>> {
        self.query.books().await
    }

    /// Active listings plus the ids that could not be read.
    pub async fn sync_books(&self) -> MarketplaceResult<ListingSync> {
        self.query.sync().await
    }

    /// A single active listing.
    pub async fn get_book(&self, app_id: AppId) -> MarketplaceResult<Option<Book>> {
        self.query.book(app_id).await
    }

    /// Balance of `address` in base units.
    pub async fn balance(&self, address: &Address) -> MarketplaceResult<u64> {
        Ok(self.ledger.account_balance(address).await?)
    }

    async fn finish(&self, operation: OperationSet) -> MarketplaceResult<Confirmation> {
        let kind = operation.kind();
        let confirmation = self.pipeline.submit(operation).await?;
        info!(
            %kind,
            tx_id = %confirmation.tx_id,
            round = %confirmation.confirmed_round,
            "operation confirmed"
        );
        Ok(confirmation)
    }
}

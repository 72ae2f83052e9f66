//! Construction of the marketplace's operation sets.
//!
//! Every operation is an atomic group, singletons included, and the group id
//! is stamped before anything leaves the builder. Argument encodings are
//! checked against the ledger's limits here so that nothing oversized ever
//! reaches a signer.

use crate::contract::CompiledPrograms;
use crate::error::{MarketplaceError, MarketplaceResult};
use bookmarket_config::{ContractConfig, SchemaConfig};
use bookmarket_core::codec::{check_app_args, encode_uint64};
use bookmarket_core::constants::{methods, MAX_NOTE_BYTES, MAX_PURCHASE_COUNT};
use bookmarket_core::{Address, AppId, Book, NewBook};
use bookmarket_transaction::{
    assign_group_id, ApplicationCall, GroupId, StateSchema, SuggestedParams, Transaction,
    TransactionKind,
};
use serde::Serialize;
use std::fmt;

/// Marketplace operation carried by an [`OperationSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum OperationKind {
    /// Listing creation.
    CreateListing,
    /// Purchase of one or more units.
    Purchase,
    /// Like.
    Like,
    /// Dislike.
    Dislike,
    /// Listing deletion.
    DeleteListing,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OperationKind::CreateListing => "create",
            OperationKind::Purchase => "purchase",
            OperationKind::Like => "like",
            OperationKind::Dislike => "dislike",
            OperationKind::DeleteListing => "delete",
        };
        f.write_str(name)
    }
}

/// A grouped, unsigned set of transactions implementing one operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationSet {
    kind: OperationKind,
    transactions: Vec<Transaction>,
    group_id: GroupId,
    payment_amount: Option<u64>,
}

impl OperationSet {
    /// The operation.
    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    /// Members in submission order.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Group id shared by all members.
    pub fn group_id(&self) -> GroupId {
        self.group_id
    }

    /// Amount paid to the seller, for purchases.
    pub fn payment_amount(&self) -> Option<u64> {
        self.payment_amount
    }
}

fn state_schema(config: &SchemaConfig) -> StateSchema {
    StateSchema {
        num_uints: config.num_uints,
        num_byte_slices: config.num_byte_slices,
    }
}

/// Builds operation sets for the marketplace contract.
#[derive(Debug, Clone)]
pub struct TransactionBuilder {
    marker: Vec<u8>,
    global_schema: StateSchema,
    local_schema: StateSchema,
}

impl TransactionBuilder {
    /// Creates a builder for the configured contract deployment.
    pub fn new(config: &ContractConfig) -> Self {
        Self {
            marker: config.marker.as_bytes().to_vec(),
            global_schema: state_schema(&config.global_schema),
            local_schema: state_schema(&config.local_schema),
        }
    }

    /// Listing creation: one application-creation call carrying the listing's
    /// fields and the marketplace marker as its note.
    pub fn create_listing(
        &self,
        sender: Address,
        book: &NewBook,
        programs: &CompiledPrograms,
        params: &SuggestedParams,
    ) -> MarketplaceResult<OperationSet> {
        book.validate()?;
        if self.marker.len() > MAX_NOTE_BYTES {
            return Err(MarketplaceError::Encoding(format!(
                "marker is {} bytes, limit is {MAX_NOTE_BYTES}",
                self.marker.len()
            )));
        }
        let args = vec![
            book.name.as_bytes().to_vec(),
            book.image.as_bytes().to_vec(),
            book.description.as_bytes().to_vec(),
            encode_uint64(book.price).to_vec(),
            sender.to_string().into_bytes(),
        ];
        let call = ApplicationCall::create(
            programs.approval.clone(),
            programs.clear.clone(),
            self.global_schema,
            self.local_schema,
            args,
        );
        let tx = Transaction::new(sender, params, TransactionKind::ApplicationCall(call))
            .with_note(self.marker.clone());
        seal(OperationKind::CreateListing, vec![tx], None)
    }

    /// Purchase of `count` units: a `buy` call followed by the payment of
    /// `price * count` from the buyer to the listing's owner.
    pub fn purchase(
        &self,
        buyer: Address,
        book: &Book,
        count: u64,
        params: &SuggestedParams,
    ) -> MarketplaceResult<OperationSet> {
        if !(1..=MAX_PURCHASE_COUNT).contains(&count) {
            return Err(MarketplaceError::InvalidInput(format!(
                "count must be between 1 and {MAX_PURCHASE_COUNT}, got {count}"
            )));
        }
        let amount = book.total_price(count)?;
        let call = ApplicationCall::call(
            book.app_id,
            vec![methods::BUY.as_bytes().to_vec(), encode_uint64(count).to_vec()],
        );
        let transactions = vec![
            Transaction::new(buyer, params, TransactionKind::ApplicationCall(call)),
            Transaction::new(
                buyer,
                params,
                TransactionKind::Payment {
                    receiver: book.owner,
                    amount,
                },
            ),
        ];
        seal(OperationKind::Purchase, transactions, Some(amount))
    }

    /// Like: a single `likes` call.
    pub fn like(
        &self,
        sender: Address,
        book: &Book,
        params: &SuggestedParams,
    ) -> MarketplaceResult<OperationSet> {
        self.method_call(OperationKind::Like, methods::LIKES, sender, book.app_id, params)
    }

    /// Dislike: a single `dislikes` call.
    pub fn dislike(
        &self,
        sender: Address,
        book: &Book,
        params: &SuggestedParams,
    ) -> MarketplaceResult<OperationSet> {
        self.method_call(OperationKind::Dislike, methods::DISLIKES, sender, book.app_id, params)
    }

    /// Deletion: a single call with the delete completion action.
    pub fn delete_listing(
        &self,
        sender: Address,
        app_id: AppId,
        params: &SuggestedParams,
    ) -> MarketplaceResult<OperationSet> {
        let tx = Transaction::new(
            sender,
            params,
            TransactionKind::ApplicationCall(ApplicationCall::delete(app_id)),
        );
        seal(OperationKind::DeleteListing, vec![tx], None)
    }

    fn method_call(
        &self,
        kind: OperationKind,
        method: &str,
        sender: Address,
        app_id: AppId,
        params: &SuggestedParams,
    ) -> MarketplaceResult<OperationSet> {
        let call = ApplicationCall::call(app_id, vec![method.as_bytes().to_vec()]);
        let tx = Transaction::new(sender, params, TransactionKind::ApplicationCall(call));
        seal(kind, vec![tx], None)
    }
}

fn seal(
    kind: OperationKind,
    mut transactions: Vec<Transaction>,
    payment_amount: Option<u64>,
) -> MarketplaceResult<OperationSet> {
    for tx in &transactions {
        if let Some(call) = tx.application_call() {
            check_app_args(&call.app_args)?;
        }
    }
    let group_id = assign_group_id(&mut transactions)?;
    Ok(OperationSet {
        kind,
        transactions,
        group_id,
        payment_amount,
    })
}

//! # Bookmarket-RS: an on-ledger book marketplace client
//!
//! Listings live on the ledger as one application per book, created and
//! mutated through a fixed marketplace contract. This crate bundles the
//! workspace crates behind one dependency:
//!
//! - [`core`] - addresses, identifiers, the book model and the state codec
//! - [`config`] - TOML configuration
//! - [`transaction`] - transactions, atomic groups and signatures
//! - [`rpc_client`] - ledger node and indexer clients
//! - [`wallets`] - key pairs and the signing-agent seam
//! - [`marketplace`] - listing queries, transaction building and submission
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bookmarket_rs::prelude::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = MarketplaceConfig::for_network(NetworkType::TestNet);
//!     let key = KeyPair::generate();
//!     let seller = key.address();
//!     let signer = Arc::new(LocalSigner::new().with_key(key));
//!     let programs = ContractPrograms::new(
//!         std::fs::read_to_string("contracts/books_approval.teal")?,
//!         std::fs::read_to_string("contracts/books_clear.teal")?,
//!     );
//!
//!     let market = bookmarket_rs::connect(&config, signer, programs)?;
//!     let app_id = market
//!         .create_book(seller, NewBook::new("Dune", "", "Spice", 5_000_000))
//!         .await?;
//!     println!("listed as {app_id}");
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub use bookmarket_config as config;
pub use bookmarket_core as core;
pub use bookmarket_marketplace as marketplace;
pub use bookmarket_rpc_client as rpc_client;
pub use bookmarket_transaction as transaction;
pub use bookmarket_wallets as wallets;

use bookmarket_config::MarketplaceConfig;
use bookmarket_marketplace::{ContractPrograms, Marketplace};
use bookmarket_rpc_client::{HttpIndexerClient, HttpLedgerClient, RpcResult};
use bookmarket_wallets::TransactionSigner;
use std::sync::Arc;

/// Common imports for marketplace clients
pub mod prelude {
    pub use crate::config::{MarketplaceConfig, NetworkType};
    pub use crate::core::{Address, AppId, Book, NewBook};
    pub use crate::marketplace::{
        Confirmation, ContractPrograms, ErrorKind, ListingSync, Marketplace, MarketplaceError,
    };
    pub use crate::rpc_client::{IndexerApi, LedgerApi};
    pub use crate::wallets::{KeyPair, LocalSigner, TransactionSigner};
}

/// Builds a [`Marketplace`] over HTTP clients for the configured endpoints.
pub fn connect(
    config: &MarketplaceConfig,
    signer: Arc<dyn TransactionSigner>,
    programs: ContractPrograms,
) -> RpcResult<Marketplace> {
    let ledger = HttpLedgerClient::from_config(&config.network)?;
    let indexer = HttpIndexerClient::from_config(&config.network)?;
    Ok(Marketplace::new(
        config,
        Arc::new(ledger),
        Arc::new(indexer),
        signer,
        programs,
    ))
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

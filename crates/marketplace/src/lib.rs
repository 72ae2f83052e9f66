//! # Bookmarket Marketplace
//!
//! The marketplace protocol on top of the ledger clients and a signing agent.
//!
//! - [`ListingQueryService`]: rebuilds the active listing set from the
//!   indexer, isolating per-listing failures
//! - [`TransactionBuilder`]: builds the grouped transactions of each
//!   operation
//! - [`SubmissionPipeline`]: signs, broadcasts and confirms a group as a unit
//! - [`Marketplace`]: one method per user action
//!
//! ```no_run
//! # async fn demo(market: bookmarket_marketplace::Marketplace, me: bookmarket_core::Address)
//! # -> bookmarket_marketplace::MarketplaceResult<()> {
//! for book in market.get_books().await? {
//!     if book.name == "Dune" {
//!         market.buy_book(me, &book, 3).await?;
//!     }
//! }
//! # Ok(())
//! # }
//! ```

mod builder;
mod contract;
mod error;
mod marketplace;
mod query;
mod submission;

pub use builder::{OperationKind, OperationSet, TransactionBuilder};
pub use contract::{CompiledPrograms, ContractPrograms};
pub use error::{ErrorKind, MarketplaceError, MarketplaceResult};
pub use marketplace::Marketplace;
pub use query::{ListingFailure, ListingQueryService, ListingSync};
pub use submission::{Confirmation, SubmissionPipeline};

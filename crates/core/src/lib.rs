//! # Bookmarket Core
//!
//! Core types for the book marketplace client.
//!
//! A listing ("book") lives on the ledger as an application instance whose
//! global state holds the book's fields. This crate provides the pieces every
//! other crate builds on:
//!
//! - **Record model**: [`Book`], [`NewBook`], [`AppId`], [`Round`], [`Address`]
//! - **State codec**: base64 text fields, 8-byte big-endian integers and
//!   typed lookups over decoded [`GlobalState`]
//! - **Binary IO**: [`io::BinaryWriter`] / [`io::MemoryReader`] and the
//!   [`io::Serializable`] trait used by the transaction encoding
//! - **Hashing**: domain-separated SHA-512/256
//!
//! ## Example
//!
//! ```rust
//! use bookmarket_core::codec::{decode_text, encode_text, encode_uint64, decode_uint64};
//!
//! let encoded = encode_text("Dune");
//! assert_eq!(decode_text(&encoded).unwrap(), "Dune");
//! assert_eq!(decode_uint64(&encode_uint64(5_000_000)).unwrap(), 5_000_000);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

/// Ledger addresses
pub mod address;
/// Book listing model
pub mod book;
/// Encoding of stored fields and application arguments
pub mod codec;
/// Protocol and contract constants
pub mod constants;
/// Core error types
pub mod error;
/// Hash helpers
pub mod hash;
/// Ledger identifiers
pub mod identifiers;
/// Binary reader and writer
pub mod io;

pub use address::Address;
pub use book::{format_units, parse_units, Book, NewBook};
pub use codec::{GlobalState, StateValue};
pub use constants::{fields, methods};
pub use error::{CodecError, CoreError, CoreResult};
pub use identifiers::{AppId, Round};

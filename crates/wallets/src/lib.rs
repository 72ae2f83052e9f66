//! # Bookmarket Wallets
//!
//! Signing agents. The marketplace hands raw transaction encodings to a
//! [`TransactionSigner`] and receives signed blobs back, the way a browser
//! wallet extension would. [`LocalSigner`] is an in-process agent holding
//! ed25519 [`KeyPair`]s.

mod error;
mod key_pair;
mod signer;

pub use error::{WalletError, WalletResult};
pub use key_pair::KeyPair;
pub use signer::{LocalSigner, TransactionSigner};

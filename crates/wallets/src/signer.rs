//! Signing agents.

use crate::error::{WalletError, WalletResult};
use crate::key_pair::KeyPair;
use async_trait::async_trait;
use bookmarket_core::Address;
use bookmarket_transaction::Transaction;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Signs raw transaction bytes on behalf of their senders.
///
/// Input blobs are canonical transaction encodings; output blobs are signed
/// transaction encodings, one per input and in the same order. An agent may
/// refuse the whole batch with [`WalletError::Refused`].
#[async_trait]
pub trait TransactionSigner: Send + Sync {
    /// Signs every transaction of a batch.
    async fn sign_transactions(&self, transactions: &[Vec<u8>]) -> WalletResult<Vec<Vec<u8>>>;
}

type Approval = Arc<dyn Fn(&[Transaction]) -> bool + Send + Sync>;

/// In-process signer holding ed25519 keys.
#[derive(Clone, Default)]
pub struct LocalSigner {
    keys: HashMap<Address, KeyPair>,
    approval: Option<Approval>,
}

impl LocalSigner {
    /// Creates a signer without keys.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a key and returns its address.
    pub fn add_key(&mut self, key: KeyPair) -> Address {
        let address = key.address();
        self.keys.insert(address, key);
        address
    }

    /// Builder form of [`LocalSigner::add_key`].
    pub fn with_key(mut self, key: KeyPair) -> Self {
        self.add_key(key);
        self
    }

    /// Installs a check every batch must pass before it is signed; a
    /// rejected batch fails with [`WalletError::Refused`].
    pub fn with_approval<F>(mut self, approval: F) -> Self
    where
        F: Fn(&[Transaction]) -> bool + Send + Sync + 'static,
    {
        self.approval = Some(Arc::new(approval));
        self
    }

    /// Addresses this signer can sign for.
    pub fn addresses(&self) -> Vec<Address> {
        let mut addresses: Vec<_> = self.keys.keys().copied().collect();
        addresses.sort();
        addresses
    }

    /// Whether a key for `address` is held.
    pub fn has_key(&self, address: &Address) -> bool {
        self.keys.contains_key(address)
    }
}

impl fmt::Debug for LocalSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalSigner")
            .field("addresses", &self.addresses())
            .field("approval", &self.approval.is_some())
            .finish()
    }
}

#[async_trait]
impl TransactionSigner for LocalSigner {
    async fn sign_transactions(&self, transactions: &[Vec<u8>]) -> WalletResult<Vec<Vec<u8>>> {
        let decoded = transactions
            .iter()
            .map(|blob| {
                Transaction::decode(blob).map_err(|e| WalletError::Malformed(e.to_string()))
            })
            .collect::<WalletResult<Vec<_>>>()?;

        if let Some(sender) = decoded.iter().map(|tx| tx.sender).find(|s| !self.has_key(s)) {
            return Err(WalletError::UnknownSigner(sender));
        }
        if let Some(approval) = &self.approval {
            if !approval(&decoded) {
                debug!(count = decoded.len(), "signing batch refused");
                return Err(WalletError::Refused);
            }
        }

        let signed = decoded
            .into_iter()
            .map(|tx| {
                let key = self
                    .keys
                    .get(&tx.sender)
                    .ok_or(WalletError::UnknownSigner(tx.sender))?;
                Ok(key.sign(tx).encode())
            })
            .collect::<WalletResult<Vec<_>>>()?;
        debug!(count = signed.len(), "signed transaction batch");
        Ok(signed)
    }
}

//! Ed25519 account keys.

use crate::error::{WalletError, WalletResult};
use bookmarket_core::Address;
use bookmarket_transaction::{SignedTransaction, Transaction};
use ed25519_dalek::{SigningKey, SECRET_KEY_LENGTH};
use rand::rngs::OsRng;
use std::fmt;

/// An account key pair.
#[derive(Clone)]
pub struct KeyPair {
    signing_key: SigningKey,
}

impl KeyPair {
    /// Generates a fresh key pair.
    pub fn generate() -> Self {
        Self {
            signing_key: SigningKey::generate(&mut OsRng),
        }
    }

    /// Restores a key pair from its 32-byte secret.
    pub fn from_secret(secret: &[u8]) -> WalletResult<Self> {
        let bytes: [u8; SECRET_KEY_LENGTH] = secret.try_into().map_err(|_| {
            WalletError::InvalidKey(format!(
                "expected {SECRET_KEY_LENGTH} bytes, got {}",
                secret.len()
            ))
        })?;
        Ok(Self {
            signing_key: SigningKey::from_bytes(&bytes),
        })
    }

    /// Restores a key pair from a hex-encoded secret.
    pub fn from_secret_hex(secret: &str) -> WalletResult<Self> {
        let bytes = hex::decode(secret.trim())
            .map_err(|e| WalletError::InvalidKey(format!("secret is not hex: {e}")))?;
        Self::from_secret(&bytes)
    }

    /// Hex-encoded secret.
    pub fn secret_hex(&self) -> String {
        hex::encode(self.signing_key.to_bytes())
    }

    /// Account address.
    pub fn address(&self) -> Address {
        Address::from_public_key(self.signing_key.verifying_key().to_bytes())
    }

    /// Signs a transaction.
    pub fn sign(&self, transaction: Transaction) -> SignedTransaction {
        SignedTransaction::sign(transaction, &self.signing_key)
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("address", &self.address())
            .finish_non_exhaustive()
    }
}

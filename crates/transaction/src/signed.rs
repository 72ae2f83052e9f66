//! Signed transaction blobs.

use crate::error::{TransactionError, TransactionResult};
use crate::transaction::{Transaction, TxId};
use bookmarket_core::io::{BinaryWriter, IoResult, MemoryReader, Serializable, SerializableExt};
use bookmarket_core::Address;
use ed25519_dalek::{Signature, Signer, SigningKey, VerifyingKey};

/// Ed25519 signature length.
pub const SIGNATURE_SIZE: usize = 64;

/// A transaction with the signature that authorizes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction {
    /// The signed transaction.
    pub transaction: Transaction,
    /// Account whose key produced the signature.
    pub signer: Address,
    /// Signature over [`Transaction::bytes_to_sign`].
    pub signature: [u8; SIGNATURE_SIZE],
}

impl SignedTransaction {
    /// Signs `transaction` with `key`.
    pub fn sign(transaction: Transaction, key: &SigningKey) -> Self {
        let signature = key.sign(&transaction.bytes_to_sign());
        Self {
            signer: Address::from_public_key(key.verifying_key().to_bytes()),
            signature: signature.to_bytes(),
            transaction,
        }
    }

    /// Id of the inner transaction.
    pub fn id(&self) -> TxId {
        self.transaction.id()
    }

    /// Wire form submitted to the ledger.
    pub fn encode(&self) -> Vec<u8> {
        self.to_array()
    }

    /// Parses a wire blob.
    pub fn decode(bytes: &[u8]) -> TransactionResult<Self> {
        Ok(Self::from_array(bytes)?)
    }

    /// Checks that the sender signed the transaction.
    pub fn verify(&self) -> TransactionResult<()> {
        let id = self.id().to_string();
        if self.signer != self.transaction.sender {
            return Err(TransactionError::InvalidSignature(id));
        }
        let key = VerifyingKey::from_bytes(self.signer.public_key())
            .map_err(|_| TransactionError::InvalidSignature(id.clone()))?;
        let signature = Signature::from_bytes(&self.signature);
        key.verify_strict(&self.transaction.bytes_to_sign(), &signature)
            .map_err(|_| TransactionError::InvalidSignature(id))
    }
}

impl Serializable for SignedTransaction {
    fn serialize(&self, writer: &mut BinaryWriter) {
        self.transaction.serialize(writer);
        self.signer.serialize(writer);
        writer.write_bytes(&self.signature);
    }

    fn deserialize(reader: &mut MemoryReader) -> IoResult<Self> {
        Ok(Self {
            transaction: Transaction::deserialize(reader)?,
            signer: Address::deserialize(reader)?,
            signature: reader.read_array()?,
        })
    }
}

//! Signing, broadcast and confirmation of operation sets.

use crate::builder::OperationSet;
use crate::error::{MarketplaceError, MarketplaceResult};
use bookmarket_config::SubmissionConfig;
use bookmarket_core::{AppId, Round};
use bookmarket_rpc_client::{LedgerApi, PendingTransaction};
use bookmarket_transaction::{GroupId, SignedTransaction, Transaction, TxId};
use bookmarket_wallets::TransactionSigner;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

/// Outcome of a confirmed operation set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Confirmation {
    /// Id of the group's first transaction.
    pub tx_id: TxId,
    /// Group id.
    pub group_id: GroupId,
    /// Round the group was confirmed in.
    pub confirmed_round: Round,
    /// Application created by the group, for listing creation.
    pub application_id: Option<AppId>,
}

/// Signs, broadcasts and waits for operation sets.
///
/// The whole group is signed in one batch, broadcast in one call and
/// confirmed or rejected as a unit. Nothing is retried.
#[derive(Clone)]
pub struct SubmissionPipeline {
    ledger: Arc<dyn LedgerApi>,
    signer: Arc<dyn TransactionSigner>,
    wait_rounds: u64,
}

impl SubmissionPipeline {
    /// Creates a pipeline.
    pub fn new(
        ledger: Arc<dyn LedgerApi>,
        signer: Arc<dyn TransactionSigner>,
        config: &SubmissionConfig,
    ) -> Self {
        Self {
            ledger,
            signer,
            wait_rounds: config.wait_rounds,
        }
    }

    /// Rounds waited for confirmation.
    pub fn wait_rounds(&self) -> u64 {
        self.wait_rounds
    }

    /// Submits `operation` and waits for it to be confirmed.
    pub async fn submit(&self, operation: OperationSet) -> MarketplaceResult<Confirmation> {
        let requested = operation.transactions();
        let Some(first) = requested.first() else {
            return Err(MarketplaceError::InvalidInput("empty operation set".into()));
        };
        let tx_id = first.id();

        let unsigned: Vec<Vec<u8>> = requested.iter().map(Transaction::encode).collect();
        let blobs = self.signer.sign_transactions(&unsigned).await?;
        check_signed(requested, &blobs)?;
        debug!(
            kind = %operation.kind(),
            %tx_id,
            members = blobs.len(),
            "signed operation set"
        );

        let accepted = self
            .ledger
            .send_raw_transactions(&blobs)
            .await
            .map_err(MarketplaceError::from_broadcast)?;
        if accepted != tx_id {
            warn!(%tx_id, %accepted, "node reported a different id for the group");
        }

        let pending = self.wait_for_confirmation(&tx_id).await?;
        let confirmed_round = pending.confirmed().ok_or_else(|| {
            MarketplaceError::UnexpectedResponse(format!("{tx_id} confirmed without a round"))
        })?;
        Ok(Confirmation {
            tx_id,
            group_id: operation.group_id(),
            confirmed_round,
            application_id: pending.application_id(),
        })
    }

    /// Polls round by round until the transaction is confirmed, rejected by
    /// the pool, or `wait_rounds` rounds have passed.
    async fn wait_for_confirmation(&self, tx_id: &TxId) -> MarketplaceResult<PendingTransaction> {
        let start = self.ledger.status().await?.round();
        let mut current = start;
        while current.value() < start.value().saturating_add(self.wait_rounds) {
            let pending = self.ledger.pending_transaction(tx_id).await?;
            if pending.confirmed().is_some() {
                debug!(%tx_id, round = %current, "transaction confirmed");
                return Ok(pending);
            }
            if let Some(reason) = pending.rejection() {
                return Err(MarketplaceError::Rejected(reason.to_string()));
            }
            let reached = self.ledger.status_after_round(current).await?.round();
            current = reached.max(current.saturating_add(1));
        }
        Err(MarketplaceError::ConfirmationTimeout {
            tx_id: *tx_id,
            rounds: self.wait_rounds,
        })
    }
}

/// The agent must return one blob per requested transaction, each carrying
/// exactly that transaction and a valid signature by its sender.
fn check_signed(requested: &[Transaction], blobs: &[Vec<u8>]) -> MarketplaceResult<()> {
    if blobs.len() != requested.len() {
        return Err(MarketplaceError::Signing(format!(
            "signer returned {} blobs for {} transactions",
            blobs.len(),
            requested.len()
        )));
    }
    for (index, (blob, expected)) in blobs.iter().zip(requested).enumerate() {
        let signed = SignedTransaction::decode(blob)
            .map_err(|e| MarketplaceError::Signing(format!("blob {index}: {e}")))?;
        if &signed.transaction != expected {
            return Err(MarketplaceError::Signing(format!(
                "blob {index} does not carry the requested transaction"
            )));
        }
        signed
            .verify()
            .map_err(|e| MarketplaceError::Signing(format!("blob {index}: {e}")))?;
    }
    Ok(())
}

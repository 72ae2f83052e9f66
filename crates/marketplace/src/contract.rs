//! The listing contract's programs.

use crate::error::{MarketplaceError, MarketplaceResult};
use bookmarket_rpc_client::LedgerApi;
use bookmarket_transaction::MAX_PROGRAM_BYTES;
use tracing::debug;

/// Approval and clear-state program sources, deployed verbatim with every
/// listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractPrograms {
    /// Approval program source.
    pub approval_source: String,
    /// Clear-state program source.
    pub clear_source: String,
}

/// Compiled program bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledPrograms {
    /// Approval program.
    pub approval: Vec<u8>,
    /// Clear-state program.
    pub clear: Vec<u8>,
}

impl ContractPrograms {
    /// Wraps program sources.
    pub fn new(approval_source: impl Into<String>, clear_source: impl Into<String>) -> Self {
        Self {
            approval_source: approval_source.into(),
            clear_source: clear_source.into(),
        }
    }

    /// Compiles both programs through the ledger node.
    pub async fn compile(&self, ledger: &dyn LedgerApi) -> MarketplaceResult<CompiledPrograms> {
        let approval = ledger.compile(&self.approval_source).await?;
        let clear = ledger.compile(&self.clear_source).await?;
        for (name, program) in [("approval", &approval), ("clear", &clear)] {
            if program.is_empty() || program.len() > MAX_PROGRAM_BYTES {
                return Err(MarketplaceError::UnexpectedResponse(format!(
                    "{name} program compiled to {} bytes",
                    program.len()
                )));
            }
        }
        debug!(
            approval_bytes = approval.len(),
            clear_bytes = clear.len(),
            "compiled contract programs"
        );
        Ok(CompiledPrograms { approval, clear })
    }
}

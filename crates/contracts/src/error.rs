//! Error types for the contracts crate.

use alloy::primitives::{Bytes, Selector, TxHash};
use thiserror::Error;

use crate::envelope::EnvelopeState;

/// Errors that can occur when building, verifying or submitting contract calls.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractError {
    /// RPC endpoint could not be parsed or reached.
    #[error("RPC connection failed: {0}")]
    RpcConnection(String),

    /// Invalid private key.
    #[error("Invalid private key")]
    InvalidPrivateKey,

    /// Call reverted with a custom error known to the registry, e.g. `NoClaim()`.
    #[error("Transaction reverted: {name}")]
    Revert { name: String },

    /// Call reverted with `Error(string)` or `Panic(uint256)`.
    #[error("Transaction reverted: {0}")]
    RevertMessage(String),

    /// Call reverted with data no registered error matches.
    #[error("Transaction reverted with unrecognized error {}", describe_selector(.selector))]
    OpaqueRevert {
        selector: Option<Selector>,
        data: Bytes,
    },

    /// Node could not be reached or answered with a non-revert error.
    #[error("Network error: {0}")]
    Network(String),

    /// Node rejected the signed transaction. Nothing was broadcast.
    #[error("Transaction submission failed: {0}")]
    SubmissionFailed(String),

    /// Transaction was broadcast but its receipt could not be obtained.
    #[error("Transaction {tx_hash} submitted but not confirmed: {reason}")]
    NotConfirmed { tx_hash: TxHash, reason: String },

    /// Transaction was mined and reverted.
    #[error("Transaction {tx_hash} reverted on chain")]
    RevertedOnChain { tx_hash: TxHash },

    /// Operation not allowed in the envelope's current state.
    #[error("Cannot {operation} a transaction in state {state}")]
    InvalidState {
        operation: &'static str,
        state: EnvelopeState,
    },
}

impl ContractError {
    /// Returns `true` for the three revert variants raised during verification.
    pub fn is_revert(&self) -> bool {
        matches!(
            self,
            Self::Revert { .. } | Self::RevertMessage(_) | Self::OpaqueRevert { .. }
        )
    }
}

fn describe_selector(selector: &Option<Selector>) -> String {
    match selector {
        Some(selector) => selector.to_string(),
        None => "(empty revert data)".to_string(),
    }
}

/// Result type alias for contract operations.
pub type Result<T> = std::result::Result<T, ContractError>;

//! Error types for the Ajna SDK.

use ajna_rs_contracts::ContractError;
use ajna_rs_pricing::PricingError;
use alloy_primitives::Address;
use thiserror::Error;

/// Errors that can occur when using the Ajna SDK.
#[derive(Debug, Error)]
pub enum SdkError {
    /// Contract call, revert or transaction lifecycle failure.
    #[error(transparent)]
    Contract(#[from] ContractError),

    /// Invalid bucket index, price or amount.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// A contract address needed by the operation is not configured.
    #[error("No {0} address configured")]
    MissingAddress(&'static str),

    /// A configuration value could not be parsed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The operation signs a transaction but the SDK has no signer.
    #[error("Operation requires a signer")]
    NoSigner,

    /// Caller supplied an argument the contracts would reject.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// No pool is deployed for the token pair.
    #[error("No pool found for collateral {collateral} and quote {quote}")]
    PoolNotFound { collateral: Address, quote: Address },

    /// The grant fund has no distribution period accepting proposals.
    #[error("There is no active distribution period")]
    NoActiveDistributionPeriod,

    /// JSON encoding failed.
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SdkError {
    /// Returns `true` when the contracts rejected the call.
    pub fn is_revert(&self) -> bool {
        matches!(self, Self::Contract(error) if error.is_revert())
    }
}

/// Result type alias for SDK operations.
pub type Result<T> = std::result::Result<T, SdkError>;

//! Transaction envelope: verify, submit and confirm a contract call.
//!
//! Every state-changing call made through this crate is wrapped in a
//! [`TransactionEnvelope`]. The envelope walks a small state machine:
//!
//! ```text
//! Prepared ──verify──▶ Estimated ──submit──▶ Submitted ──wait──▶ Confirmed
//!     │                    │                     │
//!     └────────────────────┴─────────────────────┴──────▶ Failed
//! ```
//!
//! Verification runs a gas estimate, which the node executes against current
//! state, so a call that would revert fails here before any gas is spent. A
//! failed envelope cannot be submitted. Submission uses twice the estimate as
//! the gas limit, capped at [`GAS_LIMIT_MAX`], to absorb state drift between
//! estimation and inclusion.
//!
//! # Example
//!
//! ```rust,ignore
//! let mut tx = pool.add_quote_token(amount, 2000, None).await?;
//! let gas = tx.verify().await?;
//! let receipt = tx.verify_and_submit().await?;
//! ```

use std::fmt;

use alloy::primitives::{Address, Selector, TxHash, U256};
use alloy::rpc::types::TransactionRequest;
use alloy::sol_types::SolCall;
use tracing::{debug, info, warn};

use crate::backend::{BackendError, ConfirmedReceipt, TransactionBackend};
use crate::error::{ContractError, Result};
use crate::revert::ErrorRegistry;

/// Factor applied to the gas estimate when submitting.
pub const GAS_MULTIPLIER: u64 = 2;

/// Upper bound on the computed gas limit.
pub const GAS_LIMIT_MAX: u64 = 1_500_000;

/// Gas limit submitted for a given estimate.
pub fn gas_limit_for(estimate: u64) -> u64 {
    estimate.saturating_mul(GAS_MULTIPLIER).min(GAS_LIMIT_MAX)
}

/// Lifecycle state of a [`TransactionEnvelope`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeState {
    Prepared,
    Estimated,
    Submitted,
    Confirmed,
    Failed,
}

impl fmt::Display for EnvelopeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Prepared => "Prepared",
            Self::Estimated => "Estimated",
            Self::Submitted => "Submitted",
            Self::Confirmed => "Confirmed",
            Self::Failed => "Failed",
        };
        f.write_str(name)
    }
}

/// A contract call with its transaction lifecycle.
///
/// Envelopes are single-owner: every transition takes `&mut self`, and
/// callers submitting several envelopes from one signer do so one at a time.
pub struct TransactionEnvelope<'a, B: TransactionBackend, C: SolCall> {
    backend: &'a B,
    errors: &'a ErrorRegistry,
    to: Address,
    call: C,
    value: U256,
    gas_limit_override: Option<u64>,
    estimated_gas: Option<u64>,
    tx_hash: Option<TxHash>,
    receipt: Option<B::Receipt>,
    state: EnvelopeState,
}

impl<B: TransactionBackend, C: SolCall> fmt::Debug for TransactionEnvelope<'_, B, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransactionEnvelope")
            .field("to", &self.to)
            .field("method", &C::SIGNATURE)
            .field("state", &self.state)
            .field("estimated_gas", &self.estimated_gas)
            .field("tx_hash", &self.tx_hash)
            .finish_non_exhaustive()
    }
}

impl<'a, B: TransactionBackend, C: SolCall> TransactionEnvelope<'a, B, C> {
    /// Wraps `call` to contract `to`.
    pub fn new(backend: &'a B, errors: &'a ErrorRegistry, to: Address, call: C) -> Self {
        Self {
            backend,
            errors,
            to,
            call,
            value: U256::ZERO,
            gas_limit_override: None,
            estimated_gas: None,
            tx_hash: None,
            receipt: None,
            state: EnvelopeState::Prepared,
        }
    }

    /// Attaches ETH to the call.
    pub fn with_value(mut self, value: U256) -> Self {
        self.value = value;
        self
    }

    /// Submits with exactly this gas limit instead of the computed one.
    /// Verification still runs before submission.
    pub fn with_gas_limit(mut self, gas_limit: u64) -> Self {
        self.gas_limit_override = Some(gas_limit);
        self
    }

    /// Consumes self and returns `(address, call)` for batching elsewhere.
    pub fn prepare(self) -> (Address, C) {
        (self.to, self.call)
    }

    /// Returns the target address for this call.
    pub fn to(&self) -> Address {
        self.to
    }

    /// Returns the typed call.
    pub fn call(&self) -> &C {
        &self.call
    }

    /// Returns the value (ETH) to send with this call.
    pub fn value(&self) -> U256 {
        self.value
    }

    pub fn state(&self) -> EnvelopeState {
        self.state
    }

    /// Gas estimate from the last successful [`verify`](Self::verify).
    pub fn estimated_gas(&self) -> Option<u64> {
        self.estimated_gas
    }

    /// Hash of the broadcast transaction, once submitted.
    pub fn tx_hash(&self) -> Option<TxHash> {
        self.tx_hash
    }

    /// Receipt, once confirmed.
    pub fn receipt(&self) -> Option<&B::Receipt> {
        self.receipt.as_ref()
    }

    /// Gas limit [`submit`](Self::submit) would use, if it can be known yet.
    pub fn gas_limit(&self) -> Option<u64> {
        self.gas_limit_override
            .or_else(|| self.estimated_gas.map(gas_limit_for))
    }

    /// The request sent for estimation; submission adds the gas limit.
    pub fn request(&self) -> TransactionRequest {
        let tx = TransactionRequest::default()
            .to(self.to)
            .input(self.call.abi_encode().into())
            .value(self.value);

        match self.backend.sender() {
            Some(from) => tx.from(from),
            None => tx,
        }
    }

    /// Estimates gas, simulating the call against current chain state.
    ///
    /// On success the envelope moves to `Estimated` and the estimate is
    /// returned. A revert moves it to `Failed` with the decoded reason.
    pub async fn verify(&mut self) -> Result<u64> {
        self.expect_state("verify", &[EnvelopeState::Prepared, EnvelopeState::Estimated])?;

        debug!(
            to = %self.to,
            selector = %Selector::from(C::SELECTOR),
            method = C::SIGNATURE,
            "Estimating gas"
        );

        match self.backend.estimate_gas(self.request()).await {
            Ok(gas) => {
                debug!(gas, gas_limit = gas_limit_for(gas), "Gas estimated");
                self.estimated_gas = Some(gas);
                self.state = EnvelopeState::Estimated;
                Ok(gas)
            }
            Err(BackendError::Revert(data)) => {
                let error = self.errors.decode(&data).into();
                Err(self.fail(error))
            }
            Err(BackendError::Transport(message)) => Err(self.fail(ContractError::Network(message))),
        }
    }

    /// Signs and broadcasts the transaction without waiting for it to be mined.
    ///
    /// From `Prepared` the call is verified first, so a reverting call is
    /// never broadcast.
    pub async fn submit(&mut self) -> Result<TxHash> {
        self.expect_state("submit", &[EnvelopeState::Prepared, EnvelopeState::Estimated])?;

        let estimate = match self.estimated_gas {
            Some(estimate) if self.state == EnvelopeState::Estimated => estimate,
            _ => self.verify().await?,
        };
        let gas_limit = self
            .gas_limit_override
            .unwrap_or_else(|| gas_limit_for(estimate));

        let tx = self.request().gas_limit(gas_limit);

        match self.backend.send_transaction(tx).await {
            Ok(tx_hash) => {
                info!(%tx_hash, to = %self.to, method = C::SIGNATURE, gas_limit, "Transaction submitted");
                self.tx_hash = Some(tx_hash);
                self.state = EnvelopeState::Submitted;
                Ok(tx_hash)
            }
            Err(BackendError::Revert(data)) => {
                let reason = ContractError::from(self.errors.decode(&data));
                Err(self.fail(ContractError::SubmissionFailed(reason.to_string())))
            }
            Err(error) => Err(self.fail(ContractError::SubmissionFailed(error.to_string()))),
        }
    }

    /// Waits until the submitted transaction has `confirmations` blocks on top
    /// of it, inclusive. There is no timeout: callers wanting one should wrap
    /// this future and treat expiry as an unknown outcome.
    pub async fn wait(&mut self, confirmations: u64) -> Result<B::Receipt> {
        self.expect_state("wait for", &[EnvelopeState::Submitted])?;

        let Some(tx_hash) = self.tx_hash else {
            return Err(ContractError::InvalidState {
                operation: "wait for",
                state: self.state,
            });
        };

        match self.backend.wait_for_receipt(tx_hash, confirmations).await {
            Ok(receipt) if receipt.succeeded() => {
                info!(%tx_hash, confirmations, "Transaction confirmed");
                self.receipt = Some(receipt.clone());
                self.state = EnvelopeState::Confirmed;
                Ok(receipt)
            }
            Ok(receipt) => {
                self.receipt = Some(receipt);
                Err(self.fail(ContractError::RevertedOnChain { tx_hash }))
            }
            Err(error) => Err(self.fail(ContractError::NotConfirmed {
                tx_hash,
                reason: error.to_string(),
            })),
        }
    }

    /// Verifies then submits, returning the transaction hash.
    pub async fn verify_and_submit_response(&mut self) -> Result<TxHash> {
        self.verify().await?;
        self.submit().await
    }

    /// Verifies, submits and waits for one confirmation.
    pub async fn verify_and_submit(&mut self) -> Result<B::Receipt> {
        self.verify_and_submit_response().await?;
        self.wait(1).await
    }

    fn expect_state(&self, operation: &'static str, allowed: &[EnvelopeState]) -> Result<()> {
        if allowed.contains(&self.state) {
            Ok(())
        } else {
            Err(ContractError::InvalidState {
                operation,
                state: self.state,
            })
        }
    }

    fn fail(&mut self, error: ContractError) -> ContractError {
        warn!(to = %self.to, method = C::SIGNATURE, from_state = %self.state, %error, "Transaction failed");
        self.state = EnvelopeState::Failed;
        error
    }
}

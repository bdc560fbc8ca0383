//! Contract bindings and transaction envelopes for Ajna pools.
//!
//! This crate provides Solidity bindings for the Ajna pool, factory, position
//! manager and grant fund contracts, a registry that turns revert data back
//! into error names, and [`TransactionEnvelope`], which gives every
//! state-changing call the same verify, submit, confirm lifecycle.
//!
//! # Example
//!
//! ```no_run
//! use ajna_rs_contracts::{ErrorRegistry, ProviderBackend, TransactionEnvelope};
//! use ajna_rs_contracts::pool::IPool;
//! use alloy::primitives::Address;
//!
//! #[tokio::main]
//! async fn main() -> ajna_rs_contracts::Result<()> {
//!     let backend = ProviderBackend::new(
//!         "http://localhost:8545",
//!         "0x...", // private key
//!     )?;
//!     let errors = ErrorRegistry::ajna();
//!
//!     let pool: Address = "0x...".parse().unwrap();
//!     let mut tx = TransactionEnvelope::new(&backend, &errors, pool, IPool::updateInterestCall {});
//!     let receipt = tx.verify_and_submit().await?;
//!
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod envelope;
pub mod erc20;
pub mod erc721;
pub mod error;
pub mod factory;
pub mod grant_fund;
pub mod multicall;
pub mod pool;
pub mod pool_info_utils;
pub mod position_manager;
pub mod provider;
pub mod revert;

pub use backend::{BackendError, ConfirmedReceipt, ProviderBackend, TransactionBackend};
pub use envelope::{gas_limit_for, EnvelopeState, TransactionEnvelope, GAS_LIMIT_MAX, GAS_MULTIPLIER};
pub use error::{ContractError, Result};
pub use multicall::MulticallBatch;
pub use provider::HttpProvider;
pub use revert::{ErrorRegistry, RevertReason};

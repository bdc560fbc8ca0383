//! Rust client for the Ajna lending protocol.
//!
//! [`AjnaSdk`] connects to a node and hands out typed clients for pools,
//! buckets, pool factories, the position manager and the grant fund. Reads
//! return plain serde-friendly structs. State-changing operations return a
//! [`Transaction`] envelope that is verified by gas estimation before it is
//! signed and broadcast.
//!
//! # Example
//!
//! ```no_run
//! use ajna_rs_sdk::{AjnaSdk, LendingPool, ProtocolConfig};
//! use ajna_rs_sdk::pricing::to_wad;
//!
//! #[tokio::main]
//! async fn main() -> ajna_rs_sdk::Result<()> {
//!     let config = ProtocolConfig::from_env()?;
//!     let sdk = AjnaSdk::new("http://localhost:8545", "0x...", config)?;
//!
//!     let collateral = "0x...".parse().unwrap();
//!     let quote = "0x...".parse().unwrap();
//!     let pool = sdk.factory()?.fungible_pool(collateral, quote).await?;
//!
//!     let amount = to_wad("100")?;
//!     pool.quote_approve(amount).verify_and_submit().await?;
//!
//!     let mut tx = pool.add_quote_token(amount, 2000, None).await?;
//!     tx.verify_and_submit().await?;
//!
//!     let position = pool.get_position(sdk.require_signer()?, 2000).await?;
//!     println!("LP balance: {}", position.lp_balance);
//!     Ok(())
//! }
//! ```

pub mod bucket;
pub mod client;
pub mod config;
pub mod error;
pub mod factory;
pub mod grant_fund;
pub mod pool;
pub mod position_manager;

pub use bucket::{Bucket, BucketStatus};
pub use client::{AjnaSdk, Transaction, DEFAULT_TTL};
pub use config::ProtocolConfig;
pub use error::{Result, SdkError};
pub use factory::{subset_hash, NftPoolFactory, PoolFactory};
pub use grant_fund::{
    DistributionPeriod, GrantFund, ProposalInfo, ProposalParams, ProposalRecipient, ProposalState,
};
pub use pool::{
    DebtInfo, FungiblePool, LenderInfo, LendingPool, Loan, LoansInfo, NonfungiblePool, PoolPrices,
    PoolStats, Position,
};
pub use position_manager::PositionManager;

// Re-export the lower layers so callers need a single dependency.
pub use ajna_rs_contracts as contracts;
pub use ajna_rs_pricing as pricing;
pub use alloy::rpc::types::TransactionReceipt;
pub use alloy_chains::NamedChain;
pub use ajna_rs_contracts::{ContractError, EnvelopeState, MulticallBatch};

//! Entry point tying a provider, the revert registry and the protocol
//! configuration together.

use ajna_rs_contracts::erc20::IERC20;
use ajna_rs_contracts::pool::IPool;
use ajna_rs_contracts::{
    ContractError, ErrorRegistry, HttpProvider, ProviderBackend, TransactionBackend,
    TransactionEnvelope,
};
use alloy::eips::BlockNumberOrTag;
use alloy::primitives::{Address, U256};
use alloy::providers::Provider;
use alloy::sol_types::SolCall;
use tracing::debug;

use crate::config::ProtocolConfig;
use crate::error::{Result, SdkError};
use crate::factory::{NftPoolFactory, PoolFactory};
use crate::grant_fund::GrantFund;
use crate::pool::{FungiblePool, NonfungiblePool};
use crate::position_manager::PositionManager;

/// Seconds added to the latest block timestamp for time-bounded calls.
pub const DEFAULT_TTL: u64 = 600;

/// Envelope type produced by every state-changing SDK operation.
pub type Transaction<'a, C> = TransactionEnvelope<'a, ProviderBackend, C>;

/// Client for one Ajna deployment.
///
/// Pools, buckets and the protocol-level contracts borrow the client, so
/// their envelopes share its provider and error registry.
pub struct AjnaSdk {
    backend: ProviderBackend,
    errors: ErrorRegistry,
    config: ProtocolConfig,
}

impl AjnaSdk {
    /// Connects with a signing key.
    pub fn new(rpc_url: &str, private_key: &str, config: ProtocolConfig) -> Result<Self> {
        Ok(Self::from_backend(
            ProviderBackend::new(rpc_url, private_key)?,
            config,
        ))
    }

    /// Connects without a signer. Reads and verification work; submission
    /// does not.
    pub fn read_only(rpc_url: &str, config: ProtocolConfig) -> Result<Self> {
        Ok(Self::from_backend(ProviderBackend::read_only(rpc_url)?, config))
    }

    pub fn from_backend(backend: ProviderBackend, config: ProtocolConfig) -> Self {
        Self {
            backend,
            errors: ErrorRegistry::ajna(),
            config,
        }
    }

    pub fn config(&self) -> &ProtocolConfig {
        &self.config
    }

    pub fn backend(&self) -> &ProviderBackend {
        &self.backend
    }

    pub fn provider(&self) -> &HttpProvider {
        self.backend.provider()
    }

    pub fn errors(&self) -> &ErrorRegistry {
        &self.errors
    }

    pub fn signer_address(&self) -> Option<Address> {
        self.backend.sender()
    }

    /// Signer address, for operations that name the caller in their arguments.
    pub fn require_signer(&self) -> Result<Address> {
        self.signer_address().ok_or(SdkError::NoSigner)
    }

    pub fn factory(&self) -> Result<PoolFactory<'_>> {
        Ok(PoolFactory::new(self, self.config.erc20_pool_factory()?))
    }

    pub fn nft_factory(&self) -> Result<NftPoolFactory<'_>> {
        Ok(NftPoolFactory::new(self, self.config.erc721_pool_factory()?))
    }

    pub fn position_manager(&self) -> Result<PositionManager<'_>> {
        Ok(PositionManager::new(self, self.config.position_manager()?))
    }

    pub fn grant_fund(&self) -> Result<GrantFund<'_>> {
        Ok(GrantFund::new(self, self.config.grant_fund()?))
    }

    pub fn pool_utils(&self) -> Result<Address> {
        self.config.pool_utils()
    }

    /// Loads an ERC20 pool by address, reading its token addresses.
    pub async fn fungible_pool(&self, address: Address) -> Result<FungiblePool<'_>> {
        let (collateral, quote) = self.pool_tokens(address).await?;
        Ok(FungiblePool::new(self, address, collateral, quote))
    }

    /// Loads an ERC721 pool by address, reading its token addresses.
    pub async fn nonfungible_pool(&self, address: Address) -> Result<NonfungiblePool<'_>> {
        let (collateral, quote) = self.pool_tokens(address).await?;
        Ok(NonfungiblePool::new(self, address, collateral, quote))
    }

    async fn pool_tokens(&self, pool: Address) -> Result<(Address, Address)> {
        let contract = IPool::new(pool, self.provider());
        let collateral = contract.collateralAddress();
        let quote = contract.quoteTokenAddress();

        let (collateral, quote) =
            futures::try_join!(async { collateral.call().await }, async { quote.call().await })
                .map_err(|e| self.call_error(&e))?;

        debug!(%pool, %collateral, %quote, "Loaded pool");
        Ok((collateral, quote))
    }

    /// Latest block timestamp plus `ttl` seconds ([`DEFAULT_TTL`] when unset).
    pub async fn expiry(&self, ttl: Option<u64>) -> Result<U256> {
        let block = self
            .provider()
            .get_block_by_number(BlockNumberOrTag::Latest)
            .await
            .map_err(|e| ContractError::Network(e.to_string()))?
            .ok_or_else(|| ContractError::Network("latest block unavailable".to_string()))?;

        let timestamp = block.header.timestamp;
        Ok(U256::from(timestamp.saturating_add(ttl.unwrap_or(DEFAULT_TTL))))
    }

    /// Wraps `call` to `to` in an envelope.
    pub fn transaction<C: SolCall>(&self, to: Address, call: C) -> Transaction<'_, C> {
        TransactionEnvelope::new(&self.backend, &self.errors, to, call)
    }

    /// ERC20 `approve(spender, amount)` on `token`.
    pub fn approve(
        &self,
        token: Address,
        spender: Address,
        amount: U256,
    ) -> Transaction<'_, IERC20::approveCall> {
        self.transaction(token, IERC20::approveCall { spender, amount })
    }

    pub(crate) fn call_error(&self, error: &alloy::contract::Error) -> SdkError {
        self.errors.call_error(error).into()
    }
}

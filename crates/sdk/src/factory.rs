//! Pool factories.
//!
//! Each factory deploys pools and remembers them by
//! `(subset hash, collateral, quote)`. ERC20 pools always use the non-subset
//! hash. ERC721 pools either accept a whole collection (non-subset hash) or a
//! fixed set of token ids, hashed with [`subset_hash`].

use ajna_rs_contracts::factory::{
    erc20_non_subset_hash, erc721_non_subset_hash, IERC20PoolFactory, IERC721PoolFactory,
};
use alloy::primitives::{keccak256, Address, B256, U256};
use alloy::sol_types::SolValue;
use tracing::debug;

use crate::client::{AjnaSdk, Transaction};
use crate::error::{Result, SdkError};
use crate::pool::{FungiblePool, NonfungiblePool};

/// Token ids in the order the ERC721 factory requires: strictly ascending.
pub fn sorted_token_ids(token_ids: &[U256]) -> Vec<U256> {
    let mut ids = token_ids.to_vec();
    ids.sort_unstable();
    ids.dedup();
    ids
}

/// Hash identifying an ERC721 pool restricted to `token_ids`, or the
/// collection-wide hash when `token_ids` is empty.
pub fn subset_hash(token_ids: &[U256]) -> B256 {
    if token_ids.is_empty() {
        return erc721_non_subset_hash();
    }
    keccak256(sorted_token_ids(token_ids).abi_encode())
}

/// Factory for pools with ERC20 collateral.
#[derive(Clone, Copy)]
pub struct PoolFactory<'a> {
    sdk: &'a AjnaSdk,
    address: Address,
}

impl<'a> PoolFactory<'a> {
    pub fn new(sdk: &'a AjnaSdk, address: Address) -> Self {
        Self { sdk, address }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Deploys a pool lending `quote` against `collateral` at the given
    /// initial interest rate (WAD).
    pub fn deploy_pool(
        &self,
        collateral: Address,
        quote: Address,
        interest_rate: U256,
    ) -> Transaction<'a, IERC20PoolFactory::deployPoolCall> {
        self.sdk.transaction(
            self.address,
            IERC20PoolFactory::deployPoolCall {
                collateral,
                quote,
                interestRate: interest_rate,
            },
        )
    }

    /// Address of the pool for the pair, or zero when none is deployed.
    pub async fn pool_address(&self, collateral: Address, quote: Address) -> Result<Address> {
        IERC20PoolFactory::new(self.address, self.sdk.provider())
            .deployedPools(erc20_non_subset_hash(), collateral, quote)
            .call()
            .await
            .map_err(|e| self.sdk.call_error(&e))
    }

    /// Loads the deployed pool for the pair.
    pub async fn fungible_pool(&self, collateral: Address, quote: Address) -> Result<FungiblePool<'a>> {
        let address = self.pool_address(collateral, quote).await?;
        if address.is_zero() {
            return Err(SdkError::PoolNotFound { collateral, quote });
        }

        debug!(pool = %address, %collateral, %quote, "Found pool");
        Ok(FungiblePool::new(self.sdk, address, collateral, quote))
    }
}

/// Factory for pools with ERC721 collateral.
#[derive(Clone, Copy)]
pub struct NftPoolFactory<'a> {
    sdk: &'a AjnaSdk,
    address: Address,
}

impl<'a> NftPoolFactory<'a> {
    pub fn new(sdk: &'a AjnaSdk, address: Address) -> Self {
        Self { sdk, address }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Deploys a pool for `collateral`. An empty `token_ids` accepts the whole
    /// collection; otherwise only those ids, which are sorted and deduplicated.
    pub fn deploy_pool(
        &self,
        collateral: Address,
        quote: Address,
        token_ids: &[U256],
        interest_rate: U256,
    ) -> Transaction<'a, IERC721PoolFactory::deployPoolCall> {
        self.sdk.transaction(
            self.address,
            IERC721PoolFactory::deployPoolCall {
                collateral,
                quote,
                tokenIds: sorted_token_ids(token_ids),
                interestRate: interest_rate,
            },
        )
    }

    pub async fn pool_address(
        &self,
        collateral: Address,
        quote: Address,
        token_ids: &[U256],
    ) -> Result<Address> {
        IERC721PoolFactory::new(self.address, self.sdk.provider())
            .deployedPools(subset_hash(token_ids), collateral, quote)
            .call()
            .await
            .map_err(|e| self.sdk.call_error(&e))
    }

    pub async fn nonfungible_pool(
        &self,
        collateral: Address,
        quote: Address,
        token_ids: &[U256],
    ) -> Result<NonfungiblePool<'a>> {
        let address = self.pool_address(collateral, quote, token_ids).await?;
        if address.is_zero() {
            return Err(SdkError::PoolNotFound { collateral, quote });
        }
        Ok(NonfungiblePool::new(self.sdk, address, collateral, quote))
    }
}

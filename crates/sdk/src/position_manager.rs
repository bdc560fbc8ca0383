//! Position manager: wraps a lender's LP in a pool into an ERC721 token.

use ajna_rs_contracts::position_manager::IPositionManager;
use alloy::primitives::{Address, B256, U256};

use crate::client::{AjnaSdk, Transaction};
use crate::error::Result;

#[derive(Clone, Copy)]
pub struct PositionManager<'a> {
    sdk: &'a AjnaSdk,
    address: Address,
}

impl<'a> PositionManager<'a> {
    pub fn new(sdk: &'a AjnaSdk, address: Address) -> Self {
        Self { sdk, address }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Mints a position token for `pool` to the signer. `pool_subset_hash` is
    /// the hash the pool was deployed under, see
    /// [`subset_hash`](crate::factory::subset_hash).
    pub fn mint(
        &self,
        pool: Address,
        pool_subset_hash: B256,
    ) -> Result<Transaction<'a, IPositionManager::mintCall>> {
        let params = IPositionManager::MintParams {
            recipient: self.sdk.require_signer()?,
            pool,
            poolSubsetHash: pool_subset_hash,
        };
        Ok(self
            .sdk
            .transaction(self.address, IPositionManager::mintCall { params }))
    }

    /// Burns a position token. Reverts with `LiquidityNotRemoved` while the
    /// token still tracks LP.
    pub fn burn(
        &self,
        token_id: U256,
        pool: Address,
    ) -> Transaction<'a, IPositionManager::burnCall> {
        let params = IPositionManager::BurnParams {
            tokenId: token_id,
            pool,
        };
        self.sdk
            .transaction(self.address, IPositionManager::burnCall { params })
    }

    /// Token metadata URI, a base64 JSON data URI with an SVG image.
    pub async fn token_uri(&self, token_id: U256) -> Result<String> {
        IPositionManager::new(self.address, self.sdk.provider())
            .tokenURI(token_id)
            .call()
            .await
            .map_err(|e| self.sdk.call_error(&e))
    }

    pub async fn owner_of(&self, token_id: U256) -> Result<Address> {
        IPositionManager::new(self.address, self.sdk.provider())
            .ownerOf(token_id)
            .call()
            .await
            .map_err(|e| self.sdk.call_error(&e))
    }
}

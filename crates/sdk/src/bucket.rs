//! A single price bucket of a pool.

use ajna_rs_contracts::pool::IPool;
use ajna_rs_contracts::pool_info_utils::IPoolInfoUtils;
use ajna_rs_contracts::HttpProvider;
use ajna_rs_pricing::index_to_price;
use alloy::primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::client::{AjnaSdk, Transaction};
use crate::error::Result;

/// Contents of a bucket as reported by the pool info utils contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketStatus {
    pub index: u32,
    pub price: U256,
    /// Quote token deposited in the bucket.
    pub deposit: U256,
    pub collateral: U256,
    #[serde(rename = "bucketLP")]
    pub bucket_lp: U256,
    /// Quote token value of one LP.
    pub exchange_rate: U256,
}

/// Bucket `index` of `pool`. Its price is fixed by the index.
#[derive(Clone, Copy)]
pub struct Bucket<'a> {
    sdk: &'a AjnaSdk,
    pool: Address,
    index: u32,
    price: U256,
}

impl<'a> Bucket<'a> {
    /// Fails when `index` lies outside the price grid.
    pub fn new(sdk: &'a AjnaSdk, pool: Address, index: u32) -> Result<Self> {
        Ok(Self {
            sdk,
            pool,
            index,
            price: index_to_price(index)?,
        })
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn price(&self) -> U256 {
        self.price
    }

    pub fn pool(&self) -> Address {
        self.pool
    }

    pub async fn get_status(&self) -> Result<BucketStatus> {
        let info = self
            .utils()?
            .bucketInfo(self.pool, U256::from(self.index))
            .call()
            .await
            .map_err(|e| self.sdk.call_error(&e))?;

        Ok(BucketStatus {
            index: self.index,
            price: info.price,
            deposit: info.quoteTokens,
            collateral: info.collateral,
            bucket_lp: info.bucketLP,
            exchange_rate: info.exchangeRate,
        })
    }

    /// Deposits `amount` of quote token into this bucket.
    pub async fn add_quote_token(
        &self,
        amount: U256,
        ttl: Option<u64>,
    ) -> Result<Transaction<'a, IPool::addQuoteTokenCall>> {
        let call = IPool::addQuoteTokenCall {
            amount,
            index: U256::from(self.index),
            expiry: self.sdk.expiry(ttl).await?,
        };
        Ok(self.sdk.transaction(self.pool, call))
    }

    /// Withdraws up to `max_amount`, or everything redeemable when `None`.
    pub fn remove_quote_token(
        &self,
        max_amount: Option<U256>,
    ) -> Transaction<'a, IPool::removeQuoteTokenCall> {
        let call = IPool::removeQuoteTokenCall {
            maxAmount: max_amount.unwrap_or(U256::MAX),
            index: U256::from(self.index),
        };
        self.sdk.transaction(self.pool, call)
    }

    /// Quote token redeemable for `lp` in this bucket.
    pub async fn lp_to_quote_tokens(&self, lp: U256) -> Result<U256> {
        self.utils()?
            .lpToQuoteTokens(self.pool, lp, U256::from(self.index))
            .call()
            .await
            .map_err(|e| self.sdk.call_error(&e))
    }

    /// Collateral redeemable for `lp` in this bucket.
    pub async fn lp_to_collateral(&self, lp: U256) -> Result<U256> {
        self.utils()?
            .lpToCollateral(self.pool, lp, U256::from(self.index))
            .call()
            .await
            .map_err(|e| self.sdk.call_error(&e))
    }

    fn utils(&self) -> Result<IPoolInfoUtils::IPoolInfoUtilsInstance<&'a HttpProvider>> {
        Ok(IPoolInfoUtils::new(self.sdk.pool_utils()?, self.sdk.provider()))
    }
}

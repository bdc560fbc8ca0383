//! Ajna pools.
//!
//! Lending behaves the same whatever the collateral, so it lives in the
//! [`LendingPool`] trait as default methods. [`FungiblePool`] and
//! [`NonfungiblePool`] add the borrower side, which differs in how collateral
//! is counted: token amounts for ERC20 pools, token ids for ERC721 pools.
//!
//! Transactions are returned as unsent [`Transaction`] envelopes. Bucket
//! indices are checked against the price grid before any call is built, so an
//! out-of-range index fails locally rather than on chain.

use ajna_rs_contracts::erc20::IERC20;
use ajna_rs_contracts::erc721::IERC721;
use ajna_rs_contracts::multicall::IMulticall;
use ajna_rs_contracts::pool::{IERC20Pool, IERC721Pool, IPool};
use ajna_rs_contracts::pool_info_utils::IPoolInfoUtils;
use ajna_rs_contracts::MulticallBatch;
use ajna_rs_pricing::{index_to_price, price_to_index};
use alloy::primitives::{Address, U256};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::bucket::Bucket;
use crate::client::{AjnaSdk, Transaction};
use crate::error::{Result, SdkError};

/// Lender's LP balance in one bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LenderInfo {
    pub lp_balance: U256,
    /// Unix time of the lender's last deposit into the bucket.
    pub deposit_time: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtInfo {
    /// Total debt including interest accrued up to now.
    pub debt: U256,
    /// Debt as of the last interest accrual.
    pub accrued_debt: U256,
    pub debt_in_auction: U256,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoansInfo {
    /// Borrower with the highest threshold price.
    pub max_borrower: Address,
    pub max_threshold_price: U256,
    pub no_of_loans: U256,
}

/// Reference prices of a pool, each with its bucket index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolPrices {
    /// Highest price bucket holding deposit.
    pub hpb: U256,
    pub hpb_index: u32,
    /// Highest threshold price among loans.
    pub htp: U256,
    pub htp_index: u32,
    /// Lowest utilized price.
    pub lup: U256,
    pub lup_index: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolStats {
    pub pool_size: U256,
    pub loans_count: U256,
    pub min_debt_amount: U256,
    pub collateralization: U256,
    pub actual_utilization: U256,
    pub target_utilization: U256,
    pub interest_rate: U256,
}

/// A lender's holding in one bucket, valued at the bucket's exchange rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub index: u32,
    pub lp_balance: U256,
    pub deposit_time: u64,
    pub deposit_redeemable: U256,
    pub collateral_redeemable: U256,
    /// Withdrawing the whole deposit would push the LUP below the HTP.
    pub insufficient_liquidity_for_withdraw: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Loan {
    pub debt: U256,
    pub collateral: U256,
    pub t0_neutral_price: U256,
    /// Threshold price as reported by the pool info contract.
    pub threshold_price: U256,
}

/// Checks `index` lies on the price grid and widens it for a call argument.
pub(crate) fn checked_index(index: u32) -> Result<U256> {
    index_to_price(index)?;
    Ok(U256::from(index))
}

fn index_from(value: U256) -> u32 {
    value.saturating_to()
}

/// Operations shared by every Ajna pool.
#[expect(async_fn_in_trait)]
pub trait LendingPool {
    fn sdk(&self) -> &AjnaSdk;

    fn address(&self) -> Address;

    fn collateral_address(&self) -> Address;

    fn quote_address(&self) -> Address;

    /// Allows the pool to pull `amount` of quote token from the signer.
    fn quote_approve(&self, amount: U256) -> Transaction<'_, IERC20::approveCall> {
        self.sdk()
            .approve(self.quote_address(), self.address(), amount)
    }

    /// Deposits `amount` of quote token into bucket `index`.
    async fn add_quote_token(
        &self,
        amount: U256,
        index: u32,
        ttl: Option<u64>,
    ) -> Result<Transaction<'_, IPool::addQuoteTokenCall>> {
        let index = checked_index(index)?;
        let expiry = self.sdk().expiry(ttl).await?;
        debug!(pool = %self.address(), %index, %amount, %expiry, "Building addQuoteToken");

        Ok(self.sdk().transaction(
            self.address(),
            IPool::addQuoteTokenCall {
                amount,
                index,
                expiry,
            },
        ))
    }

    /// Moves up to `max_amount` of deposit between buckets.
    async fn move_quote_token(
        &self,
        max_amount: U256,
        from_index: u32,
        to_index: u32,
        ttl: Option<u64>,
    ) -> Result<Transaction<'_, IPool::moveQuoteTokenCall>> {
        let call = IPool::moveQuoteTokenCall {
            maxAmount: max_amount,
            fromIndex: checked_index(from_index)?,
            toIndex: checked_index(to_index)?,
            expiry: self.sdk().expiry(ttl).await?,
        };
        Ok(self.sdk().transaction(self.address(), call))
    }

    /// Withdraws up to `max_amount` from bucket `index`; `None` withdraws
    /// everything the lender's LP can redeem.
    fn remove_quote_token(
        &self,
        max_amount: Option<U256>,
        index: u32,
    ) -> Result<Transaction<'_, IPool::removeQuoteTokenCall>> {
        Ok(self.sdk().transaction(
            self.address(),
            IPool::removeQuoteTokenCall {
                maxAmount: max_amount.unwrap_or(U256::MAX),
                index: checked_index(index)?,
            },
        ))
    }

    /// Accrues interest and updates the pool's rate.
    fn update_interest(&self) -> Transaction<'_, IPool::updateInterestCall> {
        self.sdk()
            .transaction(self.address(), IPool::updateInterestCall {})
    }

    /// Runs several pool calls atomically.
    fn multicall(&self, batch: MulticallBatch) -> Result<Transaction<'_, IMulticall::multicallCall>> {
        if batch.is_empty() {
            return Err(SdkError::InvalidArgument("multicall batch is empty".to_string()));
        }
        Ok(self.sdk().transaction(self.address(), batch.into_call()))
    }

    async fn lender_info(&self, index: u32, lender: Address) -> Result<LenderInfo> {
        let contract = IPool::new(self.address(), self.sdk().provider());
        let info = contract
            .lenderInfo(checked_index(index)?, lender)
            .call()
            .await
            .map_err(|e| self.sdk().call_error(&e))?;

        Ok(LenderInfo {
            lp_balance: info.lpBalance,
            deposit_time: info.depositTime.saturating_to(),
        })
    }

    async fn debt_info(&self) -> Result<DebtInfo> {
        let contract = IPool::new(self.address(), self.sdk().provider());
        let info = contract
            .debtInfo()
            .call()
            .await
            .map_err(|e| self.sdk().call_error(&e))?;

        Ok(DebtInfo {
            debt: info.debt,
            accrued_debt: info.accruedDebt,
            debt_in_auction: info.debtInAuction,
        })
    }

    async fn loans_info(&self) -> Result<LoansInfo> {
        let contract = IPool::new(self.address(), self.sdk().provider());
        let info = contract
            .loansInfo()
            .call()
            .await
            .map_err(|e| self.sdk().call_error(&e))?;

        Ok(LoansInfo {
            max_borrower: info.maxBorrower,
            max_threshold_price: info.maxThresholdPrice,
            no_of_loans: info.noOfLoans,
        })
    }

    /// Index of the bucket where cumulative deposit from the top covers `debt`.
    async fn deposit_index(&self, debt: U256) -> Result<u32> {
        let contract = IPool::new(self.address(), self.sdk().provider());
        let index = contract
            .depositIndex(debt)
            .call()
            .await
            .map_err(|e| self.sdk().call_error(&e))?;

        Ok(index_from(index))
    }

    async fn get_prices(&self) -> Result<PoolPrices> {
        let utils = IPoolInfoUtils::new(self.sdk().pool_utils()?, self.sdk().provider());
        let info = utils
            .poolPricesInfo(self.address())
            .call()
            .await
            .map_err(|e| self.sdk().call_error(&e))?;

        Ok(PoolPrices {
            hpb: info.hpb,
            hpb_index: index_from(info.hpbIndex),
            htp: info.htp,
            htp_index: index_from(info.htpIndex),
            lup: info.lup,
            lup_index: index_from(info.lupIndex),
        })
    }

    async fn get_stats(&self) -> Result<PoolStats> {
        let sdk = self.sdk();
        let utils = IPoolInfoUtils::new(sdk.pool_utils()?, sdk.provider());
        let pool = IPool::new(self.address(), sdk.provider());

        let loans = utils.poolLoansInfo(self.address());
        let utilization = utils.poolUtilizationInfo(self.address());
        let rate = pool.interestRateInfo();

        let (loans, utilization, rate) = futures::try_join!(
            async { loans.call().await },
            async { utilization.call().await },
            async { rate.call().await },
        )
        .map_err(|e| sdk.call_error(&e))?;

        Ok(PoolStats {
            pool_size: loans.poolSize,
            loans_count: loans.loansCount,
            min_debt_amount: utilization.poolMinDebtAmount,
            collateralization: utilization.poolCollateralization,
            actual_utilization: utilization.poolActualUtilization,
            target_utilization: utilization.poolTargetUtilization,
            interest_rate: rate.interestRate,
        })
    }

    /// Values `lender`'s LP in bucket `index`.
    async fn get_position(&self, lender: Address, index: u32) -> Result<Position> {
        let bucket = self.bucket_by_index(index)?;
        let (info, prices, debt) =
            futures::try_join!(self.lender_info(index, lender), self.get_prices(), self.debt_info())?;

        if info.lp_balance.is_zero() {
            return Ok(Position {
                index,
                lp_balance: U256::ZERO,
                deposit_time: info.deposit_time,
                deposit_redeemable: U256::ZERO,
                collateral_redeemable: U256::ZERO,
                insufficient_liquidity_for_withdraw: false,
            });
        }

        let (deposit, collateral) = futures::try_join!(
            bucket.lp_to_quote_tokens(info.lp_balance),
            bucket.lp_to_collateral(info.lp_balance),
        )?;

        let lup_index_after_withdrawal = self
            .deposit_index(debt.debt.saturating_add(deposit))
            .await?;

        Ok(Position {
            index,
            lp_balance: info.lp_balance,
            deposit_time: info.deposit_time,
            deposit_redeemable: deposit,
            collateral_redeemable: collateral,
            insufficient_liquidity_for_withdraw: lup_index_after_withdrawal > prices.htp_index,
        })
    }

    async fn get_loan(&self, borrower: Address) -> Result<Loan> {
        let sdk = self.sdk();
        let info = IPoolInfoUtils::new(sdk.pool_utils()?, sdk.provider())
            .borrowerInfo(self.address(), borrower)
            .call()
            .await
            .map_err(|e| sdk.call_error(&e))?;

        Ok(Loan {
            debt: info.debt,
            collateral: info.collateral,
            t0_neutral_price: info.t0Np,
            threshold_price: info.thresholdPrice,
        })
    }

    fn bucket_by_index(&self, index: u32) -> Result<Bucket<'_>> {
        Bucket::new(self.sdk(), self.address(), index)
    }

    /// Bucket whose price band contains `price`.
    fn bucket_by_price(&self, price: U256) -> Result<Bucket<'_>> {
        self.bucket_by_index(price_to_index(price)?)
    }

    /// Buckets priced within `[min_price, max_price]`, highest price first.
    fn buckets_in_price_range(&self, min_price: U256, max_price: U256) -> Result<Vec<Bucket<'_>>> {
        ajna_rs_pricing::buckets_in_price_range(min_price, max_price)?
            .into_iter()
            .map(|index| self.bucket_by_index(index))
            .collect()
    }
}

/// Pool with ERC20 collateral.
#[derive(Clone, Copy)]
pub struct FungiblePool<'a> {
    sdk: &'a AjnaSdk,
    address: Address,
    collateral: Address,
    quote: Address,
}

impl<'a> FungiblePool<'a> {
    pub fn new(sdk: &'a AjnaSdk, address: Address, collateral: Address, quote: Address) -> Self {
        Self {
            sdk,
            address,
            collateral,
            quote,
        }
    }

    /// Allows the pool to pull `amount` of collateral from the signer.
    pub fn collateral_approve(&self, amount: U256) -> Transaction<'a, IERC20::approveCall> {
        self.sdk.approve(self.collateral, self.address, amount)
    }

    /// Pledges `collateral_to_pledge` and borrows `amount` for the signer.
    /// Reverts with `LimitIndexExceeded` if the LUP would fall below the
    /// price of `limit_index`.
    pub fn draw_debt(
        &self,
        amount: U256,
        limit_index: u32,
        collateral_to_pledge: U256,
    ) -> Result<Transaction<'a, IERC20Pool::drawDebtCall>> {
        let call = IERC20Pool::drawDebtCall {
            borrower: self.sdk.require_signer()?,
            amountToBorrow: amount,
            limitIndex: checked_index(limit_index)?,
            collateralToPledge: collateral_to_pledge,
        };
        Ok(self.sdk.transaction(self.address, call))
    }

    /// Repays up to `max_quote_amount` and pulls `collateral_to_pull` back to
    /// the signer.
    pub fn repay_debt(
        &self,
        max_quote_amount: U256,
        collateral_to_pull: U256,
        limit_index: u32,
    ) -> Result<Transaction<'a, IERC20Pool::repayDebtCall>> {
        let signer = self.sdk.require_signer()?;
        let call = IERC20Pool::repayDebtCall {
            borrower: signer,
            maxQuoteTokenAmountToRepay: max_quote_amount,
            collateralAmountToPull: collateral_to_pull,
            collateralReceiver: signer,
            limitIndex: checked_index(limit_index)?,
        };
        Ok(self.sdk.transaction(self.address, call))
    }

    /// Deposits collateral into bucket `index` for LP.
    pub async fn add_collateral(
        &self,
        amount: U256,
        index: u32,
        ttl: Option<u64>,
    ) -> Result<Transaction<'a, IERC20Pool::addCollateralCall>> {
        let index = checked_index(index)?;
        let expiry = self.sdk.expiry(ttl).await?;
        let call = IERC20Pool::addCollateralCall {
            amountToAdd: amount,
            index,
            expiry,
        };
        Ok(self.sdk.transaction(self.address, call))
    }

    /// Redeems LP for up to `max_amount` of collateral in bucket `index`;
    /// `None` removes all the LP can claim.
    pub fn remove_collateral(
        &self,
        max_amount: Option<U256>,
        index: u32,
    ) -> Result<Transaction<'a, IERC20Pool::removeCollateralCall>> {
        let call = IERC20Pool::removeCollateralCall {
            maxAmount: max_amount.unwrap_or(U256::MAX),
            index: checked_index(index)?,
        };
        Ok(self.sdk.transaction(self.address, call))
    }
}

impl LendingPool for FungiblePool<'_> {
    fn sdk(&self) -> &AjnaSdk {
        self.sdk
    }

    fn address(&self) -> Address {
        self.address
    }

    fn collateral_address(&self) -> Address {
        self.collateral
    }

    fn quote_address(&self) -> Address {
        self.quote
    }
}

/// Pool with ERC721 collateral, either a whole collection or a subset of it.
#[derive(Clone, Copy)]
pub struct NonfungiblePool<'a> {
    sdk: &'a AjnaSdk,
    address: Address,
    collateral: Address,
    quote: Address,
}

impl<'a> NonfungiblePool<'a> {
    pub fn new(sdk: &'a AjnaSdk, address: Address, collateral: Address, quote: Address) -> Self {
        Self {
            sdk,
            address,
            collateral,
            quote,
        }
    }

    /// Allows the pool to take `token_id` from the signer.
    pub fn collateral_approve(&self, token_id: U256) -> Transaction<'a, IERC721::approveCall> {
        self.sdk.transaction(
            self.collateral,
            IERC721::approveCall {
                to: self.address,
                tokenId: token_id,
            },
        )
    }

    pub fn draw_debt(
        &self,
        amount: U256,
        limit_index: u32,
        token_ids: Vec<U256>,
    ) -> Result<Transaction<'a, IERC721Pool::drawDebtCall>> {
        let call = IERC721Pool::drawDebtCall {
            borrower: self.sdk.require_signer()?,
            amountToBorrow: amount,
            limitIndex: checked_index(limit_index)?,
            tokenIdsToPledge: token_ids,
        };
        Ok(self.sdk.transaction(self.address, call))
    }

    /// Repays up to `max_quote_amount` and pulls `nfts_to_pull` tokens back to
    /// the signer, most recently pledged first.
    pub fn repay_debt(
        &self,
        max_quote_amount: U256,
        nfts_to_pull: U256,
        limit_index: u32,
    ) -> Result<Transaction<'a, IERC721Pool::repayDebtCall>> {
        let signer = self.sdk.require_signer()?;
        let call = IERC721Pool::repayDebtCall {
            borrower: signer,
            maxQuoteTokenAmountToRepay: max_quote_amount,
            noOfNFTsToPull: nfts_to_pull,
            collateralReceiver: signer,
            limitIndex: checked_index(limit_index)?,
        };
        Ok(self.sdk.transaction(self.address, call))
    }

    pub async fn add_collateral(
        &self,
        token_ids: Vec<U256>,
        index: u32,
        ttl: Option<u64>,
    ) -> Result<Transaction<'a, IERC721Pool::addCollateralCall>> {
        if token_ids.is_empty() {
            return Err(SdkError::InvalidArgument("no token ids to add".to_string()));
        }
        let index = checked_index(index)?;
        let expiry = self.sdk.expiry(ttl).await?;
        let call = IERC721Pool::addCollateralCall {
            tokenIds: token_ids,
            index,
            expiry,
        };
        Ok(self.sdk.transaction(self.address, call))
    }

    pub fn remove_collateral(
        &self,
        nfts_to_remove: U256,
        index: u32,
    ) -> Result<Transaction<'a, IERC721Pool::removeCollateralCall>> {
        let call = IERC721Pool::removeCollateralCall {
            noOfNFTsToRemove: nfts_to_remove,
            index: checked_index(index)?,
        };
        Ok(self.sdk.transaction(self.address, call))
    }

    /// `true` when the pool accepts only a fixed set of token ids.
    pub async fn is_subset(&self) -> Result<bool> {
        IERC721Pool::new(self.address, self.sdk.provider())
            .isSubset()
            .call()
            .await
            .map_err(|e| self.sdk.call_error(&e))
    }
}

impl LendingPool for NonfungiblePool<'_> {
    fn sdk(&self) -> &AjnaSdk {
        self.sdk
    }

    fn address(&self) -> Address {
        self.address
    }

    fn collateral_address(&self) -> Address {
        self.collateral
    }

    fn quote_address(&self) -> Address {
        self.quote
    }
}

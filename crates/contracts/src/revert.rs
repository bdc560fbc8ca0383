//! Revert data decoding.
//!
//! Ajna contracts revert with argument-less custom errors. A revert only
//! carries the 4-byte selector of the error, so turning it back into a
//! readable name needs a table of every error the protocol can raise.
//! [`ErrorRegistry`] is that table; [`ErrorRegistry::ajna`] fills it from the
//! bindings in this crate.

use std::collections::HashMap;

use alloy::primitives::{Bytes, Selector};
use alloy::sol_types::{Panic, Revert, SolError};

use crate::error::ContractError;
use crate::factory::{IERC20PoolFactory, IERC721PoolFactory};
use crate::grant_fund::IGrantFund;
use crate::pool::{IERC721Pool, IPool};
use crate::position_manager::IPositionManager;

/// What a chunk of revert data decoded to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevertReason {
    /// A registered custom error, by signature (e.g. `NoClaim()`).
    Known(&'static str),
    /// `Error(string)` or `Panic(uint256)`.
    Message(String),
    /// Nothing registered matches. `selector` is `None` when the data is
    /// shorter than four bytes.
    Unknown {
        selector: Option<Selector>,
        data: Bytes,
    },
}

impl From<RevertReason> for ContractError {
    fn from(reason: RevertReason) -> Self {
        match reason {
            RevertReason::Known(name) => ContractError::Revert {
                name: name.to_string(),
            },
            RevertReason::Message(message) => ContractError::RevertMessage(message),
            RevertReason::Unknown { selector, data } => {
                ContractError::OpaqueRevert { selector, data }
            }
        }
    }
}

/// Registers each listed `SolError` type with a registry.
macro_rules! register_errors {
    ($registry:expr, $($error:ty),+ $(,)?) => {
        $( $registry.register::<$error>(); )+
    };
}

/// Maps error selectors to their signatures.
#[derive(Debug, Clone, Default)]
pub struct ErrorRegistry {
    signatures: HashMap<Selector, &'static str>,
}

impl ErrorRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry of every error raised by Ajna pools, factories, the position
    /// manager and the grant fund.
    pub fn ajna() -> Self {
        let mut registry = Self::new();
        registry.register_pool_errors();

        register_errors!(
            registry,
            IERC721Pool::OnlySubset,
            IERC20PoolFactory::DeployQuoteCollateralSameToken,
            IERC20PoolFactory::DeployWithZeroAddress,
            IERC20PoolFactory::PoolAlreadyExists,
            IERC20PoolFactory::PoolInterestRateInvalid,
            IERC721PoolFactory::NFTTokenArrayNotSorted,
            IPositionManager::AllowanceTooLow,
            IPositionManager::LiquidityNotRemoved,
            IPositionManager::NoAuth,
            IPositionManager::NotAjnaPool,
            IPositionManager::RemovePositionFailed,
            IPositionManager::WrongPool,
            IGrantFund::DistributionPeriodStillActive,
            IGrantFund::ExecuteProposalInvalid,
            IGrantFund::InsufficientBudget,
            IGrantFund::InsufficientVotingPower,
            IGrantFund::InvalidProposal,
            IGrantFund::InvalidVote,
            IGrantFund::ProposalAlreadyExists,
        );

        registry
    }

    /// Registry of the errors declared by the pool contract alone.
    pub fn pool() -> Self {
        let mut registry = Self::new();
        registry.register_pool_errors();
        registry
    }

    fn register_pool_errors(&mut self) {
        register_errors!(
            self,
            IPool::AddAboveAuctionPrice,
            IPool::AlreadyInitialized,
            IPool::AmountLTMinDebt,
            IPool::AuctionActive,
            IPool::AuctionNotCleared,
            IPool::AuctionPriceGtBucketPrice,
            IPool::BorrowerNotSender,
            IPool::BorrowerOk,
            IPool::BorrowerUnderCollateralized,
            IPool::BucketBankruptcyBlock,
            IPool::BucketIndexOutOfBounds,
            IPool::CannotMergeToHigherPrice,
            IPool::DustAmountNotExceeded,
            IPool::InsufficientCollateral,
            IPool::InsufficientLiquidity,
            IPool::InsufficientLP,
            IPool::InvalidAmount,
            IPool::InvalidIndex,
            IPool::LimitIndexExceeded,
            IPool::LUPBelowHTP,
            IPool::MoveToSameIndex,
            IPool::NoAllowance,
            IPool::NoAuction,
            IPool::NoClaim,
            IPool::NoDebt,
            IPool::NoReserves,
            IPool::NoReservesAuction,
            IPool::PriceBelowLUP,
            IPool::RemoveDepositLockedByAuctionDebt,
            IPool::ReserveAuctionTooSoon,
            IPool::TransactionExpired,
            IPool::TransferorNotApproved,
            IPool::TransferToSameOwner,
            IPool::ZeroThresholdPrice,
        );
    }

    /// Adds a custom error type.
    pub fn register<E: SolError>(&mut self) -> &mut Self {
        self.signatures
            .insert(Selector::from(E::SELECTOR), E::SIGNATURE);
        self
    }

    /// Signature registered for `selector`, if any.
    pub fn signature(&self, selector: Selector) -> Option<&'static str> {
        self.signatures.get(&selector).copied()
    }

    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }

    /// Decodes raw revert data. Never fails: anything unrecognized comes back
    /// as [`RevertReason::Unknown`] with the original bytes.
    pub fn decode(&self, data: &[u8]) -> RevertReason {
        let Some(selector) = data.get(..4).map(Selector::from_slice) else {
            return RevertReason::Unknown {
                selector: None,
                data: Bytes::copy_from_slice(data),
            };
        };

        if selector == Selector::from(Revert::SELECTOR) {
            if let Ok(revert) = Revert::abi_decode(data) {
                return RevertReason::Message(revert.reason);
            }
        }

        if selector == Selector::from(Panic::SELECTOR) {
            if let Ok(panic) = Panic::abi_decode(data) {
                let message = match panic.kind() {
                    Some(kind) => format!("panic: {kind}"),
                    None => format!("panic: code {}", panic.code),
                };
                return RevertReason::Message(message);
            }
        }

        match self.signature(selector) {
            Some(signature) => RevertReason::Known(signature),
            None => RevertReason::Unknown {
                selector: Some(selector),
                data: Bytes::copy_from_slice(data),
            },
        }
    }

    /// Converts a failed read call into a [`ContractError`], decoding revert
    /// data when the node returned some.
    pub fn call_error(&self, error: &alloy::contract::Error) -> ContractError {
        match error.as_revert_data() {
            Some(data) => self.decode(&data).into(),
            None => ContractError::Network(error.to_string()),
        }
    }
}

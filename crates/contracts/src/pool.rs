//! Ajna pool interface definitions.
//!
//! [`IPool`] carries the surface shared by fungible and non-fungible pools
//! along with the pool's custom errors. Collateral handling differs between
//! the two pool kinds and lives in [`IERC20Pool`] and [`IERC721Pool`].

use alloy::sol;

sol! {
    #[sol(rpc)]
    interface IPool {
        // Lender actions
        function addQuoteToken(uint256 amount, uint256 index, uint256 expiry) external returns (uint256 bucketLP);
        function moveQuoteToken(uint256 maxAmount, uint256 fromIndex, uint256 toIndex, uint256 expiry) external returns (uint256 fromBucketLP, uint256 toBucketLP, uint256 movedAmount);
        function removeQuoteToken(uint256 maxAmount, uint256 index) external returns (uint256 removedAmount, uint256 redeemedLP);
        function updateInterest() external;

        // State
        function collateralAddress() external view returns (address);
        function quoteTokenAddress() external view returns (address);
        function lenderInfo(uint256 index, address lender) external view returns (uint256 lpBalance, uint256 depositTime);
        function debtInfo() external view returns (uint256 debt, uint256 accruedDebt, uint256 debtInAuction);
        function loansInfo() external view returns (address maxBorrower, uint256 maxThresholdPrice, uint256 noOfLoans);
        function borrowerInfo(address borrower) external view returns (uint256 t0Debt, uint256 collateral, uint256 t0Np);
        function depositIndex(uint256 debt) external view returns (uint256);
        function interestRateInfo() external view returns (uint256 interestRate, uint256 interestRateUpdate);

        // Errors
        error AddAboveAuctionPrice();
        error AlreadyInitialized();
        error AmountLTMinDebt();
        error AuctionActive();
        error AuctionNotCleared();
        error AuctionPriceGtBucketPrice();
        error BorrowerNotSender();
        error BorrowerOk();
        error BorrowerUnderCollateralized();
        error BucketBankruptcyBlock();
        error BucketIndexOutOfBounds();
        error CannotMergeToHigherPrice();
        error DustAmountNotExceeded();
        error InsufficientCollateral();
        error InsufficientLiquidity();
        error InsufficientLP();
        error InvalidAmount();
        error InvalidIndex();
        error LimitIndexExceeded();
        error LUPBelowHTP();
        error MoveToSameIndex();
        error NoAllowance();
        error NoAuction();
        error NoClaim();
        error NoDebt();
        error NoReserves();
        error NoReservesAuction();
        error PriceBelowLUP();
        error RemoveDepositLockedByAuctionDebt();
        error ReserveAuctionTooSoon();
        error TransactionExpired();
        error TransferorNotApproved();
        error TransferToSameOwner();
        error ZeroThresholdPrice();
    }

    #[sol(rpc)]
    interface IERC20Pool {
        function drawDebt(address borrower, uint256 amountToBorrow, uint256 limitIndex, uint256 collateralToPledge) external;
        function repayDebt(address borrower, uint256 maxQuoteTokenAmountToRepay, uint256 collateralAmountToPull, address collateralReceiver, uint256 limitIndex) external;
        function addCollateral(uint256 amountToAdd, uint256 index, uint256 expiry) external returns (uint256 bucketLP);
        function removeCollateral(uint256 maxAmount, uint256 index) external returns (uint256 removedAmount, uint256 redeemedLP);
    }

    #[sol(rpc)]
    interface IERC721Pool {
        function drawDebt(address borrower, uint256 amountToBorrow, uint256 limitIndex, uint256[] tokenIdsToPledge) external;
        function repayDebt(address borrower, uint256 maxQuoteTokenAmountToRepay, uint256 noOfNFTsToPull, address collateralReceiver, uint256 limitIndex) external;
        function addCollateral(uint256[] tokenIds, uint256 index, uint256 expiry) external returns (uint256 bucketLP);
        function removeCollateral(uint256 noOfNFTsToRemove, uint256 index) external returns (uint256 collateralAmount, uint256 redeemedLP);
        function isSubset() external view returns (bool);

        error OnlySubset();
    }
}

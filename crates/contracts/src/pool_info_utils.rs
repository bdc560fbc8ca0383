//! Read-only pool statistics contract.

use alloy::sol;

sol! {
    #[sol(rpc)]
    interface IPoolInfoUtils {
        function poolPricesInfo(address pool) external view returns (uint256 hpb, uint256 hpbIndex, uint256 htp, uint256 htpIndex, uint256 lup, uint256 lupIndex);
        function poolLoansInfo(address pool) external view returns (uint256 poolSize, uint256 loansCount, address maxBorrower, uint256 pendingInflator, uint256 pendingInterestFactor);
        function poolUtilizationInfo(address pool) external view returns (uint256 poolMinDebtAmount, uint256 poolCollateralization, uint256 poolActualUtilization, uint256 poolTargetUtilization);
        function borrowerInfo(address pool, address borrower) external view returns (uint256 debt, uint256 collateral, uint256 t0Np, uint256 thresholdPrice);
        function bucketInfo(address pool, uint256 index) external view returns (uint256 price, uint256 quoteTokens, uint256 collateral, uint256 bucketLP, uint256 scale, uint256 exchangeRate);
        function lpToQuoteTokens(address pool, uint256 lp, uint256 index) external view returns (uint256);
        function lpToCollateral(address pool, uint256 lp, uint256 index) external view returns (uint256);
    }
}

//! Pool factory interface definitions.

use alloy::primitives::{keccak256, B256};
use alloy::sol;

sol! {
    #[sol(rpc)]
    interface IERC20PoolFactory {
        function deployPool(address collateral, address quote, uint256 interestRate) external returns (address pool);
        function deployedPools(bytes32 subsetHash, address collateral, address quote) external view returns (address);

        error DeployQuoteCollateralSameToken();
        error DeployWithZeroAddress();
        error PoolAlreadyExists();
        error PoolInterestRateInvalid();
    }

    #[sol(rpc)]
    interface IERC721PoolFactory {
        function deployPool(address collateral, address quote, uint256[] tokenIds, uint256 interestRate) external returns (address pool);
        function deployedPools(bytes32 subsetHash, address collateral, address quote) external view returns (address);
        function getNFTSubsetHash(uint256[] tokenIds) external pure returns (bytes32);

        error NFTTokenArrayNotSorted();
    }
}

/// Subset hash under which every fungible pool is registered.
pub fn erc20_non_subset_hash() -> B256 {
    keccak256("ERC20_NON_SUBSET_HASH")
}

/// Subset hash of NFT pools accepting any token of a collection.
pub fn erc721_non_subset_hash() -> B256 {
    keccak256("ERC721_NON_SUBSET_HASH")
}

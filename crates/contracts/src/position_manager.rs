//! Position manager interface definitions.

use alloy::sol;

sol! {
    #[sol(rpc)]
    interface IPositionManager {
        struct MintParams {
            address recipient;
            address pool;
            bytes32 poolSubsetHash;
        }

        struct BurnParams {
            uint256 tokenId;
            address pool;
        }

        function mint(MintParams calldata params) external returns (uint256 tokenId);
        function burn(BurnParams calldata params) external;
        function tokenURI(uint256 tokenId) external view returns (string);
        function ownerOf(uint256 tokenId) external view returns (address);

        error AllowanceTooLow();
        error LiquidityNotRemoved();
        error NoAuth();
        error NotAjnaPool();
        error RemovePositionFailed();
        error WrongPool();
    }
}

//! ERC721 interface definitions.

use alloy::sol;

sol! {
    #[sol(rpc)]
    interface IERC721 {
        function approve(address to, uint256 tokenId) external;
        function setApprovalForAll(address operator, bool approved) external;
        function getApproved(uint256 tokenId) external view returns (address);
        function isApprovedForAll(address owner, address operator) external view returns (bool);
        function ownerOf(uint256 tokenId) external view returns (address);
        function balanceOf(address owner) external view returns (uint256);
        function name() external view returns (string);
        function symbol() external view returns (string);
    }
}

//! Grant fund interface definitions.

use alloy::sol;

sol! {
    #[sol(rpc)]
    interface IGrantFund {
        function startNewDistributionPeriod() external returns (uint24 newDistributionId);
        function getDistributionId() external view returns (uint24);
        function getDistributionPeriodInfo(uint24 distributionId) external view returns (uint24 id, uint256 startBlock, uint256 endBlock, uint128 fundsAvailable, uint256 fundingVotePowerCast, bytes32 fundedSlateHash);
        function propose(address[] targets, uint256[] values, bytes[] calldatas, string description) external returns (uint256 proposalId);
        function getProposalInfo(uint256 proposalId) external view returns (uint256 id, uint24 distributionId, uint128 votesReceived, uint128 tokensRequested, int128 fundingVotesReceived, bool executed);
        function state(uint256 proposalId) external view returns (uint8);

        error DistributionPeriodStillActive();
        error ExecuteProposalInvalid();
        error InsufficientBudget();
        error InsufficientVotingPower();
        error InvalidProposal();
        error InvalidVote();
        error ProposalAlreadyExists();
    }
}

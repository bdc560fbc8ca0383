//! Ajna grant fund: distribution periods and funding proposals.
//!
//! Proposals ask the fund to transfer AJNA to one or more recipients. On
//! chain a proposal is a list of `transfer` calls against the AJNA token plus
//! a free-form description; this client writes the description as JSON so
//! front ends can recover the title and links.

use std::fmt;

use ajna_rs_contracts::erc20::IERC20;
use ajna_rs_contracts::grant_fund::IGrantFund;
use ajna_rs_contracts::ContractError;
use alloy::primitives::aliases::U24;
use alloy::primitives::{Address, Bytes, B256, U256};
use alloy::providers::Provider;
use alloy::sol_types::SolCall;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::client::{AjnaSdk, Transaction};
use crate::error::{Result, SdkError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributionPeriod {
    pub id: u32,
    pub start_block: u64,
    pub end_block: u64,
    pub funds_available: U256,
    pub funding_vote_power_cast: U256,
    pub funded_slate_hash: B256,
}

impl DistributionPeriod {
    /// `true` while `block` falls within the period.
    pub fn is_active_at(&self, block: u64) -> bool {
        self.id != 0 && self.start_block <= block && block <= self.end_block
    }
}

/// One AJNA transfer requested by a proposal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalRecipient {
    pub address: Address,
    /// AJNA amount in WAD.
    pub amount: U256,
}

/// Funding proposal contents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalParams {
    pub title: String,
    pub recipients: Vec<ProposalRecipient>,
    pub external_link: Option<String>,
    pub ipfs_hash: Option<String>,
    pub arweave_txid: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProposalDescription<'a> {
    title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    external_link: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ipfs_hash: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    arweave_txid: Option<&'a str>,
}

impl ProposalParams {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_recipient(mut self, address: Address, amount: U256) -> Self {
        self.recipients.push(ProposalRecipient { address, amount });
        self
    }

    pub fn with_external_link(mut self, link: impl Into<String>) -> Self {
        self.external_link = Some(link.into());
        self
    }

    pub fn with_ipfs_hash(mut self, hash: impl Into<String>) -> Self {
        self.ipfs_hash = Some(hash.into());
        self
    }

    pub fn with_arweave_txid(mut self, txid: impl Into<String>) -> Self {
        self.arweave_txid = Some(txid.into());
        self
    }

    /// Total AJNA requested.
    pub fn tokens_requested(&self) -> U256 {
        self.recipients
            .iter()
            .fold(U256::ZERO, |total, r| total.saturating_add(r.amount))
    }

    /// On-chain description: the title and links as JSON.
    pub fn description(&self) -> Result<String> {
        Ok(serde_json::to_string(&ProposalDescription {
            title: &self.title,
            external_link: self.external_link.as_deref(),
            ipfs_hash: self.ipfs_hash.as_deref(),
            arweave_txid: self.arweave_txid.as_deref(),
        })?)
    }

    fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(SdkError::InvalidArgument("proposal title is empty".to_string()));
        }
        if self.recipients.is_empty() {
            return Err(SdkError::InvalidArgument("proposal has no recipients".to_string()));
        }
        if let Some(r) = self.recipients.iter().find(|r| r.amount.is_zero()) {
            return Err(SdkError::InvalidArgument(format!(
                "proposal requests nothing for {}",
                r.address
            )));
        }
        Ok(())
    }
}

/// Governor proposal state, in the order the contract numbers them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProposalState {
    Pending,
    Active,
    Canceled,
    Defeated,
    Succeeded,
    Queued,
    Expired,
    Executed,
}

impl TryFrom<u8> for ProposalState {
    type Error = SdkError;

    fn try_from(value: u8) -> Result<Self> {
        Ok(match value {
            0 => Self::Pending,
            1 => Self::Active,
            2 => Self::Canceled,
            3 => Self::Defeated,
            4 => Self::Succeeded,
            5 => Self::Queued,
            6 => Self::Expired,
            7 => Self::Executed,
            other => {
                return Err(SdkError::InvalidArgument(format!(
                    "unknown proposal state {other}"
                )))
            }
        })
    }
}

impl fmt::Display for ProposalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalInfo {
    pub proposal_id: U256,
    pub distribution_id: u32,
    pub votes_received: U256,
    pub tokens_requested: U256,
    pub funding_votes_received: i128,
    pub executed: bool,
}

#[derive(Clone, Copy)]
pub struct GrantFund<'a> {
    sdk: &'a AjnaSdk,
    address: Address,
}

impl<'a> GrantFund<'a> {
    pub fn new(sdk: &'a AjnaSdk, address: Address) -> Self {
        Self { sdk, address }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Starts the next distribution period. Reverts with
    /// `DistributionPeriodStillActive` while the current one runs.
    pub fn start_new_distribution_period(
        &self,
    ) -> Transaction<'a, IGrantFund::startNewDistributionPeriodCall> {
        self.sdk
            .transaction(self.address, IGrantFund::startNewDistributionPeriodCall {})
    }

    pub async fn distribution_period(&self, distribution_id: u32) -> Result<DistributionPeriod> {
        let id = U24::try_from(distribution_id).map_err(|_| {
            SdkError::InvalidArgument(format!("distribution id {distribution_id} exceeds uint24"))
        })?;
        let info = IGrantFund::new(self.address, self.sdk.provider())
            .getDistributionPeriodInfo(id)
            .call()
            .await
            .map_err(|e| self.sdk.call_error(&e))?;

        Ok(DistributionPeriod {
            id: info.id.saturating_to(),
            start_block: info.startBlock.saturating_to(),
            end_block: info.endBlock.saturating_to(),
            funds_available: U256::from(info.fundsAvailable),
            funding_vote_power_cast: info.fundingVotePowerCast,
            funded_slate_hash: info.fundedSlateHash,
        })
    }

    /// The distribution period covering the latest block.
    pub async fn active_distribution_period(&self) -> Result<DistributionPeriod> {
        let contract = IGrantFund::new(self.address, self.sdk.provider());
        let id = contract
            .getDistributionId()
            .call()
            .await
            .map_err(|e| self.sdk.call_error(&e))?;

        let id: u32 = id.saturating_to();
        if id == 0 {
            return Err(SdkError::NoActiveDistributionPeriod);
        }

        let period = self.distribution_period(id).await?;
        let block = self
            .sdk
            .provider()
            .get_block_number()
            .await
            .map_err(|e| ContractError::Network(e.to_string()))?;

        if !period.is_active_at(block) {
            debug!(id, block, end_block = period.end_block, "Distribution period has ended");
            return Err(SdkError::NoActiveDistributionPeriod);
        }
        Ok(period)
    }

    /// Proposes transferring AJNA to `params.recipients`.
    pub fn propose(&self, params: &ProposalParams) -> Result<Transaction<'a, IGrantFund::proposeCall>> {
        params.validate()?;
        let token = self.sdk.config().ajna_token()?;

        let calldatas = params
            .recipients
            .iter()
            .map(|r| {
                Bytes::from(
                    IERC20::transferCall {
                        to: r.address,
                        amount: r.amount,
                    }
                    .abi_encode(),
                )
            })
            .collect::<Vec<_>>();

        let call = IGrantFund::proposeCall {
            targets: vec![token; calldatas.len()],
            values: vec![U256::ZERO; calldatas.len()],
            calldatas,
            description: params.description()?,
        };
        Ok(self.sdk.transaction(self.address, call))
    }

    pub async fn proposal_info(&self, proposal_id: U256) -> Result<ProposalInfo> {
        let info = IGrantFund::new(self.address, self.sdk.provider())
            .getProposalInfo(proposal_id)
            .call()
            .await
            .map_err(|e| self.sdk.call_error(&e))?;

        Ok(ProposalInfo {
            proposal_id: info.id,
            distribution_id: info.distributionId.saturating_to(),
            votes_received: U256::from(info.votesReceived),
            tokens_requested: U256::from(info.tokensRequested),
            funding_votes_received: info.fundingVotesReceived,
            executed: info.executed,
        })
    }

    pub async fn proposal_state(&self, proposal_id: U256) -> Result<ProposalState> {
        let state = IGrantFund::new(self.address, self.sdk.provider())
            .state(proposal_id)
            .call()
            .await
            .map_err(|e| self.sdk.call_error(&e))?;

        ProposalState::try_from(state)
    }
}

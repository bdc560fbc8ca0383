//! Protocol configuration.
//!
//! Ajna is deployed at different addresses on every chain. A
//! [`ProtocolConfig`] holds the addresses for one deployment. It is built once,
//! either in code or from `AJNA_*` environment variables, and handed to
//! [`AjnaSdk`](crate::AjnaSdk). Addresses are optional so that a client
//! touching only pools does not have to configure the grant fund; asking for
//! an address that was never set fails with [`SdkError::MissingAddress`].

use std::str::FromStr;

use alloy_chains::NamedChain;
use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SdkError};

pub const ENV_ERC20_POOL_FACTORY: &str = "AJNA_CONTRACT_ERC20_POOL_FACTORY";
pub const ENV_ERC721_POOL_FACTORY: &str = "AJNA_CONTRACT_ERC721_POOL_FACTORY";
pub const ENV_POOL_UTILS: &str = "AJNA_POOL_UTILS";
pub const ENV_POSITION_MANAGER: &str = "AJNA_POSITION_MANAGER";
pub const ENV_AJNA_TOKEN: &str = "AJNA_TOKEN_ADDRESS";
pub const ENV_GRANT_FUND: &str = "AJNA_GRANT_FUND";
pub const ENV_CHAIN_ID: &str = "AJNA_CHAIN_ID";

/// Contract addresses of one Ajna deployment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolConfig {
    pub erc20_pool_factory: Option<Address>,
    pub erc721_pool_factory: Option<Address>,
    pub pool_utils: Option<Address>,
    pub position_manager: Option<Address>,
    pub ajna_token: Option<Address>,
    pub grant_fund: Option<Address>,
    pub chain: Option<NamedChain>,
}

impl ProtocolConfig {
    /// Create an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads addresses from the `AJNA_*` environment variables. Unset and
    /// empty variables leave the address unset.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads addresses through `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let address = |key: &str| -> Result<Option<Address>> {
            match lookup(key).filter(|value| !value.trim().is_empty()) {
                Some(value) => Address::from_str(value.trim())
                    .map(Some)
                    .map_err(|_| SdkError::InvalidConfig(format!("{key}={value} is not an address"))),
                None => Ok(None),
            }
        };

        let chain = match lookup(ENV_CHAIN_ID).filter(|value| !value.trim().is_empty()) {
            Some(value) => Some(parse_chain(&value)?),
            None => None,
        };

        Ok(Self {
            erc20_pool_factory: address(ENV_ERC20_POOL_FACTORY)?,
            erc721_pool_factory: address(ENV_ERC721_POOL_FACTORY)?,
            pool_utils: address(ENV_POOL_UTILS)?,
            position_manager: address(ENV_POSITION_MANAGER)?,
            ajna_token: address(ENV_AJNA_TOKEN)?,
            grant_fund: address(ENV_GRANT_FUND)?,
            chain,
        })
    }

    pub fn with_erc20_pool_factory(mut self, address: Address) -> Self {
        self.erc20_pool_factory = Some(address);
        self
    }

    pub fn with_erc721_pool_factory(mut self, address: Address) -> Self {
        self.erc721_pool_factory = Some(address);
        self
    }

    pub fn with_pool_utils(mut self, address: Address) -> Self {
        self.pool_utils = Some(address);
        self
    }

    pub fn with_position_manager(mut self, address: Address) -> Self {
        self.position_manager = Some(address);
        self
    }

    pub fn with_ajna_token(mut self, address: Address) -> Self {
        self.ajna_token = Some(address);
        self
    }

    pub fn with_grant_fund(mut self, address: Address) -> Self {
        self.grant_fund = Some(address);
        self
    }

    pub fn with_chain(mut self, chain: NamedChain) -> Self {
        self.chain = Some(chain);
        self
    }

    pub fn erc20_pool_factory(&self) -> Result<Address> {
        self.erc20_pool_factory
            .ok_or(SdkError::MissingAddress("ERC20 pool factory"))
    }

    pub fn erc721_pool_factory(&self) -> Result<Address> {
        self.erc721_pool_factory
            .ok_or(SdkError::MissingAddress("ERC721 pool factory"))
    }

    pub fn pool_utils(&self) -> Result<Address> {
        self.pool_utils
            .ok_or(SdkError::MissingAddress("pool info utils"))
    }

    pub fn position_manager(&self) -> Result<Address> {
        self.position_manager
            .ok_or(SdkError::MissingAddress("position manager"))
    }

    pub fn ajna_token(&self) -> Result<Address> {
        self.ajna_token.ok_or(SdkError::MissingAddress("AJNA token"))
    }

    pub fn grant_fund(&self) -> Result<Address> {
        self.grant_fund.ok_or(SdkError::MissingAddress("grant fund"))
    }
}

fn parse_chain(value: &str) -> Result<NamedChain> {
    let value = value.trim();
    if let Ok(id) = value.parse::<u64>() {
        return NamedChain::try_from(id)
            .map_err(|_| SdkError::InvalidConfig(format!("{ENV_CHAIN_ID}={id} is not a known chain")));
    }
    NamedChain::from_str(value)
        .map_err(|_| SdkError::InvalidConfig(format!("{ENV_CHAIN_ID}={value} is not a known chain")))
}

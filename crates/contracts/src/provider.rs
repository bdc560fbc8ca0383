//! Provider construction for contract clients.

use alloy::{
    network::EthereumWallet,
    primitives::Address,
    providers::{DynProvider, Provider, ProviderBuilder},
    signers::local::PrivateKeySigner,
};

use crate::error::{ContractError, Result};

/// The type-erased HTTP provider shared by every client in this crate.
pub type HttpProvider = DynProvider;

/// Parses an RPC endpoint.
pub fn parse_rpc_url(rpc_url: &str) -> Result<url::Url> {
    rpc_url
        .parse()
        .map_err(|e| ContractError::RpcConnection(format!("{}", e)))
}

/// Parses a hex-encoded private key.
pub fn parse_signer(private_key: &str) -> Result<PrivateKeySigner> {
    private_key
        .parse()
        .map_err(|_| ContractError::InvalidPrivateKey)
}

/// Connects a provider that signs with `private_key`, returning it with the
/// signer's address.
pub fn connect_with_signer(rpc_url: &str, private_key: &str) -> Result<(HttpProvider, Address)> {
    let signer = parse_signer(private_key)?;
    let signer_address = signer.address();
    let wallet = EthereumWallet::from(signer);
    let url = parse_rpc_url(rpc_url)?;

    let provider = ProviderBuilder::new()
        .wallet(wallet)
        .connect_http(url)
        .erased();

    Ok((provider, signer_address))
}

/// Connects a provider that can only read.
pub fn connect_read_only(rpc_url: &str) -> Result<HttpProvider> {
    let url = parse_rpc_url(rpc_url)?;
    Ok(ProviderBuilder::new().connect_http(url).erased())
}

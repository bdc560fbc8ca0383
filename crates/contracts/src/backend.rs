//! The network side of a transaction envelope.
//!
//! [`TransactionEnvelope`](crate::TransactionEnvelope) only needs four things
//! from a node: who is signing, a gas estimate, a way to broadcast, and a way
//! to wait for the receipt. [`TransactionBackend`] names those, and
//! [`ProviderBackend`] provides them over an alloy HTTP provider.

use alloy::{
    network::ReceiptResponse,
    primitives::{Address, Bytes, TxHash},
    providers::{PendingTransactionBuilder, Provider},
    rpc::types::{TransactionReceipt, TransactionRequest},
    transports::TransportError,
};
use thiserror::Error;

use crate::error::Result;
use crate::provider::{connect_read_only, connect_with_signer, HttpProvider};

/// A mined transaction receipt.
pub trait ConfirmedReceipt {
    /// `false` when the transaction was mined but reverted.
    fn succeeded(&self) -> bool;
}

impl ConfirmedReceipt for TransactionReceipt {
    fn succeeded(&self) -> bool {
        ReceiptResponse::status(self)
    }
}

/// Failure reported by a backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// Execution reverted with the given data.
    #[error("execution reverted")]
    Revert(Bytes),

    /// Anything else: connection failures, malformed responses, rejected
    /// transactions.
    #[error("{0}")]
    Transport(String),
}

impl BackendError {
    /// Separates revert data from other RPC failures.
    pub fn from_transport(error: TransportError) -> Self {
        if let Some(payload) = error.as_error_resp() {
            if let Some(data) = payload.as_revert_data() {
                return Self::Revert(data);
            }
            if payload.message.contains("execution reverted") {
                return Self::Revert(Bytes::new());
            }
        }
        Self::Transport(error.to_string())
    }
}

/// Node operations a transaction envelope relies on.
#[expect(async_fn_in_trait)]
pub trait TransactionBackend {
    type Receipt: ConfirmedReceipt + Clone;

    /// Address transactions are sent from, if the backend can sign.
    fn sender(&self) -> Option<Address>;

    async fn estimate_gas(&self, tx: TransactionRequest) -> std::result::Result<u64, BackendError>;

    async fn send_transaction(
        &self,
        tx: TransactionRequest,
    ) -> std::result::Result<TxHash, BackendError>;

    async fn wait_for_receipt(
        &self,
        tx_hash: TxHash,
        confirmations: u64,
    ) -> std::result::Result<Self::Receipt, BackendError>;
}

/// [`TransactionBackend`] over an HTTP JSON-RPC endpoint.
#[derive(Clone)]
pub struct ProviderBackend {
    provider: HttpProvider,
    signer_address: Option<Address>,
}

impl ProviderBackend {
    /// Creates a backend that signs with `private_key`.
    pub fn new(rpc_url: &str, private_key: &str) -> Result<Self> {
        let (provider, signer_address) = connect_with_signer(rpc_url, private_key)?;
        Ok(Self {
            provider,
            signer_address: Some(signer_address),
        })
    }

    /// Creates a backend without a signer. Reads and gas estimates work;
    /// submissions are rejected by the node.
    pub fn read_only(rpc_url: &str) -> Result<Self> {
        Ok(Self {
            provider: connect_read_only(rpc_url)?,
            signer_address: None,
        })
    }

    /// Wraps an existing provider.
    pub fn from_provider(provider: HttpProvider, signer_address: Option<Address>) -> Self {
        Self {
            provider,
            signer_address,
        }
    }

    /// Returns a reference to the HTTP provider.
    pub fn provider(&self) -> &HttpProvider {
        &self.provider
    }
}

impl TransactionBackend for ProviderBackend {
    type Receipt = TransactionReceipt;

    fn sender(&self) -> Option<Address> {
        self.signer_address
    }

    async fn estimate_gas(&self, tx: TransactionRequest) -> std::result::Result<u64, BackendError> {
        self.provider
            .estimate_gas(tx)
            .await
            .map_err(BackendError::from_transport)
    }

    async fn send_transaction(
        &self,
        tx: TransactionRequest,
    ) -> std::result::Result<TxHash, BackendError> {
        let pending = self
            .provider
            .send_transaction(tx)
            .await
            .map_err(BackendError::from_transport)?;
        Ok(*pending.tx_hash())
    }

    async fn wait_for_receipt(
        &self,
        tx_hash: TxHash,
        confirmations: u64,
    ) -> std::result::Result<TransactionReceipt, BackendError> {
        PendingTransactionBuilder::new(self.provider.root().clone(), tx_hash)
            .with_required_confirmations(confirmations)
            .get_receipt()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))
    }
}

//! Blockchain client seam used by the async helpers, plus an alloy provider
//! implementation for unlocked-account devnets.

use std::sync::Arc;

use alloy_network::{Ethereum, ReceiptResponse};
use alloy_primitives::{Address, Bytes, U256};
use alloy_provider::{Provider, RootProvider};
use alloy_rpc_client::RpcClient as AlloyRpcClient;
use alloy_rpc_types::{TransactionInput, TransactionRequest as RpcTransactionRequest};
use alloy_transport::TransportError;
use async_trait::async_trait;

use crate::address::parse_address;
use crate::config::RpcConfig;
use crate::error::EthError;

/// A transaction submitted from an account the node holds keys for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionRequest {
    pub from: String,
    pub to: Option<String>,
    pub value: Option<U256>,
    pub data: Option<Vec<u8>>,
}

impl TransactionRequest {
    /// Plain value transfer.
    pub fn transfer(from: &str, to: &str, value: U256) -> Self {
        Self {
            from: from.to_string(),
            to: Some(to.to_string()),
            value: Some(value),
            data: None,
        }
    }

    /// Contract call carrying `data` and no value.
    pub fn contract_call(from: &str, to: &str, data: Vec<u8>) -> Self {
        Self {
            from: from.to_string(),
            to: Some(to.to_string()),
            value: None,
            data: Some(data),
        }
    }

    /// The `eth_sendTransaction` request alloy submits for this transaction.
    pub fn to_rpc_request(&self) -> Result<RpcTransactionRequest, EthError> {
        let mut request = RpcTransactionRequest::default().from(to_alloy_address(&self.from)?);
        if let Some(to) = &self.to {
            request = request.to(to_alloy_address(to)?);
        }
        if let Some(value) = self.value {
            request = request.value(value);
        }
        if let Some(data) = &self.data {
            request = request.input(TransactionInput::new(Bytes::copy_from_slice(data)));
        }
        Ok(request)
    }
}

/// The chain operations the helpers rely on.
#[async_trait]
pub trait EthClient: Send + Sync {
    /// Balance of `address` in wei at the latest block.
    async fn get_balance(&self, address: &str) -> Result<U256, EthError>;

    /// Submits `tx` and waits until it is mined successfully; returns the
    /// transaction hash.
    async fn send_transaction(&self, tx: TransactionRequest) -> Result<String, EthError>;

    /// Executes a read-only call against `to` at the latest block.
    async fn call(&self, to: &str, data: &[u8]) -> Result<Vec<u8>, EthError>;
}

#[async_trait]
impl<T: EthClient + ?Sized> EthClient for Arc<T> {
    async fn get_balance(&self, address: &str) -> Result<U256, EthError> {
        (**self).get_balance(address).await
    }

    async fn send_transaction(&self, tx: TransactionRequest) -> Result<String, EthError> {
        (**self).send_transaction(tx).await
    }

    async fn call(&self, to: &str, data: &[u8]) -> Result<Vec<u8>, EthError> {
        (**self).call(to, data).await
    }
}

/// [`EthClient`] over an HTTP alloy provider.
#[derive(Debug, Clone)]
pub struct RpcClient {
    provider: RootProvider<Ethereum>,
    config: RpcConfig,
}

impl RpcClient {
    pub fn new(config: RpcConfig) -> Result<Self, EthError> {
        let url: url::Url = config
            .rpc_url
            .parse()
            .map_err(|e| EthError::Config(format!("invalid rpc url {:?}: {e}", config.rpc_url)))?;

        let client = AlloyRpcClient::builder()
            .http(url)
            .with_poll_interval(config.receipt_poll_interval);

        Ok(Self {
            provider: RootProvider::<Ethereum>::new(client),
            config,
        })
    }

    /// Client configured from the `ETH_*` environment variables.
    pub fn from_env() -> Result<Self, EthError> {
        Self::new(RpcConfig::from_env()?)
    }

    pub fn config(&self) -> &RpcConfig {
        &self.config
    }

    pub fn provider(&self) -> &RootProvider<Ethereum> {
        &self.provider
    }
}

#[async_trait]
impl EthClient for RpcClient {
    async fn get_balance(&self, address: &str) -> Result<U256, EthError> {
        let address = to_alloy_address(address)?;
        tracing::debug!(%address, "eth_getBalance");
        self.provider.get_balance(address).await.map_err(rpc_error)
    }

    async fn send_transaction(&self, tx: TransactionRequest) -> Result<String, EthError> {
        let request = tx.to_rpc_request()?;
        tracing::debug!(from = %tx.from, to = ?tx.to, "eth_sendTransaction");

        let pending = self
            .provider
            .send_transaction(request)
            .await
            .map_err(rpc_error)?;
        let tx_hash = *pending.tx_hash();

        let receipt = pending
            .with_timeout(Some(self.config.receipt_timeout))
            .get_receipt()
            .await?;

        if !receipt.status() {
            tracing::warn!(%tx_hash, "transaction reverted");
            return Err(EthError::TransactionFailed(format!("{tx_hash} reverted")));
        }

        Ok(tx_hash.to_string())
    }

    async fn call(&self, to: &str, data: &[u8]) -> Result<Vec<u8>, EthError> {
        let to = to_alloy_address(to)?;
        tracing::debug!(%to, "eth_call");

        let request = RpcTransactionRequest::default()
            .to(to)
            .input(TransactionInput::new(Bytes::copy_from_slice(data)));
        let output = self.provider.call(request).await.map_err(rpc_error)?;
        Ok(output.to_vec())
    }
}

fn to_alloy_address(address: &str) -> Result<Address, EthError> {
    parse_address(address).map(Address::from)
}

/// JSON-RPC error responses keep their code and message; anything else is a
/// transport failure.
fn rpc_error(err: TransportError) -> EthError {
    match err.as_error_resp() {
        Some(resp) => EthError::Rpc {
            code: resp.code,
            message: resp.message.to_string(),
        },
        None => EthError::Transport(err),
    }
}

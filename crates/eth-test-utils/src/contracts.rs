//! Deployed contracts the helpers talk to.

use alloy_primitives::U256;
use async_trait::async_trait;

use crate::abi::{decode_bytes, decode_uint256, encode_function_call, selector};
use crate::client::{EthClient, TransactionRequest};
use crate::erc20;
use crate::error::EthError;

/// A registry that deploys identity proxies with CREATE2.
#[async_trait]
pub trait Registry: Send + Sync {
    /// Address of the registry, which is the CREATE2 deployer.
    fn address(&self) -> &str;

    /// Init code of the proxy the registry deploys.
    async fn proxy_code(&self) -> Result<Vec<u8>, EthError>;
}

/// A token that can mint to arbitrary holders.
#[async_trait]
pub trait MintableToken: Send + Sync {
    async fn mint(&self, to: &str, amount: U256) -> Result<(), EthError>;

    async fn balance_of(&self, owner: &str) -> Result<U256, EthError>;
}

/// On-chain registry exposing `getProxyCode() returns (bytes)`.
#[derive(Debug, Clone)]
pub struct RegistryContract<C> {
    client: C,
    address: String,
}

impl<C: EthClient> RegistryContract<C> {
    pub fn new(client: C, address: impl Into<String>) -> Self {
        Self {
            client,
            address: address.into(),
        }
    }
}

#[async_trait]
impl<C: EthClient> Registry for RegistryContract<C> {
    fn address(&self) -> &str {
        &self.address
    }

    async fn proxy_code(&self) -> Result<Vec<u8>, EthError> {
        let data = encode_function_call(selector("getProxyCode()"), &[]);
        let ret = self.client.call(&self.address, &data).await?;
        decode_bytes(&ret)
    }
}

/// ERC-20 token with an open `mint(address,uint256)`.
///
/// Mint transactions are sent from `minter`, which must be unlocked on the
/// node and allowed to mint.
#[derive(Debug, Clone)]
pub struct Erc20Token<C> {
    client: C,
    address: String,
    minter: String,
}

impl<C: EthClient> Erc20Token<C> {
    pub fn new(client: C, address: impl Into<String>, minter: impl Into<String>) -> Self {
        Self {
            client,
            address: address.into(),
            minter: minter.into(),
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }
}

#[async_trait]
impl<C: EthClient> MintableToken for Erc20Token<C> {
    async fn mint(&self, to: &str, amount: U256) -> Result<(), EthError> {
        let data = erc20::encode_mint(to, amount)?;
        let tx = TransactionRequest::contract_call(&self.minter, &self.address, data);
        let tx_hash = self.client.send_transaction(tx).await?;
        tracing::debug!(token = %self.address, to, %amount, %tx_hash, "minted");
        Ok(())
    }

    async fn balance_of(&self, owner: &str) -> Result<U256, EthError> {
        let data = erc20::encode_balance_of(owner)?;
        let ret = self.client.call(&self.address, &data).await?;
        decode_uint256(&ret)
    }
}

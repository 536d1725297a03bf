//! Balance assertions for contract tests.
//!
//! These helpers panic on a balance mismatch so the enclosing test fails with
//! the usual `assert_eq!` diff. Client errors are returned untouched.

use alloy_primitives::U256;

use crate::client::{EthClient, TransactionRequest};
use crate::contracts::MintableToken;
use crate::error::EthError;

/// Sends `value` wei from `from` to `to` and asserts that `to`'s balance grew
/// by exactly `value`.
///
/// # Panics
///
/// If the balance after the transfer is not the balance before plus `value`.
pub async fn top_up_ethers<C>(client: &C, from: &str, to: &str, value: U256) -> Result<(), EthError>
where
    C: EthClient + ?Sized,
{
    let initial = client.get_balance(to).await?;
    let expected = initial.checked_add(value).ok_or_else(|| {
        EthError::InvalidInput(format!("balance {initial} + {value} overflows uint256"))
    })?;

    let tx_hash = client
        .send_transaction(TransactionRequest::transfer(from, to, value))
        .await?;

    let actual = client.get_balance(to).await?;
    assert_eq!(
        actual, expected,
        "balance of {to} after topping up {value} wei (tx {tx_hash})"
    );

    tracing::info!(from, to, %value, %actual, "topped up ethers");
    Ok(())
}

/// Mints `amount` tokens to `to` and asserts the token reports exactly
/// `amount`.
///
/// `to` is expected to hold no tokens beforehand.
///
/// # Panics
///
/// If the token balance after minting differs from `amount`.
pub async fn top_up_tokens<T>(token: &T, to: &str, amount: U256) -> Result<(), EthError>
where
    T: MintableToken + ?Sized,
{
    token.mint(to, amount).await?;

    let balance = token.balance_of(to).await?;
    assert_eq!(balance, amount, "token balance of {to} after minting {amount}");

    tracing::info!(to, %amount, "topped up tokens");
    Ok(())
}

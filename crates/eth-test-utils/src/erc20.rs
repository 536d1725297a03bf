use alloy_primitives::U256;

use crate::abi::{encode_function_call, AbiParam};
use crate::address::parse_address;
use crate::error::EthError;

/// Function selector for `mint(address,uint256)`: `0x40c10f19`.
const MINT_SELECTOR: [u8; 4] = [0x40, 0xc1, 0x0f, 0x19];

/// Function selector for `balanceOf(address)`: `0x70a08231`.
const BALANCE_OF_SELECTOR: [u8; 4] = [0x70, 0xa0, 0x82, 0x31];

/// Encodes a mintable token's `mint(address,uint256)` call.
pub fn encode_mint(to: &str, amount: U256) -> Result<Vec<u8>, EthError> {
    let addr = parse_address(to)?;
    let params = [AbiParam::Address(addr), AbiParam::Uint256(amount)];
    Ok(encode_function_call(MINT_SELECTOR, &params))
}

/// Encodes an ERC-20 `balanceOf(address)` call.
pub fn encode_balance_of(owner: &str) -> Result<Vec<u8>, EthError> {
    let addr = parse_address(owner)?;
    let params = [AbiParam::Address(addr)];
    Ok(encode_function_call(BALANCE_OF_SELECTOR, &params))
}

//! Minimal ABI encoding for the contract calls the helpers make.
//!
//! Just enough to build `mint` / `balanceOf` calldata and to read back `uint256`
//! and `bytes` return values without pulling in a full ABI parser.

use alloy_primitives::U256;

use crate::error::EthError;
use crate::hash::keccak256;

/// A single static ABI parameter.
#[derive(Debug, Clone)]
pub enum AbiParam {
    /// A 20-byte Ethereum address, left-padded to 32 bytes.
    Address([u8; 20]),
    /// A 256-bit unsigned integer.
    Uint256(U256),
}

/// Computes the 4-byte selector of a canonical function signature such as
/// `"transfer(address,uint256)"`.
pub fn selector(signature: &str) -> [u8; 4] {
    let hash = keccak256(signature.as_bytes());
    [hash[0], hash[1], hash[2], hash[3]]
}

/// Encodes a function call with the given 4-byte selector and ABI parameters.
///
/// The output is `selector || encode(params[0]) || encode(params[1]) || ...`
/// where each parameter is encoded as a 32-byte ABI word.
pub fn encode_function_call(selector: [u8; 4], params: &[AbiParam]) -> Vec<u8> {
    let mut data = Vec::with_capacity(4 + params.len() * 32);
    data.extend_from_slice(&selector);

    for param in params {
        data.extend_from_slice(&encode_param(param));
    }

    data
}

/// Encodes a single [`AbiParam`] as a 32-byte ABI word.
fn encode_param(param: &AbiParam) -> [u8; 32] {
    match param {
        AbiParam::Address(addr) => {
            // Left-pad: 12 zero bytes + 20 address bytes.
            let mut word = [0u8; 32];
            word[12..].copy_from_slice(addr);
            word
        }
        AbiParam::Uint256(value) => value.to_be_bytes::<32>(),
    }
}

/// Decodes a single `uint256` return value.
pub fn decode_uint256(data: &[u8]) -> Result<U256, EthError> {
    if data.len() < 32 {
        return Err(EthError::EncodingError(format!(
            "expected at least 32 bytes for uint256, got {}",
            data.len()
        )));
    }

    Ok(U256::from_be_slice(&data[..32]))
}

/// Decodes a single dynamic `bytes` return value.
///
/// Layout: `offset (32) || ... || length (32) at offset || data`.
pub fn decode_bytes(data: &[u8]) -> Result<Vec<u8>, EthError> {
    let offset = read_usize_word(data, 0)?;
    let len = read_usize_word(data, offset)?;

    let start = offset
        .checked_add(32)
        .ok_or_else(|| EthError::EncodingError("bytes offset overflows".into()))?;
    let end = start
        .checked_add(len)
        .filter(|&end| end <= data.len())
        .ok_or_else(|| {
            EthError::EncodingError(format!(
                "bytes length {len} at offset {offset} exceeds {} byte payload",
                data.len()
            ))
        })?;

    Ok(data[start..end].to_vec())
}

/// Reads the 32-byte word at `at` as a `usize`, rejecting values that do not fit.
fn read_usize_word(data: &[u8], at: usize) -> Result<usize, EthError> {
    let word = at
        .checked_add(32)
        .and_then(|end| data.get(at..end))
        .ok_or_else(|| {
            EthError::EncodingError(format!(
                "expected a 32 byte word at offset {at}, payload is {} bytes",
                data.len()
            ))
        })?;

    if word[..24].iter().any(|&b| b != 0) {
        return Err(EthError::EncodingError(format!(
            "word at offset {at} is too large"
        )));
    }

    let mut low = [0u8; 8];
    low.copy_from_slice(&word[24..]);
    usize::try_from(u64::from_be_bytes(low))
        .map_err(|_| EthError::EncodingError(format!("word at offset {at} is too large")))
}

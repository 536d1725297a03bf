use crate::error::EthError;
use crate::hash::keccak256;

/// Derives a lowercase `0x`-prefixed address from arbitrary bytes.
///
/// The address is the last 20 bytes of `keccak256(bytes)`. For a 64-byte public
/// key this is the account address; for RLP-encoded creation data it is the
/// contract address.
pub fn to_address(bytes: &[u8]) -> String {
    let hash = keccak256(bytes);
    format!("0x{}", hex::encode(&hash[12..]))
}

/// Identity hash of a public key, as used by identity registries.
///
/// Same derivation as [`to_address`].
pub fn identity_hash(pubkey: &[u8]) -> String {
    to_address(pubkey)
}

/// Renders a raw 20-byte address as lowercase `0x` hex.
pub fn format_address(addr: &[u8; 20]) -> String {
    format!("0x{}", hex::encode(addr))
}

/// Parses a 0x-prefixed hex address string into a 20-byte array.
///
/// Checksum casing is accepted but not verified.
pub fn parse_address(address: &str) -> Result<[u8; 20], EthError> {
    let hex_str = address
        .strip_prefix("0x")
        .or_else(|| address.strip_prefix("0X"))
        .ok_or_else(|| EthError::InvalidAddress("address must start with 0x".into()))?;

    if hex_str.len() != 40 {
        return Err(EthError::InvalidAddress(format!(
            "expected 40 hex characters, got {}",
            hex_str.len()
        )));
    }

    let bytes = hex::decode(hex_str)
        .map_err(|e| EthError::InvalidAddress(format!("invalid hex: {e}")))?;

    let mut addr = [0u8; 20];
    addr.copy_from_slice(&bytes);
    Ok(addr)
}

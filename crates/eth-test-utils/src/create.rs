//! Contract address derivation for `CREATE` and `CREATE2` deployments.

use alloy_rlp::{Encodable, RlpEncodable};

use crate::address::{format_address, parse_address, to_address};
use crate::contracts::Registry;
use crate::error::EthError;
use crate::hash::keccak256;

/// Address of the contract created by `creator` at account nonce `nonce`.
///
/// `address = keccak256(rlp([creator, nonce]))[12..]`
pub fn derive_contract_address(creator: &str, nonce: u64) -> Result<String, EthError> {
    let creation = ContractCreation {
        creator: RlpAddress(parse_address(creator)?),
        nonce,
    };

    let mut rlp_buf = Vec::with_capacity(creation.length());
    creation.encode(&mut rlp_buf);

    Ok(to_address(&rlp_buf))
}

/// Raw CREATE2 address.
///
/// Preimage: 0xff (1) || deployer (20) || salt (32) || keccak256(init_code) (32).
pub fn create2_address(deployer: &[u8; 20], salt: &[u8; 32], init_code: &[u8]) -> [u8; 20] {
    let mut preimage = [0u8; 85];
    preimage[0] = 0xff;
    preimage[1..21].copy_from_slice(deployer);
    preimage[21..53].copy_from_slice(salt);
    preimage[53..85].copy_from_slice(&keccak256(init_code));

    let hash = keccak256(&preimage);
    let mut addr = [0u8; 20];
    addr.copy_from_slice(&hash[12..]);
    addr
}

/// Predicts the CREATE2 address of the proxy a registry deploys for
/// `identity_hash`.
///
/// The identity hash is left-padded with zeros to a 32-byte salt, and the
/// init code is the registry's current proxy bytecode.
pub async fn gen_create2_address<R>(identity_hash: &str, registry: &R) -> Result<String, EthError>
where
    R: Registry + ?Sized,
{
    let salt = identity_salt(identity_hash)?;
    let deployer = parse_address(registry.address())?;
    let init_code = registry.proxy_code().await?;

    tracing::debug!(
        registry = registry.address(),
        init_code_len = init_code.len(),
        "computing create2 address"
    );

    Ok(format_address(&create2_address(&deployer, &salt, &init_code)))
}

/// Left-pads a hex identity hash (optional `0x`) to a 32-byte salt.
fn identity_salt(identity_hash: &str) -> Result<[u8; 32], EthError> {
    let hex_str = identity_hash
        .strip_prefix("0x")
        .or_else(|| identity_hash.strip_prefix("0X"))
        .unwrap_or(identity_hash);

    if hex_str.len() > 64 {
        return Err(EthError::InvalidInput(format!(
            "identity hash longer than 32 bytes: {} hex characters",
            hex_str.len()
        )));
    }

    let padded = format!("{hex_str:0>64}");
    let bytes = hex::decode(&padded)
        .map_err(|e| EthError::InvalidInput(format!("identity hash is not hex: {e}")))?;

    let mut salt = [0u8; 32];
    salt.copy_from_slice(&bytes);
    Ok(salt)
}

/// RLP list `[creator, nonce]` hashed by `CREATE`.
#[derive(RlpEncodable)]
struct ContractCreation {
    creator: RlpAddress,
    nonce: u64,
}

/// Wrapper for a 20-byte address that encodes as an RLP byte string.
struct RlpAddress([u8; 20]);

impl Encodable for RlpAddress {
    fn encode(&self, out: &mut dyn alloy_rlp::BufMut) {
        self.0.as_slice().encode(out);
    }

    fn length(&self) -> usize {
        self.0.as_slice().length()
    }
}

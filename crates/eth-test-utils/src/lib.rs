//! Helpers for Ethereum smart-contract test suites.
//!
//! This crate provides:
//! - secp256k1 key generation and public key derivation
//! - keccak-256 message signing and signature verification
//! - account, `CREATE` and `CREATE2` address derivation
//! - ether and token top-up helpers that assert the resulting balances
//! - an alloy provider client for unlocked-account devnets (ganache, anvil, hardhat)

pub mod abi;
pub mod address;
pub mod balance;
pub mod client;
pub mod config;
pub mod contracts;
pub mod create;
pub mod erc20;
pub mod error;
pub mod hash;
pub mod keys;
pub mod logging;
pub mod signature;

pub use address::{identity_hash, to_address};
pub use balance::{top_up_ethers, top_up_tokens};
pub use create::{derive_contract_address, gen_create2_address};
pub use error::EthError;
pub use hash::{keccak256, set_length_left};
pub use keys::{generate_private_key, private_to_public};
pub use signature::{sign_message, verify_signature};

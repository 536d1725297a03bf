//! # crypto-utils
//!
//! Secure random generation shared by the test helper crates.

pub mod error;
pub mod random;

pub use error::CryptoError;

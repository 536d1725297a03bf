use thiserror::Error;

/// Cryptographic operation errors.
#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("random generation failed: {0}")]
    RandomFailed(String),
}

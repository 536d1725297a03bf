use crypto_utils::CryptoError;
use thiserror::Error;

/// Errors raised by the Ethereum test helpers.
#[derive(Debug, Error)]
pub enum EthError {
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("signing error: {0}")]
    SigningError(String),

    #[error("encoding error: {0}")]
    EncodingError(String),

    #[error(transparent)]
    Random(#[from] CryptoError),

    #[error("transport error: {0}")]
    Transport(#[from] alloy_transport::TransportError),

    #[error("pending transaction: {0}")]
    PendingTransaction(#[from] alloy_provider::PendingTransactionError),

    #[error("rpc error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("transaction failed: {0}")]
    TransactionFailed(String),

    #[error("configuration error: {0}")]
    Config(String),
}

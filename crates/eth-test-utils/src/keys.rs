use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::SecretKey;
use zeroize::Zeroize;

use crate::error::EthError;

/// Returns `true` if `key` is a valid secp256k1 scalar (`0 < key < n`).
pub fn is_valid_private_key(key: &[u8; 32]) -> bool {
    SecretKey::from_bytes(key.into()).is_ok()
}

/// Generates a random secp256k1 private key.
///
/// 32 random bytes are drawn until they form a valid scalar; a zero or
/// out-of-range candidate is discarded and redrawn.
pub fn generate_private_key() -> Result<[u8; 32], EthError> {
    loop {
        let mut candidate: [u8; 32] = crypto_utils::random::random_bytes_fixed()?;
        if is_valid_private_key(&candidate) {
            return Ok(candidate);
        }
        candidate.zeroize();
    }
}

/// Derives the 64-byte uncompressed public key (`x || y`, no `0x04` prefix)
/// for a private key.
pub fn private_to_public(private_key: &[u8; 32]) -> Result<[u8; 64], EthError> {
    let secret = SecretKey::from_bytes(private_key.into())
        .map_err(|e| EthError::InvalidPrivateKey(e.to_string()))?;

    let encoded = secret.public_key().to_encoded_point(false);

    // Skip the 0x04 SEC1 tag.
    let mut pubkey = [0u8; 64];
    pubkey.copy_from_slice(&encoded.as_bytes()[1..]);
    Ok(pubkey)
}

use rand::RngCore;
use rand_core::OsRng;

use crate::error::CryptoError;

/// Generates a fixed-size array of cryptographically secure random bytes.
///
/// A failing OS entropy source is reported instead of panicking.
pub fn random_bytes_fixed<const N: usize>() -> Result<[u8; N], CryptoError> {
    let mut buf = [0u8; N];
    OsRng
        .try_fill_bytes(&mut buf)
        .map_err(|e| CryptoError::RandomFailed(e.to_string()))?;
    Ok(buf)
}

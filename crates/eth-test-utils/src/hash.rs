use sha3::{Digest, Keccak256};

/// Keccak-256 of an arbitrary byte sequence.
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let hash = Keccak256::digest(data);
    let mut out = [0u8; 32];
    out.copy_from_slice(&hash);
    out
}

/// Left-pads `bytes` with zeros to `len` bytes.
///
/// Inputs longer than `len` keep their trailing `len` bytes.
pub fn set_length_left(bytes: &[u8], len: usize) -> Vec<u8> {
    if bytes.len() >= len {
        return bytes[bytes.len() - len..].to_vec();
    }

    let mut out = vec![0u8; len];
    out[len - bytes.len()..].copy_from_slice(bytes);
    out
}

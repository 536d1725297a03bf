use k256::ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier};
use k256::ecdsa::{RecoveryId, Signature, SigningKey, VerifyingKey};
use zeroize::Zeroize;

use crate::error::EthError;
use crate::hash::keccak256;

/// Offset added to the recovery id to form the legacy `v` byte.
const V_OFFSET: u8 = 27;

/// Signs `keccak256(message)` with a secp256k1 private key.
///
/// Returns the 65-byte signature `r[32] || s[32] || v[1]` where
/// `v = recovery_id + 27`. No EIP-191 prefix is applied.
pub fn sign_message(message: &[u8], private_key: &[u8; 32]) -> Result<[u8; 65], EthError> {
    let msg_hash = keccak256(message);

    let mut key_bytes = *private_key;
    let signing_key = SigningKey::from_bytes((&key_bytes).into())
        .map_err(|e| EthError::InvalidPrivateKey(e.to_string()));
    key_bytes.zeroize();
    let signing_key = signing_key?;

    let (signature, recovery_id): (Signature, RecoveryId) = signing_key
        .sign_prehash(&msg_hash)
        .map_err(|e| EthError::SigningError(e.to_string()))?;

    let mut sig = [0u8; 65];
    sig[..64].copy_from_slice(&signature.to_bytes());
    sig[64] = recovery_id.to_byte() + V_OFFSET;
    Ok(sig)
}

/// Verifies a signature produced by [`sign_message`].
///
/// `pubkey` may be the raw 64-byte form, SEC1 uncompressed (65 bytes) or SEC1
/// compressed (33 bytes). Only the first 64 bytes of `signature` are checked;
/// the `v` byte is ignored, so a signature is never matched against the key it
/// recovers to.
pub fn verify_signature(message: &[u8], signature: &[u8], pubkey: &[u8]) -> Result<bool, EthError> {
    if signature.len() < 64 {
        return Err(EthError::InvalidSignature(format!(
            "expected at least 64 bytes, got {}",
            signature.len()
        )));
    }

    let verifying_key = parse_pubkey(pubkey)?;

    // Zero or out-of-range r/s cannot verify.
    let Ok(signature) = Signature::from_slice(&signature[..64]) else {
        return Ok(false);
    };

    let msg_hash = keccak256(message);
    Ok(verifying_key.verify_prehash(&msg_hash, &signature).is_ok())
}

/// Parses a public key, prepending the 0x04 tag when it is missing.
fn parse_pubkey(pubkey: &[u8]) -> Result<VerifyingKey, EthError> {
    let needs_tag = pubkey.len() == 64 || (pubkey.len() > 64 && pubkey[0] != 0x04);

    let sec1 = if needs_tag {
        let mut tagged = Vec::with_capacity(pubkey.len() + 1);
        tagged.push(0x04);
        tagged.extend_from_slice(pubkey);
        tagged
    } else {
        pubkey.to_vec()
    };

    VerifyingKey::from_sec1_bytes(&sec1)
        .map_err(|e| EthError::InvalidPublicKey(format!("{} byte key: {e}", pubkey.len())))
}

#[cfg(test)]
mod tests {
    use alloy_primitives::U256;
    use k256::elliptic_curve::sec1::ToEncodedPoint;
    use k256::SecretKey;

    use super::*;
    use crate::keys::{generate_private_key, private_to_public};

    /// Well-known test private key (DO NOT use on mainnet).
    const TEST_PRIVKEY: [u8; 32] = {
        let mut key = [0u8; 32];
        key[31] = 1;
        key
    };

    #[test]
    fn sign_message_layout() {
        let sig = sign_message(b"hello", &TEST_PRIVKEY).unwrap();
        assert!(sig[64] == 27 || sig[64] == 28);
        assert_ne!(&sig[..32], &[0u8; 32]);
        assert_ne!(&sig[32..64], &[0u8; 32]);
    }

    #[test]
    fn sign_message_is_deterministic() {
        // RFC 6979 nonces.
        let a = sign_message(b"payload", &TEST_PRIVKEY).unwrap();
        let b = sign_message(b"payload", &TEST_PRIVKEY).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn sign_then_verify_round_trip() {
        let messages: [&[u8]; 4] = [b"", b"a", b"identity registration", &[0xff; 300]];
        for message in messages {
            let key = generate_private_key().unwrap();
            let sig = sign_message(message, &key).unwrap();
            let pubkey = private_to_public(&key).unwrap();
            assert!(verify_signature(message, &sig, &pubkey).unwrap());
        }
    }

    #[test]
    fn verify_accepts_sec1_encodings() {
        let sig = sign_message(b"hello", &TEST_PRIVKEY).unwrap();
        let public = SecretKey::from_bytes((&TEST_PRIVKEY).into())
            .unwrap()
            .public_key();

        let uncompressed = public.to_encoded_point(false);
        assert!(verify_signature(b"hello", &sig, uncompressed.as_bytes()).unwrap());

        let compressed = public.to_encoded_point(true);
        assert!(verify_signature(b"hello", &sig, compressed.as_bytes()).unwrap());
    }

    #[test]
    fn verify_rejects_altered_message() {
        let sig = sign_message(b"transfer 1 eth", &TEST_PRIVKEY).unwrap();
        let pubkey = private_to_public(&TEST_PRIVKEY).unwrap();
        assert!(!verify_signature(b"transfer 9 eth", &sig, &pubkey).unwrap());
    }

    #[test]
    fn verify_rejects_other_key() {
        let sig = sign_message(b"hello", &TEST_PRIVKEY).unwrap();
        let other = private_to_public(&generate_private_key().unwrap()).unwrap();
        assert!(!verify_signature(b"hello", &sig, &other).unwrap());
    }

    #[test]
    fn verify_ignores_recovery_byte() {
        let mut sig = sign_message(b"hello", &TEST_PRIVKEY).unwrap();
        let pubkey = private_to_public(&TEST_PRIVKEY).unwrap();
        sig[64] = 0;
        assert!(verify_signature(b"hello", &sig, &pubkey).unwrap());
        assert!(verify_signature(b"hello", &sig[..64], &pubkey).unwrap());
    }

    #[test]
    fn verify_zero_signature_is_false() {
        let pubkey = private_to_public(&TEST_PRIVKEY).unwrap();
        assert!(!verify_signature(b"hello", &[0u8; 65], &pubkey).unwrap());
    }

    #[test]
    fn verify_high_s_is_false() {
        let curve_order = U256::from_be_slice(
            &hex::decode("fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141").unwrap(),
        );
        let mut sig = sign_message(b"hello", &TEST_PRIVKEY).unwrap();
        let pubkey = private_to_public(&TEST_PRIVKEY).unwrap();

        // (r, n - s) is the malleable twin of the low-S signature.
        let high_s = curve_order - U256::from_be_slice(&sig[32..64]);
        sig[32..64].copy_from_slice(&high_s.to_be_bytes::<32>());

        assert!(!verify_signature(b"hello", &sig, &pubkey).unwrap());
    }

    #[test]
    fn verify_raw_key_with_leading_04_byte() {
        let (key, pubkey) = loop {
            let key = generate_private_key().unwrap();
            let pubkey = private_to_public(&key).unwrap();
            if pubkey[0] == 0x04 {
                break (key, pubkey);
            }
        };

        let sig = sign_message(b"hello", &key).unwrap();
        assert!(verify_signature(b"hello", &sig, &pubkey).unwrap());
    }

    #[test]
    fn verify_short_signature_errors() {
        let pubkey = private_to_public(&TEST_PRIVKEY).unwrap();
        let result = verify_signature(b"hello", &[1u8; 63], &pubkey);
        assert!(matches!(result, Err(EthError::InvalidSignature(_))));
    }

    #[test]
    fn verify_bad_pubkey_errors() {
        let sig = sign_message(b"hello", &TEST_PRIVKEY).unwrap();
        let result = verify_signature(b"hello", &sig, &[0u8; 10]);
        assert!(matches!(result, Err(EthError::InvalidPublicKey(_))));
    }

    #[test]
    fn sign_with_invalid_key_errors() {
        let result = sign_message(b"hello", &[0u8; 32]);
        assert!(matches!(result, Err(EthError::InvalidPrivateKey(_))));
    }
}

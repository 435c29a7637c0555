//! Ed25519 (EdDSA, RFC 8037)

use crate::error::JwtError;
use ed25519_dalek::{Signature, Signer, SigningKey, VerifyingKey};

/// Sign with Ed25519
#[inline]
pub(crate) fn sign_ed25519(key: &SigningKey, message: &[u8]) -> Result<Vec<u8>, JwtError> {
    let signature: Signature = key
        .try_sign(message)
        .map_err(|e| JwtError::signing_error(&format!("EdDSA signing failed: {e}")))?;
    Ok(signature.to_bytes().to_vec())
}

/// Verify an Ed25519 signature, rejecting small-order keys and malleable encodings
#[inline]
pub(crate) fn verify_ed25519(
    key: &VerifyingKey,
    message: &[u8],
    signature: &[u8],
) -> Result<bool, JwtError> {
    let Ok(signature) = Signature::from_slice(signature) else {
        return Ok(false);
    };
    Ok(key.verify_strict(message, &signature).is_ok())
}

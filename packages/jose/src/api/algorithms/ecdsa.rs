//! ECDSA-based JWT Algorithm Implementations
//!
//! ES256 (P-256), ES384 (P-384) and ES512 (P-521). JWS carries ECDSA signatures as the
//! fixed-width concatenation `r || s` (RFC 7518 section 3.4), not DER.

use crate::error::JwtError;
use p256::ecdsa::signature::{Signer, Verifier};

/// Sign with ECDSA P-256 (ES256)
#[inline]
pub(crate) fn sign_es256(key: &p256::ecdsa::SigningKey, message: &[u8]) -> Result<Vec<u8>, JwtError> {
    let signature: p256::ecdsa::Signature = key
        .try_sign(message)
        .map_err(|e| JwtError::signing_error(&format!("ES256 signing failed: {e}")))?;
    Ok(signature.to_bytes().to_vec())
}

/// Verify ECDSA P-256 (ES256) signature
#[inline]
pub(crate) fn verify_es256(
    key: &p256::ecdsa::VerifyingKey,
    message: &[u8],
    signature: &[u8],
) -> Result<bool, JwtError> {
    let Ok(signature) = p256::ecdsa::Signature::from_slice(signature) else {
        return Ok(false);
    };
    Ok(key.verify(message, &signature).is_ok())
}

/// Sign with ECDSA P-384 (ES384)
#[inline]
pub(crate) fn sign_es384(key: &p384::ecdsa::SigningKey, message: &[u8]) -> Result<Vec<u8>, JwtError> {
    let signature: p384::ecdsa::Signature = key
        .try_sign(message)
        .map_err(|e| JwtError::signing_error(&format!("ES384 signing failed: {e}")))?;
    Ok(signature.to_bytes().to_vec())
}

/// Verify ECDSA P-384 (ES384) signature
#[inline]
pub(crate) fn verify_es384(
    key: &p384::ecdsa::VerifyingKey,
    message: &[u8],
    signature: &[u8],
) -> Result<bool, JwtError> {
    let Ok(signature) = p384::ecdsa::Signature::from_slice(signature) else {
        return Ok(false);
    };
    Ok(key.verify(message, &signature).is_ok())
}

/// Sign with ECDSA P-521 (ES512)
#[inline]
pub(crate) fn sign_es512(key: &p521::ecdsa::SigningKey, message: &[u8]) -> Result<Vec<u8>, JwtError> {
    let signature: p521::ecdsa::Signature = key
        .try_sign(message)
        .map_err(|e| JwtError::signing_error(&format!("ES512 signing failed: {e}")))?;
    Ok(signature.to_bytes().to_vec())
}

/// Verify ECDSA P-521 (ES512) signature
#[inline]
pub(crate) fn verify_es512(
    key: &p521::ecdsa::VerifyingKey,
    message: &[u8],
    signature: &[u8],
) -> Result<bool, JwtError> {
    let Ok(signature) = p521::ecdsa::Signature::from_slice(signature) else {
        return Ok(false);
    };
    Ok(key.verify(message, &signature).is_ok())
}

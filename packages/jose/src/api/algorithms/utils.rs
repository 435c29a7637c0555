//! Base64url helpers for the compact serialization (RFC 7515 section 2)

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};

/// Base64 URL-safe encoding without padding
#[inline]
pub(crate) fn base64_url_encode(input: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(input)
}

/// Base64 URL-safe decoding without padding
///
/// Padding characters and non-zero trailing bits are rejected, so every
/// segment has exactly one accepted spelling.
#[inline]
pub(crate) fn base64_url_decode(input: &str) -> Result<Vec<u8>, base64::DecodeError> {
    URL_SAFE_NO_PAD.decode(input)
}

/// Decode a fixed-width JWK coordinate or scalar
pub(crate) fn decode_fixed(input: &str, len: usize, what: &str) -> crate::JwtResult<Vec<u8>> {
    let bytes = base64_url_decode(input)
        .map_err(|e| crate::JwtError::invalid_key(&format!("{what} is not base64url: {e}")))?;
    if bytes.len() != len {
        return Err(crate::JwtError::invalid_key(&format!(
            "{what} must be {len} bytes, got {}",
            bytes.len()
        )));
    }
    Ok(bytes)
}

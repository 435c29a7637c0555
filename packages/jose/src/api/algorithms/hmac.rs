//! HMAC-based JWT Algorithm Implementations
//!
//! HS256, HS384 and HS512. Verification recomputes the MAC and compares in
//! constant time.

use crate::algorithm::Algorithm;
use crate::error::JwtError;
use hmac::digest::KeyInit;
use hmac::{Hmac, Mac};
use sha2::{Sha256, Sha384, Sha512};

/// Sign with the HMAC variant selected by `alg`
pub(crate) fn sign_hmac(alg: Algorithm, message: &[u8], secret: &[u8]) -> Result<Vec<u8>, JwtError> {
    match alg {
        Algorithm::HS256 => Ok(keyed::<Hmac<Sha256>>(message, secret)?.finalize().into_bytes().to_vec()),
        Algorithm::HS384 => Ok(keyed::<Hmac<Sha384>>(message, secret)?.finalize().into_bytes().to_vec()),
        Algorithm::HS512 => Ok(keyed::<Hmac<Sha512>>(message, secret)?.finalize().into_bytes().to_vec()),
        other => Err(JwtError::unsupported_algorithm(other.as_str())),
    }
}

/// Verify with the HMAC variant selected by `alg`
pub(crate) fn verify_hmac(
    alg: Algorithm,
    message: &[u8],
    signature: &[u8],
    secret: &[u8],
) -> Result<bool, JwtError> {
    let verified = match alg {
        Algorithm::HS256 => keyed::<Hmac<Sha256>>(message, secret)?.verify_slice(signature),
        Algorithm::HS384 => keyed::<Hmac<Sha384>>(message, secret)?.verify_slice(signature),
        Algorithm::HS512 => keyed::<Hmac<Sha512>>(message, secret)?.verify_slice(signature),
        other => return Err(JwtError::unsupported_algorithm(other.as_str())),
    };
    Ok(verified.is_ok())
}

/// MAC state keyed with `secret` that has absorbed `message`
#[inline]
fn keyed<M: Mac + KeyInit>(message: &[u8], secret: &[u8]) -> Result<M, JwtError> {
    let mut mac = <M as KeyInit>::new_from_slice(secret)
        .map_err(|_| JwtError::invalid_key("Invalid HMAC key"))?;
    mac.update(message);
    Ok(mac)
}

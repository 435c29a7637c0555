//! JWT key strength checks

use crate::algorithm::Algorithm;
use crate::error::JwtError;
use crate::key::{Jwk, KeyMaterial};
use crate::policy::Policy;
use rsa::traits::PublicKeyParts;

/// Validate key strength for the key's algorithm under `policy`
pub(crate) fn validate_key_strength(key: &Jwk, policy: &Policy) -> Result<(), JwtError> {
    if !policy.enforce_key_strength {
        return Ok(());
    }
    match key.material() {
        KeyMaterial::Hmac(secret) => validate_hmac_key(secret, key.algorithm()),
        KeyMaterial::RsaPrivate(rsa) => validate_rsa_size(rsa.size() * 8, policy.min_rsa_bits),
        KeyMaterial::RsaPublic(rsa) => validate_rsa_size(rsa.size() * 8, policy.min_rsa_bits),
        _ => Ok(()),
    }
}

/// Validate HMAC secret key length for security
fn validate_hmac_key(secret: &[u8], algorithm: Algorithm) -> Result<(), JwtError> {
    let Some(min_length) = algorithm.min_hmac_key_len() else {
        return Err(JwtError::unsupported_algorithm(algorithm.as_str()));
    };

    if secret.len() < min_length {
        return Err(JwtError::invalid_key(&format!(
            "HMAC key for {} must be at least {} bytes, got {}",
            algorithm,
            min_length,
            secret.len()
        )));
    }

    Ok(())
}

/// Validate RSA modulus size
fn validate_rsa_size(bits: usize, min_bits: usize) -> Result<(), JwtError> {
    if bits < min_bits {
        return Err(JwtError::invalid_key(&format!(
            "RSA modulus must be at least {min_bits} bits, got {bits}"
        )));
    }
    Ok(())
}

/// Get recommended key size in bytes for algorithm
#[must_use]
pub fn get_recommended_key_size(algorithm: Algorithm) -> usize {
    match algorithm {
        Algorithm::HS256 | Algorithm::ES256 | Algorithm::EdDSA => 32,
        Algorithm::HS384 | Algorithm::ES384 => 48,
        Algorithm::HS512 => 64,
        Algorithm::ES512 => 66,
        Algorithm::RS256
        | Algorithm::RS384
        | Algorithm::RS512
        | Algorithm::PS256
        | Algorithm::PS384
        | Algorithm::PS512 => 256,
    }
}

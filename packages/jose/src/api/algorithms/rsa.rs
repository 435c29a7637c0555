//! RSA-based JWT Algorithm Implementations
//!
//! RSASSA-PKCS1-v1_5 (RS256, RS384, RS512) and RSASSA-PSS (PS256, PS384,
//! PS512). PSS uses MGF1 with the same hash and a salt as long as the hash
//! output, as RFC 7518 section 3.5 requires.

use crate::algorithm::Algorithm;
use crate::error::JwtError;
use rsa::signature::{RandomizedSigner, SignatureEncoding, Signer, Verifier};
use rsa::{RsaPrivateKey, RsaPublicKey, pkcs1v15, pss};
use sha2::{Sha256, Sha384, Sha512};

/// Sign with the RSA variant selected by `alg`
pub(crate) fn sign_rsa(alg: Algorithm, key: &RsaPrivateKey, message: &[u8]) -> Result<Vec<u8>, JwtError> {
    let key = key.clone();
    let signature = match alg {
        Algorithm::RS256 => pkcs1v15::SigningKey::<Sha256>::new(key)
            .try_sign(message)
            .map(|s| s.to_vec()),
        Algorithm::RS384 => pkcs1v15::SigningKey::<Sha384>::new(key)
            .try_sign(message)
            .map(|s| s.to_vec()),
        Algorithm::RS512 => pkcs1v15::SigningKey::<Sha512>::new(key)
            .try_sign(message)
            .map(|s| s.to_vec()),
        Algorithm::PS256 => pss::BlindedSigningKey::<Sha256>::new(key)
            .try_sign_with_rng(&mut rand::thread_rng(), message)
            .map(|s| s.to_vec()),
        Algorithm::PS384 => pss::BlindedSigningKey::<Sha384>::new(key)
            .try_sign_with_rng(&mut rand::thread_rng(), message)
            .map(|s| s.to_vec()),
        Algorithm::PS512 => pss::BlindedSigningKey::<Sha512>::new(key)
            .try_sign_with_rng(&mut rand::thread_rng(), message)
            .map(|s| s.to_vec()),
        other => return Err(JwtError::unsupported_algorithm(other.as_str())),
    };
    signature.map_err(|e| JwtError::signing_error(&format!("RSA signing failed: {e}")))
}

/// Verify with the RSA variant selected by `alg`
///
/// A signature that cannot even be parsed is reported as a mismatch.
pub(crate) fn verify_rsa(
    alg: Algorithm,
    key: &RsaPublicKey,
    message: &[u8],
    signature: &[u8],
) -> Result<bool, JwtError> {
    let key = key.clone();
    let verified = match alg {
        Algorithm::RS256 | Algorithm::RS384 | Algorithm::RS512 => {
            let Ok(signature) = pkcs1v15::Signature::try_from(signature) else {
                return Ok(false);
            };
            match alg {
                Algorithm::RS256 => pkcs1v15::VerifyingKey::<Sha256>::new(key).verify(message, &signature),
                Algorithm::RS384 => pkcs1v15::VerifyingKey::<Sha384>::new(key).verify(message, &signature),
                _ => pkcs1v15::VerifyingKey::<Sha512>::new(key).verify(message, &signature),
            }
        }
        Algorithm::PS256 | Algorithm::PS384 | Algorithm::PS512 => {
            let Ok(signature) = pss::Signature::try_from(signature) else {
                return Ok(false);
            };
            match alg {
                Algorithm::PS256 => pss::VerifyingKey::<Sha256>::new(key).verify(message, &signature),
                Algorithm::PS384 => pss::VerifyingKey::<Sha384>::new(key).verify(message, &signature),
                _ => pss::VerifyingKey::<Sha512>::new(key).verify(message, &signature),
            }
        }
        other => return Err(JwtError::unsupported_algorithm(other.as_str())),
    };
    Ok(verified.is_ok())
}

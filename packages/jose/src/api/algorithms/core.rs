//! JWT Core Algorithm Operations - dispatch from (algorithm, key) to primitive

use super::ecdsa::{sign_es256, sign_es384, sign_es512, verify_es256, verify_es384, verify_es512};
use super::eddsa::{sign_ed25519, verify_ed25519};
use super::hmac::{sign_hmac, verify_hmac};
use super::rsa::{sign_rsa, verify_rsa};
use crate::algorithm::{Algorithm, AlgorithmFamily, Curve};
use crate::error::JwtError;
use crate::key::KeyMaterial;

/// Produce the raw signature bytes for `message`
pub(crate) fn sign_message(
    alg: Algorithm,
    material: &KeyMaterial,
    message: &[u8],
) -> Result<Vec<u8>, JwtError> {
    match (alg.family(), material) {
        (AlgorithmFamily::Hmac, KeyMaterial::Hmac(secret)) => sign_hmac(alg, message, secret),
        (AlgorithmFamily::Rsa, KeyMaterial::RsaPrivate(key)) => sign_rsa(alg, key, message),
        (AlgorithmFamily::Ecdsa(Curve::P256), KeyMaterial::P256Private(key)) => {
            sign_es256(key, message)
        }
        (AlgorithmFamily::Ecdsa(Curve::P384), KeyMaterial::P384Private(key)) => {
            sign_es384(key, message)
        }
        (AlgorithmFamily::Ecdsa(Curve::P521), KeyMaterial::P521Private(key)) => {
            sign_es512(key, message)
        }
        (AlgorithmFamily::EdDsa, KeyMaterial::Ed25519Private(key)) => sign_ed25519(key, message),
        (_, material) if !material.can_sign() => Err(JwtError::signing_error(&format!(
            "{} key cannot sign",
            material.kind()
        ))),
        (_, material) => Err(JwtError::signing_error(&format!(
            "{} key cannot sign {alg}",
            material.kind()
        ))),
    }
}

/// Check `signature` over `message`; `Ok(false)` means a mismatch
pub(crate) fn verify_message(
    alg: Algorithm,
    material: &KeyMaterial,
    message: &[u8],
    signature: &[u8],
) -> Result<bool, JwtError> {
    match (alg.family(), material) {
        (AlgorithmFamily::Hmac, KeyMaterial::Hmac(secret)) => {
            verify_hmac(alg, message, signature, secret)
        }
        (AlgorithmFamily::Rsa, KeyMaterial::RsaPublic(key)) => {
            verify_rsa(alg, key, message, signature)
        }
        (AlgorithmFamily::Rsa, KeyMaterial::RsaPrivate(key)) => {
            verify_rsa(alg, &key.to_public_key(), message, signature)
        }
        (AlgorithmFamily::Ecdsa(Curve::P256), KeyMaterial::P256Public(key)) => {
            verify_es256(key, message, signature)
        }
        (AlgorithmFamily::Ecdsa(Curve::P256), KeyMaterial::P256Private(key)) => {
            verify_es256(key.verifying_key(), message, signature)
        }
        (AlgorithmFamily::Ecdsa(Curve::P384), KeyMaterial::P384Public(key)) => {
            verify_es384(key, message, signature)
        }
        (AlgorithmFamily::Ecdsa(Curve::P384), KeyMaterial::P384Private(key)) => {
            verify_es384(key.verifying_key(), message, signature)
        }
        (AlgorithmFamily::Ecdsa(Curve::P521), KeyMaterial::P521Public(key)) => {
            verify_es512(key, message, signature)
        }
        (AlgorithmFamily::Ecdsa(Curve::P521), KeyMaterial::P521Private(key)) => {
            verify_es512(&p521::ecdsa::VerifyingKey::from(key), message, signature)
        }
        (AlgorithmFamily::EdDsa, KeyMaterial::Ed25519Public(key)) => {
            verify_ed25519(key, message, signature)
        }
        (AlgorithmFamily::EdDsa, KeyMaterial::Ed25519Private(key)) => {
            verify_ed25519(&key.verifying_key(), message, signature)
        }
        (_, material) => Err(JwtError::algorithm_mismatch(alg.as_str(), material.kind())),
    }
}

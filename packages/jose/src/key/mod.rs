//! Signing and verification keys
//!
//! A [`Jwk`] pairs key material with the one algorithm it may be used with,
//! an optional key identifier and an optional usage. A [`JwkSet`] is an
//! ordered collection of them, consulted only during verification.

mod jwk_json;
mod material;
mod set;

pub use material::KeyMaterial;
pub use set::JwkSet;

use crate::algorithm::{Algorithm, AlgorithmFamily, Curve};
use crate::error::{JwtError, JwtResult};
use rsa::{RsaPrivateKey, RsaPublicKey};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

/// Intended use of a key (`use` member, RFC 7517 section 4.2).
///
/// Only `sig` (or no `use` at all) makes a key eligible for signing and
/// verification. Other registered or private values are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum KeyUse {
    /// Signatures
    Signature,
    /// Encryption
    Encryption,
    /// Any other value
    Other(String),
}

impl KeyUse {
    /// The `use` member value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            KeyUse::Signature => "sig",
            KeyUse::Encryption => "enc",
            KeyUse::Other(other) => other,
        }
    }

    /// Whether the key may take part in signatures.
    #[must_use]
    pub fn is_signature(&self) -> bool {
        matches!(self, KeyUse::Signature)
    }
}

impl From<String> for KeyUse {
    fn from(value: String) -> Self {
        match value.as_str() {
            "sig" => KeyUse::Signature,
            "enc" => KeyUse::Encryption,
            _ => KeyUse::Other(value),
        }
    }
}

impl From<KeyUse> for String {
    fn from(value: KeyUse) -> Self {
        match value {
            KeyUse::Other(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

/// A key bound to a single algorithm.
#[derive(Debug, Clone)]
pub struct Jwk {
    alg: Algorithm,
    kid: Option<String>,
    key_use: Option<KeyUse>,
    material: KeyMaterial,
}

impl Jwk {
    /// Bind material to an algorithm.
    ///
    /// # Errors
    /// `InvalidKey` when the material belongs to another family than `alg`.
    pub fn new(alg: Algorithm, material: KeyMaterial) -> JwtResult<Self> {
        if !material.is_compatible_with(alg) {
            return Err(JwtError::invalid_key(&format!(
                "{} key cannot be used with {alg}",
                material.kind()
            )));
        }
        Ok(Self {
            alg,
            kid: None,
            key_use: None,
            material,
        })
    }

    /// HMAC secret for HS256 / HS384 / HS512.
    ///
    /// # Errors
    /// `InvalidKey` if `alg` is not an HMAC algorithm or the secret is empty.
    pub fn hmac(alg: Algorithm, secret: impl Into<Vec<u8>>) -> JwtResult<Self> {
        let secret = Zeroizing::new(secret.into());
        if secret.is_empty() {
            return Err(JwtError::invalid_key("HMAC secret must not be empty"));
        }
        Self::new(alg, KeyMaterial::Hmac(secret))
    }

    /// RSA private key for RS* / PS* signing.
    ///
    /// # Errors
    /// `InvalidKey` if `alg` is not an RSA algorithm.
    pub fn from_rsa_private(alg: Algorithm, key: RsaPrivateKey) -> JwtResult<Self> {
        Self::new(alg, KeyMaterial::RsaPrivate(key))
    }

    /// RSA public key for RS* / PS* verification.
    ///
    /// # Errors
    /// `InvalidKey` if `alg` is not an RSA algorithm.
    pub fn from_rsa_public(alg: Algorithm, key: RsaPublicKey) -> JwtResult<Self> {
        Self::new(alg, KeyMaterial::RsaPublic(key))
    }

    /// Parse a PEM key for `alg`.
    ///
    /// Private keys are read from PKCS#8 (`PRIVATE KEY`), public keys from
    /// SPKI (`PUBLIC KEY`). RSA additionally accepts the PKCS#1 forms.
    ///
    /// # Errors
    /// `InvalidKey` if the PEM does not hold a key of the algorithm's family.
    pub fn from_pem(alg: Algorithm, pem: &str) -> JwtResult<Self> {
        let material = match alg.family() {
            AlgorithmFamily::Hmac => {
                return Err(JwtError::invalid_key("HMAC secrets have no PEM form"));
            }
            AlgorithmFamily::Rsa => rsa_from_pem(pem)?,
            AlgorithmFamily::Ecdsa(Curve::P256) => p256_from_pem(pem)?,
            AlgorithmFamily::Ecdsa(Curve::P384) => p384_from_pem(pem)?,
            AlgorithmFamily::Ecdsa(Curve::P521) => p521_from_pem(pem)?,
            AlgorithmFamily::EdDsa => ed25519_from_pem(pem)?,
        };
        Self::new(alg, material)
    }

    /// Parse a DER key for `alg` (PKCS#8 private or SPKI public).
    ///
    /// # Errors
    /// `InvalidKey` if the DER does not hold a key of the algorithm's family.
    pub fn from_der(alg: Algorithm, der: &[u8]) -> JwtResult<Self> {
        let material = match alg.family() {
            AlgorithmFamily::Hmac => {
                return Err(JwtError::invalid_key("HMAC secrets have no DER form"));
            }
            AlgorithmFamily::Rsa => rsa_from_der(der)?,
            AlgorithmFamily::Ecdsa(Curve::P256) => p256_from_der(der)?,
            AlgorithmFamily::Ecdsa(Curve::P384) => p384_from_der(der)?,
            AlgorithmFamily::Ecdsa(Curve::P521) => p521_from_der(der)?,
            AlgorithmFamily::EdDsa => ed25519_from_der(der)?,
        };
        Self::new(alg, material)
    }

    /// Attach a key identifier.
    #[must_use]
    pub fn with_kid(mut self, kid: impl Into<String>) -> Self {
        self.kid = Some(kid.into());
        self
    }

    /// Attach an intended use.
    #[must_use]
    pub fn with_use(mut self, key_use: KeyUse) -> Self {
        self.key_use = Some(key_use);
        self
    }

    /// The algorithm this key is bound to.
    #[must_use]
    pub fn algorithm(&self) -> Algorithm {
        self.alg
    }

    /// The key identifier, if any.
    #[must_use]
    pub fn kid(&self) -> Option<&str> {
        self.kid.as_deref()
    }

    /// The intended use, if declared.
    #[must_use]
    pub fn key_use(&self) -> Option<&KeyUse> {
        self.key_use.as_ref()
    }

    /// Whether the key may sign or verify: no `use`, or `use: sig`.
    #[must_use]
    pub fn is_signature_key(&self) -> bool {
        self.key_use.as_ref().map_or(true, KeyUse::is_signature)
    }

    /// The key material.
    #[must_use]
    pub fn material(&self) -> &KeyMaterial {
        &self.material
    }

    /// Whether this key can sign.
    #[must_use]
    pub fn can_sign(&self) -> bool {
        self.material.can_sign()
    }

    /// The verification half, keeping algorithm, `kid` and `use`.
    #[must_use]
    pub fn to_public(&self) -> Self {
        Self {
            alg: self.alg,
            kid: self.kid.clone(),
            key_use: self.key_use.clone(),
            material: self.material.to_public(),
        }
    }
}

fn rsa_from_pem(pem: &str) -> JwtResult<KeyMaterial> {
    use rsa::pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey};
    use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey};

    if let Ok(key) = RsaPrivateKey::from_pkcs8_pem(pem) {
        return Ok(KeyMaterial::RsaPrivate(key));
    }
    if let Ok(key) = RsaPrivateKey::from_pkcs1_pem(pem) {
        return Ok(KeyMaterial::RsaPrivate(key));
    }
    if let Ok(key) = RsaPublicKey::from_public_key_pem(pem) {
        return Ok(KeyMaterial::RsaPublic(key));
    }
    RsaPublicKey::from_pkcs1_pem(pem)
        .map(KeyMaterial::RsaPublic)
        .map_err(|_| JwtError::invalid_key("PEM does not contain an RSA key"))
}

fn rsa_from_der(der: &[u8]) -> JwtResult<KeyMaterial> {
    use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey};

    if let Ok(key) = RsaPrivateKey::from_pkcs8_der(der) {
        return Ok(KeyMaterial::RsaPrivate(key));
    }
    RsaPublicKey::from_public_key_der(der)
        .map(KeyMaterial::RsaPublic)
        .map_err(|_| JwtError::invalid_key("DER does not contain an RSA key"))
}

fn p256_from_pem(pem: &str) -> JwtResult<KeyMaterial> {
    use p256::pkcs8::{DecodePrivateKey, DecodePublicKey};

    if let Ok(key) = p256::ecdsa::SigningKey::from_pkcs8_pem(pem) {
        return Ok(KeyMaterial::P256Private(key));
    }
    p256::ecdsa::VerifyingKey::from_public_key_pem(pem)
        .map(KeyMaterial::P256Public)
        .map_err(|_| JwtError::invalid_key("PEM does not contain a P-256 key"))
}

fn p256_from_der(der: &[u8]) -> JwtResult<KeyMaterial> {
    use p256::pkcs8::{DecodePrivateKey, DecodePublicKey};

    if let Ok(key) = p256::ecdsa::SigningKey::from_pkcs8_der(der) {
        return Ok(KeyMaterial::P256Private(key));
    }
    p256::ecdsa::VerifyingKey::from_public_key_der(der)
        .map(KeyMaterial::P256Public)
        .map_err(|_| JwtError::invalid_key("DER does not contain a P-256 key"))
}

fn p384_from_pem(pem: &str) -> JwtResult<KeyMaterial> {
    use p384::pkcs8::{DecodePrivateKey, DecodePublicKey};

    if let Ok(key) = p384::ecdsa::SigningKey::from_pkcs8_pem(pem) {
        return Ok(KeyMaterial::P384Private(key));
    }
    p384::ecdsa::VerifyingKey::from_public_key_pem(pem)
        .map(KeyMaterial::P384Public)
        .map_err(|_| JwtError::invalid_key("PEM does not contain a P-384 key"))
}

fn p384_from_der(der: &[u8]) -> JwtResult<KeyMaterial> {
    use p384::pkcs8::{DecodePrivateKey, DecodePublicKey};

    if let Ok(key) = p384::ecdsa::SigningKey::from_pkcs8_der(der) {
        return Ok(KeyMaterial::P384Private(key));
    }
    p384::ecdsa::VerifyingKey::from_public_key_der(der)
        .map(KeyMaterial::P384Public)
        .map_err(|_| JwtError::invalid_key("DER does not contain a P-384 key"))
}

// The P-521 signing types carry no PKCS#8 impls, so keys go through the
// curve-level `SecretKey` / `PublicKey`.
fn p521_from_pem(pem: &str) -> JwtResult<KeyMaterial> {
    use p521::pkcs8::{DecodePrivateKey, DecodePublicKey};

    if let Ok(secret) = p521::SecretKey::from_pkcs8_pem(pem) {
        return p521_private(&secret);
    }
    p521::PublicKey::from_public_key_pem(pem)
        .map_err(|_| JwtError::invalid_key("PEM does not contain a P-521 key"))
        .and_then(|public| p521_public(&public))
}

fn p521_from_der(der: &[u8]) -> JwtResult<KeyMaterial> {
    use p521::pkcs8::{DecodePrivateKey, DecodePublicKey};

    if let Ok(secret) = p521::SecretKey::from_pkcs8_der(der) {
        return p521_private(&secret);
    }
    p521::PublicKey::from_public_key_der(der)
        .map_err(|_| JwtError::invalid_key("DER does not contain a P-521 key"))
        .and_then(|public| p521_public(&public))
}

fn p521_private(secret: &p521::SecretKey) -> JwtResult<KeyMaterial> {
    p521::ecdsa::SigningKey::from_bytes(&secret.to_bytes())
        .map(KeyMaterial::P521Private)
        .map_err(|_| JwtError::invalid_key("invalid P-521 private scalar"))
}

fn p521_public(public: &p521::PublicKey) -> JwtResult<KeyMaterial> {
    p521::ecdsa::VerifyingKey::from_affine(*public.as_affine())
        .map(KeyMaterial::P521Public)
        .map_err(|_| JwtError::invalid_key("invalid P-521 public key"))
}

fn ed25519_from_pem(pem: &str) -> JwtResult<KeyMaterial> {
    use ed25519_dalek::pkcs8::{DecodePrivateKey, DecodePublicKey};

    if let Ok(key) = ed25519_dalek::SigningKey::from_pkcs8_pem(pem) {
        return Ok(KeyMaterial::Ed25519Private(key));
    }
    ed25519_dalek::VerifyingKey::from_public_key_pem(pem)
        .map(KeyMaterial::Ed25519Public)
        .map_err(|_| JwtError::invalid_key("PEM does not contain an Ed25519 key"))
}

fn ed25519_from_der(der: &[u8]) -> JwtResult<KeyMaterial> {
    use ed25519_dalek::pkcs8::{DecodePrivateKey, DecodePublicKey};

    if let Ok(key) = ed25519_dalek::SigningKey::from_pkcs8_der(der) {
        return Ok(KeyMaterial::Ed25519Private(key));
    }
    ed25519_dalek::VerifyingKey::from_public_key_der(der)
        .map(KeyMaterial::Ed25519Public)
        .map_err(|_| JwtError::invalid_key("DER does not contain an Ed25519 key"))
}

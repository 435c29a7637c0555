//! Raw key material behind a [`Jwk`](super::Jwk)

use crate::algorithm::{Algorithm, AlgorithmFamily, Curve};
use rsa::{RsaPrivateKey, RsaPublicKey};
use std::fmt;
use zeroize::Zeroizing;

/// Cryptographic material, one variant per family and role.
///
/// Private and secret variants can sign; every variant can verify (a
/// private key verifies through its public half).
#[derive(Clone)]
pub enum KeyMaterial {
    /// Shared HMAC secret, wiped on drop
    Hmac(Zeroizing<Vec<u8>>),
    /// RSA private key
    RsaPrivate(RsaPrivateKey),
    /// RSA public key
    RsaPublic(RsaPublicKey),
    /// P-256 private scalar
    P256Private(p256::ecdsa::SigningKey),
    /// P-256 public point
    P256Public(p256::ecdsa::VerifyingKey),
    /// P-384 private scalar
    P384Private(p384::ecdsa::SigningKey),
    /// P-384 public point
    P384Public(p384::ecdsa::VerifyingKey),
    /// P-521 private scalar
    P521Private(p521::ecdsa::SigningKey),
    /// P-521 public point
    P521Public(p521::ecdsa::VerifyingKey),
    /// Ed25519 private key
    Ed25519Private(ed25519_dalek::SigningKey),
    /// Ed25519 public key
    Ed25519Public(ed25519_dalek::VerifyingKey),
}

impl KeyMaterial {
    /// Short description used in logs and error messages.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            KeyMaterial::Hmac(_) => "oct",
            KeyMaterial::RsaPrivate(_) => "RSA private",
            KeyMaterial::RsaPublic(_) => "RSA public",
            KeyMaterial::P256Private(_) => "EC P-256 private",
            KeyMaterial::P256Public(_) => "EC P-256 public",
            KeyMaterial::P384Private(_) => "EC P-384 private",
            KeyMaterial::P384Public(_) => "EC P-384 public",
            KeyMaterial::P521Private(_) => "EC P-521 private",
            KeyMaterial::P521Public(_) => "EC P-521 public",
            KeyMaterial::Ed25519Private(_) => "OKP Ed25519 private",
            KeyMaterial::Ed25519Public(_) => "OKP Ed25519 public",
        }
    }

    /// Whether this material can produce signatures.
    #[must_use]
    pub fn can_sign(&self) -> bool {
        !matches!(
            self,
            KeyMaterial::RsaPublic(_)
                | KeyMaterial::P256Public(_)
                | KeyMaterial::P384Public(_)
                | KeyMaterial::P521Public(_)
                | KeyMaterial::Ed25519Public(_)
        )
    }

    /// Whether the material belongs to the family of `alg`.
    #[must_use]
    pub fn is_compatible_with(&self, alg: Algorithm) -> bool {
        match alg.family() {
            AlgorithmFamily::Hmac => matches!(self, KeyMaterial::Hmac(_)),
            AlgorithmFamily::Rsa => {
                matches!(self, KeyMaterial::RsaPrivate(_) | KeyMaterial::RsaPublic(_))
            }
            AlgorithmFamily::Ecdsa(Curve::P256) => {
                matches!(self, KeyMaterial::P256Private(_) | KeyMaterial::P256Public(_))
            }
            AlgorithmFamily::Ecdsa(Curve::P384) => {
                matches!(self, KeyMaterial::P384Private(_) | KeyMaterial::P384Public(_))
            }
            AlgorithmFamily::Ecdsa(Curve::P521) => {
                matches!(self, KeyMaterial::P521Private(_) | KeyMaterial::P521Public(_))
            }
            AlgorithmFamily::EdDsa => matches!(
                self,
                KeyMaterial::Ed25519Private(_) | KeyMaterial::Ed25519Public(_)
            ),
        }
    }

    /// The verification half of this material.
    ///
    /// HMAC secrets are symmetric and come back unchanged.
    #[must_use]
    pub fn to_public(&self) -> KeyMaterial {
        match self {
            KeyMaterial::RsaPrivate(key) => KeyMaterial::RsaPublic(key.to_public_key()),
            KeyMaterial::P256Private(key) => KeyMaterial::P256Public(*key.verifying_key()),
            KeyMaterial::P384Private(key) => KeyMaterial::P384Public(*key.verifying_key()),
            KeyMaterial::P521Private(key) => KeyMaterial::P521Public(key.into()),
            KeyMaterial::Ed25519Private(key) => KeyMaterial::Ed25519Public(key.verifying_key()),
            other => other.clone(),
        }
    }
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("KeyMaterial").field(&self.kind()).finish()
    }
}

//! Token signing
//!
//! The header is always built here: caller fields first, then the key's
//! `alg` and `typ: "JWT"` on top, so the algorithm can never be chosen by
//! anything but the key.

use crate::api::algorithms::sign_message;
use crate::api::keys::validate_key_strength;
use crate::algorithm::Algorithm;
use crate::compact::{append_signature, encode_signing_input};
use crate::error::{JwtError, JwtResult};
use crate::key::{Jwk, KeyMaterial};
use crate::policy::Policy;
use crate::types::{ClaimsPayload, Header};
use rsa::RsaPrivateKey;
use serde::Serialize;
use serde_json::{Map, Value};

/// Produces compact tokens under a [`Policy`].
#[derive(Debug, Clone, Default)]
pub struct Signer {
    policy: Policy,
}

impl Signer {
    /// Signer with the default policy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Signer with an explicit policy.
    #[must_use]
    pub fn with_policy(policy: Policy) -> Self {
        Self { policy }
    }

    /// The policy in force.
    #[must_use]
    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    /// Sign `claims` with `key`, merging optional custom `header` fields.
    ///
    /// # Errors
    /// - `UnsupportedAlgorithm` if the key's algorithm is not allowed
    /// - `SigningError` if the key cannot sign or the primitive fails
    /// - `InvalidKey` if the key is too weak for the policy
    /// - `Serialization` if the claims do not serialize to a JSON object
    pub fn sign<C>(
        &self,
        key: &Jwk,
        claims: &C,
        header: Option<&Map<String, Value>>,
    ) -> JwtResult<String>
    where
        C: Serialize + ?Sized,
    {
        let alg = key.algorithm();
        self.policy.check_algorithm(alg)?;

        if !key.can_sign() {
            return Err(JwtError::signing_error(&format!(
                "{} key cannot sign",
                key.material().kind()
            )));
        }
        if let Some(key_use) = key.key_use().filter(|key_use| !key_use.is_signature()) {
            return Err(JwtError::signing_error(&format!(
                "key is marked for `{}`, not signatures",
                key_use.as_str()
            )));
        }
        validate_key_strength(key, &self.policy)?;

        let payload = claims_object(claims)?;
        let header = Header::for_signing(alg, key.kid(), header)?;

        let signing_input = encode_signing_input(&header, &payload)?;
        let signature = sign_message(alg, key.material(), signing_input.as_bytes())?;

        tracing::debug!(alg = alg.as_str(), kid = header.kid(), "signed token");
        Ok(append_signature(signing_input, &signature))
    }

    /// Sign `claims` as RS256 with an RSA private key.
    ///
    /// # Errors
    /// As [`Signer::sign`].
    pub fn sign_rs256<C>(&self, key: &RsaPrivateKey, claims: &C) -> JwtResult<String>
    where
        C: Serialize + ?Sized,
    {
        let jwk = Jwk::from_rsa_private(Algorithm::RS256, key.clone())?;
        self.sign(&jwk, claims, None)
    }

    /// Sign `claims` as RS256 with a PEM-encoded RSA private key.
    ///
    /// # Errors
    /// `NotAnRsaKey` if the PEM is not an RSA private key, otherwise as
    /// [`Signer::sign`].
    pub fn sign_rs256_pem<C>(&self, pem: &str, claims: &C) -> JwtResult<String>
    where
        C: Serialize + ?Sized,
    {
        let key = Jwk::from_pem(Algorithm::RS256, pem)
            .ok()
            .filter(|key| matches!(key.material(), KeyMaterial::RsaPrivate(_)))
            .ok_or_else(|| JwtError::not_an_rsa_key("PEM does not hold an RSA private key"))?;
        self.sign(&key, claims, None)
    }

    /// Sign `claims` as RS256 with the RSA private material of `key`,
    /// ignoring the algorithm the key was bound to.
    ///
    /// # Errors
    /// `NotAnRsaKey` if the key holds anything but an RSA private key,
    /// otherwise as [`Signer::sign`].
    pub fn sign_rs256_jwk<C>(&self, key: &Jwk, claims: &C) -> JwtResult<String>
    where
        C: Serialize + ?Sized,
    {
        let KeyMaterial::RsaPrivate(rsa) = key.material() else {
            return Err(JwtError::not_an_rsa_key(key.material().kind()));
        };
        self.sign_rs256(rsa, claims)
    }
}

/// Sign with the default policy. See [`Signer::sign`].
///
/// # Errors
/// As [`Signer::sign`].
pub fn sign<C>(key: &Jwk, claims: &C, header: Option<&Map<String, Value>>) -> JwtResult<String>
where
    C: Serialize + ?Sized,
{
    Signer::new().sign(key, claims, header)
}

/// RS256 with the default policy. See [`Signer::sign_rs256`].
///
/// # Errors
/// As [`Signer::sign`].
pub fn sign_rs256<C>(key: &RsaPrivateKey, claims: &C) -> JwtResult<String>
where
    C: Serialize + ?Sized,
{
    Signer::new().sign_rs256(key, claims)
}

/// RS256 from PEM with the default policy. See [`Signer::sign_rs256_pem`].
///
/// # Errors
/// `NotAnRsaKey` or as [`Signer::sign`].
pub fn sign_rs256_pem<C>(pem: &str, claims: &C) -> JwtResult<String>
where
    C: Serialize + ?Sized,
{
    Signer::new().sign_rs256_pem(pem, claims)
}

fn claims_object<C>(claims: &C) -> JwtResult<ClaimsPayload>
where
    C: Serialize + ?Sized,
{
    match serde_json::to_value(claims)? {
        Value::Object(map) => Ok(map),
        other => Err(JwtError::serialization(&format!(
            "claims must serialize to a JSON object, got {}",
            json_type_name(&other)
        ))),
    }
}

/// JSON type name used in diagnostics.
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

//! Token verification
//!
//! Verification picks exactly one key, checks that its algorithm is the one
//! the token declares, and only then runs the primitive over the original
//! `header.payload` text. Selection is first-in-order over the flattened
//! key list:
//!
//! 1. the first key whose `kid` equals the token's `kid`;
//! 2. otherwise the first key whose algorithm equals the token's `alg`,
//!    provided the key or the token carries no `kid`.
//!
//! Keys whose `use` is anything but `sig` never qualify. An empty `kid`
//! counts as absent.

use crate::algorithm::Algorithm;
use crate::api::algorithms::verify_message;
use crate::api::keys::validate_key_strength;
use crate::compact::CompactToken;
use crate::error::{JwtError, JwtResult};
use crate::key::{Jwk, JwkSet};
use crate::policy::Policy;
use crate::types::{ClaimsPayload, Header};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::slice;

/// Where verification keys come from. Sources are flattened in order.
#[derive(Debug, Clone)]
pub enum KeySource<'a> {
    /// A single owned key.
    Key(Jwk),
    /// A single borrowed key.
    KeyRef(&'a Jwk),
    /// A borrowed key set.
    Set(&'a JwkSet),
    /// An owned key set.
    SetOwned(JwkSet),
}

impl KeySource<'_> {
    fn keys(&self) -> &[Jwk] {
        match self {
            KeySource::Key(key) => slice::from_ref(key),
            KeySource::KeyRef(key) => slice::from_ref(*key),
            KeySource::Set(set) => set.keys(),
            KeySource::SetOwned(set) => set.keys(),
        }
    }
}

impl From<Jwk> for KeySource<'_> {
    fn from(key: Jwk) -> Self {
        KeySource::Key(key)
    }
}

impl<'a> From<&'a Jwk> for KeySource<'a> {
    fn from(key: &'a Jwk) -> Self {
        KeySource::KeyRef(key)
    }
}

impl<'a> From<&'a JwkSet> for KeySource<'a> {
    fn from(set: &'a JwkSet) -> Self {
        KeySource::Set(set)
    }
}

impl From<JwkSet> for KeySource<'_> {
    fn from(set: JwkSet) -> Self {
        KeySource::SetOwned(set)
    }
}

/// Verifies compact tokens under a [`Policy`].
#[derive(Debug, Clone, Default)]
pub struct Verifier {
    policy: Policy,
}

impl Verifier {
    /// Verifier with the default policy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Verifier with an explicit policy.
    #[must_use]
    pub fn with_policy(policy: Policy) -> Self {
        Self { policy }
    }

    /// The policy in force.
    #[must_use]
    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    /// Verify `token` against `keys` and return its claims.
    ///
    /// # Errors
    /// - `MalformedToken` for structural problems or critical header parameters
    /// - `UnsupportedAlgorithm` for `none`, unknown or disallowed algorithms
    /// - `NoMatchingKey` when no key qualifies
    /// - `AlgorithmMismatch` when the selected key is bound to another algorithm
    /// - `InvalidKey` when the selected key is too weak for the policy
    /// - `SignatureInvalid` when the signature does not check out
    pub fn verify(&self, token: &str, keys: &[KeySource<'_>]) -> JwtResult<ClaimsPayload> {
        let compact = CompactToken::parse(token)?;
        let header = compact.header()?;
        reject_critical(&header)?;

        let alg: Algorithm = header
            .alg()
            .ok_or_else(|| JwtError::malformed("header is missing alg"))?
            .parse()?;
        self.policy.check_algorithm(alg)?;

        let candidates: Vec<&Jwk> = keys.iter().flat_map(KeySource::keys).collect();
        let token_kid = non_empty(header.kid());

        let Some(key) = select_key(&candidates, token_kid, alg) else {
            tracing::debug!(
                alg = alg.as_str(),
                kid = token_kid,
                candidates = candidates.len(),
                "no key qualifies"
            );
            return Err(JwtError::no_matching_key(token_kid, alg.as_str()));
        };
        tracing::trace!(alg = alg.as_str(), kid = key.kid(), "selected key");

        if key.algorithm() != alg {
            tracing::warn!(
                token_alg = alg.as_str(),
                key_alg = key.algorithm().as_str(),
                kid = key.kid(),
                "algorithm mismatch"
            );
            return Err(JwtError::algorithm_mismatch(
                alg.as_str(),
                key.algorithm().as_str(),
            ));
        }
        validate_key_strength(key, &self.policy)?;

        let signature = compact.signature()?;
        if !verify_message(alg, key.material(), compact.signing_input().as_bytes(), &signature)? {
            tracing::warn!(alg = alg.as_str(), kid = key.kid(), "signature rejected");
            return Err(JwtError::SignatureInvalid);
        }

        compact.payload()
    }

    /// Verify `token` and deserialize its claims into `T`.
    ///
    /// # Errors
    /// As [`Verifier::verify`], plus `Serialization` when the claims do not
    /// fit `T`.
    pub fn verify_into<T>(&self, token: &str, keys: &[KeySource<'_>]) -> JwtResult<T>
    where
        T: DeserializeOwned,
    {
        let claims = self.verify(token, keys)?;
        Ok(serde_json::from_value(Value::Object(claims))?)
    }
}

/// Verify with the default policy. See [`Verifier::verify`].
///
/// # Errors
/// As [`Verifier::verify`].
pub fn verify(token: &str, keys: &[KeySource<'_>]) -> JwtResult<ClaimsPayload> {
    Verifier::new().verify(token, keys)
}

/// Pick the verification key for a token.
pub(crate) fn select_key<'k>(
    keys: &[&'k Jwk],
    kid: Option<&str>,
    alg: Algorithm,
) -> Option<&'k Jwk> {
    let mut usable = keys.iter().copied().filter(|key| key.is_signature_key());

    if let Some(kid) = kid {
        if let Some(key) = usable.clone().find(|key| non_empty(key.kid()) == Some(kid)) {
            return Some(key);
        }
    }

    usable.find(|key| (kid.is_none() || non_empty(key.kid()).is_none()) && key.algorithm() == alg)
}

/// No extension header is understood, so any `crit` makes the token invalid.
fn reject_critical(header: &Header) -> JwtResult<()> {
    match header.get("crit") {
        None => Ok(()),
        Some(_) => Err(JwtError::malformed(
            "critical header parameters are not supported",
        )),
    }
}

fn non_empty(kid: Option<&str>) -> Option<&str> {
    kid.filter(|kid| !kid.is_empty())
}

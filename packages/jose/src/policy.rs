//! Algorithm and key-strength policy
//!
//! The policy is the crate's only configuration. Hosts can build it in code
//! or load it from a JSON document with [`Policy::from_json`].

use crate::algorithm::Algorithm;
use crate::error::{JwtError, JwtResult};
use serde::{Deserialize, Serialize};

/// Which algorithms may be used and how strong keys must be.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Policy {
    /// Algorithms accepted for signing and verification.
    pub allowed_algorithms: Vec<Algorithm>,
    /// Reject HMAC secrets shorter than the hash output and small RSA moduli.
    pub enforce_key_strength: bool,
    /// Minimum RSA modulus size in bits when strength is enforced.
    pub min_rsa_bits: usize,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            allowed_algorithms: Algorithm::ALL.to_vec(),
            enforce_key_strength: true,
            min_rsa_bits: 2048,
        }
    }
}

impl Policy {
    /// Load a policy from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    /// `Serialization` for malformed JSON, unknown fields or unknown algorithms.
    pub fn from_json(json: &str) -> JwtResult<Self> {
        serde_json::from_str(json).map_err(|e| JwtError::serialization(&format!("invalid policy: {e}")))
    }

    /// Restrict the accepted algorithms.
    #[must_use]
    pub fn allow_only(mut self, algorithms: impl IntoIterator<Item = Algorithm>) -> Self {
        self.allowed_algorithms = algorithms.into_iter().collect();
        self
    }

    /// Turn key-strength enforcement on or off.
    #[must_use]
    pub fn enforce_key_strength(mut self, enforce: bool) -> Self {
        self.enforce_key_strength = enforce;
        self
    }

    /// Set the minimum RSA modulus size.
    #[must_use]
    pub fn min_rsa_bits(mut self, bits: usize) -> Self {
        self.min_rsa_bits = bits;
        self
    }

    /// Fail unless `alg` is allowed.
    pub(crate) fn check_algorithm(&self, alg: Algorithm) -> JwtResult<()> {
        if !self.allowed_algorithms.contains(&alg) {
            tracing::warn!(alg = alg.as_str(), "algorithm rejected by policy");
            return Err(JwtError::unsupported_algorithm(alg.as_str()));
        }
        Ok(())
    }
}

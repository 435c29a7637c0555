//! JWT error types
//!
//! Every failure is terminal for the call that produced it: no operation
//! returns partial output, and callers must treat any error as "do not trust
//! this token" or "no token was produced". Messages never carry key material.

use thiserror::Error;

/// JWT operation result type
pub type JwtResult<T> = Result<T, JwtError>;

/// JWT error types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JwtError {
    /// Structural problem: wrong segment count, bad base64url or bad JSON
    #[error("Malformed token: {0}")]
    MalformedToken(String),

    /// Algorithm is unknown, `none`, not implemented, or disallowed by policy
    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// The selected key declares a different algorithm than the token header
    #[error("Algorithm mismatch: token declares {token}, key declares {key}")]
    AlgorithmMismatch {
        /// `alg` from the token header
        token: String,
        /// Algorithm declared by the selected key
        key: String,
    },

    /// No candidate key qualified for the token
    #[error("No matching key for kid={} alg={alg}", .kid.as_deref().unwrap_or("<none>"))]
    NoMatchingKey {
        /// `kid` from the token header, if any
        kid: Option<String>,
        /// `alg` from the token header
        alg: String,
    },

    /// Signature did not verify against the selected key
    #[error("Invalid JWT signature")]
    SignatureInvalid,

    /// A verification key input was neither a key nor a key set
    #[error("Unsupported key type: {type_name} {value}")]
    UnsupportedKeyType {
        /// Type of the offending value
        type_name: String,
        /// Rendered offending value
        value: String,
    },

    /// Header or payload could not be JSON-encoded
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The signing primitive failed or the key cannot sign
    #[error("Signing error: {0}")]
    SigningError(String),

    /// RS256 convenience signing was given something that is not an RSA private key
    #[error("Not an RSA private key: {0}")]
    NotAnRsaKey(String),

    /// Key material is malformed or too weak for its algorithm
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Background task failed
    #[error("Background task failed: {0}")]
    TaskFailed(String),
}

impl JwtError {
    /// Create a malformed token error
    #[inline]
    #[must_use]
    pub fn malformed(msg: &str) -> Self {
        JwtError::MalformedToken(msg.to_string())
    }

    /// Create an unsupported algorithm error
    #[inline]
    #[must_use]
    pub fn unsupported_algorithm(alg: &str) -> Self {
        JwtError::UnsupportedAlgorithm(alg.to_string())
    }

    /// Create an algorithm mismatch error
    #[inline]
    #[must_use]
    pub fn algorithm_mismatch(token: &str, key: &str) -> Self {
        JwtError::AlgorithmMismatch {
            token: token.to_string(),
            key: key.to_string(),
        }
    }

    /// Create a no matching key error
    #[inline]
    #[must_use]
    pub fn no_matching_key(kid: Option<&str>, alg: &str) -> Self {
        JwtError::NoMatchingKey {
            kid: kid.map(str::to_string),
            alg: alg.to_string(),
        }
    }

    /// Create an unsupported key type error
    #[inline]
    #[must_use]
    pub fn unsupported_key_type(type_name: &str, value: &str) -> Self {
        JwtError::UnsupportedKeyType {
            type_name: type_name.to_string(),
            value: value.to_string(),
        }
    }

    /// Create a serialization error
    #[inline]
    #[must_use]
    pub fn serialization(msg: &str) -> Self {
        JwtError::Serialization(msg.to_string())
    }

    /// Create a signing error
    #[inline]
    #[must_use]
    pub fn signing_error(msg: &str) -> Self {
        JwtError::SigningError(msg.to_string())
    }

    /// Create a not-an-RSA-key error
    #[inline]
    #[must_use]
    pub fn not_an_rsa_key(msg: &str) -> Self {
        JwtError::NotAnRsaKey(msg.to_string())
    }

    /// Create an invalid key error
    #[inline]
    #[must_use]
    pub fn invalid_key(msg: &str) -> Self {
        JwtError::InvalidKey(msg.to_string())
    }
}

impl From<serde_json::Error> for JwtError {
    fn from(err: serde_json::Error) -> Self {
        JwtError::Serialization(err.to_string())
    }
}

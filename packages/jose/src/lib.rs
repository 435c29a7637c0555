//! Compact JSON Web Token signing, decoding and verification
//!
//! This crate provides:
//! - `Sign`: claims + key → `b64(header).b64(payload).b64(signature)`
//! - `Decode`: token → claims, with no verification
//! - `Verify`: token + keys / key sets → claims, selecting the key by `kid`
//!   and then by algorithm
//!
//! Supported algorithms are HS256/384/512, RS256/384/512, PS256/384/512,
//! ES256/384/512 and EdDSA (Ed25519). `alg: none` is never accepted, the
//! header's `alg` and `typ` are always written by the signer, and a token is
//! never checked with a key of a different algorithm.
//!
//! ```no_run
//! use cryypt_jose::{Algorithm, Jwk, KeySource};
//! use serde_json::json;
//!
//! # fn main() -> cryypt_jose::JwtResult<()> {
//! let key = Jwk::hmac(Algorithm::HS256, vec![0x42; 32])?.with_kid("primary");
//! let token = cryypt_jose::sign(&key, &json!({"sub": "alice"}), None)?;
//! let claims = cryypt_jose::verify(&token, &[KeySource::KeyRef(&key)])?;
//! assert_eq!(claims["sub"], "alice");
//! # Ok(())
//! # }
//! ```

pub mod algorithm;
pub mod api;
pub mod compact;
mod decoder;
mod error;
pub mod key;
pub mod policy;
mod signer;
mod types;
mod verifier;

pub use algorithm::{Algorithm, AlgorithmFamily, Curve};
pub use api::{async_ops, get_recommended_key_size, host, Module};
pub use compact::CompactToken;
pub use decoder::{decode, decode_header};
pub use error::*;
pub use key::{Jwk, JwkSet, KeyMaterial, KeyUse};
pub use policy::Policy;
pub use signer::{sign, sign_rs256, sign_rs256_pem, Signer};
pub use types::*;
pub use verifier::{verify, KeySource, Verifier};

/// Main entry point for hosts that prefer a single namespace.
pub struct Cryypt;

impl Cryypt {
    /// Signer with the default policy.
    #[must_use]
    pub fn signer() -> Signer {
        Signer::new()
    }

    /// Verifier with the default policy.
    #[must_use]
    pub fn verifier() -> Verifier {
        Verifier::new()
    }

    /// Stateless host module.
    #[must_use]
    pub fn module() -> Module {
        Module
    }
}

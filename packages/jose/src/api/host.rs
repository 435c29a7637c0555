//! Dynamic-value surface for embedding runtimes
//!
//! Keys, payloads and headers arrive as `serde_json::Value`s. A key value is
//! a JWK object (has `kty`) or a JWK Set object (has a `keys` array); any
//! other value is rejected with `UnsupportedKeyType` naming its JSON type.

use crate::error::{JwtError, JwtResult};
use crate::key::{Jwk, JwkSet};
use crate::signer::{self, json_type_name};
use crate::verifier::{self, KeySource};
use crate::decoder;
use serde_json::{Map, Value};

/// Sign `payload` with the JWK in `key`.
///
/// # Errors
/// - `UnsupportedKeyType` if `key` is not a JWK object
/// - `Serialization` if `payload` is not an object or `header` is neither
///   an object nor null
/// - anything [`crate::Signer::sign`] reports
pub fn sign(key: &Value, payload: &Value, header: Option<&Value>) -> JwtResult<String> {
    let key = match key {
        Value::Object(fields) if fields.contains_key("kty") => Jwk::from_value(key)?,
        other => return Err(unsupported(other)),
    };
    let header = header_fields(header)?;
    signer::sign(&key, payload, header)
}

/// Sign `claims` as RS256 with a PEM-encoded RSA private key.
///
/// # Errors
/// `NotAnRsaKey` if the PEM is not an RSA private key.
pub fn sign_rsa(pem: &str, claims: &Value) -> JwtResult<String> {
    signer::sign_rs256_pem(pem, claims)
}

/// Decode a token's payload without verification.
///
/// # Errors
/// `MalformedToken` for structural problems.
pub fn decode(token: &str) -> JwtResult<Value> {
    decoder::decode(token).map(Value::Object)
}

/// Verify `token` against JWK / JWK Set values.
///
/// Values are converted in order and conversion stops at the first one that
/// is not a key.
///
/// # Errors
/// `UnsupportedKeyType` for a non-key value, otherwise as
/// [`crate::Verifier::verify`].
pub fn verify(token: &str, keys: &[Value]) -> JwtResult<Value> {
    let sources = keys
        .iter()
        .map(key_source)
        .collect::<JwtResult<Vec<_>>>()?;
    verifier::verify(token, &sources).map(Value::Object)
}

/// Stateless handle exposing the host operations as methods, for runtimes
/// that register an object rather than free functions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Module;

impl Module {
    /// See [`sign`].
    ///
    /// # Errors
    /// As [`sign`].
    pub fn sign(&self, key: &Value, payload: &Value, header: Option<&Value>) -> JwtResult<String> {
        sign(key, payload, header)
    }

    /// See [`sign_rsa`].
    ///
    /// # Errors
    /// As [`sign_rsa`].
    pub fn sign_rsa(&self, pem: &str, claims: &Value) -> JwtResult<String> {
        sign_rsa(pem, claims)
    }

    /// See [`decode`].
    ///
    /// # Errors
    /// As [`decode`].
    pub fn decode(&self, token: &str) -> JwtResult<Value> {
        decode(token)
    }

    /// See [`verify`].
    ///
    /// # Errors
    /// As [`verify`].
    pub fn verify(&self, token: &str, keys: &[Value]) -> JwtResult<Value> {
        verify(token, keys)
    }
}

fn key_source(value: &Value) -> JwtResult<KeySource<'static>> {
    match value {
        Value::Object(fields) if fields.get("keys").is_some_and(Value::is_array) => {
            JwkSet::from_value(value).map(KeySource::SetOwned)
        }
        Value::Object(fields) if fields.contains_key("kty") => {
            Jwk::from_value(value).map(KeySource::Key)
        }
        other => Err(unsupported(other)),
    }
}

fn header_fields(header: Option<&Value>) -> JwtResult<Option<&Map<String, Value>>> {
    match header {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(fields)) => Ok(Some(fields)),
        Some(other) => Err(JwtError::serialization(&format!(
            "header must be an object, got {}",
            json_type_name(other)
        ))),
    }
}

fn unsupported(value: &Value) -> JwtError {
    JwtError::unsupported_key_type(json_type_name(value), &value.to_string())
}

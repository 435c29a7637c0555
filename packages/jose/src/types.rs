//! JOSE header and claims payload types

use crate::algorithm::Algorithm;
use crate::error::{JwtError, JwtResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Application-defined claim set carried in a token.
///
/// Registered claims such as `exp` or `sub` are carried verbatim and never
/// interpreted.
pub type ClaimsPayload = Map<String, Value>;

/// `typ` value written into every signed header
pub const JWT_TYPE: &str = "JWT";

/// JOSE protected header: a JSON object that always carries `alg` once
/// signed, plus any caller-supplied fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Header(Map<String, Value>);

impl Header {
    /// Build the header for a signing operation.
    ///
    /// Caller fields go in first; `alg` and `typ` are written last so a
    /// caller can never choose the algorithm. The key's `kid` fills in only
    /// when the caller did not provide one.
    pub(crate) fn for_signing(
        alg: Algorithm,
        key_kid: Option<&str>,
        custom: Option<&Map<String, Value>>,
    ) -> JwtResult<Self> {
        let mut fields = custom.cloned().unwrap_or_default();

        match fields.get("kid") {
            Some(Value::String(_)) => {}
            Some(other) => {
                return Err(JwtError::serialization(&format!(
                    "header kid must be a string, got {other}"
                )));
            }
            None => {
                if let Some(kid) = key_kid {
                    fields.insert("kid".to_string(), Value::String(kid.to_string()));
                }
            }
        }

        fields.insert("alg".to_string(), Value::String(alg.as_str().to_string()));
        fields.insert("typ".to_string(), Value::String(JWT_TYPE.to_string()));
        Ok(Self(fields))
    }

    /// Validate a decoded header object.
    pub(crate) fn from_map(fields: Map<String, Value>) -> JwtResult<Self> {
        match fields.get("alg") {
            Some(Value::String(_)) => {}
            Some(_) => return Err(JwtError::malformed("header alg must be a string")),
            None => return Err(JwtError::malformed("header is missing alg")),
        }
        match fields.get("kid") {
            None | Some(Value::Null | Value::String(_)) => {}
            Some(_) => return Err(JwtError::malformed("header kid must be a string")),
        }
        Ok(Self(fields))
    }

    /// The declared `alg` string.
    #[must_use]
    pub fn alg(&self) -> Option<&str> {
        self.0.get("alg").and_then(Value::as_str)
    }

    /// The declared key identifier.
    #[must_use]
    pub fn kid(&self) -> Option<&str> {
        self.0.get("kid").and_then(Value::as_str)
    }

    /// The declared token type.
    #[must_use]
    pub fn typ(&self) -> Option<&str> {
        self.0.get("typ").and_then(Value::as_str)
    }

    /// Any header field by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Borrow the underlying JSON object.
    #[must_use]
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Take the underlying JSON object.
    #[must_use]
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

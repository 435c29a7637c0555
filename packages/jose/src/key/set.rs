//! Ordered key collections (JWK Set, RFC 7517 section 5)

use super::Jwk;
use crate::error::{JwtError, JwtResult};
use serde_json::Value;

/// Ordered collection of keys used during verification.
///
/// Order is significant: key selection takes the first qualifying key.
/// Duplicate `kid`s are allowed.
#[derive(Debug, Clone, Default)]
pub struct JwkSet {
    keys: Vec<Jwk>,
}

impl JwkSet {
    /// Empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a key.
    pub fn push(&mut self, key: Jwk) {
        self.keys.push(key);
    }

    /// Builder-style append.
    #[must_use]
    pub fn with_key(mut self, key: Jwk) -> Self {
        self.keys.push(key);
        self
    }

    /// The keys in order.
    #[must_use]
    pub fn keys(&self) -> &[Jwk] {
        &self.keys
    }

    /// Iterate the keys in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Jwk> {
        self.keys.iter()
    }

    /// Number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether the set holds no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// First key carrying `kid`.
    #[must_use]
    pub fn find_by_kid(&self, kid: &str) -> Option<&Jwk> {
        self.keys.iter().find(|key| key.kid() == Some(kid))
    }

    /// Parse a JWK Set document from JSON text.
    ///
    /// # Errors
    /// See [`JwkSet::from_value`].
    pub fn from_json(json: &str) -> JwtResult<Self> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| JwtError::invalid_key(&format!("JWK Set is not JSON: {e}")))?;
        Self::from_value(&value)
    }

    /// Parse a `{"keys": [...]}` document.
    ///
    /// Members that cannot be used here are skipped, as RFC 7517 section 5
    /// asks: unknown key types or curves, missing or out-of-range members.
    /// The remaining keys keep their document order.
    ///
    /// # Errors
    /// `InvalidKey` if `keys` is missing or not an array.
    pub fn from_value(value: &Value) -> JwtResult<Self> {
        let members = value
            .get("keys")
            .and_then(Value::as_array)
            .ok_or_else(|| JwtError::invalid_key("JWK Set must have a `keys` array"))?;

        let mut keys = Vec::with_capacity(members.len());
        for (index, member) in members.iter().enumerate() {
            match Jwk::from_value(member) {
                Ok(key) => keys.push(key),
                Err(JwtError::UnsupportedAlgorithm(what)) => {
                    tracing::debug!(index, %what, "skipping JWK Set member without a primitive");
                }
                Err(err) => {
                    let kid = member.get("kid").and_then(Value::as_str);
                    tracing::warn!(index, kid, error = %err, "skipping unusable JWK Set member");
                }
            }
        }
        Ok(Self { keys })
    }
}

impl From<Vec<Jwk>> for JwkSet {
    fn from(keys: Vec<Jwk>) -> Self {
        Self { keys }
    }
}

impl FromIterator<Jwk> for JwkSet {
    fn from_iter<I: IntoIterator<Item = Jwk>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a JwkSet {
    type Item = &'a Jwk;
    type IntoIter = std::slice::Iter<'a, Jwk>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys.iter()
    }
}

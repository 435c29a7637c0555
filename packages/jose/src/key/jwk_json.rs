//! JSON Web Key representation (RFC 7517, RFC 7518 section 6, RFC 8037)

use super::{Jwk, KeyMaterial, KeyUse};
use crate::algorithm::Algorithm;
use crate::api::algorithms::utils::{base64_url_decode, base64_url_encode, decode_fixed};
use crate::error::{JwtError, JwtResult};
use rsa::traits::PublicKeyParts;
use rsa::{BigUint, RsaPrivateKey, RsaPublicKey};
use serde::Deserialize;
use serde_json::{Map, Value};
use zeroize::Zeroizing;

/// Largest RSA modulus accepted from JWK JSON. Providers publish 8192-bit
/// keys, above the `rsa` crate's default ceiling of 4096.
const MAX_RSA_BITS: usize = 16384;

/// Wire form of a JWK. Members this crate does not use are ignored.
#[derive(Debug, Deserialize)]
struct RawJwk {
    kty: String,
    kid: Option<String>,
    alg: Option<String>,
    #[serde(rename = "use")]
    key_use: Option<KeyUse>,
    crv: Option<String>,
    k: Option<String>,
    n: Option<String>,
    e: Option<String>,
    d: Option<String>,
    p: Option<String>,
    q: Option<String>,
    x: Option<String>,
    y: Option<String>,
}

impl Jwk {
    /// Parse a JWK from JSON text.
    ///
    /// # Errors
    /// See [`Jwk::from_value`].
    pub fn from_json(json: &str) -> JwtResult<Self> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| JwtError::invalid_key(&format!("JWK is not JSON: {e}")))?;
        Self::from_value(&value)
    }

    /// Parse a JWK from a JSON value.
    ///
    /// When the JWK carries no `alg`, the algorithm is inferred from the key
    /// type: `oct` → HS256, `RSA` → RS256, P-256 → ES256, P-384 → ES384,
    /// P-521 → ES512, Ed25519 → EdDSA.
    ///
    /// # Errors
    /// `UnsupportedAlgorithm` for key types or curves without a primitive,
    /// `InvalidKey` for missing or malformed members.
    pub fn from_value(value: &Value) -> JwtResult<Self> {
        let raw = RawJwk::deserialize(value)
            .map_err(|e| JwtError::invalid_key(&format!("malformed JWK: {e}")))?;

        let declared = raw.alg.as_deref().map(str::parse::<Algorithm>).transpose()?;

        let (material, inferred) = match raw.kty.as_str() {
            "oct" => (parse_oct(&raw)?, Algorithm::HS256),
            "RSA" => (parse_rsa(&raw)?, Algorithm::RS256),
            "EC" => parse_ec(&raw)?,
            "OKP" => (parse_okp(&raw)?, Algorithm::EdDSA),
            other => {
                return Err(JwtError::unsupported_algorithm(&format!("kty {other}")));
            }
        };

        let mut jwk = Jwk::new(declared.unwrap_or(inferred), material)?;
        jwk.kid = raw.kid;
        jwk.key_use = raw.key_use;
        Ok(jwk)
    }

    /// Public JWK JSON for this key, private members omitted.
    ///
    /// # Errors
    /// `InvalidKey` for HMAC keys, whose only member is the secret itself.
    pub fn to_public_json(&self) -> JwtResult<Value> {
        let mut out = Map::new();
        match self.material.to_public() {
            KeyMaterial::RsaPublic(key) => {
                out.insert("kty".into(), "RSA".into());
                out.insert("n".into(), base64_url_encode(&key.n().to_bytes_be()).into());
                out.insert("e".into(), base64_url_encode(&key.e().to_bytes_be()).into());
            }
            KeyMaterial::P256Public(key) => {
                let point = key.to_encoded_point(false);
                out.insert("kty".into(), "EC".into());
                out.insert("crv".into(), "P-256".into());
                insert_coordinates(
                    &mut out,
                    point.x().map(|x| x.as_slice()),
                    point.y().map(|y| y.as_slice()),
                )?;
            }
            KeyMaterial::P384Public(key) => {
                let point = key.to_encoded_point(false);
                out.insert("kty".into(), "EC".into());
                out.insert("crv".into(), "P-384".into());
                insert_coordinates(
                    &mut out,
                    point.x().map(|x| x.as_slice()),
                    point.y().map(|y| y.as_slice()),
                )?;
            }
            KeyMaterial::P521Public(key) => {
                let point = key.to_encoded_point(false);
                out.insert("kty".into(), "EC".into());
                out.insert("crv".into(), "P-521".into());
                insert_coordinates(
                    &mut out,
                    point.x().map(|x| x.as_slice()),
                    point.y().map(|y| y.as_slice()),
                )?;
            }
            KeyMaterial::Ed25519Public(key) => {
                out.insert("kty".into(), "OKP".into());
                out.insert("crv".into(), "Ed25519".into());
                out.insert("x".into(), base64_url_encode(key.as_bytes()).into());
            }
            _ => return Err(JwtError::invalid_key("symmetric keys have no public form")),
        }

        out.insert("alg".into(), self.alg.as_str().into());
        if let Some(kid) = &self.kid {
            out.insert("kid".into(), kid.clone().into());
        }
        if let Some(key_use) = &self.key_use {
            out.insert("use".into(), key_use.as_str().into());
        }
        Ok(Value::Object(out))
    }
}

fn insert_coordinates(
    out: &mut Map<String, Value>,
    x: Option<&[u8]>,
    y: Option<&[u8]>,
) -> JwtResult<()> {
    let (Some(x), Some(y)) = (x, y) else {
        return Err(JwtError::invalid_key("EC public key is the identity point"));
    };
    out.insert("x".into(), base64_url_encode(x).into());
    out.insert("y".into(), base64_url_encode(y).into());
    Ok(())
}

fn required<'a>(member: &'a Option<String>, name: &str, kty: &str) -> JwtResult<&'a str> {
    member
        .as_deref()
        .ok_or_else(|| JwtError::invalid_key(&format!("{kty} JWK is missing `{name}`")))
}

fn big_uint(member: &Option<String>, name: &str) -> JwtResult<BigUint> {
    let encoded = required(member, name, "RSA")?;
    let bytes = Zeroizing::new(
        base64_url_decode(encoded)
            .map_err(|e| JwtError::invalid_key(&format!("RSA `{name}` is not base64url: {e}")))?,
    );
    Ok(BigUint::from_bytes_be(&bytes))
}

fn parse_oct(raw: &RawJwk) -> JwtResult<KeyMaterial> {
    let k = required(&raw.k, "k", "oct")?;
    let secret = base64_url_decode(k)
        .map_err(|e| JwtError::invalid_key(&format!("oct `k` is not base64url: {e}")))?;
    if secret.is_empty() {
        return Err(JwtError::invalid_key("HMAC secret must not be empty"));
    }
    Ok(KeyMaterial::Hmac(Zeroizing::new(secret)))
}

fn parse_rsa(raw: &RawJwk) -> JwtResult<KeyMaterial> {
    let n = big_uint(&raw.n, "n")?;
    let e = big_uint(&raw.e, "e")?;

    if raw.d.is_none() {
        let key = RsaPublicKey::new_with_max_size(n, e, MAX_RSA_BITS)
            .map_err(|err| JwtError::invalid_key(&format!("invalid RSA public key: {err}")))?;
        return Ok(KeyMaterial::RsaPublic(key));
    }

    let d = big_uint(&raw.d, "d")?;
    let p = big_uint(&raw.p, "p")?;
    let q = big_uint(&raw.q, "q")?;
    let key = RsaPrivateKey::from_components(n, e, d, vec![p, q])
        .map_err(|err| JwtError::invalid_key(&format!("invalid RSA private key: {err}")))?;
    key.validate()
        .map_err(|err| JwtError::invalid_key(&format!("inconsistent RSA private key: {err}")))?;
    Ok(KeyMaterial::RsaPrivate(key))
}

fn parse_ec(raw: &RawJwk) -> JwtResult<(KeyMaterial, Algorithm)> {
    let crv = required(&raw.crv, "crv", "EC")?;
    let x = required(&raw.x, "x", "EC")?;
    let y = required(&raw.y, "y", "EC")?;

    match crv {
        "P-256" => {
            let point = uncompressed_point(x, y, 32)?;
            let public = p256::ecdsa::VerifyingKey::from_sec1_bytes(&point)
                .map_err(|_| JwtError::invalid_key("P-256 point is not on the curve"))?;

            let material = match &raw.d {
                None => KeyMaterial::P256Public(public),
                Some(d) => {
                    let d = Zeroizing::new(decode_fixed(d, 32, "EC `d`")?);
                    let private = p256::ecdsa::SigningKey::from_slice(&d)
                        .map_err(|_| JwtError::invalid_key("invalid P-256 private scalar"))?;
                    if *private.verifying_key() != public {
                        return Err(JwtError::invalid_key("EC `d` does not match `x`/`y`"));
                    }
                    KeyMaterial::P256Private(private)
                }
            };
            Ok((material, Algorithm::ES256))
        }
        "P-384" => {
            let point = uncompressed_point(x, y, 48)?;
            let public = p384::ecdsa::VerifyingKey::from_sec1_bytes(&point)
                .map_err(|_| JwtError::invalid_key("P-384 point is not on the curve"))?;

            let material = match &raw.d {
                None => KeyMaterial::P384Public(public),
                Some(d) => {
                    let d = Zeroizing::new(decode_fixed(d, 48, "EC `d`")?);
                    let private = p384::ecdsa::SigningKey::from_slice(&d)
                        .map_err(|_| JwtError::invalid_key("invalid P-384 private scalar"))?;
                    if *private.verifying_key() != public {
                        return Err(JwtError::invalid_key("EC `d` does not match `x`/`y`"));
                    }
                    KeyMaterial::P384Private(private)
                }
            };
            Ok((material, Algorithm::ES384))
        }
        "P-521" => {
            let point = uncompressed_point(x, y, 66)?;
            let public = p521::ecdsa::VerifyingKey::from_sec1_bytes(&point)
                .map_err(|_| JwtError::invalid_key("P-521 point is not on the curve"))?;

            let material = match &raw.d {
                None => KeyMaterial::P521Public(public),
                Some(d) => {
                    let d = Zeroizing::new(decode_fixed(d, 66, "EC `d`")?);
                    let private = p521::ecdsa::SigningKey::from_slice(&d)
                        .map_err(|_| JwtError::invalid_key("invalid P-521 private scalar"))?;
                    // no PartialEq on the P-521 key types
                    let derived = p521::ecdsa::VerifyingKey::from(&private);
                    if derived.to_encoded_point(false).as_bytes() != point.as_slice() {
                        return Err(JwtError::invalid_key("EC `d` does not match `x`/`y`"));
                    }
                    KeyMaterial::P521Private(private)
                }
            };
            Ok((material, Algorithm::ES512))
        }
        other => Err(JwtError::unsupported_algorithm(&format!("curve {other}"))),
    }
}

/// SEC1 uncompressed encoding `04 || x || y` of fixed-width coordinates
fn uncompressed_point(x: &str, y: &str, len: usize) -> JwtResult<Vec<u8>> {
    let x = decode_fixed(x, len, "EC `x`")?;
    let y = decode_fixed(y, len, "EC `y`")?;
    let mut point = Vec::with_capacity(1 + 2 * len);
    point.push(0x04);
    point.extend_from_slice(&x);
    point.extend_from_slice(&y);
    Ok(point)
}

fn parse_okp(raw: &RawJwk) -> JwtResult<KeyMaterial> {
    let crv = required(&raw.crv, "crv", "OKP")?;
    if crv != "Ed25519" {
        return Err(JwtError::unsupported_algorithm(&format!("curve {crv}")));
    }

    let x = decode_fixed(required(&raw.x, "x", "OKP")?, 32, "OKP `x`")?;
    let x: [u8; 32] = x
        .as_slice()
        .try_into()
        .map_err(|_| JwtError::invalid_key("OKP `x` must be 32 bytes"))?;
    let public = ed25519_dalek::VerifyingKey::from_bytes(&x)
        .map_err(|_| JwtError::invalid_key("invalid Ed25519 public key"))?;

    let Some(d) = &raw.d else {
        return Ok(KeyMaterial::Ed25519Public(public));
    };
    let d = Zeroizing::new(decode_fixed(d, 32, "OKP `d`")?);
    let seed: Zeroizing<[u8; 32]> = Zeroizing::new(
        d.as_slice()
            .try_into()
            .map_err(|_| JwtError::invalid_key("OKP `d` must be 32 bytes"))?,
    );
    let private = ed25519_dalek::SigningKey::from_bytes(&seed);
    if private.verifying_key() != public {
        return Err(JwtError::invalid_key("OKP `d` does not match `x`"));
    }
    Ok(KeyMaterial::Ed25519Private(private))
}

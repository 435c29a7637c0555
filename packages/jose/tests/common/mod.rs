//! Shared fixtures for the integration tests

#![allow(dead_code)]

use cryypt_jose::{Algorithm, Jwk, JwkSet};
use once_cell::sync::Lazy;

pub const RSA_A_PEM: &str = include_str!("../fixtures/rsa_a.pem");
pub const RSA_A_PUB_PEM: &str = include_str!("../fixtures/rsa_a.pub.pem");
pub const RSA_B_PEM: &str = include_str!("../fixtures/rsa_b.pem");
pub const RSA_B_PUB_PEM: &str = include_str!("../fixtures/rsa_b.pub.pem");
pub const EC_P256_PEM: &str = include_str!("../fixtures/ec_p256.pem");
pub const EC_P256_PUB_PEM: &str = include_str!("../fixtures/ec_p256.pub.pem");
pub const EC_P384_PEM: &str = include_str!("../fixtures/ec_p384.pem");
pub const EC_P384_PUB_PEM: &str = include_str!("../fixtures/ec_p384.pub.pem");
pub const EC_P521_PEM: &str = include_str!("../fixtures/ec_p521.pem");
pub const EC_P521_PUB_PEM: &str = include_str!("../fixtures/ec_p521.pub.pem");
pub const ED25519_PEM: &str = include_str!("../fixtures/ed25519.pem");
pub const ED25519_PUB_PEM: &str = include_str!("../fixtures/ed25519.pub.pem");

pub const PUBLIC_JWKS: &str = include_str!("../fixtures/public.jwks.json");
pub const RSA_A_PRIVATE_JWK: &str = include_str!("../fixtures/rsa_a.private.jwk.json");
pub const EC_P256_PRIVATE_JWK: &str = include_str!("../fixtures/ec_p256.private.jwk.json");
pub const ED25519_PRIVATE_JWK: &str = include_str!("../fixtures/ed25519.private.jwk.json");
pub const EC_P521_PRIVATE_JWK: &str = include_str!("../fixtures/ec_p521.private.jwk.json");
pub const RSA_8192_PUBLIC_JWK: &str = include_str!("../fixtures/rsa_8192.pub.jwk.json");

/// Parsed once; RSA key parsing is slow in debug builds.
pub static RSA_A: Lazy<Jwk> = Lazy::new(|| {
    Jwk::from_pem(Algorithm::RS256, RSA_A_PEM)
        .expect("rsa_a.pem should parse")
        .with_kid("rsa-a")
});

pub static RSA_B: Lazy<Jwk> = Lazy::new(|| {
    Jwk::from_pem(Algorithm::RS256, RSA_B_PEM)
        .expect("rsa_b.pem should parse")
        .with_kid("rsa-b")
});

pub static JWKS: Lazy<JwkSet> =
    Lazy::new(|| JwkSet::from_json(PUBLIC_JWKS).expect("public.jwks.json should parse"));

pub fn init_test() {
    let _ = env_logger::Builder::from_default_env()
        .is_test(true)
        .try_init();
}

pub fn hmac_key(alg: Algorithm, len: usize) -> Jwk {
    Jwk::hmac(alg, vec![0x42; len]).expect("HMAC key should build")
}

/// Replace the character at `index` of the signature segment with another
/// base64url character.
pub fn tamper_signature(token: &str, index: usize) -> String {
    let split = token.rfind('.').expect("token has a signature segment") + 1;
    let (head, signature) = token.split_at(split);
    let mut bytes = signature.as_bytes().to_vec();
    let at = index % bytes.len();
    bytes[at] = if bytes[at] == b'A' { b'B' } else { b'A' };
    format!("{head}{}", String::from_utf8(bytes).expect("base64url is ASCII"))
}

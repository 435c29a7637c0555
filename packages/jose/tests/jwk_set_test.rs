//! JWK / JWK Set parsing and key selection over real key sets

mod common;

use common::*;
use cryypt_jose::{Algorithm, Jwk, JwkSet, JwtError, KeyMaterial, KeySource, KeyUse, sign, verify};
use serde_json::json;

#[test]
fn public_jwks_parses_in_order() {
    init_test();
    let kids: Vec<_> = JWKS.iter().map(|key| key.kid()).collect();
    assert_eq!(kids, [Some("rsa-a"), Some("ec-1"), Some("ed-1")]);

    let algs: Vec<_> = JWKS.iter().map(Jwk::algorithm).collect();
    assert_eq!(algs, [Algorithm::RS256, Algorithm::ES256, Algorithm::EdDSA]);

    assert_eq!(JWKS.find_by_kid("rsa-a").and_then(Jwk::key_use), Some(&KeyUse::Signature));
    assert!(JWKS.iter().all(|key| !key.can_sign()));
}

#[test]
fn private_jwks_sign_for_the_public_set() {
    init_test();
    for json in [RSA_A_PRIVATE_JWK, EC_P256_PRIVATE_JWK, ED25519_PRIVATE_JWK] {
        let key = Jwk::from_json(json).expect("private JWK parses");
        assert!(key.can_sign());

        let token = sign(&key, &json!({"sub": "alice"}), None).expect("sign");
        let claims = verify(&token, &[KeySource::Set(&JWKS)]).expect("verify by kid");
        assert_eq!(claims["sub"], "alice");
    }
}

#[test]
fn public_json_drops_private_members() {
    let key = Jwk::from_json(EC_P256_PRIVATE_JWK).expect("private JWK parses");
    let public = key.to_public_json().expect("EC keys export");
    let expected = JWKS.find_by_kid("ec-1").expect("ec-1").to_public_json().expect("export");
    assert_eq!(public, expected);
    assert!(public.get("d").is_none());

    let key = Jwk::from_json(RSA_A_PRIVATE_JWK).expect("private JWK parses");
    let public = key.to_public_json().expect("RSA keys export");
    assert_eq!(public["kid"], "rsa-a");
    assert_eq!(public["use"], "sig");
    assert_eq!(public["e"], "AQAB");
    assert!(public.get("d").is_none() && public.get("p").is_none());

    let hmac = hmac_key(Algorithm::HS256, 32);
    assert!(matches!(hmac.to_public_json(), Err(JwtError::InvalidKey(_))));
}

#[test]
fn algorithm_is_inferred_when_absent() {
    let oct = Jwk::from_value(&json!({"kty": "oct", "k": "c2VjcmV0"})).expect("oct JWK");
    assert_eq!(oct.algorithm(), Algorithm::HS256);
    assert!(matches!(oct.material(), KeyMaterial::Hmac(_)));

    let mut ed = serde_json::from_str::<serde_json::Value>(ED25519_PRIVATE_JWK).expect("JSON");
    ed.as_object_mut().expect("object").remove("alg");
    assert_eq!(Jwk::from_value(&ed).expect("OKP JWK").algorithm(), Algorithm::EdDSA);
}

#[test]
fn declared_algorithm_must_fit_the_key_type() {
    let err = Jwk::from_value(&json!({"kty": "oct", "alg": "RS256", "k": "c2VjcmV0"}))
        .expect_err("oct cannot be RS256");
    assert!(matches!(err, JwtError::InvalidKey(_)));

    let err = Jwk::from_value(&json!({"kty": "oct", "alg": "none", "k": "c2VjcmV0"}))
        .expect_err("none is no algorithm");
    assert!(matches!(err, JwtError::UnsupportedAlgorithm(_)));
}

#[test]
fn mismatched_private_members_are_rejected() {
    let mut ec = serde_json::from_str::<serde_json::Value>(EC_P256_PRIVATE_JWK).expect("JSON");
    // valid scalar, wrong key
    ec["d"] = json!("AQIDBAUGBwgJCgsMDQ4PEBESExQVFhcYGRobHB0eHyA");
    assert!(matches!(Jwk::from_value(&ec), Err(JwtError::InvalidKey(_))));
}

#[test]
fn set_skips_unusable_members() {
    init_test();
    let set = JwkSet::from_value(&json!({
        "keys": [
            {"kty": "EC", "crv": "P-521", "x": "AA", "y": "AA"},
            {"kty": "OKP", "crv": "X25519", "x": "AA"},
            {"kty": "RSA", "kid": "no-e", "n": "AQAB"},
            {"kty": "oct", "kid": "h", "k": "c2VjcmV0"}
        ]
    }))
    .expect("set parses");
    assert_eq!(set.len(), 1);
    assert_eq!(set.keys()[0].kid(), Some("h"));

    assert!(matches!(
        JwkSet::from_json(r#"{"key": []}"#),
        Err(JwtError::InvalidKey(_))
    ));
}

#[test]
fn first_key_in_flattened_order_wins() {
    init_test();
    let secret_a = vec![0xA1; 32];
    let secret_b = vec![0xB2; 32];
    let first = Jwk::hmac(Algorithm::HS256, secret_a.clone()).expect("key");
    let second = Jwk::hmac(Algorithm::HS256, secret_b).expect("key");

    // no kid anywhere: the first HS256 key across all sources is used
    let token = sign(&first, &json!({"n": 1}), None).expect("sign");
    let set = JwkSet::new().with_key(second.clone());
    verify(&token, &[KeySource::KeyRef(&first), KeySource::Set(&set)]).expect("first source");
    assert_eq!(
        verify(&token, &[KeySource::Set(&set), KeySource::KeyRef(&first)]),
        Err(JwtError::SignatureInvalid)
    );

    // duplicate kids: only the first is consulted
    let dup_a = Jwk::hmac(Algorithm::HS256, secret_a).expect("key").with_kid("dup");
    let dup_b = second.with_kid("dup");
    let token = sign(&dup_b, &json!({"n": 2}), None).expect("sign");
    let set: JwkSet = vec![dup_a, dup_b].into_iter().collect();
    assert_eq!(
        verify(&token, &[KeySource::SetOwned(set)]),
        Err(JwtError::SignatureInvalid)
    );
}

#[test]
fn kid_match_beats_algorithm_match() {
    let key = Jwk::from_pem(Algorithm::ES256, EC_P256_PEM)
        .expect("P-256 key")
        .with_kid("ec-1");
    let token = sign(&key, &json!({"sub": "alice"}), None).expect("sign");

    // an unrelated ES256 key without a kid comes first but the kid match wins
    let other = p256::ecdsa::SigningKey::from_slice(&[7u8; 32]).expect("valid scalar");
    let decoy = Jwk::new(Algorithm::ES256, KeyMaterial::P256Public(*other.verifying_key()))
        .expect("P-256 public key");
    let set = JwkSet::new().with_key(decoy);
    verify(&token, &[KeySource::Set(&set), KeySource::Set(&JWKS)]).expect("kid match");

    // without the kid match the decoy is selected and fails
    assert_eq!(
        verify(&token, &[KeySource::Set(&set)]),
        Err(JwtError::SignatureInvalid)
    );
}

#[test]
fn encryption_keys_are_never_selected() {
    let key = hmac_key(Algorithm::HS256, 32).with_kid("k1");
    let token = sign(&key, &json!({}), None).expect("sign");

    let enc = key.clone().with_use(KeyUse::Encryption);
    assert!(matches!(
        verify(&token, &[KeySource::Key(enc)]),
        Err(JwtError::NoMatchingKey { .. })
    ));

    let enc_json = json!({"kty": "oct", "kid": "k1", "use": "enc", "k": "QkJCQkJCQkJCQkJCQkJCQkJCQkJCQkJCQkJCQkJCQkI"});
    let enc = Jwk::from_value(&enc_json).expect("oct JWK");
    assert_eq!(enc.key_use(), Some(&KeyUse::Encryption));
    assert!(sign(&enc, &json!({}), None).is_err());
}

#[test]
fn provider_jwks_with_unusual_members_still_verifies() {
    init_test();
    let mut document = serde_json::from_str::<serde_json::Value>(PUBLIC_JWKS).expect("JSON");
    let members = document["keys"].as_array_mut().expect("keys array");
    members.insert(
        0,
        json!({"kty": "oct", "kid": "rsa-a", "use": "tls", "k": "QkJCQkJCQkJCQkJCQkJCQkJCQkJCQkJCQkJCQkJCQkI"}),
    );
    members.push(serde_json::from_str(RSA_8192_PUBLIC_JWK).expect("JSON"));

    let set = JwkSet::from_value(&document).expect("set parses");
    assert_eq!(set.len(), 5);
    assert_eq!(set.keys()[0].key_use(), Some(&KeyUse::Other("tls".to_string())));
    assert_eq!(set.find_by_kid("rsa-8192").map(Jwk::algorithm), Some(Algorithm::RS512));

    // the `tls` key shares the kid but is never selected
    let token = sign(&RSA_A, &json!({"sub": "alice"}), None).expect("sign");
    let claims = verify(&token, &[KeySource::Set(&set)]).expect("rsa-a still verifies");
    assert_eq!(claims["sub"], "alice");

    let tls = set.keys()[0].to_public_json();
    assert!(matches!(tls, Err(JwtError::InvalidKey(_))));
    let exported = set.find_by_kid("rsa-8192").expect("kept").to_public_json().expect("export");
    assert_eq!(exported["use"], "sig");
}

#[test]
fn unknown_use_is_kept_verbatim() {
    let key = Jwk::from_value(&json!({"kty": "EC", "crv": "P-256", "use": "attest",
        "x": "xZrat9y47wwwuyq65BoWYdqzXtqf-CXnrUkycvokszw",
        "y": "_ewjGylyVFE5_rFZNHXndHOgPyVJDrulJGbR_a8d7jc"}))
    .expect("EC JWK");
    assert!(!key.is_signature_key());
    assert_eq!(key.to_public_json().expect("export")["use"], "attest");

    let hmac = hmac_key(Algorithm::HS256, 32).with_use(KeyUse::from("tls".to_string()));
    assert!(matches!(
        sign(&hmac, &json!({}), None),
        Err(JwtError::SigningError(_))
    ));
}

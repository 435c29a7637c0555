//! Dynamic-value host surface

mod common;

use common::*;
use cryypt_jose::{JwtError, Module, host};
use serde_json::{Value, json};

fn jwks() -> Value {
    serde_json::from_str(PUBLIC_JWKS).expect("fixture is JSON")
}

fn private_rsa() -> Value {
    serde_json::from_str(RSA_A_PRIVATE_JWK).expect("fixture is JSON")
}

#[test]
fn sign_and_verify_with_json_keys() {
    init_test();
    let token = host::sign(&private_rsa(), &json!({"sub": "alice"}), None).expect("sign");
    let claims = host::verify(&token, &[jwks()]).expect("verify against JWKS value");
    assert_eq!(claims, json!({"sub": "alice"}));

    // a bare JWK works too
    let public = jwks()["keys"][0].clone();
    assert_eq!(host::verify(&token, &[public]).expect("verify"), claims);
}

#[test]
fn header_may_be_null_or_object() {
    let key = private_rsa();
    let token = host::sign(&key, &json!({}), Some(&Value::Null)).expect("null header");
    assert!(host::verify(&token, &[jwks()]).is_ok());

    let token = host::sign(&key, &json!({}), Some(&json!({"cty": "x", "alg": "HS256"})))
        .expect("object header");
    let header = cryypt_jose::decode_header(&token).expect("header");
    assert_eq!(header.alg(), Some("RS256"));
    assert_eq!(header.get("cty"), Some(&json!("x")));

    let err = host::sign(&key, &json!({}), Some(&json!("cty"))).expect_err("string header");
    assert!(matches!(err, JwtError::Serialization(_)));
}

#[test]
fn non_key_values_name_their_type() {
    let token = host::sign(&private_rsa(), &json!({}), None).expect("sign");

    let err = host::verify(&token, &[json!("not-a-key")]).expect_err("string key");
    assert_eq!(
        err,
        JwtError::UnsupportedKeyType {
            type_name: "string".to_string(),
            value: "\"not-a-key\"".to_string(),
        }
    );

    for (value, type_name) in [
        (json!(42), "number"),
        (json!(true), "bool"),
        (json!(null), "null"),
        (json!([1]), "array"),
        (json!({"use": "sig"}), "object"),
    ] {
        match host::verify(&token, &[value]) {
            Err(JwtError::UnsupportedKeyType { type_name: got, .. }) => assert_eq!(got, type_name),
            other => panic!("expected UnsupportedKeyType, got {other:?}"),
        }
    }

    // conversion stops at the first bad value even if a later one would match
    let err = host::verify(&token, &[json!(1), jwks()]).expect_err("bad first value");
    assert!(matches!(err, JwtError::UnsupportedKeyType { .. }));

    let err = host::sign(&json!("secret"), &json!({}), None).expect_err("string signing key");
    assert!(matches!(err, JwtError::UnsupportedKeyType { .. }));
}

#[test]
fn payload_must_be_an_object() {
    let err = host::sign(&private_rsa(), &json!(["sub"]), None).expect_err("array payload");
    assert!(matches!(err, JwtError::Serialization(_)));
}

#[test]
fn sign_rsa_and_decode() {
    let token = host::sign_rsa(RSA_A_PEM, &json!({"sub": "alice", "admin": true})).expect("sign");
    assert_eq!(host::decode(&token).expect("decode")["admin"], true);

    assert!(matches!(
        host::sign_rsa(EC_P256_PEM, &json!({})),
        Err(JwtError::NotAnRsaKey(_))
    ));
    assert!(matches!(
        host::decode("only.two"),
        Err(JwtError::MalformedToken(_))
    ));
}

#[test]
fn module_object_matches_free_functions() {
    let module = Module;
    let token = module
        .sign(&private_rsa(), &json!({"sub": "carol"}), None)
        .expect("sign");
    assert_eq!(module.decode(&token).expect("decode")["sub"], "carol");
    assert_eq!(module.verify(&token, &[jwks()]).expect("verify")["sub"], "carol");

    let token = module.sign_rsa(RSA_A_PEM, &json!({"sub": "dave"})).expect("sign");
    assert_eq!(module.verify(&token, &[jwks()]).expect("verify")["sub"], "dave");
    assert_eq!(std::mem::size_of::<Module>(), 0);
}

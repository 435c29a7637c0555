//! Property tests: round trips over arbitrary claims and signature tampering

mod common;

use common::*;
use cryypt_jose::{Algorithm, Jwk, JwtError, KeySource, sign, verify};
use once_cell::sync::Lazy;
use proptest::prelude::*;
use serde_json::{Map, Value};

static ES256: Lazy<Jwk> =
    Lazy::new(|| Jwk::from_pem(Algorithm::ES256, EC_P256_PEM).expect("P-256 key"));

fn claim_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        "[a-zA-Z0-9 _.:/-]{0,24}".prop_map(Value::String),
    ];
    leaf.prop_recursive(3, 16, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-z]{1,8}", inner, 0..4)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

fn claims() -> impl Strategy<Value = Map<String, Value>> {
    prop::collection::btree_map("[a-z_]{1,12}", claim_value(), 0..6)
        .prop_map(|m| m.into_iter().collect())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn hmac_roundtrip_preserves_claims(claims in claims()) {
        let key = hmac_key(Algorithm::HS512, 64);
        let token = sign(&key, &claims, None).expect("sign");
        let verified = verify(&token, &[KeySource::KeyRef(&key)]).expect("verify");
        prop_assert_eq!(verified, claims);
    }

    #[test]
    fn ecdsa_roundtrip_preserves_claims(claims in claims()) {
        let token = sign(&*ES256, &claims, None).expect("sign");
        let verified = verify(&token, &[KeySource::Key(ES256.to_public())]).expect("verify");
        prop_assert_eq!(verified, claims);
    }

    #[test]
    fn any_signature_tamper_is_rejected(index in 0usize..128) {
        let key = hmac_key(Algorithm::HS256, 32);
        let token = sign(&key, &serde_json::json!({"sub": "alice"}), None).expect("sign");
        let tampered = tamper_signature(&token, index);
        prop_assert_ne!(&tampered, &token);
        prop_assert_eq!(
            verify(&tampered, &[KeySource::KeyRef(&key)]),
            Err(JwtError::SignatureInvalid)
        );
    }

    #[test]
    fn ed25519_signature_tamper_is_rejected(index in 0usize..86) {
        let key = Jwk::from_pem(Algorithm::EdDSA, ED25519_PEM).expect("Ed25519 key");
        let token = sign(&key, &serde_json::json!({"sub": "alice"}), None).expect("sign");
        let tampered = tamper_signature(&token, index);
        prop_assert_eq!(
            verify(&tampered, &[KeySource::KeyRef(&key)]),
            Err(JwtError::SignatureInvalid)
        );
    }
}

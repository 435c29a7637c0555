//! Sign and verify throughput for the common JWS algorithms

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use cryypt_jose::{Algorithm, Jwk, JwkSet, KeySource, sign, verify};
use serde_json::json;

const RSA_PEM: &str = include_str!("../tests/fixtures/rsa_a.pem");
const EC_P256_PEM: &str = include_str!("../tests/fixtures/ec_p256.pem");
const ED25519_PEM: &str = include_str!("../tests/fixtures/ed25519.pem");

fn keys() -> Vec<(&'static str, Jwk)> {
    vec![
        (
            "HS256",
            Jwk::hmac(Algorithm::HS256, vec![0x42; 32]).expect("HMAC key"),
        ),
        (
            "RS256",
            Jwk::from_pem(Algorithm::RS256, RSA_PEM).expect("RSA key"),
        ),
        (
            "ES256",
            Jwk::from_pem(Algorithm::ES256, EC_P256_PEM).expect("P-256 key"),
        ),
        (
            "EdDSA",
            Jwk::from_pem(Algorithm::EdDSA, ED25519_PEM).expect("Ed25519 key"),
        ),
    ]
}

/// Benchmark token signing per algorithm
fn benchmark_sign(c: &mut Criterion) {
    let mut group = c.benchmark_group("sign");
    let claims = json!({"sub": "alice", "admin": true, "exp": 1_300_819_380});

    for (name, key) in keys() {
        group.bench_with_input(BenchmarkId::from_parameter(name), &key, |b, key| {
            b.iter(|| {
                let token = sign(key, &claims, None).expect("signing should succeed");
                std::hint::black_box(token);
            });
        });
    }
    group.finish();
}

/// Benchmark verification, including key selection over a small set
fn benchmark_verify(c: &mut Criterion) {
    let mut group = c.benchmark_group("verify");
    let claims = json!({"sub": "alice", "admin": true, "exp": 1_300_819_380});

    for (name, key) in keys() {
        let token = sign(&key, &claims, None).expect("signing should succeed");
        let set: JwkSet = keys()
            .into_iter()
            .map(|(_, key)| key.to_public())
            .collect();

        group.bench_with_input(BenchmarkId::from_parameter(name), &token, |b, token| {
            b.iter(|| {
                let claims = verify(token, &[KeySource::Set(&set)])
                    .expect("verification should succeed");
                std::hint::black_box(claims);
            });
        });
    }
    group.finish();
}

criterion_group!(benches, benchmark_sign, benchmark_verify);
criterion_main!(benches);

//! Async signing and verification
//!
//! RSA in particular is CPU-bound, so the synchronous operations run on
//! tokio's blocking pool and report back over a oneshot channel. Must be
//! called from within a tokio runtime.

use crate::error::{JwtError, JwtResult};
use crate::key::{Jwk, JwkSet};
use crate::signer::Signer;
use crate::types::ClaimsPayload;
use crate::verifier::{KeySource, Verifier};
use serde::Serialize;
use serde_json::{Map, Value};
use std::{
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
};
use tokio::sync::oneshot;

/// Future resolving to the result of a blocking JOSE operation.
///
/// If the worker dies before answering the future yields `TaskFailed`.
#[derive(Debug)]
pub struct OperationFuture<T> {
    rx: oneshot::Receiver<JwtResult<T>>,
}

impl<T> OperationFuture<T> {
    pub(crate) fn new(rx: oneshot::Receiver<JwtResult<T>>) -> Self {
        Self { rx }
    }
}

impl<T> Future for OperationFuture<T> {
    type Output = JwtResult<T>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.rx).poll(cx) {
            Poll::Ready(Ok(result)) => Poll::Ready(result),
            Poll::Ready(Err(_)) => Poll::Ready(Err(JwtError::TaskFailed(
                "blocking worker exited without a result".to_string(),
            ))),
            Poll::Pending => Poll::Pending,
        }
    }
}

/// Sign on the blocking pool. See [`Signer::sign`].
pub fn sign<C>(
    signer: Arc<Signer>,
    key: Arc<Jwk>,
    claims: C,
    header: Option<Map<String, Value>>,
) -> OperationFuture<String>
where
    C: Serialize + Send + 'static,
{
    let (tx, rx) = oneshot::channel();
    tokio::task::spawn_blocking(move || {
        let result = signer.sign(&key, &claims, header.as_ref());
        let _ = tx.send(result);
    });
    OperationFuture::new(rx)
}

/// Verify on the blocking pool. See [`Verifier::verify`].
pub fn verify(
    verifier: Arc<Verifier>,
    token: impl Into<String>,
    keys: Arc<JwkSet>,
) -> OperationFuture<ClaimsPayload> {
    let token = token.into();
    let (tx, rx) = oneshot::channel();
    tokio::task::spawn_blocking(move || {
        let result = verifier.verify(&token, &[KeySource::Set(&keys)]);
        let _ = tx.send(result);
    });
    OperationFuture::new(rx)
}

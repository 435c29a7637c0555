//! Compact serialization: `b64(header).b64(payload).b64(signature)`

use crate::api::algorithms::utils::{base64_url_decode, base64_url_encode};
use crate::error::{JwtError, JwtResult};
use crate::types::{ClaimsPayload, Header};
use serde_json::Value;

/// Borrowed view over the three segments of a compact token.
///
/// Nothing here is verified. The segments are kept exactly as received so
/// the signing input is always the original text, never re-encoded JSON.
#[derive(Debug, Clone, Copy)]
pub struct CompactToken<'a> {
    header: &'a str,
    payload: &'a str,
    signature: &'a str,
    signing_input: &'a str,
}

impl<'a> CompactToken<'a> {
    /// Split a token into its three segments.
    ///
    /// # Errors
    /// `MalformedToken` unless the token has exactly three `.`-separated segments.
    pub fn parse(token: &'a str) -> JwtResult<Self> {
        let mut parts = token.split('.');
        let (Some(header), Some(payload), Some(signature), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(JwtError::malformed(
                "compact token must have exactly three segments",
            ));
        };

        let signing_input = &token[..header.len() + 1 + payload.len()];
        Ok(Self {
            header,
            payload,
            signature,
            signing_input,
        })
    }

    /// `b64(header) "." b64(payload)`, the bytes a signature covers.
    #[must_use]
    pub fn signing_input(&self) -> &'a str {
        self.signing_input
    }

    /// Decode the protected header.
    ///
    /// # Errors
    /// `MalformedToken` on bad base64url, bad JSON, a non-object header or a
    /// header without a string `alg`.
    pub fn header(&self) -> JwtResult<Header> {
        let fields = decode_object(self.header, "header")?;
        Header::from_map(fields)
    }

    /// Decode the payload.
    ///
    /// # Errors
    /// `MalformedToken` on bad base64url, bad JSON or a non-object payload.
    pub fn payload(&self) -> JwtResult<ClaimsPayload> {
        decode_object(self.payload, "payload")
    }

    /// Decode the signature bytes.
    ///
    /// A signature segment that is not valid base64url cannot match any key,
    /// so it reports `SignatureInvalid` rather than a structural error.
    ///
    /// # Errors
    /// `SignatureInvalid` on bad base64url.
    pub fn signature(&self) -> JwtResult<Vec<u8>> {
        base64_url_decode(self.signature).map_err(|_| JwtError::SignatureInvalid)
    }
}

/// Serialize header and payload into the signing input.
pub(crate) fn encode_signing_input(header: &Header, payload: &ClaimsPayload) -> JwtResult<String> {
    let header_json = serde_json::to_vec(header)?;
    let payload_json = serde_json::to_vec(payload)?;

    let header_b64 = base64_url_encode(&header_json);
    let payload_b64 = base64_url_encode(&payload_json);

    let mut signing_input = String::with_capacity(header_b64.len() + 1 + payload_b64.len());
    signing_input.push_str(&header_b64);
    signing_input.push('.');
    signing_input.push_str(&payload_b64);
    Ok(signing_input)
}

/// Append the encoded signature to a signing input.
pub(crate) fn append_signature(signing_input: String, signature: &[u8]) -> String {
    let signature_b64 = base64_url_encode(signature);
    let mut token = signing_input;
    token.reserve(1 + signature_b64.len());
    token.push('.');
    token.push_str(&signature_b64);
    token
}

fn decode_object(segment: &str, what: &str) -> JwtResult<ClaimsPayload> {
    let bytes = base64_url_decode(segment)
        .map_err(|e| JwtError::malformed(&format!("{what} is not base64url: {e}")))?;
    match serde_json::from_slice::<Value>(&bytes) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(JwtError::malformed(&format!("{what} is not a JSON object"))),
        Err(e) => Err(JwtError::malformed(&format!("{what} is not JSON: {e}"))),
    }
}

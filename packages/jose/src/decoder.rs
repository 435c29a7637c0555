//! Unverified token inspection
//!
//! Nothing returned from this module has been authenticated. A forged or
//! unsigned token decodes exactly like a genuine one; use
//! [`crate::verify`] before trusting any claim.

use crate::compact::CompactToken;
use crate::error::JwtResult;
use crate::types::{ClaimsPayload, Header};

/// Decode the payload of `token` without checking its signature.
///
/// # Errors
/// `MalformedToken` unless the token has three segments and the payload
/// is a base64url-encoded JSON object.
pub fn decode(token: &str) -> JwtResult<ClaimsPayload> {
    CompactToken::parse(token)?.payload()
}

/// Decode the protected header of `token` without checking its signature.
///
/// Useful for reading `kid` before fetching keys.
///
/// # Errors
/// `MalformedToken` unless the header is a JSON object with a string `alg`.
pub fn decode_header(token: &str) -> JwtResult<Header> {
    CompactToken::parse(token)?.header()
}

//! JWS signature primitives, one module per algorithm family.

mod core;
mod ecdsa;
mod eddsa;
mod hmac;
mod rsa;
pub(crate) mod utils;

pub(crate) use self::core::{sign_message, verify_message};

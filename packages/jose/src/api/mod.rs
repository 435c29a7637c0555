//! Host-facing surfaces and the primitives underneath them
//!
//! `host` speaks dynamic JSON values the way an embedding runtime hands
//! them over; `async_ops` moves the same work onto tokio's blocking pool.

pub(crate) mod algorithms;
pub mod async_ops;
pub mod host;
pub mod keys;

pub use host::Module;
pub use keys::get_recommended_key_size;

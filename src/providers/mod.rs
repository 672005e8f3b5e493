//! Built-in providers
//!
//! A working provider pair so the engine runs out of the box: an in-memory
//! HMAC-SHA256 key store and a serde_json-backed JSON codec. Hosts with
//! their own key management or JSON stack implement the traits in
//! [`crate::provider`] instead.

pub mod hmac;
pub mod json;

pub use hmac::HmacCryptoProvider;
pub use json::SerdeJsonProvider;

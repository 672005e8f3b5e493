//! Verification result object
//!
//! A [`Verifier`] records everything one verification produced: the raw
//! token text, the decoded header/payload JSON, the parsed maps, and the
//! outcome. State produced before a failure is retained so callers can
//! inspect rejected tokens.

use crate::claims::{ClaimMap, ClaimValue, HeaderMap};
use crate::error::Error;

/// The result of verifying one token.
#[derive(Debug, Clone, Default)]
pub struct Verifier {
    pub(crate) ok: bool,
    pub(crate) error: Option<Error>,
    pub(crate) raw_token: String,
    pub(crate) raw_header_json: String,
    pub(crate) raw_payload_json: String,
    pub(crate) header: HeaderMap,
    pub(crate) claims: ClaimMap,
}

impl Verifier {
    /// Whether the token passed signature verification and every policy
    /// check.
    pub fn ok(&self) -> bool {
        self.ok
    }

    /// The first failure observed, if any.
    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    /// The token exactly as handed to `verify`.
    pub fn raw_token(&self) -> &str {
        &self.raw_token
    }

    /// Decoded header JSON text, available once Base64URL decoding
    /// succeeded.
    pub fn raw_header_json(&self) -> &str {
        &self.raw_header_json
    }

    /// Decoded payload JSON text, available once Base64URL decoding
    /// succeeded.
    pub fn raw_payload_json(&self) -> &str {
        &self.raw_payload_json
    }

    /// Parsed header map.
    pub fn header(&self) -> &HeaderMap {
        &self.header
    }

    /// Parsed claim map.
    pub fn claims(&self) -> &ClaimMap {
        &self.claims
    }

    /// Whether a claim of any type is present.
    pub fn has_claim(&self, name: &str) -> bool {
        self.claims.contains_key(name)
    }

    /// A string claim, or `None` when absent or of another type.
    pub fn claim_string(&self, name: &str) -> Option<&str> {
        self.claims.get(name).and_then(ClaimValue::as_str)
    }

    /// An integer claim; floats with a zero fractional part coerce.
    pub fn claim_int(&self, name: &str) -> Option<i64> {
        self.claims.get(name).and_then(ClaimValue::as_int)
    }

    /// A float claim; integers widen.
    pub fn claim_double(&self, name: &str) -> Option<f64> {
        self.claims.get(name).and_then(ClaimValue::as_float)
    }

    /// A boolean claim.
    pub fn claim_bool(&self, name: &str) -> Option<bool> {
        self.claims.get(name).and_then(ClaimValue::as_bool)
    }
}

//! Fluent token construction
//!
//! A [`TokenBuilder`] accumulates one token's header and claims, then signs
//! them through the engine's providers. Signing borrows the builder, so a
//! builder can be inspected after `sign` but is meant for a single token.

use crate::claims::{self, ClaimMap, ClaimValue, HeaderMap};
use crate::engine::Jwt;
use crate::error::{Error, ErrorKind, Result};
use crate::JwtAlg;

/// Accumulator for one signing operation.
///
/// Created by [`Jwt::token`]; starts with the header
/// `{"alg": "HS256", "typ": "JWT"}`.
pub struct TokenBuilder<'a, 'p> {
    engine: &'a Jwt<'p>,
    header: HeaderMap,
    claims: ClaimMap,
}

impl<'a, 'p> TokenBuilder<'a, 'p> {
    pub(crate) fn new(engine: &'a Jwt<'p>) -> Self {
        let mut header = HeaderMap::new();
        header.insert("alg".into(), ClaimValue::from(JwtAlg::HS256.as_str()));
        header.insert("typ".into(), ClaimValue::from("JWT"));
        Self {
            engine,
            header,
            claims: ClaimMap::new(),
        }
    }

    /// Set the signing algorithm (`alg` header).
    pub fn alg(mut self, alg: JwtAlg) -> Self {
        self.header
            .insert("alg".into(), ClaimValue::from(alg.as_str()));
        self
    }

    /// Set the key id (`kid` header) used to select the signing key.
    pub fn kid(mut self, kid: impl Into<String>) -> Self {
        self.header.insert("kid".into(), ClaimValue::from(kid.into()));
        self
    }

    /// Set the token type (`typ` header).
    pub fn typ(mut self, typ: impl Into<String>) -> Self {
        self.header.insert("typ".into(), ClaimValue::from(typ.into()));
        self
    }

    /// Set an arbitrary claim.
    pub fn claim(mut self, name: impl Into<String>, value: impl Into<ClaimValue>) -> Self {
        self.claims.insert(name.into(), value.into());
        self
    }

    /// Set the `iss` claim.
    pub fn issuer(self, value: impl Into<String>) -> Self {
        self.claim("iss", value.into())
    }

    /// Set the `sub` claim.
    pub fn subject(self, value: impl Into<String>) -> Self {
        self.claim("sub", value.into())
    }

    /// Set the `aud` claim.
    pub fn audience(self, value: impl Into<String>) -> Self {
        self.claim("aud", value.into())
    }

    /// Set the `jti` claim.
    pub fn jwt_id(self, value: impl Into<String>) -> Self {
        self.claim("jti", value.into())
    }

    /// Set the `exp` claim (epoch seconds).
    pub fn expires_at(self, epoch_seconds: i64) -> Self {
        self.claim("exp", epoch_seconds)
    }

    /// Set the `nbf` claim (epoch seconds).
    pub fn not_before(self, epoch_seconds: i64) -> Self {
        self.claim("nbf", epoch_seconds)
    }

    /// Set the `iat` claim (epoch seconds).
    pub fn issued_at(self, epoch_seconds: i64) -> Self {
        self.claim("iat", epoch_seconds)
    }

    /// The header as accumulated so far.
    pub fn header(&self) -> &HeaderMap {
        &self.header
    }

    /// The claims as accumulated so far.
    pub fn claims(&self) -> &ClaimMap {
        &self.claims
    }

    /// Drop all claims, keeping the header.
    pub fn clear_claims(&mut self) {
        self.claims.clear();
    }

    /// Serialize, encode, and sign the accumulated token.
    ///
    /// Aborts on the first failure; provider errors propagate unchanged.
    /// The builder's observable state is not mutated.
    pub fn sign(&self) -> Result<String> {
        // 1. The declared algorithm must be present and known
        let alg_name = claims::get_string(&self.header, "alg").ok_or_else(|| {
            Error::new(ErrorKind::UnsupportedAlg, "missing algorithm in token header")
        })?;
        let alg = JwtAlg::from_name(alg_name).ok_or_else(|| {
            Error::new(
                ErrorKind::UnsupportedAlg,
                "unsupported algorithm in token header",
            )
        })?;

        // 2. The key id selects the signing key
        let kid = claims::get_string(&self.header, "kid")
            .ok_or_else(|| Error::new(ErrorKind::KeyNotFound, "missing kid in token header"))?;

        // 3-4. Serialize header and claims
        let header_json = self.engine.json().to_json(&self.header)?;
        let payload_json = self.engine.json().to_json(&self.claims)?;

        // 5-7. Encode both parts and compose the signing input
        let header_b64 = self.engine.crypto().base64url_encode(header_json.as_bytes())?;
        let payload_b64 = self
            .engine
            .crypto()
            .base64url_encode(payload_json.as_bytes())?;
        let signing_input = format!("{header_b64}.{payload_b64}");

        // 8-9. Sign and encode the signature
        let signature = self
            .engine
            .crypto()
            .sign(alg, kid, signing_input.as_bytes())?;
        let signature_b64 = self.engine.crypto().base64url_encode(&signature)?;

        // 10. Compact JWS
        Ok(format!("{signing_input}.{signature_b64}"))
    }
}

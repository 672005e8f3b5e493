//! Signing algorithm identifiers

/// Supported JWS signing algorithms.
///
/// The numeric values are stable so policy lists survive serialization; the
/// canonical string form is the `alg` header value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum JwtAlg {
    /// HMAC with SHA-256
    HS256 = 0,
    /// RSASSA-PKCS1-v1_5 with SHA-256
    RS256 = 1,
    /// ECDSA with P-256 and SHA-256
    ES256 = 2,
    /// Edwards-curve signatures (Ed25519)
    EdDSA = 3,
}

impl JwtAlg {
    /// Parse the canonical `alg` header string.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "HS256" => Some(JwtAlg::HS256),
            "RS256" => Some(JwtAlg::RS256),
            "ES256" => Some(JwtAlg::ES256),
            "EdDSA" => Some(JwtAlg::EdDSA),
            _ => None,
        }
    }

    /// Canonical `alg` header string.
    pub const fn as_str(&self) -> &'static str {
        match self {
            JwtAlg::HS256 => "HS256",
            JwtAlg::RS256 => "RS256",
            JwtAlg::ES256 => "ES256",
            JwtAlg::EdDSA => "EdDSA",
        }
    }
}

impl std::fmt::Display for JwtAlg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Intended use of a key loaded into a crypto provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum KeyUse {
    /// Sign and verify signatures (default)
    Sig = 0,
    /// Reserved for cryptographic operations beyond signing
    Enc = 1,
}

impl Default for KeyUse {
    fn default() -> Self {
        KeyUse::Sig
    }
}

//! Error values shared by the router and the token engine
//!
//! Errors are plain values: a stable kind plus a diagnostic message. The
//! first failure observed aborts the current operation and is returned to
//! the caller unchanged; provider errors bubble up verbatim.

use thiserror::Error;

/// Stable error taxonomy.
///
/// The numeric values are part of the public contract and must not change
/// between versions; `Ok` exists so the full table round-trips through
/// numeric form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ErrorKind {
    /// No error
    Ok = 0,
    /// Token is not three dot-separated non-empty parts
    InvalidFormat,
    /// Base64URL decoding failed
    InvalidBase64Url,
    /// JSON parsing failed
    InvalidJson,
    /// Algorithm missing, unknown, or rejected by policy
    UnsupportedAlg,
    /// Key id missing or no key registered under it
    KeyNotFound,
    /// Signature did not verify
    SignatureMismatch,
    /// Token expired (`exp` plus leeway is in the past)
    Expired,
    /// Token not yet valid (`nbf` minus leeway is in the future)
    NotYetValid,
    /// Issuer claim does not match the expected issuer
    InvalidIssuer,
    /// Audience claim does not match the expected audience
    InvalidAudience,
    /// A claim required by policy is missing
    PolicyViolation,
    /// Failure inside a cryptographic provider
    CryptoError,
    /// Failure inside a JSON provider
    JsonError,
    /// File system failure
    IOError,
    /// Certificate missing or unsupported
    CertificateNotFound,
}

impl ErrorKind {
    /// Stable name for the kind, matching the variant spelling.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Ok => "Ok",
            ErrorKind::InvalidFormat => "InvalidFormat",
            ErrorKind::InvalidBase64Url => "InvalidBase64Url",
            ErrorKind::InvalidJson => "InvalidJson",
            ErrorKind::UnsupportedAlg => "UnsupportedAlg",
            ErrorKind::KeyNotFound => "KeyNotFound",
            ErrorKind::SignatureMismatch => "SignatureMismatch",
            ErrorKind::Expired => "Expired",
            ErrorKind::NotYetValid => "NotYetValid",
            ErrorKind::InvalidIssuer => "InvalidIssuer",
            ErrorKind::InvalidAudience => "InvalidAudience",
            ErrorKind::PolicyViolation => "PolicyViolation",
            ErrorKind::CryptoError => "CryptoError",
            ErrorKind::JsonError => "JsonError",
            ErrorKind::IOError => "IOError",
            ErrorKind::CertificateNotFound => "CertificateNotFound",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An error kind paired with a human-readable diagnostic.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind}: {message}")]
pub struct Error {
    /// Which failure occurred
    pub kind: ErrorKind,
    /// Diagnostic detail; never inspected programmatically
    pub message: String,
}

impl Error {
    /// Build an error value.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Result type alias for fallible httpkit operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_values_are_stable() {
        assert_eq!(ErrorKind::Ok as u16, 0);
        assert_eq!(ErrorKind::InvalidFormat as u16, 1);
        assert_eq!(ErrorKind::InvalidBase64Url as u16, 2);
        assert_eq!(ErrorKind::InvalidJson as u16, 3);
        assert_eq!(ErrorKind::UnsupportedAlg as u16, 4);
        assert_eq!(ErrorKind::KeyNotFound as u16, 5);
        assert_eq!(ErrorKind::SignatureMismatch as u16, 6);
        assert_eq!(ErrorKind::Expired as u16, 7);
        assert_eq!(ErrorKind::NotYetValid as u16, 8);
        assert_eq!(ErrorKind::InvalidIssuer as u16, 9);
        assert_eq!(ErrorKind::InvalidAudience as u16, 10);
        assert_eq!(ErrorKind::PolicyViolation as u16, 11);
        assert_eq!(ErrorKind::CryptoError as u16, 12);
        assert_eq!(ErrorKind::JsonError as u16, 13);
        assert_eq!(ErrorKind::IOError as u16, 14);
        assert_eq!(ErrorKind::CertificateNotFound as u16, 15);
    }

    #[test]
    fn display_includes_kind_and_message() {
        let err = Error::new(ErrorKind::KeyNotFound, "missing kid");
        assert_eq!(err.to_string(), "KeyNotFound: missing kid");
    }
}

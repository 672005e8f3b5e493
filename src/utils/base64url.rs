//! Base64URL encoding/decoding per RFC 4648 §5
//!
//! Thin wrapper around the `base64` crate. The encoder emits unpadded
//! output; the decoder tolerates trailing padding.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

use crate::error::{Error, ErrorKind, Result};

/// Encode bytes as an unpadded Base64URL string.
pub fn encode(input: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(input)
}

/// Decode a Base64URL string, with or without trailing padding.
pub fn decode(input: &str) -> Result<Vec<u8>> {
    let unpadded = input.trim_end_matches('=');
    URL_SAFE_NO_PAD.decode(unpadded).map_err(|err| {
        Error::new(
            ErrorKind::InvalidBase64Url,
            format!("base64url decode failed: {err}"),
        )
    })
}

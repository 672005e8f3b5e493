//! Provider seams
//!
//! The token engine composes two capabilities it does not implement itself:
//! cryptography (keys, signatures, Base64URL) and JSON. Both are consumed
//! through trait objects whose lifetime the caller guarantees; the engine
//! never caches anything a provider owns.

use crate::algorithm::{JwtAlg, KeyUse};
use crate::claims::{ClaimMap, HeaderMap};
use crate::error::Result;

/// Cryptographic capability: a keyed store plus signing primitives.
///
/// Implementations are shared by reference and must be internally
/// thread-safe; all methods therefore take `&self` and use interior
/// mutability for the key store. `sign` and `verify` must not mutate the
/// store. PEM paths are opaque strings; the provider owns all file I/O.
pub trait CryptoProvider: Send + Sync {
    /// Load a private key from a PEM file and register it under `kid`.
    fn load_private_key_pem(&self, kid: &str, pem_path: &str) -> Result<()>;

    /// Load a public key from a PEM file and register it under `kid`.
    fn load_public_key_pem(&self, kid: &str, pem_path: &str, key_use: KeyUse) -> Result<()>;

    /// Load a certificate from a PEM file and register its key under `kid`.
    fn load_certificate_pem(&self, kid: &str, pem_path: &str) -> Result<()>;

    /// Write the private key registered under `kid` to a PEM file.
    fn save_private_key_pem(&self, kid: &str, pem_path: &str) -> Result<()>;

    /// Write the public key registered under `kid` to a PEM file.
    fn save_public_key_pem(&self, kid: &str, pem_path: &str, key_use: KeyUse) -> Result<()>;

    /// Generate a fresh keypair under `kid`. `params` carries
    /// provider-specific generation options and may be empty.
    fn generate_key_pair(&self, kid: &str, alg: JwtAlg, params: &str) -> Result<()>;

    /// Forget the key registered under `kid`.
    fn remove_key(&self, kid: &str) -> Result<()>;

    /// Sign `data` with the key registered under `(alg, kid)`.
    fn sign(&self, alg: JwtAlg, kid: &str, data: &[u8]) -> Result<Vec<u8>>;

    /// Verify `signature` over `data` for `(alg, kid)`.
    fn verify(&self, alg: JwtAlg, kid: &str, data: &[u8], signature: &[u8]) -> Result<()>;

    /// Base64URL-encode `data` (RFC 4648 §5).
    fn base64url_encode(&self, data: &[u8]) -> Result<String>;

    /// Base64URL-decode `text`; padding must be accepted.
    fn base64url_decode(&self, text: &str) -> Result<Vec<u8>>;
}

/// JSON capability: parse and serialize scalar claim maps.
///
/// The engine never inspects JSON text itself; malformed input surfaces as
/// `InvalidJson` from the provider.
pub trait JsonProvider: Send + Sync {
    /// Parse header JSON into a [`HeaderMap`].
    fn parse_header(&self, text: &str) -> Result<HeaderMap>;

    /// Parse payload JSON into a [`ClaimMap`].
    fn parse_claims(&self, text: &str) -> Result<ClaimMap>;

    /// Serialize a map to JSON text.
    fn to_json(&self, values: &ClaimMap) -> Result<String>;
}

//! Token engine
//!
//! [`Jwt`] wires a crypto provider and a JSON provider into a signing and
//! verification pipeline with policy enforcement. The engine owns only its
//! options; keys live in the provider, which is the single source of truth.

use std::path::PathBuf;

use crate::algorithm::{JwtAlg, KeyUse};
use crate::builder::TokenBuilder;
use crate::claims;
use crate::error::{Error, ErrorKind, Result};
use crate::policy::EngineOptions;
use crate::provider::{CryptoProvider, JsonProvider};
use crate::verifier::Verifier;

/// Default private-key file name used by the bootstrap helper.
pub const DEFAULT_PRIVATE_KEY_FILE: &str = "jwt.private.pem";

/// Default public-key file name used by the bootstrap helper.
pub const DEFAULT_PUBLIC_KEY_FILE: &str = "jwt.public.pem";

/// Signing and verification engine over borrowed providers.
///
/// The providers must outlive the engine. The engine is movable but not
/// clonable; concurrent `set_options` and `verify` require external
/// exclusion (see [`EngineOptions::thread_safe`]).
pub struct Jwt<'p> {
    crypto: &'p dyn CryptoProvider,
    json: &'p dyn JsonProvider,
    options: EngineOptions,
}

impl<'p> Jwt<'p> {
    /// Build an engine over the given providers.
    pub fn new(
        crypto: &'p dyn CryptoProvider,
        json: &'p dyn JsonProvider,
        options: EngineOptions,
    ) -> Self {
        Self {
            crypto,
            json,
            options,
        }
    }

    /// Current engine options.
    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Replace the engine options wholesale.
    pub fn set_options(&mut self, options: EngineOptions) {
        self.options = options;
    }

    /// The crypto provider this engine delegates to.
    pub fn crypto(&self) -> &dyn CryptoProvider {
        self.crypto
    }

    /// The JSON provider this engine delegates to.
    pub fn json(&self) -> &dyn JsonProvider {
        self.json
    }

    /// Start building a token to sign with this engine.
    pub fn token(&self) -> TokenBuilder<'_, 'p> {
        TokenBuilder::new(self)
    }

    /// Load a private key from a PEM file into the provider.
    pub fn load_private_key_pem(&self, kid: &str, pem_path: &str) -> Result<()> {
        self.crypto.load_private_key_pem(kid, pem_path)
    }

    /// Load a public key from a PEM file into the provider.
    pub fn load_public_key_pem(&self, kid: &str, pem_path: &str, key_use: KeyUse) -> Result<()> {
        self.crypto.load_public_key_pem(kid, pem_path, key_use)
    }

    /// Load a certificate from a PEM file into the provider.
    pub fn load_certificate_pem(&self, kid: &str, pem_path: &str) -> Result<()> {
        self.crypto.load_certificate_pem(kid, pem_path)
    }

    /// Save the private key registered under `kid` to a PEM file.
    pub fn save_private_key_pem(&self, kid: &str, pem_path: &str) -> Result<()> {
        self.crypto.save_private_key_pem(kid, pem_path)
    }

    /// Save the public key registered under `kid` to a PEM file.
    pub fn save_public_key_pem(&self, kid: &str, pem_path: &str, key_use: KeyUse) -> Result<()> {
        self.crypto.save_public_key_pem(kid, pem_path, key_use)
    }

    /// Generate a fresh keypair under `kid`.
    pub fn generate_key_pair(&self, kid: &str, alg: JwtAlg, params: &str) -> Result<()> {
        self.crypto.generate_key_pair(kid, alg, params)
    }

    /// Forget the key registered under `kid`.
    pub fn remove_key(&self, kid: &str) -> Result<()> {
        self.crypto.remove_key(kid)
    }

    /// Make sure a usable keypair exists next to the running executable.
    ///
    /// When both files already exist they are loaded (private first); when
    /// either is missing a keypair is generated under `kid` and both files
    /// are written. The first failure wins. Falls back to the current
    /// working directory when the executable path cannot be resolved.
    pub fn ensure_key_pair_in_binary_dir(
        &self,
        kid: &str,
        alg: JwtAlg,
        private_name: &str,
        public_name: &str,
        key_use: KeyUse,
        params: &str,
    ) -> Result<()> {
        let dir = binary_dir();
        let private_path = dir.join(private_name);
        let public_path = dir.join(public_name);
        let private_file = private_path.to_string_lossy();
        let public_file = public_path.to_string_lossy();

        if private_path.exists() && public_path.exists() {
            self.crypto.load_private_key_pem(kid, &private_file)?;
            self.crypto.load_public_key_pem(kid, &public_file, key_use)
        } else {
            self.crypto.generate_key_pair(kid, alg, params)?;
            self.crypto.save_private_key_pem(kid, &private_file)?;
            self.crypto.save_public_key_pem(kid, &public_file, key_use)
        }
    }

    /// Verify a compact JWS token against the engine's policy.
    ///
    /// The returned verifier retains whatever raw text and parsed maps
    /// were produced before a failure, for diagnostics.
    pub fn verify(&self, token: &str) -> Verifier {
        let mut verifier = Verifier {
            raw_token: token.to_owned(),
            ..Verifier::default()
        };

        match self.verify_into(token, &mut verifier) {
            Ok(()) => {
                verifier.ok = true;
                verifier.error = None;
            }
            Err(err) => {
                verifier.ok = false;
                verifier.error = Some(err);
            }
        }

        verifier
    }

    fn verify_into(&self, token: &str, verifier: &mut Verifier) -> Result<()> {
        // 1. Exactly three non-empty dot-separated parts
        let mut parts = token.split('.');
        let (header_part, payload_part, signature_part) =
            match (parts.next(), parts.next(), parts.next(), parts.next()) {
                (Some(header), Some(payload), Some(signature), None)
                    if !header.is_empty() && !payload.is_empty() && !signature.is_empty() =>
                {
                    (header, payload, signature)
                }
                _ => {
                    return Err(Error::new(
                        ErrorKind::InvalidFormat,
                        "token must contain exactly 3 parts",
                    ));
                }
            };

        // 2. Decode each part through the provider
        let header_bytes = self.crypto.base64url_decode(header_part)?;
        let payload_bytes = self.crypto.base64url_decode(payload_part)?;
        let signature_bytes = self.crypto.base64url_decode(signature_part)?;

        // 3. Keep the decoded JSON text for diagnostics
        verifier.raw_header_json = String::from_utf8_lossy(&header_bytes).into_owned();
        verifier.raw_payload_json = String::from_utf8_lossy(&payload_bytes).into_owned();

        // 4. Parse header and claims
        verifier.header = self.json.parse_header(&verifier.raw_header_json)?;
        verifier.claims = self.json.parse_claims(&verifier.raw_payload_json)?;

        // 5. Algorithm: present, known, allowed by policy
        let alg_name = claims::get_string(&verifier.header, "alg")
            .ok_or_else(|| Error::new(ErrorKind::UnsupportedAlg, "missing alg header"))?;
        let alg = JwtAlg::from_name(alg_name)
            .ok_or_else(|| Error::new(ErrorKind::UnsupportedAlg, "unknown algorithm"))?;
        if !self.options.policy.allows(alg) {
            return Err(Error::new(
                ErrorKind::UnsupportedAlg,
                "algorithm not allowed by policy",
            ));
        }

        // 6. Key selection
        let kid = claims::get_string(&verifier.header, "kid")
            .ok_or_else(|| Error::new(ErrorKind::KeyNotFound, "missing kid header"))?;

        // 7. Signature binding over the exact wire text
        let signing_input = format!("{header_part}.{payload_part}");
        self.crypto
            .verify(alg, kid, signing_input.as_bytes(), &signature_bytes)?;

        // 8. Claims policy
        self.options.policy.validate(&verifier.claims)
    }
}

/// Directory containing the running executable, or the current working
/// directory when resolution fails.
fn binary_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(PathBuf::from))
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}

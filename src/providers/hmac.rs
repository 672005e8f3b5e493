//! HMAC-SHA256 crypto provider
//!
//! Keys are 32-byte secrets held in memory behind a mutex, keyed by kid.
//! The same secret serves the private and public roles, so the save/load
//! pair mirrors what an asymmetric provider would do with two files.
//! Signature comparison is constant-time.

use std::collections::HashMap;
use std::fs;
use std::sync::Mutex;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use constant_time_eq::constant_time_eq;
use hmac::{Hmac, Mac};
use rand::RngCore;
use sha2::Sha256;

use crate::algorithm::{JwtAlg, KeyUse};
use crate::error::{Error, ErrorKind, Result};
use crate::provider::CryptoProvider;
use crate::utils::base64url;

const SECRET_LEN: usize = 32;
const PEM_LABEL: &str = "HMAC KEY";

/// In-memory HS256 key store and signer.
#[derive(Default)]
pub struct HmacCryptoProvider {
    keys: Mutex<HashMap<String, Vec<u8>>>,
}

impl HmacCryptoProvider {
    /// Provider with an empty key store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an externally supplied secret under `kid`.
    pub fn install_secret(&self, kid: &str, secret: &[u8]) {
        self.keys
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .insert(kid.to_owned(), secret.to_vec());
    }

    fn secret_for(&self, kid: &str) -> Result<Vec<u8>> {
        self.keys
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .get(kid)
            .cloned()
            .ok_or_else(|| Error::new(ErrorKind::KeyNotFound, format!("no key for kid '{kid}'")))
    }

    fn load_secret_file(&self, kid: &str, pem_path: &str) -> Result<()> {
        let secret = read_pem(pem_path)?;
        self.install_secret(kid, &secret);
        Ok(())
    }

    fn save_secret_file(&self, kid: &str, pem_path: &str) -> Result<()> {
        let secret = self.secret_for(kid)?;
        write_pem(pem_path, &secret)
    }
}

fn require_hs256(alg: JwtAlg) -> Result<()> {
    if alg == JwtAlg::HS256 {
        Ok(())
    } else {
        Err(Error::new(
            ErrorKind::UnsupportedAlg,
            format!("the HMAC provider only supports HS256, got {alg}"),
        ))
    }
}

fn compute_mac(secret: &[u8], data: &[u8]) -> Result<Vec<u8>> {
    let mut mac = Hmac::<Sha256>::new_from_slice(secret)
        .map_err(|_| Error::new(ErrorKind::CryptoError, "invalid HMAC key material"))?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}

fn write_pem(path: &str, body: &[u8]) -> Result<()> {
    let encoded = STANDARD.encode(body);
    let mut text = format!("-----BEGIN {PEM_LABEL}-----\n");
    let mut rest = encoded.as_str();
    while !rest.is_empty() {
        let (line, tail) = rest.split_at(rest.len().min(64));
        text.push_str(line);
        text.push('\n');
        rest = tail;
    }
    text.push_str(&format!("-----END {PEM_LABEL}-----\n"));

    fs::write(path, text).map_err(|err| {
        Error::new(
            ErrorKind::IOError,
            format!("cannot write key file '{path}': {err}"),
        )
    })
}

fn read_pem(path: &str) -> Result<Vec<u8>> {
    let text = fs::read_to_string(path).map_err(|err| {
        Error::new(
            ErrorKind::IOError,
            format!("cannot read key file '{path}': {err}"),
        )
    })?;

    let mut body = String::new();
    let mut inside = false;
    for line in text.lines() {
        if line.starts_with("-----BEGIN") {
            inside = true;
            continue;
        }
        if line.starts_with("-----END") {
            break;
        }
        if inside {
            body.push_str(line.trim());
        }
    }

    if body.is_empty() {
        return Err(Error::new(
            ErrorKind::CryptoError,
            format!("no PEM body in '{path}'"),
        ));
    }

    STANDARD.decode(body).map_err(|err| {
        Error::new(
            ErrorKind::CryptoError,
            format!("invalid key material in '{path}': {err}"),
        )
    })
}

impl CryptoProvider for HmacCryptoProvider {
    fn load_private_key_pem(&self, kid: &str, pem_path: &str) -> Result<()> {
        self.load_secret_file(kid, pem_path)
    }

    fn load_public_key_pem(&self, kid: &str, pem_path: &str, _key_use: KeyUse) -> Result<()> {
        self.load_secret_file(kid, pem_path)
    }

    fn load_certificate_pem(&self, _kid: &str, pem_path: &str) -> Result<()> {
        Err(Error::new(
            ErrorKind::CertificateNotFound,
            format!("the HMAC provider does not support certificates ('{pem_path}')"),
        ))
    }

    fn save_private_key_pem(&self, kid: &str, pem_path: &str) -> Result<()> {
        self.save_secret_file(kid, pem_path)
    }

    fn save_public_key_pem(&self, kid: &str, pem_path: &str, _key_use: KeyUse) -> Result<()> {
        self.save_secret_file(kid, pem_path)
    }

    fn generate_key_pair(&self, kid: &str, alg: JwtAlg, _params: &str) -> Result<()> {
        require_hs256(alg)?;
        let mut secret = vec![0u8; SECRET_LEN];
        rand::thread_rng().fill_bytes(&mut secret);
        self.install_secret(kid, &secret);
        Ok(())
    }

    fn remove_key(&self, kid: &str) -> Result<()> {
        self.keys
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .remove(kid);
        Ok(())
    }

    fn sign(&self, alg: JwtAlg, kid: &str, data: &[u8]) -> Result<Vec<u8>> {
        require_hs256(alg)?;
        let secret = self.secret_for(kid)?;
        compute_mac(&secret, data)
    }

    fn verify(&self, alg: JwtAlg, kid: &str, data: &[u8], signature: &[u8]) -> Result<()> {
        require_hs256(alg)?;
        let secret = self.secret_for(kid)?;
        let expected = compute_mac(&secret, data)?;

        if expected.len() != signature.len() || !constant_time_eq(&expected, signature) {
            return Err(Error::new(
                ErrorKind::SignatureMismatch,
                "signature mismatch",
            ));
        }
        Ok(())
    }

    fn base64url_encode(&self, data: &[u8]) -> Result<String> {
        Ok(base64url::encode(data))
    }

    fn base64url_decode(&self, text: &str) -> Result<Vec<u8>> {
        base64url::decode(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_requires_a_registered_key() {
        let provider = HmacCryptoProvider::new();
        let err = provider.sign(JwtAlg::HS256, "nope", b"data").unwrap_err();
        assert_eq!(err.kind, ErrorKind::KeyNotFound);
    }

    #[test]
    fn generate_rejects_non_hmac_algorithms() {
        let provider = HmacCryptoProvider::new();
        let err = provider
            .generate_key_pair("k", JwtAlg::RS256, "")
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnsupportedAlg);
    }

    #[test]
    fn verify_round_trip_and_mismatch() {
        let provider = HmacCryptoProvider::new();
        provider.generate_key_pair("k", JwtAlg::HS256, "").unwrap();

        let signature = provider.sign(JwtAlg::HS256, "k", b"payload").unwrap();
        assert!(provider
            .verify(JwtAlg::HS256, "k", b"payload", &signature)
            .is_ok());

        let err = provider
            .verify(JwtAlg::HS256, "k", b"tampered", &signature)
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::SignatureMismatch);
    }
}

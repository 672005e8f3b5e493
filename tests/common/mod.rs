//! Instrumented fake providers for engine tests
//!
//! The crypto fake signs with a transparent `alg|kid|data` scheme and
//! transports bytes as hex, so every failure mode is reachable without real
//! cryptography. Call counters expose the key-management traffic the
//! bootstrap tests assert on.

use std::collections::HashSet;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use httpkit::claims::{ClaimMap, ClaimValue, HeaderMap};
use httpkit::{CryptoProvider, Error, ErrorKind, JsonProvider, JwtAlg, KeyUse, Result};

#[derive(Default)]
pub struct MockCryptoProvider {
    keys: Mutex<HashSet<String>>,
    generate_calls: AtomicUsize,
    load_private_calls: AtomicUsize,
    load_public_calls: AtomicUsize,
    save_private_calls: AtomicUsize,
    save_public_calls: AtomicUsize,
    last_private_path: Mutex<String>,
    last_public_path: Mutex<String>,
}

impl MockCryptoProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_key(&self, kid: &str) -> bool {
        self.keys.lock().unwrap().contains(kid)
    }

    pub fn generate_calls(&self) -> usize {
        self.generate_calls.load(Ordering::SeqCst)
    }

    pub fn load_private_calls(&self) -> usize {
        self.load_private_calls.load(Ordering::SeqCst)
    }

    pub fn load_public_calls(&self) -> usize {
        self.load_public_calls.load(Ordering::SeqCst)
    }

    pub fn save_private_calls(&self) -> usize {
        self.save_private_calls.load(Ordering::SeqCst)
    }

    pub fn save_public_calls(&self) -> usize {
        self.save_public_calls.load(Ordering::SeqCst)
    }

    pub fn last_private_path(&self) -> String {
        self.last_private_path.lock().unwrap().clone()
    }

    pub fn last_public_path(&self) -> String {
        self.last_public_path.lock().unwrap().clone()
    }

    fn insert_key(&self, kid: &str) {
        self.keys.lock().unwrap().insert(kid.to_owned());
    }

    fn load_from(&self, kid: &str, pem_path: &str, role: &str) -> Result<()> {
        if pem_path.is_empty() || !Path::new(pem_path).exists() {
            return Err(Error::new(
                ErrorKind::IOError,
                format!("{role} key path missing"),
            ));
        }
        self.insert_key(kid);
        Ok(())
    }

    fn save_to(&self, kid: &str, pem_path: &str, contents: &str) -> Result<()> {
        if pem_path.is_empty() || !self.has_key(kid) {
            return Err(Error::new(ErrorKind::KeyNotFound, "key not found"));
        }
        std::fs::write(pem_path, contents)
            .map_err(|err| Error::new(ErrorKind::IOError, format!("cannot write key: {err}")))
    }

    fn pseudo_signature(&self, alg: JwtAlg, kid: &str, data: &[u8]) -> Vec<u8> {
        let mut signature = format!("{}|{kid}|", alg as u8).into_bytes();
        signature.extend_from_slice(data);
        signature
    }
}

impl CryptoProvider for MockCryptoProvider {
    fn load_private_key_pem(&self, kid: &str, pem_path: &str) -> Result<()> {
        self.load_private_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_private_path.lock().unwrap() = pem_path.to_owned();
        self.load_from(kid, pem_path, "private")
    }

    fn load_public_key_pem(&self, kid: &str, pem_path: &str, _key_use: KeyUse) -> Result<()> {
        self.load_public_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_public_path.lock().unwrap() = pem_path.to_owned();
        self.load_from(kid, pem_path, "public")
    }

    fn load_certificate_pem(&self, kid: &str, pem_path: &str) -> Result<()> {
        if pem_path.is_empty() {
            return Err(Error::new(
                ErrorKind::CertificateNotFound,
                "certificate path empty",
            ));
        }
        self.insert_key(kid);
        Ok(())
    }

    fn save_private_key_pem(&self, kid: &str, pem_path: &str) -> Result<()> {
        self.save_private_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_private_path.lock().unwrap() = pem_path.to_owned();
        self.save_to(kid, pem_path, "private-key")
    }

    fn save_public_key_pem(&self, kid: &str, pem_path: &str, _key_use: KeyUse) -> Result<()> {
        self.save_public_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_public_path.lock().unwrap() = pem_path.to_owned();
        self.save_to(kid, pem_path, "public-key")
    }

    fn generate_key_pair(&self, kid: &str, _alg: JwtAlg, _params: &str) -> Result<()> {
        self.generate_calls.fetch_add(1, Ordering::SeqCst);
        self.insert_key(kid);
        Ok(())
    }

    fn remove_key(&self, kid: &str) -> Result<()> {
        self.keys.lock().unwrap().remove(kid);
        Ok(())
    }

    fn sign(&self, alg: JwtAlg, kid: &str, data: &[u8]) -> Result<Vec<u8>> {
        if !self.has_key(kid) {
            return Err(Error::new(ErrorKind::KeyNotFound, "missing kid"));
        }
        Ok(self.pseudo_signature(alg, kid, data))
    }

    fn verify(&self, alg: JwtAlg, kid: &str, data: &[u8], signature: &[u8]) -> Result<()> {
        if !self.has_key(kid) {
            return Err(Error::new(ErrorKind::KeyNotFound, "missing kid"));
        }
        if self.pseudo_signature(alg, kid, data) != signature {
            return Err(Error::new(
                ErrorKind::SignatureMismatch,
                "signature mismatch",
            ));
        }
        Ok(())
    }

    fn base64url_encode(&self, data: &[u8]) -> Result<String> {
        let mut text = String::with_capacity(data.len() * 2);
        for byte in data {
            text.push_str(&format!("{byte:02X}"));
        }
        Ok(text)
    }

    fn base64url_decode(&self, text: &str) -> Result<Vec<u8>> {
        if text.len() % 2 != 0 {
            return Err(Error::new(ErrorKind::InvalidBase64Url, "invalid hex length"));
        }
        let bytes = text.as_bytes();
        let mut data = Vec::with_capacity(bytes.len() / 2);
        for pair in bytes.chunks(2) {
            let hi = hex_nibble(pair[0])?;
            let lo = hex_nibble(pair[1])?;
            data.push((hi << 4) | lo);
        }
        Ok(data)
    }
}

fn hex_nibble(byte: u8) -> Result<u8> {
    match byte {
        b'0'..=b'9' => Ok(byte - b'0'),
        b'A'..=b'F' => Ok(byte - b'A' + 10),
        b'a'..=b'f' => Ok(byte - b'a' + 10),
        _ => Err(Error::new(ErrorKind::InvalidBase64Url, "invalid hex char")),
    }
}

/// Line-oriented stand-in for a JSON codec: `name|t|value` items joined by
/// `;`, where `t` is one of n/b/i/d/s.
#[derive(Default)]
pub struct MockJsonProvider;

impl MockJsonProvider {
    pub fn new() -> Self {
        Self
    }
}

fn write_map(map: &ClaimMap) -> String {
    let mut items = Vec::with_capacity(map.len());
    for (name, value) in map {
        let item = match value {
            ClaimValue::Null => format!("{name}|n|"),
            ClaimValue::Bool(flag) => format!("{name}|b|{}", if *flag { "1" } else { "0" }),
            ClaimValue::Int(int) => format!("{name}|i|{int}"),
            ClaimValue::Float(float) => format!("{name}|d|{float}"),
            ClaimValue::String(text) => format!("{name}|s|{text}"),
        };
        items.push(item);
    }
    items.join(";")
}

fn parse_map(text: &str) -> Result<ClaimMap> {
    let mut map = ClaimMap::new();
    if text.is_empty() {
        return Ok(map);
    }

    for item in text.split(';') {
        let (name, rest) = item
            .split_once('|')
            .ok_or_else(|| Error::new(ErrorKind::InvalidJson, "invalid item"))?;
        let (type_tag, value) = rest
            .split_once('|')
            .ok_or_else(|| Error::new(ErrorKind::InvalidJson, "invalid item"))?;

        let parsed = match type_tag {
            "n" => ClaimValue::Null,
            "b" => ClaimValue::Bool(value == "1"),
            "i" => ClaimValue::Int(
                value
                    .parse()
                    .map_err(|_| Error::new(ErrorKind::InvalidJson, "invalid int"))?,
            ),
            "d" => ClaimValue::Float(
                value
                    .parse()
                    .map_err(|_| Error::new(ErrorKind::InvalidJson, "invalid double"))?,
            ),
            "s" => ClaimValue::String(value.to_owned()),
            _ => return Err(Error::new(ErrorKind::InvalidJson, "invalid type")),
        };
        map.insert(name.to_owned(), parsed);
    }

    Ok(map)
}

impl JsonProvider for MockJsonProvider {
    fn parse_header(&self, text: &str) -> Result<HeaderMap> {
        parse_map(text)
    }

    fn parse_claims(&self, text: &str) -> Result<ClaimMap> {
        parse_map(text)
    }

    fn to_json(&self, values: &ClaimMap) -> Result<String> {
        Ok(write_map(values))
    }
}

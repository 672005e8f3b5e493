//! # httpkit - Trie Router and JWT Engine
//!
//! > Small HTTP application toolkit: a typed-parameter path router and a
//! > provider-driven JWT signing/verification engine.
//!
//! The two cores are independent; a surrounding server can use either one
//! without the other. Both are synchronous and error by value.
//!
//! ## Router
//!
//! Patterns are slash-delimited segments; `<name>` captures anything and
//! `<name:type>` constrains the capture (`int`, `base64id`, `string`,
//! `uuid`, `float`). Literals always beat parameters, and competing
//! parameter types are tried from most to least specific.
//!
//! ```
//! use std::collections::HashMap;
//! use httpkit::router::{HttpMethod, RequestContext, Router};
//!
//! let mut router = Router::new();
//! router.add(HttpMethod::Get, "/users/<id:int>", |_: &mut dyn RequestContext| {});
//!
//! let mut params: HashMap<String, String> = HashMap::new();
//! let route = router
//!     .match_route(HttpMethod::Get, "/users/42", &mut params)
//!     .expect("route matches");
//! assert_eq!(route.pattern(), "/users/<id:int>");
//! assert_eq!(params["id"], "42");
//! ```
//!
//! Middleware attaches globally or per route and controls the chain through
//! an explicit `next` capability; not invoking it short-circuits the rest
//! of the chain.
//!
//! ## JWT engine
//!
//! The engine composes a [`provider::CryptoProvider`] (keys, signatures,
//! Base64URL) and a [`provider::JsonProvider`] behind trait seams, adding
//! the compact-JWS pipeline and policy enforcement (algorithm whitelist,
//! issuer/audience, `exp`/`nbf` with leeway). Built-in providers cover
//! HS256 and serde_json out of the box.
//!
//! ```
//! use httpkit::providers::{HmacCryptoProvider, SerdeJsonProvider};
//! use httpkit::{EngineOptions, Jwt, JwtAlg};
//!
//! let crypto = HmacCryptoProvider::new();
//! let json = SerdeJsonProvider::new();
//! let jwt = Jwt::new(&crypto, &json, EngineOptions::default());
//!
//! jwt.generate_key_pair("k1", JwtAlg::HS256, "").unwrap();
//! let token = jwt
//!     .token()
//!     .alg(JwtAlg::HS256)
//!     .kid("k1")
//!     .issuer("auth0")
//!     .claim("sample", "test")
//!     .expires_at(4_102_444_800) // 2100-01-01
//!     .sign()
//!     .unwrap();
//!
//! let verifier = jwt.verify(&token);
//! assert!(verifier.ok());
//! assert_eq!(verifier.claim_string("iss"), Some("auth0"));
//! ```
//!
//! Keys never live in the engine: every key-management call is a
//! passthrough to the crypto provider, which is the single source of truth.

// Core modules
pub mod error;
pub mod utils;

// Token engine
pub mod algorithm;
mod builder;
pub mod claims;
mod engine;
pub mod policy;
pub mod provider;
pub mod providers;
mod verifier;

// Path router
pub mod router;

// ============================================================================
// PUBLIC API
// ============================================================================

pub use algorithm::{JwtAlg, KeyUse};
pub use builder::TokenBuilder;
pub use claims::{ClaimMap, ClaimValue, HeaderMap};
pub use engine::{Jwt, DEFAULT_PRIVATE_KEY_FILE, DEFAULT_PUBLIC_KEY_FILE};
pub use error::{Error, ErrorKind, Result};
pub use policy::{EngineOptions, Policy};
pub use provider::{CryptoProvider, JsonProvider};
pub use verifier::Verifier;

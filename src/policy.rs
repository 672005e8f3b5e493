//! Verification policy
//!
//! A [`Policy`] describes which tokens a verifier accepts beyond a valid
//! signature: the algorithms it will consider, expected issuer and audience,
//! and the temporal rules for `exp` and `nbf`.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::algorithm::JwtAlg;
use crate::claims::{self, ClaimMap};
use crate::error::{Error, ErrorKind, Result};

/// Rules applied to the claims of a verified token.
#[derive(Debug, Clone, PartialEq)]
pub struct Policy {
    /// Algorithms accepted during verification. Empty means any supported
    /// algorithm.
    pub allowed_algs: Vec<JwtAlg>,
    /// When set, the `iss` claim must be present and equal.
    pub expected_iss: Option<String>,
    /// When set, the `aud` claim must be present and equal.
    pub expected_aud: Option<String>,
    /// Seconds of tolerance added to `exp` and subtracted from `nbf`.
    /// Non-negative.
    pub leeway_seconds: i64,
    /// Require an `exp` claim and enforce it.
    pub require_exp: bool,
    /// Require an `nbf` claim and enforce it.
    pub require_nbf: bool,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            allowed_algs: Vec::new(),
            expected_iss: None,
            expected_aud: None,
            leeway_seconds: 0,
            require_exp: true,
            require_nbf: false,
        }
    }
}

impl Policy {
    /// Whether this policy accepts `alg`. An empty list accepts everything.
    pub fn allows(&self, alg: JwtAlg) -> bool {
        self.allowed_algs.is_empty() || self.allowed_algs.contains(&alg)
    }

    /// Validate a claim map against this policy using the current wall
    /// clock.
    ///
    /// Checks run in a fixed order and the first failure wins: issuer,
    /// audience, expiry, not-before.
    pub(crate) fn validate(&self, claims: &ClaimMap) -> Result<()> {
        if let Some(expected) = &self.expected_iss {
            match claims::get_string(claims, "iss") {
                Some(iss) if iss == expected => {}
                _ => {
                    return Err(Error::new(
                        ErrorKind::InvalidIssuer,
                        "issuer claim does not match policy",
                    ));
                }
            }
        }

        if let Some(expected) = &self.expected_aud {
            match claims::get_string(claims, "aud") {
                Some(aud) if aud == expected => {}
                _ => {
                    return Err(Error::new(
                        ErrorKind::InvalidAudience,
                        "audience claim does not match policy",
                    ));
                }
            }
        }

        let now = current_timestamp();

        if self.require_exp {
            let Some(exp) = claims::get_int(claims, "exp") else {
                return Err(Error::new(
                    ErrorKind::PolicyViolation,
                    "exp claim is required by policy",
                ));
            };
            if now > exp.saturating_add(self.leeway_seconds) {
                return Err(Error::new(ErrorKind::Expired, "token has expired"));
            }
        }

        if self.require_nbf {
            let Some(nbf) = claims::get_int(claims, "nbf") else {
                return Err(Error::new(
                    ErrorKind::PolicyViolation,
                    "nbf claim is required by policy",
                ));
            };
            if now.saturating_add(self.leeway_seconds) < nbf {
                return Err(Error::new(ErrorKind::NotYetValid, "token not valid yet"));
            }
        }

        Ok(())
    }
}

/// Engine-wide configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineOptions {
    /// Verification rules
    pub policy: Policy,
    /// Advisory flag: the host intends to share the engine across threads.
    /// The engine itself does not synchronize; callers replacing options
    /// concurrently with verification must provide their own exclusion.
    pub thread_safe: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self::new(Policy::default())
    }
}

impl EngineOptions {
    /// Options with the given policy and the thread-safety intent set.
    pub fn new(policy: Policy) -> Self {
        Self {
            policy,
            thread_safe: true,
        }
    }
}

/// Current Unix timestamp in seconds.
pub(crate) fn current_timestamp() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_else(|_| std::time::Duration::from_secs(0))
        .as_secs() as i64
}

//! Unverified bearer-token inspection.
//!
//! LIMITATION
//! ==========
//! The signature is never checked. The claims are read only to notice an
//! expired token early; the backend stays the authority and answers 401 for
//! anything it rejects.
//!
//! Payloads are read as base64url first and as standard base64 second, so
//! tokens whose payload carries `+` or `/` still decode.

#[cfg(test)]
#[path = "token_test.rs"]
mod token_test;

use base64::Engine;
use base64::engine::general_purpose::{STANDARD_NO_PAD, URL_SAFE_NO_PAD};
use serde::Deserialize;

/// Claims read from a JWT-shaped token payload. Unknown claims are ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct TokenClaims {
    /// Any JSON number; issuers differ on integer vs float seconds.
    #[serde(default)]
    pub exp: Option<serde_json::Value>,
    #[serde(default)]
    pub uid: Option<serde_json::Value>,
}

impl TokenClaims {
    /// `exp` in seconds since the Unix epoch, when it is a number.
    #[must_use]
    pub fn expires_at(&self) -> Option<f64> {
        self.exp.as_ref().and_then(serde_json::Value::as_f64)
    }
}

/// What the claims say about a token at a given instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenValidity {
    /// Unexpired `exp`, or a `uid` claim without `exp`.
    Valid,
    /// `exp` lies in the past.
    Expired,
    /// Not JWT-shaped, not decodable, or no usable claim.
    Inconclusive,
}

/// How [`TokenValidity::Inconclusive`] is treated when deciding whether a
/// stored session is authenticated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExpiryPolicy {
    /// Trust storage presence when the expiry claim is absent or unparsable.
    /// The backend issues non-standard tokens, so this is the default.
    #[default]
    TrustStoragePresence,
    /// Only a token with a usable, unexpired claim counts.
    RequireValidClaims,
}

impl ExpiryPolicy {
    /// Whether a token with `validity` may back an authenticated session.
    #[must_use]
    pub fn admits(self, validity: TokenValidity) -> bool {
        match (self, validity) {
            (_, TokenValidity::Valid) => true,
            (_, TokenValidity::Expired) => false,
            (Self::TrustStoragePresence, TokenValidity::Inconclusive) => true,
            (Self::RequireValidClaims, TokenValidity::Inconclusive) => false,
        }
    }

    /// Parse a policy name as used in configuration.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "trust_storage" => Some(Self::TrustStoragePresence),
            "require_claims" => Some(Self::RequireValidClaims),
            _ => None,
        }
    }
}

/// Decode the payload segment of a `header.payload.signature` token.
///
/// Returns `None` for anything that is not three segments of base64 JSON.
/// Trailing `=` padding is tolerated.
#[must_use]
pub fn decode_claims(token: &str) -> Option<TokenClaims> {
    let mut parts = token.split('.');
    let (Some(_header), Some(payload), Some(_sig), None) = (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return None;
    };
    let payload = payload.trim_end_matches('=');
    let bytes = URL_SAFE_NO_PAD
        .decode(payload)
        .or_else(|_| STANDARD_NO_PAD.decode(payload))
        .ok()?;
    serde_json::from_slice(&bytes).ok()
}

/// Evaluate `token` against the clock `now` (seconds since the Unix epoch).
#[must_use]
pub fn evaluate(token: &str, now: u64) -> TokenValidity {
    let Some(claims) = decode_claims(token) else {
        return TokenValidity::Inconclusive;
    };
    #[allow(clippy::cast_precision_loss)]
    let now = now as f64;
    match claims.expires_at() {
        Some(exp) if exp < now => TokenValidity::Expired,
        Some(_) => TokenValidity::Valid,
        None if claims.uid.as_ref().is_some_and(|uid| !uid.is_null()) => TokenValidity::Valid,
        None => TokenValidity::Inconclusive,
    }
}

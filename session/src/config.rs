//! Portal configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use crate::token::ExpiryPolicy;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8080/api";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown PORTAL_TOKEN_POLICY: {0} (expected 'trust_storage' or 'require_claims')")]
    UnknownPolicy(String),
    #[error("PORTAL_API_URL must not be empty")]
    EmptyApiUrl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortalConfig {
    /// API base URL without a trailing slash.
    pub api_url: String,
    pub token_policy: ExpiryPolicy,
    pub timeouts: Timeouts,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self { api_url: DEFAULT_API_URL.to_owned(), token_policy: ExpiryPolicy::default(), timeouts: Timeouts::default() }
    }
}

impl PortalConfig {
    /// Build config from environment variables.
    ///
    /// Optional:
    /// - `PORTAL_API_URL`: API base URL (default `http://127.0.0.1:8080/api`)
    /// - `PORTAL_TOKEN_POLICY`: `trust_storage` (default) or `require_claims`
    /// - `PORTAL_REQUEST_TIMEOUT_SECS`: default 30
    /// - `PORTAL_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for an unknown policy or a blank API URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_url = match std::env::var("PORTAL_API_URL") {
            Ok(raw) => normalize_api_url(&raw)?,
            Err(_) => DEFAULT_API_URL.to_owned(),
        };
        let token_policy = parse_policy(std::env::var("PORTAL_TOKEN_POLICY").ok().as_deref())?;
        let timeouts = Timeouts {
            request_secs: env_parse_u64("PORTAL_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_secs: env_parse_u64("PORTAL_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
        };
        Ok(Self { api_url, token_policy, timeouts })
    }
}

/// Trim whitespace and trailing slashes from an API base URL.
///
/// # Errors
///
/// Returns [`ConfigError::EmptyApiUrl`] if nothing is left.
pub fn normalize_api_url(raw: &str) -> Result<String, ConfigError> {
    let url = raw.trim().trim_end_matches('/');
    if url.is_empty() {
        return Err(ConfigError::EmptyApiUrl);
    }
    Ok(url.to_owned())
}

/// Parse a policy name; `None` selects the default.
///
/// # Errors
///
/// Returns [`ConfigError::UnknownPolicy`] for unrecognized names.
pub fn parse_policy(raw: Option<&str>) -> Result<ExpiryPolicy, ConfigError> {
    match raw {
        None => Ok(ExpiryPolicy::default()),
        Some(name) => ExpiryPolicy::parse(name).ok_or_else(|| ConfigError::UnknownPolicy(name.to_owned())),
    }
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

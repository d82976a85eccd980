use super::*;

/// # Safety
/// Tests must run with `--test-threads=1` to avoid env races.
unsafe fn clear_portal_env() {
    unsafe {
        std::env::remove_var("PORTAL_API_URL");
        std::env::remove_var("PORTAL_TOKEN_POLICY");
        std::env::remove_var("PORTAL_REQUEST_TIMEOUT_SECS");
        std::env::remove_var("PORTAL_CONNECT_TIMEOUT_SECS");
    }
}

#[test]
fn from_env_defaults_and_overrides() {
    unsafe { clear_portal_env() };
    let cfg = PortalConfig::from_env().unwrap();
    assert_eq!(cfg, PortalConfig::default());
    assert_eq!(cfg.api_url, DEFAULT_API_URL);
    assert_eq!(cfg.token_policy, ExpiryPolicy::TrustStoragePresence);

    unsafe {
        std::env::set_var("PORTAL_API_URL", " https://survey.example.gov/api/ ");
        std::env::set_var("PORTAL_TOKEN_POLICY", "require_claims");
        std::env::set_var("PORTAL_REQUEST_TIMEOUT_SECS", "45");
        std::env::set_var("PORTAL_CONNECT_TIMEOUT_SECS", "not-a-number");
    }
    let cfg = PortalConfig::from_env().unwrap();
    assert_eq!(cfg.api_url, "https://survey.example.gov/api");
    assert_eq!(cfg.token_policy, ExpiryPolicy::RequireValidClaims);
    assert_eq!(cfg.timeouts, Timeouts { request_secs: 45, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS });

    unsafe {
        std::env::set_var("PORTAL_TOKEN_POLICY", "lenient");
    }
    assert!(matches!(PortalConfig::from_env(), Err(ConfigError::UnknownPolicy(p)) if p == "lenient"));

    unsafe { clear_portal_env() };
}

#[test]
fn normalize_api_url_rejects_blank() {
    assert!(matches!(normalize_api_url(" / "), Err(ConfigError::EmptyApiUrl)));
    assert_eq!(normalize_api_url("http://h/api//").unwrap(), "http://h/api");
}

#[test]
fn parse_policy_none_is_default() {
    assert_eq!(parse_policy(None).unwrap(), ExpiryPolicy::TrustStoragePresence);
    assert_eq!(parse_policy(Some("trust_storage")).unwrap(), ExpiryPolicy::TrustStoragePresence);
}

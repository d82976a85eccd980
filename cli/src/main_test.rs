use super::*;
use session::ExpiryPolicy;
use session::store::{TOKEN_KEY, USER_KEY};

fn temp_state_file() -> PathBuf {
    std::env::temp_dir().join(format!("portal-cli-{}.json", uuid::Uuid::new_v4()))
}

#[test]
fn resolve_config_applies_flag_overrides() {
    let config = resolve_config(PortalConfig::default(), Some("https://mis.example/api/"), Some("require_claims")).unwrap();
    assert_eq!(config.api_url, "https://mis.example/api");
    assert_eq!(config.token_policy, ExpiryPolicy::RequireValidClaims);
}

#[test]
fn resolve_config_without_flags_keeps_environment_values() {
    let base = PortalConfig { api_url: "http://env/api".to_owned(), ..PortalConfig::default() };
    assert_eq!(resolve_config(base.clone(), None, None).unwrap(), base);
}

#[test]
fn resolve_config_rejects_unknown_policy() {
    let err = resolve_config(PortalConfig::default(), None, Some("always")).unwrap_err();
    assert!(matches!(err, ConfigError::UnknownPolicy(p) if p == "always"));
}

#[test]
fn api_url_joins_with_single_slash() {
    assert_eq!(api_url("http://h/api", "Adminrural/reports"), "http://h/api/Adminrural/reports");
    assert_eq!(api_url("http://h/api/", "/Adminrural/reports"), "http://h/api/Adminrural/reports");
}

#[test]
fn cli_parses_login_and_get() {
    let cli = Cli::try_parse_from(["portal-cli", "--base-url", "http://h/api", "login", "--username", "admin", "--password", "pw"])
        .unwrap();
    assert_eq!(cli.base_url.as_deref(), Some("http://h/api"));
    assert!(matches!(cli.command, Command::Login { ref username, .. } if username == "admin"));

    let cli = Cli::try_parse_from(["portal-cli", "get", "Adminrural/misReport"]).unwrap();
    assert!(matches!(cli.command, Command::Get { ref path } if path == "Adminrural/misReport"));
    assert_eq!(command_route(&cli.command), "/cli/get");
}

#[test]
fn terminal_navigator_tracks_redirect() {
    let nav = TerminalNavigator::new(&Command::Whoami);
    assert_eq!(nav.current_route(), "/dashboard");
    nav.navigate("/login");
    assert_eq!(nav.current_route(), "/login");
}

#[test]
fn state_file_carries_session_between_runs() {
    let path = temp_state_file();
    {
        let durable: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(&path).unwrap());
        durable.set(TOKEN_KEY, "tok").unwrap();
        durable.set(USER_KEY, r#"{"id":1,"username":"admin","email":"admin@tnilp.com","fullName":"A","role":"Supervisor","permissions":["survey_data_validate"],"department":"Survey Management","lastLogin":0,"isActive":true}"#).unwrap();
        Preferences::new(durable.as_ref()).set_language("ta").unwrap();
    }

    let durable: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(&path).unwrap());
    let session = SessionService::new(durable.clone(), "http://h/api");
    assert!(session.is_authenticated());
    assert!(session.has_permission("survey_data_validate"));
    assert_eq!(Preferences::new(durable.as_ref()).language(), "ta");

    session.clear_session();
    let reopened = FileStore::open(&path).unwrap();
    assert!(reopened.get(TOKEN_KEY).is_none());
    assert_eq!(reopened.get(session::store::LANGUAGE_KEY).as_deref(), Some("ta"));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn yes_no_renders_bool() {
    assert_eq!(yes_no(true), "yes");
    assert_eq!(yes_no(false), "no");
}

mod transport;

#[cfg(test)]
#[path = "main_test.rs"]
mod main_test;

use std::cell::RefCell;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde_json::Value;
use session::config::{ConfigError, PortalConfig, normalize_api_url, parse_policy};
use session::store::Preferences;
use session::{
    ApiClient, ApiRequest, FileStore, KeyValueStore, MemoryStore, Navigator, RequestAuthorizer, SessionError,
    SessionService, StoreError,
};
use tracing_subscriber::EnvFilter;

use crate::transport::ReqwestTransport;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("state file error: {0}")]
    Store(#[from] StoreError),
    #[error("http client setup failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("not signed in; run `portal-cli login` first")]
    NotSignedIn,
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "portal-cli", about = "Rural survey portal session CLI")]
struct Cli {
    /// API base URL; overrides PORTAL_API_URL.
    #[arg(long)]
    base_url: Option<String>,

    /// `trust_storage` or `require_claims`; overrides PORTAL_TOKEN_POLICY.
    #[arg(long)]
    token_policy: Option<String>,

    /// Where the session is kept between invocations.
    #[arg(long, env = "PORTAL_STATE_FILE", default_value = ".portal-session.json")]
    state_file: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and store the session.
    Login {
        #[arg(long, env = "PORTAL_USERNAME")]
        username: String,
        #[arg(long, env = "PORTAL_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored session.
    Logout,
    /// Print the signed-in user.
    Whoami,
    /// Check a permission of the signed-in user.
    Can { permission: String },
    /// Check the role of the signed-in user.
    HasRole { role: String },
    /// Authorized GET of a path under the API base; prints the JSON reply.
    Get { path: String },
    /// Show or set the UI language preference.
    Language { code: Option<String> },
}

/// Stands in for the browser location. Redirects become a hint on stderr.
struct TerminalNavigator {
    route: RefCell<String>,
}

impl TerminalNavigator {
    fn new(command: &Command) -> Self {
        Self { route: RefCell::new(command_route(command).to_owned()) }
    }
}

impl Navigator for TerminalNavigator {
    fn current_route(&self) -> String {
        self.route.borrow().clone()
    }

    fn navigate(&self, path: &str) {
        *self.route.borrow_mut() = path.to_owned();
        eprintln!("session ended; run `portal-cli login` to sign in again");
    }
}

type CliClient = RequestAuthorizer<ReqwestTransport, TerminalNavigator>;

struct CliContext {
    durable: Arc<dyn KeyValueStore>,
    session: Arc<SessionService>,
    client: CliClient,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = resolve_config(PortalConfig::from_env()?, cli.base_url.as_deref(), cli.token_policy.as_deref())?;

    let durable: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(&cli.state_file)?);
    let session = Arc::new(SessionService::from_config(durable.clone(), &config));
    let client = RequestAuthorizer::new(
        ReqwestTransport::new(config.timeouts)?,
        session.clone(),
        TerminalNavigator::new(&cli.command),
        Arc::new(MemoryStore::new()),
    );
    let ctx = CliContext { durable, session, client };

    run(&ctx, cli.command).await
}

async fn run(ctx: &CliContext, command: Command) -> Result<(), CliError> {
    match command {
        Command::Login { username, password } => {
            let success = ctx.session.login(&ctx.client, &username, &password).await?;
            print_json(&serde_json::json!({
                "message": success.message,
                "user": serde_json::to_value(&success.user)?,
            }))
        }
        Command::Logout => {
            let ack = ctx.session.log_out().await?;
            println!("{}", ack.message);
            Ok(())
        }
        Command::Whoami => {
            if !ctx.session.is_authenticated() {
                return Err(CliError::NotSignedIn);
            }
            let user = ctx.session.current_user().ok_or(CliError::NotSignedIn)?;
            print_json(&serde_json::to_value(&user)?)
        }
        Command::Can { permission } => {
            println!("{}", yes_no(ctx.session.has_permission(&permission)));
            Ok(())
        }
        Command::HasRole { role } => {
            println!("{}", yes_no(ctx.session.has_role(&role)));
            Ok(())
        }
        Command::Get { path } => {
            let url = api_url(ctx.session.api_base(), &path);
            let response = ctx.client.execute(ApiRequest::get(url)).await?;
            match response.json::<Value>() {
                Ok(value) => print_json(&value),
                Err(_) => {
                    println!("{}", response.body);
                    Ok(())
                }
            }
        }
        Command::Language { code } => {
            let preferences = Preferences::new(ctx.durable.as_ref());
            if let Some(code) = code {
                preferences.set_language(&code)?;
            }
            println!("{}", preferences.language());
            Ok(())
        }
    }
}

/// Apply command-line overrides on top of the environment configuration.
fn resolve_config(
    mut config: PortalConfig,
    base_url: Option<&str>,
    token_policy: Option<&str>,
) -> Result<PortalConfig, ConfigError> {
    if let Some(url) = base_url {
        config.api_url = normalize_api_url(url)?;
    }
    if token_policy.is_some() {
        config.token_policy = parse_policy(token_policy)?;
    }
    Ok(config)
}

/// Join `path` onto the API base with exactly one slash between them.
fn api_url(api_base: &str, path: &str) -> String {
    format!("{}/{}", api_base.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// Route recorded as "current" while a command runs.
fn command_route(command: &Command) -> &'static str {
    match command {
        Command::Login { .. } | Command::Logout => "/login",
        Command::Whoami | Command::Can { .. } | Command::HasRole { .. } | Command::Language { .. } => "/dashboard",
        Command::Get { .. } => "/cli/get",
    }
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}

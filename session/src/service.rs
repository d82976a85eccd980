//! Session service: login, logout and authorization questions.
//!
//! ARCHITECTURE
//! ============
//! One `SessionService` is built at startup and shared by `Arc` with the
//! request authorizer, the route guard and the views. It owns the durable
//! token/profile pair and is the only writer of those two keys.
//!
//! INVARIANTS
//! ==========
//! - Token and profile are written and erased together. A profile write
//!   failure rolls the token back; a read that finds exactly one of the two
//!   treats the session as anonymous and erases the orphan.
//! - At most one login is in flight; overlapping calls fail fast without
//!   touching storage.

#[cfg(test)]
#[path = "service_test.rs"]
mod service_test;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::api::{self, LoginOutcome, LoginRequest};
use crate::authorizer::ApiClient;
use crate::config::PortalConfig;
use crate::error::SessionError;
use crate::profile::UserProfile;
use crate::store::{KeyValueStore, StoreError, TOKEN_KEY, USER_KEY};
use crate::token::{self, ExpiryPolicy, TokenValidity};
use crate::transport::ApiRequest;

/// Source of the current time in seconds since the Unix epoch.
pub type Clock = fn() -> u64;

/// Wall clock for native targets. The browser build supplies its own.
#[must_use]
pub fn system_clock() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs())
}

pub const LOGOUT_MESSAGE: &str = "Logged out successfully";

/// Session-level state. There is no refreshing state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Anonymous,
    Authenticated,
}

/// Result of a successful login.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoginSuccess {
    pub token: String,
    pub user: UserProfile,
    pub message: String,
}

/// Completion signal for [`SessionService::log_out`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogoutAck {
    pub message: String,
}

pub struct SessionService {
    store: Arc<dyn KeyValueStore>,
    api_base: String,
    policy: ExpiryPolicy,
    clock: Clock,
    login_in_flight: AtomicBool,
}

/// Clears the in-flight flag on every exit path of `login`.
struct LoginFlight<'a>(&'a AtomicBool);

impl Drop for LoginFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl SessionService {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>, api_base: impl Into<String>) -> Self {
        Self {
            store,
            api_base: api_base.into().trim_end_matches('/').to_owned(),
            policy: ExpiryPolicy::default(),
            clock: system_clock,
            login_in_flight: AtomicBool::new(false),
        }
    }

    #[must_use]
    pub fn from_config(store: Arc<dyn KeyValueStore>, config: &PortalConfig) -> Self {
        Self::new(store, config.api_url.clone()).with_policy(config.token_policy)
    }

    #[must_use]
    pub fn with_policy(mut self, policy: ExpiryPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    #[must_use]
    pub fn policy(&self) -> ExpiryPolicy {
        self.policy
    }

    /// The stored bearer token, if any.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.store.get(TOKEN_KEY)
    }

    // =========================================================================
    // LOGIN / LOGOUT
    // =========================================================================

    /// Authenticate against the backend and persist the session.
    ///
    /// # Errors
    ///
    /// - [`SessionError::LoginInProgress`] if another login has not finished.
    /// - [`SessionError::AuthenticationFailure`] if the backend rejects the
    ///   credentials or answers with an error status.
    /// - [`SessionError::Decode`] if an accepted reply lacks token or user data.
    /// - [`SessionError::Transport`] if no response was received.
    /// - [`SessionError::Storage`] if the session cannot be persisted.
    pub async fn login<C>(&self, client: &C, username: &str, password: &str) -> Result<LoginSuccess, SessionError>
    where
        C: ApiClient + ?Sized,
    {
        let _flight = self.begin_login()?;

        let request = ApiRequest::post(api::login_url(&self.api_base))
            .json(&LoginRequest { username, password })
            .map_err(|e| SessionError::Decode(e.to_string()))?;

        let response = match client.execute(request).await {
            Ok(response) => response,
            Err(SessionError::Http { status, body }) => {
                tracing::warn!(%status, "login request failed");
                let message = api::error_message(&body).unwrap_or_else(|| api::DEFAULT_LOGIN_HTTP_FAILURE.to_owned());
                return Err(SessionError::AuthenticationFailure(message));
            }
            Err(SessionError::AuthorizationExpired | SessionError::PermissionDenied { .. }) => {
                return Err(SessionError::AuthenticationFailure(api::DEFAULT_LOGIN_HTTP_FAILURE.to_owned()));
            }
            Err(e) => return Err(e),
        };

        match LoginOutcome::decode(&response.body)? {
            LoginOutcome::Rejected { message } => {
                tracing::info!(username, "login rejected");
                Err(SessionError::AuthenticationFailure(message))
            }
            LoginOutcome::Accepted { token, data, message } => {
                let user = UserProfile::from_login(&data, (self.clock)());
                self.persist(&token, &user)?;
                tracing::info!(username = %user.username, role = %user.role, "login succeeded");
                Ok(LoginSuccess { token, user, message })
            }
        }
    }

    /// Clear the session. Idempotent; makes no network call.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Storage`] if either key cannot be removed.
    #[allow(clippy::unused_async)]
    pub async fn log_out(&self) -> Result<LogoutAck, SessionError> {
        self.erase()?;
        tracing::info!("logged out");
        Ok(LogoutAck { message: LOGOUT_MESSAGE.to_owned() })
    }

    /// Forced transition to anonymous, used when the backend answers 401.
    pub fn clear_session(&self) {
        if let Err(e) = self.erase() {
            tracing::warn!(error = %e, "failed to clear session state");
        }
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    /// Whether a session is present and its token passes the expiry policy.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        match (self.store.get(TOKEN_KEY), self.store.contains(USER_KEY)) {
            (Some(token), true) => {
                let validity = token::evaluate(&token, (self.clock)());
                match validity {
                    TokenValidity::Expired => tracing::debug!("stored token is expired"),
                    TokenValidity::Inconclusive => {
                        tracing::debug!(policy = ?self.policy, "token expiry inconclusive");
                    }
                    TokenValidity::Valid => {}
                }
                self.policy.admits(validity)
            }
            (None, false) => false,
            _ => {
                tracing::warn!("found token without profile or profile without token; clearing");
                self.clear_session();
                false
            }
        }
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        if self.is_authenticated() { SessionState::Authenticated } else { SessionState::Anonymous }
    }

    /// The stored profile; `None` if absent, unparsable, or tokenless.
    #[must_use]
    pub fn current_user(&self) -> Option<UserProfile> {
        self.store.get(TOKEN_KEY)?;
        let raw = self.store.get(USER_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!(error = %e, "stored user profile is unparsable");
                None
            }
        }
    }

    #[must_use]
    pub fn has_permission(&self, permission: &str) -> bool {
        self.is_authenticated() && self.current_user().is_some_and(|u| u.has_permission(permission))
    }

    #[must_use]
    pub fn has_role(&self, role: &str) -> bool {
        self.is_authenticated() && self.current_user().is_some_and(|u| u.has_role(role))
    }

    // =========================================================================
    // STORAGE
    // =========================================================================

    fn begin_login(&self) -> Result<LoginFlight<'_>, SessionError> {
        if self.login_in_flight.swap(true, Ordering::AcqRel) {
            tracing::warn!("login already in flight; ignoring duplicate request");
            return Err(SessionError::LoginInProgress);
        }
        Ok(LoginFlight(&self.login_in_flight))
    }

    fn persist(&self, token: &str, user: &UserProfile) -> Result<(), SessionError> {
        let profile = serde_json::to_string(user).map_err(|e| SessionError::Decode(e.to_string()))?;
        self.store.set(TOKEN_KEY, token)?;
        if let Err(e) = self.store.set(USER_KEY, &profile) {
            if let Err(rollback) = self.store.remove(TOKEN_KEY) {
                tracing::warn!(error = %rollback, "token rollback failed");
            }
            return Err(e.into());
        }
        Ok(())
    }

    fn erase(&self) -> Result<(), StoreError> {
        let token = self.store.remove(TOKEN_KEY);
        let user = self.store.remove(USER_KEY);
        token.and(user)
    }
}

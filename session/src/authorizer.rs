//! Request authorizer: the interception point every API call passes through.
//!
//! SYSTEM CONTEXT
//! ==============
//! Views never talk to a transport directly; they hold a [`RequestAuthorizer`]
//! (through [`ApiClient`]) which decides whether the session token is attached,
//! records the current route for error pages, and turns 401/403 replies into
//! session transitions.
//!
//! HEADER RULES
//! ============
//! - login endpoint: never carries the token;
//! - reference-data lookups in [`EXEMPT_PATHS`]: never carry the token, even
//!   when the caller set one;
//! - everything else: `authorization-token` + `Accept: application/json`
//!   whenever a token is stored.

#[cfg(test)]
#[path = "authorizer_test.rs"]
mod authorizer_test;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::SessionError;
use crate::service::SessionService;
use crate::store::{KeyValueStore, LAST_ROUTE_KEY};
use crate::transport::{ACCEPT_HEADER, AUTH_HEADER, ApiRequest, ApiResponse, HttpTransport, JSON_MEDIA_TYPE};

/// Route of the login view; target of every forced redirect.
pub const LOGIN_ROUTE: &str = "/login";

/// URL fragment identifying the login endpoint.
const LOGIN_FRAGMENT: &str = "/login";

/// Unauthenticated reference-data endpoints.
pub const EXEMPT_PATHS: [&str; 5] = ["/getDistrict", "/getBlock", "/getPanchayat", "/getDesignation", "/getVillage"];

/// View navigation as seen by the session layer.
pub trait Navigator {
    /// Path of the view currently shown.
    fn current_route(&self) -> String;

    /// Move to `path`.
    fn navigate(&self, path: &str);
}

/// Anything that can execute an API call with session semantics applied.
#[async_trait::async_trait(?Send)]
pub trait ApiClient {
    /// # Errors
    ///
    /// Returns [`SessionError::AuthorizationExpired`] on 401,
    /// [`SessionError::PermissionDenied`] on 403, [`SessionError::Http`] on any
    /// other status of 400 or above, [`SessionError::Transport`] when no
    /// response arrived.
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, SessionError>;
}

/// How a request URL is treated with respect to the session token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestKind {
    Login,
    Exempt,
    Protected,
}

#[must_use]
pub fn classify(url: &str) -> RequestKind {
    if url.contains(LOGIN_FRAGMENT) {
        RequestKind::Login
    } else if EXEMPT_PATHS.iter().any(|path| url.contains(path)) {
        RequestKind::Exempt
    } else {
        RequestKind::Protected
    }
}

pub struct RequestAuthorizer<T, N> {
    transport: T,
    session: Arc<SessionService>,
    navigator: N,
    transient: Arc<dyn KeyValueStore>,
    denials: AtomicUsize,
}

impl<T, N> RequestAuthorizer<T, N>
where
    T: HttpTransport,
    N: Navigator,
{
    /// `transient` holds tab-lifetime values (the last route before an error).
    #[must_use]
    pub fn new(transport: T, session: Arc<SessionService>, navigator: N, transient: Arc<dyn KeyValueStore>) -> Self {
        Self { transport, session, navigator, transient, denials: AtomicUsize::new(0) }
    }

    #[must_use]
    pub fn session(&self) -> &Arc<SessionService> {
        &self.session
    }

    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    #[must_use]
    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    /// Number of 403 replies observed so far.
    #[must_use]
    pub fn permission_denials(&self) -> usize {
        self.denials.load(Ordering::Relaxed)
    }

    /// Route recorded before the most recent request.
    #[must_use]
    pub fn last_route_before_error(&self) -> Option<String> {
        self.transient.get(LAST_ROUTE_KEY)
    }

    /// Read and forget the recorded route.
    pub fn take_last_route(&self) -> Option<String> {
        let route = self.transient.get(LAST_ROUTE_KEY)?;
        if let Err(e) = self.transient.remove(LAST_ROUTE_KEY) {
            tracing::warn!(error = %e, "failed to clear last route");
        }
        Some(route)
    }

    /// Apply the header rules to `request`.
    #[must_use]
    pub fn authorize(&self, mut request: ApiRequest) -> ApiRequest {
        match classify(&request.url) {
            RequestKind::Login => {
                request.remove_header(AUTH_HEADER);
            }
            RequestKind::Exempt => {
                tracing::debug!(url = %request.url, "skipping auth for exempt endpoint");
                request.remove_header(AUTH_HEADER);
            }
            RequestKind::Protected => match self.session.token() {
                Some(token) => {
                    request.set_header(AUTH_HEADER, &token);
                    request.set_header(ACCEPT_HEADER, JSON_MEDIA_TYPE);
                }
                None => tracing::debug!(url = %request.url, "no token available for protected request"),
            },
        }
        request
    }

    fn record_route(&self) {
        let route = self.navigator.current_route();
        if let Err(e) = self.transient.set(LAST_ROUTE_KEY, &route) {
            tracing::debug!(error = %e, "could not record current route");
        }
    }

    fn handle_response(&self, url: &str, response: ApiResponse) -> Result<ApiResponse, SessionError> {
        match response.status {
            401 => {
                tracing::warn!(%url, "401 unauthorized; clearing session");
                self.session.clear_session();
                self.navigator.navigate(LOGIN_ROUTE);
                Err(SessionError::AuthorizationExpired)
            }
            403 => {
                tracing::warn!(%url, "403 permission denied");
                self.denials.fetch_add(1, Ordering::Relaxed);
                Err(SessionError::PermissionDenied { url: url.to_owned() })
            }
            status if status >= 400 => {
                if status >= 500 {
                    tracing::warn!(%url, status, "server error");
                } else {
                    tracing::debug!(%url, status, "client error");
                }
                Err(SessionError::Http { status, body: response.body })
            }
            _ => Ok(response),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl<T, N> ApiClient for RequestAuthorizer<T, N>
where
    T: HttpTransport,
    N: Navigator,
{
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, SessionError> {
        self.record_route();
        let request = self.authorize(request);
        let url = request.url.clone();
        let response = self.transport.send(request).await.map_err(|e| {
            tracing::warn!(%url, error = %e, "request did not complete");
            SessionError::Transport(e.0)
        })?;
        self.handle_response(&url, response)
    }
}

//! Error taxonomy for the session layer.

use crate::store::StoreError;

/// Failure surfaced by the session service or the request authorizer.
///
/// Each failure is reported to the caller exactly once; nothing here retries.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Bad credentials. Carries the user-visible message; no state changes.
    #[error("{0}")]
    AuthenticationFailure(String),

    /// The backend answered 401. The session has already been cleared.
    #[error("session expired or revoked")]
    AuthorizationExpired,

    /// The backend answered 403.
    #[error("permission denied for {url}")]
    PermissionDenied { url: String },

    /// Any other non-success HTTP status, with the body left untouched.
    #[error("request failed with status {status}")]
    Http { status: u16, body: String },

    /// The request never produced an HTTP response.
    #[error("transport failed: {0}")]
    Transport(String),

    /// A response body did not have the expected shape.
    #[error("response decode failed: {0}")]
    Decode(String),

    /// Persisting session state failed.
    #[error(transparent)]
    Storage(#[from] StoreError),

    /// Another login call has not finished yet.
    #[error("a login request is already in progress")]
    LoginInProgress,
}

impl SessionError {
    /// HTTP status associated with the error, when there is one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::AuthorizationExpired => Some(401),
            Self::PermissionDenied { .. } => Some(403),
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

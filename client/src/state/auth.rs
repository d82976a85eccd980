//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by route guards and user-aware components to coordinate login redirects
//! and identity-dependent rendering. The durable truth lives in the session
//! store; this is the reactive copy views subscribe to.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use session::{RouteGuard, SessionService, UserProfile};

/// Authentication state tracking the current user and loading status.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<UserProfile>,
    pub authenticated: bool,
    pub loading: bool,
}

impl AuthState {
    /// Snapshot the stored session the way the route guard sees it.
    #[must_use]
    pub fn evaluate(guard: &RouteGuard, session: &SessionService) -> Self {
        let authenticated = guard.check().is_allowed();
        Self {
            user: if authenticated { session.current_user() } else { None },
            authenticated,
            loading: false,
        }
    }

    #[must_use]
    pub fn signed_in(user: UserProfile) -> Self {
        Self { user: Some(user), authenticated: true, loading: false }
    }

    #[must_use]
    pub fn signed_out() -> Self {
        Self { user: None, authenticated: false, loading: false }
    }

    /// Display name for headers; falls back to the username.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.user
            .as_ref()
            .map(|u| if u.full_name.trim().is_empty() { u.username.clone() } else { u.full_name.clone() })
            .unwrap_or_default()
    }
}

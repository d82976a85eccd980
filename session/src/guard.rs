//! Route guard evaluated before entering a protected view.
//!
//! The check is synchronous and reads only local session state; it never
//! touches the network.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use std::sync::Arc;

use crate::authorizer::{LOGIN_ROUTE, Navigator};
use crate::service::SessionService;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(&'static str),
}

impl GuardDecision {
    #[must_use]
    pub fn is_allowed(self) -> bool {
        matches!(self, Self::Allow)
    }
}

#[derive(Clone)]
pub struct RouteGuard {
    session: Arc<SessionService>,
}

impl RouteGuard {
    #[must_use]
    pub fn new(session: Arc<SessionService>) -> Self {
        Self { session }
    }

    #[must_use]
    pub fn check(&self) -> GuardDecision {
        if self.session.is_authenticated() {
            GuardDecision::Allow
        } else {
            GuardDecision::Redirect(LOGIN_ROUTE)
        }
    }

    /// Allow navigation, or redirect to the login view and block it.
    pub fn can_activate<N: Navigator + ?Sized>(&self, navigator: &N) -> bool {
        match self.check() {
            GuardDecision::Allow => true,
            GuardDecision::Redirect(path) => {
                tracing::debug!(from = %navigator.current_route(), to = path, "route guard redirect");
                navigator.navigate(path);
                false
            }
        }
    }
}

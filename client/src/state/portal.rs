//! Startup wiring of the session objects.
//!
//! ARCHITECTURE
//! ============
//! One `Portal` is assembled when the app mounts and provided as context.
//! Every clone shares the same `SessionService`, so the request authorizer,
//! the route guard and the views all observe one session.

#[cfg(test)]
#[path = "portal_test.rs"]
mod portal_test;

use std::sync::Arc;

use session::store::Preferences;
use session::{KeyValueStore, RequestAuthorizer, RouteGuard, SessionService};

use crate::net::api::{BrowserTransport, api_base_url};
use crate::util::navigator::BrowserNavigator;
use crate::util::storage::BrowserStorage;

pub type PortalClient = RequestAuthorizer<BrowserTransport, BrowserNavigator>;

#[derive(Clone)]
pub struct Portal {
    pub durable: Arc<dyn KeyValueStore>,
    pub session: Arc<SessionService>,
    pub client: Arc<PortalClient>,
    pub guard: RouteGuard,
}

impl Portal {
    /// Portal backed by Web Storage and `fetch`.
    #[must_use]
    pub fn browser() -> Self {
        Self::assemble(Arc::new(BrowserStorage::local()), Arc::new(BrowserStorage::session()), api_base_url())
    }

    #[must_use]
    pub fn assemble(durable: Arc<dyn KeyValueStore>, transient: Arc<dyn KeyValueStore>, api_base: &str) -> Self {
        let session = Arc::new(SessionService::new(durable.clone(), api_base).with_clock(now_secs));
        let client = Arc::new(RequestAuthorizer::new(BrowserTransport, session.clone(), BrowserNavigator, transient));
        let guard = RouteGuard::new(session.clone());
        Self { durable, session, client, guard }
    }

    #[must_use]
    pub fn preferences(&self) -> Preferences<'_> {
        Preferences::new(self.durable.as_ref())
    }
}

/// `SystemTime` is unavailable on `wasm32-unknown-unknown`; use `Date.now()`.
#[cfg(feature = "csr")]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn now_secs() -> u64 {
    (js_sys::Date::now() / 1000.0) as u64
}

#[cfg(not(feature = "csr"))]
fn now_secs() -> u64 {
    session::service::system_clock()
}

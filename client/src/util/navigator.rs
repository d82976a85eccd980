//! `window.location` binding for the request authorizer.
//!
//! The authorizer runs outside any component, so it cannot hold a router
//! handle. It reads the current path from `location.pathname` and redirects
//! with a full `location.assign`, which also drops any in-memory view state
//! that belonged to the expired session.

use session::Navigator;

#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn current_route(&self) -> String {
        #[cfg(feature = "csr")]
        {
            web_sys::window()
                .and_then(|w| w.location().pathname().ok())
                .unwrap_or_else(|| "/".to_owned())
        }
        #[cfg(not(feature = "csr"))]
        {
            "/".to_owned()
        }
    }

    fn navigate(&self, path: &str) {
        #[cfg(feature = "csr")]
        {
            if let Some(window) = web_sys::window() {
                if let Err(e) = window.location().assign(path) {
                    log::warn!("navigation to {path} failed: {e:?}");
                }
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = path;
        }
    }
}

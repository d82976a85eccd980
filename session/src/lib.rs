//! Session and authorization layer for the rural survey portal.
//!
//! This crate owns the token store, the session service, the request
//! authorizer and the route guard. It knows nothing about browsers or
//! sockets: the `client` crate plugs in `localStorage` and `gloo-net`, the
//! `cli` crate a JSON file and `reqwest`.

pub mod api;
pub mod authorizer;
pub mod config;
pub mod error;
pub mod guard;
pub mod profile;
pub mod routes;
pub mod service;
pub mod store;
pub mod token;
pub mod transport;

pub use authorizer::{ApiClient, Navigator, RequestAuthorizer};
pub use config::PortalConfig;
pub use error::SessionError;
pub use guard::{GuardDecision, RouteGuard};
pub use profile::UserProfile;
pub use service::{LoginSuccess, LogoutAck, SessionService, SessionState};
pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError};
pub use token::ExpiryPolicy;
pub use transport::{ApiRequest, ApiResponse, HttpTransport, Method, TransportError};

#[cfg(test)]
#[path = "testing.rs"]
pub(crate) mod testing;

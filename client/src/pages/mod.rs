//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration. Protected pages are wrapped in
//! `RequireSession` by the router, not by the pages themselves.

pub mod dashboard;
pub mod errors;
pub mod login;

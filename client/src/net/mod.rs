//! Browser networking for backend API calls.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` provides the `fetch`-backed transport that the session crate's
//! request authorizer wraps. Pages never call it directly.

pub mod api;

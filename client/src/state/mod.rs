//! Application state shared through Leptos context.
//!
//! SYSTEM CONTEXT
//! ==============
//! `portal` holds the long-lived session objects built once at startup;
//! `auth` is the reactive snapshot that views render from.

pub mod auth;
pub mod portal;

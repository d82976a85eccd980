//! # client
//!
//! Leptos single-page frontend for the rural survey MIS portal.
//!
//! The browser build (`--features csr`) mounts [`app::App`] into the page
//! body. Session rules live in the `session` crate; this crate supplies the
//! browser bindings for them (Web Storage, `fetch`, `location`) and the
//! route-level screens.

pub mod app;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::mount_to_body(app::App);
}

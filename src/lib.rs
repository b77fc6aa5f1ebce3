//! # account-client
//!
//! Leptos + WASM frontend for account management: sign-in, registration,
//! profile settings, and session lifecycle against the `/api/auth/` REST
//! surface.
//!
//! The session layer (`session`) owns the single source of truth for "who
//! is signed in"; pages and components read it through context and never
//! talk to the network directly.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod session;
pub mod util;

/// WASM entry point: attaches the client to server-rendered markup.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::hydrate_body(app::App);
}

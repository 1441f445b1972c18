//! # admin-dashboard
//!
//! Leptos + WASM admin dashboard: sign-in, user management and a themed
//! shell over a REST backend.
//!
//! The core (`net`, `state`, `cache`, `queries`) is platform independent and
//! reaches the browser only through the traits in `platform`. Browser
//! bindings and the mount entry point are compiled with the `csr` feature.

pub mod app;
pub mod cache;
pub mod components;
pub mod config;
pub mod context;
pub mod error;
pub mod net;
pub mod pages;
pub mod platform;
pub mod queries;
pub mod routes;
pub mod state;
pub mod util;

#[cfg(test)]
mod testing;

/// WASM entry point: install logging and mount the app on `<body>`.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::mount_to_body(app::App);
}

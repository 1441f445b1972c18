//! Environment seams between the dashboard core and the browser.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each seam is a small trait with a browser implementation gated behind the
//! `csr` feature and an inert fallback used for native builds and tests, so
//! the session, cache and client logic never touch `web-sys` directly.

pub mod document;
pub mod navigator;
pub mod runtime;
pub mod storage;
pub mod transport;

pub use document::ThemeTarget;
pub use navigator::Navigator;
pub use runtime::Runtime;
pub use storage::KeyValueStore;
pub use transport::{HttpMethod, HttpRequest, HttpResponse, Transport, TransportError};

//! Networking modules for the dashboard REST backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! `client` performs authenticated requests and owns 401 handling,
//! `endpoint` maps each backend route to its method, path and body, `api`
//! offers one typed call per endpoint, and `types` defines the wire schema.

pub mod api;
pub mod client;
pub mod endpoint;
pub mod types;

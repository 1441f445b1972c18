//! Shared helpers for pages and components.

pub mod table;
pub mod validation;

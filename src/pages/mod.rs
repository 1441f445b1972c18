//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration (which queries to load, which
//! mutations to run) and delegates chrome to `components::shell`.

pub mod dashboard;
pub mod forms;
pub mod login;
pub mod settings;
pub mod users;

//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render the dashboard chrome (header, sidebar, notices) from the
//! reactive session and toast mirrors provided by `App`, and call back into
//! the core through the `AppContext` handle.

pub mod header;
pub mod shell;
pub mod sidebar;
pub mod toaster;

//! Shared client-side state.
//!
//! DESIGN
//! ======
//! `session` holds credentials and chrome preferences, `toast` holds
//! user-visible notices. Both are explicitly constructed handles mutated only
//! through their methods; the view layer observes them through listeners.

pub mod session;
pub mod toast;

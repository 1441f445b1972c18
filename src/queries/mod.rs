//! Per-resource queries and mutations over the cache and remote client.
//!
//! SYSTEM CONTEXT
//! ==============
//! Views call these instead of the typed API directly. Each function owns
//! its cache key, freshness window, invalidation set and user-facing
//! notifications, so a page only decides *when* to fetch.

pub mod auth;
pub mod dashboard;
pub mod users;

use std::time::Duration;

use crate::cache::QueryOptions;
use crate::context::AppContext;
use crate::error::ApiError;

/// Title of the notice posted when a read fails.
pub const LOAD_ERROR_TITLE: &str = "Error";

/// Cache defaults with a per-query freshness window.
fn options(ctx: &AppContext, stale_time: Duration) -> QueryOptions {
    ctx.cache.defaults().with_stale_time(stale_time)
}

/// Post the failure notice for a read, then hand the result back unchanged.
fn report_load<T>(ctx: &AppContext, result: Result<T, ApiError>, fallback: &str) -> Result<T, ApiError> {
    if let Err(e) = &result {
        ctx.toasts.report_error(LOAD_ERROR_TITLE, e, fallback);
    }
    result
}

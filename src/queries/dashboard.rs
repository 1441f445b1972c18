//! Dashboard overview queries.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use std::time::Duration;

use super::{options, report_load};
use crate::cache::dashboard_keys;
use crate::context::AppContext;
use crate::error::ApiError;
use crate::net::api;
use crate::net::types::{ChartData, ChartPeriod, DashboardStats, RecentActivity};

pub const STATS_STALE_TIME: Duration = Duration::from_secs(2 * 60);
pub const ACTIVITY_STALE_TIME: Duration = Duration::from_secs(60);
pub const CHARTS_STALE_TIME: Duration = Duration::from_secs(10 * 60);
pub const STATS_FAILED: &str = "Failed to load dashboard statistics.";
pub const ACTIVITY_FAILED: &str = "Failed to load recent activity.";
pub const CHARTS_FAILED: &str = "Failed to load chart data.";

/// # Errors
///
/// Returns the load's [`ApiError`] after retries; a notice has already
/// been posted.
pub async fn stats(ctx: &AppContext) -> Result<DashboardStats, ApiError> {
    let client = ctx.client.clone();
    let result = ctx
        .cache
        .fetch_with(dashboard_keys::stats(), options(ctx, STATS_STALE_TIME), move || {
            let client = client.clone();
            async move { api::dashboard_stats(&client).await }
        })
        .await;
    report_load(ctx, result, STATS_FAILED)
}

/// # Errors
///
/// Returns the load's [`ApiError`] after retries; a notice has already
/// been posted.
pub async fn recent_activity(ctx: &AppContext) -> Result<Vec<RecentActivity>, ApiError> {
    let client = ctx.client.clone();
    let result = ctx
        .cache
        .fetch_with(dashboard_keys::activity(), options(ctx, ACTIVITY_STALE_TIME), move || {
            let client = client.clone();
            async move { api::recent_activity(&client).await }
        })
        .await;
    report_load(ctx, result, ACTIVITY_FAILED)
}

/// Chart series for `period`; each period is cached separately.
///
/// # Errors
///
/// Returns the load's [`ApiError`] after retries; a notice has already
/// been posted.
pub async fn chart_data(ctx: &AppContext, period: ChartPeriod) -> Result<Vec<ChartData>, ApiError> {
    let client = ctx.client.clone();
    let result = ctx
        .cache
        .fetch_with(dashboard_keys::charts(period), options(ctx, CHARTS_STALE_TIME), move || {
            let client = client.clone();
            async move { api::chart_data(&client, period).await }
        })
        .await;
    report_load(ctx, result, CHARTS_FAILED)
}

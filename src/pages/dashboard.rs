//! Dashboard overview: headline statistics, recent activity and a chart
//! series for the selected period.
//!
//! SYSTEM CONTEXT
//! ==============
//! The authenticated landing route. Each panel is an independent cached
//! query, so switching periods back and forth only hits the backend once per
//! period within the freshness window.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;

use crate::app::{RefreshEpoch, use_app};
use crate::components::shell::Shell;
use crate::net::types::{ActivityKind, ChartData, ChartPeriod, DashboardStats, RecentActivity};
use crate::queries::dashboard;

/// `+12.5%` / `-3.0%`.
fn format_growth(percent: f64) -> String {
    if percent >= 0.0 {
        format!("+{percent:.1}%")
    } else {
        format!("{percent:.1}%")
    }
}

/// Dollar amount with thousands separators and cents.
fn format_revenue(amount: f64) -> String {
    let negative = amount < 0.0;
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{}${grouped}.{cents}", if negative { "-" } else { "" })
}

fn activity_label(kind: ActivityKind) -> &'static str {
    match kind {
        ActivityKind::UserRegistered => "New user",
        ActivityKind::ProjectUpdated => "Project",
        ActivityKind::SystemMaintenance => "Maintenance",
        ActivityKind::PaymentReceived => "Payment",
    }
}

/// Stat cards as `(label, value, growth)` rows.
fn stat_cards(stats: &DashboardStats) -> [(&'static str, String, String); 4] {
    [
        ("Total Users", stats.total_users.to_string(), format_growth(stats.user_growth)),
        ("Active Projects", stats.active_projects.to_string(), format_growth(stats.project_growth)),
        ("Revenue", format_revenue(stats.revenue), format_growth(stats.revenue_growth)),
        ("Activity", stats.activity.to_string(), format_growth(stats.activity_growth)),
    ]
}

/// Bar heights as percentages of the largest value in the series.
fn bar_heights(points: &[ChartData]) -> Vec<f64> {
    let max = points.iter().map(|p| p.value).fold(0.0_f64, f64::max);
    if max <= 0.0 {
        return vec![0.0; points.len()];
    }
    points.iter().map(|p| (p.value.max(0.0) / max) * 100.0).collect()
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    view! {
        <Shell>
            <DashboardContent/>
        </Shell>
    }
}

#[component]
fn DashboardContent() -> impl IntoView {
    let app = use_app();
    let refresh = expect_context::<RefreshEpoch>();
    let period = RwSignal::new(ChartPeriod::default());

    let stats = LocalResource::new(move || {
        refresh.track();
        let ctx = app.get_value();
        async move { dashboard::stats(&ctx).await }
    });
    let activity = LocalResource::new(move || {
        refresh.track();
        let ctx = app.get_value();
        async move { dashboard::recent_activity(&ctx).await }
    });
    let chart = LocalResource::new(move || {
        refresh.track();
        let selected = period.get();
        let ctx = app.get_value();
        async move { dashboard::chart_data(&ctx, selected).await }
    });

    let stats_view = move || {
        stats.get().map(|result| match result {
            Ok(stats) => stat_cards(&stats)
                .into_iter()
                .map(|(label, value, growth)| {
                    view! {
                        <div class="stat-card">
                            <span class="stat-card__label">{label}</span>
                            <strong class="stat-card__value">{value}</strong>
                            <span class="stat-card__growth">{growth}</span>
                        </div>
                    }
                })
                .collect_view()
                .into_any(),
            Err(_) => view! { <p class="panel-error">"Statistics are unavailable."</p> }.into_any(),
        })
    };

    let activity_view = move || {
        activity.get().map(|result| match result {
            Ok(items) => render_activity(items).into_any(),
            Err(_) => view! { <p class="panel-error">"Activity is unavailable."</p> }.into_any(),
        })
    };

    let chart_view = move || {
        chart.get().map(|result| match result {
            Ok(points) => {
                let heights = bar_heights(&points);
                points
                    .into_iter()
                    .zip(heights)
                    .map(|(point, height)| {
                        view! {
                            <div class="chart__bar" style=format!("height: {height:.0}%") title=point.date>
                                <span class="chart__label">{point.name}</span>
                            </div>
                        }
                    })
                    .collect_view()
                    .into_any()
            }
            Err(_) => view! { <p class="panel-error">"Chart data is unavailable."</p> }.into_any(),
        })
    };

    let period_button = move |value: ChartPeriod| {
        view! {
            <button
                class="chart__period"
                class:chart__period--active=move || period.get() == value
                on:click=move |_| period.set(value)
            >
                {value.as_str()}
            </button>
        }
    };

    view! {
        <div class="dashboard">
            <h1>"Dashboard"</h1>
            <section class="stat-grid">
                <Suspense fallback=|| view! { <p>"Loading statistics..."</p> }>{stats_view}</Suspense>
            </section>
            <section class="chart">
                <div class="chart__periods">
                    {period_button(ChartPeriod::Week)}
                    {period_button(ChartPeriod::Month)}
                    {period_button(ChartPeriod::Quarter)}
                </div>
                <div class="chart__bars">
                    <Suspense fallback=|| view! { <p>"Loading chart..."</p> }>{chart_view}</Suspense>
                </div>
            </section>
            <section class="activity">
                <h2>"Recent Activity"</h2>
                <Suspense fallback=|| view! { <p>"Loading activity..."</p> }>{activity_view}</Suspense>
            </section>
        </div>
    }
}

fn render_activity(items: Vec<RecentActivity>) -> impl IntoView {
    if items.is_empty() {
        return view! { <p class="activity__empty">"No recent activity."</p> }.into_any();
    }
    view! {
        <ul class="activity__list">
            {items
                .into_iter()
                .map(|item| {
                    let who = item.user.map(|u| u.name).unwrap_or_default();
                    view! {
                        <li class="activity__item">
                            <span class="activity__kind">{activity_label(item.kind)}</span>
                            <strong>{item.title}</strong>
                            <p>{item.description}</p>
                            <small>{who} " · " {item.timestamp}</small>
                        </li>
                    }
                })
                .collect_view()}
        </ul>
    }
    .into_any()
}

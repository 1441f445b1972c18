//! Settings: appearance and layout preferences.

use leptos::prelude::*;

use crate::app::use_app;
use crate::components::shell::Shell;
use crate::state::session::{Session, Theme};

#[component]
pub fn SettingsPage() -> impl IntoView {
    view! {
        <Shell>
            <SettingsContent/>
        </Shell>
    }
}

#[component]
fn SettingsContent() -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let app = use_app();

    let set_theme = move |theme: Theme| app.with_value(|ctx| ctx.session.set_theme(theme));
    let set_sidebar = move |open: bool| app.with_value(|ctx| ctx.session.set_sidebar_open(open));

    let identity = move || {
        session.with(|s| {
            s.identity()
                .map(|i| format!("{} <{}> · {}", i.name, i.email, i.role.as_str()))
                .unwrap_or_default()
        })
    };

    view! {
        <div class="settings">
            <h1>"Settings"</h1>
            <section class="settings__section">
                <h2>"Account"</h2>
                <p>{identity}</p>
            </section>
            <section class="settings__section">
                <h2>"Appearance"</h2>
                <label>
                    <input
                        type="radio"
                        name="theme"
                        prop:checked=move || session.with(|s| s.theme == Theme::Light)
                        on:change=move |_| set_theme(Theme::Light)
                    />
                    "Light"
                </label>
                <label>
                    <input
                        type="radio"
                        name="theme"
                        prop:checked=move || session.with(|s| s.theme == Theme::Dark)
                        on:change=move |_| set_theme(Theme::Dark)
                    />
                    "Dark"
                </label>
            </section>
            <section class="settings__section">
                <h2>"Layout"</h2>
                <label>
                    <input
                        type="checkbox"
                        prop:checked=move || session.with(|s| s.sidebar_open)
                        on:change=move |ev| set_sidebar(event_target_checked(&ev))
                    />
                    "Show sidebar"
                </label>
            </section>
        </div>
    }
}

//! Top bar: page chrome toggles and the signed-in user.

use leptos::prelude::*;

use crate::app::use_app;
use crate::state::session::{Session, Theme};

#[component]
pub fn Header() -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let app = use_app();

    let on_toggle_theme = move |_| {
        app.with_value(|ctx| ctx.session.set_theme(ctx.session.theme().toggled()));
    };
    let on_toggle_sidebar = move |_| app.with_value(|ctx| ctx.session.toggle_sidebar());

    let on_logout = move |_| {
        #[cfg(feature = "csr")]
        {
            let ctx = app.get_value();
            leptos::task::spawn_local(async move {
                let _ = crate::queries::auth::logout(&ctx).await;
            });
        }
    };

    let theme_label = move || match session.with(|s| s.theme) {
        Theme::Light => "Dark mode",
        Theme::Dark => "Light mode",
    };
    let user_name = move || session.with(|s| s.identity().map(|i| i.name.clone()).unwrap_or_default());

    view! {
        <header class="header">
            <button class="header__button" on:click=on_toggle_sidebar title="Toggle sidebar">
                "☰"
            </button>
            <h2 class="header__title">"Dashboard"</h2>
            <div class="header__actions">
                <button class="header__button" on:click=on_toggle_theme>
                    {theme_label}
                </button>
                <span class="header__user">{user_name}</span>
                <button class="header__button" on:click=on_logout>
                    "Sign out"
                </button>
            </div>
        </header>
    }
}

//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos::reactive::owner::LocalStorage;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::context::AppContext;
use crate::pages::{
    dashboard::DashboardPage, forms::FormsPage, login::LoginPage, settings::SettingsPage, users::UsersPage,
};
use crate::state::session::Session;
use crate::state::toast::Toast;

/// Core services handle placed in Leptos context.
///
/// `AppContext` is single-threaded (`Rc` inside), so it lives in local
/// arena storage; the handle itself is `Copy`.
pub type AppHandle = StoredValue<AppContext, LocalStorage>;

/// Bumped to make mounted pages reload their queries.
#[derive(Clone, Copy, Debug)]
pub struct RefreshEpoch(pub RwSignal<u64>);

impl RefreshEpoch {
    pub fn bump(self) {
        self.0.update(|n| *n += 1);
    }

    pub fn track(self) {
        self.0.track();
    }
}

/// Handle to the application context. Panics outside [`App`].
///
/// View closures capture the handle, not the context, so they stay `Send`.
pub fn use_app() -> AppHandle {
    expect_context::<AppHandle>()
}

fn build_context() -> AppContext {
    #[cfg(feature = "csr")]
    {
        AppContext::browser()
    }
    #[cfg(not(feature = "csr"))]
    {
        AppContext::new(crate::config::DashboardConfig::default(), crate::context::Platform::inert())
    }
}

/// Root application component.
///
/// Provides the core services plus reactive mirrors of the session and the
/// toast queue, and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let ctx = build_context();

    let session = RwSignal::new(ctx.session.snapshot());
    ctx.session.subscribe(move |snapshot, _| session.set(snapshot.clone()));
    let toasts = RwSignal::new(ctx.toasts.items());
    ctx.toasts.subscribe(move |items| toasts.set(items.to_vec()));

    let handle: AppHandle = StoredValue::new_local(ctx);
    provide_context(handle);
    provide_context::<RwSignal<Session>>(session);
    provide_context::<RwSignal<Vec<Toast>>>(toasts);
    provide_context(RefreshEpoch(RwSignal::new(0)));

    // Effects run after the current tick, so a burst of preference changes
    // lands in one write.
    Effect::new(move |_| {
        session.track();
        handle.with_value(AppContext::persist);
    });

    view! {
        <Title text="Admin Dashboard"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route path=StaticSegment("") view=DashboardPage/>
                <Route path=StaticSegment("users") view=UsersPage/>
                <Route path=StaticSegment("forms") view=FormsPage/>
                <Route path=StaticSegment("settings") view=SettingsPage/>
            </Routes>
        </Router>
    }
}

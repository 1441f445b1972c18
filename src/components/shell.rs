//! Authenticated page frame: header, sidebar, content and notices.

use leptos::prelude::*;
use leptos_router::components::Redirect;

use crate::components::{header::Header, sidebar::Sidebar, toaster::Toaster};
use crate::routes::Paths;
use crate::state::session::Session;

/// Wraps a page that requires a signed-in user; everyone else is sent to
/// the login page.
#[component]
pub fn Shell(children: ChildrenFn) -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let signed_in = move || session.with(Session::is_authenticated);
    let sidebar_open = move || session.with(|s| s.sidebar_open);

    view! {
        <Show when=signed_in fallback=|| view! { <Redirect path=Paths::LOGIN/> }>
            <div class="app-shell" class:app-shell--collapsed=move || !sidebar_open()>
                <Sidebar/>
                <div class="app-shell__main">
                    <Header/>
                    <main class="app-shell__content">{children()}</main>
                </div>
            </div>
        </Show>
        <Toaster/>
    }
}

//! Primary navigation.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::routes::Paths;

const LINKS: [(&str, &str); 4] = [
    (Paths::DASHBOARD, "Dashboard"),
    (Paths::USERS, "Users"),
    (Paths::FORMS, "Forms"),
    (Paths::SETTINGS, "Settings"),
];

#[component]
pub fn Sidebar() -> impl IntoView {
    view! {
        <nav class="sidebar">
            <div class="sidebar__brand">"Admin"</div>
            <ul class="sidebar__links">
                {LINKS
                    .into_iter()
                    .map(|(href, label)| {
                        view! {
                            <li>
                                <A href=href>{label}</A>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
        </nav>
    }
}

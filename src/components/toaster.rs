//! Notice stack rendered from the toast queue.

use leptos::prelude::*;

use crate::app::{RefreshEpoch, use_app};
use crate::cache::QueryKey;
use crate::state::toast::{Toast, ToastVariant};

fn variant_class(variant: ToastVariant) -> &'static str {
    match variant {
        ToastVariant::Default => "toast",
        ToastVariant::Success => "toast toast--success",
        ToastVariant::Warning => "toast toast--warning",
        ToastVariant::Destructive => "toast toast--destructive",
    }
}

#[component]
pub fn Toaster() -> impl IntoView {
    let toasts = expect_context::<RwSignal<Vec<Toast>>>();
    let refresh = expect_context::<RefreshEpoch>();
    let app = use_app();

    let row = move |toast: Toast| {
        let Toast { id, title, description, variant, retryable } = toast;
        let on_dismiss = move |_| app.with_value(|ctx| ctx.toasts.dismiss(id));
        // Retrying reloads every mounted query from scratch.
        let on_retry = move |_| {
            app.with_value(|ctx| {
                ctx.cache.invalidate(&QueryKey::new(Vec::<String>::new()));
                ctx.toasts.dismiss(id);
            });
            refresh.bump();
        };
        view! {
            <div class=variant_class(variant)>
                <strong class="toast__title">{title}</strong>
                <p class="toast__description">{description}</p>
                <Show when=move || retryable>
                    <button class="toast__action" on:click=on_retry>
                        "Retry"
                    </button>
                </Show>
                <button class="toast__close" on:click=on_dismiss>
                    "×"
                </button>
            </div>
        }
    };

    view! {
        <div class="toaster">
            <For each=move || toasts.get() key=|t| t.id children=row/>
        </div>
    }
}

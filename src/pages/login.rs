//! Login page with email + password sign-in and account registration.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::components::Redirect;

use crate::app::use_app;
use crate::components::toaster::Toaster;
use crate::net::types::{LoginCredentials, RegisterData};
use crate::routes::Paths;
use crate::state::session::Session;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    SignIn,
    Register,
}

/// A validated form ready to send.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Submission {
    SignIn(LoginCredentials),
    Register(RegisterData),
}

fn build_submission(mode: Mode, name: &str, email: &str, password: &str) -> Result<Submission, &'static str> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err("Enter your email and password.");
    }
    match mode {
        Mode::SignIn => Ok(Submission::SignIn(LoginCredentials {
            email: email.to_owned(),
            password: password.to_owned(),
        })),
        Mode::Register => {
            let name = name.trim();
            if name.is_empty() {
                return Err("Enter your name.");
            }
            Ok(Submission::Register(RegisterData {
                name: name.to_owned(),
                email: email.to_owned(),
                password: password.to_owned(),
            }))
        }
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let app = use_app();

    let mode = RwSignal::new(Mode::SignIn);
    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let busy = RwSignal::new(false);
    let info = RwSignal::new(String::new());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let submission = match build_submission(mode.get(), &name.get(), &email.get(), &password.get()) {
            Ok(submission) => submission,
            Err(message) => {
                info.set(message.to_owned());
                return;
            }
        };
        info.set(String::new());
        busy.set(true);

        #[cfg(feature = "csr")]
        {
            let ctx = app.get_value();
            leptos::task::spawn_local(async move {
                let _ = match submission {
                    Submission::SignIn(credentials) => crate::queries::auth::login(&ctx, credentials).await,
                    Submission::Register(data) => crate::queries::auth::register(&ctx, data).await,
                };
                busy.set(false);
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (app, submission);
            busy.set(false);
        }
    };

    let switch_label = move || match mode.get() {
        Mode::SignIn => "Need an account? Register",
        Mode::Register => "Already registered? Sign in",
    };
    let submit_label = move || match mode.get() {
        Mode::SignIn => "Sign In",
        Mode::Register => "Create Account",
    };
    let on_switch = move |_| {
        mode.update(|m| {
            *m = match m {
                Mode::SignIn => Mode::Register,
                Mode::Register => Mode::SignIn,
            };
        });
    };

    view! {
        <Show when=move || session.with(Session::is_authenticated)>
            <Redirect path=Paths::DASHBOARD/>
        </Show>
        <div class="login-page">
            <div class="login-card">
                <h1>"Admin Dashboard"</h1>
                <form class="login-form" on:submit=on_submit>
                    <Show when=move || mode.get() == Mode::Register>
                        <input
                            class="login-input"
                            type="text"
                            placeholder="Your name"
                            prop:value=move || name.get()
                            on:input=move |ev| name.set(event_target_value(&ev))
                        />
                    </Show>
                    <input
                        class="login-input"
                        type="email"
                        placeholder="you@example.com"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        {submit_label}
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
                <button class="login-switch" type="button" on:click=on_switch>
                    {switch_label}
                </button>
            </div>
        </div>
        <Toaster/>
    }
}

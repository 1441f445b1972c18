//! Profile form with client-side validation.

#[cfg(test)]
#[path = "forms_test.rs"]
mod forms_test;

use leptos::prelude::*;

use crate::app::use_app;
use crate::components::shell::Shell;
use crate::net::types::Role;
use crate::util::validation::{FieldError, check_age, check_bio, check_email, check_name};

/// Raw field values as typed.
#[derive(Clone, Debug, PartialEq, Eq)]
struct ProfileDraft {
    name: String,
    email: String,
    role: String,
    bio: String,
    age: String,
}

impl Default for ProfileDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            role: Role::User.as_str().to_owned(),
            bio: String::new(),
            age: "18".to_owned(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Profile {
    name: String,
    email: String,
    role: Role,
    bio: Option<String>,
    age: u32,
}

impl ProfileDraft {
    fn validate(&self) -> Result<Profile, Vec<FieldError>> {
        let mut errors: Vec<FieldError> = [check_name(&self.name), check_email(&self.email), check_bio(&self.bio)]
            .into_iter()
            .flatten()
            .collect();
        let age = check_age(&self.age).map_err(|e| errors.push(e)).ok();
        let role = Role::ALL.into_iter().find(|r| r.as_str() == self.role);
        if role.is_none() {
            errors.push(FieldError { field: "role", message: "Choose a role" });
        }
        match (errors.is_empty(), age, role) {
            (true, Some(age), Some(role)) => Ok(Profile {
                name: self.name.trim().to_owned(),
                email: self.email.trim().to_owned(),
                role,
                bio: Some(self.bio.trim().to_owned()).filter(|b| !b.is_empty()),
                age,
            }),
            _ => Err(errors),
        }
    }
}

fn error_for(errors: &[FieldError], field: &str) -> Option<&'static str> {
    errors.iter().find(|e| e.field == field).map(|e| e.message)
}

#[component]
pub fn FormsPage() -> impl IntoView {
    view! {
        <Shell>
            <ProfileForm/>
        </Shell>
    }
}

#[component]
fn ProfileForm() -> impl IntoView {
    let app = use_app();
    let draft = RwSignal::new(ProfileDraft::default());
    let errors = RwSignal::new(Vec::<FieldError>::new());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        match draft.with(ProfileDraft::validate) {
            Ok(profile) => {
                errors.set(Vec::new());
                log::debug!("profile submitted for {}", profile.email);
                app.with_value(|ctx| ctx.toasts.success("Form Submitted", "Form submitted successfully!"));
                draft.set(ProfileDraft::default());
            }
            Err(found) => errors.set(found),
        }
    };

    let field_error = move |field: &'static str| {
        move || errors.with(|e| error_for(e, field)).map(|m| view! { <p class="form__error">{m}</p> })
    };

    view! {
        <div class="forms">
            <h1>"Forms"</h1>
            <p>"Example form with client-side validation."</p>
            <form class="form" on:submit=on_submit>
                <label>
                    "Name"
                    <input
                        type="text"
                        prop:value=move || draft.with(|d| d.name.clone())
                        on:input=move |ev| draft.update(|d| d.name = event_target_value(&ev))
                    />
                </label>
                {field_error("name")}
                <label>
                    "Email"
                    <input
                        type="email"
                        prop:value=move || draft.with(|d| d.email.clone())
                        on:input=move |ev| draft.update(|d| d.email = event_target_value(&ev))
                    />
                </label>
                {field_error("email")}
                <label>
                    "Role"
                    <select
                        prop:value=move || draft.with(|d| d.role.clone())
                        on:change=move |ev| draft.update(|d| d.role = event_target_value(&ev))
                    >
                        {Role::ALL
                            .into_iter()
                            .map(|r| view! { <option value=r.as_str()>{r.as_str()}</option> })
                            .collect_view()}
                    </select>
                </label>
                {field_error("role")}
                <label>
                    "Age"
                    <input
                        type="number"
                        prop:value=move || draft.with(|d| d.age.clone())
                        on:input=move |ev| draft.update(|d| d.age = event_target_value(&ev))
                    />
                </label>
                {field_error("age")}
                <label>
                    "Bio"
                    <textarea
                        prop:value=move || draft.with(|d| d.bio.clone())
                        on:input=move |ev| draft.update(|d| d.bio = event_target_value(&ev))
                    ></textarea>
                </label>
                {field_error("bio")}
                <button type="submit">"Submit"</button>
            </form>
        </div>
    }
}

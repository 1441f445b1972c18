//! User management: searchable, sortable, paged table with create and
//! delete actions.

#[cfg(test)]
#[path = "users_test.rs"]
mod users_test;

use leptos::prelude::*;

use crate::app::{RefreshEpoch, use_app};
use crate::components::shell::Shell;
use crate::net::types::{CreateUserData, PaginatedResponse, Role, User};
use crate::queries::users;
use crate::util::table::{Filter, FilterOperator, SortDirection, SortSpec, TableQuery, UserColumn};
use crate::util::validation::{FieldError, check_email, check_name, check_password};

fn role_badge_class(role: Role) -> &'static str {
    match role {
        Role::Admin => "badge badge--admin",
        Role::Manager => "badge badge--manager",
        Role::User => "badge badge--user",
    }
}

/// Date part of an ISO 8601 timestamp.
fn format_date(timestamp: &str) -> &str {
    timestamp.split_once('T').map_or(timestamp, |(date, _)| date)
}

fn page_label<T>(page: &PaginatedResponse<T>) -> String {
    if page.total == 0 {
        return "No users".to_owned();
    }
    format!("Page {} of {} ({} users)", page.page, page.total_pages.max(1), page.total)
}

fn sort_marker(sort: Option<SortSpec>, column: UserColumn) -> &'static str {
    match sort {
        Some(spec) if spec.column == column => match spec.direction {
            SortDirection::Ascending => " ▲",
            SortDirection::Descending => " ▼",
        },
        _ => "",
    }
}

/// Role filter from the select value; empty means all roles.
fn role_filter(value: &str) -> Vec<Filter> {
    Role::ALL
        .into_iter()
        .find(|r| r.as_str() == value)
        .map(|role| Filter { column: UserColumn::Role, operator: FilterOperator::Equals, value: role.as_str().to_owned() })
        .into_iter()
        .collect()
}

fn validate_new_user(name: &str, email: &str, role: &str, password: &str) -> Result<CreateUserData, Vec<FieldError>> {
    let errors: Vec<FieldError> = [check_name(name), check_email(email), check_password(password)]
        .into_iter()
        .flatten()
        .collect();
    if !errors.is_empty() {
        return Err(errors);
    }
    let role = Role::ALL.into_iter().find(|r| r.as_str() == role).unwrap_or_default();
    Ok(CreateUserData {
        name: name.trim().to_owned(),
        email: email.trim().to_owned(),
        role,
        password: password.to_owned(),
    })
}

#[component]
pub fn UsersPage() -> impl IntoView {
    view! {
        <Shell>
            <UsersContent/>
        </Shell>
    }
}

#[component]
fn UsersContent() -> impl IntoView {
    let app = use_app();
    let refresh = expect_context::<RefreshEpoch>();
    let query = RwSignal::new(TableQuery::default());

    let list = LocalResource::new(move || {
        refresh.track();
        let ctx = app.get_value();
        async move { users::list_users(&ctx).await }
    });

    let set_search = move |value: String| {
        query.update(|q| {
            q.search = value;
            q.page = 1;
        });
    };
    let set_role = move |value: String| {
        let filters = role_filter(&value);
        query.update(|q| {
            q.filters = filters;
            q.page = 1;
        });
    };
    let sort_by = move |column: UserColumn| query.update(|q| q.sort = Some(SortSpec::clicked(q.sort, column)));
    let header = move |column: UserColumn, label: &'static str| {
        view! {
            <th>
                <button class="table__sort" on:click=move |_| sort_by(column)>
                    {label}
                    {move || sort_marker(query.with(|q| q.sort), column)}
                </button>
            </th>
        }
    };

    let on_delete = move |id: String| {
        #[cfg(feature = "csr")]
        {
            let ctx = app.get_value();
            leptos::task::spawn_local(async move {
                if users::delete_user(&ctx, &id).await.is_ok() {
                    refresh.bump();
                }
            });
        }
        #[cfg(not(feature = "csr"))]
        let _ = id;
    };

    let rows = move || {
        list.get().map(|result| match result {
            Ok(all) => {
                let page = query.with(|q| q.apply(&all));
                let label = page_label(&page);
                let total_pages = page.total_pages;
                view! {
                    <tbody>
                        {page
                            .data
                            .into_iter()
                            .map(|user| render_row(user, on_delete))
                            .collect_view()}
                    </tbody>
                    <caption class="table__footer">
                        <button
                            disabled=move || query.with(|q| q.page <= 1)
                            on:click=move |_| query.update(|q| q.page = q.page.saturating_sub(1).max(1))
                        >
                            "Previous"
                        </button>
                        <span>{label}</span>
                        <button
                            disabled=move || query.with(|q| q.page >= total_pages)
                            on:click=move |_| query.update(|q| q.page += 1)
                        >
                            "Next"
                        </button>
                    </caption>
                }
                .into_any()
            }
            Err(_) => view! { <caption class="panel-error">"Users could not be loaded."</caption> }.into_any(),
        })
    };

    view! {
        <div class="users">
            <div class="users__header">
                <div>
                    <h1>"Users"</h1>
                    <p>"Manage your users and their permissions."</p>
                </div>
            </div>
            <NewUserForm/>
            <div class="users__toolbar">
                <input
                    class="users__search"
                    type="search"
                    placeholder="Search users..."
                    on:input=move |ev| set_search(event_target_value(&ev))
                />
                <select class="users__role" on:change=move |ev| set_role(event_target_value(&ev))>
                    <option value="">"All roles"</option>
                    {Role::ALL
                        .into_iter()
                        .map(|role| view! { <option value=role.as_str()>{role.as_str()}</option> })
                        .collect_view()}
                </select>
            </div>
            <table class="table">
                <thead>
                    <tr>
                        {header(UserColumn::Name, "Name")}
                        {header(UserColumn::Email, "Email")}
                        {header(UserColumn::Role, "Role")}
                        {header(UserColumn::CreatedAt, "Created")}
                        <th></th>
                    </tr>
                </thead>
                <Suspense fallback=|| view! { <caption>"Loading users..."</caption> }>{rows}</Suspense>
            </table>
        </div>
    }
}

fn render_row(user: User, on_delete: impl Fn(String) + Copy + Send + Sync + 'static) -> impl IntoView {
    let id = user.id.clone();
    let created = format_date(&user.created_at).to_owned();
    view! {
        <tr>
            <td class="table__name">{user.name}</td>
            <td class="table__email">{user.email}</td>
            <td>
                <span class=role_badge_class(user.role)>{user.role.as_str()}</span>
            </td>
            <td>{created}</td>
            <td>
                <button class="table__delete" on:click=move |_| on_delete(id.clone())>
                    "Delete"
                </button>
            </td>
        </tr>
    }
}

#[component]
fn NewUserForm() -> impl IntoView {
    let app = use_app();
    let refresh = expect_context::<RefreshEpoch>();

    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let role = RwSignal::new(Role::User.as_str().to_owned());
    let password = RwSignal::new(String::new());
    let errors = RwSignal::new(Vec::<FieldError>::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let data = match validate_new_user(&name.get(), &email.get(), &role.get(), &password.get()) {
            Ok(data) => data,
            Err(found) => {
                errors.set(found);
                return;
            }
        };
        errors.set(Vec::new());
        busy.set(true);

        #[cfg(feature = "csr")]
        {
            let ctx = app.get_value();
            leptos::task::spawn_local(async move {
                if users::create_user(&ctx, data).await.is_ok() {
                    name.set(String::new());
                    email.set(String::new());
                    password.set(String::new());
                    refresh.bump();
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (app, refresh, data);
            busy.set(false);
        }
    };

    view! {
        <form class="user-form" on:submit=on_submit>
            <input
                type="text"
                placeholder="Name"
                prop:value=move || name.get()
                on:input=move |ev| name.set(event_target_value(&ev))
            />
            <input
                type="email"
                placeholder="Email"
                prop:value=move || email.get()
                on:input=move |ev| email.set(event_target_value(&ev))
            />
            <select prop:value=move || role.get() on:change=move |ev| role.set(event_target_value(&ev))>
                {Role::ALL
                    .into_iter()
                    .map(|r| view! { <option value=r.as_str()>{r.as_str()}</option> })
                    .collect_view()}
            </select>
            <input
                type="password"
                placeholder="Password"
                prop:value=move || password.get()
                on:input=move |ev| password.set(event_target_value(&ev))
            />
            <button type="submit" disabled=move || busy.get()>
                "Add User"
            </button>
            <ul class="user-form__errors">
                {move || {
                    errors
                        .get()
                        .into_iter()
                        .map(|e| view! { <li>{e.message}</li> })
                        .collect_view()
                }}
            </ul>
        </form>
    }
}

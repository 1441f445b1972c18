//! User management queries.

#[cfg(test)]
#[path = "users_test.rs"]
mod users_test;

use std::time::Duration;

use super::{options, report_load};
use crate::cache::user_keys;
use crate::context::AppContext;
use crate::error::ApiError;
use crate::net::api;
use crate::net::types::{CreateUserData, UpdateUserData, User};

pub const USERS_STALE_TIME: Duration = Duration::from_secs(5 * 60);
pub const LIST_FAILED: &str = "Failed to load users.";
pub const DETAIL_FAILED: &str = "Failed to load user.";

/// All users, cached under `["users", "list"]`.
///
/// # Errors
///
/// Returns the load's [`ApiError`] after retries; a notice has already
/// been posted.
pub async fn list_users(ctx: &AppContext) -> Result<Vec<User>, ApiError> {
    let client = ctx.client.clone();
    let result = ctx
        .cache
        .fetch_with(user_keys::lists(), options(ctx, USERS_STALE_TIME), move || {
            let client = client.clone();
            async move { api::list_users(&client).await }
        })
        .await;
    report_load(ctx, result, LIST_FAILED)
}

/// One user, cached under `["users", "detail", id]`.
///
/// An empty `id` means nothing is selected yet: no request, `Ok(None)`.
///
/// # Errors
///
/// Returns the load's [`ApiError`] after retries; a notice has already
/// been posted.
pub async fn get_user(ctx: &AppContext, id: &str) -> Result<Option<User>, ApiError> {
    if id.is_empty() {
        return Ok(None);
    }
    let client = ctx.client.clone();
    let owned = id.to_owned();
    let result = ctx
        .cache
        .fetch(user_keys::detail(id), move || {
            let client = client.clone();
            let id = owned.clone();
            async move { api::get_user(&client, &id).await }
        })
        .await;
    report_load(ctx, result, DETAIL_FAILED).map(Some)
}

/// # Errors
///
/// Returns the backend's [`ApiError`]; a notice has already been posted.
pub async fn create_user(ctx: &AppContext, data: CreateUserData) -> Result<User, ApiError> {
    let result = ctx
        .cache
        .mutate(api::create_user(&ctx.client, data), &[user_keys::lists()])
        .await;
    match &result {
        Ok(user) => {
            ctx.toasts
                .success("User Created", &format!("{} has been successfully created.", user.name));
        }
        Err(e) => {
            ctx.toasts.report_error("Error", e, "Failed to create user.");
        }
    }
    result
}

/// Update a user and seed its detail entry with the response.
///
/// # Errors
///
/// Returns the backend's [`ApiError`]; a notice has already been posted.
pub async fn update_user(ctx: &AppContext, id: &str, data: UpdateUserData) -> Result<User, ApiError> {
    let result = ctx
        .cache
        .mutate(api::update_user(&ctx.client, id, data), &[user_keys::lists()])
        .await;
    match &result {
        Ok(user) => {
            ctx.cache.set_data(user_keys::detail(&user.id), user.clone());
            ctx.toasts
                .success("User Updated", &format!("{} has been successfully updated.", user.name));
        }
        Err(e) => {
            ctx.toasts.report_error("Error", e, "Failed to update user.");
        }
    }
    result
}

/// # Errors
///
/// Returns the backend's [`ApiError`]; a notice has already been posted.
pub async fn delete_user(ctx: &AppContext, id: &str) -> Result<(), ApiError> {
    let result = ctx
        .cache
        .mutate(api::delete_user(&ctx.client, id), &[user_keys::lists()])
        .await;
    match &result {
        Ok(()) => {
            ctx.cache.remove(&user_keys::detail(id));
            ctx.toasts.success("User Deleted", "User has been successfully deleted.");
        }
        Err(e) => {
            ctx.toasts.report_error("Error", e, "Failed to delete user.");
        }
    }
    result
}

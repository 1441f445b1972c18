//! Sign-in, registration and sign-out flows.
//!
//! Each flow finishes with a navigation: to the dashboard after signing in,
//! to the login page after signing out, whatever the backend answered.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::time::Duration;

use crate::context::AppContext;
use crate::error::ApiError;
use crate::net::api;
use crate::net::types::{AuthResponse, LoginCredentials, RegisterData};
use crate::routes::Paths;
use crate::state::session::Identity;

/// Pause between the account-created notice and leaving the page.
pub const REGISTER_REDIRECT_DELAY: Duration = Duration::from_secs(2);

/// # Errors
///
/// Returns the backend's [`ApiError`]; a notice has already been posted.
pub async fn login(ctx: &AppContext, credentials: LoginCredentials) -> Result<Identity, ApiError> {
    match api::login(&ctx.client, credentials).await {
        Ok(auth) => {
            let identity = start_session(ctx, auth);
            ctx.toasts
                .success("Welcome back!", &format!("Successfully logged in as {}.", identity.name));
            ctx.navigator.navigate(Paths::DASHBOARD);
            Ok(identity)
        }
        Err(e) => {
            ctx.toasts.report_error("Login Failed", &e, "Invalid credentials.");
            Err(e)
        }
    }
}

/// Create an account and sign in as it.
///
/// Navigation to the dashboard runs in the background after
/// [`REGISTER_REDIRECT_DELAY`], leaving the notice on screen meanwhile.
///
/// # Errors
///
/// Returns the backend's [`ApiError`]; a notice has already been posted.
pub async fn register(ctx: &AppContext, data: RegisterData) -> Result<Identity, ApiError> {
    match api::register(&ctx.client, data).await {
        Ok(auth) => {
            let identity = start_session(ctx, auth);
            ctx.toasts.success(
                "Account Created",
                &format!("Welcome {}! Your account has been created successfully.", identity.name),
            );
            let delay = ctx.runtime.sleep(REGISTER_REDIRECT_DELAY);
            let navigator = ctx.navigator.clone();
            ctx.runtime.spawn(Box::pin(async move {
                delay.await;
                navigator.navigate(Paths::DASHBOARD);
            }));
            Ok(identity)
        }
        Err(e) => {
            ctx.toasts.report_error("Registration Failed", &e, "Failed to create account.");
            Err(e)
        }
    }
}

/// Sign out on the backend, then locally regardless of the outcome.
///
/// # Errors
///
/// Returns the backend's [`ApiError`]; the session is cleared either way.
pub async fn logout(ctx: &AppContext) -> Result<(), ApiError> {
    let result = api::logout(&ctx.client).await;
    ctx.session.logout();
    ctx.cache.clear();

    match &result {
        Ok(()) => {
            ctx.toasts.success("Logged Out", "You have been successfully logged out.");
        }
        // The client already posted its own notice.
        Err(ApiError::Unauthorized) => {}
        Err(e) => {
            log::warn!("backend logout failed: {e}");
            ctx.toasts.warning("Logged Out", "You have been logged out.");
        }
    }
    ctx.navigator.navigate(Paths::LOGIN);
    result
}

fn start_session(ctx: &AppContext, auth: AuthResponse) -> Identity {
    let identity = Identity::from(&auth.user);
    ctx.session.login(identity.clone(), auth.token);
    ctx.cache.clear();
    identity
}

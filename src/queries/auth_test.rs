use serde_json::json;

use super::*;
use crate::cache::user_keys;
use crate::state::toast::ToastVariant;
use crate::testing::{TestApp, ok_envelope, user_json};

fn credentials() -> LoginCredentials {
    LoginCredentials { email: "alice@example.com".to_owned(), password: "pw".to_owned() }
}

fn auth_body(name: &str) -> serde_json::Value {
    ok_envelope(json!({ "user": user_json("u-1", name), "token": "tok-new" }))
}

// =============================================================
// Login
// =============================================================

#[test]
fn login_stores_session_and_goes_to_dashboard() {
    let mut app = TestApp::new();
    app.ctx.cache.set_data(user_keys::lists(), vec![0_u8]);
    app.transport.respond_json(200, &auth_body("Alice"));

    let ctx = app.ctx.clone();
    let identity = app.run(login(&ctx, credentials())).unwrap();

    assert_eq!(identity.name, "Alice");
    assert_eq!(ctx.session.token().as_deref(), Some("tok-new"));
    assert!(ctx.cache.is_empty());
    assert_eq!(app.navigator.last().as_deref(), Some("/"));

    let toast = ctx.toasts.items().pop().unwrap();
    assert_eq!(toast.title, "Welcome back!");
    assert_eq!(toast.description, "Successfully logged in as Alice.");
}

#[test]
fn rejected_login_shows_reason_and_stays() {
    let mut app = TestApp::new();
    app.transport
        .respond_json(401, &json!({ "message": "Wrong email or password" }));

    let ctx = app.ctx.clone();
    let result = app.run(login(&ctx, credentials()));

    assert!(matches!(result, Err(ApiError::Rejected { status: 401, .. })));
    assert!(!ctx.session.is_authenticated());
    let items = ctx.toasts.items();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].title, "Login Failed");
    assert_eq!(items[0].description, "Wrong email or password");
}

#[test]
fn login_failure_without_reason_uses_fallback() {
    let mut app = TestApp::new();
    app.transport.respond(422, "{}");

    let ctx = app.ctx.clone();
    app.run(login(&ctx, credentials())).unwrap_err();
    assert_eq!(ctx.toasts.items().pop().unwrap().description, "Invalid credentials.");
}

// =============================================================
// Register
// =============================================================

#[test]
fn register_signs_in_and_redirects_after_delay() {
    let mut app = TestApp::new();
    app.transport.respond_json(200, &auth_body("Dana"));

    let ctx = app.ctx.clone();
    let data = RegisterData {
        name: "Dana".to_owned(),
        email: "dana@example.com".to_owned(),
        password: "pw".to_owned(),
    };
    app.run(register(&ctx, data)).unwrap();

    assert!(ctx.session.is_authenticated());
    let toast = ctx.toasts.items().pop().unwrap();
    assert_eq!(toast.title, "Account Created");
    assert_eq!(toast.description, "Welcome Dana! Your account has been created successfully.");
    assert_eq!(app.navigator.last(), None);

    app.pool.run_until_stalled();
    assert_eq!(app.navigator.last().as_deref(), Some("/"));
    assert_eq!(app.runtime.sleeps.borrow().last(), Some(&REGISTER_REDIRECT_DELAY));
}

#[test]
fn register_failure_announces() {
    let mut app = TestApp::new();
    app.transport.respond(400, "");

    let ctx = app.ctx.clone();
    let data = RegisterData {
        name: "Dana".to_owned(),
        email: "dana@example.com".to_owned(),
        password: "pw".to_owned(),
    };
    app.run(register(&ctx, data)).unwrap_err();

    let toast = ctx.toasts.items().pop().unwrap();
    assert_eq!(toast.title, "Registration Failed");
    assert_eq!(toast.description, "Failed to create account.");
    assert!(!ctx.session.is_authenticated());
}

// =============================================================
// Logout
// =============================================================

#[test]
fn logout_success_clears_everything() {
    let mut app = TestApp::new();
    app.sign_in();
    app.ctx.cache.set_data(user_keys::lists(), vec![0_u8]);
    app.transport.respond_json(200, &ok_envelope(serde_json::Value::Null));

    let ctx = app.ctx.clone();
    app.run(logout(&ctx)).unwrap();

    assert!(!ctx.session.is_authenticated());
    assert!(ctx.cache.is_empty());
    assert_eq!(app.navigator.last().as_deref(), Some("/login"));
    let toast = ctx.toasts.items().pop().unwrap();
    assert_eq!(toast.description, "You have been successfully logged out.");
    assert_eq!(toast.variant, ToastVariant::Success);
    // The backend call carried the old credentials.
    assert_eq!(
        app.transport.last_request().unwrap().header("authorization"),
        Some("Bearer tok-123")
    );
}

#[test]
fn logout_failure_still_ends_session() {
    let mut app = TestApp::new();
    app.sign_in();
    app.transport.fail("offline");

    let ctx = app.ctx.clone();
    assert!(app.run(logout(&ctx)).is_err());

    assert!(!ctx.session.is_authenticated());
    assert_eq!(app.navigator.last().as_deref(), Some("/login"));
    let toast = ctx.toasts.items().pop().unwrap();
    assert_eq!(toast.title, "Logged Out");
    assert_eq!(toast.description, "You have been logged out.");
    assert_eq!(toast.variant, ToastVariant::Warning);
}

#[test]
fn logout_with_expired_token_posts_one_notice() {
    let mut app = TestApp::new();
    app.sign_in();
    app.transport.respond(401, "");

    let ctx = app.ctx.clone();
    assert_eq!(app.run(logout(&ctx)), Err(ApiError::Unauthorized));
    assert_eq!(ctx.toasts.items().len(), 1);
}

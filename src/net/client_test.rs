use std::rc::Rc;

use futures::executor::LocalPool;
use serde_json::json;

use super::*;
use crate::net::types::{LoginCredentials, Role, User};
use crate::platform::storage::MemoryStore;
use crate::state::session::Identity;
use crate::state::toast::ToastVariant;
use crate::testing::{MockTransport, RecordingDocument, RecordingNavigator, TestRuntime, user_json};

// =============================================================
// Harness
// =============================================================

struct Harness {
    pool: LocalPool,
    transport: Rc<MockTransport>,
    navigator: Rc<RecordingNavigator>,
    session: SessionStore,
    toasts: Toasts,
    client: RemoteClient,
}

fn harness() -> Harness {
    let pool = LocalPool::new();
    let runtime = Rc::new(TestRuntime::new(pool.spawner()));
    let transport = Rc::new(MockTransport::default());
    let navigator = Rc::new(RecordingNavigator::default());
    let session = SessionStore::load(
        Rc::new(MemoryStore::new()),
        Rc::new(RecordingDocument::default()),
        "app-store",
    );
    let toasts = Toasts::new();
    let client = RemoteClient::new(
        &DashboardConfig::default(),
        ClientDeps { transport: transport.clone(), navigator: navigator.clone(), runtime },
        session.clone(),
        toasts.clone(),
    );
    Harness { pool, transport, navigator, session, toasts, client }
}

fn sign_in(session: &SessionStore) {
    session.login(
        Identity {
            id: "u-1".to_owned(),
            name: "Alice".to_owned(),
            email: "alice@example.com".to_owned(),
            role: Role::Admin,
        },
        "tok-123",
    );
}

// =============================================================
// Request shaping
// =============================================================

#[test]
fn attaches_bearer_token_when_signed_in() {
    let mut h = harness();
    sign_in(&h.session);
    h.transport.respond_json(200, &json!({ "data": [], "success": true }));

    let users: Vec<User> = h.pool.run_until(h.client.call(&Endpoint::ListUsers)).unwrap();
    assert!(users.is_empty());

    let req = h.transport.last_request().unwrap();
    assert_eq!(req.url, "http://localhost:3001/api/users");
    assert_eq!(req.method, HttpMethod::Get);
    assert_eq!(req.header("authorization"), Some("Bearer tok-123"));
    assert_eq!(req.body, None);
}

#[test]
fn omits_authorization_when_signed_out() {
    let mut h = harness();
    h.transport.respond_json(200, &json!({ "data": null, "success": true }));
    h.pool.run_until(h.client.call::<()>(&Endpoint::Logout)).unwrap();

    let req = h.transport.last_request().unwrap();
    assert_eq!(req.header("Authorization"), None);
}

#[test]
fn sends_json_body_with_content_type() {
    let mut h = harness();
    h.transport.respond_json(
        200,
        &json!({ "data": { "user": user_json("u-1", "Alice"), "token": "t" }, "success": true }),
    );
    let endpoint = Endpoint::Login(LoginCredentials { email: "alice@example.com".to_owned(), password: "pw".to_owned() });
    h.pool
        .run_until(h.client.call::<crate::net::types::AuthResponse>(&endpoint))
        .unwrap();

    let req = h.transport.last_request().unwrap();
    assert_eq!(req.header("Content-Type"), Some("application/json"));
    let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
    assert_eq!(body, json!({ "email": "alice@example.com", "password": "pw" }));
}

// =============================================================
// 401 interception
// =============================================================

#[test]
fn unauthorized_clears_session_and_redirects_to_login() {
    let mut h = harness();
    sign_in(&h.session);
    h.transport.respond_json(401, &json!({ "message": "token expired" }));

    let err = h.pool.run_until(h.client.call::<User>(&Endpoint::GetUser("u-9".to_owned()))).unwrap_err();
    assert_eq!(err, ApiError::Unauthorized);
    assert!(!h.session.is_authenticated());
    assert_eq!(h.session.token(), None);
    assert_eq!(h.navigator.last().as_deref(), Some("/login"));

    let toasts = h.toasts.items();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].title, SESSION_EXPIRED_TITLE);
    assert_eq!(toasts[0].variant, ToastVariant::Warning);
}

#[test]
fn repeated_unauthorized_posts_one_notice() {
    let mut h = harness();
    sign_in(&h.session);
    h.transport.respond(401, "").respond(401, "");

    let _ = h.pool.run_until(h.client.call::<Vec<User>>(&Endpoint::ListUsers));
    let second = h.pool.run_until(h.client.call::<Vec<User>>(&Endpoint::ListUsers));
    assert!(second.is_err());
    assert_eq!(h.toasts.items().len(), 1);
    assert_eq!(h.navigator.visited.borrow().len(), 2);
}

#[test]
fn unauthorized_without_session_surfaces_server_reason() {
    let mut h = harness();
    h.transport.respond_json(401, &json!({ "message": "Invalid email or password" }));
    let endpoint = Endpoint::Login(LoginCredentials { email: "a@b.c".to_owned(), password: "nope".to_owned() });

    let err = h.pool.run_until(h.client.call::<serde_json::Value>(&endpoint)).unwrap_err();
    assert_eq!(
        err,
        ApiError::Rejected { status: 401, message: Some("Invalid email or password".to_owned()) }
    );
    assert_eq!(h.navigator.last().as_deref(), Some("/login"));
    assert!(h.toasts.items().is_empty());
}

// =============================================================
// Other failures
// =============================================================

#[test]
fn validation_failure_carries_message_without_side_effects() {
    let mut h = harness();
    sign_in(&h.session);
    h.transport.respond_json(422, &json!({ "message": "Email already exists", "success": false }));

    let err = h.pool.run_until(h.client.call::<User>(&Endpoint::ListUsers)).unwrap_err();
    assert_eq!(err, ApiError::Rejected { status: 422, message: Some("Email already exists".to_owned()) });
    assert!(h.session.is_authenticated());
    assert!(h.navigator.visited.borrow().is_empty());
    assert!(h.toasts.items().is_empty());
}

#[test]
fn server_error_tolerates_non_json_body() {
    let mut h = harness();
    h.transport.respond(502, "<html>Bad Gateway</html>");
    let err = h.pool.run_until(h.client.call::<Vec<User>>(&Endpoint::ListUsers)).unwrap_err();
    assert_eq!(err, ApiError::Server { status: 502, message: None });
}

#[test]
fn transport_failure_is_network_error() {
    let mut h = harness();
    h.transport.fail("connection refused");
    let err = h.pool.run_until(h.client.call::<Vec<User>>(&Endpoint::ListUsers)).unwrap_err();
    assert_eq!(err, ApiError::Network("connection refused".to_owned()));
}

#[test]
fn hung_request_times_out_as_network_error() {
    let mut h = harness();
    h.transport.hang();
    let err = h.pool.run_until(h.client.call::<Vec<User>>(&Endpoint::ListUsers)).unwrap_err();
    assert_eq!(err, ApiError::Network("request timed out after 10s".to_owned()));
}

// =============================================================
// Envelope validation
// =============================================================

#[test]
fn malformed_json_is_decode_error() {
    let mut h = harness();
    h.transport.respond(200, "not json");
    let err = h.pool.run_until(h.client.call::<Vec<User>>(&Endpoint::ListUsers)).unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

#[test]
fn missing_success_flag_is_decode_error() {
    let mut h = harness();
    h.transport.respond_json(200, &json!({ "data": [] }));
    let err = h.pool.run_until(h.client.call::<Vec<User>>(&Endpoint::ListUsers)).unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

#[test]
fn payload_shape_mismatch_is_decode_error() {
    let mut h = harness();
    h.transport.respond_json(200, &json!({ "data": { "id": 7 }, "success": true }));
    let err = h.pool.run_until(h.client.call::<Vec<User>>(&Endpoint::ListUsers)).unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

#[test]
fn unsuccessful_envelope_is_rejected() {
    let mut h = harness();
    h.transport.respond_json(200, &json!({ "data": null, "success": false, "message": "Quota reached" }));
    let err = h.pool.run_until(h.client.call::<()>(&Endpoint::Logout)).unwrap_err();
    assert_eq!(err, ApiError::Rejected { status: 200, message: Some("Quota reached".to_owned()) });
}

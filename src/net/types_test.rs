use super::*;

// =============================================================
// Users
// =============================================================

#[test]
fn user_deserializes_camel_case_fields() {
    let user: User = serde_json::from_value(serde_json::json!({
        "id": "u-1",
        "name": "Alice",
        "email": "alice@example.com",
        "role": "manager",
        "createdAt": "2024-01-01T00:00:00Z",
        "updatedAt": "2024-02-01T00:00:00Z"
    }))
    .unwrap();
    assert_eq!(user.role, Role::Manager);
    assert_eq!(user.avatar, None);
    assert_eq!(user.updated_at, "2024-02-01T00:00:00Z");
}

#[test]
fn user_rejects_unknown_role() {
    let result = serde_json::from_value::<User>(serde_json::json!({
        "id": "u-1",
        "name": "Alice",
        "email": "alice@example.com",
        "role": "owner",
        "createdAt": "",
        "updatedAt": ""
    }));
    assert!(result.is_err());
}

#[test]
fn update_user_data_omits_absent_fields() {
    let data = UpdateUserData { role: Some(Role::Admin), ..UpdateUserData::default() };
    assert_eq!(serde_json::to_value(&data).unwrap(), serde_json::json!({ "role": "admin" }));
}

// =============================================================
// Envelope
// =============================================================

#[test]
fn envelope_message_is_optional() {
    let env: Envelope<Vec<u32>> = serde_json::from_str(r#"{"data":[1,2],"success":true}"#).unwrap();
    assert_eq!(env.data, vec![1, 2]);
    assert!(env.success);
    assert_eq!(env.message, None);
}

#[test]
fn raw_envelope_requires_success_flag() {
    assert!(serde_json::from_str::<RawEnvelope>(r#"{"data":[]}"#).is_err());
}

#[test]
fn raw_envelope_defaults_missing_data_to_null() {
    let env: RawEnvelope = serde_json::from_str(r#"{"success":true,"message":"bye"}"#).unwrap();
    assert!(env.data.is_null());
    assert_eq!(env.message.as_deref(), Some("bye"));
}

// =============================================================
// Dashboard
// =============================================================

#[test]
fn recent_activity_uses_type_tag() {
    let activity: RecentActivity = serde_json::from_value(serde_json::json!({
        "id": "a-1",
        "type": "payment_received",
        "title": "Payment",
        "description": "Invoice #12 paid",
        "timestamp": "2024-03-01T10:00:00Z",
        "user": { "name": "Bob" }
    }))
    .unwrap();
    assert_eq!(activity.kind, ActivityKind::PaymentReceived);
    assert_eq!(activity.user.unwrap().name, "Bob");
}

#[test]
fn chart_period_serializes_as_short_code() {
    assert_eq!(serde_json::to_string(&ChartPeriod::Week).unwrap(), "\"7d\"");
    assert_eq!(ChartPeriod::default().as_str(), "30d");
}

#[test]
fn auth_response_debug_hides_token() {
    let resp = AuthResponse { user: crate::testing::make_user("u-1", "Alice"), token: "abc.def".to_owned() };
    assert!(!format!("{resp:?}").contains("abc.def"));
}

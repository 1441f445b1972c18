use super::*;

// =============================================================
// Classification
// =============================================================

#[test]
fn from_status_maps_401_to_unauthorized() {
    assert_eq!(ApiError::from_status(401, Some("expired".to_owned())), ApiError::Unauthorized);
}

#[test]
fn from_status_maps_4xx_to_rejected() {
    let err = ApiError::from_status(422, Some("email taken".to_owned()));
    assert_eq!(err, ApiError::Rejected { status: 422, message: Some("email taken".to_owned()) });
}

#[test]
fn from_status_maps_5xx_to_server() {
    assert_eq!(ApiError::from_status(503, None), ApiError::Server { status: 503, message: None });
}

// =============================================================
// Retry classification
// =============================================================

#[test]
fn only_server_and_network_errors_are_retryable() {
    assert!(ApiError::Server { status: 500, message: None }.is_retryable());
    assert!(ApiError::Network("offline".to_owned()).is_retryable());
    assert!(!ApiError::Unauthorized.is_retryable());
    assert!(!ApiError::Rejected { status: 404, message: None }.is_retryable());
    assert!(!ApiError::Decode("bad".to_owned()).is_retryable());
    assert!(!ApiError::Encode("bad".to_owned()).is_retryable());
}

#[test]
fn status_reports_http_code_when_present() {
    assert_eq!(ApiError::Unauthorized.status(), Some(401));
    assert_eq!(ApiError::Rejected { status: 409, message: None }.status(), Some(409));
    assert_eq!(ApiError::Network("x".to_owned()).status(), None);
}

// =============================================================
// Messages
// =============================================================

#[test]
fn server_message_ignores_blank_text() {
    let err = ApiError::Rejected { status: 400, message: Some("   ".to_owned()) };
    assert_eq!(err.server_message(), None);
}

#[test]
fn display_includes_server_message() {
    let err = ApiError::Rejected { status: 400, message: Some("name required".to_owned()) };
    assert_eq!(err.to_string(), "request rejected (status 400): name required");
    let err = ApiError::Server { status: 502, message: None };
    assert_eq!(err.to_string(), "server error (status 502)");
}

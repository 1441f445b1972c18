use super::*;

#[test]
fn delay_doubles_and_caps() {
    let policy = RetryPolicy::default();
    assert_eq!(policy.delay(0), Duration::from_secs(1));
    assert_eq!(policy.delay(1), Duration::from_secs(2));
    assert_eq!(policy.delay(2), Duration::from_secs(4));
    assert_eq!(policy.delay(5), Duration::from_secs(30));
    assert_eq!(policy.delay(40), Duration::from_secs(30));
}

#[test]
fn retries_transient_errors_up_to_bound() {
    let policy = RetryPolicy::default();
    let err = ApiError::Server { status: 500, message: None };
    assert!(policy.should_retry(0, &err));
    assert!(policy.should_retry(2, &err));
    assert!(!policy.should_retry(3, &err));
}

#[test]
fn never_retries_client_errors() {
    let policy = RetryPolicy::default();
    assert!(!policy.should_retry(0, &ApiError::Rejected { status: 404, message: None }));
    assert!(!policy.should_retry(0, &ApiError::Unauthorized));
}

#[test]
fn never_policy_disables_retries() {
    assert!(!RetryPolicy::never().should_retry(0, &ApiError::Network("offline".to_owned())));
}

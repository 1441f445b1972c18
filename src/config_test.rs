use super::*;

#[test]
fn from_raw_defaults_to_local_backend() {
    let cfg = DashboardConfig::from_raw(RawConfig::default()).unwrap();
    assert_eq!(cfg, DashboardConfig::default());
    assert_eq!(cfg.api_base_url, "http://localhost:3001/api");
    assert_eq!(cfg.request_timeout, Duration::from_secs(10));
    assert_eq!(cfg.stale_time, Duration::from_secs(300));
    assert_eq!(cfg.retry.max_retries, 3);
    assert_eq!(cfg.storage_key, "app-store");
}

#[test]
fn from_raw_parses_overrides() {
    let cfg = DashboardConfig::from_raw(RawConfig {
        api_url: Some("https://admin.example.test/api/"),
        request_timeout_secs: Some("30"),
        stale_time_secs: Some("60"),
        max_retries: Some("1"),
        storage_key: Some("dashboard-prefs"),
    })
    .unwrap();

    assert_eq!(cfg.api_base_url, "https://admin.example.test/api");
    assert_eq!(cfg.request_timeout, Duration::from_secs(30));
    assert_eq!(cfg.stale_time, Duration::from_secs(60));
    assert_eq!(cfg.retry.max_retries, 1);
    assert_eq!(cfg.retry.base_delay, RetryPolicy::default().base_delay);
    assert_eq!(cfg.storage_key, "dashboard-prefs");
}

#[test]
fn from_raw_treats_blank_values_as_unset() {
    let cfg = DashboardConfig::from_raw(RawConfig {
        api_url: Some("  "),
        max_retries: Some(""),
        storage_key: Some(" "),
        ..RawConfig::default()
    })
    .unwrap();
    assert_eq!(cfg.api_base_url, DEFAULT_API_URL);
    assert_eq!(cfg.retry.max_retries, DEFAULT_MAX_RETRIES);
    assert_eq!(cfg.storage_key, DEFAULT_STORAGE_KEY);
}

#[test]
fn from_raw_rejects_non_numeric_timeout() {
    let err = DashboardConfig::from_raw(RawConfig { request_timeout_secs: Some("ten"), ..RawConfig::default() })
        .unwrap_err();
    assert_eq!(err, ConfigError::Invalid { key: "DASHBOARD_REQUEST_TIMEOUT_SECS", value: "ten".to_owned() });
}

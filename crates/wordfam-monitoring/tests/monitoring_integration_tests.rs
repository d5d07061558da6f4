use wordfam_monitoring::{init_logging, FamilyMetrics, LogExt, MonitoringConfig, ServerMetrics};

#[test]
fn test_logging_initializes_once() {
    let dir = tempfile::tempdir().unwrap();
    let config = MonitoringConfig {
        log_filter: "debug".to_string(),
        enable_json_logging: true,
        log_file: Some(dir.path().join("wordfam.log").to_string_lossy().into_owned()),
        ..Default::default()
    };

    init_logging(&config).unwrap();
    // the global subscriber is already set
    assert!(init_logging(&MonitoringConfig::default()).is_err());

    ServerMetrics::record_http_request("/api/family", "GET", 200, 12.5);
    FamilyMetrics::record_family_request("run", Some(6), 12.0);
    FamilyMetrics::record_family_request("", None, 0.1);

    let result: Result<(), String> = Err("boom".to_string());
    assert!(result.log_err("request failed").is_err());
}

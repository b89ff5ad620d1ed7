use source_enrich::utils::logger;
use tempfile::TempDir;

#[test]
fn test_run_log_file_is_created_under_configured_dir() {
    let temp_dir = TempDir::new().unwrap();
    let log_dir = temp_dir.path().join("logs");

    let log_path = logger::init_enrich_logger(&log_dir, true).unwrap();

    assert!(log_path.exists());
    assert!(log_path.starts_with(&log_dir));

    let file_name = log_path.file_name().unwrap().to_str().unwrap();
    assert!(file_name.starts_with("enrich-"));
    assert!(file_name.ends_with(".log"));

    tracing::info!("📖 logger smoke test entry");

    let contents = std::fs::read_to_string(&log_path).unwrap();
    assert!(contents.contains("logger smoke test entry"));
}

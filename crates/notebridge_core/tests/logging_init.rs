use notebridge_core::{init_logging, logging_status, LogLevel, LoggingError};

#[test]
fn init_logging_is_idempotent_for_same_config_and_rejects_conflicts() {
    let first_dir = tempfile::tempdir().expect("create temp dir");
    let second_dir = tempfile::tempdir().expect("create temp dir");
    let first = first_dir.path().join("logs");
    let first_str = first.to_str().expect("temp dir should be valid UTF-8");
    let second_str = second_dir
        .path()
        .to_str()
        .expect("temp dir should be valid UTF-8");

    init_logging("info", first_str).expect("first init should succeed");
    init_logging("INFO", first_str).expect("same config should be idempotent");
    assert!(first.is_dir());

    let level_error = init_logging("debug", first_str).expect_err("level conflict should fail");
    assert!(matches!(level_error, LoggingError::AlreadyInitialized { .. }));
    assert!(level_error.to_string().contains("refusing to switch"));

    let dir_error = init_logging("info", second_str).expect_err("directory conflict should fail");
    assert!(matches!(dir_error, LoggingError::AlreadyInitialized { .. }));

    let active = logging_status().expect("logging should be active");
    assert_eq!(active.level, LogLevel::Info);
    assert_eq!(active.log_dir, first);
}

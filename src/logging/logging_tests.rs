//! Tests for logging initialization.

use super::*;
use serial_test::serial;
use std::fs;

#[test]
fn split_log_path_separates_directory_and_file() {
    let path = Path::new("/var/log/scical/session.log");
    let (directory, file_name) = split_log_path(path).expect("valid path");
    assert_eq!(directory, Path::new("/var/log/scical"));
    assert_eq!(file_name, "session.log");
}

#[test]
fn split_log_path_bare_file_uses_current_directory() {
    let (directory, file_name) = split_log_path(Path::new("scical.log")).expect("valid path");
    assert_eq!(directory, Path::new("."));
    assert_eq!(file_name, "scical.log");
}

#[test]
fn split_log_path_rejects_root() {
    assert!(matches!(
        split_log_path(Path::new("/")),
        Err(LoggingError::InvalidPath(_))
    ));
}

#[test]
#[serial(rust_log)]
fn env_filter_falls_back_to_info() {
    std::env::remove_var("RUST_LOG");
    assert_eq!(env_filter().to_string(), DEFAULT_FILTER);
}

#[test]
#[serial(rust_log)]
fn env_filter_reads_rust_log() {
    std::env::set_var("RUST_LOG", "debug");
    let filter = env_filter().to_string();
    std::env::remove_var("RUST_LOG");
    assert_eq!(filter, "debug");
}

#[test]
#[serial(tracing_init)]
fn init_creates_log_directory_if_missing() {
    let test_dir = std::env::temp_dir().join("scical_test_logs_create");
    let log_file = test_dir.join("test.log");

    let _ = fs::remove_dir_all(&test_dir);

    // May fail if a subscriber is already set; the directory is created first
    let _ = init(&log_file);

    assert!(
        test_dir.exists(),
        "Log directory should be created: {:?}",
        test_dir
    );

    let _ = fs::remove_dir_all(&test_dir);
}

#[test]
#[serial(tracing_init)]
fn second_init_reports_subscriber_already_set() {
    let test_dir = std::env::temp_dir().join("scical_test_logs_twice");
    let log_file = test_dir.join("twice.log");

    let _ = init(&log_file);
    let second = init(&log_file);

    assert!(matches!(second, Err(LoggingError::SubscriberAlreadySet)));

    let _ = fs::remove_dir_all(&test_dir);
}

// tests/unit_config_test.rs

use std::io::Write;
use tempfile::NamedTempFile;
use treedoc::config::Config;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_config_defaults() {
    let config = Config::default();
    assert_eq!(config.log_level, "info");
    assert_eq!(config.indent_width, 4);
    assert!(!config.sort_arrays);
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_from_file_fills_missing_fields() {
    let file = write_config("indent_width = 2\n");
    let config = Config::from_file(file.path().to_str().unwrap()).unwrap();
    assert_eq!(config.indent_width, 2);
    assert_eq!(config.log_level, "info");
    assert!(!config.sort_arrays);
}

#[test]
fn test_config_from_file_all_fields() {
    let file = write_config("log_level = \"treedoc=debug\"\nindent_width = 8\nsort_arrays = true\n");
    let config = Config::from_file(file.path().to_str().unwrap()).unwrap();
    assert_eq!(
        config,
        Config {
            log_level: "treedoc=debug".to_string(),
            indent_width: 8,
            sort_arrays: true,
        }
    );
}

#[test]
fn test_config_rejects_zero_indent() {
    let file = write_config("indent_width = 0\n");
    let err = Config::from_file(file.path().to_str().unwrap()).unwrap_err();
    assert!(err.to_string().contains("indent_width"));
}

#[test]
fn test_config_rejects_empty_log_level() {
    let config = Config {
        log_level: "  ".to_string(),
        ..Config::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_config_reports_malformed_toml() {
    let file = write_config("indent_width = \"wide\"\n");
    let err = Config::from_file(file.path().to_str().unwrap()).unwrap_err();
    assert!(format!("{err:#}").contains("Failed to parse TOML"));
}

#[test]
fn test_config_missing_file() {
    let err = Config::from_file("/nonexistent/treedoc.toml").unwrap_err();
    assert!(err.to_string().contains("Failed to read config file"));
}

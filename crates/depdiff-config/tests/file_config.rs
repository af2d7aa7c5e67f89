use depdiff_config::{ConfigError, FileConfig};
use tempfile::TempDir;

#[test]
fn test_load_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("depdiff.toml");
    std::fs::write(
        &path,
        r#"
checks = ["Code-Review", "Maintained"]
change_types = ["added"]
check_run = true
"#,
    )
    .unwrap();

    let config = FileConfig::load(&path).unwrap();
    assert_eq!(
        config.checks,
        Some(vec!["Code-Review".to_string(), "Maintained".to_string()])
    );
    assert_eq!(config.change_types, Some(vec!["added".to_string()]));
    assert_eq!(config.check_run, Some(true));
    assert_eq!(config.comment, None);
}

#[test]
fn test_empty_file_is_default() {
    assert_eq!(FileConfig::from_toml_str("").unwrap(), FileConfig::default());
}

#[test]
fn test_unknown_key_is_rejected() {
    let result = FileConfig::from_toml_str("colour = \"blue\"");
    assert!(matches!(result, Err(ConfigError::TomlDe(_))));
}

#[test]
fn test_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let result = FileConfig::load(&temp_dir.path().join("nope.toml"));
    assert!(matches!(result, Err(ConfigError::Io(_))));
}

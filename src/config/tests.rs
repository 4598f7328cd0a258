use crate::config::{
    AppConfig, CliOverrides, EnvOverrides, FileConfig, load_config_at, load_project_config,
};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_load_project_config() {
    let temp_dir = TempDir::new().unwrap();
    let project_root = temp_dir.path();

    let readlog_dir = project_root.join(".readlog");
    fs::create_dir_all(&readlog_dir).unwrap();

    let config_content = r#"
theme = "light"

[autocomplete]
debounce_ms = 150
blur_grace_ms = 250

[catalog]
default_category = "poetry"
"#;

    fs::write(readlog_dir.join("config.toml"), config_content).unwrap();

    let project_cfg = load_project_config(project_root).unwrap();

    assert_eq!(project_cfg.theme, Some("light".to_string()));
    let ac = project_cfg.autocomplete.unwrap();
    assert_eq!(ac.debounce_ms, Some(150));
    assert_eq!(ac.blur_grace_ms, Some(250));
    assert_eq!(ac.max_suggestions, None);
    assert_eq!(
        project_cfg.catalog.unwrap().default_category,
        Some("poetry".to_string())
    );
}

#[test]
fn test_load_project_config_not_exists() {
    let temp_dir = TempDir::new().unwrap();
    let project_cfg = load_project_config(temp_dir.path()).unwrap();
    assert_eq!(project_cfg, FileConfig::default());
}

#[test]
fn test_invalid_project_config_falls_back_to_default() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path().join(".readlog");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("config.toml"), "theme = [not toml").unwrap();

    let project_cfg = load_project_config(temp_dir.path()).unwrap();
    assert_eq!(project_cfg, FileConfig::default());
}

#[test]
fn test_explicit_config_path_errors_are_fatal() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("broken.toml");
    fs::write(&path, "[http\nconnect_timeout_ms = 1").unwrap();
    assert!(load_config_at(&path).is_err());
    assert!(load_config_at(&temp_dir.path().join("missing.toml")).is_err());
}

#[test]
fn test_defaults_without_any_layer() {
    let cfg = AppConfig::merge(
        CliOverrides::default(),
        EnvOverrides::default(),
        FileConfig::default(),
        FileConfig::default(),
    );
    assert_eq!(cfg.base_url, crate::config::DEFAULT_BASE_URL);
    assert_eq!(cfg.autocomplete.debounce_ms, 300);
    assert_eq!(cfg.autocomplete.min_query_chars, 2);
    assert_eq!(cfg.autocomplete.max_suggestions, 5);
    assert_eq!(cfg.autocomplete.blur_grace_ms, 100);
    assert_eq!(cfg.catalog.shelf_results, 15);
    assert_eq!(cfg.catalog.default_category, "classics");
    assert_eq!(cfg.theme, "dark");
}

#[test]
fn test_layer_priority() {
    let file_cfg: FileConfig = toml::from_str(
        r#"
base_url = "http://global"
log_level = "warn"

[autocomplete]
debounce_ms = 500
max_suggestions = 8

[http]
request_timeout_ms = 1000
"#,
    )
    .unwrap();
    let project_cfg: FileConfig = toml::from_str(
        r#"
base_url = "http://project"

[autocomplete]
debounce_ms = 200
"#,
    )
    .unwrap();

    let cfg = AppConfig::merge(
        CliOverrides::default(),
        EnvOverrides::default(),
        project_cfg.clone(),
        file_cfg.clone(),
    );
    assert_eq!(cfg.base_url, "http://project");
    assert_eq!(cfg.log_level, "warn");
    assert_eq!(cfg.autocomplete.debounce_ms, 200);
    assert_eq!(cfg.autocomplete.max_suggestions, 8);
    assert_eq!(cfg.http.request_timeout_ms, 1000);
    assert_eq!(cfg.http.connect_timeout_ms, 5_000);

    let cfg = AppConfig::merge(
        CliOverrides {
            base_url: Some("http://cli".into()),
            ..CliOverrides::default()
        },
        EnvOverrides {
            base_url: Some("http://env".into()),
            log_level: Some("debug".into()),
        },
        project_cfg,
        file_cfg,
    );
    assert_eq!(cfg.base_url, "http://cli");
    assert_eq!(cfg.log_level, "debug");
}

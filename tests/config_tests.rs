mod common;

use common::setup;
use cubase_project_manager::config::{Config, DEFAULT_TOP_TAGS};
use cubase_project_manager::error::ConfigError;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_load_config_with_data_files() {
    setup("debug");
    let dir = TempDir::new().unwrap();
    let projects = dir.path().join("Projects");
    fs::create_dir(&projects).unwrap();
    let catalog = dir.path().join("vsti_list.json");
    let config_path = dir.path().join("config.toml");

    fs::write(
        &config_path,
        format!(
            "project_paths = [{:?}]\ncatalog_path = {:?}\nlog_level = \"warn\"\ntop_tags = 8\n",
            projects.to_string_lossy(),
            catalog.to_string_lossy()
        ),
    )
    .unwrap();

    let config = Config::load_from(&config_path).unwrap();

    assert_eq!(config.project_dirs(), vec![projects]);
    assert_eq!(config.log_level, "warn");
    assert_eq!(config.top_tags, 8);
    if std::env::var("CUBASE_PROJECT_MANAGER_CATALOG").is_err() {
        assert_eq!(config.catalog_path().unwrap(), catalog);
    }
}

#[test]
fn test_defaults_fill_missing_fields() {
    setup("debug");
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("config.toml");
    fs::write(&config_path, "project_paths = []\n").unwrap();

    let config = Config::load_from(&config_path).unwrap();

    assert_eq!(config.top_tags, DEFAULT_TOP_TAGS);
    assert_eq!(config.catalog_path, None);
    if std::env::var("CUBASE_PROJECT_MANAGER_TAGS").is_err() {
        let tags = config.tags_path().unwrap();
        assert_eq!(tags.file_name().unwrap(), "tags.json");
    }
}

#[test]
fn test_project_path_pointing_at_file_is_rejected() {
    setup("debug");
    let dir = TempDir::new().unwrap();
    let not_a_dir = dir.path().join("song.cpr");
    fs::write(&not_a_dir, b"").unwrap();
    let config_path = dir.path().join("config.toml");
    fs::write(
        &config_path,
        format!("project_paths = [{:?}]\n", not_a_dir.to_string_lossy()),
    )
    .unwrap();

    assert!(matches!(
        Config::load_from(&config_path),
        Err(ConfigError::InvalidPath(_))
    ));
}

#[test]
fn test_config_round_trips_through_toml() {
    setup("debug");
    let config = Config {
        project_paths: vec!["/music/cubase".to_string()],
        catalog_path: Some("/data/vsti_list.json".to_string()),
        ..Config::default()
    };

    let toml = config.to_toml_string().unwrap();
    let parsed: Config = toml::from_str(&toml).unwrap();

    assert_eq!(parsed, config);
    assert_eq!(
        parsed.project_dirs(),
        vec![PathBuf::from("/music/cubase")]
    );
}

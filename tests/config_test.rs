//! Integration tests for Settings config loading with layered precedence.
//!
//! These tests write only local config files into temp directories and leave
//! the process environment alone.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use course_catalog::application::ApplicationError;
use course_catalog::config::{local_config_path, Settings, DEFAULT_DATA_FILE};
use course_catalog::domain::IdCase;

#[test]
fn given_local_config_when_load_then_overrides_defaults() {
    // Arrange
    let dir = TempDir::new().unwrap();
    fs::write(
        local_config_path(dir.path()),
        "data_file = \"catalog/fall.csv\"\nid_case = \"preserve\"\n",
    )
    .unwrap();

    // Act
    let settings = Settings::load(Some(dir.path())).expect("load settings");

    // Assert
    assert_eq!(settings.data_file, PathBuf::from("catalog/fall.csv"));
    assert_eq!(settings.id_case, IdCase::Preserve);
}

#[test]
fn given_partial_local_config_when_load_then_other_keys_keep_defaults() {
    let dir = TempDir::new().unwrap();
    fs::write(local_config_path(dir.path()), "id_case = \"lower\"\n").unwrap();

    let settings = Settings::load(Some(dir.path())).expect("load settings");

    assert_eq!(settings.id_case, IdCase::Lower);
    assert_eq!(settings.data_file, PathBuf::from(DEFAULT_DATA_FILE));
}

#[test]
fn given_directory_without_config_when_load_then_succeeds() {
    let dir = TempDir::new().unwrap();

    let settings = Settings::load(Some(dir.path())).expect("load settings");

    assert!(!settings.data_file.as_os_str().is_empty());
}

#[test]
fn given_invalid_toml_when_load_then_config_error_names_file() {
    let dir = TempDir::new().unwrap();
    fs::write(local_config_path(dir.path()), "data_file = [unclosed\n").unwrap();

    let err = Settings::load(Some(dir.path())).unwrap_err();

    assert!(matches!(err, ApplicationError::Config { .. }));
    assert!(err.to_string().contains(".course-catalog.toml"));
}

#[test]
fn given_unknown_id_case_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();
    fs::write(local_config_path(dir.path()), "id_case = \"title\"\n").unwrap();

    let err = Settings::load(Some(dir.path())).unwrap_err();

    assert!(matches!(err, ApplicationError::Config { .. }));
}

#[test]
fn given_cli_file_when_applied_after_load_then_wins_over_local_config() {
    let dir = TempDir::new().unwrap();
    fs::write(local_config_path(dir.path()), "data_file = \"local.csv\"\n").unwrap();

    let settings = Settings::load(Some(dir.path()))
        .expect("load settings")
        .with_data_file(Some(PathBuf::from("flag.csv")));

    assert_eq!(settings.data_file, PathBuf::from("flag.csv"));
}

#[test]
fn given_template_when_parsed_then_is_valid_config() {
    let dir = TempDir::new().unwrap();
    fs::write(local_config_path(dir.path()), Settings::template()).unwrap();

    let settings = Settings::load(Some(dir.path())).expect("template parses");

    assert_eq!(settings.id_case, IdCase::Upper);
}

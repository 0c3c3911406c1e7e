//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/course-catalog/catalog.toml`
//! 3. Local config: `<dir>/.course-catalog.toml` (usually the working directory)
//! 4. Environment variables: `CATALOG_*` prefix
//! 5. Command line (`--file`), applied by the caller via [`Settings::with_data_file`]

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::IdCase;

/// Default course file name, looked up relative to the working directory.
pub const DEFAULT_DATA_FILE: &str = "ABCU_Advising_Program_Input.csv";

/// Raw settings for intermediate parsing (`None` means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub data_file: Option<PathBuf>,
    pub id_case: Option<IdCase>,
}

/// Unified configuration for course-catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// CSV file loaded by menu option 1 and the non-interactive commands
    pub data_file: PathBuf,
    /// Case convention applied to course ids (upper, lower, preserve)
    pub id_case: IdCase,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            id_case: IdCase::default(),
        }
    }
}

/// Get the XDG config directory for course-catalog.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "course-catalog").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("catalog.toml"))
}

/// Get the path to the local config file in a directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".course-catalog.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Expand `~`, `$VAR` and `${VAR}` in the data file path.
    fn expand_paths(&mut self) {
        let raw = self.data_file.to_string_lossy().into_owned();
        if let Ok(expanded) = shellexpand::full(&raw) {
            self.data_file = PathBuf::from(expanded.as_ref());
        }
    }

    /// Overlay config onto self: values the overlay specifies win.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            data_file: overlay
                .data_file
                .clone()
                .unwrap_or_else(|| self.data_file.clone()),
            id_case: overlay.id_case.unwrap_or(self.id_case),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Optional directory holding a `.course-catalog.toml`
    pub fn load(local_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        // 3. Local config
        if let Some(dir) = local_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw);
            }
        }

        // 4. Environment variables
        current = Self::apply_env_overrides(current)?;

        current.expand_paths();

        Ok(current)
    }

    /// Apply CATALOG_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(Environment::with_prefix("CATALOG").separator("__"))
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("data_file") {
            settings.data_file = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("id_case") {
            settings.id_case = parse_id_case(&val)?;
        }

        Ok(settings)
    }

    /// Replace the data file when one was given on the command line.
    pub fn with_data_file(mut self, data_file: Option<PathBuf>) -> Self {
        if let Some(file) = data_file {
            self.data_file = file;
            self.expand_paths();
        }
        self
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        format!(
            r#"# course-catalog configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/course-catalog/catalog.toml
#   Local:  ./.course-catalog.toml
#   Env:    CATALOG_DATA_FILE, CATALOG_ID_CASE
#   Flag:   --file

# Course file (id,name[,prereq1[,prereq2]] per line)
# data_file = "{DEFAULT_DATA_FILE}"

# Case applied to course ids before lookup: "upper", "lower" or "preserve"
# id_case = "upper"
"#
        )
    }
}

fn parse_id_case(value: &str) -> Result<IdCase, ApplicationError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "upper" => Ok(IdCase::Upper),
        "lower" => Ok(IdCase::Lower),
        "preserve" => Ok(IdCase::Preserve),
        other => Err(ApplicationError::Config {
            message: format!("invalid id_case '{other}', expected upper, lower or preserve"),
        }),
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_no_config_when_loading_then_uses_defaults() {
        let settings = Settings::load(None).expect("load defaults");
        assert!(!settings.data_file.as_os_str().is_empty());
    }

    #[test]
    fn given_tilde_in_data_file_when_expand_paths_then_expands_to_home() {
        let mut settings = Settings {
            data_file: PathBuf::from("~/courses.csv"),
            id_case: IdCase::Upper,
        };

        settings.expand_paths();

        let home = std::env::var("HOME").expect("HOME should be set");
        let path = settings.data_file.to_string_lossy();
        assert!(path.starts_with(&home), "data_file should start with home dir: {}", path);
        assert!(!path.contains('~'), "data_file should not contain tilde: {}", path);
    }

    #[test]
    fn given_partial_overlay_when_merging_then_unspecified_values_kept() {
        let base = Settings::default();
        let overlay = RawSettings {
            data_file: None,
            id_case: Some(IdCase::Preserve),
        };

        let merged = base.merge_with(&overlay);

        assert_eq!(merged.data_file, PathBuf::from(DEFAULT_DATA_FILE));
        assert_eq!(merged.id_case, IdCase::Preserve);
    }

    #[test]
    fn given_cli_file_when_overriding_then_replaces_data_file() {
        let settings = Settings::default().with_data_file(Some(PathBuf::from("other.csv")));
        assert_eq!(settings.data_file, PathBuf::from("other.csv"));

        let unchanged = Settings::default().with_data_file(None);
        assert_eq!(unchanged.data_file, PathBuf::from(DEFAULT_DATA_FILE));
    }

    #[test]
    fn given_id_case_strings_when_parsing_then_accepts_known_values() {
        assert_eq!(parse_id_case("Upper").unwrap(), IdCase::Upper);
        assert_eq!(parse_id_case(" lower ").unwrap(), IdCase::Lower);
        assert_eq!(parse_id_case("preserve").unwrap(), IdCase::Preserve);
        assert!(parse_id_case("title").is_err());
    }

    #[test]
    fn given_settings_when_serializing_then_template_and_toml_mention_keys() {
        let toml = Settings::default().to_toml().expect("serialize");
        assert!(toml.contains("data_file"));
        assert!(toml.contains("id_case = \"upper\""));
        assert!(Settings::template().contains("id_case"));
    }
}

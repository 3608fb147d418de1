//! Loading picker configuration from disk.

use std::{
    env, fs,
    path::{Path, PathBuf},
};

use dirs_next::config_dir;
use tracing::debug;

use super::{ConfigError, PickerConfig};

/// Environment variable overriding the configuration file location.
pub const CONFIG_PATH_ENV: &str = "FIELDPATH_CONFIG_PATH";

/// Returns the default path for the picker configuration file.
pub fn default_config_path() -> PathBuf {
    if let Ok(path) = env::var(CONFIG_PATH_ENV)
        && !path.trim().is_empty()
    {
        return PathBuf::from(path.trim());
    }

    config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("fieldpath")
        .join("picker.yaml")
}

/// Loads configuration from the default path.
pub fn load_config() -> Result<PickerConfig, ConfigError> {
    load_config_from_path(&default_config_path())
}

/// Loads a YAML or JSON configuration file. A missing file yields the default configuration.
pub fn load_config_from_path(path: &Path) -> Result<PickerConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "picker config not found; using defaults");
            return Ok(PickerConfig::default());
        }
        Err(error) => return Err(ConfigError::Io(error)),
    };
    if content.trim().is_empty() {
        return Ok(PickerConfig::default());
    }
    Ok(serde_yaml::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_path_honors_environment_override() {
        temp_env::with_var(CONFIG_PATH_ENV, Some("/tmp/custom/picker.yaml"), || {
            assert_eq!(default_config_path(), PathBuf::from("/tmp/custom/picker.yaml"));
        });
    }

    #[test]
    fn missing_file_yields_defaults() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = load_config_from_path(&temp_dir.path().join("absent.yaml")).expect("defaults");
        assert_eq!(config, PickerConfig::default());
    }

    #[test]
    fn reads_json_and_yaml_files() {
        let temp_dir = tempfile::tempdir().unwrap();
        let json_path = temp_dir.path().join("picker.json");
        fs::write(&json_path, r#"{"baseObject":"Contact","depth":1}"#).unwrap();
        let config = load_config_from_path(&json_path).expect("json config");
        assert_eq!(config.depth, 1);

        let yaml_path = temp_dir.path().join("picker.yaml");
        fs::write(&yaml_path, "baseObject: Case\nisUserFilteringDisabled: true\n").unwrap();
        let config = load_config_from_path(&yaml_path).expect("yaml config");
        assert!(config.is_user_filtering_disabled);
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("broken.yaml");
        fs::write(&path, "depth: [unterminated").unwrap();
        assert!(matches!(load_config_from_path(&path), Err(ConfigError::Parse(_))));
    }
}

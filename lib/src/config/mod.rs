// lib/src/config/mod.rs

pub mod config_defaults;
pub mod config_structs;

pub use config_defaults::*;
pub use config_structs::{AppConfig, RestApiConfig, StorageConfig, StorageEngineType, SummarizerConfig};

use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

use models::errors::{TrialError, TrialResult};

/// Loads the application configuration.
///
/// An explicit `config_path` must exist. Without one, `trialdash.yaml` in the
/// working directory is used when present, and built-in defaults otherwise.
pub fn load_config(config_path: Option<&Path>) -> TrialResult<AppConfig> {
    let path: PathBuf = match config_path {
        Some(path) => path.to_path_buf(),
        None => {
            let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !default_path.exists() {
                debug!("No {} found, using default configuration", DEFAULT_CONFIG_FILE);
                return Ok(AppConfig::default());
            }
            default_path
        }
    };

    let content = fs::read_to_string(&path).map_err(|e| {
        TrialError::ConfigError(format!("Failed to read config file {}: {}", path.display(), e))
    })?;
    let config = parse_config(&content).map_err(|e| match e {
        TrialError::ConfigError(msg) => TrialError::ConfigError(format!("{} ({})", msg, path.display())),
        other => other,
    })?;
    info!("Loaded configuration from {}", path.display());
    Ok(config)
}

/// Parses YAML configuration text and validates the storage engine type.
pub fn parse_config(content: &str) -> TrialResult<AppConfig> {
    if content.trim().is_empty() {
        return Ok(AppConfig::default());
    }
    let config: AppConfig = serde_yaml2::from_str(content)
        .map_err(|e| TrialError::ConfigError(format!("Failed to parse YAML configuration: {}", e)))?;
    config.storage.engine_type()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn should_use_defaults_for_empty_config() {
        let config = parse_config("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.rest_api.port, DEFAULT_REST_API_PORT);
        assert_eq!(config.summarizer.max_records, DEFAULT_MAX_PROMPT_RECORDS);
        assert_eq!(config.storage.engine_type().unwrap(), StorageEngineType::InMemory);
    }

    #[test]
    fn should_fill_missing_fields_with_defaults() {
        let yaml = "rest_api:\n  port: 9090\nstorage:\n  engine_type: sled\n  data_path: /tmp/trials\n";
        let config = parse_config(yaml).unwrap();
        assert_eq!(config.rest_api.port, 9090);
        assert_eq!(config.rest_api.host, DEFAULT_REST_API_HOST);
        assert_eq!(config.storage.engine_type().unwrap(), StorageEngineType::Sled);
        assert_eq!(config.storage.data_path, PathBuf::from("/tmp/trials"));
        assert_eq!(config.summarizer.model, DEFAULT_SUMMARIZER_MODEL);
    }

    #[test]
    fn should_reject_unknown_storage_engine() {
        let err = parse_config("storage:\n  engine_type: rocksdb\n").unwrap_err();
        assert!(matches!(err, TrialError::ConfigError(msg) if msg.contains("rocksdb")));
    }

    #[test]
    fn should_load_config_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "summarizer:\n  kind: disabled\n  max_records: 5").unwrap();
        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.summarizer.kind, "disabled");
        assert_eq!(config.summarizer.max_records, 5);
    }

    #[test]
    fn should_fail_on_missing_explicit_config_file() {
        let err = load_config(Some(Path::new("/nonexistent/trialdash.yaml"))).unwrap_err();
        assert!(matches!(err, TrialError::ConfigError(_)));
    }
}

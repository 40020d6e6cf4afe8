// lib/src/config/config_structs.rs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use models::errors::TrialError;

use crate::config::config_defaults::*;

/// Top-level configuration, mirroring `trialdash.yaml`. Every section and
/// field has a default, so an empty or partial file is valid.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub rest_api: RestApiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub summarizer: SummarizerConfig,
}

/// REST API configuration
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct RestApiConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for RestApiConfig {
    fn default() -> Self {
        RestApiConfig { host: default_host(), port: default_port() }
    }
}

/// Storage configuration
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct StorageConfig {
    /// `inmemory` or `sled`.
    #[serde(default = "default_storage_engine_type")]
    pub engine_type: String,
    /// Directory of the sled database.
    #[serde(default = "default_data_path")]
    pub data_path: PathBuf,
    /// Dataset file loaded by the in-memory engine instead of the bundled seed.
    #[serde(default)]
    pub dataset_path: Option<PathBuf>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            engine_type: default_storage_engine_type(),
            data_path: default_data_path(),
            dataset_path: None,
        }
    }
}

impl StorageConfig {
    pub fn engine_type(&self) -> Result<StorageEngineType, TrialError> {
        self.engine_type.parse()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageEngineType {
    InMemory,
    Sled,
}

impl FromStr for StorageEngineType {
    type Err = TrialError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "inmemory" | "in_memory" | "memory" => Ok(StorageEngineType::InMemory),
            "sled" => Ok(StorageEngineType::Sled),
            _ => Err(TrialError::ConfigError(format!("Unknown storage engine type: {}", s))),
        }
    }
}

impl fmt::Display for StorageEngineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageEngineType::InMemory => write!(f, "inmemory"),
            StorageEngineType::Sled => write!(f, "sled"),
        }
    }
}

/// Summarization service configuration
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct SummarizerConfig {
    /// `openai` (any OpenAI-compatible chat-completions endpoint) or `disabled`.
    #[serde(default = "default_summarizer_kind")]
    pub kind: String,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// Name of the environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Upper bound on records serialized into a dataset prompt.
    #[serde(default = "default_max_records")]
    pub max_records: usize,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        SummarizerConfig {
            kind: default_summarizer_kind(),
            endpoint: default_endpoint(),
            model: default_model(),
            api_key_env: default_api_key_env(),
            timeout_secs: default_timeout_secs(),
            temperature: default_temperature(),
            max_records: default_max_records(),
        }
    }
}

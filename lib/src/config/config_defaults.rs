// lib/src/config/config_defaults.rs

use std::path::PathBuf;

pub const DEFAULT_CONFIG_FILE: &str = "trialdash.yaml";
pub const DEFAULT_REST_API_HOST: &str = "127.0.0.1";
pub const DEFAULT_REST_API_PORT: u16 = 8082;
pub const DEFAULT_DATA_DIRECTORY: &str = "./data";
pub const DEFAULT_SUMMARIZER_ENDPOINT: &str = "https://api.openai.com/v1";
pub const DEFAULT_SUMMARIZER_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";
/// Records serialized into a dataset summary prompt.
pub const DEFAULT_MAX_PROMPT_RECORDS: usize = 10;

pub fn default_host() -> String { DEFAULT_REST_API_HOST.to_string() }
pub fn default_port() -> u16 { DEFAULT_REST_API_PORT }
pub fn default_storage_engine_type() -> String { "inmemory".to_string() }
pub fn default_data_path() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIRECTORY).join("sled")
}
pub fn default_summarizer_kind() -> String { "openai".to_string() }
pub fn default_endpoint() -> String { DEFAULT_SUMMARIZER_ENDPOINT.to_string() }
pub fn default_model() -> String { DEFAULT_SUMMARIZER_MODEL.to_string() }
pub fn default_api_key_env() -> String { DEFAULT_API_KEY_ENV.to_string() }
pub fn default_timeout_secs() -> u64 { 30 }
pub fn default_temperature() -> f32 { 0.2 }
pub fn default_max_records() -> usize { DEFAULT_MAX_PROMPT_RECORDS }

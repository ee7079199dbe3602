//! Configuration management for the Labtrack server

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// `pretty` or `json`
    pub format: String,
}

/// Which table store backs the service
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Sheets,
    Memory,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    /// JSON file used to seed the memory backend
    pub seed_file: Option<PathBuf>,
    pub connect_attempts: u32,
    pub connect_delay_ms: u64,
    pub cache_ttl_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SheetsConfig {
    /// Workbook title, resolved through Drive when `spreadsheet_id` is unset
    pub workbook: String,
    pub spreadsheet_id: Option<String>,
    pub access_token: String,
    pub sheets_api_url: String,
    pub drive_api_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub sheets: SheetsConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // LABTRACK__STORE__BACKEND=memory etc.
            .add_source(
                Environment::with_prefix("LABTRACK")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("sheets.access_token", env::var("SHEETS_ACCESS_TOKEN").ok())?
            .set_override_option("sheets.spreadsheet_id", env::var("SPREADSHEET_ID").ok())?
            .build()?;

        config.try_deserialize()
    }
}

impl StoreBackend {
    pub fn as_str(self) -> &'static str {
        match self {
            StoreBackend::Sheets => "sheets",
            StoreBackend::Memory => "memory",
        }
    }
}

impl StoreConfig {
    pub fn connect_delay(&self) -> Duration {
        Duration::from_millis(self.connect_delay_ms)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Sheets,
            seed_file: None,
            connect_attempts: 3,
            connect_delay_ms: 2000,
            cache_ttl_secs: 60,
        }
    }
}

impl Default for SheetsConfig {
    fn default() -> Self {
        Self {
            workbook: "Lab_Manager".to_string(),
            spreadsheet_id: None,
            access_token: String::new(),
            sheets_api_url: "https://sheets.googleapis.com/v4".to_string(),
            drive_api_url: "https://www.googleapis.com/drive/v3".to_string(),
            timeout_secs: 30,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
            store: StoreConfig::default(),
            sheets: SheetsConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_defaults() {
        let store = StoreConfig::default();
        assert_eq!(store.backend, StoreBackend::Sheets);
        assert_eq!(store.connect_attempts, 3);
        assert_eq!(store.cache_ttl(), Duration::from_secs(60));
        assert_eq!(store.connect_delay(), Duration::from_millis(2000));
    }

    #[test]
    fn test_backend_deserializes_lowercase() {
        let backend: StoreBackend = serde_json::from_str("\"memory\"").unwrap();
        assert_eq!(backend, StoreBackend::Memory);
        assert_eq!(backend.as_str(), "memory");
    }
}

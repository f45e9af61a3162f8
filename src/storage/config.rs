use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::calendar::TimeFormat;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub backend: BackendConfig,
    pub booking: BookingConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BackendConfig {
    pub base_url: String,
    pub session_file: PathBuf,
    /// Unset means the HTTP client's own default applies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookingConfig {
    pub provider_id: String,
    pub service_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UiConfig {
    pub time_format: TimeFormat,
    pub theme: String,
}

impl Config {
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }

    pub fn load_or_create() -> Result<Self, ConfigError> {
        Self::load_or_create_at(&Self::config_path())
    }

    pub fn load_or_create_at(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml(&content)
        } else {
            tracing::info!("No config at {}, writing defaults", path.display());
            let config = Self::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("bookcal")
    }

    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        Ok(())
    }

    pub fn is_booking_configured(&self) -> bool {
        !self.booking.provider_id.is_empty() && !self.booking.service_id.is_empty()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: BackendConfig {
                base_url: "http://localhost:5000/api".to_string(),
                session_file: Self::config_dir().join("session.json"),
                request_timeout_secs: None,
            },
            booking: BookingConfig {
                provider_id: String::new(),
                service_id: String::new(),
            },
            ui: UiConfig {
                time_format: TimeFormat::TwentyFourHour,
                theme: "default".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_has_no_request_timeout() {
        let config = Config::default();
        assert_eq!(config.backend.request_timeout_secs, None);
    }

    #[test]
    fn default_config_uses_24_hour_clock() {
        let config = Config::default();
        assert_eq!(config.ui.time_format, TimeFormat::TwentyFourHour);
    }

    #[test]
    fn default_config_is_not_booking_configured() {
        assert!(!Config::default().is_booking_configured());
    }

    #[test]
    fn parse_valid_toml_config() {
        let toml_content = r#"
            [backend]
            base_url = "https://bookings.example.com/api"
            session_file = "/tmp/session.json"
            request_timeout_secs = 10

            [booking]
            provider_id = "prov-42"
            service_id = "svc-7"

            [ui]
            time_format = "12h"
            theme = "nord"
        "#;

        let config = Config::from_toml(toml_content).unwrap();

        assert_eq!(config.backend.base_url, "https://bookings.example.com/api");
        assert_eq!(config.backend.request_timeout_secs, Some(10));
        assert_eq!(config.booking.service_id, "svc-7");
        assert_eq!(config.ui.time_format, TimeFormat::TwelveHour);
        assert!(config.is_booking_configured());
    }

    #[test]
    fn parse_invalid_toml_returns_error() {
        let invalid_toml = "this is not valid toml";
        let result = Config::from_toml(invalid_toml);
        assert!(result.is_err());
    }

    #[test]
    fn load_or_create_writes_defaults_when_missing() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let config = Config::load_or_create_at(&path).unwrap();

        assert!(path.exists());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn saved_config_loads_back() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        let mut config = Config::default();
        config.booking.provider_id = "prov-1".to_string();
        config.ui.theme = "gruvbox".to_string();

        config.save_to(&path).unwrap();
        let loaded = Config::load_or_create_at(&path).unwrap();

        assert_eq!(loaded, config);
    }
}

//! # Configuration
//!
//! Optional TOML configuration for the binary.
//!
//! ```toml
//! [server]
//! host = "127.0.0.1"
//! port = 8080
//! rate_limit = 100          # requests per second, 0 disables
//! cors_origins = ["http://localhost:3000"]
//!
//! [logging]
//! format = "text"           # or "json"
//! filter = "centralpain=debug"
//! ```
//!
//! ## Environment Overrides
//!
//! - `CENTRALPAIN_RATE_LIMIT`: requests per second
//! - `CENTRALPAIN_CORS_ORIGINS`: comma-separated origins, or "*" for all
//! - `CENTRALPAIN_LOG_FORMAT`: "text" or "json"
//!
//! `RUST_LOG` takes precedence over `logging.filter`.

use centralpain_core::AssessmentError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration file, resolved against the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "centralpain.toml";

/// Default log filter when neither `RUST_LOG` nor `logging.filter` is set.
pub const DEFAULT_LOG_FILTER: &str = "centralpain=info,tower_http=debug";

pub const ENV_RATE_LIMIT: &str = "CENTRALPAIN_RATE_LIMIT";
pub const ENV_CORS_ORIGINS: &str = "CENTRALPAIN_CORS_ORIGINS";
pub const ENV_LOG_FORMAT: &str = "CENTRALPAIN_LOG_FORMAT";

/// Config files larger than this are rejected.
const MAX_CONFIG_FILE_SIZE: u64 = 64 * 1024;

// =============================================================================
// CONFIG STRUCTURE
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Requests per second across all clients. 0 disables rate limiting.
    pub rate_limit: u32,
    /// Allowed CORS origins. `None` means localhost only; `["*"]` allows all.
    pub cors_origins: Option<Vec<String>>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            rate_limit: 100,
            cors_origins: None,
        }
    }
}

impl ServerConfig {
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub format: LogFormat,
    pub filter: Option<String>,
}

// =============================================================================
// LOADING
// =============================================================================

impl AppConfig {
    /// Load configuration from `path`, then apply environment overrides.
    ///
    /// A missing file at the default location yields defaults. A missing file
    /// that was named explicitly is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, AssessmentError> {
        let mut config = match path {
            Some(explicit) => Self::from_file(explicit)?,
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.is_file() {
                    Self::from_file(&default_path)?
                } else {
                    Self::default()
                }
            }
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Read and parse a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, AssessmentError> {
        let metadata = std::fs::metadata(path).map_err(|e| {
            AssessmentError::ConfigError(format!("Cannot read '{}': {}", path.display(), e))
        })?;
        if metadata.len() > MAX_CONFIG_FILE_SIZE {
            return Err(AssessmentError::ConfigError(format!(
                "'{}' is {} bytes, maximum is {}",
                path.display(),
                metadata.len(),
                MAX_CONFIG_FILE_SIZE
            )));
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            AssessmentError::ConfigError(format!("Cannot read '{}': {}", path.display(), e))
        })?;
        Self::from_toml_str(&contents)
            .map_err(|e| AssessmentError::ConfigError(format!("{}: {}", path.display(), e)))
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self, AssessmentError> {
        toml::from_str(contents).map_err(|e| AssessmentError::ConfigError(e.to_string()))
    }

    /// Apply overrides from an environment-like lookup.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), AssessmentError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(ENV_RATE_LIMIT) {
            self.server.rate_limit = raw.trim().parse().map_err(|_| {
                AssessmentError::ConfigError(format!("{ENV_RATE_LIMIT}: invalid number '{raw}'"))
            })?;
        }

        if let Some(raw) = lookup(ENV_CORS_ORIGINS) {
            let origins: Vec<String> = raw
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
            self.server.cors_origins = Some(origins);
        }

        if let Some(raw) = lookup(ENV_LOG_FORMAT) {
            self.logging.format = match raw.trim().to_ascii_lowercase().as_str() {
                "json" => LogFormat::Json,
                "text" => LogFormat::Text,
                other => {
                    return Err(AssessmentError::ConfigError(format!(
                        "{ENV_LOG_FORMAT}: expected 'text' or 'json', got '{other}'"
                    )));
                }
            };
        }

        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================

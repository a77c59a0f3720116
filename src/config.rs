use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;
use url::Url;

const CONFIG_FILE_NAME: &str = "letter-reset.toml";

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub token: String,
    /// Request timeout; no timeout when unset
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: String::new(),
            timeout_secs: None,
        }
    }
}

// The token must never reach log output.
impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = if self.token.is_empty() {
            "<unset>"
        } else {
            "<redacted>"
        };
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url)
            .field("token", &token)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Some("warn".to_string()),
        }
    }
}

impl Config {
    /// Load configuration from TOML file with XDG directory support and environment variable overrides
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        Self::load_with(config_path, |key| env::var(key).ok())
    }

    /// Load configuration, taking `LETTER_RESET_*` overrides from `lookup`.
    ///
    /// An explicitly given path must exist; only the discovered default may be absent.
    pub fn load_with<F>(config_path: Option<PathBuf>, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config_file = match config_path {
            Some(path) if !path.exists() => {
                return Err(ConfigError::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("config file not found: {}", path.display()),
                )));
            }
            Some(path) => path,
            None => Self::find_config_file(),
        };

        let mut config = if config_file.exists() {
            tracing::debug!("Loading config from: {}", config_file.display());
            let content = std::fs::read_to_string(&config_file)?;
            toml::from_str::<Config>(&content)?
        } else {
            tracing::debug!("No config file found, using environment variables only");
            Config {
                api: ApiConfig::default(),
                logging: None,
            }
        };

        config.apply_overrides_from(lookup)?;

        if config.logging.is_none() {
            config.logging = Some(LoggingConfig::default());
        }

        config.validate()?;

        Ok(config)
    }

    /// Find configuration file in the current directory, then the user config directory
    fn find_config_file() -> PathBuf {
        let current_dir_config = PathBuf::from(CONFIG_FILE_NAME);
        if current_dir_config.exists() {
            return current_dir_config;
        }

        if let Some(user_config) =
            dirs::config_dir().map(|dir| dir.join("letter-reset").join(CONFIG_FILE_NAME))
        {
            if user_config.exists() {
                return user_config;
            }
        }

        // Default to current directory (file may not exist yet)
        current_dir_config
    }

    /// Apply `LETTER_RESET_*` overrides using the given variable lookup
    fn apply_overrides_from<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base_url) = lookup("LETTER_RESET_API_BASE_URL") {
            self.api.base_url = base_url;
        }
        if let Some(token) = lookup("LETTER_RESET_API_TOKEN") {
            self.api.token = token;
        }
        if let Some(timeout) = lookup("LETTER_RESET_API_TIMEOUT_SECS") {
            self.api.timeout_secs = Some(timeout.parse().map_err(|_| {
                ConfigError::InvalidValue(
                    "LETTER_RESET_API_TIMEOUT_SECS must be a valid number".to_string(),
                )
            })?);
        }

        if let Some(level) = lookup("LETTER_RESET_LOG_LEVEL") {
            let logging = self.logging.get_or_insert_with(LoggingConfig::default);
            logging.level = Some(level);
        }

        Ok(())
    }

    /// Validate that all required configuration is present
    fn validate(&self) -> Result<(), ConfigError> {
        if self.api.token.trim().is_empty() {
            return Err(ConfigError::MissingRequired(
                "api.token or LETTER_RESET_API_TOKEN".to_string(),
            ));
        }

        if self.api.base_url.trim().is_empty() {
            return Err(ConfigError::MissingRequired(
                "api.base_url or LETTER_RESET_API_BASE_URL".to_string(),
            ));
        }

        let url = Url::parse(&self.api.base_url).map_err(|e| {
            ConfigError::InvalidValue(format!(
                "api.base_url '{}' is not a valid URL: {e}",
                self.api.base_url
            ))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidValue(format!(
                "api.base_url must use http or https, got '{}'",
                url.scheme()
            )));
        }

        if self.api.timeout_secs == Some(0) {
            return Err(ConfigError::InvalidValue(
                "api.timeout_secs must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Get the logging configuration with defaults
    pub fn logging(&self) -> LoggingConfig {
        self.logging.clone().unwrap_or_default()
    }
}

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Base endpoint of the public character listing
pub const DEFAULT_ENDPOINT: &str = "https://rickandmortyapi.com/api/character/";

/// Configuration for the character browser
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowserConfig {
    /// Character listing endpoint; searches add a `name` query to it
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Quiet period after the last keystroke before a search is sent
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Timeout applied to every HTTP request
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// File that log output is written to in interactive mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Default value for endpoint
fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

/// Default value for debounce_ms
fn default_debounce_ms() -> u64 {
    500
}

/// Default value for request_timeout_secs
fn default_request_timeout_secs() -> u64 {
    30
}

/// Default value for user_agent
fn default_user_agent() -> String {
    format!("character-browser/{}", env!("CARGO_PKG_VERSION"))
}

impl BrowserConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self {
            endpoint: default_endpoint(),
            debounce_ms: default_debounce_ms(),
            request_timeout_secs: default_request_timeout_secs(),
            user_agent: default_user_agent(),
            log_file: None,
        }
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the settings a browser cannot work without
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.endpoint_url()?;
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout);
        }
        Ok(())
    }

    /// Parse the configured endpoint
    pub fn endpoint_url(&self) -> Result<Url, ConfigError> {
        let url = Url::parse(&self.endpoint)
            .map_err(|_| ConfigError::InvalidEndpoint(self.endpoint.clone()))?;
        if url.cannot_be_a_base() {
            return Err(ConfigError::InvalidEndpoint(self.endpoint.clone()));
        }
        Ok(url)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

// Re-export modules
pub mod api;
pub mod browser;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod results;
pub mod ui;

// Re-export commonly used types for convenience
pub use api::{CharacterApi, HttpCharacterApi};
pub use browser::{BrowserHandle, BrowserState, CharacterBrowser, Command, LoadStatus};
pub use config::BrowserConfig;
pub use error::{ConfigError, Error, FetchError};
pub use results::{Character, CharacterPage, PageInfo};

use std::path::Path;
use std::time::Duration;
use url::Url;

/// Main builder for character browsers and one-off page fetches
#[derive(Debug, Clone, Default)]
pub struct Browser {
    config: BrowserConfig,
}

impl Browser {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: BrowserConfig::new(),
        }
    }

    /// Replace the whole configuration
    pub fn with_config(mut self, config: BrowserConfig) -> Self {
        self.config = config;
        self
    }

    /// Load configuration from a JSON file
    pub fn with_config_file(self, path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config = BrowserConfig::from_file(path)?;
        Ok(self.with_config(config))
    }

    /// Load configuration from a JSON string
    pub fn with_config_str(self, json: &str) -> Result<Self, ConfigError> {
        let config = BrowserConfig::from_json(json)?;
        Ok(self.with_config(config))
    }

    /// Override the character listing endpoint
    pub fn with_endpoint(mut self, endpoint: &str) -> Result<Self, ConfigError> {
        self.config.endpoint = endpoint.to_string();
        self.config.endpoint_url()?;
        Ok(self)
    }

    /// Override the search debounce delay
    pub fn with_debounce(mut self, delay: Duration) -> Self {
        self.config.debounce_ms = delay.as_millis() as u64;
        self
    }

    /// Override the per-request timeout
    pub fn with_request_timeout(mut self, timeout_seconds: u64) -> Self {
        self.config.request_timeout_secs = timeout_seconds;
        self
    }

    pub fn config(&self) -> &BrowserConfig {
        &self.config
    }

    /// Start an interactive browser backed by the HTTP API
    pub fn spawn(self) -> Result<BrowserHandle, Error> {
        self.config.validate()?;
        let api = HttpCharacterApi::new(&self.config)?;
        Ok(CharacterBrowser::spawn(api, &self.config)?)
    }

    /// Fetch a single page: the given URL, or the search results for
    /// `search_text` at `page` when no URL is given
    pub async fn fetch(
        &self,
        search_text: &str,
        page: u64,
        url: Option<&str>,
    ) -> Result<CharacterPage, Error> {
        self.config.validate()?;
        let target = match url {
            Some(url) => endpoint::parse_url(url)?,
            None => endpoint::page_url(&self.endpoint()?, search_text, page),
        };
        let api = HttpCharacterApi::new(&self.config)?;
        Ok(api.fetch_page(&target).await?)
    }

    fn endpoint(&self) -> Result<Url, ConfigError> {
        self.config.endpoint_url()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_overrides() {
        let browser = Browser::new()
            .with_debounce(Duration::from_millis(250))
            .with_request_timeout(5)
            .with_endpoint("http://localhost:8080/api/character/")
            .unwrap();

        assert_eq!(browser.config().debounce_ms, 250);
        assert_eq!(browser.config().request_timeout_secs, 5);
        assert_eq!(browser.config().endpoint, "http://localhost:8080/api/character/");
    }

    #[test]
    fn test_builder_rejects_bad_endpoint() {
        assert!(Browser::new().with_endpoint("nope").is_err());
    }

    #[tokio::test]
    async fn test_zero_timeout_is_rejected_before_any_request() {
        let browser = Browser::new().with_request_timeout(0);

        let err = browser.fetch("rick", 1, None).await.unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::InvalidTimeout)));
        assert!(matches!(
            browser.spawn(),
            Err(Error::Config(ConfigError::InvalidTimeout))
        ));
    }

    #[tokio::test]
    async fn test_fetch_named_page() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/character/")
            .match_query(mockito::Matcher::AllOf(vec![
                mockito::Matcher::UrlEncoded("name".into(), "morty".into()),
                mockito::Matcher::UrlEncoded("page".into(), "2".into()),
            ]))
            .with_status(200)
            .with_body(r#"{"info": {"prev": null, "next": null}, "results": []}"#)
            .create_async()
            .await;

        let browser = Browser::new()
            .with_endpoint(&format!("{}/api/character/", server.url()))
            .unwrap();
        let page = browser.fetch("morty", 2, None).await.unwrap();

        mock.assert_async().await;
        assert!(page.is_empty());
    }
}

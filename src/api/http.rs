use super::CharacterApi;
use crate::config::BrowserConfig;
use crate::error::FetchError;
use crate::results::CharacterPage;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use url::Url;

/// Character source backed by the public REST API
#[derive(Debug, Clone)]
pub struct HttpCharacterApi {
    client: Client,
}

impl HttpCharacterApi {
    /// Build a client using the timeout and user agent from the configuration
    pub fn new(config: &BrowserConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl CharacterApi for HttpCharacterApi {
    async fn fetch_page(&self, url: &Url) -> Result<CharacterPage, FetchError> {
        let started = std::time::Instant::now();
        ::log::debug!("GET {}", url);

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();

        // The API answers an unmatched name filter with 404
        if status == StatusCode::NOT_FOUND {
            ::log::info!("No characters at {}", url);
            return Ok(CharacterPage::empty());
        }

        if !status.is_success() {
            ::log::warn!("GET {} failed with status {}", url, status);
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let page: CharacterPage = serde_json::from_str(&body)?;

        ::log::debug!(
            "GET {} returned {} characters in {:.2} seconds",
            url,
            page.results.len(),
            started.elapsed().as_secs_f64()
        );

        Ok(page)
    }
}

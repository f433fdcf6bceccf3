use crate::error::FetchError;
use crate::results::CharacterPage;
use async_trait::async_trait;
use url::Url;

/// Source of character pages.
///
/// Implementations resolve a 404 to an empty page; every other failure is
/// returned as a [`FetchError`].
#[async_trait]
pub trait CharacterApi: Send + Sync {
    /// Fetch the page behind a fully built URL
    async fn fetch_page(&self, url: &Url) -> Result<CharacterPage, FetchError>;
}

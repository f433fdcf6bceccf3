//! Scripted in-memory character source for exercising the browser loop.

use super::CharacterApi;
use crate::error::FetchError;
use crate::results::CharacterPage;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone)]
pub enum Reply {
    Page(CharacterPage),
    Status(u16),
}

#[derive(Debug, Clone, Default)]
pub struct ScriptedApi {
    replies: Arc<Mutex<HashMap<String, (Duration, Reply)>>>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `url` with `reply` after `delay`
    pub fn reply(&self, url: &str, delay: Duration, reply: Reply) {
        self.replies
            .lock()
            .unwrap()
            .insert(url.to_string(), (delay, reply));
    }

    /// URLs requested so far, in call order
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CharacterApi for ScriptedApi {
    async fn fetch_page(&self, url: &Url) -> Result<CharacterPage, FetchError> {
        self.requests.lock().unwrap().push(url.to_string());
        let scripted = self.replies.lock().unwrap().get(url.as_str()).cloned();

        let (delay, reply) = scripted.unwrap_or((Duration::ZERO, Reply::Page(CharacterPage::empty())));
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        match reply {
            Reply::Page(page) => Ok(page),
            Reply::Status(404) => Ok(CharacterPage::empty()),
            Reply::Status(code) => Err(FetchError::Status(code)),
        }
    }
}

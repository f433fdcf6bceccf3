use crate::endpoint;
use crate::error::FetchError;
use crate::results::{Character, CharacterPage, PageInfo};
use url::Url;

/// Where the browser is in its `idle -> loading -> outcome` cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// Nothing requested yet
    Idle,
    /// A request is in flight
    Loading,
    /// The last request returned at least one character
    Loaded,
    /// The last request returned no characters (including a 404)
    Empty,
    /// The last request failed; holds the user-facing message
    Failed(String),
}

/// A request the event loop has to carry out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub id: u64,
    pub url: Url,
}

/// Everything the browser knows about the current query and result page.
///
/// Transitions are plain method calls so the event loop stays a thin
/// dispatcher and the rules can be exercised without any I/O.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserState {
    base: Url,

    /// Text as typed by the user
    pub search_text: String,

    /// Text the current results were requested with
    pub debounced_text: String,
    pub characters: Vec<Character>,
    pub info: PageInfo,
    pub status: LoadStatus,

    latest_request: u64,
    last_url: Option<Url>,
}

impl BrowserState {
    pub fn new(base: Url) -> Self {
        Self {
            base,
            search_text: String::new(),
            debounced_text: String::new(),
            characters: Vec::new(),
            info: PageInfo::default(),
            status: LoadStatus::Idle,
            latest_request: 0,
            last_url: None,
        }
    }

    /// Record new search text. Returns true when the text changed and a
    /// debounced fetch should be (re)scheduled.
    pub fn set_search_text(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        if text == self.search_text {
            return false;
        }
        self.search_text = text;
        true
    }

    /// The quiet period after typing has passed. Issues a fetch only when
    /// the settled text differs from the one the results belong to.
    pub fn debounce_elapsed(&mut self) -> Option<FetchRequest> {
        if self.search_text == self.debounced_text {
            ::log::debug!("Search text settled unchanged, skipping fetch");
            return None;
        }
        self.debounced_text = self.search_text.clone();
        Some(self.fetch_page(None))
    }

    /// Start a fetch of `url`, or of the base endpoint filtered by the
    /// debounced text when no URL is given. Supersedes any earlier request.
    ///
    /// A new query drops the old pagination links: they belong to the
    /// previous query's result set and stay unusable until the new page lands.
    pub fn fetch_page(&mut self, url: Option<Url>) -> FetchRequest {
        let url = match url {
            Some(url) => url,
            None => {
                self.info = PageInfo::default();
                endpoint::search_url(&self.base, &self.debounced_text)
            }
        };
        self.latest_request += 1;
        self.status = LoadStatus::Loading;
        self.last_url = Some(url.clone());

        ::log::debug!("Request {} -> {}", self.latest_request, url);
        FetchRequest {
            id: self.latest_request,
            url,
        }
    }

    /// Fetch the next page. `None` when there is no next page.
    pub fn go_to_next(&mut self) -> Option<FetchRequest> {
        let next = self.info.next.clone()?;
        self.follow(&next)
    }

    /// Fetch the previous page. `None` when there is no previous page.
    pub fn go_to_previous(&mut self) -> Option<FetchRequest> {
        let prev = self.info.prev.clone()?;
        self.follow(&prev)
    }

    /// Re-issue the most recent fetch
    pub fn refresh(&mut self) -> FetchRequest {
        let url = self.last_url.clone();
        self.fetch_page(url)
    }

    fn follow(&mut self, link: &str) -> Option<FetchRequest> {
        match endpoint::parse_url(link) {
            Ok(url) => Some(self.fetch_page(Some(url))),
            Err(e) => {
                // The failure replaces whatever was in flight
                self.latest_request += 1;
                ::log::warn!(
                    "Request {} has an unusable pagination link: {}",
                    self.latest_request,
                    e
                );
                self.status = LoadStatus::Failed(e.to_string());
                None
            }
        }
    }

    /// Apply the outcome of request `id`. Returns false, leaving the state
    /// untouched, when a newer request has been issued since.
    pub fn complete(&mut self, id: u64, result: Result<CharacterPage, FetchError>) -> bool {
        if id != self.latest_request {
            ::log::debug!(
                "Discarding stale response {} (latest is {})",
                id,
                self.latest_request
            );
            return false;
        }

        match result {
            Ok(page) => {
                self.status = if page.is_empty() {
                    LoadStatus::Empty
                } else {
                    LoadStatus::Loaded
                };
                self.characters = page.results;
                self.info = page.info;
            }
            Err(e) => {
                ::log::error!("Request {} failed: {}", id, e);
                self.status = LoadStatus::Failed(e.to_string());
            }
        }
        true
    }

    pub fn is_loading(&self) -> bool {
        self.status == LoadStatus::Loading
    }

    /// Message of the last failure, if the last request failed
    pub fn error(&self) -> Option<&str> {
        match &self.status {
            LoadStatus::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn can_go_previous(&self) -> bool {
        self.info.has_prev()
    }

    pub fn can_go_next(&self) -> bool {
        self.info.has_next()
    }

    pub fn current_page(&self) -> Option<u64> {
        endpoint::current_page(&self.info)
    }
}

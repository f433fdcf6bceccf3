use crate::error::FetchError;
use crate::results::PageInfo;
use url::Url;

/// Build the fetch target for a search.
///
/// An empty search returns the base endpoint untouched so the unfiltered
/// listing is shown. Any other text, whitespace included, becomes a
/// percent-encoded `name` filter.
pub fn search_url(base: &Url, search_text: &str) -> Url {
    let mut url = base.clone();
    url.set_fragment(None);
    if search_text.is_empty() {
        return url;
    }
    url.set_query(Some(&format!("name={}", urlencoding::encode(search_text))));
    url
}

/// Build the fetch target for a specific page of a search
pub fn page_url(base: &Url, search_text: &str, page: u64) -> Url {
    let mut url = search_url(base, search_text);
    if page > 1 {
        url.query_pairs_mut().append_pair("page", &page.to_string());
    }
    url
}

/// Parse a pagination URL handed back by the API
pub fn parse_url(url: &str) -> Result<Url, FetchError> {
    Url::parse(url).map_err(|source| FetchError::InvalidUrl {
        url: url.to_string(),
        source,
    })
}

/// Extract the `page` query parameter from a URL, if any
pub fn page_number(url: &str) -> Option<u64> {
    let url = Url::parse(url).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == "page")
        .and_then(|(_, value)| value.parse().ok())
}

/// Work out which page the pagination links surround.
///
/// Returns `None` when neither link carries a page number and the result
/// set spans more than one page.
pub fn current_page(info: &PageInfo) -> Option<u64> {
    if let Some(next) = info.next.as_deref().and_then(page_number) {
        return Some(next.saturating_sub(1).max(1));
    }
    if let Some(prev) = info.prev.as_deref().and_then(page_number) {
        return Some(prev + 1);
    }
    if info.prev.is_none() && info.next.is_none() {
        return Some(1);
    }
    None
}

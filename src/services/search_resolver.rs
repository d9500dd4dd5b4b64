//! Address-bar input classification and search-URL resolution.

use crate::types::page::INTERNAL_SCHEME;
use crate::types::settings::{BrowserSettings, SearchEngine, SEARCH_PLACEHOLDER};

/// Returns true when `input` is already an address rather than a query.
pub fn is_direct_url(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://") || input.starts_with(INTERNAL_SCHEME)
}

/// Turns address-bar text into the URL to navigate to.
///
/// Direct URLs pass through unchanged. Anything else is a search query sent to
/// the configured engine. A custom template gets the encoded query in place of
/// its first `%s` and is otherwise used verbatim; an empty template or one
/// without a placeholder falls back to Google.
pub fn resolve(input: &str, settings: &BrowserSettings) -> String {
    if is_direct_url(input) {
        return input.to_string();
    }

    let query = urlencoding::encode(input);

    if settings.search_engine == SearchEngine::Custom {
        let template = settings.custom_search_url.as_str();
        if template.contains(SEARCH_PLACEHOLDER) {
            return template.replacen(SEARCH_PLACEHOLDER, &query, 1);
        }
        log::warn!("custom search URL has no {} placeholder, using Google", SEARCH_PLACEHOLDER);
    }

    let endpoint = settings
        .search_engine
        .endpoint()
        .or_else(|| SearchEngine::Google.endpoint())
        .unwrap_or_default();
    format!("{}{}", endpoint, query)
}

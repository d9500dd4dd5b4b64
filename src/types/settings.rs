use serde::{Deserialize, Serialize};

use super::page::InternalPage;

/// Placeholder in a custom search template that receives the encoded query.
pub const SEARCH_PLACEHOLDER: &str = "%s";

/// Browser settings as persisted in `settings.json`.
///
/// Keys use the camelCase names the chrome view and the settings file share.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BrowserSettings {
    #[serde(default)]
    pub theme: ThemeMode,
    #[serde(default = "default_start_page")]
    pub start_page: String,
    #[serde(default)]
    pub search_engine: SearchEngine,
    #[serde(default)]
    pub custom_search_url: String,
}

fn default_start_page() -> String {
    InternalPage::HOME_URL.to_string()
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            theme: ThemeMode::default(),
            start_page: default_start_page(),
            search_engine: SearchEngine::default(),
            custom_search_url: String::new(),
        }
    }
}

/// The four named settings. Anything else is rejected as an invalid key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKey {
    Theme,
    StartPage,
    SearchEngine,
    CustomSearchUrl,
}

impl SettingKey {
    pub const ALL: [SettingKey; 4] = [
        SettingKey::Theme,
        SettingKey::StartPage,
        SettingKey::SearchEngine,
        SettingKey::CustomSearchUrl,
    ];

    pub fn parse(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == key)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SettingKey::Theme => "theme",
            SettingKey::StartPage => "startPage",
            SettingKey::SearchEngine => "searchEngine",
            SettingKey::CustomSearchUrl => "customSearchUrl",
        }
    }
}

/// Theme mode selection.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
    #[default]
    System,
}

/// Search engine used for address-bar input that is not a URL.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum SearchEngine {
    #[default]
    Google,
    DuckDuckGo,
    Bing,
    Custom,
}

impl SearchEngine {
    /// Query endpoint for the built-in engines; `None` for `Custom`.
    pub fn endpoint(&self) -> Option<&'static str> {
        match self {
            SearchEngine::Google => Some("https://www.google.com/search?q="),
            SearchEngine::DuckDuckGo => Some("https://duckduckgo.com/?q="),
            SearchEngine::Bing => Some("https://www.bing.com/search?q="),
            SearchEngine::Custom => None,
        }
    }
}

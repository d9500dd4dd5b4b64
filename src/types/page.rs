use serde::{Deserialize, Serialize};

/// Scheme prefix reserved for pages rendered by the shell itself.
pub const INTERNAL_SCHEME: &str = "nemalo://";

/// A statically rendered view addressed by a reserved token instead of a URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InternalPage {
    Home,
    Settings,
}

impl InternalPage {
    pub const HOME_URL: &'static str = "nemalo://home";
    pub const SETTINGS_URL: &'static str = "nemalo://settings";

    /// Recognizes an internal-page token. Only exact matches count; any other
    /// value, including unknown `nemalo://` paths, is an external URL.
    pub fn from_url(url: &str) -> Option<Self> {
        match url {
            Self::HOME_URL => Some(Self::Home),
            Self::SETTINGS_URL => Some(Self::Settings),
            _ => None,
        }
    }

    pub fn url(&self) -> &'static str {
        match self {
            Self::Home => Self::HOME_URL,
            Self::Settings => Self::SETTINGS_URL,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Home => "New Tab",
            Self::Settings => "Settings",
        }
    }
}

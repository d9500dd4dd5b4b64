use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Title shown for a tab until its rendering surface reports one.
pub const PLACEHOLDER_TITLE: &str = "New Tab";

/// Opaque, process-unique handle for a tab.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabId(String);

impl TabId {
    /// Generates a fresh id. Ids are v4 UUIDs and are never reused.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TabId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for TabId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Represents a browser tab with its current state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tab {
    pub id: TabId,
    pub url: String,
    pub title: String,
    pub favicon: Option<String>,
}

impl Tab {
    pub fn new(url: &str) -> Self {
        Self {
            id: TabId::generate(),
            url: url.to_string(),
            title: PLACEHOLDER_TITLE.to_string(),
            favicon: None,
        }
    }
}

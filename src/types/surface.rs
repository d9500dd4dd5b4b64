use super::page::InternalPage;
use super::tab::TabId;

/// Fire-and-forget command for the rendering surface bound to a tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceCommand {
    Navigate(String),
    GoBack,
    GoForward,
    Reload,
    OpenDevTools,
}

/// Identifies one binding of a surface to a tab. A tab that leaves an internal
/// page gets a new surface with a higher generation than the released one.
pub type SurfaceGeneration = u64;

/// Change reported by a rendering surface, tagged with the tab and the
/// surface generation it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceEvent {
    pub tab_id: TabId,
    pub generation: SurfaceGeneration,
    pub kind: SurfaceEventKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceEventKind {
    TitleChanged(String),
    /// Candidate icon URLs in document order.
    FaviconChanged(Vec<String>),
    /// Navigation committed, in-page navigation, or redirect.
    UrlChanged(String),
}

impl SurfaceEvent {
    pub fn new(tab_id: TabId, generation: SurfaceGeneration, kind: SurfaceEventKind) -> Self {
        Self {
            tab_id,
            generation,
            kind,
        }
    }
}

/// Context-menu entries offered inside a rendering surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContextCommand {
    Reload,
    Inspect,
}

/// What the content area should display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveView<'a> {
    Surface(&'a TabId),
    Internal(InternalPage),
}

use crate::types::errors::TabError;
use crate::types::tab::{Tab, TabId};

/// Trait defining the tab management interface.
pub trait TabManagerTrait {
    fn create_tab(&mut self, url: &str) -> TabId;
    fn close_tab(&mut self, tab_id: &TabId) -> Result<Tab, TabError>;
    fn switch_tab(&mut self, tab_id: &TabId) -> Result<(), TabError>;
    fn get_tab(&self, tab_id: &TabId) -> Option<&Tab>;
    fn get_all_tabs(&self) -> &[Tab];
    fn get_active_tab(&self) -> &Tab;
    fn active_tab_id(&self) -> &TabId;
    fn tab_count(&self) -> usize;
    fn update_tab_url(&mut self, tab_id: &TabId, url: &str) -> Result<(), TabError>;
    fn update_tab_title(&mut self, tab_id: &TabId, title: &str) -> Result<(), TabError>;
    fn update_tab_favicon(&mut self, tab_id: &TabId, favicon: Option<String>) -> Result<(), TabError>;
}

/// In-memory, ordered tab list with an active pointer.
///
/// The list is seeded with one tab on construction and can never become
/// empty, so the active id always refers to an existing entry.
pub struct TabManager {
    tabs: Vec<Tab>,
    active_tab_id: TabId,
}

impl TabManager {
    /// Creates a manager holding a single active tab at `initial_url`.
    pub fn new(initial_url: &str) -> Self {
        let first = Tab::new(initial_url);
        Self {
            active_tab_id: first.id.clone(),
            tabs: vec![first],
        }
    }

    fn find_tab_index(&self, tab_id: &TabId) -> Option<usize> {
        self.tabs.iter().position(|t| t.id == *tab_id)
    }

    fn tab_mut(&mut self, tab_id: &TabId) -> Result<&mut Tab, TabError> {
        self.tabs
            .iter_mut()
            .find(|t| t.id == *tab_id)
            .ok_or_else(|| TabError::NotFound(tab_id.to_string()))
    }

    pub fn contains(&self, tab_id: &TabId) -> bool {
        self.find_tab_index(tab_id).is_some()
    }

    pub fn is_active(&self, tab_id: &TabId) -> bool {
        self.active_tab_id == *tab_id
    }
}

impl TabManagerTrait for TabManager {
    /// Appends a tab at `url` and makes it active. Returns the new tab's ID.
    fn create_tab(&mut self, url: &str) -> TabId {
        let tab = Tab::new(url);
        let id = tab.id.clone();
        self.tabs.push(tab);
        self.active_tab_id = id.clone();
        id
    }

    /// Removes a tab and returns it.
    ///
    /// The last remaining tab is never removed. When the active tab closes,
    /// the tab immediately before it becomes active, or the first tab if it
    /// had no predecessor.
    fn close_tab(&mut self, tab_id: &TabId) -> Result<Tab, TabError> {
        let idx = self
            .find_tab_index(tab_id)
            .ok_or_else(|| TabError::NotFound(tab_id.to_string()))?;

        if self.tabs.len() == 1 {
            return Err(TabError::LastTab(tab_id.to_string()));
        }

        let closed = self.tabs.remove(idx);

        if self.active_tab_id == closed.id {
            let new_idx = idx.saturating_sub(1);
            self.active_tab_id = self.tabs[new_idx].id.clone();
        }

        Ok(closed)
    }

    fn switch_tab(&mut self, tab_id: &TabId) -> Result<(), TabError> {
        if !self.contains(tab_id) {
            return Err(TabError::NotFound(tab_id.to_string()));
        }
        self.active_tab_id = tab_id.clone();
        Ok(())
    }

    fn get_tab(&self, tab_id: &TabId) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.id == *tab_id)
    }

    fn get_all_tabs(&self) -> &[Tab] {
        &self.tabs
    }

    fn get_active_tab(&self) -> &Tab {
        // The active id is kept in sync with the list by every mutation.
        self.get_tab(&self.active_tab_id)
            .unwrap_or(&self.tabs[0])
    }

    fn active_tab_id(&self) -> &TabId {
        &self.active_tab_id
    }

    fn tab_count(&self) -> usize {
        self.tabs.len()
    }

    fn update_tab_url(&mut self, tab_id: &TabId, url: &str) -> Result<(), TabError> {
        self.tab_mut(tab_id)?.url = url.to_string();
        Ok(())
    }

    fn update_tab_title(&mut self, tab_id: &TabId, title: &str) -> Result<(), TabError> {
        self.tab_mut(tab_id)?.title = title.to_string();
        Ok(())
    }

    fn update_tab_favicon(&mut self, tab_id: &TabId, favicon: Option<String>) -> Result<(), TabError> {
        self.tab_mut(tab_id)?.favicon = favicon;
        Ok(())
    }
}

//! Tab/navigation controller: the single owner of browsing state.
//!
//! Every mutation runs on the UI thread. Rendering surfaces report changes as
//! [`SurfaceEvent`]s tagged with their tab id and surface generation; events
//! for tabs that are gone, or from a surface other than the tab's current one,
//! are dropped.

use log::{debug, info, warn};
use serde::Serialize;

use crate::managers::surface_registry::{SurfaceHost, SurfaceRegistry};
use crate::managers::tab_manager::{TabManager, TabManagerTrait};
use crate::services::search_resolver;
use crate::types::errors::TabError;
use crate::types::page::InternalPage;
use crate::types::settings::BrowserSettings;
use crate::types::surface::{
    ActiveView, ContextCommand, SurfaceCommand, SurfaceEvent, SurfaceEventKind, SurfaceGeneration,
};
use crate::types::tab::{Tab, TabId};

/// Serializable view of the controller state, pushed to the chrome view.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ShellSnapshot {
    pub tabs: Vec<Tab>,
    pub active_id: TabId,
    pub address_bar: String,
    pub internal_page: Option<InternalPage>,
}

pub struct NavigationController<H: SurfaceHost> {
    tabs: TabManager,
    surfaces: SurfaceRegistry,
    host: H,
    settings: BrowserSettings,
    address_bar: String,
}

impl<H: SurfaceHost> NavigationController<H> {
    /// Creates the controller with one tab open at the configured start page.
    pub fn new(host: H, settings: BrowserSettings) -> Self {
        let tabs = TabManager::new(&settings.start_page);
        let mut controller = Self {
            tabs,
            surfaces: SurfaceRegistry::new(),
            host,
            settings,
            address_bar: String::new(),
        };

        let first = controller.tabs.get_active_tab().clone();
        controller.materialize(&first.id, &first.url);
        controller.address_bar = first.url;
        controller.refresh_view();
        controller
    }

    pub fn tabs(&self) -> &TabManager {
        &self.tabs
    }

    pub fn active_tab_id(&self) -> &TabId {
        self.tabs.active_tab_id()
    }

    pub fn address_bar_text(&self) -> &str {
        &self.address_bar
    }

    pub fn settings(&self) -> &BrowserSettings {
        &self.settings
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn has_surface(&self, tab_id: &TabId) -> bool {
        self.surfaces.is_bound(tab_id)
    }

    pub fn surface_count(&self) -> usize {
        self.surfaces.bound_count()
    }

    /// Generation of the surface currently bound to the tab.
    pub fn surface_generation(&self, tab_id: &TabId) -> Option<SurfaceGeneration> {
        self.surfaces.generation(tab_id)
    }

    /// True when `generation` is the live surface of an open tab.
    pub fn is_current_surface(&self, tab_id: &TabId, generation: SurfaceGeneration) -> bool {
        self.tabs.contains(tab_id) && self.surfaces.is_current(tab_id, generation)
    }

    /// Internal page shown by the active tab, if it is on one.
    pub fn active_internal_page(&self) -> Option<InternalPage> {
        InternalPage::from_url(&self.tabs.get_active_tab().url)
    }

    pub fn snapshot(&self) -> ShellSnapshot {
        ShellSnapshot {
            tabs: self.tabs.get_all_tabs().to_vec(),
            active_id: self.tabs.active_tab_id().clone(),
            address_bar: self.address_bar.clone(),
            internal_page: self.active_internal_page(),
        }
    }

    /// Replaces the settings used for new tabs and search resolution.
    pub fn apply_settings(&mut self, settings: BrowserSettings) {
        self.settings = settings;
    }

    /// Opens a tab at `initial_url`, or the start page, and makes it active.
    pub fn create_tab(&mut self, initial_url: Option<&str>) -> TabId {
        let url = initial_url
            .map(str::to_string)
            .unwrap_or_else(|| self.settings.start_page.clone());
        let id = self.tabs.create_tab(&url);
        info!("opened tab {} at {}", id, url);

        self.materialize(&id, &url);
        self.address_bar = url;
        self.refresh_view();
        id
    }

    /// Closes a tab. The last remaining tab is never closed.
    pub fn close_tab(&mut self, tab_id: &TabId) -> Result<(), TabError> {
        let was_active = self.tabs.is_active(tab_id);
        let closed = self.tabs.close_tab(tab_id).map_err(|e| {
            warn!("close rejected: {}", e);
            e
        })?;
        self.surfaces.release(&mut self.host, &closed.id);
        info!("closed tab {}", closed.id);

        if was_active {
            self.address_bar = self.tabs.get_active_tab().url.clone();
            self.refresh_view();
        }
        Ok(())
    }

    /// Makes `tab_id` active and resets the address bar to its URL.
    pub fn set_active_tab(&mut self, tab_id: &TabId) -> Result<(), TabError> {
        self.tabs.switch_tab(tab_id).map_err(|e| {
            debug!("switch ignored: {}", e);
            e
        })?;
        self.address_bar = self.tabs.get_active_tab().url.clone();
        self.refresh_view();
        Ok(())
    }

    /// Points a tab at `url`: an internal page, or a load in its surface.
    pub fn navigate(&mut self, url: &str, tab_id: &TabId) -> Result<(), TabError> {
        self.tabs.update_tab_url(tab_id, url).map_err(|e| {
            debug!("navigate ignored: {}", e);
            e
        })?;
        debug!("tab {} -> {}", tab_id, url);

        self.materialize(tab_id, url);
        if self.tabs.is_active(tab_id) {
            self.address_bar = url.to_string();
            self.refresh_view();
        }
        Ok(())
    }

    /// Navigates `tab_id` to the address-bar text, searching when it is not a URL.
    /// Blank input is ignored.
    pub fn submit_address_bar(&mut self, text: &str, tab_id: &TabId) -> Result<(), TabError> {
        let input = text.trim();
        if input.is_empty() {
            return Ok(());
        }
        let url = search_resolver::resolve(input, &self.settings);
        self.navigate(&url, tab_id)
    }

    /// Records in-progress typing without touching the stored tab URL.
    pub fn set_address_bar_text(&mut self, text: &str) {
        self.address_bar = text.to_string();
    }

    pub fn go_back(&mut self) -> bool {
        self.command_active(SurfaceCommand::GoBack)
    }

    pub fn go_forward(&mut self) -> bool {
        self.command_active(SurfaceCommand::GoForward)
    }

    pub fn reload(&mut self) -> bool {
        self.command_active(SurfaceCommand::Reload)
    }

    pub fn open_devtools(&mut self) -> bool {
        self.command_active(SurfaceCommand::OpenDevTools)
    }

    pub fn handle_context_command(&mut self, command: ContextCommand) -> bool {
        match command {
            ContextCommand::Reload => self.reload(),
            ContextCommand::Inspect => self.open_devtools(),
        }
    }

    /// Applies a change reported by a rendering surface.
    ///
    /// Returns false when the event was dropped: unknown or closed tab, a
    /// surface that is no longer the tab's current one, or an event carrying
    /// nothing usable.
    pub fn handle_surface_event(&mut self, event: SurfaceEvent) -> bool {
        let SurfaceEvent {
            tab_id,
            generation,
            kind,
        } = event;
        if !self.is_current_surface(&tab_id, generation) {
            debug!("dropping stale event for tab {} (surface {})", tab_id, generation);
            return false;
        }

        match kind {
            SurfaceEventKind::TitleChanged(title) => {
                if title.trim().is_empty() {
                    return false;
                }
                self.tabs.update_tab_title(&tab_id, &title).is_ok()
            }
            SurfaceEventKind::FaviconChanged(icons) => {
                match icons.into_iter().find(|icon| !icon.is_empty()) {
                    Some(icon) => self.tabs.update_tab_favicon(&tab_id, Some(icon)).is_ok(),
                    None => false,
                }
            }
            SurfaceEventKind::UrlChanged(url) => {
                if InternalPage::from_url(&url).is_some() {
                    return self.navigate(&url, &tab_id).is_ok();
                }
                if self.tabs.update_tab_url(&tab_id, &url).is_err() {
                    return false;
                }
                if self.tabs.is_active(&tab_id) {
                    self.address_bar = url;
                }
                true
            }
        }
    }

    fn command_active(&mut self, command: SurfaceCommand) -> bool {
        let active = self.tabs.active_tab_id().clone();
        self.surfaces.send(&mut self.host, &active, command)
    }

    /// Binds or releases the tab's surface to match `url`.
    fn materialize(&mut self, tab_id: &TabId, url: &str) {
        match InternalPage::from_url(url) {
            Some(page) => {
                self.surfaces.release(&mut self.host, tab_id);
                let _ = self.tabs.update_tab_title(tab_id, page.title());
                let _ = self.tabs.update_tab_favicon(tab_id, None);
            }
            None => self.surfaces.load(&mut self.host, tab_id, url),
        }
    }

    fn refresh_view(&mut self) {
        let active = self.tabs.get_active_tab();
        match InternalPage::from_url(&active.url) {
            Some(page) => self.host.show(ActiveView::Internal(page)),
            None => {
                let id = active.id.clone();
                self.host.show(ActiveView::Surface(&id));
            }
        }
    }
}

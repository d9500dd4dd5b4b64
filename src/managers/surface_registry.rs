//! Bookkeeping for the rendering surfaces bound to tabs.
//!
//! The host owns the actual page views; the registry only records which tabs
//! currently have one, and under which generation, so that a surface is
//! created once per binding, released exactly once, and late events from a
//! released surface can be told apart from the current one.

use std::collections::HashMap;

use log::{debug, warn};

use crate::types::errors::SurfaceError;
use crate::types::surface::{ActiveView, SurfaceCommand, SurfaceGeneration};
use crate::types::tab::TabId;

/// The embedded-browser runtime as seen by the navigation controller.
///
/// Commands are fire-and-forget and implementations log their own failures.
/// Only creation reports an error, so a failed view is never treated as bound.
pub trait SurfaceHost {
    /// Creates a page view for `tab_id` and starts loading `url`. Every event
    /// the view reports must carry `generation`.
    fn create_surface(
        &mut self,
        tab_id: &TabId,
        generation: SurfaceGeneration,
        url: &str,
    ) -> Result<(), SurfaceError>;
    /// Destroys the page view bound to `tab_id`.
    fn release_surface(&mut self, tab_id: &TabId);
    /// Forwards a command to the page view bound to `tab_id`.
    fn send(&mut self, tab_id: &TabId, command: SurfaceCommand);
    /// Brings the given view to the front of the content area.
    fn show(&mut self, view: ActiveView<'_>);
}

#[derive(Debug, Default)]
pub struct SurfaceRegistry {
    bound: HashMap<TabId, SurfaceGeneration>,
    last_generation: SurfaceGeneration,
}

impl SurfaceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_bound(&self, tab_id: &TabId) -> bool {
        self.bound.contains_key(tab_id)
    }

    /// Generation of the tab's current surface, if it has one.
    pub fn generation(&self, tab_id: &TabId) -> Option<SurfaceGeneration> {
        self.bound.get(tab_id).copied()
    }

    /// True when `generation` names the surface currently bound to the tab.
    pub fn is_current(&self, tab_id: &TabId, generation: SurfaceGeneration) -> bool {
        self.generation(tab_id) == Some(generation)
    }

    pub fn bound_count(&self) -> usize {
        self.bound.len()
    }

    /// Loads `url` into the tab's surface, creating the surface on first use.
    ///
    /// A failed creation leaves the tab unbound so the next load retries.
    pub fn load<H: SurfaceHost>(&mut self, host: &mut H, tab_id: &TabId, url: &str) {
        if self.bound.contains_key(tab_id) {
            host.send(tab_id, SurfaceCommand::Navigate(url.to_string()));
            return;
        }

        self.last_generation += 1;
        let generation = self.last_generation;
        match host.create_surface(tab_id, generation, url) {
            Ok(()) => {
                debug!("bound surface {} to tab {}", generation, tab_id);
                self.bound.insert(tab_id.clone(), generation);
            }
            Err(e) => warn!("tab {} left without a surface: {}", tab_id, e),
        }
    }

    /// Sends a command if the tab has a surface. Returns whether it was sent.
    pub fn send<H: SurfaceHost>(&self, host: &mut H, tab_id: &TabId, command: SurfaceCommand) -> bool {
        if !self.bound.contains_key(tab_id) {
            return false;
        }
        host.send(tab_id, command);
        true
    }

    /// Releases the tab's surface if it has one.
    pub fn release<H: SurfaceHost>(&mut self, host: &mut H, tab_id: &TabId) {
        if let Some(generation) = self.bound.remove(tab_id) {
            debug!("releasing surface {} of tab {}", generation, tab_id);
            host.release_surface(tab_id);
        }
    }
}

//! Tests for the navigation controller against a host that records calls.

use nemalo::managers::navigation_controller::NavigationController;
use nemalo::managers::surface_registry::SurfaceHost;
use nemalo::managers::tab_manager::TabManagerTrait;
use nemalo::types::errors::{SurfaceError, TabError};
use nemalo::types::page::InternalPage;
use nemalo::types::settings::{BrowserSettings, SearchEngine};
use nemalo::types::surface::{
    ActiveView, ContextCommand, SurfaceCommand, SurfaceEvent, SurfaceEventKind, SurfaceGeneration,
};
use nemalo::types::tab::TabId;

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Create(TabId, String),
    Release(TabId),
    Send(TabId, SurfaceCommand),
    ShowSurface(TabId),
    ShowInternal(InternalPage),
}

#[derive(Default)]
struct RecordingHost {
    calls: Vec<Call>,
    /// Number of upcoming creations that fail.
    failing_creates: usize,
}

impl RecordingHost {
    fn take(&mut self) -> Vec<Call> {
        std::mem::take(&mut self.calls)
    }
}

impl SurfaceHost for RecordingHost {
    fn create_surface(
        &mut self,
        tab_id: &TabId,
        _generation: SurfaceGeneration,
        url: &str,
    ) -> Result<(), SurfaceError> {
        self.calls.push(Call::Create(tab_id.clone(), url.to_string()));
        if self.failing_creates > 0 {
            self.failing_creates -= 1;
            return Err(SurfaceError::CreateFailed("no native view".into()));
        }
        Ok(())
    }

    fn release_surface(&mut self, tab_id: &TabId) {
        self.calls.push(Call::Release(tab_id.clone()));
    }

    fn send(&mut self, tab_id: &TabId, command: SurfaceCommand) {
        self.calls.push(Call::Send(tab_id.clone(), command));
    }

    fn show(&mut self, view: ActiveView<'_>) {
        self.calls.push(match view {
            ActiveView::Surface(id) => Call::ShowSurface(id.clone()),
            ActiveView::Internal(page) => Call::ShowInternal(page),
        });
    }
}

fn controller() -> NavigationController<RecordingHost> {
    let mut c = NavigationController::new(RecordingHost::default(), BrowserSettings::default());
    c.host_mut().take();
    c
}

/// An event from the tab's current surface.
fn event(c: &NavigationController<RecordingHost>, tab_id: &TabId, kind: SurfaceEventKind) -> SurfaceEvent {
    let generation = c.surface_generation(tab_id).unwrap_or_default();
    SurfaceEvent::new(tab_id.clone(), generation, kind)
}

// === Startup ===

#[test]
fn test_starts_with_home_tab_and_no_surface() {
    let mut c = NavigationController::new(RecordingHost::default(), BrowserSettings::default());
    let first = c.active_tab_id().clone();

    assert_eq!(c.tabs().tab_count(), 1);
    assert_eq!(c.tabs().get_active_tab().url, "nemalo://home");
    assert_eq!(c.tabs().get_active_tab().title, "New Tab");
    assert_eq!(c.address_bar_text(), "nemalo://home");
    assert_eq!(c.active_internal_page(), Some(InternalPage::Home));
    assert!(!c.has_surface(&first));
    assert_eq!(c.host_mut().take(), vec![Call::ShowInternal(InternalPage::Home)]);
}

#[test]
fn test_external_start_page_creates_surface() {
    let settings = BrowserSettings {
        start_page: "https://start.example".to_string(),
        ..BrowserSettings::default()
    };
    let mut c = NavigationController::new(RecordingHost::default(), settings);
    let first = c.active_tab_id().clone();

    assert!(c.has_surface(&first));
    assert_eq!(
        c.host_mut().take(),
        vec![
            Call::Create(first.clone(), "https://start.example".to_string()),
            Call::ShowSurface(first),
        ]
    );
}

// === Tabs ===

#[test]
fn test_create_tab_defaults_to_start_page() {
    let mut c = controller();
    let id = c.create_tab(None);

    assert_eq!(c.active_tab_id(), &id);
    assert_eq!(c.tabs().get_tab(&id).unwrap().url, "nemalo://home");
    assert_eq!(c.address_bar_text(), "nemalo://home");
    assert!(!c.has_surface(&id));
}

#[test]
fn test_create_tab_with_url_binds_surface() {
    let mut c = controller();
    let id = c.create_tab(Some("https://example.com"));

    assert!(c.has_surface(&id));
    assert_eq!(c.address_bar_text(), "https://example.com");
    assert_eq!(
        c.host_mut().take(),
        vec![
            Call::Create(id.clone(), "https://example.com".to_string()),
            Call::ShowSurface(id),
        ]
    );
}

#[test]
fn test_close_active_tab_activates_predecessor_and_releases_once() {
    let mut c = controller();
    let first = c.active_tab_id().clone();
    let second = c.create_tab(Some("https://a.example"));
    let third = c.create_tab(Some("https://b.example"));
    c.set_active_tab(&second).unwrap();
    c.host_mut().take();

    c.close_tab(&second).unwrap();

    assert_eq!(c.active_tab_id(), &first);
    assert_eq!(c.address_bar_text(), "nemalo://home");
    assert!(!c.has_surface(&second));
    assert!(c.has_surface(&third));
    assert_eq!(
        c.host_mut().take(),
        vec![Call::Release(second), Call::ShowInternal(InternalPage::Home)]
    );
}

#[test]
fn test_close_inactive_tab_keeps_view() {
    let mut c = controller();
    let first = c.active_tab_id().clone();
    let second = c.create_tab(Some("https://a.example"));
    c.host_mut().take();

    c.close_tab(&first).unwrap();

    assert_eq!(c.active_tab_id(), &second);
    assert_eq!(c.address_bar_text(), "https://a.example");
    assert!(c.host_mut().take().is_empty());
}

#[test]
fn test_close_last_tab_is_rejected_without_side_effects() {
    let mut c = controller();
    let only = c.active_tab_id().clone();

    assert_eq!(c.close_tab(&only), Err(TabError::LastTab(only.to_string())));
    assert_eq!(c.tabs().tab_count(), 1);
    assert!(c.host_mut().take().is_empty());
}

#[test]
fn test_close_unknown_tab_is_not_found() {
    let mut c = controller();
    c.create_tab(None);
    assert!(matches!(
        c.close_tab(&TabId::from("ghost")),
        Err(TabError::NotFound(_))
    ));
    assert_eq!(c.tabs().tab_count(), 2);
}

#[test]
fn test_switch_tab_resets_address_bar_and_view() {
    let mut c = controller();
    let first = c.active_tab_id().clone();
    let second = c.create_tab(Some("https://a.example"));
    c.set_address_bar_text("half typed");
    c.host_mut().take();

    c.set_active_tab(&first).unwrap();
    assert_eq!(c.address_bar_text(), "nemalo://home");
    assert_eq!(c.host_mut().take(), vec![Call::ShowInternal(InternalPage::Home)]);

    c.set_active_tab(&second).unwrap();
    assert_eq!(c.address_bar_text(), "https://a.example");
    assert_eq!(c.host_mut().take(), vec![Call::ShowSurface(second)]);
}

#[test]
fn test_switch_to_unknown_tab_is_ignored() {
    let mut c = controller();
    let active = c.active_tab_id().clone();
    assert!(c.set_active_tab(&TabId::from("ghost")).is_err());
    assert_eq!(c.active_tab_id(), &active);
}

// === Navigation ===

#[test]
fn test_navigate_reuses_bound_surface() {
    let mut c = controller();
    let id = c.create_tab(Some("https://a.example"));
    c.host_mut().take();

    c.navigate("https://b.example", &id).unwrap();

    assert_eq!(c.tabs().get_tab(&id).unwrap().url, "https://b.example");
    assert_eq!(c.address_bar_text(), "https://b.example");
    assert_eq!(
        c.host_mut().take(),
        vec![
            Call::Send(id.clone(), SurfaceCommand::Navigate("https://b.example".to_string())),
            Call::ShowSurface(id),
        ]
    );
}

#[test]
fn test_navigate_to_internal_page_releases_surface() {
    let mut c = controller();
    let id = c.create_tab(Some("https://a.example"));
    c.handle_surface_event(event(&c, &id, SurfaceEventKind::TitleChanged("A".into())));
    c.handle_surface_event(event(&c, &id, SurfaceEventKind::FaviconChanged(vec!["https://a.example/f.ico".into()])));
    c.host_mut().take();

    c.navigate("nemalo://settings", &id).unwrap();

    let tab = c.tabs().get_tab(&id).unwrap();
    assert_eq!(tab.title, "Settings");
    assert_eq!(tab.favicon, None);
    assert!(!c.has_surface(&id));
    assert_eq!(c.active_internal_page(), Some(InternalPage::Settings));
    assert_eq!(
        c.host_mut().take(),
        vec![Call::Release(id), Call::ShowInternal(InternalPage::Settings)]
    );
}

#[test]
fn test_leaving_internal_page_creates_fresh_surface() {
    let mut c = controller();
    let id = c.active_tab_id().clone();

    c.navigate("https://a.example", &id).unwrap();
    c.navigate("nemalo://home", &id).unwrap();
    c.navigate("https://b.example", &id).unwrap();

    let creates: Vec<_> = c
        .host_mut()
        .take()
        .into_iter()
        .filter(|call| matches!(call, Call::Create(..)))
        .collect();
    assert_eq!(
        creates,
        vec![
            Call::Create(id.clone(), "https://a.example".to_string()),
            Call::Create(id, "https://b.example".to_string()),
        ]
    );
}

#[test]
fn test_navigate_inactive_tab_leaves_address_bar() {
    let mut c = controller();
    let first = c.active_tab_id().clone();
    c.create_tab(Some("https://a.example"));
    c.host_mut().take();

    c.navigate("https://b.example", &first).unwrap();

    assert_eq!(c.address_bar_text(), "https://a.example");
    assert_eq!(
        c.host_mut().take(),
        vec![Call::Create(first, "https://b.example".to_string())]
    );
}

#[test]
fn test_navigate_unknown_tab_fails() {
    let mut c = controller();
    assert!(c.navigate("https://a.example", &TabId::from("ghost")).is_err());
    assert!(c.host_mut().take().is_empty());
}

#[test]
fn test_submit_address_bar_resolves_searches() {
    let mut c = controller();
    let id = c.active_tab_id().clone();

    c.submit_address_bar("  rust book  ", &id).unwrap();
    assert_eq!(
        c.tabs().get_tab(&id).unwrap().url,
        "https://www.google.com/search?q=rust%20book"
    );

    c.submit_address_bar("nemalo://settings", &id).unwrap();
    assert_eq!(c.active_internal_page(), Some(InternalPage::Settings));
}

#[test]
fn test_submit_blank_address_is_ignored() {
    let mut c = controller();
    let id = c.active_tab_id().clone();
    c.submit_address_bar("   ", &id).unwrap();
    assert_eq!(c.tabs().get_tab(&id).unwrap().url, "nemalo://home");
    assert!(c.host_mut().take().is_empty());
}

#[test]
fn test_apply_settings_changes_search_and_new_tabs() {
    let mut c = controller();
    c.apply_settings(BrowserSettings {
        start_page: "https://start.example".to_string(),
        search_engine: SearchEngine::DuckDuckGo,
        ..BrowserSettings::default()
    });

    let id = c.create_tab(None);
    assert_eq!(c.tabs().get_tab(&id).unwrap().url, "https://start.example");

    c.submit_address_bar("ferris", &id).unwrap();
    assert_eq!(
        c.tabs().get_tab(&id).unwrap().url,
        "https://duckduckgo.com/?q=ferris"
    );
}

// === Surface commands ===

#[test]
fn test_history_commands_go_to_active_surface() {
    let mut c = controller();
    let id = c.create_tab(Some("https://a.example"));
    c.host_mut().take();

    assert!(c.go_back());
    assert!(c.go_forward());
    assert!(c.reload());
    assert!(c.open_devtools());
    assert_eq!(
        c.host_mut().take(),
        vec![
            Call::Send(id.clone(), SurfaceCommand::GoBack),
            Call::Send(id.clone(), SurfaceCommand::GoForward),
            Call::Send(id.clone(), SurfaceCommand::Reload),
            Call::Send(id, SurfaceCommand::OpenDevTools),
        ]
    );
}

#[test]
fn test_commands_on_internal_page_are_noops() {
    let mut c = controller();
    assert!(!c.go_back());
    assert!(!c.go_forward());
    assert!(!c.reload());
    assert!(!c.handle_context_command(ContextCommand::Inspect));
    assert!(c.host_mut().take().is_empty());
}

#[test]
fn test_context_commands_map_to_reload_and_devtools() {
    let mut c = controller();
    let id = c.create_tab(Some("https://a.example"));
    c.host_mut().take();

    c.handle_context_command(ContextCommand::Reload);
    c.handle_context_command(ContextCommand::Inspect);
    assert_eq!(
        c.host_mut().take(),
        vec![
            Call::Send(id.clone(), SurfaceCommand::Reload),
            Call::Send(id, SurfaceCommand::OpenDevTools),
        ]
    );
}

// === Surface events ===

#[test]
fn test_title_event_updates_owning_tab_only() {
    let mut c = controller();
    let a = c.create_tab(Some("https://a.example"));
    let b = c.create_tab(Some("https://b.example"));

    assert!(c.handle_surface_event(event(&c, &a, SurfaceEventKind::TitleChanged("Alpha".into()))));
    assert_eq!(c.tabs().get_tab(&a).unwrap().title, "Alpha");
    assert_eq!(c.tabs().get_tab(&b).unwrap().title, "New Tab");
}

#[test]
fn test_empty_title_is_ignored() {
    let mut c = controller();
    let a = c.create_tab(Some("https://a.example"));
    c.handle_surface_event(event(&c, &a, SurfaceEventKind::TitleChanged("Alpha".into())));

    assert!(!c.handle_surface_event(event(&c, &a, SurfaceEventKind::TitleChanged("  ".into()))));
    assert_eq!(c.tabs().get_tab(&a).unwrap().title, "Alpha");
}

#[test]
fn test_favicon_takes_first_non_empty_candidate() {
    let mut c = controller();
    let a = c.create_tab(Some("https://a.example"));

    assert!(c.handle_surface_event(event(
        &c,
        &a,
        SurfaceEventKind::FaviconChanged(vec!["".into(), "https://a.example/1.png".into(), "https://a.example/2.png".into()]),
    )));
    assert_eq!(
        c.tabs().get_tab(&a).unwrap().favicon.as_deref(),
        Some("https://a.example/1.png")
    );

    assert!(!c.handle_surface_event(event(&c, &a, SurfaceEventKind::FaviconChanged(vec![]))));
    assert_eq!(
        c.tabs().get_tab(&a).unwrap().favicon.as_deref(),
        Some("https://a.example/1.png")
    );
}

#[test]
fn test_url_event_updates_address_bar_for_active_tab() {
    let mut c = controller();
    let a = c.create_tab(Some("https://a.example"));
    let b = c.create_tab(Some("https://b.example"));
    c.host_mut().take();

    assert!(c.handle_surface_event(event(&c, &b, SurfaceEventKind::UrlChanged("https://b.example/#x".into()))));
    assert_eq!(c.address_bar_text(), "https://b.example/#x");

    assert!(c.handle_surface_event(event(&c, &a, SurfaceEventKind::UrlChanged("https://a.example/next".into()))));
    assert_eq!(c.tabs().get_tab(&a).unwrap().url, "https://a.example/next");
    assert_eq!(c.address_bar_text(), "https://b.example/#x");

    // Reports from the page itself never trigger a reload.
    assert!(c.host_mut().take().is_empty());
}

#[test]
fn test_events_after_close_are_dropped() {
    let mut c = controller();
    let a = c.create_tab(Some("https://a.example"));
    let title = event(&c, &a, SurfaceEventKind::TitleChanged("late".into()));
    let url = event(&c, &a, SurfaceEventKind::UrlChanged("https://late.example".into()));
    c.create_tab(Some("https://b.example"));
    c.close_tab(&a).unwrap();

    assert!(!c.handle_surface_event(title));
    assert!(!c.handle_surface_event(url));
    assert!(c.tabs().get_tab(&a).is_none());
}

#[test]
fn test_events_for_internal_tab_are_dropped() {
    let mut c = controller();
    let a = c.create_tab(Some("https://a.example"));
    let late = event(&c, &a, SurfaceEventKind::TitleChanged("late".into()));
    c.navigate("nemalo://home", &a).unwrap();

    assert!(!c.handle_surface_event(late));
    assert_eq!(c.tabs().get_tab(&a).unwrap().title, "New Tab");
}

#[test]
fn test_events_from_replaced_surface_are_dropped() {
    let mut c = controller();
    let a = c.create_tab(Some("https://a.example"));
    let old = c.surface_generation(&a).unwrap();
    let late_title = event(&c, &a, SurfaceEventKind::TitleChanged("A page title".into()));
    let late_url = event(&c, &a, SurfaceEventKind::UrlChanged("https://a.example/next".into()));

    c.navigate("nemalo://home", &a).unwrap();
    c.navigate("https://b.example", &a).unwrap();
    let current = c.surface_generation(&a).unwrap();
    assert_ne!(old, current);
    assert!(!c.is_current_surface(&a, old));

    assert!(!c.handle_surface_event(late_title));
    assert!(!c.handle_surface_event(late_url));
    let tab = c.tabs().get_tab(&a).unwrap();
    assert_eq!(tab.title, "New Tab");
    assert_eq!(tab.url, "https://b.example");
    assert_eq!(c.address_bar_text(), "https://b.example");

    assert!(c.handle_surface_event(event(&c, &a, SurfaceEventKind::TitleChanged("B".into()))));
    assert_eq!(c.tabs().get_tab(&a).unwrap().title, "B");
}

// === Surface creation failures ===

#[test]
fn test_failed_surface_creation_is_retried_on_next_navigate() {
    let mut c = controller();
    c.host_mut().failing_creates = 1;
    let a = c.create_tab(Some("https://a.example"));

    assert!(!c.has_surface(&a));
    assert_eq!(c.surface_count(), 0);
    assert!(!c.reload());

    c.host_mut().take();
    c.navigate("https://b.example", &a).unwrap();
    assert_eq!(
        c.host_mut().take(),
        vec![
            Call::Create(a.clone(), "https://b.example".to_string()),
            Call::ShowSurface(a.clone()),
        ]
    );
    assert!(c.has_surface(&a));
    assert_eq!(c.surface_count(), 1);

    c.navigate("https://c.example", &a).unwrap();
    assert_eq!(
        c.host_mut().take(),
        vec![
            Call::Send(a.clone(), SurfaceCommand::Navigate("https://c.example".to_string())),
            Call::ShowSurface(a),
        ]
    );
}

#[test]
fn test_events_from_failed_surface_are_dropped() {
    let mut c = controller();
    c.host_mut().failing_creates = 1;
    let a = c.create_tab(Some("https://a.example"));

    assert_eq!(c.surface_generation(&a), None);
    assert!(!c.handle_surface_event(event(&c, &a, SurfaceEventKind::TitleChanged("A".into()))));
}

#[test]
fn test_surface_count_tracks_bindings() {
    let mut c = controller();
    assert_eq!(c.surface_count(), 0);

    let a = c.create_tab(Some("https://a.example"));
    let b = c.create_tab(Some("https://b.example"));
    c.create_tab(None);
    assert_eq!(c.surface_count(), 2);

    c.navigate("nemalo://settings", &a).unwrap();
    assert_eq!(c.surface_count(), 1);

    c.close_tab(&b).unwrap();
    assert_eq!(c.surface_count(), 0);
}

#[test]
fn test_snapshot_reflects_state() {
    let mut c = controller();
    let a = c.create_tab(Some("https://a.example"));
    let snapshot = c.snapshot();

    assert_eq!(snapshot.tabs.len(), 2);
    assert_eq!(snapshot.active_id, a);
    assert_eq!(snapshot.address_bar, "https://a.example");
    assert_eq!(snapshot.internal_page, None);

    let json = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(json["activeId"], serde_json::json!(a.as_str()));
    assert_eq!(json["internalPage"], serde_json::Value::Null);
}

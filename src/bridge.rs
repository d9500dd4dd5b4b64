//! IPC bridge between the chrome view, the rendering surfaces and the app.
//!
//! The chrome view posts JSON messages tagged by `cmd`. Window operations go
//! to a [`WindowChrome`]; tab, navigation and settings messages go to the
//! controller and the settings store. Kept free of any GUI types so it can be
//! unit-tested with fakes.

use log::{debug, warn};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::app::App;
use crate::managers::surface_registry::SurfaceHost;
use crate::managers::tab_manager::TabManagerTrait;
use crate::services::settings_engine::SettingsEngineTrait;
use crate::services::theme_engine::ThemeEngineTrait;
use crate::types::errors::BridgeError;
use crate::types::page::InternalPage;
use crate::types::surface::{ContextCommand, SurfaceEvent, SurfaceEventKind, SurfaceGeneration};
use crate::types::tab::TabId;

/// The host window as seen by the chrome controls.
pub trait WindowChrome {
    fn minimize(&mut self);
    fn is_maximized(&self) -> bool;
    fn set_maximized(&mut self, maximized: bool);
    fn close(&mut self);
    /// Starts a native window move from the current pointer position.
    fn drag(&mut self);
}

/// Maximizes or restores depending on the current state.
pub fn toggle_maximize<W: WindowChrome>(chrome: &mut W) {
    let maximized = chrome.is_maximized();
    chrome.set_maximized(!maximized);
}

/// Messages posted by the chrome view.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum UiMessage {
    UiReady,
    Minimize,
    Maximize,
    Close,
    DragWindow,
    NewTab,
    CloseTab { id: TabId },
    SwitchTab { id: TabId },
    AddressInput { text: String },
    SubmitAddress { text: String },
    Navigate {
        url: String,
        #[serde(default)]
        tab_id: Option<TabId>,
    },
    Back,
    Forward,
    Reload,
    OpenDevtools,
    OpenSettings,
    GetSetting {
        key: String,
        #[serde(default)]
        request_id: Option<u64>,
    },
    SetSetting {
        key: String,
        value: Value,
        #[serde(default)]
        request_id: Option<u64>,
    },
    GetAllSettings {
        #[serde(default)]
        request_id: Option<u64>,
    },
    ResetSettings {
        #[serde(default)]
        request_id: Option<u64>,
    },
}

/// Messages posted by the script injected into rendering surfaces.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum SurfaceMessage {
    FaviconChanged { favicons: Vec<String> },
    UrlChanged { url: String },
    ContextMenu { command: ContextCommand },
}

/// What the host should send back to the chrome view.
#[derive(Debug, Clone, PartialEq)]
pub enum BridgeReply {
    /// Nothing visible changed.
    None,
    /// State changed; re-render the chrome.
    Render,
    /// Answer to a settings request; state may also have changed.
    Settings { request_id: Option<u64>, value: Value },
    /// A settings request was refused by the store.
    SettingsRejected { request_id: Option<u64>, message: String },
}

/// Decodes and applies one message from the chrome view.
pub fn handle_message<H: SurfaceHost, W: WindowChrome>(
    app: &mut App<H>,
    chrome: &mut W,
    raw: &str,
) -> Result<BridgeReply, BridgeError> {
    let msg: UiMessage =
        serde_json::from_str(raw).map_err(|e| BridgeError::Malformed(e.to_string()))?;
    debug!("ui message: {:?}", msg);
    Ok(dispatch(app, chrome, msg))
}

/// Applies an already decoded chrome message.
pub fn dispatch<H: SurfaceHost, W: WindowChrome>(
    app: &mut App<H>,
    chrome: &mut W,
    msg: UiMessage,
) -> BridgeReply {
    let active = app.controller.active_tab_id().clone();

    match msg {
        UiMessage::UiReady => BridgeReply::Render,

        // ─── Window ───
        UiMessage::Minimize => {
            chrome.minimize();
            BridgeReply::None
        }
        UiMessage::Maximize => {
            toggle_maximize(chrome);
            BridgeReply::None
        }
        UiMessage::Close => {
            chrome.close();
            BridgeReply::None
        }
        UiMessage::DragWindow => {
            chrome.drag();
            BridgeReply::None
        }

        // ─── Tabs ───
        UiMessage::NewTab => {
            app.controller.create_tab(None);
            BridgeReply::Render
        }
        UiMessage::CloseTab { id } => {
            let _ = app.controller.close_tab(&id);
            BridgeReply::Render
        }
        UiMessage::SwitchTab { id } => {
            let _ = app.controller.set_active_tab(&id);
            BridgeReply::Render
        }

        // ─── Navigation ───
        UiMessage::AddressInput { text } => {
            app.controller.set_address_bar_text(&text);
            BridgeReply::None
        }
        UiMessage::SubmitAddress { text } => {
            app.controller.set_address_bar_text(&text);
            let _ = app.controller.submit_address_bar(&text, &active);
            BridgeReply::Render
        }
        UiMessage::Navigate { url, tab_id } => {
            // Input from the home page search box goes through the same
            // URL-or-search classification as the address bar.
            let target = tab_id.unwrap_or(active);
            let _ = app.controller.submit_address_bar(&url, &target);
            BridgeReply::Render
        }
        UiMessage::Back => {
            app.controller.go_back();
            BridgeReply::None
        }
        UiMessage::Forward => {
            app.controller.go_forward();
            BridgeReply::None
        }
        UiMessage::Reload => {
            app.controller.reload();
            BridgeReply::None
        }
        UiMessage::OpenDevtools => {
            app.controller.open_devtools();
            BridgeReply::None
        }
        UiMessage::OpenSettings => {
            let _ = app.controller.navigate(InternalPage::SETTINGS_URL, &active);
            BridgeReply::Render
        }

        // ─── Settings ───
        UiMessage::GetSetting { key, request_id } => {
            settings_reply(request_id, app.settings_engine.get_value(&key).map_err(Into::into))
        }
        UiMessage::SetSetting { key, value, request_id } => {
            let result: Result<Value, BridgeError> = app
                .settings_engine
                .set_value(&key, value)
                .and_then(|_| app.settings_engine.get_all())
                .map_err(Into::into);
            if result.is_ok() {
                app.sync_settings();
            }
            settings_reply(request_id, result)
        }
        UiMessage::GetAllSettings { request_id } => {
            settings_reply(request_id, app.settings_engine.get_all().map_err(Into::into))
        }
        UiMessage::ResetSettings { request_id } => {
            let result: Result<Value, BridgeError> = app
                .settings_engine
                .reset()
                .and_then(|_| app.settings_engine.get_all())
                .map_err(Into::into);
            if result.is_ok() {
                app.sync_settings();
            }
            settings_reply(request_id, result)
        }
    }
}

fn settings_reply(request_id: Option<u64>, result: Result<Value, BridgeError>) -> BridgeReply {
    match result {
        Ok(value) => BridgeReply::Settings { request_id, value },
        Err(e) => {
            warn!("settings request failed: {}", e);
            BridgeReply::SettingsRejected {
                request_id,
                message: e.to_string(),
            }
        }
    }
}

/// Decodes and applies one message from surface `generation` of `tab_id`.
///
/// Returns whether the chrome needs to re-render. Messages from a surface
/// that has since been released are decoded but ignored.
pub fn handle_surface_message<H: SurfaceHost>(
    app: &mut App<H>,
    tab_id: &TabId,
    generation: SurfaceGeneration,
    raw: &str,
) -> Result<bool, BridgeError> {
    let msg: SurfaceMessage =
        serde_json::from_str(raw).map_err(|e| BridgeError::Malformed(e.to_string()))?;

    let event = |kind| SurfaceEvent::new(tab_id.clone(), generation, kind);
    let changed = match msg {
        SurfaceMessage::FaviconChanged { favicons } => app
            .controller
            .handle_surface_event(event(SurfaceEventKind::FaviconChanged(favicons))),
        SurfaceMessage::UrlChanged { url } => app
            .controller
            .handle_surface_event(event(SurfaceEventKind::UrlChanged(url))),
        SurfaceMessage::ContextMenu { command } => {
            // Menus only open in the visible surface; ignore late clicks from others.
            if app.controller.active_tab_id() == tab_id
                && app.controller.is_current_surface(tab_id, generation)
            {
                app.controller.handle_context_command(command);
            }
            false
        }
    };
    Ok(changed)
}

/// Everything the chrome view needs to draw itself.
pub fn shell_state<H: SurfaceHost>(app: &App<H>) -> Value {
    let settings = app.settings_engine.get_all().unwrap_or(Value::Null);
    json!({
        "shell": app.controller.snapshot(),
        "tabCount": app.controller.tabs().tab_count(),
        "settings": settings,
        "theme": app.theme_engine.get_css_variables(),
    })
}

//! WebView-based browser shell using `wry` + `tao`.
//!
//! Architecture:
//! - The chrome view (`shell.html`) covers the window. It draws the tab strip,
//!   the toolbar and the two internal pages, and posts JSON over `window.ipc`.
//! - Every web tab owns a child WebView placed below the toolbar. Only the
//!   active tab's view is visible; none is visible while an internal page is.
//! - `surface.js` is injected into every tab page. It reports favicons and
//!   in-page URL changes and draws the page context menu.
//! - All callbacks are forwarded through the event loop proxy, so app state is
//!   only touched from the event loop on the UI thread.

use std::collections::HashMap;
use std::rc::Rc;

use log::{debug, error, info, warn};
use serde_json::Value;
use tao::event::{Event, WindowEvent};
use tao::event_loop::{ControlFlow, EventLoop, EventLoopBuilder, EventLoopProxy};
use tao::window::{Theme, Window, WindowBuilder};
use wry::dpi::{LogicalPosition, LogicalSize};
use wry::{PageLoadEvent, Rect, WebView, WebViewBuilder};

use crate::app::App;
use crate::bridge::{self, BridgeReply, WindowChrome};
use crate::managers::surface_registry::SurfaceHost;
use crate::managers::tab_manager::TabManagerTrait;
use crate::services::theme_engine::ThemeEngineTrait;
use crate::types::errors::SurfaceError;
use crate::types::surface::{
    ActiveView, SurfaceCommand, SurfaceEvent, SurfaceEventKind, SurfaceGeneration,
};
use crate::types::tab::TabId;

const SHELL_HTML: &str = include_str!("../../resources/ui/shell.html");
const SURFACE_JS: &str = include_str!("../../resources/ui/surface.js");

/// Height of the tab strip plus toolbar, in logical pixels.
const CHROME_HEIGHT: f64 = 84.0;

#[derive(Debug)]
enum UserEvent {
    ChromeIpc(String),
    SurfaceIpc(TabId, SurfaceGeneration, String),
    Surface(SurfaceEvent),
    /// A page asked for a new window; it opens as a tab instead.
    OpenInNewTab(String),
}

// ─── Surface host ───

/// Owns one child WebView per web tab.
struct WryHost {
    window: Rc<Window>,
    proxy: EventLoopProxy<UserEvent>,
    views: HashMap<TabId, WebView>,
}

impl WryHost {
    fn new(window: Rc<Window>, proxy: EventLoopProxy<UserEvent>) -> Self {
        Self {
            window,
            proxy,
            views: HashMap::new(),
        }
    }

    /// The area below the toolbar, in logical pixels.
    fn content_bounds(&self) -> Rect {
        let scale = self.window.scale_factor();
        let size = self.window.inner_size();
        let width = size.width as f64 / scale;
        let height = (size.height as f64 / scale - CHROME_HEIGHT).max(0.0);
        Rect {
            position: LogicalPosition::new(0.0, CHROME_HEIGHT).into(),
            size: LogicalSize::new(width, height).into(),
        }
    }

    fn relayout(&self) {
        let bounds = self.content_bounds();
        for (id, view) in &self.views {
            if let Err(e) = view.set_bounds(bounds) {
                warn!("failed to resize surface of tab {}: {}", id, e);
            }
        }
    }

    fn emit(
        proxy: &EventLoopProxy<UserEvent>,
        tab_id: &TabId,
        generation: SurfaceGeneration,
        kind: SurfaceEventKind,
    ) {
        let event = SurfaceEvent::new(tab_id.clone(), generation, kind);
        let _ = proxy.send_event(UserEvent::Surface(event));
    }
}

impl SurfaceHost for WryHost {
    fn create_surface(
        &mut self,
        tab_id: &TabId,
        generation: SurfaceGeneration,
        url: &str,
    ) -> Result<(), SurfaceError> {
        let ipc_proxy = self.proxy.clone();
        let ipc_id = tab_id.clone();
        let title_proxy = self.proxy.clone();
        let title_id = tab_id.clone();
        let load_proxy = self.proxy.clone();
        let load_id = tab_id.clone();
        let nw_proxy = self.proxy.clone();

        let builder = WebViewBuilder::new()
            .with_url(url)
            .with_bounds(self.content_bounds())
            .with_visible(false)
            .with_initialization_script(SURFACE_JS)
            .with_ipc_handler(move |msg: wry::http::Request<String>| {
                let _ = ipc_proxy.send_event(UserEvent::SurfaceIpc(ipc_id.clone(), generation, msg.body().clone()));
            })
            .with_document_title_changed_handler(move |title| {
                Self::emit(&title_proxy, &title_id, generation, SurfaceEventKind::TitleChanged(title));
            })
            .with_on_page_load_handler(move |event, url| {
                // Started carries the target of a link click, Finished the final URL after redirects.
                if let PageLoadEvent::Started | PageLoadEvent::Finished = event {
                    Self::emit(&load_proxy, &load_id, generation, SurfaceEventKind::UrlChanged(url));
                }
            })
            .with_new_window_req_handler(move |url, _features| {
                debug!("new window request for {}", url);
                let _ = nw_proxy.send_event(UserEvent::OpenInNewTab(url));
                wry::NewWindowResponse::Deny
            })
            .with_devtools(true);

        match builder.build_as_child(&*self.window) {
            Ok(view) => {
                debug!("created surface {} for tab {}", generation, tab_id);
                self.views.insert(tab_id.clone(), view);
                Ok(())
            }
            Err(e) => {
                error!("failed to create surface for tab {}: {}", tab_id, e);
                Err(SurfaceError::CreateFailed(e.to_string()))
            }
        }
    }

    fn release_surface(&mut self, tab_id: &TabId) {
        // Dropping the WebView destroys the native view.
        if self.views.remove(tab_id).is_some() {
            debug!("destroyed surface of tab {}", tab_id);
        }
    }

    fn send(&mut self, tab_id: &TabId, command: SurfaceCommand) {
        let Some(view) = self.views.get(tab_id) else {
            return;
        };
        let result = match command {
            SurfaceCommand::Navigate(url) => view.load_url(&url),
            SurfaceCommand::GoBack => view.evaluate_script("history.back()"),
            SurfaceCommand::GoForward => view.evaluate_script("history.forward()"),
            SurfaceCommand::Reload => view.reload(),
            SurfaceCommand::OpenDevTools => {
                view.open_devtools();
                Ok(())
            }
        };
        if let Err(e) = result {
            warn!("surface command for tab {} failed: {}", tab_id, e);
        }
    }

    fn show(&mut self, view: ActiveView<'_>) {
        let target = match view {
            ActiveView::Surface(id) => Some(id),
            ActiveView::Internal(_) => None,
        };
        for (id, webview) in &self.views {
            if let Err(e) = webview.set_visible(target == Some(id)) {
                warn!("failed to toggle surface of tab {}: {}", id, e);
            }
        }
    }
}

// ─── Window chrome ───

struct TaoChrome<'a> {
    window: &'a Window,
    close_requested: bool,
}

impl<'a> TaoChrome<'a> {
    fn new(window: &'a Window) -> Self {
        Self {
            window,
            close_requested: false,
        }
    }
}

impl WindowChrome for TaoChrome<'_> {
    fn minimize(&mut self) {
        self.window.set_minimized(true);
    }

    fn is_maximized(&self) -> bool {
        self.window.is_maximized()
    }

    fn set_maximized(&mut self, maximized: bool) {
        self.window.set_maximized(maximized);
    }

    fn close(&mut self) {
        self.close_requested = true;
    }

    fn drag(&mut self) {
        if let Err(e) = self.window.drag_window() {
            debug!("window drag unavailable: {}", e);
        }
    }
}

// ─── Chrome rendering ───

fn eval(chrome: &WebView, js: &str) {
    if let Err(e) = chrome.evaluate_script(js) {
        warn!("chrome script failed: {}", e);
    }
}

fn render(chrome: &WebView, window: &Window, app: &App<WryHost>) {
    window.set_title(&format!("{} - Nemalo", app.controller.tabs().get_active_tab().title));
    let state = bridge::shell_state(app);
    eval(chrome, &format!("window.__nemalo&&window.__nemalo.render({})", state));
}

fn request_id_js(request_id: Option<u64>) -> String {
    request_id.map(|id| id.to_string()).unwrap_or_else(|| "null".into())
}

fn deliver(chrome: &WebView, window: &Window, app: &App<WryHost>, reply: BridgeReply) {
    match reply {
        BridgeReply::None => {}
        BridgeReply::Render => render(chrome, window, app),
        BridgeReply::Settings { request_id, value } => {
            eval(
                chrome,
                &format!(
                    "window.__nemalo&&window.__nemalo.resolve({},{})",
                    request_id_js(request_id),
                    value
                ),
            );
            render(chrome, window, app);
        }
        BridgeReply::SettingsRejected { request_id, message } => {
            eval(
                chrome,
                &format!(
                    "window.__nemalo&&window.__nemalo.reject({},{})",
                    request_id_js(request_id),
                    Value::String(message)
                ),
            );
        }
    }
}

fn build_chrome<'a>(builder: WebViewBuilder<'a>, window: &'a Window) -> wry::Result<WebView> {
    #[cfg(target_os = "linux")]
    {
        use tao::platform::unix::WindowExtUnix;
        use wry::WebViewBuilderExtUnix;
        match window.default_vbox() {
            Some(vbox) => builder.build_gtk(vbox),
            None => builder.build(window),
        }
    }

    #[cfg(not(target_os = "linux"))]
    {
        builder.build(window)
    }
}

// ─── Main entry point ───

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let event_loop: EventLoop<UserEvent> = EventLoopBuilder::with_user_event().build();
    let proxy = event_loop.create_proxy();

    let window = Rc::new(
        WindowBuilder::new()
            .with_title("Nemalo")
            .with_inner_size(tao::dpi::LogicalSize::new(1200.0, 800.0))
            .with_decorations(false)
            .build(&event_loop)?,
    );

    // The chrome view must exist before any tab surface so tabs stack above it.
    let ipc_proxy = proxy.clone();
    let builder = WebViewBuilder::new()
        .with_html(SHELL_HTML)
        .with_ipc_handler(move |msg: wry::http::Request<String>| {
            let _ = ipc_proxy.send_event(UserEvent::ChromeIpc(msg.body().clone()));
        })
        .with_devtools(cfg!(debug_assertions));
    let chrome = build_chrome(builder, &window)?;

    let host = WryHost::new(window.clone(), proxy);
    let mut app = App::new(host, None);
    app.theme_engine
        .set_system_prefers_dark(matches!(window.theme(), Theme::Dark));
    info!("nemalo started with {} tab(s)", app.controller.tabs().tab_count());

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                info!("window closed");
                *control_flow = ControlFlow::Exit;
            }

            Event::WindowEvent {
                event: WindowEvent::Resized(_),
                ..
            } => app.controller.host().relayout(),

            Event::WindowEvent {
                event: WindowEvent::ThemeChanged(theme),
                ..
            } => {
                app.theme_engine
                    .set_system_prefers_dark(matches!(theme, Theme::Dark));
                render(&chrome, &window, &app);
            }

            Event::UserEvent(user_event) => match user_event {
                UserEvent::ChromeIpc(body) => {
                    let mut window_chrome = TaoChrome::new(&window);
                    match bridge::handle_message(&mut app, &mut window_chrome, &body) {
                        Ok(reply) => deliver(&chrome, &window, &app, reply),
                        Err(e) => warn!("dropping chrome message: {}", e),
                    }
                    if window_chrome.close_requested {
                        info!("close requested from chrome");
                        *control_flow = ControlFlow::Exit;
                    }
                }
                UserEvent::SurfaceIpc(tab_id, generation, body) => {
                    match bridge::handle_surface_message(&mut app, &tab_id, generation, &body) {
                        Ok(true) => render(&chrome, &window, &app),
                        Ok(false) => {}
                        Err(e) => debug!("dropping surface message from tab {}: {}", tab_id, e),
                    }
                }
                UserEvent::Surface(event) => {
                    if app.controller.handle_surface_event(event) {
                        render(&chrome, &window, &app);
                    }
                }
                UserEvent::OpenInNewTab(url) => {
                    app.controller.create_tab(Some(&url));
                    render(&chrome, &window, &app);
                }
            },

            _ => {}
        }
    })
}

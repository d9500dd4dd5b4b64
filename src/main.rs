//! Nemalo: a minimal tabbed desktop browser shell.
//!
//! Entry point: opens the browser window on the system WebView.
//! When built without the `gui` feature, runs a console walkthrough of the
//! tab and navigation logic against a host that only logs.

use env_logger::Env;

fn init_logging() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();
}

#[cfg(feature = "gui")]
fn main() {
    init_logging();
    if let Err(e) = nemalo::ui::webview_app::run() {
        log::error!("failed to start browser: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(feature = "gui"))]
fn main() {
    init_logging();
    println!();
    println!("Nemalo v{} (headless demo)", env!("CARGO_PKG_VERSION"));
    println!();

    demo_search();
    demo_navigation();
}

#[cfg(not(feature = "gui"))]
mod headless {
    use log::info;
    use nemalo::managers::surface_registry::SurfaceHost;
    use nemalo::types::errors::SurfaceError;
    use nemalo::types::surface::{ActiveView, SurfaceCommand, SurfaceGeneration};
    use nemalo::types::tab::TabId;

    /// Surface host without any rendering; every call is logged.
    pub struct LoggingHost;

    impl SurfaceHost for LoggingHost {
        fn create_surface(
            &mut self,
            tab_id: &TabId,
            generation: SurfaceGeneration,
            url: &str,
        ) -> Result<(), SurfaceError> {
            info!("[host] create {} #{} -> {}", tab_id, generation, url);
            Ok(())
        }

        fn release_surface(&mut self, tab_id: &TabId) {
            info!("[host] release {}", tab_id);
        }

        fn send(&mut self, tab_id: &TabId, command: SurfaceCommand) {
            info!("[host] {} <- {:?}", tab_id, command);
        }

        fn show(&mut self, view: ActiveView<'_>) {
            info!("[host] show {:?}", view);
        }
    }
}

#[cfg(not(feature = "gui"))]
fn section(name: &str) {
    println!("───────────────────────────────────────────────────────────────");
    println!("  {}", name);
    println!("───────────────────────────────────────────────────────────────");
}

#[cfg(not(feature = "gui"))]
fn demo_search() {
    use nemalo::services::search_resolver;
    use nemalo::types::settings::{BrowserSettings, SearchEngine};
    section("Search resolution");

    let mut settings = BrowserSettings::default();
    for input in ["https://rust-lang.org", "nemalo://settings", "rust ownership"] {
        println!("  {:<24} -> {}", input, search_resolver::resolve(input, &settings));
    }

    settings.search_engine = SearchEngine::Custom;
    settings.custom_search_url = "https://search.example/?q=%s&lang=en".to_string();
    println!("  custom: {}", search_resolver::resolve("a&b", &settings));
    println!();
}

#[cfg(not(feature = "gui"))]
fn demo_navigation() {
    use nemalo::app::App;
    use nemalo::managers::tab_manager::TabManagerTrait;
    section("Tabs and navigation");

    let settings_path = std::env::temp_dir().join("nemalo-demo-settings.json");
    let mut app = App::new(
        headless::LoggingHost,
        Some(settings_path.to_string_lossy().to_string()),
    );

    let first = app.controller.active_tab_id().clone();
    let _ = app.controller.submit_address_bar("tokio select macro", &first);
    let second = app.controller.create_tab(Some("https://crates.io"));
    let _ = app.controller.navigate("nemalo://settings", &second);
    let _ = app.controller.close_tab(&second);

    for tab in app.controller.tabs().get_all_tabs() {
        println!("  [{}] {} ({})", tab.id, tab.title, tab.url);
    }
    println!("  active: {}", app.controller.active_tab_id());
    println!("  address bar: {}", app.controller.address_bar_text());

    let _ = std::fs::remove_file(settings_path);
    println!();
}

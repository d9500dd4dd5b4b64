//! App Core for Nemalo.
//!
//! Central struct holding the navigation controller and the settings and
//! theme services. It is owned by the UI thread and mutated only there.

use log::warn;

use crate::managers::navigation_controller::NavigationController;
use crate::managers::surface_registry::SurfaceHost;
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::services::theme_engine::{ThemeEngine, ThemeEngineTrait};

pub struct App<H: SurfaceHost> {
    pub controller: NavigationController<H>,
    pub settings_engine: SettingsEngine,
    pub theme_engine: ThemeEngine,
}

impl<H: SurfaceHost> App<H> {
    /// Loads settings and opens the first tab at the configured start page.
    ///
    /// An unreadable settings file is moved to `<path>.bak` so the next save
    /// cannot overwrite it, and the app starts with defaults.
    pub fn new(host: H, settings_path: Option<String>) -> Self {
        let mut settings_engine = SettingsEngine::new(settings_path);
        let settings = match settings_engine.load() {
            Ok(settings) => settings,
            Err(e) => {
                warn!(
                    "{} ({}); starting with default settings",
                    e,
                    settings_engine.get_config_path()
                );
                match settings_engine.back_up_config() {
                    Ok(backup) => warn!("moved rejected settings file to {}", backup),
                    Err(e) => warn!("{}", e),
                }
                settings_engine.get_settings().clone()
            }
        };

        let theme_engine = ThemeEngine::new(settings.theme);
        let controller = NavigationController::new(host, settings);

        Self {
            controller,
            settings_engine,
            theme_engine,
        }
    }

    /// Pushes the stored settings into the controller and theme engine.
    pub fn sync_settings(&mut self) {
        let settings = self.settings_engine.get_settings().clone();
        self.theme_engine.set_theme(settings.theme);
        self.controller.apply_settings(settings);
    }
}

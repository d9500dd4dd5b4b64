//! Theme engine: resolves the theme setting to a palette of CSS variables.

use std::collections::BTreeMap;

use crate::types::settings::ThemeMode;

/// Trait defining the theme engine interface.
pub trait ThemeEngineTrait {
    fn set_theme(&mut self, mode: ThemeMode);
    fn get_theme(&self) -> ThemeMode;
    fn set_system_prefers_dark(&mut self, dark: bool);
    fn effective_theme(&self) -> ThemeMode;
    fn get_css_variables(&self) -> BTreeMap<String, String>;
}

struct Palette {
    bg_canvas: &'static str,
    bg_surface: &'static str,
    bg_hover: &'static str,
    fg_default: &'static str,
    fg_muted: &'static str,
    border: &'static str,
    accent: &'static str,
}

const DARK: Palette = Palette {
    bg_canvas: "#1f1f1f",
    bg_surface: "#292929",
    bg_hover: "#3d3d3d",
    fg_default: "#ffffff",
    fg_muted: "#adadad",
    border: "#3d3d3d",
    accent: "#479ef5",
};

const LIGHT: Palette = Palette {
    bg_canvas: "#fafafa",
    bg_surface: "#ffffff",
    bg_hover: "#f0f0f0",
    fg_default: "#242424",
    fg_muted: "#616161",
    border: "#e0e0e0",
    accent: "#0f6cbd",
};

/// The theme engine implementation.
pub struct ThemeEngine {
    current_theme: ThemeMode,
    system_prefers_dark: bool,
}

impl ThemeEngine {
    /// Creates a ThemeEngine. `System` resolves to light until the host
    /// reports a dark preference.
    pub fn new(mode: ThemeMode) -> Self {
        Self {
            current_theme: mode,
            system_prefers_dark: false,
        }
    }
}

impl ThemeEngineTrait for ThemeEngine {
    fn set_theme(&mut self, mode: ThemeMode) {
        self.current_theme = mode;
    }

    fn get_theme(&self) -> ThemeMode {
        self.current_theme
    }

    fn set_system_prefers_dark(&mut self, dark: bool) {
        self.system_prefers_dark = dark;
    }

    fn effective_theme(&self) -> ThemeMode {
        match self.current_theme {
            ThemeMode::System if self.system_prefers_dark => ThemeMode::Dark,
            ThemeMode::System => ThemeMode::Light,
            other => other,
        }
    }

    fn get_css_variables(&self) -> BTreeMap<String, String> {
        let palette = match self.effective_theme() {
            ThemeMode::Dark => &DARK,
            _ => &LIGHT,
        };
        let mut vars = BTreeMap::new();
        vars.insert("--bg-canvas".into(), palette.bg_canvas.into());
        vars.insert("--bg-surface".into(), palette.bg_surface.into());
        vars.insert("--bg-hover".into(), palette.bg_hover.into());
        vars.insert("--fg-default".into(), palette.fg_default.into());
        vars.insert("--fg-muted".into(), palette.fg_muted.into());
        vars.insert("--border-color".into(), palette.border.into());
        vars.insert("--accent-color".into(), palette.accent.into());
        vars.insert(
            "--font-family".into(),
            "'Segoe UI', -apple-system, BlinkMacSystemFont, Helvetica, Arial, sans-serif".into(),
        );
        vars
    }
}

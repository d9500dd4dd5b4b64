// Nemalo services
// Services provide stateless or persisted functionality: search resolution, settings, themes.

pub mod search_resolver;
pub mod settings_engine;
pub mod theme_engine;

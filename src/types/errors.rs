use thiserror::Error;

// === TabError ===

/// Errors related to tab management operations.
///
/// None of these are fatal: callers log them and leave state unchanged.
#[derive(Debug, Error, PartialEq)]
pub enum TabError {
    /// Tab with the given ID was not found.
    #[error("Tab not found: {0}")]
    NotFound(String),
    /// The only remaining tab cannot be closed.
    #[error("Cannot close the last remaining tab: {0}")]
    LastTab(String),
}

// === SettingsError ===

/// Errors related to the settings store.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Reading or writing the settings file failed.
    #[error("Settings I/O error: {0}")]
    Io(String),
    /// The settings file could not be parsed or written as JSON.
    #[error("Settings serialization error: {0}")]
    Serialization(String),
    /// The key does not name a known setting.
    #[error("Invalid settings key: {0}")]
    InvalidKey(String),
    /// The value does not match the setting's type.
    #[error("Invalid settings value: {0}")]
    InvalidValue(String),
}

// === BridgeError ===

/// Errors decoding or applying an IPC message from the UI.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// The message is not valid JSON or has an unknown shape.
    #[error("Malformed IPC message: {0}")]
    Malformed(String),
    /// A settings request was rejected by the store.
    #[error(transparent)]
    Settings(#[from] SettingsError),
}

// === SurfaceError ===

/// Errors reported by the rendering-surface host.
#[derive(Debug, Error, PartialEq)]
pub enum SurfaceError {
    /// The host could not create a page view for the tab.
    #[error("Surface creation failed: {0}")]
    CreateFailed(String),
}

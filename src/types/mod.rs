// Nemalo shared type definitions
// Each submodule defines types used across the application.

pub mod errors;
pub mod page;
pub mod settings;
pub mod surface;
pub mod tab;

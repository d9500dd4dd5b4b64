// Nemalo state managers
// Managers own browsing state: the tab list, surface bindings and the navigation controller on top.

pub mod navigation_controller;
pub mod surface_registry;
pub mod tab_manager;

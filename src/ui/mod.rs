//! Nemalo UI layer.
//!
//! Uses `wry` for cross-platform WebView rendering:
//! - Windows: WebView2
//! - Linux: WebKitGTK
//! - macOS: WKWebView
//!
//! One chrome view draws the tab strip, toolbar and internal pages. Each web
//! tab gets its own child view placed below the toolbar.

pub mod webview_app;

//! Main window helpers shared by commands, the tray and the hotkey handler.

use tauri::{AppHandle, Manager, WebviewWindow};

/// Label of the single webview window, as declared in `tauri.conf.json`.
pub const MAIN_WINDOW_LABEL: &str = "main";

pub fn main_window(app: &AppHandle) -> Option<WebviewWindow> {
    app.get_webview_window(MAIN_WINDOW_LABEL)
}

/// A window counts as visible when it is shown and not minimized.
pub fn is_visible(window: &WebviewWindow) -> bool {
    let shown = window.is_visible().unwrap_or(false);
    let minimized = window.is_minimized().unwrap_or(false);
    shown && !minimized
}

/// Bring the window to the front, optionally re-centering it first.
pub fn reveal(window: &WebviewWindow, center: bool) {
    if window.is_minimized().unwrap_or(false) {
        if let Err(e) = window.unminimize() {
            log::debug!("Failed to unminimize main window: {}", e);
        }
    }
    if center {
        if let Err(e) = window.center() {
            log::debug!("Failed to center main window: {}", e);
        }
    }
    if let Err(e) = window.show() {
        log::error!("Failed to show main window: {}", e);
        return;
    }
    if let Err(e) = window.set_focus() {
        log::debug!("Failed to focus main window: {}", e);
    }
}

/// Hide the main window when visible, otherwise reveal it.
pub fn toggle_main_window(app: &AppHandle, center: bool) {
    let Some(window) = main_window(app) else {
        log::warn!("Main window not found");
        return;
    };

    if is_visible(&window) {
        if let Err(e) = window.hide() {
            log::error!("Failed to hide main window: {}", e);
        }
    } else {
        reveal(&window, center);
    }
}

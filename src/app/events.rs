//! Window event handlers.

use tauri::{Window, WindowEvent};

use super::window::MAIN_WINDOW_LABEL;
use crate::config::app::is_close_to_tray;

/// Handle window events for the application.
///
/// This is called from the Tauri builder's `on_window_event` hook.
pub fn handle_window_event(window: &Window, event: &WindowEvent) {
    // Otherwise the window closes and, being the last one, ends the app.
    if let WindowEvent::CloseRequested { api, .. } = event {
        if hides_instead_of_closing(window.label(), is_close_to_tray()) {
            api.prevent_close();
            if let Err(e) = window.hide() {
                log::debug!("Failed to hide main window on close: {}", e);
            }
        }
    }
}

/// Only the main window goes to the tray, and only while close-to-tray is on.
fn hides_instead_of_closing(label: &str, close_to_tray: bool) -> bool {
    close_to_tray && label == MAIN_WINDOW_LABEL
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_main_window_hides_when_close_to_tray() {
        assert!(hides_instead_of_closing(MAIN_WINDOW_LABEL, true));
    }

    #[test]
    fn test_main_window_closes_when_close_to_tray_off() {
        assert!(!hides_instead_of_closing(MAIN_WINDOW_LABEL, false));
    }

    #[test]
    fn test_other_windows_always_close() {
        assert!(!hides_instead_of_closing("about", true));
        assert!(!hides_instead_of_closing("about", false));
    }
}

//! Window-control commands for the web UI.
//!
//! Every command targets the `main` window. A missing window makes actions a
//! no-op and queries return `false`.

use tauri::{command, AppHandle};

use crate::app::window::{self, main_window};
use crate::error::{AppError, AppResult};

fn window_err(action: &str) -> impl FnOnce(tauri::Error) -> AppError + '_ {
    move |e| AppError::WindowError(format!("Failed to {} main window: {}", action, e))
}

/// Greeting used by the UI's demo form.
#[command]
pub fn greet(name: String) -> String {
    format!("Hello {}!", name)
}

#[command]
pub fn set_always_on_top(app: AppHandle, always_on_top: bool) -> AppResult<()> {
    if let Some(window) = main_window(&app) {
        window
            .set_always_on_top(always_on_top)
            .map_err(window_err("pin"))?;
    }
    Ok(())
}

#[command]
pub fn minimize(app: AppHandle) -> AppResult<()> {
    if let Some(window) = main_window(&app) {
        window.minimize().map_err(window_err("minimize"))?;
    }
    Ok(())
}

/// Close the main window. Subject to the close-to-tray preference.
#[command]
pub fn close(app: AppHandle) -> AppResult<()> {
    if let Some(window) = main_window(&app) {
        window.close().map_err(window_err("close"))?;
    }
    Ok(())
}

/// Toggle between maximized and restored.
#[command]
pub fn maximize(app: AppHandle) -> AppResult<()> {
    if let Some(window) = main_window(&app) {
        if window.is_maximized().map_err(window_err("query"))? {
            window.unmaximize().map_err(window_err("restore"))?;
        } else {
            window.maximize().map_err(window_err("maximize"))?;
        }
    }
    Ok(())
}

#[command]
pub fn hide_to_system_tray(app: AppHandle) -> AppResult<()> {
    if let Some(window) = main_window(&app) {
        window.hide().map_err(window_err("hide"))?;
    }
    Ok(())
}

#[command]
pub fn show_from_system_tray(app: AppHandle) {
    if let Some(window) = main_window(&app) {
        window::reveal(&window, false);
    }
}

#[command]
pub fn is_window_visible(app: AppHandle) -> bool {
    main_window(&app)
        .map(|window| window::is_visible(&window))
        .unwrap_or(false)
}

#[command]
pub fn toggle_window_visibility(app: AppHandle) {
    window::toggle_main_window(&app, false);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greet() {
        assert_eq!(greet("Ada".to_string()), "Hello Ada!");
    }

    #[test]
    fn test_greet_empty_name() {
        assert_eq!(greet(String::new()), "Hello !");
    }

    #[test]
    fn test_window_err_message() {
        let err = window_err("hide")(tauri::Error::WindowNotFound);
        assert!(matches!(err, AppError::WindowError(_)));
        assert!(err.to_string().starts_with("Window error: Failed to hide main window"));
    }
}

//! System tray setup and event handling.
//!
//! The main window is attached to the tray icon: a left click toggles it and
//! places it next to the icon.

use std::sync::Mutex;
use std::time::Instant;

use tauri::{
    image::Image,
    menu::{Menu, MenuItem, PredefinedMenuItem},
    tray::{MouseButton, MouseButtonState, TrayIconBuilder, TrayIconEvent},
    App, AppHandle, Manager, PhysicalPosition, PhysicalSize, Position, Rect, WebviewWindow,
};

use super::placement::{self, Bounds, Debouncer, TRAY_CLICK_DEBOUNCE, TRAY_WINDOW_OFFSET};
use super::window;
use crate::error::{AppError, AppResult, LockResultExt, OptionExt};

const SHOW_LABEL: &str = "Show Window";

/// Tray menu items updated at runtime, plus click debounce state.
pub struct TrayState {
    pub show: MenuItem<tauri::Wry>,
    debounce: Debouncer,
}

impl TrayState {
    /// Update the "Show Window" item text, e.g. to show the shortcut.
    pub fn update_show_text(&self, text: &str) -> Result<(), tauri::Error> {
        self.show.set_text(text)
    }
}

/// Set up the system tray with menu and event handlers.
///
/// Returns `None` when the icon can't be decoded; the app then runs without
/// a tray.
pub fn setup_system_tray(app: &App) -> AppResult<Option<TrayState>> {
    let tray_icon = match Image::from_bytes(include_bytes!("../../icons/32x32.png")) {
        Ok(icon) => icon,
        Err(e) => {
            log::error!("Failed to load system tray icon: {}", e);
            return Ok(None);
        },
    };

    let show = MenuItem::with_id(app, "show", SHOW_LABEL, true, None::<&str>)?;
    let quit = MenuItem::with_id(app, "quit", "Quit", true, None::<&str>)?;
    let separator = PredefinedMenuItem::separator(app)?;

    let menu = Menu::with_items(app, &[&show, &separator, &quit])?;

    let _tray = TrayIconBuilder::new()
        .icon(tray_icon)
        .tooltip(app.package_info().name.clone())
        .menu(&menu)
        .show_menu_on_left_click(false)
        .on_menu_event(|app, event| match event.id.as_ref() {
            "show" => {
                if let Some(window) = window::main_window(app) {
                    window::reveal(&window, false);
                }
            },
            "quit" => app.exit(0),
            _ => {},
        })
        .on_tray_icon_event(|tray, event| {
            if let TrayIconEvent::Click {
                button: MouseButton::Left,
                button_state: MouseButtonState::Up,
                rect,
                ..
            } = event
            {
                toggle_attached_window(tray.app_handle(), rect);
            }
        })
        .build(app)?;

    Ok(Some(TrayState {
        show,
        debounce: Debouncer::new(TRAY_CLICK_DEBOUNCE),
    }))
}

/// Initialize the system tray and register it with the app state.
pub fn init(app: &App) -> AppResult<()> {
    if let Some(tray_state) = setup_system_tray(app)? {
        app.manage(Mutex::new(tray_state));
    }
    Ok(())
}

/// Reflect the active shortcut in the tray menu. No-op without a tray.
pub fn show_shortcut_hint(app: &AppHandle, shortcut_label: &str) {
    let Some(state) = app.try_state::<Mutex<TrayState>>() else {
        return;
    };
    let text = format!("{} ({})", SHOW_LABEL, shortcut_label);
    let result = state
        .lock()
        .map_lock_err("tray state")
        .and_then(|tray| tray.update_show_text(&text).map_err(AppError::from));
    if let Err(e) = result {
        log::warn!("Failed to update tray menu text: {}", e);
    }
}

fn toggle_attached_window(app: &AppHandle, tray_rect: Rect) {
    if let Some(state) = app.try_state::<Mutex<TrayState>>() {
        match state.lock() {
            Ok(mut tray) => {
                if !tray.debounce.accept(Instant::now()) {
                    return;
                }
            },
            Err(_) => return,
        }
    }

    let Some(window) = window::main_window(app) else {
        return;
    };

    if window::is_visible(&window) {
        if let Err(e) = window.hide() {
            log::debug!("Failed to hide main window: {}", e);
        }
        return;
    }

    if let Err(e) = move_next_to_tray(&window, tray_rect) {
        log::debug!("Could not place window next to tray icon: {}", e);
    }
    window::reveal(&window, false);
}

fn move_next_to_tray(window: &WebviewWindow, tray_rect: Rect) -> AppResult<()> {
    let scale = window.scale_factor()?;
    let tray_pos: PhysicalPosition<i32> = tray_rect.position.to_physical(scale);
    let tray_size: PhysicalSize<u32> = tray_rect.size.to_physical(scale);

    let monitor = match window.monitor_from_point(tray_pos.x as f64, tray_pos.y as f64)? {
        Some(monitor) => monitor,
        None => window
            .current_monitor()?
            .context("no monitor found for tray icon")?,
    };
    let window_size = window.outer_size()?;
    // Taskbars and menu bars sit outside the work area.
    let area = monitor.work_area();

    let (x, y) = placement::place_near_tray(
        Bounds::new(tray_pos.x, tray_pos.y, tray_size.width, tray_size.height),
        (window_size.width, window_size.height),
        Bounds::new(area.position.x, area.position.y, area.size.width, area.size.height),
        TRAY_WINDOW_OFFSET,
    );

    window.set_position(Position::Physical(PhysicalPosition { x, y }))?;
    Ok(())
}

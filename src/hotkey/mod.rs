//! Global hotkey registration.
//!
//! One OS-wide shortcut toggles the main window. The subscription lives in
//! the global-shortcut plugin until it is replaced by `register` or dropped
//! by `unregister`; the active shortcut is tracked in `HotkeyState`.

pub mod keys;

use std::sync::Mutex;

use tauri::{AppHandle, Manager};
use tauri_plugin_global_shortcut::{GlobalShortcutExt, Shortcut, ShortcutState};

use crate::app::window;
use crate::config::HotkeySettings;
use crate::error::{AppError, AppResult, LockResultExt};

/// Currently registered shortcut, if any.
#[derive(Default)]
pub struct HotkeyState {
    active: Mutex<Option<Shortcut>>,
}

/// Release the tracked shortcut. The slot is cleared only after `unregister`
/// succeeds, so a shortcut the platform still holds stays tracked.
fn release<T: Copy, E>(
    slot: &mut Option<T>,
    unregister: impl FnOnce(T) -> Result<(), E>,
) -> Result<(), E> {
    if let Some(shortcut) = *slot {
        unregister(shortcut)?;
        *slot = None;
    }
    Ok(())
}

/// Swap the tracked shortcut for `next`.
///
/// If the old one cannot be released nothing changes. If `next` cannot be
/// registered the slot is left empty.
fn replace<T: Copy, E>(
    slot: &mut Option<T>,
    next: T,
    unregister: impl FnOnce(T) -> Result<(), E>,
    register: impl FnOnce(T) -> Result<(), E>,
) -> Result<(), E> {
    release(slot, unregister)?;
    register(next)?;
    *slot = Some(next);
    Ok(())
}

/// Register `settings` as the global shortcut, replacing any previous one.
///
/// On a registration failure no shortcut is left active. If the previous
/// shortcut cannot be released it stays active and the error is returned.
pub fn register(app: &AppHandle, settings: &HotkeySettings) -> AppResult<()> {
    let shortcut = keys::to_shortcut(settings)?;
    let label = keys::display_label(settings);

    let state = app.state::<HotkeyState>();
    let mut active = state.active.lock().map_lock_err("hotkey state")?;

    replace(
        &mut *active,
        shortcut,
        |previous| {
            app.global_shortcut().unregister(previous).map_err(|e| {
                AppError::ShortcutError(format!("failed to release previous shortcut: {}", e))
            })
        },
        |next| {
            app.global_shortcut()
                .on_shortcut(next, |app, _shortcut, event| {
                    // Both key-down and key-up are delivered; act once per press.
                    if event.state == ShortcutState::Pressed {
                        window::toggle_main_window(app, true);
                    }
                })
                .map_err(|e| AppError::ShortcutError(format!("{}: {}", label, e)))
        },
    )?;
    drop(active);

    log::info!("[HOTKEY] {} is registered", label);
    crate::app::tray::show_shortcut_hint(app, &label);
    Ok(())
}

/// Drop the active shortcut subscription, if any.
pub fn unregister(app: &AppHandle) -> AppResult<()> {
    let state = app.state::<HotkeyState>();
    let mut active = state.active.lock().map_lock_err("hotkey state")?;

    let had_shortcut = active.is_some();
    release(&mut *active, |shortcut| {
        app.global_shortcut()
            .unregister(shortcut)
            .map_err(|e| AppError::ShortcutError(e.to_string()))
    })?;
    if had_shortcut {
        log::info!("[HOTKEY] shortcut unregistered");
    }
    Ok(())
}

/// Settings to register at startup: the stored ones when they resolve to a
/// shortcut, otherwise the default combination plus the reason.
fn startup_settings(stored: HotkeySettings) -> (HotkeySettings, Option<AppError>) {
    match keys::to_shortcut(&stored) {
        Ok(_) => (stored, None),
        Err(e) => (HotkeySettings::default(), Some(e)),
    }
}

/// Register the configured shortcut at startup.
///
/// Invalid stored settings fall back to the default combination; a failed
/// registration is logged and the app runs without a shortcut.
pub fn init(app: &AppHandle) {
    let (settings, rejected) = startup_settings(crate::config::app::hotkey_settings());
    if let Some(e) = rejected {
        log::warn!("[HOTKEY] stored hotkey is invalid ({}), using default", e);
        crate::config::APP_CONFIG.write().hotkey = settings.clone();
    }

    if let Err(e) = register(app, &settings) {
        log::error!("[HOTKEY] failed to register hotkey: {}", e);
    }
}

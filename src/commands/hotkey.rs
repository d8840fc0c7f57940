//! Hotkey configuration commands.

use tauri::{command, AppHandle};

use crate::config::{self, HotkeySettings, APP_CONFIG};
use crate::error::AppResult;
use crate::hotkey::{self, keys};

/// Get the configured hotkey.
#[command]
pub fn get_hotkey_settings() -> HotkeySettings {
    config::app::hotkey_settings()
}

/// Make `next` live with `activate`, then `persist` it. If either step
/// fails, `previous` is activated again and the first error is returned.
fn switch_with_rollback<T>(
    previous: &T,
    next: &T,
    mut activate: impl FnMut(&T) -> AppResult<()>,
    persist: impl FnOnce(&T) -> AppResult<()>,
) -> AppResult<()> {
    let result = activate(next).and_then(|()| persist(next));
    if result.is_err() {
        if let Err(e) = activate(previous) {
            log::error!("[HOTKEY] failed to restore previous hotkey: {}", e);
        }
    }
    result
}

/// Validate, register and persist a new hotkey.
///
/// If registration or saving fails the previous hotkey is registered again,
/// the stored config is left untouched and the error is returned.
#[command]
pub fn update_hotkey_settings(app: AppHandle, settings: HotkeySettings) -> AppResult<HotkeySettings> {
    let settings = settings.normalized();
    // Reject bad names before touching the live shortcut.
    keys::to_shortcut(&settings)?;

    let previous = config::app::hotkey_settings();
    switch_with_rollback(
        &previous,
        &settings,
        |s| hotkey::register(&app, s),
        |s| {
            config::app::change_and_persist(
                &APP_CONFIG,
                |current| current.hotkey = s.clone(),
                || config::app::save(&app),
            )
        },
    )
    .inspect_err(|e| {
        log::warn!("[HOTKEY] update to {} failed: {}", keys::display_label(&settings), e);
    })?;

    Ok(settings)
}

/// Restore the default hotkey (Ctrl+Shift+S).
#[command]
pub fn reset_hotkey_settings(app: AppHandle) -> AppResult<HotkeySettings> {
    update_hotkey_settings(app, HotkeySettings::default())
}

/// Modifier names accepted by `update_hotkey_settings`.
#[command]
pub fn get_available_modifiers() -> Vec<String> {
    keys::AVAILABLE_MODIFIERS.iter().map(|m| m.to_string()).collect()
}

/// Key names accepted by `update_hotkey_settings`.
#[command]
pub fn get_available_keys() -> Vec<String> {
    keys::AVAILABLE_KEYS.iter().map(|k| k.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::error::AppError;

    #[test]
    fn test_switch_activates_and_persists_new_value() {
        let activated = RefCell::new(Vec::new());
        let persisted = RefCell::new(Vec::new());

        let result = switch_with_rollback(
            &"old",
            &"new",
            |s| {
                activated.borrow_mut().push(*s);
                Ok(())
            },
            |s| {
                persisted.borrow_mut().push(*s);
                Ok(())
            },
        );

        assert!(result.is_ok());
        assert_eq!(activated.into_inner(), vec!["new"]);
        assert_eq!(persisted.into_inner(), vec!["new"]);
    }

    #[test]
    fn test_switch_restores_previous_when_activation_fails() {
        let activated = RefCell::new(Vec::new());

        let result = switch_with_rollback(
            &"old",
            &"new",
            |s| {
                activated.borrow_mut().push(*s);
                if *s == "new" {
                    Err(AppError::ShortcutError("already registered".to_string()))
                } else {
                    Ok(())
                }
            },
            |_| panic!("a failed activation must not be persisted"),
        );

        assert!(matches!(result, Err(AppError::ShortcutError(_))));
        assert_eq!(activated.into_inner(), vec!["new", "old"]);
    }

    #[test]
    fn test_switch_restores_previous_when_save_fails() {
        let activated = RefCell::new(Vec::new());

        let result = switch_with_rollback(
            &"old",
            &"new",
            |s| {
                activated.borrow_mut().push(*s);
                Ok(())
            },
            |_| Err(AppError::StoreError("read-only filesystem".to_string())),
        );

        assert!(matches!(result, Err(AppError::StoreError(_))));
        assert_eq!(activated.into_inner(), vec!["new", "old"]);
    }

    #[test]
    fn test_available_modifiers() {
        assert_eq!(get_available_modifiers(), vec!["ctrl", "shift", "alt", "meta"]);
    }

    #[test]
    fn test_available_keys_cover_letters_and_digits() {
        let keys = get_available_keys();
        assert_eq!(keys.len(), 36);
        assert_eq!(keys.first().map(String::as_str), Some("a"));
        assert_eq!(keys.last().map(String::as_str), Some("9"));
    }

    #[test]
    fn test_default_settings_appear_in_available_lists() {
        let defaults = HotkeySettings::default();
        let modifiers = get_available_modifiers();

        assert!(defaults.modifiers.iter().all(|m| modifiers.contains(m)));
        assert!(get_available_keys().contains(&defaults.key));
    }
}

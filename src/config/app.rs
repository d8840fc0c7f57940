//! Application-level configuration.
//!
//! Contains user preferences that affect app-wide behavior:
//! - Window management (close to tray)
//! - The clock event feed
//! - The global hotkey
//!
//! Held in a `parking_lot::RwLock` and persisted to `settings.json` through
//! `tauri-plugin-store`.

use lazy_static::lazy_static;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tauri::AppHandle;
use tauri_plugin_store::StoreExt;
use ts_rs::TS;

use super::hotkey::HotkeySettings;
use crate::app::clock;
use crate::error::AppResult;

/// Store file, resolved by the store plugin inside the app config dir.
pub const STORE_FILE: &str = "settings.json";

const CONFIG_KEY: &str = "config";

lazy_static! {
    /// Global app configuration.
    pub static ref APP_CONFIG: RwLock<AppConfig> = RwLock::new(AppConfig::default());
}

/// Application-wide user preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct AppConfig {
    /// Hide to the system tray instead of closing when the window is closed.
    pub close_to_tray: bool,
    /// Emit the once-per-second `time` event.
    pub clock_enabled: bool,
    /// Global shortcut that toggles the main window.
    pub hotkey: HotkeySettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            close_to_tray: true,
            clock_enabled: true,
            hotkey: HotkeySettings::default(),
        }
    }
}

// ============================================================================
// Getters (for internal Rust use)
// ============================================================================

/// Check if close-to-tray is enabled.
pub fn is_close_to_tray() -> bool {
    APP_CONFIG.read().close_to_tray
}

/// Check if the clock feed is enabled.
pub fn is_clock_enabled() -> bool {
    APP_CONFIG.read().clock_enabled
}

/// Current hotkey settings.
pub fn hotkey_settings() -> HotkeySettings {
    APP_CONFIG.read().hotkey.clone()
}

// ============================================================================
// Persistence
// ============================================================================

/// Decode a stored config value, falling back to defaults when it is absent
/// or malformed.
fn parse_stored(value: Option<Value>) -> AppConfig {
    match value {
        Some(value) => serde_json::from_value(value).unwrap_or_else(|e| {
            log::warn!("[APP_CONFIG] stored config is malformed, using defaults: {}", e);
            AppConfig::default()
        }),
        None => AppConfig::default(),
    }
}

/// Load the persisted config into `APP_CONFIG`.
pub fn load(app: &AppHandle) -> AppResult<()> {
    let store = app.store(STORE_FILE)?;
    let config = parse_stored(store.get(CONFIG_KEY));
    log::debug!("[APP_CONFIG] loaded {:?}", config);
    *APP_CONFIG.write() = config;
    Ok(())
}

/// Apply `change` to `config`, then `persist` it. When persisting fails the
/// previous config is restored so memory never runs ahead of disk.
pub(crate) fn change_and_persist(
    config: &RwLock<AppConfig>,
    change: impl FnOnce(&mut AppConfig),
    persist: impl FnOnce() -> AppResult<()>,
) -> AppResult<()> {
    let previous = config.read().clone();
    change(&mut *config.write());
    persist().inspect_err(|e| {
        log::warn!("[APP_CONFIG] save failed, reverting change: {}", e);
        *config.write() = previous;
    })
}

/// Persist the current `APP_CONFIG`.
pub fn save(app: &AppHandle) -> AppResult<()> {
    let value = serde_json::to_value(&*APP_CONFIG.read())?;
    let store = app.store(STORE_FILE)?;
    store.set(CONFIG_KEY, value);
    store.save()?;
    Ok(())
}

// ============================================================================
// Tauri Commands
// ============================================================================

/// Get the current app configuration.
#[tauri::command]
pub fn get_app_config() -> AppConfig {
    APP_CONFIG.read().clone()
}

/// Set close-to-tray behavior.
#[tauri::command]
pub fn set_close_to_tray(app: AppHandle, enabled: bool) -> AppResult<()> {
    log::debug!("[APP_CONFIG] set_close_to_tray({})", enabled);
    change_and_persist(&APP_CONFIG, |config| config.close_to_tray = enabled, || save(&app))
}

/// Turn the clock feed on or off.
#[tauri::command]
pub fn set_clock_enabled(app: AppHandle, enabled: bool) -> AppResult<()> {
    log::debug!("[APP_CONFIG] set_clock_enabled({})", enabled);
    change_and_persist(&APP_CONFIG, |config| config.clock_enabled = enabled, || save(&app))?;
    if enabled {
        clock::start(&app);
    } else {
        clock::stop(&app);
    }
    Ok(())
}

//! Application configuration management.
//!
//! - `AppConfig`: window, clock and hotkey preferences, persisted via the store plugin
//! - `HotkeySettings`: the global shortcut as editable modifier/key names
//!
//! Uses `parking_lot::RwLock` for fast, non-poisoning access from commands,
//! window events and the shortcut handler.

pub mod app;
pub mod hotkey;

pub use app::{AppConfig, APP_CONFIG};
pub use hotkey::HotkeySettings;

//! Global hotkey preferences.
//!
//! Names are stored as plain lowercase strings so the UI can render and edit
//! them directly. Mapping to platform key codes lives in `crate::hotkey::keys`.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A hotkey combination: zero or more modifier names plus one key name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct HotkeySettings {
    /// Modifier names, e.g. `["ctrl", "shift"]`.
    pub modifiers: Vec<String>,
    /// Key name, e.g. `"s"`.
    pub key: String,
}

impl Default for HotkeySettings {
    /// Ctrl+Shift+S.
    fn default() -> Self {
        Self {
            modifiers: vec!["ctrl".to_string(), "shift".to_string()],
            key: "s".to_string(),
        }
    }
}

impl HotkeySettings {
    /// Lowercase and trim every name, dropping empty and repeated modifiers.
    pub fn normalized(&self) -> Self {
        let mut modifiers: Vec<String> = Vec::with_capacity(self.modifiers.len());
        for name in &self.modifiers {
            let name = name.trim().to_lowercase();
            if !name.is_empty() && !modifiers.contains(&name) {
                modifiers.push(name);
            }
        }

        Self {
            modifiers,
            key: self.key.trim().to_lowercase(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_ctrl_shift_s() {
        let settings = HotkeySettings::default();
        assert_eq!(settings.modifiers, vec!["ctrl", "shift"]);
        assert_eq!(settings.key, "s");
    }

    #[test]
    fn test_normalized_cleans_names() {
        let settings = HotkeySettings {
            modifiers: vec![" Ctrl".into(), "SHIFT".into(), "ctrl".into(), "".into()],
            key: " K ".into(),
        };

        let normalized = settings.normalized();
        assert_eq!(normalized.modifiers, vec!["ctrl", "shift"]);
        assert_eq!(normalized.key, "k");
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(HotkeySettings::default()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "modifiers": ["ctrl", "shift"], "key": "s" })
        );
    }
}

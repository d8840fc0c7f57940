//! Mapping between hotkey names and platform key codes.

use tauri_plugin_global_shortcut::{Code, Modifiers, Shortcut};

use crate::config::HotkeySettings;
use crate::error::{AppError, AppResult};

/// Modifier names offered to the UI, in display order.
pub const AVAILABLE_MODIFIERS: [&str; 4] = ["ctrl", "shift", "alt", "meta"];

/// Key names offered to the UI.
pub const AVAILABLE_KEYS: [&str; 36] = [
    "a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k", "l", "m", "n", "o", "p", "q", "r",
    "s", "t", "u", "v", "w", "x", "y", "z", "0", "1", "2", "3", "4", "5", "6", "7", "8", "9",
];

fn modifier_flag(name: &str) -> Option<Modifiers> {
    match name {
        "ctrl" | "control" => Some(Modifiers::CONTROL),
        "shift" => Some(Modifiers::SHIFT),
        "alt" | "option" => Some(Modifiers::ALT),
        "meta" | "cmd" | "super" => Some(Modifiers::SUPER),
        _ => None,
    }
}

fn key_code(name: &str) -> Option<Code> {
    let code = match name {
        "a" => Code::KeyA,
        "b" => Code::KeyB,
        "c" => Code::KeyC,
        "d" => Code::KeyD,
        "e" => Code::KeyE,
        "f" => Code::KeyF,
        "g" => Code::KeyG,
        "h" => Code::KeyH,
        "i" => Code::KeyI,
        "j" => Code::KeyJ,
        "k" => Code::KeyK,
        "l" => Code::KeyL,
        "m" => Code::KeyM,
        "n" => Code::KeyN,
        "o" => Code::KeyO,
        "p" => Code::KeyP,
        "q" => Code::KeyQ,
        "r" => Code::KeyR,
        "s" => Code::KeyS,
        "t" => Code::KeyT,
        "u" => Code::KeyU,
        "v" => Code::KeyV,
        "w" => Code::KeyW,
        "x" => Code::KeyX,
        "y" => Code::KeyY,
        "z" => Code::KeyZ,
        "0" => Code::Digit0,
        "1" => Code::Digit1,
        "2" => Code::Digit2,
        "3" => Code::Digit3,
        "4" => Code::Digit4,
        "5" => Code::Digit5,
        "6" => Code::Digit6,
        "7" => Code::Digit7,
        "8" => Code::Digit8,
        "9" => Code::Digit9,
        _ => return None,
    };
    Some(code)
}

/// Resolve settings into a platform shortcut.
///
/// Unknown names are rejected rather than replaced, and at least one
/// modifier is required so the shortcut can't swallow ordinary typing.
pub fn to_shortcut(settings: &HotkeySettings) -> AppResult<Shortcut> {
    let settings = settings.normalized();

    if settings.modifiers.is_empty() {
        return Err(AppError::InvalidHotkey(
            "at least one modifier is required".to_string(),
        ));
    }

    let mut modifiers = Modifiers::empty();
    for name in &settings.modifiers {
        let flag = modifier_flag(name)
            .ok_or_else(|| AppError::InvalidHotkey(format!("unknown modifier '{}'", name)))?;
        modifiers |= flag;
    }

    let code = key_code(&settings.key)
        .ok_or_else(|| AppError::InvalidHotkey(format!("unknown key '{}'", settings.key)))?;

    Ok(Shortcut::new(Some(modifiers), code))
}

/// Human-readable label such as `Ctrl+Shift+S`, modifiers in canonical order.
///
/// Unknown names are shown as typed.
pub fn display_label(settings: &HotkeySettings) -> String {
    let settings = settings.normalized();
    let flags: Vec<Option<Modifiers>> = settings
        .modifiers
        .iter()
        .map(|name| modifier_flag(name))
        .collect();

    let mut parts: Vec<String> = Vec::new();
    for (flag, label) in [
        (Modifiers::CONTROL, "Ctrl"),
        (Modifiers::ALT, "Alt"),
        (Modifiers::SHIFT, "Shift"),
        (Modifiers::SUPER, "Meta"),
    ] {
        if flags.contains(&Some(flag)) {
            parts.push(label.to_string());
        }
    }
    for (name, flag) in settings.modifiers.iter().zip(&flags) {
        if flag.is_none() {
            parts.push(name.clone());
        }
    }
    parts.push(settings.key.to_uppercase());

    parts.join("+")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(modifiers: &[&str], key: &str) -> HotkeySettings {
        HotkeySettings {
            modifiers: modifiers.iter().map(|m| m.to_string()).collect(),
            key: key.to_string(),
        }
    }

    #[test]
    fn test_default_maps_to_ctrl_shift_s() {
        let shortcut = to_shortcut(&HotkeySettings::default()).unwrap();
        assert!(shortcut.matches(Modifiers::CONTROL | Modifiers::SHIFT, Code::KeyS));
    }

    #[test]
    fn test_meta_aliases() {
        for alias in ["meta", "cmd", "super", "CMD"] {
            let shortcut = to_shortcut(&settings(&[alias], "1")).unwrap();
            assert!(
                shortcut.matches(Modifiers::SUPER, Code::Digit1),
                "alias {} did not map to SUPER",
                alias
            );
        }
    }

    #[test]
    fn test_case_and_whitespace_are_ignored() {
        let shortcut = to_shortcut(&settings(&[" Alt "], " Z")).unwrap();
        assert!(shortcut.matches(Modifiers::ALT, Code::KeyZ));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = to_shortcut(&settings(&["ctrl"], "f13")).unwrap_err();
        assert!(matches!(err, AppError::InvalidHotkey(_)));
        assert!(err.to_string().contains("f13"));
    }

    #[test]
    fn test_unknown_modifier_is_rejected() {
        let err = to_shortcut(&settings(&["ctrl", "hyper"], "s")).unwrap_err();
        assert!(err.to_string().contains("hyper"));
    }

    #[test]
    fn test_modifier_required() {
        let err = to_shortcut(&settings(&[], "s")).unwrap_err();
        assert!(matches!(err, AppError::InvalidHotkey(_)));
    }

    #[test]
    fn test_every_advertised_name_resolves() {
        for key in AVAILABLE_KEYS {
            assert!(key_code(key).is_some(), "key {} has no code", key);
        }
        for modifier in AVAILABLE_MODIFIERS {
            assert!(modifier_flag(modifier).is_some(), "modifier {} has no flag", modifier);
        }
    }

    #[test]
    fn test_display_label_orders_modifiers() {
        assert_eq!(display_label(&HotkeySettings::default()), "Ctrl+Shift+S");
        assert_eq!(display_label(&settings(&["shift", "meta", "ctrl"], "9")), "Ctrl+Shift+Meta+9");
    }

    #[test]
    fn test_display_label_keeps_unknown_names() {
        assert_eq!(display_label(&settings(&["hyper", "alt"], "q")), "Alt+hyper+Q");
    }
}

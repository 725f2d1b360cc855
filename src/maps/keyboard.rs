//! Keyboard key values.
//!
//! Canonical key values are the host's logical key names, lower-cased: `"a"`, `"7"`, `" "`,
//! `"arrowup"`, `"escape"`, `"f5"`. Any single printable ASCII character is a key value on
//! its own. Named keys additionally accept a few common aliases (`"space"`, `"up"`, `"esc"`).

use crate::error::{Error, Result};

/// Named key values and their display labels.
const NAMED_KEYS: &[(&str, &str)] = &[
    (" ", "Space"),
    ("arrowup", "↑"),
    ("arrowleft", "←"),
    ("arrowdown", "↓"),
    ("arrowright", "→"),
    ("enter", "Enter"),
    ("escape", "Escape"),
    ("tab", "Tab"),
    ("backspace", "Backspace"),
    ("delete", "Delete"),
    ("insert", "Insert"),
    ("home", "Home"),
    ("end", "End"),
    ("pageup", "Page Up"),
    ("pagedown", "Page Down"),
    ("shift", "Shift"),
    ("control", "Ctrl"),
    ("alt", "Alt"),
    ("meta", "Meta"),
    ("capslock", "Caps Lock"),
    ("contextmenu", "Menu"),
    ("f1", "F1"),
    ("f2", "F2"),
    ("f3", "F3"),
    ("f4", "F4"),
    ("f5", "F5"),
    ("f6", "F6"),
    ("f7", "F7"),
    ("f8", "F8"),
    ("f9", "F9"),
    ("f10", "F10"),
    ("f11", "F11"),
    ("f12", "F12"),
];

/// Alternative spellings of named keys.
const KEY_ALIASES: &[(&str, &str)] = &[
    ("space", " "),
    ("spacebar", " "),
    ("up", "arrowup"),
    ("left", "arrowleft"),
    ("down", "arrowdown"),
    ("right", "arrowright"),
    ("return", "enter"),
    ("esc", "escape"),
    ("del", "delete"),
    ("ins", "insert"),
    ("pgup", "pageup"),
    ("pgdn", "pagedown"),
    ("ctrl", "control"),
    ("option", "alt"),
    ("cmd", "meta"),
    ("command", "meta"),
    ("super", "meta"),
    ("win", "meta"),
    ("menu", "contextmenu"),
];

/// Lower-cases a host key value the way trackers store it.
#[inline]
pub fn normalize_key(key: &str) -> String {
    key.to_lowercase()
}

fn is_key_value(value: &str) -> bool {
    NAMED_KEYS.iter().any(|(name, _)| *name == value) || single_printable(value).is_some()
}

fn single_printable(value: &str) -> Option<char> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_graphic() => Some(c),
        _ => None,
    }
}

/// Resolves a key name or alias to its canonical (lower-cased) key value.
pub fn find_key_value(key: &str) -> Result<String> {
    let normalized = normalize_key(key);
    if is_key_value(&normalized) {
        return Ok(normalized);
    }

    KEY_ALIASES
        .iter()
        .find(|(alias, _)| *alias == normalized)
        .map(|(_, value)| value.to_string())
        .ok_or_else(|| Error::UnknownKey(key.to_string()))
}

/// Display label of a canonical key value.
pub fn key_label(value: &str) -> String {
    if let Some((_, label)) = NAMED_KEYS.iter().find(|(name, _)| *name == value) {
        return label.to_string();
    }
    match single_printable(value) {
        Some(c) => c.to_ascii_uppercase().to_string(),
        None => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_are_case_insensitive() {
        assert_eq!(find_key_value("W").unwrap(), "w");
        assert_eq!(find_key_value("w").unwrap(), "w");
        assert_eq!(find_key_value("ArrowUp").unwrap(), "arrowup");
    }

    #[test]
    fn aliases_resolve_to_canonical_values() {
        assert_eq!(find_key_value("Space").unwrap(), " ");
        assert_eq!(find_key_value(" ").unwrap(), " ");
        assert_eq!(find_key_value("up").unwrap(), "arrowup");
        assert_eq!(find_key_value("Esc").unwrap(), "escape");
        assert_eq!(find_key_value("ctrl").unwrap(), "control");
    }

    #[test]
    fn unknown_keys_fail() {
        assert_eq!(
            find_key_value("Hyper").unwrap_err().to_string(),
            "There is no key called \"Hyper\"!"
        );
        assert!(find_key_value("").is_err());
    }

    #[test]
    fn labels() {
        assert_eq!(key_label("w"), "W");
        assert_eq!(key_label(" "), "Space");
        assert_eq!(key_label("arrowleft"), "←");
        assert_eq!(key_label("f11"), "F11");
        assert_eq!(key_label(","), ",");
    }
}

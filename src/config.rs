//! Tracker presets.
//!
//! [`Settings`] holds the named presets the trackers resolve at bind time: directional key
//! templates for the keyboard, stick layouts and the accepted device mapping for the
//! gamepad. `Settings::default()` is the built-in set (`arrows`, `wasd`, `left`, `right`,
//! `"standard"`). Sections a file omits keep their defaults. Listed templates and sticks
//! are added to the built-in ones, replacing a preset of the same name, e.g.
//!
//! ```toml
//! [keyboard.directional_templates.ijkl]
//! label = "IJKL"
//! keys = ["I", "J", "K", "L"]
//!
//! [gamepad.sticks.dpad_axes]
//! label = "Hat"
//! x_axis = 4
//! y_axis = 5
//! ```
//!
//! Template names are matched case-insensitively, so two names differing only in case are
//! rejected.

use crate::error::{ConfigError, Error};
use crate::gamepad::GamepadStick;
use crate::maps::keyboard::find_key_value;
use crate::snapshot::STANDARD_MAPPING;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// Four keys in `[up, left, down, right]` order plus a display label.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectionalTemplate {
    pub label: String,
    pub keys: Vec<String>,
}

impl DirectionalTemplate {
    pub fn new(label: &str, keys: [&str; 4]) -> Self {
        Self {
            label: label.to_string(),
            keys: keys.iter().map(|k| k.to_string()).collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyboardSettings {
    #[serde(deserialize_with = "templates_over_defaults")]
    pub directional_templates: BTreeMap<String, DirectionalTemplate>,
}

impl Default for KeyboardSettings {
    fn default() -> Self {
        let mut directional_templates = BTreeMap::new();
        directional_templates.insert(
            "arrows".to_string(),
            DirectionalTemplate::new("Arrow keys", ["ArrowUp", "ArrowLeft", "ArrowDown", "ArrowRight"]),
        );
        directional_templates.insert(
            "wasd".to_string(),
            DirectionalTemplate::new("WASD", ["W", "A", "S", "D"]),
        );
        Self {
            directional_templates,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GamepadSettings {
    /// Devices reporting any other `mapping` are ignored on connect.
    pub required_mapping: String,
    #[serde(deserialize_with = "sticks_over_defaults")]
    pub sticks: BTreeMap<String, GamepadStick>,
}

impl Default for GamepadSettings {
    fn default() -> Self {
        let mut sticks = BTreeMap::new();
        sticks.insert("left".to_string(), GamepadStick::new("Left stick", 0, 1));
        sticks.insert("right".to_string(), GamepadStick::new("Right stick", 2, 3));
        Self {
            required_mapping: STANDARD_MAPPING.to_string(),
            sticks,
        }
    }
}

fn templates_over_defaults<'de, D>(
    deserializer: D,
) -> Result<BTreeMap<String, DirectionalTemplate>, D::Error>
where
    D: Deserializer<'de>,
{
    let listed = BTreeMap::<String, DirectionalTemplate>::deserialize(deserializer)?;
    let mut templates = KeyboardSettings::default().directional_templates;
    templates.retain(|preset, _| {
        !listed
            .keys()
            .any(|name| name.eq_ignore_ascii_case(preset))
    });
    templates.extend(listed);
    Ok(templates)
}

fn sticks_over_defaults<'de, D>(deserializer: D) -> Result<BTreeMap<String, GamepadStick>, D::Error>
where
    D: Deserializer<'de>,
{
    let mut sticks = GamepadSettings::default().sticks;
    sticks.extend(BTreeMap::<String, GamepadStick>::deserialize(deserializer)?);
    Ok(sticks)
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub keyboard: KeyboardSettings,
    pub gamepad: GamepadSettings,
}

impl Settings {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let settings: Settings = toml::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Loads a `.toml` or `.json` settings file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_str(&text),
            Some("json") => Self::from_json_str(&text),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Checks template names, arity and key names.
    pub fn validate(&self) -> Result<(), Error> {
        let mut names = BTreeSet::new();
        for (name, template) in &self.keyboard.directional_templates {
            if !names.insert(name.to_lowercase()) {
                return Err(Error::DuplicateTemplate(name.clone()));
            }
            if template.keys.len() != 4 {
                return Err(Error::TemplateArity);
            }
            for key in &template.keys {
                find_key_value(key)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_carry_builtin_presets() {
        let settings = Settings::default();
        assert_eq!(settings.gamepad.required_mapping, "standard");
        assert_eq!(settings.gamepad.sticks["right"], GamepadStick::new("Right stick", 2, 3));
        assert_eq!(settings.keyboard.directional_templates["wasd"].label, "WASD");
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn listed_presets_extend_the_builtin_ones() {
        let settings = Settings::from_toml_str(
            r#"
            [keyboard.directional_templates.ijkl]
            label = "IJKL"
            keys = ["I", "J", "K", "L"]

            [gamepad.sticks.hat]
            label = "Hat"
            x_axis = 4
            y_axis = 5
            "#,
        )
        .unwrap();

        let templates = &settings.keyboard.directional_templates;
        assert!(templates.contains_key("ijkl"));
        assert_eq!(templates["wasd"].label, "WASD");
        assert_eq!(templates["arrows"].label, "Arrow keys");

        let sticks = &settings.gamepad.sticks;
        assert_eq!(sticks["hat"], GamepadStick::new("Hat", 4, 5));
        assert_eq!(sticks["left"], GamepadStick::new("Left stick", 0, 1));
        assert_eq!(settings.gamepad.required_mapping, "standard");
    }

    #[test]
    fn listed_preset_overrides_builtin_of_same_name() {
        let settings = Settings::from_toml_str(
            r#"
            [keyboard.directional_templates.WASD]
            label = "ZQSD"
            keys = ["Z", "Q", "S", "D"]

            [gamepad.sticks.left]
            label = "Left"
            x_axis = 1
            y_axis = 0
            "#,
        )
        .unwrap();

        let templates = &settings.keyboard.directional_templates;
        assert_eq!(templates.len(), 2);
        assert_eq!(templates["WASD"].label, "ZQSD");
        assert!(!templates.contains_key("wasd"));
        assert_eq!(settings.gamepad.sticks["left"], GamepadStick::new("Left", 1, 0));
    }

    #[test]
    fn rejects_names_differing_only_in_case() {
        let err = Settings::from_toml_str(
            r#"
            [keyboard.directional_templates.ijkl]
            label = "IJKL"
            keys = ["I", "J", "K", "L"]

            [keyboard.directional_templates.IJKL]
            label = "Other"
            keys = ["I", "J", "K", "L"]
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(Error::DuplicateTemplate(_))));

        let mut settings = Settings::default();
        settings
            .keyboard
            .directional_templates
            .insert("Arrows".to_string(), DirectionalTemplate::new("Arrows", ["W", "A", "S", "D"]));
        assert_eq!(
            settings.validate(),
            Err(Error::DuplicateTemplate("arrows".to_string()))
        );
    }

    #[test]
    fn json_sticks() {
        let settings = Settings::from_json_str(
            r#"{ "gamepad": { "required_mapping": "xr-standard",
                 "sticks": { "hat": { "label": "Hat", "x_axis": 4, "y_axis": 5 } } } }"#,
        )
        .unwrap();

        assert_eq!(settings.gamepad.required_mapping, "xr-standard");
        assert_eq!(settings.gamepad.sticks["hat"].y_axis, 5);
    }

    #[test]
    fn rejects_bad_templates() {
        let err = Settings::from_toml_str(
            r#"
            [keyboard.directional_templates.short]
            label = "Short"
            keys = ["W", "A", "S"]
            "#,
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Directional key templates have to consist of four keys!"
        );

        let err = Settings::from_toml_str(
            r#"
            [keyboard.directional_templates.odd]
            label = "Odd"
            keys = ["W", "A", "S", "Hyper"]
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(Error::UnknownKey(_))));
    }

    #[test]
    fn malformed_input_is_a_parse_error() {
        assert!(matches!(
            Settings::from_toml_str("keyboard = 3"),
            Err(ConfigError::Toml(_))
        ));
        assert!(matches!(
            Settings::from_json_str("{"),
            Err(ConfigError::Json(_))
        ));
    }
}

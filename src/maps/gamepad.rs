//! Standard-mapping gamepad buttons.
//!
//! Indices follow the standard gamepad layout: face buttons `0..=3` (A, B, X, Y), bumpers
//! `4`/`5`, triggers `6`/`7`, Select `8`, Start `9`, stick clicks `10`/`11`, D-pad
//! `12..=15` (Up, Down, Left, Right) and Home `16`.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Buttons of the standard gamepad layout, in index order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamepadButton {
    A,
    B,
    X,
    Y,
    LeftBumper,
    RightBumper,
    LeftTrigger,
    RightTrigger,
    Select,
    Start,
    LeftStick,
    RightStick,
    DPadUp,
    DPadDown,
    DPadLeft,
    DPadRight,
    Home,
}

impl GamepadButton {
    pub const ALL: [GamepadButton; 17] = [
        GamepadButton::A,
        GamepadButton::B,
        GamepadButton::X,
        GamepadButton::Y,
        GamepadButton::LeftBumper,
        GamepadButton::RightBumper,
        GamepadButton::LeftTrigger,
        GamepadButton::RightTrigger,
        GamepadButton::Select,
        GamepadButton::Start,
        GamepadButton::LeftStick,
        GamepadButton::RightStick,
        GamepadButton::DPadUp,
        GamepadButton::DPadDown,
        GamepadButton::DPadLeft,
        GamepadButton::DPadRight,
        GamepadButton::Home,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            GamepadButton::A => "A",
            GamepadButton::B => "B",
            GamepadButton::X => "X",
            GamepadButton::Y => "Y",
            GamepadButton::LeftBumper => "LB",
            GamepadButton::RightBumper => "RB",
            GamepadButton::LeftTrigger => "LT",
            GamepadButton::RightTrigger => "RT",
            GamepadButton::Select => "Select",
            GamepadButton::Start => "Start",
            GamepadButton::LeftStick => "LS",
            GamepadButton::RightStick => "RS",
            GamepadButton::DPadUp => "D-pad up",
            GamepadButton::DPadDown => "D-pad down",
            GamepadButton::DPadLeft => "D-pad left",
            GamepadButton::DPadRight => "D-pad right",
            GamepadButton::Home => "Home",
        }
    }
}

/// Lower-case names accepted by [`find_button_number`].
const BUTTON_ALIASES: &[(&str, GamepadButton)] = &[
    ("a", GamepadButton::A),
    ("cross", GamepadButton::A),
    ("b", GamepadButton::B),
    ("circle", GamepadButton::B),
    ("x", GamepadButton::X),
    ("square", GamepadButton::X),
    ("y", GamepadButton::Y),
    ("triangle", GamepadButton::Y),
    ("lb", GamepadButton::LeftBumper),
    ("l1", GamepadButton::LeftBumper),
    ("leftbumper", GamepadButton::LeftBumper),
    ("rb", GamepadButton::RightBumper),
    ("r1", GamepadButton::RightBumper),
    ("rightbumper", GamepadButton::RightBumper),
    ("lt", GamepadButton::LeftTrigger),
    ("l2", GamepadButton::LeftTrigger),
    ("lefttrigger", GamepadButton::LeftTrigger),
    ("rt", GamepadButton::RightTrigger),
    ("r2", GamepadButton::RightTrigger),
    ("righttrigger", GamepadButton::RightTrigger),
    ("select", GamepadButton::Select),
    ("back", GamepadButton::Select),
    ("share", GamepadButton::Select),
    ("start", GamepadButton::Start),
    ("options", GamepadButton::Start),
    ("menu", GamepadButton::Start),
    ("ls", GamepadButton::LeftStick),
    ("l3", GamepadButton::LeftStick),
    ("leftstick", GamepadButton::LeftStick),
    ("rs", GamepadButton::RightStick),
    ("r3", GamepadButton::RightStick),
    ("rightstick", GamepadButton::RightStick),
    ("up", GamepadButton::DPadUp),
    ("dpadup", GamepadButton::DPadUp),
    ("down", GamepadButton::DPadDown),
    ("dpaddown", GamepadButton::DPadDown),
    ("left", GamepadButton::DPadLeft),
    ("dpadleft", GamepadButton::DPadLeft),
    ("right", GamepadButton::DPadRight),
    ("dpadright", GamepadButton::DPadRight),
    ("home", GamepadButton::Home),
    ("guide", GamepadButton::Home),
];

/// How a caller names a gamepad button.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonId<'a> {
    /// `"*"`: any button.
    Any,
    Index(usize),
    Button(GamepadButton),
    Name(&'a str),
}

impl<'a> From<&'a str> for ButtonId<'a> {
    fn from(name: &'a str) -> Self {
        if name == "*" {
            ButtonId::Any
        } else {
            ButtonId::Name(name)
        }
    }
}

impl From<usize> for ButtonId<'_> {
    fn from(index: usize) -> Self {
        ButtonId::Index(index)
    }
}

impl From<GamepadButton> for ButtonId<'_> {
    fn from(button: GamepadButton) -> Self {
        ButtonId::Button(button)
    }
}

/// Resolves a button name or index to its index. Indices pass through unchanged.
///
/// [`ButtonId::Any`] has no single index and resolves like the unknown name `"*"`.
pub fn find_button_number(button: ButtonId<'_>) -> Result<usize> {
    match button {
        ButtonId::Index(index) => Ok(index),
        ButtonId::Button(button) => Ok(button.index()),
        ButtonId::Any => Err(Error::UnknownGamepadButton("*".to_string())),
        ButtonId::Name(name) => {
            let lowered = name.to_lowercase();
            BUTTON_ALIASES
                .iter()
                .find(|(alias, _)| *alias == lowered)
                .map(|(_, button)| button.index())
                .ok_or_else(|| Error::UnknownGamepadButton(name.to_string()))
        }
    }
}

/// Display label of a button index.
pub fn button_label(index: usize) -> String {
    match GamepadButton::from_index(index) {
        Some(button) => button.label().to_string(),
        None => format!("Button {index}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_pass_through() {
        assert_eq!(find_button_number(0usize.into()).unwrap(), 0);
        assert_eq!(find_button_number(42usize.into()).unwrap(), 42);
    }

    #[test]
    fn aliases_resolve() {
        assert_eq!(find_button_number("B".into()).unwrap(), 1);
        assert_eq!(find_button_number("circle".into()).unwrap(), 1);
        assert_eq!(find_button_number("Start".into()).unwrap(), 9);
        assert_eq!(find_button_number(GamepadButton::Home.into()).unwrap(), 16);
    }

    #[test]
    fn unknown_aliases_fail() {
        assert_eq!(
            find_button_number("NonExistentButton".into())
                .unwrap_err()
                .to_string(),
            "There is no gamepad button called \"NonExistentButton\"!"
        );
    }

    #[test]
    fn index_order_matches_layout() {
        for (index, button) in GamepadButton::ALL.iter().enumerate() {
            assert_eq!(button.index(), index);
            assert_eq!(GamepadButton::from_index(index), Some(*button));
        }
        assert_eq!(button_label(1), "B");
        assert_eq!(button_label(20), "Button 20");
    }
}

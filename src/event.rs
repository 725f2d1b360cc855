//! Raw device events delivered by host event sources.
//!
//! Trackers subscribe to these through [`EventTarget`](crate::device::EventTarget) and fold
//! them into their own state. The payloads carry only what the trackers read.
//!
//! ## Value conventions
//! - **Keys:** `key` is the host's logical key value (`"a"`, `"A"`, `"ArrowUp"`, `" "`).
//!   Trackers lower-case it before use.
//! - **Mouse buttons:** `0` = left, `1` = middle, `2` = right. Higher indices are tracked but
//!   cannot be bound by name.
//! - **Pointer motion / wheel:** raw host units, accumulated until read.

use crate::snapshot::GamepadSnapshot;
use std::fmt;

/// Event types a tracker can subscribe to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventType {
    KeyDown,
    KeyUp,
    MouseDown,
    MouseUp,
    MouseMove,
    Wheel,
    GamepadConnected,
    GamepadDisconnected,
}

impl EventType {
    /// Host-facing event name (`"keydown"`, `"gamepadconnected"`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            EventType::KeyDown => "keydown",
            EventType::KeyUp => "keyup",
            EventType::MouseDown => "mousedown",
            EventType::MouseUp => "mouseup",
            EventType::MouseMove => "mousemove",
            EventType::Wheel => "wheel",
            EventType::GamepadConnected => "gamepadconnected",
            EventType::GamepadDisconnected => "gamepaddisconnected",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload of `keydown` / `keyup`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyboardEvent {
    pub key: String,
}

impl KeyboardEvent {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

/// Payload of `mousedown`, `mouseup`, `mousemove` and `wheel`.
///
/// Fields that do not apply to an event type are zero.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MouseEvent {
    pub button: u16,
    pub movement_x: f64,
    pub movement_y: f64,
    pub delta_y: f64,
}

impl MouseEvent {
    pub fn button(button: u16) -> Self {
        Self {
            button,
            ..Self::default()
        }
    }

    pub fn movement(movement_x: f64, movement_y: f64) -> Self {
        Self {
            movement_x,
            movement_y,
            ..Self::default()
        }
    }

    pub fn wheel(delta_y: f64) -> Self {
        Self {
            delta_y,
            ..Self::default()
        }
    }
}

/// Payload of `gamepadconnected` / `gamepaddisconnected`.
#[derive(Clone, Debug)]
pub struct GamepadEvent {
    pub gamepad: GamepadSnapshot,
}

impl From<GamepadSnapshot> for GamepadEvent {
    fn from(gamepad: GamepadSnapshot) -> Self {
        Self { gamepad }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_names_match_host_names() {
        assert_eq!(EventType::KeyDown.as_str(), "keydown");
        assert_eq!(EventType::Wheel.to_string(), "wheel");
        assert_eq!(
            EventType::GamepadDisconnected.to_string(),
            "gamepaddisconnected"
        );
    }

    #[test]
    fn mouse_constructors_zero_unused_fields() {
        let ev = MouseEvent::movement(5.0, -3.0);
        assert_eq!(ev.button, 0);
        assert_eq!(ev.delta_y, 0.0);
        assert_eq!(MouseEvent::wheel(120.0).delta_y, 120.0);
        assert_eq!(MouseEvent::button(2).button, 2);
    }
}

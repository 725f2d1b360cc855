//! Polled gamepad state.
//!
//! [`GamepadSnapshot`] is an **owned** copy of one gamepad slot as reported by the
//! [`Navigator`](crate::device::Navigator) at poll time. It does not update itself; the
//! gamepad tracker polls a fresh one on every query.
//!
//! # Conventions
//! - `buttons` and `axes` use the host's standard-mapping indices
//!   (see [`GamepadButton`](crate::maps::gamepad::GamepadButton)).
//! - `timestamp` is the device clock of the last state change; it only moves forward.
//! - `mapping` is `"standard"` for devices the tracker accepts by default.

use crate::device::VibrationActuator;
use serde::{Deserialize, Serialize};
use std::rc::Rc;
use std::time::Duration;

/// The `mapping` value of devices laid out in the standard gamepad layout.
pub const STANDARD_MAPPING: &str = "standard";

/// The actuator kind the tracker drives.
pub const DUAL_RUMBLE: &str = "dual-rumble";

/// One button of a [`GamepadSnapshot`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ButtonState {
    pub pressed: bool,
    /// Analog travel in `[0, 1]` (triggers); digital buttons report `0` or `1`.
    pub value: f64,
}

impl ButtonState {
    pub fn pressed() -> Self {
        Self {
            pressed: true,
            value: 1.0,
        }
    }

    pub fn released() -> Self {
        Self::default()
    }
}

/// State of one gamepad slot at a point in time.
#[derive(Clone, Debug)]
pub struct GamepadSnapshot {
    pub index: usize,
    pub buttons: Vec<ButtonState>,
    pub axes: Vec<f64>,
    pub connected: bool,
    pub timestamp: f64,
    pub mapping: String,
    pub vibration_actuator: Option<Rc<dyn VibrationActuator>>,
}

impl GamepadSnapshot {
    /// A connected standard-mapping gamepad with no buttons or axes.
    pub fn new(index: usize) -> Self {
        Self {
            index,
            buttons: Vec::new(),
            axes: Vec::new(),
            connected: true,
            timestamp: 0.0,
            mapping: STANDARD_MAPPING.to_string(),
            vibration_actuator: None,
        }
    }

    /// `false` for indices the device does not report.
    #[inline]
    pub fn is_pressed(&self, button: usize) -> bool {
        self.buttons.get(button).is_some_and(|b| b.pressed)
    }

    #[inline]
    pub fn any_pressed(&self) -> bool {
        self.buttons.iter().any(|b| b.pressed)
    }

    /// `0.0` for indices the device does not report.
    #[inline]
    pub fn axis(&self, axis: usize) -> f64 {
        self.axes.get(axis).copied().unwrap_or(0.0)
    }
}

/// Parameters forwarded to [`VibrationActuator::play_effect`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EffectParams {
    pub duration: Duration,
    pub weak_magnitude: Option<f64>,
    pub strong_magnitude: Option<f64>,
}

/// Completion signal of a vibration effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectResult {
    Complete,
    Preempted,
}

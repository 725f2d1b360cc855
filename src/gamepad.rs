//! Gamepad tracker.
//!
//! Only one gamepad is tracked at a time. The tracker follows `gamepadconnected` /
//! `gamepaddisconnected` on a window-like [`EventTarget`]:
//!
//! ```text
//! Disconnected ──connect (accepted mapping)──► Connected(index)
//! Connected(index) ──disconnect (same index)──► Disconnected
//! ```
//!
//! Connects while already connected, connects of devices with another mapping, and
//! disconnects of other indices are ignored.
//!
//! Gamepad state is poll-based, so every live query re-reads the slot from the
//! [`Navigator`]. When the polled `timestamp` is newer than the last one seen, the device
//! has done something since the previous poll and the preference flips to the gamepad.

use crate::config::GamepadSettings;
use crate::control::{Control, TriggerControl};
use crate::device::{EventTarget, Navigator};
use crate::error::{Error, Result};
use crate::event::{EventType, GamepadEvent};
use crate::maps::gamepad::{button_label, find_button_number, ButtonId};
use crate::math::Vector2;
use crate::snapshot::{EffectParams, EffectResult, GamepadSnapshot, DUAL_RUMBLE};
use crate::store::PreferenceStore;
use futures::future::{self, FutureExt, LocalBoxFuture};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::{BTreeMap, HashSet};
use std::rc::Rc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// A pair of axes read as one 2D stick.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GamepadStick {
    pub label: String,
    pub x_axis: usize,
    pub y_axis: usize,
}

impl GamepadStick {
    pub fn new(label: impl Into<String>, x_axis: usize, y_axis: usize) -> Self {
        Self {
            label: label.into(),
            x_axis,
            y_axis,
        }
    }
}

/// How a caller names a stick: a preset name (`"left"`, `"right"`) or explicit axes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StickId<'a> {
    Named(&'a str),
    Custom(GamepadStick),
}

impl<'a> From<&'a str> for StickId<'a> {
    fn from(name: &'a str) -> Self {
        StickId::Named(name)
    }
}

impl From<GamepadStick> for StickId<'_> {
    fn from(stick: GamepadStick) -> Self {
        StickId::Custom(stick)
    }
}

/// Rumble strengths in `[0, 1]`. Unset magnitudes are left to the actuator.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct VibrationOptions {
    pub weak_magnitude: Option<f64>,
    pub strong_magnitude: Option<f64>,
}

/// Connection state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Connection {
    Disconnected,
    Connected(usize),
}

struct GamepadState {
    connection: Connection,
    /// Device clock of the freshest poll seen.
    timestamp: f64,
    /// Buttons whose press has already been reported by a trigger query.
    pressed_buttons: HashSet<usize>,
}

struct Shared {
    navigator: Rc<dyn Navigator>,
    store: PreferenceStore,
    state: RefCell<GamepadState>,
}

impl Shared {
    /// A tracked index whose slot has gone stale no longer blocks a new gamepad.
    fn connect(&self, gamepad: &GamepadSnapshot, required_mapping: &str) {
        if let Some(active) = self.poll() {
            debug!(active = active.index, ignored = gamepad.index, "gamepad already connected");
            return;
        }
        if gamepad.mapping != required_mapping {
            warn!(index = gamepad.index, mapping = %gamepad.mapping, "ignoring gamepad with unsupported mapping");
            return;
        }

        info!(index = gamepad.index, "gamepad connected");
        self.state.borrow_mut().connection = Connection::Connected(gamepad.index);
        self.store.set_prefer_gamepad(true);
    }

    fn disconnect(&self, gamepad: &GamepadSnapshot) {
        let mut state = self.state.borrow_mut();
        if state.connection != Connection::Connected(gamepad.index) {
            return;
        }

        info!(index = gamepad.index, "gamepad disconnected");
        state.connection = Connection::Disconnected;
        self.store.set_prefer_gamepad(false);
    }

    /// Polls the tracked slot and reconciles the preference against its timestamp.
    ///
    /// `None` when no gamepad is tracked, its slot is empty, or it reports disconnected.
    fn poll(&self) -> Option<GamepadSnapshot> {
        let Connection::Connected(index) = self.state.borrow().connection else {
            return None;
        };
        let snapshot = self.navigator.get_gamepads().into_iter().nth(index).flatten()?;

        let mut state = self.state.borrow_mut();
        if snapshot.timestamp > state.timestamp {
            state.timestamp = snapshot.timestamp;
            self.store.set_prefer_gamepad(true);
        }
        drop(state);

        snapshot.connected.then_some(snapshot)
    }
}

/// Gamepad input tracker. Cloning shares state.
#[derive(Clone)]
pub struct Gamepad {
    shared: Rc<Shared>,
    sticks: Rc<BTreeMap<String, GamepadStick>>,
}

impl Gamepad {
    /// Subscribes to gamepad connection events on `window` and polls `navigator`.
    pub fn new<W>(
        window: &W,
        navigator: Rc<dyn Navigator>,
        store: PreferenceStore,
        settings: &GamepadSettings,
    ) -> Self
    where
        W: EventTarget<GamepadEvent> + ?Sized,
    {
        let shared = Rc::new(Shared {
            navigator,
            store,
            state: RefCell::new(GamepadState {
                connection: Connection::Disconnected,
                timestamp: 0.0,
                pressed_buttons: HashSet::new(),
            }),
        });

        let on_connect = Rc::clone(&shared);
        let required_mapping = settings.required_mapping.clone();
        window.add_event_listener(
            EventType::GamepadConnected,
            Box::new(move |event: &GamepadEvent| on_connect.connect(&event.gamepad, &required_mapping)),
        );

        let on_disconnect = Rc::clone(&shared);
        window.add_event_listener(
            EventType::GamepadDisconnected,
            Box::new(move |event: &GamepadEvent| on_disconnect.disconnect(&event.gamepad)),
        );

        Self {
            shared,
            sticks: Rc::new(settings.sticks.clone()),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.shared.poll().is_some()
    }

    /// Index of the tracked gamepad, if any.
    pub fn index(&self) -> Option<usize> {
        match self.shared.state.borrow().connection {
            Connection::Connected(index) => Some(index),
            Connection::Disconnected => None,
        }
    }

    /// A single button, or any button for [`ButtonId::Any`] (`"*"`).
    ///
    /// Triggers fire once per press. The any-button trigger treats "some button held" as
    /// one press: it fires when nothing had been reported yet and re-arms only once every
    /// button is released.
    pub fn button<'a>(&self, button: impl Into<ButtonId<'a>>) -> Result<TriggerControl<bool>> {
        match button.into() {
            ButtonId::Any => Ok(self.any_button()),
            id => {
                let number = find_button_number(id)?;
                Ok(self.single_button(number))
            }
        }
    }

    fn any_button(&self) -> TriggerControl<bool> {
        let level = Rc::clone(&self.shared);
        let edge = Rc::clone(&self.shared);

        TriggerControl::new(
            Control::new("Any button", move || {
                level.poll().is_some_and(|pad| pad.any_pressed())
            })
            .from_gamepad(),
            Control::new("Any button", move || {
                let Some(pad) = edge.poll() else {
                    return false;
                };
                let mut state = edge.state.borrow_mut();
                if !pad.any_pressed() {
                    state.pressed_buttons.clear();
                    return false;
                }
                if !state.pressed_buttons.is_empty() {
                    return false;
                }
                state.pressed_buttons.extend(
                    pad.buttons
                        .iter()
                        .enumerate()
                        .filter(|(_, b)| b.pressed)
                        .map(|(index, _)| index),
                );
                true
            })
            .from_gamepad(),
        )
    }

    fn single_button(&self, number: usize) -> TriggerControl<bool> {
        let label = button_label(number);
        let level = Rc::clone(&self.shared);
        let edge = Rc::clone(&self.shared);

        TriggerControl::new(
            Control::new(label.clone(), move || {
                level.poll().is_some_and(|pad| pad.is_pressed(number))
            })
            .from_gamepad(),
            Control::new(label, move || {
                let Some(pad) = edge.poll() else {
                    return false;
                };
                let mut state = edge.state.borrow_mut();
                if pad.is_pressed(number) {
                    state.pressed_buttons.insert(number)
                } else {
                    state.pressed_buttons.remove(&number);
                    false
                }
            })
            .from_gamepad(),
        )
    }

    /// Two axes as a vector; zero while disconnected.
    pub fn stick<'a>(&self, stick: impl Into<StickId<'a>>) -> Result<Control<Vector2>> {
        let stick = match stick.into() {
            StickId::Named(name) => self
                .sticks
                .get(name)
                .cloned()
                .ok_or_else(|| Error::UnknownStick(name.to_string()))?,
            StickId::Custom(stick) => stick,
        };

        let shared = Rc::clone(&self.shared);
        let GamepadStick {
            label,
            x_axis,
            y_axis,
        } = stick;
        Ok(Control::new(label, move || match shared.poll() {
            Some(pad) => Vector2::new(pad.axis(x_axis), pad.axis(y_axis)),
            None => Vector2::ZERO,
        }))
    }

    /// Plays a dual-rumble effect on the tracked gamepad.
    ///
    /// The effect starts before this returns; awaiting the future only waits for it to end.
    /// Resolves to `None` immediately when no gamepad is connected or it has no dual-rumble
    /// actuator.
    pub fn vibrate(
        &self,
        duration: Duration,
        options: VibrationOptions,
    ) -> LocalBoxFuture<'static, Option<EffectResult>> {
        let actuator = self
            .shared
            .poll()
            .and_then(|pad| pad.vibration_actuator)
            .filter(|actuator| actuator.actuator_type() == DUAL_RUMBLE);
        let Some(actuator) = actuator else {
            return future::ready(None).boxed_local();
        };

        let params = EffectParams {
            duration,
            weak_magnitude: options.weak_magnitude,
            strong_magnitude: options.strong_magnitude,
        };
        debug!(?params, "playing vibration effect");
        actuator.play_effect(DUAL_RUMBLE, params).map(Some).boxed_local()
    }
}

//! In-memory collaborators.
//!
//! These stand in for the platform objects the trackers are built against: a document that
//! emits key events and owns the pointer lock, a canvas that emits mouse events, a window
//! that announces gamepads, and a navigator whose slots the caller edits directly. Hosts
//! that translate events from their own windowing layer can use them as the glue; tests
//! use them to script input.

use crate::device::{EventTarget, Listener, Navigator, PointerLockHost, PointerLockTarget, VibrationActuator};
use crate::event::{EventType, GamepadEvent, KeyboardEvent, MouseEvent};
use crate::eventbus::EventBus;
use crate::snapshot::{EffectParams, EffectResult, GamepadSnapshot};
use futures::future::{self, FutureExt, LocalBoxFuture};
use std::cell::RefCell;
use std::rc::Rc;

/// Document stand-in: keyboard events and the pointer-lock element.
#[derive(Default)]
pub struct VirtualDocument {
    keyboard: EventBus<KeyboardEvent>,
    lock_element: RefCell<Option<String>>,
}

impl VirtualDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keyboard_events(&self) -> &EventBus<KeyboardEvent> {
        &self.keyboard
    }

    pub fn press(&self, key: &str) {
        self.keyboard.emit(EventType::KeyDown, &KeyboardEvent::new(key));
    }

    pub fn release(&self, key: &str) {
        self.keyboard.emit(EventType::KeyUp, &KeyboardEvent::new(key));
    }

    /// Overrides the element holding the pointer lock.
    pub fn lock_element(&self, id: Option<&str>) {
        *self.lock_element.borrow_mut() = id.map(str::to_string);
    }
}

impl EventTarget<KeyboardEvent> for VirtualDocument {
    fn add_event_listener(&self, event_type: EventType, listener: Listener<KeyboardEvent>) {
        self.keyboard.add_event_listener(event_type, listener);
    }
}

impl PointerLockHost for VirtualDocument {
    fn exit_pointer_lock(&self) {
        self.lock_element(None);
    }

    fn pointer_lock_element(&self) -> Option<String> {
        self.lock_element.borrow().clone()
    }
}

/// Canvas stand-in. Pointer-lock requests are granted through its document.
pub struct VirtualCanvas {
    id: String,
    document: Rc<VirtualDocument>,
    mouse: EventBus<MouseEvent>,
}

impl VirtualCanvas {
    pub fn new(id: &str, document: Rc<VirtualDocument>) -> Self {
        Self {
            id: id.to_string(),
            document,
            mouse: EventBus::new(),
        }
    }

    pub fn mouse_events(&self) -> &EventBus<MouseEvent> {
        &self.mouse
    }

    pub fn press(&self, button: u16) {
        self.mouse.emit(EventType::MouseDown, &MouseEvent::button(button));
    }

    pub fn release(&self, button: u16) {
        self.mouse.emit(EventType::MouseUp, &MouseEvent::button(button));
    }

    pub fn move_by(&self, movement_x: f64, movement_y: f64) {
        self.mouse
            .emit(EventType::MouseMove, &MouseEvent::movement(movement_x, movement_y));
    }

    pub fn scroll(&self, delta_y: f64) {
        self.mouse.emit(EventType::Wheel, &MouseEvent::wheel(delta_y));
    }
}

impl EventTarget<MouseEvent> for VirtualCanvas {
    fn add_event_listener(&self, event_type: EventType, listener: Listener<MouseEvent>) {
        self.mouse.add_event_listener(event_type, listener);
    }
}

impl PointerLockTarget for VirtualCanvas {
    fn id(&self) -> &str {
        &self.id
    }

    fn request_pointer_lock(&self) {
        self.document.lock_element(Some(&self.id));
    }
}

/// Window stand-in: gamepad connection announcements.
#[derive(Default)]
pub struct VirtualWindow {
    gamepads: EventBus<GamepadEvent>,
}

impl VirtualWindow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gamepad_events(&self) -> &EventBus<GamepadEvent> {
        &self.gamepads
    }

    pub fn connect(&self, gamepad: GamepadSnapshot) {
        self.gamepads
            .emit(EventType::GamepadConnected, &GamepadEvent::from(gamepad));
    }

    /// Announces that the gamepad in slot `index` went away.
    pub fn disconnect(&self, index: usize) {
        let mut gamepad = GamepadSnapshot::new(index);
        gamepad.connected = false;
        self.gamepads
            .emit(EventType::GamepadDisconnected, &GamepadEvent::from(gamepad));
    }
}

impl EventTarget<GamepadEvent> for VirtualWindow {
    fn add_event_listener(&self, event_type: EventType, listener: Listener<GamepadEvent>) {
        self.gamepads.add_event_listener(event_type, listener);
    }
}

/// Navigator stand-in with caller-edited gamepad slots.
#[derive(Default)]
pub struct VirtualNavigator {
    slots: RefCell<Vec<Option<GamepadSnapshot>>>,
}

impl VirtualNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Places `gamepad` in the slot named by its index.
    pub fn insert(&self, gamepad: GamepadSnapshot) {
        let mut slots = self.slots.borrow_mut();
        if slots.len() <= gamepad.index {
            slots.resize(gamepad.index + 1, None);
        }
        let index = gamepad.index;
        slots[index] = Some(gamepad);
    }

    pub fn get(&self, index: usize) -> Option<GamepadSnapshot> {
        self.slots.borrow().get(index).cloned().flatten()
    }

    /// Edits an occupied slot in place. Empty slots are left alone.
    pub fn update(&self, index: usize, edit: impl FnOnce(&mut GamepadSnapshot)) {
        if let Some(Some(gamepad)) = self.slots.borrow_mut().get_mut(index) {
            edit(gamepad);
        }
    }

    pub fn remove(&self, index: usize) -> Option<GamepadSnapshot> {
        self.slots.borrow_mut().get_mut(index).and_then(Option::take)
    }
}

impl Navigator for VirtualNavigator {
    fn get_gamepads(&self) -> Vec<Option<GamepadSnapshot>> {
        self.slots.borrow().clone()
    }
}

/// Actuator that records each effect and completes it immediately.
#[derive(Debug)]
pub struct RecordingActuator {
    actuator_type: String,
    calls: RefCell<Vec<(String, EffectParams)>>,
}

impl RecordingActuator {
    pub fn new(actuator_type: &str) -> Self {
        Self {
            actuator_type: actuator_type.to_string(),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// `(kind, params)` of every `play_effect` call so far.
    pub fn calls(&self) -> Vec<(String, EffectParams)> {
        self.calls.borrow().clone()
    }
}

impl VibrationActuator for RecordingActuator {
    fn actuator_type(&self) -> &str {
        &self.actuator_type
    }

    fn play_effect(&self, kind: &str, params: EffectParams) -> LocalBoxFuture<'static, EffectResult> {
        self.calls.borrow_mut().push((kind.to_string(), params));
        future::ready(EffectResult::Complete).boxed_local()
    }
}

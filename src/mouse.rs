//! Mouse tracker.
//!
//! Listens to `mousedown`, `mouseup`, `mousemove` and `wheel` on the canvas. Buttons keep
//! a pressed/queued pair like keys; pointer motion and wheel distance accumulate until a
//! [`pointer`](Mouse::pointer) or [`wheel`](Mouse::wheel) query drains them.

use crate::control::{Control, TriggerControl};
use crate::device::{EventTarget, PointerLockHost, PointerLockTarget};
use crate::error::{Error, Result};
use crate::event::{EventType, MouseEvent};
use crate::math::Vector2;
use crate::store::PreferenceStore;
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;
use tracing::trace;

/// The three bindable mouse buttons, by event button index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left = 0,
    Middle = 1,
    Right = 2,
}

impl MouseButton {
    const NAMES: [&'static str; 3] = ["left", "middle", "right"];
    const LABELS: [&'static str; 3] = ["Left", "Middle", "Right"];

    #[inline]
    pub fn index(self) -> u16 {
        self as u16
    }
}

/// How a caller names a mouse button.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MouseButtonId<'a> {
    Index(u16),
    Name(&'a str),
    Button(MouseButton),
}

impl<'a> From<&'a str> for MouseButtonId<'a> {
    fn from(name: &'a str) -> Self {
        MouseButtonId::Name(name)
    }
}

impl From<u16> for MouseButtonId<'_> {
    fn from(index: u16) -> Self {
        MouseButtonId::Index(index)
    }
}

impl From<MouseButton> for MouseButtonId<'_> {
    fn from(button: MouseButton) -> Self {
        MouseButtonId::Button(button)
    }
}

/// Canvas collaborator: mouse events plus pointer-lock requests.
pub trait Canvas: EventTarget<MouseEvent> + PointerLockTarget {}

impl<T: EventTarget<MouseEvent> + PointerLockTarget + ?Sized> Canvas for T {}

#[derive(Default)]
struct MouseState {
    pressed: HashSet<u16>,
    queued: HashSet<u16>,
    movement: Vector2,
    scroll: f64,
}

/// Mouse input tracker. Cloning shares state.
#[derive(Clone)]
pub struct Mouse {
    canvas: Rc<dyn Canvas>,
    document: Rc<dyn PointerLockHost>,
    state: Rc<RefCell<MouseState>>,
}

impl Mouse {
    pub fn new(canvas: Rc<dyn Canvas>, document: Rc<dyn PointerLockHost>, store: PreferenceStore) -> Self {
        let state = Rc::new(RefCell::new(MouseState::default()));

        let on = |event_type: EventType, apply: fn(&mut MouseState, &MouseEvent)| {
            let state = Rc::clone(&state);
            let store = store.clone();
            canvas.add_event_listener(
                event_type,
                Box::new(move |event: &MouseEvent| {
                    store.set_prefer_gamepad(false);
                    trace!(%event_type, ?event, "mouse event");
                    apply(&mut state.borrow_mut(), event);
                }),
            );
        };

        on(EventType::MouseDown, |state, event| {
            state.pressed.insert(event.button);
            state.queued.insert(event.button);
        });
        on(EventType::MouseUp, |state, event| {
            state.pressed.remove(&event.button);
            state.queued.remove(&event.button);
        });
        on(EventType::MouseMove, |state, event| {
            state.movement += Vector2::new(event.movement_x, event.movement_y);
        });
        on(EventType::Wheel, |state, event| {
            state.scroll += event.delta_y;
        });

        Self {
            canvas,
            document,
            state,
        }
    }

    /// Resolves a button name (`"left"`, `"middle"`, `"right"`) or index to its index.
    pub fn parse_button<'a>(&self, button: impl Into<MouseButtonId<'a>>) -> Result<u16> {
        match button.into() {
            MouseButtonId::Button(button) => Ok(button.index()),
            MouseButtonId::Name(name) => MouseButton::NAMES
                .iter()
                .position(|candidate| *candidate == name)
                .map(|index| index as u16)
                .ok_or_else(|| Error::UnknownMouseButton(name.to_string())),
            MouseButtonId::Index(index) if (index as usize) < MouseButton::NAMES.len() => Ok(index),
            MouseButtonId::Index(index) => Err(Error::MouseButtonIndex(index)),
        }
    }

    pub fn button<'a>(&self, button: impl Into<MouseButtonId<'a>>) -> Result<TriggerControl<bool>> {
        let number = self.parse_button(button)?;
        let label = format!("{} Mouse Button", MouseButton::LABELS[number as usize]);
        let level = Rc::clone(&self.state);
        let edge = Rc::clone(&self.state);

        Ok(TriggerControl::new(
            Control::new(label.clone(), move || level.borrow().pressed.contains(&number)),
            Control::new(label, move || edge.borrow_mut().queued.remove(&number)),
        ))
    }

    /// Pointer movement since the previous query. Each query resets the accumulator.
    pub fn pointer(&self) -> Control<Vector2> {
        let state = Rc::clone(&self.state);
        Control::new("Cursor", move || std::mem::take(&mut state.borrow_mut().movement))
    }

    /// Vertical wheel distance since the previous query. Each query resets the accumulator.
    pub fn wheel(&self) -> Control<f64> {
        let state = Rc::clone(&self.state);
        Control::new("Mouse wheel", move || std::mem::take(&mut state.borrow_mut().scroll))
    }

    pub fn lock_pointer(&self) {
        self.canvas.request_pointer_lock();
    }

    pub fn unlock_pointer(&self) {
        self.document.exit_pointer_lock();
    }

    pub fn is_pointer_locked(&self) -> bool {
        self.document.pointer_lock_element().as_deref() == Some(self.canvas.id())
    }
}

use crate::combinator;
use crate::config::Settings;
use crate::control::{Control, Truthy};
use crate::device::{EventTarget, Navigator, PointerLockHost};
use crate::error::Result;
use crate::event::{GamepadEvent, KeyboardEvent};
use crate::gamepad::Gamepad;
use crate::keyboard::Keyboard;
use crate::mouse::{Canvas, Mouse};
use crate::store::PreferenceStore;
use std::rc::Rc;
use tracing::debug;

/// Document collaborator: key events plus the pointer lock.
pub trait Document: EventTarget<KeyboardEvent> + PointerLockHost {}

impl<T: EventTarget<KeyboardEvent> + PointerLockHost + ?Sized> Document for T {}

/// The three trackers of one session, sharing one [`PreferenceStore`].
pub struct InputManager {
    store: PreferenceStore,
    keyboard: Keyboard,
    mouse: Mouse,
    gamepad: Gamepad,
}

impl InputManager {
    pub fn new<D, C, W>(
        document: Rc<D>,
        canvas: Rc<C>,
        window: &W,
        navigator: Rc<dyn Navigator>,
        settings: &Settings,
    ) -> Self
    where
        D: Document + 'static,
        C: Canvas + 'static,
        W: EventTarget<GamepadEvent> + ?Sized,
    {
        let store = PreferenceStore::new();
        let keyboard = Keyboard::new(&*document, store.clone(), &settings.keyboard);
        let mouse = Mouse::new(canvas, document, store.clone());
        let gamepad = Gamepad::new(window, navigator, store.clone(), &settings.gamepad);
        debug!("input trackers initialized");

        Self {
            store,
            keyboard,
            mouse,
            gamepad,
        }
    }

    pub fn keyboard(&self) -> &Keyboard {
        &self.keyboard
    }

    pub fn mouse(&self) -> &Mouse {
        &self.mouse
    }

    pub fn gamepad(&self) -> &Gamepad {
        &self.gamepad
    }

    pub fn store(&self) -> &PreferenceStore {
        &self.store
    }

    /// [`combinator::or`] bound to this session's preference.
    pub fn or<T>(&self, controls: impl IntoIterator<Item = Control<T>>) -> Result<Control<T>>
    where
        T: Truthy + Default + 'static,
    {
        combinator::or(&self.store, controls)
    }

    /// [`combinator::and`] bound to this session's preference.
    pub fn and<T>(&self, controls: impl IntoIterator<Item = Control<T>>) -> Result<Control<T>>
    where
        T: Truthy + Default + 'static,
    {
        combinator::and(&self.store, controls)
    }
}

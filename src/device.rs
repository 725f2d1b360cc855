//! Capabilities the trackers need from the host.
//!
//! Each tracker is constructed against these traits rather than concrete platform objects,
//! so a windowing backend, a browser bridge, or the in-memory
//! [`virtual_input`](crate::backends::virtual_input) collaborators can all drive it.

use crate::event::EventType;
use crate::snapshot::{EffectParams, EffectResult, GamepadSnapshot};
use futures::future::LocalBoxFuture;
use std::fmt;

/// Callback registered on an [`EventTarget`].
pub type Listener<E> = Box<dyn FnMut(&E)>;

/// Something that dispatches events of type `E`.
pub trait EventTarget<E> {
    fn add_event_listener(&self, event_type: EventType, listener: Listener<E>);
}

/// The element mouse input is captured on (a canvas or window surface).
pub trait PointerLockTarget {
    /// Identity compared against [`PointerLockHost::pointer_lock_element`].
    fn id(&self) -> &str;
    fn request_pointer_lock(&self);
}

/// The document-like object that owns the pointer lock.
pub trait PointerLockHost {
    fn exit_pointer_lock(&self);
    /// Id of the element currently holding the lock.
    fn pointer_lock_element(&self) -> Option<String>;
}

/// Gamepad enumeration. The platform interface is poll-based; slots may be empty.
pub trait Navigator {
    fn get_gamepads(&self) -> Vec<Option<GamepadSnapshot>>;
}

/// Rumble motor attached to a gamepad.
pub trait VibrationActuator: fmt::Debug {
    /// Actuator kind, e.g. `"dual-rumble"`.
    fn actuator_type(&self) -> &str;

    /// Starts an effect. The returned future resolves when the effect ends.
    fn play_effect(&self, kind: &str, params: EffectParams) -> LocalBoxFuture<'static, EffectResult>;
}

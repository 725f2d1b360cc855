//! Shared "preferred input method" signal.
//!
//! Every tracker writes it on activity (keyboard and mouse clear it, the gamepad sets it) and
//! the [`or`](crate::combinator::or) / [`and`](crate::combinator::and) combinators read it
//! to pick which label to show. One store is created per session and cloned into every
//! tracker; clones share the same flag.
//!
//! Everything runs on the host's event thread, so the flag is a plain `Cell` and the last
//! write wins.

use std::cell::Cell;
use std::rc::Rc;
use tracing::debug;

/// Session-wide device preference flag. Cloning shares the underlying value.
#[derive(Clone, Debug, Default)]
pub struct PreferenceStore {
    prefer_gamepad: Rc<Cell<bool>>,
}

impl PreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` while the gamepad is the user's active input device.
    #[inline]
    pub fn prefer_gamepad(&self) -> bool {
        self.prefer_gamepad.get()
    }

    pub fn set_prefer_gamepad(&self, prefer: bool) {
        if self.prefer_gamepad.replace(prefer) != prefer {
            debug!(prefer_gamepad = prefer, "input preference changed");
        }
    }
}

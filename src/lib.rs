//! unibind: one control abstraction over keyboard, mouse and gamepad.
//!
//! Bind a logical action to any physical input through a single [`Control`] type, and
//! merge several inputs into one with [`or`] / [`and`]. The combinators pick their display
//! label from whichever device family the user touched last, tracked by a shared
//! [`PreferenceStore`].
//!
//! ```
//! use std::rc::Rc;
//! use unibind::backends::virtual_input::{VirtualCanvas, VirtualDocument, VirtualNavigator, VirtualWindow};
//! use unibind::{InputManager, Settings};
//!
//! let document = Rc::new(VirtualDocument::new());
//! let canvas = Rc::new(VirtualCanvas::new("canvas", Rc::clone(&document)));
//! let window = VirtualWindow::new();
//! let input = InputManager::new(
//!     Rc::clone(&document),
//!     canvas,
//!     &window,
//!     Rc::new(VirtualNavigator::new()),
//!     &Settings::default(),
//! );
//!
//! let jump = input
//!     .or([
//!         input.keyboard().key("Space")?.into_trigger(),
//!         input.gamepad().button("A")?.into_trigger(),
//!     ])?;
//!
//! document.press(" ");
//! assert!(jump.query());
//! assert!(!jump.query());
//! assert_eq!(jump.label()?, "Space");
//! # Ok::<(), unibind::Error>(())
//! ```
//!
//! Everything is single-threaded: trackers update inside the host's event callbacks and
//! controls are queried from the same thread, once per frame.

pub mod backends;
pub mod combinator;
pub mod config;
pub mod control;
pub mod device;
pub mod error;
pub mod event;
pub mod eventbus;
pub mod gamepad;
pub mod keyboard;
pub mod manager;
pub mod maps;
pub mod math;
pub mod mouse;
pub mod snapshot;
pub mod store;

pub use combinator::{and, or};
pub use config::Settings;
pub use control::{Control, TriggerControl, Truthy};
pub use device::*;
pub use error::{ConfigError, Error, Result};
pub use event::*;
pub use eventbus::*;
pub use gamepad::{Gamepad, GamepadStick, StickId, VibrationOptions};
pub use keyboard::{DirectionalKeys, KeyId, Keyboard};
pub use manager::*;
pub use maps::gamepad::{ButtonId, GamepadButton};
pub use math::Vector2;
pub use mouse::{Canvas, Mouse, MouseButton, MouseButtonId};
pub use snapshot::*;
pub use store::PreferenceStore;

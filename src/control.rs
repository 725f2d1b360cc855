//! The control abstraction shared by every tracker.
//!
//! A [`Control`] is a label plus a query closure. Queries read tracker state at call time;
//! level queries are idempotent, while the drain-style mouse queries and the edge queries of
//! a [`TriggerControl`] consume state when they report it.
//!
//! Controls are cheap handles (`Rc` inside). Build them once per bound action and call
//! [`Control::query`] every frame.

use crate::error::Result;
use crate::math::Vector2;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

/// Values that can be tested for "active" by the combinators.
pub trait Truthy {
    fn is_truthy(&self) -> bool;
}

impl Truthy for bool {
    #[inline]
    fn is_truthy(&self) -> bool {
        *self
    }
}

impl Truthy for f64 {
    #[inline]
    fn is_truthy(&self) -> bool {
        *self != 0.0 && !self.is_nan()
    }
}

impl Truthy for f32 {
    #[inline]
    fn is_truthy(&self) -> bool {
        *self != 0.0 && !self.is_nan()
    }
}

impl Truthy for Vector2 {
    #[inline]
    fn is_truthy(&self) -> bool {
        !self.is_zero()
    }
}

impl<T: Truthy> Truthy for Option<T> {
    #[inline]
    fn is_truthy(&self) -> bool {
        self.as_ref().is_some_and(Truthy::is_truthy)
    }
}

#[derive(Clone)]
enum Label {
    Fixed(Rc<str>),
    Resolved(Rc<dyn Fn() -> Result<String>>),
}

/// Named, queryable view over an input source.
pub struct Control<T> {
    label: Label,
    query: Rc<dyn Fn() -> T>,
    from_gamepad: bool,
}

impl<T> Control<T> {
    pub fn new(label: impl Into<String>, query: impl Fn() -> T + 'static) -> Self {
        Self {
            label: Label::Fixed(Rc::from(label.into())),
            query: Rc::new(query),
            from_gamepad: false,
        }
    }

    /// A control whose label is computed on every [`label`](Self::label) call.
    pub fn with_resolved_label(
        label: impl Fn() -> Result<String> + 'static,
        query: impl Fn() -> T + 'static,
    ) -> Self {
        Self {
            label: Label::Resolved(Rc::new(label)),
            query: Rc::new(query),
            from_gamepad: false,
        }
    }

    /// Marks the control as gamepad-sourced.
    pub fn from_gamepad(mut self) -> Self {
        self.from_gamepad = true;
        self
    }

    #[inline]
    pub fn is_from_gamepad(&self) -> bool {
        self.from_gamepad
    }

    /// Display label. Only combinator labels can fail.
    pub fn label(&self) -> Result<String> {
        match &self.label {
            Label::Fixed(label) => Ok(label.to_string()),
            Label::Resolved(resolve) => resolve(),
        }
    }

    #[inline]
    pub fn query(&self) -> T {
        (self.query)()
    }
}

impl<T> Clone for Control<T> {
    fn clone(&self) -> Self {
        Self {
            label: self.label.clone(),
            query: Rc::clone(&self.query),
            from_gamepad: self.from_gamepad,
        }
    }
}

impl<T> fmt::Debug for Control<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match &self.label {
            Label::Fixed(label) => label.to_string(),
            Label::Resolved(_) => "<resolved>".to_string(),
        };
        f.debug_struct("Control")
            .field("label", &label)
            .field("from_gamepad", &self.from_gamepad)
            .finish()
    }
}

/// A level control with an edge-sensitive companion.
///
/// Dereferences to the level control, so `control.query()` reads the held state and
/// `control.trigger().query()` reports (and consumes) a fresh press.
pub struct TriggerControl<T> {
    level: Control<T>,
    trigger: Control<T>,
}

impl<T> TriggerControl<T> {
    pub fn new(level: Control<T>, trigger: Control<T>) -> Self {
        Self { level, trigger }
    }

    #[inline]
    pub fn trigger(&self) -> &Control<T> {
        &self.trigger
    }

    pub fn into_trigger(self) -> Control<T> {
        self.trigger
    }

    pub fn into_level(self) -> Control<T> {
        self.level
    }
}

impl<T> Deref for TriggerControl<T> {
    type Target = Control<T>;

    fn deref(&self) -> &Control<T> {
        &self.level
    }
}

impl<T> Clone for TriggerControl<T> {
    fn clone(&self) -> Self {
        Self {
            level: self.level.clone(),
            trigger: self.trigger.clone(),
        }
    }
}

impl<T> fmt::Debug for TriggerControl<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TriggerControl")
            .field("level", &self.level)
            .field("trigger", &self.trigger)
            .finish()
    }
}

impl<T> From<TriggerControl<T>> for Control<T> {
    fn from(control: TriggerControl<T>) -> Self {
        control.level
    }
}

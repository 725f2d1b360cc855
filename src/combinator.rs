//! Boolean combinators that fold several controls into one.
//!
//! Both combinators resolve their label through the [`PreferenceStore`]: when any input is
//! gamepad-sourced, the label follows whichever device family the user touched last.

use crate::control::{Control, Truthy};
use crate::error::{Error, Result};
use crate::store::PreferenceStore;
use std::rc::Rc;

/// Disjunction: the first truthy input value, or `T::default()` when none is truthy.
///
/// Inputs are queried in order and evaluation stops at the first truthy value, so edge
/// controls after it keep their pending press.
pub fn or<T>(
    store: &PreferenceStore,
    controls: impl IntoIterator<Item = Control<T>>,
) -> Result<Control<T>>
where
    T: Truthy + Default + 'static,
{
    let controls = collect(controls)?;
    let queried = Rc::clone(&controls);

    Ok(Control::with_resolved_label(label_resolver(store, controls), move || {
        for control in queried.iter() {
            let value = control.query();
            if value.is_truthy() {
                return value;
            }
        }
        T::default()
    }))
}

/// Conjunction: the last input value when every input is truthy, otherwise `T::default()`.
///
/// Evaluation stops at the first falsy input.
pub fn and<T>(
    store: &PreferenceStore,
    controls: impl IntoIterator<Item = Control<T>>,
) -> Result<Control<T>>
where
    T: Truthy + Default + 'static,
{
    let controls = collect(controls)?;
    let queried = Rc::clone(&controls);

    Ok(Control::with_resolved_label(label_resolver(store, controls), move || {
        let mut last = T::default();
        for control in queried.iter() {
            let value = control.query();
            if !value.is_truthy() {
                return T::default();
            }
            last = value;
        }
        last
    }))
}

fn collect<T>(controls: impl IntoIterator<Item = Control<T>>) -> Result<Rc<[Control<T>]>> {
    let controls: Rc<[Control<T>]> = controls.into_iter().collect();
    if controls.len() < 2 {
        return Err(Error::TooFewControls);
    }
    Ok(controls)
}

fn label_resolver<T: 'static>(
    store: &PreferenceStore,
    controls: Rc<[Control<T>]>,
) -> impl Fn() -> Result<String> + 'static {
    let store = store.clone();
    move || {
        if !controls.iter().any(Control::is_from_gamepad) {
            return controls[0].label();
        }

        let prefer_gamepad = store.prefer_gamepad();
        controls
            .iter()
            .find(|control| control.is_from_gamepad() == prefer_gamepad)
            .ok_or(Error::NoControlFound)?
            .label()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vector2;
    use std::cell::Cell;

    fn constant(label: &str, value: bool) -> Control<bool> {
        Control::new(label, move || value)
    }

    #[test]
    fn or_requires_two_controls() {
        let store = PreferenceStore::new();
        assert_eq!(
            or::<bool>(&store, []).unwrap_err().to_string(),
            "Less than two controls specified!"
        );
        assert_eq!(
            or(&store, [constant("a", true)]).unwrap_err(),
            Error::TooFewControls
        );
    }

    #[test]
    fn and_requires_two_controls() {
        let store = PreferenceStore::new();
        assert_eq!(and::<bool>(&store, []).unwrap_err(), Error::TooFewControls);
        assert_eq!(
            and(&store, [constant("a", true)])
                .unwrap_err()
                .to_string(),
            "Less than two controls specified!"
        );
    }

    #[test]
    fn or_returns_first_truthy_value() {
        let store = PreferenceStore::new();
        let combined = or(&store, [constant("a", false), constant("b", true)]).unwrap();
        assert!(combined.query());

        let combined = or(&store, [constant("a", false), constant("b", false)]).unwrap();
        assert!(!combined.query());

        let sticks = or(
            &store,
            [
                Control::new("zero", || Vector2::ZERO),
                Control::new("right", || Vector2::new(1.0, 0.0)),
            ],
        )
        .unwrap();
        assert_eq!(sticks.query(), Vector2::new(1.0, 0.0));
    }

    #[test]
    fn or_short_circuits() {
        let store = PreferenceStore::new();
        let calls = Rc::new(Cell::new(0));
        let counted = Rc::clone(&calls);
        let combined = or(
            &store,
            [
                constant("a", true),
                Control::new("b", move || {
                    counted.set(counted.get() + 1);
                    true
                }),
            ],
        )
        .unwrap();

        assert!(combined.query());
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn and_requires_every_input() {
        let store = PreferenceStore::new();
        let both = and(&store, [constant("a", true), constant("b", true)]).unwrap();
        assert!(both.query());

        let one = and(&store, [constant("a", true), constant("b", false)]).unwrap();
        assert!(!one.query());

        let axes = and(
            &store,
            [Control::new("x", || 0.5), Control::new("y", || 0.75)],
        )
        .unwrap();
        assert_eq!(axes.query(), 0.75);

        let gated = and(&store, [Control::new("x", || 0.0), Control::new("y", || 0.75)]).unwrap();
        assert_eq!(gated.query(), 0.0);
    }

    #[test]
    fn label_without_gamepad_controls_is_first_label() {
        let store = PreferenceStore::new();
        store.set_prefer_gamepad(true);
        let combined = or(&store, [constant("Space", false), constant("W", false)]).unwrap();
        assert_eq!(combined.label().unwrap(), "Space");
    }

    #[test]
    fn label_follows_device_preference() {
        let store = PreferenceStore::new();
        let combined = and(
            &store,
            [
                constant("Space", false),
                constant("A", false).from_gamepad(),
            ],
        )
        .unwrap();

        assert_eq!(combined.label().unwrap(), "Space");
        store.set_prefer_gamepad(true);
        assert_eq!(combined.label().unwrap(), "A");
    }

    #[test]
    fn label_fails_without_matching_branch() {
        let store = PreferenceStore::new();
        let combined = or(
            &store,
            [
                constant("A", false).from_gamepad(),
                constant("B", false).from_gamepad(),
            ],
        )
        .unwrap();

        assert_eq!(combined.label().unwrap_err().to_string(), "No control found!");
        store.set_prefer_gamepad(true);
        assert_eq!(combined.label().unwrap(), "A");
    }
}

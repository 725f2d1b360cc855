//! Keyboard tracker.
//!
//! Listens to `keydown` / `keyup` on a document-like [`EventTarget`] and keeps two sets of
//! lower-cased key values: *pressed* (held right now) and *queued* (pressed and not yet
//! reported by a trigger query). Any keyboard activity hands the input preference back to
//! keyboard and mouse.

use crate::config::{DirectionalTemplate, KeyboardSettings};
use crate::control::{Control, TriggerControl};
use crate::device::EventTarget;
use crate::error::{Error, Result};
use crate::event::{EventType, KeyboardEvent};
use crate::maps::keyboard::{find_key_value, key_label, normalize_key};
use crate::math::Vector2;
use crate::store::PreferenceStore;
use std::cell::RefCell;
use std::collections::{BTreeMap, HashSet};
use std::rc::Rc;
use tracing::trace;

/// How a caller names a key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyId<'a> {
    /// `"any"`: any key.
    Any,
    Name(&'a str),
}

impl<'a> From<&'a str> for KeyId<'a> {
    fn from(name: &'a str) -> Self {
        if name == "any" {
            KeyId::Any
        } else {
            KeyId::Name(name)
        }
    }
}

/// Either a named template or four explicit keys (`[up, left, down, right]`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DirectionalKeys<'a> {
    Template(&'a str),
    Keys(&'a [&'a str]),
}

impl<'a> From<&'a str> for DirectionalKeys<'a> {
    fn from(name: &'a str) -> Self {
        DirectionalKeys::Template(name)
    }
}

impl<'a> From<&'a [&'a str]> for DirectionalKeys<'a> {
    fn from(keys: &'a [&'a str]) -> Self {
        DirectionalKeys::Keys(keys)
    }
}

impl<'a, const N: usize> From<&'a [&'a str; N]> for DirectionalKeys<'a> {
    fn from(keys: &'a [&'a str; N]) -> Self {
        DirectionalKeys::Keys(keys.as_slice())
    }
}

#[derive(Default)]
struct KeyState {
    pressed: HashSet<String>,
    queued: HashSet<String>,
}

/// Keyboard input tracker. Cloning shares state.
#[derive(Clone)]
pub struct Keyboard {
    state: Rc<RefCell<KeyState>>,
    templates: Rc<BTreeMap<String, DirectionalTemplate>>,
}

impl Keyboard {
    /// Subscribes to `keydown` / `keyup` on `document`.
    pub fn new<D>(document: &D, store: PreferenceStore, settings: &KeyboardSettings) -> Self
    where
        D: EventTarget<KeyboardEvent> + ?Sized,
    {
        let state = Rc::new(RefCell::new(KeyState::default()));

        let down = Rc::clone(&state);
        let down_store = store.clone();
        document.add_event_listener(
            EventType::KeyDown,
            Box::new(move |event: &KeyboardEvent| {
                down_store.set_prefer_gamepad(false);
                let key = normalize_key(&event.key);
                trace!(%key, "key down");
                let mut state = down.borrow_mut();
                state.pressed.insert(key.clone());
                state.queued.insert(key);
            }),
        );

        let up = Rc::clone(&state);
        document.add_event_listener(
            EventType::KeyUp,
            Box::new(move |event: &KeyboardEvent| {
                store.set_prefer_gamepad(false);
                let key = normalize_key(&event.key);
                trace!(%key, "key up");
                let mut state = up.borrow_mut();
                state.pressed.remove(&key);
                state.queued.remove(&key);
            }),
        );

        let templates = settings
            .directional_templates
            .iter()
            .map(|(name, template)| (name.to_lowercase(), template.clone()))
            .collect();

        Self {
            state,
            templates: Rc::new(templates),
        }
    }

    /// A single key, or any key for [`KeyId::Any`].
    ///
    /// The trigger of a single key fires once per press. The trigger of the any-key control
    /// drains every queued press at once.
    pub fn key<'a>(&self, key: impl Into<KeyId<'a>>) -> Result<TriggerControl<bool>> {
        match key.into() {
            KeyId::Any => Ok(self.any_key()),
            KeyId::Name(name) => {
                let value = find_key_value(name)?;
                Ok(self.single_key(value))
            }
        }
    }

    fn any_key(&self) -> TriggerControl<bool> {
        let level = Rc::clone(&self.state);
        let edge = Rc::clone(&self.state);

        TriggerControl::new(
            Control::new("Any key", move || !level.borrow().pressed.is_empty()),
            Control::new("Any key", move || {
                let mut state = edge.borrow_mut();
                let fired = !state.queued.is_empty();
                state.queued.clear();
                fired
            }),
        )
    }

    fn single_key(&self, value: String) -> TriggerControl<bool> {
        let label = key_label(&value);
        let level = Rc::clone(&self.state);
        let edge = Rc::clone(&self.state);
        let level_value = value.clone();

        TriggerControl::new(
            Control::new(label.clone(), move || level.borrow().pressed.contains(&level_value)),
            Control::new(label, move || edge.borrow_mut().queued.remove(&value)),
        )
    }

    /// A 4-way vector control. Up/down drive `y` (up is negative), left/right drive `x`.
    ///
    /// `label` overrides the template label, or the concatenated key labels for explicit
    /// key lists.
    pub fn directional_keys<'a>(
        &self,
        keys: impl Into<DirectionalKeys<'a>>,
        label: Option<&str>,
    ) -> Result<Control<Vector2>> {
        let (default_label, values) = match keys.into() {
            DirectionalKeys::Template(name) => {
                let template = self
                    .templates
                    .get(&name.to_lowercase())
                    .ok_or_else(|| Error::UnknownTemplate(name.to_string()))?;
                (template.label.clone(), resolve_four(&template.keys)?)
            }
            DirectionalKeys::Keys(keys) => {
                let values = resolve_four(keys)?;
                let joined = values.iter().map(|value| key_label(value)).collect::<String>();
                (joined, values)
            }
        };

        let state = Rc::clone(&self.state);
        Ok(Control::new(label.map_or(default_label, str::to_string), move || {
            let state = state.borrow();
            let held = |i: usize| state.pressed.contains(&values[i]);
            let mut vector = Vector2::ZERO;
            if held(0) {
                vector.y -= 1.0;
            }
            if held(1) {
                vector.x -= 1.0;
            }
            if held(2) {
                vector.y += 1.0;
            }
            if held(3) {
                vector.x += 1.0;
            }
            vector
        }))
    }
}

fn resolve_four<S: AsRef<str>>(keys: &[S]) -> Result<[String; 4]> {
    match keys {
        [up, left, down, right] => Ok([
            find_key_value(up.as_ref())?,
            find_key_value(left.as_ref())?,
            find_key_value(down.as_ref())?,
            find_key_value(right.as_ref())?,
        ]),
        _ => Err(Error::TemplateArity),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::virtual_input::VirtualDocument;

    fn pack() -> (Rc<VirtualDocument>, Keyboard, PreferenceStore) {
        let doc = Rc::new(VirtualDocument::new());
        let store = PreferenceStore::new();
        let keyboard = Keyboard::new(&*doc, store.clone(), &KeyboardSettings::default());
        (doc, keyboard, store)
    }

    #[test]
    fn registers_key_listeners() {
        let (doc, _keyboard, _) = pack();
        let types: Vec<_> = doc.keyboard_events().event_types().into_iter().collect();
        assert_eq!(types, vec![EventType::KeyDown, EventType::KeyUp]);
    }

    #[test]
    fn level_query_is_idempotent_and_case_insensitive() {
        let (doc, keyboard, _) = pack();
        let a = keyboard.key("a").unwrap();
        assert!(!a.query());

        doc.press("A");
        assert!(a.query());
        assert!(a.query());
        assert!(keyboard.key("A").unwrap().query());

        doc.release("a");
        assert!(!a.query());
    }

    #[test]
    fn trigger_fires_once_per_press() {
        let (doc, keyboard, _) = pack();
        let space = keyboard.key("Space").unwrap();

        doc.press(" ");
        assert!(space.trigger().query());
        assert!(!space.trigger().query());
        assert!(space.query());

        doc.release(" ");
        doc.press(" ");
        assert!(space.trigger().query());
    }

    #[test]
    fn release_before_query_drops_the_press() {
        let (doc, keyboard, _) = pack();
        let enter = keyboard.key("Enter").unwrap();
        doc.press("Enter");
        doc.release("Enter");
        assert!(!enter.trigger().query());
    }

    #[test]
    fn any_key() {
        let (doc, keyboard, _) = pack();
        let any = keyboard.key("any").unwrap();
        assert_eq!(any.label().unwrap(), "Any key");
        assert!(!any.query());
        assert!(!any.trigger().query());

        doc.press("q");
        doc.press("e");
        assert!(any.query());
        assert!(any.trigger().query());
        assert!(!any.trigger().query());
        // The drain also consumed the per-key edges.
        assert!(!keyboard.key("q").unwrap().trigger().query());
        assert!(any.query());
    }

    #[test]
    fn unknown_key_fails() {
        let (_, keyboard, _) = pack();
        assert_eq!(
            keyboard.key("Hyper").unwrap_err(),
            Error::UnknownKey("Hyper".to_string())
        );
    }

    #[test]
    fn activity_clears_gamepad_preference() {
        let (doc, _keyboard, store) = pack();
        store.set_prefer_gamepad(true);
        doc.press("x");
        assert!(!store.prefer_gamepad());
        store.set_prefer_gamepad(true);
        doc.release("x");
        assert!(!store.prefer_gamepad());
    }

    #[test]
    fn wasd_template() {
        let (doc, keyboard, _) = pack();
        let wasd = keyboard.directional_keys("WASD", None).unwrap();
        assert_eq!(wasd.label().unwrap(), "WASD");
        assert_eq!(wasd.query(), Vector2::ZERO);

        doc.press("W");
        assert_eq!(wasd.query(), Vector2::new(0.0, -1.0));
        doc.press("D");
        assert_eq!(wasd.query(), Vector2::new(1.0, -1.0));
        doc.press("s");
        assert_eq!(wasd.query(), Vector2::new(1.0, 0.0));
    }

    #[test]
    fn arrows_template_with_label_override() {
        let (doc, keyboard, _) = pack();
        let arrows = keyboard.directional_keys("arrows", Some("Move")).unwrap();
        assert_eq!(arrows.label().unwrap(), "Move");

        doc.press("ArrowLeft");
        doc.press("ArrowDown");
        assert_eq!(arrows.query(), Vector2::new(-1.0, 1.0));
    }

    #[test]
    fn explicit_key_list() {
        let (doc, keyboard, _) = pack();
        let ijkl = keyboard.directional_keys(&["I", "J", "K", "L"], None).unwrap();
        assert_eq!(ijkl.label().unwrap(), "IJKL");

        doc.press("l");
        assert_eq!(ijkl.query(), Vector2::new(1.0, 0.0));
    }

    #[test]
    fn directional_errors() {
        let (_, keyboard, _) = pack();
        assert_eq!(
            keyboard
                .directional_keys("hjkl", None)
                .unwrap_err()
                .to_string(),
            "Directional key template \"hjkl\" not found!"
        );
        assert_eq!(
            keyboard
                .directional_keys(&["W", "A", "S"], None)
                .unwrap_err()
                .to_string(),
            "Directional key templates have to consist of four keys!"
        );
        assert_eq!(
            keyboard
                .directional_keys(&["W", "A", "S", "Hyper"], None)
                .unwrap_err(),
            Error::UnknownKey("Hyper".to_string())
        );
    }
}

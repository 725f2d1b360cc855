use crate::device::{EventTarget, Listener};
use crate::event::EventType;
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet};
use tracing::trace;

/// Handle returned by [`EventBus::add_listener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

/// Listener with its subscription and mute flag.
struct ListenerEntry<E> {
    event_type: EventType,
    listener: Listener<E>,
    enabled: bool,
}

/// In-process [`EventTarget`] for hosts that pump device events themselves.
///
/// Listeners run in registration order. A listener must not register or remove listeners
/// on the bus that is currently emitting to it.
pub struct EventBus<E> {
    next_id: Cell<u64>,
    listeners: RefCell<BTreeMap<ListenerId, ListenerEntry<E>>>,
}

impl<E> Default for EventBus<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> EventBus<E> {
    pub fn new() -> Self {
        Self {
            next_id: Cell::new(0),
            listeners: RefCell::new(BTreeMap::new()),
        }
    }

    /// Registers a listener for one event type.
    pub fn add_listener(&self, event_type: EventType, listener: impl FnMut(&E) + 'static) -> ListenerId {
        self.insert(event_type, Box::new(listener))
    }

    fn insert(&self, event_type: EventType, listener: Listener<E>) -> ListenerId {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.listeners.borrow_mut().insert(
            id,
            ListenerEntry {
                event_type,
                listener,
                enabled: true,
            },
        );
        id
    }

    /// Enables a previously registered listener.
    pub fn enable(&self, id: ListenerId) {
        if let Some(entry) = self.listeners.borrow_mut().get_mut(&id) {
            entry.enabled = true;
        }
    }

    /// Disables (mutes) a listener without removing it.
    pub fn disable(&self, id: ListenerId) {
        if let Some(entry) = self.listeners.borrow_mut().get_mut(&id) {
            entry.enabled = false;
        }
    }

    /// Unregisters a listener entirely.
    pub fn remove_listener(&self, id: ListenerId) {
        self.listeners.borrow_mut().remove(&id);
    }

    /// Emits one event to all enabled listeners of `event_type`. Returns how many ran.
    pub fn emit(&self, event_type: EventType, event: &E) -> usize {
        let mut delivered = 0;
        for entry in self.listeners.borrow_mut().values_mut() {
            if !entry.enabled || entry.event_type != event_type {
                continue;
            }
            (entry.listener)(event);
            delivered += 1;
        }
        trace!(%event_type, delivered, "event emitted");
        delivered
    }

    /// Event types that currently have at least one listener.
    pub fn event_types(&self) -> BTreeSet<EventType> {
        self.listeners
            .borrow()
            .values()
            .map(|entry| entry.event_type)
            .collect()
    }
}

impl<E> EventTarget<E> for EventBus<E> {
    fn add_event_listener(&self, event_type: EventType, listener: Listener<E>) {
        self.insert(event_type, listener);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    fn counter(bus: &EventBus<u32>, event_type: EventType) -> (ListenerId, Rc<Cell<u32>>) {
        let seen = Rc::new(Cell::new(0));
        let sink = Rc::clone(&seen);
        let id = bus.add_listener(event_type, move |value: &u32| sink.set(sink.get() + value));
        (id, seen)
    }

    #[test]
    fn delivers_only_matching_event_types() {
        let bus = EventBus::new();
        let (_, downs) = counter(&bus, EventType::KeyDown);
        let (_, ups) = counter(&bus, EventType::KeyUp);

        assert_eq!(bus.emit(EventType::KeyDown, &3), 1);
        assert_eq!(downs.get(), 3);
        assert_eq!(ups.get(), 0);
        assert_eq!(bus.emit(EventType::Wheel, &1), 0);
    }

    #[test]
    fn disable_enable_and_remove() {
        let bus = EventBus::new();
        let (id, seen) = counter(&bus, EventType::MouseMove);

        bus.disable(id);
        assert_eq!(bus.emit(EventType::MouseMove, &1), 0);
        bus.enable(id);
        bus.emit(EventType::MouseMove, &1);
        assert_eq!(seen.get(), 1);

        bus.remove_listener(id);
        assert_eq!(bus.emit(EventType::MouseMove, &1), 0);
        assert!(bus.event_types().is_empty());
    }

    #[test]
    fn lists_registered_event_types() {
        let bus: EventBus<u32> = EventBus::new();
        bus.add_event_listener(EventType::GamepadConnected, Box::new(|_| {}));
        bus.add_event_listener(EventType::GamepadDisconnected, Box::new(|_| {}));
        bus.add_event_listener(EventType::GamepadConnected, Box::new(|_| {}));

        let types: Vec<_> = bus.event_types().into_iter().collect();
        assert_eq!(
            types,
            vec![EventType::GamepadConnected, EventType::GamepadDisconnected]
        );
    }
}

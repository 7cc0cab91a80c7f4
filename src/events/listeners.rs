//! Per-entity listener registries.
//!
//! Each observable entity (deck, draw pile, hand, discard, combatant, battle)
//! owns one `Listeners<E>` for its own event enum. There is no global bus:
//! subscribing to a hand never delivers combatant events.
//!
//! Delivery is synchronous and in subscription order. By the time a callback
//! runs, the entity has already applied the change it reports.

use serde::{Deserialize, Serialize};

/// Subscription handle returned by `Listeners::subscribe`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListenerId(pub u32);

impl ListenerId {
    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for ListenerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Listener({})", self.0)
    }
}

type Callback<E> = Box<dyn FnMut(&E)>;

/// Ordered list of event callbacks.
///
/// ```
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use card_battle::events::Listeners;
///
/// let seen = Rc::new(RefCell::new(Vec::new()));
/// let mut listeners: Listeners<u32> = Listeners::new();
///
/// let sink = Rc::clone(&seen);
/// let id = listeners.subscribe(move |event| sink.borrow_mut().push(*event));
///
/// listeners.emit(&1);
/// assert!(listeners.unsubscribe(id));
/// listeners.emit(&2);
///
/// assert_eq!(*seen.borrow(), vec![1]);
/// ```
pub struct Listeners<E> {
    entries: Vec<(ListenerId, Callback<E>)>,
    next_id: u32,
}

impl<E> Default for Listeners<E> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }
}

impl<E> Listeners<E> {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback. Returns the handle for `unsubscribe`.
    pub fn subscribe(&mut self, callback: impl FnMut(&E) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, Box::new(callback)));
        id
    }

    /// Remove a callback. Returns `false` if the handle was unknown.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    /// Deliver an event to every callback, in subscription order.
    pub fn emit(&mut self, event: &E) {
        for (_, callback) in &mut self.entries {
            callback(event);
        }
    }

    /// Number of registered callbacks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no callbacks are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove every callback.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<E> std::fmt::Debug for Listeners<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.entries.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_delivery_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut listeners: Listeners<&'static str> = Listeners::new();

        let first = Rc::clone(&log);
        listeners.subscribe(move |e| first.borrow_mut().push(format!("a:{e}")));
        let second = Rc::clone(&log);
        listeners.subscribe(move |e| second.borrow_mut().push(format!("b:{e}")));

        listeners.emit(&"x");

        assert_eq!(*log.borrow(), vec!["a:x".to_string(), "b:x".to_string()]);
    }

    #[test]
    fn test_unsubscribe() {
        let count = Rc::new(RefCell::new(0));
        let mut listeners: Listeners<()> = Listeners::new();

        let sink = Rc::clone(&count);
        let id = listeners.subscribe(move |_| *sink.borrow_mut() += 1);
        assert_eq!(listeners.len(), 1);

        listeners.emit(&());
        assert!(listeners.unsubscribe(id));
        assert!(!listeners.unsubscribe(id));
        listeners.emit(&());

        assert_eq!(*count.borrow(), 1);
        assert!(listeners.is_empty());
    }

    #[test]
    fn test_ids_not_reused() {
        let mut listeners: Listeners<()> = Listeners::new();
        let a = listeners.subscribe(|_| {});
        listeners.unsubscribe(a);
        let b = listeners.subscribe(|_| {});

        assert_ne!(a, b);
    }

    #[test]
    fn test_clear_and_debug() {
        let mut listeners: Listeners<()> = Listeners::new();
        listeners.subscribe(|_| {});
        listeners.subscribe(|_| {});

        assert_eq!(format!("{:?}", listeners), "Listeners { count: 2 }");
        listeners.clear();
        assert!(listeners.is_empty());
    }
}

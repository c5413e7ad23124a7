use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::errors::ViewError;
use crate::types::normalize_country_code;

/// Country the map starts bounded to.
pub const DEFAULT_COUNTRY_CODE: &str = "PL";

/// The two user-controlled fields of the menu.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub is_bounded: bool,
    pub country_code: String,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            is_bounded: false,
            country_code: DEFAULT_COUNTRY_CODE.to_string(),
        }
    }
}

type Listener = Rc<dyn Fn(&ViewState)>;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<(u64, Listener)>,
}

/// Handle returned by [`ViewStateStore::subscribe`].
///
/// Dropping the handle keeps the listener registered; call
/// [`Subscription::unsubscribe`] to remove it.
pub struct Subscription {
    id: u64,
    listeners: Weak<RefCell<Listeners>>,
}

impl Subscription {
    /// Removes the listener. Does nothing if it was already removed or the
    /// store is gone.
    pub fn unsubscribe(&self) {
        if let Some(listeners) = self.listeners.upgrade() {
            listeners
                .borrow_mut()
                .entries
                .retain(|(id, _)| *id != self.id);
        }
    }
}

/// Single source of truth for the view state of one map session.
///
/// The menu edits it through the setters; the bounded-view controller reads it
/// through a subscription, so neither holds a reference to the other.
pub struct ViewStateStore {
    state: ViewState,
    listeners: Rc<RefCell<Listeners>>,
}

impl Default for ViewStateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewStateStore {
    pub fn new() -> Self {
        Self::with_state(ViewState::default())
    }

    pub fn with_state(state: ViewState) -> Self {
        Self {
            state,
            listeners: Rc::new(RefCell::new(Listeners::default())),
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Sets the bounded flag. Always succeeds.
    pub fn set_bounded(&mut self, value: bool) {
        if self.state.is_bounded != value {
            self.state.is_bounded = value;
            self.notify();
        }
    }

    /// Flips the bounded flag and returns the new value.
    pub fn toggle_bounded(&mut self) -> bool {
        let value = !self.state.is_bounded;
        self.set_bounded(value);
        value
    }

    /// Stores `code` after trimming and upper-casing it.
    ///
    /// # Errors
    /// - `ViewError::InvalidCode` - If the normalized code is not two letters.
    ///   The stored code is left unchanged.
    pub fn set_country_code(&mut self, code: &str) -> Result<(), ViewError> {
        let normalized = normalize_country_code(code)?;
        if self.state.country_code != normalized {
            self.state.country_code = normalized;
            self.notify();
        }
        Ok(())
    }

    /// Registers `listener`, invoked with the new state after every change.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&ViewState) + 'static,
    {
        let mut listeners = self.listeners.borrow_mut();
        let id = listeners.next_id;
        listeners.next_id += 1;
        listeners.entries.push((id, Rc::new(listener)));

        Subscription {
            id,
            listeners: Rc::downgrade(&self.listeners),
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().entries.len()
    }

    fn notify(&self) {
        // Listeners may unsubscribe while being notified.
        let snapshot: Vec<Listener> = self
            .listeners
            .borrow()
            .entries
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();

        for listener in snapshot {
            listener(&self.state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn counting(store: &ViewStateStore) -> (Rc<Cell<usize>>, Subscription) {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let subscription = store.subscribe(move |_| counter.set(counter.get() + 1));
        (calls, subscription)
    }

    #[test]
    fn test_defaults() {
        let store = ViewStateStore::new();
        assert!(!store.state().is_bounded);
        assert_eq!(store.state().country_code, "PL");
    }

    #[test]
    fn test_country_code_is_normalized() {
        let mut store = ViewStateStore::new();
        store.set_country_code("de").unwrap();
        assert_eq!(store.state().country_code, "DE");
        store.set_country_code("pl").unwrap();
        assert_eq!(store.state().country_code, "PL");
    }

    #[test]
    fn test_invalid_code_keeps_previous_state() {
        let mut store = ViewStateStore::new();
        let (calls, _subscription) = counting(&store);

        let result = store.set_country_code("P");
        assert_eq!(result, Err(ViewError::InvalidCode("P".to_string())));
        assert_eq!(store.state().country_code, "PL");
        assert_eq!(calls.get(), 0, "Rejected edits must not notify");
    }

    #[test]
    fn test_set_country_code_is_idempotent() {
        let mut store = ViewStateStore::new();
        let (calls, _subscription) = counting(&store);

        store.set_country_code("de").unwrap();
        let after_first = store.state().clone();
        store.set_country_code("DE").unwrap();

        assert_eq!(*store.state(), after_first);
        assert_eq!(calls.get(), 1, "Only the first application changes state");
    }

    #[test]
    fn test_toggle_goes_both_ways() {
        let mut store = ViewStateStore::new();
        assert!(store.toggle_bounded());
        assert!(store.state().is_bounded);
        assert!(!store.toggle_bounded());
        assert!(!store.state().is_bounded);
    }

    #[test]
    fn test_listeners_receive_new_state() {
        let mut store = ViewStateStore::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let _subscription = store.subscribe(move |state| sink.borrow_mut().push(state.clone()));

        store.set_bounded(true);
        store.set_country_code("cz").unwrap();

        let seen = seen.borrow();
        assert_eq!(seen.len(), 2);
        assert!(seen[0].is_bounded);
        assert_eq!(seen[0].country_code, "PL");
        assert_eq!(seen[1].country_code, "CZ");
    }

    #[test]
    fn test_multiple_subscribers_and_unsubscribe() {
        let mut store = ViewStateStore::new();
        let (first, first_subscription) = counting(&store);
        let (second, _second_subscription) = counting(&store);
        assert_eq!(store.listener_count(), 2);

        store.set_bounded(true);
        first_subscription.unsubscribe();
        first_subscription.unsubscribe();
        store.set_bounded(false);

        assert_eq!(first.get(), 1);
        assert_eq!(second.get(), 2);
        assert_eq!(store.listener_count(), 1);
    }

    #[test]
    fn test_unsubscribe_from_inside_a_notification() {
        let mut store = ViewStateStore::new();
        let slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
        let calls = Rc::new(Cell::new(0));

        let inner_slot = Rc::clone(&slot);
        let counter = Rc::clone(&calls);
        let subscription = store.subscribe(move |_| {
            counter.set(counter.get() + 1);
            if let Some(subscription) = inner_slot.borrow().as_ref() {
                subscription.unsubscribe();
            }
        });
        *slot.borrow_mut() = Some(subscription);

        store.set_bounded(true);
        store.set_bounded(false);

        assert_eq!(calls.get(), 1, "Listener should only run once");
        assert_eq!(store.listener_count(), 0);
    }

    #[test]
    fn test_unsubscribe_after_store_is_dropped() {
        let store = ViewStateStore::new();
        let (_, subscription) = counting(&store);
        drop(store);
        subscription.unsubscribe();
    }
}

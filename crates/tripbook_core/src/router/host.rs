//! Environment side of routing: the current fragment and its change feed.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

pub type ListenerId = u64;
pub type FragmentListener = Rc<dyn Fn(&str)>;

/// Owner of the navigation fragment, e.g. a browser location or a shell.
pub trait FragmentHost {
    /// Current fragment text.
    fn fragment(&self) -> String;
    /// Replaces the fragment and notifies listeners when it changed.
    fn set_fragment(&self, fragment: &str);
    /// Registers a change listener.
    fn subscribe(&self, listener: FragmentListener) -> ListenerId;
    /// Removes a listener. Returns `false` when `id` was not registered.
    fn unsubscribe(&self, id: ListenerId) -> bool;
    fn listener_count(&self) -> usize;
}

/// In-process fragment host.
///
/// Listeners are invoked after the new fragment is stored, in registration
/// order. Writing the current value again fires nothing.
#[derive(Default)]
pub struct MemoryFragmentHost {
    fragment: RefCell<String>,
    listeners: RefCell<BTreeMap<ListenerId, FragmentListener>>,
    next_id: Cell<ListenerId>,
}

impl MemoryFragmentHost {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            fragment: RefCell::new(initial.into()),
            ..Self::default()
        }
    }
}

impl FragmentHost for MemoryFragmentHost {
    fn fragment(&self) -> String {
        self.fragment.borrow().clone()
    }

    fn set_fragment(&self, fragment: &str) {
        if *self.fragment.borrow() == fragment {
            return;
        }
        self.fragment.replace(fragment.to_string());

        // Snapshot so listeners may (un)subscribe while being notified.
        let listeners: Vec<FragmentListener> =
            self.listeners.borrow().values().cloned().collect();
        for listener in listeners {
            listener(fragment);
        }
    }

    fn subscribe(&self, listener: FragmentListener) -> ListenerId {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.listeners.borrow_mut().insert(id, listener);
        id
    }

    fn unsubscribe(&self, id: ListenerId) -> bool {
        self.listeners.borrow_mut().remove(&id).is_some()
    }

    fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

//! Shared selection state and its propagation hub.
//!
//! All views read and write the current selection through one
//! [`SelectionStore`]. The store's change detection is what prevents two
//! views that both subscribe and commit from feeding each other update
//! cycles: a `set` with an unchanged selection is a no-op and notifies
//! nobody.

use std::sync::{Arc, Weak};

use ahash::AHashSet;
use parking_lot::RwLock;

/// The set of currently highlighted records, by record index. Replaced
/// wholesale on every gesture, never mutated in place. Keeps the order the
/// producing filter emitted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionSet {
    indices: Vec<usize>,
}

impl SelectionSet {
    pub fn new(indices: Vec<usize>) -> Self {
        Self { indices }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Hash-set view for membership tests while restyling markers.
    pub fn index_set(&self) -> AHashSet<usize> {
        self.indices.iter().copied().collect()
    }

    /// Positional equality: same length and the same index at every
    /// position. Deliberately order-sensitive rather than true set
    /// equality; the store pins this behavior under test.
    pub fn same_as(&self, other: &SelectionSet) -> bool {
        self.indices.len() == other.indices.len()
            && self.indices.iter().zip(&other.indices).all(|(a, b)| a == b)
    }
}

/// Contract implemented by every view that tracks the shared selection.
pub trait SelectionObserver: Send + Sync {
    fn update_selected_items(&self, selection: &SelectionSet);
}

/// The single writer gate for selection state.
pub struct SelectionStore {
    current: RwLock<SelectionSet>,
    subscribers: RwLock<Vec<Weak<dyn SelectionObserver>>>,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self {
            current: RwLock::new(SelectionSet::empty()),
            subscribers: RwLock::new(Vec::new()),
        }
    }

    /// Current selection, cloned.
    pub fn get(&self) -> SelectionSet {
        self.current.read().clone()
    }

    /// Add a subscriber. Subscribers are held weakly and notified in
    /// subscription order.
    pub fn subscribe(&self, observer: Arc<dyn SelectionObserver>) {
        self.subscribers.write().push(Arc::downgrade(&observer));
    }

    /// Replace the selection. Returns whether a change was detected.
    ///
    /// Change detection compares size first, then element-wise by position.
    /// An unchanged candidate is a no-op: no notification, no re-render.
    /// On change, all live subscribers are notified synchronously before
    /// this method returns.
    pub fn set(&self, candidate: SelectionSet) -> bool {
        {
            let current = self.current.read();
            if current.same_as(&candidate) {
                return false;
            }
        }

        tracing::debug!(selected = candidate.len(), "selection changed");
        *self.current.write() = candidate.clone();
        self.notify(&candidate);
        true
    }

    fn notify(&self, selection: &SelectionSet) {
        // Collect live subscribers first so no lock is held while handlers
        // run; a handler re-entering `set` with an unchanged value then
        // terminates on the no-op path instead of deadlocking.
        let observers: Vec<Arc<dyn SelectionObserver>> = {
            let mut subscribers = self.subscribers.write();
            subscribers.retain(|weak| weak.strong_count() > 0);
            subscribers.iter().filter_map(Weak::upgrade).collect()
        };

        for observer in observers {
            observer.update_selected_items(selection);
        }
    }
}

impl Default for SelectionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[derive(Default)]
    struct CountingObserver {
        seen: Mutex<Vec<SelectionSet>>,
    }

    impl SelectionObserver for CountingObserver {
        fn update_selected_items(&self, selection: &SelectionSet) {
            self.seen.lock().push(selection.clone());
        }
    }

    #[test]
    fn identical_set_is_a_noop() {
        let store = SelectionStore::new();
        let observer = Arc::new(CountingObserver::default());
        store.subscribe(observer.clone());

        assert!(store.set(SelectionSet::new(vec![1, 2, 3])));
        assert!(!store.set(SelectionSet::new(vec![1, 2, 3])));

        assert_eq!(observer.seen.lock().len(), 1);
    }

    #[test]
    fn size_change_always_notifies() {
        let store = SelectionStore::new();
        let observer = Arc::new(CountingObserver::default());
        store.subscribe(observer.clone());

        store.set(SelectionSet::new(vec![1, 2]));
        store.set(SelectionSet::new(vec![1, 2, 3]));
        store.set(SelectionSet::empty());

        assert_eq!(observer.seen.lock().len(), 3);
    }

    #[test]
    fn comparison_is_order_sensitive() {
        // Pinned behavior: positional equality, not set equality. The same
        // members in a different order count as a change.
        let store = SelectionStore::new();
        let observer = Arc::new(CountingObserver::default());
        store.subscribe(observer.clone());

        assert!(store.set(SelectionSet::new(vec![1, 2, 3])));
        assert!(store.set(SelectionSet::new(vec![3, 2, 1])));
        assert_eq!(observer.seen.lock().len(), 2);
    }

    #[test]
    fn notifies_in_subscription_order() {
        struct OrderObserver {
            tag: usize,
            log: Arc<Mutex<Vec<usize>>>,
        }
        impl SelectionObserver for OrderObserver {
            fn update_selected_items(&self, _selection: &SelectionSet) {
                self.log.lock().push(self.tag);
            }
        }

        let store = SelectionStore::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        let first = Arc::new(OrderObserver { tag: 1, log: log.clone() });
        let second = Arc::new(OrderObserver { tag: 2, log: log.clone() });
        store.subscribe(first.clone());
        store.subscribe(second.clone());

        store.set(SelectionSet::new(vec![0]));
        assert_eq!(*log.lock(), vec![1, 2]);
    }

    #[test]
    fn dropped_subscribers_are_pruned() {
        let store = SelectionStore::new();
        let kept = Arc::new(CountingObserver::default());
        {
            let dropped = Arc::new(CountingObserver::default());
            store.subscribe(dropped.clone());
        }
        store.subscribe(kept.clone());

        store.set(SelectionSet::new(vec![4]));
        assert_eq!(kept.seen.lock().len(), 1);
    }

    #[test]
    fn echo_commit_terminates() {
        // A view that commits the selection it just received must be
        // absorbed by the no-op rule instead of looping.
        struct EchoObserver {
            store: Mutex<Option<Arc<SelectionStore>>>,
            calls: Mutex<usize>,
        }
        impl SelectionObserver for EchoObserver {
            fn update_selected_items(&self, selection: &SelectionSet) {
                *self.calls.lock() += 1;
                if let Some(store) = self.store.lock().as_ref() {
                    assert!(!store.set(selection.clone()));
                }
            }
        }

        let store = Arc::new(SelectionStore::new());
        let echo = Arc::new(EchoObserver {
            store: Mutex::new(Some(store.clone())),
            calls: Mutex::new(0),
        });
        store.subscribe(echo.clone());

        assert!(store.set(SelectionSet::new(vec![7, 8])));
        assert_eq!(*echo.calls.lock(), 1);
    }
}

//! Composition shell: one dataset, one selection store, many views.

use std::sync::Arc;

use parking_lot::RwLock;

use lv_core::{DataSet, SelectionObserver, SelectionSet, SelectionStore};
use lv_render::Gesture;

use crate::adapter::{ViewAdapter, ViewConfig, ViewId};

/// Store subscription that forwards selection updates into a view.
struct ViewSubscription {
    view: Arc<RwLock<dyn ViewAdapter>>,
}

impl SelectionObserver for ViewSubscription {
    fn update_selected_items(&self, selection: &SelectionSet) {
        self.view.write().update_selected_items(selection);
    }
}

/// Composes the coordinated views over one immutable dataset and one
/// selection store, and routes gesture-produced candidate selections
/// through the store's change detection.
pub struct CoordinatorShell {
    dataset: Arc<DataSet>,
    store: Arc<SelectionStore>,
    views: Vec<Arc<RwLock<dyn ViewAdapter>>>,
    // Subscriptions are held weakly by the store; the shell keeps them
    // alive for the session.
    subscriptions: Vec<Arc<ViewSubscription>>,
}

impl CoordinatorShell {
    pub fn new(dataset: Arc<DataSet>) -> Self {
        Self {
            dataset,
            store: Arc::new(SelectionStore::new()),
            views: Vec::new(),
            subscriptions: Vec::new(),
        }
    }

    pub fn dataset(&self) -> &Arc<DataSet> {
        &self.dataset
    }

    pub fn store(&self) -> &Arc<SelectionStore> {
        &self.store
    }

    /// Initialize a view over the shared dataset and subscribe it to
    /// selection changes. Notification order follows registration order.
    pub fn add_view(&mut self, view: Arc<RwLock<dyn ViewAdapter>>, config: ViewConfig) -> ViewId {
        let id = {
            let mut guard = view.write();
            guard.initialize(config, self.dataset.clone());
            guard.id()
        };

        let subscription = Arc::new(ViewSubscription { view: view.clone() });
        self.store.subscribe(subscription.clone());
        self.subscriptions.push(subscription);
        self.views.push(view);

        tracing::info!(view = %id, "view registered");
        id
    }

    /// Forward a gesture to a view; commit any candidate selection it
    /// produces. The view lock is released before the store notifies, so
    /// a view receiving its own commit takes the same path as a sibling.
    pub fn dispatch(&self, view_id: ViewId, gesture: &Gesture) {
        let Some(view) = self.views.iter().find(|v| v.read().id() == view_id) else {
            tracing::warn!(view = %view_id, "gesture for unknown view dropped");
            return;
        };

        let candidate = view.write().handle_gesture(gesture);
        if let Some(candidate) = candidate {
            self.commit(candidate);
        }
    }

    /// Push a candidate selection through the store. Returns whether the
    /// store detected a change (and therefore notified the views).
    pub fn commit(&self, candidate: SelectionSet) -> bool {
        self.store.set(candidate)
    }

    /// Status line summary of the current selection.
    pub fn selection_summary(&self) -> String {
        format!(
            "{} of {} records selected",
            self.store.get().len(),
            self.dataset.len()
        )
    }

    /// Tear down all registered views and drop their subscriptions.
    pub fn teardown(&mut self) {
        for view in &self.views {
            view.write().teardown();
        }
        self.views.clear();
        self.subscriptions.clear();
    }
}

impl Drop for CoordinatorShell {
    fn drop(&mut self) {
        self.teardown();
    }
}

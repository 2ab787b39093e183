//! View adapter abstraction - base trait for the coordinated views

use std::sync::Arc;

use egui::Vec2;
use serde_json::Value;

use lv_core::{DataSet, SelectionSet};
use lv_render::{Gesture, RenderSurface};

/// Unique identifier for a view adapter
pub type ViewId = uuid::Uuid;

/// Composition-time configuration supplied once by the shell.
#[derive(Debug, Clone)]
pub struct ViewConfig {
    /// Chart pixel dimensions.
    pub size: Vec2,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            size: Vec2::new(600.0, 500.0),
        }
    }
}

/// Base trait for coordinated views.
///
/// A view owns its scene state, translates gestures into candidate
/// selections, and re-derives highlight/statistical state from selection
/// updates. Views never write to the selection store themselves: a
/// returned candidate from [`handle_gesture`](ViewAdapter::handle_gesture)
/// is a commit request the shell routes through the store.
pub trait ViewAdapter: Send + Sync {
    /// Get the unique ID of this view
    fn id(&self) -> ViewId;

    /// Get the title of this view
    fn title(&self) -> &str;

    /// Bind the view to its dataset and chart geometry. Called once by the
    /// composing shell before any gesture or render.
    fn initialize(&mut self, config: ViewConfig, dataset: Arc<DataSet>);

    /// Release scene state. The view renders nothing afterwards.
    fn teardown(&mut self);

    /// Translate a pointer gesture. A returned selection is a commit
    /// request for the shared store.
    fn handle_gesture(&mut self, gesture: &Gesture) -> Option<SelectionSet>;

    /// Selection update from the store. The same path serves local-echo
    /// and sibling-originated updates.
    fn update_selected_items(&mut self, selection: &SelectionSet);

    /// Draw the current scene through the rendering surface.
    fn render(&mut self, surface: &mut dyn RenderSurface);

    /// Save configuration
    fn save_config(&self) -> Value;

    /// Load configuration
    fn load_config(&mut self, config: Value);
}

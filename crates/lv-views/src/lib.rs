//! View system for the linked-views explorer
//!
//! The two view adapters (scatterplot, correlation heatmap) translate raw
//! pointer gestures into candidate selections and re-derive their visual
//! state from the shared [`lv_core::SelectionStore`]. The
//! [`CoordinatorShell`] composes them over one dataset and one store.

mod adapter;
pub mod colors;
pub mod heatmap;
pub mod scatter;
mod shell;

pub use adapter::{ViewAdapter, ViewConfig, ViewId};
pub use heatmap::{HeatmapConfig, HeatmapView};
pub use scatter::{ScatterplotConfig, ScatterplotView};
pub use shell::CoordinatorShell;

//! Core functionality for the linked-views explorer
//!
//! This crate provides the shared data model, the selection state hub and
//! the correlation engine that the view crates build on. Nothing in here
//! touches a rendering surface.

pub mod correlation;
pub mod dataset;
pub mod selection;

// Re-export commonly used types
pub use correlation::{compute_matrix, CorrelationCell, CorrelationMatrix};
pub use dataset::{DataSet, Record, Value};
pub use selection::{SelectionObserver, SelectionSet, SelectionStore};

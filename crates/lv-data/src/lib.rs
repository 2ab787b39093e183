//! Data ingestion for the linked-views explorer.
//!
//! The one input boundary of the system: parse a tabular source into an
//! indexed, immutable [`lv_core::DataSet`]. A failed load never leaves a
//! partially initialized dataset behind; callers keep their pre-load empty
//! state.

pub mod sources;

pub use sources::csv_table::CsvTable;

/// Errors from data loading.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

//! Results layout module
//!
//! Audit runs are persisted as `{root}/{domain}/{timestamp}/`, one JSON file
//! per page. The "latest results" lookup relies on this layout, so the
//! naming functions here are the only place that builds these paths.

mod layout;
mod summary;

pub use layout::{
    create_results_directory, latest_results_directory, page_identifier, report_file_name,
    results_directory, save_report_json, TIMESTAMP_FORMAT,
};
pub use summary::{violation_summary, ViolationSummary};

use thiserror::Error;

/// Errors raised while persisting or locating results
#[derive(Debug, Error)]
pub enum ResultsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Cannot derive a results path from URL: {0}")]
    InvalidUrl(String),
}

/// Result type alias for results operations
pub type ResultsResult<T> = std::result::Result<T, ResultsError>;

//! Error types for the dashboard pipeline.
//!
//! Every variant renders as a message fit to show the person who uploaded
//! the file; none of them should end the process.

use std::path::PathBuf;
use thiserror::Error;

/// Failure of one upload's cleaning pass.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// Required logical columns are absent after header normalization.
    #[error(
        "CSV file is missing required columns ({}). It must contain: Date, Platform, Sentiment, Location, Engagements, Media Type. Detected columns: {}",
        .missing.join(", "),
        .detected.join(", ")
    )]
    Schema {
        /// Normalized names that were not found.
        missing: Vec<String>,
        /// Header text exactly as it appeared in the file.
        detected: Vec<String>,
    },

    /// Every row was rejected by the date filter.
    #[error("No valid data found after cleaning. Please check the 'Date' column format in your CSV.")]
    EmptyDataset,

    /// Malformed CSV content.
    #[error("An error occurred while processing the file: {0}")]
    Csv(#[from] csv::Error),

    /// The upload could not be read.
    #[error("An error occurred while processing the file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An export file or directory could not be written.
    #[error("Failed to write '{path}': {source}")]
    Export {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DashboardError {
    /// Short machine-friendly kind, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            DashboardError::Schema { .. } => "schema",
            DashboardError::EmptyDataset => "empty_dataset",
            DashboardError::Csv(_) | DashboardError::Io { .. } => "parse",
            DashboardError::Export { .. } | DashboardError::Json(_) => "export",
        }
    }
}

/// Result type alias for dashboard operations.
pub type Result<T> = std::result::Result<T, DashboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_message_lists_missing_and_detected() {
        let err = DashboardError::Schema {
            missing: vec!["location".to_string()],
            detected: vec!["Date".to_string(), "Platform".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("missing required columns (location)"));
        assert!(msg.contains("Detected columns: Date, Platform"));
        assert_eq!(err.kind(), "schema");
    }

    #[test]
    fn export_failures_are_not_parse_errors() {
        let err = DashboardError::Export {
            path: PathBuf::from("out/platforms.csv"),
            source: std::io::Error::other("disk full"),
        };
        assert_eq!(err.kind(), "export");
        assert_eq!(err.to_string(), "Failed to write 'out/platforms.csv': disk full");
    }

    #[test]
    fn empty_dataset_message() {
        let msg = DashboardError::EmptyDataset.to_string();
        assert!(msg.starts_with("No valid data found after cleaning."));
    }
}

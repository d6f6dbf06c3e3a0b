//! Error types for batch ingestion.

use std::path::PathBuf;

use dlt_model::ModelError;
use thiserror::Error;

/// Errors that can occur while loading a batch file.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Batch file not found.
    #[error("batch file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === CSV Parsing Errors ===
    /// Malformed CSV.
    #[error("failed to parse CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Required column not found in the header row.
    #[error("required column '{column}' not found in {path}")]
    MissingColumn { column: &'static str, path: PathBuf },

    /// Batch file has a header but no rows.
    #[error("batch file has no entries: {path}")]
    EmptyBatch { path: PathBuf },

    // === Row Errors ===
    /// A required cell is empty.
    #[error("problem on line {line}: {column} is empty")]
    MissingValue { line: usize, column: &'static str },

    /// A cell failed argument validation.
    #[error("problem on line {line}: {source}")]
    InvalidArgument {
        line: usize,
        #[source]
        source: ModelError,
    },

    /// FILE_PATH names a local file that does not exist.
    #[error("problem on line {line}: {} does not exist", .path.display())]
    SourceNotFound { line: usize, path: PathBuf },

    /// The METADATA value is not a flat JSON object.
    #[error(
        "invalid METADATA{}: {message}",
        .line.map(|line| format!(" on line {line}")).unwrap_or_default()
    )]
    InvalidMetadata { line: Option<usize>, message: String },

    /// Modality is not in the configured allow-list.
    #[error("incorrect modality {modality} (expected one of: {allowed})")]
    UnsupportedModality { modality: String, allowed: String },
}

impl IngestError {
    pub(crate) fn at_line(self, line: usize) -> Self {
        match self {
            Self::InvalidMetadata { line: None, message } => Self::InvalidMetadata {
                line: Some(line),
                message,
            },
            other => other,
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

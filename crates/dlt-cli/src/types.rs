use std::path::{Path, PathBuf};

use dlt_ingest::IngestError;
use dlt_model::MetadataRecord;
use dlt_standardize::StandardizeError;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug)]
pub struct BatchResult {
    pub client_id: String,
    pub batch_file: PathBuf,
    pub rows: Vec<RowOutcome>,
}

impl BatchResult {
    pub fn succeeded(&self) -> usize {
        self.rows.iter().filter(|row| row.result.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.rows.len() - self.succeeded()
    }

    pub fn has_errors(&self) -> bool {
        self.failed() > 0
    }

    pub fn records(&self) -> impl Iterator<Item = StandardizedLine<'_>> {
        self.rows.iter().filter_map(|row| {
            row.result.as_ref().ok().map(|metadata| StandardizedLine {
                line: row.line,
                source_path: &row.source_path,
                metadata,
            })
        })
    }
}

#[derive(Debug)]
pub struct RowOutcome {
    pub line: usize,
    pub source_path: PathBuf,
    /// Standardized metadata, or why the row was rejected.
    pub result: Result<MetadataRecord, RowError>,
}

/// Reason a single batch row was rejected.
#[derive(Debug, Error)]
pub enum RowError {
    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Standardize(#[from] StandardizeError),
}

/// One line of JSON-lines output.
#[derive(Debug, Serialize)]
pub struct StandardizedLine<'a> {
    pub line: usize,
    pub source_path: &'a Path,
    pub metadata: &'a MetadataRecord,
}

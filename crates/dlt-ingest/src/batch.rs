//! Batch upload files.
//!
//! A batch file is a CSV whose header names at least the [`BATCH_COLUMNS`];
//! column order is free and extra columns are ignored. Each data row
//! describes one file to ingest.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, Trim};
use dlt_model::{CallerArguments, ClientId, MetadataRecord, Modality, ModelError, Mrn};
use tracing::debug;

use crate::error::{IngestError, Result};
use crate::metadata::parse_metadata_json;

pub const COLUMN_MODALITY: &str = "MODALITY";
pub const COLUMN_MRN: &str = "MRN";
pub const COLUMN_METADATA: &str = "METADATA";
pub const COLUMN_FILE_PATH: &str = "FILE_PATH";

/// Prefix of Cloud Storage URIs. Such sources are not checked locally.
const GCS_URI_PREFIX: &str = "gs://";

/// Columns every batch file header must contain.
pub const BATCH_COLUMNS: [&str; 4] = [
    COLUMN_MODALITY,
    COLUMN_MRN,
    COLUMN_METADATA,
    COLUMN_FILE_PATH,
];

/// One row of a batch file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchEntry {
    /// 1-based line in the batch file (the header is line 1).
    pub line: usize,
    /// `None` when the MODALITY cell is blank.
    pub modality: Option<Modality>,
    pub mrn: Mrn,
    pub metadata: MetadataRecord,
    /// Location of the file to upload.
    pub source_path: PathBuf,
}

impl BatchEntry {
    /// Caller arguments for standardizing this entry's metadata.
    pub fn arguments(&self, client_id: &ClientId) -> CallerArguments {
        let arguments = CallerArguments::new(client_id.clone(), self.mrn.clone());
        match &self.modality {
            Some(modality) => arguments.with_modality(modality.clone()),
            None => arguments,
        }
    }
}

struct ColumnIndex {
    modality: usize,
    mrn: usize,
    metadata: usize,
    file_path: usize,
}

impl ColumnIndex {
    fn locate(headers: &StringRecord, path: &Path) -> Result<Self> {
        let find = |column: &'static str| {
            headers
                .iter()
                .position(|h| h.trim_matches('\u{feff}').trim() == column)
                .ok_or_else(|| IngestError::MissingColumn {
                    column,
                    path: path.to_path_buf(),
                })
        };
        Ok(Self {
            modality: find(COLUMN_MODALITY)?,
            mrn: find(COLUMN_MRN)?,
            metadata: find(COLUMN_METADATA)?,
            file_path: find(COLUMN_FILE_PATH)?,
        })
    }
}

/// Reads and validates every row of a batch file.
///
/// Stops at the first invalid row; the error names its line. A local
/// FILE_PATH must name an existing file, resolved against the working
/// directory.
pub fn read_batch_file(path: &Path) -> Result<Vec<BatchEntry>> {
    let file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;
    read_batch_reader(file, path)
}

/// Reads a batch from any reader; `path` is only used in error messages.
pub fn read_batch_reader<R: Read>(reader: R, path: &Path) -> Result<Vec<BatchEntry>> {
    let csv_error = |source: csv::Error| IngestError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);
    let headers = reader.headers().map_err(csv_error)?.clone();
    let columns = ColumnIndex::locate(&headers, path)?;

    let mut entries = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_error)?;
        let line = record
            .position()
            .map_or(entries.len() + 2, |position| position.line() as usize);
        entries.push(parse_row(&record, &columns, line)?);
    }

    if entries.is_empty() {
        return Err(IngestError::EmptyBatch {
            path: path.to_path_buf(),
        });
    }
    debug!(path = %path.display(), entries = entries.len(), "read batch file");
    Ok(entries)
}

fn parse_row(record: &StringRecord, columns: &ColumnIndex, line: usize) -> Result<BatchEntry> {
    let cell = |idx: usize| record.get(idx).unwrap_or("");
    let invalid = |source: ModelError| IngestError::InvalidArgument { line, source };

    let modality = match cell(columns.modality) {
        "" => None,
        value => Some(Modality::new(value).map_err(invalid)?),
    };

    let mrn = match cell(columns.mrn) {
        "" => {
            return Err(IngestError::MissingValue {
                line,
                column: COLUMN_MRN,
            });
        }
        value => Mrn::parse(value).map_err(invalid)?,
    };

    let metadata = parse_metadata_json(cell(columns.metadata)).map_err(|e| e.at_line(line))?;

    let source_path = match cell(columns.file_path) {
        "" => {
            return Err(IngestError::MissingValue {
                line,
                column: COLUMN_FILE_PATH,
            });
        }
        value => PathBuf::from(value),
    };
    if !is_remote(&source_path) && !source_path.is_file() {
        return Err(IngestError::SourceNotFound {
            line,
            path: source_path,
        });
    }

    Ok(BatchEntry {
        line,
        modality,
        mrn,
        metadata,
        source_path,
    })
}

fn is_remote(path: &Path) -> bool {
    path.to_str().is_some_and(|value| value.starts_with(GCS_URI_PREFIX))
}

/// Checks a modality against an allow-list. An empty list accepts anything.
pub fn check_modality(modality: &Modality, allowed: &[String]) -> Result<()> {
    if allowed.is_empty() || allowed.iter().any(|m| m == modality.as_str()) {
        return Ok(());
    }
    Err(IngestError::UnsupportedModality {
        modality: modality.to_string(),
        allowed: allowed.join(", "),
    })
}

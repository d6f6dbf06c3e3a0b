//! Data lake batch ingestion utilities.
//!
//! This crate reads batch upload files and turns their rows into
//! [`BatchEntry`] values ready for metadata standardization.
//!
//! # Features
//!
//! - **Batch Files**: CSV with `MODALITY`, `MRN`, `METADATA` and `FILE_PATH` columns
//! - **Metadata Parsing**: JSON objects converted to string-valued metadata records
//! - **Modality Checks**: Optional allow-list of accepted modalities
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use dlt_ingest::read_batch_file;
//!
//! let entries = read_batch_file(Path::new("uploads/batch.csv"))?;
//! for entry in &entries {
//!     println!("line {}: {}", entry.line, entry.source_path.display());
//! }
//! ```

mod batch;
mod error;
mod metadata;

// === Error Types ===
pub use error::{IngestError, Result};

// === Batch Files ===
pub use batch::{BATCH_COLUMNS, BatchEntry, check_modality, read_batch_file, read_batch_reader};

// === Metadata ===
pub use metadata::parse_metadata_json;

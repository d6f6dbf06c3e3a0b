//! Batch standardization pipeline.
//!
//! 1. **Check**: modality against the configured allow-list
//! 2. **Standardize**: complete each row's metadata with the row's arguments
//! 3. **Output**: write successful rows as JSON lines
//!
//! A rejected row never stops the batch; its error is kept in the result.

use std::io::Write;

use anyhow::{Context, Result};
use dlt_ingest::{BatchEntry, check_modality};
use dlt_model::{ClientId, MetadataRecord};
use dlt_standardize::{MetadataCompleter, PatientHasher};
use tracing::{info, info_span, warn};

use crate::logging::redact_value;
use crate::types::{BatchResult, RowError, RowOutcome};

/// Standardizes every entry of a batch for one client.
pub fn standardize_batch<H: PatientHasher>(
    entries: Vec<BatchEntry>,
    client_id: &ClientId,
    completer: &MetadataCompleter<H>,
    allowed_modalities: &[String],
) -> Vec<RowOutcome> {
    let span = info_span!("batch", client_id = %client_id, entries = entries.len());
    let _guard = span.enter();

    let rows: Vec<RowOutcome> = entries
        .into_iter()
        .map(|entry| {
            let result = standardize_entry(&entry, client_id, completer, allowed_modalities);
            if let Err(error) = &result {
                warn!(
                    line = entry.line,
                    mrn = redact_value(entry.mrn.as_str()),
                    %error,
                    "batch row rejected"
                );
            }
            RowOutcome {
                line: entry.line,
                source_path: entry.source_path,
                result,
            }
        })
        .collect();

    let failed = rows.iter().filter(|row| row.result.is_err()).count();
    info!(rows = rows.len(), failed, "batch standardized");
    rows
}

fn standardize_entry<H: PatientHasher>(
    entry: &BatchEntry,
    client_id: &ClientId,
    completer: &MetadataCompleter<H>,
    allowed_modalities: &[String],
) -> std::result::Result<MetadataRecord, RowError> {
    if let Some(modality) = &entry.modality {
        check_modality(modality, allowed_modalities)?;
    }
    let record = completer.standardize(entry.metadata.clone(), &entry.arguments(client_id))?;
    Ok(record)
}

/// Writes each successful row as one JSON object per line.
///
/// Returns the number of lines written.
pub fn write_json_lines<W: Write>(result: &BatchResult, mut writer: W) -> Result<usize> {
    let mut written = 0;
    for line in result.records() {
        serde_json::to_writer(&mut writer, &line).context("serialize standardized record")?;
        writeln!(writer).context("write output")?;
        written += 1;
    }
    writer.flush().context("flush output")?;
    Ok(written)
}

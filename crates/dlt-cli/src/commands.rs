use std::fs::File;
use std::io::{self, BufWriter};

use anyhow::{Context, Result};
use dlt_ingest::{check_modality, parse_metadata_json, read_batch_file};
use dlt_model::{CallerArguments, ClientId, MetadataRecord, Mrn};
use dlt_standardize::MetadataCompleter;
use tracing::{debug, info};

use dlt_cli::config::ToolConfig;
use dlt_cli::logging::redact_value;
use dlt_cli::pipeline::{standardize_batch, write_json_lines};
use dlt_cli::types::BatchResult;

use crate::cli::{BatchArgs, HashArgs, StandardizeArgs};

pub fn run_standardize(args: &StandardizeArgs, config: &ToolConfig) -> Result<MetadataRecord> {
    let arguments = CallerArguments::from_raw(
        Some(args.client_id.as_str()),
        args.modality.as_deref(),
        Some(args.mrn.as_str()),
    )
    .context("invalid arguments")?;
    if let Some(modality) = arguments.modality() {
        check_modality(modality, &config.ingest.modalities)?;
    }

    let text = match (&args.metadata, &args.metadata_file) {
        (Some(json), _) => json.clone(),
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("read metadata file: {}", path.display()))?,
        (None, None) => String::new(),
    };
    let record = parse_metadata_json(&text)?;
    debug!(
        fields = record.len(),
        mrn = redact_value(arguments.mrn().as_str()),
        "standardizing record"
    );

    let completer = MetadataCompleter::new(config.hasher());
    Ok(completer.standardize(record, &arguments)?)
}

pub fn run_batch(args: &BatchArgs, config: &ToolConfig) -> Result<BatchResult> {
    let client_id = ClientId::new(args.client_id.as_str()).context("invalid client id")?;
    let entries = read_batch_file(&args.batch_file)?;
    info!(
        path = %args.batch_file.display(),
        entries = entries.len(),
        "loaded batch file"
    );

    let completer = MetadataCompleter::new(config.hasher());
    let rows = standardize_batch(entries, &client_id, &completer, &config.ingest.modalities);
    let result = BatchResult {
        client_id: client_id.to_string(),
        batch_file: args.batch_file.clone(),
        rows,
    };

    let written = match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("create output: {}", path.display()))?;
            write_json_lines(&result, BufWriter::new(file))?
        }
        None => write_json_lines(&result, io::stdout().lock())?,
    };
    debug!(written, "wrote standardized records");
    Ok(result)
}

pub fn run_hash(args: &HashArgs, config: &ToolConfig) -> Result<Vec<(String, String)>> {
    let client_id = ClientId::new(args.client_id.as_str()).context("invalid client id")?;
    let completer = MetadataCompleter::new(config.hasher());
    args.mrns
        .iter()
        .map(|raw| -> Result<(String, String)> {
            let mrn = Mrn::parse(raw)?;
            let arguments = CallerArguments::new(client_id.clone(), mrn.clone());
            let patient_id = completer.patient_id(&arguments)?;
            Ok((mrn.to_string(), patient_id))
        })
        .collect()
}

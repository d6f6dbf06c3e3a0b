//! Integration tests for the batch pipeline.

use std::fs;

use dlt_cli::config::ToolConfig;
use dlt_cli::pipeline::{standardize_batch, write_json_lines};
use dlt_cli::types::{BatchResult, RowError};
use dlt_ingest::{IngestError, read_batch_file};
use dlt_model::{ClientId, FieldKey};
use dlt_standardize::{MetadataCompleter, Sha256PatientHasher};
use tempfile::TempDir;

const BATCH: &str = "MODALITY,MRN,METADATA,FILE_PATH\n\
LAB,mrn-1,\"{\"\"SOURCE\"\":\"\"EHR\"\"}\",gs://uploads/lab1.pdf\n\
,UNKNOWN,,gs://uploads/note.txt\n\
XRAY,UNKNOWN,,gs://uploads/x.dcm\n";

fn run_batch(config: &ToolConfig) -> BatchResult {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("batch.csv");
    fs::write(&path, BATCH).expect("write batch");

    let entries = read_batch_file(&path).expect("read batch");
    let client_id = ClientId::new("c1").expect("client id");
    let completer = MetadataCompleter::new(config.hasher());
    let rows = standardize_batch(entries, &client_id, &completer, &config.ingest.modalities);
    BatchResult {
        client_id: client_id.to_string(),
        batch_file: path,
        rows,
    }
}

fn lab_only() -> ToolConfig {
    let mut config = ToolConfig::default();
    config.ingest.modalities = vec!["LAB".to_string()];
    config
}

#[test]
fn rejected_rows_do_not_stop_the_batch() {
    let result = run_batch(&lab_only());

    assert_eq!(result.rows.len(), 3);
    assert_eq!(result.succeeded(), 2);
    assert_eq!(result.failed(), 1);
    assert!(result.has_errors());

    let rejected = &result.rows[2];
    assert_eq!(rejected.line, 4);
    let error = rejected.result.as_ref().unwrap_err();
    assert!(matches!(
        error,
        RowError::Ingest(IngestError::UnsupportedModality { .. })
    ));
    assert_eq!(
        error.to_string(),
        "incorrect modality XRAY (expected one of: LAB)"
    );
}

#[test]
fn local_sources_must_exist() {
    let dir = TempDir::new().expect("temp dir");
    let source = dir.path().join("lab1.pdf");
    fs::write(&source, b"payload").expect("write source");
    let path = dir.path().join("batch.csv");
    fs::write(
        &path,
        format!(
            "MODALITY,MRN,METADATA,FILE_PATH\nLAB,mrn-1,,{}\nLAB,mrn-2,,{}\n",
            source.display(),
            dir.path().join("missing.pdf").display()
        ),
    )
    .expect("write batch");

    let err = read_batch_file(&path).unwrap_err();
    assert!(matches!(err, IngestError::SourceNotFound { line: 3, .. }));

    fs::write(
        &path,
        format!("MODALITY,MRN,METADATA,FILE_PATH\nLAB,mrn-1,,{}\n", source.display()),
    )
    .expect("write batch");
    let entries = read_batch_file(&path).expect("read batch");
    assert_eq!(entries[0].source_path, source);
}

#[test]
fn any_modality_is_accepted_without_allow_list() {
    let result = run_batch(&ToolConfig::default());
    assert!(!result.has_errors());

    let xray = result.rows[2].result.as_ref().expect("standardized");
    assert_eq!(xray.get(FieldKey::FilePath), Some("XRAY/UNKNOWN"));
}

#[test]
fn json_lines_output() {
    let result = run_batch(&lab_only());
    let mut buffer = Vec::new();
    let written = write_json_lines(&result, &mut buffer).expect("write json lines");
    assert_eq!(written, 2);

    let output = String::from_utf8(buffer).expect("utf8");
    insta::assert_snapshot!(output.trim_end(), @r#"
    {"line":2,"source_path":"gs://uploads/lab1.pdf","metadata":{"CLIENT_ID":"c1","MODALITY":"LAB","PATIENT_ID":"81bccfc8911167f5d30fdcdce924e4904e7231838d7a3fb365b06996aac8a0b4","FILE_PATH":"LAB/81bccfc8911167f5d30fdcdce924e4904e7231838d7a3fb365b06996aac8a0b4","DATE_OF_SERVICE":"UNKNOWN","TIME_OF_SERVICE":"UNKNOWN","LOCATION_OF_SERVICE":"UNKNOWN","SOURCE":"EHR","ORIGINATOR":"UNKNOWN"}}
    {"line":3,"source_path":"gs://uploads/note.txt","metadata":{"CLIENT_ID":"c1","PATIENT_ID":"UNKNOWN","DATE_OF_SERVICE":"UNKNOWN","TIME_OF_SERVICE":"UNKNOWN","LOCATION_OF_SERVICE":"UNKNOWN","SOURCE":"UNKNOWN","ORIGINATOR":"UNKNOWN"}}
    "#);
}

#[test]
fn configured_secret_changes_patient_ids() {
    let mut config = lab_only();
    config.hashing.secret = Some("pepper".to_string());
    let result = run_batch(&config);

    let lab = result.rows[0].result.as_ref().expect("standardized");
    assert_eq!(
        lab.get(FieldKey::PatientId),
        Some("c87314cf92f4809c3240d54d0e808f2f1d8ce384bb889f8f38678b664aa8af45")
    );
}

#[test]
fn hasher_without_secret_matches_default_config() {
    let direct = MetadataCompleter::new(Sha256PatientHasher::new());
    let configured = MetadataCompleter::new(ToolConfig::default().hasher());
    let arguments = dlt_model::CallerArguments::new(
        ClientId::new("c1").expect("client id"),
        dlt_model::Mrn::parse("mrn-1").expect("mrn"),
    );
    assert_eq!(
        direct.patient_id(&arguments).expect("hash"),
        configured.patient_id(&arguments).expect("hash")
    );
}

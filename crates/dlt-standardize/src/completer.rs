//! Record completion: required identifiers first, then descriptive defaults.

use std::collections::BTreeMap;

use dlt_model::{CallerArguments, FieldKey, MetadataRecord, Mrn, UNKNOWN};
use tracing::{debug, debug_span};

use crate::error::{HashError, Result};
use crate::hasher::PatientHasher;

/// Fills missing metadata fields without overwriting anything already set.
#[derive(Debug, Clone)]
pub struct MetadataCompleter<H> {
    hasher: H,
}

impl<H: PatientHasher> MetadataCompleter<H> {
    pub fn new(hasher: H) -> Self {
        Self { hasher }
    }

    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    /// Returns `record` with identifying fields and defaults filled in.
    ///
    /// Identifying fields are filled before defaults so that `FILE_PATH` sees
    /// the final `MODALITY` and `PATIENT_ID`. The hasher is called at most
    /// once, and only when `PATIENT_ID` is absent and the MRN is known.
    ///
    /// # Errors
    ///
    /// Hasher failures are returned unchanged.
    pub fn standardize(
        &self,
        mut record: MetadataRecord,
        arguments: &CallerArguments,
    ) -> Result<MetadataRecord> {
        let span = debug_span!("standardize", client_id = %arguments.client_id());
        let _guard = span.enter();

        self.fill_identifiers(&mut record, arguments)?;
        fill_defaults(&mut record);
        Ok(record)
    }

    /// Like [`standardize`](Self::standardize), reading the arguments from a
    /// `client_id` / `modality` / `mrn` map.
    ///
    /// # Errors
    ///
    /// Fails with a missing-argument error before touching the record when
    /// `client_id` or `mrn` is not in the map.
    pub fn standardize_with_map(
        &self,
        record: MetadataRecord,
        arguments: &BTreeMap<String, String>,
    ) -> Result<MetadataRecord> {
        let arguments = CallerArguments::from_map(arguments)?;
        self.standardize(record, &arguments)
    }

    /// Derives the pseudonymous patient id for the caller's MRN.
    pub fn patient_id(&self, arguments: &CallerArguments) -> Result<String> {
        match arguments.mrn() {
            Mrn::Unknown => Ok(UNKNOWN.to_string()),
            Mrn::Known(mrn) => {
                let mut ids = self.hasher.hash(arguments.client_id(), &[mrn.as_str()])?;
                if ids.len() != 1 {
                    return Err(HashError::LengthMismatch {
                        expected: 1,
                        actual: ids.len(),
                    }
                    .into());
                }
                Ok(ids.remove(0))
            }
        }
    }

    fn fill_identifiers(
        &self,
        record: &mut MetadataRecord,
        arguments: &CallerArguments,
    ) -> Result<()> {
        if record.fill(FieldKey::ClientId, arguments.client_id().as_str()) {
            debug!(field = %FieldKey::ClientId, "filled from arguments");
        }

        if let Some(modality) = arguments.modality()
            && record.fill(FieldKey::Modality, modality.as_str())
        {
            debug!(field = %FieldKey::Modality, "filled from arguments");
        }

        if !record.contains(FieldKey::PatientId) {
            let patient_id = self.patient_id(arguments)?;
            record.set(FieldKey::PatientId, patient_id);
            debug!(
                field = %FieldKey::PatientId,
                hashed = !arguments.mrn().is_unknown(),
                "derived patient id"
            );
        }

        if !record.contains(FieldKey::FilePath) {
            let derived = match (
                record.get(FieldKey::Modality),
                record.get(FieldKey::PatientId),
            ) {
                (Some(modality), Some(patient_id)) => Some(format!("{modality}/{patient_id}")),
                _ => None,
            };
            if let Some(file_path) = derived {
                debug!(field = %FieldKey::FilePath, "derived from modality and patient id");
                record.set(FieldKey::FilePath, file_path);
            }
        }

        Ok(())
    }
}

// MODALITY is not defaulted here: a record with no modality from either the
// caller or the input stays without one.
fn fill_defaults(record: &mut MetadataRecord) {
    for key in FieldKey::DEFAULTED {
        if record.fill(key, UNKNOWN) {
            debug!(field = %key, "defaulted to UNKNOWN");
        }
    }
}

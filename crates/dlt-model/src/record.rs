//! Metadata record for one ingested file.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::FieldKey;

/// Descriptive attributes of one ingested file.
///
/// Every recognized key has its own optional slot; unrecognized keys are kept
/// verbatim in `extra`. Serializes as a flat object keyed by field name with
/// absent fields omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataRecord {
    #[serde(rename = "CLIENT_ID", default, skip_serializing_if = "Option::is_none")]
    client_id: Option<String>,
    #[serde(rename = "MODALITY", default, skip_serializing_if = "Option::is_none")]
    modality: Option<String>,
    #[serde(rename = "PATIENT_ID", default, skip_serializing_if = "Option::is_none")]
    patient_id: Option<String>,
    #[serde(rename = "FILE_PATH", default, skip_serializing_if = "Option::is_none")]
    file_path: Option<String>,
    #[serde(
        rename = "DATE_OF_SERVICE",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    date_of_service: Option<String>,
    #[serde(
        rename = "TIME_OF_SERVICE",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    time_of_service: Option<String>,
    #[serde(
        rename = "LOCATION_OF_SERVICE",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    location_of_service: Option<String>,
    #[serde(rename = "SOURCE", default, skip_serializing_if = "Option::is_none")]
    source: Option<String>,
    #[serde(rename = "ORIGINATOR", default, skip_serializing_if = "Option::is_none")]
    originator: Option<String>,
    #[serde(flatten)]
    extra: BTreeMap<String, String>,
}

impl MetadataRecord {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, key: FieldKey) -> &Option<String> {
        match key {
            FieldKey::ClientId => &self.client_id,
            FieldKey::Modality => &self.modality,
            FieldKey::PatientId => &self.patient_id,
            FieldKey::FilePath => &self.file_path,
            FieldKey::DateOfService => &self.date_of_service,
            FieldKey::TimeOfService => &self.time_of_service,
            FieldKey::LocationOfService => &self.location_of_service,
            FieldKey::Source => &self.source,
            FieldKey::Originator => &self.originator,
        }
    }

    fn slot_mut(&mut self, key: FieldKey) -> &mut Option<String> {
        match key {
            FieldKey::ClientId => &mut self.client_id,
            FieldKey::Modality => &mut self.modality,
            FieldKey::PatientId => &mut self.patient_id,
            FieldKey::FilePath => &mut self.file_path,
            FieldKey::DateOfService => &mut self.date_of_service,
            FieldKey::TimeOfService => &mut self.time_of_service,
            FieldKey::LocationOfService => &mut self.location_of_service,
            FieldKey::Source => &mut self.source,
            FieldKey::Originator => &mut self.originator,
        }
    }

    pub fn get(&self, key: FieldKey) -> Option<&str> {
        self.slot(key).as_deref()
    }

    pub fn contains(&self, key: FieldKey) -> bool {
        self.slot(key).is_some()
    }

    /// Sets a recognized field, returning the previous value.
    pub fn set(&mut self, key: FieldKey, value: impl Into<String>) -> Option<String> {
        self.slot_mut(key).replace(value.into())
    }

    /// Sets a recognized field only if it is absent.
    ///
    /// Returns `true` when the value was written.
    pub fn fill(&mut self, key: FieldKey, value: impl Into<String>) -> bool {
        let slot = self.slot_mut(key);
        if slot.is_some() {
            return false;
        }
        *slot = Some(value.into());
        true
    }

    /// Inserts a value by field name, routing recognized names to their slot.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let name = name.into();
        match FieldKey::from_name(&name) {
            Some(key) => self.set(key, value),
            None => self.extra.insert(name, value.into()),
        }
    }

    /// Looks up any field by name, recognized or not.
    pub fn get_by_name(&self, name: &str) -> Option<&str> {
        match FieldKey::from_name(name) {
            Some(key) => self.get(key),
            None => self.extra.get(name).map(String::as_str),
        }
    }

    /// Fields not covered by [`FieldKey`].
    pub fn extra(&self) -> &BTreeMap<String, String> {
        &self.extra
    }

    /// Iterates present fields: recognized keys in canonical order, then extras.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        FieldKey::ALL
            .into_iter()
            .filter_map(move |key| self.get(key).map(|value| (key.as_str(), value)))
            .chain(
                self.extra
                    .iter()
                    .map(|(name, value)| (name.as_str(), value.as_str())),
            )
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    pub fn to_map(&self) -> BTreeMap<String, String> {
        self.iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect()
    }
}

impl<K, V> FromIterator<(K, V)> for MetadataRecord
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Self::new();
        for (name, value) in iter {
            record.insert(name, value);
        }
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_never_overwrites() {
        let mut record = MetadataRecord::new();
        assert!(record.fill(FieldKey::Source, "EHR"));
        assert!(!record.fill(FieldKey::Source, "UNKNOWN"));
        assert_eq!(record.get(FieldKey::Source), Some("EHR"));
    }

    #[test]
    fn insert_routes_by_name() {
        let mut record = MetadataRecord::new();
        record.insert("PATIENT_ID", "p-1");
        record.insert("SCANNER", "CT-3");
        assert_eq!(record.get(FieldKey::PatientId), Some("p-1"));
        assert_eq!(record.get_by_name("SCANNER"), Some("CT-3"));
        assert_eq!(record.extra().len(), 1);
        assert_eq!(record.len(), 2);
    }

    #[test]
    fn iter_is_in_canonical_order() {
        let record: MetadataRecord = [("ZZZ", "1"), ("SOURCE", "x"), ("CLIENT_ID", "c")]
            .into_iter()
            .collect();
        let names: Vec<&str> = record.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["CLIENT_ID", "SOURCE", "ZZZ"]);
    }
}

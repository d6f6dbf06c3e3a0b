//! Recognized metadata field keys.

use std::fmt;
use std::str::FromStr;

use crate::ModelError;

/// Sentinel for a field whose real value is not known.
///
/// Distinct from the field being absent: an `UNKNOWN` field is present.
pub const UNKNOWN: &str = "UNKNOWN";

/// A metadata key with dedicated handling during standardization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldKey {
    ClientId,
    Modality,
    PatientId,
    FilePath,
    DateOfService,
    TimeOfService,
    LocationOfService,
    Source,
    Originator,
}

impl FieldKey {
    /// All recognized keys in their canonical output order.
    pub const ALL: [FieldKey; 9] = [
        FieldKey::ClientId,
        FieldKey::Modality,
        FieldKey::PatientId,
        FieldKey::FilePath,
        FieldKey::DateOfService,
        FieldKey::TimeOfService,
        FieldKey::LocationOfService,
        FieldKey::Source,
        FieldKey::Originator,
    ];

    /// Descriptive keys that are defaulted to [`UNKNOWN`] when absent.
    ///
    /// `MODALITY` is intentionally not in this list.
    pub const DEFAULTED: [FieldKey; 5] = [
        FieldKey::DateOfService,
        FieldKey::TimeOfService,
        FieldKey::LocationOfService,
        FieldKey::Source,
        FieldKey::Originator,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            FieldKey::ClientId => "CLIENT_ID",
            FieldKey::Modality => "MODALITY",
            FieldKey::PatientId => "PATIENT_ID",
            FieldKey::FilePath => "FILE_PATH",
            FieldKey::DateOfService => "DATE_OF_SERVICE",
            FieldKey::TimeOfService => "TIME_OF_SERVICE",
            FieldKey::LocationOfService => "LOCATION_OF_SERVICE",
            FieldKey::Source => "SOURCE",
            FieldKey::Originator => "ORIGINATOR",
        }
    }

    /// Looks up a key by its exact (case-sensitive) name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_str() == name)
    }
}

impl FromStr for FieldKey {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| ModelError::UnknownField(s.to_string()))
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

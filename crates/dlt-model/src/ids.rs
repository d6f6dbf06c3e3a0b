#![deny(unsafe_code)]

use std::fmt;
use std::str::FromStr;

use crate::{ModelError, UNKNOWN};

/// Identifier of the client (tenant) that owns an ingested file.
///
/// Kept exactly as supplied; only a blank value is rejected.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct ClientId(String);

impl ClientId {
    pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ModelError::InvalidClientId(value));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Data-source category of a file, e.g. `LAB` or `IMAGING`.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Modality(String);

impl Modality {
    pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ModelError::InvalidModality(value));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A medical record number as supplied by the source system.
///
/// The literal `UNKNOWN` parses to [`Mrn::Unknown`]; any other value may
/// contain only letters, digits and hyphens.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Mrn {
    Unknown,
    Known(String),
}

impl Mrn {
    /// Parses a raw MRN. Whitespace is never stripped, so a padded value
    /// fails the character check instead of matching the sentinel.
    pub fn parse(value: &str) -> Result<Self, ModelError> {
        if value.is_empty() {
            return Err(ModelError::InvalidMrn {
                value: value.to_string(),
                reason: "empty",
            });
        }
        if value == UNKNOWN {
            return Ok(Self::Unknown);
        }
        if !value.chars().all(|c| c.is_alphanumeric() || c == '-') {
            return Err(ModelError::InvalidMrn {
                value: value.to_string(),
                reason: "does not contain only letters, digits and hyphens",
            });
        }
        Ok(Self::Known(value.to_string()))
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Unknown => UNKNOWN,
            Self::Known(value) => value,
        }
    }
}

impl FromStr for Mrn {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Mrn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

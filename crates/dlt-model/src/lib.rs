//! Data model for data lake file metadata.
//!
//! A [`MetadataRecord`] describes one ingested file. The recognized keys are
//! enumerated by [`FieldKey`]; anything else is carried through untouched.
//! [`CallerArguments`] holds the per-call context (client, modality, MRN)
//! used to complete a record.

pub mod arguments;
pub mod error;
pub mod field;
pub mod ids;
pub mod record;

pub use arguments::CallerArguments;
pub use error::{ModelError, Result};
pub use field::{FieldKey, UNKNOWN};
pub use ids::{ClientId, Modality, Mrn};
pub use record::MetadataRecord;

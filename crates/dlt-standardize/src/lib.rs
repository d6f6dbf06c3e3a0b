//! Completion of data lake file metadata.
//!
//! [`MetadataCompleter`] fills the identifying fields of a
//! [`MetadataRecord`](dlt_model::MetadataRecord) from caller arguments and
//! defaults the descriptive fields to `UNKNOWN`. Patient identifiers are
//! derived through a [`PatientHasher`].
//!
//! # Example
//!
//! ```
//! use dlt_model::{CallerArguments, ClientId, FieldKey, MetadataRecord, Modality, Mrn};
//! use dlt_standardize::{MetadataCompleter, Sha256PatientHasher};
//!
//! let completer = MetadataCompleter::new(Sha256PatientHasher::default());
//! let arguments = CallerArguments::new(ClientId::new("c1")?, Mrn::Unknown)
//!     .with_modality(Modality::new("LAB")?);
//! let record = completer.standardize(MetadataRecord::new(), &arguments)?;
//! assert_eq!(record.get(FieldKey::FilePath), Some("LAB/UNKNOWN"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod completer;
mod error;
mod hasher;

pub use completer::MetadataCompleter;
pub use error::{HashError, Result, StandardizeError};
pub use hasher::{PatientHasher, Sha256PatientHasher};

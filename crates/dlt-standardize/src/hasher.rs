#![deny(unsafe_code)]

use std::fmt;

use dlt_model::ClientId;
use sha2::{Digest, Sha256};

use crate::HashError;

/// Maps medical record numbers to pseudonymous patient identifiers.
///
/// Implementations must be deterministic for a given `(client_id, mrn)` pair
/// and return exactly one identifier per input MRN, in order.
pub trait PatientHasher {
    fn hash(&self, client_id: &ClientId, mrns: &[&str]) -> Result<Vec<String>, HashError>;
}

impl<F> PatientHasher for F
where
    F: Fn(&ClientId, &[&str]) -> Result<Vec<String>, HashError>,
{
    fn hash(&self, client_id: &ClientId, mrns: &[&str]) -> Result<Vec<String>, HashError> {
        self(client_id, mrns)
    }
}

/// Lowercase hex SHA-256 over `secret \0 client_id \0 mrn`.
///
/// The optional secret keeps identifiers from being recomputed by anyone who
/// only knows the client id and MRN.
#[derive(Clone, Default)]
pub struct Sha256PatientHasher {
    secret: Option<String>,
}

impl Sha256PatientHasher {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = Some(secret.into()).filter(|s| !s.is_empty());
        self
    }

    pub fn has_secret(&self) -> bool {
        self.secret.is_some()
    }

    fn patient_id(&self, client_id: &ClientId, mrn: &str) -> String {
        let mut hasher = Sha256::new();
        if let Some(secret) = &self.secret {
            hasher.update(secret.as_bytes());
        }
        hasher.update([0u8]);
        hasher.update(client_id.as_str().as_bytes());
        hasher.update([0u8]);
        hasher.update(mrn.as_bytes());
        hex::encode(hasher.finalize())
    }
}

impl PatientHasher for Sha256PatientHasher {
    fn hash(&self, client_id: &ClientId, mrns: &[&str]) -> Result<Vec<String>, HashError> {
        Ok(mrns
            .iter()
            .map(|mrn| self.patient_id(client_id, mrn))
            .collect())
    }
}

impl fmt::Debug for Sha256PatientHasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sha256PatientHasher")
            .field("secret", &self.secret.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

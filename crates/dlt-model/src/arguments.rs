//! Caller-supplied context for completing a metadata record.

use std::collections::BTreeMap;

use crate::{ClientId, Modality, ModelError, Mrn, Result};

pub const ARG_CLIENT_ID: &str = "client_id";
pub const ARG_MODALITY: &str = "modality";
pub const ARG_MRN: &str = "mrn";

/// Immutable per-call arguments for record completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerArguments {
    client_id: ClientId,
    modality: Option<Modality>,
    mrn: Mrn,
}

impl CallerArguments {
    pub fn new(client_id: ClientId, mrn: Mrn) -> Self {
        Self {
            client_id,
            modality: None,
            mrn,
        }
    }

    #[must_use]
    pub fn with_modality(mut self, modality: Modality) -> Self {
        self.modality = Some(modality);
        self
    }

    pub fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    pub fn modality(&self) -> Option<&Modality> {
        self.modality.as_ref()
    }

    pub fn mrn(&self) -> &Mrn {
        &self.mrn
    }

    /// Builds arguments from loosely typed values.
    ///
    /// `client_id` and `mrn` are required; a present but blank modality is
    /// rejected rather than ignored.
    pub fn from_raw(
        client_id: Option<&str>,
        modality: Option<&str>,
        mrn: Option<&str>,
    ) -> Result<Self> {
        let client_id = client_id.ok_or(ModelError::MissingArgument {
            name: ARG_CLIENT_ID,
        })?;
        let mrn = mrn.ok_or(ModelError::MissingArgument { name: ARG_MRN })?;
        let mut arguments = Self::new(ClientId::new(client_id)?, Mrn::parse(mrn)?);
        if let Some(modality) = modality {
            arguments.modality = Some(Modality::new(modality)?);
        }
        Ok(arguments)
    }

    /// Builds arguments from a `name -> value` map using the keys
    /// `client_id`, `modality` and `mrn`. Other keys are ignored.
    pub fn from_map(map: &BTreeMap<String, String>) -> Result<Self> {
        Self::from_raw(
            map.get(ARG_CLIENT_ID).map(String::as_str),
            map.get(ARG_MODALITY).map(String::as_str),
            map.get(ARG_MRN).map(String::as_str),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_client_id_is_named() {
        let err = CallerArguments::from_raw(None, Some("LAB"), Some("123")).unwrap_err();
        assert_eq!(err, ModelError::MissingArgument { name: "client_id" });
    }

    #[test]
    fn missing_mrn_is_named() {
        let err = CallerArguments::from_raw(Some("c1"), None, None).unwrap_err();
        assert_eq!(err, ModelError::MissingArgument { name: "mrn" });
    }

    #[test]
    fn blank_modality_is_rejected() {
        let err = CallerArguments::from_raw(Some("c1"), Some(" "), Some("1")).unwrap_err();
        assert!(matches!(err, ModelError::InvalidModality(_)));
    }

    #[test]
    fn values_are_not_rewritten() {
        let arguments =
            CallerArguments::from_raw(Some(" c1 "), Some(" LAB "), Some("123")).expect("arguments");
        assert_eq!(arguments.client_id().as_str(), " c1 ");
        assert_eq!(arguments.modality().map(Modality::as_str), Some(" LAB "));

        let err =
            CallerArguments::from_raw(Some("c1"), Some("LAB"), Some(" UNKNOWN ")).unwrap_err();
        assert!(matches!(err, ModelError::InvalidMrn { .. }));
    }
}

//! METADATA column parsing.

use dlt_model::MetadataRecord;
use serde_json::Value;

use crate::error::{IngestError, Result};

/// Parses a METADATA cell into a record.
///
/// Blank text is an empty record. Otherwise the text must be a JSON object;
/// string values are kept verbatim, numbers and booleans use their JSON text,
/// and `null` values are dropped so the field counts as absent.
pub fn parse_metadata_json(text: &str) -> Result<MetadataRecord> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(MetadataRecord::new());
    }

    let value: Value = serde_json::from_str(text).map_err(|e| invalid(e.to_string()))?;
    let Value::Object(object) = value else {
        return Err(invalid(format!("expected an object, found {}", kind(&value))));
    };

    let mut record = MetadataRecord::new();
    for (name, value) in object {
        let text = match value {
            Value::Null => continue,
            Value::String(text) => text,
            Value::Bool(flag) => flag.to_string(),
            Value::Number(number) => number.to_string(),
            Value::Array(_) | Value::Object(_) => {
                return Err(invalid(format!(
                    "field '{name}' must be a scalar, found {}",
                    kind(&value)
                )));
            }
        };
        record.insert(name, text);
    }
    Ok(record)
}

fn invalid(message: String) -> IngestError {
    IngestError::InvalidMetadata {
        line: None,
        message,
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use dlt_model::FieldKey;

    use super::*;

    #[test]
    fn blank_is_empty_record() {
        assert!(parse_metadata_json("  ").expect("parse").is_empty());
    }

    #[test]
    fn scalars_become_strings() {
        let record =
            parse_metadata_json(r#"{"SOURCE":"EHR","VISIT":3,"FASTING":true,"ORIGINATOR":null}"#)
                .expect("parse");
        assert_eq!(record.get(FieldKey::Source), Some("EHR"));
        assert_eq!(record.get_by_name("VISIT"), Some("3"));
        assert_eq!(record.get_by_name("FASTING"), Some("true"));
        assert_eq!(record.get(FieldKey::Originator), None);
    }

    #[test]
    fn nested_values_are_rejected() {
        let err = parse_metadata_json(r#"{"TAGS":["a","b"]}"#).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid METADATA: field 'TAGS' must be a scalar, found an array"
        );
    }

    #[test]
    fn non_object_is_rejected() {
        let err = parse_metadata_json("[1,2]").unwrap_err();
        assert!(matches!(err, IngestError::InvalidMetadata { line: None, .. }));
    }
}

//! Result envelope: the shape every query execution returns
//!
//! The transport bridge serializes the envelope unchanged; it never reshapes
//! partial data or errors.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An error scoped to a single field, annotated with its path from the root
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRecord {
    /// Human-readable message
    pub message: String,

    /// Field names (and list indices, as decimal strings) from the query
    /// root down to the failing field
    pub path: Vec<String>,
}

impl ErrorRecord {
    pub fn new(message: impl Into<String>, path: Vec<String>) -> Self {
        Self {
            message: message.into(),
            path,
        }
    }
}

/// The standard result envelope: partial data plus path-qualified errors
///
/// `data` is absent only when the root field itself could not be resolved;
/// otherwise it contains whatever values could be resolved, with failed
/// fields set to `null` in their place.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ResultEnvelope {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ErrorRecord>,
}

impl ResultEnvelope {
    /// A successful envelope with no errors
    pub fn data(data: Value) -> Self {
        Self {
            data: Some(data),
            errors: Vec::new(),
        }
    }

    /// A short-circuit envelope for a root-level failure: no data at all
    pub fn root_error(message: impl Into<String>, path: Vec<String>) -> Self {
        Self {
            data: None,
            errors: vec![ErrorRecord::new(message, path)],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_data_envelope_omits_errors_key() {
        let envelope = ResultEnvelope::data(json!({ "books": [] }));
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value, json!({ "data": { "books": [] } }));
    }

    #[test]
    fn test_root_error_envelope_omits_data_key() {
        let envelope = ResultEnvelope::root_error("Unknown type 'Query'", vec!["books".into()]);
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(
            value,
            json!({ "errors": [{ "message": "Unknown type 'Query'", "path": ["books"] }] })
        );
    }

    #[test]
    fn test_partial_envelope_carries_both_keys() {
        let envelope = ResultEnvelope {
            data: Some(json!({ "book": { "title": null } })),
            errors: vec![ErrorRecord::new("boom", vec!["book".into(), "title".into()])],
        };
        let value = serde_json::to_value(&envelope).unwrap();
        assert!(value.get("data").is_some());
        assert!(value.get("errors").is_some());
    }
}

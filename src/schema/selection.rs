//! Selection trees: the caller's declaration of which fields it wants
//!
//! The crate does not parse a textual query language; the transport bridge
//! hands over selection trees in this structured form (decoded straight from
//! a JSON request body).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One requested field, with optional arguments and sub-selection
///
/// A node with a non-empty sub-selection is only valid against a field whose
/// declared kind is object or list; the engine enforces this per field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SelectionNode {
    /// Requested field name
    pub name: String,

    /// Arguments passed to the field's resolver
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub args: Map<String, Value>,

    /// Nested fields requested under this one, in the order given
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub selection: Vec<SelectionNode>,
}

impl SelectionNode {
    /// A leaf field with no arguments or sub-selection
    pub fn field(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Map::new(),
            selection: Vec::new(),
        }
    }

    /// A field with a sub-selection
    pub fn nested(name: impl Into<String>, selection: Vec<SelectionNode>) -> Self {
        Self {
            name: name.into(),
            args: Map::new(),
            selection,
        }
    }

    /// Attach an argument
    pub fn with_arg(mut self, key: impl Into<String>, value: Value) -> Self {
        self.args.insert(key.into(), value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_from_request_shape() {
        let body = json!([
            { "name": "title" },
            { "name": "author", "selection": [ { "name": "name" } ] }
        ]);

        let selection: Vec<SelectionNode> = serde_json::from_value(body).unwrap();
        assert_eq!(selection.len(), 2);
        assert_eq!(selection[0].name, "title");
        assert!(selection[0].selection.is_empty());
        assert_eq!(selection[1].selection[0].name, "name");
    }

    #[test]
    fn test_serialize_skips_empty_args_and_selection() {
        let node = SelectionNode::field("title");
        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(value, json!({ "name": "title" }));
    }

    #[test]
    fn test_args_round_trip() {
        let node = SelectionNode::field("books").with_arg("limit", json!(10));
        let value = serde_json::to_value(&node).unwrap();
        let back: SelectionNode = serde_json::from_value(value).unwrap();
        assert_eq!(back.args.get("limit"), Some(&json!(10)));
    }
}

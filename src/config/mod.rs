//! Declarative schema configuration
//!
//! A schema can be declared in YAML and resolved into a [`TypeRegistry`]:
//!
//! ```yaml
//! root: Query
//! types:
//!   - name: Query
//!     fields:
//!       - { name: books, kind: list, of: Book }
//!   - name: Book
//!     fields:
//!       - { name: title, kind: scalar }
//!       - { name: author, kind: object, of: Author }
//!   - name: Author
//!     fields:
//!       - { name: name, kind: scalar }
//!       - { name: books, kind: list, of: Book }
//! ```
//!
//! Types may reference each other in any order; cycles are expected.

use serde::{Deserialize, Serialize};

use crate::core::error::{ConfigError, ShapeError, ShapeResult};
use crate::schema::{ObjectType, TypeRegistry};

fn default_root() -> String {
    "Query".to_string()
}

/// One field declaration
///
/// `kind` is one of `scalar`, `object`, or `list`; `of` names the referenced
/// type and is required for `object` and `list`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldConfig {
    pub name: String,

    pub kind: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub of: Option<String>,
}

/// One object type declaration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeConfig {
    pub name: String,

    #[serde(default)]
    pub fields: Vec<FieldConfig>,
}

/// Complete declarative schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaConfig {
    /// Root query type name
    #[serde(default = "default_root")]
    pub root: String,

    /// Declared object types
    pub types: Vec<TypeConfig>,
}

impl SchemaConfig {
    /// Load a schema from a YAML file
    pub fn from_yaml_file(path: &str) -> ShapeResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|err| {
            if err.kind() == std::io::ErrorKind::NotFound {
                ShapeError::Config(ConfigError::FileNotFound {
                    path: path.to_string(),
                })
            } else {
                err.into()
            }
        })?;
        serde_yaml::from_str(&content).map_err(|err| {
            ShapeError::Config(ConfigError::ParseError {
                file: Some(path.to_string()),
                message: err.to_string(),
            })
        })
    }

    /// Load a schema from a YAML string
    pub fn from_yaml_str(yaml: &str) -> ShapeResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Resolve the declaration into a type registry
    pub fn into_registry(self) -> ShapeResult<TypeRegistry> {
        let mut registry = TypeRegistry::new();
        for type_config in self.types {
            let type_name = type_config.name;
            let mut object_type = ObjectType::new(type_name.clone());
            for field in type_config.fields {
                object_type = match field.kind.as_str() {
                    "scalar" => object_type.scalar(field.name),
                    "object" => object_type.object(field.name, require_of(&type_name, field.of)?),
                    "list" => object_type.list(field.name, require_of(&type_name, field.of)?),
                    other => {
                        return Err(ShapeError::Config(ConfigError::InvalidValue {
                            field: format!("{}.{}", type_name, field.name),
                            value: other.to_string(),
                            message: "expected one of 'scalar', 'object', 'list'".to_string(),
                        }));
                    }
                };
            }
            registry.register(object_type)?;
        }
        Ok(registry)
    }
}

/// `object` and `list` fields must name the type they reference
fn require_of(type_name: &str, of: Option<String>) -> ShapeResult<String> {
    of.ok_or_else(|| {
        ShapeError::Config(ConfigError::MissingField {
            field: "of".to_string(),
            context: format!("field declaration of type '{}'", type_name),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldKind;

    const BOOKSTORE_SCHEMA: &str = r#"
types:
  - name: Query
    fields:
      - { name: books, kind: list, of: Book }
  - name: Book
    fields:
      - { name: title, kind: scalar }
      - { name: author, kind: object, of: Author }
  - name: Author
    fields:
      - { name: name, kind: scalar }
      - { name: books, kind: list, of: Book }
"#;

    #[test]
    fn test_parse_bookstore_schema() {
        let config = SchemaConfig::from_yaml_str(BOOKSTORE_SCHEMA).unwrap();
        assert_eq!(config.root, "Query");
        assert_eq!(config.types.len(), 3);
    }

    #[test]
    fn test_into_registry_resolves_cyclic_declarations() {
        let registry = SchemaConfig::from_yaml_str(BOOKSTORE_SCHEMA)
            .unwrap()
            .into_registry()
            .unwrap();

        assert_eq!(
            registry.lookup_field("Book", "author").unwrap(),
            &FieldKind::Object("Author".to_string())
        );
        assert_eq!(
            registry.lookup_field("Author", "books").unwrap(),
            &FieldKind::List("Book".to_string())
        );
    }

    #[test]
    fn test_duplicate_type_declaration_fails() {
        let yaml = r#"
types:
  - name: Book
  - name: Book
"#;
        let result = SchemaConfig::from_yaml_str(yaml).unwrap().into_registry();
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_field_kind_is_invalid_value() {
        let yaml = r#"
types:
  - name: Book
    fields:
      - { name: title, kind: text }
"#;
        let result = SchemaConfig::from_yaml_str(yaml).unwrap().into_registry();
        assert!(matches!(
            result,
            Err(ShapeError::Config(ConfigError::InvalidValue { .. }))
        ));
    }

    #[test]
    fn test_object_field_requires_target_type() {
        let yaml = r#"
types:
  - name: Book
    fields:
      - { name: author, kind: object }
"#;
        let result = SchemaConfig::from_yaml_str(yaml).unwrap().into_registry();
        assert!(matches!(
            result,
            Err(ShapeError::Config(ConfigError::MissingField { .. }))
        ));
    }

    #[test]
    fn test_invalid_yaml_is_parse_error() {
        let result = SchemaConfig::from_yaml_str("types: [not valid");
        assert!(matches!(
            result,
            Err(ShapeError::Config(ConfigError::ParseError { .. }))
        ));
    }

    #[test]
    fn test_missing_file_is_file_not_found() {
        let result = SchemaConfig::from_yaml_file("/nonexistent/schema.yaml");
        assert!(matches!(
            result,
            Err(ShapeError::Config(ConfigError::FileNotFound { .. }))
        ));
    }

    #[test]
    fn test_yaml_round_trip() {
        let config = SchemaConfig::from_yaml_str(BOOKSTORE_SCHEMA).unwrap();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed = SchemaConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(parsed.types.len(), config.types.len());
    }
}

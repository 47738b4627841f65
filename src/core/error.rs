//! Typed error handling for shapeql
//!
//! This module provides the error type hierarchy used across the crate so
//! that embedding applications can handle failures specifically rather than
//! dealing with generic `anyhow::Error` values.
//!
//! # Error Categories
//!
//! - [`SchemaError`]: Errors raised while building the type registry or
//!   validating resolver bindings at startup
//! - [`ResolveError`]: Errors raised while resolving a single field of a
//!   query; these are always scoped to that field and collected into the
//!   result envelope rather than aborting the query
//! - [`ConfigError`]: Errors related to declarative schema configuration
//!
//! # Example
//!
//! ```rust,ignore
//! use shapeql::prelude::*;
//!
//! match QueryExecutor::new(registry, resolvers, "Query") {
//!     Ok(executor) => { /* ... */ }
//!     Err(ShapeError::Schema(SchemaError::MissingRootResolver { field, .. })) => {
//!         eprintln!("root field '{}' has no resolver bound", field);
//!     }
//!     Err(e) => eprintln!("startup failed: {}", e),
//! }
//! ```

use std::fmt;

/// The main error type for shapeql
///
/// Each variant wraps a more specific error type for that category.
#[derive(Debug)]
pub enum ShapeError {
    /// Schema registration and startup validation errors
    Schema(SchemaError),

    /// Field resolution errors (always scoped to a single field)
    Resolve(ResolveError),

    /// Declarative configuration errors
    Config(ConfigError),

    /// Internal errors (should not happen in normal operation)
    Internal(String),
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeError::Schema(e) => write!(f, "{}", e),
            ShapeError::Resolve(e) => write!(f, "{}", e),
            ShapeError::Config(e) => write!(f, "{}", e),
            ShapeError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ShapeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ShapeError::Schema(e) => Some(e),
            ShapeError::Resolve(e) => Some(e),
            ShapeError::Config(e) => Some(e),
            ShapeError::Internal(_) => None,
        }
    }
}

impl ShapeError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ShapeError::Schema(e) => e.error_code(),
            ShapeError::Resolve(e) => e.error_code(),
            ShapeError::Config(_) => "CONFIG_ERROR",
            ShapeError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

// =============================================================================
// Schema Errors
// =============================================================================

/// Errors raised while building the type registry or validating resolver
/// bindings against it at startup
#[derive(Debug)]
pub enum SchemaError {
    /// A type with the same name is already registered
    DuplicateType { type_name: String },

    /// A resolver binding names a type that is not declared
    UnknownType { type_name: String },

    /// A resolver binding names a field that is not declared on its type
    UnknownField { type_name: String, field: String },

    /// A root field has no resolver bound
    ///
    /// Root fields have a synthetic empty parent, so default resolution can
    /// never produce anything for them.
    MissingRootResolver { type_name: String, field: String },
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaError::DuplicateType { type_name } => {
                write!(f, "Type '{}' is already registered", type_name)
            }
            SchemaError::UnknownType { type_name } => {
                write!(f, "Resolver bound to unknown type '{}'", type_name)
            }
            SchemaError::UnknownField { type_name, field } => {
                write!(
                    f,
                    "Resolver bound to unknown field '{}' on type '{}'",
                    field, type_name
                )
            }
            SchemaError::MissingRootResolver { type_name, field } => {
                write!(
                    f,
                    "Root field '{}' on type '{}' has no resolver bound",
                    field, type_name
                )
            }
        }
    }
}

impl std::error::Error for SchemaError {}

impl SchemaError {
    pub fn error_code(&self) -> &'static str {
        match self {
            SchemaError::DuplicateType { .. } => "DUPLICATE_TYPE",
            SchemaError::UnknownType { .. } => "UNKNOWN_TYPE",
            SchemaError::UnknownField { .. } => "UNKNOWN_FIELD",
            SchemaError::MissingRootResolver { .. } => "MISSING_ROOT_RESOLVER",
        }
    }
}

impl From<SchemaError> for ShapeError {
    fn from(err: SchemaError) -> Self {
        ShapeError::Schema(err)
    }
}

// =============================================================================
// Resolve Errors
// =============================================================================

/// Errors raised while resolving a single field of a query
///
/// These never abort the query: the engine scopes them to the field whose
/// resolution produced them, sets that field's value to `null`, and keeps
/// resolving siblings and ancestors.
#[derive(Debug)]
pub enum ResolveError {
    /// A field's declared type (or the root type) does not exist in the
    /// registry; forward references are validated here, at resolution time
    UnknownType { type_name: String },

    /// The requested field is not declared on the type
    UnknownField { type_name: String, field: String },

    /// A sub-selection was given for a scalar field
    InvalidSelection { type_name: String, field: String },

    /// An object or list field was requested without a sub-selection
    MissingSelection { type_name: String, field: String },

    /// The resolved value's runtime shape does not match the declared kind
    TypeMismatch {
        type_name: String,
        field: String,
        expected: &'static str,
    },

    /// The resolver itself failed
    ResolverFailed {
        type_name: String,
        field: String,
        message: String,
    },
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveError::UnknownType { type_name } => {
                write!(f, "Unknown type '{}'", type_name)
            }
            ResolveError::UnknownField { type_name, field } => {
                write!(f, "Unknown field '{}' on type '{}'", field, type_name)
            }
            ResolveError::InvalidSelection { type_name, field } => {
                write!(
                    f,
                    "Field '{}' on type '{}' is a scalar and does not accept a sub-selection",
                    field, type_name
                )
            }
            ResolveError::MissingSelection { type_name, field } => {
                write!(
                    f,
                    "Field '{}' on type '{}' requires a sub-selection",
                    field, type_name
                )
            }
            ResolveError::TypeMismatch {
                type_name,
                field,
                expected,
            } => {
                write!(
                    f,
                    "Field '{}' on type '{}' resolved to a value that is not {}",
                    field, type_name, expected
                )
            }
            ResolveError::ResolverFailed {
                type_name,
                field,
                message,
            } => {
                write!(
                    f,
                    "Resolver for field '{}' on type '{}' failed: {}",
                    field, type_name, message
                )
            }
        }
    }
}

impl std::error::Error for ResolveError {}

impl ResolveError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ResolveError::UnknownType { .. } => "UNKNOWN_TYPE",
            ResolveError::UnknownField { .. } => "UNKNOWN_FIELD",
            ResolveError::InvalidSelection { .. } => "INVALID_SELECTION",
            ResolveError::MissingSelection { .. } => "MISSING_SELECTION",
            ResolveError::TypeMismatch { .. } => "TYPE_MISMATCH",
            ResolveError::ResolverFailed { .. } => "RESOLVER_FAILED",
        }
    }
}

impl From<ResolveError> for ShapeError {
    fn from(err: ResolveError) -> Self {
        ShapeError::Resolve(err)
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to declarative schema configuration
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to parse a configuration document
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// Missing required field in configuration
    MissingField { field: String, context: String },

    /// Invalid value in configuration
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },

    /// Configuration file not found
    FileNotFound { path: String },

    /// IO error while reading configuration
    IoError { message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError { file, message } => {
                if let Some(file) = file {
                    write!(f, "Failed to parse schema file '{}': {}", file, message)
                } else {
                    write!(f, "Failed to parse schema: {}", message)
                }
            }
            ConfigError::MissingField { field, context } => {
                write!(f, "Missing required field '{}' in {}", field, context)
            }
            ConfigError::InvalidValue {
                field,
                value,
                message,
            } => {
                write!(
                    f,
                    "Invalid value '{}' for field '{}': {}",
                    value, field, message
                )
            }
            ConfigError::FileNotFound { path } => {
                write!(f, "Schema file not found: {}", path)
            }
            ConfigError::IoError { message } => {
                write!(f, "IO error: {}", message)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for ShapeError {
    fn from(err: ConfigError) -> Self {
        ShapeError::Config(err)
    }
}

// =============================================================================
// Conversions from external errors
// =============================================================================

impl From<serde_yaml::Error> for ShapeError {
    fn from(err: serde_yaml::Error) -> Self {
        ShapeError::Config(ConfigError::ParseError {
            file: None,
            message: err.to_string(),
        })
    }
}

impl From<std::io::Error> for ShapeError {
    fn from(err: std::io::Error) -> Self {
        ShapeError::Config(ConfigError::IoError {
            message: err.to_string(),
        })
    }
}

// =============================================================================
// Result type alias
// =============================================================================

/// A specialized Result type for shapeql operations
pub type ShapeResult<T> = Result<T, ShapeError>;

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_error_display() {
        let err = SchemaError::DuplicateType {
            type_name: "Book".to_string(),
        };
        assert!(err.to_string().contains("Book"));
        assert!(err.to_string().contains("already registered"));
    }

    #[test]
    fn test_resolve_error_display() {
        let err = ResolveError::UnknownField {
            type_name: "Book".to_string(),
            field: "isbn".to_string(),
        };
        assert!(err.to_string().contains("isbn"));
        assert!(err.to_string().contains("Book"));
    }

    #[test]
    fn test_resolver_failed_includes_message() {
        let err = ResolveError::ResolverFailed {
            type_name: "Query".to_string(),
            field: "books".to_string(),
            message: "backend unavailable".to_string(),
        };
        assert!(err.to_string().contains("backend unavailable"));
        assert_eq!(err.error_code(), "RESOLVER_FAILED");
    }

    #[test]
    fn test_shape_error_conversion() {
        let schema_err = SchemaError::MissingRootResolver {
            type_name: "Query".to_string(),
            field: "books".to_string(),
        };
        let shape_err: ShapeError = schema_err.into();
        assert_eq!(shape_err.error_code(), "MISSING_ROOT_RESOLVER");
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::FileNotFound {
            path: "/etc/schema.yaml".to_string(),
        };
        assert!(err.to_string().contains("/etc/schema.yaml"));
    }

    #[test]
    fn test_from_serde_yaml_error() {
        let yaml_err = serde_yaml::from_str::<serde_yaml::Value>(": not yaml :").unwrap_err();
        let shape_err: ShapeError = yaml_err.into();
        assert!(matches!(
            shape_err,
            ShapeError::Config(ConfigError::ParseError { .. })
        ));
    }
}

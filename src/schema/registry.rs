//! Type registry: the declared object types and their fields
//!
//! Types reference each other by *name*, never by nesting one type value
//! inside another. Registration order is therefore irrelevant and mutual
//! references (Book -> Author -> Book) need no special casing: a field's
//! target type is only looked up when a query actually recurses into it.

use indexmap::IndexMap;
use serde_json::{Value, json};
use std::collections::HashMap;

use crate::core::error::{ResolveError, SchemaError};

/// Declared result kind of a field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// A leaf value emitted as-is (string, number, boolean, null, ...)
    Scalar,

    /// A single nested object of the named type
    Object(String),

    /// An ordered list of objects of the named type
    List(String),
}

impl FieldKind {
    /// Name of the referenced object type, if any
    pub fn target_type(&self) -> Option<&str> {
        match self {
            FieldKind::Scalar => None,
            FieldKind::Object(name) | FieldKind::List(name) => Some(name),
        }
    }
}

/// A declared object type: a name and an ordered field map
///
/// Field name uniqueness is held by construction; inserting a field under an
/// existing name replaces the previous declaration.
#[derive(Debug, Clone)]
pub struct ObjectType {
    name: String,
    fields: IndexMap<String, FieldKind>,
}

impl ObjectType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: IndexMap::new(),
        }
    }

    /// Declare a scalar field
    pub fn scalar(mut self, field: impl Into<String>) -> Self {
        self.fields.insert(field.into(), FieldKind::Scalar);
        self
    }

    /// Declare a single-object field referencing `target` by name
    pub fn object(mut self, field: impl Into<String>, target: impl Into<String>) -> Self {
        self.fields
            .insert(field.into(), FieldKind::Object(target.into()));
        self
    }

    /// Declare a list-of-object field referencing `target` by name
    pub fn list(mut self, field: impl Into<String>, target: impl Into<String>) -> Self {
        self.fields
            .insert(field.into(), FieldKind::List(target.into()));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared fields, in declaration order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldKind)> {
        self.fields.iter().map(|(name, kind)| (name.as_str(), kind))
    }

    pub fn field(&self, name: &str) -> Option<&FieldKind> {
        self.fields.get(name)
    }
}

/// Registry of declared object types, indexed by name
///
/// Built once at startup and immutable afterwards; shared across concurrent
/// requests without locking.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    types: HashMap<String, ObjectType>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an object type
    ///
    /// Fields may reference types that are not registered yet; existence of
    /// referenced types is checked lazily, at first resolution time.
    pub fn register(&mut self, object_type: ObjectType) -> Result<(), SchemaError> {
        if self.types.contains_key(object_type.name()) {
            return Err(SchemaError::DuplicateType {
                type_name: object_type.name().to_string(),
            });
        }
        self.types
            .insert(object_type.name().to_string(), object_type);
        Ok(())
    }

    pub fn get(&self, type_name: &str) -> Option<&ObjectType> {
        self.types.get(type_name)
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.types.contains_key(type_name)
    }

    /// Look up a field's declared kind
    pub fn lookup_field(&self, type_name: &str, field: &str) -> Result<&FieldKind, ResolveError> {
        let object_type = self
            .types
            .get(type_name)
            .ok_or_else(|| ResolveError::UnknownType {
                type_name: type_name.to_string(),
            })?;
        object_type
            .field(field)
            .ok_or_else(|| ResolveError::UnknownField {
                type_name: type_name.to_string(),
                field: field.to_string(),
            })
    }

    /// JSON introspection dump of all declared types
    ///
    /// Used by the schema endpoint of the HTTP exposure.
    pub fn describe(&self) -> Value {
        let mut type_names: Vec<&String> = self.types.keys().collect();
        type_names.sort();

        let types: Vec<Value> = type_names
            .into_iter()
            .map(|name| {
                let object_type = &self.types[name];
                let fields: Vec<Value> = object_type
                    .fields()
                    .map(|(field, kind)| match kind {
                        FieldKind::Scalar => json!({ "name": field, "kind": "scalar" }),
                        FieldKind::Object(target) => {
                            json!({ "name": field, "kind": "object", "of": target })
                        }
                        FieldKind::List(target) => {
                            json!({ "name": field, "kind": "list", "of": target })
                        }
                    })
                    .collect();
                json!({ "name": name, "fields": fields })
            })
            .collect();

        json!({ "types": types })
    }
}

//! Resolver table: explicit tagged dispatch from (type, field) to resolver

use anyhow::Result;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;

use super::{FieldResolver, FnResolver};
use crate::core::error::SchemaError;
use crate::schema::TypeRegistry;

/// Mapping from type name to field name to resolver
///
/// Built once at startup, validated against the type registry, and immutable
/// afterwards. Entries are optional per field: an unbound field falls back to
/// default resolution (a property read on the parent value).
#[derive(Default)]
pub struct ResolverTable {
    bindings: HashMap<String, HashMap<String, Arc<dyn FieldResolver>>>,
}

impl ResolverTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a resolver to a (type, field) pair
    pub fn bind(
        mut self,
        type_name: impl Into<String>,
        field: impl Into<String>,
        resolver: impl FieldResolver + 'static,
    ) -> Self {
        self.bindings
            .entry(type_name.into())
            .or_default()
            .insert(field.into(), Arc::new(resolver));
        self
    }

    /// Bind a plain closure to a (type, field) pair
    pub fn bind_fn<F>(self, type_name: impl Into<String>, field: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Value, &Map<String, Value>) -> Result<Option<Value>> + Send + Sync + 'static,
    {
        self.bind(type_name, field, FnResolver::new(f))
    }

    /// Whether an explicit resolver is bound for the pair
    pub fn is_bound(&self, type_name: &str, field: &str) -> bool {
        self.bindings
            .get(type_name)
            .is_some_and(|fields| fields.contains_key(field))
    }

    /// Validate the table against the registry at startup
    ///
    /// Every binding must name a declared (type, field) pair, and every field
    /// of the root type must carry a binding: root fields resolve against a
    /// synthetic empty parent, so default resolution can never serve them.
    pub fn validate(&self, registry: &TypeRegistry, root_type: &str) -> Result<(), SchemaError> {
        for (type_name, fields) in &self.bindings {
            let Some(object_type) = registry.get(type_name) else {
                return Err(SchemaError::UnknownType {
                    type_name: type_name.clone(),
                });
            };
            for field in fields.keys() {
                if object_type.field(field).is_none() {
                    return Err(SchemaError::UnknownField {
                        type_name: type_name.clone(),
                        field: field.clone(),
                    });
                }
            }
        }

        let Some(root) = registry.get(root_type) else {
            return Err(SchemaError::UnknownType {
                type_name: root_type.to_string(),
            });
        };
        for (field, _) in root.fields() {
            if !self.is_bound(root_type, field) {
                return Err(SchemaError::MissingRootResolver {
                    type_name: root_type.to_string(),
                    field: field.to_string(),
                });
            }
        }

        Ok(())
    }

    /// Resolve a field's raw value
    ///
    /// An explicit resolver's answer is authoritative (including `null`); an
    /// unbound field, or a resolver that declines, falls back to reading the
    /// property named `field` from `parent`. A missing property resolves to
    /// `null`, not an error: fields are nullable by default.
    pub async fn resolve(
        &self,
        type_name: &str,
        field: &str,
        parent: &Value,
        args: &Map<String, Value>,
    ) -> Result<Value> {
        if let Some(resolver) = self.bindings.get(type_name).and_then(|m| m.get(field))
            && let Some(value) = resolver.resolve(parent, args).await?
        {
            return Ok(value);
        }
        Ok(parent.get(field).cloned().unwrap_or(Value::Null))
    }
}

//! Query executor: the entry point that packages resolution into envelopes

use serde_json::{Map, Value};
use std::sync::Arc;

use super::envelope::{ErrorRecord, ResultEnvelope};
use super::walk;
use crate::core::error::ShapeResult;
use crate::resolver::ResolverTable;
use crate::schema::{SelectionNode, TypeRegistry};

/// Executes queries against an immutable registry and resolver table
///
/// Built once at startup; safe to share across concurrently executing
/// requests without locking. `execute` never panics and never returns an
/// error past its boundary: every code path yields a [`ResultEnvelope`].
pub struct QueryExecutor {
    registry: Arc<TypeRegistry>,
    resolvers: Arc<ResolverTable>,
    root_type: String,
}

impl QueryExecutor {
    /// Create an executor, validating the resolver table against the registry
    ///
    /// Missing or extra bindings are a startup error here, not a runtime
    /// surprise: every binding must name a declared (type, field) pair and
    /// every root field must carry a resolver.
    pub fn new(
        registry: TypeRegistry,
        resolvers: ResolverTable,
        root_type: impl Into<String>,
    ) -> ShapeResult<Self> {
        let root_type = root_type.into();
        resolvers.validate(&registry, &root_type)?;

        Ok(Self {
            registry: Arc::new(registry),
            resolvers: Arc::new(resolvers),
            root_type,
        })
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    pub fn root_type(&self) -> &str {
        &self.root_type
    }

    /// Execute a query: a root field name, arguments, and a selection tree
    ///
    /// The root field resolves exactly like any other field, against a
    /// synthetic empty parent. An unknown root field short-circuits with no
    /// data and a single root-level error; any other failure is scoped to
    /// its field and collected alongside the partial data.
    pub async fn execute(
        &self,
        root_field: &str,
        args: Map<String, Value>,
        selection: Vec<SelectionNode>,
    ) -> ResultEnvelope {
        if let Err(err) = self.registry.lookup_field(&self.root_type, root_field) {
            tracing::debug!(root_field, "query rejected: {}", err);
            return ResultEnvelope::root_error(err.to_string(), vec![root_field.to_string()]);
        }

        let root_selection = [SelectionNode {
            name: root_field.to_string(),
            args,
            selection,
        }];
        let parent = Value::Object(Map::new());

        let (data, errors) = walk::resolve_selection(
            &self.registry,
            &self.resolvers,
            &self.root_type,
            &parent,
            &root_selection,
            &[],
        )
        .await;

        tracing::debug!(root_field, error_count = errors.len(), "query executed");
        ResultEnvelope {
            data: Some(data),
            errors,
        }
    }

    /// Resolve a sub-selection directly, for embedding applications that
    /// drive the engine below the root
    pub async fn resolve_selection(
        &self,
        type_name: &str,
        parent: &Value,
        selection: &[SelectionNode],
    ) -> (Value, Vec<ErrorRecord>) {
        walk::resolve_selection(
            &self.registry,
            &self.resolvers,
            type_name,
            parent,
            selection,
            &[],
        )
        .await
    }
}

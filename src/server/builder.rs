//! ServerBuilder for fluent assembly of an executor and its HTTP exposure

use anyhow::Result;
use axum::Router;
use serde_json::{Map, Value};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;

use super::exposure::QueryExposure;
use crate::core::error::ShapeResult;
use crate::engine::QueryExecutor;
use crate::resolver::{FieldResolver, ResolverTable};
use crate::schema::TypeRegistry;

/// Builder for assembling a query server
///
/// # Example
///
/// ```ignore
/// ServerBuilder::new()
///     .with_schema_yaml(SCHEMA)?
///     .with_resolver_fn("Query", "books", move |_, _| Ok(Some(books.clone())))
///     .serve("127.0.0.1:4000").await?;
/// ```
pub struct ServerBuilder {
    registry: Option<TypeRegistry>,
    resolvers: ResolverTable,
    root_type: String,
}

impl ServerBuilder {
    /// Create a new ServerBuilder
    pub fn new() -> Self {
        Self {
            registry: None,
            resolvers: ResolverTable::new(),
            root_type: "Query".to_string(),
        }
    }

    /// Set the type registry (required, unless a YAML schema is given)
    pub fn with_schema(mut self, registry: TypeRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Declare the schema from a YAML document
    ///
    /// The document's `root` key, if present, also sets the root type.
    pub fn with_schema_yaml(mut self, yaml: &str) -> ShapeResult<Self> {
        let config = crate::config::SchemaConfig::from_yaml_str(yaml)?;
        self.root_type = config.root.clone();
        self.registry = Some(config.into_registry()?);
        Ok(self)
    }

    /// Override the root query type name (defaults to "Query")
    pub fn with_root_type(mut self, root_type: impl Into<String>) -> Self {
        self.root_type = root_type.into();
        self
    }

    /// Bind a resolver to a (type, field) pair
    pub fn with_resolver(
        mut self,
        type_name: impl Into<String>,
        field: impl Into<String>,
        resolver: impl FieldResolver + 'static,
    ) -> Self {
        self.resolvers = self.resolvers.bind(type_name, field, resolver);
        self
    }

    /// Bind a plain closure to a (type, field) pair
    pub fn with_resolver_fn<F>(
        mut self,
        type_name: impl Into<String>,
        field: impl Into<String>,
        f: F,
    ) -> Self
    where
        F: Fn(&Value, &Map<String, Value>) -> Result<Option<Value>> + Send + Sync + 'static,
    {
        self.resolvers = self.resolvers.bind_fn(type_name, field, f);
        self
    }

    /// Build the validated executor
    ///
    /// This is where startup validation happens: resolver bindings to
    /// undeclared types or fields, and root fields without resolvers, fail
    /// here rather than at request time.
    pub fn build_executor(self) -> ShapeResult<Arc<QueryExecutor>> {
        let registry = self.registry.ok_or_else(|| {
            crate::core::error::ShapeError::Internal(
                "A schema is required. Call .with_schema() or .with_schema_yaml()".to_string(),
            )
        })?;
        let executor = QueryExecutor::new(registry, self.resolvers, self.root_type)?;
        Ok(Arc::new(executor))
    }

    /// Build the final HTTP router
    pub fn build(self) -> ShapeResult<Router> {
        let executor = self.build_executor()?;
        Ok(QueryExposure::build_router(executor))
    }

    /// Serve the application with graceful shutdown
    ///
    /// This will:
    /// - Bind to the provided address
    /// - Start serving requests
    /// - Handle SIGTERM and SIGINT (Ctrl+C) for graceful shutdown
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait for a shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}

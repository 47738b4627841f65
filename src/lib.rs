//! # shapeql
//!
//! A schema-driven field resolution engine for declarative queries over
//! in-memory object graphs.
//!
//! ## Features
//!
//! - **Declarative selection trees**: clients name exactly the fields they
//!   want, nested relationships resolve on demand
//! - **Name-based type references**: types reference each other by name, so
//!   cyclic schemas (Book -> Author -> Book) need no special casing
//! - **Uniform resolvers**: every resolver has the same `(parent, args)`
//!   signature behind a capability trait; unbound fields fall back to a
//!   property read on the parent
//! - **Field-scoped failures**: an error in one field becomes `null` in its
//!   place with a path-qualified error record; siblings keep resolving
//! - **Startup validation**: resolver bindings are checked against the
//!   declared schema when the executor is built, not at request time
//! - **YAML schema declaration**: schemas can be configured declaratively
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use shapeql::prelude::*;
//! use serde_json::json;
//!
//! let mut registry = TypeRegistry::new();
//! registry.register(ObjectType::new("Query").list("books", "Book"))?;
//! registry.register(ObjectType::new("Book").scalar("title").object("author", "Author"))?;
//! registry.register(ObjectType::new("Author").scalar("name"))?;
//!
//! let books = json!([{ "title": "The Awakening", "author": { "name": "Kate Chopin" } }]);
//! let resolvers = ResolverTable::new()
//!     .bind_fn("Query", "books", move |_, _| Ok(Some(books.clone())));
//!
//! let executor = QueryExecutor::new(registry, resolvers, "Query")?;
//! let envelope = executor.execute(
//!     "books",
//!     Default::default(),
//!     vec![
//!         SelectionNode::field("title"),
//!         SelectionNode::nested("author", vec![SelectionNode::field("name")]),
//!     ],
//! ).await;
//! ```

pub mod config;
pub mod core;
pub mod engine;
pub mod resolver;
pub mod schema;
pub mod server;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{ConfigError, ResolveError, SchemaError, ShapeError, ShapeResult};

    // === Schema ===
    pub use crate::schema::{FieldKind, ObjectType, SelectionNode, TypeRegistry};

    // === Resolvers ===
    pub use crate::resolver::{
        DataSource, FieldResolver, FnResolver, InMemorySource, ResolverTable,
    };

    // === Engine ===
    pub use crate::engine::{ErrorRecord, QueryExecutor, ResultEnvelope};

    // === Config ===
    pub use crate::config::SchemaConfig;

    // === Server ===
    pub use crate::server::{QueryExposure, ServerBuilder};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use serde::{Deserialize, Serialize};
}

//! Bookstore demo: the full stack over a small fixture graph
//!
//! Serves a schema of books, authors, and domains on port 4000. Query it
//! with a structured selection tree:
//!
//! ```sh
//! curl -s localhost:4000/query -H 'content-type: application/json' -d '{
//!   "query": "books",
//!   "selection": [
//!     { "name": "title" },
//!     { "name": "author", "selection": [ { "name": "name" } ] }
//!   ]
//! }'
//! ```

use std::sync::Arc;

use serde_json::{Map, Value, json};
use shapeql::prelude::*;
use tracing_subscriber::EnvFilter;

const SCHEMA: &str = r#"
root: Query
types:
  - name: Query
    fields:
      - { name: books, kind: list, of: Book }
      - { name: domains, kind: list, of: Domain }
      - { name: authors, kind: list, of: Author }
  - name: Book
    fields:
      - { name: title, kind: scalar }
      - { name: author, kind: object, of: Author }
      - { name: domain, kind: object, of: Domain }
  - name: Domain
    fields:
      - { name: name, kind: scalar }
      - { name: books, kind: list, of: Book }
  - name: Author
    fields:
      - { name: name, kind: scalar }
      - { name: books, kind: list, of: Book }
"#;

fn fixture_source() -> Arc<InMemorySource> {
    let books = vec![
        json!({
            "title": "The Awakening",
            "author": { "name": "Kate Chopin" },
            "domain": { "name": "sports" },
        }),
        json!({
            "title": "City of Glass",
            "author": { "name": "Paul Auster" },
            "domain": { "name": "game" },
        }),
        json!({
            "title": "The Awakening2",
            "author": { "name": "Kate Chopin" },
            "domain": { "name": "sports" },
        }),
        json!({
            "title": "City of Glass2",
            "author": { "name": "Paul Auster" },
            "domain": { "name": "game" },
        }),
    ];

    let domains = vec![json!({
        "name": "d1",
        "books": [
            { "title": "book1", "author": { "name": "a" } },
        ],
    })];

    Arc::new(
        InMemorySource::new()
            .with_collection("books", books)
            .with_collection("domains", domains),
    )
}

/// Root resolver serving one collection of the injected data source
struct CollectionResolver {
    source: Arc<InMemorySource>,
    collection: &'static str,
}

#[async_trait]
impl FieldResolver for CollectionResolver {
    async fn resolve(&self, _parent: &Value, _args: &Map<String, Value>) -> Result<Option<Value>> {
        let records = self.source.list(self.collection).await?;
        Ok(Some(Value::Array(records)))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let source = fixture_source();

    ServerBuilder::new()
        .with_schema_yaml(SCHEMA)?
        .with_resolver(
            "Query",
            "books",
            CollectionResolver {
                source: source.clone(),
                collection: "books",
            },
        )
        .with_resolver(
            "Query",
            "domains",
            CollectionResolver {
                source: source.clone(),
                collection: "domains",
            },
        )
        // The demo data has no standalone author records; the books
        // collection doubles as the author listing, embedded authors and all
        .with_resolver(
            "Query",
            "authors",
            CollectionResolver {
                source,
                collection: "books",
            },
        )
        .serve("127.0.0.1:4000")
        .await?;

    Ok(())
}

//! Data source abstraction for resolvers
//!
//! Fixture data is injected into resolvers at construction time instead of
//! being reached for through process-wide state, so multiple engines and
//! tests can run with independent fixtures concurrently.

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;

/// Read access to named collections of JSON records
#[async_trait]
pub trait DataSource: Send + Sync {
    /// All records of a collection, in insertion order
    async fn list(&self, collection: &str) -> Result<Vec<Value>>;
}

/// In-memory data source keyed by collection name
#[derive(Default)]
pub struct InMemorySource {
    collections: HashMap<String, Vec<Value>>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a collection of records
    pub fn with_collection(mut self, name: impl Into<String>, records: Vec<Value>) -> Self {
        self.collections.insert(name.into(), records);
        self
    }
}

#[async_trait]
impl DataSource for InMemorySource {
    async fn list(&self, collection: &str) -> Result<Vec<Value>> {
        self.collections
            .get(collection)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("Unknown collection: {}", collection))
    }
}

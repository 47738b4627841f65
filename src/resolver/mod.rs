//! Field resolvers: the functions that produce field values
//!
//! Every resolver has the same signature behind the [`FieldResolver`]
//! capability trait, so dispatch and recursion never depend on a resolver's
//! internal shape. Resolvers are registered in a [`ResolverTable`] and looked
//! up per (type, field) pair.

pub mod source;
pub mod table;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::{Map, Value};

pub use source::{DataSource, InMemorySource};
pub use table::ResolverTable;

/// Capability trait implemented by every field resolver
///
/// Resolvers may suspend internally (e.g. if they perform I/O); the engine
/// only requires that each field's resolution completes, in selection order,
/// before its result is included.
#[async_trait]
pub trait FieldResolver: Send + Sync {
    /// Produce the field's value from its parent value and arguments
    ///
    /// - `Ok(Some(value))` is authoritative, including `Some(Value::Null)`
    /// - `Ok(None)` falls back to default resolution (a property read on the
    ///   parent value under the field's name)
    /// - `Err` fails the field; the failure is scoped to that field alone
    async fn resolve(&self, parent: &Value, args: &Map<String, Value>) -> Result<Option<Value>>;
}

/// Adapter turning a plain closure into a [`FieldResolver`]
///
/// ```rust,ignore
/// let resolver = FnResolver::new(|_parent, _args| Ok(Some(json!("The Awakening"))));
/// ```
pub struct FnResolver<F>(F);

impl<F> FnResolver<F>
where
    F: Fn(&Value, &Map<String, Value>) -> Result<Option<Value>> + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

#[async_trait]
impl<F> FieldResolver for FnResolver<F>
where
    F: Fn(&Value, &Map<String, Value>) -> Result<Option<Value>> + Send + Sync,
{
    async fn resolve(&self, parent: &Value, args: &Map<String, Value>) -> Result<Option<Value>> {
        (self.0)(parent, args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_fn_resolver_invokes_closure() {
        let resolver = FnResolver::new(|parent, _args| {
            Ok(Some(json!(format!(
                "hello {}",
                parent["name"].as_str().unwrap_or("world")
            ))))
        });

        let parent = json!({ "name": "shapeql" });
        let value = resolver.resolve(&parent, &Map::new()).await.unwrap();
        assert_eq!(value, Some(json!("hello shapeql")));
    }

    #[tokio::test]
    async fn test_fn_resolver_can_decline() {
        let resolver = FnResolver::new(|_parent, _args| Ok(None));
        let value = resolver.resolve(&Value::Null, &Map::new()).await.unwrap();
        assert!(value.is_none());
    }
}

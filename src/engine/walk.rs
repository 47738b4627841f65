//! Depth-first selection walk over the object graph
//!
//! The walk strictly follows the caller-supplied selection tree, never the
//! data graph's topology. That finite tree is what bounds recursion and makes
//! cyclic type references (Book -> Author -> Book) safe: the engine only
//! recurses where the selection explicitly asks it to.
//!
//! Failures are isolated per field: a failing field becomes `null` in the
//! shaped result and contributes one path-qualified error, while siblings and
//! ancestors keep resolving.

use futures::future::{BoxFuture, FutureExt};
use serde_json::{Map, Value};

use super::envelope::ErrorRecord;
use crate::core::error::ResolveError;
use crate::resolver::ResolverTable;
use crate::schema::{FieldKind, SelectionNode, TypeRegistry};

/// Resolve a selection against a parent value of the named type
///
/// Returns the shaped result object (field order matches selection order,
/// not declaration order) and all field-scoped errors collected underneath.
pub(crate) fn resolve_selection<'a>(
    registry: &'a TypeRegistry,
    resolvers: &'a ResolverTable,
    type_name: &'a str,
    parent: &'a Value,
    selection: &'a [SelectionNode],
    path: &'a [String],
) -> BoxFuture<'a, (Value, Vec<ErrorRecord>)> {
    async move {
        let mut result = Map::new();
        let mut errors = Vec::new();

        for node in selection {
            let mut field_path = path.to_vec();
            field_path.push(node.name.clone());

            let value = resolve_field(
                registry,
                resolvers,
                type_name,
                parent,
                node,
                &field_path,
                &mut errors,
            )
            .await;
            result.insert(node.name.clone(), value);
        }

        (Value::Object(result), errors)
    }
    .boxed()
}

/// Resolve one field, pushing any failure into `errors` and yielding the
/// field's shaped value (`null` on failure)
async fn resolve_field(
    registry: &TypeRegistry,
    resolvers: &ResolverTable,
    type_name: &str,
    parent: &Value,
    node: &SelectionNode,
    field_path: &[String],
    errors: &mut Vec<ErrorRecord>,
) -> Value {
    let kind = match registry.lookup_field(type_name, &node.name) {
        Ok(kind) => kind,
        Err(err) => {
            errors.push(ErrorRecord::new(err.to_string(), field_path.to_vec()));
            return Value::Null;
        }
    };

    let raw = match resolvers
        .resolve(type_name, &node.name, parent, &node.args)
        .await
    {
        Ok(raw) => raw,
        Err(err) => {
            let err = ResolveError::ResolverFailed {
                type_name: type_name.to_string(),
                field: node.name.clone(),
                message: err.to_string(),
            };
            errors.push(ErrorRecord::new(err.to_string(), field_path.to_vec()));
            return Value::Null;
        }
    };

    match kind {
        FieldKind::Scalar => {
            if !node.selection.is_empty() {
                let err = ResolveError::InvalidSelection {
                    type_name: type_name.to_string(),
                    field: node.name.clone(),
                };
                errors.push(ErrorRecord::new(err.to_string(), field_path.to_vec()));
                return Value::Null;
            }
            raw
        }

        FieldKind::Object(target) => {
            // Null short-circuits before any selection check: no recursion
            // happens for an absent object, even if a sub-selection was given
            if raw.is_null() {
                return Value::Null;
            }
            if node.selection.is_empty() {
                let err = ResolveError::MissingSelection {
                    type_name: type_name.to_string(),
                    field: node.name.clone(),
                };
                errors.push(ErrorRecord::new(err.to_string(), field_path.to_vec()));
                return Value::Null;
            }
            if !raw.is_object() {
                let err = ResolveError::TypeMismatch {
                    type_name: type_name.to_string(),
                    field: node.name.clone(),
                    expected: "an object",
                };
                errors.push(ErrorRecord::new(err.to_string(), field_path.to_vec()));
                return Value::Null;
            }

            let (value, nested) =
                resolve_selection(registry, resolvers, target, &raw, &node.selection, field_path)
                    .await;
            errors.extend(nested);
            value
        }

        FieldKind::List(target) => {
            if raw.is_null() {
                return Value::Null;
            }
            if node.selection.is_empty() {
                let err = ResolveError::MissingSelection {
                    type_name: type_name.to_string(),
                    field: node.name.clone(),
                };
                errors.push(ErrorRecord::new(err.to_string(), field_path.to_vec()));
                return Value::Null;
            }
            let Value::Array(elements) = raw else {
                let err = ResolveError::TypeMismatch {
                    type_name: type_name.to_string(),
                    field: node.name.clone(),
                    expected: "a list",
                };
                errors.push(ErrorRecord::new(err.to_string(), field_path.to_vec()));
                return Value::Null;
            };

            let mut shaped = Vec::with_capacity(elements.len());
            for (index, element) in elements.iter().enumerate() {
                let mut element_path = field_path.to_vec();
                element_path.push(index.to_string());

                if !element.is_object() {
                    let err = ResolveError::TypeMismatch {
                        type_name: target.to_string(),
                        field: node.name.clone(),
                        expected: "an object",
                    };
                    errors.push(ErrorRecord::new(err.to_string(), element_path));
                    shaped.push(Value::Null);
                    continue;
                }

                let (value, nested) = resolve_selection(
                    registry,
                    resolvers,
                    target,
                    element,
                    &node.selection,
                    &element_path,
                )
                .await;
                errors.extend(nested);
                shaped.push(value);
            }
            Value::Array(shaped)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ObjectType;
    use serde_json::json;

    fn book_registry() -> TypeRegistry {
        let mut registry = TypeRegistry::new();
        registry
            .register(
                ObjectType::new("Book")
                    .scalar("title")
                    .object("author", "Author"),
            )
            .unwrap();
        registry
            .register(
                ObjectType::new("Author")
                    .scalar("name")
                    .list("books", "Book"),
            )
            .unwrap();
        registry
    }

    #[tokio::test]
    async fn test_scalar_fields_resolve_in_selection_order() {
        let registry = book_registry();
        let resolvers = ResolverTable::new();
        let parent = json!({ "title": "The Awakening", "author": { "name": "Kate Chopin" } });
        let selection = vec![
            SelectionNode::field("title"),
            SelectionNode::nested("author", vec![SelectionNode::field("name")]),
        ];

        let (value, errors) =
            resolve_selection(&registry, &resolvers, "Book", &parent, &selection, &[]).await;

        assert!(errors.is_empty());
        assert_eq!(
            value,
            json!({ "title": "The Awakening", "author": { "name": "Kate Chopin" } })
        );
    }

    #[tokio::test]
    async fn test_null_object_field_skips_recursion() {
        let registry = book_registry();
        // A resolver that must never run: the author value is null
        let resolvers = ResolverTable::new().bind_fn("Author", "name", |_, _| {
            panic!("sub-selection of a null object must not be evaluated")
        });
        let parent = json!({ "title": "t", "author": null });
        let selection = vec![SelectionNode::nested(
            "author",
            vec![SelectionNode::field("name")],
        )];

        let (value, errors) =
            resolve_selection(&registry, &resolvers, "Book", &parent, &selection, &[]).await;

        assert!(errors.is_empty());
        assert_eq!(value, json!({ "author": null }));
    }

    #[tokio::test]
    async fn test_sub_selection_on_scalar_is_field_scoped_error() {
        let registry = book_registry();
        let resolvers = ResolverTable::new();
        let parent = json!({ "title": "t" });
        let selection = vec![SelectionNode::nested(
            "title",
            vec![SelectionNode::field("length")],
        )];

        let (value, errors) =
            resolve_selection(&registry, &resolvers, "Book", &parent, &selection, &[]).await;

        assert_eq!(value, json!({ "title": null }));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].path, vec!["title"]);
        assert!(errors[0].message.contains("scalar"));
    }

    #[tokio::test]
    async fn test_object_field_without_selection_is_error() {
        let registry = book_registry();
        let resolvers = ResolverTable::new();
        let parent = json!({ "author": { "name": "Kate Chopin" } });
        let selection = vec![SelectionNode::field("author")];

        let (value, errors) =
            resolve_selection(&registry, &resolvers, "Book", &parent, &selection, &[]).await;

        assert_eq!(value, json!({ "author": null }));
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("requires a sub-selection"));
    }

    #[tokio::test]
    async fn test_scalar_where_object_declared_is_type_mismatch() {
        let registry = book_registry();
        let resolvers =
            ResolverTable::new().bind_fn("Book", "author", |_, _| Ok(Some(json!("not an object"))));
        let parent = json!({ "title": "t" });
        let selection = vec![SelectionNode::nested(
            "author",
            vec![SelectionNode::field("name")],
        )];

        let (value, errors) =
            resolve_selection(&registry, &resolvers, "Book", &parent, &selection, &[]).await;

        assert_eq!(value, json!({ "author": null }));
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("not an object"));
    }

    #[tokio::test]
    async fn test_list_preserves_element_order() {
        let registry = book_registry();
        let resolvers = ResolverTable::new();
        let parent = json!({
            "name": "Kate Chopin",
            "books": [ { "title": "one" }, { "title": "two" }, { "title": "three" } ]
        });
        let selection = vec![SelectionNode::nested(
            "books",
            vec![SelectionNode::field("title")],
        )];

        let (value, errors) =
            resolve_selection(&registry, &resolvers, "Author", &parent, &selection, &[]).await;

        assert!(errors.is_empty());
        assert_eq!(
            value,
            json!({ "books": [ { "title": "one" }, { "title": "two" }, { "title": "three" } ] })
        );
    }

    #[tokio::test]
    async fn test_non_array_list_value_is_type_mismatch() {
        let registry = book_registry();
        let resolvers = ResolverTable::new();
        let parent = json!({ "books": "not a list" });
        let selection = vec![SelectionNode::nested(
            "books",
            vec![SelectionNode::field("title")],
        )];

        let (value, errors) =
            resolve_selection(&registry, &resolvers, "Author", &parent, &selection, &[]).await;

        assert_eq!(value, json!({ "books": null }));
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("not a list"));
    }

    #[tokio::test]
    async fn test_non_object_list_element_scoped_by_index() {
        let registry = book_registry();
        let resolvers = ResolverTable::new();
        let parent = json!({ "books": [ { "title": "ok" }, 42 ] });
        let selection = vec![SelectionNode::nested(
            "books",
            vec![SelectionNode::field("title")],
        )];

        let (value, errors) =
            resolve_selection(&registry, &resolvers, "Author", &parent, &selection, &[]).await;

        assert_eq!(value, json!({ "books": [ { "title": "ok" }, null ] }));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].path, vec!["books", "1"]);
    }

    #[tokio::test]
    async fn test_unknown_field_does_not_harm_siblings() {
        let registry = book_registry();
        let resolvers = ResolverTable::new();
        let parent = json!({ "title": "The Awakening" });
        let selection = vec![
            SelectionNode::field("nonexistentField"),
            SelectionNode::field("title"),
        ];

        let (value, errors) =
            resolve_selection(&registry, &resolvers, "Book", &parent, &selection, &[]).await;

        assert_eq!(
            value,
            json!({ "nonexistentField": null, "title": "The Awakening" })
        );
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].path, vec!["nonexistentField"]);
    }

    #[tokio::test]
    async fn test_cyclic_selection_bounded_by_selection_depth() {
        let registry = book_registry();
        let resolvers = ResolverTable::new();
        // Author embeds books which embed the author again
        let parent = json!({
            "title": "The Awakening",
            "author": {
                "name": "Kate Chopin",
                "books": [
                    { "title": "The Awakening", "author": { "name": "Kate Chopin" } }
                ]
            }
        });
        // book { author { books { author { name } } } }
        let selection = vec![SelectionNode::nested(
            "author",
            vec![SelectionNode::nested(
                "books",
                vec![SelectionNode::nested(
                    "author",
                    vec![SelectionNode::field("name")],
                )],
            )],
        )];

        let (value, errors) =
            resolve_selection(&registry, &resolvers, "Book", &parent, &selection, &[]).await;

        assert!(errors.is_empty());
        assert_eq!(
            value,
            json!({ "author": { "books": [ { "author": { "name": "Kate Chopin" } } ] } })
        );
    }

    #[tokio::test]
    async fn test_deep_error_path_is_fully_qualified() {
        let registry = book_registry();
        let resolvers = ResolverTable::new();
        let parent = json!({
            "author": { "name": "Kate Chopin", "books": [ { "title": "t" } ] }
        });
        let selection = vec![SelectionNode::nested(
            "author",
            vec![SelectionNode::nested(
                "books",
                vec![SelectionNode::field("missing")],
            )],
        )];

        let (_, errors) =
            resolve_selection(&registry, &resolvers, "Book", &parent, &selection, &[]).await;

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].path, vec!["author", "books", "0", "missing"]);
    }
}

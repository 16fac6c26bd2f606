//! # Schema Walker
//!
//! Walks a schema tree and a data tree in lock-step, depth-first, and
//! flattens every reported violation into one ordered list.
//!
//! ## Rules
//!
//! - A leaf node runs its validator on the value at the current path,
//!   including when the value is absent (so `required` can fail).
//! - A branch or wildcard node requires an object. A present non-object
//!   value yields `"value is not an object"` at the branch's path. An
//!   absent value is skipped by the parent and never reaches the node.
//! - Declared keys are visited in declaration order; wildcard keys in data
//!   order. Extraneous data keys are reported after all declared keys, in
//!   data order.
//! - Execution is strictly sequential, so identical inputs always yield an
//!   identical error list.
//!
//! A branch declaring `*` next to other keys aborts the call with
//! [`SchemaError::WildcardConflict`]. Nothing else interrupts traversal.

use futures::future::BoxFuture;
use futures::FutureExt;
use indexmap::IndexMap;
use serde_json::{Map, Value};

use vshape_core::{KeyPath, SchemaError, ValidationError, ValidationResult, WILDCARD_KEY};

use crate::schema::Schema;

pub const NOT_AN_OBJECT_MESSAGE: &str = "value is not an object";
pub const EXTRANEOUS_KEY_MESSAGE: &str = "extraneous key found";

/// Validate `data` against `schema`.
///
/// Returns `Ok(Valid)` or `Ok(Invalid(errors))` for conforming and
/// non-conforming data, and `Err` only when the schema itself is malformed.
///
/// When `schema` is a single leaf and the top-level value fails it, the
/// one error is reported under the empty path `""`.
pub async fn validate(schema: &Schema, data: &Value) -> Result<ValidationResult, SchemaError> {
    let root = KeyPath::root();
    match walk(schema, Some(data), &root).await {
        Ok(errors) => {
            tracing::debug!(errors = errors.len(), "validation finished");
            Ok(ValidationResult::from_errors(errors))
        }
        Err(e) => {
            tracing::warn!(path = %e.path(), error = %e, "schema configuration error");
            Err(e)
        }
    }
}

/// Walk one schema node against one (possibly absent) value.
pub(crate) fn walk<'a>(
    schema: &'a Schema,
    data: Option<&'a Value>,
    path: &'a KeyPath,
) -> BoxFuture<'a, Result<Vec<ValidationError>, SchemaError>> {
    async move {
        tracing::trace!(path = %path, "visiting schema node");
        match schema {
            Schema::Leaf(validator) => Ok(validator.run(data, path).await?.into_errors(path)),
            Schema::Wildcard(node) => walk_wildcard(node, data, path).await,
            Schema::Branch(fields) => match wildcard_of(fields, path)? {
                Some(node) => walk_wildcard(node, data, path).await,
                None => walk_branch(fields, data, path).await,
            },
        }
    }
    .boxed()
}

/// The wildcard node of a branch, if the branch is a wildcard.
fn wildcard_of<'s>(
    fields: &'s IndexMap<String, Schema>,
    path: &KeyPath,
) -> Result<Option<&'s Schema>, SchemaError> {
    let Some(node) = fields.get(WILDCARD_KEY) else {
        return Ok(None);
    };
    if fields.len() > 1 {
        return Err(SchemaError::WildcardConflict {
            path: path.clone(),
            siblings: fields
                .keys()
                .filter(|k| k.as_str() != WILDCARD_KEY)
                .cloned()
                .collect(),
        });
    }
    Ok(Some(node))
}

/// Resolve the object at a branch position, or the branch-level error.
fn as_object<'v>(
    data: Option<&'v Value>,
    path: &KeyPath,
) -> Result<Option<&'v Map<String, Value>>, Vec<ValidationError>> {
    match data {
        None => Ok(None),
        Some(Value::Object(object)) => Ok(Some(object)),
        Some(_) => Err(vec![ValidationError::new(path.clone(), NOT_AN_OBJECT_MESSAGE)]),
    }
}

async fn walk_wildcard(
    node: &Schema,
    data: Option<&Value>,
    path: &KeyPath,
) -> Result<Vec<ValidationError>, SchemaError> {
    let object = match as_object(data, path) {
        Ok(Some(object)) => object,
        Ok(None) => return Ok(Vec::new()),
        Err(errors) => return Ok(errors),
    };
    let mut errors = Vec::new();
    for (key, value) in object {
        let child = path.child(key);
        errors.extend(walk(node, Some(value), &child).await?);
    }
    Ok(errors)
}

async fn walk_branch(
    fields: &IndexMap<String, Schema>,
    data: Option<&Value>,
    path: &KeyPath,
) -> Result<Vec<ValidationError>, SchemaError> {
    let object = match as_object(data, path) {
        Ok(Some(object)) => object,
        Ok(None) => return Ok(Vec::new()),
        Err(errors) => return Ok(errors),
    };
    let mut errors = Vec::new();
    for (key, node) in fields {
        let value = object.get(key);
        // Nested branches are optional: skip them when the data is absent.
        if value.is_none() && !node.is_leaf() {
            continue;
        }
        let child = path.child(key);
        errors.extend(walk(node, value, &child).await?);
    }
    for key in object.keys() {
        if !fields.contains_key(key) {
            errors.push(ValidationError::new(path.child(key), EXTRANEOUS_KEY_MESSAGE));
        }
    }
    Ok(errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::{of_shape, of_type, required};
    use crate::predicate::{is_boolean, is_object, is_string};
    use serde_json::json;

    async fn errors(schema: &Schema, data: Value) -> Vec<(String, String)> {
        validate(schema, &data)
            .await
            .unwrap()
            .into_errors()
            .into_iter()
            .map(|e| (e.key.into_string(), e.error))
            .collect()
    }

    fn pairs(list: &[(&str, &str)]) -> Vec<(String, String)> {
        list.iter().map(|(k, e)| (k.to_string(), e.to_string())).collect()
    }

    #[tokio::test]
    async fn test_extraneous_key() {
        let schema: Schema = Schema::branch().field("a", is_boolean()).into();
        assert_eq!(
            errors(&schema, json!({"a": true, "b": 1})).await,
            pairs(&[("b", "extraneous key found")])
        );
    }

    #[tokio::test]
    async fn test_absent_nested_branch_is_optional() {
        let schema: Schema = Schema::branch()
            .field("a", is_boolean())
            .field("b", Schema::branch().field("c", is_boolean().and(required())))
            .into();
        let result = validate(&schema, &json!({"a": true})).await.unwrap();
        assert!(result.is_valid());
    }

    #[tokio::test]
    async fn test_required_nested_leaf() {
        let schema: Schema = Schema::branch().field(
            "b",
            Schema::branch().field("c", Schema::branch().field("varC", is_boolean().and(required()))),
        )
        .into();
        assert_eq!(
            errors(&schema, json!({"b": {"c": {}}})).await,
            pairs(&[("b.c.varC", "value is required but missing")])
        );
    }

    #[tokio::test]
    async fn test_non_object_at_branch() {
        let schema: Schema = Schema::branch().field("b", Schema::branch().field("c", is_boolean())).into();
        assert_eq!(
            errors(&schema, json!({"b": [1]})).await,
            pairs(&[("b", "value is not an object")])
        );
        assert_eq!(
            errors(&schema, json!({"b": null})).await,
            pairs(&[("b", "value is not an object")])
        );
        assert_eq!(
            errors(&schema, json!("top")).await,
            pairs(&[("", "value is not an object")])
        );
    }

    #[tokio::test]
    async fn test_declared_errors_precede_extraneous_in_data_order() {
        let schema: Schema = Schema::branch()
            .field("x", is_string())
            .field("y", is_string().and(required()))
            .into();
        assert_eq!(
            errors(&schema, json!({"z2": 1, "x": 5, "z1": 2})).await,
            pairs(&[
                ("x", "value is not a string"),
                ("y", "value is required but missing"),
                ("z2", "extraneous key found"),
                ("z1", "extraneous key found"),
            ])
        );
    }

    #[tokio::test]
    async fn test_wildcard_applies_to_every_key() {
        let schema: Schema = Schema::branch().field(
            "prices",
            Schema::branch().field("*", is_string().and(required())),
        )
        .into();
        assert_eq!(
            errors(&schema, json!({"prices": {"b": 1, "a": "x", "c": true}})).await,
            pairs(&[
                ("prices.b", "value is not a string"),
                ("prices.c", "value is not a string"),
            ])
        );
    }

    #[tokio::test]
    async fn test_wildcard_variant_matches_star_branch() {
        let data = json!({"k1": {"n": 1}, "k2": {"n": "x"}});
        let node: Schema = Schema::branch().field("n", is_string()).into();
        let star: Schema = Schema::branch().field("*", node.clone()).into();
        let wildcard = Schema::wildcard(node);
        assert_eq!(errors(&star, data.clone()).await, errors(&wildcard, data).await);
    }

    #[tokio::test]
    async fn test_wildcard_conflict_aborts() {
        let schema: Schema = Schema::branch()
            .field("ok", is_string())
            .field("map", Schema::branch().field("*", is_string()).field("name", is_string()))
            .into();
        let err = validate(&schema, &json!({"ok": 1, "map": {}})).await.unwrap_err();
        assert_eq!(err.to_string(), "Schema wildcard conflict. A wildcard can not have sibling keys");
        match err {
            SchemaError::WildcardConflict { path, siblings } => {
                assert_eq!(path.as_str(), "map");
                assert_eq!(siblings, vec!["name".to_string()]);
            }
        }
    }

    #[tokio::test]
    async fn test_top_level_leaf() {
        let schema = Schema::from(is_string());
        assert!(validate(&schema, &json!("x")).await.unwrap().is_valid());
        assert_eq!(errors(&schema, json!(1)).await, pairs(&[("", "value is not a string")]));
    }

    #[tokio::test]
    async fn test_leaf_keeps_its_conditions_against_object_data() {
        let schema = Schema::from(is_string().and(required()));
        assert_eq!(
            errors(&schema, json!({"x": "ok"})).await,
            pairs(&[("", "value is not a string")])
        );
        assert_eq!(
            errors(&schema, json!(null)).await,
            pairs(&[("", "value is not a string")])
        );
    }

    #[tokio::test]
    async fn test_of_type_with_shaped_elements() {
        let element: Schema = Schema::branch()
            .field("foo", is_string().and(required()))
            .field("bar", is_boolean().and(required()))
            .into();
        let schema: Schema = Schema::branch().field("items", crate::predicate::is_array().and(of_type(element))).into();
        assert_eq!(
            errors(&schema, json!({"items": [{}, {"foo": "f", "bar": true}, {"foo": 1, "bar": false}]})).await,
            pairs(&[
                ("items.0.foo", "value is required but missing"),
                ("items.0.bar", "value is required but missing"),
                ("items.2.foo", "value is not a string"),
            ])
        );
    }

    #[tokio::test]
    async fn test_required_object_with_shape() {
        let owner = is_object()
            .and([required(), of_shape(Schema::branch().field("name", is_string().and(required())))]);
        let schema: Schema = Schema::branch().field("owner", owner).into();
        assert_eq!(
            errors(&schema, json!({})).await,
            pairs(&[("owner", "value is required but missing")])
        );
        assert_eq!(
            errors(&schema, json!({"owner": {}})).await,
            pairs(&[("owner.name", "value is required but missing")])
        );
        assert_eq!(
            errors(&schema, json!({"owner": []})).await,
            pairs(&[("owner", "value is not an object")])
        );
    }
}

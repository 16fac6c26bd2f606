//! # Schema Nodes
//!
//! A schema is a tree of [`Schema`] nodes:
//!
//! - `Leaf` — a composed validator, bare type predicate, or union.
//! - `Branch` — a mapping from key to node describing an *optional* nested
//!   object. Absence of the object is never an error; any object present
//!   is checked for shape and extraneous keys.
//! - `Wildcard` — one node applied to every key present in the object.
//!
//! Branches are declared through the [`Branch`] builder, so keys can only
//! be added to a branch; a leaf never silently turns into one.
//!
//! A `Branch` whose only key is `*` behaves exactly like a `Wildcard`. A
//! `Branch` declaring `*` next to other keys is a configuration error that
//! aborts validation when the walker reaches it.

use indexmap::IndexMap;

use crate::validator::Validator;

/// One node of a schema tree.
#[derive(Debug, Clone)]
pub enum Schema {
    /// A validator applied to the value at this position.
    Leaf(Validator),
    /// Declared keys, in declaration order.
    Branch(IndexMap<String, Schema>),
    /// A node applied to every key of the object at this position.
    Wildcard(Box<Schema>),
}

impl Schema {
    /// An empty branch builder, to be filled with [`Branch::field`].
    pub fn branch() -> Branch {
        Branch::default()
    }

    /// A wildcard node matching every key of the data object.
    pub fn wildcard(node: impl Into<Schema>) -> Self {
        Self::Wildcard(Box::new(node.into()))
    }

    /// Whether this node is a leaf validator.
    ///
    /// The walker visits leaves even when the data key is absent so that
    /// `required` can fail; non-leaf nodes with absent data are skipped.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf(_))
    }
}

impl From<Validator> for Schema {
    fn from(validator: Validator) -> Self {
        Self::Leaf(validator)
    }
}

/// Builder for a [`Schema::Branch`] node.
///
/// Only a branch accepts keys. A leaf has no `field` method:
///
/// ```compile_fail
/// use vshape_schema::prelude::*;
///
/// let _ = Schema::from(is_string().and(required())).field("x", is_string());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Branch {
    fields: IndexMap<String, Schema>,
}

impl Branch {
    /// Declare `key`. Re-declaring a key replaces its node in place.
    pub fn field(mut self, key: impl Into<String>, node: impl Into<Schema>) -> Self {
        self.fields.insert(key.into(), node.into());
        self
    }

    /// Declared keys, in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

impl From<Branch> for Schema {
    fn from(branch: Branch) -> Self {
        Self::Branch(branch.fields)
    }
}

impl<K, S> FromIterator<(K, S)> for Schema
where
    K: Into<String>,
    S: Into<Schema>,
{
    fn from_iter<I: IntoIterator<Item = (K, S)>>(iter: I) -> Self {
        Self::Branch(iter.into_iter().map(|(k, s)| (k.into(), s.into())).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicate::{is_boolean, is_string};

    fn keys(schema: &Schema) -> Vec<&str> {
        match schema {
            Schema::Branch(fields) => fields.keys().map(String::as_str).collect(),
            other => panic!("expected branch, got {other:?}"),
        }
    }

    #[test]
    fn test_field_preserves_declaration_order() {
        let branch = Schema::branch()
            .field("zeta", is_string())
            .field("alpha", is_string())
            .field("mid", Schema::branch());
        assert_eq!(branch.keys().collect::<Vec<_>>(), vec!["zeta", "alpha", "mid"]);
        assert_eq!(keys(&branch.into()), vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_redeclared_field_keeps_position() {
        let schema: Schema = Schema::branch()
            .field("a", is_string())
            .field("b", is_string())
            .field("a", is_boolean())
            .into();
        assert_eq!(keys(&schema), vec!["a", "b"]);
        match &schema {
            Schema::Branch(fields) => assert!(fields["a"].is_leaf()),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_wildcard_with_siblings_is_expressible() {
        let schema: Schema = Schema::branch()
            .field(vshape_core::WILDCARD_KEY, is_string())
            .field("x", is_string())
            .into();
        assert_eq!(keys(&schema), vec!["*", "x"]);
    }

    #[test]
    fn test_from_iterator_builds_branch() {
        let schema: Schema = [("a", is_string()), ("b", is_boolean())].into_iter().collect();
        assert_eq!(keys(&schema), vec!["a", "b"]);
    }

    #[test]
    fn test_is_leaf() {
        assert!(Schema::from(is_string()).is_leaf());
        assert!(!Schema::from(Schema::branch()).is_leaf());
        assert!(!Schema::wildcard(is_string()).is_leaf());
    }
}

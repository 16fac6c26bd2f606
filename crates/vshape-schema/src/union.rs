//! # Union Combinator
//!
//! Accepts a value if any alternative accepts it. Alternatives are tried
//! in order and the first success wins; later alternatives are never
//! evaluated. A failed union reports one fixed message and says nothing
//! about which alternative came closest.

use futures::FutureExt;
use serde_json::Value;

use vshape_core::KeyPath;

use crate::check::{Check, CheckFuture, Outcome};
use crate::schema::Schema;
use crate::traverse::walk;
use crate::validator::{compose_type, Validator};

pub const UNION_MISMATCH_MESSAGE: &str = "value failed to match one of the the allowed types";

/// Ordered list of alternative schema nodes.
pub struct AnyOf {
    alternatives: Vec<Schema>,
}

impl AnyOf {
    pub fn new(alternatives: Vec<Schema>) -> Self {
        Self { alternatives }
    }
}

impl Check for AnyOf {
    fn name(&self) -> &str {
        "any_of"
    }

    fn check<'a>(&'a self, value: Option<&'a Value>, path: &'a KeyPath) -> CheckFuture<'a> {
        async move {
            if value.is_none() {
                return Ok(Outcome::Pass);
            }
            for (index, alternative) in self.alternatives.iter().enumerate() {
                // Configuration errors inside an alternative abort the call.
                if walk(alternative, value, path).await?.is_empty() {
                    tracing::trace!(path = %path, alternative = index, "union matched");
                    return Ok(Outcome::Pass);
                }
            }
            Ok(Outcome::fail(UNION_MISMATCH_MESSAGE))
        }
        .boxed()
    }
}

/// Build a union validator. Conditions such as `required` can be
/// attached to the result like any other validator.
pub fn is_any_of<I, S>(alternatives: I) -> Validator
where
    I: IntoIterator<Item = S>,
    S: Into<Schema>,
{
    compose_type(AnyOf::new(alternatives.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::required;
    use crate::predicate::{custom, is_boolean, is_integer, is_string};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    async fn run(v: &Validator, value: Option<&Value>) -> Outcome {
        v.run(value, &KeyPath::root()).await.unwrap()
    }

    #[tokio::test]
    async fn test_absent_value_passes() {
        let v = is_any_of([is_string(), is_integer()]);
        assert!(run(&v, None).await.is_pass());
    }

    #[tokio::test]
    async fn test_matches_any_alternative() {
        let v = is_any_of([is_string(), is_integer()]);
        assert!(run(&v, Some(&json!("x"))).await.is_pass());
        assert!(run(&v, Some(&json!(4))).await.is_pass());
        assert_eq!(
            run(&v, Some(&json!(4.5))).await,
            Outcome::fail("value failed to match one of the the allowed types")
        );
    }

    #[tokio::test]
    async fn test_stops_at_first_match() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let v = is_any_of([
            is_boolean(),
            is_string(),
            custom(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }),
        ]);
        assert!(run(&v, Some(&json!("s"))).await.is_pass());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_branch_alternative_uses_walker() {
        let v = is_any_of([
            Schema::from(is_string()),
            Schema::branch().field("code", is_integer().and(required())).into(),
        ]);
        assert!(run(&v, Some(&json!({"code": 7}))).await.is_pass());
        assert_eq!(
            run(&v, Some(&json!({"code": "7"}))).await,
            Outcome::fail(UNION_MISMATCH_MESSAGE)
        );
        assert_eq!(
            run(&v, Some(&json!({"code": 7, "extra": 1}))).await,
            Outcome::fail(UNION_MISMATCH_MESSAGE)
        );
    }

    #[tokio::test]
    async fn test_required_union() {
        let v = is_any_of([is_string(), is_integer()]).and(required());
        assert_eq!(run(&v, None).await, Outcome::fail("value is required but missing"));
    }

    #[tokio::test]
    async fn test_empty_union_rejects_present_values() {
        let v = is_any_of(Vec::<Schema>::new());
        assert_eq!(run(&v, Some(&json!(1))).await, Outcome::fail(UNION_MISMATCH_MESSAGE));
    }

    #[tokio::test]
    async fn test_conflict_in_alternative_aborts() {
        let v = is_any_of([Schema::branch()
            .field("*", is_string())
            .field("a", is_string())]);
        let err = v.run(Some(&json!({"a": "x"})), &KeyPath::root()).await.unwrap_err();
        assert!(matches!(err, vshape_core::SchemaError::WildcardConflict { .. }));
    }
}

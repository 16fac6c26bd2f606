//! # Composed Validators
//!
//! A [`Validator`] binds one type predicate to an ordered list of
//! [`Condition`]s.
//!
//! ## Evaluation Order
//!
//! 1. The predicate runs first. If it fails, its message is returned
//!    verbatim and no condition runs.
//! 2. Conditions run in descending priority. Ties keep the order in which
//!    the conditions were supplied.
//! 3. The first failing condition short-circuits the rest.
//!
//! Conditions are sorted once, when [`Validator::and`] builds a new
//! validator, never at evaluation time. Validators are immutable: `and`
//! returns a new value and leaves the receiver untouched.

use std::fmt;
use std::sync::Arc;

use futures::FutureExt;
use serde_json::Value;

use vshape_core::KeyPath;

use crate::check::{Check, CheckFuture, Outcome};
use crate::condition::Condition;

/// A type predicate plus its prioritized conditions.
#[derive(Clone)]
pub struct Validator {
    predicate: Arc<dyn Check>,
    conditions: Vec<Condition>,
}

/// Bind a type predicate into a [`Validator`] with no conditions.
pub fn compose_type<P>(predicate: P) -> Validator
where
    P: Check + 'static,
{
    Validator {
        predicate: Arc::new(predicate),
        conditions: Vec::new(),
    }
}

impl Validator {
    /// Return a new validator with `conditions` appended to the ones
    /// already attached, sorted by descending priority.
    ///
    /// Accepts a single [`Condition`] or any iterable of them:
    /// `is_string().and(required())`, `is_string().and([required(), not_empty()])`.
    pub fn and<I>(&self, conditions: I) -> Self
    where
        I: IntoIterator<Item = Condition>,
    {
        let mut all = self.conditions.clone();
        all.extend(conditions);
        // Stable, so ties keep supply order.
        all.sort_by(|a, b| b.priority().cmp(&a.priority()));
        Self {
            predicate: Arc::clone(&self.predicate),
            conditions: all,
        }
    }

    /// Attached conditions in execution order.
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// Evaluate the predicate, then each condition in order.
    pub fn run<'a>(&'a self, value: Option<&'a Value>, path: &'a KeyPath) -> CheckFuture<'a> {
        async move {
            let outcome = self.predicate.check(value, path).await?;
            if !outcome.is_pass() {
                return Ok(outcome);
            }
            for condition in &self.conditions {
                let outcome = condition.check(value, path).await?;
                if !outcome.is_pass() {
                    tracing::trace!(path = %path, condition = condition.name(), "condition failed");
                    return Ok(outcome);
                }
            }
            Ok(Outcome::Pass)
        }
        .boxed()
    }
}

impl Check for Validator {
    fn name(&self) -> &str {
        self.predicate.name()
    }

    fn check<'a>(&'a self, value: Option<&'a Value>, path: &'a KeyPath) -> CheckFuture<'a> {
        self.run(value, path)
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("predicate", &self.predicate.name())
            .field("conditions", &self.conditions)
            .finish()
    }
}

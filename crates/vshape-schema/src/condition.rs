//! # Conditions
//!
//! Refinements layered onto a type predicate. Each carries a priority that
//! orders it relative to the other conditions of the same validator;
//! higher priority runs first.
//!
//! | Condition   | Priority | Applies to        |
//! |-------------|----------|-------------------|
//! | `required`  | 3        | any value         |
//! | `not_empty` | 2        | strings           |
//! | `in_list`   | 2        | strings           |
//! | `range`     | 2        | numbers, arrays   |
//! | `of_type`   | 0        | arrays            |
//! | `of_shape`  | 0        | objects           |
//!
//! Only `required` forbids absence. Every other condition passes when the
//! value is absent, so an optional field that is missing stays valid.
//! The structural conditions run last because they recurse into data that
//! the earlier conditions have already accepted.

use std::fmt;
use std::sync::Arc;

use futures::FutureExt;
use serde_json::Value;

use vshape_core::KeyPath;

use crate::check::{Check, CheckFuture, Outcome};
use crate::schema::Schema;
use crate::traverse::walk;

pub const REQUIRED_PRIORITY: i32 = 3;
pub const REFINEMENT_PRIORITY: i32 = 2;
pub const STRUCTURAL_PRIORITY: i32 = 0;

pub const REQUIRED_MESSAGE: &str = "value is required but missing";
pub const EMPTY_STRING_MESSAGE: &str = "string value can not be empty";

/// A prioritized refinement attached to a [`crate::Validator`].
#[derive(Clone)]
pub struct Condition {
    priority: i32,
    check: Arc<dyn Check>,
}

impl Condition {
    /// Build a condition from a synchronous function over the optional value.
    pub fn new<F>(name: impl Into<String>, priority: i32, func: F) -> Self
    where
        F: Fn(Option<&Value>) -> Result<(), String> + Send + Sync + 'static,
    {
        Self::from_check(
            priority,
            FnCondition {
                name: name.into(),
                func,
            },
        )
    }

    /// Build a condition from any [`Check`].
    pub fn from_check<C>(priority: i32, check: C) -> Self
    where
        C: Check + 'static,
    {
        Self {
            priority,
            check: Arc::new(check),
        }
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn name(&self) -> &str {
        self.check.name()
    }

    pub fn check<'a>(&'a self, value: Option<&'a Value>, path: &'a KeyPath) -> CheckFuture<'a> {
        self.check.check(value, path)
    }
}

impl fmt::Debug for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name(), self.priority)
    }
}

/// Lets a single condition be passed wherever a list is accepted.
impl IntoIterator for Condition {
    type Item = Condition;
    type IntoIter = std::iter::Once<Condition>;

    fn into_iter(self) -> Self::IntoIter {
        std::iter::once(self)
    }
}

struct FnCondition<F> {
    name: String,
    func: F,
}

impl<F> Check for FnCondition<F>
where
    F: Fn(Option<&Value>) -> Result<(), String> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn check<'a>(&'a self, value: Option<&'a Value>, _path: &'a KeyPath) -> CheckFuture<'a> {
        Outcome::from((self.func)(value)).ready()
    }
}

// ─── required / not_empty / in_list ──────────────────────────────────

struct Required;

impl Check for Required {
    fn name(&self) -> &str {
        "required"
    }

    fn check<'a>(&'a self, value: Option<&'a Value>, _path: &'a KeyPath) -> CheckFuture<'a> {
        match value {
            None => Outcome::fail(REQUIRED_MESSAGE).ready(),
            Some(_) => Outcome::Pass.ready(),
        }
    }
}

/// Fails iff the value is absent.
pub fn required() -> Condition {
    Condition::from_check(REQUIRED_PRIORITY, Required)
}

struct NotEmpty;

impl Check for NotEmpty {
    fn name(&self) -> &str {
        "not_empty"
    }

    fn check<'a>(&'a self, value: Option<&'a Value>, _path: &'a KeyPath) -> CheckFuture<'a> {
        match value {
            Some(Value::String(s)) if s.is_empty() => Outcome::fail(EMPTY_STRING_MESSAGE).ready(),
            _ => Outcome::Pass.ready(),
        }
    }
}

/// Fails iff the value is the empty string.
pub fn not_empty() -> Condition {
    Condition::from_check(REFINEMENT_PRIORITY, NotEmpty)
}

struct InList {
    allowed: Vec<String>,
}

impl InList {
    fn test(&self, value: Option<&Value>) -> Outcome {
        match value {
            None => Outcome::Pass,
            Some(Value::String(s)) if self.allowed.iter().any(|a| a == s) => Outcome::Pass,
            Some(_) => Outcome::Fail(format!(
                "value does not match accepted values: [{}]",
                self.allowed.join(",")
            )),
        }
    }
}

impl Check for InList {
    fn name(&self) -> &str {
        "in_list"
    }

    fn check<'a>(&'a self, value: Option<&'a Value>, _path: &'a KeyPath) -> CheckFuture<'a> {
        self.test(value).ready()
    }
}

/// Fails iff the value is not one of `allowed`.
pub fn in_list<I, S>(allowed: I) -> Condition
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Condition::from_check(
        REFINEMENT_PRIORITY,
        InList {
            allowed: allowed.into_iter().map(Into::into).collect(),
        },
    )
}

// ─── range ───────────────────────────────────────────────────────────

/// Inclusive bounds on a number, or on the length of an array.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    lower: Option<f64>,
    upper: Option<f64>,
}

impl Range {
    pub fn new(lower: Option<f64>, upper: Option<f64>) -> Self {
        Self { lower, upper }
    }

    /// Synchronous form of [`Check::check`].
    pub fn test(&self, value: Option<&Value>) -> Outcome {
        let (subject, measured) = match value {
            Some(Value::Number(n)) => ("value", n.as_f64()),
            Some(Value::Array(items)) => ("array size", Some(items.len() as f64)),
            _ => return Outcome::Pass,
        };
        let Some(x) = measured else {
            return Outcome::Pass;
        };
        match (self.lower, self.upper) {
            (Some(lower), Some(upper)) if x < lower || x > upper => {
                Outcome::Fail(format!("{subject} falls outside of range ({lower}, {upper})"))
            }
            (None, Some(upper)) if x > upper => {
                Outcome::Fail(format!("{subject} must be less than or equal to {upper}"))
            }
            (Some(lower), None) if x < lower => {
                Outcome::Fail(format!("{subject} must be greater than or equal to {lower}"))
            }
            _ => Outcome::Pass,
        }
    }
}

impl Check for Range {
    fn name(&self) -> &str {
        "range"
    }

    fn check<'a>(&'a self, value: Option<&'a Value>, _path: &'a KeyPath) -> CheckFuture<'a> {
        self.test(value).ready()
    }
}

/// Bound a number, or an array's length. `None` leaves that side open.
pub fn range(lower: Option<f64>, upper: Option<f64>) -> Condition {
    Condition::from_check(REFINEMENT_PRIORITY, Range::new(lower, upper))
}

pub fn at_least(lower: f64) -> Condition {
    range(Some(lower), None)
}

pub fn at_most(upper: f64) -> Condition {
    range(None, Some(upper))
}

// ─── of_type / of_shape ──────────────────────────────────────────────

struct OfType {
    element: Schema,
}

impl Check for OfType {
    fn name(&self) -> &str {
        "of_type"
    }

    fn check<'a>(&'a self, value: Option<&'a Value>, path: &'a KeyPath) -> CheckFuture<'a> {
        async move {
            let Some(Value::Array(items)) = value else {
                return Ok(Outcome::Pass);
            };
            let mut errors = Vec::new();
            for (index, item) in items.iter().enumerate() {
                let item_path = path.index(index);
                errors.extend(walk(&self.element, Some(item), &item_path).await?);
            }
            Ok(Outcome::from_errors(errors))
        }
        .boxed()
    }
}

/// Apply `element` to every array element, reporting every failure with
/// the element index in its path. An empty array passes.
pub fn of_type(element: impl Into<Schema>) -> Condition {
    Condition::from_check(
        STRUCTURAL_PRIORITY,
        OfType {
            element: element.into(),
        },
    )
}

struct OfShape {
    shape: Schema,
}

impl Check for OfShape {
    fn name(&self) -> &str {
        "of_shape"
    }

    fn check<'a>(&'a self, value: Option<&'a Value>, path: &'a KeyPath) -> CheckFuture<'a> {
        async move {
            if value.is_none() {
                return Ok(Outcome::Pass);
            }
            let errors = walk(&self.shape, value, path).await?;
            Ok(Outcome::from_errors(errors))
        }
        .boxed()
    }
}

/// Walk `shape` against the value at the current path.
pub fn of_shape(shape: impl Into<Schema>) -> Condition {
    Condition::from_check(
        STRUCTURAL_PRIORITY,
        OfShape {
            shape: shape.into(),
        },
    )
}

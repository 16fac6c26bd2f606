//! # Type Predicates
//!
//! Atomic checks for the basic kind of a value. Every predicate accepts an
//! absent value: forbidding absence is the job of the `required` condition.
//! A present value of the wrong kind fails with `"value is not a <kind>"`
//! and no path information; the walker attaches the path.
//!
//! JSON data carries no callable values, so [`is_function`] accepts only
//! absence.

use futures::future::BoxFuture;
use futures::FutureExt;
use serde_json::Value;

use vshape_core::KeyPath;

use crate::check::{Check, CheckFuture, Outcome};
use crate::validator::{compose_type, Validator};

/// The primitive kinds a [`TypePredicate`] can test for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    String,
    Boolean,
    Number,
    /// Whole-number subset of `Number`.
    Integer,
    Function,
    Array,
    /// Plain keyed record. Excludes arrays and `null`.
    Object,
}

impl Kind {
    /// Returns the kind name used in messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Function => "function",
            Self::Array => "array",
            Self::Object => "object",
        }
    }

    /// The fixed mismatch message for this kind.
    pub fn mismatch_message(&self) -> String {
        match self {
            Self::Integer | Self::Array | Self::Object => format!("value is not an {}", self.as_str()),
            _ => format!("value is not a {}", self.as_str()),
        }
    }

    /// Whether a present value is of this kind.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Boolean => value.is_boolean(),
            Self::Number => value.is_number(),
            Self::Integer => is_whole_number(value),
            Self::Function => false,
            Self::Array => value.is_array(),
            Self::Object => value.is_object(),
        }
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn is_whole_number(value: &Value) -> bool {
    match value {
        Value::Number(n) if n.is_i64() || n.is_u64() => true,
        Value::Number(n) => n.as_f64().is_some_and(|f| f.is_finite() && f.fract() == 0.0),
        _ => false,
    }
}

/// Checks that a value, when present, is of one [`Kind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypePredicate {
    kind: Kind,
}

impl TypePredicate {
    pub fn new(kind: Kind) -> Self {
        Self { kind }
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Synchronous form of [`Check::check`].
    pub fn test(&self, value: Option<&Value>) -> Outcome {
        match value {
            None => Outcome::Pass,
            Some(v) if self.kind.matches(v) => Outcome::Pass,
            Some(_) => Outcome::Fail(self.kind.mismatch_message()),
        }
    }
}

impl Check for TypePredicate {
    fn name(&self) -> &str {
        self.kind.as_str()
    }

    fn check<'a>(&'a self, value: Option<&'a Value>, _path: &'a KeyPath) -> CheckFuture<'a> {
        self.test(value).ready()
    }
}

pub fn is_string() -> Validator {
    compose_type(TypePredicate::new(Kind::String))
}

pub fn is_boolean() -> Validator {
    compose_type(TypePredicate::new(Kind::Boolean))
}

pub fn is_number() -> Validator {
    compose_type(TypePredicate::new(Kind::Number))
}

/// Accepts numbers with no fractional component, including `4.0`.
pub fn is_integer() -> Validator {
    compose_type(TypePredicate::new(Kind::Integer))
}

pub fn is_function() -> Validator {
    compose_type(TypePredicate::new(Kind::Function))
}

pub fn is_array() -> Validator {
    compose_type(TypePredicate::new(Kind::Array))
}

/// Accepts plain objects only; `null` and arrays fail.
pub fn is_object() -> Validator {
    compose_type(TypePredicate::new(Kind::Object))
}

// ─── Custom Predicates ───────────────────────────────────────────────

/// A user-supplied synchronous predicate.
///
/// The function only sees present values; absence passes without calling it.
pub struct CustomPredicate<F> {
    func: F,
}

impl<F> Check for CustomPredicate<F>
where
    F: Fn(&Value) -> Result<(), String> + Send + Sync,
{
    fn name(&self) -> &str {
        "custom"
    }

    fn check<'a>(&'a self, value: Option<&'a Value>, _path: &'a KeyPath) -> CheckFuture<'a> {
        match value {
            None => Outcome::Pass.ready(),
            Some(v) => Outcome::from((self.func)(v)).ready(),
        }
    }
}

/// A user-supplied asynchronous predicate, e.g. a remote lookup.
///
/// The returned future is awaited before the next check runs.
pub struct AsyncPredicate<F> {
    func: F,
}

impl<F> Check for AsyncPredicate<F>
where
    F: for<'v> Fn(&'v Value) -> BoxFuture<'v, Result<(), String>> + Send + Sync,
{
    fn name(&self) -> &str {
        "custom_async"
    }

    fn check<'a>(&'a self, value: Option<&'a Value>, _path: &'a KeyPath) -> CheckFuture<'a> {
        match value {
            None => Outcome::Pass.ready(),
            Some(v) => (self.func)(v).map(|result| Ok(Outcome::from(result))).boxed(),
        }
    }
}

/// Wrap a synchronous function as a type predicate.
///
/// ```ignore
/// let even = custom(|v| match v.as_i64() {
///     Some(n) if n % 2 == 0 => Ok(()),
///     _ => Err("value is not even".to_string()),
/// });
/// ```
pub fn custom<F>(func: F) -> Validator
where
    F: Fn(&Value) -> Result<(), String> + Send + Sync + 'static,
{
    compose_type(CustomPredicate { func })
}

/// Wrap a future-returning function as a type predicate.
pub fn custom_async<F>(func: F) -> Validator
where
    F: for<'v> Fn(&'v Value) -> BoxFuture<'v, Result<(), String>> + Send + Sync + 'static,
{
    compose_type(AsyncPredicate { func })
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// A string predicate rejects every integer with the fixed message.
        #[test]
        fn string_rejects_numbers(n in any::<i64>()) {
            let outcome = TypePredicate::new(Kind::String).test(Some(&Value::from(n)));
            prop_assert_eq!(outcome, Outcome::fail("value is not a string"));
        }

        /// Integer predicate agrees with fractional-part arithmetic.
        #[test]
        fn integer_matches_fract(f in -1.0e9f64..1.0e9f64) {
            let outcome = TypePredicate::new(Kind::Integer).test(Some(&Value::from(f)));
            prop_assert_eq!(outcome.is_pass(), f.fract() == 0.0);
        }
    }
}

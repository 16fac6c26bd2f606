//! # Check Trait
//!
//! Defines the single interface shared by type predicates, conditions,
//! unions and composed validators. Every check is asynchronous at the
//! seam: synchronous checks return a ready future, so the walker sequences
//! all of them the same way.
//!
//! ## Invariant
//!
//! A check never mutates the value it inspects. An `Err` return is a
//! schema configuration error discovered while checking (for example a
//! malformed nested shape) and aborts the whole validation call.

use futures::future::{self, BoxFuture, FutureExt};
use serde_json::Value;

use vshape_core::{KeyPath, SchemaError, ValidationError, ValidationErrors};

/// Boxed future returned by every [`Check`].
pub type CheckFuture<'a> = BoxFuture<'a, Result<Outcome, SchemaError>>;

/// What a single check concluded about a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The value satisfies the check.
    Pass,
    /// The value fails with a message that belongs to the current path.
    Fail(String),
    /// A structural check produced fully-addressed nested errors.
    Errors(ValidationErrors),
}

impl Outcome {
    /// Normalize an accumulated nested error list: empty means pass.
    pub fn from_errors(errors: Vec<ValidationError>) -> Self {
        match ValidationErrors::from_vec(errors) {
            Some(errors) => Self::Errors(errors),
            None => Self::Pass,
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self::Fail(message.into())
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }

    /// Flatten into path-addressed errors. A bare failure message is
    /// attributed to `path`; nested errors already carry their own paths.
    pub fn into_errors(self, path: &KeyPath) -> Vec<ValidationError> {
        match self {
            Self::Pass => Vec::new(),
            Self::Fail(message) => vec![ValidationError::new(path.clone(), message)],
            Self::Errors(errors) => errors.into_inner(),
        }
    }

    /// Wrap in an already-completed [`CheckFuture`].
    pub fn ready<'a>(self) -> CheckFuture<'a> {
        future::ready(Ok(self)).boxed()
    }
}

impl From<Result<(), String>> for Outcome {
    fn from(result: Result<(), String>) -> Self {
        match result {
            Ok(()) => Self::Pass,
            Err(message) => Self::Fail(message),
        }
    }
}

/// A predicate or refinement over an optional JSON value.
///
/// `value` is `None` when the key is absent from the data. `path` is the
/// address of `value`, used by structural checks that recurse.
pub trait Check: Send + Sync {
    /// Short name used in `Debug` output and trace events.
    fn name(&self) -> &str;

    /// Evaluate the check.
    fn check<'a>(&'a self, value: Option<&'a Value>, path: &'a KeyPath) -> CheckFuture<'a>;
}

//! # Validation Reports
//!
//! The outcome of one validation pass: either [`ValidationResult::Valid`] or
//! an ordered, non-empty list of path-addressed [`ValidationError`]s.
//!
//! Order is meaningful. Errors appear depth-first in schema declaration
//! order, with extraneous-key errors after the declared keys of the same
//! object. Paths are unique within one result unless a data key contains
//! a dot; see [`to_error_map`].

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::path::KeyPath;

/// A single violation: where it happened and what went wrong.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Dotted path to the failing value. Empty for the top-level value.
    pub key: KeyPath,
    /// Human-readable description of the violation.
    pub error: String,
}

impl ValidationError {
    pub fn new(key: KeyPath, error: impl Into<String>) -> Self {
        Self {
            key,
            error: error.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.key.is_root() {
            write!(f, "(root): {}", self.error)
        } else {
            write!(f, "{}: {}", self.key, self.error)
        }
    }
}

/// Non-empty ordered collection of validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    /// Wrap an accumulated list. Returns `None` for an empty list.
    pub fn from_vec(errors: Vec<ValidationError>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(Self { errors })
        }
    }

    /// Returns the number of errors. Always at least one.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Always false; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.errors.iter()
    }

    /// Returns a slice of all errors in report order.
    pub fn as_slice(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Look up the message reported for a path.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.key.as_str() == key)
            .map(|e| e.error.as_str())
    }

    /// Consumes self and returns the inner Vec.
    pub fn into_inner(self) -> Vec<ValidationError> {
        self.errors
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "  {e}")?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

/// Result of validating one data value against one schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    /// The data conforms.
    Valid,
    /// The data does not conform; at least one error.
    Invalid(ValidationErrors),
}

impl ValidationResult {
    /// Normalize an accumulated error list: empty means valid.
    pub fn from_errors(errors: Vec<ValidationError>) -> Self {
        match ValidationErrors::from_vec(errors) {
            Some(errors) => Self::Invalid(errors),
            None => Self::Valid,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Borrow the errors, if any.
    pub fn errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Valid => None,
            Self::Invalid(errors) => Some(errors),
        }
    }

    /// Consume the result and return the errors in report order.
    /// Empty when valid.
    pub fn into_errors(self) -> Vec<ValidationError> {
        match self {
            Self::Valid => Vec::new(),
            Self::Invalid(errors) => errors.into_inner(),
        }
    }

    /// Path-keyed view of the errors. Empty when valid.
    pub fn error_map(&self) -> BTreeMap<String, String> {
        self.errors()
            .map(|errors| to_error_map(errors))
            .unwrap_or_default()
    }
}

/// Project an error list onto a map from dotted path to message.
///
/// Ordering is dropped. When two errors share a path the last message
/// wins. That happens with hand-built lists, and with data keys that
/// contain a dot: segments are joined without escaping, so an extraneous
/// key `"a.b"` renders the same path as the nested key `b` under `a`. Use
/// the error list when every entry matters.
pub fn to_error_map<'a, I>(errors: I) -> BTreeMap<String, String>
where
    I: IntoIterator<Item = &'a ValidationError>,
{
    errors
        .into_iter()
        .map(|e| (e.key.as_str().to_string(), e.error.clone()))
        .collect()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Projecting a list with unique paths onto a map loses nothing.
        #[test]
        fn error_map_round_trip(
            entries in prop::collection::btree_map("[a-z0-9]{1,6}(\\.[a-z0-9]{1,6}){0,3}", "[ -~]{0,40}", 1..16)
        ) {
            let list: Vec<ValidationError> = entries
                .iter()
                .map(|(k, v)| ValidationError::new(KeyPath::from(k.as_str()), v.as_str()))
                .collect();
            let errors = ValidationErrors::from_vec(list).unwrap();
            let map = to_error_map(&errors);
            prop_assert_eq!(map, entries);
        }
    }
}

//! # Error Types — Schema Configuration Errors
//!
//! Defines the error types that abort a validation call. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - A `SchemaError` means the schema itself is malformed. It is raised
//!   immediately and is never folded into a list of validation errors.
//! - Ordinary data mismatches are not errors in this sense: they are the
//!   `Invalid` arm of [`crate::ValidationResult`].

use thiserror::Error;

use crate::path::KeyPath;

/// Message carried by [`SchemaError::WildcardConflict`].
pub const WILDCARD_CONFLICT_MESSAGE: &str =
    "Schema wildcard conflict. A wildcard can not have sibling keys";

/// A misuse of the schema DSL detected while walking a schema.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// A branch declares the wildcard key `*` next to other keys.
    #[error("Schema wildcard conflict. A wildcard can not have sibling keys")]
    WildcardConflict {
        /// Path of the offending branch.
        path: KeyPath,
        /// The sibling keys declared alongside the wildcard.
        siblings: Vec<String>,
    },
}

impl SchemaError {
    /// Path of the schema node that raised the error.
    pub fn path(&self) -> &KeyPath {
        match self {
            Self::WildcardConflict { path, .. } => path,
        }
    }
}

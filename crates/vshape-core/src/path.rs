//! # Dotted Key Paths
//!
//! `KeyPath` addresses a value inside the validated data tree. Segments are
//! object keys or array indices rendered as decimal strings, joined by `.`.
//! The root is the empty path, so a child of the root is just its key.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The schema key that matches every key of the corresponding data object.
pub const WILDCARD_KEY: &str = "*";

/// A dot-joined address within a data tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyPath(String);

impl KeyPath {
    /// The empty path addressing the top-level value.
    pub fn root() -> Self {
        Self(String::new())
    }

    /// Extend this path by one segment.
    pub fn child(&self, segment: impl fmt::Display) -> Self {
        if self.0.is_empty() {
            Self(segment.to_string())
        } else {
            Self(format!("{}.{segment}", self.0))
        }
    }

    /// Extend this path by an array index.
    pub fn index(&self, index: usize) -> Self {
        self.child(index)
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for KeyPath {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for KeyPath {
    fn from(s: String) -> Self {
        Self(s)
    }
}

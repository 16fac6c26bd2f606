//! # vshape-core — Foundational Types for vshape
//!
//! This crate defines the vocabulary shared by every other crate in the
//! workspace. It depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **`KeyPath` newtype for addresses.** Every reported violation carries
//!    a dotted path built segment by segment through `KeyPath::child()`.
//!    No string concatenation of paths outside this crate.
//!
//! 2. **Two error channels.** `ValidationResult` is the normal outcome of a
//!    validation call (data-dependent, user-facing). `SchemaError` is a
//!    malformed schema (programmer-facing). The two never mix.
//!
//! 3. **Never an empty error list.** `ValidationErrors` can only be
//!    constructed non-empty; an empty accumulation normalizes to
//!    `ValidationResult::Valid`.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `vshape-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod path;
pub mod report;

// Re-export primary types for ergonomic imports.
pub use error::{SchemaError, WILDCARD_CONFLICT_MESSAGE};
pub use path::{KeyPath, WILDCARD_KEY};
pub use report::{to_error_map, ValidationError, ValidationErrors, ValidationResult};

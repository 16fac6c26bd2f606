//! # vshape-schema — Recursive Schema Validation
//!
//! Decides whether a JSON value conforms to a declarative schema and, if
//! not, reports every violation in one pass, each addressed by a dotted
//! path.
//!
//! ## Building Blocks
//!
//! - [`predicate`] — type predicates (`is_string`, `is_integer`, ...) and
//!   `custom` / `custom_async` wrappers for user checks.
//! - [`condition`] — prioritized refinements: `required`, `not_empty`,
//!   `in_list`, `range`, `of_type`, `of_shape`.
//! - [`validator`] — [`Validator`] binds a predicate to its conditions;
//!   [`Validator::and`] attaches more.
//! - [`union`] — [`is_any_of`], first-match alternatives.
//! - [`schema`] — the [`Schema`] node tree: leaves, branches, wildcards,
//!   and the [`Branch`] builder.
//! - [`traverse`] — [`validate`], the walker.
//!
//! ## Example
//!
//! ```ignore
//! use vshape_schema::prelude::*;
//!
//! let schema: Schema = Schema::branch()
//!     .field("name", is_string().and([required(), not_empty()]))
//!     .field("tags", is_array().and(of_type(is_string())))
//!     .into();
//!
//! let result = validate(&schema, &serde_json::json!({"name": ""})).await?;
//! assert_eq!(result.error_map()["name"], "string value can not be empty");
//! ```
//!
//! ## Crate Policy
//!
//! - Depends only on `vshape-core` internally.
//! - Schemas and data are read-only during a call; a schema can be shared
//!   across concurrent calls.
//! - Validation errors are data; [`SchemaError`] is a programming error.

pub mod check;
pub mod condition;
pub mod predicate;
pub mod schema;
pub mod traverse;
pub mod union;
pub mod validator;

pub use check::{Check, CheckFuture, Outcome};
pub use condition::{at_least, at_most, in_list, not_empty, of_shape, of_type, range, required, Condition};
pub use predicate::{
    custom, custom_async, is_array, is_boolean, is_function, is_integer, is_number, is_object,
    is_string, Kind, TypePredicate,
};
pub use schema::{Branch, Schema};
pub use traverse::validate;
pub use union::{is_any_of, AnyOf};
pub use validator::{compose_type, Validator};

pub use vshape_core::{
    to_error_map, KeyPath, SchemaError, ValidationError, ValidationErrors, ValidationResult,
};

/// Everything needed to author schemas and run validation.
pub mod prelude {
    pub use crate::{
        at_least, at_most, compose_type, custom, custom_async, in_list, is_any_of, is_array,
        is_boolean, is_function, is_integer, is_number, is_object, is_string, not_empty, of_shape,
        of_type, range, required, to_error_map, validate, Branch, Condition, Schema, ValidationResult,
        Validator,
    };
}

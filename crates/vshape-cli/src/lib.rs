//! # vshape-cli — vshape Command-Line Interface
//!
//! A thin clap-based front end over `vshape-schema`. Schemas come from the
//! compiled-in [`catalog`]; only data documents are read from disk.
//!
//! ## Subcommands
//!
//! - `check` — validate JSON/YAML documents against a catalog schema
//! - `schemas` — list the catalog
//!
//! ## Crate Policy
//!
//! - Argument parsing is separated from the handlers.
//! - Handlers delegate validation to `vshape-schema`; no validation logic here.
//! - Exit status is non-zero when any document is invalid or fails to load.

pub mod catalog;
pub mod check;
pub mod document;

//! # Check Subcommand
//!
//! Validates one or more documents against a catalog schema and prints
//! the path-addressed errors.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, ValueEnum};
use serde::Serialize;
use vshape_core::ValidationResult;

use crate::catalog;
use crate::document::load_document;

/// Arguments for the check subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Name of the catalog schema to validate against.
    #[arg(long, short)]
    pub schema: String,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Documents to validate (`.json`, `.yaml`, `.yml`).
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Per-document report line for `--format json`.
#[derive(Serialize, Debug)]
struct FileReport<'a> {
    file: String,
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<&'a vshape_core::ValidationErrors>,
    #[serde(skip_serializing_if = "Option::is_none")]
    load_error: Option<String>,
}

/// Run the check subcommand. Returns `Ok(true)` when every document loaded
/// and validated cleanly.
pub async fn run_check(args: &CheckArgs, out: &mut impl Write) -> anyhow::Result<bool> {
    let entry = catalog::lookup(&args.schema).with_context(|| {
        format!(
            "unknown schema '{}'; available: {}",
            args.schema,
            catalog::names().join(", ")
        )
    })?;
    let schema = entry.schema();

    let mut all_valid = true;
    for path in &args.files {
        let data = match load_document(path) {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!(file = %path.display(), reason = %e.reason, "document not loaded");
                all_valid = false;
                report_load_error(out, args.format, path, &e.reason)?;
                continue;
            }
        };
        let result = vshape_schema::validate(&schema, &data).await?;
        tracing::debug!(file = %path.display(), valid = result.is_valid(), "document checked");
        all_valid &= result.is_valid();
        report_result(out, args.format, path, &result)?;
    }
    Ok(all_valid)
}

fn report_result(
    out: &mut impl Write,
    format: OutputFormat,
    path: &Path,
    result: &ValidationResult,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => match result.errors() {
            None => writeln!(out, "{}: OK", path.display())?,
            Some(errors) => {
                writeln!(out, "{}: INVALID ({} errors)", path.display(), errors.len())?;
                writeln!(out, "{errors}")?;
            }
        },
        OutputFormat::Json => {
            let report = FileReport {
                file: path.display().to_string(),
                valid: result.is_valid(),
                errors: result.errors(),
                load_error: None,
            };
            writeln!(out, "{}", serde_json::to_string(&report)?)?;
        }
    }
    Ok(())
}

fn report_load_error(
    out: &mut impl Write,
    format: OutputFormat,
    path: &Path,
    reason: &str,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => writeln!(out, "{}: ERROR {reason}", path.display())?,
        OutputFormat::Json => {
            let report = FileReport {
                file: path.display().to_string(),
                valid: false,
                errors: None,
                load_error: Some(reason.to_string()),
            };
            writeln!(out, "{}", serde_json::to_string(&report)?)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(name: &str, content: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("vshape-check-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    fn args(schema: &str, format: OutputFormat, files: Vec<PathBuf>) -> CheckArgs {
        CheckArgs {
            schema: schema.to_string(),
            format,
            files,
        }
    }

    #[tokio::test]
    async fn test_text_output() {
        let good = temp_file("good.json", r#"{"id": "o-1", "items": [{"sku": "A", "quantity": 1}]}"#);
        let bad = temp_file("bad.yaml", "id: o-2\nitems: []\nextra: 1\n");
        let mut out = Vec::new();
        let ok = run_check(&args("order", OutputFormat::Text, vec![good, bad]), &mut out)
            .await
            .unwrap();
        assert!(!ok);
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("good.json: OK"), "{text}");
        assert!(text.contains("bad.yaml: INVALID (2 errors)"), "{text}");
        assert!(text.contains("items: array size must be greater than or equal to 1"), "{text}");
        assert!(text.contains("extra: extraneous key found"), "{text}");
    }

    #[tokio::test]
    async fn test_json_output() {
        let bad = temp_file("user.json", r#"{"name": ""}"#);
        let mut out = Vec::new();
        let ok = run_check(&args("user", OutputFormat::Json, vec![bad]), &mut out)
            .await
            .unwrap();
        assert!(!ok);
        let line: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(line["valid"], false);
        assert_eq!(line["errors"][0]["key"], "name");
        assert_eq!(line["errors"][0]["error"], "string value can not be empty");
    }

    #[tokio::test]
    async fn test_load_error_is_reported_not_raised() {
        let missing = PathBuf::from("/nonexistent/vshape/doc.json");
        let mut out = Vec::new();
        let ok = run_check(&args("user", OutputFormat::Text, vec![missing]), &mut out)
            .await
            .unwrap();
        assert!(!ok);
        assert!(String::from_utf8(out).unwrap().contains("ERROR cannot read file"));
    }

    #[tokio::test]
    async fn test_unknown_schema() {
        let mut out = Vec::new();
        let err = run_check(&args("nope", OutputFormat::Text, vec![]), &mut out)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("available: user, inventory, order"));
    }
}

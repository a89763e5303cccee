//! # Validate Subcommand
//!
//! `hbs validate <PATH> [--type <NAME>] [--format text|json]`
//!
//! A directory is validated file by file. A file that cannot be loaded is
//! reported in place and the remaining files are still validated; the run
//! then fails with a load error once the report is written.

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};
use hbs_core::Violations;
use hbs_schema::{EntityRegistry, SchemaValidationError};
use serde::Serialize;

use crate::Status;

/// Report format for validation results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One violation per line.
    Text,
    /// A JSON array of violations.
    Json,
}

/// Arguments for the validate subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Document (.json, .yaml, .yml) or directory of documents.
    pub path: PathBuf,

    /// Validate as this entity instead of the document's own `type` tag.
    #[arg(long = "type", value_name = "NAME")]
    pub type_name: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// What happened to one file.
#[derive(Debug)]
enum Outcome<'a> {
    Checked(&'a Violations),
    LoadFailed(String),
}

#[derive(Serialize)]
struct FileReport<'a> {
    file: String,
    violations: &'a Violations,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
}

/// Run the command, writing the report to `out`.
///
/// Violations are not errors. An unknown type name is an error before
/// anything is written, and an unreadable document is an error after the
/// report is written.
pub fn run(args: &ValidateArgs, out: &mut dyn Write) -> anyhow::Result<Status> {
    let registry = EntityRegistry::new();
    let type_name = args.type_name.as_deref();
    let directory = args.path.is_dir();

    let results = if directory {
        registry.validate_dir(&args.path, type_name)?
    } else {
        vec![(args.path.clone(), registry.validate_file(&args.path, type_name))]
    };

    let empty = Violations::default();
    let mut reports = Vec::with_capacity(results.len());
    for (path, result) in &results {
        let outcome = match result {
            Ok(()) => Outcome::Checked(&empty),
            Err(SchemaValidationError::ValidationFailed { violations, .. }) => Outcome::Checked(violations),
            Err(e @ SchemaValidationError::DocumentLoadError { .. }) if directory => {
                tracing::warn!(file = %path.display(), error = %e, "skipping unreadable document");
                Outcome::LoadFailed(e.to_string())
            }
            Err(e) => anyhow::bail!("{e}"),
        };
        reports.push((path.as_path(), outcome));
    }

    match args.format {
        OutputFormat::Text => write_text(&reports, out)?,
        OutputFormat::Json if directory => {
            let files: Vec<FileReport<'_>> = reports
                .iter()
                .map(|(path, outcome)| match outcome {
                    Outcome::Checked(violations) => FileReport {
                        file: path.display().to_string(),
                        violations,
                        error: None,
                    },
                    Outcome::LoadFailed(reason) => FileReport {
                        file: path.display().to_string(),
                        violations: &empty,
                        error: Some(reason.as_str()),
                    },
                })
                .collect();
            serde_json::to_writer_pretty(&mut *out, &files)?;
            writeln!(out)?;
        }
        OutputFormat::Json => {
            if let Some((_, Outcome::Checked(violations))) = reports.first() {
                serde_json::to_writer_pretty(&mut *out, violations)?;
                writeln!(out)?;
            }
        }
    }

    let unreadable = reports
        .iter()
        .filter(|(_, o)| matches!(o, Outcome::LoadFailed(_)))
        .count();
    let invalid = reports
        .iter()
        .filter(|(_, o)| matches!(o, Outcome::Checked(v) if !v.is_empty()))
        .count();
    tracing::debug!(files = reports.len(), invalid, unreadable, "validation finished");

    if unreadable > 0 {
        anyhow::bail!("{unreadable} of {} documents could not be loaded", reports.len());
    }
    Ok(if invalid == 0 { Status::Valid } else { Status::Invalid })
}

fn write_text(reports: &[(&Path, Outcome<'_>)], out: &mut dyn Write) -> std::io::Result<()> {
    for (path, outcome) in reports {
        let violations = match outcome {
            Outcome::LoadFailed(reason) => {
                writeln!(out, "{}: {reason}", path.display())?;
                continue;
            }
            Outcome::Checked(v) if v.is_empty() => {
                writeln!(out, "{}: valid", path.display())?;
                continue;
            }
            Outcome::Checked(v) => v,
        };
        for v in violations.iter() {
            let pointer = if v.path.is_empty() { "(root)" } else { v.path.as_str() };
            write!(out, "{}: {pointer}: {}", path.display(), v.kind)?;
            if let Some(received) = &v.received {
                write!(out, " (received {received})")?;
            }
            writeln!(out)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fixtures() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("hbs-schema")
            .join("tests")
            .join("fixtures")
    }

    fn run_on(path: PathBuf, type_name: Option<&str>, format: OutputFormat) -> (anyhow::Result<Status>, String) {
        let args = ValidateArgs {
            path,
            type_name: type_name.map(str::to_string),
            format,
        };
        let mut out = Vec::new();
        let status = run(&args, &mut out);
        (status, String::from_utf8(out).unwrap())
    }

    /// A scratch directory holding copies of two fixtures plus one broken
    /// document.
    fn mixed_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("hbs-cli-{name}-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::copy(fixtures().join("program_type.json"), dir.join("a_program.json")).unwrap();
        std::fs::write(dir.join("b_broken.json"), "{\"type\": ").unwrap();
        std::fs::copy(fixtures().join("bad_modifier.json"), dir.join("c_modifier.json")).unwrap();
        dir
    }

    #[test]
    fn test_valid_file_text() {
        let (status, out) = run_on(fixtures().join("program_type.yaml"), None, OutputFormat::Text);
        assert_eq!(status.unwrap(), Status::Valid);
        assert!(out.trim_end().ends_with("program_type.yaml: valid"));
    }

    #[test]
    fn test_invalid_file_json() {
        let (status, out) = run_on(fixtures().join("bad_modifier.json"), None, OutputFormat::Json);
        assert_eq!(status.unwrap(), Status::Invalid);
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 3);
        assert!(parsed.as_array().unwrap().iter().any(|v| v["kind"] == "unexpected_field"));
    }

    #[test]
    fn test_invalid_file_text_lines() {
        let (status, out) = run_on(fixtures().join("bad_modifier.json"), None, OutputFormat::Text);
        assert_eq!(status.unwrap(), Status::Invalid);
        assert_eq!(out.lines().count(), 3);
        assert!(out.contains("/emissivity: unexpected field"));
    }

    #[test]
    fn test_unknown_type_is_error() {
        let (status, _) = run_on(fixtures().join("program_type.json"), Some("Hovercraft"), OutputFormat::Text);
        assert!(status.unwrap_err().to_string().contains("Hovercraft"));
    }

    #[test]
    fn test_missing_file_is_error() {
        let (status, out) = run_on(fixtures().join("nope.json"), None, OutputFormat::Text);
        assert!(status.is_err());
        assert!(out.is_empty());
    }

    #[test]
    fn test_directory_json_report() {
        let (status, out) = run_on(fixtures(), None, OutputFormat::Json);
        assert_eq!(status.unwrap(), Status::Invalid);
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        let files = parsed.as_array().unwrap();
        assert_eq!(files.len(), 4);
        assert!(files[1]["file"].as_str().unwrap().ends_with("bad_modifier.json"));
        assert_eq!(files[0]["violations"], serde_json::json!([]));
        assert!(files[0].get("error").is_none());
    }

    #[test]
    fn test_directory_reports_every_file_despite_unreadable_one() {
        let dir = mixed_dir("text");
        let (status, out) = run_on(dir.clone(), None, OutputFormat::Text);
        std::fs::remove_dir_all(&dir).unwrap();

        assert!(status.unwrap_err().to_string().contains("1 of 3 documents"));
        assert!(out.contains("a_program.json: valid"));
        assert!(out.contains("b_broken.json: document load error"));
        assert!(out.contains("c_modifier.json: /emissivity: unexpected field"));
    }

    #[test]
    fn test_directory_json_marks_unreadable_file() {
        let dir = mixed_dir("json");
        let (status, out) = run_on(dir.clone(), None, OutputFormat::Json);
        std::fs::remove_dir_all(&dir).unwrap();

        assert!(status.is_err());
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        let files = parsed.as_array().unwrap();
        assert_eq!(files.len(), 3);
        assert!(files[1]["error"].as_str().unwrap().contains("invalid JSON"));
        assert_eq!(files[2]["violations"].as_array().unwrap().len(), 3);
    }
}

//! # Document Validation
//!
//! Validates JSON and YAML documents against registered entities. The
//! decoder is the validator: a document is valid exactly when its entity
//! decodes, and every violation the decoder collects is returned with its
//! JSON Pointer.
//!
//! YAML documents are read into the same `serde_json::Value` tree as JSON,
//! so both formats are held to identical rules.

use std::path::{Path, PathBuf};

use hbs_core::{Violation, ViolationKind, Violations};
use serde_json::Value;
use thiserror::Error;

use crate::registry::EntityRegistry;

/// Error during document validation.
#[derive(Error, Debug)]
pub enum SchemaValidationError {
    /// The document did not decode as the named entity.
    #[error("validation failed against '{entity}':\n{violations}")]
    ValidationFailed {
        /// Registry name the document was validated against.
        entity: String,
        violations: Violations,
    },

    /// No entity is registered under the requested name.
    #[error("unknown entity type '{name}'")]
    UnknownEntityType { name: String },

    /// The document file could not be read or parsed.
    #[error("document load error for '{path}': {reason}")]
    DocumentLoadError { path: String, reason: String },

    /// IO error while walking a directory of documents.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl SchemaValidationError {
    /// The violations of a failed validation, if this is one.
    pub fn violations(&self) -> Option<&Violations> {
        match self {
            Self::ValidationFailed { violations, .. } => Some(violations),
            _ => None,
        }
    }
}

/// Read a `.json`, `.yaml` or `.yml` document into a JSON value.
///
/// Any other extension is parsed as JSON.
pub fn load_document(path: &Path) -> Result<Value, SchemaValidationError> {
    let load_error = |reason: String| SchemaValidationError::DocumentLoadError {
        path: path.display().to_string(),
        reason,
    };

    let content = std::fs::read_to_string(path).map_err(|e| load_error(format!("cannot read file: {e}")))?;

    match path.extension().and_then(|e| e.to_str()).unwrap_or("") {
        "yaml" | "yml" => {
            serde_yaml::from_str(&content).map_err(|e| load_error(format!("invalid YAML: {e}")))
        }
        _ => serde_json::from_str(&content).map_err(|e| load_error(format!("invalid JSON: {e}"))),
    }
}

impl EntityRegistry {
    /// Validate `value` as the entity registered under `type_name`.
    pub fn validate_document(&self, value: &Value, type_name: &str) -> Result<(), SchemaValidationError> {
        let decode = self
            .get(type_name)
            .ok_or_else(|| SchemaValidationError::UnknownEntityType {
                name: type_name.to_string(),
            })?;

        match decode(value) {
            Ok(()) => {
                tracing::debug!(entity = type_name, "document valid");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(entity = type_name, violations = e.violations.len(), "document invalid");
                Err(SchemaValidationError::ValidationFailed {
                    entity: type_name.to_string(),
                    violations: e.violations,
                })
            }
        }
    }

    /// Validate `value` as the entity named by its own `type` tag.
    ///
    /// A missing, non-string or unregistered tag is reported as a violation
    /// at `/type`.
    pub fn validate_tagged(&self, value: &Value) -> Result<(), SchemaValidationError> {
        let violation = match value.get("type") {
            Some(Value::String(tag)) if self.contains(tag) => return self.validate_document(value, tag),
            Some(found @ Value::String(tag)) => Violation::new(
                "/type",
                ViolationKind::UnrecognizedDiscriminator {
                    received: tag.clone(),
                    allowed: self.type_names(),
                },
                Some(found.clone()),
            ),
            Some(found) => Violation::new(
                "/type",
                ViolationKind::TypeMismatch { expected: "string" },
                Some(found.clone()),
            ),
            None if value.is_object() => Violation::new(
                "/type",
                ViolationKind::MissingDiscriminator {
                    allowed: self.type_names(),
                },
                None,
            ),
            None => Violation::new("", ViolationKind::TypeMismatch { expected: "object" }, Some(value.clone())),
        };
        tracing::warn!(path = %violation.path, "document has no usable type tag");
        Err(SchemaValidationError::ValidationFailed {
            entity: "document".to_string(),
            violations: Violations::new(vec![violation]),
        })
    }

    /// Load a document and validate it, either as `type_name` or by its own
    /// `type` tag.
    pub fn validate_file(&self, path: &Path, type_name: Option<&str>) -> Result<(), SchemaValidationError> {
        let value = load_document(path)?;
        match type_name {
            Some(name) => self.validate_document(&value, name),
            None => self.validate_tagged(&value),
        }
    }

    /// Validate every `.json`, `.yaml` and `.yml` file directly inside
    /// `dir`, in path order.
    pub fn validate_dir(
        &self,
        dir: &Path,
        type_name: Option<&str>,
    ) -> Result<Vec<(PathBuf, Result<(), SchemaValidationError>)>, SchemaValidationError> {
        let mut paths = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            let is_document = matches!(
                path.extension().and_then(|e| e.to_str()),
                Some("json" | "yaml" | "yml")
            );
            if path.is_file() && is_document {
                paths.push(path);
            }
        }
        paths.sort();
        Ok(paths
            .into_iter()
            .map(|path| {
                let result = self.validate_file(&path, type_name);
                (path, result)
            })
            .collect())
    }
}

//! # Error Types — Field Violations and Decode Failures
//!
//! Every decode failure is reported as a [`ValidationError`] carrying the full
//! list of [`Violation`]s found in the fragment, not just the first one.
//! Each violation names the JSON Pointer of the offending field, what went
//! wrong, and the value that was received (when there was one).
//!
//! ## Design
//!
//! - Violations are plain data so callers can render them as text, JSON, or
//!   match on [`ViolationKind`] in tests.
//! - Nothing is coerced or defaulted on failure. A fragment either decodes
//!   cleanly or yields every violation it contains.

use std::fmt;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// What went wrong at a single field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViolationKind {
    /// A required field is absent.
    MissingField,
    /// The value has the wrong JSON type.
    TypeMismatch {
        /// Human-readable name of the expected JSON type.
        expected: &'static str,
    },
    /// The value has the right type but breaks a bound, length, pattern or
    /// enumeration.
    ConstraintViolation {
        /// Description of the violated constraint.
        constraint: String,
    },
    /// A polymorphic slot received a `type` tag outside its candidate set.
    UnrecognizedDiscriminator {
        /// The tag that was received.
        received: String,
        /// The tags the slot accepts.
        allowed: Vec<&'static str>,
    },
    /// A polymorphic slot received an object without a `type` tag.
    MissingDiscriminator {
        /// The tags the slot accepts.
        allowed: Vec<&'static str>,
    },
    /// A key that the entity does not declare.
    UnexpectedField,
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField => f.write_str("field required"),
            Self::TypeMismatch { expected } => write!(f, "expected {expected}"),
            Self::ConstraintViolation { constraint } => f.write_str(constraint),
            Self::UnrecognizedDiscriminator { received, allowed } => write!(
                f,
                "unrecognized variant '{received}'; expected one of: {}",
                allowed.join(", ")
            ),
            Self::MissingDiscriminator { allowed } => write!(
                f,
                "missing discriminator 'type'; expected one of: {}",
                allowed.join(", ")
            ),
            Self::UnexpectedField => f.write_str("unexpected field"),
        }
    }
}

/// A single field-level violation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violation {
    /// JSON Pointer to the offending field (empty string for the root).
    pub path: String,
    /// What went wrong.
    #[serde(flatten)]
    pub kind: ViolationKind,
    /// The value found at `path`, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received: Option<Value>,
}

impl Violation {
    /// Build a violation at `path`.
    pub fn new(path: impl Into<String>, kind: ViolationKind, received: Option<Value>) -> Self {
        Self {
            path: path.into(),
            kind,
            received,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = if self.path.is_empty() {
            "(root)"
        } else {
            self.path.as_str()
        };
        write!(f, "  {path}: {}", self.kind)?;
        if let Some(value) = &self.received {
            write!(f, " (received {value})")?;
        }
        Ok(())
    }
}

/// The ordered collection of violations found while decoding one fragment.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Violations(Vec<Violation>);

impl Violations {
    /// Wrap an already collected list.
    pub fn new(violations: Vec<Violation>) -> Self {
        Self(violations)
    }

    /// Number of violations.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no violations were recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the violations in the order they were found.
    pub fn violations(&self) -> &[Violation] {
        &self.0
    }

    /// Iterate over the violations.
    pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.0.iter()
    }

    /// The first violation recorded at `path`, if any.
    pub fn at(&self, path: &str) -> Option<&Violation> {
        self.0.iter().find(|v| v.path == path)
    }

    /// Consume into the inner vector.
    pub fn into_inner(self) -> Vec<Violation> {
        self.0
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, violation) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{violation}")?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Violations {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Returned by `decode` when a fragment does not conform to its entity.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{entity} failed validation with {} violation(s):\n{violations}", .violations.len())]
pub struct ValidationError {
    /// The entity type that was being decoded.
    pub entity: &'static str,
    /// Every violation found in the fragment.
    pub violations: Violations,
}

/// Top-level error type for the honeybee schema crates.
#[derive(Error, Debug)]
pub enum HbsError {
    /// A fragment failed to decode.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A string did not name any member of an enumeration.
    #[error("'{value}' is not a valid {enum_name}")]
    UnknownEnumValue {
        /// The enumeration that was parsed.
        enum_name: &'static str,
        /// The rejected input.
        value: String,
    },

    /// JSON text could not be parsed or produced.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

//! # Identifiers and Identified Base Fields
//!
//! Three identifier flavours exist in the schema:
//!
//! - [`Identifier`]: a reference to another entity, 1 to 100 characters of
//!   any kind. References are checked for shape only, never resolved.
//! - [`EnergyIdentifier`]: 1 to 100 characters, none of `, ; ! \n \t`
//!   (characters that break EnergyPlus input files).
//! - [`RadianceIdentifier`]: 1 to 100 characters drawn from
//!   `A-Z a-z 0-9 . _ -`.
//!
//! [`EnergyIdentity`] and [`RadianceIdentity`] bundle an identifier with the
//! optional `display_name` (and, for energy, `user_data`) that every
//! identified entity carries. They are flattened into the entity structs.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::constraint::Any;
use crate::decode::{Context, Decode, Decoded, JsonObject, ObjectReader};
use crate::error::ViolationKind;

const MAX_IDENTIFIER_CHARS: usize = 100;
const ENERGY_FORBIDDEN: &[char] = &[',', ';', '!', '\n', '\t'];

fn check_length(value: &str) -> Result<(), String> {
    let len = value.chars().count();
    if (1..=MAX_IDENTIFIER_CHARS).contains(&len) {
        Ok(())
    } else {
        Err(format!(
            "must contain between 1 and {MAX_IDENTIFIER_CHARS} characters (got {len})"
        ))
    }
}

fn decode_with(
    value: &Value,
    cx: &mut Context,
    validate: fn(&str) -> Result<(), String>,
) -> Decoded<String> {
    let text = String::decode_value(value, cx)?;
    match validate(&text) {
        Ok(()) => Ok(text),
        Err(constraint) => Err(cx.report(ViolationKind::ConstraintViolation { constraint }, Some(value))),
    }
}

/// A reference to another entity by identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Identifier(String);

impl Identifier {
    /// Validate and wrap a reference string.
    pub fn new(value: impl Into<String>) -> Result<Self, String> {
        let value = value.into();
        check_length(&value)?;
        Ok(Self(value))
    }

    /// The referenced identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Decode for Identifier {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        decode_with(value, cx, check_length).map(Self)
    }
}

/// Identifier of an energy entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EnergyIdentifier(String);

impl EnergyIdentifier {
    fn validate(value: &str) -> Result<(), String> {
        check_length(value)?;
        if value.contains(ENERGY_FORBIDDEN) {
            return Err("must not contain commas, semicolons, exclamation marks, newlines or tabs".into());
        }
        Ok(())
    }

    /// Validate and wrap an energy identifier.
    pub fn new(value: impl Into<String>) -> Result<Self, String> {
        let value = value.into();
        Self::validate(&value)?;
        Ok(Self(value))
    }

    /// The identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Decode for EnergyIdentifier {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        decode_with(value, cx, Self::validate).map(Self)
    }
}

/// Identifier of a radiance entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RadianceIdentifier(String);

impl RadianceIdentifier {
    fn validate(value: &str) -> Result<(), String> {
        check_length(value)?;
        let allowed = |c: char| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-');
        if !value.chars().all(allowed) {
            return Err("must contain only letters, digits, '.', '_' and '-'".into());
        }
        Ok(())
    }

    /// Validate and wrap a radiance identifier.
    pub fn new(value: impl Into<String>) -> Result<Self, String> {
        let value = value.into();
        Self::validate(&value)?;
        Ok(Self(value))
    }

    /// The identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Decode for RadianceIdentifier {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        decode_with(value, cx, Self::validate).map(Self)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for EnergyIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for RadianceIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Base fields of every identified energy entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnergyIdentity {
    pub identifier: EnergyIdentifier,
    pub display_name: Option<String>,
    pub user_data: Option<JsonObject>,
}

impl EnergyIdentity {
    /// Identity with no display name or user data.
    pub fn new(identifier: EnergyIdentifier) -> Self {
        Self {
            identifier,
            display_name: None,
            user_data: None,
        }
    }

    /// Read the base fields from an open object.
    pub fn read(obj: &mut ObjectReader<'_, '_>) -> Decoded<Self> {
        let identifier = obj.required("identifier", Any);
        let display_name = obj.optional("display_name", Any);
        let user_data = obj.optional("user_data", Any);
        Ok(Self {
            identifier: identifier?,
            display_name: display_name?,
            user_data: user_data?,
        })
    }
}

/// Base fields of every identified radiance entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadianceIdentity {
    pub identifier: RadianceIdentifier,
    pub display_name: Option<String>,
}

impl RadianceIdentity {
    /// Identity with no display name.
    pub fn new(identifier: RadianceIdentifier) -> Self {
        Self {
            identifier,
            display_name: None,
        }
    }

    /// Read the base fields from an open object.
    pub fn read(obj: &mut ObjectReader<'_, '_>) -> Decoded<Self> {
        let identifier = obj.required("identifier", Any);
        let display_name = obj.optional("display_name", Any);
        Ok(Self {
            identifier: identifier?,
            display_name: display_name?,
        })
    }
}

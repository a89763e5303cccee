//! # Reference Library Access
//!
//! Helpers for building the frozen default catalogs from a bundled library:
//! parse the text once, select named entries in library order, and decode
//! each through its schema. Any failure is a [`CatalogError`]; the catalog
//! owners treat it as fatal.

use std::any::type_name;

use serde_json::{Map, Value};
use thiserror::Error;

use crate::decode::{Context, Decode};
use crate::error::ValidationError;

/// A bundled library could not be turned into a catalog.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    /// The library text is not a JSON object of entity arrays.
    #[error("default library '{library}' is malformed: {reason}")]
    MalformedDataset {
        library: &'static str,
        reason: String,
    },

    /// A required entry is absent.
    #[error("default library '{library}' has no {collection} entry named '{identifier}'")]
    MissingEntry {
        library: &'static str,
        collection: &'static str,
        identifier: String,
    },

    /// An entry failed its schema.
    #[error("default library '{library}' entry '{identifier}' in {collection} is invalid: {source}")]
    InvalidEntry {
        library: &'static str,
        collection: &'static str,
        identifier: String,
        source: ValidationError,
    },
}

/// A parsed reference library.
#[derive(Debug, Clone)]
pub struct Library {
    name: &'static str,
    root: Map<String, Value>,
}

impl Library {
    /// Parse library text.
    pub fn parse(name: &'static str, text: &str) -> Result<Self, CatalogError> {
        let malformed = |reason: String| CatalogError::MalformedDataset { library: name, reason };
        match serde_json::from_str::<Value>(text) {
            Ok(Value::Object(root)) => Ok(Self { name, root }),
            Ok(_) => Err(malformed("top level is not an object".into())),
            Err(e) => Err(malformed(e.to_string())),
        }
    }

    /// The library name used in diagnostics.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// All entries of a collection.
    pub fn entries(&self, collection: &'static str) -> Result<&[Value], CatalogError> {
        match self.root.get(collection) {
            Some(Value::Array(items)) => Ok(items),
            Some(_) => Err(CatalogError::MalformedDataset {
                library: self.name,
                reason: format!("'{collection}' is not an array"),
            }),
            None => Err(CatalogError::MalformedDataset {
                library: self.name,
                reason: format!("'{collection}' is missing"),
            }),
        }
    }

    /// The first entry of `collection` whose `identifier` is `identifier`.
    pub fn find(&self, collection: &'static str, identifier: &str) -> Result<&Value, CatalogError> {
        self.entries(collection)?
            .iter()
            .find(|entry| entry_identifier(entry) == Some(identifier))
            .ok_or_else(|| CatalogError::MissingEntry {
                library: self.name,
                collection,
                identifier: identifier.to_string(),
            })
    }

    /// The entries named in `names`, in library order, each taken once.
    ///
    /// Fails on the first name that has no entry.
    pub fn select(&self, collection: &'static str, names: &[&str]) -> Result<Vec<&Value>, CatalogError> {
        let entries = self.entries(collection)?;
        if let Some(missing) = names
            .iter()
            .find(|name| !entries.iter().any(|e| entry_identifier(e) == Some(**name)))
        {
            return Err(CatalogError::MissingEntry {
                library: self.name,
                collection,
                identifier: missing.to_string(),
            });
        }
        let mut seen: Vec<&str> = Vec::with_capacity(names.len());
        let mut selected = Vec::with_capacity(names.len());
        for entry in entries {
            if let Some(id) = entry_identifier(entry) {
                if names.contains(&id) && !seen.contains(&id) {
                    seen.push(id);
                    selected.push(entry);
                }
            }
        }
        Ok(selected)
    }

    /// Decode one entry of `collection` as `T`.
    pub fn decode<T: Decode>(&self, collection: &'static str, entry: &Value) -> Result<T, CatalogError> {
        let mut cx = Context::new();
        match T::decode_value(entry, &mut cx) {
            Ok(decoded) if cx.is_clean() => Ok(decoded),
            _ => Err(CatalogError::InvalidEntry {
                library: self.name,
                collection,
                identifier: entry_identifier(entry).unwrap_or("<unnamed>").to_string(),
                source: ValidationError {
                    entity: short_type_name::<T>(),
                    violations: cx.into_violations(),
                },
            }),
        }
    }
}

fn entry_identifier(entry: &Value) -> Option<&str> {
    entry.get("identifier").and_then(Value::as_str)
}

fn short_type_name<T>() -> &'static str {
    let full = type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}

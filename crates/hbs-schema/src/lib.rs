//! # hbs-schema — Entity Registry & Document Validation
//!
//! Validates honeybee schema documents from JSON values or JSON/YAML files.
//!
//! ## Registry (`registry`)
//!
//! [`EntityRegistry::new`] maps every entity `type` literal of the core,
//! energy, radiance and ARE crates to its decoder.
//!
//! ## Validation (`validate`)
//!
//! - [`EntityRegistry::validate_document`] validates against a named entity.
//! - [`EntityRegistry::validate_tagged`] uses the document's own `type` tag.
//! - [`EntityRegistry::validate_file`] and [`EntityRegistry::validate_dir`]
//!   load `.json`, `.yaml` and `.yml` documents first.
//!
//! Failures carry every violation with its JSON Pointer, never only the
//! first one.
//!
//! ## Crate Policy
//!
//! - Depends on every entity crate and on nothing above them.
//! - Validation never coerces or defaults on failure.

pub mod registry;
pub mod validate;

pub use registry::{DecodeFn, EntityRegistry};
pub use validate::{load_document, SchemaValidationError};

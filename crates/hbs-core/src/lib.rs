//! # hbs-core — Foundational Types for the Honeybee Schema
//!
//! This crate holds the machinery every schema crate builds on, plus the
//! handful of entities shared by all of them (boundary conditions, geometry,
//! project information). It depends on no other `hbs-*` crate.
//!
//! ## Key Design Principles
//!
//! 1. **Collect-all decoding.** Entities decode from `serde_json::Value`
//!    through [`Decode`] and [`ObjectReader`], visiting every field so one
//!    pass reports every [`Violation`] with its JSON Pointer.
//!
//! 2. **Exact discriminators.** Every entity carries a literal `type` tag
//!    equal to its name ([`Entity::TYPE`]). Polymorphic slots built with
//!    [`one_of!`] dispatch on that tag only; no structural guessing.
//!
//! 3. **Bounds enforced, never clamped.** [`Range`] and [`Length`] reject
//!    out-of-bound values with a constraint violation naming the interval.
//!
//! 4. **Encoding through serde.** Entities derive `Serialize` with an
//!    internal `type` tag. `None` is emitted as `null`, so an encoded entity
//!    always lists every field. `Deserialize` is implemented by [`entity!`],
//!    which runs the same collect-all decoder, so `serde_json::from_value`
//!    never accepts what [`Entity::decode`] rejects.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `hbs-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod altnumber;
pub mod boundary;
pub mod catalog;
pub mod constraint;
pub mod decode;
pub mod error;
pub mod geometry;
pub mod identity;
mod macros;
pub mod project;

// Re-export primary types for ergonomic imports.
pub use altnumber::{Autocalculate, AutocalculateOr, Autosize, CapacityLimit, LimitOr, NoLimit};
pub use boundary::{Adiabatic, BoundaryCondition, Ground, OtherSideTemperature, Outdoors, Surface};
pub use catalog::{CatalogError, Library};
pub use constraint::{Any, AsNumber, Check, Each, Length, OneOf, Range};
pub use decode::{Context, Decode, Decoded, Entity, JsonObject, ObjectReader, Rejected};
pub use error::{HbsError, ValidationError, Violation, ViolationKind, Violations};
pub use geometry::{Face3D, Mesh3D, Plane, Point3D};
pub use identity::{EnergyIdentifier, EnergyIdentity, Identifier, RadianceIdentifier, RadianceIdentity};
pub use project::{BuildingTypes, ClimateZones, EfficiencyStandards, Location, ProjectInfo};

//! # hbs-energy — Energy Entities of the Honeybee Schema
//!
//! Materials, constructions, construction sets, schedules, loads, program
//! types, ventilative cooling, HVAC, service hot water and on-site
//! generation, plus the energy properties attached to geometry objects and
//! to the model.
//!
//! ## Abridged and Full Forms
//!
//! Most resources come in two shapes. The abridged form references nested
//! resources by identifier (`OpaqueConstructionAbridged::materials` is a
//! list of material identifiers); the full form embeds them. Both share one
//! field struct so their bounds and defaults cannot drift apart.
//!
//! ## Default Catalog
//!
//! [`catalog`] builds the [`GlobalConstructionSet`] from the bundled energy
//! library once per process. [`ModelEnergyProperties`] receives a clone of
//! it whenever a model omits its own.

pub mod catalog;
pub mod construction;
pub mod constructionset;
pub mod daylight;
pub mod generator;
pub mod global_constructionset;
pub mod hvac;
pub mod internalmass;
pub mod load;
pub mod material;
pub mod programtype;
pub mod properties;
pub mod schedule;
pub mod shw;
pub mod ventcool;

pub use catalog::{global_construction_set, try_global_construction_set, CatalogError};
pub use construction::{
    AirBoundaryConstruction, AirBoundaryConstructionAbridged, Construction, ConstructionAbridged,
    OpaqueConstruction, OpaqueConstructionAbridged, ShadeConstruction, WindowConstruction,
    WindowConstructionAbridged,
};
pub use constructionset::{AnyConstructionSet, ConstructionSet, ConstructionSetAbridged};
pub use global_constructionset::{GlobalConstructionSet, GlobalMaterial};
pub use hvac::{DetailedHVAC, Hvac, IdealAirSystemAbridged};
pub use material::{
    EnergyMaterial, EnergyMaterialNoMass, EnergyMaterialVegetation, EnergyWindowMaterialGas,
    EnergyWindowMaterialGlazing, EnergyWindowMaterialSimpleGlazSys, Material,
};
pub use programtype::{AnyProgramType, ProgramType, ProgramTypeAbridged};
pub use properties::{
    ApertureEnergyPropertiesAbridged, DoorEnergyPropertiesAbridged, FaceEnergyPropertiesAbridged,
    ModelEnergyProperties, RoomEnergyPropertiesAbridged, ShadeEnergyPropertiesAbridged,
    ShadeMeshEnergyPropertiesAbridged,
};
pub use schedule::{
    AnySchedule, Schedule, ScheduleDay, ScheduleFixedInterval, ScheduleFixedIntervalAbridged,
    ScheduleRuleAbridged, ScheduleRuleset, ScheduleRulesetAbridged, ScheduleTypeLimit,
};
pub use shw::SHWSystem;

//! # hbs-are — ARE Extension of the Honeybee Schema
//!
//! Entities for residential building assessment. ARE differs from the
//! energy extension in three ways:
//!
//! - Opaque constructions are layer stacks of library materials referenced
//!   by integer index ([`material::LibraryMaterial`]).
//! - Construction sets are keyed by adjacency (outdoor air, ground,
//!   neighbour, roof space, subfloor, adjacent zone) instead of by boundary
//!   condition.
//! - The model carries project, dwelling and design variation records.
//!
//! The model's `global_construction_set` is the energy
//! [`GlobalConstructionSet`](hbs_energy::GlobalConstructionSet) and is
//! seeded from the same frozen default.

pub mod construction;
pub mod constructionset;
pub mod designvariation;
pub mod dwelling;
pub mod enums;
pub mod material;
pub mod project;
pub mod properties;

pub use construction::{
    AreConstruction, ConstructionLayer, ExternalConstruction, ExternalConstructionAbridged,
    GlazedConstruction, GlazedConstructionAbridged, InternalConstruction,
    InternalConstructionAbridged,
};
pub use constructionset::{AnyConstructionSet, ConstructionSet, ConstructionSetAbridged};
pub use designvariation::{DesignVariation, HeatingCoolingLimit, SiteVentilation};
pub use dwelling::{Address, Dwelling};
pub use enums::{
    BuildingClassType, DeclarationOfInterestType, DwellingExposureType, DwellingType, ElementType,
    GapSizeType, IndoorCoveringType, LayerDirectionType, OutdoorCoveringType, PenetrationType,
    RoofExposureType, ShadeType, WindowType, ZoneType,
};
pub use material::{LibraryMaterial, MaterialLibrary};
pub use project::{Acknowledgement, Assessor, Client, PlanDocument, Project, SimulationConfiguration};
pub use properties::{
    ApertureAREPropertiesAbridged, DoorAREPropertiesAbridged, FaceAREPropertiesAbridged,
    InfiltrationPenetration, ModelAREProperties, RoofWindow, RoofspaceZoneInfiltration,
    RoomAREPropertiesAbridged, SubfloorZoneInfiltration,
};

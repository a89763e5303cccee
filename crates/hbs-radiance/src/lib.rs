//! # hbs-radiance — Radiance Entities of the Honeybee Schema
//!
//! Modifiers, modifier sets, dynamic states, sensor grids and views, plus
//! the radiance properties attached to geometry objects and to the model.
//!
//! Radiance identifiers are stricter than energy identifiers: only ASCII
//! letters, digits, `.`, `_` and `-` are accepted. References to modifiers
//! and modifier sets are plain identifiers and are not resolved here.
//!
//! [`catalog`] builds the [`GlobalModifierSet`] from the bundled radiance
//! library once per process.

pub mod asset;
pub mod catalog;
pub mod global_modifierset;
pub mod modifier;
pub mod modifierset;
pub mod properties;
pub mod state;

pub use asset::{Sensor, SensorGrid, View, ViewType};
pub use catalog::{global_modifier_set, try_global_modifier_set};
pub use global_modifierset::{GlobalModifier, GlobalModifierSet};
pub use modifier::{Glass, Glow, Light, Metal, Mirror, Modifier, Plastic, Trans, Void};
pub use modifierset::{AnyModifierSet, ModifierSet, ModifierSetAbridged};
pub use properties::{
    ApertureRadiancePropertiesAbridged, DoorRadiancePropertiesAbridged,
    FaceRadiancePropertiesAbridged, ModelRadianceProperties, RoomRadiancePropertiesAbridged,
    ShadeMeshRadiancePropertiesAbridged, ShadeRadiancePropertiesAbridged,
};
pub use state::{RadianceShadeStateAbridged, RadianceSubFaceStateAbridged, StateGeometryAbridged};

//! # Entity Registry
//!
//! Maps each entity `type` literal to the decoder of that entity. The
//! default registry covers every entity of the core, energy, radiance and
//! ARE crates.
//!
//! ARE reuses two energy tags (`ConstructionSet`, `ConstructionSetAbridged`).
//! The bare names belong to the energy entities; the ARE ones are registered
//! under an `ARE.` prefix and still require their own bare tag in the
//! document.

use std::collections::BTreeMap;

use hbs_core::{Entity, ValidationError};
use serde_json::Value;

/// Decodes a fragment and discards the result.
pub type DecodeFn = fn(&Value) -> Result<(), ValidationError>;

fn decode_as<T: Entity>(value: &Value) -> Result<(), ValidationError> {
    T::decode(value).map(|_| ())
}

/// Entity names mapped to their decoders, sorted by name.
#[derive(Debug, Clone, Default)]
pub struct EntityRegistry {
    entries: BTreeMap<&'static str, DecodeFn>,
}

macro_rules! register_all {
    ($registry:ident; $($ty:ty),+ $(,)?) => {
        $( $registry.register::<$ty>(); )+
    };
}

impl EntityRegistry {
    /// A registry with nothing registered.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A registry of every entity in the schema.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        {
            use hbs_core::*;
            register_all!(registry;
                Autocalculate, Autosize, NoLimit,
                Outdoors, Surface, Ground, Adiabatic, OtherSideTemperature,
                Plane, Face3D, Mesh3D, Location, ProjectInfo,
            );
        }
        {
            use hbs_energy::constructionset::*;
            use hbs_energy::daylight::DaylightingControl;
            use hbs_energy::generator::{ElectricLoadCenter, PVProperties};
            use hbs_energy::internalmass::InternalMassAbridged;
            use hbs_energy::load::*;
            use hbs_energy::ventcool::*;
            use hbs_energy::*;
            register_all!(registry;
                EnergyMaterial, EnergyMaterialNoMass, EnergyMaterialVegetation,
                EnergyWindowMaterialGlazing, EnergyWindowMaterialSimpleGlazSys, EnergyWindowMaterialGas,
                OpaqueConstructionAbridged, OpaqueConstruction, WindowConstructionAbridged, WindowConstruction,
                ShadeConstruction, AirBoundaryConstructionAbridged, AirBoundaryConstruction,
                WallConstructionSetAbridged, WallConstructionSet,
                FloorConstructionSetAbridged, FloorConstructionSet,
                RoofCeilingConstructionSetAbridged, RoofCeilingConstructionSet,
                ApertureConstructionSetAbridged, ApertureConstructionSet,
                DoorConstructionSetAbridged, DoorConstructionSet,
                ConstructionSetAbridged, ConstructionSet, GlobalConstructionSet,
                ScheduleTypeLimit, ScheduleDay, ScheduleRuleAbridged,
                ScheduleRulesetAbridged, ScheduleRuleset,
                ScheduleFixedIntervalAbridged, ScheduleFixedInterval,
                PeopleAbridged, People, LightingAbridged, Lighting,
                ElectricEquipmentAbridged, ElectricEquipment, GasEquipmentAbridged, GasEquipment,
                ServiceHotWaterAbridged, ServiceHotWater, InfiltrationAbridged, Infiltration,
                VentilationAbridged, Ventilation, SetpointAbridged, Setpoint, ProcessAbridged,
                ProgramTypeAbridged, ProgramType,
                VentilationControlAbridged, VentilationFan, VentilationOpening, AFNCrack,
                VentilationSimulationControl, DaylightingControl, InternalMassAbridged,
                IdealAirSystemAbridged, DetailedHVAC, SHWSystem, PVProperties, ElectricLoadCenter,
                ShadeMeshEnergyPropertiesAbridged, ShadeEnergyPropertiesAbridged,
                DoorEnergyPropertiesAbridged, ApertureEnergyPropertiesAbridged,
                FaceEnergyPropertiesAbridged, RoomEnergyPropertiesAbridged, ModelEnergyProperties,
            );
        }
        {
            use hbs_radiance::modifierset::*;
            use hbs_radiance::*;
            register_all!(registry;
                Plastic, Glass, Trans, Metal, Mirror, Glow, Light, Void,
                WallModifierSetAbridged, WallModifierSet, FloorModifierSetAbridged, FloorModifierSet,
                RoofCeilingModifierSetAbridged, RoofCeilingModifierSet,
                ShadeModifierSetAbridged, ShadeModifierSet,
                ApertureModifierSetAbridged, ApertureModifierSet,
                DoorModifierSetAbridged, DoorModifierSet,
                ModifierSetAbridged, ModifierSet, GlobalModifierSet,
                StateGeometryAbridged, RadianceShadeStateAbridged, RadianceSubFaceStateAbridged,
                Sensor, SensorGrid, View,
                ShadeMeshRadiancePropertiesAbridged, ShadeRadiancePropertiesAbridged,
                ApertureRadiancePropertiesAbridged, DoorRadiancePropertiesAbridged,
                FaceRadiancePropertiesAbridged, RoomRadiancePropertiesAbridged, ModelRadianceProperties,
            );
        }
        {
            use hbs_are::*;
            register_all!(registry;
                ExternalConstruction, InternalConstruction, GlazedConstruction,
                ExternalConstructionAbridged, InternalConstructionAbridged, GlazedConstructionAbridged,
                RoomAREPropertiesAbridged, FaceAREPropertiesAbridged,
                ApertureAREPropertiesAbridged, DoorAREPropertiesAbridged, ModelAREProperties,
            );
            registry.register_as::<hbs_are::ConstructionSetAbridged>("ARE.ConstructionSetAbridged");
            registry.register_as::<hbs_are::ConstructionSet>("ARE.ConstructionSet");
        }
        registry
    }

    /// Register `T` under its own tag. Returns `false` and keeps the
    /// existing entry if the tag is already taken.
    pub fn register<T: Entity>(&mut self) -> bool {
        self.register_as::<T>(T::TYPE)
    }

    /// Register `T` under `name`. Returns `false` and keeps the existing
    /// entry if `name` is already taken.
    pub fn register_as<T: Entity>(&mut self, name: &'static str) -> bool {
        if self.entries.contains_key(name) {
            tracing::warn!(name, "entity name already registered");
            return false;
        }
        self.entries.insert(name, decode_as::<T>);
        true
    }

    /// The decoder registered under `name`.
    pub fn get(&self, name: &str) -> Option<DecodeFn> {
        self.entries.get(name).copied()
    }

    /// Whether a decoder is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of registered names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered names, sorted.
    pub fn type_names(&self) -> Vec<&'static str> {
        self.entries.keys().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_default_registry_covers_every_crate() {
        let registry = EntityRegistry::new();
        for name in [
            "Ground",
            "Mesh3D",
            "EnergyMaterial",
            "People",
            "ModelEnergyProperties",
            "Plastic",
            "SensorGrid",
            "ModelRadianceProperties",
            "ModelAREProperties",
            "ARE.ConstructionSet",
        ] {
            assert!(registry.contains(name), "{name} missing");
        }
    }

    #[test]
    fn test_type_names_sorted_and_unique() {
        let names = EntityRegistry::new().type_names();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(names, sorted);
    }

    #[test]
    fn test_duplicate_registration_keeps_first() {
        let mut registry = EntityRegistry::empty();
        assert!(registry.register::<hbs_energy::ConstructionSet>());
        assert!(!registry.register::<hbs_are::ConstructionSet>());
        let decode = registry.get("ConstructionSet").unwrap();
        assert!(decode(&json!({"type": "ConstructionSet", "identifier": "Energy Set"})).is_ok());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_prefixed_are_entry_decodes_are_shape() {
        let registry = EntityRegistry::new();
        let decode = registry.get("ARE.ConstructionSetAbridged").unwrap();
        assert!(decode(&json!({
            "type": "ConstructionSetAbridged",
            "identifier": "House",
            "wall_set": {"wall_to_air_construction": "Brick Veneer"}
        }))
        .is_ok());
        let energy = registry.get("ConstructionSetAbridged").unwrap();
        assert!(energy(&json!({
            "type": "ConstructionSetAbridged",
            "identifier": "House",
            "wall_set": {"wall_to_air_construction": "Brick Veneer"}
        }))
        .is_err());
    }
}

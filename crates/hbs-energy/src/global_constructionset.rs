//! # Global Construction Set
//!
//! The model-wide fallback constructions. Every field defaults to the
//! corresponding value of the bundled default library (see
//! [`crate::catalog`]), so a model that omits the set, or any of its
//! fields, still resolves every face to a construction.

use hbs_core::{Any, Context, Decode, Decoded, Entity, Identifier, ObjectReader};
use serde::Serialize;
use serde_json::Value;

use crate::catalog::global_construction_set;
use crate::construction::ConstructionAbridged;
use crate::constructionset::{
    ApertureConstructionSetAbridged, DoorConstructionSetAbridged, FloorConstructionSetAbridged,
    RoofCeilingConstructionSetAbridged, WallConstructionSetAbridged,
};
use crate::material::{
    EnergyMaterial, EnergyMaterialNoMass, EnergyWindowMaterialGas, EnergyWindowMaterialGlazing,
};

hbs_core::one_of! {
    /// Material kinds carried by the global construction set.
    pub enum GlobalMaterial {
        EnergyMaterial(EnergyMaterial),
        EnergyMaterialNoMass(EnergyMaterialNoMass),
        EnergyWindowMaterialGlazing(EnergyWindowMaterialGlazing),
        EnergyWindowMaterialGas(EnergyWindowMaterialGas),
    }
}

impl GlobalMaterial {
    /// Identifier of the contained material.
    pub fn identifier(&self) -> &str {
        match self {
            Self::EnergyMaterial(m) => m.identity.identifier.as_str(),
            Self::EnergyMaterialNoMass(m) => m.identity.identifier.as_str(),
            Self::EnergyWindowMaterialGlazing(m) => m.identity.identifier.as_str(),
            Self::EnergyWindowMaterialGas(m) => m.identity.identifier.as_str(),
        }
    }
}

/// Model-wide default materials, constructions and sub-sets.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct GlobalConstructionSet {
    pub materials: Vec<GlobalMaterial>,
    pub constructions: Vec<ConstructionAbridged>,
    pub wall_set: WallConstructionSetAbridged,
    pub floor_set: FloorConstructionSetAbridged,
    pub roof_ceiling_set: RoofCeilingConstructionSetAbridged,
    pub aperture_set: ApertureConstructionSetAbridged,
    pub door_set: DoorConstructionSetAbridged,
    /// Construction of building-attached shades.
    pub shade_construction: Identifier,
    /// Construction of context shades.
    pub context_construction: Identifier,
    /// Construction of faces with an air boundary type.
    pub air_boundary_construction: Identifier,
}

impl GlobalConstructionSet {
    /// The process-wide default, cloned.
    ///
    /// # Panics
    ///
    /// Panics if the bundled energy library is unusable; see
    /// [`global_construction_set`].
    pub fn from_defaults() -> Self {
        global_construction_set().clone()
    }

    /// The material named `identifier`, if the set carries it.
    pub fn material(&self, identifier: &str) -> Option<&GlobalMaterial> {
        self.materials.iter().find(|m| m.identifier() == identifier)
    }

    /// The construction named `identifier`, if the set carries it.
    pub fn construction(&self, identifier: &str) -> Option<&ConstructionAbridged> {
        self.constructions.iter().find(|c| c.identifier().as_str() == identifier)
    }
}

hbs_core::entity!(GlobalConstructionSet);

impl Decode for GlobalConstructionSet {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let defaults = global_construction_set();
        let mut obj = ObjectReader::open(value, Self::TYPE, cx)?;
        let materials = obj.or_else("materials", || defaults.materials.clone(), Any);
        let constructions = obj.or_else("constructions", || defaults.constructions.clone(), Any);
        let wall_set = obj.or_else("wall_set", || defaults.wall_set.clone(), Any);
        let floor_set = obj.or_else("floor_set", || defaults.floor_set.clone(), Any);
        let roof_ceiling_set = obj.or_else("roof_ceiling_set", || defaults.roof_ceiling_set.clone(), Any);
        let aperture_set = obj.or_else("aperture_set", || defaults.aperture_set.clone(), Any);
        let door_set = obj.or_else("door_set", || defaults.door_set.clone(), Any);
        let shade_construction = obj.or_else("shade_construction", || defaults.shade_construction.clone(), Any);
        let context_construction =
            obj.or_else("context_construction", || defaults.context_construction.clone(), Any);
        let air_boundary_construction =
            obj.or_else("air_boundary_construction", || defaults.air_boundary_construction.clone(), Any);
        obj.finish()?;
        Ok(Self {
            materials: materials?,
            constructions: constructions?,
            wall_set: wall_set?,
            floor_set: floor_set?,
            roof_ceiling_set: roof_ceiling_set?,
            aperture_set: aperture_set?,
            door_set: door_set?,
            shade_construction: shade_construction?,
            context_construction: context_construction?,
            air_boundary_construction: air_boundary_construction?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hbs_core::ViolationKind;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_empty_object_is_the_default() {
        let set = GlobalConstructionSet::decode(&json!({})).unwrap();
        assert_eq!(&set, global_construction_set());
    }

    #[test]
    fn test_partial_override_keeps_other_defaults() {
        let set = GlobalConstructionSet::decode(&json!({
            "type": "GlobalConstructionSet",
            "context_construction": "My Context"
        }))
        .unwrap();
        assert_eq!(set.context_construction.as_str(), "My Context");
        assert_eq!(set.wall_set, global_construction_set().wall_set);
        assert_eq!(set.shade_construction.as_str(), "Generic Shade");
    }

    #[test]
    fn test_null_field_is_rejected() {
        let err = GlobalConstructionSet::decode(&json!({"wall_set": null})).unwrap_err();
        assert!(matches!(
            err.violations.at("/wall_set").unwrap().kind,
            ViolationKind::TypeMismatch { expected: "object" }
        ));
    }

    #[test]
    fn test_global_material_rejects_vegetation() {
        let err = GlobalMaterial::decode_from(&json!({
            "type": "EnergyMaterialVegetation", "identifier": "green"
        }))
        .unwrap_err();
        assert!(err.violations.at("/type").is_some());
    }

    #[test]
    fn test_lookup_helpers() {
        let set = GlobalConstructionSet::from_defaults();
        assert_eq!(set.material("Generic Brick").unwrap().type_name(), "EnergyMaterial");
        assert_eq!(set.construction("Generic Context").unwrap().type_name(), "ShadeConstruction");
        assert!(set.construction("Generic Triple Pane").is_none());
    }
}

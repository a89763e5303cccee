//! # Construction Sets
//!
//! Default constructions per face type and boundary condition. The abridged
//! sets name constructions by identifier; the full sets carry them inline.

use hbs_core::{Any, Context, Decode, Decoded, EnergyIdentity, Entity, Identifier, ObjectReader};
use serde::Serialize;
use serde_json::Value;

use crate::construction::{
    AirBoundarySlotConstruction, OpaqueConstruction, ShadeConstruction, WindowConstruction,
};

/// Opaque constructions by boundary condition for walls, floors, or roofs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FaceSubSet<C> {
    /// Faces with a `Surface` or `Adiabatic` boundary condition.
    pub interior_construction: Option<C>,
    /// Faces with an `Outdoors` boundary condition.
    pub exterior_construction: Option<C>,
    /// Faces with a `Ground` boundary condition.
    pub ground_construction: Option<C>,
}

impl<C> Default for FaceSubSet<C> {
    fn default() -> Self {
        Self {
            interior_construction: None,
            exterior_construction: None,
            ground_construction: None,
        }
    }
}

impl<C: Decode> FaceSubSet<C> {
    fn read(obj: &mut ObjectReader<'_, '_>) -> Decoded<Self> {
        let interior_construction = obj.optional("interior_construction", Any);
        let exterior_construction = obj.optional("exterior_construction", Any);
        let ground_construction = obj.optional("ground_construction", Any);
        Ok(Self {
            interior_construction: interior_construction?,
            exterior_construction: exterior_construction?,
            ground_construction: ground_construction?,
        })
    }
}

macro_rules! face_sub_set {
    ($(#[$meta:meta])* $name:ident, $construction:ty) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Serialize)]
        #[serde(tag = "type")]
        pub struct $name {
            #[serde(flatten)]
            pub constructions: FaceSubSet<$construction>,
        }

        hbs_core::entity!($name);

        impl Decode for $name {
            fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
                let mut obj = ObjectReader::open(value, Self::TYPE, cx)?;
                let constructions = FaceSubSet::read(&mut obj);
                obj.finish()?;
                Ok(Self {
                    constructions: constructions?,
                })
            }
        }
    };
}

face_sub_set!(
    /// Wall constructions referenced by identifier.
    WallConstructionSetAbridged,
    Identifier
);
face_sub_set!(
    /// Floor constructions referenced by identifier.
    FloorConstructionSetAbridged,
    Identifier
);
face_sub_set!(
    /// Roof and ceiling constructions referenced by identifier.
    RoofCeilingConstructionSetAbridged,
    Identifier
);
face_sub_set!(
    /// Wall constructions inline.
    WallConstructionSet,
    OpaqueConstruction
);
face_sub_set!(
    /// Floor constructions inline.
    FloorConstructionSet,
    OpaqueConstruction
);
face_sub_set!(
    /// Roof and ceiling constructions inline.
    RoofCeilingConstructionSet,
    OpaqueConstruction
);

/// Window constructions by aperture role.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApertureSubSet<C> {
    pub interior_construction: Option<C>,
    pub window_construction: Option<C>,
    pub skylight_construction: Option<C>,
    pub operable_construction: Option<C>,
}

impl<C> Default for ApertureSubSet<C> {
    fn default() -> Self {
        Self {
            interior_construction: None,
            window_construction: None,
            skylight_construction: None,
            operable_construction: None,
        }
    }
}

impl<C: Decode> ApertureSubSet<C> {
    fn read(obj: &mut ObjectReader<'_, '_>) -> Decoded<Self> {
        let interior_construction = obj.optional("interior_construction", Any);
        let window_construction = obj.optional("window_construction", Any);
        let skylight_construction = obj.optional("skylight_construction", Any);
        let operable_construction = obj.optional("operable_construction", Any);
        Ok(Self {
            interior_construction: interior_construction?,
            window_construction: window_construction?,
            skylight_construction: skylight_construction?,
            operable_construction: operable_construction?,
        })
    }
}

/// Aperture constructions referenced by identifier.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct ApertureConstructionSetAbridged {
    #[serde(flatten)]
    pub constructions: ApertureSubSet<Identifier>,
}

hbs_core::entity!(ApertureConstructionSetAbridged);

impl Decode for ApertureConstructionSetAbridged {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::open(value, Self::TYPE, cx)?;
        let constructions = ApertureSubSet::read(&mut obj);
        obj.finish()?;
        Ok(Self {
            constructions: constructions?,
        })
    }
}

/// Aperture constructions inline.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct ApertureConstructionSet {
    #[serde(flatten)]
    pub constructions: ApertureSubSet<WindowConstruction>,
}

hbs_core::entity!(ApertureConstructionSet);

impl Decode for ApertureConstructionSet {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::open(value, Self::TYPE, cx)?;
        let constructions = ApertureSubSet::read(&mut obj);
        obj.finish()?;
        Ok(Self {
            constructions: constructions?,
        })
    }
}

/// Door constructions: opaque doors use `O`, glass doors use `W`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DoorSubSet<O, W> {
    pub interior_construction: Option<O>,
    pub exterior_construction: Option<O>,
    pub overhead_construction: Option<O>,
    pub exterior_glass_construction: Option<W>,
    pub interior_glass_construction: Option<W>,
}

impl<O, W> Default for DoorSubSet<O, W> {
    fn default() -> Self {
        Self {
            interior_construction: None,
            exterior_construction: None,
            overhead_construction: None,
            exterior_glass_construction: None,
            interior_glass_construction: None,
        }
    }
}

impl<O: Decode, W: Decode> DoorSubSet<O, W> {
    fn read(obj: &mut ObjectReader<'_, '_>) -> Decoded<Self> {
        let interior_construction = obj.optional("interior_construction", Any);
        let exterior_construction = obj.optional("exterior_construction", Any);
        let overhead_construction = obj.optional("overhead_construction", Any);
        let exterior_glass_construction = obj.optional("exterior_glass_construction", Any);
        let interior_glass_construction = obj.optional("interior_glass_construction", Any);
        Ok(Self {
            interior_construction: interior_construction?,
            exterior_construction: exterior_construction?,
            overhead_construction: overhead_construction?,
            exterior_glass_construction: exterior_glass_construction?,
            interior_glass_construction: interior_glass_construction?,
        })
    }
}

/// Door constructions referenced by identifier.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct DoorConstructionSetAbridged {
    #[serde(flatten)]
    pub constructions: DoorSubSet<Identifier, Identifier>,
}

hbs_core::entity!(DoorConstructionSetAbridged);

impl Decode for DoorConstructionSetAbridged {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::open(value, Self::TYPE, cx)?;
        let constructions = DoorSubSet::read(&mut obj);
        obj.finish()?;
        Ok(Self {
            constructions: constructions?,
        })
    }
}

/// Door constructions inline.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct DoorConstructionSet {
    #[serde(flatten)]
    pub constructions: DoorSubSet<OpaqueConstruction, WindowConstruction>,
}

hbs_core::entity!(DoorConstructionSet);

impl Decode for DoorConstructionSet {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::open(value, Self::TYPE, cx)?;
        let constructions = DoorSubSet::read(&mut obj);
        obj.finish()?;
        Ok(Self {
            constructions: constructions?,
        })
    }
}

/// Constructions for every face type, referenced by identifier.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct ConstructionSetAbridged {
    #[serde(flatten)]
    pub identity: EnergyIdentity,
    pub wall_set: Option<WallConstructionSetAbridged>,
    pub floor_set: Option<FloorConstructionSetAbridged>,
    pub roof_ceiling_set: Option<RoofCeilingConstructionSetAbridged>,
    pub aperture_set: Option<ApertureConstructionSetAbridged>,
    pub door_set: Option<DoorConstructionSetAbridged>,
    pub shade_construction: Option<Identifier>,
    pub air_boundary_construction: Option<Identifier>,
}

hbs_core::entity!(ConstructionSetAbridged);

impl Decode for ConstructionSetAbridged {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::open(value, Self::TYPE, cx)?;
        let identity = EnergyIdentity::read(&mut obj);
        let wall_set = obj.optional("wall_set", Any);
        let floor_set = obj.optional("floor_set", Any);
        let roof_ceiling_set = obj.optional("roof_ceiling_set", Any);
        let aperture_set = obj.optional("aperture_set", Any);
        let door_set = obj.optional("door_set", Any);
        let shade_construction = obj.optional("shade_construction", Any);
        let air_boundary_construction = obj.optional("air_boundary_construction", Any);
        obj.finish()?;
        Ok(Self {
            identity: identity?,
            wall_set: wall_set?,
            floor_set: floor_set?,
            roof_ceiling_set: roof_ceiling_set?,
            aperture_set: aperture_set?,
            door_set: door_set?,
            shade_construction: shade_construction?,
            air_boundary_construction: air_boundary_construction?,
        })
    }
}

/// Constructions for every face type, inline.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct ConstructionSet {
    #[serde(flatten)]
    pub identity: EnergyIdentity,
    pub wall_set: Option<WallConstructionSet>,
    pub floor_set: Option<FloorConstructionSet>,
    pub roof_ceiling_set: Option<RoofCeilingConstructionSet>,
    pub aperture_set: Option<ApertureConstructionSet>,
    pub door_set: Option<DoorConstructionSet>,
    pub shade_construction: Option<ShadeConstruction>,
    pub air_boundary_construction: Option<AirBoundarySlotConstruction>,
}

hbs_core::entity!(ConstructionSet);

impl Decode for ConstructionSet {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::open(value, Self::TYPE, cx)?;
        let identity = EnergyIdentity::read(&mut obj);
        let wall_set = obj.optional("wall_set", Any);
        let floor_set = obj.optional("floor_set", Any);
        let roof_ceiling_set = obj.optional("roof_ceiling_set", Any);
        let aperture_set = obj.optional("aperture_set", Any);
        let door_set = obj.optional("door_set", Any);
        let shade_construction = obj.optional("shade_construction", Any);
        let air_boundary_construction = obj.optional("air_boundary_construction", Any);
        obj.finish()?;
        Ok(Self {
            identity: identity?,
            wall_set: wall_set?,
            floor_set: floor_set?,
            roof_ceiling_set: roof_ceiling_set?,
            aperture_set: aperture_set?,
            door_set: door_set?,
            shade_construction: shade_construction?,
            air_boundary_construction: air_boundary_construction?,
        })
    }
}

hbs_core::one_of! {
    /// A construction set in either form, as listed on a model.
    pub enum AnyConstructionSet {
        ConstructionSetAbridged(ConstructionSetAbridged),
        ConstructionSet(ConstructionSet),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hbs_core::ViolationKind;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_sub_set_defaults_to_none() {
        let wall = WallConstructionSetAbridged::decode(&json!({"type": "WallConstructionSetAbridged"})).unwrap();
        assert_eq!(wall, WallConstructionSetAbridged::default());
        assert_eq!(
            wall.encode().unwrap(),
            json!({
                "type": "WallConstructionSetAbridged",
                "interior_construction": null,
                "exterior_construction": null,
                "ground_construction": null
            })
        );
    }

    #[test]
    fn test_sub_set_tag_must_match() {
        let err = FloorConstructionSetAbridged::decode(&json!({"type": "WallConstructionSetAbridged"})).unwrap_err();
        assert!(matches!(
            err.violations.at("/type").unwrap().kind,
            ViolationKind::ConstraintViolation { .. }
        ));
    }

    #[test]
    fn test_nested_violation_paths() {
        let err = ConstructionSetAbridged::decode(&json!({
            "identifier": "set",
            "wall_set": {"interior_construction": ""},
            "door_set": {"exterior_glass_construction": 4},
            "shade_construction": "x".repeat(101)
        }))
        .unwrap_err();
        assert_eq!(err.violations.len(), 3);
        assert!(err.violations.at("/wall_set/interior_construction").is_some());
        assert!(matches!(
            err.violations.at("/door_set/exterior_glass_construction").unwrap().kind,
            ViolationKind::TypeMismatch { expected: "string" }
        ));
        assert!(err.violations.at("/shade_construction").is_some());
    }

    #[test]
    fn test_full_set_air_boundary_union() {
        let set = ConstructionSet::decode(&json!({
            "identifier": "set",
            "air_boundary_construction": {
                "type": "OpaqueConstruction",
                "identifier": "Thin Wall",
                "materials": [{"type": "EnergyMaterialNoMass", "identifier": "R1", "r_value": 0.1}]
            }
        }))
        .unwrap();
        assert_eq!(set.air_boundary_construction.unwrap().type_name(), "OpaqueConstruction");

        let err = ConstructionSet::decode(&json!({
            "identifier": "set",
            "air_boundary_construction": {"type": "ShadeConstruction", "identifier": "s"}
        }))
        .unwrap_err();
        assert!(err.violations.at("/air_boundary_construction/type").is_some());
    }

    #[test]
    fn test_full_set_rejects_reference() {
        let err = ConstructionSet::decode(&json!({
            "identifier": "set",
            "aperture_set": {"window_construction": "Generic Double Pane"}
        }))
        .unwrap_err();
        assert!(err.violations.at("/aperture_set/window_construction").is_some());
    }
}

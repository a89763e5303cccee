//! # ARE Construction Sets
//!
//! ARE assigns constructions by what a face is adjacent to rather than by
//! boundary condition: outdoor air, ground, a neighbouring dwelling, the
//! roof space, the subfloor, or another zone. Sub-sets are plain records
//! without a `type` tag. Each is generic over the slot types so the abridged
//! (identifier) and full (inline) sets share one definition.

use hbs_core::{Any, Context, Decode, Decoded, Entity, Identifier, ObjectReader};
use serde::Serialize;
use serde_json::Value;

use crate::construction::{ExternalConstruction, GlazedConstruction, InternalConstruction};

/// Wall constructions by adjacency.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WallSet<E, I> {
    /// Walls to outdoor air.
    pub wall_to_air_construction: Option<E>,
    pub wall_to_ground_construction: Option<I>,
    /// Walls to another zone of the dwelling.
    pub wall_to_adj_construction: Option<I>,
    pub wall_to_neighbour_construction: Option<I>,
    pub wall_to_roofspace_construction: Option<I>,
    pub wall_to_subfloor_construction: Option<I>,
}

impl<E, I> Default for WallSet<E, I> {
    fn default() -> Self {
        Self {
            wall_to_air_construction: None,
            wall_to_ground_construction: None,
            wall_to_adj_construction: None,
            wall_to_neighbour_construction: None,
            wall_to_roofspace_construction: None,
            wall_to_subfloor_construction: None,
        }
    }
}

impl<E: Decode, I: Decode> Decode for WallSet<E, I> {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::record(value, cx)?;
        let wall_to_air_construction = obj.optional("wall_to_air_construction", Any);
        let wall_to_ground_construction = obj.optional("wall_to_ground_construction", Any);
        let wall_to_adj_construction = obj.optional("wall_to_adj_construction", Any);
        let wall_to_neighbour_construction = obj.optional("wall_to_neighbour_construction", Any);
        let wall_to_roofspace_construction = obj.optional("wall_to_roofspace_construction", Any);
        let wall_to_subfloor_construction = obj.optional("wall_to_subfloor_construction", Any);
        obj.finish()?;
        Ok(Self {
            wall_to_air_construction: wall_to_air_construction?,
            wall_to_ground_construction: wall_to_ground_construction?,
            wall_to_adj_construction: wall_to_adj_construction?,
            wall_to_neighbour_construction: wall_to_neighbour_construction?,
            wall_to_roofspace_construction: wall_to_roofspace_construction?,
            wall_to_subfloor_construction: wall_to_subfloor_construction?,
        })
    }
}

/// Floor constructions by adjacency.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FloorSet<E, I> {
    pub floor_to_ground_construction: Option<I>,
    pub floor_to_subfloor_construction: Option<I>,
    /// Mid-floors between two zones.
    pub floorceiling_to_adj_construction: Option<I>,
    pub floorceiling_to_neighbour_construction: Option<I>,
    /// Suspended floors over outdoor air.
    pub floor_to_air_construction: Option<E>,
}

impl<E, I> Default for FloorSet<E, I> {
    fn default() -> Self {
        Self {
            floor_to_ground_construction: None,
            floor_to_subfloor_construction: None,
            floorceiling_to_adj_construction: None,
            floorceiling_to_neighbour_construction: None,
            floor_to_air_construction: None,
        }
    }
}

impl<E: Decode, I: Decode> Decode for FloorSet<E, I> {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::record(value, cx)?;
        let floor_to_ground_construction = obj.optional("floor_to_ground_construction", Any);
        let floor_to_subfloor_construction = obj.optional("floor_to_subfloor_construction", Any);
        let floorceiling_to_adj_construction = obj.optional("floorceiling_to_adj_construction", Any);
        let floorceiling_to_neighbour_construction =
            obj.optional("floorceiling_to_neighbour_construction", Any);
        let floor_to_air_construction = obj.optional("floor_to_air_construction", Any);
        obj.finish()?;
        Ok(Self {
            floor_to_ground_construction: floor_to_ground_construction?,
            floor_to_subfloor_construction: floor_to_subfloor_construction?,
            floorceiling_to_adj_construction: floorceiling_to_adj_construction?,
            floorceiling_to_neighbour_construction: floorceiling_to_neighbour_construction?,
            floor_to_air_construction: floor_to_air_construction?,
        })
    }
}

/// Roof and raked-ceiling constructions by adjacency.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoofCeilingSet<I> {
    /// Pitched roof over a roof space.
    pub roof_to_roofspace_construction: Option<I>,
    /// Combined roof and ceiling over a zone.
    pub roofceiling_to_zone_construction: Option<I>,
    pub roofceiling_to_garage_construction: Option<I>,
    /// Lower levels cut into a slope.
    pub roofceiling_to_ground_construction: Option<I>,
}

impl<I> Default for RoofCeilingSet<I> {
    fn default() -> Self {
        Self {
            roof_to_roofspace_construction: None,
            roofceiling_to_zone_construction: None,
            roofceiling_to_garage_construction: None,
            roofceiling_to_ground_construction: None,
        }
    }
}

impl<I: Decode> Decode for RoofCeilingSet<I> {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::record(value, cx)?;
        let roof_to_roofspace_construction = obj.optional("roof_to_roofspace_construction", Any);
        let roofceiling_to_zone_construction = obj.optional("roofceiling_to_zone_construction", Any);
        let roofceiling_to_garage_construction = obj.optional("roofceiling_to_garage_construction", Any);
        let roofceiling_to_ground_construction = obj.optional("roofceiling_to_ground_construction", Any);
        obj.finish()?;
        Ok(Self {
            roof_to_roofspace_construction: roof_to_roofspace_construction?,
            roofceiling_to_zone_construction: roofceiling_to_zone_construction?,
            roofceiling_to_garage_construction: roofceiling_to_garage_construction?,
            roofceiling_to_ground_construction: roofceiling_to_ground_construction?,
        })
    }
}

/// External door constructions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DoorSet<E, G> {
    pub external_solid_door_construction: Option<E>,
    pub external_glazed_door_construction: Option<G>,
}

impl<E, G> Default for DoorSet<E, G> {
    fn default() -> Self {
        Self {
            external_solid_door_construction: None,
            external_glazed_door_construction: None,
        }
    }
}

impl<E: Decode, G: Decode> Decode for DoorSet<E, G> {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::record(value, cx)?;
        let solid = obj.optional("external_solid_door_construction", Any);
        let glazed = obj.optional("external_glazed_door_construction", Any);
        obj.finish()?;
        Ok(Self {
            external_solid_door_construction: solid?,
            external_glazed_door_construction: glazed?,
        })
    }
}

/// Window and sliding door constructions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApertureSet<G> {
    pub window_construction: Option<G>,
    pub sliding_door_construction: Option<G>,
}

impl<G> Default for ApertureSet<G> {
    fn default() -> Self {
        Self {
            window_construction: None,
            sliding_door_construction: None,
        }
    }
}

impl<G: Decode> Decode for ApertureSet<G> {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::record(value, cx)?;
        let window_construction = obj.optional("window_construction", Any);
        let sliding_door_construction = obj.optional("sliding_door_construction", Any);
        obj.finish()?;
        Ok(Self {
            window_construction: window_construction?,
            sliding_door_construction: sliding_door_construction?,
        })
    }
}

pub type WallConstructionSetAbridged = WallSet<Identifier, Identifier>;
pub type FloorConstructionSetAbridged = FloorSet<Identifier, Identifier>;
pub type RoofCeilingConstructionSetAbridged = RoofCeilingSet<Identifier>;
pub type DoorConstructionSetAbridged = DoorSet<Identifier, Identifier>;
pub type ApertureConstructionSetAbridged = ApertureSet<Identifier>;

pub type WallConstructionSet = WallSet<ExternalConstruction, InternalConstruction>;
pub type FloorConstructionSet = FloorSet<ExternalConstruction, InternalConstruction>;
pub type RoofCeilingConstructionSet = RoofCeilingSet<InternalConstruction>;
pub type DoorConstructionSet = DoorSet<ExternalConstruction, GlazedConstruction>;
pub type ApertureConstructionSet = ApertureSet<GlazedConstruction>;

/// The five sub-sets of a construction set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubSets<W, F, R, A, D> {
    pub wall_set: Option<W>,
    pub floor_set: Option<F>,
    pub roof_ceiling_set: Option<R>,
    pub aperture_set: Option<A>,
    pub door_set: Option<D>,
}

impl<W: Decode, F: Decode, R: Decode, A: Decode, D: Decode> SubSets<W, F, R, A, D> {
    fn read(obj: &mut ObjectReader<'_, '_>) -> Decoded<Self> {
        let wall_set = obj.optional("wall_set", Any);
        let floor_set = obj.optional("floor_set", Any);
        let roof_ceiling_set = obj.optional("roof_ceiling_set", Any);
        let aperture_set = obj.optional("aperture_set", Any);
        let door_set = obj.optional("door_set", Any);
        Ok(Self {
            wall_set: wall_set?,
            floor_set: floor_set?,
            roof_ceiling_set: roof_ceiling_set?,
            aperture_set: aperture_set?,
            door_set: door_set?,
        })
    }
}

/// ARE construction set with constructions referenced by identifier.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct ConstructionSetAbridged {
    pub identifier: Identifier,
    #[serde(flatten)]
    pub sets: SubSets<
        WallConstructionSetAbridged,
        FloorConstructionSetAbridged,
        RoofCeilingConstructionSetAbridged,
        ApertureConstructionSetAbridged,
        DoorConstructionSetAbridged,
    >,
}

hbs_core::entity!(ConstructionSetAbridged);

impl Decode for ConstructionSetAbridged {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::open(value, Self::TYPE, cx)?;
        let identifier = obj.required("identifier", Any);
        let sets = SubSets::read(&mut obj);
        obj.finish()?;
        Ok(Self {
            identifier: identifier?,
            sets: sets?,
        })
    }
}

/// ARE construction set with constructions inline.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct ConstructionSet {
    pub identifier: Identifier,
    #[serde(flatten)]
    pub sets: SubSets<
        WallConstructionSet,
        FloorConstructionSet,
        RoofCeilingConstructionSet,
        ApertureConstructionSet,
        DoorConstructionSet,
    >,
}

hbs_core::entity!(ConstructionSet);

impl Decode for ConstructionSet {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::open(value, Self::TYPE, cx)?;
        let identifier = obj.required("identifier", Any);
        let sets = SubSets::read(&mut obj);
        obj.finish()?;
        Ok(Self {
            identifier: identifier?,
            sets: sets?,
        })
    }
}

hbs_core::one_of! {
    pub enum AnyConstructionSet {
        Abridged(ConstructionSetAbridged),
        Full(ConstructionSet),
    }
}

impl AnyConstructionSet {
    pub fn identifier(&self) -> &Identifier {
        match self {
            Self::Abridged(set) => &set.identifier,
            Self::Full(set) => &set.identifier,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hbs_core::ViolationKind;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_abridged_set_by_adjacency() {
        let set = ConstructionSetAbridged::decode(&json!({
            "type": "ConstructionSetAbridged",
            "identifier": "Brick Veneer House",
            "wall_set": {
                "wall_to_air_construction": "Brick Veneer R2.0",
                "wall_to_adj_construction": "Plasterboard Stud"
            },
            "aperture_set": {"window_construction": "Single Clear"}
        }))
        .unwrap();
        let walls = set.sets.wall_set.unwrap();
        assert_eq!(walls.wall_to_air_construction.unwrap().as_str(), "Brick Veneer R2.0");
        assert!(walls.wall_to_ground_construction.is_none());
        assert!(set.sets.floor_set.is_none());
    }

    #[test]
    fn test_full_set_slot_kinds() {
        let err = ConstructionSet::decode(&json!({
            "identifier": "Inline",
            "wall_set": {
                "wall_to_air_construction": {
                    "type": "InternalConstruction",
                    "identifier": "Plasterboard",
                    "element_type": "Internal Wall",
                    "layers": [{"material": 1}]
                }
            }
        }))
        .unwrap_err();
        assert!(matches!(
            err.violations.at("/wall_set/wall_to_air_construction/type").unwrap().kind,
            ViolationKind::ConstraintViolation { .. }
        ));
    }

    #[test]
    fn test_sub_set_rejects_energy_keys() {
        let err = ConstructionSetAbridged::decode(&json!({
            "identifier": "Mixed",
            "wall_set": {"exterior_construction": "Generic Exterior Wall"}
        }))
        .unwrap_err();
        assert!(matches!(
            err.violations.at("/wall_set/exterior_construction").unwrap().kind,
            ViolationKind::UnexpectedField
        ));
    }

    #[test]
    fn test_identifier_required() {
        let err = ConstructionSetAbridged::decode(&json!({})).unwrap_err();
        assert_eq!(err.violations.at("/identifier").unwrap().kind, ViolationKind::MissingField);
    }

    #[test]
    fn test_union_dispatch_round_trip() {
        let set = AnyConstructionSet::decode_from(&json!({
            "type": "ConstructionSet",
            "identifier": "Glazed Doors",
            "door_set": {
                "external_glazed_door_construction": {
                    "type": "GlazedConstruction",
                    "identifier": "Single Clear Door",
                    "element_type": "Door",
                    "u_value": 5.8,
                    "shgc": 0.7
                }
            }
        }))
        .unwrap();
        assert_eq!(set.identifier().as_str(), "Glazed Doors");
        let encoded = serde_json::to_value(&set).unwrap();
        assert_eq!(encoded["wall_set"], Value::Null);
        assert_eq!(AnyConstructionSet::decode_from(&encoded).unwrap(), set);
    }
}

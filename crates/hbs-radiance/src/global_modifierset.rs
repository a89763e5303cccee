//! # Global Modifier Set
//!
//! The model-wide fallback modifiers. Every field defaults to the matching
//! value of the bundled radiance library (see [`crate::catalog`]).

use hbs_core::{Any, Context, Decode, Decoded, Entity, Identifier, ObjectReader};
use serde::Serialize;
use serde_json::Value;

use crate::catalog::global_modifier_set;
use crate::modifier::{Glass, Plastic, Trans};
use crate::modifierset::{
    ApertureModifierSetAbridged, DoorModifierSetAbridged, FloorModifierSetAbridged,
    RoofCeilingModifierSetAbridged, ShadeModifierSetAbridged, WallModifierSetAbridged,
};

hbs_core::one_of! {
    /// Modifier kinds carried by the global modifier set.
    pub enum GlobalModifier {
        Plastic(Plastic),
        Glass(Glass),
        Trans(Trans),
    }
}

impl GlobalModifier {
    /// Identifier of the contained modifier.
    pub fn identifier(&self) -> &str {
        match self {
            Self::Plastic(m) => m.identity.identifier.as_str(),
            Self::Glass(m) => m.identity.identifier.as_str(),
            Self::Trans(m) => m.identity.identifier.as_str(),
        }
    }
}

/// Model-wide default modifiers and sub-sets.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct GlobalModifierSet {
    pub modifiers: Vec<GlobalModifier>,
    pub wall_set: WallModifierSetAbridged,
    pub floor_set: FloorModifierSetAbridged,
    pub roof_ceiling_set: RoofCeilingModifierSetAbridged,
    pub aperture_set: ApertureModifierSetAbridged,
    pub door_set: DoorModifierSetAbridged,
    pub shade_set: ShadeModifierSetAbridged,
    pub air_boundary_modifier: Identifier,
    /// Modifier of context shades.
    pub context_modifier: Identifier,
}

impl GlobalModifierSet {
    /// The process-wide default, cloned.
    ///
    /// # Panics
    ///
    /// Panics if the bundled radiance library is unusable; see
    /// [`global_modifier_set`].
    pub fn from_defaults() -> Self {
        global_modifier_set().clone()
    }

    /// The modifier named `identifier`, if the set carries it.
    pub fn modifier(&self, identifier: &str) -> Option<&GlobalModifier> {
        self.modifiers.iter().find(|m| m.identifier() == identifier)
    }
}

hbs_core::entity!(GlobalModifierSet);

impl Decode for GlobalModifierSet {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let defaults = global_modifier_set();
        let mut obj = ObjectReader::open(value, Self::TYPE, cx)?;
        let modifiers = obj.or_else("modifiers", || defaults.modifiers.clone(), Any);
        let wall_set = obj.or_else("wall_set", || defaults.wall_set.clone(), Any);
        let floor_set = obj.or_else("floor_set", || defaults.floor_set.clone(), Any);
        let roof_ceiling_set = obj.or_else("roof_ceiling_set", || defaults.roof_ceiling_set.clone(), Any);
        let aperture_set = obj.or_else("aperture_set", || defaults.aperture_set.clone(), Any);
        let door_set = obj.or_else("door_set", || defaults.door_set.clone(), Any);
        let shade_set = obj.or_else("shade_set", || defaults.shade_set.clone(), Any);
        let air_boundary_modifier =
            obj.or_else("air_boundary_modifier", || defaults.air_boundary_modifier.clone(), Any);
        let context_modifier = obj.or_else("context_modifier", || defaults.context_modifier.clone(), Any);
        obj.finish()?;
        Ok(Self {
            modifiers: modifiers?,
            wall_set: wall_set?,
            floor_set: floor_set?,
            roof_ceiling_set: roof_ceiling_set?,
            aperture_set: aperture_set?,
            door_set: door_set?,
            shade_set: shade_set?,
            air_boundary_modifier: air_boundary_modifier?,
            context_modifier: context_modifier?,
        })
    }
}

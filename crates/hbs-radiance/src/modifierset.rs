//! # Modifier Sets
//!
//! Default modifiers per face type and boundary condition. The abridged
//! sets name modifiers by identifier; the full sets carry them inline.

use hbs_core::{Any, Context, Decode, Decoded, Entity, Identifier, ObjectReader, RadianceIdentity};
use serde::Serialize;
use serde_json::Value;

use crate::modifier::Modifier;

/// Modifiers for walls, floors, roofs or shades.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FaceSubSet<M> {
    /// Faces with an `Outdoors` boundary condition.
    pub exterior_modifier: Option<M>,
    /// Faces with any other boundary condition.
    pub interior_modifier: Option<M>,
}

impl<M> Default for FaceSubSet<M> {
    fn default() -> Self {
        Self {
            exterior_modifier: None,
            interior_modifier: None,
        }
    }
}

impl<M: Decode> FaceSubSet<M> {
    fn read(obj: &mut ObjectReader<'_, '_>) -> Decoded<Self> {
        let exterior_modifier = obj.optional("exterior_modifier", Any);
        let interior_modifier = obj.optional("interior_modifier", Any);
        Ok(Self {
            exterior_modifier: exterior_modifier?,
            interior_modifier: interior_modifier?,
        })
    }
}

/// Modifiers by aperture role.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApertureSubSet<M> {
    pub window_modifier: Option<M>,
    pub interior_modifier: Option<M>,
    pub skylight_modifier: Option<M>,
    pub operable_modifier: Option<M>,
}

impl<M> Default for ApertureSubSet<M> {
    fn default() -> Self {
        Self {
            window_modifier: None,
            interior_modifier: None,
            skylight_modifier: None,
            operable_modifier: None,
        }
    }
}

impl<M: Decode> ApertureSubSet<M> {
    fn read(obj: &mut ObjectReader<'_, '_>) -> Decoded<Self> {
        let window_modifier = obj.optional("window_modifier", Any);
        let interior_modifier = obj.optional("interior_modifier", Any);
        let skylight_modifier = obj.optional("skylight_modifier", Any);
        let operable_modifier = obj.optional("operable_modifier", Any);
        Ok(Self {
            window_modifier: window_modifier?,
            interior_modifier: interior_modifier?,
            skylight_modifier: skylight_modifier?,
            operable_modifier: operable_modifier?,
        })
    }
}

/// Modifiers for opaque and glass doors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DoorSubSet<M> {
    pub exterior_modifier: Option<M>,
    pub interior_modifier: Option<M>,
    pub interior_glass_modifier: Option<M>,
    pub exterior_glass_modifier: Option<M>,
    /// Outdoor doors in a roof or floor.
    pub overhead_modifier: Option<M>,
}

impl<M> Default for DoorSubSet<M> {
    fn default() -> Self {
        Self {
            exterior_modifier: None,
            interior_modifier: None,
            interior_glass_modifier: None,
            exterior_glass_modifier: None,
            overhead_modifier: None,
        }
    }
}

impl<M: Decode> DoorSubSet<M> {
    fn read(obj: &mut ObjectReader<'_, '_>) -> Decoded<Self> {
        let exterior_modifier = obj.optional("exterior_modifier", Any);
        let interior_modifier = obj.optional("interior_modifier", Any);
        let interior_glass_modifier = obj.optional("interior_glass_modifier", Any);
        let exterior_glass_modifier = obj.optional("exterior_glass_modifier", Any);
        let overhead_modifier = obj.optional("overhead_modifier", Any);
        Ok(Self {
            exterior_modifier: exterior_modifier?,
            interior_modifier: interior_modifier?,
            interior_glass_modifier: interior_glass_modifier?,
            exterior_glass_modifier: exterior_glass_modifier?,
            overhead_modifier: overhead_modifier?,
        })
    }
}

macro_rules! sub_set {
    ($(#[$meta:meta])* $name:ident, $subset:ident<$modifier:ty>) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Serialize)]
        #[serde(tag = "type")]
        pub struct $name {
            #[serde(flatten)]
            pub modifiers: $subset<$modifier>,
        }

        hbs_core::entity!($name);

        impl Decode for $name {
            fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
                let mut obj = ObjectReader::open(value, Self::TYPE, cx)?;
                let modifiers = $subset::read(&mut obj);
                obj.finish()?;
                Ok(Self {
                    modifiers: modifiers?,
                })
            }
        }
    };
}

sub_set!(
    /// Wall modifiers referenced by identifier.
    WallModifierSetAbridged,
    FaceSubSet<Identifier>
);
sub_set!(
    /// Floor modifiers referenced by identifier.
    FloorModifierSetAbridged,
    FaceSubSet<Identifier>
);
sub_set!(
    /// Roof and ceiling modifiers referenced by identifier.
    RoofCeilingModifierSetAbridged,
    FaceSubSet<Identifier>
);
sub_set!(
    /// Shade modifiers referenced by identifier.
    ShadeModifierSetAbridged,
    FaceSubSet<Identifier>
);
sub_set!(
    /// Aperture modifiers referenced by identifier.
    ApertureModifierSetAbridged,
    ApertureSubSet<Identifier>
);
sub_set!(
    /// Door modifiers referenced by identifier.
    DoorModifierSetAbridged,
    DoorSubSet<Identifier>
);
sub_set!(WallModifierSet, FaceSubSet<Modifier>);
sub_set!(FloorModifierSet, FaceSubSet<Modifier>);
sub_set!(RoofCeilingModifierSet, FaceSubSet<Modifier>);
sub_set!(ShadeModifierSet, FaceSubSet<Modifier>);
sub_set!(ApertureModifierSet, ApertureSubSet<Modifier>);
sub_set!(DoorModifierSet, DoorSubSet<Modifier>);

/// Every modifier a room needs, referenced by identifier.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct ModifierSetAbridged {
    #[serde(flatten)]
    pub identity: RadianceIdentity,
    pub wall_set: Option<WallModifierSetAbridged>,
    pub floor_set: Option<FloorModifierSetAbridged>,
    pub roof_ceiling_set: Option<RoofCeilingModifierSetAbridged>,
    pub aperture_set: Option<ApertureModifierSetAbridged>,
    pub door_set: Option<DoorModifierSetAbridged>,
    pub shade_set: Option<ShadeModifierSetAbridged>,
    /// Faces with an air boundary type; the generic air wall when absent.
    pub air_boundary_modifier: Option<Identifier>,
}

hbs_core::entity!(ModifierSetAbridged);

impl Decode for ModifierSetAbridged {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::open(value, Self::TYPE, cx)?;
        let identity = RadianceIdentity::read(&mut obj);
        let wall_set = obj.optional("wall_set", Any);
        let floor_set = obj.optional("floor_set", Any);
        let roof_ceiling_set = obj.optional("roof_ceiling_set", Any);
        let aperture_set = obj.optional("aperture_set", Any);
        let door_set = obj.optional("door_set", Any);
        let shade_set = obj.optional("shade_set", Any);
        let air_boundary_modifier = obj.optional("air_boundary_modifier", Any);
        obj.finish()?;
        Ok(Self {
            identity: identity?,
            wall_set: wall_set?,
            floor_set: floor_set?,
            roof_ceiling_set: roof_ceiling_set?,
            aperture_set: aperture_set?,
            door_set: door_set?,
            shade_set: shade_set?,
            air_boundary_modifier: air_boundary_modifier?,
        })
    }
}

/// Every modifier a room needs, inline.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct ModifierSet {
    #[serde(flatten)]
    pub identity: RadianceIdentity,
    pub wall_set: Option<WallModifierSet>,
    pub floor_set: Option<FloorModifierSet>,
    pub roof_ceiling_set: Option<RoofCeilingModifierSet>,
    pub aperture_set: Option<ApertureModifierSet>,
    pub door_set: Option<DoorModifierSet>,
    pub shade_set: Option<ShadeModifierSet>,
    pub air_boundary_modifier: Option<Modifier>,
}

hbs_core::entity!(ModifierSet);

impl Decode for ModifierSet {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::open(value, Self::TYPE, cx)?;
        let identity = RadianceIdentity::read(&mut obj);
        let wall_set = obj.optional("wall_set", Any);
        let floor_set = obj.optional("floor_set", Any);
        let roof_ceiling_set = obj.optional("roof_ceiling_set", Any);
        let aperture_set = obj.optional("aperture_set", Any);
        let door_set = obj.optional("door_set", Any);
        let shade_set = obj.optional("shade_set", Any);
        let air_boundary_modifier = obj.optional("air_boundary_modifier", Any);
        obj.finish()?;
        Ok(Self {
            identity: identity?,
            wall_set: wall_set?,
            floor_set: floor_set?,
            roof_ceiling_set: roof_ceiling_set?,
            aperture_set: aperture_set?,
            door_set: door_set?,
            shade_set: shade_set?,
            air_boundary_modifier: air_boundary_modifier?,
        })
    }
}

hbs_core::one_of! {
    /// A room-assignable modifier set in either form.
    pub enum AnyModifierSet {
        ModifierSet(ModifierSet),
        ModifierSetAbridged(ModifierSetAbridged),
    }
}

//! # Radiance Properties
//!
//! The radiance extension attached to geometry objects and to the model.

use hbs_core::{Any, Context, Decode, Decoded, Entity, Identifier, ObjectReader};
use serde::Serialize;
use serde_json::Value;

use crate::asset::{SensorGrid, View};
use crate::global_modifierset::GlobalModifierSet;
use crate::modifier::Modifier;
use crate::modifierset::AnyModifierSet;
use crate::state::{RadianceShadeStateAbridged, RadianceSubFaceStateAbridged};

/// Modifier references every object property carries.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ModifierRefs {
    pub modifier: Option<Identifier>,
    /// Modifier for direct sun studies and isolation studies.
    pub modifier_blk: Option<Identifier>,
}

impl ModifierRefs {
    fn read(obj: &mut ObjectReader<'_, '_>) -> Decoded<Self> {
        let modifier = obj.optional("modifier", Any);
        let modifier_blk = obj.optional("modifier_blk", Any);
        Ok(Self {
            modifier: modifier?,
            modifier_blk: modifier_blk?,
        })
    }
}

/// Objects sharing a dynamic group change state together; static when
/// `dynamic_group_identifier` is absent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dynamic<S> {
    pub dynamic_group_identifier: Option<String>,
    pub states: Option<Vec<S>>,
}

impl<S> Default for Dynamic<S> {
    fn default() -> Self {
        Self {
            dynamic_group_identifier: None,
            states: None,
        }
    }
}

impl<S: Decode> Dynamic<S> {
    fn read(obj: &mut ObjectReader<'_, '_>) -> Decoded<Self> {
        let dynamic_group_identifier = obj.optional("dynamic_group_identifier", Any);
        let states = obj.optional("states", Any);
        Ok(Self {
            dynamic_group_identifier: dynamic_group_identifier?,
            states: states?,
        })
    }
}

macro_rules! static_properties {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Serialize)]
        #[serde(tag = "type")]
        pub struct $name {
            #[serde(flatten)]
            pub refs: ModifierRefs,
        }

        hbs_core::entity!($name);

        impl Decode for $name {
            fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
                let mut obj = ObjectReader::open(value, Self::TYPE, cx)?;
                let refs = ModifierRefs::read(&mut obj);
                obj.finish()?;
                Ok(Self { refs: refs? })
            }
        }
    };
}

macro_rules! dynamic_properties {
    ($(#[$meta:meta])* $name:ident, $state:ty) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Serialize)]
        #[serde(tag = "type")]
        pub struct $name {
            #[serde(flatten)]
            pub refs: ModifierRefs,
            #[serde(flatten)]
            pub dynamic: Dynamic<$state>,
        }

        hbs_core::entity!($name);

        impl Decode for $name {
            fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
                let mut obj = ObjectReader::open(value, Self::TYPE, cx)?;
                let refs = ModifierRefs::read(&mut obj);
                let dynamic = Dynamic::read(&mut obj);
                obj.finish()?;
                Ok(Self {
                    refs: refs?,
                    dynamic: dynamic?,
                })
            }
        }
    };
}

static_properties!(
    /// Radiance properties of a shade mesh.
    ShadeMeshRadiancePropertiesAbridged
);
static_properties!(
    /// Radiance properties of a face.
    FaceRadiancePropertiesAbridged
);
dynamic_properties!(
    /// Radiance properties of a shade.
    ShadeRadiancePropertiesAbridged,
    RadianceShadeStateAbridged
);
dynamic_properties!(
    /// Radiance properties of an aperture.
    ApertureRadiancePropertiesAbridged,
    RadianceSubFaceStateAbridged
);
dynamic_properties!(
    /// Radiance properties of a door.
    DoorRadiancePropertiesAbridged,
    RadianceSubFaceStateAbridged
);

/// Radiance properties of a room.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct RoomRadiancePropertiesAbridged {
    pub modifier_set: Option<Identifier>,
}

hbs_core::entity!(RoomRadiancePropertiesAbridged);

impl Decode for RoomRadiancePropertiesAbridged {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::open(value, Self::TYPE, cx)?;
        let modifier_set = obj.optional("modifier_set", Any);
        obj.finish()?;
        Ok(Self {
            modifier_set: modifier_set?,
        })
    }
}

/// Radiance properties of a model.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct ModelRadianceProperties {
    pub global_modifier_set: GlobalModifierSet,
    /// Every unique modifier used anywhere in the model.
    pub modifiers: Option<Vec<Modifier>>,
    pub modifier_sets: Option<Vec<AnyModifierSet>>,
    pub sensor_grids: Option<Vec<SensorGrid>>,
    pub views: Option<Vec<View>>,
}

impl Default for ModelRadianceProperties {
    /// Empty properties holding a copy of the default global set.
    ///
    /// # Panics
    ///
    /// Panics if the radiance default catalog is unusable.
    fn default() -> Self {
        Self {
            global_modifier_set: GlobalModifierSet::from_defaults(),
            modifiers: None,
            modifier_sets: None,
            sensor_grids: None,
            views: None,
        }
    }
}

hbs_core::entity!(ModelRadianceProperties);

impl Decode for ModelRadianceProperties {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::open(value, Self::TYPE, cx)?;
        let global_modifier_set = obj.or_else("global_modifier_set", GlobalModifierSet::from_defaults, Any);
        let modifiers = obj.optional("modifiers", Any);
        let modifier_sets = obj.optional("modifier_sets", Any);
        let sensor_grids = obj.optional("sensor_grids", Any);
        let views = obj.optional("views", Any);
        obj.finish()?;
        Ok(Self {
            global_modifier_set: global_modifier_set?,
            modifiers: modifiers?,
            modifier_sets: modifier_sets?,
            sensor_grids: sensor_grids?,
            views: views?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::global_modifier_set;
    use hbs_core::ViolationKind;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_model_defaults_to_global_set_copy() {
        let props = ModelRadianceProperties::decode(&json!({})).unwrap();
        assert_eq!(&props.global_modifier_set, global_modifier_set());
        assert_eq!(props, ModelRadianceProperties::default());
    }

    #[test]
    fn test_mutating_copy_leaves_default_untouched() {
        let mut props = ModelRadianceProperties::default();
        props.global_modifier_set.modifiers.truncate(1);
        assert_eq!(global_modifier_set().modifiers.len(), 10);
    }

    #[test]
    fn test_aperture_states() {
        let props = ApertureRadiancePropertiesAbridged::decode(&json!({
            "type": "ApertureRadiancePropertiesAbridged",
            "modifier": "generic_exterior_window_vis_0.64",
            "dynamic_group_identifier": "south_blinds",
            "states": [{"type": "RadianceSubFaceStateAbridged", "modifier": "blinds_down"}, {}]
        }))
        .unwrap();
        assert_eq!(props.dynamic.states.unwrap().len(), 2);
    }

    #[test]
    fn test_shade_state_kind_enforced() {
        let err = ShadeRadiancePropertiesAbridged::decode(&json!({
            "states": [{"type": "RadianceSubFaceStateAbridged"}]
        }))
        .unwrap_err();
        assert!(matches!(
            err.violations.at("/states/0/type").unwrap().kind,
            ViolationKind::ConstraintViolation { .. }
        ));
    }

    #[test]
    fn test_face_properties_are_static() {
        let err = FaceRadiancePropertiesAbridged::decode(&json!({"dynamic_group_identifier": "x"})).unwrap_err();
        assert!(matches!(
            err.violations.at("/dynamic_group_identifier").unwrap().kind,
            ViolationKind::UnexpectedField
        ));
    }

    #[test]
    fn test_room_properties() {
        let room = RoomRadiancePropertiesAbridged::decode(&json!({"modifier_set": "Bright_Set"})).unwrap();
        assert_eq!(room.modifier_set.unwrap().as_str(), "Bright_Set");
    }

    #[test]
    fn test_model_lists() {
        let props = ModelRadianceProperties::decode(&json!({
            "modifiers": [{"type": "Void"}, {"type": "Mirror", "identifier": "mirror"}],
            "modifier_sets": [{"type": "ModifierSet", "identifier": "Inline"}],
            "views": [{"type": "View", "identifier": "v", "position": [0, 0, 0], "direction": [1, 0, 0], "up_vector": [0, 0, 1]}]
        }))
        .unwrap();
        assert_eq!(props.modifiers.unwrap()[1].identifier(), "mirror");
        assert!(props.sensor_grids.is_none());
    }
}

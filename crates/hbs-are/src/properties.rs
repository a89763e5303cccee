//! # ARE Properties
//!
//! The ARE extension attached to rooms, faces, apertures and doors, and to
//! the model. Object properties reference ARE constructions and
//! construction sets by identifier. The model properties carry the project,
//! dwelling and design variation records alongside the construction lists.
//!
//! Several face fields are provisional (`gross_area`, `is_reflective`,
//! `externalwall_is_wall_in_courtyard` and the other floor and wall
//! measurements). They are carried through unchecked.

use hbs_core::{Any, Context, Decode, Decoded, Entity, Identifier, ObjectReader, Range};
use hbs_energy::GlobalConstructionSet;
use serde::Serialize;
use serde_json::Value;

use crate::construction::AreConstruction;
use crate::constructionset::AnyConstructionSet;
use crate::designvariation::DesignVariation;
use crate::dwelling::Dwelling;
use crate::enums::{
    GapSizeType, IndoorCoveringType, LayerDirectionType, OutdoorCoveringType, PenetrationType,
    RoofExposureType, WindowType, ZoneType,
};
use crate::project::Project;

/// A penetration that leaks air through a face.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InfiltrationPenetration {
    pub penetration_type: PenetrationType,
    pub count: i64,
    pub is_sealed: bool,
}

impl Decode for InfiltrationPenetration {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::record(value, cx)?;
        let penetration_type = obj.required("penetration_type", Any);
        let count = obj.or_default("count", 1, Range::ge(1.0));
        let is_sealed = obj.or_default("is_sealed", false, Any);
        obj.finish()?;
        Ok(Self {
            penetration_type: penetration_type?,
            count: count?,
            is_sealed: is_sealed?,
        })
    }
}

/// Infiltration details of a roof space zone.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RoofspaceZoneInfiltration {
    pub has_sarking: bool,
    pub has_eave_vents: bool,
    pub roof_vent_count: i64,
}

impl Decode for RoofspaceZoneInfiltration {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::record(value, cx)?;
        let has_sarking = obj.or_default("has_sarking", false, Any);
        let has_eave_vents = obj.or_default("has_eave_vents", false, Any);
        let roof_vent_count = obj.or_default("roof_vent_count", 0, Range::ge(0.0));
        obj.finish()?;
        Ok(Self {
            has_sarking: has_sarking?,
            has_eave_vents: has_eave_vents?,
            roof_vent_count: roof_vent_count?,
        })
    }
}

/// Infiltration details of a subfloor zone.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubfloorZoneInfiltration {
    pub is_enclosed: bool,
    /// Open vent area in m2.
    pub vent_area: f64,
}

impl Default for SubfloorZoneInfiltration {
    fn default() -> Self {
        Self {
            is_enclosed: true,
            vent_area: 0.0,
        }
    }
}

impl Decode for SubfloorZoneInfiltration {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::record(value, cx)?;
        let is_enclosed = obj.or_default("is_enclosed", true, Any);
        let vent_area = obj.or_default("vent_area", 0.0, Range::ge(0.0));
        obj.finish()?;
        Ok(Self {
            is_enclosed: is_enclosed?,
            vent_area: vent_area?,
        })
    }
}

/// A roof window or skylight set into a roof face.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoofWindow {
    pub identifier: Identifier,
    /// Glazed construction of the unit.
    pub construction: Option<Identifier>,
    /// Glazed area in m2.
    pub area: f64,
    pub openable_percent: i64,
    pub has_insect_screens: Option<bool>,
    pub indoor_covering_type: IndoorCoveringType,
    pub outdoor_covering_type: OutdoorCoveringType,
}

impl Decode for RoofWindow {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::record(value, cx)?;
        let identifier = obj.required("identifier", Any);
        let construction = obj.optional("construction", Any);
        let area = obj.required("area", Range::gt(0.0));
        let openable_percent = obj.or_default("openable_percent", 0, Range::closed(0.0, 100.0));
        let has_insect_screens = obj.nullable_or("has_insect_screens", true, Any);
        let indoor_covering_type =
            obj.or_default("indoor_covering_type", IndoorCoveringType::HollandBlinds, Any);
        let outdoor_covering_type =
            obj.or_default("outdoor_covering_type", OutdoorCoveringType::None, Any);
        obj.finish()?;
        Ok(Self {
            identifier: identifier?,
            construction: construction?,
            area: area?,
            openable_percent: openable_percent?,
            has_insect_screens: has_insect_screens?,
            indoor_covering_type: indoor_covering_type?,
            outdoor_covering_type: outdoor_covering_type?,
        })
    }
}

/// ARE properties of a room (zone).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct RoomAREPropertiesAbridged {
    /// When absent the room uses the model's global construction set.
    pub construction_set: Option<Identifier>,
    pub zonetype: ZoneType,
    pub is_heated: bool,
    pub is_cooled: bool,
    pub is_reflective: Option<bool>,
    pub roofspace_zoneinfiltration: Option<RoofspaceZoneInfiltration>,
    pub subfloor_zoneinfiltration: Option<SubfloorZoneInfiltration>,
}

hbs_core::entity!(RoomAREPropertiesAbridged);

impl Decode for RoomAREPropertiesAbridged {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::open(value, Self::TYPE, cx)?;
        let construction_set = obj.optional("construction_set", Any);
        let zonetype = obj.required("zonetype", Any);
        let is_heated = obj.required("is_heated", Any);
        let is_cooled = obj.required("is_cooled", Any);
        let is_reflective = obj.optional("is_reflective", Any);
        let roofspace_zoneinfiltration = obj.optional("roofspace_zoneinfiltration", Any);
        let subfloor_zoneinfiltration = obj.optional("subfloor_zoneinfiltration", Any);
        obj.finish()?;
        Ok(Self {
            construction_set: construction_set?,
            zonetype: zonetype?,
            is_heated: is_heated?,
            is_cooled: is_cooled?,
            is_reflective: is_reflective?,
            roofspace_zoneinfiltration: roofspace_zoneinfiltration?,
            subfloor_zoneinfiltration: subfloor_zoneinfiltration?,
        })
    }
}

/// ARE properties of a wall, floor, ceiling or roof face.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct FaceAREPropertiesAbridged {
    pub construction: Option<Identifier>,
    /// Effective open area of the face's openings when fully open.
    pub opening_area: f64,
    /// `true` when absent; `null` for internal faces.
    pub has_insect_screens: Option<bool>,
    pub infiltration_penetrations: Option<Vec<InfiltrationPenetration>>,
    pub gross_area: Option<f64>,
    pub is_opening_controlled: bool,
    /// Identifiers of detached shades that shade this face.
    pub are_shadedby_shades: Option<Vec<String>>,
    /// Identifiers of external wall faces that shade this face.
    pub are_shadedby_walls: Option<Vec<String>>,
    pub roof_exposure_type: Option<RoofExposureType>,
    pub roof_azimuth: Option<f64>,
    pub roof_roof_windows: Option<Vec<RoofWindow>>,
    pub externalwall_is_wall_in_courtyard: Option<bool>,
    pub externalwall_floor_height: Option<f64>,
    pub floorceiling_ceiling_floor_height: Option<f64>,
    pub floorceiling_insulation_r_value: Option<f64>,
    pub floorceiling_level: Option<i64>,
    pub internalwall_layer_direction_type: Option<LayerDirectionType>,
}

hbs_core::entity!(FaceAREPropertiesAbridged);

impl Decode for FaceAREPropertiesAbridged {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::open(value, Self::TYPE, cx)?;
        let construction = obj.optional("construction", Any);
        let opening_area = obj.required("opening_area", Range::ge(0.0));
        let has_insect_screens = obj.nullable_or("has_insect_screens", true, Any);
        let infiltration_penetrations = obj.optional("infiltration_penetrations", Any);
        let gross_area = obj.optional("gross_area", Any);
        let is_opening_controlled = obj.required("is_opening_controlled", Any);
        let are_shadedby_shades = obj.optional("are_shadedby_shades", Any);
        let are_shadedby_walls = obj.optional("are_shadedby_walls", Any);
        let roof_exposure_type = obj.optional("roof_exposure_type", Any);
        let roof_azimuth = obj.optional("roof_azimuth", Any);
        let roof_roof_windows = obj.optional("roof_roof_windows", Any);
        let externalwall_is_wall_in_courtyard = obj.optional("externalwall_is_wall_in_courtyard", Any);
        let externalwall_floor_height = obj.optional("externalwall_floor_height", Any);
        let floorceiling_ceiling_floor_height = obj.optional("floorceiling_ceiling_floor_height", Any);
        let floorceiling_insulation_r_value = obj.optional("floorceiling_insulation_r_value", Any);
        let floorceiling_level = obj.optional("floorceiling_level", Any);
        let internalwall_layer_direction_type = obj.optional("internalwall_layer_direction_type", Any);
        obj.finish()?;
        Ok(Self {
            construction: construction?,
            opening_area: opening_area?,
            has_insect_screens: has_insect_screens?,
            infiltration_penetrations: infiltration_penetrations?,
            gross_area: gross_area?,
            is_opening_controlled: is_opening_controlled?,
            are_shadedby_shades: are_shadedby_shades?,
            are_shadedby_walls: are_shadedby_walls?,
            roof_exposure_type: roof_exposure_type?,
            roof_azimuth: roof_azimuth?,
            roof_roof_windows: roof_roof_windows?,
            externalwall_is_wall_in_courtyard: externalwall_is_wall_in_courtyard?,
            externalwall_floor_height: externalwall_floor_height?,
            floorceiling_ceiling_floor_height: floorceiling_ceiling_floor_height?,
            floorceiling_insulation_r_value: floorceiling_insulation_r_value?,
            floorceiling_level: floorceiling_level?,
            internalwall_layer_direction_type: internalwall_layer_direction_type?,
        })
    }
}

/// ARE properties of a window or glazed door.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct ApertureAREPropertiesAbridged {
    pub construction: Option<Identifier>,
    pub opening_area: f64,
    /// Percent of the window area that opens, after operator and safety
    /// restrictions.
    pub openable_percent: i64,
    pub window_type: WindowType,
    pub has_insect_screens: Option<bool>,
    pub is_weather_stripped: Option<bool>,
    pub gap_size_type: Option<GapSizeType>,
    pub indoor_covering_type: IndoorCoveringType,
    pub outdoor_covering_type: OutdoorCoveringType,
}

hbs_core::entity!(ApertureAREPropertiesAbridged);

impl Decode for ApertureAREPropertiesAbridged {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::open(value, Self::TYPE, cx)?;
        let construction = obj.optional("construction", Any);
        let opening_area = obj.required("opening_area", Range::ge(0.0));
        let openable_percent = obj.required("openable_percent", Range::ge(0.0));
        let window_type = obj.required("window_type", Any);
        let has_insect_screens = obj.nullable_or("has_insect_screens", true, Any);
        let is_weather_stripped = obj.nullable_or("is_weather_stripped", true, Any);
        let gap_size_type = obj.nullable_or("gap_size_type", GapSizeType::Medium, Any);
        let indoor_covering_type =
            obj.or_default("indoor_covering_type", IndoorCoveringType::HollandBlinds, Any);
        let outdoor_covering_type =
            obj.or_default("outdoor_covering_type", OutdoorCoveringType::None, Any);
        obj.finish()?;
        Ok(Self {
            construction: construction?,
            opening_area: opening_area?,
            openable_percent: openable_percent?,
            window_type: window_type?,
            has_insect_screens: has_insect_screens?,
            is_weather_stripped: is_weather_stripped?,
            gap_size_type: gap_size_type?,
            indoor_covering_type: indoor_covering_type?,
            outdoor_covering_type: outdoor_covering_type?,
        })
    }
}

/// ARE properties of a door.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct DoorAREPropertiesAbridged {
    pub construction: Option<Identifier>,
    pub is_external_door: bool,
    /// Openings such as archways. `false` when absent.
    pub is_permanent_opening: Option<bool>,
}

hbs_core::entity!(DoorAREPropertiesAbridged);

impl Decode for DoorAREPropertiesAbridged {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::open(value, Self::TYPE, cx)?;
        let construction = obj.optional("construction", Any);
        let is_external_door = obj.required("is_external_door", Any);
        let is_permanent_opening = obj.nullable_or("is_permanent_opening", false, Any);
        obj.finish()?;
        Ok(Self {
            construction: construction?,
            is_external_door: is_external_door?,
            is_permanent_opening: is_permanent_opening?,
        })
    }
}

/// ARE properties of a model.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct ModelAREProperties {
    pub are_project: Project,
    pub are_dwelling: Dwelling,
    pub construction_sets: Option<Vec<AnyConstructionSet>>,
    /// Every unique ARE construction used in the model.
    pub are_constructions: Option<Vec<AreConstruction>>,
    /// The energy global construction set.
    pub global_construction_set: GlobalConstructionSet,
    pub are_designvariation: DesignVariation,
}

hbs_core::entity!(ModelAREProperties);

impl Decode for ModelAREProperties {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::open(value, Self::TYPE, cx)?;
        let are_project = obj.required("are_project", Any);
        let are_dwelling = obj.required("are_dwelling", Any);
        let construction_sets = obj.optional("construction_sets", Any);
        let are_constructions = obj.optional("are_constructions", Any);
        let global_construction_set =
            obj.or_else("global_construction_set", GlobalConstructionSet::from_defaults, Any);
        let are_designvariation = obj.required("are_designvariation", Any);
        obj.finish()?;
        Ok(Self {
            are_project: are_project?,
            are_dwelling: are_dwelling?,
            construction_sets: construction_sets?,
            are_constructions: are_constructions?,
            global_construction_set: global_construction_set?,
            are_designvariation: are_designvariation?,
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
    fn test_aperture_defaults() {
        let props = ApertureAREPropertiesAbridged::decode(&json!({
            "type": "ApertureAREPropertiesAbridged",
            "opening_area": 0.6,
            "openable_percent": 45,
            "window_type": "Awning"
        }))
        .unwrap();
        assert_eq!(props.has_insect_screens, Some(true));
        assert_eq!(props.is_weather_stripped, Some(true));
        assert_eq!(props.gap_size_type, Some(GapSizeType::Medium));
        assert_eq!(props.indoor_covering_type, IndoorCoveringType::HollandBlinds);
        assert_eq!(props.outdoor_covering_type, OutdoorCoveringType::None);
    }

    #[test]
    fn test_aperture_explicit_nulls() {
        let props = ApertureAREPropertiesAbridged::decode(&json!({
            "opening_area": 0,
            "openable_percent": 0,
            "window_type": "Sliding",
            "gap_size_type": null,
            "is_weather_stripped": null
        }))
        .unwrap();
        assert_eq!(props.gap_size_type, None);
        assert_eq!(props.is_weather_stripped, None);
        assert_eq!(props.has_insect_screens, Some(true));
    }

    #[test]
    fn test_aperture_covering_null_is_mismatch() {
        let err = ApertureAREPropertiesAbridged::decode(&json!({
            "opening_area": 1.0,
            "openable_percent": 100,
            "window_type": "Casement",
            "indoor_covering_type": null
        }))
        .unwrap_err();
        assert!(matches!(
            err.violations.at("/indoor_covering_type").unwrap().kind,
            ViolationKind::TypeMismatch { .. }
        ));
    }

    #[test]
    fn test_face_roof_windows_and_penetrations() {
        let face = FaceAREPropertiesAbridged::decode(&json!({
            "opening_area": 0,
            "is_opening_controlled": false,
            "has_insect_screens": null,
            "roof_exposure_type": "Partially Exposed",
            "roof_roof_windows": [{"identifier": "RW1", "area": 0.8}],
            "infiltration_penetrations": [{"penetration_type": "Downlight", "count": 6}],
            "gross_area": 42.5
        }))
        .unwrap();
        assert_eq!(face.has_insect_screens, None);
        let windows = face.roof_roof_windows.unwrap();
        assert_eq!(windows[0].openable_percent, 0);
        assert_eq!(windows[0].has_insect_screens, Some(true));
        let penetrations = face.infiltration_penetrations.unwrap();
        assert_eq!(penetrations[0].count, 6);
        assert!(!penetrations[0].is_sealed);
    }

    #[test]
    fn test_face_required_fields() {
        let err = FaceAREPropertiesAbridged::decode(&json!({"opening_area": -0.1})).unwrap_err();
        assert_eq!(err.violations.len(), 2);
        assert!(matches!(
            err.violations.at("/opening_area").unwrap().kind,
            ViolationKind::ConstraintViolation { .. }
        ));
        assert_eq!(err.violations.at("/is_opening_controlled").unwrap().kind, ViolationKind::MissingField);
    }

    #[test]
    fn test_room_zone_infiltration() {
        let room = RoomAREPropertiesAbridged::decode(&json!({
            "zonetype": "Roof Space",
            "is_heated": false,
            "is_cooled": false,
            "roofspace_zoneinfiltration": {"has_sarking": true}
        }))
        .unwrap();
        assert_eq!(room.zonetype, ZoneType::RoofSpace);
        assert!(room.roofspace_zoneinfiltration.unwrap().has_sarking);
        assert!(room.construction_set.is_none());
    }

    #[test]
    fn test_door_permanent_opening() {
        let door = DoorAREPropertiesAbridged::decode(&json!({"is_external_door": true})).unwrap();
        assert_eq!(door.is_permanent_opening, Some(false));
        let encoded = door.encode().unwrap();
        assert_eq!(
            encoded,
            json!({
                "type": "DoorAREPropertiesAbridged",
                "construction": null,
                "is_external_door": true,
                "is_permanent_opening": false
            })
        );
    }

    #[test]
    fn test_wrong_tag_rejected() {
        let err = DoorAREPropertiesAbridged::decode(&json!({
            "type": "DoorEnergyPropertiesAbridged",
            "is_external_door": false
        }))
        .unwrap_err();
        assert!(err.violations.at("/type").is_some());
    }
}

//! # Energy Properties
//!
//! The energy extension attached to shades, doors, apertures, faces, rooms,
//! and the model. Object properties reference model-level resources by
//! identifier; [`ModelEnergyProperties`] carries the resources themselves.

use hbs_core::{Any, Context, Decode, Decoded, Entity, Identifier, ObjectReader};
use serde::Serialize;
use serde_json::Value;

use crate::construction::Construction;
use crate::constructionset::AnyConstructionSet;
use crate::daylight::DaylightingControl;
use crate::generator::{ElectricLoadCenter, PVProperties};
use crate::global_constructionset::GlobalConstructionSet;
use crate::hvac::Hvac;
use crate::internalmass::InternalMassAbridged;
use crate::load::{
    ElectricEquipmentAbridged, GasEquipmentAbridged, InfiltrationAbridged, LightingAbridged,
    PeopleAbridged, ProcessAbridged, ServiceHotWaterAbridged, SetpointAbridged,
    VentilationAbridged,
};
use crate::material::Material;
use crate::programtype::AnyProgramType;
use crate::schedule::{AnySchedule, ScheduleTypeLimit};
use crate::shw::SHWSystem;
use crate::ventcool::{
    AFNCrack, VentilationControlAbridged, VentilationFan, VentilationOpening,
    VentilationSimulationControl,
};

/// Energy properties of a shade mesh.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct ShadeMeshEnergyPropertiesAbridged {
    /// A `ShadeConstruction`. Context meshes fall back to 0.2 diffuse
    /// reflectance, attached meshes to the construction set.
    pub construction: Option<Identifier>,
    /// Transmittance over time; opaque when absent.
    pub transmittance_schedule: Option<Identifier>,
}

hbs_core::entity!(ShadeMeshEnergyPropertiesAbridged);

impl Decode for ShadeMeshEnergyPropertiesAbridged {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::open(value, Self::TYPE, cx)?;
        let construction = obj.optional("construction", Any);
        let transmittance_schedule = obj.optional("transmittance_schedule", Any);
        obj.finish()?;
        Ok(Self {
            construction: construction?,
            transmittance_schedule: transmittance_schedule?,
        })
    }
}

/// Energy properties of a shade.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct ShadeEnergyPropertiesAbridged {
    pub construction: Option<Identifier>,
    pub transmittance_schedule: Option<Identifier>,
    /// Photovoltaic behavior; the shade normal sets the module orientation.
    pub pv_properties: Option<PVProperties>,
}

hbs_core::entity!(ShadeEnergyPropertiesAbridged);

impl Decode for ShadeEnergyPropertiesAbridged {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::open(value, Self::TYPE, cx)?;
        let construction = obj.optional("construction", Any);
        let transmittance_schedule = obj.optional("transmittance_schedule", Any);
        let pv_properties = obj.optional("pv_properties", Any);
        obj.finish()?;
        Ok(Self {
            construction: construction?,
            transmittance_schedule: transmittance_schedule?,
            pv_properties: pv_properties?,
        })
    }
}

/// Energy properties of a door.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct DoorEnergyPropertiesAbridged {
    /// Opaque, or a window construction for glass doors.
    pub construction: Option<Identifier>,
    pub vent_opening: Option<VentilationOpening>,
}

hbs_core::entity!(DoorEnergyPropertiesAbridged);

impl Decode for DoorEnergyPropertiesAbridged {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::open(value, Self::TYPE, cx)?;
        let construction = obj.optional("construction", Any);
        let vent_opening = obj.optional("vent_opening", Any);
        obj.finish()?;
        Ok(Self {
            construction: construction?,
            vent_opening: vent_opening?,
        })
    }
}

/// Energy properties of an aperture.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct ApertureEnergyPropertiesAbridged {
    pub construction: Option<Identifier>,
    pub vent_opening: Option<VentilationOpening>,
}

hbs_core::entity!(ApertureEnergyPropertiesAbridged);

impl Decode for ApertureEnergyPropertiesAbridged {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::open(value, Self::TYPE, cx)?;
        let construction = obj.optional("construction", Any);
        let vent_opening = obj.optional("vent_opening", Any);
        obj.finish()?;
        Ok(Self {
            construction: construction?,
            vent_opening: vent_opening?,
        })
    }
}

/// Energy properties of a face.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct FaceEnergyPropertiesAbridged {
    pub construction: Option<Identifier>,
    pub vent_crack: Option<AFNCrack>,
}

hbs_core::entity!(FaceEnergyPropertiesAbridged);

impl Decode for FaceEnergyPropertiesAbridged {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::open(value, Self::TYPE, cx)?;
        let construction = obj.optional("construction", Any);
        let vent_crack = obj.optional("vent_crack", Any);
        obj.finish()?;
        Ok(Self {
            construction: construction?,
            vent_crack: vent_crack?,
        })
    }
}

/// Energy properties of a room: assigned resources and room-level loads.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct RoomEnergyPropertiesAbridged {
    pub construction_set: Option<Identifier>,
    pub program_type: Option<Identifier>,
    pub hvac: Option<Identifier>,
    pub shw: Option<Identifier>,
    pub people: Option<PeopleAbridged>,
    pub lighting: Option<LightingAbridged>,
    pub electric_equipment: Option<ElectricEquipmentAbridged>,
    pub gas_equipment: Option<GasEquipmentAbridged>,
    pub service_hot_water: Option<ServiceHotWaterAbridged>,
    pub infiltration: Option<InfiltrationAbridged>,
    pub ventilation: Option<VentilationAbridged>,
    pub setpoint: Option<SetpointAbridged>,
    pub daylighting_control: Option<DaylightingControl>,
    pub window_vent_control: Option<VentilationControlAbridged>,
    pub fans: Option<Vec<VentilationFan>>,
    pub internal_masses: Option<Vec<InternalMassAbridged>>,
    pub process_loads: Option<Vec<ProcessAbridged>>,
}

hbs_core::entity!(RoomEnergyPropertiesAbridged);

impl Decode for RoomEnergyPropertiesAbridged {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::open(value, Self::TYPE, cx)?;
        let construction_set = obj.optional("construction_set", Any);
        let program_type = obj.optional("program_type", Any);
        let hvac = obj.optional("hvac", Any);
        let shw = obj.optional("shw", Any);
        let people = obj.optional("people", Any);
        let lighting = obj.optional("lighting", Any);
        let electric_equipment = obj.optional("electric_equipment", Any);
        let gas_equipment = obj.optional("gas_equipment", Any);
        let service_hot_water = obj.optional("service_hot_water", Any);
        let infiltration = obj.optional("infiltration", Any);
        let ventilation = obj.optional("ventilation", Any);
        let setpoint = obj.optional("setpoint", Any);
        let daylighting_control = obj.optional("daylighting_control", Any);
        let window_vent_control = obj.optional("window_vent_control", Any);
        let fans = obj.optional("fans", Any);
        let internal_masses = obj.optional("internal_masses", Any);
        let process_loads = obj.optional("process_loads", Any);
        obj.finish()?;
        Ok(Self {
            construction_set: construction_set?,
            program_type: program_type?,
            hvac: hvac?,
            shw: shw?,
            people: people?,
            lighting: lighting?,
            electric_equipment: electric_equipment?,
            gas_equipment: gas_equipment?,
            service_hot_water: service_hot_water?,
            infiltration: infiltration?,
            ventilation: ventilation?,
            setpoint: setpoint?,
            daylighting_control: daylighting_control?,
            window_vent_control: window_vent_control?,
            fans: fans?,
            internal_masses: internal_masses?,
            process_loads: process_loads?,
        })
    }
}

/// Energy properties of a model: the global set and every shared resource.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct ModelEnergyProperties {
    pub global_construction_set: GlobalConstructionSet,
    pub construction_sets: Option<Vec<AnyConstructionSet>>,
    pub constructions: Option<Vec<Construction>>,
    pub materials: Option<Vec<Material>>,
    pub hvacs: Option<Vec<Hvac>>,
    pub shws: Option<Vec<SHWSystem>>,
    pub program_types: Option<Vec<AnyProgramType>>,
    pub schedules: Option<Vec<AnySchedule>>,
    pub schedule_type_limits: Option<Vec<ScheduleTypeLimit>>,
    pub ventilation_simulation_control: Option<VentilationSimulationControl>,
    pub electric_load_center: Option<ElectricLoadCenter>,
}

impl Default for ModelEnergyProperties {
    /// Empty properties holding a copy of the default global set.
    ///
    /// # Panics
    ///
    /// Panics if the energy default catalog is unusable.
    fn default() -> Self {
        Self {
            global_construction_set: GlobalConstructionSet::from_defaults(),
            construction_sets: None,
            constructions: None,
            materials: None,
            hvacs: None,
            shws: None,
            program_types: None,
            schedules: None,
            schedule_type_limits: None,
            ventilation_simulation_control: None,
            electric_load_center: None,
        }
    }
}

hbs_core::entity!(ModelEnergyProperties);

impl Decode for ModelEnergyProperties {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::open(value, Self::TYPE, cx)?;
        let global_construction_set =
            obj.or_else("global_construction_set", GlobalConstructionSet::from_defaults, Any);
        let construction_sets = obj.optional("construction_sets", Any);
        let constructions = obj.optional("constructions", Any);
        let materials = obj.optional("materials", Any);
        let hvacs = obj.optional("hvacs", Any);
        let shws = obj.optional("shws", Any);
        let program_types = obj.optional("program_types", Any);
        let schedules = obj.optional("schedules", Any);
        let schedule_type_limits = obj.optional("schedule_type_limits", Any);
        let ventilation_simulation_control = obj.optional("ventilation_simulation_control", Any);
        let electric_load_center = obj.optional("electric_load_center", Any);
        obj.finish()?;
        Ok(Self {
            global_construction_set: global_construction_set?,
            construction_sets: construction_sets?,
            constructions: constructions?,
            materials: materials?,
            hvacs: hvacs?,
            shws: shws?,
            program_types: program_types?,
            schedules: schedules?,
            schedule_type_limits: schedule_type_limits?,
            ventilation_simulation_control: ventilation_simulation_control?,
            electric_load_center: electric_load_center?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::global_construction_set;
    use hbs_core::ViolationKind;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_model_defaults_to_global_set_copy() {
        let props = ModelEnergyProperties::decode(&json!({"type": "ModelEnergyProperties"})).unwrap();
        assert_eq!(&props.global_construction_set, global_construction_set());
        assert_eq!(props, ModelEnergyProperties::default());
    }

    #[test]
    fn test_mutating_copy_leaves_default_untouched() {
        let mut props = ModelEnergyProperties::default();
        props.global_construction_set.materials.clear();
        props.global_construction_set.context_construction = Identifier::new("Mine").unwrap();
        assert_eq!(global_construction_set().materials.len(), 15);
        assert_eq!(global_construction_set().context_construction.as_str(), "Generic Context");
    }

    #[test]
    fn test_model_resource_lists_dispatch_on_type() {
        let props = ModelEnergyProperties::decode(&json!({
            "materials": [
                {"type": "EnergyMaterialNoMass", "identifier": "R2", "r_value": 2.0},
                {"type": "EnergyWindowMaterialSimpleGlazSys", "identifier": "Glz", "u_factor": 1.8, "shgc": 0.4}
            ],
            "hvacs": [{"type": "IdealAirSystemAbridged", "identifier": "Ideal"}],
            "schedule_type_limits": [{"type": "ScheduleTypeLimit", "identifier": "Fraction"}],
            "electric_load_center": {"type": "ElectricLoadCenter"}
        }))
        .unwrap();
        let materials = props.materials.unwrap();
        assert_eq!(materials[1].type_name(), "EnergyWindowMaterialSimpleGlazSys");
        assert_eq!(props.hvacs.unwrap()[0].type_name(), "IdealAirSystemAbridged");
    }

    #[test]
    fn test_model_unknown_material_tag() {
        let err = ModelEnergyProperties::decode(&json!({
            "materials": [{"type": "EnergyWindowMaterialBlind", "identifier": "b"}]
        }))
        .unwrap_err();
        match &err.violations.at("/materials/0/type").unwrap().kind {
            ViolationKind::UnrecognizedDiscriminator { received, allowed } => {
                assert_eq!(received, "EnergyWindowMaterialBlind");
                assert_eq!(allowed.len(), 6);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_room_properties() {
        let room = RoomEnergyPropertiesAbridged::decode(&json!({
            "type": "RoomEnergyPropertiesAbridged",
            "program_type": "Office",
            "hvac": "Ideal",
            "fans": [{"type": "VentilationFan", "identifier": "Fan", "flow_rate": 0.1, "pressure_rise": 60, "efficiency": 0.5}],
            "process_loads": [{"identifier": "Fireplace", "watts": 1500, "schedule": "Winter", "fuel_type": "Propane"}]
        }))
        .unwrap();
        assert_eq!(room.fans.unwrap().len(), 1);
        assert_eq!(room.construction_set, None);
    }

    #[test]
    fn test_object_properties_reject_extra_keys() {
        let docs = [
            json!({"type": "FaceEnergyPropertiesAbridged", "color": 1}),
            json!({"type": "ApertureEnergyPropertiesAbridged", "color": 1}),
            json!({"type": "DoorEnergyPropertiesAbridged", "color": 1}),
            json!({"type": "ShadeEnergyPropertiesAbridged", "color": 1}),
            json!({"type": "ShadeMeshEnergyPropertiesAbridged", "color": 1}),
        ];
        assert!(FaceEnergyPropertiesAbridged::decode(&docs[0]).is_err());
        assert!(ApertureEnergyPropertiesAbridged::decode(&docs[1]).is_err());
        assert!(DoorEnergyPropertiesAbridged::decode(&docs[2]).is_err());
        assert!(ShadeEnergyPropertiesAbridged::decode(&docs[3]).is_err());
        assert!(ShadeMeshEnergyPropertiesAbridged::decode(&docs[4]).is_err());
    }

    #[test]
    fn test_face_vent_crack() {
        let face = FaceEnergyPropertiesAbridged::decode(&json!({
            "construction": "Generic Exterior Wall",
            "vent_crack": {"type": "AFNCrack", "flow_coefficient": 0.0001}
        }))
        .unwrap();
        assert_eq!(face.vent_crack.unwrap().flow_exponent, 0.65);
    }
}

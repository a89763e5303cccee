//! # Energy Loads
//!
//! Each load is defined once as a field struct generic over how its
//! schedules are given: `Identifier` in the abridged form, [`Schedule`] in
//! the full form. The two wrappers flatten the same fields under different
//! `type` tags and decode independently.

use hbs_core::{
    Any, AutocalculateOr, Context, Decode, Decoded, EnergyIdentity, Entity, Identifier, Length,
    ObjectReader, Range,
};
use serde::Serialize;
use serde_json::Value;

use crate::schedule::Schedule;

/// Watts or flow per unit: never negative.
const NON_NEGATIVE: Range = Range::ge(0.0);

/// Fields of a load, read from an open object.
pub trait LoadFields: Sized {
    fn read(obj: &mut ObjectReader<'_, '_>) -> Decoded<Self>;
}

macro_rules! load_pair {
    (@entity $name:ident, $fields:ty) => {
        hbs_core::entity!($name);

        impl Decode for $name {
            fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
                let mut obj = ObjectReader::open(value, Self::TYPE, cx)?;
                let identity = EnergyIdentity::read(&mut obj);
                let load = <$fields as LoadFields>::read(&mut obj);
                obj.finish()?;
                Ok(Self {
                    identity: identity?,
                    load: load?,
                })
            }
        }
    };
    (
        $(#[$ameta:meta])* $abridged:ident,
        $(#[$fmeta:meta])* $full:ident,
        $fields:ident
    ) => {
        $(#[$ameta])*
        #[derive(Debug, Clone, PartialEq, Serialize)]
        #[serde(tag = "type")]
        pub struct $abridged {
            #[serde(flatten)]
            pub identity: EnergyIdentity,
            #[serde(flatten)]
            pub load: $fields<Identifier>,
        }

        $(#[$fmeta])*
        #[derive(Debug, Clone, PartialEq, Serialize)]
        #[serde(tag = "type")]
        pub struct $full {
            #[serde(flatten)]
            pub identity: EnergyIdentity,
            #[serde(flatten)]
            pub load: $fields<Schedule>,
        }

        load_pair!(@entity $abridged, $fields<Identifier>);
        load_pair!(@entity $full, $fields<Schedule>);
    };
}

/// Occupancy density and behavior.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeopleFields<S> {
    /// People per m2 of floor area.
    pub people_per_area: f64,
    /// Fractional occupancy over time.
    pub occupancy_schedule: S,
    /// Metabolic rate in W/person.
    pub activity_schedule: Option<S>,
    pub radiant_fraction: f64,
    pub latent_fraction: AutocalculateOr<f64>,
}

impl<S: Decode> LoadFields for PeopleFields<S> {
    fn read(obj: &mut ObjectReader<'_, '_>) -> Decoded<Self> {
        let people_per_area = obj.required("people_per_area", NON_NEGATIVE);
        let occupancy_schedule = obj.required("occupancy_schedule", Any);
        let activity_schedule = obj.optional("activity_schedule", Any);
        let radiant_fraction = obj.or_default("radiant_fraction", 0.3, Range::UNIT);
        let latent_fraction = obj.or_else("latent_fraction", AutocalculateOr::default, Range::UNIT);
        Ok(Self {
            people_per_area: people_per_area?,
            occupancy_schedule: occupancy_schedule?,
            activity_schedule: activity_schedule?,
            radiant_fraction: radiant_fraction?,
            latent_fraction: latent_fraction?,
        })
    }
}

load_pair!(
    /// Occupancy with schedules referenced by identifier.
    PeopleAbridged,
    /// Occupancy with schedules inline.
    People,
    PeopleFields
);

/// Lighting power density and heat split.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LightingFields<S> {
    pub watts_per_area: f64,
    pub schedule: S,
    pub visible_fraction: f64,
    pub radiant_fraction: f64,
    pub return_air_fraction: f64,
    /// Baseline for the lighting power savings report.
    pub baseline_watts_per_area: f64,
}

impl<S: Decode> LoadFields for LightingFields<S> {
    fn read(obj: &mut ObjectReader<'_, '_>) -> Decoded<Self> {
        let watts_per_area = obj.required("watts_per_area", NON_NEGATIVE);
        let schedule = obj.required("schedule", Any);
        let visible_fraction = obj.or_default("visible_fraction", 0.25, Range::UNIT);
        let radiant_fraction = obj.or_default("radiant_fraction", 0.32, Range::UNIT);
        let return_air_fraction = obj.or_default("return_air_fraction", 0.0, Range::UNIT);
        let baseline_watts_per_area = obj.or_default("baseline_watts_per_area", 11.84029, NON_NEGATIVE);
        Ok(Self {
            watts_per_area: watts_per_area?,
            schedule: schedule?,
            visible_fraction: visible_fraction?,
            radiant_fraction: radiant_fraction?,
            return_air_fraction: return_air_fraction?,
            baseline_watts_per_area: baseline_watts_per_area?,
        })
    }
}

load_pair!(
    /// Lighting with its schedule referenced by identifier.
    LightingAbridged,
    /// Lighting with its schedule inline.
    Lighting,
    LightingFields
);

/// Equipment power density and heat split, shared by electric and gas.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EquipmentFields<S> {
    pub watts_per_area: f64,
    pub schedule: S,
    pub radiant_fraction: f64,
    pub latent_fraction: f64,
    pub lost_fraction: f64,
}

impl<S: Decode> LoadFields for EquipmentFields<S> {
    fn read(obj: &mut ObjectReader<'_, '_>) -> Decoded<Self> {
        let watts_per_area = obj.required("watts_per_area", NON_NEGATIVE);
        let schedule = obj.required("schedule", Any);
        let radiant_fraction = obj.or_default("radiant_fraction", 0.0, Range::UNIT);
        let latent_fraction = obj.or_default("latent_fraction", 0.0, Range::UNIT);
        let lost_fraction = obj.or_default("lost_fraction", 0.0, Range::UNIT);
        Ok(Self {
            watts_per_area: watts_per_area?,
            schedule: schedule?,
            radiant_fraction: radiant_fraction?,
            latent_fraction: latent_fraction?,
            lost_fraction: lost_fraction?,
        })
    }
}

load_pair!(
    /// Electric equipment with its schedule referenced by identifier.
    ElectricEquipmentAbridged,
    /// Electric equipment with its schedule inline.
    ElectricEquipment,
    EquipmentFields
);

load_pair!(
    /// Gas equipment with its schedule referenced by identifier.
    GasEquipmentAbridged,
    /// Gas equipment with its schedule inline.
    GasEquipment,
    EquipmentFields
);

/// Hot water use.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceHotWaterFields<S> {
    /// L/h per m2 of floor area.
    pub flow_per_area: f64,
    pub schedule: S,
    /// Celsius.
    pub target_temperature: f64,
    pub sensible_fraction: f64,
    pub latent_fraction: f64,
}

impl<S: Decode> LoadFields for ServiceHotWaterFields<S> {
    fn read(obj: &mut ObjectReader<'_, '_>) -> Decoded<Self> {
        let flow_per_area = obj.required("flow_per_area", NON_NEGATIVE);
        let schedule = obj.required("schedule", Any);
        let target_temperature = obj.or_default("target_temperature", 60.0, Any);
        let sensible_fraction = obj.or_default("sensible_fraction", 0.2, Range::UNIT);
        let latent_fraction = obj.or_default("latent_fraction", 0.05, Range::UNIT);
        Ok(Self {
            flow_per_area: flow_per_area?,
            schedule: schedule?,
            target_temperature: target_temperature?,
            sensible_fraction: sensible_fraction?,
            latent_fraction: latent_fraction?,
        })
    }
}

load_pair!(
    /// Hot water use with its schedule referenced by identifier.
    ServiceHotWaterAbridged,
    /// Hot water use with its schedule inline.
    ServiceHotWater,
    ServiceHotWaterFields
);

/// Outdoor air leakage through the envelope.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InfiltrationFields<S> {
    /// m3/s per m2 of exterior surface area.
    pub flow_per_exterior_area: f64,
    pub schedule: S,
    pub constant_coefficient: f64,
    pub temperature_coefficient: f64,
    pub velocity_coefficient: f64,
}

impl<S: Decode> LoadFields for InfiltrationFields<S> {
    fn read(obj: &mut ObjectReader<'_, '_>) -> Decoded<Self> {
        let flow_per_exterior_area = obj.required("flow_per_exterior_area", NON_NEGATIVE);
        let schedule = obj.required("schedule", Any);
        let constant_coefficient = obj.or_default("constant_coefficient", 1.0, NON_NEGATIVE);
        let temperature_coefficient = obj.or_default("temperature_coefficient", 0.0, NON_NEGATIVE);
        let velocity_coefficient = obj.or_default("velocity_coefficient", 0.0, NON_NEGATIVE);
        Ok(Self {
            flow_per_exterior_area: flow_per_exterior_area?,
            schedule: schedule?,
            constant_coefficient: constant_coefficient?,
            temperature_coefficient: temperature_coefficient?,
            velocity_coefficient: velocity_coefficient?,
        })
    }
}

load_pair!(
    /// Infiltration with its schedule referenced by identifier.
    InfiltrationAbridged,
    /// Infiltration with its schedule inline.
    Infiltration,
    InfiltrationFields
);

/// Minimum outdoor air requirement. The four criteria are summed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VentilationFields<S> {
    pub flow_per_person: f64,
    pub flow_per_area: f64,
    pub air_changes_per_hour: f64,
    pub flow_per_zone: f64,
    pub schedule: Option<S>,
}

impl<S: Decode> LoadFields for VentilationFields<S> {
    fn read(obj: &mut ObjectReader<'_, '_>) -> Decoded<Self> {
        let flow_per_person = obj.or_default("flow_per_person", 0.0, NON_NEGATIVE);
        let flow_per_area = obj.or_default("flow_per_area", 0.0, NON_NEGATIVE);
        let air_changes_per_hour = obj.or_default("air_changes_per_hour", 0.0, NON_NEGATIVE);
        let flow_per_zone = obj.or_default("flow_per_zone", 0.0, NON_NEGATIVE);
        let schedule = obj.optional("schedule", Any);
        Ok(Self {
            flow_per_person: flow_per_person?,
            flow_per_area: flow_per_area?,
            air_changes_per_hour: air_changes_per_hour?,
            flow_per_zone: flow_per_zone?,
            schedule: schedule?,
        })
    }
}

load_pair!(
    /// Ventilation with its schedule referenced by identifier.
    VentilationAbridged,
    /// Ventilation with its schedule inline.
    Ventilation,
    VentilationFields
);

/// Thermostat and humidistat schedules.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SetpointFields<S> {
    pub cooling_schedule: S,
    pub heating_schedule: S,
    pub humidifying_schedule: Option<S>,
    pub dehumidifying_schedule: Option<S>,
    /// Dead band in degrees C between heating and cooling.
    pub setpoint_cutout_difference: f64,
}

impl<S: Decode> LoadFields for SetpointFields<S> {
    fn read(obj: &mut ObjectReader<'_, '_>) -> Decoded<Self> {
        let cooling_schedule = obj.required("cooling_schedule", Any);
        let heating_schedule = obj.required("heating_schedule", Any);
        let humidifying_schedule = obj.optional("humidifying_schedule", Any);
        let dehumidifying_schedule = obj.optional("dehumidifying_schedule", Any);
        let setpoint_cutout_difference = obj.or_default("setpoint_cutout_difference", 0.0, NON_NEGATIVE);
        Ok(Self {
            cooling_schedule: cooling_schedule?,
            heating_schedule: heating_schedule?,
            humidifying_schedule: humidifying_schedule?,
            dehumidifying_schedule: dehumidifying_schedule?,
            setpoint_cutout_difference: setpoint_cutout_difference?,
        })
    }
}

load_pair!(
    /// Setpoints with schedules referenced by identifier.
    SetpointAbridged,
    /// Setpoints with schedules inline.
    Setpoint,
    SetpointFields
);

hbs_core::string_enum! {
    /// Fuel consumed by a process load.
    pub enum FuelTypes {
        Electricity => "Electricity",
        NaturalGas => "NaturalGas",
        Propane => "Propane",
        FuelOilNo1 => "FuelOilNo1",
        FuelOilNo2 => "FuelOilNo2",
        Diesel => "Diesel",
        Gasoline => "Gasoline",
        Coal => "Coal",
        Steam => "Steam",
        DistrictHeating => "DistrictHeating",
        DistrictCooling => "DistrictCooling",
        OtherFuel1 => "OtherFuel1",
        OtherFuel2 => "OtherFuel2",
        None => "None",
    }
}

/// A single process load such as a kiln or a fireplace.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct ProcessAbridged {
    #[serde(flatten)]
    pub identity: EnergyIdentity,
    pub watts: f64,
    pub schedule: Identifier,
    pub fuel_type: FuelTypes,
    /// Free label used to group the load in end-use reports.
    pub end_use_category: String,
    pub radiant_fraction: f64,
    pub latent_fraction: f64,
    pub lost_fraction: f64,
}

hbs_core::entity!(ProcessAbridged);

impl Decode for ProcessAbridged {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::open(value, Self::TYPE, cx)?;
        let identity = EnergyIdentity::read(&mut obj);
        let watts = obj.required("watts", NON_NEGATIVE);
        let schedule = obj.required("schedule", Any);
        let fuel_type = obj.required("fuel_type", Any);
        let end_use_category = obj.or_else("end_use_category", || "Process".to_string(), Length::IDENTIFIER);
        let radiant_fraction = obj.or_default("radiant_fraction", 0.0, Range::UNIT);
        let latent_fraction = obj.or_default("latent_fraction", 0.0, Range::UNIT);
        let lost_fraction = obj.or_default("lost_fraction", 0.0, Range::UNIT);
        obj.finish()?;
        Ok(Self {
            identity: identity?,
            watts: watts?,
            schedule: schedule?,
            fuel_type: fuel_type?,
            end_use_category: end_use_category?,
            radiant_fraction: radiant_fraction?,
            latent_fraction: latent_fraction?,
            lost_fraction: lost_fraction?,
        })
    }
}

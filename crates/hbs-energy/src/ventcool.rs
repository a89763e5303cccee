//! # Ventilative Cooling
//!
//! Window opening control, operable openings, fans, surface cracks, and the
//! model-wide airflow network settings.

use hbs_core::{Any, Context, Decode, Decoded, EnergyIdentity, Entity, Identifier, ObjectReader, Range};
use serde::Serialize;
use serde_json::Value;

/// Temperatures in Celsius accepted by the opening control.
const CONTROL_TEMPERATURE: Range = Range::closed(-100.0, 100.0);
/// Leak geometry, from turbulent orifice (0.5) to laminar (1) flow.
const FLOW_EXPONENT: Range = Range::closed(0.5, 1.0);

hbs_core::string_enum! {
    /// How a fan moves air.
    pub enum VentilationType {
        Exhaust => "Exhaust",
        Intake => "Intake",
        Balanced => "Balanced",
    }
}

hbs_core::string_enum! {
    /// Airflow model used for ventilative cooling.
    pub enum VentilationControlType {
        SingleZone => "SingleZone",
        MultiZoneWithDistribution => "MultiZoneWithDistribution",
        MultiZoneWithoutDistribution => "MultiZoneWithoutDistribution",
    }
}

hbs_core::string_enum! {
    /// Building proportions used for wind pressure coefficients.
    pub enum BuildingType {
        LowRise => "LowRise",
        HighRise => "HighRise",
    }
}

/// Temperature limits within which windows or fans may operate.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct VentilationControlAbridged {
    pub min_indoor_temperature: f64,
    pub max_indoor_temperature: f64,
    pub min_outdoor_temperature: f64,
    pub max_outdoor_temperature: f64,
    /// Indoor minus outdoor difference below which ventilation stops.
    pub delta_temperature: f64,
    /// On/off availability applied on top of the limits.
    pub schedule: Option<Identifier>,
}

impl Default for VentilationControlAbridged {
    fn default() -> Self {
        Self {
            min_indoor_temperature: -100.0,
            max_indoor_temperature: 100.0,
            min_outdoor_temperature: -100.0,
            max_outdoor_temperature: 100.0,
            delta_temperature: -100.0,
            schedule: None,
        }
    }
}

hbs_core::entity!(VentilationControlAbridged);

impl Decode for VentilationControlAbridged {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::open(value, Self::TYPE, cx)?;
        let min_indoor_temperature = obj.or_default("min_indoor_temperature", -100.0, CONTROL_TEMPERATURE);
        let max_indoor_temperature = obj.or_default("max_indoor_temperature", 100.0, CONTROL_TEMPERATURE);
        let min_outdoor_temperature = obj.or_default("min_outdoor_temperature", -100.0, CONTROL_TEMPERATURE);
        let max_outdoor_temperature = obj.or_default("max_outdoor_temperature", 100.0, CONTROL_TEMPERATURE);
        let delta_temperature = obj.or_default("delta_temperature", -100.0, CONTROL_TEMPERATURE);
        let schedule = obj.optional("schedule", Any);
        obj.finish()?;
        Ok(Self {
            min_indoor_temperature: min_indoor_temperature?,
            max_indoor_temperature: max_indoor_temperature?,
            min_outdoor_temperature: min_outdoor_temperature?,
            max_outdoor_temperature: max_outdoor_temperature?,
            delta_temperature: delta_temperature?,
            schedule: schedule?,
        })
    }
}

/// A fan that circulates unconditioned outdoor air.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct VentilationFan {
    #[serde(flatten)]
    pub identity: EnergyIdentity,
    /// m3/s.
    pub flow_rate: f64,
    pub ventilation_type: VentilationType,
    /// Pa.
    pub pressure_rise: f64,
    pub efficiency: f64,
    pub control: Option<VentilationControlAbridged>,
}

hbs_core::entity!(VentilationFan);

impl Decode for VentilationFan {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::open(value, Self::TYPE, cx)?;
        let identity = EnergyIdentity::read(&mut obj);
        let flow_rate = obj.required("flow_rate", Range::gt(0.0));
        let ventilation_type = obj.or_default("ventilation_type", VentilationType::Balanced, Any);
        let pressure_rise = obj.required("pressure_rise", Range::gt(0.0));
        let efficiency = obj.required("efficiency", Range::UNIT);
        let control = obj.optional("control", Any);
        obj.finish()?;
        Ok(Self {
            identity: identity?,
            flow_rate: flow_rate?,
            ventilation_type: ventilation_type?,
            pressure_rise: pressure_rise?,
            efficiency: efficiency?,
            control: control?,
        })
    }
}

/// The operable portion of an aperture or door.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct VentilationOpening {
    pub fraction_area_operable: f64,
    pub fraction_height_operable: f64,
    pub discharge_coefficient: f64,
    pub wind_cross_vent: bool,
    /// kg/s-m at 1 Pa, used by the airflow network when closed.
    pub flow_coefficient_closed: f64,
    pub flow_exponent_closed: f64,
    /// kg/m3 density difference above which two-way flow may occur.
    pub two_way_threshold: f64,
}

impl Default for VentilationOpening {
    fn default() -> Self {
        Self {
            fraction_area_operable: 0.5,
            fraction_height_operable: 1.0,
            discharge_coefficient: 0.45,
            wind_cross_vent: false,
            flow_coefficient_closed: 0.0,
            flow_exponent_closed: 0.65,
            two_way_threshold: 0.0001,
        }
    }
}

hbs_core::entity!(VentilationOpening);

impl Decode for VentilationOpening {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::open(value, Self::TYPE, cx)?;
        let fraction_area_operable = obj.or_default("fraction_area_operable", 0.5, Range::UNIT);
        let fraction_height_operable = obj.or_default("fraction_height_operable", 1.0, Range::UNIT);
        let discharge_coefficient = obj.or_default("discharge_coefficient", 0.45, Range::UNIT);
        let wind_cross_vent = obj.or_default("wind_cross_vent", false, Any);
        let flow_coefficient_closed = obj.or_default("flow_coefficient_closed", 0.0, Range::ge(0.0));
        let flow_exponent_closed = obj.or_default("flow_exponent_closed", 0.65, FLOW_EXPONENT);
        let two_way_threshold = obj.or_default("two_way_threshold", 0.0001, Range::gt(0.0));
        obj.finish()?;
        Ok(Self {
            fraction_area_operable: fraction_area_operable?,
            fraction_height_operable: fraction_height_operable?,
            discharge_coefficient: discharge_coefficient?,
            wind_cross_vent: wind_cross_vent?,
            flow_coefficient_closed: flow_coefficient_closed?,
            flow_exponent_closed: flow_exponent_closed?,
            two_way_threshold: two_way_threshold?,
        })
    }
}

/// Airflow through a surface crack.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct AFNCrack {
    pub flow_coefficient: f64,
    pub flow_exponent: f64,
}

hbs_core::entity!(AFNCrack);

impl Decode for AFNCrack {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::open(value, Self::TYPE, cx)?;
        let flow_coefficient = obj.required("flow_coefficient", Range::gt(0.0));
        let flow_exponent = obj.or_default("flow_exponent", 0.65, FLOW_EXPONENT);
        obj.finish()?;
        Ok(Self {
            flow_coefficient: flow_coefficient?,
            flow_exponent: flow_exponent?,
        })
    }
}

/// Model-wide parameters of the ventilation simulation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct VentilationSimulationControl {
    pub vent_control_type: VentilationControlType,
    /// Celsius.
    pub reference_temperature: f64,
    /// Pa.
    pub reference_pressure: f64,
    pub reference_humidity_ratio: f64,
    pub building_type: BuildingType,
    /// Degrees clockwise from north.
    pub long_axis_angle: f64,
    pub aspect_ratio: f64,
}

hbs_core::entity!(VentilationSimulationControl);

impl Decode for VentilationSimulationControl {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::open(value, Self::TYPE, cx)?;
        let vent_control_type = obj.or_default("vent_control_type", VentilationControlType::SingleZone, Any);
        let reference_temperature = obj.or_default("reference_temperature", 20.0, Range::ge(-273.15));
        let reference_pressure = obj.or_default("reference_pressure", 101_325.0, Range::closed(31_000.0, 120_000.0));
        let reference_humidity_ratio = obj.or_default("reference_humidity_ratio", 0.0, Range::ge(0.0));
        let building_type = obj.or_default("building_type", BuildingType::LowRise, Any);
        let long_axis_angle = obj.or_default("long_axis_angle", 0.0, Range::closed(0.0, 180.0));
        let aspect_ratio = obj.or_default("aspect_ratio", 1.0, Range::gt(0.0).and_le(1.0));
        obj.finish()?;
        Ok(Self {
            vent_control_type: vent_control_type?,
            reference_temperature: reference_temperature?,
            reference_pressure: reference_pressure?,
            reference_humidity_ratio: reference_humidity_ratio?,
            building_type: building_type?,
            long_axis_angle: long_axis_angle?,
            aspect_ratio: aspect_ratio?,
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
    fn test_opening_defaults() {
        let opening = VentilationOpening::decode(&json!({"type": "VentilationOpening"})).unwrap();
        assert_eq!(opening, VentilationOpening::default());
    }

    #[test]
    fn test_opening_flow_exponent_closed_bounds() {
        let err = VentilationOpening::decode(&json!({"flow_exponent_closed": 0.3})).unwrap_err();
        let violation = err.violations.at("/flow_exponent_closed").unwrap();
        assert!(matches!(violation.kind, ViolationKind::ConstraintViolation { .. }));
        assert_eq!(violation.received, Some(json!(0.3)));

        for edge in [0.5, 1.0] {
            assert!(VentilationOpening::decode(&json!({"flow_exponent_closed": edge})).is_ok());
        }
    }

    #[test]
    fn test_control_detailed() {
        let control = VentilationControlAbridged::decode(&json!({
            "type": "VentilationControlAbridged",
            "min_indoor_temperature": 22,
            "max_indoor_temperature": 27,
            "min_outdoor_temperature": 12,
            "max_outdoor_temperature": 32,
            "delta_temperature": 0,
            "schedule": "Ventilation Schedule"
        }))
        .unwrap();
        assert_eq!(control.min_indoor_temperature, 22.0);
        assert_eq!(control.schedule.unwrap().as_str(), "Ventilation Schedule");
    }

    #[test]
    fn test_fan_requires_positive_flow() {
        let err = VentilationFan::decode(&json!({
            "identifier": "Kitchen Exhaust",
            "flow_rate": 0,
            "ventilation_type": "Exhaust",
            "pressure_rise": 200,
            "efficiency": 0.7
        }))
        .unwrap_err();
        assert_eq!(err.violations.len(), 1);
        assert!(err.violations.at("/flow_rate").is_some());
    }

    #[test]
    fn test_crack_requires_coefficient() {
        let err = AFNCrack::decode(&json!({"type": "AFNCrack"})).unwrap_err();
        assert_eq!(err.violations.at("/flow_coefficient").unwrap().kind, ViolationKind::MissingField);
        let crack = AFNCrack::decode(&json!({"flow_coefficient": 0.01})).unwrap();
        assert_eq!(crack.flow_exponent, 0.65);
    }

    #[test]
    fn test_simulation_control_enums_and_bounds() {
        let control = VentilationSimulationControl::decode(&json!({
            "vent_control_type": "MultiZoneWithoutDistribution",
            "building_type": "HighRise",
            "aspect_ratio": 0.5
        }))
        .unwrap();
        assert_eq!(control.building_type, BuildingType::HighRise);
        assert_eq!(control.reference_pressure, 101_325.0);

        let err = VentilationSimulationControl::decode(&json!({
            "vent_control_type": "MultiZone",
            "reference_pressure": 1000,
            "aspect_ratio": 0
        }))
        .unwrap_err();
        assert_eq!(err.violations.len(), 3);
    }
}

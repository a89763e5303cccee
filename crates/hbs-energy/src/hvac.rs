//! # HVAC Systems
//!
//! The ideal air system, and detailed systems carried as an opaque
//! specification object. Template systems (VAV, PSZ, DOAS, ...) are not
//! modeled.

use hbs_core::{
    Any, CapacityLimit, Context, Decode, Decoded, EnergyIdentity, Entity, Identifier, JsonObject,
    ObjectReader, Range,
};
use serde::Serialize;
use serde_json::Value;

hbs_core::string_enum! {
    /// Outdoor air economizer control.
    pub enum EconomizerType {
        NoEconomizer => "NoEconomizer",
        DifferentialDryBulb => "DifferentialDryBulb",
        DifferentialEnthalpy => "DifferentialEnthalpy",
    }
}

const NON_NEGATIVE: Range = Range::ge(0.0);

/// A system that meets the load exactly, with optional limits.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct IdealAirSystemAbridged {
    #[serde(flatten)]
    pub identity: EnergyIdentity,
    pub economizer_type: EconomizerType,
    pub demand_controlled_ventilation: bool,
    pub sensible_heat_recovery: f64,
    pub latent_heat_recovery: f64,
    /// Supply air temperature in Celsius, `(0, 100)`.
    pub heating_air_temperature: f64,
    /// Supply air temperature in Celsius, `(-100, 50)`.
    pub cooling_air_temperature: f64,
    pub heating_limit: CapacityLimit,
    pub cooling_limit: CapacityLimit,
    pub heating_availability: Option<Identifier>,
    pub cooling_availability: Option<Identifier>,
}

hbs_core::entity!(IdealAirSystemAbridged);

impl Decode for IdealAirSystemAbridged {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::open(value, Self::TYPE, cx)?;
        let identity = EnergyIdentity::read(&mut obj);
        let economizer_type = obj.or_default("economizer_type", EconomizerType::DifferentialDryBulb, Any);
        let demand_controlled_ventilation = obj.or_default("demand_controlled_ventilation", false, Any);
        let sensible_heat_recovery = obj.or_default("sensible_heat_recovery", 0.0, Range::UNIT);
        let latent_heat_recovery = obj.or_default("latent_heat_recovery", 0.0, Range::UNIT);
        let heating_air_temperature = obj.or_default("heating_air_temperature", 50.0, Range::gt(0.0).and_lt(100.0));
        let cooling_air_temperature = obj.or_default("cooling_air_temperature", 13.0, Range::gt(-100.0).and_lt(50.0));
        let heating_limit = obj.or_else("heating_limit", CapacityLimit::default, NON_NEGATIVE);
        let cooling_limit = obj.or_else("cooling_limit", CapacityLimit::default, NON_NEGATIVE);
        let heating_availability = obj.optional("heating_availability", Any);
        let cooling_availability = obj.optional("cooling_availability", Any);
        obj.finish()?;
        Ok(Self {
            identity: identity?,
            economizer_type: economizer_type?,
            demand_controlled_ventilation: demand_controlled_ventilation?,
            sensible_heat_recovery: sensible_heat_recovery?,
            latent_heat_recovery: latent_heat_recovery?,
            heating_air_temperature: heating_air_temperature?,
            cooling_air_temperature: cooling_air_temperature?,
            heating_limit: heating_limit?,
            cooling_limit: cooling_limit?,
            heating_availability: heating_availability?,
            cooling_availability: cooling_availability?,
        })
    }
}

/// A system described by an external tool. The specification is not
/// validated beyond being a JSON object.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct DetailedHVAC {
    #[serde(flatten)]
    pub identity: EnergyIdentity,
    pub specification: JsonObject,
}

hbs_core::entity!(DetailedHVAC);

impl Decode for DetailedHVAC {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::open(value, Self::TYPE, cx)?;
        let identity = EnergyIdentity::read(&mut obj);
        let specification = obj.required("specification", Any);
        obj.finish()?;
        Ok(Self {
            identity: identity?,
            specification: specification?,
        })
    }
}

hbs_core::one_of! {
    /// An HVAC system as listed on a model.
    pub enum Hvac {
        IdealAirSystemAbridged(IdealAirSystemAbridged),
        DetailedHVAC(DetailedHVAC),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hbs_core::{Autosize, NoLimit, ViolationKind};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_ideal_air_default() {
        let ideal = IdealAirSystemAbridged::decode(&json!({
            "type": "IdealAirSystemAbridged", "identifier": "Default HVAC"
        }))
        .unwrap();
        assert_eq!(ideal.economizer_type, EconomizerType::DifferentialDryBulb);
        assert_eq!(ideal.heating_limit, CapacityLimit::Autosize(Autosize {}));
        assert_eq!(ideal.heating_air_temperature, 50.0);
    }

    #[test]
    fn test_ideal_air_detailed() {
        let ideal = IdealAirSystemAbridged::decode(&json!({
            "identifier": "Detailed HVAC",
            "economizer_type": "DifferentialEnthalpy",
            "demand_controlled_ventilation": true,
            "sensible_heat_recovery": 0.75,
            "latent_heat_recovery": 0.65,
            "heating_limit": {"type": "NoLimit"},
            "cooling_limit": 25000,
            "heating_availability": "Heating Availability"
        }))
        .unwrap();
        assert_eq!(ideal.heating_limit, CapacityLimit::NoLimit(NoLimit {}));
        assert_eq!(ideal.cooling_limit, CapacityLimit::Value(25000.0));
    }

    #[test]
    fn test_ideal_air_exclusive_temperature_bounds() {
        let err = IdealAirSystemAbridged::decode(&json!({
            "identifier": "h", "heating_air_temperature": 100, "cooling_air_temperature": -100,
            "cooling_limit": -1
        }))
        .unwrap_err();
        assert_eq!(err.violations.len(), 3);
    }

    #[test]
    fn test_capacity_rejects_autocalculate() {
        let err = IdealAirSystemAbridged::decode(&json!({
            "identifier": "h", "heating_limit": {"type": "Autocalculate"}
        }))
        .unwrap_err();
        assert!(matches!(
            err.violations.at("/heating_limit/type").unwrap().kind,
            ViolationKind::UnrecognizedDiscriminator { .. }
        ));
    }

    #[test]
    fn test_detailed_specification_must_be_object() {
        let spec = json!({"identifier": "d", "specification": {"ThermalZones": ["Room_1"]}});
        let hvac = Hvac::decode_from(&json!({
            "type": "DetailedHVAC", "identifier": "d", "specification": spec["specification"]
        }))
        .unwrap();
        assert_eq!(hvac.type_name(), "DetailedHVAC");

        let err = DetailedHVAC::decode(&json!({"identifier": "d", "specification": [1]})).unwrap_err();
        assert!(matches!(
            err.violations.at("/specification").unwrap().kind,
            ViolationKind::TypeMismatch { expected: "object" }
        ));
    }
}

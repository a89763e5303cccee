//! # Program Types
//!
//! A named bundle of the loads and setpoints assigned to a space use.

use hbs_core::{Any, Context, Decode, Decoded, EnergyIdentity, Entity, ObjectReader};
use serde::Serialize;
use serde_json::Value;

use crate::load::{
    ElectricEquipment, ElectricEquipmentAbridged, GasEquipment, GasEquipmentAbridged,
    Infiltration, InfiltrationAbridged, Lighting, LightingAbridged, People, PeopleAbridged,
    ServiceHotWater, ServiceHotWaterAbridged, Setpoint, SetpointAbridged, Ventilation,
    VentilationAbridged,
};

/// The eight program loads, each optional. The type parameters pick the
/// abridged or full form of every load.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgramLoads<P, L, E, G, H, I, V, S> {
    pub people: Option<P>,
    pub lighting: Option<L>,
    pub electric_equipment: Option<E>,
    pub gas_equipment: Option<G>,
    pub service_hot_water: Option<H>,
    pub infiltration: Option<I>,
    pub ventilation: Option<V>,
    pub setpoint: Option<S>,
}

impl<P, L, E, G, H, I, V, S> ProgramLoads<P, L, E, G, H, I, V, S>
where
    P: Decode,
    L: Decode,
    E: Decode,
    G: Decode,
    H: Decode,
    I: Decode,
    V: Decode,
    S: Decode,
{
    fn read(obj: &mut ObjectReader<'_, '_>) -> Decoded<Self> {
        let people = obj.optional("people", Any);
        let lighting = obj.optional("lighting", Any);
        let electric_equipment = obj.optional("electric_equipment", Any);
        let gas_equipment = obj.optional("gas_equipment", Any);
        let service_hot_water = obj.optional("service_hot_water", Any);
        let infiltration = obj.optional("infiltration", Any);
        let ventilation = obj.optional("ventilation", Any);
        let setpoint = obj.optional("setpoint", Any);
        Ok(Self {
            people: people?,
            lighting: lighting?,
            electric_equipment: electric_equipment?,
            gas_equipment: gas_equipment?,
            service_hot_water: service_hot_water?,
            infiltration: infiltration?,
            ventilation: ventilation?,
            setpoint: setpoint?,
        })
    }
}

/// Loads of the abridged program type.
pub type AbridgedLoads = ProgramLoads<
    PeopleAbridged,
    LightingAbridged,
    ElectricEquipmentAbridged,
    GasEquipmentAbridged,
    ServiceHotWaterAbridged,
    InfiltrationAbridged,
    VentilationAbridged,
    SetpointAbridged,
>;

/// Loads of the full program type.
pub type FullLoads = ProgramLoads<
    People,
    Lighting,
    ElectricEquipment,
    GasEquipment,
    ServiceHotWater,
    Infiltration,
    Ventilation,
    Setpoint,
>;

/// Program with loads whose schedules are referenced by identifier.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct ProgramTypeAbridged {
    #[serde(flatten)]
    pub identity: EnergyIdentity,
    #[serde(flatten)]
    pub loads: AbridgedLoads,
}

hbs_core::entity!(ProgramTypeAbridged);

impl Decode for ProgramTypeAbridged {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::open(value, Self::TYPE, cx)?;
        let identity = EnergyIdentity::read(&mut obj);
        let loads = AbridgedLoads::read(&mut obj);
        obj.finish()?;
        Ok(Self {
            identity: identity?,
            loads: loads?,
        })
    }
}

/// Program with full loads and inline schedules.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct ProgramType {
    #[serde(flatten)]
    pub identity: EnergyIdentity,
    #[serde(flatten)]
    pub loads: FullLoads,
}

hbs_core::entity!(ProgramType);

impl Decode for ProgramType {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::open(value, Self::TYPE, cx)?;
        let identity = EnergyIdentity::read(&mut obj);
        let loads = FullLoads::read(&mut obj);
        obj.finish()?;
        Ok(Self {
            identity: identity?,
            loads: loads?,
        })
    }
}

hbs_core::one_of! {
    /// A program type in either form, as listed on a model.
    pub enum AnyProgramType {
        ProgramTypeAbridged(ProgramTypeAbridged),
        ProgramType(ProgramType),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hbs_core::ViolationKind;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn plenum() -> Value {
        json!({
            "type": "ProgramTypeAbridged",
            "identifier": "Plenum",
            "infiltration": {
                "type": "InfiltrationAbridged",
                "identifier": "Plenum Infiltration",
                "flow_per_exterior_area": 0.0002266,
                "schedule": "Always On"
            }
        })
    }

    #[test]
    fn test_plenum_program() {
        let program = ProgramTypeAbridged::decode(&plenum()).unwrap();
        assert!(program.loads.people.is_none());
        let infiltration = program.loads.infiltration.unwrap();
        assert_eq!(infiltration.load.constant_coefficient, 1.0);
    }

    #[test]
    fn test_full_program_rejects_abridged_load() {
        let mut doc = plenum();
        doc["type"] = json!("ProgramType");
        let err = ProgramType::decode(&doc).unwrap_err();
        let violation = err.violations.at("/infiltration/type").unwrap();
        assert!(matches!(violation.kind, ViolationKind::ConstraintViolation { .. }));
    }

    #[test]
    fn test_program_violations_are_collected_across_loads() {
        let err = ProgramTypeAbridged::decode(&json!({
            "identifier": "Bad",
            "people": {"identifier": "p", "people_per_area": -1, "occupancy_schedule": "o"},
            "lighting": {"identifier": "l", "watts_per_area": 5, "schedule": "s", "visible_fraction": 2},
            "comment": "x"
        }))
        .unwrap_err();
        let paths: Vec<&str> = err.violations.iter().map(|v| v.path.as_str()).collect();
        assert_eq!(paths, vec!["/people/people_per_area", "/lighting/visible_fraction", "/comment"]);
    }

    #[test]
    fn test_any_program_type_round_trip() {
        let program = AnyProgramType::decode_from(&plenum()).unwrap();
        let encoded = serde_json::to_value(&program).unwrap();
        assert_eq!(encoded["type"], json!("ProgramTypeAbridged"));
        assert_eq!(AnyProgramType::decode_from(&encoded).unwrap(), program);
    }
}

//! Service hot water systems.

use hbs_core::{
    Any, AutocalculateOr, Context, Decode, Decoded, EnergyIdentity, Entity, Identifier, ObjectReader, Range,
};
use serde::Serialize;
use serde_json::Value;

hbs_core::string_enum! {
    /// Water heater technology.
    pub enum SHWEquipmentType {
        GasWaterHeater => "Gas_WaterHeater",
        ElectricWaterHeater => "Electric_WaterHeater",
        HeatPumpWaterHeater => "HeatPump_WaterHeater",
        GasTanklessHeater => "Gas_TanklessHeater",
        ElectricTanklessHeater => "Electric_TanklessHeater",
    }
}

/// Where the heater sits: a fixed air temperature or a room.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AmbientCondition {
    /// Celsius.
    Temperature(f64),
    /// Identifier of the room that houses the heater.
    Room(Identifier),
}

impl Default for AmbientCondition {
    fn default() -> Self {
        Self::Temperature(22.0)
    }
}

impl Decode for AmbientCondition {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        if value.is_string() {
            Identifier::decode_value(value, cx).map(Self::Room)
        } else {
            f64::decode_value(value, cx).map(Self::Temperature)
        }
    }
}

/// A water heater serving the hot water loads of its rooms.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct SHWSystem {
    #[serde(flatten)]
    pub identity: EnergyIdentity,
    pub equipment_type: SHWEquipmentType,
    /// Efficiency, or COP for heat pumps.
    pub heater_efficiency: AutocalculateOr<f64>,
    pub ambient_condition: AmbientCondition,
    /// W/K lost to the ambient.
    pub ambient_loss_coefficient: f64,
}

hbs_core::entity!(SHWSystem);

impl Decode for SHWSystem {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::open(value, Self::TYPE, cx)?;
        let identity = EnergyIdentity::read(&mut obj);
        let equipment_type = obj.or_default("equipment_type", SHWEquipmentType::GasWaterHeater, Any);
        let heater_efficiency = obj.or_else("heater_efficiency", AutocalculateOr::default, Range::gt(0.0));
        let ambient_condition = obj.or_else("ambient_condition", AmbientCondition::default, Any);
        let ambient_loss_coefficient = obj.or_default("ambient_loss_coefficient", 6.0, Range::ge(0.0));
        obj.finish()?;
        Ok(Self {
            identity: identity?,
            equipment_type: equipment_type?,
            heater_efficiency: heater_efficiency?,
            ambient_condition: ambient_condition?,
            ambient_loss_coefficient: ambient_loss_coefficient?,
        })
    }
}

//! On-site generation: photovoltaic shades and the electric load center.

use hbs_core::{Any, Context, Decode, Decoded, EnergyIdentity, Entity, ObjectReader, Range};
use serde::Serialize;
use serde_json::Value;

hbs_core::string_enum! {
    /// Photovoltaic module technology.
    pub enum ModuleType {
        Standard => "Standard",
        Premium => "Premium",
        ThinFilm => "ThinFilm",
    }
}

hbs_core::string_enum! {
    /// How photovoltaic modules are mounted.
    pub enum MountingType {
        FixedOpenRack => "FixedOpenRack",
        FixedRoofMounted => "FixedRoofMounted",
        OneAxis => "OneAxis",
        OneAxisBacktracking => "OneAxisBacktracking",
        TwoAxis => "TwoAxis",
    }
}

/// Photovoltaic behavior of a shade.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct PVProperties {
    #[serde(flatten)]
    pub identity: EnergyIdentity,
    pub rated_efficiency: f64,
    pub active_area_fraction: f64,
    pub module_type: ModuleType,
    pub mounting_type: MountingType,
    /// Losses from wiring, soiling, mismatch and the like.
    pub system_loss_fraction: f64,
}

hbs_core::entity!(PVProperties);

impl Decode for PVProperties {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::open(value, Self::TYPE, cx)?;
        let identity = EnergyIdentity::read(&mut obj);
        let rated_efficiency = obj.or_default("rated_efficiency", 0.15, Range::gt(0.0).and_lt(1.0));
        let active_area_fraction = obj.or_default("active_area_fraction", 0.9, Range::gt(0.0).and_le(1.0));
        let module_type = obj.or_default("module_type", ModuleType::Standard, Any);
        let mounting_type = obj.or_default("mounting_type", MountingType::FixedOpenRack, Any);
        let system_loss_fraction = obj.or_default("system_loss_fraction", 0.14, Range::ge(0.0).and_lt(1.0));
        obj.finish()?;
        Ok(Self {
            identity: identity?,
            rated_efficiency: rated_efficiency?,
            active_area_fraction: active_area_fraction?,
            module_type: module_type?,
            mounting_type: mounting_type?,
            system_loss_fraction: system_loss_fraction?,
        })
    }
}

/// Inverter settings shared by all generators of a model.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct ElectricLoadCenter {
    pub inverter_efficiency: f64,
    pub inverter_dc_to_ac_size_ratio: f64,
}

impl Default for ElectricLoadCenter {
    fn default() -> Self {
        Self {
            inverter_efficiency: 0.96,
            inverter_dc_to_ac_size_ratio: 1.1,
        }
    }
}

hbs_core::entity!(ElectricLoadCenter);

impl Decode for ElectricLoadCenter {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::open(value, Self::TYPE, cx)?;
        let inverter_efficiency = obj.or_default("inverter_efficiency", 0.96, Range::gt(0.0).and_le(1.0));
        let inverter_dc_to_ac_size_ratio = obj.or_default("inverter_dc_to_ac_size_ratio", 1.1, Range::gt(0.0));
        obj.finish()?;
        Ok(Self {
            inverter_efficiency: inverter_efficiency?,
            inverter_dc_to_ac_size_ratio: inverter_dc_to_ac_size_ratio?,
        })
    }
}

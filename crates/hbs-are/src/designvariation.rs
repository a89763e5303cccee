//! A design variation: one submitted version of the dwelling design.

use chrono::{DateTime, FixedOffset};
use hbs_core::{Any, Context, Decode, Decoded, ObjectReader, Range};
use serde::Serialize;
use serde_json::Value;

/// Heating and cooling load limits in MJ/m2.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HeatingCoolingLimit {
    pub heating_limit: Option<f64>,
    pub cooling_limit: Option<f64>,
}

impl Decode for HeatingCoolingLimit {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::record(value, cx)?;
        let heating_limit = obj.optional("heating_limit", Range::ge(0.0));
        let cooling_limit = obj.optional("cooling_limit", Range::ge(0.0));
        obj.finish()?;
        Ok(Self {
            heating_limit: heating_limit?,
            cooling_limit: cooling_limit?,
        })
    }
}

/// Site-level natural ventilation and fan information.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteVentilation {
    pub natural_ventilation_allowed: bool,
    pub ceiling_fan_count: i64,
}

impl Default for SiteVentilation {
    fn default() -> Self {
        Self {
            natural_ventilation_allowed: true,
            ceiling_fan_count: 0,
        }
    }
}

impl Decode for SiteVentilation {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::record(value, cx)?;
        let natural_ventilation_allowed = obj.or_default("natural_ventilation_allowed", true, Any);
        let ceiling_fan_count = obj.or_default("ceiling_fan_count", 0, Range::ge(0.0));
        obj.finish()?;
        Ok(Self {
            natural_ventilation_allowed: natural_ventilation_allowed?,
            ceiling_fan_count: ceiling_fan_count?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DesignVariation {
    pub name: Option<String>,
    pub description: Option<String>,
    pub submitted_date_time: DateTime<FixedOffset>,
    pub heating_cooling_limit: Option<HeatingCoolingLimit>,
    pub ventilation: Option<SiteVentilation>,
}

impl Decode for DesignVariation {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::record(value, cx)?;
        let name = obj.optional("name", Any);
        let description = obj.optional("description", Any);
        let submitted_date_time = obj.required("submitted_date_time", Any);
        let heating_cooling_limit = obj.optional("heating_cooling_limit", Any);
        let ventilation = obj.optional("ventilation", Any);
        obj.finish()?;
        Ok(Self {
            name: name?,
            description: description?,
            submitted_date_time: submitted_date_time?,
            heating_cooling_limit: heating_cooling_limit?,
            ventilation: ventilation?,
        })
    }
}

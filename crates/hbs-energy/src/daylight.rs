//! Daylight-responsive lighting control.

use hbs_core::{Any, Context, Decode, Decoded, Entity, ObjectReader, Point3D, Range};
use serde::Serialize;
use serde_json::Value;

const DIMMING_FLOOR: Range = Range::closed(0.0, 0.6);

/// Dims a room's lights from a single illuminance sensor.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct DaylightingControl {
    pub sensor_position: Point3D,
    /// lux.
    pub illuminance_setpoint: f64,
    /// Fraction of the room's lights that are dimmed.
    pub control_fraction: f64,
    pub min_power_input: f64,
    pub min_light_output: f64,
    pub off_at_minimum: bool,
}

hbs_core::entity!(DaylightingControl);

impl Decode for DaylightingControl {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::open(value, Self::TYPE, cx)?;
        let sensor_position = obj.required("sensor_position", Any);
        let illuminance_setpoint = obj.or_default("illuminance_setpoint", 300.0, Range::gt(0.0));
        let control_fraction = obj.or_default("control_fraction", 1.0, Range::UNIT);
        let min_power_input = obj.or_default("min_power_input", 0.3, DIMMING_FLOOR);
        let min_light_output = obj.or_default("min_light_output", 0.2, DIMMING_FLOOR);
        let off_at_minimum = obj.or_default("off_at_minimum", false, Any);
        obj.finish()?;
        Ok(Self {
            sensor_position: sensor_position?,
            illuminance_setpoint: illuminance_setpoint?,
            control_fraction: control_fraction?,
            min_power_input: min_power_input?,
            min_light_output: min_light_output?,
            off_at_minimum: off_at_minimum?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_sensor_position_is_three_numbers() {
        let control = DaylightingControl::decode(&json!({"sensor_position": [5, 5, 0.8]})).unwrap();
        assert_eq!(control.sensor_position, [5.0, 5.0, 0.8]);
        assert_eq!(control.illuminance_setpoint, 300.0);

        let err = DaylightingControl::decode(&json!({"sensor_position": [5, 5]})).unwrap_err();
        assert!(err.violations.at("/sensor_position").is_some());
    }

    #[test]
    fn test_dimming_floor() {
        let err = DaylightingControl::decode(&json!({
            "sensor_position": [0, 0, 0], "min_power_input": 0.7, "min_light_output": 0.61
        }))
        .unwrap_err();
        assert_eq!(err.violations.len(), 2);
    }
}

//! # Boundary Conditions
//!
//! What lies on the other side of a face. Used through the
//! [`BoundaryCondition`] slot, which dispatches on the `type` tag.

use serde::Serialize;
use serde_json::Value;

use crate::altnumber::AutocalculateOr;
use crate::constraint::{Any, Length, Range};
use crate::decode::{Context, Decode, Decoded, Entity, ObjectReader};
use crate::identity::Identifier;

/// Exposed to the outdoor environment.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct Outdoors {
    pub sun_exposure: bool,
    pub wind_exposure: bool,
    /// Fraction of the sky seen by the face, in `[0, 1]`.
    pub view_factor: AutocalculateOr<f64>,
}

impl Default for Outdoors {
    fn default() -> Self {
        Self {
            sun_exposure: true,
            wind_exposure: true,
            view_factor: AutocalculateOr::default(),
        }
    }
}

crate::entity!(Outdoors);

impl Decode for Outdoors {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::open(value, Self::TYPE, cx)?;
        let sun_exposure = obj.or_default("sun_exposure", true, Any);
        let wind_exposure = obj.or_default("wind_exposure", true, Any);
        let view_factor = obj.or_else("view_factor", AutocalculateOr::default, Range::UNIT);
        obj.finish()?;
        Ok(Self {
            sun_exposure: sun_exposure?,
            wind_exposure: wind_exposure?,
            view_factor: view_factor?,
        })
    }
}

/// Adjacent to another surface of the model.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct Surface {
    /// The adjacent face, then its room (and for sub-faces, the parent
    /// face before the room). Two or three references.
    pub boundary_condition_objects: Vec<Identifier>,
}

crate::entity!(Surface);

impl Decode for Surface {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::open(value, Self::TYPE, cx)?;
        let objects = obj.required("boundary_condition_objects", Length::between(2, 3));
        obj.finish()?;
        Ok(Self {
            boundary_condition_objects: objects?,
        })
    }
}

/// In contact with the ground.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "type")]
pub struct Ground {}

crate::entity!(Ground);

impl Decode for Ground {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        ObjectReader::open(value, Self::TYPE, cx)?.finish()?;
        Ok(Self {})
    }
}

/// No heat flow across the face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "type")]
pub struct Adiabatic {}

crate::entity!(Adiabatic);

impl Decode for Adiabatic {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        ObjectReader::open(value, Self::TYPE, cx)?.finish()?;
        Ok(Self {})
    }
}

/// A custom temperature or heat transfer coefficient on the other side.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct OtherSideTemperature {
    /// W/m2-K; zero means the temperature is applied directly.
    pub heat_transfer_coefficient: f64,
    /// Celsius, or autocalculated from the outdoor air.
    pub temperature: AutocalculateOr<f64>,
}

crate::entity!(OtherSideTemperature);

impl Decode for OtherSideTemperature {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::open(value, Self::TYPE, cx)?;
        let heat_transfer_coefficient = obj.or_default("heat_transfer_coefficient", 0.0, Range::ge(0.0));
        let temperature = obj.or_else("temperature", AutocalculateOr::default, Any);
        obj.finish()?;
        Ok(Self {
            heat_transfer_coefficient: heat_transfer_coefficient?,
            temperature: temperature?,
        })
    }
}

crate::one_of! {
    /// Any boundary condition.
    pub enum BoundaryCondition {
        Outdoors(Outdoors),
        Surface(Surface),
        Ground(Ground),
        Adiabatic(Adiabatic),
        OtherSideTemperature(OtherSideTemperature),
    }
}

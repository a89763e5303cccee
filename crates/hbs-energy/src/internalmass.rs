//! Thermal mass exposed to room air.

use hbs_core::{Any, Context, Decode, Decoded, EnergyIdentity, Entity, Identifier, ObjectReader, Range};
use serde::Serialize;
use serde_json::Value;

/// Furniture, partitions and other mass that exchanges heat with the air.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct InternalMassAbridged {
    #[serde(flatten)]
    pub identity: EnergyIdentity,
    /// An `OpaqueConstruction` identifier.
    pub construction: Identifier,
    /// m2.
    pub area: f64,
}

hbs_core::entity!(InternalMassAbridged);

impl Decode for InternalMassAbridged {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::open(value, Self::TYPE, cx)?;
        let identity = EnergyIdentity::read(&mut obj);
        let construction = obj.required("construction", Any);
        let area = obj.required("area", Range::gt(0.0));
        obj.finish()?;
        Ok(Self {
            identity: identity?,
            construction: construction?,
            area: area?,
        })
    }
}

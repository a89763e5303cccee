//! # Energy Constructions
//!
//! Layered opaque and window constructions in abridged form (material
//! layers referenced by identifier) and full form (materials inline), plus
//! shade and air boundary constructions.

use hbs_core::{
    Any, Context, Decode, Decoded, EnergyIdentifier, EnergyIdentity, Entity, Identifier, Length,
    ObjectReader, Range,
};
use serde::Serialize;
use serde_json::Value;

use crate::material::{OpaqueMaterial, WindowMaterial};
use crate::schedule::Schedule;

const OPAQUE_LAYERS: Length = Length::between(1, 10);
const WINDOW_LAYERS: Length = Length::between(1, 8);

/// Opaque construction with layers referenced by identifier, outside first.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct OpaqueConstructionAbridged {
    #[serde(flatten)]
    pub identity: EnergyIdentity,
    pub materials: Vec<Identifier>,
}

impl OpaqueConstructionAbridged {
    /// A construction from its layer identifiers.
    pub fn new(identifier: EnergyIdentifier, materials: Vec<Identifier>) -> Self {
        Self {
            identity: EnergyIdentity::new(identifier),
            materials,
        }
    }
}

hbs_core::entity!(OpaqueConstructionAbridged);

impl Decode for OpaqueConstructionAbridged {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::open(value, Self::TYPE, cx)?;
        let identity = EnergyIdentity::read(&mut obj);
        let materials = obj.required("materials", OPAQUE_LAYERS);
        obj.finish()?;
        Ok(Self {
            identity: identity?,
            materials: materials?,
        })
    }
}

/// Opaque construction with layers inline, outside first.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct OpaqueConstruction {
    #[serde(flatten)]
    pub identity: EnergyIdentity,
    pub materials: Vec<OpaqueMaterial>,
}

hbs_core::entity!(OpaqueConstruction);

impl Decode for OpaqueConstruction {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::open(value, Self::TYPE, cx)?;
        let identity = EnergyIdentity::read(&mut obj);
        let materials = obj.required("materials", OPAQUE_LAYERS);
        obj.finish()?;
        Ok(Self {
            identity: identity?,
            materials: materials?,
        })
    }
}

/// Window construction with layers referenced by identifier, outside first.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct WindowConstructionAbridged {
    #[serde(flatten)]
    pub identity: EnergyIdentity,
    pub materials: Vec<Identifier>,
}

hbs_core::entity!(WindowConstructionAbridged);

impl Decode for WindowConstructionAbridged {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::open(value, Self::TYPE, cx)?;
        let identity = EnergyIdentity::read(&mut obj);
        let materials = obj.required("materials", WINDOW_LAYERS);
        obj.finish()?;
        Ok(Self {
            identity: identity?,
            materials: materials?,
        })
    }
}

/// Window construction with layers inline, outside first.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct WindowConstruction {
    #[serde(flatten)]
    pub identity: EnergyIdentity,
    pub materials: Vec<WindowMaterial>,
}

hbs_core::entity!(WindowConstruction);

impl Decode for WindowConstruction {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::open(value, Self::TYPE, cx)?;
        let identity = EnergyIdentity::read(&mut obj);
        let materials = obj.required("materials", WINDOW_LAYERS);
        obj.finish()?;
        Ok(Self {
            identity: identity?,
            materials: materials?,
        })
    }
}

/// Reflectance of shades and context geometry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct ShadeConstruction {
    #[serde(flatten)]
    pub identity: EnergyIdentity,
    pub solar_reflectance: f64,
    pub visible_reflectance: f64,
    pub is_specular: bool,
}

hbs_core::entity!(ShadeConstruction);

impl Decode for ShadeConstruction {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::open(value, Self::TYPE, cx)?;
        let identity = EnergyIdentity::read(&mut obj);
        let solar_reflectance = obj.or_default("solar_reflectance", 0.2, Range::UNIT);
        let visible_reflectance = obj.or_default("visible_reflectance", 0.2, Range::UNIT);
        let is_specular = obj.or_default("is_specular", false, Any);
        obj.finish()?;
        Ok(Self {
            identity: identity?,
            solar_reflectance: solar_reflectance?,
            visible_reflectance: visible_reflectance?,
            is_specular: is_specular?,
        })
    }
}

/// Air mixing across an air boundary, shared by both forms.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AirMixing {
    /// m3/s per m2 of boundary area.
    pub air_mixing_per_area: f64,
}

impl AirMixing {
    fn read(obj: &mut ObjectReader<'_, '_>) -> Decoded<Self> {
        let air_mixing_per_area = obj.or_default("air_mixing_per_area", 0.1, Range::ge(0.0));
        Ok(Self {
            air_mixing_per_area: air_mixing_per_area?,
        })
    }
}

/// Air boundary with its mixing schedule referenced by identifier.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct AirBoundaryConstructionAbridged {
    #[serde(flatten)]
    pub identity: EnergyIdentity,
    #[serde(flatten)]
    pub mixing: AirMixing,
    pub air_mixing_schedule: Identifier,
}

hbs_core::entity!(AirBoundaryConstructionAbridged);

impl Decode for AirBoundaryConstructionAbridged {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::open(value, Self::TYPE, cx)?;
        let identity = EnergyIdentity::read(&mut obj);
        let mixing = AirMixing::read(&mut obj);
        let air_mixing_schedule = obj.required("air_mixing_schedule", Any);
        obj.finish()?;
        Ok(Self {
            identity: identity?,
            mixing: mixing?,
            air_mixing_schedule: air_mixing_schedule?,
        })
    }
}

/// Air boundary with its mixing schedule inline.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct AirBoundaryConstruction {
    #[serde(flatten)]
    pub identity: EnergyIdentity,
    #[serde(flatten)]
    pub mixing: AirMixing,
    pub air_mixing_schedule: Schedule,
}

hbs_core::entity!(AirBoundaryConstruction);

impl Decode for AirBoundaryConstruction {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::open(value, Self::TYPE, cx)?;
        let identity = EnergyIdentity::read(&mut obj);
        let mixing = AirMixing::read(&mut obj);
        let air_mixing_schedule = obj.required("air_mixing_schedule", Any);
        obj.finish()?;
        Ok(Self {
            identity: identity?,
            mixing: mixing?,
            air_mixing_schedule: air_mixing_schedule?,
        })
    }
}

hbs_core::one_of! {
    /// Full construction allowed in an air boundary slot.
    pub enum AirBoundarySlotConstruction {
        AirBoundaryConstruction(AirBoundaryConstruction),
        OpaqueConstruction(OpaqueConstruction),
    }
}

hbs_core::one_of! {
    /// Any construction in either form, as listed on a model.
    pub enum Construction {
        OpaqueConstructionAbridged(OpaqueConstructionAbridged),
        WindowConstructionAbridged(WindowConstructionAbridged),
        AirBoundaryConstructionAbridged(AirBoundaryConstructionAbridged),
        OpaqueConstruction(OpaqueConstruction),
        WindowConstruction(WindowConstruction),
        AirBoundaryConstruction(AirBoundaryConstruction),
        ShadeConstruction(ShadeConstruction),
    }
}

hbs_core::one_of! {
    /// Construction kinds referenced from the global construction set.
    pub enum ConstructionAbridged {
        OpaqueConstructionAbridged(OpaqueConstructionAbridged),
        WindowConstructionAbridged(WindowConstructionAbridged),
        ShadeConstruction(ShadeConstruction),
        AirBoundaryConstructionAbridged(AirBoundaryConstructionAbridged),
    }
}

impl ConstructionAbridged {
    /// Identifier of the contained construction.
    pub fn identifier(&self) -> &EnergyIdentifier {
        match self {
            Self::OpaqueConstructionAbridged(c) => &c.identity.identifier,
            Self::WindowConstructionAbridged(c) => &c.identity.identifier,
            Self::ShadeConstruction(c) => &c.identity.identifier,
            Self::AirBoundaryConstructionAbridged(c) => &c.identity.identifier,
        }
    }
}

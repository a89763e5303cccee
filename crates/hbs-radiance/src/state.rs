//! Dynamic states for shades, apertures and doors.

use hbs_core::{Any, Context, Decode, Decoded, Entity, Face3D, Identifier, ObjectReader, RadianceIdentity};
use serde::Serialize;
use serde_json::Value;

/// A planar geometry that only exists in some states.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct StateGeometryAbridged {
    #[serde(flatten)]
    pub identity: RadianceIdentity,
    pub modifier: Option<Identifier>,
    /// Modifier for direct sun studies and isolation studies.
    pub modifier_direct: Option<Identifier>,
    pub geometry: Face3D,
}

hbs_core::entity!(StateGeometryAbridged);

impl Decode for StateGeometryAbridged {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::open(value, Self::TYPE, cx)?;
        let identity = RadianceIdentity::read(&mut obj);
        let modifier = obj.optional("modifier", Any);
        let modifier_direct = obj.optional("modifier_direct", Any);
        let geometry = obj.required("geometry", Any);
        obj.finish()?;
        Ok(Self {
            identity: identity?,
            modifier: modifier?,
            modifier_direct: modifier_direct?,
            geometry: geometry?,
        })
    }
}

/// Fields shared by shade and sub-face states.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StateFields {
    pub modifier: Option<Identifier>,
    pub modifier_direct: Option<Identifier>,
    pub shades: Option<Vec<StateGeometryAbridged>>,
}

impl StateFields {
    fn read(obj: &mut ObjectReader<'_, '_>) -> Decoded<Self> {
        let modifier = obj.optional("modifier", Any);
        let modifier_direct = obj.optional("modifier_direct", Any);
        let shades = obj.optional("shades", Any);
        Ok(Self {
            modifier: modifier?,
            modifier_direct: modifier_direct?,
            shades: shades?,
        })
    }
}

/// One state of a dynamic shade.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct RadianceShadeStateAbridged {
    #[serde(flatten)]
    pub state: StateFields,
}

hbs_core::entity!(RadianceShadeStateAbridged);

impl Decode for RadianceShadeStateAbridged {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::open(value, Self::TYPE, cx)?;
        let state = StateFields::read(&mut obj);
        obj.finish()?;
        Ok(Self { state: state? })
    }
}

/// One state of a dynamic aperture or door.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct RadianceSubFaceStateAbridged {
    #[serde(flatten)]
    pub state: StateFields,
    /// View matrix geometry for three-phase studies.
    pub vmtx_geometry: Option<Face3D>,
    /// Daylight matrix geometry for three-phase studies.
    pub dmtx_geometry: Option<Face3D>,
}

hbs_core::entity!(RadianceSubFaceStateAbridged);

impl Decode for RadianceSubFaceStateAbridged {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::open(value, Self::TYPE, cx)?;
        let state = StateFields::read(&mut obj);
        let vmtx_geometry = obj.optional("vmtx_geometry", Any);
        let dmtx_geometry = obj.optional("dmtx_geometry", Any);
        obj.finish()?;
        Ok(Self {
            state: state?,
            vmtx_geometry: vmtx_geometry?,
            dmtx_geometry: dmtx_geometry?,
        })
    }
}

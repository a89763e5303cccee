//! # Radiance Assets
//!
//! Sensor grids and views: the measurement points and camera definitions a
//! study evaluates. Both may name the room they belong to and a light path
//! of aperture groups that reach them.

use hbs_core::{
    Any, Context, Decode, Decoded, Entity, Face3D, Mesh3D, ObjectReader, Point3D,
    RadianceIdentity, Range,
};
use serde::Serialize;
use serde_json::Value;

/// A single measurement point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct Sensor {
    pub pos: Point3D,
    /// Direction the sensor faces.
    pub dir: Point3D,
}

hbs_core::entity!(Sensor);

impl Decode for Sensor {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::open(value, Self::TYPE, cx)?;
        let pos = obj.required("pos", Any);
        let dir = obj.required("dir", Any);
        obj.finish()?;
        Ok(Self { pos: pos?, dir: dir? })
    }
}

/// Fields shared by sensor grids and views.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AssetLinks {
    pub room_identifier: Option<String>,
    /// Aperture group identifiers, one list per light path step.
    pub light_path: Option<Vec<Vec<String>>>,
    /// Group used to organize results.
    pub group_identifier: Option<String>,
}

impl AssetLinks {
    fn read(obj: &mut ObjectReader<'_, '_>) -> Decoded<Self> {
        let room_identifier = obj.optional("room_identifier", Any);
        let light_path = obj.optional("light_path", Any);
        let group_identifier = obj.optional("group_identifier", Any);
        Ok(Self {
            room_identifier: room_identifier?,
            light_path: light_path?,
            group_identifier: group_identifier?,
        })
    }
}

/// A named collection of sensors.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct SensorGrid {
    #[serde(flatten)]
    pub identity: RadianceIdentity,
    pub sensors: Vec<Sensor>,
    #[serde(flatten)]
    pub links: AssetLinks,
    /// Mesh whose face centers are the sensors.
    pub mesh: Option<Mesh3D>,
    /// Faces the grid was generated from.
    pub base_geometry: Option<Vec<Face3D>>,
}

hbs_core::entity!(SensorGrid);

impl Decode for SensorGrid {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::open(value, Self::TYPE, cx)?;
        let identity = RadianceIdentity::read(&mut obj);
        let sensors = obj.required("sensors", Any);
        let links = AssetLinks::read(&mut obj);
        let mesh = obj.optional("mesh", Any);
        let base_geometry = obj.optional("base_geometry", Any);
        obj.finish()?;
        Ok(Self {
            identity: identity?,
            sensors: sensors?,
            links: links?,
            mesh: mesh?,
            base_geometry: base_geometry?,
        })
    }
}

hbs_core::string_enum! {
    /// Radiance view projection.
    pub enum ViewType {
        /// Perspective.
        Perspective => "v",
        Hemispherical => "h",
        Parallel => "l",
        Cylindrical => "c",
        Angular => "a",
        Stereographic => "s",
    }
}

/// A camera for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct View {
    #[serde(flatten)]
    pub identity: RadianceIdentity,
    pub position: Point3D,
    pub direction: Point3D,
    pub up_vector: Point3D,
    pub view_type: ViewType,
    /// Horizontal view angle in degrees.
    pub h_size: f64,
    /// Vertical view angle in degrees.
    pub v_size: f64,
    pub shift: Option<f64>,
    pub lift: Option<f64>,
    pub fore_clip: Option<f64>,
    pub aft_clip: Option<f64>,
    #[serde(flatten)]
    pub links: AssetLinks,
}

hbs_core::entity!(View);

impl Decode for View {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::open(value, Self::TYPE, cx)?;
        let identity = RadianceIdentity::read(&mut obj);
        let position = obj.required("position", Any);
        let direction = obj.required("direction", Any);
        let up_vector = obj.required("up_vector", Any);
        let view_type = obj.or_default("view_type", ViewType::Perspective, Any);
        let h_size = obj.or_default("h_size", 60.0, Range::gt(0.0));
        let v_size = obj.or_default("v_size", 60.0, Range::gt(0.0));
        let shift = obj.optional("shift", Any);
        let lift = obj.optional("lift", Any);
        let fore_clip = obj.optional("fore_clip", Any);
        let aft_clip = obj.optional("aft_clip", Any);
        let links = AssetLinks::read(&mut obj);
        obj.finish()?;
        Ok(Self {
            identity: identity?,
            position: position?,
            direction: direction?,
            up_vector: up_vector?,
            view_type: view_type?,
            h_size: h_size?,
            v_size: v_size?,
            shift: shift?,
            lift: lift?,
            fore_clip: fore_clip?,
            aft_clip: aft_clip?,
            links: links?,
        })
    }
}

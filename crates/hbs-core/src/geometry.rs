//! Geometry primitives referenced by radiance states and sensor grids.

use serde::Serialize;
use serde_json::Value;

use crate::constraint::{Any, Each, Length, Range};
use crate::decode::{Context, Decode, Decoded, Entity, ObjectReader};

/// A point or vector in model coordinates.
pub type Point3D = [f64; 3];

/// An oriented plane.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct Plane {
    /// Normal vector.
    pub n: Point3D,
    /// Origin point.
    pub o: Point3D,
    /// X axis; derived from the normal when absent.
    pub x: Option<Point3D>,
}

crate::entity!(Plane);

impl Decode for Plane {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::open(value, Self::TYPE, cx)?;
        let n = obj.required("n", Any);
        let o = obj.required("o", Any);
        let x = obj.optional("x", Any);
        obj.finish()?;
        Ok(Self { n: n?, o: o?, x: x? })
    }
}

/// A planar face with an outer boundary and optional holes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct Face3D {
    /// Counter-clockwise vertices; at least three.
    pub boundary: Vec<Point3D>,
    /// Each hole has at least three vertices.
    pub holes: Option<Vec<Vec<Point3D>>>,
    pub plane: Option<Plane>,
}

impl Face3D {
    /// A face from its boundary only.
    pub fn from_boundary(boundary: Vec<Point3D>) -> Self {
        Self {
            boundary,
            holes: None,
            plane: None,
        }
    }
}

crate::entity!(Face3D);

impl Decode for Face3D {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::open(value, Self::TYPE, cx)?;
        let boundary = obj.required("boundary", Length::at_least(3));
        let holes = obj.optional("holes", Each(Length::at_least(3)));
        let plane = obj.optional("plane", Any);
        obj.finish()?;
        Ok(Self {
            boundary: boundary?,
            holes: holes?,
            plane: plane?,
        })
    }
}

/// A triangle and quad mesh, as used for sensor grid geometry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct Mesh3D {
    pub vertices: Vec<Point3D>,
    /// Vertex indices of each face; three or four per face.
    pub faces: Vec<Vec<i64>>,
}

crate::entity!(Mesh3D);

impl Decode for Mesh3D {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::open(value, Self::TYPE, cx)?;
        let vertices = obj.required("vertices", Length::at_least(3));
        let faces = obj.required("faces", (Length::at_least(1), Each((Length::between(3, 4), Each(Range::ge(0.0))))));
        obj.finish()?;
        Ok(Self {
            vertices: vertices?,
            faces: faces?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn square() -> Value {
        json!([[0, 0, 0], [1, 0, 0], [1, 1, 0], [0, 1, 0]])
    }

    #[test]
    fn test_mesh_face_arity() {
        let ok = Mesh3D::decode(&json!({"vertices": square(), "faces": [[0, 1, 2, 3]]}));
        assert!(ok.is_ok());
        let err = Mesh3D::decode(&json!({"vertices": square(), "faces": [[0, 1], [0, 1, -2]]})).unwrap_err();
        assert_eq!(err.violations.len(), 1);
        assert!(err.violations.at("/faces").is_some());
    }

    #[test]
    fn test_face_decodes() {
        let face = Face3D::decode(&json!({"type": "Face3D", "boundary": square()})).unwrap();
        assert_eq!(face.boundary.len(), 4);
        assert_eq!(face.boundary[2], [1.0, 1.0, 0.0]);
    }

    #[test]
    fn test_face_rejects_two_vertices() {
        let err = Face3D::decode(&json!({"boundary": [[0, 0, 0], [1, 0, 0]]})).unwrap_err();
        assert!(err.violations.at("/boundary").is_some());
    }

    #[test]
    fn test_point_needs_three_coordinates() {
        let err = Face3D::decode(&json!({"boundary": [[0, 0], [1, 0, 0], [1, 1, 0]]})).unwrap_err();
        assert!(err.violations.at("/boundary/0").is_some());
    }

    #[test]
    fn test_hole_too_small() {
        let err = Face3D::decode(&json!({"boundary": square(), "holes": [[[0, 0, 0]]]})).unwrap_err();
        assert!(err.violations.at("/holes").is_some());
    }

    #[test]
    fn test_plane_round_trip() {
        let plane = Plane { n: [0.0, 0.0, 1.0], o: [0.0; 3], x: Some([1.0, 0.0, 0.0]) };
        assert_eq!(Plane::decode(&plane.encode().unwrap()).unwrap(), plane);
    }
}

//! # ARE Material Library Rows
//!
//! ARE constructions refer to materials by integer index into a material
//! library published by the assessment service. [`LibraryMaterial`] is one
//! row of that library. It is not a schema entity: it has no `type` tag and
//! is read with plain serde from the service's PascalCase keys.

use serde::{Deserialize, Serialize};

/// One row of the ARE material library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LibraryMaterial {
    #[serde(rename = "Index")]
    pub index: i64,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Level_1_Name")]
    pub level1_name: String,
    #[serde(rename = "Level_2_Name")]
    pub level2_name: String,
    #[serde(rename = "Capacitance")]
    pub capacitance: i64,
    /// Thermal resistance for upward heat flow.
    #[serde(rename = "ResU")]
    pub res_u: f64,
    /// Thermal resistance for downward heat flow.
    #[serde(rename = "ResD")]
    pub res_d: f64,
    /// Whether a construction layer must state a thickness.
    #[serde(rename = "ThickReq")]
    pub thick_req: bool,
    #[serde(rename = "ThickFix")]
    pub thick_fix: bool,
    /// Thickness in millimetres.
    #[serde(rename = "Thickness")]
    pub thickness: i64,
    #[serde(rename = "Density")]
    pub density: f64,
    #[serde(rename = "Cp")]
    pub cp: f64,
    #[serde(rename = "Comment")]
    pub comment: String,
    #[serde(rename = "InsulationConductivity")]
    pub insulation_conductivity: f64,
    #[serde(rename = "AirGapE")]
    pub airgap_e: f64,
}

/// A parsed material library, in service order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaterialLibrary {
    materials: Vec<LibraryMaterial>,
}

impl MaterialLibrary {
    /// Parse the JSON array returned by the service.
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        let materials: Vec<LibraryMaterial> = serde_json::from_str(text)?;
        tracing::debug!(materials = materials.len(), "ARE material library parsed");
        Ok(Self { materials })
    }

    /// The material with the given index, if listed.
    pub fn get(&self, index: i64) -> Option<&LibraryMaterial> {
        self.materials.iter().find(|m| m.index == index)
    }

    /// Number of materials in the library.
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    /// Whether the library lists no materials.
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// Materials in library order.
    pub fn iter(&self) -> impl Iterator<Item = &LibraryMaterial> {
        self.materials.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn row(index: i64, name: &str) -> serde_json::Value {
        json!({
            "Index": index,
            "Name": name,
            "Level_1_Name": "Masonry",
            "Level_2_Name": "Brick",
            "Capacitance": 1,
            "ResU": 0.13,
            "ResD": 0.13,
            "ThickReq": true,
            "ThickFix": false,
            "Thickness": 110,
            "Density": 1900.0,
            "Cp": 800.0,
            "Comment": "",
            "InsulationConductivity": 0.0,
            "AirGapE": 0.9
        })
    }

    #[test]
    fn test_parse_and_lookup() {
        let text = json!([row(3, "Clay brick"), row(7, "Concrete block")]).to_string();
        let library = MaterialLibrary::parse(&text).unwrap();
        assert_eq!(library.len(), 2);
        let block = library.get(7).unwrap();
        assert_eq!(block.name, "Concrete block");
        assert_eq!(block.level1_name, "Masonry");
        assert!(library.get(4).is_none());
    }

    #[test]
    fn test_pascal_case_keys_round_trip() {
        let material: LibraryMaterial = serde_json::from_value(row(1, "Clay brick")).unwrap();
        assert_eq!(serde_json::to_value(&material).unwrap(), row(1, "Clay brick"));
    }

    #[test]
    fn test_missing_column_fails() {
        let mut value = row(1, "Clay brick");
        value.as_object_mut().unwrap().remove("ResU");
        assert!(serde_json::from_value::<LibraryMaterial>(value).is_err());
    }
}

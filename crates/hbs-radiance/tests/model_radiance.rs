//! Integration tests: radiance documents and modifier bounds.

use hbs_core::{Entity, ViolationKind};
use hbs_radiance::{global_modifier_set, Modifier, ModelRadianceProperties, Plastic};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde_json::{json, Value};

fn model_doc() -> Value {
    json!({
        "type": "ModelRadianceProperties",
        "modifiers": [
            {"type": "Plastic", "identifier": "white_0.80", "r_reflectance": 0.8, "g_reflectance": 0.8, "b_reflectance": 0.8},
            {"type": "Glass", "identifier": "clear_0.88", "r_transmissivity": 0.96, "g_transmissivity": 0.96, "b_transmissivity": 0.96}
        ],
        "modifier_sets": [{
            "type": "ModifierSetAbridged",
            "identifier": "Bright_Set",
            "wall_set": {"type": "WallModifierSetAbridged", "interior_modifier": "white_0.80"}
        }],
        "sensor_grids": [{
            "type": "SensorGrid",
            "identifier": "Grid_1",
            "sensors": [{"type": "Sensor", "pos": [0.5, 0.5, 0.8], "dir": [0, 0, 1]}],
            "mesh": {
                "type": "Mesh3D",
                "vertices": [[0, 0, 0.8], [1, 0, 0.8], [1, 1, 0.8], [0, 1, 0.8]],
                "faces": [[0, 1, 2, 3]]
            }
        }]
    })
}

#[test]
fn test_model_document_decodes_and_round_trips() {
    let props = ModelRadianceProperties::from_json(&model_doc().to_string()).unwrap();
    assert_eq!(&props.global_modifier_set, global_modifier_set());
    assert_eq!(props.modifiers.as_ref().unwrap().len(), 2);

    let encoded = props.encode().unwrap();
    assert_eq!(encoded["views"], Value::Null);
    assert_eq!(ModelRadianceProperties::decode(&encoded).unwrap(), props);
}

#[test]
fn test_every_violation_in_one_pass() {
    let mut doc = model_doc();
    doc["modifiers"][0]["r_reflectance"] = json!(1.2);
    doc["modifiers"][1]["type"] = json!("BSDF");
    doc["sensor_grids"][0]["identifier"] = json!("Grid 1");
    doc["extra"] = json!(true);
    let err = ModelRadianceProperties::decode(&doc).unwrap_err();
    assert_eq!(err.violations.len(), 4);
    assert!(matches!(
        &err.violations.at("/modifiers/1/type").unwrap().kind,
        ViolationKind::UnrecognizedDiscriminator { received, .. } if received == "BSDF"
    ));
    assert!(matches!(err.violations.at("/extra").unwrap().kind, ViolationKind::UnexpectedField));
}

#[test]
fn test_default_library_modifiers_all_decode() {
    let library: Value = serde_json::from_str(hbs_standards::RADIANCE_DEFAULT).unwrap();
    for entry in library["modifiers"].as_array().unwrap() {
        Modifier::decode_from(entry).unwrap();
    }
}

proptest! {
    #[test]
    fn reflectance_unit_interval(r in -0.5f64..1.5) {
        let result = Plastic::decode(&json!({"identifier": "p", "r_reflectance": r}));
        prop_assert_eq!(result.is_ok(), (0.0..=1.0).contains(&r));
    }

    #[test]
    fn reflectance_bounds_are_inclusive(r in prop::sample::select(vec![0.0f64, 1.0])) {
        let ok = Plastic::decode(&json!({"identifier": "p", "specularity": r, "roughness": r})).is_ok();
        prop_assert!(ok);
    }
}

//! Integration tests: whole energy property documents and the default catalog.

use hbs_core::{Entity, ViolationKind};
use hbs_energy::load::People;
use hbs_energy::material::Material;
use hbs_energy::{
    global_construction_set, EnergyMaterial, AnyProgramType, ConstructionSet, ModelEnergyProperties, ProgramType,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde_json::{json, Value};

fn office_occupancy() -> Value {
    json!({
        "type": "ScheduleRuleset",
        "identifier": "Office Occupancy",
        "day_schedules": [
            {"type": "ScheduleDay", "identifier": "Office Occ Weekday", "values": [0, 1, 0], "times": [[0, 0], [9, 0], [17, 0]]},
            {"type": "ScheduleDay", "identifier": "Office Occ Off", "values": [0]}
        ],
        "default_day_schedule": "Office Occ Off",
        "schedule_rules": [{
            "type": "ScheduleRuleAbridged",
            "schedule_day": "Office Occ Weekday",
            "apply_monday": true, "apply_tuesday": true, "apply_wednesday": true,
            "apply_thursday": true, "apply_friday": true
        }],
        "schedule_type_limit": {"type": "ScheduleTypeLimit", "identifier": "Fraction", "lower_limit": 0, "upper_limit": 1}
    })
}

fn office_program() -> Value {
    json!({
        "type": "ProgramType",
        "identifier": "Generic Office",
        "people": {
            "type": "People",
            "identifier": "Office People",
            "people_per_area": 0.0565,
            "occupancy_schedule": office_occupancy()
        },
        "infiltration": {
            "type": "Infiltration",
            "identifier": "Office Infiltration",
            "flow_per_exterior_area": 0.0002,
            "schedule": {
                "type": "ScheduleFixedInterval",
                "identifier": "Always On",
                "values": vec![1.0; 24]
            }
        }
    })
}

#[test]
fn test_full_program_type_decodes() {
    let program = ProgramType::decode(&office_program()).unwrap();
    let people = program.loads.people.as_ref().unwrap();
    assert_eq!(people.load.radiant_fraction, 0.3);
    assert!(people.load.latent_fraction.is_autocalculate());
}

#[test]
fn test_full_program_type_survives_encoding() {
    let program = ProgramType::decode(&office_program()).unwrap();
    let encoded = program.encode().unwrap();
    assert_eq!(encoded["type"], json!("ProgramType"));
    assert_eq!(encoded["lighting"], Value::Null);
    assert_eq!(ProgramType::decode(&encoded).unwrap(), program);
}

#[test]
fn test_nested_violations_carry_full_pointer() {
    let mut doc = office_program();
    doc["people"]["occupancy_schedule"]["day_schedules"][1]["values"] = json!([]);
    doc["people"]["radiant_fraction"] = json!(1.5);
    let err = ProgramType::decode(&doc).unwrap_err();
    assert_eq!(err.violations.len(), 2);
    assert!(err
        .violations
        .at("/people/occupancy_schedule/day_schedules/1/values")
        .is_some());
    assert!(err.violations.at("/people/radiant_fraction").is_some());
}

#[test]
fn test_abridged_tag_rejected_in_full_slot() {
    let mut doc = office_program();
    doc["people"]["type"] = json!("PeopleAbridged");
    let err = ProgramType::decode(&doc).unwrap_err();
    assert!(matches!(
        &err.violations.at("/people/type").unwrap().kind,
        ViolationKind::ConstraintViolation { .. }
    ));
}

#[test]
fn test_model_properties_with_resources() {
    let props = ModelEnergyProperties::from_json(
        &json!({
            "type": "ModelEnergyProperties",
            "program_types": [office_program()],
            "construction_sets": [{
                "type": "ConstructionSet",
                "identifier": "Thin Walls",
                "wall_set": {
                    "type": "WallConstructionSet",
                    "exterior_construction": {
                        "type": "OpaqueConstruction",
                        "identifier": "Thin Wall",
                        "materials": [{"type": "EnergyMaterialNoMass", "identifier": "R1", "r_value": 1.0}]
                    }
                }
            }],
            "schedules": [office_occupancy()]
        })
        .to_string(),
    )
    .unwrap();
    assert!(matches!(props.program_types.as_deref(), Some([AnyProgramType::ProgramType(_)])));
    assert_eq!(props.schedules.unwrap().len(), 1);
    assert_eq!(&props.global_construction_set, global_construction_set());
}

#[test]
fn test_every_default_construction_set_entry_is_decodable() {
    let library: Value = serde_json::from_str(hbs_standards::ENERGY_DEFAULT).unwrap();
    for entry in library["construction_sets"].as_array().unwrap() {
        hbs_energy::ConstructionSetAbridged::decode(entry).unwrap();
    }
    assert!(ConstructionSet::decode(&json!({"identifier": "Empty"})).is_ok());
}

#[test]
fn test_serde_deserialize_matches_decode() {
    let doc = json!({
        "type": "EnergyMaterial",
        "identifier": "Concrete",
        "thickness": 0.2,
        "conductivity": 1.95,
        "density": 2240,
        "specific_heat": 900
    });
    let via_serde: EnergyMaterial = serde_json::from_value(doc.clone()).unwrap();
    assert_eq!(via_serde, EnergyMaterial::decode(&doc).unwrap());

    let text = via_serde.to_json().unwrap();
    let reread: EnergyMaterial = serde_json::from_str(&text).unwrap();
    assert_eq!(reread, via_serde);

    let slot: Material = serde_json::from_str(&text).unwrap();
    assert!(matches!(slot, Material::EnergyMaterial(_)));

    let program: ProgramType = serde_json::from_value(office_program()).unwrap();
    assert_eq!(program, ProgramType::decode(&office_program()).unwrap());
}

#[test]
fn test_serde_deserialize_rejects_like_decode() {
    let err = serde_json::from_value::<EnergyMaterial>(json!({
        "identifier": "Concrete",
        "thickness": -1,
        "conductivity": 1.95,
        "density": 2240,
        "specific_heat": 900,
        "colour": "grey"
    }))
    .unwrap_err();
    let message = err.to_string();
    assert!(message.contains("/thickness"), "{message}");
    assert!(message.contains("/colour: unexpected field"), "{message}");
}

proptest! {
    #[test]
    fn people_density_sign(density in -10.0f64..10.0) {
        let mut doc = office_program()["people"].clone();
        doc["people_per_area"] = json!(density);
        prop_assert_eq!(People::decode(&doc).is_ok(), density >= 0.0);
    }
}

//! Integration test: validate the fixture documents through the registry,
//! the same path the `hbs validate` command takes.

use std::path::PathBuf;

use hbs_core::ViolationKind;
use hbs_schema::{EntityRegistry, SchemaValidationError};
use pretty_assertions::assert_eq;

fn fixtures() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

#[test]
fn test_valid_json_and_yaml_fixtures() {
    let registry = EntityRegistry::new();
    for name in ["program_type.json", "program_type.yaml", "are_door.yml"] {
        registry
            .validate_file(&fixtures().join(name), None)
            .unwrap_or_else(|e| panic!("{name}: {e}"));
    }
}

#[test]
fn test_explicit_type_overrides_tag_lookup() {
    let registry = EntityRegistry::new();
    let err = registry
        .validate_file(&fixtures().join("program_type.json"), Some("ProgramType"))
        .unwrap_err();
    let violations = err.violations().unwrap();
    assert!(matches!(
        violations.at("/type").unwrap().kind,
        ViolationKind::ConstraintViolation { .. }
    ));
}

#[test]
fn test_invalid_fixture_reports_every_violation() {
    let err = EntityRegistry::new()
        .validate_file(&fixtures().join("bad_modifier.json"), None)
        .unwrap_err();
    let SchemaValidationError::ValidationFailed { entity, violations } = err else {
        panic!("expected a validation failure");
    };
    assert_eq!(entity, "Plastic");
    let mut paths: Vec<&str> = violations.iter().map(|v| v.path.as_str()).collect();
    paths.sort_unstable();
    assert_eq!(paths, vec!["/emissivity", "/identifier", "/r_reflectance"]);
}

#[test]
fn test_validate_fixture_directory() {
    let results = EntityRegistry::new().validate_dir(&fixtures(), None).unwrap();
    let summary: Vec<(String, bool)> = results
        .iter()
        .map(|(path, result)| {
            let name = path.file_name().unwrap().to_string_lossy().into_owned();
            (name, result.is_ok())
        })
        .collect();
    assert_eq!(
        summary,
        vec![
            ("are_door.yml".to_string(), true),
            ("bad_modifier.json".to_string(), false),
            ("program_type.json".to_string(), true),
            ("program_type.yaml".to_string(), true),
        ]
    );
}

#[test]
fn test_registry_lists_names_for_cli() {
    let names = EntityRegistry::new().type_names();
    assert!(names.len() > 100, "only {} entities registered", names.len());
    assert!(names.windows(2).all(|w| w[0] < w[1]));
}

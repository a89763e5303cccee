//! # hbs-standards — Bundled Reference Libraries
//!
//! The default energy and radiance libraries that seed the global
//! construction and modifier sets. The JSON text is compiled into the binary
//! so the catalogs need no filesystem access at runtime; the on-disk
//! locations are exposed for tooling that wants to read the files directly.
//!
//! Each library is a JSON object of named collections (`materials`,
//! `constructions`, `construction_sets` for energy; `modifiers`,
//! `modifier_sets` for radiance), each an array of tagged entity objects.

use std::path::PathBuf;

/// Name of the energy library, as used in diagnostics.
pub const ENERGY_LIBRARY: &str = "energy_default";

/// Name of the radiance library, as used in diagnostics.
pub const RADIANCE_LIBRARY: &str = "radiance_default";

/// JSON text of the default energy library.
pub const ENERGY_DEFAULT: &str = include_str!("../data/energy_default.json");

/// JSON text of the default radiance library.
pub const RADIANCE_DEFAULT: &str = include_str!("../data/radiance_default.json");

fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

/// Location of `energy_default.json` in the source tree.
pub fn energy_default_path() -> PathBuf {
    data_dir().join("energy_default.json")
}

/// Location of `radiance_default.json` in the source tree.
pub fn radiance_default_path() -> PathBuf {
    data_dir().join("radiance_default.json")
}

/// Parse the energy library.
pub fn energy_default() -> Result<serde_json::Value, serde_json::Error> {
    serde_json::from_str(ENERGY_DEFAULT)
}

/// Parse the radiance library.
pub fn radiance_default() -> Result<serde_json::Value, serde_json::Error> {
    serde_json::from_str(RADIANCE_DEFAULT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn identifiers(library: &serde_json::Value, collection: &str) -> Vec<String> {
        library[collection]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["identifier"].as_str().unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_energy_library_parses() {
        let lib = energy_default().unwrap();
        for collection in ["materials", "constructions", "construction_sets"] {
            assert!(lib[collection].is_array(), "{collection} missing");
        }
        assert!(identifiers(&lib, "construction_sets").contains(&"Default Generic Construction Set".to_string()));
    }

    #[test]
    fn test_radiance_library_parses() {
        let lib = radiance_default().unwrap();
        assert_eq!(
            identifiers(&lib, "modifier_sets"),
            vec!["Generic_Interior_Visible_Modifier_Set".to_string()]
        );
        assert!(identifiers(&lib, "modifiers").contains(&"air_boundary".to_string()));
    }

    #[test]
    fn test_paths_match_embedded_text() {
        assert_eq!(std::fs::read_to_string(energy_default_path()).unwrap(), ENERGY_DEFAULT);
        assert_eq!(std::fs::read_to_string(radiance_default_path()).unwrap(), RADIANCE_DEFAULT);
    }

    #[test]
    fn test_every_entry_is_tagged() {
        for lib in [energy_default().unwrap(), radiance_default().unwrap()] {
            for (_, collection) in lib.as_object().unwrap() {
                for entry in collection.as_array().unwrap() {
                    assert!(entry["type"].is_string(), "untagged entry: {entry}");
                }
            }
        }
    }
}

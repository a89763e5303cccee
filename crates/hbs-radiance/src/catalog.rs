//! # Radiance Default Catalog
//!
//! Builds the [`GlobalModifierSet`] from the bundled radiance library once
//! per process. Same contract as the energy catalog: library order, first
//! occurrence wins, and any missing or invalid entry is a cached fatal
//! error.

use hbs_core::{CatalogError, Identifier, Library};
use hbs_standards::{RADIANCE_DEFAULT, RADIANCE_LIBRARY};
use once_cell::sync::OnceCell;

use crate::global_modifierset::{GlobalModifier, GlobalModifierSet};
use crate::modifierset::ModifierSetAbridged;

/// Modifier set whose sub-sets seed the global set.
pub const DEFAULT_MODIFIER_SET: &str = "Generic_Interior_Visible_Modifier_Set";

/// Modifier of context shades in the global set.
pub const CONTEXT_MODIFIER: &str = "generic_context_0.20";

/// Modifiers carried by the global set.
pub const MODIFIER_NAMES: [&str; 10] = [
    "generic_wall_0.50",
    "generic_floor_0.20",
    "generic_ceiling_0.80",
    "generic_interior_window_vis_0.88",
    "generic_exterior_window_vis_0.64",
    "generic_opaque_door_0.50",
    "generic_interior_shade_0.50",
    "generic_exterior_shade_0.35",
    "generic_context_0.20",
    "air_boundary",
];

static RADIANCE: OnceCell<Result<GlobalModifierSet, CatalogError>> = OnceCell::new();

fn malformed(reason: String) -> CatalogError {
    CatalogError::MalformedDataset {
        library: RADIANCE_LIBRARY,
        reason,
    }
}

/// Build a global modifier set from radiance library text.
pub fn load_global_modifier_set(text: &str) -> Result<GlobalModifierSet, CatalogError> {
    let library = Library::parse(RADIANCE_LIBRARY, text)?;

    let entry = library.find("modifier_sets", DEFAULT_MODIFIER_SET)?;
    let set: ModifierSetAbridged = library.decode("modifier_sets", entry)?;

    let modifiers = library
        .select("modifiers", &MODIFIER_NAMES)?
        .into_iter()
        .map(|entry| library.decode::<GlobalModifier>("modifiers", entry))
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(
        library = RADIANCE_LIBRARY,
        modifiers = modifiers.len(),
        "radiance default catalog loaded"
    );

    let air_boundary_modifier = set
        .air_boundary_modifier
        .ok_or_else(|| malformed(format!("'{DEFAULT_MODIFIER_SET}' has no air_boundary_modifier")))?;
    let context_modifier = Identifier::new(CONTEXT_MODIFIER).map_err(malformed)?;

    Ok(GlobalModifierSet {
        modifiers,
        wall_set: set.wall_set.unwrap_or_default(),
        floor_set: set.floor_set.unwrap_or_default(),
        roof_ceiling_set: set.roof_ceiling_set.unwrap_or_default(),
        aperture_set: set.aperture_set.unwrap_or_default(),
        door_set: set.door_set.unwrap_or_default(),
        shade_set: set.shade_set.unwrap_or_default(),
        air_boundary_modifier,
        context_modifier,
    })
}

/// The process-wide default global modifier set, or why it could not be
/// built.
pub fn try_global_modifier_set() -> Result<&'static GlobalModifierSet, CatalogError> {
    RADIANCE
        .get_or_init(|| {
            let loaded = load_global_modifier_set(RADIANCE_DEFAULT);
            if let Err(e) = &loaded {
                tracing::error!(error = %e, "radiance default catalog is unusable");
            }
            loaded
        })
        .as_ref()
        .map_err(Clone::clone)
}

/// The process-wide default global modifier set.
///
/// # Panics
///
/// Panics if the bundled radiance library cannot be turned into a catalog.
pub fn global_modifier_set() -> &'static GlobalModifierSet {
    match try_global_modifier_set() {
        Ok(set) => set,
        Err(e) => panic!("radiance default catalog is unusable: {e}"),
    }
}

/// Build the catalog now rather than on first use.
pub fn init() -> Result<(), CatalogError> {
    try_global_modifier_set().map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    fn library_with(mutate: impl FnOnce(&mut Value)) -> String {
        let mut lib: Value = serde_json::from_str(RADIANCE_DEFAULT).unwrap();
        mutate(&mut lib);
        lib.to_string()
    }

    #[test]
    fn test_default_catalog_contents() {
        let set = global_modifier_set();
        let ids: Vec<&str> = set.modifiers.iter().map(GlobalModifier::identifier).collect();
        assert_eq!(ids, MODIFIER_NAMES.to_vec());
        assert_eq!(set.context_modifier.as_str(), CONTEXT_MODIFIER);
        assert_eq!(set.air_boundary_modifier.as_str(), "air_boundary");
        assert_eq!(
            set.aperture_set.modifiers.window_modifier.as_ref().unwrap().as_str(),
            "generic_exterior_window_vis_0.64"
        );
    }

    #[test]
    fn test_same_handle_on_every_call() {
        assert!(std::ptr::eq(global_modifier_set(), global_modifier_set()));
        assert!(init().is_ok());
    }

    #[test]
    fn test_missing_modifier_is_fatal() {
        let text = library_with(|lib| {
            lib["modifiers"]
                .as_array_mut()
                .unwrap()
                .retain(|m| m["identifier"] != json!("air_boundary"));
        });
        assert_eq!(
            load_global_modifier_set(&text).unwrap_err(),
            CatalogError::MissingEntry {
                library: RADIANCE_LIBRARY,
                collection: "modifiers",
                identifier: "air_boundary".into(),
            }
        );
    }

    #[test]
    fn test_unsupported_modifier_kind_is_fatal() {
        let text = library_with(|lib| {
            lib["modifiers"][0]["type"] = json!("Metal");
        });
        assert!(matches!(
            load_global_modifier_set(&text),
            Err(CatalogError::InvalidEntry { collection: "modifiers", .. })
        ));
    }

    #[test]
    fn test_missing_modifier_set_is_fatal() {
        let text = library_with(|lib| {
            lib["modifier_sets"] = json!([]);
        });
        assert!(matches!(
            load_global_modifier_set(&text),
            Err(CatalogError::MissingEntry { collection: "modifier_sets", .. })
        ));
    }
}

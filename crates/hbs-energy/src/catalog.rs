//! # Energy Default Catalog
//!
//! Builds the [`GlobalConstructionSet`] from the bundled energy library the
//! first time it is needed and keeps it for the rest of the process.
//!
//! Only the entries named below are taken from the library, in library
//! order. A missing or invalid entry makes the catalog unusable; the error
//! is cached and reported by [`try_global_construction_set`], while
//! [`global_construction_set`] treats it as fatal.

use hbs_core::{Identifier, Library};
use hbs_standards::{ENERGY_DEFAULT, ENERGY_LIBRARY};
use once_cell::sync::OnceCell;

pub use hbs_core::CatalogError;

use crate::construction::ConstructionAbridged;
use crate::constructionset::ConstructionSetAbridged;
use crate::global_constructionset::{GlobalConstructionSet, GlobalMaterial};

/// Construction set whose sub-sets seed the global set.
pub const DEFAULT_CONSTRUCTION_SET: &str = "Default Generic Construction Set";

/// Construction of context shades in the global set.
pub const CONTEXT_CONSTRUCTION: &str = "Generic Context";

/// Constructions carried by the global set.
pub const CONSTRUCTION_NAMES: [&str; 16] = [
    "Generic Exterior Wall",
    "Generic Interior Wall",
    "Generic Underground Wall",
    "Generic Exposed Floor",
    "Generic Interior Floor",
    "Generic Ground Slab",
    "Generic Roof",
    "Generic Interior Ceiling",
    "Generic Underground Roof",
    "Generic Double Pane",
    "Generic Single Pane",
    "Generic Exterior Door",
    "Generic Interior Door",
    "Generic Shade",
    "Generic Context",
    "Generic Air Boundary",
];

/// Materials carried by the global set.
pub const MATERIAL_NAMES: [&str; 15] = [
    "Generic 25mm Wood",
    "Generic Clear Glass",
    "Generic LW Concrete",
    "Generic Ceiling Air Gap",
    "Generic Acoustic Tile",
    "Generic Gypsum Board",
    "Generic Wall Air Gap",
    "Generic Painted Metal",
    "Generic 50mm Insulation",
    "Generic Roof Membrane",
    "Generic Brick",
    "Generic HW Concrete",
    "Generic Low-e Glass",
    "Generic Window Air Gap",
    "Generic 25mm Insulation",
];

static ENERGY: OnceCell<Result<GlobalConstructionSet, CatalogError>> = OnceCell::new();

/// Build a global construction set from energy library text.
pub fn load_global_construction_set(text: &str) -> Result<GlobalConstructionSet, CatalogError> {
    let library = Library::parse(ENERGY_LIBRARY, text)?;

    let entry = library.find("construction_sets", DEFAULT_CONSTRUCTION_SET)?;
    let set: ConstructionSetAbridged = library.decode("construction_sets", entry)?;

    let materials = library
        .select("materials", &MATERIAL_NAMES)?
        .into_iter()
        .map(|entry| library.decode::<GlobalMaterial>("materials", entry))
        .collect::<Result<Vec<_>, _>>()?;
    let constructions = library
        .select("constructions", &CONSTRUCTION_NAMES)?
        .into_iter()
        .map(|entry| library.decode::<ConstructionAbridged>("constructions", entry))
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(
        library = ENERGY_LIBRARY,
        materials = materials.len(),
        constructions = constructions.len(),
        "energy default catalog loaded"
    );

    let required = |field: &str, value: Option<Identifier>| {
        value.ok_or_else(|| CatalogError::MalformedDataset {
            library: ENERGY_LIBRARY,
            reason: format!("'{DEFAULT_CONSTRUCTION_SET}' has no {field}"),
        })
    };
    let context_construction = Identifier::new(CONTEXT_CONSTRUCTION).map_err(|reason| {
        CatalogError::MalformedDataset {
            library: ENERGY_LIBRARY,
            reason,
        }
    })?;

    Ok(GlobalConstructionSet {
        materials,
        constructions,
        wall_set: set.wall_set.unwrap_or_default(),
        floor_set: set.floor_set.unwrap_or_default(),
        roof_ceiling_set: set.roof_ceiling_set.unwrap_or_default(),
        aperture_set: set.aperture_set.unwrap_or_default(),
        door_set: set.door_set.unwrap_or_default(),
        shade_construction: required("shade_construction", set.shade_construction)?,
        context_construction,
        air_boundary_construction: required("air_boundary_construction", set.air_boundary_construction)?,
    })
}

/// The process-wide default global construction set, or why it could not
/// be built.
pub fn try_global_construction_set() -> Result<&'static GlobalConstructionSet, CatalogError> {
    ENERGY
        .get_or_init(|| {
            let loaded = load_global_construction_set(ENERGY_DEFAULT);
            if let Err(e) = &loaded {
                tracing::error!(error = %e, "energy default catalog is unusable");
            }
            loaded
        })
        .as_ref()
        .map_err(Clone::clone)
}

/// The process-wide default global construction set.
///
/// # Panics
///
/// Panics if the bundled energy library cannot be turned into a catalog.
/// The library ships with the crate, so this only happens on a broken
/// build; call [`init`] at startup to surface it as an error instead.
pub fn global_construction_set() -> &'static GlobalConstructionSet {
    match try_global_construction_set() {
        Ok(set) => set,
        Err(e) => panic!("energy default catalog is unusable: {e}"),
    }
}

/// Build the catalog now rather than on first use.
pub fn init() -> Result<(), CatalogError> {
    try_global_construction_set().map(|_| ())
}

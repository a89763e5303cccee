//! # Energy Materials
//!
//! Opaque layers (with mass, without mass, and green-roof vegetation) and
//! window layers (glazing, simple glazing system, gas gap).

use hbs_core::{
    Any, Context, Decode, Decoded, EnergyIdentifier, EnergyIdentity, Entity, ObjectReader, Range,
};
use serde::Serialize;
use serde_json::Value;

hbs_core::string_enum! {
    /// Surface roughness, used for exterior convection.
    pub enum Roughness {
        VeryRough => "VeryRough",
        Rough => "Rough",
        MediumRough => "MediumRough",
        MediumSmooth => "MediumSmooth",
        Smooth => "Smooth",
        VerySmooth => "VerySmooth",
    }
}

hbs_core::string_enum! {
    /// Soil moisture diffusion model of a vegetation layer.
    pub enum MoistureDiffusionModel {
        Simple => "Simple",
        Advanced => "Advanced",
    }
}

hbs_core::string_enum! {
    /// Fill gas of a window gap.
    pub enum GasType {
        Air => "Air",
        Argon => "Argon",
        Krypton => "Krypton",
        Xenon => "Xenon",
    }
}

/// Thermal emissivity of opaque surfaces: `(0, 0.99999]`.
const THERMAL_ABSORPTANCE: Range = Range::gt(0.0).and_le(0.99999);

/// An opaque layer with thermal mass.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct EnergyMaterial {
    #[serde(flatten)]
    pub identity: EnergyIdentity,
    /// Metres, in `(0, 3]`.
    pub thickness: f64,
    /// W/m-K.
    pub conductivity: f64,
    /// kg/m3.
    pub density: f64,
    /// J/kg-K, at least 100.
    pub specific_heat: f64,
    pub roughness: Roughness,
    pub thermal_absorptance: f64,
    pub solar_absorptance: f64,
    pub visible_absorptance: f64,
}

impl EnergyMaterial {
    /// A material with default roughness and absorptances.
    pub fn new(
        identifier: EnergyIdentifier,
        thickness: f64,
        conductivity: f64,
        density: f64,
        specific_heat: f64,
    ) -> Self {
        Self {
            identity: EnergyIdentity::new(identifier),
            thickness,
            conductivity,
            density,
            specific_heat,
            roughness: Roughness::MediumRough,
            thermal_absorptance: 0.9,
            solar_absorptance: 0.7,
            visible_absorptance: 0.7,
        }
    }
}

hbs_core::entity!(EnergyMaterial);

impl Decode for EnergyMaterial {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::open(value, Self::TYPE, cx)?;
        let identity = EnergyIdentity::read(&mut obj);
        let thickness = obj.required("thickness", Range::gt(0.0).and_le(3.0));
        let conductivity = obj.required("conductivity", Range::gt(0.0));
        let density = obj.required("density", Range::gt(0.0));
        let specific_heat = obj.required("specific_heat", Range::ge(100.0));
        let roughness = obj.or_default("roughness", Roughness::MediumRough, Any);
        let thermal_absorptance = obj.or_default("thermal_absorptance", 0.9, THERMAL_ABSORPTANCE);
        let solar_absorptance = obj.or_default("solar_absorptance", 0.7, Range::UNIT);
        let visible_absorptance = obj.or_default("visible_absorptance", 0.7, Range::UNIT);
        obj.finish()?;
        Ok(Self {
            identity: identity?,
            thickness: thickness?,
            conductivity: conductivity?,
            density: density?,
            specific_heat: specific_heat?,
            roughness: roughness?,
            thermal_absorptance: thermal_absorptance?,
            solar_absorptance: solar_absorptance?,
            visible_absorptance: visible_absorptance?,
        })
    }
}

/// An opaque layer described only by its thermal resistance.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct EnergyMaterialNoMass {
    #[serde(flatten)]
    pub identity: EnergyIdentity,
    /// m2-K/W, at least 0.001.
    pub r_value: f64,
    pub roughness: Roughness,
    pub thermal_absorptance: f64,
    pub solar_absorptance: f64,
    pub visible_absorptance: f64,
}

hbs_core::entity!(EnergyMaterialNoMass);

impl Decode for EnergyMaterialNoMass {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::open(value, Self::TYPE, cx)?;
        let identity = EnergyIdentity::read(&mut obj);
        let r_value = obj.required("r_value", Range::ge(0.001));
        let roughness = obj.or_default("roughness", Roughness::MediumRough, Any);
        let thermal_absorptance = obj.or_default("thermal_absorptance", 0.9, THERMAL_ABSORPTANCE);
        let solar_absorptance = obj.or_default("solar_absorptance", 0.7, Range::UNIT);
        let visible_absorptance = obj.or_default("visible_absorptance", 0.7, Range::UNIT);
        obj.finish()?;
        Ok(Self {
            identity: identity?,
            r_value: r_value?,
            roughness: roughness?,
            thermal_absorptance: thermal_absorptance?,
            solar_absorptance: solar_absorptance?,
            visible_absorptance: visible_absorptance?,
        })
    }
}

/// A green-roof soil layer with plants on top.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct EnergyMaterialVegetation {
    #[serde(flatten)]
    pub identity: EnergyIdentity,
    pub thickness: f64,
    pub conductivity: f64,
    pub density: f64,
    pub specific_heat: f64,
    pub roughness: Roughness,
    pub soil_thermal_absorptance: f64,
    pub soil_solar_absorptance: f64,
    pub soil_visible_absorptance: f64,
    /// Metres, in `[0.005, 1]`.
    pub plant_height: f64,
    pub leaf_area_index: f64,
    pub leaf_reflectivity: f64,
    pub leaf_emissivity: f64,
    /// s/m.
    pub min_stomatal_resist: f64,
    pub sat_vol_moist_cont: f64,
    pub residual_vol_moist_cont: f64,
    pub init_vol_moist_cont: f64,
    pub moist_diff_model: MoistureDiffusionModel,
}

hbs_core::entity!(EnergyMaterialVegetation);

impl Decode for EnergyMaterialVegetation {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::open(value, Self::TYPE, cx)?;
        let identity = EnergyIdentity::read(&mut obj);
        let thickness = obj.or_default("thickness", 0.1, Range::gt(0.0).and_le(3.0));
        let conductivity = obj.or_default("conductivity", 0.35, Range::gt(0.0));
        let density = obj.or_default("density", 1100.0, Range::gt(0.0));
        let specific_heat = obj.or_default("specific_heat", 1200.0, Range::ge(100.0));
        let roughness = obj.or_default("roughness", Roughness::MediumRough, Any);
        let soil_thermal_absorptance = obj.or_default("soil_thermal_absorptance", 0.9, THERMAL_ABSORPTANCE);
        let soil_solar_absorptance = obj.or_default("soil_solar_absorptance", 0.7, Range::UNIT);
        let soil_visible_absorptance = obj.or_default("soil_visible_absorptance", 0.7, Range::UNIT);
        let plant_height = obj.or_default("plant_height", 0.2, Range::closed(0.005, 1.0));
        let leaf_area_index = obj.or_default("leaf_area_index", 1.0, Range::closed(0.001, 5.0));
        let leaf_reflectivity = obj.or_default("leaf_reflectivity", 0.22, Range::closed(0.05, 0.5));
        let leaf_emissivity = obj.or_default("leaf_emissivity", 0.95, Range::closed(0.8, 1.0));
        let min_stomatal_resist = obj.or_default("min_stomatal_resist", 180.0, Range::closed(50.0, 300.0));
        let sat_vol_moist_cont = obj.or_default("sat_vol_moist_cont", 0.3, Range::closed(0.1, 0.5));
        let residual_vol_moist_cont = obj.or_default("residual_vol_moist_cont", 0.01, Range::closed(0.01, 0.1));
        let init_vol_moist_cont = obj.or_default("init_vol_moist_cont", 0.1, Range::gt(0.0).and_le(0.5));
        let moist_diff_model = obj.or_default("moist_diff_model", MoistureDiffusionModel::Simple, Any);
        obj.finish()?;
        Ok(Self {
            identity: identity?,
            thickness: thickness?,
            conductivity: conductivity?,
            density: density?,
            specific_heat: specific_heat?,
            roughness: roughness?,
            soil_thermal_absorptance: soil_thermal_absorptance?,
            soil_solar_absorptance: soil_solar_absorptance?,
            soil_visible_absorptance: soil_visible_absorptance?,
            plant_height: plant_height?,
            leaf_area_index: leaf_area_index?,
            leaf_reflectivity: leaf_reflectivity?,
            leaf_emissivity: leaf_emissivity?,
            min_stomatal_resist: min_stomatal_resist?,
            sat_vol_moist_cont: sat_vol_moist_cont?,
            residual_vol_moist_cont: residual_vol_moist_cont?,
            init_vol_moist_cont: init_vol_moist_cont?,
            moist_diff_model: moist_diff_model?,
        })
    }
}

/// A glass pane described by its optical and thermal properties.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct EnergyWindowMaterialGlazing {
    #[serde(flatten)]
    pub identity: EnergyIdentity,
    pub thickness: f64,
    pub solar_transmittance: f64,
    pub solar_reflectance: f64,
    /// Back-side value; the front value is used when absent.
    pub solar_reflectance_back: Option<f64>,
    pub visible_transmittance: f64,
    pub visible_reflectance: f64,
    pub visible_reflectance_back: Option<f64>,
    /// In `[0, 1)`.
    pub infrared_transmittance: f64,
    /// In `(0, 1)`.
    pub emissivity: f64,
    pub emissivity_back: f64,
    pub conductivity: f64,
    /// In `(0, 1]`.
    pub dirt_correction: f64,
    pub solar_diffusing: bool,
}

hbs_core::entity!(EnergyWindowMaterialGlazing);

impl Decode for EnergyWindowMaterialGlazing {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let open_unit = Range::gt(0.0).and_lt(1.0);
        let mut obj = ObjectReader::open(value, Self::TYPE, cx)?;
        let identity = EnergyIdentity::read(&mut obj);
        let thickness = obj.or_default("thickness", 0.003, Range::gt(0.0));
        let solar_transmittance = obj.or_default("solar_transmittance", 0.85, Range::UNIT);
        let solar_reflectance = obj.or_default("solar_reflectance", 0.075, Range::UNIT);
        let solar_reflectance_back = obj.optional("solar_reflectance_back", Range::UNIT);
        let visible_transmittance = obj.or_default("visible_transmittance", 0.9, Range::UNIT);
        let visible_reflectance = obj.or_default("visible_reflectance", 0.075, Range::UNIT);
        let visible_reflectance_back = obj.optional("visible_reflectance_back", Range::UNIT);
        let infrared_transmittance = obj.or_default("infrared_transmittance", 0.0, Range::ge(0.0).and_lt(1.0));
        let emissivity = obj.or_default("emissivity", 0.84, open_unit);
        let emissivity_back = obj.or_default("emissivity_back", 0.84, open_unit);
        let conductivity = obj.or_default("conductivity", 0.9, Range::gt(0.0));
        let dirt_correction = obj.or_default("dirt_correction", 1.0, Range::gt(0.0).and_le(1.0));
        let solar_diffusing = obj.or_default("solar_diffusing", false, Any);
        obj.finish()?;
        Ok(Self {
            identity: identity?,
            thickness: thickness?,
            solar_transmittance: solar_transmittance?,
            solar_reflectance: solar_reflectance?,
            solar_reflectance_back: solar_reflectance_back?,
            visible_transmittance: visible_transmittance?,
            visible_reflectance: visible_reflectance?,
            visible_reflectance_back: visible_reflectance_back?,
            infrared_transmittance: infrared_transmittance?,
            emissivity: emissivity?,
            emissivity_back: emissivity_back?,
            conductivity: conductivity?,
            dirt_correction: dirt_correction?,
            solar_diffusing: solar_diffusing?,
        })
    }
}

/// A whole window described by U-factor, SHGC and visible transmittance.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct EnergyWindowMaterialSimpleGlazSys {
    #[serde(flatten)]
    pub identity: EnergyIdentity,
    /// W/m2-K, in `(0, 5.8]`.
    pub u_factor: f64,
    /// In `(0, 1)`.
    pub shgc: f64,
    pub vt: f64,
}

hbs_core::entity!(EnergyWindowMaterialSimpleGlazSys);

impl Decode for EnergyWindowMaterialSimpleGlazSys {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::open(value, Self::TYPE, cx)?;
        let identity = EnergyIdentity::read(&mut obj);
        let u_factor = obj.required("u_factor", Range::gt(0.0).and_le(5.8));
        let shgc = obj.required("shgc", Range::gt(0.0).and_lt(1.0));
        let vt = obj.or_default("vt", 0.54, Range::UNIT);
        obj.finish()?;
        Ok(Self {
            identity: identity?,
            u_factor: u_factor?,
            shgc: shgc?,
            vt: vt?,
        })
    }
}

/// A gas gap between panes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct EnergyWindowMaterialGas {
    #[serde(flatten)]
    pub identity: EnergyIdentity,
    pub thickness: f64,
    pub gas_type: GasType,
}

hbs_core::entity!(EnergyWindowMaterialGas);

impl Decode for EnergyWindowMaterialGas {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::open(value, Self::TYPE, cx)?;
        let identity = EnergyIdentity::read(&mut obj);
        let thickness = obj.or_default("thickness", 0.0125, Range::gt(0.0));
        let gas_type = obj.or_default("gas_type", GasType::Air, Any);
        obj.finish()?;
        Ok(Self {
            identity: identity?,
            thickness: thickness?,
            gas_type: gas_type?,
        })
    }
}

hbs_core::one_of! {
    /// A layer of an opaque construction.
    pub enum OpaqueMaterial {
        EnergyMaterial(EnergyMaterial),
        EnergyMaterialNoMass(EnergyMaterialNoMass),
        EnergyMaterialVegetation(EnergyMaterialVegetation),
    }
}

hbs_core::one_of! {
    /// A layer of a window construction.
    pub enum WindowMaterial {
        EnergyWindowMaterialGlazing(EnergyWindowMaterialGlazing),
        EnergyWindowMaterialSimpleGlazSys(EnergyWindowMaterialSimpleGlazSys),
        EnergyWindowMaterialGas(EnergyWindowMaterialGas),
    }
}

hbs_core::one_of! {
    /// Any energy material.
    pub enum Material {
        EnergyMaterial(EnergyMaterial),
        EnergyMaterialNoMass(EnergyMaterialNoMass),
        EnergyMaterialVegetation(EnergyMaterialVegetation),
        EnergyWindowMaterialGlazing(EnergyWindowMaterialGlazing),
        EnergyWindowMaterialSimpleGlazSys(EnergyWindowMaterialSimpleGlazSys),
        EnergyWindowMaterialGas(EnergyWindowMaterialGas),
    }
}

impl Material {
    /// Identifier of the contained material.
    pub fn identifier(&self) -> &EnergyIdentifier {
        match self {
            Self::EnergyMaterial(m) => &m.identity.identifier,
            Self::EnergyMaterialNoMass(m) => &m.identity.identifier,
            Self::EnergyMaterialVegetation(m) => &m.identity.identifier,
            Self::EnergyWindowMaterialGlazing(m) => &m.identity.identifier,
            Self::EnergyWindowMaterialSimpleGlazSys(m) => &m.identity.identifier,
            Self::EnergyWindowMaterialGas(m) => &m.identity.identifier,
        }
    }
}

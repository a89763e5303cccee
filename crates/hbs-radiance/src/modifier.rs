//! # Modifiers
//!
//! Radiance primitives that describe how light interacts with a surface.
//! Every modifier except [`Void`] may be stacked on another `modifier` and
//! carry `dependencies` that must be written before it; both nest any
//! [`Modifier`] recursively.

use hbs_core::{Any, Context, Decode, Decoded, Entity, ObjectReader, RadianceIdentity, Range};
use serde::Serialize;
use serde_json::Value;

const NON_NEGATIVE: Range = Range::ge(0.0);

/// The fields every non-void modifier shares besides its identity.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ModifierBase {
    /// Modifier this one is applied on top of; `void` when absent.
    pub modifier: Option<Box<Modifier>>,
    pub dependencies: Option<Vec<Modifier>>,
}

impl ModifierBase {
    fn read(obj: &mut ObjectReader<'_, '_>) -> Decoded<Self> {
        let modifier = obj.optional("modifier", Any);
        let dependencies = obj.optional("dependencies", Any);
        Ok(Self {
            modifier: modifier?,
            dependencies: dependencies?,
        })
    }
}

/// Read an RGB triple stored as `r_<name>`, `g_<name>` and `b_<name>`.
fn read_rgb(
    obj: &mut ObjectReader<'_, '_>,
    keys: [&'static str; 3],
    default: f64,
    range: Range,
) -> Decoded<[f64; 3]> {
    let [r, g, b] = keys.map(|key| obj.or_default(key, default, range));
    Ok([r?, g?, b?])
}

const REFLECTANCE: [&str; 3] = ["r_reflectance", "g_reflectance", "b_reflectance"];
const TRANSMISSIVITY: [&str; 3] = ["r_transmissivity", "g_transmissivity", "b_transmissivity"];
const EMITTANCE: [&str; 3] = ["r_emittance", "g_emittance", "b_emittance"];

/// Diffuse and specular reflectance shared by plastic, metal and trans.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Reflectance {
    pub r_reflectance: f64,
    pub g_reflectance: f64,
    pub b_reflectance: f64,
    pub specularity: f64,
    pub roughness: f64,
}

impl Reflectance {
    fn read(obj: &mut ObjectReader<'_, '_>, specularity: f64) -> Decoded<Self> {
        let rgb = read_rgb(obj, REFLECTANCE, 0.0, Range::UNIT);
        let specularity = obj.or_default("specularity", specularity, Range::UNIT);
        let roughness = obj.or_default("roughness", 0.0, Range::UNIT);
        let [r_reflectance, g_reflectance, b_reflectance] = rgb?;
        Ok(Self {
            r_reflectance,
            g_reflectance,
            b_reflectance,
            specularity: specularity?,
            roughness: roughness?,
        })
    }

    /// Average of the three channel reflectances.
    pub fn average(&self) -> f64 {
        (self.r_reflectance + self.g_reflectance + self.b_reflectance) / 3.0
    }
}

/// Opaque diffuse material with an optional specular component.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct Plastic {
    #[serde(flatten)]
    pub identity: RadianceIdentity,
    #[serde(flatten)]
    pub base: ModifierBase,
    #[serde(flatten)]
    pub reflectance: Reflectance,
}

hbs_core::entity!(Plastic);

impl Decode for Plastic {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::open(value, Self::TYPE, cx)?;
        let identity = RadianceIdentity::read(&mut obj);
        let base = ModifierBase::read(&mut obj);
        let reflectance = Reflectance::read(&mut obj, 0.0);
        obj.finish()?;
        Ok(Self {
            identity: identity?,
            base: base?,
            reflectance: reflectance?,
        })
    }
}

/// Plastic whose highlights take the material color.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct Metal {
    #[serde(flatten)]
    pub identity: RadianceIdentity,
    #[serde(flatten)]
    pub base: ModifierBase,
    #[serde(flatten)]
    pub reflectance: Reflectance,
}

hbs_core::entity!(Metal);

impl Decode for Metal {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::open(value, Self::TYPE, cx)?;
        let identity = RadianceIdentity::read(&mut obj);
        let base = ModifierBase::read(&mut obj);
        let reflectance = Reflectance::read(&mut obj, 0.9);
        obj.finish()?;
        Ok(Self {
            identity: identity?,
            base: base?,
            reflectance: reflectance?,
        })
    }
}

/// Translucent material: plastic that also transmits light.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct Trans {
    #[serde(flatten)]
    pub identity: RadianceIdentity,
    #[serde(flatten)]
    pub base: ModifierBase,
    #[serde(flatten)]
    pub reflectance: Reflectance,
    /// Fraction of the non-reflected light that is transmitted diffusely.
    pub transmitted_diff: f64,
    /// Fraction of the transmitted light that passes specularly.
    pub transmitted_spec: f64,
}

hbs_core::entity!(Trans);

impl Decode for Trans {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::open(value, Self::TYPE, cx)?;
        let identity = RadianceIdentity::read(&mut obj);
        let base = ModifierBase::read(&mut obj);
        let reflectance = Reflectance::read(&mut obj, 0.0);
        let transmitted_diff = obj.or_default("transmitted_diff", 0.0, Range::UNIT);
        let transmitted_spec = obj.or_default("transmitted_spec", 0.0, Range::UNIT);
        obj.finish()?;
        Ok(Self {
            identity: identity?,
            base: base?,
            reflectance: reflectance?,
            transmitted_diff: transmitted_diff?,
            transmitted_spec: transmitted_spec?,
        })
    }
}

/// Thin glass pane.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct Glass {
    #[serde(flatten)]
    pub identity: RadianceIdentity,
    #[serde(flatten)]
    pub base: ModifierBase,
    pub r_transmissivity: f64,
    pub g_transmissivity: f64,
    pub b_transmissivity: f64,
    /// Radiance uses 1.52 when absent.
    pub refraction_index: Option<f64>,
}

hbs_core::entity!(Glass);

impl Decode for Glass {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::open(value, Self::TYPE, cx)?;
        let identity = RadianceIdentity::read(&mut obj);
        let base = ModifierBase::read(&mut obj);
        let rgb = read_rgb(&mut obj, TRANSMISSIVITY, 0.0, Range::UNIT);
        let refraction_index = obj.optional("refraction_index", Range::gt(0.0));
        obj.finish()?;
        let [r_transmissivity, g_transmissivity, b_transmissivity] = rgb?;
        Ok(Self {
            identity: identity?,
            base: base?,
            r_transmissivity,
            g_transmissivity,
            b_transmissivity,
            refraction_index: refraction_index?,
        })
    }
}

/// Perfect specular reflector, optionally seen as another material by
/// diffuse rays.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct Mirror {
    #[serde(flatten)]
    pub identity: RadianceIdentity,
    #[serde(flatten)]
    pub base: ModifierBase,
    pub r_reflectance: f64,
    pub g_reflectance: f64,
    pub b_reflectance: f64,
    pub alternate_material: Option<Box<Modifier>>,
}

hbs_core::entity!(Mirror);

impl Decode for Mirror {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::open(value, Self::TYPE, cx)?;
        let identity = RadianceIdentity::read(&mut obj);
        let base = ModifierBase::read(&mut obj);
        let rgb = read_rgb(&mut obj, REFLECTANCE, 1.0, Range::UNIT);
        let alternate_material = obj.optional("alternate_material", Any);
        obj.finish()?;
        let [r_reflectance, g_reflectance, b_reflectance] = rgb?;
        Ok(Self {
            identity: identity?,
            base: base?,
            r_reflectance,
            g_reflectance,
            b_reflectance,
            alternate_material: alternate_material?,
        })
    }
}

/// Self-luminous surface that does not act as a light source beyond
/// `max_radius`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct Glow {
    #[serde(flatten)]
    pub identity: RadianceIdentity,
    #[serde(flatten)]
    pub base: ModifierBase,
    pub r_emittance: f64,
    pub g_emittance: f64,
    pub b_emittance: f64,
    pub max_radius: f64,
}

hbs_core::entity!(Glow);

impl Decode for Glow {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::open(value, Self::TYPE, cx)?;
        let identity = RadianceIdentity::read(&mut obj);
        let base = ModifierBase::read(&mut obj);
        let rgb = read_rgb(&mut obj, EMITTANCE, 0.0, NON_NEGATIVE);
        let max_radius = obj.or_default("max_radius", 0.0, Any);
        obj.finish()?;
        let [r_emittance, g_emittance, b_emittance] = rgb?;
        Ok(Self {
            identity: identity?,
            base: base?,
            r_emittance,
            g_emittance,
            b_emittance,
            max_radius: max_radius?,
        })
    }
}

/// Light source.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct Light {
    #[serde(flatten)]
    pub identity: RadianceIdentity,
    #[serde(flatten)]
    pub base: ModifierBase,
    pub r_emittance: f64,
    pub g_emittance: f64,
    pub b_emittance: f64,
}

hbs_core::entity!(Light);

impl Decode for Light {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::open(value, Self::TYPE, cx)?;
        let identity = RadianceIdentity::read(&mut obj);
        let base = ModifierBase::read(&mut obj);
        let rgb = read_rgb(&mut obj, EMITTANCE, 0.0, NON_NEGATIVE);
        obj.finish()?;
        let [r_emittance, g_emittance, b_emittance] = rgb?;
        Ok(Self {
            identity: identity?,
            base: base?,
            r_emittance,
            g_emittance,
            b_emittance,
        })
    }
}

/// The empty modifier at the bottom of every stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "type")]
pub struct Void {}

hbs_core::entity!(Void);

impl Decode for Void {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        ObjectReader::open(value, Self::TYPE, cx)?.finish()?;
        Ok(Self {})
    }
}

hbs_core::one_of! {
    /// Any radiance modifier.
    pub enum Modifier {
        Plastic(Plastic),
        Glass(Glass),
        Trans(Trans),
        Metal(Metal),
        Mirror(Mirror),
        Glow(Glow),
        Light(Light),
        Void(Void),
    }
}

impl Modifier {
    /// Identifier of the contained modifier, `"void"` for [`Void`].
    pub fn identifier(&self) -> &str {
        match self {
            Self::Plastic(m) => m.identity.identifier.as_str(),
            Self::Glass(m) => m.identity.identifier.as_str(),
            Self::Trans(m) => m.identity.identifier.as_str(),
            Self::Metal(m) => m.identity.identifier.as_str(),
            Self::Mirror(m) => m.identity.identifier.as_str(),
            Self::Glow(m) => m.identity.identifier.as_str(),
            Self::Light(m) => m.identity.identifier.as_str(),
            Self::Void(_) => "void",
        }
    }
}

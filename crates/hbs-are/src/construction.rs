//! # ARE Constructions
//!
//! Opaque ARE constructions are stacks of library materials referenced by
//! index (see [`crate::material`]); glazed constructions are described by
//! their whole-unit performance. Each kind has an abridged form that only
//! names the full definition.

use hbs_core::{Any, Context, Decode, Decoded, Entity, Identifier, Length, ObjectReader, Range};
use serde::Serialize;
use serde_json::Value;

use crate::enums::ElementType;

/// One layer of an opaque construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConstructionLayer {
    /// Index of the material in the ARE material library.
    pub material: i64,
    /// Thickness in millimetres. Required by materials flagged `ThickReq`.
    pub thickness: Option<f64>,
}

impl Decode for ConstructionLayer {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::record(value, cx)?;
        let material = obj.required("material", Range::ge(0.0));
        let thickness = obj.optional("thickness", Range::gt(0.0));
        obj.finish()?;
        Ok(Self {
            material: material?,
            thickness: thickness?,
        })
    }
}

/// Fields shared by external and internal constructions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayeredFields {
    pub identifier: Identifier,
    pub display_name: Option<String>,
    pub element_type: ElementType,
    /// Layers from outside to inside.
    pub layers: Vec<ConstructionLayer>,
}

impl LayeredFields {
    fn read(obj: &mut ObjectReader<'_, '_>) -> Decoded<Self> {
        let identifier = obj.required("identifier", Any);
        let display_name = obj.optional("display_name", Any);
        let element_type = obj.required("element_type", Any);
        let layers = obj.required("layers", Length::at_least(1));
        Ok(Self {
            identifier: identifier?,
            display_name: display_name?,
            element_type: element_type?,
            layers: layers?,
        })
    }
}

/// Construction exposed to outdoor air.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct ExternalConstruction {
    #[serde(flatten)]
    pub fields: LayeredFields,
    pub solar_absorptance: f64,
}

hbs_core::entity!(ExternalConstruction);

impl Decode for ExternalConstruction {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::open(value, Self::TYPE, cx)?;
        let fields = LayeredFields::read(&mut obj);
        let solar_absorptance = obj.or_default("solar_absorptance", 0.5, Range::UNIT);
        obj.finish()?;
        Ok(Self {
            fields: fields?,
            solar_absorptance: solar_absorptance?,
        })
    }
}

/// Construction between two zones, or between a zone and a special zone.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct InternalConstruction {
    #[serde(flatten)]
    pub fields: LayeredFields,
}

hbs_core::entity!(InternalConstruction);

impl Decode for InternalConstruction {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::open(value, Self::TYPE, cx)?;
        let fields = LayeredFields::read(&mut obj);
        obj.finish()?;
        Ok(Self { fields: fields? })
    }
}

/// Window or glazed door unit.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct GlazedConstruction {
    pub identifier: Identifier,
    pub display_name: Option<String>,
    pub element_type: ElementType,
    /// Whole-unit U-value in W/m2-K.
    pub u_value: f64,
    /// Whole-unit solar heat gain coefficient.
    pub shgc: f64,
}

hbs_core::entity!(GlazedConstruction);

impl Decode for GlazedConstruction {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::open(value, Self::TYPE, cx)?;
        let identifier = obj.required("identifier", Any);
        let display_name = obj.optional("display_name", Any);
        let element_type = obj.required("element_type", Any);
        let u_value = obj.required("u_value", Range::gt(0.0));
        let shgc = obj.required("shgc", Range::UNIT);
        obj.finish()?;
        Ok(Self {
            identifier: identifier?,
            display_name: display_name?,
            element_type: element_type?,
            u_value: u_value?,
            shgc: shgc?,
        })
    }
}

macro_rules! abridged_construction {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Serialize)]
        #[serde(tag = "type")]
        pub struct $name {
            pub identifier: Identifier,
        }

        hbs_core::entity!($name);

        impl Decode for $name {
            fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
                let mut obj = ObjectReader::open(value, Self::TYPE, cx)?;
                let identifier = obj.required("identifier", Any);
                obj.finish()?;
                Ok(Self {
                    identifier: identifier?,
                })
            }
        }
    };
}

abridged_construction!(
    /// Names an [`ExternalConstruction`] defined elsewhere in the model.
    ExternalConstructionAbridged
);
abridged_construction!(
    /// Names an [`InternalConstruction`] defined elsewhere in the model.
    InternalConstructionAbridged
);
abridged_construction!(
    /// Names a [`GlazedConstruction`] defined elsewhere in the model.
    GlazedConstructionAbridged
);

hbs_core::one_of! {
    /// Any full ARE construction.
    pub enum AreConstruction {
        External(ExternalConstruction),
        Internal(InternalConstruction),
        Glazed(GlazedConstruction),
    }
}

impl AreConstruction {
    pub fn identifier(&self) -> &Identifier {
        match self {
            Self::External(c) => &c.fields.identifier,
            Self::Internal(c) => &c.fields.identifier,
            Self::Glazed(c) => &c.identifier,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hbs_core::ViolationKind;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn brick_veneer() -> Value {
        json!({
            "type": "ExternalConstruction",
            "identifier": "Brick Veneer R2.0",
            "element_type": "External Wall",
            "layers": [
                {"material": 12, "thickness": 110},
                {"material": 3},
                {"material": 41, "thickness": 10}
            ]
        })
    }

    #[test]
    fn test_external_defaults_absorptance() {
        let c = ExternalConstruction::decode(&brick_veneer()).unwrap();
        assert_eq!(c.solar_absorptance, 0.5);
        assert_eq!(c.fields.layers.len(), 3);
        assert_eq!(c.fields.layers[1].thickness, None);
        assert_eq!(c.fields.element_type, ElementType::ExternalWall);
    }

    #[test]
    fn test_layer_violations_point_into_list() {
        let mut doc = brick_veneer();
        doc["layers"][0]["thickness"] = json!(0);
        doc["layers"][2]["material"] = json!(-1);
        let err = ExternalConstruction::decode(&doc).unwrap_err();
        assert_eq!(err.violations.len(), 2);
        assert!(err.violations.at("/layers/0/thickness").is_some());
        assert!(err.violations.at("/layers/2/material").is_some());
    }

    #[test]
    fn test_empty_layers_rejected() {
        let err = InternalConstruction::decode(&json!({
            "identifier": "Plasterboard",
            "element_type": "Internal Wall",
            "layers": []
        }))
        .unwrap_err();
        assert!(matches!(
            err.violations.at("/layers").unwrap().kind,
            ViolationKind::ConstraintViolation { .. }
        ));
    }

    #[test]
    fn test_glazed_bounds() {
        let err = GlazedConstruction::decode(&json!({
            "identifier": "Single Clear",
            "element_type": "Window",
            "u_value": 0,
            "shgc": 1.1
        }))
        .unwrap_err();
        assert_eq!(err.violations.len(), 2);
    }

    #[test]
    fn test_dispatch_and_identifier() {
        let c = AreConstruction::decode_from(&brick_veneer()).unwrap();
        assert_eq!(c.identifier().as_str(), "Brick Veneer R2.0");
        let err = AreConstruction::decode_from(&json!({"type": "ExternalConstructionAbridged", "identifier": "x"}))
            .unwrap_err();
        assert!(matches!(
            err.violations.at("/type").unwrap().kind,
            ViolationKind::UnrecognizedDiscriminator { .. }
        ));
    }

    #[test]
    fn test_abridged_round_trip() {
        let c = GlazedConstructionAbridged::decode(&json!({"identifier": "Single Clear"})).unwrap();
        let encoded = c.encode().unwrap();
        assert_eq!(encoded, json!({"type": "GlazedConstructionAbridged", "identifier": "Single Clear"}));
        assert_eq!(GlazedConstructionAbridged::decode(&encoded).unwrap(), c);
    }
}

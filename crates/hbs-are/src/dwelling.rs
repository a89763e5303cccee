//! Site information about the assessed dwelling.

use hbs_core::{Any, Context, Decode, Decoded, ObjectReader, Range};
use serde::Serialize;
use serde_json::Value;

use crate::enums::{DwellingExposureType, DwellingType};

/// Street address. Every part is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Address {
    pub unit_number: Option<String>,
    pub street_number: Option<String>,
    pub street_name: Option<String>,
    pub lot_number: Option<String>,
    pub suburb: Option<String>,
    pub state: Option<String>,
    pub postcode: Option<String>,
}

impl Decode for Address {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::record(value, cx)?;
        let unit_number = obj.optional("unit_number", Any);
        let street_number = obj.optional("street_number", Any);
        let street_name = obj.optional("street_name", Any);
        let lot_number = obj.optional("lot_number", Any);
        let suburb = obj.optional("suburb", Any);
        let state = obj.optional("state", Any);
        let postcode = obj.optional("postcode", Any);
        obj.finish()?;
        Ok(Self {
            unit_number: unit_number?,
            street_number: street_number?,
            street_name: street_name?,
            lot_number: lot_number?,
            suburb: suburb?,
            state: state?,
            postcode: postcode?,
        })
    }
}

/// The dwelling (site) being assessed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dwelling {
    /// NatHERS climate zone number.
    pub climate_zone: i64,
    /// `0.2` when absent; `None` only when explicitly `null`.
    pub ground_reflectance: Option<f64>,
    pub council_submitted_to: Option<String>,
    pub dwelling_exposure_type: DwellingExposureType,
    pub dwelling_type: DwellingType,
    pub address: Option<Address>,
}

impl Decode for Dwelling {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::record(value, cx)?;
        let climate_zone = obj.required("climate_zone", Range::closed(1.0, 69.0));
        let ground_reflectance = obj.nullable_or("ground_reflectance", 0.2, Any);
        let council_submitted_to = obj.optional("council_submitted_to", Any);
        let dwelling_exposure_type = obj.required("dwelling_exposure_type", Any);
        let dwelling_type = obj.required("dwelling_type", Any);
        let address = obj.optional("address", Any);
        obj.finish()?;
        Ok(Self {
            climate_zone: climate_zone?,
            ground_reflectance: ground_reflectance?,
            council_submitted_to: council_submitted_to?,
            dwelling_exposure_type: dwelling_exposure_type?,
            dwelling_type: dwelling_type?,
            address: address?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hbs_core::ViolationKind;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn decode(value: Value) -> Result<Dwelling, Vec<hbs_core::Violation>> {
        let mut cx = Context::new();
        match Dwelling::decode_value(&value, &mut cx) {
            Ok(d) if cx.is_clean() => Ok(d),
            _ => Err(cx.into_violations().into_inner()),
        }
    }

    #[test]
    fn test_ground_reflectance_default_and_null() {
        let base = json!({"climate_zone": 21, "dwelling_exposure_type": "Suburban", "dwelling_type": "Detached"});
        assert_eq!(decode(base.clone()).unwrap().ground_reflectance, Some(0.2));

        let mut explicit_null = base;
        explicit_null["ground_reflectance"] = Value::Null;
        assert_eq!(decode(explicit_null).unwrap().ground_reflectance, None);
    }

    #[test]
    fn test_climate_zone_bounds() {
        for (zone, ok) in [(0, false), (1, true), (69, true), (70, false)] {
            let result = decode(json!({
                "climate_zone": zone,
                "dwelling_exposure_type": "Open",
                "dwelling_type": "Apartment"
            }));
            assert_eq!(result.is_ok(), ok, "zone {zone}");
        }
    }

    #[test]
    fn test_missing_and_bad_enums() {
        let violations = decode(json!({"climate_zone": 5, "dwelling_type": "Bungalow"})).unwrap_err();
        let kinds: Vec<_> = violations.iter().map(|v| (v.path.as_str(), &v.kind)).collect();
        assert_eq!(kinds.len(), 2);
        assert!(kinds.contains(&("/dwelling_exposure_type", &ViolationKind::MissingField)));
    }

    #[test]
    fn test_address_parts() {
        let dwelling = decode(json!({
            "climate_zone": 62,
            "dwelling_exposure_type": "Protected",
            "dwelling_type": "Terrace",
            "address": {"street_number": "12", "street_name": "Smith St", "postcode": "3000"}
        }))
        .unwrap();
        let address = dwelling.address.unwrap();
        assert_eq!(address.postcode.as_deref(), Some("3000"));
        assert!(address.suburb.is_none());
    }
}

//! # Project Information
//!
//! Site location and project-wide metadata: weather file URLs, north angle,
//! climate zone, building types and vintages.

use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::altnumber::AutocalculateOr;
use crate::constraint::{Any, Range};
use crate::decode::{Context, Decode, Decoded, Entity, ObjectReader};

crate::string_enum! {
    /// ASHRAE climate zones.
    pub enum ClimateZones {
        Zone0A => "0A",
        Zone1A => "1A",
        Zone2A => "2A",
        Zone3A => "3A",
        Zone4A => "4A",
        Zone5A => "5A",
        Zone6A => "6A",
        Zone0B => "0B",
        Zone1B => "1B",
        Zone2B => "2B",
        Zone3B => "3B",
        Zone4B => "4B",
        Zone5B => "5B",
        Zone6B => "6B",
        Zone3C => "3C",
        Zone4C => "4C",
        Zone5C => "5C",
        Zone7 => "7",
        Zone8 => "8",
    }
}

crate::string_enum! {
    /// Reference building types.
    pub enum BuildingTypes {
        Residential => "Residential",
        NonResidential => "NonResidential",
        MidriseApartment => "MidriseApartment",
        HighriseApartment => "HighriseApartment",
        LargeOffice => "LargeOffice",
        MediumOffice => "MediumOffice",
        SmallOffice => "SmallOffice",
        Retail => "Retail",
        StripMall => "StripMall",
        PrimarySchool => "PrimarySchool",
        SecondarySchool => "SecondarySchool",
        SmallHotel => "SmallHotel",
        LargeHotel => "LargeHotel",
        Hospital => "Hospital",
        Outpatient => "Outpatient",
        Laboratory => "Laboratory",
        Warehouse => "Warehouse",
        SuperMarket => "SuperMarket",
        FullServiceRestaurant => "FullServiceRestaurant",
        QuickServiceRestaurant => "QuickServiceRestaurant",
        Courthouse => "Courthouse",
        LargeDataCenterHighITE => "LargeDataCenterHighITE",
        LargeDataCenterLowITE => "LargeDataCenterLowITE",
        SmallDataCenterHighITE => "SmallDataCenterHighITE",
        SmallDataCenterLowITE => "SmallDataCenterLowITE",
    }
}

crate::string_enum! {
    /// Energy code vintages.
    pub enum EfficiencyStandards {
        Ashrae2019 => "ASHRAE_2019",
        Ashrae2016 => "ASHRAE_2016",
        Ashrae2013 => "ASHRAE_2013",
        Ashrae2010 => "ASHRAE_2010",
        Ashrae2007 => "ASHRAE_2007",
        Ashrae2004 => "ASHRAE_2004",
        DoeRef1980To2004 => "DOE_Ref_1980_2004",
        DoeRefPre1980 => "DOE_Ref_Pre_1980",
    }
}

/// A geographic location.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct Location {
    pub city: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Hours from UTC in `[-12, 14]`, or estimated from the longitude.
    pub time_zone: AutocalculateOr<i64>,
    /// Metres above sea level.
    pub elevation: f64,
    pub station_id: Option<String>,
    pub source: Option<String>,
}

impl Default for Location {
    fn default() -> Self {
        Self {
            city: "-".into(),
            latitude: 0.0,
            longitude: 0.0,
            time_zone: AutocalculateOr::default(),
            elevation: 0.0,
            station_id: None,
            source: None,
        }
    }
}

crate::entity!(Location);

impl Decode for Location {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::open(value, Self::TYPE, cx)?;
        let city = obj.or_default("city", "-".to_string(), Any);
        let latitude = obj.or_default("latitude", 0.0, Any);
        let longitude = obj.or_default("longitude", 0.0, Any);
        let time_zone = obj.or_else("time_zone", AutocalculateOr::default, Range::closed(-12.0, 14.0));
        let elevation = obj.or_default("elevation", 0.0, Any);
        let station_id = obj.optional("station_id", Any);
        let source = obj.optional("source", Any);
        obj.finish()?;
        Ok(Self {
            city: city?,
            latitude: latitude?,
            longitude: longitude?,
            time_zone: time_zone?,
            elevation: elevation?,
            station_id: station_id?,
            source: source?,
        })
    }
}

/// Project-wide information.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct ProjectInfo {
    /// Degrees in `[-360, 360]`; positive rotates towards the west.
    pub north: f64,
    /// The first URL is the primary weather file.
    pub weather_urls: Option<Vec<Url>>,
    pub location: Option<Location>,
    pub ashrae_climate_zone: Option<ClimateZones>,
    /// The first type is the primary one.
    pub building_type: Option<Vec<BuildingTypes>>,
    pub vintage: Option<Vec<EfficiencyStandards>>,
}

crate::entity!(ProjectInfo);

impl Decode for ProjectInfo {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::open(value, Self::TYPE, cx)?;
        let north = obj.or_default("north", 0.0, Range::closed(-360.0, 360.0));
        let weather_urls = obj.optional("weather_urls", Any);
        let location = obj.optional("location", Any);
        let ashrae_climate_zone = obj.optional("ashrae_climate_zone", Any);
        let building_type = obj.optional("building_type", Any);
        let vintage = obj.optional("vintage", Any);
        obj.finish()?;
        Ok(Self {
            north: north?,
            weather_urls: weather_urls?,
            location: location?,
            ashrae_climate_zone: ashrae_climate_zone?,
            building_type: building_type?,
            vintage: vintage?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ViolationKind;
    use serde_json::json;

    #[test]
    fn test_location_defaults() {
        assert_eq!(Location::decode(&json!({})).unwrap(), Location::default());
    }

    #[test]
    fn test_time_zone_bounds() {
        assert!(Location::decode(&json!({"time_zone": 14})).is_ok());
        assert!(Location::decode(&json!({"time_zone": -12})).is_ok());
        assert!(Location::decode(&json!({"time_zone": 15})).is_err());
        assert!(Location::decode(&json!({"time_zone": 5.5})).is_err());
        assert!(Location::decode(&json!({"time_zone": {"type": "Autocalculate"}})).is_ok());
    }

    #[test]
    fn test_project_info_full() {
        let info = ProjectInfo::decode(&json!({
            "type": "ProjectInfo",
            "north": -30,
            "weather_urls": ["https://energyplus-weather.s3.amazonaws.com/north_and_central_america_wmo_region_4/USA/MA/USA_MA_Boston-Logan.Intl.AP.725090_TMY3/USA_MA_Boston-Logan.Intl.AP.725090_TMY3.zip"],
            "location": {"type": "Location", "city": "Boston", "latitude": 42.37, "longitude": -71.02, "time_zone": -5},
            "ashrae_climate_zone": "5A",
            "building_type": ["LargeOffice", "Retail"],
            "vintage": ["ASHRAE_2019"]
        }))
        .unwrap();
        assert_eq!(info.ashrae_climate_zone, Some(ClimateZones::Zone5A));
        assert_eq!(info.location.unwrap().time_zone, AutocalculateOr::Value(-5));
        assert_eq!(info.building_type.unwrap()[1], BuildingTypes::Retail);
    }

    #[test]
    fn test_project_info_bad_values() {
        let err = ProjectInfo::decode(&json!({
            "north": 400,
            "weather_urls": ["not a url"],
            "ashrae_climate_zone": "9Z",
            "vintage": ["ASHRAE_2022"]
        }))
        .unwrap_err();
        for path in ["/north", "/weather_urls/0", "/ashrae_climate_zone", "/vintage/0"] {
            let v = err.violations.at(path).unwrap_or_else(|| panic!("missing {path}"));
            assert!(matches!(v.kind, ViolationKind::ConstraintViolation { .. }));
        }
    }

    #[test]
    fn test_enum_strings() {
        assert_eq!(EfficiencyStandards::DoeRefPre1980.as_str(), "DOE_Ref_Pre_1980");
        assert_eq!("7".parse::<ClimateZones>().unwrap(), ClimateZones::Zone7);
        assert!("Igloo".parse::<BuildingTypes>().is_err());
        assert_eq!(BuildingTypes::all().len(), BuildingTypes::VALUES.len());
    }
}

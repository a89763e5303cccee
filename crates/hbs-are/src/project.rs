//! # ARE Project Records
//!
//! Who assessed what, for whom, and with which engine versions. All records
//! here are plain objects without a `type` tag.

use chrono::{DateTime, FixedOffset};
use hbs_core::{Any, Context, Decode, Decoded, Length, ObjectReader};
use serde::Serialize;
use serde_json::Value;

use crate::dwelling::Address;
use crate::enums::{BuildingClassType, DeclarationOfInterestType};

/// The plan set the assessment was made from.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlanDocument {
    pub plan_number: Option<String>,
    pub plan_date: Option<String>,
    pub drafter: Option<String>,
    pub revision: Option<String>,
}

impl Decode for PlanDocument {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::record(value, cx)?;
        let plan_number = obj.optional("plan_number", Any);
        let plan_date = obj.optional("plan_date", Any);
        let drafter = obj.optional("drafter", Any);
        let revision = obj.optional("revision", Any);
        obj.finish()?;
        Ok(Self {
            plan_number: plan_number?,
            plan_date: plan_date?,
            drafter: drafter?,
            revision: revision?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Assessor {
    pub name: Option<String>,
    pub accreditation_number: Option<String>,
    pub accrediting_organisation: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl Decode for Assessor {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::record(value, cx)?;
        let name = obj.optional("name", Any);
        let accreditation_number = obj.optional("accreditation_number", Any);
        let accrediting_organisation = obj.optional("accrediting_organisation", Any);
        let email = obj.optional("email", Any);
        let phone = obj.optional("phone", Any);
        obj.finish()?;
        Ok(Self {
            name: name?,
            accreditation_number: accreditation_number?,
            accrediting_organisation: accrediting_organisation?,
            email: email?,
            phone: phone?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Client {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<Address>,
}

impl Decode for Client {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::record(value, cx)?;
        let name = obj.optional("name", Any);
        let email = obj.optional("email", Any);
        let phone = obj.optional("phone", Any);
        let address = obj.optional("address", Any);
        obj.finish()?;
        Ok(Self {
            name: name?,
            email: email?,
            phone: phone?,
            address: address?,
        })
    }
}

/// Client acknowledgement of the assessment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Acknowledgement {
    pub acknowledged_by: String,
    pub acknowledged_date_time: Option<DateTime<FixedOffset>>,
    pub statement: Option<String>,
}

impl Decode for Acknowledgement {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::record(value, cx)?;
        let acknowledged_by = obj.required("acknowledged_by", Length::at_least(1));
        let acknowledged_date_time = obj.optional("acknowledged_date_time", Any);
        let statement = obj.optional("statement", Any);
        obj.finish()?;
        Ok(Self {
            acknowledged_by: acknowledged_by?,
            acknowledged_date_time: acknowledged_date_time?,
            statement: statement?,
        })
    }
}

/// Which parts of the simulation to run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationConfiguration {
    pub run_heating: bool,
    pub run_cooling: bool,
    pub hourly_output: bool,
}

impl Default for SimulationConfiguration {
    fn default() -> Self {
        Self {
            run_heating: true,
            run_cooling: true,
            hourly_output: false,
        }
    }
}

impl Decode for SimulationConfiguration {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::record(value, cx)?;
        let run_heating = obj.or_default("run_heating", true, Any);
        let run_cooling = obj.or_default("run_cooling", true, Any);
        let hourly_output = obj.or_default("hourly_output", false, Any);
        obj.finish()?;
        Ok(Self {
            run_heating: run_heating?,
            run_cooling: run_cooling?,
            hourly_output: hourly_output?,
        })
    }
}

/// The assessment project.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Project {
    pub name: Option<String>,
    pub code: Option<String>,
    pub additional_information: Option<String>,
    pub default_design_variation_id: Option<String>,
    pub building_class_type: BuildingClassType,
    /// Free-form engine version strings; not checked against a release list.
    pub accurate_engine_version: String,
    pub chenath_engine_version: String,
    pub declaration_of_interest_type: DeclarationOfInterestType,
    pub plan_document: Option<PlanDocument>,
    pub assessor: Option<Assessor>,
    pub client: Option<Client>,
    pub acknowledgement: Option<Acknowledgement>,
    pub simulation_configuration: Option<SimulationConfiguration>,
}

impl Decode for Project {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::record(value, cx)?;
        let name = obj.optional("name", Any);
        let code = obj.optional("code", Any);
        let additional_information = obj.optional("additional_information", Any);
        let default_design_variation_id = obj.optional("default_design_variation_id", Any);
        let building_class_type = obj.required("building_class_type", Any);
        let accurate_engine_version = obj.required("accurate_engine_version", Length::at_least(1));
        let chenath_engine_version = obj.required("chenath_engine_version", Length::at_least(1));
        let declaration_of_interest_type = obj.required("declaration_of_interest_type", Any);
        let plan_document = obj.optional("plan_document", Any);
        let assessor = obj.optional("assessor", Any);
        let client = obj.optional("client", Any);
        let acknowledgement = obj.optional("acknowledgement", Any);
        let simulation_configuration = obj.optional("simulation_configuration", Any);
        obj.finish()?;
        Ok(Self {
            name: name?,
            code: code?,
            additional_information: additional_information?,
            default_design_variation_id: default_design_variation_id?,
            building_class_type: building_class_type?,
            accurate_engine_version: accurate_engine_version?,
            chenath_engine_version: chenath_engine_version?,
            declaration_of_interest_type: declaration_of_interest_type?,
            plan_document: plan_document?,
            assessor: assessor?,
            client: client?,
            acknowledgement: acknowledgement?,
            simulation_configuration: simulation_configuration?,
        })
    }
}

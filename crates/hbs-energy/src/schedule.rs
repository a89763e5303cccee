//! # Energy Schedules
//!
//! Schedule type limits, day schedules, rules, and the two schedule kinds
//! (ruleset and fixed interval), each in abridged form (type limit and day
//! schedules referenced by identifier) and full form.

use hbs_core::{
    Any, Check, Context, Decode, Decoded, EnergyIdentity, Entity, Identifier, Length, LimitOr,
    ObjectReader, OneOf, Range, ViolationKind,
};
use serde::Serialize;
use serde_json::Value;

hbs_core::string_enum! {
    /// Whether schedule values are continuous or discrete.
    pub enum NumericType {
        Continuous => "Continuous",
        Discrete => "Discrete",
    }
}

hbs_core::string_enum! {
    /// Physical unit of schedule values.
    pub enum ScheduleUnitType {
        Dimensionless => "Dimensionless",
        Temperature => "Temperature",
        DeltaTemperature => "DeltaTemperature",
        PrecipitationRate => "PrecipitationRate",
        Angle => "Angle",
        ConvectionCoefficient => "ConvectionCoefficient",
        ActivityLevel => "ActivityLevel",
        Velocity => "Velocity",
        Capacity => "Capacity",
        Power => "Power",
        Availability => "Availability",
        Percent => "Percent",
        Control => "Control",
        Mode => "Mode",
    }
}

/// `[month, day]` or `[month, day, leap_year]`.
const DATE: Length = Length::between(2, 3);

/// Month in 1-12, day in 1-31 and a 0/1 leap-year flag, in that order.
#[derive(Debug, Clone, Copy)]
struct MonthDay;

impl Check<Vec<i64>> for MonthDay {
    fn check(&self, value: &Vec<i64>) -> Result<(), String> {
        DATE.check(value)?;
        let parts = [
            ("month", Range::closed(1.0, 12.0)),
            ("day", Range::closed(1.0, 31.0)),
            ("leap-year flag", Range::closed(0.0, 1.0)),
        ];
        for ((part, range), item) in parts.iter().zip(value) {
            range.check(item).map_err(|e| format!("{part} {e}"))?;
        }
        Ok(())
    }
}

/// Timesteps per hour accepted by a fixed interval schedule.
pub const TIMESTEPS: &[i64] = &[1, 2, 3, 4, 5, 6, 10, 12, 15, 20, 30, 60];

/// One value per hour of a leap year at 60 steps per hour, at most.
const INTERVAL_VALUES: Length = Length::between(24, 527_040);

/// Limits and units that schedule values must respect.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct ScheduleTypeLimit {
    #[serde(flatten)]
    pub identity: EnergyIdentity,
    pub lower_limit: LimitOr<f64>,
    pub upper_limit: LimitOr<f64>,
    pub numeric_type: NumericType,
    pub unit_type: ScheduleUnitType,
}

hbs_core::entity!(ScheduleTypeLimit);

impl Decode for ScheduleTypeLimit {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::open(value, Self::TYPE, cx)?;
        let identity = EnergyIdentity::read(&mut obj);
        let lower_limit = obj.or_else("lower_limit", LimitOr::default, Any);
        let upper_limit = obj.or_else("upper_limit", LimitOr::default, Any);
        let numeric_type = obj.or_default("numeric_type", NumericType::Continuous, Any);
        let unit_type = obj.or_default("unit_type", ScheduleUnitType::Dimensionless, Any);
        obj.finish()?;
        Ok(Self {
            identity: identity?,
            lower_limit: lower_limit?,
            upper_limit: upper_limit?,
            numeric_type: numeric_type?,
            unit_type: unit_type?,
        })
    }
}

/// Values over a single day, changing at the listed `[hour, minute]` times.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct ScheduleDay {
    #[serde(flatten)]
    pub identity: EnergyIdentity,
    pub values: Vec<f64>,
    pub times: Vec<[i64; 2]>,
    pub interpolate: bool,
}

hbs_core::entity!(ScheduleDay);

impl Decode for ScheduleDay {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::open(value, Self::TYPE, cx)?;
        let identity = EnergyIdentity::read(&mut obj);
        let values = obj.required::<Vec<f64>>("values", Length::at_least(1));
        let times = obj.or_else("times", || vec![[0, 0]], Length::at_least(1));
        let interpolate = obj.or_default("interpolate", false, Any);
        obj.finish()?;
        let (values, times) = (values?, times?);
        if values.len() != times.len() {
            return Err(cx.report_at(
                "times",
                ViolationKind::ConstraintViolation {
                    constraint: format!(
                        "must contain one time per value ({} values, {} times)",
                        values.len(),
                        times.len()
                    ),
                },
                value.get("times"),
            ));
        }
        Ok(Self {
            identity: identity?,
            values,
            times,
            interpolate: interpolate?,
        })
    }
}

/// Applies a day schedule to selected weekdays between two dates.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct ScheduleRuleAbridged {
    pub schedule_day: Identifier,
    pub apply_sunday: bool,
    pub apply_monday: bool,
    pub apply_tuesday: bool,
    pub apply_wednesday: bool,
    pub apply_thursday: bool,
    pub apply_friday: bool,
    pub apply_saturday: bool,
    pub start_date: Vec<i64>,
    pub end_date: Vec<i64>,
}

hbs_core::entity!(ScheduleRuleAbridged);

impl Decode for ScheduleRuleAbridged {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::open(value, Self::TYPE, cx)?;
        let schedule_day = obj.required("schedule_day", Any);
        let apply_sunday = obj.or_default("apply_sunday", false, Any);
        let apply_monday = obj.or_default("apply_monday", false, Any);
        let apply_tuesday = obj.or_default("apply_tuesday", false, Any);
        let apply_wednesday = obj.or_default("apply_wednesday", false, Any);
        let apply_thursday = obj.or_default("apply_thursday", false, Any);
        let apply_friday = obj.or_default("apply_friday", false, Any);
        let apply_saturday = obj.or_default("apply_saturday", false, Any);
        let start_date = obj.or_else("start_date", || vec![1, 1], MonthDay);
        let end_date = obj.or_else("end_date", || vec![12, 31], MonthDay);
        obj.finish()?;
        Ok(Self {
            schedule_day: schedule_day?,
            apply_sunday: apply_sunday?,
            apply_monday: apply_monday?,
            apply_tuesday: apply_tuesday?,
            apply_wednesday: apply_wednesday?,
            apply_thursday: apply_thursday?,
            apply_friday: apply_friday?,
            apply_saturday: apply_saturday?,
            start_date: start_date?,
            end_date: end_date?,
        })
    }
}

/// Fields shared by both ruleset forms.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RulesetDays {
    pub day_schedules: Vec<ScheduleDay>,
    pub default_day_schedule: Identifier,
    pub schedule_rules: Option<Vec<ScheduleRuleAbridged>>,
    pub holiday_schedule: Option<Identifier>,
    pub summer_designday_schedule: Option<Identifier>,
    pub winter_designday_schedule: Option<Identifier>,
}

impl RulesetDays {
    fn read(obj: &mut ObjectReader<'_, '_>) -> Decoded<Self> {
        let day_schedules = obj.required("day_schedules", Length::at_least(1));
        let default_day_schedule = obj.required("default_day_schedule", Any);
        let schedule_rules = obj.optional("schedule_rules", Any);
        let holiday_schedule = obj.optional("holiday_schedule", Any);
        let summer_designday_schedule = obj.optional("summer_designday_schedule", Any);
        let winter_designday_schedule = obj.optional("winter_designday_schedule", Any);
        Ok(Self {
            day_schedules: day_schedules?,
            default_day_schedule: default_day_schedule?,
            schedule_rules: schedule_rules?,
            holiday_schedule: holiday_schedule?,
            summer_designday_schedule: summer_designday_schedule?,
            winter_designday_schedule: winter_designday_schedule?,
        })
    }
}

/// Ruleset schedule with its type limit referenced by identifier.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct ScheduleRulesetAbridged {
    #[serde(flatten)]
    pub identity: EnergyIdentity,
    #[serde(flatten)]
    pub days: RulesetDays,
    pub schedule_type_limit: Option<Identifier>,
}

hbs_core::entity!(ScheduleRulesetAbridged);

impl Decode for ScheduleRulesetAbridged {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::open(value, Self::TYPE, cx)?;
        let identity = EnergyIdentity::read(&mut obj);
        let days = RulesetDays::read(&mut obj);
        let schedule_type_limit = obj.optional("schedule_type_limit", Any);
        obj.finish()?;
        Ok(Self {
            identity: identity?,
            days: days?,
            schedule_type_limit: schedule_type_limit?,
        })
    }
}

/// Ruleset schedule with its type limit inline.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct ScheduleRuleset {
    #[serde(flatten)]
    pub identity: EnergyIdentity,
    #[serde(flatten)]
    pub days: RulesetDays,
    pub schedule_type_limit: Option<ScheduleTypeLimit>,
}

hbs_core::entity!(ScheduleRuleset);

impl Decode for ScheduleRuleset {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::open(value, Self::TYPE, cx)?;
        let identity = EnergyIdentity::read(&mut obj);
        let days = RulesetDays::read(&mut obj);
        let schedule_type_limit = obj.optional("schedule_type_limit", Any);
        obj.finish()?;
        Ok(Self {
            identity: identity?,
            days: days?,
            schedule_type_limit: schedule_type_limit?,
        })
    }
}

/// Fields shared by both fixed interval forms.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntervalValues {
    pub values: Vec<f64>,
    pub timestep: i64,
    pub start_date: Vec<i64>,
    pub interpolate: bool,
    pub placeholder: bool,
}

impl IntervalValues {
    fn read(obj: &mut ObjectReader<'_, '_>) -> Decoded<Self> {
        let values = obj.required("values", INTERVAL_VALUES);
        let timestep = obj.or_default("timestep", 1, OneOf(TIMESTEPS));
        let start_date = obj.or_else("start_date", || vec![1, 1], MonthDay);
        let interpolate = obj.or_default("interpolate", false, Any);
        let placeholder = obj.or_default("placeholder", false, Any);
        Ok(Self {
            values: values?,
            timestep: timestep?,
            start_date: start_date?,
            interpolate: interpolate?,
            placeholder: placeholder?,
        })
    }
}

/// Fixed interval schedule with its type limit referenced by identifier.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct ScheduleFixedIntervalAbridged {
    #[serde(flatten)]
    pub identity: EnergyIdentity,
    #[serde(flatten)]
    pub interval: IntervalValues,
    pub schedule_type_limit: Option<Identifier>,
}

hbs_core::entity!(ScheduleFixedIntervalAbridged);

impl Decode for ScheduleFixedIntervalAbridged {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::open(value, Self::TYPE, cx)?;
        let identity = EnergyIdentity::read(&mut obj);
        let interval = IntervalValues::read(&mut obj);
        let schedule_type_limit = obj.optional("schedule_type_limit", Any);
        obj.finish()?;
        Ok(Self {
            identity: identity?,
            interval: interval?,
            schedule_type_limit: schedule_type_limit?,
        })
    }
}

/// Fixed interval schedule with its type limit inline.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct ScheduleFixedInterval {
    #[serde(flatten)]
    pub identity: EnergyIdentity,
    #[serde(flatten)]
    pub interval: IntervalValues,
    pub schedule_type_limit: Option<ScheduleTypeLimit>,
}

hbs_core::entity!(ScheduleFixedInterval);

impl Decode for ScheduleFixedInterval {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let mut obj = ObjectReader::open(value, Self::TYPE, cx)?;
        let identity = EnergyIdentity::read(&mut obj);
        let interval = IntervalValues::read(&mut obj);
        let schedule_type_limit = obj.optional("schedule_type_limit", Any);
        obj.finish()?;
        Ok(Self {
            identity: identity?,
            interval: interval?,
            schedule_type_limit: schedule_type_limit?,
        })
    }
}

hbs_core::one_of! {
    /// A full schedule, as embedded in full loads and constructions.
    pub enum Schedule {
        ScheduleRuleset(ScheduleRuleset),
        ScheduleFixedInterval(ScheduleFixedInterval),
    }
}

hbs_core::one_of! {
    /// Any schedule in either form, as listed on a model.
    pub enum AnySchedule {
        ScheduleRulesetAbridged(ScheduleRulesetAbridged),
        ScheduleFixedIntervalAbridged(ScheduleFixedIntervalAbridged),
        ScheduleRuleset(ScheduleRuleset),
        ScheduleFixedInterval(ScheduleFixedInterval),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn always_on() -> Value {
        json!({
            "type": "ScheduleRulesetAbridged",
            "identifier": "Always On",
            "day_schedules": [{"type": "ScheduleDay", "identifier": "On", "values": [1.0]}],
            "default_day_schedule": "On",
            "schedule_type_limit": "Fractional"
        })
    }

    #[test]
    fn test_ruleset_abridged_defaults() {
        let s = ScheduleRulesetAbridged::decode(&always_on()).unwrap();
        assert_eq!(s.days.day_schedules[0].times, vec![[0, 0]]);
        assert!(!s.days.day_schedules[0].interpolate);
        assert_eq!(s.days.schedule_rules, None);
        assert_eq!(s.schedule_type_limit.unwrap().as_str(), "Fractional");
    }

    #[test]
    fn test_ruleset_full_takes_type_limit_entity() {
        let mut doc = always_on();
        doc["type"] = json!("ScheduleRuleset");
        let err = ScheduleRuleset::decode(&doc).unwrap_err();
        assert!(matches!(
            err.violations.at("/schedule_type_limit").unwrap().kind,
            ViolationKind::TypeMismatch { expected: "object" }
        ));

        doc["schedule_type_limit"] = json!({
            "type": "ScheduleTypeLimit", "identifier": "Fractional",
            "lower_limit": 0, "upper_limit": 1
        });
        let s = ScheduleRuleset::decode(&doc).unwrap();
        let limit = s.schedule_type_limit.unwrap();
        assert_eq!(limit.lower_limit, LimitOr::Value(0.0));
        assert_eq!(limit.unit_type, ScheduleUnitType::Dimensionless);
    }

    #[test]
    fn test_type_limit_no_limit_sentinel() {
        let limit = ScheduleTypeLimit::decode(&json!({
            "identifier": "Temperature",
            "lower_limit": {"type": "NoLimit"},
            "unit_type": "Temperature"
        }))
        .unwrap();
        assert_eq!(limit.lower_limit, LimitOr::default());
        let encoded = limit.encode().unwrap();
        assert_eq!(encoded["upper_limit"], json!({"type": "NoLimit"}));
        assert_eq!(encoded["numeric_type"], json!("Continuous"));
    }

    #[test]
    fn test_rule_dates_and_defaults() {
        let rule = ScheduleRuleAbridged::decode(&json!({
            "schedule_day": "Weekend", "apply_saturday": true, "apply_sunday": true
        }))
        .unwrap();
        assert_eq!(rule.start_date, vec![1, 1]);
        assert_eq!(rule.end_date, vec![12, 31]);
        assert!(!rule.apply_monday);

        let err = ScheduleRuleAbridged::decode(&json!({"schedule_day": "d", "start_date": [1]})).unwrap_err();
        assert!(err.violations.at("/start_date").is_some());
    }

    #[test]
    fn test_rule_date_month_range() {
        for month in [0, 13] {
            let err = ScheduleRuleAbridged::decode(&json!({"schedule_day": "d", "start_date": [month, 5]}))
                .unwrap_err();
            let constraint = match &err.violations.at("/start_date").unwrap().kind {
                ViolationKind::ConstraintViolation { constraint } => constraint.clone(),
                other => panic!("unexpected {other:?}"),
            };
            assert!(constraint.starts_with("month"), "{constraint}");
        }
        assert!(ScheduleRuleAbridged::decode(&json!({"schedule_day": "d", "start_date": [12, 5]})).is_ok());
    }

    #[test]
    fn test_rule_date_day_range() {
        for day in [0, 32] {
            let err = ScheduleRuleAbridged::decode(&json!({"schedule_day": "d", "end_date": [6, day]}))
                .unwrap_err();
            assert_eq!(err.violations.len(), 1);
            assert!(err.violations.at("/end_date").is_some());
        }
        assert!(ScheduleRuleAbridged::decode(&json!({"schedule_day": "d", "end_date": [2, 29, 1]})).is_ok());
        assert!(ScheduleRuleAbridged::decode(&json!({"schedule_day": "d", "end_date": [2, 29, 2]})).is_err());
    }

    #[test]
    fn test_day_times_match_values() {
        let err = ScheduleDay::decode(&json!({"identifier": "d", "values": [0, 1]})).unwrap_err();
        assert_eq!(err.violations.len(), 1);
        assert!(matches!(
            err.violations.at("/times").unwrap().kind,
            ViolationKind::ConstraintViolation { .. }
        ));
        let err = ScheduleDay::decode(&json!({
            "identifier": "d", "values": [0], "times": [[0, 0], [8, 0]]
        }))
        .unwrap_err();
        assert!(err.violations.at("/times").is_some());
        assert!(ScheduleDay::decode(&json!({"identifier": "d", "values": [0, 1], "times": [[0, 0], [8, 0]]})).is_ok());
    }

    #[test]
    fn test_fixed_interval_bounds() {
        let day: Vec<f64> = vec![0.5; 24];
        let ok = ScheduleFixedIntervalAbridged::decode(&json!({"identifier": "f", "values": day}));
        assert_eq!(ok.unwrap().interval.timestep, 1);

        let err = ScheduleFixedIntervalAbridged::decode(&json!({
            "identifier": "f", "values": [1.0, 2.0], "timestep": 7
        }))
        .unwrap_err();
        assert_eq!(err.violations.len(), 2);
        assert!(err.violations.at("/values").is_some());
        assert!(err.violations.at("/timestep").is_some());
    }

    #[test]
    fn test_any_schedule_dispatch() {
        let s = AnySchedule::decode_from(&always_on()).unwrap();
        assert_eq!(s.type_name(), "ScheduleRulesetAbridged");
        let err = Schedule::decode_from(&always_on()).unwrap_err();
        assert!(matches!(
            err.violations.at("/type").unwrap().kind,
            ViolationKind::UnrecognizedDiscriminator { .. }
        ));
    }
}

//! # Decode Framework — Collect-All Validation
//!
//! Entities are decoded from `serde_json::Value` fragments by hand-written
//! [`Decode`] implementations built on [`ObjectReader`]. Unlike a fail-fast
//! deserializer, every field is visited even after an earlier one failed, so
//! a single pass reports every violation in the fragment.
//!
//! ## Protocol
//!
//! - A failing decoder records its violation(s) in the [`Context`] and
//!   returns `Err(Rejected)`. [`Rejected`] carries no data: it only says that
//!   the violation has already been recorded.
//! - [`ObjectReader`] getters record failures and remember that one
//!   happened. [`ObjectReader::finish`] reports undeclared keys and returns
//!   `Err` if anything failed, so entity constructors can apply `?` to each
//!   field result afterwards without losing violations.
//! - Paths are JSON Pointers built from the nesting recorded in the context.
//!
//! ## Discriminators
//!
//! An entity decoded directly may omit its `type` key; when present it must
//! equal the entity literal. Polymorphic slots call
//! [`Context::discriminate`], which requires the tag and dispatches on it.

use chrono::{DateTime, FixedOffset, NaiveDateTime};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::constraint::Check;
use crate::error::{HbsError, ValidationError, Violation, ViolationKind, Violations};

/// A free-form JSON object passed through without validation.
pub type JsonObject = Map<String, Value>;

/// Marker error: the reason has already been recorded in the [`Context`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rejected;

/// Result of a single decode step.
pub type Decoded<T> = Result<T, Rejected>;

/// Path and violation accumulator threaded through a decode pass.
#[derive(Debug, Default)]
pub struct Context {
    path: Vec<String>,
    violations: Vec<Violation>,
}

impl Context {
    /// Start a pass at the root of a fragment.
    pub fn new() -> Self {
        Self::default()
    }

    /// JSON Pointer of the current position.
    pub fn pointer(&self) -> String {
        let mut out = String::new();
        for segment in &self.path {
            out.push('/');
            out.push_str(&segment.replace('~', "~0").replace('/', "~1"));
        }
        out
    }

    /// Record a violation at the current position.
    pub fn report(&mut self, kind: ViolationKind, received: Option<&Value>) -> Rejected {
        let violation = Violation::new(self.pointer(), kind, received.cloned());
        self.violations.push(violation);
        Rejected
    }

    /// Record a violation at child `key` of the current position.
    pub fn report_at(&mut self, key: &str, kind: ViolationKind, received: Option<&Value>) -> Rejected {
        self.path.push(key.to_owned());
        let rejected = self.report(kind, received);
        self.path.pop();
        rejected
    }

    /// Run `f` one level deeper, at child `segment`.
    pub fn nested<T>(
        &mut self,
        segment: impl ToString,
        f: impl FnOnce(&mut Self) -> Decoded<T>,
    ) -> Decoded<T> {
        self.path.push(segment.to_string());
        let result = f(self);
        self.path.pop();
        result
    }

    /// Read the mandatory `type` tag of an object in a polymorphic slot.
    ///
    /// Returns the tag only if it is one of `allowed`.
    pub fn discriminate<'v>(
        &mut self,
        value: &'v Value,
        allowed: &'static [&'static str],
    ) -> Decoded<&'v str> {
        let Some(map) = value.as_object() else {
            return Err(self.report(ViolationKind::TypeMismatch { expected: "object" }, Some(value)));
        };
        match map.get("type") {
            None => Err(self.report_at(
                "type",
                ViolationKind::MissingDiscriminator {
                    allowed: allowed.to_vec(),
                },
                None,
            )),
            Some(Value::String(tag)) if allowed.contains(&tag.as_str()) => Ok(tag.as_str()),
            Some(found @ Value::String(tag)) => Err(self.report_at(
                "type",
                ViolationKind::UnrecognizedDiscriminator {
                    received: tag.clone(),
                    allowed: allowed.to_vec(),
                },
                Some(found),
            )),
            Some(found) => Err(self.report_at(
                "type",
                ViolationKind::TypeMismatch { expected: "string" },
                Some(found),
            )),
        }
    }

    /// Whether nothing has been recorded.
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    /// Consume the context, returning what it recorded.
    pub fn into_violations(self) -> Violations {
        Violations::new(self.violations)
    }
}

/// Types that can be decoded from a JSON fragment.
pub trait Decode: Sized {
    /// Decode `value`, recording every violation in `cx`.
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self>;
}

/// A schema entity identified by a literal `type` tag.
pub trait Entity: Decode + Serialize {
    /// The discriminator literal, equal to the entity name.
    const TYPE: &'static str;

    /// Decode a fragment, returning every violation on failure.
    fn decode(value: &Value) -> Result<Self, ValidationError> {
        let mut cx = Context::new();
        match Self::decode_value(value, &mut cx) {
            Ok(entity) if cx.is_clean() => Ok(entity),
            _ => Err(ValidationError {
                entity: Self::TYPE,
                violations: cx.into_violations(),
            }),
        }
    }

    /// Encode to a JSON fragment with every field and the `type` tag.
    fn encode(&self) -> Result<Value, HbsError> {
        Ok(serde_json::to_value(self)?)
    }

    /// Parse JSON text and decode it.
    fn from_json(text: &str) -> Result<Self, HbsError> {
        let value: Value = serde_json::from_str(text)?;
        Ok(Self::decode(&value)?)
    }

    /// Encode to compact JSON text.
    fn to_json(&self) -> Result<String, HbsError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Field-by-field reader over a JSON object.
///
/// Every getter records the key it declares; [`finish`](Self::finish)
/// reports the keys nobody declared.
pub struct ObjectReader<'v, 'c> {
    map: &'v Map<String, Value>,
    cx: &'c mut Context,
    declared: Vec<&'static str>,
    failed: bool,
}

impl<'v, 'c> ObjectReader<'v, 'c> {
    /// Open an object that carries the literal tag `tag`.
    ///
    /// A missing `type` key is accepted; a present one must match exactly.
    pub fn open(value: &'v Value, tag: &'static str, cx: &'c mut Context) -> Decoded<Self> {
        let mut reader = Self::record(value, cx)?;
        reader.declared.push("type");
        if let Some(found) = reader.map.get("type") {
            if found.as_str() != Some(tag) {
                let kind = match found {
                    Value::String(_) => ViolationKind::ConstraintViolation {
                        constraint: format!("must equal \"{tag}\""),
                    },
                    _ => ViolationKind::TypeMismatch { expected: "string" },
                };
                reader.cx.report_at("type", kind, Some(found));
                reader.failed = true;
            }
        }
        Ok(reader)
    }

    /// Open a plain record that has no `type` tag.
    pub fn record(value: &'v Value, cx: &'c mut Context) -> Decoded<Self> {
        match value.as_object() {
            Some(map) => Ok(Self {
                map,
                cx,
                declared: Vec::new(),
                failed: false,
            }),
            None => Err(cx.report(ViolationKind::TypeMismatch { expected: "object" }, Some(value))),
        }
    }

    /// A field that must be present.
    pub fn required<T: Decode>(&mut self, key: &'static str, check: impl Check<T>) -> Decoded<T> {
        self.declared.push(key);
        let result = match self.map.get(key) {
            None => Err(self.cx.report_at(key, ViolationKind::MissingField, None)),
            Some(value) => decode_checked(self.cx, key, value, &check),
        };
        self.track(result)
    }

    /// A field that may be absent or `null`.
    pub fn optional<T: Decode>(
        &mut self,
        key: &'static str,
        check: impl Check<T>,
    ) -> Decoded<Option<T>> {
        self.declared.push(key);
        let result = match self.map.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => decode_checked(self.cx, key, value, &check).map(Some),
        };
        self.track(result)
    }

    /// A field that takes `default` when absent. `null` is a type mismatch.
    pub fn or_default<T: Decode>(
        &mut self,
        key: &'static str,
        default: T,
        check: impl Check<T>,
    ) -> Decoded<T> {
        self.or_else(key, || default, check)
    }

    /// Like [`or_default`](Self::or_default) with a lazily built default.
    pub fn or_else<T: Decode>(
        &mut self,
        key: &'static str,
        default: impl FnOnce() -> T,
        check: impl Check<T>,
    ) -> Decoded<T> {
        self.declared.push(key);
        let result = match self.map.get(key) {
            None => Ok(default()),
            Some(value) => decode_checked(self.cx, key, value, &check),
        };
        self.track(result)
    }

    /// A field that takes `Some(default)` when absent and `None` when
    /// explicitly `null`.
    pub fn nullable_or<T: Decode>(
        &mut self,
        key: &'static str,
        default: T,
        check: impl Check<T>,
    ) -> Decoded<Option<T>> {
        self.declared.push(key);
        let result = match self.map.get(key) {
            None => Ok(Some(default)),
            Some(Value::Null) => Ok(None),
            Some(value) => decode_checked(self.cx, key, value, &check).map(Some),
        };
        self.track(result)
    }

    /// Report undeclared keys and close the reader.
    pub fn finish(self) -> Decoded<()> {
        let Self {
            map,
            cx,
            declared,
            mut failed,
        } = self;
        for (key, value) in map {
            if !declared.contains(&key.as_str()) {
                cx.report_at(key, ViolationKind::UnexpectedField, Some(value));
                failed = true;
            }
        }
        if failed {
            Err(Rejected)
        } else {
            Ok(())
        }
    }

    fn track<T>(&mut self, result: Decoded<T>) -> Decoded<T> {
        if result.is_err() {
            self.failed = true;
        }
        result
    }
}

fn decode_checked<T: Decode, C: Check<T>>(
    cx: &mut Context,
    key: &str,
    value: &Value,
    check: &C,
) -> Decoded<T> {
    cx.nested(key, |cx| {
        let decoded = T::decode_value(value, cx)?;
        match check.check(&decoded) {
            Ok(()) => Ok(decoded),
            Err(constraint) => Err(cx.report(
                ViolationKind::ConstraintViolation { constraint },
                Some(value),
            )),
        }
    })
}

fn mismatch<T>(cx: &mut Context, expected: &'static str, value: &Value) -> Decoded<T> {
    Err(cx.report(ViolationKind::TypeMismatch { expected }, Some(value)))
}

impl Decode for bool {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        match value {
            Value::Bool(b) => Ok(*b),
            other => mismatch(cx, "boolean", other),
        }
    }
}

impl Decode for f64 {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        match value.as_f64() {
            Some(n) if value.is_number() => Ok(n),
            _ => mismatch(cx, "number", value),
        }
    }
}

impl Decode for i64 {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        match value.as_i64() {
            Some(n) => Ok(n),
            None => mismatch(cx, "integer", value),
        }
    }
}

impl Decode for String {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        match value {
            Value::String(s) => Ok(s.clone()),
            other => mismatch(cx, "string", other),
        }
    }
}

impl Decode for JsonObject {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        match value {
            Value::Object(map) => Ok(map.clone()),
            other => mismatch(cx, "object", other),
        }
    }
}

impl<T: Decode> Decode for Vec<T> {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let Some(items) = value.as_array() else {
            return mismatch(cx, "array", value);
        };
        let mut out = Vec::with_capacity(items.len());
        let mut failed = false;
        for (i, item) in items.iter().enumerate() {
            match cx.nested(i, |cx| T::decode_value(item, cx)) {
                Ok(decoded) => out.push(decoded),
                Err(Rejected) => failed = true,
            }
        }
        if failed {
            Err(Rejected)
        } else {
            Ok(out)
        }
    }
}

impl<T: Decode, const N: usize> Decode for [T; N] {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let items = Vec::<T>::decode_value(value, cx)?;
        let len = items.len();
        items.try_into().map_err(|_| {
            cx.report(
                ViolationKind::ConstraintViolation {
                    constraint: format!("must contain exactly {N} items (got {len})"),
                },
                Some(value),
            )
        })
    }
}

impl<T: Decode> Decode for Box<T> {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        T::decode_value(value, cx).map(Box::new)
    }
}

impl Decode for url::Url {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let text = String::decode_value(value, cx)?;
        url::Url::parse(&text).map_err(|e| {
            cx.report(
                ViolationKind::ConstraintViolation {
                    constraint: format!("must be a valid URL ({e})"),
                },
                Some(value),
            )
        })
    }
}

/// Accepts RFC 3339 date-times, and naive `YYYY-MM-DDTHH:MM:SS[.fff]`
/// date-times which are read as UTC.
impl Decode for DateTime<FixedOffset> {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        let text = String::decode_value(value, cx)?;
        if let Ok(parsed) = DateTime::parse_from_rfc3339(&text) {
            return Ok(parsed);
        }
        match NaiveDateTime::parse_from_str(&text, "%Y-%m-%dT%H:%M:%S%.f") {
            Ok(naive) => Ok(naive.and_utc().fixed_offset()),
            Err(_) => Err(cx.report(
                ViolationKind::ConstraintViolation {
                    constraint: "must be an ISO 8601 date-time".into(),
                },
                Some(value),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::{Any, Length, Range};
    use serde_json::json;

    #[derive(Debug, PartialEq, Serialize)]
    #[serde(tag = "type")]
    struct Sample {
        ratio: f64,
        name: String,
        count: Option<i64>,
        tags: Vec<String>,
    }

    crate::entity!(Sample);

    impl Decode for Sample {
        fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
            let mut obj = ObjectReader::open(value, Self::TYPE, cx)?;
            let ratio = obj.or_default("ratio", 0.5, Range::UNIT);
            let name = obj.required("name", Length::IDENTIFIER);
            let count = obj.optional("count", Range::ge(0.0));
            let tags = obj.or_default("tags", Vec::new(), Any);
            obj.finish()?;
            Ok(Self {
                ratio: ratio?,
                name: name?,
                count: count?,
                tags: tags?,
            })
        }
    }

    #[test]
    fn test_defaults_applied() {
        let p = Sample::decode(&json!({"name": "a"})).unwrap();
        assert_eq!(
            p,
            Sample { ratio: 0.5, name: "a".into(), count: None, tags: vec![] }
        );
    }

    #[test]
    fn test_serde_deserialize_runs_decoder() {
        let p: Sample = serde_json::from_value(json!({"name": "a", "tags": ["x"]})).unwrap();
        let back: Sample = serde_json::from_str(&p.to_json().unwrap()).unwrap();
        assert_eq!(back, p);

        let err = serde_json::from_value::<Sample>(json!({"name": "a", "ratio": 2.0})).unwrap_err();
        assert!(err.to_string().contains("/ratio"));
    }

    #[test]
    fn test_type_tag_optional_but_exact() {
        assert!(Sample::decode(&json!({"type": "Sample", "name": "a"})).is_ok());
        let err = Sample::decode(&json!({"type": "sample", "name": "a"})).unwrap_err();
        assert_eq!(err.violations.len(), 1);
        assert_eq!(err.violations.violations()[0].path, "/type");
    }

    #[test]
    fn test_collects_every_violation() {
        let err = Sample::decode(&json!({
            "ratio": 2.0,
            "count": -1,
            "tags": ["ok", 3],
            "extra": true
        }))
        .unwrap_err();
        let paths: Vec<&str> = err.violations.iter().map(|v| v.path.as_str()).collect();
        assert_eq!(paths, vec!["/ratio", "/name", "/count", "/tags/1", "/extra"]);
        assert_eq!(err.violations.at("/name").unwrap().kind, ViolationKind::MissingField);
        assert_eq!(err.violations.at("/extra").unwrap().kind, ViolationKind::UnexpectedField);
        assert_eq!(
            err.violations.at("/tags/1").unwrap().kind,
            ViolationKind::TypeMismatch { expected: "string" }
        );
    }

    #[test]
    fn test_null_for_optional_is_none() {
        let p = Sample::decode(&json!({"name": "a", "count": null})).unwrap();
        assert_eq!(p.count, None);
    }

    #[test]
    fn test_nullable_default() {
        let read = |value: Value| {
            let mut cx = Context::new();
            let mut obj = ObjectReader::record(&value, &mut cx).unwrap();
            let screens = obj.nullable_or("has_screens", true, Any);
            obj.finish().unwrap();
            screens.unwrap()
        };
        assert_eq!(read(json!({})), Some(true));
        assert_eq!(read(json!({"has_screens": null})), None);
        assert_eq!(read(json!({"has_screens": false})), Some(false));
    }

    #[test]
    fn test_null_for_defaulted_is_mismatch() {
        let err = Sample::decode(&json!({"name": "a", "ratio": null})).unwrap_err();
        assert_eq!(
            err.violations.at("/ratio").unwrap().kind,
            ViolationKind::TypeMismatch { expected: "number" }
        );
    }

    #[test]
    fn test_numeric_strings_not_coerced() {
        let err = Sample::decode(&json!({"name": "a", "ratio": "0.5"})).unwrap_err();
        assert_eq!(
            err.violations.at("/ratio").unwrap().kind,
            ViolationKind::TypeMismatch { expected: "number" }
        );
    }

    #[test]
    fn test_integer_rejects_fraction() {
        let err = Sample::decode(&json!({"name": "a", "count": 1.5})).unwrap_err();
        assert_eq!(
            err.violations.at("/count").unwrap().kind,
            ViolationKind::TypeMismatch { expected: "integer" }
        );
    }

    #[test]
    fn test_non_object_root() {
        let err = Sample::decode(&json!([1, 2])).unwrap_err();
        assert_eq!(err.violations.violations()[0].path, "");
    }

    #[test]
    fn test_encode_emits_tag_first_and_nulls() {
        let p = Sample { ratio: 0.25, name: "n".into(), count: None, tags: vec![] };
        let text = p.to_json().unwrap();
        assert!(text.starts_with(r#"{"type":"Sample""#));
        assert_eq!(p.encode().unwrap()["count"], Value::Null);
        assert_eq!(Sample::decode(&p.encode().unwrap()).unwrap(), p);
    }

    #[test]
    fn test_pointer_escapes() {
        let mut cx = Context::new();
        cx.nested("a/b", |cx| cx.nested("c~d", |cx| Err::<(), _>(cx.report(ViolationKind::MissingField, None))))
            .unwrap_err();
        assert_eq!(cx.into_violations().violations()[0].path, "/a~1b/c~0d");
    }

    #[test]
    fn test_discriminate() {
        const ALLOWED: &[&str] = &["A", "B"];
        let mut cx = Context::new();
        assert_eq!(cx.discriminate(&json!({"type": "B"}), ALLOWED), Ok("B"));
        assert!(cx.discriminate(&json!({"type": "C"}), ALLOWED).is_err());
        assert!(cx.discriminate(&json!({}), ALLOWED).is_err());
        assert!(cx.discriminate(&json!({"type": 1}), ALLOWED).is_err());
        let kinds: Vec<ViolationKind> = cx.into_violations().into_inner().into_iter().map(|v| v.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ViolationKind::UnrecognizedDiscriminator { received: "C".into(), allowed: vec!["A", "B"] },
                ViolationKind::MissingDiscriminator { allowed: vec!["A", "B"] },
                ViolationKind::TypeMismatch { expected: "string" },
            ]
        );
    }

    #[test]
    fn test_fixed_array_length() {
        let mut cx = Context::new();
        assert_eq!(<[f64; 3]>::decode_value(&json!([1, 2, 3]), &mut cx), Ok([1.0, 2.0, 3.0]));
        assert!(<[f64; 3]>::decode_value(&json!([1, 2]), &mut cx).is_err());
    }

    #[test]
    fn test_datetime_formats() {
        let mut cx = Context::new();
        let aware = DateTime::<FixedOffset>::decode_value(&json!("2024-03-01T09:30:00+10:00"), &mut cx).unwrap();
        assert_eq!(aware.offset().local_minus_utc(), 36000);
        let naive = DateTime::<FixedOffset>::decode_value(&json!("2024-03-01T09:30:00"), &mut cx).unwrap();
        assert_eq!(naive.offset().local_minus_utc(), 0);
        assert!(DateTime::<FixedOffset>::decode_value(&json!("yesterday"), &mut cx).is_err());
    }
}

//! # Alternative Numbers
//!
//! Some numeric fields also accept a sentinel object in place of the number:
//! `{"type": "Autocalculate"}`, `{"type": "Autosize"}` or `{"type": "NoLimit"}`.
//! The wrappers here dispatch structurally: a JSON number goes to the numeric
//! arm, a JSON object must carry one of the allowed sentinel tags. Bounds
//! checks apply to the numeric arm only.

use serde::Serialize;
use serde_json::Value;

use crate::constraint::AsNumber;
use crate::decode::{Context, Decode, Decoded, Entity, ObjectReader};

/// Sentinel: the value is computed by the simulation engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "type")]
pub struct Autocalculate {}

/// Sentinel: the value is sized by the simulation engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "type")]
pub struct Autosize {}

/// Sentinel: no limit applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "type")]
pub struct NoLimit {}

crate::entity!(Autocalculate);

crate::entity!(Autosize);

crate::entity!(NoLimit);

impl Decode for Autocalculate {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        ObjectReader::open(value, Self::TYPE, cx)?.finish()?;
        Ok(Self {})
    }
}

impl Decode for Autosize {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        ObjectReader::open(value, Self::TYPE, cx)?.finish()?;
        Ok(Self {})
    }
}

impl Decode for NoLimit {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        ObjectReader::open(value, Self::TYPE, cx)?.finish()?;
        Ok(Self {})
    }
}

/// A number, or `Autocalculate`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AutocalculateOr<T> {
    Autocalculate(Autocalculate),
    Value(T),
}

impl<T> AutocalculateOr<T> {
    const TAGS: &'static [&'static str] = &[Autocalculate::TYPE];

    /// The numeric value, if not autocalculated.
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Autocalculate(_) => None,
            Self::Value(v) => Some(v),
        }
    }

    /// Whether the engine computes this value.
    pub fn is_autocalculate(&self) -> bool {
        matches!(self, Self::Autocalculate(_))
    }
}

impl<T> Default for AutocalculateOr<T> {
    fn default() -> Self {
        Self::Autocalculate(Autocalculate {})
    }
}

impl<T> From<T> for AutocalculateOr<T> {
    fn from(value: T) -> Self {
        Self::Value(value)
    }
}

impl<T: Decode> Decode for AutocalculateOr<T> {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        if value.is_object() {
            cx.discriminate(value, Self::TAGS)?;
            Autocalculate::decode_value(value, cx).map(Self::Autocalculate)
        } else {
            T::decode_value(value, cx).map(Self::Value)
        }
    }
}

impl<T: AsNumber> AsNumber for AutocalculateOr<T> {
    fn as_number(&self) -> Option<f64> {
        self.value().and_then(AsNumber::as_number)
    }
}

/// A number, or `NoLimit`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LimitOr<T> {
    NoLimit(NoLimit),
    Value(T),
}

impl<T> LimitOr<T> {
    const TAGS: &'static [&'static str] = &[NoLimit::TYPE];

    /// The numeric value, if limited.
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::NoLimit(_) => None,
            Self::Value(v) => Some(v),
        }
    }
}

impl<T> Default for LimitOr<T> {
    fn default() -> Self {
        Self::NoLimit(NoLimit {})
    }
}

impl<T: Decode> Decode for LimitOr<T> {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        if value.is_object() {
            cx.discriminate(value, Self::TAGS)?;
            NoLimit::decode_value(value, cx).map(Self::NoLimit)
        } else {
            T::decode_value(value, cx).map(Self::Value)
        }
    }
}

impl<T: AsNumber> AsNumber for LimitOr<T> {
    fn as_number(&self) -> Option<f64> {
        self.value().and_then(AsNumber::as_number)
    }
}

/// An equipment capacity: `Autosize`, `NoLimit`, or a number.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CapacityLimit {
    Autosize(Autosize),
    NoLimit(NoLimit),
    Value(f64),
}

impl CapacityLimit {
    const TAGS: &'static [&'static str] = &[Autosize::TYPE, NoLimit::TYPE];
}

impl Default for CapacityLimit {
    fn default() -> Self {
        Self::Autosize(Autosize {})
    }
}

impl Decode for CapacityLimit {
    fn decode_value(value: &Value, cx: &mut Context) -> Decoded<Self> {
        if !value.is_object() {
            return f64::decode_value(value, cx).map(Self::Value);
        }
        match cx.discriminate(value, Self::TAGS)? {
            "NoLimit" => NoLimit::decode_value(value, cx).map(Self::NoLimit),
            _ => Autosize::decode_value(value, cx).map(Self::Autosize),
        }
    }
}

impl AsNumber for CapacityLimit {
    fn as_number(&self) -> Option<f64> {
        match self {
            Self::Value(v) => Some(*v),
            _ => None,
        }
    }
}

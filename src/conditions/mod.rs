//! Environmental condition values, requirement descriptors, and the
//! provider seam
//!
//! A conditions provider maps a canvas position to the environmental
//! conditions at that point (soil, sun, water, hardiness zone). The engine
//! only ever consumes the trait; the banded simulated provider in
//! [`simulated`] is the default implementation.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

pub mod simulated;

pub use simulated::SimulatedConditions;

/// Well-known condition keys supplied by every provider
pub const SOIL_TYPE: &str = "soil_type";
pub const SOIL_PH: &str = "soil_ph";
pub const HARDINESS_ZONE: &str = "hardiness_zone";
pub const SUN_EXPOSURE: &str = "sun_exposure";
pub const WATER_CONDITION: &str = "water_condition";

/// A single environmental condition value
///
/// Untagged on the wire so catalog JSON writes plain strings and numbers
/// (`"full_sun"`, `6.5`) rather than tagged objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConditionValue {
    Number(f64),
    Text(String),
}

impl ConditionValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            ConditionValue::Number(n) => Some(*n),
            ConditionValue::Text(_) => None,
        }
    }
}

impl From<&str> for ConditionValue {
    fn from(value: &str) -> Self {
        ConditionValue::Text(value.to_string())
    }
}

impl From<String> for ConditionValue {
    fn from(value: String) -> Self {
        ConditionValue::Text(value)
    }
}

impl From<f64> for ConditionValue {
    fn from(value: f64) -> Self {
        ConditionValue::Number(value)
    }
}

impl std::fmt::Display for ConditionValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConditionValue::Number(n) => write!(f, "{}", n),
            ConditionValue::Text(t) => write!(f, "{}", t),
        }
    }
}

/// Conditions at one canvas position, keyed by condition name
pub type ConditionMap = AHashMap<String, ConditionValue>;

/// What a plant expects for one named condition
///
/// Serialized catalogs spell this three ways (a list, a `{min, max}` object,
/// or a bare scalar), so the wire format stays untagged and each shape gets
/// its own variant. Variant order matters for
/// untagged deserialization: a map is tried as `Range` first, a sequence as
/// `OneOf`, and anything scalar falls through to `Exactly`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Expected {
    Range { min: f64, max: f64 },
    OneOf(Vec<ConditionValue>),
    Exactly(ConditionValue),
}

impl std::fmt::Display for Expected {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expected::Range { min, max } => write!(f, "{}..{}", min, max),
            Expected::OneOf(values) => {
                let names: Vec<String> = values.iter().map(|v| v.to_string()).collect();
                write!(f, "one of [{}]", names.join(", "))
            }
            Expected::Exactly(value) => write!(f, "{}", value),
        }
    }
}

/// A named environmental requirement on a plant spec
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Requirement {
    pub name: String,
    pub expected: Expected,
}

impl Requirement {
    pub fn new(name: impl Into<String>, expected: Expected) -> Self {
        Self {
            name: name.into(),
            expected,
        }
    }
}

/// Position → conditions mapping consumed by the engine
///
/// Implementations must be pure with respect to a single recompute pass:
/// the checker calls this once per plant and assumes two calls with the
/// same position agree.
pub trait ConditionsProvider {
    fn conditions_at(&self, x: f32, y: f32) -> ConditionMap;
}

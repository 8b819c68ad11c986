//! Weighted site-suitability scoring
//!
//! A coarse 0-100 score for "how well would this spec do here", used by
//! catalog browsing rather than placement itself. Hardiness zone and soil
//! weigh 30 points each, sun and water 20 each. A factor the spec has no requirement for (or the
//! provider no value for) counts as compatible.

use serde::Serialize;

use crate::catalog::PlantSpec;
use crate::conditions::{
    ConditionsProvider, HARDINESS_ZONE, SOIL_PH, SOIL_TYPE, SUN_EXPOSURE, WATER_CONDITION,
};
use crate::engine::compat::is_compatible;

/// Per-factor breakdown of a suitability assessment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suitability {
    pub score: u32,
    pub zone_compatible: bool,
    pub soil_compatible: bool,
    pub sun_compatible: bool,
    pub water_compatible: bool,
}

fn factor_ok(spec: &PlantSpec, keys: &[&str], conditions: &crate::conditions::ConditionMap) -> bool {
    spec.requirements
        .iter()
        .filter(|requirement| keys.contains(&requirement.name.as_str()))
        .all(|requirement| {
            conditions
                .get(&requirement.name)
                .map(|actual| is_compatible(actual, &requirement.expected))
                .unwrap_or(true)
        })
}

/// Assess a spec at a canvas position
pub fn assess(spec: &PlantSpec, x: f32, y: f32, provider: &dyn ConditionsProvider) -> Suitability {
    let conditions = provider.conditions_at(x, y);

    let zone_compatible = factor_ok(spec, &[HARDINESS_ZONE], &conditions);
    let soil_compatible = factor_ok(spec, &[SOIL_TYPE, SOIL_PH], &conditions);
    let sun_compatible = factor_ok(spec, &[SUN_EXPOSURE], &conditions);
    let water_compatible = factor_ok(spec, &[WATER_CONDITION], &conditions);

    let factors = [
        (zone_compatible, 30),
        (soil_compatible, 30),
        (sun_compatible, 20),
        (water_compatible, 20),
    ];
    let score = factors
        .iter()
        .filter(|(compatible, _)| *compatible)
        .map(|(_, weight)| weight)
        .sum();

    Suitability {
        score,
        zone_compatible,
        soil_compatible,
        sun_compatible,
        water_compatible,
    }
}

//! Compatibility checking between plants and their local conditions
//!
//! Incompatibility is not an error: it is derived data. The whole violation
//! list is recomputed from scratch on every structural change, so a
//! violation record never outlives the recompute that produced it and the
//! list is a pure function of (plants, provider).

use serde::{Deserialize, Serialize};

use crate::conditions::{ConditionValue, ConditionsProvider, Expected};
use crate::core::types::PlantId;
use crate::engine::store::Plant;

/// A recorded mismatch between one requirement and the condition at the
/// plant's position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentalViolation {
    pub plant_id: PlantId,
    pub requirement: String,
    pub expected: Expected,
    pub actual: ConditionValue,
}

/// Check one actual condition value against an expected descriptor
///
/// Set membership for `OneOf`, inclusive containment for `Range` (a
/// non-numeric actual never satisfies a range), exact equality otherwise.
pub fn is_compatible(actual: &ConditionValue, expected: &Expected) -> bool {
    match expected {
        Expected::OneOf(values) => values.contains(actual),
        Expected::Range { min, max } => match actual.as_number() {
            Some(n) => *min <= n && n <= *max,
            None => false,
        },
        Expected::Exactly(value) => actual == value,
    }
}

/// Derive the full violation list for the current plants
///
/// The provider is consulted once per plant with a non-empty requirements
/// list. Requirement keys the provider does not supply are skipped:
/// unknown is not incompatible. Output order is deterministic, plants in
/// store order and requirements in declared order.
pub fn recompute_violations(
    plants: &[Plant],
    provider: &dyn ConditionsProvider,
) -> Vec<EnvironmentalViolation> {
    let mut violations = Vec::new();

    for plant in plants {
        if plant.requirements.is_empty() {
            continue;
        }

        let conditions = provider.conditions_at(plant.position.x, plant.position.y);

        for requirement in &plant.requirements {
            let actual = match conditions.get(&requirement.name) {
                Some(value) => value,
                None => continue,
            };

            if !is_compatible(actual, &requirement.expected) {
                violations.push(EnvironmentalViolation {
                    plant_id: plant.id,
                    requirement: requirement.name.clone(),
                    expected: requirement.expected.clone(),
                    actual: actual.clone(),
                });
            }
        }
    }

    violations
}

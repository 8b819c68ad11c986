//! Best-effort location suggestion for an incompatible plant
//!
//! Scans a fixed-step grid of candidate cells, scoring each by how many of
//! the plant's requirements the local conditions satisfy, and returns the
//! best cell. Synchronous and potentially slow on large canvases or fine
//! steps; callers wanting a responsive UI should run it off the
//! interaction path.

use crate::conditions::{ConditionsProvider, Requirement};
use crate::core::config::EngineConfig;
use crate::core::types::Vec2;
use crate::engine::compat::is_compatible;

/// Count how many requirements the conditions at a point satisfy
///
/// Requirement keys the provider does not supply score nothing, so a
/// "perfect" score is only reachable where every key is known.
pub fn score_position(
    requirements: &[Requirement],
    x: f32,
    y: f32,
    provider: &dyn ConditionsProvider,
) -> usize {
    let conditions = provider.conditions_at(x, y);
    requirements
        .iter()
        .filter(|requirement| {
            conditions
                .get(&requirement.name)
                .map(|actual| is_compatible(actual, &requirement.expected))
                .unwrap_or(false)
        })
        .count()
}

/// Find the best-scoring cell for the given requirements
///
/// Cells are sampled at `search_step` intervals, centered in each step.
/// The highest score wins; the first-found cell wins ties. A perfect score
/// terminates the inner (x) scan for the current row only; the outer (y)
/// scan still visits every remaining row. Returns `None` when the grid has
/// no cells.
pub fn suggest_location(
    requirements: &[Requirement],
    config: &EngineConfig,
    provider: &dyn ConditionsProvider,
) -> Option<Vec2> {
    let step = config.search_step;
    let perfect = requirements.len();

    let mut best: Option<(Vec2, usize)> = None;

    let mut y = step / 2.0;
    while y < config.canvas_height {
        let mut x = step / 2.0;
        while x < config.canvas_width {
            let score = score_position(requirements, x, y, provider);

            let improves = match best {
                Some((_, best_score)) => score > best_score,
                None => true,
            };
            if improves {
                best = Some((Vec2::new(x, y), score));
            }

            if score == perfect {
                break;
            }
            x += step;
        }
        y += step;
    }

    best.map(|(cell, _)| cell)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conditions::{Expected, SimulatedConditions, SUN_EXPOSURE, WATER_CONDITION};

    fn config_400() -> EngineConfig {
        EngineConfig {
            canvas_width: 400.0,
            canvas_height: 400.0,
            search_step: 50.0,
            ..Default::default()
        }
    }

    fn sun_req(values: &[&str]) -> Requirement {
        Requirement::new(
            SUN_EXPOSURE,
            Expected::OneOf(values.iter().map(|v| (*v).into()).collect()),
        )
    }

    #[test]
    fn test_suggestion_satisfies_requirements() {
        let config = config_400();
        let provider = SimulatedConditions::new(400.0, 400.0);
        let requirements = vec![
            sun_req(&["full_sun"]),
            Requirement::new(WATER_CONDITION, Expected::Exactly("wet".into())),
        ];

        let cell = suggest_location(&requirements, &config, &provider)
            .expect("grid has cells, so a best cell must exist");

        // full_sun lives in the top y quarter, wet in the right x third
        assert!(cell.y >= 300.0, "expected full_sun band, got y={}", cell.y);
        assert!(cell.x >= 400.0 * 2.0 / 3.0, "expected wet band, got x={}", cell.x);
        assert_eq!(score_position(&requirements, cell.x, cell.y, &provider), 2);
    }

    #[test]
    fn test_first_found_wins_ties() {
        let config = config_400();
        let provider = SimulatedConditions::new(400.0, 400.0);
        // satisfied everywhere: every cell scores 1, so the very first
        // sampled cell is kept
        let requirements = vec![sun_req(&["full_sun", "part_sun", "part_shade", "full_shade"])];

        let cell = suggest_location(&requirements, &config, &provider).unwrap();
        assert_eq!(cell, Vec2::new(25.0, 25.0));
    }

    #[test]
    fn test_empty_grid_returns_none() {
        let config = EngineConfig {
            canvas_width: 10.0,
            canvas_height: 10.0,
            search_step: 50.0,
            ..Default::default()
        };
        let provider = SimulatedConditions::new(10.0, 10.0);
        assert_eq!(suggest_location(&[sun_req(&["full_sun"])], &config, &provider), None);
    }

    #[test]
    fn test_perfect_score_breaks_inner_scan_only() {
        use std::cell::RefCell;

        // counts provider calls per row to observe the inner-loop break
        struct CountingProvider {
            inner: SimulatedConditions,
            calls: RefCell<Vec<f32>>,
        }
        impl ConditionsProvider for CountingProvider {
            fn conditions_at(&self, x: f32, y: f32) -> crate::conditions::ConditionMap {
                self.calls.borrow_mut().push(y);
                self.inner.conditions_at(x, y)
            }
        }

        let config = config_400();
        let provider = CountingProvider {
            inner: SimulatedConditions::new(400.0, 400.0),
            calls: RefCell::new(Vec::new()),
        };
        // water "dry" is perfect in the left x third of every row
        let requirements = vec![Requirement::new(
            WATER_CONDITION,
            Expected::Exactly("dry".into()),
        )];

        suggest_location(&requirements, &config, &provider).unwrap();

        let calls = provider.calls.borrow();
        // first cell of each row is already perfect, so exactly one call
        // per row; the outer scan still visited all 8 rows
        assert_eq!(calls.len(), 8, "inner break must not stop the outer scan");
        let rows: Vec<f32> = calls.clone();
        assert_eq!(rows.first(), Some(&25.0));
        assert_eq!(rows.last(), Some(&375.0));
    }

    #[test]
    fn test_partial_score_beats_nothing() {
        let config = config_400();
        let provider = SimulatedConditions::new(400.0, 400.0);
        // impossible second requirement: best achievable score is 1
        let requirements = vec![
            sun_req(&["full_sun"]),
            Requirement::new(SUN_EXPOSURE, Expected::Exactly("noon_only".into())),
        ];

        let cell = suggest_location(&requirements, &config, &provider).unwrap();
        assert_eq!(score_position(&requirements, cell.x, cell.y, &provider), 1);
    }
}

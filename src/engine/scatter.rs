//! Random bulk placement
//!
//! Drops several instances of one spec onto the canvas at random, retrying
//! each position a bounded number of times to keep clear of existing
//! plants. After the attempt cap the last candidate is used anyway, so a
//! crowded canvas degrades to overlap rather than failing.

use rand::Rng;

use crate::catalog::PlantSpec;
use crate::core::types::{PlantId, Vec2};
use crate::engine::store::PlacementStore;

/// Position retries per placed plant before giving up on clearance
const MAX_ATTEMPTS: usize = 50;

/// Place `count` instances of a spec at random committed positions
///
/// Returns the ids of the placed plants in placement order.
pub fn scatter(
    store: &mut PlacementStore,
    spec: &PlantSpec,
    count: usize,
    rng: &mut impl Rng,
) -> Vec<PlantId> {
    let width = store.config().canvas_width;
    let height = store.config().canvas_height;
    scatter_within(store, spec, count, Vec2::default(), width, height, rng)
}

/// Place `count` instances inside one rectangular region of the canvas
///
/// Candidates are drawn from the region, but clearance is checked against
/// every existing plant and the committed position is still clamped to the
/// full canvas.
pub fn scatter_within(
    store: &mut PlacementStore,
    spec: &PlantSpec,
    count: usize,
    origin: Vec2,
    width: f32,
    height: f32,
    rng: &mut impl Rng,
) -> Vec<PlantId> {
    let mut placed = Vec::with_capacity(count);

    for _ in 0..count {
        let size = if spec.size > 0.0 {
            spec.size
        } else {
            store.config().default_plant_size
        };
        let half = size / 2.0;
        let min_gap = store.config().min_gap;

        let mut candidate = (origin.x + half, origin.y + half);
        for _attempt in 0..MAX_ATTEMPTS {
            candidate = (
                rng.gen_range((origin.x + half)..=(origin.x + width - half).max(origin.x + half)),
                rng.gen_range((origin.y + half)..=(origin.y + height - half).max(origin.y + half)),
            );

            let clear = store.all().iter().all(|other| {
                let dx = candidate.0 - other.position.x;
                let dy = candidate.1 - other.position.y;
                let distance = (dx * dx + dy * dy).sqrt();
                distance >= (size + other.size) / 2.0 + min_gap
            });
            if clear {
                break;
            }
        }

        let plant = store.add(spec, candidate.0, candidate.1, false);
        store.finalize(plant.id);
        placed.push(plant.id);
    }

    tracing::debug!("scattered {} x {}", placed.len(), spec.name);
    placed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::conditions::SimulatedConditions;
    use crate::core::config::EngineConfig;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn store_400() -> PlacementStore {
        let config = EngineConfig {
            canvas_width: 400.0,
            canvas_height: 400.0,
            ..Default::default()
        };
        let provider = SimulatedConditions::new(400.0, 400.0);
        PlacementStore::new(config, Box::new(provider))
    }

    #[test]
    fn test_scatter_places_requested_count() {
        let mut store = store_400();
        let specs = catalog::builtin();
        let spec = catalog::find_spec(&specs, "Little Bluestem").unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        let placed = scatter(&mut store, spec, 5, &mut rng);
        assert_eq!(placed.len(), 5);
        assert_eq!(store.all().len(), 5);
    }

    #[test]
    fn test_scatter_within_stays_in_region() {
        let mut store = store_400();
        let specs = catalog::builtin();
        let spec = catalog::find_spec(&specs, "Wild Ginger").unwrap();
        let mut rng = StdRng::seed_from_u64(3);

        // bottom-right quadrant
        scatter_within(&mut store, spec, 4, Vec2::new(200.0, 200.0), 200.0, 200.0, &mut rng);

        for plant in store.all() {
            let half = plant.size / 2.0;
            assert!(plant.position.x >= 200.0 + half && plant.position.x <= 400.0 - half);
            assert!(plant.position.y >= 200.0 + half && plant.position.y <= 400.0 - half);
        }
    }

    #[test]
    fn test_scatter_positions_in_bounds() {
        let mut store = store_400();
        let specs = catalog::builtin();
        let spec = catalog::find_spec(&specs, "Purple Coneflower").unwrap();
        let mut rng = StdRng::seed_from_u64(42);

        scatter(&mut store, spec, 8, &mut rng);

        for plant in store.all() {
            let half = plant.size / 2.0;
            assert!(plant.position.x >= half && plant.position.x <= 400.0 - half);
            assert!(plant.position.y >= half && plant.position.y <= 400.0 - half);
        }
    }
}

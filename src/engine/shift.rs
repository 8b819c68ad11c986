//! Shift resolution: one-shot repulsion around a moved plant
//!
//! When a drag is committed, every non-fixed plant standing too close to
//! the moved plant is pushed straight away from it until the pair clears
//! `(a.size + b.size) / 2 + min_gap`. Resolution is pairwise against the
//! moved plant only and runs a single pass: a push that creates a new
//! conflict between two other plants stays unresolved until one of them is
//! itself moved. That trade keeps a commit O(n) and predictable; it is not
//! a global non-overlap guarantee.

use ahash::AHashSet;

use crate::core::config::EngineConfig;
use crate::core::types::{PlantId, Vec2};
use crate::engine::store::Plant;

/// Clamp a committed position into canvas bounds, then grid-snap it
///
/// Clamp range is `[size/2, dimension - size/2]` per axis so the whole
/// diameter stays on canvas. Snapping runs after clamping, so a snapped
/// position near an edge can sit half a grid cell outside the clamp range.
pub fn settle(position: Vec2, size: f32, config: &EngineConfig) -> Vec2 {
    let half = size / 2.0;
    let mut x = position.x.max(half).min(config.canvas_width - half);
    let mut y = position.y.max(half).min(config.canvas_height - half);

    if config.snap_to_grid {
        x = (x / config.grid_size).round() * config.grid_size;
        y = (y / config.grid_size).round() * config.grid_size;
    }

    Vec2::new(x, y)
}

/// Push non-fixed plants out of the moved plant's clearance circle
///
/// Returns the ids of plants that were repositioned. The moved plant itself
/// and everything in the fixed set are left untouched.
pub fn resolve(
    moved_id: PlantId,
    plants: &mut [Plant],
    fixed: &AHashSet<PlantId>,
    config: &EngineConfig,
) -> Vec<PlantId> {
    let moved = match plants.iter().find(|p| p.id == moved_id) {
        Some(p) => (p.position, p.size),
        None => return Vec::new(),
    };
    let (moved_pos, moved_size) = moved;

    let mut pushed = Vec::new();

    for plant in plants.iter_mut() {
        if plant.id == moved_id || fixed.contains(&plant.id) {
            continue;
        }

        let combined_radius = (moved_size + plant.size) / 2.0;
        let threshold = combined_radius + config.min_gap;
        let offset = plant.position - moved_pos;
        let distance = offset.length();
        if distance >= threshold {
            continue;
        }

        // Push outward along the center line; coincident centers resolve
        // along +x.
        let direction = if distance > 0.0 {
            offset * (1.0 / distance)
        } else {
            Vec2::new(1.0, 0.0)
        };
        let target = plant.position + direction * (threshold - distance);
        plant.position = settle(target, plant.size, config);

        tracing::debug!(
            "shifted {:?} to ({:.1}, {:.1}) to clear {:?}",
            plant.id,
            plant.position.x,
            plant.position.y,
            moved_id
        );
        pushed.push(plant.id);
    }

    pushed
}

//! Automatic design generation
//!
//! One-shot population of the canvas: tile it into rectangular zones,
//! score every catalog spec against each zone's center conditions, select
//! top scorers under a per-kind diversity cap, and scatter each selection
//! into its zone with a quantity scaled to zone area. The result is a
//! starting layout the user refines interactively, not a final design.

use ahash::{AHashMap, AHashSet};
use rand::Rng;
use serde::Serialize;

use crate::catalog::PlantSpec;
use crate::conditions::ConditionsProvider;
use crate::core::types::{PlantKind, Vec2};
use crate::engine::store::PlacementStore;
use crate::engine::{scatter, suitability};

/// Knobs for one generation run
#[derive(Debug, Clone)]
pub struct DesignParams {
    /// Upper bound on distinct specs selected per zone
    pub plants_per_zone: usize,
    /// 0 allows a zone of one kind; 1 forbids repeating any kind
    pub diversity_factor: f32,
    /// Specs scoring at or below this are never selected
    pub min_suitability: u32,
    /// Zone grid rows (sun varies along y, so rows track sun bands)
    pub zone_rows: usize,
    /// Zone grid columns (water varies along x)
    pub zone_cols: usize,
}

impl Default for DesignParams {
    fn default() -> Self {
        Self {
            plants_per_zone: 5,
            diversity_factor: 0.7,
            min_suitability: 50,
            zone_rows: 4,
            zone_cols: 3,
        }
    }
}

/// One spec chosen for one zone
#[derive(Debug, Clone, Serialize)]
pub struct DesignSelection {
    pub name: String,
    pub kind: PlantKind,
    /// Suitability score at the zone center
    pub score: u32,
    /// Instances scattered into the zone
    pub quantity: usize,
    /// Row-major zone index
    pub zone: usize,
}

/// Aggregate figures over a generated design
#[derive(Debug, Clone, Serialize)]
pub struct DesignStatistics {
    pub total_plants: usize,
    pub distinct_specs: usize,
    pub kind_counts: AHashMap<PlantKind, usize>,
    /// 10 points per distinct kind, capped at 100
    pub biodiversity_score: u32,
    /// Quantity-weighted mean of selection scores
    pub mean_suitability: u32,
}

/// What a generation run selected and placed
#[derive(Debug, Clone, Serialize)]
pub struct DesignSummary {
    pub selections: Vec<DesignSelection>,
    pub statistics: DesignStatistics,
}

/// Populate the canvas from the catalog
///
/// Zones are scored independently, so a spec can be selected for several
/// zones. Placement goes through the store's normal add/finalize path;
/// observers see every placement.
pub fn generate(
    store: &mut PlacementStore,
    specs: &[PlantSpec],
    provider: &dyn ConditionsProvider,
    params: &DesignParams,
    rng: &mut impl Rng,
) -> DesignSummary {
    let zone_width = store.config().canvas_width / params.zone_cols.max(1) as f32;
    let zone_height = store.config().canvas_height / params.zone_rows.max(1) as f32;
    let zone_area = zone_width * zone_height;
    let default_size = store.config().default_plant_size;

    let mut selections = Vec::new();

    for row in 0..params.zone_rows {
        for col in 0..params.zone_cols {
            let zone = row * params.zone_cols + col;
            let origin = Vec2::new(col as f32 * zone_width, row as f32 * zone_height);
            let center = origin + Vec2::new(zone_width / 2.0, zone_height / 2.0);

            // score against the zone center, best first; catalog order
            // breaks ties
            let mut scored: Vec<(&PlantSpec, u32)> = specs
                .iter()
                .map(|spec| {
                    let score = suitability::assess(spec, center.x, center.y, provider).score;
                    (spec, score)
                })
                .filter(|(_, score)| *score > params.min_suitability)
                .collect();
            scored.sort_by(|a, b| b.1.cmp(&a.1));

            let target = target_count(zone_area, params.plants_per_zone);
            let kind_cap = target as f32 * (1.0 - params.diversity_factor);
            let mut kind_counts: AHashMap<PlantKind, usize> = AHashMap::default();
            let mut chosen = 0usize;

            for (spec, score) in scored {
                if chosen >= target {
                    break;
                }
                let seen = kind_counts.get(&spec.kind).copied().unwrap_or(0);
                if seen as f32 >= kind_cap {
                    continue;
                }

                let size = if spec.size > 0.0 { spec.size } else { default_size };
                let quantity = quantity_for(size, zone_area);
                scatter::scatter_within(store, spec, quantity, origin, zone_width, zone_height, rng);

                kind_counts.insert(spec.kind, seen + 1);
                chosen += 1;
                selections.push(DesignSelection {
                    name: spec.name.clone(),
                    kind: spec.kind,
                    score,
                    quantity,
                    zone,
                });
            }
        }
    }

    let statistics = statistics(&selections);
    tracing::info!(
        "generated design: {} plants across {} selections",
        statistics.total_plants,
        selections.len()
    );
    DesignSummary { selections, statistics }
}

/// Distinct specs to select for a zone of the given area
fn target_count(zone_area: f32, plants_per_zone: usize) -> usize {
    let by_area = (zone_area / 10_000.0) as usize + 1;
    by_area.min(plants_per_zone).max(1)
}

/// Instances of one spec for a zone, by mature diameter
fn quantity_for(size: f32, zone_area: f32) -> usize {
    let per_patch = if size <= 15.0 {
        16.0
    } else if size <= 30.0 {
        4.0
    } else if size <= 60.0 {
        1.0
    } else {
        0.25
    };
    (((zone_area / 10_000.0) * per_patch) as usize).max(1)
}

fn statistics(selections: &[DesignSelection]) -> DesignStatistics {
    let mut kind_counts: AHashMap<PlantKind, usize> = AHashMap::default();
    let mut names: AHashSet<&str> = AHashSet::default();
    let mut total = 0usize;
    let mut score_sum = 0usize;

    for selection in selections {
        total += selection.quantity;
        *kind_counts.entry(selection.kind).or_insert(0) += selection.quantity;
        names.insert(selection.name.as_str());
        score_sum += selection.score as usize * selection.quantity;
    }

    let biodiversity_score = (kind_counts.len() as u32 * 10).min(100);
    let mean_suitability = if total > 0 { (score_sum / total) as u32 } else { 0 };

    DesignStatistics {
        total_plants: total,
        distinct_specs: names.len(),
        kind_counts,
        biodiversity_score,
        mean_suitability,
    }
}

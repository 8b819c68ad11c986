//! Companion recommendation derivation
//!
//! The recommendation list is rebuilt wholesale from the current plants:
//! the union of every plant's companion names, minus the names already on
//! the canvas, in first-encountered order.

use ahash::AHashSet;

use crate::engine::store::Plant;

/// Derive the companion suggestion list from the current plants
pub fn recompute(plants: &[Plant]) -> Vec<String> {
    let placed: AHashSet<&str> = plants.iter().map(|p| p.name.as_str()).collect();

    let mut seen: AHashSet<&str> = AHashSet::default();
    let mut recommendations = Vec::new();

    for plant in plants {
        for companion in &plant.companions {
            if placed.contains(companion.as_str()) {
                continue;
            }
            if seen.insert(companion.as_str()) {
                recommendations.push(companion.clone());
            }
        }
    }

    recommendations
}

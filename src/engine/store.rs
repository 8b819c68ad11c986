//! Placement store: the mutable design canvas
//!
//! Owns the plant collection (vector order is z-order, back to front), the
//! fixed set, and the last derived snapshots (violations and
//! recommendations). Every structural change runs the full pipeline before
//! returning: shift resolution (on commit), violation recompute,
//! recommendation recompute, notifications. `move_to` is the deliberate
//! exception; it is the raw setter used on every drag frame and touches
//! nothing but the coordinate.

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::catalog::PlantSpec;
use crate::conditions::{ConditionsProvider, Requirement};
use crate::core::config::EngineConfig;
use crate::core::types::{PlantId, PlantKind, Vec2};
use crate::engine::compat::{self, EnvironmentalViolation};
use crate::engine::events::{EngineEvent, EngineObserver};
use crate::engine::{recommend, shift};

/// A positioned plant on the canvas
///
/// Owned exclusively by the store; queries hand out clones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plant {
    pub id: PlantId,
    pub name: String,
    pub species: String,
    pub kind: PlantKind,
    /// Diameter in canvas units, always positive
    pub size: f32,
    pub position: Vec2,
    /// Requirements in the order the spec declared them
    pub requirements: Vec<Requirement>,
    pub companions: Vec<String>,
}

impl Plant {
    /// Instantiate a spec at a position with an already-resolved size
    pub fn from_spec(spec: &PlantSpec, position: Vec2, size: f32) -> Self {
        Self {
            id: PlantId::new(),
            name: spec.name.clone(),
            species: spec.species.clone(),
            kind: spec.kind,
            size,
            position,
            requirements: spec.requirements.clone(),
            companions: spec.companions.clone(),
        }
    }
}

/// The placement engine's single mutable store
pub struct PlacementStore {
    config: EngineConfig,
    provider: Box<dyn ConditionsProvider>,
    plants: Vec<Plant>,
    fixed: AHashSet<PlantId>,
    violations: Vec<EnvironmentalViolation>,
    recommendations: Vec<String>,
    observers: Vec<Box<dyn EngineObserver>>,
}

impl PlacementStore {
    pub fn new(config: EngineConfig, provider: Box<dyn ConditionsProvider>) -> Self {
        Self {
            config,
            provider,
            plants: Vec::new(),
            fixed: AHashSet::default(),
            violations: Vec::new(),
            recommendations: Vec::new(),
            observers: Vec::new(),
        }
    }

    /// Register an observer for change notifications
    pub fn subscribe(&mut self, observer: Box<dyn EngineObserver>) {
        self.observers.push(observer);
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Update canvas bounds, e.g. after a window resize
    ///
    /// Existing positions are not revisited; they get re-clamped on their
    /// next `finalize`.
    pub fn set_bounds(&mut self, width: f32, height: f32) {
        self.config.canvas_width = width;
        self.config.canvas_height = height;
    }

    /// Place a new plant at the end of z-order and recompute derived state
    ///
    /// A spec without a positive size gets the configured default. The
    /// position is taken as-is; clamping only happens at `finalize`.
    pub fn add(&mut self, spec: &PlantSpec, x: f32, y: f32, fixed: bool) -> Plant {
        let size = if spec.size > 0.0 {
            spec.size
        } else {
            self.config.default_plant_size
        };

        let plant = Plant::from_spec(spec, Vec2::new(x, y), size);
        tracing::debug!("added {} ({:?}) at ({:.1}, {:.1})", plant.name, plant.id, x, y);

        if fixed {
            self.fixed.insert(plant.id);
        }
        self.plants.push(plant.clone());
        self.recompute();
        plant
    }

    /// Delete a plant; unknown ids are ignored
    pub fn remove(&mut self, id: PlantId) {
        let Some(index) = self.index_of(id) else {
            return;
        };
        let plant = self.plants.remove(index);
        self.fixed.remove(&id);
        tracing::debug!("removed {} ({:?})", plant.name, id);
        self.recompute();
    }

    /// Raw position setter used during continuous drag
    ///
    /// No clamping, no recompute; the position may leave the canvas until
    /// the drag is committed.
    pub fn move_to(&mut self, id: PlantId, x: f32, y: f32) {
        if let Some(index) = self.index_of(id) {
            self.plants[index].position = Vec2::new(x, y);
        }
    }

    /// Commit a plant's position: clamp, snap, resolve, recompute, notify
    ///
    /// Shift resolution is skipped while any environmental violation
    /// exists anywhere in the design; a broken layout is not rearranged.
    pub fn finalize(&mut self, id: PlantId) {
        let Some(index) = self.index_of(id) else {
            return;
        };

        let settled = shift::settle(self.plants[index].position, self.plants[index].size, &self.config);
        self.plants[index].position = settled;

        if self.violations.is_empty() {
            shift::resolve(id, &mut self.plants, &self.fixed, &self.config);
        } else {
            tracing::debug!("skipping shift resolution: {} violations active", self.violations.len());
        }

        self.recompute();
        self.notify(EngineEvent::PositionFinalized {
            plant_id: id,
            x: settled.x,
            y: settled.y,
        });
    }

    /// Flip a plant's fixed status; unknown ids are ignored
    pub fn toggle_fixed(&mut self, id: PlantId) {
        if self.index_of(id).is_none() {
            return;
        }
        let fixed = if self.fixed.remove(&id) {
            false
        } else {
            self.fixed.insert(id);
            true
        };
        self.notify(EngineEvent::FixedStatusChanged { plant_id: id, fixed });
    }

    /// Hit-test in reverse z-order: topmost plant whose disc covers the point
    pub fn pick(&self, x: f32, y: f32) -> Option<Plant> {
        let point = Vec2::new(x, y);
        self.plants
            .iter()
            .rev()
            .find(|plant| plant.position.distance(&point) <= plant.size / 2.0)
            .cloned()
    }

    /// Move a plant to the end of z-order (topmost)
    ///
    /// The interactive flow calls this on the plant `pick` returned before
    /// starting a drag; it is a caller convention, not something `pick`
    /// does itself.
    pub fn bring_to_front(&mut self, id: PlantId) {
        if let Some(index) = self.index_of(id) {
            let plant = self.plants.remove(index);
            self.plants.push(plant);
        }
    }

    /// Snapshot of all plants in z-order
    pub fn all(&self) -> Vec<Plant> {
        self.plants.clone()
    }

    /// Snapshot of the plants currently marked fixed
    pub fn fixed_only(&self) -> Vec<Plant> {
        self.plants
            .iter()
            .filter(|plant| self.fixed.contains(&plant.id))
            .cloned()
            .collect()
    }

    pub fn is_fixed(&self, id: PlantId) -> bool {
        self.fixed.contains(&id)
    }

    /// Snapshot of the current violation list
    pub fn violations(&self) -> Vec<EnvironmentalViolation> {
        self.violations.clone()
    }

    /// Snapshot of the current recommendation list
    pub fn recommendations(&self) -> Vec<String> {
        self.recommendations.clone()
    }

    /// Look up one plant by id
    pub fn plant(&self, id: PlantId) -> Option<Plant> {
        self.index_of(id).map(|index| self.plants[index].clone())
    }

    pub fn len(&self) -> usize {
        self.plants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plants.is_empty()
    }

    fn index_of(&self, id: PlantId) -> Option<usize> {
        self.plants.iter().position(|plant| plant.id == id)
    }

    /// Rebuild both derived snapshots and notify on actual change
    fn recompute(&mut self) {
        let violations = compat::recompute_violations(&self.plants, self.provider.as_ref());
        if violations != self.violations {
            self.violations = violations;
            self.notify(EngineEvent::ViolationsChanged {
                violations: self.violations.clone(),
            });
        }

        let recommendations = recommend::recompute(&self.plants);
        if recommendations != self.recommendations {
            self.recommendations = recommendations;
            self.notify(EngineEvent::RecommendationsChanged {
                recommendations: self.recommendations.clone(),
            });
        }
    }

    fn notify(&mut self, event: EngineEvent) {
        for observer in &mut self.observers {
            observer.on_event(&event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::conditions::SimulatedConditions;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Recorder(Rc<RefCell<Vec<EngineEvent>>>);

    impl EngineObserver for Recorder {
        fn on_event(&mut self, event: &EngineEvent) {
            self.0.borrow_mut().push(event.clone());
        }
    }

    fn store_400() -> PlacementStore {
        let config = EngineConfig {
            canvas_width: 400.0,
            canvas_height: 400.0,
            ..Default::default()
        };
        PlacementStore::new(config, Box::new(SimulatedConditions::new(400.0, 400.0)))
    }

    fn spec(name: &str) -> PlantSpec {
        let specs = catalog::builtin();
        catalog::find_spec(&specs, name).unwrap().clone()
    }

    #[test]
    fn test_add_assigns_default_size() {
        let mut store = store_400();
        let sizeless = PlantSpec::new("Seedling", "sp.", PlantKind::Perennial);
        let plant = store.add(&sizeless, 100.0, 100.0, false);
        assert_eq!(plant.size, store.config().default_plant_size);
    }

    #[test]
    fn test_add_appends_to_z_order() {
        let mut store = store_400();
        let first = store.add(&spec("Wild Ginger"), 100.0, 100.0, false);
        let second = store.add(&spec("Christmas Fern"), 100.0, 100.0, false);
        let all = store.all();
        assert_eq!(all[0].id, first.id);
        assert_eq!(all[1].id, second.id);
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        let mut store = store_400();
        store.add(&spec("Wild Ginger"), 100.0, 100.0, false);
        store.remove(PlantId::new());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_remove_clears_fixed_membership() {
        let mut store = store_400();
        let plant = store.add(&spec("Wild Ginger"), 100.0, 100.0, true);
        assert!(store.is_fixed(plant.id));
        store.remove(plant.id);
        assert!(!store.is_fixed(plant.id));
        assert!(store.fixed_only().is_empty());
    }

    #[test]
    fn test_move_to_does_not_recompute() {
        let mut store = store_400();
        // Bluestem wants full_sun; (50, 50) is full_shade, so one violation
        let plant = store.add(&spec("Little Bluestem"), 50.0, 50.0, false);
        assert_eq!(store.violations().len(), 1);

        // drag into the full_sun band: stale snapshot until finalize
        store.move_to(plant.id, 50.0, 380.0);
        assert_eq!(store.violations().len(), 1);

        store.finalize(plant.id);
        assert!(store.violations().is_empty());
    }

    #[test]
    fn test_move_to_allows_out_of_bounds() {
        let mut store = store_400();
        let plant = store.add(&spec("Wild Ginger"), 100.0, 100.0, false);
        store.move_to(plant.id, -200.0, 900.0);
        let dragged = store.plant(plant.id).unwrap();
        assert_eq!(dragged.position, Vec2::new(-200.0, 900.0));
    }

    #[test]
    fn test_finalize_clamps_into_bounds() {
        let mut store = store_400();
        let plant = store.add(&spec("Purple Coneflower"), 100.0, 380.0, false);
        store.move_to(plant.id, -200.0, 900.0);
        store.finalize(plant.id);
        let settled = store.plant(plant.id).unwrap();
        assert_eq!(settled.position, Vec2::new(15.0, 385.0));
    }

    #[test]
    fn test_finalize_snaps_when_enabled() {
        let config = EngineConfig {
            canvas_width: 400.0,
            canvas_height: 400.0,
            snap_to_grid: true,
            grid_size: 20.0,
            ..Default::default()
        };
        let mut store =
            PlacementStore::new(config, Box::new(SimulatedConditions::new(400.0, 400.0)));
        let plant = store.add(&spec("Wild Ginger"), 107.0, 233.0, false);
        store.finalize(plant.id);
        let settled = store.plant(plant.id).unwrap();
        assert_eq!(settled.position, Vec2::new(100.0, 240.0));
    }

    #[test]
    fn test_finalize_unknown_is_noop() {
        let mut store = store_400();
        store.finalize(PlantId::new()); // must not panic or notify
    }

    #[test]
    fn test_toggle_fixed_flips_and_notifies() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut store = store_400();
        store.subscribe(Box::new(Recorder(events.clone())));

        let plant = store.add(&spec("Wild Ginger"), 100.0, 100.0, false);
        store.toggle_fixed(plant.id);
        assert!(store.is_fixed(plant.id));
        store.toggle_fixed(plant.id);
        assert!(!store.is_fixed(plant.id));

        let fixed_events: Vec<bool> = events
            .borrow()
            .iter()
            .filter_map(|event| match event {
                EngineEvent::FixedStatusChanged { fixed, .. } => Some(*fixed),
                _ => None,
            })
            .collect();
        assert_eq!(fixed_events, vec![true, false]);
    }

    #[test]
    fn test_toggle_fixed_unknown_is_silent() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut store = store_400();
        store.subscribe(Box::new(Recorder(events.clone())));
        store.toggle_fixed(PlantId::new());
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn test_pick_matches_disc_and_reverse_z() {
        let mut store = store_400();
        let below = store.add(&spec("Purple Coneflower"), 200.0, 200.0, false);
        let above = store.add(&spec("Black-Eyed Susan"), 205.0, 200.0, false);

        // both discs cover (202, 200); the most recently added wins
        let hit = store.pick(202.0, 200.0).unwrap();
        assert_eq!(hit.id, above.id);

        store.bring_to_front(below.id);
        let hit = store.pick(202.0, 200.0).unwrap();
        assert_eq!(hit.id, below.id);
    }

    #[test]
    fn test_pick_misses_outside_radius() {
        let mut store = store_400();
        store.add(&spec("Wild Ginger"), 200.0, 200.0, false); // size 15
        assert!(store.pick(210.0, 200.0).is_none());
        assert!(store.pick(207.0, 200.0).is_some());
    }

    #[test]
    fn test_snapshots_are_defensive_copies() {
        let mut store = store_400();
        store.add(&spec("Wild Ginger"), 100.0, 100.0, false);

        let mut all = store.all();
        all.clear();
        assert_eq!(store.len(), 1);

        let mut recommendations = store.recommendations();
        recommendations.push("Poison Ivy".into());
        assert!(!store.recommendations().contains(&"Poison Ivy".to_string()));
    }

    #[test]
    fn test_changed_events_only_on_change() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut store = store_400();
        store.subscribe(Box::new(Recorder(events.clone())));

        // no requirements violated, no companions: adding in a compatible
        // spot emits recommendations (it has companions) but no violations
        let plant = store.add(&spec("Christmas Fern"), 200.0, 50.0, false);

        let violation_events = events
            .borrow()
            .iter()
            .filter(|event| matches!(event, EngineEvent::ViolationsChanged { .. }))
            .count();
        assert_eq!(violation_events, 0);

        // finalizing without moving changes nothing derived
        events.borrow_mut().clear();
        store.finalize(plant.id);
        let derived_events = events
            .borrow()
            .iter()
            .filter(|event| {
                matches!(
                    event,
                    EngineEvent::ViolationsChanged { .. }
                        | EngineEvent::RecommendationsChanged { .. }
                )
            })
            .count();
        assert_eq!(derived_events, 0);
    }

    #[test]
    fn test_set_bounds_applies_on_next_finalize() {
        let mut store = store_400();
        let plant = store.add(&spec("Wild Ginger"), 390.0, 390.0, false);
        store.set_bounds(200.0, 200.0);
        // untouched until committed
        assert_eq!(store.plant(plant.id).unwrap().position, Vec2::new(390.0, 390.0));
        store.finalize(plant.id);
        let settled = store.plant(plant.id).unwrap();
        assert_eq!(settled.position, Vec2::new(192.5, 192.5));
    }
}

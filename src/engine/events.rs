//! Notification port
//!
//! The store publishes to registered observers, so consumers (renderers,
//! warning panels, recommendation panels) stay decoupled from any UI
//! runtime. Payloads are snapshots: observers must not assume they reflect
//! later store state.

use serde::{Deserialize, Serialize};

use crate::core::types::PlantId;
use crate::engine::compat::EnvironmentalViolation;

/// Change notifications emitted by the placement store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EngineEvent {
    /// The violation list was recomputed and differs from the previous one
    ViolationsChanged {
        violations: Vec<EnvironmentalViolation>,
    },
    /// The companion recommendation list changed
    RecommendationsChanged { recommendations: Vec<String> },
    /// A plant's fixed status was toggled
    FixedStatusChanged { plant_id: PlantId, fixed: bool },
    /// A drag or placement was committed at the given position
    PositionFinalized { plant_id: PlantId, x: f32, y: f32 },
}

/// Subscriber to engine change notifications
///
/// Called synchronously from inside store mutations; implementations must
/// not call back into the store.
pub trait EngineObserver {
    fn on_event(&mut self, event: &EngineEvent);
}

/// Observer that forwards events to the tracing subscriber
///
/// The default wiring for the CLI; real frontends register their own
/// observers instead.
#[derive(Debug, Default)]
pub struct LoggingObserver;

impl EngineObserver for LoggingObserver {
    fn on_event(&mut self, event: &EngineEvent) {
        match event {
            EngineEvent::ViolationsChanged { violations } => {
                tracing::info!("violations changed: {} active", violations.len());
            }
            EngineEvent::RecommendationsChanged { recommendations } => {
                tracing::info!("recommendations changed: {:?}", recommendations);
            }
            EngineEvent::FixedStatusChanged { plant_id, fixed } => {
                tracing::info!("plant {:?} fixed = {}", plant_id, fixed);
            }
            EngineEvent::PositionFinalized { plant_id, x, y } => {
                tracing::info!("plant {:?} settled at ({:.1}, {:.1})", plant_id, x, y);
            }
        }
    }
}

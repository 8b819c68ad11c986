//! The interactive placement engine
//!
//! Mutations enter through [`store::PlacementStore`] and run the full
//! pipeline synchronously: shift resolution, compatibility recompute,
//! recommendation recompute, notifications. The sibling modules are the
//! pipeline stages plus the optional helpers (suggestion search, scatter,
//! suitability scoring, automatic design generation).

pub mod compat;
pub mod design;
pub mod events;
pub mod recommend;
pub mod scatter;
pub mod search;
pub mod shift;
pub mod store;
pub mod suitability;

pub use compat::EnvironmentalViolation;
pub use events::{EngineEvent, EngineObserver};
pub use store::{PlacementStore, Plant};

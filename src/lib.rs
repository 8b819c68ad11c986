//! Verdant - Interactive Native-Planting Design Engine

pub mod catalog;
pub mod conditions;
pub mod core;
pub mod engine;

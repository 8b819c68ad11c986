//! Banded simulated conditions provider
//!
//! Stands in for real soil-survey and climate data when none is wired up.
//! The canvas is split into four horizontal sun-exposure bands (full shade
//! at low y through full sun at high y) and three vertical water-condition
//! bands (dry on the left, wet on the right). Soil type, soil pH, and
//! hardiness zone are uniform across the canvas and default to a
//! Fayetteville, AR profile (loam, pH 6.5, zone 7a).

use super::{
    ConditionMap, ConditionValue, ConditionsProvider, HARDINESS_ZONE, SOIL_PH, SOIL_TYPE,
    SUN_EXPOSURE, WATER_CONDITION,
};

/// Sun-exposure bands from the low-y edge upward
const SUN_BANDS: [&str; 4] = ["full_shade", "part_shade", "part_sun", "full_sun"];

/// Water-condition bands from the low-x edge rightward
const WATER_BANDS: [&str; 3] = ["dry", "medium", "wet"];

/// Default provider partitioning the canvas into condition bands
#[derive(Debug, Clone)]
pub struct SimulatedConditions {
    width: f32,
    height: f32,
    soil_type: String,
    soil_ph: f64,
    hardiness_zone: String,
}

impl SimulatedConditions {
    /// Provider over a canvas of the given size with the default soil profile
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            soil_type: "loam".to_string(),
            soil_ph: 6.5,
            hardiness_zone: "7a".to_string(),
        }
    }

    /// Override the uniform soil profile (type, pH, hardiness zone)
    pub fn with_soil(mut self, soil_type: impl Into<String>, soil_ph: f64, zone: impl Into<String>) -> Self {
        self.soil_type = soil_type.into();
        self.soil_ph = soil_ph;
        self.hardiness_zone = zone.into();
        self
    }

    /// Sun band for a y coordinate; out-of-range y clamps to the edge bands
    pub fn sun_band(&self, y: f32) -> &'static str {
        let band = (y / self.height * SUN_BANDS.len() as f32).floor() as i32;
        let index = band.max(0).min(SUN_BANDS.len() as i32 - 1) as usize;
        SUN_BANDS[index]
    }

    /// Water band for an x coordinate; out-of-range x clamps to the edge bands
    pub fn water_band(&self, x: f32) -> &'static str {
        let band = (x / self.width * WATER_BANDS.len() as f32).floor() as i32;
        let index = band.max(0).min(WATER_BANDS.len() as i32 - 1) as usize;
        WATER_BANDS[index]
    }
}

impl ConditionsProvider for SimulatedConditions {
    fn conditions_at(&self, x: f32, y: f32) -> ConditionMap {
        let mut conditions = ConditionMap::default();
        conditions.insert(SOIL_TYPE.into(), ConditionValue::Text(self.soil_type.clone()));
        conditions.insert(SOIL_PH.into(), ConditionValue::Number(self.soil_ph));
        conditions.insert(
            HARDINESS_ZONE.into(),
            ConditionValue::Text(self.hardiness_zone.clone()),
        );
        conditions.insert(SUN_EXPOSURE.into(), ConditionValue::from(self.sun_band(y)));
        conditions.insert(WATER_CONDITION.into(), ConditionValue::from(self.water_band(x)));
        conditions
    }
}

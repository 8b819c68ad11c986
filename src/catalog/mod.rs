//! Plant spec catalog
//!
//! Specs are immutable templates the store instantiates plants from. The
//! built-in set covers a spread of Ozark-region natives across the sun and
//! water bands; user catalogs load from the same JSON shape:
//!
//! ```json
//! {
//!   "name": "Purple Coneflower",
//!   "species": "Echinacea purpurea",
//!   "kind": "perennial",
//!   "size": 30.0,
//!   "requirements": [
//!     { "name": "sun_exposure", "expected": ["full_sun", "part_sun"] },
//!     { "name": "soil_ph", "expected": { "min": 6.0, "max": 7.2 } }
//!   ],
//!   "companions": ["Black-Eyed Susan"]
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::conditions::{Expected, Requirement, SOIL_PH, SOIL_TYPE, SUN_EXPOSURE, WATER_CONDITION};
use crate::core::error::{Result, VerdantError};
use crate::core::types::PlantKind;

/// Template a placed plant is instantiated from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlantSpec {
    /// Common name; recommendation matching is by this name
    pub name: String,
    /// Botanical name
    pub species: String,
    pub kind: PlantKind,
    /// Mature diameter in canvas units; non-positive means "use the
    /// engine's default size"
    #[serde(default)]
    pub size: f32,
    /// Environmental requirements in declared order
    #[serde(default)]
    pub requirements: Vec<Requirement>,
    /// Common names of beneficial neighbors
    #[serde(default)]
    pub companions: Vec<String>,
}

impl PlantSpec {
    pub fn new(name: impl Into<String>, species: impl Into<String>, kind: PlantKind) -> Self {
        Self {
            name: name.into(),
            species: species.into(),
            kind,
            size: 0.0,
            requirements: Vec::new(),
            companions: Vec::new(),
        }
    }
}

/// Parse a JSON array of plant specs
pub fn load_json(text: &str) -> Result<Vec<PlantSpec>> {
    let specs: Vec<PlantSpec> = serde_json::from_str(text)?;
    Ok(specs)
}

/// Find a spec by common name, case-insensitively
pub fn find_spec<'a>(specs: &'a [PlantSpec], name: &str) -> Option<&'a PlantSpec> {
    specs
        .iter()
        .find(|spec| spec.name.eq_ignore_ascii_case(name))
}

/// Like `find_spec`, but an unknown name is an error
pub fn require_spec<'a>(specs: &'a [PlantSpec], name: &str) -> Result<&'a PlantSpec> {
    find_spec(specs, name).ok_or_else(|| VerdantError::UnknownSpec(name.to_string()))
}

fn sun(values: &[&str]) -> Requirement {
    Requirement::new(
        SUN_EXPOSURE,
        Expected::OneOf(values.iter().map(|v| (*v).into()).collect()),
    )
}

fn water(values: &[&str]) -> Requirement {
    Requirement::new(
        WATER_CONDITION,
        Expected::OneOf(values.iter().map(|v| (*v).into()).collect()),
    )
}

fn ph(min: f64, max: f64) -> Requirement {
    Requirement::new(SOIL_PH, Expected::Range { min, max })
}

/// The built-in native plant set
pub fn builtin() -> Vec<PlantSpec> {
    vec![
        PlantSpec {
            name: "Purple Coneflower".into(),
            species: "Echinacea purpurea".into(),
            kind: PlantKind::Perennial,
            size: 30.0,
            requirements: vec![sun(&["full_sun", "part_sun"]), water(&["dry", "medium"]), ph(6.0, 7.2)],
            companions: vec![
                "Black-Eyed Susan".into(),
                "Little Bluestem".into(),
                "Butterfly Weed".into(),
            ],
        },
        PlantSpec {
            name: "Black-Eyed Susan".into(),
            species: "Rudbeckia hirta".into(),
            kind: PlantKind::Perennial,
            size: 25.0,
            requirements: vec![sun(&["full_sun", "part_sun"]), water(&["dry", "medium"])],
            companions: vec!["Purple Coneflower".into(), "Little Bluestem".into()],
        },
        PlantSpec {
            name: "Butterfly Weed".into(),
            species: "Asclepias tuberosa".into(),
            kind: PlantKind::Perennial,
            size: 25.0,
            requirements: vec![sun(&["full_sun"]), water(&["dry"]), ph(6.0, 7.5)],
            companions: vec!["Purple Coneflower".into(), "Little Bluestem".into()],
        },
        PlantSpec {
            name: "Little Bluestem".into(),
            species: "Schizachyrium scoparium".into(),
            kind: PlantKind::Grass,
            size: 20.0,
            requirements: vec![sun(&["full_sun"]), water(&["dry", "medium"])],
            companions: vec!["Butterfly Weed".into(), "Black-Eyed Susan".into()],
        },
        PlantSpec {
            name: "Eastern Redbud".into(),
            species: "Cercis canadensis".into(),
            kind: PlantKind::Tree,
            size: 80.0,
            requirements: vec![
                sun(&["full_sun", "part_sun", "part_shade"]),
                water(&["medium"]),
                ph(6.0, 8.0),
                Requirement::new(SOIL_TYPE, Expected::OneOf(vec!["loam".into(), "clay".into()])),
            ],
            companions: vec!["Christmas Fern".into(), "Wild Ginger".into()],
        },
        PlantSpec {
            name: "Oakleaf Hydrangea".into(),
            species: "Hydrangea quercifolia".into(),
            kind: PlantKind::Shrub,
            size: 60.0,
            requirements: vec![sun(&["part_sun", "part_shade"]), water(&["medium"]), ph(5.5, 6.8)],
            companions: vec!["Christmas Fern".into()],
        },
        PlantSpec {
            name: "Christmas Fern".into(),
            species: "Polystichum acrostichoides".into(),
            kind: PlantKind::Fern,
            size: 20.0,
            requirements: vec![sun(&["part_shade", "full_shade"]), water(&["medium", "wet"])],
            companions: vec!["Wild Ginger".into(), "Oakleaf Hydrangea".into()],
        },
        PlantSpec {
            name: "Wild Ginger".into(),
            species: "Asarum canadense".into(),
            kind: PlantKind::Groundcover,
            size: 15.0,
            requirements: vec![sun(&["part_shade", "full_shade"]), water(&["medium", "wet"])],
            companions: vec!["Christmas Fern".into()],
        },
        PlantSpec {
            name: "Cardinal Flower".into(),
            species: "Lobelia cardinalis".into(),
            kind: PlantKind::Perennial,
            size: 20.0,
            requirements: vec![
                sun(&["full_sun", "part_sun", "part_shade"]),
                Requirement::new(WATER_CONDITION, Expected::Exactly("wet".into())),
            ],
            companions: vec!["Blue Flag Iris".into()],
        },
        PlantSpec {
            name: "Blue Flag Iris".into(),
            species: "Iris virginica".into(),
            kind: PlantKind::Perennial,
            size: 25.0,
            requirements: vec![sun(&["full_sun", "part_sun"]), water(&["wet"])],
            companions: vec!["Cardinal Flower".into()],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_names_unique() {
        let specs = builtin();
        for (i, a) in specs.iter().enumerate() {
            for b in &specs[i + 1..] {
                assert_ne!(a.name, b.name, "duplicate spec name {}", a.name);
            }
        }
    }

    #[test]
    fn test_builtin_sizes_positive() {
        for spec in builtin() {
            assert!(spec.size > 0.0, "{} has non-positive size", spec.name);
        }
    }

    #[test]
    fn test_find_spec_case_insensitive() {
        let specs = builtin();
        assert!(find_spec(&specs, "purple coneflower").is_some());
        assert!(find_spec(&specs, "PURPLE CONEFLOWER").is_some());
        assert!(find_spec(&specs, "dandelion").is_none());
    }

    #[test]
    fn test_require_spec_unknown_is_error() {
        let specs = builtin();
        assert!(require_spec(&specs, "wild ginger").is_ok());
        match require_spec(&specs, "Kudzu") {
            Err(VerdantError::UnknownSpec(name)) => assert_eq!(name, "Kudzu"),
            other => panic!("expected UnknownSpec, got {:?}", other),
        }
    }

    #[test]
    fn test_load_json_round_trip() {
        let specs = builtin();
        let json = serde_json::to_string(&specs).unwrap();
        let back = load_json(&json).unwrap();
        assert_eq!(back, specs);
    }

    #[test]
    fn test_load_json_defaults() {
        let specs = load_json(
            r#"[{ "name": "Mystery Sedge", "species": "Carex sp.", "kind": "grass" }]"#,
        )
        .unwrap();
        assert_eq!(specs.len(), 1);
        assert_eq!(specs[0].size, 0.0);
        assert!(specs[0].requirements.is_empty());
        assert!(specs[0].companions.is_empty());
    }

    #[test]
    fn test_load_json_malformed_is_error() {
        assert!(load_json("not json").is_err());
    }

    #[test]
    fn test_companions_reference_real_specs() {
        let specs = builtin();
        for spec in &specs {
            for companion in &spec.companions {
                assert!(
                    find_spec(&specs, companion).is_some(),
                    "{} lists unknown companion {}",
                    spec.name,
                    companion
                );
            }
        }
    }
}

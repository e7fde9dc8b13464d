//! Exercise catalog.
//!
//! A read-only store of [`Exercise`] records, loaded once and never mutated.
//! The routine builder only ever talks to it through [`Catalog::query`].
//!
//! ## Data file format
//!
//! Catalog files are JSON objects keyed by exercise name:
//!
//! ```json
//! {
//!     "lunges": {
//!         "description": "alternate steps forward with weights",
//!         "equipment": ["dumbbell", "kettle_bell"],
//!         "intensity": "medium",
//!         "aerobic_type": "strength",
//!         "target": ["legs"],
//!         "time": 120
//!     }
//! }
//! ```

mod data;
mod exercise;

pub use exercise::{AerobicType, Equipment, Exercise, Intensity, Target, DEFAULT_DURATION_SECS};

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, CoreError};

/// One entry of the name-keyed data file.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ExerciseRecord {
    #[serde(default)]
    description: String,
    #[serde(default)]
    equipment: Vec<Equipment>,
    intensity: Intensity,
    aerobic_type: AerobicType,
    #[serde(default)]
    target: Vec<Target>,
    #[serde(default = "default_time")]
    time: u32,
}

fn default_time() -> u32 {
    DEFAULT_DURATION_SECS
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// Sorted by name; names are unique.
    exercises: Vec<Exercise>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate names.
    pub fn new(mut exercises: Vec<Exercise>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for exercise in &exercises {
            if !seen.insert(exercise.name.as_str()) {
                return Err(CatalogError::DuplicateName(exercise.name.clone()));
            }
        }
        exercises.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(Self { exercises })
    }

    /// The stock exercise list.
    pub fn builtin() -> Self {
        let mut exercises = data::builtin_exercises();
        exercises.sort_by(|a, b| a.name.cmp(&b.name));
        Self { exercises }
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let records: BTreeMap<String, ExerciseRecord> = serde_json::from_str(json)?;
        let exercises = records
            .into_iter()
            .map(|(name, record)| Exercise {
                name,
                description: record.description,
                equipment: record.equipment.into_iter().collect(),
                intensity: record.intensity,
                aerobic_type: record.aerobic_type,
                target: record.target.into_iter().collect(),
                duration_secs: record.time,
            })
            .collect();
        Self::new(exercises)
    }

    pub fn to_json(&self) -> Result<String, CatalogError> {
        let records: BTreeMap<&str, ExerciseRecord> = self
            .exercises
            .iter()
            .map(|e| {
                (
                    e.name.as_str(),
                    ExerciseRecord {
                        description: e.description.clone(),
                        equipment: e.equipment.iter().copied().collect(),
                        intensity: e.intensity,
                        aerobic_type: e.aerobic_type,
                        target: e.target.iter().copied().collect(),
                        time: e.duration_secs,
                    },
                )
            })
            .collect();
        Ok(serde_json::to_string_pretty(&records)?)
    }

    /// Load a catalog data file from disk.
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        let content = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&content)?;
        tracing::info!(path = %path.display(), exercises = catalog.len(), "loaded exercise catalog");
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }

    pub fn exercises(&self) -> &[Exercise] {
        &self.exercises
    }

    /// Case-insensitive lookup by name.
    pub fn get(&self, name: &str) -> Result<&Exercise, CatalogError> {
        let wanted = normalize_name(name);
        self.exercises
            .iter()
            .find(|e| normalize_name(&e.name) == wanted)
            .ok_or_else(|| CatalogError::UnknownExercise(name.to_string()))
    }

    /// Exercises whose name is not excluded and which need none of the
    /// excluded equipment, in name order.
    ///
    /// Name matching ignores case and surrounding whitespace.
    pub fn query(
        &self,
        excluded_names: &BTreeSet<String>,
        excluded_equipment: &BTreeSet<Equipment>,
    ) -> Vec<&Exercise> {
        let excluded: HashSet<String> = excluded_names.iter().map(|n| normalize_name(n)).collect();
        self.exercises
            .iter()
            .filter(|e| !excluded.contains(&normalize_name(&e.name)))
            .filter(|e| !e.uses_any(excluded_equipment))
            .collect()
    }
}

/// Cardio-tagged subset of a query result.
pub fn cardio<'a>(exercises: &[&'a Exercise]) -> Vec<&'a Exercise> {
    of_type(exercises, AerobicType::Cardio)
}

/// Strength-tagged subset of a query result.
pub fn strength<'a>(exercises: &[&'a Exercise]) -> Vec<&'a Exercise> {
    of_type(exercises, AerobicType::Strength)
}

fn of_type<'a>(exercises: &[&'a Exercise], aerobic_type: AerobicType) -> Vec<&'a Exercise> {
    exercises
        .iter()
        .copied()
        .filter(|e| e.aerobic_type == aerobic_type)
        .collect()
}

fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(exercises: &[&Exercise]) -> Vec<String> {
        exercises.iter().map(|e| e.name.clone()).collect()
    }

    #[test]
    fn builtin_catalog_has_unique_sorted_names() {
        let catalog = Catalog::builtin();
        assert!(!catalog.is_empty());
        let all: Vec<&str> = catalog.exercises().iter().map(|e| e.name.as_str()).collect();
        let mut sorted = all.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(all, sorted);
    }

    #[test]
    fn query_excludes_names_case_insensitively() {
        let catalog = Catalog::builtin();
        let excluded: BTreeSet<String> = [" Burpees ".to_string()].into_iter().collect();
        let result = catalog.query(&excluded, &BTreeSet::new());
        assert!(!names(&result).contains(&"burpees".to_string()));
        assert_eq!(result.len(), catalog.len() - 1);
    }

    #[test]
    fn query_excludes_any_matching_equipment() {
        let catalog = Catalog::builtin();
        let excluded: BTreeSet<Equipment> = [Equipment::Dumbbell].into_iter().collect();
        let result = catalog.query(&BTreeSet::new(), &excluded);
        assert!(result.iter().all(|e| !e.equipment.contains(&Equipment::Dumbbell)));
        // lunges needs dumbbell *or* kettle bell; any overlap excludes it
        assert!(!names(&result).contains(&"lunges".to_string()));
        assert!(names(&result).contains(&"spot running".to_string()));
    }

    #[test]
    fn partitions_leave_out_recovery() {
        let catalog = Catalog::builtin();
        let all = catalog.query(&BTreeSet::new(), &BTreeSet::new());
        let cardio = cardio(&all);
        let strength = strength(&all);
        assert!(cardio.iter().all(|e| e.aerobic_type == AerobicType::Cardio));
        assert!(strength.iter().all(|e| e.aerobic_type == AerobicType::Strength));
        assert!(cardio.len() + strength.len() < all.len());
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let plank = Exercise::new("plank", "", &[], Intensity::Low, AerobicType::Strength, &[]);
        let err = Catalog::new(vec![plank.clone(), plank]).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateName(name) if name == "plank"));
    }

    #[test]
    fn json_round_trip_keeps_records() {
        let json = r#"{
            "spot running": {
                "description": "",
                "equipment": [],
                "intensity": "high",
                "aerobic_type": "cardio",
                "target": ["full_body"],
                "time": 90
            },
            "lunges": {
                "description": "alternate steps forward with weights",
                "equipment": ["dumbbell", "kettle_bell"],
                "intensity": "medium",
                "aerobic_type": "strength",
                "target": ["legs"]
            }
        }"#;
        let catalog = Catalog::from_json(json).unwrap();
        assert_eq!(catalog.len(), 2);
        let lunges = catalog.get("LUNGES").unwrap();
        assert_eq!(lunges.duration_secs, DEFAULT_DURATION_SECS);
        assert_eq!(lunges.equipment.len(), 2);
        assert_eq!(catalog.get("spot running").unwrap().duration_secs, 90);

        let reparsed = Catalog::from_json(&catalog.to_json().unwrap()).unwrap();
        assert_eq!(reparsed.exercises(), catalog.exercises());
    }

    #[test]
    fn unknown_exercise_lookup_fails() {
        let catalog = Catalog::builtin();
        assert!(matches!(
            catalog.get("handstand"),
            Err(CatalogError::UnknownExercise(_))
        ));
    }
}

//! Routine builder.
//!
//! Turns timing parameters and exclusion filters into an ordered list of
//! exercise segments interleaved with rest segments.
//!
//! ## Timing
//!
//! ```text
//! segment_count = floor(length * 60 / (interval + minimum_rest))
//! actual_rest   = floor(minimum_rest + leftover / segment_count)
//! ```
//!
//! where `leftover` is whatever part of the length budget the minimum rests
//! did not use. All arithmetic is integer floor, so the routine may run up to
//! `segment_count` seconds short of the requested length.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_pcg::Mcg128Xsl64;
use serde::{Deserialize, Serialize};

use super::config::RoutineConfig;
use super::segment::{Routine, Segment};
use crate::catalog::{self, AerobicType, Catalog, Equipment, Exercise, Intensity, Target};
use crate::error::BuildError;

/// Longest workout a build accepts: one day.
pub const MAX_WORKOUT_LENGTH_MIN: u32 = 24 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutType {
    /// Cardio exercises only.
    Cardio,
    /// Strength exercises only.
    Strength,
    /// Cardio on even segments, strength on odd ones.
    #[serde(rename = "cardio_strength", alias = "mixed")]
    Mixed,
    /// Any cardio or strength exercise.
    #[serde(alias = "random")]
    FullyRandom,
    /// Fixed four-segment routine for smoke tests.
    Test,
}

impl WorkoutType {
    pub const ALL: [WorkoutType; 5] = [
        WorkoutType::Cardio,
        WorkoutType::Strength,
        WorkoutType::Mixed,
        WorkoutType::FullyRandom,
        WorkoutType::Test,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            WorkoutType::Cardio => "Cardio",
            WorkoutType::Strength => "Strength",
            WorkoutType::Mixed => "Cardio/Strength",
            WorkoutType::FullyRandom => "Random",
            WorkoutType::Test => "Test",
        }
    }
}

impl fmt::Display for WorkoutType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for WorkoutType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cardio" => Ok(WorkoutType::Cardio),
            "strength" => Ok(WorkoutType::Strength),
            "mixed" | "cardio/strength" | "cardio_strength" => Ok(WorkoutType::Mixed),
            "random" | "fully_random" => Ok(WorkoutType::FullyRandom),
            "test" => Ok(WorkoutType::Test),
            other => Err(format!("unknown workout type: {other}")),
        }
    }
}

/// Per-build parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutineParams {
    /// Seconds per exercise segment.
    pub interval_secs: u32,
    /// Total workout length in minutes.
    pub workout_length_min: u32,
    /// Minimum seconds of rest after each exercise.
    pub minimum_rest_secs: u32,
    #[serde(default)]
    pub excluded_names: BTreeSet<String>,
    #[serde(default)]
    pub excluded_equipment: BTreeSet<Equipment>,
    pub workout_type: WorkoutType,
}

impl Default for RoutineParams {
    fn default() -> Self {
        Self {
            interval_secs: 120,
            workout_length_min: 30,
            minimum_rest_secs: 30,
            excluded_names: ["burpees".to_string()].into_iter().collect(),
            excluded_equipment: BTreeSet::new(),
            workout_type: WorkoutType::Mixed,
        }
    }
}

impl RoutineParams {
    /// Number of exercise segments the parameters allow.
    pub fn segment_count(&self) -> Result<u64, BuildError> {
        if self.interval_secs == 0 {
            return Err(BuildError::InvalidParameters("interval must be greater than 0".into()));
        }
        if self.workout_length_min == 0 {
            return Err(BuildError::InvalidParameters(
                "workout length must be greater than 0".into(),
            ));
        }
        if self.workout_length_min > MAX_WORKOUT_LENGTH_MIN {
            return Err(BuildError::InvalidParameters(format!(
                "workout length must be at most {MAX_WORKOUT_LENGTH_MIN} minutes"
            )));
        }
        let period = u64::from(self.interval_secs) + u64::from(self.minimum_rest_secs);
        Ok(self.length_secs() / period)
    }

    /// Rest duration once the leftover budget is spread across the rests.
    pub fn actual_rest_secs(&self, segment_count: u64) -> u64 {
        if segment_count == 0 {
            return u64::from(self.minimum_rest_secs);
        }
        let period = u64::from(self.interval_secs) + u64::from(self.minimum_rest_secs);
        let leftover = self.length_secs() - segment_count * period;
        u64::from(self.minimum_rest_secs) + leftover / segment_count
    }

    pub fn length_secs(&self) -> u64 {
        u64::from(self.workout_length_min) * 60
    }
}

pub struct RoutineBuilder<'a> {
    catalog: &'a Catalog,
    config: &'a RoutineConfig,
}

impl<'a> RoutineBuilder<'a> {
    pub fn new(catalog: &'a Catalog, config: &'a RoutineConfig) -> Self {
        Self { catalog, config }
    }

    /// Build a routine. The same seed always yields the same routine; `None`
    /// seeds from OS entropy.
    pub fn build(&self, params: &RoutineParams, seed: Option<u64>) -> Result<Routine, BuildError> {
        let mut rng = match seed {
            Some(seed) => Mcg128Xsl64::seed_from_u64(seed),
            None => Mcg128Xsl64::from_entropy(),
        };
        self.build_with_rng(params, &mut rng)
    }

    pub fn build_with_rng<R: Rng + ?Sized>(
        &self,
        params: &RoutineParams,
        rng: &mut R,
    ) -> Result<Routine, BuildError> {
        let segment_count = params.segment_count()?;

        if params.workout_type == WorkoutType::Test {
            return self.test_routine(params);
        }

        if segment_count == 0 {
            return Err(BuildError::ZeroSegments {
                interval_secs: params.interval_secs,
                workout_length_min: params.workout_length_min,
                minimum_rest_secs: params.minimum_rest_secs,
            });
        }

        let actual_rest = u32::try_from(params.actual_rest_secs(segment_count))
            .map_err(|_| BuildError::InvalidParameters("rest period is too long".into()))?;
        if actual_rest == 0 {
            return Err(BuildError::InvalidParameters(
                "rest periods would last 0 seconds; set a minimum rest of at least 1 second".into(),
            ));
        }

        let available: Vec<&Exercise> = self
            .catalog
            .query(&params.excluded_names, &params.excluded_equipment)
            .into_iter()
            .filter(|e| !e.name.eq_ignore_ascii_case(&self.config.rest_period_name))
            .collect();
        let cardio = catalog::cardio(&available);
        let strength = catalog::strength(&available);
        let union: Vec<&Exercise> = available
            .iter()
            .copied()
            .filter(|e| e.aerobic_type != AerobicType::Recovery)
            .collect();

        let mut segments = Vec::with_capacity(segment_count as usize * 2);
        for index in 0..segment_count {
            let pool: &[&Exercise] = match params.workout_type {
                WorkoutType::Cardio => &cardio,
                WorkoutType::Strength => &strength,
                WorkoutType::Mixed if index % 2 == 0 => &cardio,
                WorkoutType::Mixed => &strength,
                // Test returned early; keep the match exhaustive.
                WorkoutType::FullyRandom | WorkoutType::Test => &union,
            };
            let exercise = pool.choose(rng).ok_or(BuildError::EmptyPool {
                workout_type: params.workout_type,
            })?;
            segments.push(Segment::exercise(exercise, params.interval_secs));
            segments.push(Segment::rest(self.config, actual_rest));
        }

        let routine = Routine::new(params.clone(), segments)?;
        tracing::info!(
            workout_type = %params.workout_type,
            exercises = segment_count,
            actual_rest,
            total_secs = routine.total_secs(),
            "built routine"
        );
        Ok(routine)
    }

    fn test_routine(&self, params: &RoutineParams) -> Result<Routine, BuildError> {
        let stretch = |name: &str, target: Target| {
            Exercise::new(
                name,
                "slow and steady",
                &[],
                Intensity::Low,
                AerobicType::Recovery,
                &[target],
            )
        };
        let segments = vec![
            Segment::exercise(&stretch("warm-up stretch", Target::FullBody), self.config.test_exercise_secs),
            Segment::rest(self.config, self.config.test_rest_secs),
            Segment::exercise(&stretch("cool-down stretch", Target::Legs), self.config.test_exercise_secs),
            Segment::rest(self.config, self.config.test_rest_secs),
        ];
        Routine::new(params.clone(), segments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routine::{SegmentKind, REST_PERIOD};

    fn params(interval: u32, length: u32, rest: u32, workout_type: WorkoutType) -> RoutineParams {
        RoutineParams {
            interval_secs: interval,
            workout_length_min: length,
            minimum_rest_secs: rest,
            excluded_names: BTreeSet::new(),
            excluded_equipment: BTreeSet::new(),
            workout_type,
        }
    }

    #[test]
    fn too_short_workout_has_zero_segments() {
        let catalog = Catalog::builtin();
        let config = RoutineConfig::default();
        let builder = RoutineBuilder::new(&catalog, &config);
        let err = builder
            .build(&params(120, 2, 30, WorkoutType::Mixed), Some(1))
            .unwrap_err();
        assert!(matches!(err, BuildError::ZeroSegments { .. }));
    }

    #[test]
    fn leftover_budget_goes_to_rests() {
        let catalog = Catalog::builtin();
        let config = RoutineConfig::default();
        let builder = RoutineBuilder::new(&catalog, &config);
        let routine = builder
            .build(&params(60, 5, 30, WorkoutType::FullyRandom), Some(7))
            .unwrap();

        assert_eq!(routine.len(), 6);
        assert_eq!(routine.actual_rest_secs(), 40);
        assert_eq!(routine.total_secs(), 300);
        for (i, segment) in routine.segments().iter().enumerate() {
            if i % 2 == 0 {
                assert_eq!(segment.kind, SegmentKind::Exercise);
                assert_eq!(segment.duration_secs, 60);
            } else {
                assert_eq!(segment.kind, SegmentKind::Rest);
                assert_eq!(segment.name, REST_PERIOD);
                assert_eq!(segment.duration_secs, 40);
                assert!(segment.equipment.is_empty());
            }
        }
    }

    #[test]
    fn zero_interval_is_invalid() {
        let catalog = Catalog::builtin();
        let config = RoutineConfig::default();
        let builder = RoutineBuilder::new(&catalog, &config);
        let err = builder
            .build(&params(0, 5, 30, WorkoutType::Cardio), None)
            .unwrap_err();
        assert!(matches!(err, BuildError::InvalidParameters(_)));

        let err = builder
            .build(&params(60, 0, 30, WorkoutType::Cardio), None)
            .unwrap_err();
        assert!(matches!(err, BuildError::InvalidParameters(_)));
    }

    #[test]
    fn overlong_workout_is_rejected_before_allocating() {
        let catalog = Catalog::builtin();
        let config = RoutineConfig::default();
        let builder = RoutineBuilder::new(&catalog, &config);
        let err = builder
            .build(&params(1, u32::MAX, 1, WorkoutType::Cardio), Some(1))
            .unwrap_err();
        assert!(matches!(err, BuildError::InvalidParameters(_)));

        let longest = params(60, MAX_WORKOUT_LENGTH_MIN, 30, WorkoutType::Cardio);
        assert_eq!(longest.segment_count().unwrap(), 960);
        assert!(builder.build(&longest, Some(1)).is_ok());
        let too_long = RoutineParams {
            workout_length_min: MAX_WORKOUT_LENGTH_MIN + 1,
            ..longest
        };
        assert!(too_long.segment_count().is_err());
    }

    #[test]
    fn zero_rest_without_leftover_is_invalid() {
        let catalog = Catalog::builtin();
        let config = RoutineConfig::default();
        let builder = RoutineBuilder::new(&catalog, &config);
        let err = builder
            .build(&params(60, 5, 0, WorkoutType::Cardio), Some(3))
            .unwrap_err();
        assert!(matches!(err, BuildError::InvalidParameters(_)));
    }

    #[test]
    fn cardio_only_draws_cardio() {
        let catalog = Catalog::builtin();
        let config = RoutineConfig::default();
        let builder = RoutineBuilder::new(&catalog, &config);
        let routine = builder
            .build(&params(30, 10, 10, WorkoutType::Cardio), Some(11))
            .unwrap();
        for segment in routine.segments().iter().filter(|s| !s.is_rest()) {
            let exercise = catalog.get(&segment.name).unwrap();
            assert_eq!(exercise.aerobic_type, AerobicType::Cardio);
        }
    }

    #[test]
    fn mixed_alternates_pools_by_parity() {
        let catalog = Catalog::builtin();
        let config = RoutineConfig::default();
        let builder = RoutineBuilder::new(&catalog, &config);
        let routine = builder
            .build(&params(30, 10, 10, WorkoutType::Mixed), Some(5))
            .unwrap();
        let exercises: Vec<&Segment> = routine.segments().iter().filter(|s| !s.is_rest()).collect();
        for (i, segment) in exercises.iter().enumerate() {
            let expected = if i % 2 == 0 {
                AerobicType::Cardio
            } else {
                AerobicType::Strength
            };
            assert_eq!(catalog.get(&segment.name).unwrap().aerobic_type, expected);
        }
    }

    #[test]
    fn fully_random_never_draws_recovery() {
        let catalog = Catalog::builtin();
        let config = RoutineConfig::default();
        let builder = RoutineBuilder::new(&catalog, &config);
        let routine = builder
            .build(&params(10, 30, 5, WorkoutType::FullyRandom), Some(99))
            .unwrap();
        for segment in routine.segments().iter().filter(|s| !s.is_rest()) {
            assert_ne!(
                catalog.get(&segment.name).unwrap().aerobic_type,
                AerobicType::Recovery
            );
        }
    }

    #[test]
    fn empty_pool_fails_whole_build() {
        let catalog = Catalog::builtin();
        let config = RoutineConfig::default();
        let builder = RoutineBuilder::new(&catalog, &config);
        let mut p = params(60, 10, 30, WorkoutType::Mixed);
        // every strength exercise in the stock list needs one of these
        p.excluded_equipment = [
            Equipment::Dumbbell,
            Equipment::Mat,
            Equipment::KettleBell,
            Equipment::BoStaff,
            Equipment::MedicineBall,
            Equipment::Bench,
        ]
        .into_iter()
        .collect();
        let err = builder.build(&p, Some(2)).unwrap_err();
        assert_eq!(
            err,
            BuildError::EmptyPool {
                workout_type: WorkoutType::Mixed
            }
        );
    }

    #[test]
    fn same_seed_same_routine() {
        let catalog = Catalog::builtin();
        let config = RoutineConfig::default();
        let builder = RoutineBuilder::new(&catalog, &config);
        let p = params(45, 20, 15, WorkoutType::FullyRandom);
        let a = builder.build(&p, Some(42)).unwrap();
        let b = builder.build(&p, Some(42)).unwrap();
        assert_eq!(a.segments(), b.segments());
    }

    #[test]
    fn test_mode_is_fixed() {
        let catalog = Catalog::default();
        let config = RoutineConfig::default();
        let builder = RoutineBuilder::new(&catalog, &config);
        let routine = builder
            .build(&params(120, 30, 30, WorkoutType::Test), None)
            .unwrap();
        assert_eq!(routine.len(), 4);
        assert_eq!(routine.exercise_count(), 2);
        assert_eq!(routine.total_secs(), 24);
        assert_eq!(routine.get(0).unwrap().name, "warm-up stretch");
    }

    #[test]
    fn workout_type_parses_labels_and_names() {
        assert_eq!("Cardio/Strength".parse::<WorkoutType>().unwrap(), WorkoutType::Mixed);
        assert_eq!("random".parse::<WorkoutType>().unwrap(), WorkoutType::FullyRandom);
        assert_eq!("fully_random".parse::<WorkoutType>().unwrap(), WorkoutType::FullyRandom);
        assert!("yoga".parse::<WorkoutType>().is_err());
        for wt in WorkoutType::ALL {
            assert_eq!(wt.label().parse::<WorkoutType>().unwrap(), wt);
        }
    }
}

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::builder::RoutineParams;
use super::config::RoutineConfig;
use crate::catalog::{Equipment, Exercise};
use crate::error::BuildError;
use crate::timer::time_nice;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    Exercise,
    Rest,
}

/// One scheduled exercise or rest interval. Never mutated once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Duration in seconds.
    pub duration_secs: u32,
    pub kind: SegmentKind,
    /// Always empty for rest segments.
    #[serde(default)]
    pub equipment: BTreeSet<Equipment>,
}

impl Segment {
    /// An exercise segment with its duration overridden to `interval_secs`.
    pub fn exercise(exercise: &Exercise, interval_secs: u32) -> Self {
        Self {
            name: exercise.name.clone(),
            description: exercise.description.clone(),
            duration_secs: interval_secs,
            kind: SegmentKind::Exercise,
            equipment: exercise.equipment.clone(),
        }
    }

    pub fn rest(config: &RoutineConfig, duration_secs: u32) -> Self {
        Self {
            name: config.rest_period_name.clone(),
            description: config.rest_description.clone(),
            duration_secs,
            kind: SegmentKind::Rest,
            equipment: BTreeSet::new(),
        }
    }

    pub fn is_rest(&self) -> bool {
        self.kind == SegmentKind::Rest
    }
}

/// What the UI shows for the active segment.
///
/// Usually a plain copy of the routine's segment. For a final rest with no
/// following exercise the name and description are swapped for a cooldown
/// message; timing is never touched, and the routine itself is left alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySegment {
    pub name: String,
    pub description: String,
    pub duration_secs: u32,
    pub kind: SegmentKind,
    #[serde(default)]
    pub final_stretch: bool,
}

impl DisplaySegment {
    pub fn final_stretch(segment: &Segment, name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            description: message.to_string(),
            duration_secs: segment.duration_secs,
            kind: segment.kind,
            final_stretch: true,
        }
    }
}

impl From<&Segment> for DisplaySegment {
    fn from(segment: &Segment) -> Self {
        Self {
            name: segment.name.clone(),
            description: segment.description.clone(),
            duration_secs: segment.duration_secs,
            kind: segment.kind,
            final_stretch: false,
        }
    }
}

/// Ordered list of segments for one workout session, plus the parameters
/// that generated it. Superseded, never edited.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Routine {
    params: RoutineParams,
    segments: Vec<Segment>,
    actual_rest_secs: u32,
}

impl Routine {
    /// Assemble a routine from prebuilt segments.
    ///
    /// Segments must alternate exercise/rest starting with an exercise and
    /// ending on a rest, and every duration must be at least one second.
    pub fn new(params: RoutineParams, segments: Vec<Segment>) -> Result<Self, BuildError> {
        for (index, segment) in segments.iter().enumerate() {
            let expected = if index % 2 == 0 {
                SegmentKind::Exercise
            } else {
                SegmentKind::Rest
            };
            if segment.kind != expected {
                return Err(BuildError::InvalidParameters(format!(
                    "segment {index} ('{}') should be {expected:?}",
                    segment.name
                )));
            }
            if segment.duration_secs == 0 {
                return Err(BuildError::InvalidParameters(format!(
                    "segment {index} ('{}') has zero duration",
                    segment.name
                )));
            }
        }
        if segments.len() % 2 != 0 {
            return Err(BuildError::InvalidParameters(
                "routine must end on a rest period".into(),
            ));
        }
        let actual_rest_secs = segments
            .iter()
            .find(|s| s.is_rest())
            .map(|s| s.duration_secs)
            .unwrap_or(0);
        Ok(Self {
            params,
            segments,
            actual_rest_secs,
        })
    }

    /// A routine with no segments.
    pub fn empty(params: RoutineParams) -> Self {
        Self {
            params,
            segments: Vec::new(),
            actual_rest_secs: 0,
        }
    }

    pub fn params(&self) -> &RoutineParams {
        &self.params
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn get(&self, index: usize) -> Option<&Segment> {
        self.segments.get(index)
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Rest duration after spreading the leftover length budget.
    pub fn actual_rest_secs(&self) -> u32 {
        self.actual_rest_secs
    }

    pub fn exercise_count(&self) -> usize {
        self.segments.iter().filter(|s| !s.is_rest()).count()
    }

    pub fn total_secs(&self) -> u64 {
        self.segments.iter().map(|s| u64::from(s.duration_secs)).sum()
    }

    /// Cumulative seconds completed up to (but not including) `index`.
    pub fn cumulative_secs(&self, index: usize) -> u64 {
        self.segments
            .iter()
            .take(index)
            .map(|s| u64::from(s.duration_secs))
            .sum()
    }

    pub fn total_duration_nice(&self) -> String {
        time_nice(self.total_secs())
    }

    /// Total length in minutes with two decimals, e.g. `"5.00"`.
    pub fn workout_length_minutes(&self) -> String {
        format!("{:.2}", self.total_secs() as f64 / 60.0)
    }

    /// Bulleted exercise names, rest periods omitted.
    pub fn workout_report(&self) -> String {
        self.segments
            .iter()
            .filter(|s| !s.is_rest())
            .map(|s| format!("• {}", s.name))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Default exercise duration in seconds.
pub const DEFAULT_DURATION_SECS: u32 = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Equipment {
    Band,
    Bench,
    BoStaff,
    Dumbbell,
    Barbell,
    JumpRope,
    KettleBell,
    Mat,
    MedicineBall,
    SwissBall,
}

impl Equipment {
    pub const ALL: [Equipment; 10] = [
        Equipment::Band,
        Equipment::Bench,
        Equipment::BoStaff,
        Equipment::Dumbbell,
        Equipment::Barbell,
        Equipment::JumpRope,
        Equipment::KettleBell,
        Equipment::Mat,
        Equipment::MedicineBall,
        Equipment::SwissBall,
    ];

    /// The snake_case tag used in data files and on the command line.
    pub fn tag(&self) -> &'static str {
        match self {
            Equipment::Band => "band",
            Equipment::Bench => "bench",
            Equipment::BoStaff => "bo_staff",
            Equipment::Dumbbell => "dumbbell",
            Equipment::Barbell => "barbell",
            Equipment::JumpRope => "jump_rope",
            Equipment::KettleBell => "kettle_bell",
            Equipment::Mat => "mat",
            Equipment::MedicineBall => "medicine_ball",
            Equipment::SwissBall => "swiss_ball",
        }
    }
}

impl fmt::Display for Equipment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl std::str::FromStr for Equipment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace([' ', '-'], "_");
        Equipment::ALL
            .into_iter()
            .find(|e| e.tag() == normalized)
            .ok_or_else(|| format!("unknown equipment: {s}"))
    }
}

/// Exercise intensity. Ordered: `Low < Medium < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AerobicType {
    Cardio,
    Strength,
    /// Reserved for rest periods and the test routine; never drawn at random.
    Recovery,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Target {
    Abdominals,
    Arms,
    Back,
    Chest,
    FullBody,
    Legs,
    LowerBody,
    Shoulders,
    UpperBody,
}

/// Immutable catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub equipment: BTreeSet<Equipment>,
    pub intensity: Intensity,
    pub aerobic_type: AerobicType,
    #[serde(default)]
    pub target: BTreeSet<Target>,
    /// Default duration in seconds.
    #[serde(default = "default_duration_secs")]
    pub duration_secs: u32,
}

fn default_duration_secs() -> u32 {
    DEFAULT_DURATION_SECS
}

impl Exercise {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        equipment: &[Equipment],
        intensity: Intensity,
        aerobic_type: AerobicType,
        target: &[Target],
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            equipment: equipment.iter().copied().collect(),
            intensity,
            aerobic_type,
            target: target.iter().copied().collect(),
            duration_secs: DEFAULT_DURATION_SECS,
        }
    }

    /// True if the exercise needs any of the given equipment.
    pub fn uses_any(&self, equipment: &BTreeSet<Equipment>) -> bool {
        !self.equipment.is_disjoint(equipment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intensity_is_ordered() {
        assert!(Intensity::Low < Intensity::Medium);
        assert!(Intensity::Medium < Intensity::High);
    }

    #[test]
    fn equipment_parses_loose_spellings() {
        assert_eq!("Kettle Bell".parse::<Equipment>().unwrap(), Equipment::KettleBell);
        assert_eq!("jump-rope".parse::<Equipment>().unwrap(), Equipment::JumpRope);
        assert_eq!("dumbbell".parse::<Equipment>().unwrap(), Equipment::Dumbbell);
        assert!("trampoline".parse::<Equipment>().is_err());
    }

    #[test]
    fn uses_any_checks_intersection() {
        let lunges = Exercise::new(
            "lunges",
            "",
            &[Equipment::Dumbbell, Equipment::KettleBell],
            Intensity::Medium,
            AerobicType::Strength,
            &[Target::Legs],
        );
        assert!(lunges.uses_any(&[Equipment::KettleBell].into_iter().collect()));
        assert!(!lunges.uses_any(&[Equipment::Mat].into_iter().collect()));
        assert!(!lunges.uses_any(&BTreeSet::new()));
    }
}

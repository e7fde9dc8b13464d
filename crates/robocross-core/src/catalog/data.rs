use super::exercise::{AerobicType, Equipment, Exercise, Intensity, Target};

use AerobicType::{Cardio, Recovery, Strength};
use Equipment::*;
use Intensity::{High, Low, Medium};

/// The stock exercise list shipped with the application.
pub(super) fn builtin_exercises() -> Vec<Exercise> {
    vec![
        Exercise::new(
            "shuttle runs with medicine ball",
            "",
            &[MedicineBall],
            High,
            Cardio,
            &[Target::FullBody],
        ),
        Exercise::new("spot running", "", &[], High, Cardio, &[Target::FullBody]),
        Exercise::new(
            "reverse flies standing",
            "",
            &[Dumbbell],
            Medium,
            Strength,
            &[Target::Back],
        ),
        Exercise::new("jumping jacks", "", &[], High, Cardio, &[Target::FullBody]),
        Exercise::new(
            "dumbbell flies",
            "lie on bench back-facing, raise dumbbells vertically from the side",
            &[Bench, Dumbbell],
            Medium,
            Strength,
            &[Target::Chest],
        ),
        Exercise::new(
            "skipping",
            "use jump rope continuously",
            &[JumpRope],
            High,
            Cardio,
            &[Target::FullBody],
        ),
        Exercise::new(
            "lunges",
            "alternate steps forward with weights",
            &[Dumbbell, KettleBell],
            Medium,
            Strength,
            &[Target::Legs],
        ),
        Exercise::new(
            "three point shoulder raise",
            "raise dumbbells to front, rotate to side, then lower",
            &[Dumbbell],
            Medium,
            Strength,
            &[Target::Shoulders],
        ),
        Exercise::new(
            "three point shoulder raise reversed",
            "raise dumbbells to side, rotate to front, then lower",
            &[Dumbbell],
            Medium,
            Strength,
            &[Target::Shoulders],
        ),
        Exercise::new(
            "crunches",
            "lie on back and reach forward, bending at the hip",
            &[Mat],
            Medium,
            Strength,
            &[Target::Abdominals],
        ),
        Exercise::new(
            "russian twists",
            "lie on back with legs raised, plant a weight on alternate sides",
            &[Mat],
            Medium,
            Strength,
            &[Target::Abdominals],
        ),
        Exercise::new(
            "squats",
            "start standing holding weights, bend legs to low position keeping back straight",
            &[Dumbbell],
            Medium,
            Strength,
            &[Target::Legs],
        ),
        Exercise::new(
            "kettle bell swings",
            "thrust quads to raise kettle bells to chest height",
            &[KettleBell],
            High,
            Strength,
            &[Target::FullBody],
        ),
        Exercise::new(
            "curl + press",
            "standing curl with shoulder press",
            &[Dumbbell],
            Medium,
            Strength,
            &[Target::UpperBody],
        ),
        Exercise::new(
            "dumbbell curls",
            "standing curl",
            &[Dumbbell],
            Medium,
            Strength,
            &[Target::UpperBody],
        ),
        Exercise::new(
            "tricep kickbacks",
            "standing bent at the waist, raise dumbbells to horizontal",
            &[Dumbbell],
            Medium,
            Strength,
            &[Target::Arms],
        ),
        Exercise::new(
            "oblique twist",
            "standing bent at the waist with bo staff at shoulder level, twist to alternate sides",
            &[BoStaff],
            Medium,
            Strength,
            &[Target::Abdominals],
        ),
        Exercise::new(
            "bicycle crunches",
            "lying on back, rotate legs forward in a circular motion",
            &[Mat],
            High,
            Strength,
            &[Target::Abdominals],
        ),
        Exercise::new(
            "bench press",
            "lying on back, raise weights vertically",
            &[Bench, Dumbbell, Barbell],
            Medium,
            Strength,
            &[Target::Chest],
        ),
        Exercise::new(
            "medicine ball slams",
            "raise medicine ball overhead, then slam to ground",
            &[MedicineBall],
            High,
            Strength,
            &[Target::FullBody],
        ),
        Exercise::new(
            "burpees",
            "push up, squat thrust, star jump",
            &[Mat],
            High,
            Cardio,
            &[Target::FullBody],
        ),
        Exercise::new(
            "weighted punches",
            "continuous punches forward holding weights",
            &[Dumbbell],
            High,
            Cardio,
            &[Target::Arms],
        ),
        Exercise::new(
            "plank",
            "facing down with elbows on the floor, hold a straight position",
            &[Mat],
            Low,
            Strength,
            &[Target::Abdominals],
        ),
        Exercise::new(
            "shoulder press",
            "standing up, hold dumbbells at shoulder level and raise vertically",
            &[Dumbbell],
            High,
            Strength,
            &[Target::Shoulders, Target::Arms],
        ),
        Exercise::new(
            "hamstring stretch",
            "sit with legs straight and reach for the toes",
            &[Mat],
            Low,
            Recovery,
            &[Target::Legs],
        ),
        Exercise::new(
            "shoulder rolls",
            "roll the shoulders slowly forwards then backwards",
            &[],
            Low,
            Recovery,
            &[Target::Shoulders],
        ),
    ]
}

mod builder;
mod config;
mod segment;

pub use builder::{RoutineBuilder, RoutineParams, WorkoutType, MAX_WORKOUT_LENGTH_MIN};
pub use config::{RoutineConfig, REST_PERIOD};
pub use segment::{DisplaySegment, Routine, Segment, SegmentKind};

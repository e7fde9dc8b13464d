use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::playback::{PlaybackSnapshot, RunMode};
use crate::routine::DisplaySegment;

/// Every state change in playback produces an Event.
/// UI and announcer adapters consume them in order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// A routine was loaded (or failed to load); `message` is the status
    /// line for the UI ("get ready..." / "no workouts found...").
    RoutineLoaded {
        segment_count: usize,
        total_secs: u64,
        message: String,
        at: DateTime<Utc>,
    },
    RunModeChanged {
        mode: RunMode,
        at: DateTime<Utc>,
    },
    SegmentChanged {
        index: usize,
        segment: DisplaySegment,
        at: DateTime<Utc>,
    },
    /// A notification table entry was reached by the segment clock.
    NotificationFired {
        time_key: String,
        name: String,
        at: DateTime<Utc>,
    },
    WorkoutComplete {
        total_duration_nice: String,
        message: String,
        at: DateTime<Utc>,
    },
    /// The announcer should speak `text`. `generation` identifies the
    /// session it belongs to and must be echoed back on completion.
    SpeechRequested {
        text: String,
        generation: u64,
        at: DateTime<Utc>,
    },
    SpeechFinished {
        at: DateTime<Utc>,
    },
    PlaybackReset {
        at: DateTime<Utc>,
    },
    StateSnapshot {
        snapshot: PlaybackSnapshot,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// Snake-case name of the variant, e.g. `"segment_changed"`.
    pub fn kind(&self) -> &'static str {
        match self {
            Event::RoutineLoaded { .. } => "routine_loaded",
            Event::RunModeChanged { .. } => "run_mode_changed",
            Event::SegmentChanged { .. } => "segment_changed",
            Event::NotificationFired { .. } => "notification_fired",
            Event::WorkoutComplete { .. } => "workout_complete",
            Event::SpeechRequested { .. } => "speech_requested",
            Event::SpeechFinished { .. } => "speech_finished",
            Event::PlaybackReset { .. } => "playback_reset",
            Event::StateSnapshot { .. } => "state_snapshot",
        }
    }
}

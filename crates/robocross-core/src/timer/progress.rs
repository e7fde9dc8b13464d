//! Per-segment progress tracker.
//!
//! Counts elapsed time within one segment against that segment's duration.
//! Its completion is what advances playback; it works in integer
//! milliseconds, so it never suffers from the notification table's
//! whole-second rounding.

use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackerState {
    /// Not started since the last reset.
    Idle,
    Running,
    Paused,
    Finished,
}

#[derive(Debug, Clone)]
pub struct ProgressTracker {
    duration_ms: u64,
    period_ms: u64,
    elapsed_ms: u64,
    state: TrackerState,
}

impl ProgressTracker {
    pub fn new(duration_secs: u32, period: Duration) -> Self {
        Self {
            duration_ms: u64::from(duration_secs) * 1000,
            period_ms: (period.as_millis() as u64).max(1),
            elapsed_ms: 0,
            state: TrackerState::Idle,
        }
    }

    pub fn state(&self) -> TrackerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == TrackerState::Running
    }

    pub fn is_finished(&self) -> bool {
        self.state == TrackerState::Finished
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    /// 0.0 .. 1.0 progress within the segment.
    pub fn progress(&self) -> f64 {
        if self.duration_ms == 0 {
            return if self.is_finished() { 1.0 } else { 0.0 };
        }
        (self.elapsed_ms as f64 / self.duration_ms as f64).min(1.0)
    }

    /// Whole seconds left, rounded up.
    pub fn remaining_secs(&self) -> u64 {
        self.duration_ms.saturating_sub(self.elapsed_ms).div_ceil(1000)
    }

    pub fn start(&mut self) {
        if matches!(self.state, TrackerState::Idle | TrackerState::Paused) {
            self.state = TrackerState::Running;
        }
    }

    pub fn pause(&mut self) {
        if self.state == TrackerState::Running {
            self.state = TrackerState::Paused;
        }
    }

    pub fn reset(&mut self) {
        self.elapsed_ms = 0;
        self.state = TrackerState::Idle;
    }

    /// Advance by one period. Returns `true` exactly once, on the tick that
    /// completes the segment; the tracker stops itself at that point.
    pub fn tick(&mut self) -> bool {
        if self.state != TrackerState::Running {
            return false;
        }
        self.elapsed_ms = (self.elapsed_ms + self.period_ms).min(self.duration_ms);
        if self.elapsed_ms >= self.duration_ms {
            self.state = TrackerState::Finished;
            return true;
        }
        false
    }
}

//! Playback engine.
//!
//! The engine is a tick-driven state machine. It does not use internal
//! threads - the caller is responsible for calling `tick()` once per tick
//! period and for feeding speech completions back via `speech_finished()`.
//!
//! ## State Transitions
//!
//! ```text
//! Paused(not started) -> Playing -> Paused -> Playing -> ... -> Paused(finished)
//! ```
//!
//! Each tick advances the segment clock first, then the active segment's
//! progress tracker. Tracker completion is what moves playback to the next
//! segment; clock hits only produce `NotificationFired` events.
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = PlaybackEngine::new(PlaybackConfig::default(), DuckingFlag::new())?;
//! engine.load(routine)?;
//! engine.toggle_play_pause();
//! // In a loop:
//! for event in engine.tick() { /* render, speak */ }
//! ```

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::config::PlaybackConfig;
use crate::announcer::DuckingFlag;
use crate::error::{BuildError, ConfigError};
use crate::events::Event;
use crate::routine::{DisplaySegment, Routine, RoutineParams, SegmentKind};
use crate::timer::{NotificationTable, ProgressTracker, SegmentClock};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    Paused,
    Playing,
}

/// Mutable session state. Owned by the engine alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackState {
    pub run_mode: RunMode,
    /// `None` before the first segment starts and after the workout ends.
    pub current_index: Option<usize>,
    /// Set by the first activation after a load or reset, so later
    /// activations resume the current segment instead of rebinding to the
    /// first one.
    pub started: bool,
    /// The last session ran to completion.
    pub finished: bool,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            run_mode: RunMode::Paused,
            current_index: None,
            started: false,
            finished: false,
        }
    }
}

/// Read-only view of the engine for UIs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackSnapshot {
    pub run_mode: RunMode,
    pub current_index: Option<usize>,
    pub segment: Option<DisplaySegment>,
    pub segment_count: usize,
    pub elapsed_display: String,
    pub progress_fraction: f64,
    pub is_finished: bool,
    pub ducked: bool,
}

pub struct PlaybackEngine {
    config: PlaybackConfig,
    routine: Arc<Routine>,
    clock: SegmentClock,
    /// One per segment, parallel to the routine.
    trackers: Vec<ProgressTracker>,
    state: PlaybackState,
    /// Bumped on load and reset; speech completions from older generations
    /// are ignored.
    generation: u64,
    speech_in_flight: bool,
    ducking: DuckingFlag,
}

impl PlaybackEngine {
    /// Create an engine with an empty routine.
    pub fn new(config: PlaybackConfig, ducking: DuckingFlag) -> Result<Self, ConfigError> {
        config.validate()?;
        let table = NotificationTable::from_segments(&[], &config.end_notification)
            .map_err(|e| ConfigError::InvalidValue {
                key: "playback.end_notification".into(),
                message: e.to_string(),
            })?;
        let clock = SegmentClock::new(config.tick_period(), Arc::new(table));
        Ok(Self {
            config,
            routine: Arc::new(Routine::empty(RoutineParams::default())),
            clock,
            trackers: Vec::new(),
            state: PlaybackState::default(),
            generation: 0,
            speech_in_flight: false,
            ducking,
        })
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn run_mode(&self) -> RunMode {
        self.state.run_mode
    }

    pub fn current_index(&self) -> Option<usize> {
        self.state.current_index
    }

    pub fn routine(&self) -> &Arc<Routine> {
        &self.routine
    }

    pub fn table(&self) -> &Arc<NotificationTable> {
        self.clock.table()
    }

    pub fn clock(&self) -> &SegmentClock {
        &self.clock
    }

    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_finished(&self) -> bool {
        self.state.finished
    }

    pub fn is_ducked(&self) -> bool {
        self.ducking.is_ducked()
    }

    /// Index of the segment the UI should show: the current one, or the
    /// first when playback has not started.
    fn visible_index(&self) -> Option<usize> {
        match self.state.current_index {
            Some(index) => Some(index),
            None if !self.routine.is_empty() => Some(0),
            None => None,
        }
    }

    pub fn current_segment(&self) -> Option<DisplaySegment> {
        self.visible_index().and_then(|i| self.display_segment(i))
    }

    pub fn elapsed_display(&self) -> String {
        self.clock.elapsed_display()
    }

    /// 0.0 .. 1.0 progress within the visible segment.
    pub fn progress_fraction(&self) -> f64 {
        self.visible_index()
            .and_then(|i| self.trackers.get(i))
            .map(|t| t.progress())
            .unwrap_or(0.0)
    }

    /// Progress of any segment, for rendering the whole strip.
    pub fn segment_progress(&self, index: usize) -> Option<f64> {
        self.trackers.get(index).map(|t| t.progress())
    }

    pub fn snapshot(&self) -> PlaybackSnapshot {
        PlaybackSnapshot {
            run_mode: self.state.run_mode,
            current_index: self.state.current_index,
            segment: self.current_segment(),
            segment_count: self.routine.len(),
            elapsed_display: self.elapsed_display(),
            progress_fraction: self.progress_fraction(),
            is_finished: self.state.finished,
            ducked: self.is_ducked(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Replace the routine and start from scratch, paused.
    ///
    /// The notification table is built before anything is swapped, so a
    /// rejected routine leaves the current one in place.
    pub fn load(&mut self, routine: Routine) -> Result<Vec<Event>, BuildError> {
        let table = NotificationTable::from_segments(routine.segments(), &self.config.end_notification)?;
        self.routine = Arc::new(routine);
        self.clock.set_table(Arc::new(table));
        self.trackers = self
            .routine
            .segments()
            .iter()
            .map(|s| ProgressTracker::new(s.duration_secs, self.config.tick_period()))
            .collect();
        let mut mode_events = Vec::new();
        self.restart_session(&mut mode_events);

        let message = if self.routine.is_empty() {
            BuildError::EmptyPool {
                workout_type: self.routine.params().workout_type,
            }
            .user_message()
        } else {
            self.config.ready_message.clone()
        };
        tracing::info!(segments = self.routine.len(), total_secs = self.routine.total_secs(), "routine loaded");
        let mut events = vec![Event::RoutineLoaded {
            segment_count: self.routine.len(),
            total_secs: self.routine.total_secs(),
            message,
            at: Utc::now(),
        }];
        events.extend(mode_events);
        Ok(events)
    }

    /// Clear the routine after a failed build, reporting why.
    pub fn load_failed(&mut self, error: &BuildError) -> Vec<Event> {
        let params = self.routine.params().clone();
        if let Ok(mut events) = self.load(Routine::empty(params)) {
            for event in &mut events {
                if let Event::RoutineLoaded { message, .. } = event {
                    *message = error.user_message();
                }
            }
            return events;
        }
        Vec::new()
    }

    pub fn toggle_play_pause(&mut self) -> Vec<Event> {
        let mut events = Vec::new();
        if self.routine.is_empty() {
            tracing::debug!("play/pause ignored, no routine loaded");
            return events;
        }
        match self.state.run_mode {
            RunMode::Paused => {
                self.set_run_mode(RunMode::Playing, &mut events);
                self.resume_or_start_segment(&mut events);
            }
            RunMode::Playing => {
                self.set_run_mode(RunMode::Paused, &mut events);
                self.pause_segment(&mut events);
            }
        }
        events
    }

    /// Stop everything and rewind to before the first segment, paused.
    pub fn reset(&mut self) -> Vec<Event> {
        let mut events = vec![Event::PlaybackReset { at: Utc::now() }];
        self.restart_session(&mut events);
        tracing::info!(generation = self.generation, "playback reset");
        events
    }

    /// Call once per tick period.
    pub fn tick(&mut self) -> Vec<Event> {
        let mut events = Vec::new();
        if self.state.run_mode != RunMode::Playing {
            return events;
        }

        if let Some(notification) = self.clock.tick() {
            tracing::debug!(time = %notification.time_key, name = %notification.name, "notification fired");
            events.push(Event::NotificationFired {
                time_key: notification.time_key,
                name: notification.name,
                at: Utc::now(),
            });
        }

        let completed = self
            .state
            .current_index
            .and_then(|i| self.trackers.get_mut(i))
            .is_some_and(|tracker| tracker.tick());
        if completed {
            self.on_segment_progress_complete(&mut events);
        }
        events
    }

    /// Apply a speech completion reported by the announcer.
    pub fn speech_finished(&mut self, generation: u64) -> Vec<Event> {
        if generation != self.generation {
            tracing::debug!(generation, current = self.generation, "ignoring stale speech completion");
            return Vec::new();
        }
        if !self.speech_in_flight {
            return Vec::new();
        }
        self.speech_in_flight = false;
        self.ducking.set(false);
        vec![Event::SpeechFinished { at: Utc::now() }]
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn set_run_mode(&mut self, mode: RunMode, events: &mut Vec<Event>) {
        self.state.run_mode = mode;
        events.push(Event::RunModeChanged {
            mode,
            at: Utc::now(),
        });
    }

    fn resume_or_start_segment(&mut self, events: &mut Vec<Event>) {
        self.state.finished = false;
        match self.state.current_index {
            Some(index) if self.state.started => {
                if let Some(tracker) = self.trackers.get_mut(index) {
                    tracker.start();
                }
                tracing::info!(index, "resuming segment");
                let line = self.entry_announcement(index);
                self.announce(line, events);
            }
            _ => {
                self.state.started = true;
                self.enter_segment(0, true, events);
            }
        }
    }

    fn pause_segment(&mut self, events: &mut Vec<Event>) {
        let Some(index) = self.state.current_index else {
            return;
        };
        if let Some(tracker) = self.trackers.get_mut(index) {
            tracker.pause();
        }
        let name = self
            .display_segment(index)
            .map(|s| s.name)
            .unwrap_or_default();
        tracing::info!(index, "pausing segment");
        self.announce(format!("pausing {name}"), events);
    }

    fn on_segment_progress_complete(&mut self, events: &mut Vec<Event>) {
        if self.state.run_mode != RunMode::Playing {
            return;
        }
        let next = self.state.current_index.map_or(0, |i| i + 1);
        if next >= self.routine.len() {
            self.complete_workout(events);
        } else {
            self.enter_segment(next, false, events);
        }
    }

    /// Make `index` current, start its tracker and tell the UI and the
    /// announcer about it. The first activation after a load or reset does
    /// not announce an exercise.
    fn enter_segment(&mut self, index: usize, first_activation: bool, events: &mut Vec<Event>) {
        self.state.current_index = Some(index);
        if let Some(tracker) = self.trackers.get_mut(index) {
            tracker.reset();
            tracker.start();
        }
        if let Some(segment) = self.display_segment(index) {
            tracing::info!(index, name = %segment.name, "segment started");
            events.push(Event::SegmentChanged {
                index,
                segment,
                at: Utc::now(),
            });
        }
        let is_exercise = self.routine.get(index).is_some_and(|s| !s.is_rest());
        if first_activation && is_exercise {
            return;
        }
        let line = self.entry_announcement(index);
        self.announce(line, events);
    }

    fn complete_workout(&mut self, events: &mut Vec<Event>) {
        let line = self.config.complete_announcement.clone();
        self.announce(line, events);

        let total_duration_nice = self.routine.total_duration_nice();
        tracing::info!(total = %total_duration_nice, "workout complete");
        events.push(Event::WorkoutComplete {
            total_duration_nice,
            message: format!(
                "{} Minute Workout Complete",
                self.routine.workout_length_minutes()
            ),
            at: Utc::now(),
        });

        self.reset_clocks();
        self.state.current_index = None;
        self.state.started = false;
        self.state.finished = true;
        self.set_run_mode(RunMode::Paused, events);
    }

    fn entry_announcement(&self, index: usize) -> String {
        let Some(segment) = self.routine.get(index) else {
            return String::new();
        };
        match segment.kind {
            SegmentKind::Exercise => format!("starting {}", segment.name),
            SegmentKind::Rest => match self.routine.get(index + 1) {
                Some(next) => {
                    let secs = self
                        .trackers
                        .get(index)
                        .map(|t| t.remaining_secs())
                        .unwrap_or(u64::from(segment.duration_secs));
                    format!("resting for {secs} seconds; coming up: {}", next.name)
                }
                None => self.config.cooldown_message.clone(),
            },
        }
    }

    /// The routine's segment as it should be displayed. The last rest of
    /// the routine is relabelled as a cooldown.
    fn display_segment(&self, index: usize) -> Option<DisplaySegment> {
        let segment = self.routine.get(index)?;
        if segment.is_rest() && index + 1 >= self.routine.len() {
            Some(DisplaySegment::final_stretch(
                segment,
                &self.config.cooldown_name,
                &self.config.cooldown_message,
            ))
        } else {
            Some(DisplaySegment::from(segment))
        }
    }

    /// At most one utterance is in flight; anything requested meanwhile is
    /// dropped.
    fn announce(&mut self, text: String, events: &mut Vec<Event>) {
        if text.is_empty() {
            return;
        }
        if self.speech_in_flight {
            tracing::warn!(%text, "announcement dropped, previous utterance still playing");
            return;
        }
        self.speech_in_flight = true;
        self.ducking.set(true);
        events.push(Event::SpeechRequested {
            text,
            generation: self.generation,
            at: Utc::now(),
        });
    }

    fn reset_clocks(&mut self) {
        self.clock.reset();
        for tracker in &mut self.trackers {
            tracker.reset();
        }
    }

    /// Rewind to a fresh paused session. Reports the pause if it was playing.
    fn restart_session(&mut self, events: &mut Vec<Event>) {
        let was_playing = self.state.run_mode == RunMode::Playing;
        self.reset_clocks();
        self.state = PlaybackState::default();
        if was_playing {
            self.set_run_mode(RunMode::Paused, events);
        }
        self.generation += 1;
        self.speech_in_flight = false;
        self.ducking.set(false);
    }
}

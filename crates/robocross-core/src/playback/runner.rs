//! Real-time driver for [`PlaybackEngine`].
//!
//! One tokio task owns the engine and multiplexes three inputs with
//! `select!`: UI commands, speech completions and the tick interval. All
//! engine mutation happens on that task, so no locking is needed.

use chrono::Utc;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::engine::{PlaybackEngine, PlaybackSnapshot};
use crate::announcer::Announcer;
use crate::error::{BuildError, CoreError, Result};
use crate::events::Event;
use crate::routine::Routine;

#[derive(Debug)]
pub enum PlaybackCommand {
    TogglePlayPause,
    Reset,
    Load(Box<Routine>),
    /// Report a build failure to the UI and clear the current routine.
    LoadFailed(BuildError),
    Snapshot(oneshot::Sender<PlaybackSnapshot>),
    Shutdown,
}

/// Cloneable control surface for a running [`PlaybackRunner`].
#[derive(Debug, Clone)]
pub struct PlaybackHandle {
    commands: mpsc::UnboundedSender<PlaybackCommand>,
}

impl PlaybackHandle {
    fn send(&self, command: PlaybackCommand) -> Result<()> {
        self.commands
            .send(command)
            .map_err(|_| CoreError::PlaybackStopped)
    }

    pub fn toggle_play_pause(&self) -> Result<()> {
        self.send(PlaybackCommand::TogglePlayPause)
    }

    pub fn reset(&self) -> Result<()> {
        self.send(PlaybackCommand::Reset)
    }

    pub fn load(&self, routine: Routine) -> Result<()> {
        self.send(PlaybackCommand::Load(Box::new(routine)))
    }

    pub fn load_failed(&self, error: BuildError) -> Result<()> {
        self.send(PlaybackCommand::LoadFailed(error))
    }

    pub async fn snapshot(&self) -> Result<PlaybackSnapshot> {
        let (tx, rx) = oneshot::channel();
        self.send(PlaybackCommand::Snapshot(tx))?;
        rx.await.map_err(|_| CoreError::PlaybackStopped)
    }

    pub fn shutdown(&self) -> Result<()> {
        self.send(PlaybackCommand::Shutdown)
    }
}

pub struct PlaybackRunner {
    engine: PlaybackEngine,
    announcer: Announcer,
    events: mpsc::UnboundedSender<Event>,
    speech_done: mpsc::UnboundedSender<u64>,
}

impl PlaybackRunner {
    /// Start the runner on the current tokio runtime.
    ///
    /// Returns the control handle, the event stream and the task handle.
    /// The task ends on [`PlaybackCommand::Shutdown`] or when every handle
    /// has been dropped.
    pub fn spawn(
        engine: PlaybackEngine,
        announcer: Announcer,
    ) -> (PlaybackHandle, mpsc::UnboundedReceiver<Event>, JoinHandle<()>) {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (speech_tx, speech_rx) = mpsc::unbounded_channel();

        let runner = Self {
            engine,
            announcer,
            events: event_tx,
            speech_done: speech_tx,
        };
        let task = tokio::spawn(runner.run(command_rx, speech_rx));

        (PlaybackHandle { commands: command_tx }, event_rx, task)
    }

    async fn run(
        mut self,
        mut commands: mpsc::UnboundedReceiver<PlaybackCommand>,
        mut speech_done: mpsc::UnboundedReceiver<u64>,
    ) {
        let mut ticker = tokio::time::interval(self.engine.config().tick_period());
        // Late ticks are caught up so elapsed time tracks the wall clock.
        ticker.set_missed_tick_behavior(MissedTickBehavior::Burst);
        tracing::info!(period_ms = self.engine.config().tick_period_ms, "playback runner started");

        loop {
            tokio::select! {
                command = commands.recv() => {
                    match command {
                        Some(PlaybackCommand::Shutdown) | None => break,
                        Some(command) => self.apply(command),
                    }
                }
                Some(generation) = speech_done.recv() => {
                    let events = self.engine.speech_finished(generation);
                    self.dispatch(events);
                }
                _ = ticker.tick() => {
                    let events = self.engine.tick();
                    self.dispatch(events);
                }
            }
        }

        tracing::info!("playback runner stopped");
    }

    fn apply(&mut self, command: PlaybackCommand) {
        let events = match command {
            PlaybackCommand::TogglePlayPause => self.engine.toggle_play_pause(),
            PlaybackCommand::Reset => self.engine.reset(),
            PlaybackCommand::Load(routine) => match self.engine.load(*routine) {
                Ok(events) => events,
                Err(e) => {
                    tracing::warn!(error = %e, "routine rejected");
                    self.engine.load_failed(&e)
                }
            },
            PlaybackCommand::LoadFailed(error) => self.engine.load_failed(&error),
            PlaybackCommand::Snapshot(reply) => {
                let _ = reply.send(self.engine.snapshot());
                return;
            }
            PlaybackCommand::Shutdown => return,
        };
        self.dispatch(events);
        self.publish(Event::StateSnapshot {
            snapshot: self.engine.snapshot(),
            at: Utc::now(),
        });
    }

    /// Forward events to the UI, handing speech requests to the announcer
    /// on the way.
    fn dispatch(&self, events: Vec<Event>) {
        for event in events {
            if let Event::SpeechRequested { text, generation, .. } = &event {
                self.announcer
                    .speak(text.clone(), *generation, self.speech_done.clone());
            }
            self.publish(event);
        }
    }

    fn publish(&self, event: Event) {
        if self.events.send(event).is_err() {
            tracing::trace!("event dropped, no subscriber");
        }
    }
}

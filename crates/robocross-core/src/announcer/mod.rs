//! Text-to-speech announcer and background-audio ducking.
//!
//! Speaking is a blocking external call, so it always runs on tokio's
//! blocking pool. Completion is reported back through a channel tagged with
//! the session generation that requested it; the playback engine ignores
//! completions from a session that has since been reset.

use std::io;
use std::process::Command;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// Something that can say a line out loud. Implementations may block.
pub trait Speaker: Send + Sync {
    fn speak(&self, text: &str) -> io::Result<()>;
}

/// Runs an external speech command, e.g. `say -v Samantha "starting squats"`.
#[derive(Debug, Clone)]
pub struct CommandSpeaker {
    program: String,
    voice: Option<String>,
}

impl CommandSpeaker {
    pub fn new(program: impl Into<String>, voice: Option<String>) -> Self {
        Self {
            program: program.into(),
            voice,
        }
    }
}

impl Speaker for CommandSpeaker {
    fn speak(&self, text: &str) -> io::Result<()> {
        let mut command = Command::new(&self.program);
        if let Some(voice) = &self.voice {
            command.arg("-v").arg(voice);
        }
        let status = command.arg(text).status()?;
        if !status.success() {
            return Err(io::Error::other(format!(
                "{} exited with {status}",
                self.program
            )));
        }
        Ok(())
    }
}

/// Writes each line to the log instead of speaking it.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSpeaker;

impl Speaker for LogSpeaker {
    fn speak(&self, text: &str) -> io::Result<()> {
        tracing::info!(target: "robocross::speech", "{text}");
        Ok(())
    }
}

/// Shared "lower your volume" flag for the background-audio player.
#[derive(Debug, Clone, Default)]
pub struct DuckingFlag(Arc<AtomicBool>);

impl DuckingFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, ducked: bool) {
        self.0.store(ducked, Ordering::SeqCst);
    }

    pub fn is_ducked(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnouncerConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_command")]
    pub command: String,
    #[serde(default = "default_voice")]
    pub voice: Option<String>,
}

fn default_true() -> bool {
    true
}
fn default_command() -> String {
    "say".into()
}
fn default_voice() -> Option<String> {
    Some("Samantha".into())
}

impl Default for AnnouncerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            command: default_command(),
            voice: default_voice(),
        }
    }
}

/// Dispatches utterances off the scheduler task.
#[derive(Clone)]
pub struct Announcer {
    speaker: Arc<dyn Speaker>,
}

impl Announcer {
    pub fn new(speaker: Arc<dyn Speaker>) -> Self {
        Self { speaker }
    }

    /// Speak through the configured command, or the log when disabled.
    pub fn from_config(config: &AnnouncerConfig) -> Self {
        if config.enabled {
            Self::new(Arc::new(CommandSpeaker::new(
                config.command.clone(),
                config.voice.clone(),
            )))
        } else {
            Self::new(Arc::new(LogSpeaker))
        }
    }

    /// Speak `text` on the blocking pool, then send `generation` on `done`.
    ///
    /// Must be called from within a tokio runtime. A failed speech command
    /// still reports completion so the audio is never left ducked.
    pub fn speak(&self, text: String, generation: u64, done: mpsc::UnboundedSender<u64>) {
        let speaker = Arc::clone(&self.speaker);
        tokio::task::spawn_blocking(move || {
            if let Err(e) = speaker.speak(&text) {
                tracing::warn!(error = %e, %text, "speech failed");
            }
            let _ = done.send(generation);
        });
    }
}

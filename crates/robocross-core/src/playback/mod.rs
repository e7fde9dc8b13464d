mod config;
mod engine;
mod runner;

pub use config::PlaybackConfig;
pub use engine::{PlaybackEngine, PlaybackSnapshot, PlaybackState, RunMode};
pub use runner::{PlaybackCommand, PlaybackHandle, PlaybackRunner};

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::timer::END_OF_WORKOUT;

/// Playback settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Tick period in milliseconds, below one second. The clock advances
    /// before it polls, so a full-second period would land on second 1 and
    /// never fire the key at 0.
    #[serde(default = "default_tick_period_ms")]
    pub tick_period_ms: u64,
    #[serde(default = "default_end_notification")]
    pub end_notification: String,
    /// Shown in place of the last rest period.
    #[serde(default = "default_cooldown_name")]
    pub cooldown_name: String,
    #[serde(default = "default_cooldown_message")]
    pub cooldown_message: String,
    #[serde(default = "default_complete_announcement")]
    pub complete_announcement: String,
    #[serde(default = "default_ready_message")]
    pub ready_message: String,
}

fn default_tick_period_ms() -> u64 {
    50
}
fn default_end_notification() -> String {
    END_OF_WORKOUT.into()
}
fn default_cooldown_name() -> String {
    "cool down".into()
}
fn default_cooldown_message() -> String {
    "final stretch, take it easy and cool down".into()
}
fn default_complete_announcement() -> String {
    "workout complete".into()
}
fn default_ready_message() -> String {
    "get ready...".into()
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            tick_period_ms: default_tick_period_ms(),
            end_notification: default_end_notification(),
            cooldown_name: default_cooldown_name(),
            cooldown_message: default_cooldown_message(),
            complete_announcement: default_complete_announcement(),
            ready_message: default_ready_message(),
        }
    }
}

impl PlaybackConfig {
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_period_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..1000).contains(&self.tick_period_ms) {
            return Err(ConfigError::InvalidValue {
                key: "playback.tick_period_ms".into(),
                message: format!("{} is outside 1..1000", self.tick_period_ms),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_period_bounds() {
        let mut config = PlaybackConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.tick_period(), Duration::from_millis(50));

        config.tick_period_ms = 0;
        assert!(config.validate().is_err());
        config.tick_period_ms = 1000;
        assert!(config.validate().is_err());
        config.tick_period_ms = 999;
        assert!(config.validate().is_ok());
    }
}

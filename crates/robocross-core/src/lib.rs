//! # Robocross Core Library
//!
//! This library provides the core logic for Robocross, a timed interval
//! workout builder and player. All operations are available through the
//! `robocross` CLI binary, which is a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Catalog**: Read-only exercise store with equipment and name filters
//! - **Routine Builder**: Turns timing parameters into alternating exercise
//!   and rest segments, picking exercises at random by workout type
//! - **Timer**: Notification table, tick-driven segment clock and
//!   per-segment progress trackers
//! - **Playback Engine**: Tick-driven state machine coordinating the clocks,
//!   segment advancement and spoken announcements
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`RoutineBuilder`]: Routine generation
//! - [`PlaybackEngine`]: Core playback state machine
//! - [`PlaybackRunner`]: Real-time tokio driver for the engine
//! - [`Config`]: Application configuration management

pub mod announcer;
pub mod catalog;
pub mod error;
pub mod events;
pub mod playback;
pub mod routine;
pub mod storage;
pub mod timer;

pub use announcer::{Announcer, AnnouncerConfig, DuckingFlag, Speaker};
pub use catalog::{Catalog, Equipment, Exercise};
pub use error::{BuildError, CatalogError, ConfigError, CoreError};
pub use events::Event;
pub use playback::{PlaybackConfig, PlaybackEngine, PlaybackHandle, PlaybackRunner, PlaybackSnapshot, RunMode};
pub use routine::{Routine, RoutineBuilder, RoutineConfig, RoutineParams, Segment, SegmentKind, WorkoutType};
pub use storage::Config;
pub use timer::{NotificationTable, ProgressTracker, SegmentClock};

mod clock;
mod format;
mod progress;
mod table;

pub use clock::{Notification, SegmentClock};
pub use format::{format_hms, time_nice};
pub use progress::{ProgressTracker, TrackerState};
pub use table::{NotificationTable, END_OF_WORKOUT};
